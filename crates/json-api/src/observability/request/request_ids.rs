//! Request ID generation and response header helpers.

use salvo::{
    http::{StatusCode, header::HeaderValue},
    prelude::Response,
};
use tracing::warn;
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller supplied id we echo back.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Reuse the caller's id when it is short printable ASCII, otherwise mint a fresh one.
pub(super) fn resolve_request_id(header_value: Option<String>) -> String {
    header_value
        .map(|value| value.trim().to_string())
        .filter(|value| is_acceptable(value))
        .unwrap_or_else(generate_request_id)
}

fn is_acceptable(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.bytes().all(|byte| byte.is_ascii_graphic())
}

pub(super) fn set_request_id_header(res: &mut Response, request_id: &str) {
    let header_value = match HeaderValue::from_str(request_id) {
        Ok(value) => value,
        Err(source) => {
            warn!(
                request_id,
                "could not encode request id for response header: {source}"
            );

            return;
        }
    };

    res.headers_mut().insert(REQUEST_ID_HEADER, header_value);
}

pub(super) fn response_status_or_ok(status_code: Option<StatusCode>) -> StatusCode {
    status_code.unwrap_or(StatusCode::OK)
}

fn generate_request_id() -> String {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_request_id_is_replaced() {
        let request_id = resolve_request_id(Some("   ".to_string()));

        assert!(Uuid::parse_str(&request_id).is_ok(), "expected a uuid");
    }

    #[test]
    fn caller_request_id_is_kept() {
        assert_eq!(resolve_request_id(Some(" till-7-0042 ".to_string())), "till-7-0042");
    }

    #[test]
    fn oversized_or_unprintable_ids_are_replaced() {
        let long = "a".repeat(MAX_REQUEST_ID_LEN + 1);

        for value in [long, "till 7".to_string(), "caf\u{e9}".to_string()] {
            let request_id = resolve_request_id(Some(value));

            assert!(Uuid::parse_str(&request_id).is_ok(), "expected a fresh uuid");
        }
    }

    #[test]
    fn unset_status_means_ok() {
        assert_eq!(response_status_or_ok(None), StatusCode::OK);
        assert_eq!(
            response_status_or_ok(Some(StatusCode::CONFLICT)),
            StatusCode::CONFLICT
        );
    }
}
