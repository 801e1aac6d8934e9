//! Auth middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};

use crate::{auth::into_status_error, extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));
        ctrl.skip_rest();

        return;
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state,
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    let user = match state.app.auth.authenticate_bearer(token).await {
        Ok(user) => user,
        Err(error) => {
            res.render(into_status_error(error));
            ctrl.skip_rest();

            return;
        }
    };

    depot.insert_auth_user(user);

    ctrl.call_next(req, depot, res).await;
}

/// Raw bearer token from the `Authorization` header.
pub(crate) fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
