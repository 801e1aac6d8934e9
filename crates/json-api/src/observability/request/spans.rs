//! Route labels for request spans and metrics.

/// Collapse record identifiers in a path so requests for different records share a label.
///
/// Any segment carrying a digit (`PROD-000001`, `TXN-1001`, a user uuid) becomes `{id}`.
pub(super) fn route_label(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut label = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            label.push('/');
        }

        if segment.chars().any(|ch| ch.is_ascii_digit()) {
            label.push_str("{id}");
        } else {
            label.push_str(segment);
        }
    }

    label
}
