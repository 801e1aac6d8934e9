//! Fernwood Domain Concerns

pub mod categories;
pub mod customers;
pub mod orders;
pub mod pos;
pub mod products;
pub mod reports;
pub mod returns;
pub mod settings;
pub mod suppliers;
pub mod transactions;
pub mod users;

/// Next human readable identifier in a `PREFIX-0001` style sequence.
///
/// Ids that don't carry the prefix, or whose suffix isn't a number, are ignored.
pub(crate) fn next_sequence_id<'a>(
    prefix: &str,
    width: usize,
    existing: impl IntoIterator<Item = &'a str>,
) -> String {
    let next = existing
        .into_iter()
        .filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .max()
        .unwrap_or(0)
        .saturating_add(1);

    format!("{prefix}{next:0width$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_sequence_id_follows_the_highest_existing_id() {
        let ids = ["PROD-000002", "PROD-000010", "PROD-000003"];

        assert_eq!(next_sequence_id("PROD-", 6, ids), "PROD-000011");
    }

    #[test]
    fn next_sequence_id_ignores_foreign_ids() {
        let ids = ["1", "legacy", "SUP-x"];

        assert_eq!(next_sequence_id("SUP-", 3, ids), "SUP-001");
    }

    #[test]
    fn next_sequence_id_grows_past_the_width() {
        assert_eq!(next_sequence_id("TXN-", 4, ["TXN-9999"]), "TXN-10000");
    }
}
