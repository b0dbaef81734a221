//! Pure composition helpers for the recommendation feed.
//!
//! The feed service issues the actual queries; these helpers hold the
//! order-sensitive set logic so it can be tested without a database.

use crate::types::DbId;

/// Project a user's recent likes down to the distinct categories they
/// touched, preserving first-occurrence order.
pub fn dedup_categories<I>(category_ids: I) -> Vec<DbId>
where
    I: IntoIterator<Item = DbId>,
{
    let mut seen = std::collections::HashSet::new();
    category_ids
        .into_iter()
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Concatenate primary results and backfill, primary first, dropping
/// duplicate ids and capping the total at `limit`.
///
/// The backfill query already excludes primary ids, so duplicates only
/// appear if the two queries raced a concurrent insert; dropping them here
/// keeps the no-duplicates guarantee unconditional.
pub fn merge_ranked<T, F>(primary: Vec<T>, backfill: Vec<T>, limit: usize, id_of: F) -> Vec<T>
where
    F: Fn(&T) -> DbId,
{
    let mut seen = std::collections::HashSet::new();
    primary
        .into_iter()
        .chain(backfill)
        .filter(|item| seen.insert(id_of(item)))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_preserves_first_occurrence_order() {
        assert_eq!(dedup_categories(vec![5, 3, 5, 1, 3, 5]), vec![5, 3, 1]);
    }

    #[test]
    fn dedup_of_empty_is_empty() {
        assert_eq!(dedup_categories(Vec::new()), Vec::<DbId>::new());
    }

    #[test]
    fn merge_keeps_primary_first() {
        let merged = merge_ranked(vec![10, 7, 2], vec![20, 15], 6, |id| *id);
        assert_eq!(merged, vec![10, 7, 2, 20, 15]);
    }

    #[test]
    fn merge_caps_at_limit() {
        let merged = merge_ranked(vec![1, 2, 3], vec![4, 5, 6], 4, |id| *id);
        assert_eq!(merged, vec![1, 2, 3, 4]);
    }

    #[test]
    fn merge_drops_duplicate_ids() {
        let merged = merge_ranked(vec![1, 2, 3], vec![3, 4], 10, |id| *id);
        assert_eq!(merged, vec![1, 2, 3, 4]);
    }

    #[test]
    fn merge_with_zero_limit_is_empty() {
        let merged = merge_ranked(vec![1, 2], vec![3], 0, |id| *id);
        assert!(merged.is_empty());
    }
}
