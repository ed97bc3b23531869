//! Sparse-position allocation for ordered sibling sets.
//!
//! Columns within a board and cards within a column are ordered by a sparse
//! integer `position` (multiples of [`POSITION_GAP`]). Appending takes the
//! next free multiple; indexed insertion and explicit reordering rewrite the
//! whole sibling set back to the canonical `1000, 2000, 3000, ...` sequence,
//! which keeps positions bounded and collision-free at the cost of O(n) row
//! updates per move. The functions here are pure; the repositories apply the
//! resulting plans inside a single transaction.

use std::collections::HashSet;

use uuid::Uuid;

/// Spacing between ordered siblings.
pub const POSITION_GAP: i64 = 1000;

/// Position for an entity appended after the current maximum.
///
/// An empty sibling group (`None`) starts at [`POSITION_GAP`].
pub fn next_position(existing_max: Option<i64>) -> i64 {
    match existing_max {
        Some(max) => max + POSITION_GAP,
        None => POSITION_GAP,
    }
}

/// Canonical position for the sibling at `index` (0-based).
pub fn canonical_position(index: usize) -> i64 {
    (index as i64 + 1) * POSITION_GAP
}

/// Rewrite every sibling's position to the canonical sequence, preserving
/// the given order.
pub fn plan_rebalance(ordered_ids: &[Uuid]) -> Vec<(Uuid, i64)> {
    ordered_ids
        .iter()
        .enumerate()
        .map(|(index, id)| (*id, canonical_position(index)))
        .collect()
}

/// The result of planning an indexed insertion: canonical positions for the
/// existing siblings plus the slot the inserted entity takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionPlan {
    /// New positions for the existing siblings, in their preserved order.
    pub sibling_positions: Vec<(Uuid, i64)>,
    /// Position of the inserted (or moved) entity.
    pub inserted_position: i64,
}

/// Plan placing one entity at `target_index` within an ordered sibling group.
///
/// `siblings` is the group's current order and must NOT contain the entity
/// being placed (for a same-column move, filter it out first). Siblings at
/// or after the target index shift one canonical slot later so that at no
/// observable instant do two siblings share a position. A `target_index`
/// past the end clamps to appending.
pub fn plan_insertion(siblings: &[Uuid], target_index: usize) -> InsertionPlan {
    let target = target_index.min(siblings.len());
    let sibling_positions = siblings
        .iter()
        .enumerate()
        .map(|(index, id)| {
            let slot = if index < target { index } else { index + 1 };
            (*id, canonical_position(slot))
        })
        .collect();

    InsertionPlan {
        sibling_positions,
        inserted_position: canonical_position(target),
    }
}

/// Whether `ordered` is an exact permutation of `existing`: same length,
/// same membership, no duplicates. Backs the `INVALID_COLUMN_ORDER` /
/// `INVALID_CARD_ORDER` rejections for explicit reorder requests.
pub fn is_permutation_of(existing: &[Uuid], ordered: &[Uuid]) -> bool {
    if existing.len() != ordered.len() {
        return false;
    }
    let ordered_set: HashSet<Uuid> = ordered.iter().copied().collect();
    if ordered_set.len() != ordered.len() {
        return false;
    }
    existing.iter().all(|id| ordered_set.contains(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn first_insertion_into_empty_group_gets_gap() {
        assert_eq!(next_position(None), 1000);
    }

    #[test]
    fn append_advances_by_gap() {
        assert_eq!(next_position(Some(1000)), 2000);
        assert_eq!(next_position(Some(3000)), 4000);
        // Sparse positions left behind by deletions still append after the max.
        assert_eq!(next_position(Some(7000)), 8000);
    }

    #[test]
    fn rebalance_yields_canonical_sequence() {
        let siblings = ids(4);
        let plan = plan_rebalance(&siblings);
        let positions: Vec<i64> = plan.iter().map(|(_, p)| *p).collect();
        assert_eq!(positions, vec![1000, 2000, 3000, 4000]);
        // Order is preserved.
        for (i, (id, _)) in plan.iter().enumerate() {
            assert_eq!(*id, siblings[i]);
        }
    }

    #[test]
    fn rebalance_of_empty_group_is_empty() {
        assert!(plan_rebalance(&[]).is_empty());
    }

    #[test]
    fn insertion_at_front_shifts_everyone() {
        let siblings = ids(3);
        let plan = plan_insertion(&siblings, 0);
        assert_eq!(plan.inserted_position, 1000);
        let positions: Vec<i64> = plan.sibling_positions.iter().map(|(_, p)| *p).collect();
        assert_eq!(positions, vec![2000, 3000, 4000]);
    }

    #[test]
    fn insertion_in_middle_splits_the_group() {
        let siblings = ids(4);
        let plan = plan_insertion(&siblings, 2);
        assert_eq!(plan.inserted_position, 3000);
        let positions: Vec<i64> = plan.sibling_positions.iter().map(|(_, p)| *p).collect();
        assert_eq!(positions, vec![1000, 2000, 4000, 5000]);
    }

    #[test]
    fn insertion_at_end_appends() {
        let siblings = ids(2);
        let plan = plan_insertion(&siblings, 2);
        assert_eq!(plan.inserted_position, 3000);
        let positions: Vec<i64> = plan.sibling_positions.iter().map(|(_, p)| *p).collect();
        assert_eq!(positions, vec![1000, 2000]);
    }

    #[test]
    fn insertion_index_past_end_clamps_to_append() {
        let siblings = ids(2);
        let plan = plan_insertion(&siblings, 99);
        assert_eq!(plan, plan_insertion(&siblings, 2));
    }

    #[test]
    fn insertion_into_empty_group_gets_gap() {
        let plan = plan_insertion(&[], 0);
        assert_eq!(plan.inserted_position, 1000);
        assert!(plan.sibling_positions.is_empty());
    }

    #[test]
    fn insertion_never_collides() {
        for len in 0..6 {
            let siblings = ids(len);
            for index in 0..=len + 2 {
                let plan = plan_insertion(&siblings, index);
                let mut all: Vec<i64> = plan
                    .sibling_positions
                    .iter()
                    .map(|(_, p)| *p)
                    .collect();
                all.push(plan.inserted_position);
                let unique: HashSet<i64> = all.iter().copied().collect();
                assert_eq!(unique.len(), all.len(), "collision at len={len} index={index}");
            }
        }
    }

    #[test]
    fn insertion_result_is_strictly_increasing_in_intended_order() {
        let siblings = ids(5);
        let target = 2;
        let plan = plan_insertion(&siblings, target);
        // Reconstruct the intended order: siblings[..2], inserted, siblings[2..].
        let mut ordered = Vec::new();
        for (i, (_, pos)) in plan.sibling_positions.iter().enumerate() {
            if i == target {
                ordered.push(plan.inserted_position);
            }
            ordered.push(*pos);
        }
        assert!(ordered.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn permutation_accepts_reordered_list() {
        let existing = ids(3);
        let mut ordered = existing.clone();
        ordered.reverse();
        assert!(is_permutation_of(&existing, &ordered));
    }

    #[test]
    fn permutation_rejects_wrong_length() {
        let existing = ids(3);
        assert!(!is_permutation_of(&existing, &existing[..2]));
        assert!(!is_permutation_of(&existing[..2], &existing));
    }

    #[test]
    fn permutation_rejects_foreign_id() {
        let existing = ids(3);
        let mut ordered = existing.clone();
        ordered[1] = Uuid::new_v4();
        assert!(!is_permutation_of(&existing, &ordered));
    }

    #[test]
    fn permutation_rejects_duplicates_of_correct_length() {
        let existing = ids(2);
        let ordered = vec![existing[0], existing[0]];
        assert!(!is_permutation_of(&existing, &ordered));
    }

    #[test]
    fn permutation_accepts_two_empty_lists() {
        assert!(is_permutation_of(&[], &[]));
    }
}
