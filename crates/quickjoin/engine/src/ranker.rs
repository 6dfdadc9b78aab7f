//! Instance ranking
//!
//! Picks the busiest instance that still has room. Candidates are ordered by
//! occupancy, highest first; the sort is stable so equal counts keep the order
//! the platform listed them in. Candidates whose occupancy is unknown sort
//! after every known count.
//!
//! Filters:
//! - known occupancy `<= 0` is rejected (empty instance)
//! - known occupancy `>= capacity` is rejected when capacity is known too
//!   (full instance)
//! - unknown occupancy is always eligible

use quickjoin_types::InstanceCandidate;
use std::cmp::Reverse;

/// Whether a single candidate passes both filters
pub fn is_eligible(candidate: &InstanceCandidate) -> bool {
    let Some(occupancy) = candidate.occupancy else {
        return true;
    };
    if occupancy <= 0 {
        return false;
    }
    match candidate.capacity {
        Some(capacity) => occupancy < capacity,
        None => true,
    }
}

/// Select the best joinable candidate, if any.
pub fn select(candidates: &[InstanceCandidate]) -> Option<&InstanceCandidate> {
    let mut ordered: Vec<&InstanceCandidate> = candidates.iter().collect();
    // `Option` orders `None` first, so reversing puts unknown counts last.
    ordered.sort_by_key(|c| Reverse(c.occupancy));
    ordered.into_iter().find(|c| is_eligible(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use quickjoin_types::WorldId;

    fn candidate(id: &str, occupancy: Option<i64>, capacity: Option<i64>) -> InstanceCandidate {
        InstanceCandidate::new(WorldId::new("wrld_test"), id, occupancy, capacity)
    }

    #[test]
    fn test_picks_busiest_with_room() {
        let candidates = vec![
            candidate("quiet", Some(2), Some(16)),
            candidate("busy", Some(12), Some(16)),
            candidate("medium", Some(7), Some(16)),
        ];
        assert_eq!(select(&candidates).unwrap().instance_id, "busy");
    }

    #[test]
    fn test_skips_empty_and_full() {
        let candidates = vec![
            candidate("full", Some(16), Some(16)),
            candidate("overfull", Some(20), Some(16)),
            candidate("empty", Some(0), Some(16)),
            candidate("ok", Some(3), Some(16)),
        ];
        assert_eq!(select(&candidates).unwrap().instance_id, "ok");
    }

    #[test]
    fn test_none_when_nothing_qualifies() {
        let candidates = vec![
            candidate("full", Some(8), Some(8)),
            candidate("empty", Some(0), Some(8)),
            candidate("negative", Some(-1), Some(8)),
        ];
        assert!(select(&candidates).is_none());
        assert!(select(&[]).is_none());
    }

    #[test]
    fn test_ties_keep_source_order() {
        let candidates = vec![
            candidate("first", Some(5), Some(10)),
            candidate("second", Some(5), Some(10)),
        ];
        assert_eq!(select(&candidates).unwrap().instance_id, "first");
    }

    #[test]
    fn test_unknown_occupancy_is_eligible() {
        let candidates = vec![
            candidate("full", Some(10), Some(10)),
            candidate("unknown", None, Some(10)),
        ];
        assert_eq!(select(&candidates).unwrap().instance_id, "unknown");
        assert!(is_eligible(&candidate("unknown", None, Some(0))));
        assert!(is_eligible(&candidate("unknown", None, None)));
    }

    #[test]
    fn test_known_occupancy_ranks_before_unknown() {
        let candidates = vec![
            candidate("unknown", None, Some(10)),
            candidate("known", Some(1), Some(10)),
        ];
        assert_eq!(select(&candidates).unwrap().instance_id, "known");
    }

    #[test]
    fn test_known_occupancy_unknown_capacity() {
        // Only the empty filter can be evaluated.
        assert!(is_eligible(&candidate("x", Some(500), None)));
        assert!(!is_eligible(&candidate("x", Some(0), None)));
    }

    fn arb_candidate() -> impl Strategy<Value = InstanceCandidate> {
        (
            "[a-z0-9]{1,8}",
            proptest::option::of(-5i64..50),
            proptest::option::of(0i64..50),
        )
            .prop_map(|(id, occupancy, capacity)| candidate(&id, occupancy, capacity))
    }

    proptest! {
        #[test]
        fn prop_never_returns_empty_or_full(candidates in proptest::collection::vec(arb_candidate(), 0..20)) {
            if let Some(pick) = select(&candidates) {
                if let Some(occupancy) = pick.occupancy {
                    prop_assert!(occupancy > 0);
                    if let Some(capacity) = pick.capacity {
                        prop_assert!(occupancy < capacity);
                    }
                }
            }
        }

        #[test]
        fn prop_selection_is_idempotent(candidates in proptest::collection::vec(arb_candidate(), 0..20)) {
            let first = select(&candidates).cloned();
            let second = select(&candidates).cloned();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_returns_some_iff_any_eligible(candidates in proptest::collection::vec(arb_candidate(), 0..20)) {
            prop_assert_eq!(select(&candidates).is_some(), candidates.iter().any(is_eligible));
        }
    }
}
