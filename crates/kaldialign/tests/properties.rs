use kaldialign::{align, align_with, edit_distance, CostModel};
use proptest::prelude::*;

const EPS: u8 = 0;

/// Small alphabet so that matches and ties are frequent.
fn sequence() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(1u8..5, 0..12)
}

fn strip(pairs: &[(u8, u8)]) -> (Vec<u8>, Vec<u8>) {
    let a = pairs.iter().map(|p| p.0).filter(|&s| s != EPS).collect();
    let b = pairs.iter().map(|p| p.1).filter(|&s| s != EPS).collect();
    (a, b)
}

proptest! {
    #[test]
    fn prop_identity_has_no_edits(s in sequence(), sclite in any::<bool>()) {
        prop_assert_eq!(edit_distance(&s, &s, sclite).total, 0);
        let ali = align(&s, &s, &EPS, sclite).unwrap();
        prop_assert_eq!(ali.total_cost, 0);
        prop_assert!(ali.pairs.iter().all(|(x, y)| x == y && *x != EPS));
    }

    #[test]
    fn prop_counts_sum_to_total(a in sequence(), b in sequence(), sclite in any::<bool>()) {
        let d = edit_distance(&a, &b, sclite);
        prop_assert_eq!(d.insertions + d.deletions + d.substitutions, d.total);
        prop_assert_eq!(d.ref_len, a.len());
    }

    #[test]
    fn prop_uniform_total_is_symmetric(a in sequence(), b in sequence()) {
        let ab = edit_distance(&a, &b, false);
        let ba = edit_distance(&b, &a, false);
        prop_assert_eq!(ab.total, ba.total);
    }

    #[test]
    fn prop_empty_sides_are_pure_gaps(s in sequence()) {
        let empty: Vec<u8> = Vec::new();
        let d = edit_distance(&empty, &s, false);
        prop_assert_eq!((d.total, d.insertions), (s.len(), s.len()));
        let d = edit_distance(&s, &empty, false);
        prop_assert_eq!((d.total, d.deletions), (s.len(), s.len()));
    }

    #[test]
    fn prop_alignment_reconstructs_inputs(
        a in sequence(),
        b in sequence(),
        sclite in any::<bool>()
    ) {
        let ali = align(&a, &b, &EPS, sclite).unwrap();
        prop_assert!(ali.pairs.iter().all(|&(x, y)| x != EPS || y != EPS));
        let (ra, rb) = strip(&ali.pairs);
        prop_assert_eq!(ra, a);
        prop_assert_eq!(rb, b);
    }

    #[test]
    fn prop_engines_agree_under_uniform_costs(a in sequence(), b in sequence()) {
        let d = edit_distance(&a, &b, false);
        let ali = align_with(&a, &b, &EPS, CostModel::UNIFORM).unwrap();
        prop_assert_eq!(d.total as u64, ali.total_cost);
    }

    #[test]
    fn prop_alignment_cost_matches_its_pairs(
        a in sequence(),
        b in sequence(),
        sclite in any::<bool>()
    ) {
        let costs = CostModel::from_sclite_mode(sclite);
        let ali = align_with(&a, &b, &EPS, costs).unwrap();
        let replayed: u64 = ali
            .pairs
            .iter()
            .map(|&(x, y)| {
                u64::from(if x == EPS {
                    costs.insertion
                } else if y == EPS {
                    costs.deletion
                } else if x != y {
                    costs.substitution
                } else {
                    0
                })
            })
            .sum();
        prop_assert_eq!(replayed, ali.total_cost);
    }
}
