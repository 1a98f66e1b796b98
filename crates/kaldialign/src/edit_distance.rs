//! Levenshtein edit distance with per-operation counts.
//!
//! Rows advance over the hypothesis and columns over the reference, keeping
//! only two rows alive, so memory is `O(len(ref))`. No alignment path is
//! recovered here; see [`crate::alignment`] for that.

use crate::cost::CostModel;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Edit counts between a reference and a hypothesis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditDistance {
    /// Number of edit operations, `insertions + deletions + substitutions`.
    pub total: usize,
    pub insertions: usize,
    pub deletions: usize,
    pub substitutions: usize,
    /// Length of the reference sequence.
    pub ref_len: usize,
}

impl EditDistance {
    /// `total / ref_len`, or `None` for an empty reference.
    pub fn error_rate(&self) -> Option<f64> {
        if self.ref_len == 0 {
            None
        } else {
            Some(self.total as f64 / self.ref_len as f64)
        }
    }
}

impl AddAssign for EditDistance {
    fn add_assign(&mut self, rhs: Self) {
        self.total += rhs.total;
        self.insertions += rhs.insertions;
        self.deletions += rhs.deletions;
        self.substitutions += rhs.substitutions;
        self.ref_len += rhs.ref_len;
    }
}

/// Running statistics for one DP cell.
///
/// `cost` is the minimum weighted cost for the prefix pair; the counts
/// describe the path that reached it.
#[derive(Debug, Clone, Copy, Default)]
struct ErrorStats {
    insertions: usize,
    deletions: usize,
    substitutions: usize,
    total: usize,
    cost: u64,
}

impl ErrorStats {
    fn insert(mut self, cost: u64) -> Self {
        self.insertions += 1;
        self.total += 1;
        self.cost = cost;
        self
    }

    fn delete(mut self, cost: u64) -> Self {
        self.deletions += 1;
        self.total += 1;
        self.cost = cost;
        self
    }

    fn substitute(mut self, cost: u64, is_match: bool) -> Self {
        if !is_match {
            self.substitutions += 1;
            self.total += 1;
        }
        self.cost = cost;
        self
    }
}

/// Edit distance under the uniform model, or the sclite model when
/// `sclite_mode` is set.
pub fn edit_distance<T: PartialEq>(
    reference: &[T],
    hypothesis: &[T],
    sclite_mode: bool,
) -> EditDistance {
    edit_distance_with(reference, hypothesis, CostModel::from_sclite_mode(sclite_mode))
}

/// Edit distance under an explicit cost model.
///
/// The model only decides which predecessor wins; the reported counts are
/// exact operation counts along the chosen path, not weighted costs.
pub fn edit_distance_with<T: PartialEq>(
    reference: &[T],
    hypothesis: &[T],
    costs: CostModel,
) -> EditDistance {
    let ins_cost = u64::from(costs.insertion);
    let del_cost = u64::from(costs.deletion);
    let sub_cost = u64::from(costs.substitution);

    // Row for an empty hypothesis: everything in the reference is deleted.
    let mut prev: Vec<ErrorStats> = (0..=reference.len())
        .map(|i| ErrorStats {
            deletions: i,
            total: i,
            cost: i as u64 * del_cost,
            ..ErrorStats::default()
        })
        .collect();
    let mut curr = vec![ErrorStats::default(); reference.len() + 1];

    for hyp_sym in hypothesis {
        curr[0] = prev[0].insert(prev[0].cost + ins_cost);
        for (i, ref_sym) in reference.iter().enumerate() {
            let col = i + 1;
            let is_match = ref_sym == hyp_sym;
            let ins_err = prev[col].cost + ins_cost;
            let del_err = curr[col - 1].cost + del_cost;
            let sub_err = prev[col - 1].cost + if is_match { 0 } else { sub_cost };

            // Substitution (or match) only when strictly cheapest, then
            // deletion over insertion. Ties fall through to insertion.
            curr[col] = if sub_err < ins_err && sub_err < del_err {
                prev[col - 1].substitute(sub_err, is_match)
            } else if del_err < ins_err {
                curr[col - 1].delete(del_err)
            } else {
                prev[col].insert(ins_err)
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let last = prev[reference.len()];
    EditDistance {
        total: last.total,
        insertions: last.insertions,
        deletions: last.deletions,
        substitutions: last.substitutions,
        ref_len: reference.len(),
    }
}
