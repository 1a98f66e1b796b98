use serde::{Deserialize, Serialize};

/// Per-operation costs used by both dynamic programs.
///
/// Only flat costs are supported: every insertion costs the same, every
/// deletion costs the same and every substitution costs the same. A match
/// is always free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CostModel {
    pub insertion: u32,
    pub deletion: u32,
    pub substitution: u32,
}

impl CostModel {
    /// Unit costs (Kaldi `compute-wer` convention).
    pub const UNIFORM: CostModel = CostModel {
        insertion: 1,
        deletion: 1,
        substitution: 1,
    };

    /// NIST sclite weighting.
    pub const SCLITE: CostModel = CostModel {
        insertion: 3,
        deletion: 3,
        substitution: 4,
    };

    pub const fn from_sclite_mode(sclite_mode: bool) -> Self {
        if sclite_mode {
            Self::SCLITE
        } else {
            Self::UNIFORM
        }
    }

    #[inline]
    pub(crate) fn substitution_or_match<T: PartialEq>(&self, a: &T, b: &T) -> u32 {
        if a == b {
            0
        } else {
            self.substitution
        }
    }
}

impl Default for CostModel {
    fn default() -> Self {
        Self::UNIFORM
    }
}
