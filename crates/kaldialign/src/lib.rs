//! Kaldi-compatible edit distance, alignment and bootstrap WER statistics.
//!
//! Sequences are slices of any symbol type with equality: integer token IDs,
//! `&str` words or `char`s. Cost model selection is per call; nothing here
//! holds global state.
//!
//! ```
//! use kaldialign::{align, edit_distance};
//!
//! let d = edit_distance(&[1, 2, 3], &[1, 3], false);
//! assert_eq!((d.total, d.deletions), (1, 1));
//!
//! let ali = align(&[1, 2, 3], &[1, 3], &0, false).unwrap();
//! assert_eq!(ali.pairs, vec![(1, 1), (2, 0), (3, 3)]);
//! ```

pub mod alignment;
pub mod bootstrap;
pub mod cost;
pub mod edit_distance;
pub mod error;

pub use alignment::{align, align_with, AlignedPair, Alignment};
pub use bootstrap::{
    bootstrap_wer_ci, bootstrap_wer_interval, compute_utterance_scores,
    paired_improvement_probability,
    BootstrapConfig, BootstrapReport, UtteranceScore, WerInterval,
};
pub use cost::CostModel;
pub use edit_distance::{edit_distance, edit_distance_with, EditDistance};
pub use error::AlignError;
