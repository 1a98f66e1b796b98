/// Rejected calls into the alignment and bootstrap routines.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignError {
    #[error("sequence '{sequence}' contains the epsilon symbol at position {position}")]
    EpsilonInInput {
        sequence: &'static str,
        position: usize,
    },

    #[error("cannot bootstrap over an empty set of utterance scores")]
    EmptyScores,

    #[error("paired inputs differ in length ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },

    #[error("bootstrap needs at least one replication")]
    NoReplications,

    #[error("bootstrap replicate {replicate} sampled only utterances with zero reference length")]
    ZeroReferenceLength { replicate: usize },
}
