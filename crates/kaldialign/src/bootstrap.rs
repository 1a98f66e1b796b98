//! Bootstrap resampling over per-utterance edit counts.
//!
//! Every estimator owns one `ChaCha20Rng` seeded from the caller's seed and
//! draws indices in strict order (replication outer, sample position inner),
//! so identical inputs and seed give bit-identical outputs.

use crate::edit_distance::edit_distance;
use crate::error::AlignError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

/// Half-width multiplier of a two-sided Gaussian 95% interval.
const Z_95: f64 = 1.96;

/// Minimal per-utterance summary needed for corpus WER.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtteranceScore {
    /// Edit operation count (not weighted cost).
    pub errors: usize,
    pub ref_len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    pub replications: usize,
    pub seed: u64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            replications: 10_000,
            seed: 0,
        }
    }
}

/// Bootstrap WER estimate with a Gaussian 95% confidence half-width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WerInterval {
    pub wer: f64,
    pub ci95: f64,
}

impl WerInterval {
    pub fn ci95_min(&self) -> f64 {
        self.wer - self.ci95
    }

    pub fn ci95_max(&self) -> f64 {
        self.wer + self.ci95
    }
}

/// Result of [`bootstrap_wer_ci`] for one or two systems.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BootstrapReport {
    pub system1: WerInterval,
    pub system2: Option<WerInterval>,
    /// Probability that system 2 makes strictly fewer errors than system 1.
    pub p_s2_improv_over_s1: Option<f64>,
}

/// Uniform-cost edit counts for each parallel `(ref, hyp)` pair.
pub fn compute_utterance_scores<S, T>(
    refs: &[S],
    hyps: &[S],
) -> Result<Vec<UtteranceScore>, AlignError>
where
    S: AsRef<[T]>,
    T: PartialEq,
{
    if refs.len() != hyps.len() {
        return Err(AlignError::LengthMismatch {
            left: refs.len(),
            right: hyps.len(),
        });
    }
    Ok(refs
        .iter()
        .zip(hyps)
        .map(|(r, h)| {
            let r = r.as_ref();
            UtteranceScore {
                errors: edit_distance(r, h.as_ref(), false).total,
                ref_len: r.len(),
            }
        })
        .collect())
}

/// Bootstrap mean WER and 95% half-width over `replications` resamples.
pub fn bootstrap_wer_interval(
    scores: &[UtteranceScore],
    replications: usize,
    seed: u64,
) -> Result<WerInterval, AlignError> {
    check_inputs(scores, replications)?;

    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let n = scores.len();
    let mut wer_sum = 0.0f64;
    let mut wer_sq_sum = 0.0f64;

    for replicate in 0..replications {
        let mut errors = 0usize;
        let mut ref_len = 0usize;
        for _ in 0..n {
            let s = &scores[rng.gen_range(0..n)];
            errors += s.errors;
            ref_len += s.ref_len;
        }
        if ref_len == 0 {
            return Err(AlignError::ZeroReferenceLength { replicate });
        }
        let wer = errors as f64 / ref_len as f64;
        wer_sum += wer;
        wer_sq_sum += wer * wer;
    }

    let mean = wer_sum / replications as f64;
    let variance = (wer_sq_sum / replications as f64 - mean * mean).max(0.0);
    let ci95 = if variance > 0.0 { Z_95 * variance.sqrt() } else { 0.0 };

    log::debug!(
        "bootstrap wer: utterances={} replications={} seed={} wer={:.4} ci95={:.4}",
        n,
        replications,
        seed,
        mean,
        ci95
    );
    Ok(WerInterval { wer: mean, ci95 })
}

/// Fraction of paired resamples in which system B has strictly fewer
/// total errors than system A.
///
/// Both systems are evaluated on the same drawn indices from one generator.
pub fn paired_improvement_probability(
    scores_a: &[UtteranceScore],
    scores_b: &[UtteranceScore],
    replications: usize,
    seed: u64,
) -> Result<f64, AlignError> {
    if scores_a.len() != scores_b.len() {
        return Err(AlignError::LengthMismatch {
            left: scores_a.len(),
            right: scores_b.len(),
        });
    }
    check_inputs(scores_a, replications)?;

    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let n = scores_a.len();
    let mut improvements = 0usize;

    for _ in 0..replications {
        let mut diff = 0i64;
        for _ in 0..n {
            let idx = rng.gen_range(0..n);
            diff += scores_a[idx].errors as i64 - scores_b[idx].errors as i64;
        }
        if diff > 0 {
            improvements += 1;
        }
    }

    let p = improvements as f64 / replications as f64;
    log::debug!(
        "paired bootstrap: utterances={} replications={} seed={} p_improvement={:.4}",
        n,
        replications,
        seed,
        p
    );
    Ok(p)
}

/// Scores one system (or two, paired on the same references) and bootstraps
/// their WER intervals and, for two systems, the improvement probability.
pub fn bootstrap_wer_ci<S, T>(
    refs: &[S],
    hyps: &[S],
    hyps2: Option<&[S]>,
    config: BootstrapConfig,
) -> Result<BootstrapReport, AlignError>
where
    S: AsRef<[T]>,
    T: PartialEq,
{
    let scores1 = compute_utterance_scores(refs, hyps)?;
    let system1 = bootstrap_wer_interval(&scores1, config.replications, config.seed)?;

    let Some(hyps2) = hyps2 else {
        return Ok(BootstrapReport {
            system1,
            system2: None,
            p_s2_improv_over_s1: None,
        });
    };

    let scores2 = compute_utterance_scores(refs, hyps2)?;
    let system2 = bootstrap_wer_interval(&scores2, config.replications, config.seed)?;
    let p =
        paired_improvement_probability(&scores1, &scores2, config.replications, config.seed)?;
    Ok(BootstrapReport {
        system1,
        system2: Some(system2),
        p_s2_improv_over_s1: Some(p),
    })
}

fn check_inputs(scores: &[UtteranceScore], replications: usize) -> Result<(), AlignError> {
    if scores.is_empty() {
        return Err(AlignError::EmptyScores);
    }
    if replications == 0 {
        return Err(AlignError::NoReplications);
    }
    Ok(())
}
