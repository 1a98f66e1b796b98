use anyhow::Context;
use kaldialign::{CostModel, EditDistance, WerInterval};
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct UtteranceResult {
    pub id: String,
    pub system: String,
    #[serde(flatten)]
    pub counts: EditDistance,
    pub err_rate: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlignmentRecord {
    pub id: String,
    pub system: String,
    pub cost: u64,
    pub pairs: Vec<(String, String)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SystemSummary {
    pub name: String,
    pub hyp_path: String,
    #[serde(flatten)]
    pub counts: EditDistance,
    /// Corpus WER over all utterances, undefined for an all-empty reference.
    pub corpus_wer: Option<f64>,
    pub bootstrap_wer: f64,
    pub ci95: f64,
    pub ci95min: f64,
    pub ci95max: f64,
}

impl SystemSummary {
    pub fn new(name: &str, hyp_path: &Path, counts: EditDistance, interval: WerInterval) -> Self {
        Self {
            name: name.to_string(),
            hyp_path: hyp_path.display().to_string(),
            counts,
            corpus_wer: counts.error_rate(),
            bootstrap_wer: interval.wer,
            ci95: interval.ci95,
            ci95min: interval.ci95_min(),
            ci95max: interval.ci95_max(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub generated_at: String,
    pub ref_path: String,
    pub utterances: usize,
    pub replications: usize,
    pub seed: u64,
    pub normalize_text: bool,
    pub cost_model: CostModel,
    pub systems: Vec<SystemSummary>,
    pub p_s2_improv_over_s1: Option<f64>,
}

pub fn write_jsonl<T: Serialize>(path: &Path, records: &[T]) -> anyhow::Result<()> {
    let mut out = String::new();
    for r in records {
        out.push_str(&serde_json::to_string(r)?);
        out.push('\n');
    }
    fs::write(path, out).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

pub fn write_summary_json(path: &Path, summary: &Summary) -> anyhow::Result<()> {
    fs::write(path, serde_json::to_string_pretty(summary)?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn fmt_rate(rate: Option<f64>) -> String {
    rate.map(|r| format!("{:.2}%", r * 100.0))
        .unwrap_or_else(|| "n/a".to_string())
}

pub fn print_summary_table(summary: &Summary) {
    eprintln!(
        "[wer_eval] utterances={} replications={} seed={} costs=ins:{}/del:{}/sub:{}",
        summary.utterances,
        summary.replications,
        summary.seed,
        summary.cost_model.insertion,
        summary.cost_model.deletion,
        summary.cost_model.substitution
    );
    eprintln!(
        "{:<8} {:>9} {:>7} {:>7} {:>7} {:>9} {:>9} {:>20}",
        "system", "ref_words", "ins", "del", "sub", "wer", "ci95", "ci95 range"
    );
    for s in &summary.systems {
        eprintln!(
            "{:<8} {:>9} {:>7} {:>7} {:>7} {:>9} {:>8.2}% {:>9.2}%..{:>7.2}%",
            s.name,
            s.counts.ref_len,
            s.counts.insertions,
            s.counts.deletions,
            s.counts.substitutions,
            fmt_rate(s.corpus_wer),
            s.ci95 * 100.0,
            s.ci95min * 100.0,
            s.ci95max * 100.0
        );
    }
    if let Some(p) = summary.p_s2_improv_over_s1 {
        eprintln!("[wer_eval] P(hyp2 improves over hyp) = {:.4}", p);
    }
}
