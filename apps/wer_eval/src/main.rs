mod report;
mod text;
mod transcript;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use kaldialign::{
    align_with, bootstrap_wer_interval, edit_distance_with, paired_improvement_probability,
    CostModel, EditDistance, UtteranceScore,
};
use kaldialign_config::{load_eval_settings, EvalSettings};
use std::path::{Path, PathBuf};

/// Gap symbol written to `alignments.jsonl`. Normalized text cannot produce it.
const EPS: &str = "<eps>";

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub(crate) struct Args {
    /// Reference transcripts in Kaldi text format (`<utt-id> <words...>`).
    #[arg(long = "ref")]
    reference: PathBuf,

    /// Hypothesis transcripts of the system under test.
    #[arg(long)]
    hyp: PathBuf,

    /// Optional second system, compared against `--hyp` with a paired bootstrap.
    #[arg(long)]
    hyp2: Option<PathBuf>,

    /// TOML file with a [wer_eval] table (otherwise configs/wer_eval.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of bootstrap replications (overrides config).
    #[arg(long)]
    replications: Option<usize>,

    /// Bootstrap seed (overrides config).
    #[arg(long)]
    seed: Option<u64>,

    /// Use sclite weights (ins=3, del=3, sub=4) to choose the alignment path.
    #[arg(long)]
    sclite: bool,

    /// Score raw whitespace tokens without case/punctuation normalization.
    #[arg(long)]
    no_normalize: bool,

    /// Output directory for results + summary.
    #[arg(long, default_value = "target/wer_eval")]
    out_dir: PathBuf,

    /// Also write per-utterance alignments to {out_dir}/alignments.jsonl.
    #[arg(long)]
    alignments: bool,

    /// Fail if the corpus WER of `--hyp` exceeds this value.
    #[arg(long)]
    wer_threshold: Option<f64>,
}

impl Args {
    fn apply_overrides(&self, mut settings: EvalSettings) -> anyhow::Result<EvalSettings> {
        if let Some(r) = self.replications {
            if r == 0 {
                anyhow::bail!("--replications must be greater than zero");
            }
            settings.replications = r;
        }
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if self.sclite {
            settings.sclite_mode = true;
        }
        if self.no_normalize {
            settings.normalize_text = false;
        }
        Ok(settings)
    }
}

/// Per-utterance edit counts for one system, in reference order.
struct SystemScores {
    name: &'static str,
    hyp_path: PathBuf,
    per_utterance: Vec<EditDistance>,
    hyp_tokens: Vec<Vec<String>>,
}

impl SystemScores {
    fn totals(&self) -> EditDistance {
        let mut sum = EditDistance::default();
        for d in &self.per_utterance {
            sum += *d;
        }
        sum
    }

    fn utterance_scores(&self) -> Vec<UtteranceScore> {
        self.per_utterance
            .iter()
            .map(|d| UtteranceScore {
                errors: d.total,
                ref_len: d.ref_len,
            })
            .collect()
    }
}

fn score_system(
    name: &'static str,
    hyp_path: &Path,
    refs: &transcript::Transcripts,
    ref_tokens: &[Vec<String>],
    settings: &EvalSettings,
) -> anyhow::Result<SystemScores> {
    let hyps = transcript::read_transcripts(hyp_path)?;
    let origin = hyp_path.display().to_string();
    let hyp_tokens = transcript::match_reference_order(refs, &hyps, &origin)?
        .into_iter()
        .map(|t| text::tokenize(t, settings.normalize_text))
        .collect::<Vec<_>>();
    let costs = CostModel::from_sclite_mode(settings.sclite_mode);
    let per_utterance = ref_tokens
        .iter()
        .zip(&hyp_tokens)
        .map(|(r, h)| edit_distance_with(r, h, costs))
        .collect();
    Ok(SystemScores {
        name,
        hyp_path: hyp_path.to_path_buf(),
        per_utterance,
        hyp_tokens,
    })
}

fn collect_alignments(
    system: &SystemScores,
    ids: &[&String],
    ref_tokens: &[Vec<String>],
    costs: CostModel,
) -> anyhow::Result<Vec<report::AlignmentRecord>> {
    let eps = EPS.to_string();
    let mut records = Vec::with_capacity(ids.len());
    for ((id, r), h) in ids.iter().zip(ref_tokens).zip(&system.hyp_tokens) {
        let ali = align_with(r, h, &eps, costs)
            .with_context(|| format!("Failed to align utterance {} ({})", id, system.name))?;
        records.push(report::AlignmentRecord {
            id: id.to_string(),
            system: system.name.to_string(),
            cost: ali.total_cost,
            pairs: ali.pairs,
        });
    }
    Ok(records)
}

/// Fails when `--hyp` exceeds the threshold or its WER is undefined.
fn check_wer_threshold(corpus_wer: Option<f64>, threshold: f64) -> anyhow::Result<()> {
    let Some(wer) = corpus_wer else {
        anyhow::bail!(
            "--wer-threshold {:.4} given but corpus WER is undefined (all references are empty)",
            threshold
        );
    };
    if wer > threshold {
        anyhow::bail!("corpus WER {:.4} exceeds threshold {:.4}", wer, threshold);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let settings = args.apply_overrides(load_eval_settings(args.config.as_deref())?)?;
    log::debug!("settings: {:?}", settings);
    let costs = CostModel::from_sclite_mode(settings.sclite_mode);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create out dir {}", args.out_dir.display()))?;

    let refs = transcript::read_transcripts(&args.reference)?;
    let ids = refs.keys().collect::<Vec<_>>();
    let ref_tokens = refs
        .values()
        .map(|t| text::tokenize(t, settings.normalize_text))
        .collect::<Vec<_>>();
    eprintln!(
        "[wer_eval] reference: {} utterances <- {}",
        refs.len(),
        args.reference.display()
    );

    let mut systems = vec![score_system("hyp", &args.hyp, &refs, &ref_tokens, &settings)?];
    if let Some(hyp2) = &args.hyp2 {
        systems.push(score_system("hyp2", hyp2, &refs, &ref_tokens, &settings)?);
    }

    let mut results = Vec::new();
    let mut summaries = Vec::with_capacity(systems.len());
    let mut all_scores = Vec::with_capacity(systems.len());
    for system in &systems {
        for (id, d) in ids.iter().zip(&system.per_utterance) {
            results.push(report::UtteranceResult {
                id: id.to_string(),
                system: system.name.to_string(),
                counts: *d,
                err_rate: d.error_rate(),
            });
        }
        let scores = system.utterance_scores();
        let interval = bootstrap_wer_interval(&scores, settings.replications, settings.seed)
            .with_context(|| format!("Bootstrap failed for {}", system.hyp_path.display()))?;
        summaries.push(report::SystemSummary::new(
            system.name,
            &system.hyp_path,
            system.totals(),
            interval,
        ));
        all_scores.push(scores);
    }

    let p_improvement = match all_scores.as_slice() {
        [s1, s2] => Some(paired_improvement_probability(
            s1,
            s2,
            settings.replications,
            settings.seed,
        )?),
        _ => None,
    };

    report::write_jsonl(&args.out_dir.join("results.jsonl"), &results)?;
    if args.alignments {
        let mut records = Vec::new();
        for system in &systems {
            records.extend(collect_alignments(system, &ids, &ref_tokens, costs)?);
        }
        let path = args.out_dir.join("alignments.jsonl");
        report::write_jsonl(&path, &records)?;
        eprintln!("[wer_eval] alignments: {} records -> {}", records.len(), path.display());
    }

    let summary = report::Summary {
        generated_at: Local::now().to_rfc3339(),
        ref_path: args.reference.display().to_string(),
        utterances: refs.len(),
        replications: settings.replications,
        seed: settings.seed,
        normalize_text: settings.normalize_text,
        cost_model: costs,
        systems: summaries,
        p_s2_improv_over_s1: p_improvement,
    };
    let summary_path = args.out_dir.join("summary.json");
    report::write_summary_json(&summary_path, &summary)?;
    report::print_summary_table(&summary);
    eprintln!("[wer_eval] summary -> {}", summary_path.display());

    if let Some(th) = args.wer_threshold {
        check_wer_threshold(summary.systems[0].corpus_wer, th)?;
    }

    Ok(())
}
