use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Settings for a WER evaluation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalSettings {
    pub replications: usize,
    pub seed: u64,
    pub sclite_mode: bool,
    pub normalize_text: bool,
}

impl Default for EvalSettings {
    fn default() -> Self {
        Self {
            replications: default_replications(),
            seed: 0,
            sclite_mode: false,
            normalize_text: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct WerEvalToml {
    #[serde(default = "default_replications")]
    replications: usize,
    #[serde(default)]
    seed: u64,
    #[serde(default)]
    sclite_mode: bool,
    #[serde(default = "default_normalize_text")]
    normalize_text: bool,
}

fn default_replications() -> usize {
    10_000
}

fn default_normalize_text() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    wer_eval: Option<WerEvalToml>,
}

/// Relative locations tried when no explicit config path is given.
const DEFAULT_PATHS: [&str; 2] = ["configs/wer_eval.toml", "../../configs/wer_eval.toml"];

/// Reads the first existing default config, if any.
fn read_default_toml_text() -> Option<String> {
    DEFAULT_PATHS
        .iter()
        .find_map(|p| fs::read_to_string(p).ok())
}

/// Parses the `[wer_eval]` table. A document without one yields defaults.
pub fn parse_eval_settings(text: &str) -> anyhow::Result<EvalSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse [wer_eval] settings: {e}"))?;
    let Some(cfg) = root.wer_eval else {
        return Ok(EvalSettings::default());
    };
    let WerEvalToml {
        replications,
        seed,
        sclite_mode,
        normalize_text,
    } = cfg;
    if replications == 0 {
        anyhow::bail!("wer_eval.replications must be greater than zero");
    }
    Ok(EvalSettings {
        replications,
        seed,
        sclite_mode,
        normalize_text,
    })
}

/// Loads settings from `path`, or from the default locations when `path` is
/// `None`. Missing default files are not an error.
pub fn load_eval_settings(path: Option<&Path>) -> anyhow::Result<EvalSettings> {
    let text = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("wer_eval config does not exist: {}", p.display());
            }
            Some(fs::read_to_string(p).with_context(|| format!("Failed to read {}", p.display()))?)
        }
        None => read_default_toml_text(),
    };
    match text {
        Some(text) => parse_eval_settings(&text),
        None => Ok(EvalSettings::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_table() -> anyhow::Result<()> {
        let s = parse_eval_settings("[other]\nkey = 1\n")?;
        assert_eq!(s, EvalSettings::default());
        assert_eq!(s.replications, 10_000);
        assert!(s.normalize_text);
        Ok(())
    }

    #[test]
    fn test_partial_table() -> anyhow::Result<()> {
        let s = parse_eval_settings("[wer_eval]\nseed = 17\nsclite_mode = true\n")?;
        assert_eq!(s.seed, 17);
        assert!(s.sclite_mode);
        assert_eq!(s.replications, 10_000);
        assert!(s.normalize_text);
        Ok(())
    }

    #[test]
    fn test_rejects_zero_replications() {
        let err = parse_eval_settings("[wer_eval]\nreplications = 0\n").unwrap_err();
        assert!(err.to_string().contains("replications"));
    }

    #[test]
    fn test_rejects_bad_types() {
        assert!(parse_eval_settings("[wer_eval]\nseed = \"zero\"\n").is_err());
    }

    #[test]
    fn test_load_from_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let p = dir.path().join("wer_eval.toml");
        fs::write(&p, "[wer_eval]\nreplications = 500\nnormalize_text = false\n")?;
        let s = load_eval_settings(Some(&p))?;
        assert_eq!(s.replications, 500);
        assert!(!s.normalize_text);
        Ok(())
    }

    #[test]
    fn test_missing_explicit_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let p = dir.path().join("absent.toml");
        assert!(load_eval_settings(Some(&p)).is_err());
        Ok(())
    }
}
