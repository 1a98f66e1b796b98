use anyhow::Context;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Utterance id -> raw transcript text, ordered by id.
pub type Transcripts = BTreeMap<String, String>;

/// Parses Kaldi `text` format: `<utterance-id> <word> <word> ...` per line.
///
/// An id with no words is an empty transcript. Blank lines are skipped.
pub fn parse_transcripts(text: &str, origin: &str) -> anyhow::Result<Transcripts> {
    let mut map = BTreeMap::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (id, rest) = match line.split_once(char::is_whitespace) {
            Some((id, rest)) => (id, rest.trim()),
            None => (line, ""),
        };
        if map.insert(id.to_string(), rest.to_string()).is_some() {
            anyhow::bail!("Duplicate utterance id {} at line {} in {}", id, lineno + 1, origin);
        }
    }
    Ok(map)
}

pub fn read_transcripts(path: &Path) -> anyhow::Result<Transcripts> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript file {}", path.display()))?;
    let map = parse_transcripts(&text, &path.display().to_string())?;
    if map.is_empty() {
        anyhow::bail!("No utterances found in {}", path.display());
    }
    Ok(map)
}

/// Hypothesis texts in reference id order. Every reference id must be present.
pub fn match_reference_order<'a>(
    refs: &Transcripts,
    hyps: &'a Transcripts,
    origin: &str,
) -> anyhow::Result<Vec<&'a str>> {
    let mut out = Vec::with_capacity(refs.len());
    for id in refs.keys() {
        let text = hyps
            .get(id)
            .with_context(|| format!("{} has no entry for utterance id {}", origin, id))?;
        out.push(text.as_str());
    }
    let extra = hyps.keys().filter(|id| !refs.contains_key(*id)).count();
    if extra > 0 {
        log::warn!("{}: ignoring {} utterance(s) not present in the reference", origin, extra);
    }
    Ok(out)
}
