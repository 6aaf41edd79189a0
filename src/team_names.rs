use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Organizational suffixes and filler tokens that carry no identity.
const STOP_WORDS: &[&str] = &[
    "fc", "cf", "sc", "afc", "ac", "ss", "cd", "ud", "de", "al", "the",
];

/// Normalize a raw team name into a comparable form.
///
/// Lowercase + trim, fold accented Latin letters to their base letter,
/// strip punctuation, then drop stop-word tokens. Idempotent: the output
/// normalizes to itself.
pub fn normalize_team_name(raw: &str) -> String {
    let mut value = String::with_capacity(raw.len());
    for ch in raw.trim().chars() {
        for lower in ch.to_lowercase() {
            let folded = fold_accent(lower);
            if folded.is_alphanumeric() || folded.is_whitespace() {
                value.push(folded);
            } else {
                value.push(' ');
            }
        }
    }

    value
        .split_whitespace()
        .filter(|part| !STOP_WORDS.contains(part))
        .collect::<Vec<_>>()
        .join(" ")
}

fn fold_accent(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

/// Normalized-name -> canonical-team-identifier table, loaded from the
/// team-name-map JSON ({"mappings": {...}}).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamNameMap {
    #[serde(default)]
    pub mappings: HashMap<String, String>,
}

impl TeamNameMap {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read team name map {}", path.display()))?;
        serde_json::from_str(&raw).context("parse team name map json")
    }

    /// Resolve a raw team name to its canonical identifier. Unmapped names
    /// fall back to the original raw string; resolution never fails.
    pub fn canonical(&self, raw: &str) -> String {
        let normalized = normalize_team_name(raw);
        match self.mappings.get(&normalized) {
            Some(canonical) => canonical.clone(),
            None => raw.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TeamNameMap, normalize_team_name};

    #[test]
    fn strips_case_punctuation_and_suffixes() {
        assert_eq!(normalize_team_name("  Arsenal FC "), "arsenal");
        assert_eq!(normalize_team_name("A.C. Milan"), "milan");
        assert_eq!(normalize_team_name("Real Madrid CF"), "real madrid");
    }

    #[test]
    fn folds_accents_to_base_letters() {
        assert_eq!(
            normalize_team_name("São Paulo"),
            normalize_team_name("Sao Paulo")
        );
        assert_eq!(normalize_team_name("Atlético Madrid"), "atletico madrid");
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in [
            "Sporting CP",
            "  Borussia M'gladbach ",
            "São Paulo FC",
            "1. FC Köln",
            "",
        ] {
            let once = normalize_team_name(raw);
            assert_eq!(normalize_team_name(&once), once);
        }
    }

    #[test]
    fn unmapped_name_falls_back_to_raw_string() {
        let mut map = TeamNameMap::default();
        map.mappings
            .insert("arsenal".to_string(), "team-arsenal".to_string());

        assert_eq!(map.canonical("Arsenal FC"), "team-arsenal");
        assert_eq!(map.canonical("Wanderers XI"), "Wanderers XI");
    }
}
