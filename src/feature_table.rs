use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;

use crate::raw_matches::{parse_lenient_int, parse_match_date};

/// Composite join key of one feature row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixtureKey {
    pub date: NaiveDate,
    pub league_id: u32,
    pub home_team: String,
    pub away_team: String,
}

/// Pre-match feature rows, kept as dynamic records: besides the four key
/// columns the table carries arbitrary engineered feature columns that pass
/// through to the output untouched.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    pub headers: Vec<String>,
    pub rows: Vec<csv::StringRecord>,
    idx_date: usize,
    idx_league: usize,
    idx_home: usize,
    idx_away: usize,
}

impl FeatureTable {
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("open feature table {}", path.display()))?;
        let headers: Vec<String> = reader
            .headers()
            .context("read feature table headers")?
            .iter()
            .map(String::from)
            .collect();

        let require = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| anyhow!("feature table missing column {name}"))
        };
        let idx_date = require("date")?;
        let idx_league = require("leagueId")?;
        let idx_home = require("homeTeam")?;
        let idx_away = require("awayTeam")?;

        let mut rows = Vec::new();
        for (line, record) in reader.records().enumerate() {
            rows.push(record.with_context(|| format!("read feature row {}", line + 2))?);
        }

        Ok(Self {
            headers,
            rows,
            idx_date,
            idx_league,
            idx_home,
            idx_away,
        })
    }

    pub fn fixture(&self, record: &csv::StringRecord) -> Result<FixtureKey> {
        let cell = |idx: usize| record.get(idx).unwrap_or("").trim();

        let date = parse_match_date(cell(self.idx_date)).context("parse feature row date")?;
        let league_id = parse_lenient_int(cell(self.idx_league))
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| anyhow!("bad leagueId {:?} in feature row", cell(self.idx_league)))?;

        Ok(FixtureKey {
            date,
            league_id,
            home_team: cell(self.idx_home).to_string(),
            away_team: cell(self.idx_away).to_string(),
        })
    }
}
