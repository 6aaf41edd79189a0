use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;

use crate::leagues;
use crate::team_names::TeamNameMap;

/// One historical fixture with resolved league id and canonical team
/// identifiers. Optional fields are absent for older seasons.
#[derive(Debug, Clone)]
pub struct CanonicalMatch {
    pub date: NaiveDate,
    pub league_id: u32,
    pub home_team: String,
    pub away_team: String,
    pub ft_home: Option<i32>,
    pub ft_away: Option<i32>,
    pub ht_home: Option<i32>,
    pub ht_away: Option<i32>,
    pub home_corners: Option<i32>,
    pub away_corners: Option<i32>,
    pub home_yellow: Option<i32>,
    pub away_yellow: Option<i32>,
    pub home_red: Option<i32>,
    pub away_red: Option<i32>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RawLoadSummary {
    pub rows_total: usize,
    pub rows_kept: usize,
    pub rows_excluded_league: usize,
}

struct RawColumns {
    date: usize,
    division: usize,
    home_team: usize,
    away_team: usize,
    ft_home: Option<usize>,
    ft_away: Option<usize>,
    ht_home: Option<usize>,
    ht_away: Option<usize>,
    home_corners: Option<usize>,
    away_corners: Option<usize>,
    home_yellow: Option<usize>,
    away_yellow: Option<usize>,
    home_red: Option<usize>,
    away_red: Option<usize>,
}

impl RawColumns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| anyhow!("raw match table missing column {name}"))
        };
        Ok(Self {
            date: require("MatchDate")?,
            division: require("Division")?,
            home_team: require("HomeTeam")?,
            away_team: require("AwayTeam")?,
            ft_home: find("FTHome"),
            ft_away: find("FTAway"),
            ht_home: find("HTHome"),
            ht_away: find("HTAway"),
            home_corners: find("HomeCorners"),
            away_corners: find("AwayCorners"),
            home_yellow: find("HomeYellow"),
            away_yellow: find("AwayYellow"),
            home_red: find("HomeRed"),
            away_red: find("AwayRed"),
        })
    }
}

/// Load the raw results CSV, resolve leagues and canonicalize team names.
/// Rows whose league label is not in the alias table are dropped and
/// counted; they never reach the index or the merge.
pub fn load_canonical_matches(
    path: &Path,
    team_map: &TeamNameMap,
) -> Result<(Vec<CanonicalMatch>, RawLoadSummary)> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("open raw match table {}", path.display()))?;
    let headers = reader.headers().context("read raw match headers")?.clone();
    let columns = RawColumns::from_headers(&headers)?;

    let mut out = Vec::new();
    let mut summary = RawLoadSummary::default();

    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("read raw match row {}", line + 2))?;
        summary.rows_total += 1;

        let Some(league_id) = leagues::resolve_league_id(field(&record, columns.division)) else {
            summary.rows_excluded_league += 1;
            continue;
        };

        let date = parse_match_date(field(&record, columns.date))
            .with_context(|| format!("parse MatchDate on raw row {}", line + 2))?;
        let home_team = team_map.canonical(field(&record, columns.home_team));
        let away_team = team_map.canonical(field(&record, columns.away_team));

        out.push(CanonicalMatch {
            date,
            league_id,
            home_team,
            away_team,
            ft_home: opt_int(&record, columns.ft_home),
            ft_away: opt_int(&record, columns.ft_away),
            ht_home: opt_int(&record, columns.ht_home),
            ht_away: opt_int(&record, columns.ht_away),
            home_corners: opt_int(&record, columns.home_corners),
            away_corners: opt_int(&record, columns.away_corners),
            home_yellow: opt_int(&record, columns.home_yellow),
            away_yellow: opt_int(&record, columns.away_yellow),
            home_red: opt_int(&record, columns.home_red),
            away_red: opt_int(&record, columns.away_red),
        });
        summary.rows_kept += 1;
    }

    Ok((out, summary))
}

fn field<'a>(record: &'a csv::StringRecord, idx: usize) -> &'a str {
    record.get(idx).unwrap_or("").trim()
}

fn opt_int(record: &csv::StringRecord, idx: Option<usize>) -> Option<i32> {
    parse_lenient_int(field(record, idx?))
}

/// Lenient numeric coercion: integers, float-formatted integers ("2.0")
/// and surrounding whitespace are accepted; anything else is `None`.
pub fn parse_lenient_int(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(n) = trimmed.parse::<i32>() {
        return Some(n);
    }
    let f = trimmed.parse::<f64>().ok()?;
    if !f.is_finite() || f.fract() != 0.0 {
        return None;
    }
    Some(f as i32)
}

/// Timestamps are truncated to the calendar date; sub-day ordering is not
/// preserved for same-day doubleheaders.
pub fn parse_match_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed
        .split_once(['T', ' '])
        .map(|(date, _)| date)
        .unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%d/%m/%Y"))
        .map_err(|err| anyhow!("unparseable match date {trimmed:?}: {err}"))
}
