use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use rayon::prelude::*;

use crate::feature_table::{FeatureTable, FixtureKey};
use crate::h2h::{self, DEFAULT_MAX_MATCHES, H2hSnapshot, H2hView, PairHistory};
use crate::raw_matches::CanonicalMatch;
use crate::targets::{self, DerivedTargets};

/// Operator-facing counts for one derivation run.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeReport {
    pub feature_rows: usize,
    pub matched_rows: usize,
    pub coverage_fh_goals: usize,
    pub coverage_total_cards: usize,
    pub coverage_total_corners: usize,
}

/// The final row-per-fixture table: feature columns passed through,
/// followed by every derived target and both H2H snapshot views.
#[derive(Debug, Clone)]
pub struct TargetTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Index outcome rows by composite key, enforcing the many-to-one merge
/// contract: a duplicate (date, league, home, away) outcome is a fatal
/// data-integrity error, never a silent pick.
fn build_outcome_index(matches: &[CanonicalMatch]) -> Result<HashMap<FixtureKey, &CanonicalMatch>> {
    let mut index = HashMap::with_capacity(matches.len());
    for m in matches {
        let key = FixtureKey {
            date: m.date,
            league_id: m.league_id,
            home_team: m.home_team.clone(),
            away_team: m.away_team.clone(),
        };
        if index.insert(key, m).is_some() {
            bail!(
                "duplicate outcome row for {} league {} {} vs {}; merge requires at most one outcome per fixture",
                m.date,
                m.league_id,
                m.home_team,
                m.away_team
            );
        }
    }
    Ok(index)
}

/// Join feature rows to outcome rows and derive all target and H2H
/// columns. Unmatched feature rows keep every derived column null.
pub fn derive_target_table(
    features: &FeatureTable,
    matches: &[CanonicalMatch],
) -> Result<(TargetTable, MergeReport)> {
    let outcomes = build_outcome_index(matches)?;
    let pairs = h2h::build_pair_index(matches);

    let mut headers = features.headers.clone();
    headers.extend(targets::target_columns());
    headers.extend(snapshot_columns("h2h_overall"));
    headers.extend(snapshot_columns("h2h_venue"));

    // Per-fixture derivation is pure over the read-only indexes, so rows are
    // partitioned across rayon workers; output order follows input order.
    let derived: Vec<(Vec<String>, DerivedTargets, bool)> = features
        .rows
        .par_iter()
        .enumerate()
        .map(|(row_idx, record)| {
            derive_row(features, record, &outcomes, &pairs)
                .with_context(|| format!("derive targets for feature row {}", row_idx + 2))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut report = MergeReport {
        feature_rows: features.rows.len(),
        ..MergeReport::default()
    };
    let mut rows = Vec::with_capacity(derived.len());
    for (cells, targets, matched) in derived {
        report.matched_rows += usize::from(matched);
        report.coverage_fh_goals += usize::from(targets.fh_goals_total.is_some());
        report.coverage_total_cards += usize::from(targets.total_cards.is_some());
        report.coverage_total_corners += usize::from(targets.total_corners.is_some());
        rows.push(cells);
    }

    Ok((TargetTable { headers, rows }, report))
}

fn derive_row(
    features: &FeatureTable,
    record: &csv::StringRecord,
    outcomes: &HashMap<FixtureKey, &CanonicalMatch>,
    pairs: &PairHistory,
) -> Result<(Vec<String>, DerivedTargets, bool)> {
    let key = features.fixture(record)?;
    let outcome = outcomes.get(&key).copied();
    let targets = outcome
        .map(DerivedTargets::from_match)
        .unwrap_or_default();

    let history = pairs
        .get(&h2h::pair_key(&key.home_team, &key.away_team))
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    let overall = h2h::compute_h2h(
        history,
        &key.home_team,
        &key.away_team,
        key.date,
        DEFAULT_MAX_MATCHES,
        H2hView::Overall,
    );
    let venue = h2h::compute_h2h(
        history,
        &key.home_team,
        &key.away_team,
        key.date,
        DEFAULT_MAX_MATCHES,
        H2hView::Venue,
    );

    let mut cells: Vec<String> = record.iter().map(String::from).collect();
    cells.extend(targets.values());
    cells.extend(snapshot_cells(&overall));
    cells.extend(snapshot_cells(&venue));

    let matched = outcome.is_some();
    Ok((cells, targets, matched))
}

fn snapshot_columns(prefix: &str) -> Vec<String> {
    [
        "matches",
        "home_win_pct",
        "away_win_pct",
        "draw_pct",
        "avg_goals",
        "btts_pct",
        "over_2_5_pct",
    ]
    .iter()
    .map(|field| format!("{prefix}_{field}"))
    .collect()
}

fn snapshot_cells(snap: &H2hSnapshot) -> Vec<String> {
    vec![
        snap.matches.to_string(),
        opt_float(snap.home_win_pct),
        opt_float(snap.away_win_pct),
        opt_float(snap.draw_pct),
        opt_float(snap.avg_goals),
        opt_float(snap.btts_pct),
        opt_float(snap.over_2_5_pct),
    ]
}

fn opt_float(v: Option<f64>) -> String {
    v.map(|f| f.to_string()).unwrap_or_default()
}

/// Write the table atomically: a temp file next to the target, then rename.
/// A run that failed earlier never leaves partial output behind.
pub fn write_target_table(path: &Path, table: &TargetTable) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output dir {}", parent.display()))?;
    }

    let tmp = path.with_extension("csv.tmp");
    {
        let mut writer = csv::Writer::from_path(&tmp)
            .with_context(|| format!("create output file {}", tmp.display()))?;
        writer
            .write_record(&table.headers)
            .context("write output headers")?;
        for row in &table.rows {
            writer.write_record(row).context("write output row")?;
        }
        writer.flush().context("flush output")?;
    }
    fs::rename(&tmp, path).with_context(|| format!("swap output into {}", path.display()))?;
    Ok(())
}
