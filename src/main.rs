use std::path::PathBuf;

use anyhow::{Context, Result};

use footy_targets::feature_table::FeatureTable;
use footy_targets::merge;
use footy_targets::raw_matches;
use footy_targets::team_names::TeamNameMap;

fn main() -> Result<()> {
    let features_path = resolve_path(
        "--features",
        "TARGETS_FEATURES",
        "ml/data/features/training.csv",
    );
    let raw_path = resolve_path("--raw", "TARGETS_RAW", "ml/data/raw/historical.csv");
    let team_map_path = resolve_path(
        "--team-map",
        "TARGETS_TEAM_MAP",
        "ml/data/team-name-map.json",
    );
    let out_path = resolve_path(
        "--out",
        "TARGETS_OUT",
        "ml/data/features/training_with_targets.csv",
    );

    let team_map = TeamNameMap::load(&team_map_path)?;
    let features = FeatureTable::load(&features_path)?;
    let (matches, raw_summary) =
        raw_matches::load_canonical_matches(&raw_path, &team_map).context("load raw match table")?;

    let (table, report) = merge::derive_target_table(&features, &matches)?;
    merge::write_target_table(&out_path, &table)?;

    println!("Targets written to {}", out_path.display());
    println!(
        "Raw rows: {} total, {} kept, {} excluded (unresolved league)",
        raw_summary.rows_total, raw_summary.rows_kept, raw_summary.rows_excluded_league
    );
    println!(
        "Feature rows: {} ({} matched to an outcome)",
        report.feature_rows, report.matched_rows
    );
    println!(
        "Coverage: fh_goals_total={} total_cards={} total_corners={}",
        report.coverage_fh_goals, report.coverage_total_cards, report.coverage_total_corners
    );

    Ok(())
}

fn resolve_path(flag: &str, env_key: &str, default: &str) -> PathBuf {
    if let Some(path) = parse_path_arg(flag) {
        return path;
    }
    if let Ok(raw) = std::env::var(env_key)
        && !raw.trim().is_empty()
    {
        return PathBuf::from(raw.trim());
    }
    PathBuf::from(default)
}

fn parse_path_arg(flag: &str) -> Option<PathBuf> {
    let prefix = format!("{flag}=");
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix(&prefix) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == flag {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next.trim()));
            }
        }
    }
    None
}
