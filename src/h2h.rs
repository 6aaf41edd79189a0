use std::collections::HashMap;

use chrono::NaiveDate;

use crate::raw_matches::CanonicalMatch;

pub const DEFAULT_MAX_MATCHES: usize = 5;

/// One finished meeting between a team pair, as stored in the index.
#[derive(Debug, Clone)]
pub struct H2hMatch {
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: i32,
    pub away_goals: i32,
}

/// Per unordered team pair, the pair's meetings sorted by date ascending.
/// Built once per run, queried read-only for every fixture.
pub type PairHistory = HashMap<String, Vec<H2hMatch>>;

/// Order-independent key for a team pair.
pub fn pair_key(a: &str, b: &str) -> String {
    if a <= b {
        format!("{a}__{b}")
    } else {
        format!("{b}__{a}")
    }
}

/// Group matches with known full-time goals by pair key and sort each
/// group by date. The sort is stable, so same-day meetings keep their
/// original relative order and duplicates are retained.
pub fn build_pair_index(matches: &[CanonicalMatch]) -> PairHistory {
    let mut index = PairHistory::new();
    for m in matches {
        let (Some(home_goals), Some(away_goals)) = (m.ft_home, m.ft_away) else {
            continue;
        };
        index
            .entry(pair_key(&m.home_team, &m.away_team))
            .or_default()
            .push(H2hMatch {
                date: m.date,
                home_team: m.home_team.clone(),
                away_team: m.away_team.clone(),
                home_goals,
                away_goals,
            });
    }
    for history in index.values_mut() {
        history.sort_by_key(|m| m.date);
    }
    index
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum H2hView {
    /// Either direction between the pair; goals reoriented to the current
    /// fixture's frame.
    Overall,
    /// Exact home/away direction of the current fixture only.
    Venue,
}

/// Rolling matchup aggregate for one fixture. All percentage and average
/// fields are `None` when `matches == 0`. Percentages are 0-100.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct H2hSnapshot {
    pub matches: usize,
    pub home_win_pct: Option<f64>,
    pub away_win_pct: Option<f64>,
    pub draw_pct: Option<f64>,
    pub avg_goals: Option<f64>,
    pub btts_pct: Option<f64>,
    pub over_2_5_pct: Option<f64>,
}

/// Relabel a historical match's goals relative to `perspective_home`'s role
/// in the *current* fixture: (goals for, goals against). If the historical
/// home side is the perspective team the scoreline stands; otherwise it is
/// swapped.
pub fn reorient(m: &H2hMatch, perspective_home: &str) -> (i32, i32) {
    if m.home_team == perspective_home {
        (m.home_goals, m.away_goals)
    } else {
        (m.away_goals, m.home_goals)
    }
}

/// Compute the rolling H2H aggregate for a fixture (`home` vs `away` on
/// `date`) from the pair's sorted history.
///
/// Only matches dated strictly before the fixture are eligible; the cutoff
/// is the first index whose date is >= the fixture date, so nothing played
/// on or after the fixture day ever leaks in.
pub fn compute_h2h(
    history: &[H2hMatch],
    home: &str,
    away: &str,
    date: NaiveDate,
    max_matches: usize,
    view: H2hView,
) -> H2hSnapshot {
    let cutoff = history.partition_point(|m| m.date < date);
    if cutoff == 0 {
        return H2hSnapshot::default();
    }
    let eligible = &history[..cutoff];

    let selected: Vec<&H2hMatch> = match view {
        H2hView::Overall => {
            let start = eligible.len().saturating_sub(max_matches);
            eligible[start..].iter().collect()
        }
        H2hView::Venue => {
            // The venue cap scans the whole eligible history, independent of
            // the overall window.
            let mut picked: Vec<&H2hMatch> = Vec::new();
            for m in eligible.iter().rev() {
                if m.home_team == home && m.away_team == away {
                    picked.push(m);
                    if picked.len() >= max_matches {
                        break;
                    }
                }
            }
            picked.reverse();
            picked
        }
    };

    if selected.is_empty() {
        return H2hSnapshot::default();
    }

    let mut home_wins = 0usize;
    let mut away_wins = 0usize;
    let mut draws = 0usize;
    let mut total_goals = 0i32;
    let mut btts = 0usize;
    let mut over_2_5 = 0usize;

    for m in &selected {
        let (goals_for, goals_against) = reorient(m, home);
        if goals_for > goals_against {
            home_wins += 1;
        } else if goals_against > goals_for {
            away_wins += 1;
        } else {
            draws += 1;
        }

        let total = goals_for + goals_against;
        total_goals += total;
        if goals_for > 0 && goals_against > 0 {
            btts += 1;
        }
        if total > 2 {
            over_2_5 += 1;
        }
    }

    let count = selected.len();
    let pct = |n: usize| Some(n as f64 / count as f64 * 100.0);
    H2hSnapshot {
        matches: count,
        home_win_pct: pct(home_wins),
        away_win_pct: pct(away_wins),
        draw_pct: pct(draws),
        avg_goals: Some(total_goals as f64 / count as f64),
        btts_pct: pct(btts),
        over_2_5_pct: pct(over_2_5),
    }
}
