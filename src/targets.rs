use crate::raw_matches::CanonicalMatch;

/// Over/under goal lines, lowest to highest (0.5 .. 5.5).
pub const OU_LINES: usize = 6;

/// Inclusive (low, high) goal-count bands, one target each for total, home
/// and away goals.
pub const GOAL_RANGES: &[(i32, i32)] = &[
    (1, 2),
    (1, 3),
    (1, 4),
    (1, 5),
    (1, 6),
    (2, 3),
    (2, 4),
    (2, 5),
    (2, 6),
    (3, 4),
    (3, 5),
    (3, 6),
    (4, 5),
    (4, 6),
    (5, 6),
];

/// Market labels derived from one outcome row. Every target is evaluated
/// independently: a missing prerequisite field nulls only that target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedTargets {
    pub result: Option<&'static str>,
    pub total_goals: Option<i32>,
    pub btts_yes: Option<i32>,
    pub ou_over: [Option<i32>; OU_LINES],
    pub total_range: [Option<i32>; GOAL_RANGES.len()],
    pub home_range: [Option<i32>; GOAL_RANGES.len()],
    pub away_range: [Option<i32>; GOAL_RANGES.len()],
    pub clean_sheet_home: Option<i32>,
    pub clean_sheet_away: Option<i32>,
    pub fh_result: Option<&'static str>,
    pub fh_goals_total: Option<i32>,
    pub sh_goals_total: Option<i32>,
    pub home_cards: Option<i32>,
    pub away_cards: Option<i32>,
    pub total_cards: Option<i32>,
    pub home_corners: Option<i32>,
    pub away_corners: Option<i32>,
    pub total_corners: Option<i32>,
}

/// Output column names, in the order `DerivedTargets::values` emits them.
pub fn target_columns() -> Vec<String> {
    let mut cols = vec![
        "result".to_string(),
        "totalGoals".to_string(),
        "btts_yes".to_string(),
    ];
    for half in 0..OU_LINES {
        cols.push(format!("ou_over_{half}_5"));
    }
    for (low, high) in GOAL_RANGES {
        cols.push(format!("total_range_{low}_{high}"));
        cols.push(format!("home_range_{low}_{high}"));
        cols.push(format!("away_range_{low}_{high}"));
    }
    cols.extend(
        [
            "clean_sheet_home",
            "clean_sheet_away",
            "fh_result",
            "fh_goals_total",
            "sh_goals_total",
            "home_cards",
            "away_cards",
            "total_cards",
            "home_corners",
            "away_corners",
            "total_corners",
        ]
        .map(String::from),
    );
    cols
}

impl DerivedTargets {
    pub fn from_match(m: &CanonicalMatch) -> Self {
        let mut out = Self::default();

        if let (Some(home), Some(away)) = (m.ft_home, m.ft_away) {
            let total = home + away;
            out.result = Some(compare_result(home, away));
            out.total_goals = Some(total);
            out.btts_yes = Some(flag(home > 0 && away > 0));
            for half in 0..OU_LINES {
                // Line k_5 means k + 0.5 goals; integer totals clear it iff
                // total > k.
                out.ou_over[half] = Some(flag(total > half as i32));
            }
            for (idx, (low, high)) in GOAL_RANGES.iter().enumerate() {
                out.total_range[idx] = Some(flag(total >= *low && total <= *high));
                out.home_range[idx] = Some(flag(home >= *low && home <= *high));
                out.away_range[idx] = Some(flag(away >= *low && away <= *high));
            }
            out.clean_sheet_home = Some(flag(away == 0));
            out.clean_sheet_away = Some(flag(home == 0));
        }

        if let (Some(ht_home), Some(ht_away)) = (m.ht_home, m.ht_away) {
            out.fh_result = Some(compare_result(ht_home, ht_away));
            out.fh_goals_total = Some(ht_home + ht_away);
            out.sh_goals_total = out.total_goals.map(|total| total - ht_home - ht_away);
        }

        out.home_cards = sum_opt(m.home_yellow, m.home_red);
        out.away_cards = sum_opt(m.away_yellow, m.away_red);
        out.total_cards = sum_opt(out.home_cards, out.away_cards);

        out.home_corners = m.home_corners;
        out.away_corners = m.away_corners;
        out.total_corners = sum_opt(m.home_corners, m.away_corners);

        out
    }

    /// Render the targets as CSV cells aligned with `target_columns`; nulls
    /// become empty cells.
    pub fn values(&self) -> Vec<String> {
        let mut cells = vec![
            opt_str(self.result),
            opt_int(self.total_goals),
            opt_int(self.btts_yes),
        ];
        cells.extend(self.ou_over.iter().map(|v| opt_int(*v)));
        for idx in 0..GOAL_RANGES.len() {
            cells.push(opt_int(self.total_range[idx]));
            cells.push(opt_int(self.home_range[idx]));
            cells.push(opt_int(self.away_range[idx]));
        }
        cells.extend([
            opt_int(self.clean_sheet_home),
            opt_int(self.clean_sheet_away),
            opt_str(self.fh_result),
            opt_int(self.fh_goals_total),
            opt_int(self.sh_goals_total),
            opt_int(self.home_cards),
            opt_int(self.away_cards),
            opt_int(self.total_cards),
            opt_int(self.home_corners),
            opt_int(self.away_corners),
            opt_int(self.total_corners),
        ]);
        cells
    }
}

fn compare_result(home: i32, away: i32) -> &'static str {
    if home > away {
        "HOME"
    } else if home < away {
        "AWAY"
    } else {
        "DRAW"
    }
}

fn flag(hit: bool) -> i32 {
    if hit { 1 } else { 0 }
}

fn sum_opt(a: Option<i32>, b: Option<i32>) -> Option<i32> {
    Some(a? + b?)
}

fn opt_int(v: Option<i32>) -> String {
    v.map(|n| n.to_string()).unwrap_or_default()
}

fn opt_str(v: Option<&'static str>) -> String {
    v.map(str::to_string).unwrap_or_default()
}
