use chrono::NaiveDate;

use footy_targets::h2h::{H2hView, build_pair_index, compute_h2h, pair_key};
use footy_targets::raw_matches::CanonicalMatch;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn match_row(
    d: NaiveDate,
    home: &str,
    away: &str,
    goals: Option<(i32, i32)>,
) -> CanonicalMatch {
    CanonicalMatch {
        date: d,
        league_id: 39,
        home_team: home.to_string(),
        away_team: away.to_string(),
        ft_home: goals.map(|(h, _)| h),
        ft_away: goals.map(|(_, a)| a),
        ht_home: None,
        ht_away: None,
        home_corners: None,
        away_corners: None,
        home_yellow: None,
        away_yellow: None,
        home_red: None,
        away_red: None,
    }
}

#[test]
fn index_groups_by_unordered_pair_and_sorts_by_date() {
    let rows = vec![
        match_row(date(2021, 6, 1), "team-b", "team-a", Some((0, 0))),
        match_row(date(2021, 1, 1), "team-a", "team-b", Some((2, 1))),
        match_row(date(2021, 3, 1), "team-a", "team-c", Some((1, 1))),
        // No full-time goals: never indexed.
        match_row(date(2021, 4, 1), "team-a", "team-b", None),
    ];

    let index = build_pair_index(&rows);
    assert_eq!(index.len(), 2);

    let history = &index[&pair_key("team-a", "team-b")];
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].date, date(2021, 1, 1));
    assert_eq!(history[1].date, date(2021, 6, 1));
}

#[test]
fn same_day_duplicates_are_both_retained() {
    let rows = vec![
        match_row(date(2021, 1, 1), "team-a", "team-b", Some((1, 0))),
        match_row(date(2021, 1, 1), "team-a", "team-b", Some((0, 2))),
    ];
    let index = build_pair_index(&rows);
    let history = &index[&pair_key("team-a", "team-b")];
    assert_eq!(history.len(), 2);
    // Stable sort: original relative order preserved on a date tie.
    assert_eq!(history[0].home_goals, 1);
    assert_eq!(history[1].home_goals, 0);
}

#[test]
fn selected_matches_always_predate_the_fixture() {
    let rows: Vec<CanonicalMatch> = (0..24)
        .map(|i| {
            let d = date(2020 + (i / 12) as i32, (i % 12) as u32 + 1, 15);
            if i % 2 == 0 {
                match_row(d, "team-a", "team-b", Some((i, 1)))
            } else {
                match_row(d, "team-b", "team-a", Some((1, i)))
            }
        })
        .collect();
    let index = build_pair_index(&rows);
    let history = &index[&pair_key("team-a", "team-b")];

    for fixture_date in [
        date(2020, 1, 15),
        date(2020, 7, 1),
        date(2021, 6, 15),
        date(2023, 1, 1),
    ] {
        for view in [H2hView::Overall, H2hView::Venue] {
            let expected = history
                .iter()
                .filter(|m| m.date < fixture_date)
                .filter(|m| {
                    view == H2hView::Overall
                        || (m.home_team == "team-a" && m.away_team == "team-b")
                })
                .count()
                .min(5);
            let snap = compute_h2h(history, "team-a", "team-b", fixture_date, 5, view);
            assert_eq!(snap.matches, expected, "view {view:?} at {fixture_date}");
        }
    }
}
