use chrono::NaiveDate;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use footy_targets::h2h::{H2hMatch, H2hView, compute_h2h};
use footy_targets::team_names::normalize_team_name;

fn sample_history(len: usize) -> Vec<H2hMatch> {
    (0..len)
        .map(|i| {
            let day =
                NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + chrono::Days::new(7 * i as u64);
            let flip = i % 3 == 0;
            H2hMatch {
                date: day,
                home_team: if flip { "team-b" } else { "team-a" }.to_string(),
                away_team: if flip { "team-a" } else { "team-b" }.to_string(),
                home_goals: (i % 4) as i32,
                away_goals: (i % 3) as i32,
            }
        })
        .collect()
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize_team_name", |b| {
        b.iter(|| {
            let norm = normalize_team_name(black_box("  Atlético de Madrid S.A.D. FC "));
            black_box(norm.len());
        })
    });
}

fn bench_h2h(c: &mut Criterion) {
    let history = sample_history(400);
    let fixture_date = NaiveDate::from_ymd_opt(2005, 6, 1).unwrap();

    c.bench_function("h2h_overall", |b| {
        b.iter(|| {
            let snap = compute_h2h(
                black_box(&history),
                "team-a",
                "team-b",
                fixture_date,
                5,
                H2hView::Overall,
            );
            black_box(snap.matches);
        })
    });

    c.bench_function("h2h_venue", |b| {
        b.iter(|| {
            let snap = compute_h2h(
                black_box(&history),
                "team-a",
                "team-b",
                fixture_date,
                5,
                H2hView::Venue,
            );
            black_box(snap.matches);
        })
    });
}

criterion_group!(benches, bench_normalize, bench_h2h);
criterion_main!(benches);
