use std::collections::HashMap;

use once_cell::sync::Lazy;

pub const PREMIER_LEAGUE_ID: u32 = 39;
pub const LA_LIGA_ID: u32 = 140;
pub const SERIE_A_ID: u32 = 135;
pub const BUNDESLIGA_ID: u32 = 78;
pub const LIGUE_1_ID: u32 = 61;
pub const PRIMEIRA_LIGA_ID: u32 = 94;
pub const EREDIVISIE_ID: u32 = 88;

/// Known aliases per league: full name, common abbreviation and the short
/// codes used by the raw results feeds. Lookup is exact after lowercase+trim;
/// no fuzzy matching.
static LEAGUE_ALIASES: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    let entries: &[(&str, u32)] = &[
        ("premier league", PREMIER_LEAGUE_ID),
        ("english premier league", PREMIER_LEAGUE_ID),
        ("epl", PREMIER_LEAGUE_ID),
        ("e0", PREMIER_LEAGUE_ID),
        ("la liga", LA_LIGA_ID),
        ("spanish la liga", LA_LIGA_ID),
        ("primera division", LA_LIGA_ID),
        ("primera división", LA_LIGA_ID),
        ("sp1", LA_LIGA_ID),
        ("serie a", SERIE_A_ID),
        ("italian serie a", SERIE_A_ID),
        ("i1", SERIE_A_ID),
        ("bundesliga", BUNDESLIGA_ID),
        ("german bundesliga", BUNDESLIGA_ID),
        ("d1", BUNDESLIGA_ID),
        ("ligue 1", LIGUE_1_ID),
        ("french ligue 1", LIGUE_1_ID),
        ("f1", LIGUE_1_ID),
        ("primeira liga", PRIMEIRA_LIGA_ID),
        ("liga portugal", PRIMEIRA_LIGA_ID),
        ("portuguese league", PRIMEIRA_LIGA_ID),
        ("p1", PRIMEIRA_LIGA_ID),
        ("eredivisie", EREDIVISIE_ID),
        ("dutch eredivisie", EREDIVISIE_ID),
        ("n1", EREDIVISIE_ID),
    ];
    entries.iter().copied().collect()
});

/// Map a raw league label to its canonical league id. Returns `None` for
/// labels outside the alias table; callers drop (and count) those rows.
pub fn resolve_league_id(raw: &str) -> Option<u32> {
    let key = raw.trim().to_lowercase();
    LEAGUE_ALIASES.get(key.as_str()).copied()
}
