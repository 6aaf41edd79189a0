pub mod feature_table;
pub mod h2h;
pub mod leagues;
pub mod merge;
pub mod raw_matches;
pub mod targets;
pub mod team_names;
