pub mod bracket;
pub mod game_day;
pub mod palette;
