use clap::Parser;
use log::LevelFilter;
use shl_api::League;

/// Days of game cards shown per schedule page.
pub const DAYS_PER_PAGE_OPTIONS: [usize; 3] = [4, 8, 16];

/// Terminal viewer for the simulation hockey index
#[derive(Parser, Debug, Clone)]
#[command(name = "shltui", version, about)]
pub struct Config {
    /// League to open: shl, smjhl, iihf or wjc
    #[arg(long, env = "SHL_LEAGUE", default_value = "shl")]
    pub league: League,

    /// Season number; the index's current season when omitted
    #[arg(long, env = "SHL_SEASON")]
    pub season: Option<u32>,

    /// Index API base URL
    #[arg(long, env = "SHL_API_ENDPOINT", default_value = shl_api::client::DEFAULT_ENDPOINT)]
    pub api_endpoint: String,

    /// Game days per schedule page (4, 8 or 16)
    #[arg(long, env = "SHL_DAYS_PER_PAGE", default_value = "4", value_parser = parse_days_per_page)]
    pub days_per_page: usize,

    /// Level for the in-app log pane (off, error, warn, info, debug, trace)
    #[arg(long, env = "SHL_LOG", default_value = "error", value_parser = parse_level)]
    pub log_level: LevelFilter,
}

fn parse_days_per_page(raw: &str) -> Result<usize, String> {
    let days: usize = raw.trim().parse().map_err(|e| format!("{raw}: {e}"))?;
    if DAYS_PER_PAGE_OPTIONS.contains(&days) {
        Ok(days)
    } else {
        Err(format!("must be one of {DAYS_PER_PAGE_OPTIONS:?}"))
    }
}

fn parse_level(raw: &str) -> Result<LevelFilter, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("unknown log level `{raw}`"))
}

/// Parse `args` with every environment fallback switched off.
#[cfg(test)]
pub fn parse_args_only(args: &[&str]) -> Result<Config, clap::Error> {
    use clap::{CommandFactory, FromArgMatches};

    let matches = Config::command()
        .mut_args(|arg| arg.env(None::<&'static str>))
        .try_get_matches_from(args)?;
    Config::from_arg_matches(&matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_arguments() {
        let config = parse_args_only(&["shltui"]).expect("defaults parse");
        assert_eq!(config.league, League::Shl);
        assert_eq!(config.season, None);
        assert_eq!(config.days_per_page, 4);
        assert_eq!(config.log_level, LevelFilter::Error);
        assert_eq!(config.api_endpoint, shl_api::client::DEFAULT_ENDPOINT);
    }

    #[test]
    fn league_and_season_from_flags() {
        let config = parse_args_only(&["shltui", "--league", "IIHF", "--season", "66"])
            .expect("flags parse");
        assert_eq!(config.league, League::Iihf);
        assert_eq!(config.season, Some(66));
    }

    #[test]
    fn days_per_page_is_restricted() {
        assert_eq!(parse_days_per_page("16"), Ok(16));
        assert!(parse_days_per_page("5").is_err());
        assert!(parse_days_per_page("four").is_err());
    }

    #[test]
    fn every_option_has_an_env_fallback() {
        use clap::CommandFactory;
        let command = Config::command();
        let envs: Vec<_> = command
            .get_arguments()
            .filter_map(|a| a.get_env())
            .filter_map(|e| e.to_str())
            .collect();
        assert_eq!(
            envs,
            vec!["SHL_LEAGUE", "SHL_SEASON", "SHL_API_ENDPOINT", "SHL_DAYS_PER_PAGE", "SHL_LOG"]
        );
    }

    #[test]
    fn unknown_league_is_rejected() {
        assert!(parse_args_only(&["shltui", "--league", "nhl"]).is_err());
    }
}
