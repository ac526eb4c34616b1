use crate::config::Config;
use log::LevelFilter;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: LevelFilter,
    pub days_per_page: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self { full_screen: false, log_level: LevelFilter::Error, days_per_page: 4 }
    }
}

impl AppSettings {
    pub fn load(config: &Config) -> Self {
        Self {
            full_screen: false,
            log_level: config.log_level,
            days_per_page: config.days_per_page,
        }
    }
}
