pub mod app_settings;
pub mod app_state;
pub mod loadable;
pub mod messages;
pub mod network;
