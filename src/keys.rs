use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;
    let mut requests = Vec::new();

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Standings),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Schedule),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Playoffs),
        (_, Char('4'), _) => guard.update_tab(MenuItem::Leaders),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Standings
        (MenuItem::Standings, Char('j') | KeyCode::Down, _) => guard.standings_scroll_down(),
        (MenuItem::Standings, Char('k') | KeyCode::Up, _) => guard.standings_scroll_up(),

        // Schedule
        (MenuItem::Schedule, Char('l') | KeyCode::Right, _) => guard.schedule_next_page(),
        (MenuItem::Schedule, Char('h') | KeyCode::Left, _) => guard.schedule_prev_page(),
        (MenuItem::Schedule, Char('d'), _) => guard.schedule_cycle_days(),
        (MenuItem::Schedule, Char('t'), _) => guard.schedule_cycle_team(),
        (MenuItem::Schedule, Char('s'), _) => requests.push(guard.schedule_cycle_season_type()),

        // Playoffs
        (MenuItem::Playoffs, Char('l') | KeyCode::Right, _) => guard.state.playoffs.next_round(),
        (MenuItem::Playoffs, Char('h') | KeyCode::Left, _) => guard.state.playoffs.prev_round(),
        (MenuItem::Playoffs, Char('j') | KeyCode::Down, _) => guard.state.playoffs.series_down(),
        (MenuItem::Playoffs, Char('k') | KeyCode::Up, _) => guard.state.playoffs.series_up(),

        // Leaders
        (MenuItem::Leaders, Char('p'), _) => requests.push(guard.leaders_toggle_player_type()),
        (MenuItem::Leaders, Char('s'), _) => requests.push(guard.leaders_cycle_season_type()),
        (MenuItem::Leaders, Char('j') | KeyCode::Down, _) => guard.leaders_scroll_down(),
        (MenuItem::Leaders, Char('k') | KeyCode::Up, _) => guard.leaders_scroll_up(),

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),
        (_, Char('L'), _) => requests = guard.cycle_league(),
        (_, Char('R'), _) => requests = guard.reload_all(),

        _ => {}
    }

    drop(guard);
    for request in requests {
        let _ = network_requests.send(request).await;
    }
}
