use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Row, Table, Tabs};
use tui::{Frame, Terminal};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

use crate::app::{App, MenuItem};
use crate::components::bracket::{BracketGrid, BracketView};
use crate::components::game_day::{GameDayCard, card_grid, result_rows};
use crate::components::palette::{Tone, resolve};
use crate::state::loadable::Loadable;
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use shl_api::TeamRegistry;

static TABS: &[&str; 4] = &["Standings", "Schedule", "Playoffs", "Leaders"];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Standings => draw_standings(f, layout.main, app),
            MenuItem::Schedule => draw_schedule(f, layout.main, app),
            MenuItem::Playoffs => draw_playoffs(f, layout.main, app),
            MenuItem::Leaders => draw_leaders(f, layout.main, app),
            MenuItem::Help => draw_help(f, layout.main),
        }

        draw_status(f, layout.status, app);
        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }
        draw_loading_spinner(f, f.area(), app, loading);
    });
    if let Err(e) = result {
        log::error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Standings => 0,
        MenuItem::Schedule => 1,
        MenuItem::Playoffs => 2,
        MenuItem::Leaders => 3,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let season = app.state.season.map(|s| format!(" S{s}")).unwrap_or_default();
    let help = Paragraph::new(format!("{}{season}  ? ", app.state.league.label()))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

/// Placeholder text for a view whose data is not ready yet.
fn not_ready_message<T>(loadable: &Loadable<T>, what: &str) -> Option<String> {
    match loadable {
        Loadable::Ready(_) => None,
        Loadable::Loading => Some(format!("Loading {what}...")),
        Loadable::Failed(err) => Some(format!("Could not load {what}:\n{err}")),
    }
}

fn draw_message(f: &mut Frame, area: Rect, msg: &str) {
    f.render_widget(
        Paragraph::new(msg.to_string())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_standings(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Standings ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let standings = &app.state.standings;
    if let Some(msg) = not_ready_message(standings.rows.get(), "standings") {
        draw_message(f, inner, &msg);
        return;
    }
    let rows = standings.rows.ready().map(Vec::as_slice).unwrap_or_default();
    if rows.is_empty() {
        draw_message(f, inner, "No standings for this season");
        return;
    }

    let header = Row::new(["#", "Team", "GP", "W", "L", "OTL", "SOL", "PTS", "GF", "GA", "DIFF"])
        .style(resolve(Tone::Accent));
    let body = rows
        .iter()
        .enumerate()
        .skip(standings.scroll_offset as usize)
        .map(|(idx, r)| {
            let position = r.position.map_or(idx + 1, |p| p as usize);
            Row::new(vec![
                position.to_string(),
                format!("{} {}", r.abbreviation, r.name),
                r.games_played.to_string(),
                r.wins.to_string(),
                r.losses.to_string(),
                r.overtime_losses.to_string(),
                r.shootout_losses.to_string(),
                r.points.to_string(),
                r.goals_for.to_string(),
                r.goals_against.to_string(),
                format!("{:+}", r.goal_differential()),
            ])
        });
    let widths = [
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(5),
    ];
    f.render_widget(Table::new(body, widths).header(header), inner);
}

fn draw_schedule(f: &mut Frame, area: Rect, app: &App) {
    let schedule = &app.state.schedule;
    let block = default_border(Color::White).title(format!(" Schedule | {} ", schedule.season_type.as_str()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let waiting = not_ready_message(schedule.games.get(), "schedule")
        .or_else(|| not_ready_message(app.state.teams.get(), "teams"));
    if let Some(msg) = waiting {
        draw_message(f, inner, &msg);
        return;
    }
    let (Some(window), Some(teams)) = (schedule.window(), app.state.teams.ready()) else {
        return;
    };
    let window = match window {
        Ok(window) => window,
        Err(e) => {
            draw_message(f, inner, &e.to_string());
            return;
        }
    };

    let [header, content] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(inner);

    let team = schedule
        .team_filter
        .map(|id| team_label(teams, id))
        .unwrap_or_else(|| "all teams".to_string());
    f.render_widget(
        Paragraph::new(format!(
            "page {}/{}  |  {} days  |  {team}  |  h/l page  d days  t team  s season type",
            schedule.page,
            schedule.last_page(),
            schedule.days_per_page,
        ))
        .style(Style::default().fg(Color::DarkGray)),
        header,
    );

    if window.is_empty() {
        draw_message(f, content, "No games scheduled");
        return;
    }

    // A single team's games read better as a results table.
    if schedule.team_filter.is_some() {
        let columns = Row::new(["Date", "Matchup", "Result"]).style(resolve(Tone::Accent));
        let rows = result_rows(window.game_days(), teams).into_iter().map(Row::new);
        let widths = [Constraint::Length(12), Constraint::Length(12), Constraint::Fill(1)];
        f.render_widget(Table::new(rows, widths).header(columns), content);
        return;
    }

    let days: Vec<_> = window.game_days().collect();
    let heights: Vec<u16> = days.iter().map(|(_, games)| GameDayCard::height(games.len())).collect();
    for ((date, games), rect) in days.into_iter().zip(card_grid(content, &heights)) {
        f.render_widget(GameDayCard { date, games, teams }, rect);
    }
}

fn team_label(teams: &TeamRegistry, id: i32) -> String {
    teams
        .get(id)
        .map(|t| t.abbreviation.clone())
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| format!("team {id}"))
}

fn draw_playoffs(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Playoffs ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let playoffs = &app.state.playoffs;
    let waiting = not_ready_message(playoffs.rounds.get(), "playoffs")
        .or_else(|| not_ready_message(app.state.teams.get(), "teams"));
    if let Some(msg) = waiting {
        draw_message(f, inner, &msg);
        return;
    }
    let rounds = match playoffs.bracket() {
        Some(Ok(rounds)) => rounds,
        Some(Err(e)) => {
            draw_message(f, inner, &e.to_string());
            return;
        }
        None => return,
    };
    if rounds.is_empty() {
        draw_message(f, inner, "No playoff bracket for this season");
        return;
    }

    let counts: Vec<usize> = rounds.iter().map(|r| r.series.len()).collect();
    let grid = BracketGrid::compute(inner.width, &counts);
    let scroll_offset = grid.scroll_for(
        playoffs.selected_round,
        playoffs.selected_series,
        inner.height.saturating_sub(1),
    );
    f.render_widget(
        BracketView {
            rounds,
            grid: &grid,
            selected_round: playoffs.selected_round,
            selected_series: playoffs.selected_series,
            scroll_offset,
        },
        inner,
    );
}

fn draw_leaders(f: &mut Frame, area: Rect, app: &App) {
    let leaders = &app.state.leaders;
    let stat = leaders.player_type.default_stat();
    let block = default_border(Color::White).title(format!(
        " {} {} | {} ",
        capitalize(leaders.player_type.as_str()),
        stat.label,
        leaders.season_type.as_str()
    ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if let Some(msg) = not_ready_message(leaders.leaders.get(), "leaders") {
        draw_message(f, inner, &msg);
        return;
    }
    let list = leaders.leaders.ready().map(Vec::as_slice).unwrap_or_default();
    if list.is_empty() {
        draw_message(f, inner, "No leaders for this season");
        return;
    }

    let header = Row::new(["#", "Player", "Team", stat.label]).style(resolve(Tone::Accent));
    let body = list
        .iter()
        .enumerate()
        .skip(leaders.scroll_offset as usize)
        .map(|(idx, l)| {
            Row::new(vec![
                (idx + 1).to_string(),
                l.name.clone(),
                l.team_abbr.clone(),
                l.value_label(),
            ])
        });
    let widths = [
        Constraint::Length(4),
        Constraint::Fill(2),
        Constraint::Length(6),
        Constraint::Length(8),
    ];
    f.render_widget(Table::new(body, widths).header(header), inner);
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = [
        ("q / Ctrl-C", "quit"),
        ("1 2 3 4", "Standings, Schedule, Playoffs, Leaders"),
        ("L", "next league"),
        ("R", "reload"),
        ("f", "full screen"),
        ("\"", "log pane"),
        ("Esc", "close help"),
        ("", ""),
        ("Schedule", "h/l page, d days per page, t team, s season type"),
        ("Playoffs", "h/l round, j/k series"),
        ("Leaders", "p skaters/goalies, s season type, j/k scroll"),
        ("Standings", "j/k scroll"),
    ];
    let lines: Vec<Line> = rows
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(format!("{key:>12}  "), resolve(Tone::Accent)),
                Span::raw(*what),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let (text, style) = if let Some(err) = app.state.last_error.as_deref() {
        (err.to_string(), Style::default().fg(Color::Red))
    } else if app.state.active_tab == MenuItem::Playoffs
        && let Some(series) = app.state.playoffs.selected()
    {
        let style = if series.is_decided() {
            resolve(Tone::Accent)
        } else {
            Style::default().fg(Color::Gray)
        };
        (
            format!("{} vs {}: {}", series.away.name, series.home.name, series.summary()),
            style,
        )
    } else {
        (String::new(), Style::default())
    };
    let clipped: String = text.chars().take(area.width as usize).collect();
    f.render_widget(Paragraph::new(clipped).style(style), area);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logger = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .output_separator(' ')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false)
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray))
        .style_debug(Style::default().fg(Color::DarkGray));
    f.render_widget(logger, area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
