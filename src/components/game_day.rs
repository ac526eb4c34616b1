use shl_api::schedule::{Matchup, MatchupSide, parse_game_date, resolve_matchup};
use shl_api::{Game, TeamRegistry};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::Style;
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

use crate::components::palette::{Tone, resolve};

/// Narrowest card that still fits `ABC 10 @ DEF 10 (SO)`.
pub const CARD_MIN_WIDTH: u16 = 26;

/// All games of one day, one matchup per row.
pub struct GameDayCard<'a> {
    pub date: &'a str,
    pub games: &'a [Game],
    pub teams: &'a TeamRegistry,
}

impl GameDayCard<'_> {
    /// Border plus one row per game.
    pub fn height(games: usize) -> u16 {
        games as u16 + 2
    }
}

impl Widget for GameDayCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(resolve(Tone::Dim))
            .title(Span::styled(format!(" {} ", day_title(self.date)), resolve(Tone::Accent)));

        let lines: Vec<Line> = self
            .games
            .iter()
            .map(|g| matchup_line(&resolve_matchup(g, self.teams)))
            .collect();
        Paragraph::new(lines).block(block).render(area, buf);
    }
}

/// `Sat Jan 01`, or the raw date when it cannot be parsed.
pub fn day_title(raw: &str) -> String {
    parse_game_date(raw)
        .map(|d| d.format("%a %b %d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn matchup_line(matchup: &Matchup) -> Line<'static> {
    let mut spans = vec![
        side_span(&matchup.away, matchup.played),
        Span::styled(" @ ", resolve(Tone::Dim)),
        side_span(&matchup.home, matchup.played),
    ];
    if let Some(note) = matchup.win_note {
        spans.push(Span::styled(format!(" {note}"), resolve(Tone::Dim)));
    }
    Line::from(spans)
}

fn side_span(side: &MatchupSide, played: bool) -> Span<'static> {
    let style = match (played, side.won) {
        (false, _) => Style::default(),
        (true, true) => resolve(Tone::Winner),
        (true, false) => resolve(Tone::Loser),
    };
    Span::styled(format!("{:<3} {:>2}", side.abbr, side.score_label()), style)
}

/// One `[date, matchup, result]` row per game, in page order. Used for the
/// single-team table, where the result column reads `TBD` until played.
pub fn result_rows<'a>(
    days: impl Iterator<Item = (&'a str, &'a [Game])>,
    teams: &TeamRegistry,
) -> Vec<[String; 3]> {
    days.flat_map(|(date, games)| {
        games.iter().map(move |g| {
            let matchup = resolve_matchup(g, teams);
            [
                day_title(date),
                format!("{} @ {}", matchup.away.abbr, matchup.home.abbr),
                matchup.result_label(),
            ]
        })
    })
    .collect()
}

/// Lay cards out left to right, wrapping to a new row when the width runs out.
/// Each row is as tall as its tallest card; cards that do not fit vertically
/// are dropped.
pub fn card_grid(area: Rect, heights: &[u16]) -> Vec<Rect> {
    let cols = (area.width / CARD_MIN_WIDTH).max(1) as usize;
    let col_width = area.width / cols as u16;

    let mut rects = Vec::with_capacity(heights.len());
    let mut y = area.y;
    for row in heights.chunks(cols) {
        let row_height = row.iter().copied().max().unwrap_or(0);
        if y + row_height > area.y + area.height {
            break;
        }
        for (col, &height) in row.iter().enumerate() {
            let x = area.x + col as u16 * col_width;
            rects.push(Rect::new(x, y, col_width, height));
        }
        y += row_height;
    }
    rects
}

#[cfg(test)]
mod tests {
    use super::*;
    use shl_api::Team;

    fn registry() -> TeamRegistry {
        TeamRegistry::new(vec![
            Team { id: 1, abbreviation: "TOR".into(), ..Default::default() },
            Team { id: 2, abbreviation: "BUF".into(), ..Default::default() },
        ])
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn day_title_formats_known_dates() {
        assert_eq!(day_title("2022-01-01"), "Sat Jan 01");
        assert_eq!(day_title("someday"), "someday");
    }

    #[test]
    fn played_game_line_shows_scores_and_note() {
        let game = Game {
            date: "2022-01-01".into(),
            away_team: 1,
            home_team: 2,
            away_score: 3,
            home_score: 2,
            played: true,
            overtime: true,
            ..Default::default()
        };
        let line = matchup_line(&resolve_matchup(&game, &registry()));
        assert_eq!(line_text(&line), "TOR  3 @ BUF  2 (OT)");
        assert_eq!(line.spans[0].style, resolve(Tone::Winner));
        assert_eq!(line.spans[2].style, resolve(Tone::Loser));
    }

    #[test]
    fn unplayed_game_line_uses_placeholders() {
        let game = Game { away_team: 1, home_team: 99, ..Default::default() };
        let line = matchup_line(&resolve_matchup(&game, &registry()));
        assert_eq!(line_text(&line), "TOR  * @ HET  *");
    }

    #[test]
    fn result_rows_mark_unplayed_games_tbd() {
        let played = Game {
            away_team: 2,
            home_team: 1,
            away_score: 2,
            home_score: 3,
            played: true,
            shootout: true,
            ..Default::default()
        };
        let upcoming = Game { away_team: 1, home_team: 2, ..Default::default() };
        let first = [played];
        let second = [upcoming];
        let days = [("2022-01-01", &first[..]), ("2022-01-02", &second[..])];

        let rows = result_rows(days.into_iter(), &registry());
        assert_eq!(
            rows,
            vec![
                ["Sat Jan 01".to_string(), "BUF @ TOR".to_string(), "2 - 3 (SO)".to_string()],
                ["Sun Jan 02".to_string(), "TOR @ BUF".to_string(), "TBD".to_string()],
            ]
        );
    }

    #[test]
    fn grid_wraps_into_rows() {
        let area = Rect::new(0, 0, CARD_MIN_WIDTH * 2 + 1, 20);
        let rects = card_grid(area, &[4, 3, 5]);
        assert_eq!(rects.len(), 3);
        assert_eq!((rects[0].x, rects[0].y), (0, 0));
        assert_eq!(rects[1].x, rects[0].width);
        assert_eq!((rects[2].x, rects[2].y), (0, 4));
    }

    #[test]
    fn grid_drops_cards_below_the_fold() {
        let area = Rect::new(0, 0, CARD_MIN_WIDTH, 6);
        let rects = card_grid(area, &[4, 4]);
        assert_eq!(rects.len(), 1);
    }

    #[test]
    fn narrow_area_still_gets_one_column() {
        let area = Rect::new(2, 1, 10, 10);
        let rects = card_grid(area, &[3]);
        assert_eq!(rects, vec![Rect::new(2, 1, 10, 3)]);
    }
}
