use shl_api::playoffs::{ResolvedRound, ResolvedSeries, SeriesSide};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Modifier, Style};
use tui::widgets::Widget;

use crate::components::palette::{Tone, resolve, team_style};

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

/// Rows per series cell: away line, summary line, home line.
pub const SERIES_HEIGHT: u16 = 3;

/// Width of the connector zone drawn between adjacent round columns.
pub const CONNECTOR_WIDTH: u16 = 3;

/// Maximum series cell width in wider terminals.
const CELL_W_FULL: u16 = 24;

/// Below this width a side shows its abbreviation instead of its name.
const NAME_MIN_WIDTH: u16 = 16;

/// Height of the slot a series occupies at bracket depth `d`:
/// `slot(0) = SERIES_HEIGHT`, `slot(d) = 2 * slot(d-1) + 1`. Saturates at
/// `u16::MAX` for implausibly deep brackets.
fn slot_height(depth: usize) -> u16 {
    u32::try_from(depth)
        .ok()
        .and_then(|d| 1u16.checked_shl(d))
        .map_or(u16::MAX, |scale| (SERIES_HEIGHT + 1).saturating_mul(scale) - 1)
}

// ---------------------------------------------------------------------------
// SeriesCell: pre-computed position for one series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesCell {
    /// Row of the summary line, relative to the top of the grid.
    pub center_row: u16,
    /// Starting column, relative to the left of the grid.
    pub col: u16,
    pub cell_width: u16,
    pub round: usize,
    pub series_idx: usize,
}

// ---------------------------------------------------------------------------
// BracketGrid: layout engine for a playoff bracket
// ---------------------------------------------------------------------------

/// Pre-computed layout for a bracket whose rounds run left to right.
///
/// Series centers follow the triangle formula
/// `center[d][i] = slot(d)/2 + i * (slot(d) + 1)`, so for an 8-4-2-1 bracket:
///
///   Round 1 (d=0): [1, 5, 9, 13, 17, 21, 25, 29]
///   Round 2 (d=1): [3, 11, 19, 27]
///   Round 3 (d=2): [7, 23]
///   Finals  (d=3): [15]
#[derive(Debug, Clone)]
pub struct BracketGrid {
    /// Round-major: all series of round 0, then round 1, ...
    pub cells: Vec<SeriesCell>,
    pub round_cols: Vec<u16>,
    pub cell_width: u16,
    pub total_height: u16,
    offsets: Vec<usize>,
}

impl BracketGrid {
    /// Lay out rounds with the given series counts into `terminal_width` columns.
    pub fn compute(terminal_width: u16, series_counts: &[usize]) -> Self {
        let rounds = series_counts.len().max(1) as u16;
        let connector_total = CONNECTOR_WIDTH.saturating_mul(rounds - 1);
        let per_col = terminal_width.saturating_sub(connector_total) / rounds;
        let cell_width = per_col.clamp(1, CELL_W_FULL);
        let stride = cell_width + CONNECTOR_WIDTH;

        let round_cols: Vec<u16> = (0..series_counts.len())
            .map(|d| (d as u16).saturating_mul(stride))
            .collect();

        let mut cells = Vec::with_capacity(series_counts.iter().sum());
        let mut offsets = Vec::with_capacity(series_counts.len() + 1);
        let mut total_height = 0;
        for (d, &count) in series_counts.iter().enumerate() {
            offsets.push(cells.len());
            let slot = slot_height(d);
            for i in 0..count {
                let center_row = (slot / 2).saturating_add((i as u16).saturating_mul(slot.saturating_add(1)));
                total_height = total_height.max(center_row.saturating_add(SERIES_HEIGHT / 2 + 1));
                cells.push(SeriesCell {
                    center_row,
                    col: round_cols[d],
                    cell_width,
                    round: d,
                    series_idx: i,
                });
            }
        }
        offsets.push(cells.len());

        Self { cells, round_cols, cell_width, total_height, offsets }
    }

    pub fn cells_for_round(&self, round: usize) -> &[SeriesCell] {
        match (self.offsets.get(round), self.offsets.get(round + 1)) {
            (Some(&start), Some(&end)) => &self.cells[start..end],
            _ => &[],
        }
    }

    pub fn cell(&self, round: usize, series: usize) -> Option<&SeriesCell> {
        self.cells_for_round(round).get(series)
    }

    /// Scroll offset that keeps the selected series in a viewport of `height` rows.
    pub fn scroll_for(&self, round: usize, series: usize, height: u16) -> u16 {
        let Some(cell) = self.cell(round, series) else {
            return 0;
        };
        let max_scroll = self.total_height.saturating_sub(height);
        cell.center_row.saturating_sub(height / 2).min(max_scroll)
    }
}

// ---------------------------------------------------------------------------
// BracketView widget
// ---------------------------------------------------------------------------

/// Renders resolved rounds with a header row of round labels.
pub struct BracketView<'a> {
    pub rounds: &'a [ResolvedRound],
    pub grid: &'a BracketGrid,
    pub selected_round: usize,
    pub selected_series: usize,
    pub scroll_offset: u16,
}

impl Widget for BracketView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 10 || area.height < SERIES_HEIGHT + 1 {
            return;
        }

        let limit_x = area.x + area.width;
        for (d, round) in self.rounds.iter().enumerate() {
            let Some(&col) = self.grid.round_cols.get(d) else {
                continue;
            };
            let x = area.x.saturating_add(col);
            if x >= limit_x {
                continue;
            }
            let label: String = round.label.chars().take((limit_x - x) as usize).collect();
            buf.set_string(x, area.y, &label, resolve(Tone::Accent));
        }

        let body = Rect::new(area.x, area.y + 1, area.width, area.height - 1);

        // Pass 1: series cells
        for cell in &self.grid.cells {
            let Some(series) = self
                .rounds
                .get(cell.round)
                .and_then(|r| r.series.get(cell.series_idx))
            else {
                continue;
            };
            let selected =
                cell.round == self.selected_round && cell.series_idx == self.selected_series;
            draw_series_cell(series, cell, selected, body, self.scroll_offset, buf);
        }

        // Pass 2: connectors where a round feeds the next one pairwise.
        for d in 0..self.grid.round_cols.len().saturating_sub(1) {
            let children = self.grid.cells_for_round(d);
            let parents = self.grid.cells_for_round(d + 1);
            if children.len() != parents.len() * 2 {
                continue;
            }
            let conn_x = body
                .x
                .saturating_add(self.grid.round_cols[d])
                .saturating_add(self.grid.cell_width);
            for (j, parent) in parents.iter().enumerate() {
                draw_connector(
                    children[2 * j].center_row,
                    parent.center_row,
                    children[2 * j + 1].center_row,
                    conn_x,
                    body,
                    self.scroll_offset,
                    buf,
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Shared drawing helpers
// ---------------------------------------------------------------------------

/// Convert a grid row to an absolute screen y, applying scroll + area bounds.
fn screen_y(grid_row: u16, scroll: u16, area: Rect) -> Option<u16> {
    if grid_row < scroll {
        return None;
    }
    let rel = grid_row - scroll;
    if rel >= area.height {
        return None;
    }
    Some(area.y + rel)
}

fn draw_series_cell(
    series: &ResolvedSeries,
    cell: &SeriesCell,
    selected: bool,
    area: Rect,
    scroll: u16,
    buf: &mut Buffer,
) {
    let x = area.x.saturating_add(cell.col);
    if x >= area.x + area.width {
        return;
    }
    let avail_w = (area.x + area.width).saturating_sub(x) as usize;
    let width = cell.cell_width as usize;

    let top_row = cell.center_row.saturating_sub(1);
    let bot_row = cell.center_row.saturating_add(1);

    for (row, side) in [(top_row, &series.away), (bot_row, &series.home)] {
        let Some(sy) = screen_y(row, scroll, area) else {
            continue;
        };
        let text: String = format_side_line(side, width).chars().take(avail_w).collect();
        let mut style = side_style(side);
        if selected {
            style = style.add_modifier(Modifier::REVERSED);
        }
        buf.set_string(x, sy, &text, style);
    }

    if let Some(sy) = screen_y(cell.center_row, scroll, area) {
        let summary = format!(" {:<w$}", series.summary(), w = width.saturating_sub(1));
        let text: String = summary.chars().take(width.min(avail_w)).collect();
        let style = if selected { resolve(Tone::Selected) } else { resolve(Tone::Dim) };
        buf.set_string(x, sy, &text, style);
    }
}

/// Lost sides lose their team color; the others are painted in it.
fn side_style(side: &SeriesSide) -> Style {
    if side.lost {
        resolve(Tone::Loser)
    } else if side.won {
        team_style(&side.color).add_modifier(Modifier::BOLD)
    } else {
        team_style(&side.color)
    }
}

/// One side of a series: `" Toronto Stars      4 "`, exactly `width` columns.
///
/// Layout: space + label(width-5) + space + wins(2) + space.
fn format_side_line(side: &SeriesSide, width: usize) -> String {
    let label = if width >= NAME_MIN_WIDTH as usize { &side.name } else { &side.abbr };
    let label_w = width.saturating_sub(5);
    let label: String = label.chars().take(label_w).collect();
    let line = format!(" {label:<label_w$} {:>2} ", side.wins);
    line.chars().take(width).collect()
}

/// Draw box-drawing connectors between one parent and its two children.
///
/// ```text
///  child_top  ──┐         (col_a='─'  col_b='┐')
///               │         (col_b='│')
///  parent     ──├──       (col_a='─'  col_b='├'  col_c='─')
///               │         (col_b='│')
///  child_bot  ──┘         (col_a='─'  col_b='┘')
/// ```
fn draw_connector(
    r_top: u16,
    r_mid: u16,
    r_bot: u16,
    conn_base_x: u16,
    area: Rect,
    scroll: u16,
    buf: &mut Buffer,
) {
    let style = resolve(Tone::Dim);
    let col_a = conn_base_x;
    let col_b = conn_base_x.saturating_add(1);
    let col_c = conn_base_x.saturating_add(2);
    let limit_x = area.x + area.width;

    let mut put = |x: u16, row: u16, ch: char| {
        if x < limit_x
            && let Some(sy) = screen_y(row, scroll, area)
        {
            put_char(buf, x, sy, ch, style);
        }
    };

    put(col_a, r_top, '─');
    put(col_b, r_top, '┐');
    for row in r_top.saturating_add(1)..r_mid {
        put(col_b, row, '│');
    }
    put(col_a, r_mid, '─');
    put(col_b, r_mid, '├');
    put(col_c, r_mid, '─');
    for row in r_mid.saturating_add(1)..r_bot {
        put(col_b, row, '│');
    }
    put(col_a, r_bot, '─');
    put(col_b, r_bot, '┘');
}

fn put_char(buf: &mut Buffer, x: u16, y: u16, ch: char, style: Style) {
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_char(ch);
        cell.set_style(style);
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
