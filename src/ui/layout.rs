use tui::layout::{Constraint, Layout, Rect, Size};
pub const TAB_BAR_HEIGHT: u16 = 3;
pub const STATUS_HEIGHT: u16 = 1;
pub const LOG_PANE_HEIGHT: u16 = 10;

/// Pre-computed layout areas for the main draw loop.
#[derive(Debug, PartialEq)]
pub struct LayoutAreas {
    pub tab_bar: [Rect; 2],
    pub main: Rect,
    pub status: Rect,
    pub logs: Option<Rect>,
}

impl LayoutAreas {
    pub fn new(size: Size) -> Self {
        let rect = Rect::new(0, 0, size.width, size.height);
        Self::from_rect(rect, false, false)
    }

    pub fn update(&mut self, area: Rect, full_screen: bool, show_logs: bool) {
        *self = Self::from_rect(area, full_screen, show_logs);
    }

    fn from_rect(area: Rect, full_screen: bool, show_logs: bool) -> Self {
        let (tab, rest) = if full_screen {
            (Rect::ZERO, area)
        } else {
            let [tab, rest] =
                Layout::vertical([Constraint::Length(TAB_BAR_HEIGHT), Constraint::Fill(1)])
                    .areas(area);
            (tab, rest)
        };

        let (content, logs) = if show_logs {
            let [content, logs] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(LOG_PANE_HEIGHT)])
                    .areas(rest);
            (content, Some(logs))
        } else {
            (rest, None)
        };

        let [main, status] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(STATUS_HEIGHT)])
                .areas(content);

        LayoutAreas {
            tab_bar: if full_screen { [Rect::ZERO, Rect::ZERO] } else { Self::split_tab_bar(tab) },
            main,
            status,
            logs,
        }
    }

    fn split_tab_bar(area: Rect) -> [Rect; 2] {
        Layout::horizontal([Constraint::Percentage(85), Constraint::Percentage(15)]).areas(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_bar_sits_above_main() {
        let areas = LayoutAreas::new(Size::new(100, 40));
        assert_eq!(areas.tab_bar[0].height, TAB_BAR_HEIGHT);
        assert_eq!(areas.main.y, TAB_BAR_HEIGHT);
        assert_eq!(areas.status.y, 39);
        assert!(areas.logs.is_none());
    }

    #[test]
    fn full_screen_drops_tab_bar() {
        let mut areas = LayoutAreas::new(Size::new(100, 40));
        areas.update(Rect::new(0, 0, 100, 40), true, false);
        assert_eq!(areas.tab_bar, [Rect::ZERO, Rect::ZERO]);
        assert_eq!(areas.main.y, 0);
    }

    #[test]
    fn log_pane_takes_bottom_rows() {
        let mut areas = LayoutAreas::new(Size::new(100, 40));
        areas.update(Rect::new(0, 0, 100, 40), false, true);
        let logs = areas.logs.expect("log pane");
        assert_eq!(logs.height, LOG_PANE_HEIGHT);
        assert_eq!(logs.y + logs.height, 40);
        assert_eq!(areas.status.y + 1, logs.y);
    }
}
