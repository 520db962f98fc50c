// tiledash-widgets/src/table.rs
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    prelude::StatefulWidget,
    style::{Color, Modifier, Style},
    text::Text,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
};
use tiledash_core::{Event, EventResult, Props, Size, Widget};

use crate::common::{focus_color, prop_rows, prop_str};
use crate::sample;

const AMOUNT_COLUMN: usize = 3;

/// Four-column ledger: date, counterparty, category, amount.
///
/// Backs both the recent-transactions table and the scheduled-transfers
/// list; only the title, header and sample rows differ.
///
/// # Props
/// - `title` - table title
/// - `rows` - `[[date, counterparty, category, amount], ...]`
///
/// # Keyboard Shortcuts
/// - `j` / `k` - Move the selection down/up
pub struct TableWidget {
    title: String,
    header: [&'static str; 4],
    rows: Vec<Vec<String>>,
    state: TableState,
}

impl TableWidget {
    pub fn transactions(props: &Props) -> Self {
        Self::with_defaults(
            props,
            "Recent transactions",
            ["Date", "Counterparty", "Category", "Amount"],
            sample::TRANSACTIONS,
        )
    }

    pub fn scheduled_transfers(props: &Props) -> Self {
        Self::with_defaults(
            props,
            "Scheduled transfers",
            ["Execution", "Beneficiary", "Repeat", "Amount"],
            sample::SCHEDULED_TRANSFERS,
        )
    }

    fn with_defaults(
        props: &Props,
        title: &str,
        header: [&'static str; 4],
        sample_rows: &[[&str; 4]],
    ) -> Self {
        Self {
            title: prop_str(props, "title", title),
            header,
            rows: prop_rows(props, "rows").unwrap_or_else(|| sample::owned_rows(sample_rows)),
            state: TableState::default(),
        }
    }

    fn select_next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let next = match self.state.selected() {
            Some(i) => (i + 1).min(self.rows.len() - 1),
            None => 0,
        };
        self.state.select(Some(next));
    }

    fn select_previous(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let previous = self.state.selected().map_or(0, |i| i.saturating_sub(1));
        self.state.select(Some(previous));
    }
}

fn amount_color(amount: &str) -> Color {
    if amount.trim_start().starts_with('-') {
        Color::Red
    } else {
        Color::Green
    }
}

impl Widget for TableWidget {
    fn on_event(&mut self, event: Event) -> EventResult {
        use crossterm::event::KeyCode;

        if let Event::Key(key) = event {
            match key.code {
                KeyCode::Char('j') => {
                    self.select_next();
                    return EventResult::Consumed;
                }
                KeyCode::Char('k') => {
                    self.select_previous();
                    return EventResult::Consumed;
                }
                _ => {}
            }
        }

        EventResult::Ignored
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        self.render_focused(area, buf, false);
    }

    fn render_focused(&mut self, area: Rect, buf: &mut Buffer, focused: bool) {
        let header = Row::new(self.header.iter().map(|h| Cell::from(*h)))
            .style(Style::default().add_modifier(Modifier::BOLD));

        let rows = self.rows.iter().map(|row| {
            Row::new(row.iter().enumerate().map(|(i, cell)| {
                if i == AMOUNT_COLUMN {
                    Cell::from(Text::from(format!("€ {}", cell)).right_aligned())
                        .style(Style::default().fg(amount_color(cell)))
                } else {
                    Cell::from(cell.as_str())
                }
            }))
        });

        let widths = [
            Constraint::Length(11),
            Constraint::Fill(2),
            Constraint::Fill(1),
            Constraint::Length(12),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", self.title))
                    .border_style(Style::default().fg(focus_color(focused))),
            )
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        StatefulWidget::render(table, area, buf, &mut self.state);
    }

    fn preferred_size(&self) -> Option<Size> {
        Some(Size {
            width: 60,
            height: (self.rows.len() as u16).saturating_add(3).clamp(6, 14),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_to_string;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn test_renders_rows() {
        let mut widget = TableWidget::transactions(&Props::new());
        let area = Rect::new(0, 0, 80, 12);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);

        let out = buffer_to_string(&buf);
        assert!(out.contains("Recent transactions"));
        assert!(out.contains("Counterparty"));
        assert!(out.contains("Salary ACME NV"));
        assert!(out.contains("€ 3,100.00"));
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut widget = TableWidget::scheduled_transfers(&Props::new());
        assert_eq!(widget.on_event(key('k')), EventResult::Consumed);
        assert_eq!(widget.state.selected(), Some(0));

        for _ in 0..10 {
            widget.on_event(key('j'));
        }
        assert_eq!(widget.state.selected(), Some(3));
        assert_eq!(widget.on_event(key('x')), EventResult::Ignored);
    }

    #[test]
    fn test_preferred_height_tracks_rows() {
        let widget = TableWidget::transactions(&Props::new());
        assert_eq!(widget.preferred_size().map(|s| s.height), Some(11));

        let mut props = Props::new();
        props.insert("rows".into(), serde_json::json!([]));
        let widget = TableWidget::transactions(&props);
        assert_eq!(widget.preferred_size().map(|s| s.height), Some(6));
    }

    #[test]
    fn test_amount_color() {
        assert_eq!(amount_color("-22.40"), Color::Red);
        assert_eq!(amount_color("3,100.00"), Color::Green);
    }
}
