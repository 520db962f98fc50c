// tiledash-widgets/src/stats.rs
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    prelude::Widget as RatatuiWidget,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tiledash_core::{Event, EventResult, Props, Size, Widget};

use crate::common::{focus_color, format_currency, format_delta, prop_f64, prop_str, trend_color};

/// Which headline figure a stats tile shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    Balance,
    Income,
    Expenses,
    Savings,
}

impl StatKind {
    /// Registry type key
    pub fn widget_type(self) -> &'static str {
        match self {
            StatKind::Balance => "stats-balance",
            StatKind::Income => "stats-income",
            StatKind::Expenses => "stats-expenses",
            StatKind::Savings => "stats-savings",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatKind::Balance => "Total balance",
            StatKind::Income => "Income this month",
            StatKind::Expenses => "Expenses this month",
            StatKind::Savings => "Savings",
        }
    }

    /// Sample (value, change vs last month in %)
    fn sample(self) -> (f64, f64) {
        match self {
            StatKind::Balance => (24_830.12, 2.4),
            StatKind::Income => (3_610.00, 11.4),
            StatKind::Expenses => (1_950.80, -3.2),
            StatKind::Savings => (20_519.90, 1.1),
        }
    }
}

/// Single headline figure with its change against last month
///
/// # Props
/// - `title` - tile title (default: the kind's label)
/// - `value` - amount in euros
/// - `delta` - change in percent
///
/// # Keyboard Shortcuts
/// - `v` - Hide/show the amount
#[derive(Debug)]
pub struct StatsWidget {
    title: String,
    value: f64,
    delta: f64,
    hidden: bool,
}

impl StatsWidget {
    pub fn from_props(kind: StatKind, props: &Props) -> Self {
        let (value, delta) = kind.sample();
        Self {
            title: prop_str(props, "title", kind.label()),
            value: prop_f64(props, "value", value),
            delta: prop_f64(props, "delta", delta),
            hidden: false,
        }
    }
}

impl Widget for StatsWidget {
    fn on_event(&mut self, event: Event) -> EventResult {
        use crossterm::event::KeyCode;

        if let Event::Key(key) = event
            && key.code == KeyCode::Char('v')
        {
            self.hidden = !self.hidden;
            return EventResult::Consumed;
        }

        EventResult::Ignored
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        self.render_focused(area, buf, false);
    }

    fn render_focused(&mut self, area: Rect, buf: &mut Buffer, focused: bool) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(focus_color(focused)));

        let amount = if self.hidden {
            "€ ••••••".to_string()
        } else {
            format_currency(self.value)
        };

        let lines = vec![
            Line::from(Span::styled(
                amount,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(
                    format_delta(self.delta),
                    Style::default().fg(trend_color(self.delta)),
                ),
                Span::raw(" vs last month"),
            ]),
        ];

        RatatuiWidget::render(Paragraph::new(lines).block(block), area, buf);
    }

    fn preferred_size(&self) -> Option<Size> {
        Some(Size {
            width: 24,
            height: 4,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_to_string;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use serde_json::json;

    #[test]
    fn test_renders_sample_figures() {
        let mut widget = StatsWidget::from_props(StatKind::Balance, &Props::new());
        let area = Rect::new(0, 0, 32, 4);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);

        let out = buffer_to_string(&buf);
        assert!(out.contains("Total balance"));
        assert!(out.contains("€ 24,830.12"));
        assert!(out.contains("+2.4% vs last month"));
    }

    #[test]
    fn test_props_override_sample() {
        let props = match json!({"title": "Joint account", "value": -12.5, "delta": -1.0}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        let mut widget = StatsWidget::from_props(StatKind::Income, &props);
        let area = Rect::new(0, 0, 32, 4);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);

        let out = buffer_to_string(&buf);
        assert!(out.contains("Joint account"));
        assert!(out.contains("-€ 12.50"));
    }

    #[test]
    fn test_hide_amount() {
        let mut widget = StatsWidget::from_props(StatKind::Savings, &Props::new());
        let key = KeyEvent::new(KeyCode::Char('v'), KeyModifiers::NONE);
        assert_eq!(widget.on_event(Event::Key(key)), EventResult::Consumed);

        let area = Rect::new(0, 0, 32, 4);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        assert!(!buffer_to_string(&buf).contains("20,519.90"));
    }
}
