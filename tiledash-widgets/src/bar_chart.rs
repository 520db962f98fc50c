// tiledash-widgets/src/bar_chart.rs
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    prelude::Widget as RatatuiWidget,
    style::{Color, Style},
    widgets::{BarChart, Block, Borders},
};
use tiledash_core::{Props, Size, Widget};

use crate::common::{focus_color, prop_series, prop_str, series_color};
use crate::sample;

/// Monthly net cash flow
///
/// # Props
/// - `title` - chart title
/// - `bars` - `[[label, amount], ...]`; negative amounts are drawn by magnitude
pub struct BarChartWidget {
    title: String,
    bars: Vec<(String, f64)>,
}

impl BarChartWidget {
    pub fn from_props(props: &Props) -> Self {
        Self {
            title: prop_str(props, "title", "Monthly cash flow"),
            bars: prop_series(props, "bars")
                .unwrap_or_else(|| sample::owned_series(sample::MONTHLY_CASHFLOW)),
        }
    }

    /// Bar width that spreads the bars over the available width
    fn bar_width(&self, inner_width: u16) -> u16 {
        let count = self.bars.len().max(1) as u16;
        (inner_width / count).saturating_sub(1).clamp(1, 9)
    }
}

impl Widget for BarChartWidget {
    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        self.render_focused(area, buf, false);
    }

    fn render_focused(&mut self, area: Rect, buf: &mut Buffer, focused: bool) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(focus_color(focused)));
        let bar_width = self.bar_width(block.inner(area).width);

        let data: Vec<(&str, u64)> = self
            .bars
            .iter()
            .map(|(label, value)| (label.as_str(), value.abs().round() as u64))
            .collect();

        let chart = BarChart::default()
            .block(block)
            .data(data.as_slice())
            .bar_width(bar_width)
            .bar_gap(1)
            .bar_style(Style::default().fg(series_color(1)))
            .value_style(Style::default().fg(Color::Black).bg(series_color(1)));

        RatatuiWidget::render(chart, area, buf);
    }

    fn preferred_size(&self) -> Option<Size> {
        Some(Size {
            width: 60,
            height: 10,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_to_string;

    #[test]
    fn test_bar_width_bounds() {
        let widget = BarChartWidget::from_props(&Props::new());
        assert_eq!(widget.bar_width(0), 1);
        assert_eq!(widget.bar_width(36), 5);
        assert_eq!(widget.bar_width(500), 9);
    }

    #[test]
    fn test_renders_labels() {
        let mut widget = BarChartWidget::from_props(&Props::new());
        let area = Rect::new(0, 0, 60, 10);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);

        let out = buffer_to_string(&buf);
        assert!(out.contains("Monthly cash flow"));
        assert!(out.contains("Apr"));
        assert!(out.contains("Sep"));
    }
}
