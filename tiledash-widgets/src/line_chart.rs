// tiledash-widgets/src/line_chart.rs
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    prelude::Widget as RatatuiWidget,
    style::Style,
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
};
use tiledash_core::{Props, Size, Widget};

use crate::common::{focus_color, format_currency, prop_series, prop_str, series_color};
use crate::sample;

/// Account balance over time
///
/// # Props
/// - `title` - chart title
/// - `points` - `[[label, amount], ...]` in chronological order
pub struct LineChartWidget {
    title: String,
    points: Vec<(String, f64)>,
}

impl LineChartWidget {
    pub fn from_props(props: &Props) -> Self {
        Self {
            title: prop_str(props, "title", "Balance history"),
            points: prop_series(props, "points")
                .unwrap_or_else(|| sample::owned_series(sample::BALANCE_HISTORY)),
        }
    }

    /// Min and max of the series, padded so the line never touches the frame
    fn y_bounds(&self) -> [f64; 2] {
        let (min, max) = self
            .points
            .iter()
            .fold((f64::MAX, f64::MIN), |(lo, hi), (_, v)| (lo.min(*v), hi.max(*v)));

        if self.points.is_empty() {
            return [0.0, 1.0];
        }

        let pad = ((max - min) * 0.1).max(1.0);
        [min - pad, max + pad]
    }
}

impl Widget for LineChartWidget {
    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        self.render_focused(area, buf, false);
    }

    fn render_focused(&mut self, area: Rect, buf: &mut Buffer, focused: bool) {
        let data: Vec<(f64, f64)> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, (_, v))| (i as f64, *v))
            .collect();

        let [y_min, y_max] = self.y_bounds();
        let x_max = (data.len().saturating_sub(1)).max(1) as f64;

        let x_labels: Vec<String> = match (self.points.first(), self.points.last()) {
            (Some((first, _)), Some((last, _))) => vec![first.clone(), last.clone()],
            _ => Vec::new(),
        };

        let dataset = Dataset::default()
            .name("Balance")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(series_color(0)))
            .data(&data);

        let chart = Chart::new(vec![dataset])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", self.title))
                    .border_style(Style::default().fg(focus_color(focused))),
            )
            .x_axis(Axis::default().bounds([0.0, x_max]).labels(x_labels))
            .y_axis(
                Axis::default()
                    .bounds([y_min, y_max])
                    .labels(vec![format_currency(y_min), format_currency(y_max)]),
            );

        RatatuiWidget::render(chart, area, buf);
    }

    fn preferred_size(&self) -> Option<Size> {
        Some(Size {
            width: 60,
            height: 12,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_to_string;

    #[test]
    fn test_renders_title_and_range() {
        let mut widget = LineChartWidget::from_props(&Props::new());
        let area = Rect::new(0, 0, 70, 12);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);

        let out = buffer_to_string(&buf);
        assert!(out.contains("Balance history"));
        assert!(out.contains("Jan"));
        assert!(out.contains("Sep"));
    }

    #[test]
    fn test_bounds_are_padded() {
        let widget = LineChartWidget::from_props(&Props::new());
        let [lo, hi] = widget.y_bounds();
        assert!(lo < 18_240.0);
        assert!(hi > 24_830.1);
    }

    #[test]
    fn test_empty_series_renders() {
        let mut props = Props::new();
        props.insert("points".into(), serde_json::json!([]));
        let mut widget = LineChartWidget::from_props(&props);
        assert_eq!(widget.y_bounds(), [0.0, 1.0]);

        let area = Rect::new(0, 0, 30, 8);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
    }
}
