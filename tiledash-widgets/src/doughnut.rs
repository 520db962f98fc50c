// tiledash-widgets/src/doughnut.rs
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    prelude::Widget as RatatuiWidget,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tiledash_core::{Props, Size, Widget};

use crate::common::{
    focus_color, format_currency, format_percentage, prop_series, prop_str, series_color, truncate,
};
use crate::sample;

/// Share of spending per category.
///
/// A terminal has no room for a ring, so the chart is drawn as one segmented
/// bar (the ring cut open) followed by a legend.
///
/// # Props
/// - `title` - chart title
/// - `slices` - `[[category, amount], ...]`
pub struct DoughnutChartWidget {
    title: String,
    slices: Vec<(String, f64)>,
}

impl DoughnutChartWidget {
    pub fn from_props(props: &Props) -> Self {
        Self {
            title: prop_str(props, "title", "Spending by category"),
            slices: prop_series(props, "slices")
                .unwrap_or_else(|| sample::owned_series(sample::SPENDING_BY_CATEGORY)),
        }
    }

    fn total(&self) -> f64 {
        self.slices.iter().map(|(_, v)| v.max(0.0)).sum()
    }

    /// Cells per slice for a bar `width` wide; the widths always add up to
    /// `width` when there is anything to show
    fn segment_widths(&self, width: u16) -> Vec<u16> {
        let total = self.total();
        if total <= 0.0 || width == 0 {
            return vec![0; self.slices.len()];
        }

        let mut widths: Vec<u16> = self
            .slices
            .iter()
            .map(|(_, v)| ((v.max(0.0) / total) * f64::from(width)).floor() as u16)
            .collect();

        // Hand out what flooring lost to the largest slices
        let mut remaining = width - widths.iter().sum::<u16>();
        let mut order: Vec<usize> = (0..self.slices.len()).collect();
        order.sort_by(|a, b| self.slices[*b].1.total_cmp(&self.slices[*a].1));
        for i in order.into_iter().cycle() {
            if remaining == 0 {
                break;
            }
            widths[i] += 1;
            remaining -= 1;
        }

        widths
    }
}

impl Widget for DoughnutChartWidget {
    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        self.render_focused(area, buf, false);
    }

    fn render_focused(&mut self, area: Rect, buf: &mut Buffer, focused: bool) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(focus_color(focused)));
        let inner = block.inner(area);

        let bar: Vec<Span> = self
            .segment_widths(inner.width)
            .into_iter()
            .enumerate()
            .map(|(i, w)| {
                Span::styled(
                    "█".repeat(usize::from(w)),
                    Style::default().fg(series_color(i)),
                )
            })
            .collect();

        let total = self.total();
        let label_width = usize::from(inner.width.saturating_sub(24)).max(4);
        let mut lines = vec![Line::from(bar), Line::default()];
        for (i, (name, value)) in self.slices.iter().enumerate() {
            let share = if total > 0.0 { value / total * 100.0 } else { 0.0 };
            lines.push(Line::from(vec![
                Span::styled("● ", Style::default().fg(series_color(i))),
                Span::raw(format!("{:<w$}", truncate(name, label_width), w = label_width)),
                Span::raw(format!(" {:>7} ", format_percentage(share))),
                Span::raw(format_currency(*value)),
            ]));
        }

        RatatuiWidget::render(Paragraph::new(lines).block(block), area, buf);
    }

    fn preferred_size(&self) -> Option<Size> {
        Some(Size {
            width: 40,
            height: (self.slices.len() as u16).saturating_add(4).max(12),
        })
    }
}
