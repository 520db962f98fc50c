// tiledash-widgets/src/common/colors.rs
use ratatui::style::Color;

/// Get color for focus state
///
/// # Arguments
/// * `focused` - Whether the widget is currently focused
///
/// # Returns
/// Yellow if focused, DarkGray if not focused
pub fn focus_color(focused: bool) -> Color {
    if focused {
        Color::Yellow
    } else {
        Color::DarkGray
    }
}

/// Color for a signed change: green for gains, red for losses, gray for flat
///
/// # Example
/// ```rust
/// use ratatui::style::Color;
/// use tiledash_widgets::trend_color;
///
/// assert_eq!(trend_color(2.4), Color::Green);
/// assert_eq!(trend_color(-0.3), Color::Red);
/// ```
pub fn trend_color(delta: f64) -> Color {
    if delta > 0.0 {
        Color::Green
    } else if delta < 0.0 {
        Color::Red
    } else {
        Color::Gray
    }
}

/// Colors assigned to chart series and slices, in order
pub const SERIES_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Magenta,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::LightRed,
];

/// Series color for position `index`, cycling through [`SERIES_COLORS`]
pub fn series_color(index: usize) -> Color {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_color() {
        assert_eq!(focus_color(true), Color::Yellow);
        assert_eq!(focus_color(false), Color::DarkGray);
    }

    #[test]
    fn test_trend_color() {
        assert_eq!(trend_color(0.1), Color::Green);
        assert_eq!(trend_color(0.0), Color::Gray);
        assert_eq!(trend_color(-12.0), Color::Red);
    }

    #[test]
    fn test_series_color_cycles() {
        assert_eq!(series_color(0), Color::Cyan);
        assert_eq!(series_color(6), Color::Cyan);
        assert_eq!(series_color(7), Color::Magenta);
    }
}
