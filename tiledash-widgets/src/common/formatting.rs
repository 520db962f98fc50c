// tiledash-widgets/src/common/formatting.rs

/// Format an amount in euros with thousands separators and two decimals
///
/// # Example
/// ```rust
/// use tiledash_widgets::format_currency;
///
/// assert_eq!(format_currency(24830.12), "€ 24,830.12");
/// assert_eq!(format_currency(-75.5), "-€ 75.50");
/// ```
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}€ {}.{:02}", sign, format_number(cents / 100), cents % 100)
}

/// Format a signed percentage change with an explicit sign
///
/// # Example
/// ```rust
/// use tiledash_widgets::format_delta;
///
/// assert_eq!(format_delta(2.4), "+2.4%");
/// assert_eq!(format_delta(-0.34), "-0.3%");
/// ```
pub fn format_delta(value: f64) -> String {
    if value > 0.0 {
        format!("+{:.1}%", value)
    } else {
        format!("{:.1}%", value)
    }
}

/// Format percentage with 1 decimal place
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Format large numbers with separators
///
/// # Example
/// ```rust
/// use tiledash_widgets::format_number;
///
/// assert_eq!(format_number(1234567), "1,234,567");
/// assert_eq!(format_number(123), "123");
/// ```
pub fn format_number(value: u64) -> String {
    let mut result = String::new();
    let s = value.to_string();
    let chars: Vec<char> = s.chars().collect();

    for (i, ch) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*ch);
    }

    result
}

/// Shorten `text` to at most `width` characters, marking the cut with `…`
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}
