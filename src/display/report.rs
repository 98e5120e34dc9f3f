//! Formatting helpers for terminal output

/// Format an amount with two decimals
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Format a share of a total, with more decimals for small magnitudes
pub fn format_percentage(pct: f64) -> String {
    let magnitude = pct.abs();
    if magnitude > 0.0 && magnitude < 0.1 {
        format!("{:.2}%", pct)
    } else if magnitude < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Bar proportional to `value` against the largest magnitude in the column
///
/// Negative values, such as refunds in paid totals, use a distinct fill so they
/// stay visible next to positive ones.
pub fn format_bar(value: f64, scale: f64, width: usize) -> String {
    if scale <= 0.0 || value == 0.0 || !value.is_finite() {
        return " ".repeat(width);
    }

    let filled = ((value.abs() / scale) * width as f64).round() as usize;
    let filled = filled.min(width);
    let fill = if value < 0.0 { "▒" } else { "█" };

    format!("{}{}", fill.repeat(filled), " ".repeat(width - filled))
}

/// Label shown for a category, substituting the empty one
pub fn category_label<'a>(category: &'a str, uncategorized_label: &'a str) -> &'a str {
    if category.is_empty() {
        uncategorized_label
    } else {
        category
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(25.0), "25.00");
        assert_eq!(format_amount(1.0 / 3.0), "0.33");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.0), "0.0%");
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(-0.05), "-0.05%");
        assert_eq!(format_percentage(62.5), "62%");
        assert_eq!(format_percentage(-12.0), "-12%");
    }

    #[test]
    fn test_format_bar_scales_to_largest_magnitude() {
        assert_eq!(format_bar(25.0, 25.0, 4), "████");
        assert_eq!(format_bar(10.0, 40.0, 8), "██      ");
        assert_eq!(format_bar(0.0, 40.0, 4), "    ");
        assert_eq!(format_bar(5.0, 0.0, 4), "    ");
    }

    #[test]
    fn test_format_bar_negative_values() {
        assert_eq!(format_bar(-20.0, 40.0, 4), "▒▒  ");
        assert_eq!(format_bar(-40.0, 40.0, 4), "▒▒▒▒");
    }

    #[test]
    fn test_category_label() {
        assert_eq!(category_label("", "Uncategorized"), "Uncategorized");
        assert_eq!(category_label("Food", "Uncategorized"), "Food");
    }
}
