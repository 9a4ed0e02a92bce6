pub fn format_iso8601_date(iso_date: &str) -> String {
    if let Ok(datetime) = iso_date.parse::<chrono::DateTime<chrono::Utc>>() {
        datetime.format("%Y-%m-%d").to_string()
    } else {
        iso_date.to_string()
    }
}

/// Abbreviates counts the way the result cards expect (8.4K, 1.2M).
pub fn format_count(number: i64) -> String {
    let scaled = |value: f64, suffix: &str| {
        let formatted = format!("{value:.1}");
        let trimmed = formatted.strip_suffix(".0").unwrap_or(&formatted);
        format!("{trimmed}{suffix}")
    };

    if number >= 1_000_000_000 {
        scaled(number as f64 / 1e9, "B")
    } else if number >= 1_000_000 {
        scaled(number as f64 / 1e6, "M")
    } else if number >= 1_000 {
        scaled(number as f64 / 1e3, "K")
    } else {
        number.to_string()
    }
}

// Formats each x1000 step
pub fn format_number(number: i64) -> String {
    let num_str = number.to_string();
    let mut result = String::new();
    let len = num_str.len();

    for (i, c) in num_str.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

pub fn format_hours(hours: f64) -> String {
    if hours < 48.0 {
        format!("{hours:.1} h")
    } else {
        format!("{:.1} d", hours / 24.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_abbreviate_per_magnitude() {
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1K");
        assert_eq!(format_count(8_400), "8.4K");
        assert_eq!(format_count(1_230_000), "1.2M");
        assert_eq!(format_count(2_000_000_000), "2B");
    }

    #[test]
    fn long_ages_switch_to_days() {
        assert_eq!(format_hours(3.25), "3.2 h");
        assert_eq!(format_hours(72.0), "3.0 d");
    }

    #[test]
    fn numbers_group_thousands() {
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number(42), "42");
    }
}
