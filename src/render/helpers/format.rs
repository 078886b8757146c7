//! Number and date formatting for printed documents

use chrono::NaiveDate;

use crate::model::MINOR_PER_UNIT;

/// Group digits in threes with a space: 1785000 -> "1 785 000"
pub fn group_digits(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    grouped
}

/// A thousands amount shown in minor units: 3.5 -> "3 500"
pub fn format_money(units: f64) -> String {
    group_digits((units * MINOR_PER_UNIT).round() as i64)
}

/// A reading, usage or thousands amount as a plain number.
///
/// Whole values print without a fraction; others keep up to three decimals.
pub fn format_number(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        let text = format!("{:.3}", rounded);
        text.trim_end_matches('0').to_string()
    }
}

/// dd/mm/yyyy
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// dd/mm
pub fn format_day_month(date: NaiveDate) -> String {
    date.format("%d/%m").to_string()
}

/// mm/yyyy
pub fn format_month_year(date: NaiveDate) -> String {
    date.format("%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(999), "999");
        assert_eq!(group_digits(1000), "1 000");
        assert_eq!(group_digits(1_785_000), "1 785 000");
        assert_eq!(group_digits(-45_500), "-45 500");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(3.5), "3 500");
        assert_eq!(format_money(13.05), "13 050");
        assert_eq!(format_money(1500.0), "1 500 000");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(45.0), "45");
        assert_eq!(format_number(13.05), "13.05");
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(-2.0), "-2");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(format_date(date), "10/03/2024");
        assert_eq!(format_day_month(date), "10/03");
        assert_eq!(format_month_year(date), "03/2024");
    }
}
