// Calendar widget.
// Renders the current month as a Sunday-first grid with today marked.

use chrono::{Datelike, NaiveDate};

/// Render a month grid. `today` is bracketed; every other day gets a
/// two-character cell so weeks stay aligned.
pub fn month_grid(today: NaiveDate) -> String {
    let first = today.with_day(1).unwrap_or(today);
    let days_in_month = days_in_month(today.year(), today.month());
    let leading = first.weekday().num_days_from_sunday() as usize;

    let mut lines = vec!["Su Mo Tu We Th Fr Sa".to_string()];
    let mut week = vec!["  ".to_string(); leading];
    for day in 1..=days_in_month {
        if day == today.day() {
            week.push(format!("[{}]", day));
        } else {
            week.push(format!("{:>2}", day));
        }
        if week.len() == 7 {
            lines.push(week.join(" "));
            week.clear();
        }
    }
    if !week.is_empty() {
        lines.push(week.join(" "));
    }
    lines.join("\n")
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(30)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2026, 8), 31);
        assert_eq!(days_in_month(2026, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2026, 12), 31);
    }

    #[test]
    fn test_grid_shape_august_2026() {
        // August 1st 2026 is a Saturday: six leading blanks, six week rows.
        let grid = month_grid(NaiveDate::from_ymd_opt(2026, 8, 24).unwrap());
        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(lines[0], "Su Mo Tu We Th Fr Sa");
        assert_eq!(lines.len(), 7);
        assert!(lines[1].ends_with(" 1"));
    }

    #[test]
    fn test_today_is_marked() {
        let grid = month_grid(NaiveDate::from_ymd_opt(2026, 8, 24).unwrap());
        assert!(grid.contains("[24]"));
        assert!(!grid.contains("[23]"));
    }

    #[test]
    fn test_month_starting_sunday_has_no_leading_blanks() {
        // March 1st 2026 is a Sunday.
        let grid = month_grid(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        let second_line = grid.lines().nth(1).unwrap();
        assert!(second_line.starts_with("[1]"));
    }
}
