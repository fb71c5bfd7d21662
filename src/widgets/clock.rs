// Clock widget.
// HH:MM:SS with a persisted 12/24-hour toggle, plus a long-form date line.

use chrono::{DateTime, Datelike, Local, Timelike};

use crate::store::Store;

#[derive(Debug)]
pub struct ClockWidget {
    pub use_24h: bool,
}

impl ClockWidget {
    pub fn load(store: &Store) -> Self {
        Self {
            use_24h: store.get("clock24h", true),
        }
    }

    pub fn toggle_format(&mut self, store: &Store) {
        self.use_24h = !self.use_24h;
        store.set("clock24h", &self.use_24h);
    }

    pub fn time_line(&self, now: DateTime<Local>) -> String {
        format_time(now, self.use_24h)
    }

    pub fn date_line(&self, now: DateTime<Local>) -> String {
        format_date(now)
    }
}

pub fn format_time(now: DateTime<Local>, use_24h: bool) -> String {
    let (hour, minute, second) = (now.hour(), now.minute(), now.second());
    if use_24h {
        format!("{:02}:{:02}:{:02}", hour, minute, second)
    } else {
        let suffix = if hour >= 12 { " PM" } else { " AM" };
        let display_hour = match hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{:02}:{:02}:{:02}{}", display_hour, minute, second, suffix)
    }
}

pub fn format_date(now: DateTime<Local>) -> String {
    format!(
        "{}, {} {}",
        now.format("%A"),
        now.format("%B"),
        now.day()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32, second: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2026, 8, 24, hour, minute, second)
            .unwrap()
    }

    #[test]
    fn test_24h_format() {
        assert_eq!(format_time(at(0, 5, 9), true), "00:05:09");
        assert_eq!(format_time(at(23, 59, 59), true), "23:59:59");
    }

    #[test]
    fn test_12h_midnight_and_noon() {
        assert_eq!(format_time(at(0, 0, 0), false), "12:00:00 AM");
        assert_eq!(format_time(at(12, 0, 0), false), "12:00:00 PM");
    }

    #[test]
    fn test_12h_afternoon() {
        assert_eq!(format_time(at(15, 4, 5), false), "03:04:05 PM");
    }

    #[test]
    fn test_date_line() {
        assert_eq!(format_date(at(10, 0, 0)), "Monday, August 24");
    }

    #[test]
    fn test_toggle_persists() {
        let store = Store::in_memory();
        let mut clock = ClockWidget::load(&store);
        assert!(clock.use_24h);
        clock.toggle_format(&store);
        assert!(!ClockWidget::load(&store).use_24h);
    }
}
