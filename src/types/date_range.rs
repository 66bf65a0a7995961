use crate::config::ConfigError;
use chrono::NaiveDate;

/// Inclusive range of days to total rainfall over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvertedDateRange`] when `end` is before `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ConfigError> {
        if end < start {
            return Err(ConfigError::InvertedDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Format the providers expect for both ends of the range.
    pub(crate) fn format_day(date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_end_before_start() {
        let start = NaiveDate::from_ymd_opt(2022, 7, 31).unwrap();
        let end = NaiveDate::from_ymd_opt(2022, 7, 1).unwrap();
        assert!(matches!(
            DateRange::new(start, end),
            Err(ConfigError::InvertedDateRange { .. })
        ));
    }

    #[test]
    fn single_day_is_valid() {
        let day = NaiveDate::from_ymd_opt(2022, 7, 1).unwrap();
        let range = DateRange::new(day, day).unwrap();
        assert_eq!(DateRange::format_day(range.start), "2022-07-01");
    }
}
