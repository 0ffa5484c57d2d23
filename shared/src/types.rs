//! Common types used across the platform

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default trailing window for sales velocity, in days
pub const DEFAULT_SALES_WINDOW_DAYS: i64 = 30;

/// Errors raised when building a [`SalesWindow`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("Days parameter must be positive, got {0}")]
    NonPositive(i64),

    #[error("Days parameter is too large: {0}")]
    TooLarge(i64),
}

/// Trailing sales window of a positive number of days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct SalesWindow {
    days: i64,
}

impl SalesWindow {
    pub fn new(days: i64) -> Result<Self, WindowError> {
        if days <= 0 {
            return Err(WindowError::NonPositive(days));
        }
        // Reject lengths chrono cannot represent as a duration
        Duration::try_days(days).ok_or(WindowError::TooLarge(days))?;
        Ok(Self { days })
    }

    pub fn days(&self) -> i64 {
        self.days
    }

    /// Earliest sale timestamp that still falls inside the window ending at `now`
    pub fn cutoff(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, WindowError> {
        Duration::try_days(self.days)
            .and_then(|span| now.checked_sub_signed(span))
            .ok_or(WindowError::TooLarge(self.days))
    }

    pub fn contains(&self, sale_date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.cutoff(now).map_or(false, |cutoff| sale_date >= cutoff)
    }
}

impl Default for SalesWindow {
    fn default() -> Self {
        Self {
            days: DEFAULT_SALES_WINDOW_DAYS,
        }
    }
}

impl TryFrom<i64> for SalesWindow {
    type Error = WindowError;

    fn try_from(days: i64) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}

impl From<SalesWindow> for i64 {
    fn from(window: SalesWindow) -> Self {
        window.days
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_window_rejects_non_positive() {
        assert_eq!(SalesWindow::new(0), Err(WindowError::NonPositive(0)));
        assert_eq!(SalesWindow::new(-5), Err(WindowError::NonPositive(-5)));
    }

    #[test]
    fn test_window_rejects_unrepresentable() {
        assert_eq!(SalesWindow::new(i64::MAX), Err(WindowError::TooLarge(i64::MAX)));
    }

    #[test]
    fn test_default_window_is_thirty_days() {
        assert_eq!(SalesWindow::default().days(), 30);
    }

    #[test]
    fn test_cutoff_is_inclusive() {
        let now = Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap();
        let window = SalesWindow::new(30).unwrap();
        let cutoff = window.cutoff(now).unwrap();

        assert_eq!(cutoff, Utc.with_ymd_and_hms(2024, 5, 31, 12, 0, 0).unwrap());
        assert!(window.contains(cutoff, now));
        assert!(!window.contains(cutoff - Duration::seconds(1), now));
    }
}
