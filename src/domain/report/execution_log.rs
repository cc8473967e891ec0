//! 28-day execution log kept after the report is generated.
//!
//! Each evening the user records whether the if-then plan was carried out.
//! Days are addressed 1-based; a slot stays unset until the user touches it.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};

/// Number of days tracked by the log.
pub const EXECUTION_DAYS: usize = 28;

/// One day of the log as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    pub day: usize,
    pub done: Option<bool>,
}

/// Adherence record for the four weeks following the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionLog {
    starts_on: Timestamp,
    days: [Option<bool>; EXECUTION_DAYS],
}

impl ExecutionLog {
    /// Creates a log with every slot unset.
    pub fn new(starts_on: Timestamp) -> Self {
        Self {
            starts_on,
            days: [None; EXECUTION_DAYS],
        }
    }

    pub fn starts_on(&self) -> Timestamp {
        self.starts_on
    }

    /// Returns the slot for a day.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` unless `1 <= day <= 28`
    pub fn get(&self, day: usize) -> Result<Option<bool>, ValidationError> {
        Ok(self.days[Self::index(day)?])
    }

    /// Sets a day to done or missed.
    pub fn mark(&mut self, day: usize, done: bool) -> Result<(), ValidationError> {
        self.days[Self::index(day)?] = Some(done);
        Ok(())
    }

    /// Flips a day and returns the new value.
    ///
    /// Unset and missed days become done; done days become missed.
    pub fn toggle(&mut self, day: usize) -> Result<bool, ValidationError> {
        let slot = &mut self.days[Self::index(day)?];
        let done = !matches!(slot, Some(true));
        *slot = Some(done);
        Ok(done)
    }

    /// Returns a day to the unset state.
    pub fn clear(&mut self, day: usize) -> Result<(), ValidationError> {
        self.days[Self::index(day)?] = None;
        Ok(())
    }

    /// Number of days marked done.
    pub fn completed_days(&self) -> usize {
        self.days.iter().filter(|d| **d == Some(true)).count()
    }

    /// Number of days with any entry.
    pub fn recorded_days(&self) -> usize {
        self.days.iter().filter(|d| d.is_some()).count()
    }

    /// Share of recorded days that were done, rounded down.
    ///
    /// Zero while nothing has been recorded.
    pub fn adherence_percent(&self) -> u8 {
        match self.recorded_days() {
            0 => 0,
            recorded => (self.completed_days() * 100 / recorded) as u8,
        }
    }

    /// Day number that `at` falls on, if it lies inside the log.
    pub fn day_for(&self, at: &Timestamp) -> Option<usize> {
        let elapsed = at.days_since(&self.starts_on);
        if (0..EXECUTION_DAYS as i64).contains(&elapsed) {
            Some(elapsed as usize + 1)
        } else {
            None
        }
    }

    /// All days in order.
    pub fn entries(&self) -> impl Iterator<Item = DayEntry> + '_ {
        self.days
            .iter()
            .enumerate()
            .map(|(i, done)| DayEntry { day: i + 1, done: *done })
    }

    fn index(day: usize) -> Result<usize, ValidationError> {
        if (1..=EXECUTION_DAYS).contains(&day) {
            Ok(day - 1)
        } else {
            Err(ValidationError::out_of_range(
                "day",
                1,
                EXECUTION_DAYS as i64,
                day as i64,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log() -> ExecutionLog {
        ExecutionLog::new(Timestamp::now())
    }

    #[test]
    fn starts_with_all_slots_unset() {
        let log = log();
        assert_eq!(log.entries().count(), EXECUTION_DAYS);
        assert!(log.entries().all(|entry| entry.done.is_none()));
        assert_eq!(log.recorded_days(), 0);
        assert_eq!(log.adherence_percent(), 0);
    }

    #[test]
    fn mark_sets_single_day() {
        let mut log = log();
        log.mark(3, true).unwrap();

        assert_eq!(log.get(3), Ok(Some(true)));
        assert_eq!(log.get(2), Ok(None));
        assert_eq!(log.get(4), Ok(None));
    }

    #[test]
    fn toggle_cycles_between_done_and_missed() {
        let mut log = log();
        assert_eq!(log.toggle(1), Ok(true));
        assert_eq!(log.toggle(1), Ok(false));
        assert_eq!(log.toggle(1), Ok(true));
    }

    #[test]
    fn clear_resets_day() {
        let mut log = log();
        log.mark(28, false).unwrap();
        log.clear(28).unwrap();
        assert_eq!(log.get(28), Ok(None));
    }

    #[test]
    fn out_of_range_days_are_rejected() {
        let mut log = log();
        assert!(log.mark(0, true).is_err());
        assert!(log.toggle(29).is_err());
        assert_eq!(
            log.get(29),
            Err(ValidationError::out_of_range("day", 1, 28, 29))
        );
    }

    #[test]
    fn adherence_counts_only_recorded_days() {
        let mut log = log();
        log.mark(1, true).unwrap();
        log.mark(2, true).unwrap();
        log.mark(3, false).unwrap();

        assert_eq!(log.completed_days(), 2);
        assert_eq!(log.recorded_days(), 3);
        assert_eq!(log.adherence_percent(), 66);
    }

    #[test]
    fn day_for_maps_dates_into_window() {
        let start = Timestamp::now();
        let log = ExecutionLog::new(start);

        assert_eq!(log.day_for(&start), Some(1));
        assert_eq!(log.day_for(&start.plus_days(27)), Some(28));
        assert_eq!(log.day_for(&start.plus_days(28)), None);
        assert_eq!(log.day_for(&start.plus_days(-1)), None);
    }
}
