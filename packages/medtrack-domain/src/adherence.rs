//! Adherence aggregation over medication log histories.
//!
//! Every function here is a pure computation over an already-fetched snapshot of logs. Empty input
//! is never an error: it yields a zero percentage, a zero streak, an empty series or
//! [`DayStatus::None`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::{Date, UtcOffset};

use crate::{LogEntry, LogStatus, window::DateWindow};

/// Doses recorded on one calendar day. `taken <= total_due` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBucket {
	pub date: Date,
	pub total_due: u32,
	pub taken: u32,
}
impl DayBucket {
	pub fn empty(date: Date) -> Self {
		Self { date, total_due: 0, taken: 0 }
	}

	pub fn record(&mut self, status: LogStatus) {
		self.total_due = self.total_due.saturating_add(1);

		if status == LogStatus::Taken {
			self.taken = self.taken.saturating_add(1);
		}
	}

	pub fn adherence_percent(&self) -> u8 {
		adherence_percent(self.taken, self.total_due)
	}

	/// At least one dose was due and every due dose was taken.
	pub fn is_fully_adherent(&self) -> bool {
		self.total_due > 0 && self.taken == self.total_due
	}

	pub fn status(&self) -> DayStatus {
		DayStatus::from_counts(self.taken, self.total_due)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdherencePoint {
	pub date: Date,
	pub adherence_percent: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
	None,
	Complete,
	Partial,
	Missed,
}
impl DayStatus {
	pub fn from_counts(taken: u32, total: u32) -> Self {
		if total == 0 {
			Self::None
		} else if taken >= total {
			Self::Complete
		} else if taken > 0 {
			Self::Partial
		} else {
			Self::Missed
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayStatusEntry {
	pub date: Date,
	pub status: DayStatus,
}

/// `round(100 * taken / total_due)` with halves rounded up, or 0 when nothing was due.
pub fn adherence_percent(taken: u32, total_due: u32) -> u8 {
	if total_due == 0 {
		return 0;
	}

	let taken = u64::from(taken.min(total_due));
	let total = u64::from(total_due);
	let percent = (200 * taken + total) / (2 * total);

	u8::try_from(percent).unwrap_or(100)
}

/// Groups logs into one bucket per calendar date at `offset`. Dates without logs are absent.
pub fn bucket_by_day<'a, I>(logs: I, offset: UtcOffset) -> BTreeMap<Date, DayBucket>
where
	I: IntoIterator<Item = &'a LogEntry>,
{
	let mut buckets = BTreeMap::new();

	for log in logs {
		let date = log.local_date(offset);

		buckets.entry(date).or_insert_with(|| DayBucket::empty(date)).record(log.status);
	}

	buckets
}

/// Adherence for a set of logs already restricted to a single day.
pub fn today_adherence(logs: &[LogEntry]) -> u8 {
	let (taken, total) = counts(logs);

	adherence_percent(taken, total)
}

/// Consecutive fully adherent days, scanning backward from the window's last day.
///
/// A day with no logs ends the streak, so an empty last day yields 0. Logs outside `window` are
/// ignored.
pub fn current_streak(logs: &[LogEntry], window: DateWindow, offset: UtcOffset) -> u32 {
	let buckets =
		bucket_by_day(logs.iter().filter(|log| window.contains(log.local_date(offset))), offset);
	let mut streak = 0;

	for date in window.days().rev() {
		match buckets.get(&date) {
			Some(bucket) if bucket.is_fully_adherent() => streak += 1,
			_ => break,
		}
	}

	streak
}

/// One point per date inside `window` that has at least one log, oldest first.
pub fn weekly_series(
	logs: &[LogEntry],
	window: DateWindow,
	offset: UtcOffset,
) -> Vec<AdherencePoint> {
	bucket_by_day(logs.iter().filter(|log| window.contains(log.local_date(offset))), offset)
		.into_values()
		.map(|bucket| AdherencePoint {
			date: bucket.date,
			adherence_percent: bucket.adherence_percent(),
		})
		.collect()
}

/// Calendar indicator for a set of logs already restricted to a single day.
pub fn day_status(logs: &[LogEntry]) -> DayStatus {
	let (taken, total) = counts(logs);

	DayStatus::from_counts(taken, total)
}

/// A status for every day of `window`, oldest first. Days without logs are [`DayStatus::None`].
pub fn window_statuses(
	logs: &[LogEntry],
	window: DateWindow,
	offset: UtcOffset,
) -> Vec<DayStatusEntry> {
	let buckets = bucket_by_day(logs, offset);

	window
		.days()
		.map(|date| DayStatusEntry {
			date,
			status: buckets.get(&date).map(DayBucket::status).unwrap_or(DayStatus::None),
		})
		.collect()
}

fn counts(logs: &[LogEntry]) -> (u32, u32) {
	let total = u32::try_from(logs.len()).unwrap_or(u32::MAX);
	let taken =
		u32::try_from(logs.iter().filter(|log| log.is_taken()).count()).unwrap_or(u32::MAX);

	(taken, total)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn percent_rounds_half_up() {
		assert_eq!(adherence_percent(1, 8), 13);
		assert_eq!(adherence_percent(1, 3), 33);
		assert_eq!(adherence_percent(2, 3), 67);
		assert_eq!(adherence_percent(1, 200), 1);
		assert_eq!(adherence_percent(1, 201), 0);
	}

	#[test]
	fn percent_is_zero_without_doses_and_capped_at_full() {
		assert_eq!(adherence_percent(0, 0), 0);
		assert_eq!(adherence_percent(5, 0), 0);
		assert_eq!(adherence_percent(9, 4), 100);
		assert_eq!(adherence_percent(u32::MAX, u32::MAX), 100);
	}

	#[test]
	fn percent_stays_in_range_for_all_small_pairs() {
		for total in 0..=50 {
			for taken in 0..=total {
				let percent = adherence_percent(taken, total);

				assert!(percent <= 100, "{taken}/{total} produced {percent}");
			}
		}
	}
}
