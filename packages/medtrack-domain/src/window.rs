use time::{Date, Duration, Month, OffsetDateTime, Time, UtcOffset};

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
	start: Date,
	end: Date,
}
impl DateWindow {
	pub fn single(date: Date) -> Self {
		Self { start: date, end: date }
	}

	/// The `days` calendar days ending at `today`, both ends included. Zero is treated as one.
	pub fn trailing(today: Date, days: u32) -> Self {
		let back = Duration::days(i64::from(days.max(1)) - 1);
		let start = today.checked_sub(back).unwrap_or(Date::MIN);

		Self { start, end: today }
	}

	pub fn month(year: i32, month: Month) -> Option<Self> {
		let start = Date::from_calendar_date(year, month, 1).ok()?;
		let next_month = match month {
			Month::December => Date::from_calendar_date(year.checked_add(1)?, Month::January, 1),
			_ => Date::from_calendar_date(year, month.next(), 1),
		};
		let end = next_month.ok()?.previous_day()?;

		Some(Self { start, end })
	}

	pub fn start(&self) -> Date {
		self.start
	}

	pub fn end(&self) -> Date {
		self.end
	}

	pub fn contains(&self, date: Date) -> bool {
		self.start <= date && date <= self.end
	}

	pub fn len_days(&self) -> u32 {
		let days = (self.end - self.start).whole_days() + 1;

		u32::try_from(days).unwrap_or(u32::MAX)
	}

	/// Dates in the window, oldest first.
	pub fn days(&self) -> impl DoubleEndedIterator<Item = Date> {
		let Self { start, end } = *self;

		(0..i64::from(self.len_days()))
			.filter_map(move |offset| start.checked_add(Duration::days(offset)))
			.filter(move |date| *date <= end)
	}

	/// Inclusive timestamp bounds covering every instant of the window's days at `offset`.
	///
	/// `None` when either bound has no UTC representation, which happens at the edges of the
	/// supported calendar.
	pub fn bounds(&self, offset: UtcOffset) -> Option<(OffsetDateTime, OffsetDateTime)> {
		let lower = self.start.midnight().assume_offset(offset).checked_to_offset(UtcOffset::UTC)?;
		let upper =
			self.end.with_time(Time::MAX).assume_offset(offset).checked_to_offset(UtcOffset::UTC)?;

		Some((lower, upper))
	}
}

#[cfg(test)]
mod tests {
	use time::macros::{date, datetime, offset};

	use super::*;

	#[test]
	fn trailing_includes_today() {
		let window = DateWindow::trailing(date!(2026 - 10 - 19), 7);

		assert_eq!(window.start(), date!(2026 - 10 - 13));
		assert_eq!(window.end(), date!(2026 - 10 - 19));
		assert_eq!(window.len_days(), 7);
	}

	#[test]
	fn trailing_zero_days_is_single_day() {
		let window = DateWindow::trailing(date!(2026 - 10 - 19), 0);

		assert_eq!(window, DateWindow::single(date!(2026 - 10 - 19)));
	}

	#[test]
	fn month_handles_leap_february_and_december() {
		let feb = DateWindow::month(2028, Month::February).expect("Valid month.");

		assert_eq!(feb.end(), date!(2028 - 02 - 29));
		assert_eq!(feb.days().count(), 29);

		let dec = DateWindow::month(2026, Month::December).expect("Valid month.");

		assert_eq!(dec.start(), date!(2026 - 12 - 01));
		assert_eq!(dec.end(), date!(2026 - 12 - 31));
	}

	#[test]
	fn bounds_follow_offset() {
		let window = DateWindow::single(date!(2026 - 10 - 19));
		let (lower, upper) = window.bounds(offset!(+2)).expect("Bounds should exist.");

		assert_eq!(lower, datetime!(2026 - 10 - 18 22:00 UTC));
		assert!(upper < datetime!(2026 - 10 - 19 22:00 UTC));
		assert!(upper > datetime!(2026 - 10 - 19 21:59:59 UTC));
	}

	#[test]
	fn bounds_past_the_calendar_edge_are_absent() {
		let first = DateWindow::month(-9999, Month::January).expect("Valid month.");
		let last = DateWindow::single(date!(9999 - 12 - 31));

		assert!(first.bounds(offset!(+2)).is_none());
		assert!(last.bounds(offset!(-2)).is_none());
		assert!(first.bounds(UtcOffset::UTC).is_some());
	}
}
