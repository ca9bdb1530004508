use serde::{Deserialize, Serialize};
use time::{Date, Month};
use uuid::Uuid;

use crate::{Error, LogItem, LogListRequest, MedtrackService, Result};
use medtrack_domain::{DateWindow, DayStatus, adherence};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CalendarDayRequest {
	#[serde(with = "crate::time_serde::date")]
	pub date: Date,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CalendarDayResponse {
	#[serde(with = "crate::time_serde::date")]
	pub date: Date,
	pub status: DayStatus,
	pub logs: Vec<LogItem>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CalendarMonthRequest {
	pub year: i32,
	pub month: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayStatusItem {
	#[serde(with = "crate::time_serde::date")]
	pub date: Date,
	pub status: DayStatus,
}

impl MedtrackService {
	/// One day's logs and the indicator derived from exactly those logs.
	pub async fn calendar_day(
		&self,
		user_id: Uuid,
		req: CalendarDayRequest,
	) -> Result<CalendarDayResponse> {
		let filter = self.log_filter(&LogListRequest { date: Some(req.date), medication_id: None })?;
		let logs = self.fetch_log_items(user_id, &filter).await.map_err(Error::log_fetch)?;
		let entries = logs.iter().map(LogItem::entry).collect::<Vec<_>>();

		Ok(CalendarDayResponse { date: req.date, status: adherence::day_status(&entries), logs })
	}

	/// A status for every day of the month, from a single log fetch.
	pub async fn calendar_month(
		&self,
		user_id: Uuid,
		req: CalendarMonthRequest,
	) -> Result<Vec<DayStatusItem>> {
		let month = Month::try_from(req.month)
			.map_err(|_| Error::invalid("month must be between 1 and 12."))?;
		let window = DateWindow::month(req.year, month)
			.ok_or_else(|| Error::invalid("year is out of range."))?;
		let logs = self.fetch_logs_between(user_id, window).await?;

		Ok(adherence::window_statuses(&logs, window, self.offset())
			.into_iter()
			.map(|entry| DayStatusItem { date: entry.date, status: entry.status })
			.collect())
	}
}
