use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::{Error, MedtrackService, Result};
use medtrack_domain::{DateWindow, LogEntry, LogStatus};
use medtrack_storage::{
	models::{LogFilter, MedicationLog, MedicationLogDetail},
	queries,
};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LogListRequest {
	#[serde(default, with = "crate::time_serde::date::option")]
	pub date: Option<Date>,
	#[serde(default)]
	pub medication_id: Option<Uuid>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateLogRequest {
	pub medication_id: Uuid,
	#[serde(with = "crate::time_serde")]
	pub taken_at: OffsetDateTime,
	pub status: String,
	#[serde(default)]
	pub notes: Option<String>,
}

/// A log with its medication's details. Those are `None` once the medication was deleted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogItem {
	pub log_id: Uuid,
	pub medication_id: Uuid,
	pub medication_name: Option<String>,
	pub dosage: Option<String>,
	pub frequency: Option<String>,
	#[serde(with = "crate::time_serde")]
	pub taken_at: OffsetDateTime,
	pub status: LogStatus,
	pub notes: Option<String>,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
}
impl LogItem {
	pub fn entry(&self) -> LogEntry {
		LogEntry { medication_id: self.medication_id, taken_at: self.taken_at, status: self.status }
	}
}
impl TryFrom<MedicationLogDetail> for LogItem {
	type Error = medtrack_storage::Error;

	fn try_from(row: MedicationLogDetail) -> medtrack_storage::Result<Self> {
		Ok(Self {
			status: crate::parse_status(&row.status)?,
			log_id: row.log_id,
			medication_id: row.medication_id,
			medication_name: row.medication_name,
			dosage: row.dosage,
			frequency: row.frequency,
			taken_at: row.taken_at,
			notes: row.notes,
			created_at: row.created_at,
		})
	}
}

impl MedtrackService {
	/// Newest first. A `date` filter selects that calendar day at the reference offset.
	pub async fn list_logs(&self, user_id: Uuid, req: LogListRequest) -> Result<Vec<LogItem>> {
		let filter = self.log_filter(&req)?;

		Ok(self.fetch_log_items(user_id, &filter).await?)
	}

	pub async fn create_log(&self, user_id: Uuid, req: CreateLogRequest) -> Result<LogItem> {
		let status = LogStatus::parse(&req.status).ok_or_else(|| {
			Error::invalid("status must be one of taken, missed, or skipped.")
		})?;

		if queries::get_medication(&self.db, user_id, req.medication_id).await?.is_none() {
			return Err(Error::not_found("Medication not found."));
		}

		let log = MedicationLog {
			log_id: Uuid::new_v4(),
			medication_id: req.medication_id,
			user_id,
			taken_at: req.taken_at,
			status: status.as_str().to_string(),
			notes: req.notes.map(|text| text.trim().to_string()).filter(|text| !text.is_empty()),
			created_at: OffsetDateTime::now_utc(),
		};
		let saved = queries::insert_log(&self.db, &log).await?;

		tracing::info!(
			%user_id,
			medication_id = %log.medication_id,
			status = status.as_str(),
			"Medication log recorded."
		);

		Ok(saved.try_into()?)
	}

	pub(crate) fn log_filter(&self, req: &LogListRequest) -> Result<LogFilter> {
		let taken_between = match req.date {
			Some(date) => Some(self.window_bounds(DateWindow::single(date))?),
			None => None,
		};

		Ok(LogFilter { taken_between, medication_id: req.medication_id })
	}

	pub(crate) async fn fetch_log_items(
		&self,
		user_id: Uuid,
		filter: &LogFilter,
	) -> medtrack_storage::Result<Vec<LogItem>> {
		let rows = queries::list_logs(&self.db, user_id, filter).await?;

		rows.into_iter().map(LogItem::try_from).collect()
	}
}
