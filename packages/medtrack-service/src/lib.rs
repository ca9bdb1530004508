pub mod calendar;
pub mod dashboard;
pub mod logs;
pub mod medications;
pub mod profile;
pub mod time_serde;

mod error;

use std::{future::Future, pin::Pin, sync::Arc};

use time::{Date, OffsetDateTime, UtcOffset};
use uuid::Uuid;

pub use calendar::{CalendarDayRequest, CalendarDayResponse, CalendarMonthRequest, DayStatusItem};
pub use dashboard::{AdherenceRequest, DashboardStats, WeeklyAdherencePoint};
pub use error::{Error, Result};
pub use logs::{CreateLogRequest, LogItem, LogListRequest};
pub use medications::{DeleteMedicationResponse, MedicationItem, MedicationRequest};
pub use profile::{ProfileRequest, ProfileResponse};

use medtrack_config::Config;
use medtrack_domain::{DateWindow, LogEntry, LogStatus};
use medtrack_storage::{db::Db, models::LogRecord, queries};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Source of medication logs for adherence aggregation.
pub trait LogStore
where
	Self: Send + Sync,
{
	/// Logs whose `taken_at` falls on one of the window's days at `offset`.
	fn fetch_logs_between<'a>(
		&'a self,
		user_id: Uuid,
		window: DateWindow,
		offset: UtcOffset,
	) -> BoxFuture<'a, medtrack_storage::Result<Vec<LogEntry>>>;

	fn fetch_logs_on<'a>(
		&'a self,
		user_id: Uuid,
		date: Date,
		offset: UtcOffset,
	) -> BoxFuture<'a, medtrack_storage::Result<Vec<LogEntry>>> {
		self.fetch_logs_between(user_id, DateWindow::single(date), offset)
	}
}

pub trait MedicationCounter
where
	Self: Send + Sync,
{
	fn count_medications<'a>(
		&'a self,
		user_id: Uuid,
	) -> BoxFuture<'a, medtrack_storage::Result<i64>>;
}

#[derive(Clone)]
pub struct Stores {
	pub logs: Arc<dyn LogStore>,
	pub medications: Arc<dyn MedicationCounter>,
}
impl Stores {
	pub fn postgres(db: &Db) -> Self {
		let store = Arc::new(PgStore { db: db.clone() });

		Self { logs: store.clone(), medications: store }
	}
}

pub struct MedtrackService {
	pub cfg: Config,
	pub db: Db,
	pub stores: Stores,
	offset: UtcOffset,
}
impl MedtrackService {
	pub fn new(cfg: Config, db: Db) -> Result<Self> {
		let stores = Stores::postgres(&db);

		Self::with_stores(cfg, db, stores)
	}

	pub fn with_stores(cfg: Config, db: Db, stores: Stores) -> Result<Self> {
		let offset = reference_offset(&cfg)?;

		Ok(Self { cfg, db, stores, offset })
	}

	/// Offset that decides which calendar day a timestamp belongs to.
	pub fn offset(&self) -> UtcOffset {
		self.offset
	}

	pub fn today(&self) -> Date {
		OffsetDateTime::now_utc().to_offset(self.offset).date()
	}

	/// Timestamp bounds of `window` at the reference offset, or `InvalidRequest` at the calendar
	/// edges.
	pub(crate) fn window_bounds(
		&self,
		window: DateWindow,
	) -> Result<(OffsetDateTime, OffsetDateTime)> {
		window
			.bounds(self.offset)
			.ok_or_else(|| Error::invalid("date is outside the supported calendar range."))
	}

	pub(crate) async fn fetch_logs_on(&self, user_id: Uuid, date: Date) -> Result<Vec<LogEntry>> {
		self.window_bounds(DateWindow::single(date))?;

		self.stores.logs.fetch_logs_on(user_id, date, self.offset).await.map_err(Error::log_fetch)
	}

	pub(crate) async fn fetch_logs_between(
		&self,
		user_id: Uuid,
		window: DateWindow,
	) -> Result<Vec<LogEntry>> {
		self.window_bounds(window)?;

		self.stores
			.logs
			.fetch_logs_between(user_id, window, self.offset)
			.await
			.map_err(Error::log_fetch)
	}

	pub(crate) async fn require_profile(&self, user_id: Uuid) -> Result<()> {
		match queries::get_user(&self.db, user_id).await? {
			Some(_) => Ok(()),
			None => Err(Error::not_found("User profile not found.")),
		}
	}
}

struct PgStore {
	db: Db,
}

impl LogStore for PgStore {
	fn fetch_logs_between<'a>(
		&'a self,
		user_id: Uuid,
		window: DateWindow,
		offset: UtcOffset,
	) -> BoxFuture<'a, medtrack_storage::Result<Vec<LogEntry>>> {
		Box::pin(async move {
			let (from, to) = window.bounds(offset).ok_or_else(|| {
				medtrack_storage::Error::InvalidArgument(
					"Log window is outside the supported calendar range.".to_string(),
				)
			})?;
			let records = queries::fetch_log_records(&self.db, user_id, from, to).await?;

			records.into_iter().map(log_entry).collect()
		})
	}
}

impl MedicationCounter for PgStore {
	fn count_medications<'a>(
		&'a self,
		user_id: Uuid,
	) -> BoxFuture<'a, medtrack_storage::Result<i64>> {
		Box::pin(queries::count_medications(&self.db, user_id))
	}
}

pub(crate) fn parse_status(raw: &str) -> medtrack_storage::Result<LogStatus> {
	LogStatus::parse(raw).ok_or_else(|| {
		medtrack_storage::Error::InvalidArgument(format!("Unknown log status {raw:?} in storage."))
	})
}

fn log_entry(record: LogRecord) -> medtrack_storage::Result<LogEntry> {
	Ok(LogEntry {
		medication_id: record.medication_id,
		taken_at: record.taken_at,
		status: parse_status(&record.status)?,
	})
}

fn reference_offset(cfg: &Config) -> Result<UtcOffset> {
	let minutes = cfg.adherence.utc_offset_minutes;

	if minutes.unsigned_abs() > medtrack_config::MAX_UTC_OFFSET_MINUTES.unsigned_abs() {
		return Err(Error::invalid("adherence.utc_offset_minutes is out of range."));
	}

	UtcOffset::from_whole_seconds(minutes * 60)
		.map_err(|_| Error::invalid("adherence.utc_offset_minutes is out of range."))
}
