use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
	pub user_id: Uuid,
	pub email: String,
	pub name: String,
	pub role: String,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Medication {
	pub medication_id: Uuid,
	pub user_id: Uuid,
	pub name: String,
	pub dosage: String,
	pub frequency: String,
	pub instructions: Option<String>,
	pub start_date: Date,
	pub end_date: Option<Date>,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MedicationLog {
	pub log_id: Uuid,
	pub medication_id: Uuid,
	pub user_id: Uuid,
	pub taken_at: OffsetDateTime,
	pub status: String,
	pub notes: Option<String>,
	pub created_at: OffsetDateTime,
}

/// A log joined with its medication. The medication columns are `None` once it has been deleted.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MedicationLogDetail {
	pub log_id: Uuid,
	pub medication_id: Uuid,
	pub user_id: Uuid,
	pub taken_at: OffsetDateTime,
	pub status: String,
	pub notes: Option<String>,
	pub created_at: OffsetDateTime,
	pub medication_name: Option<String>,
	pub dosage: Option<String>,
	pub frequency: Option<String>,
}

/// The columns adherence aggregation reads.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LogRecord {
	pub medication_id: Uuid,
	pub taken_at: OffsetDateTime,
	pub status: String,
}

#[derive(Debug, Clone, Default)]
pub struct LogFilter {
	pub taken_between: Option<(OffsetDateTime, OffsetDateTime)>,
	pub medication_id: Option<Uuid>,
}
