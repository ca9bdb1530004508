use sqlx::QueryBuilder;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
	Result,
	db::Db,
	models::{LogFilter, LogRecord, Medication, MedicationLog, MedicationLogDetail, User},
};

const LOG_DETAIL_COLUMNS: &str = "\
l.log_id,
	l.medication_id,
	l.user_id,
	l.taken_at,
	l.status,
	l.notes,
	l.created_at,
	m.name AS medication_name,
	m.dosage,
	m.frequency";

pub async fn upsert_user(db: &Db, user: &User) -> Result<User> {
	let row = sqlx::query_as::<_, User>(
		"\
INSERT INTO users (user_id, email, name, role, created_at, updated_at)
VALUES ($1, $2, $3, $4, $5, $6)
ON CONFLICT (user_id) DO UPDATE
SET
	email = EXCLUDED.email,
	name = EXCLUDED.name,
	role = EXCLUDED.role,
	updated_at = EXCLUDED.updated_at
RETURNING user_id, email, name, role, created_at, updated_at",
	)
	.bind(user.user_id)
	.bind(user.email.as_str())
	.bind(user.name.as_str())
	.bind(user.role.as_str())
	.bind(user.created_at)
	.bind(user.updated_at)
	.fetch_one(&db.pool)
	.await?;

	Ok(row)
}

pub async fn get_user(db: &Db, user_id: Uuid) -> Result<Option<User>> {
	let row = sqlx::query_as::<_, User>(
		"\
SELECT user_id, email, name, role, created_at, updated_at
FROM users
WHERE user_id = $1",
	)
	.bind(user_id)
	.fetch_optional(&db.pool)
	.await?;

	Ok(row)
}

pub async fn list_medications(db: &Db, user_id: Uuid) -> Result<Vec<Medication>> {
	let rows = sqlx::query_as::<_, Medication>(
		"\
SELECT *
FROM medications
WHERE user_id = $1
ORDER BY created_at DESC, medication_id",
	)
	.bind(user_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

pub async fn get_medication(
	db: &Db,
	user_id: Uuid,
	medication_id: Uuid,
) -> Result<Option<Medication>> {
	let row = sqlx::query_as::<_, Medication>(
		"SELECT * FROM medications WHERE medication_id = $1 AND user_id = $2",
	)
	.bind(medication_id)
	.bind(user_id)
	.fetch_optional(&db.pool)
	.await?;

	Ok(row)
}

pub async fn count_medications(db: &Db, user_id: Uuid) -> Result<i64> {
	let count: i64 = sqlx::query_scalar("SELECT count(*) FROM medications WHERE user_id = $1")
		.bind(user_id)
		.fetch_one(&db.pool)
		.await?;

	Ok(count)
}

pub async fn insert_medication(db: &Db, medication: &Medication) -> Result<Medication> {
	let row = sqlx::query_as::<_, Medication>(
		"\
INSERT INTO medications (
	medication_id,
	user_id,
	name,
	dosage,
	frequency,
	instructions,
	start_date,
	end_date,
	created_at,
	updated_at
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
RETURNING *",
	)
	.bind(medication.medication_id)
	.bind(medication.user_id)
	.bind(medication.name.as_str())
	.bind(medication.dosage.as_str())
	.bind(medication.frequency.as_str())
	.bind(medication.instructions.as_deref())
	.bind(medication.start_date)
	.bind(medication.end_date)
	.bind(medication.created_at)
	.bind(medication.updated_at)
	.fetch_one(&db.pool)
	.await?;

	Ok(row)
}

/// Replaces the editable fields. Returns `None` when the medication does not belong to the user.
pub async fn update_medication(db: &Db, medication: &Medication) -> Result<Option<Medication>> {
	let row = sqlx::query_as::<_, Medication>(
		"\
UPDATE medications
SET
	name = $1,
	dosage = $2,
	frequency = $3,
	instructions = $4,
	start_date = $5,
	end_date = $6,
	updated_at = $7
WHERE medication_id = $8 AND user_id = $9
RETURNING *",
	)
	.bind(medication.name.as_str())
	.bind(medication.dosage.as_str())
	.bind(medication.frequency.as_str())
	.bind(medication.instructions.as_deref())
	.bind(medication.start_date)
	.bind(medication.end_date)
	.bind(medication.updated_at)
	.bind(medication.medication_id)
	.bind(medication.user_id)
	.fetch_optional(&db.pool)
	.await?;

	Ok(row)
}

pub async fn delete_medication(db: &Db, user_id: Uuid, medication_id: Uuid) -> Result<bool> {
	let result = sqlx::query("DELETE FROM medications WHERE medication_id = $1 AND user_id = $2")
		.bind(medication_id)
		.bind(user_id)
		.execute(&db.pool)
		.await?;

	Ok(result.rows_affected() > 0)
}

pub async fn insert_log(db: &Db, log: &MedicationLog) -> Result<MedicationLogDetail> {
	let sql = format!(
		"\
WITH l AS (
	INSERT INTO medication_logs (
		log_id,
		medication_id,
		user_id,
		taken_at,
		status,
		notes,
		created_at
	)
	VALUES ($1, $2, $3, $4, $5, $6, $7)
	RETURNING *
)
SELECT
	{LOG_DETAIL_COLUMNS}
FROM l
LEFT JOIN medications m ON m.medication_id = l.medication_id"
	);
	let row = sqlx::query_as::<_, MedicationLogDetail>(&sql)
		.bind(log.log_id)
		.bind(log.medication_id)
		.bind(log.user_id)
		.bind(log.taken_at)
		.bind(log.status.as_str())
		.bind(log.notes.as_deref())
		.bind(log.created_at)
		.fetch_one(&db.pool)
		.await?;

	Ok(row)
}

/// Logs for a user, newest first.
pub async fn list_logs(
	db: &Db,
	user_id: Uuid,
	filter: &LogFilter,
) -> Result<Vec<MedicationLogDetail>> {
	let mut builder = QueryBuilder::new(format!(
		"\
SELECT
	{LOG_DETAIL_COLUMNS}
FROM medication_logs l
LEFT JOIN medications m ON m.medication_id = l.medication_id
WHERE l.user_id = "
	));

	builder.push_bind(user_id);

	if let Some((from, to)) = filter.taken_between {
		builder.push(" AND l.taken_at BETWEEN ");
		builder.push_bind(from);
		builder.push(" AND ");
		builder.push_bind(to);
	}
	if let Some(medication_id) = filter.medication_id {
		builder.push(" AND l.medication_id = ");
		builder.push_bind(medication_id);
	}

	builder.push(" ORDER BY l.taken_at DESC, l.log_id");

	let rows = builder.build_query_as::<MedicationLogDetail>().fetch_all(&db.pool).await?;

	Ok(rows)
}

/// Aggregation input for `[from, to]`, oldest first.
pub async fn fetch_log_records(
	db: &Db,
	user_id: Uuid,
	from: OffsetDateTime,
	to: OffsetDateTime,
) -> Result<Vec<LogRecord>> {
	let rows = sqlx::query_as::<_, LogRecord>(
		"\
SELECT medication_id, taken_at, status
FROM medication_logs
WHERE user_id = $1 AND taken_at BETWEEN $2 AND $3
ORDER BY taken_at ASC",
	)
	.bind(user_id)
	.bind(from)
	.bind(to)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}
