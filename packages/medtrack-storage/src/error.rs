const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Sqlx(sqlx::Error),
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
	#[error("Not found: {0}")]
	NotFound(String),
	#[error("Conflict: {0}")]
	Conflict(String),
}
impl From<sqlx::Error> for Error {
	fn from(err: sqlx::Error) -> Self {
		let Some(db_err) = err.as_database_error() else {
			return Self::Sqlx(err);
		};
		let code = db_err.code().map(|code| code.into_owned());
		let detail = db_err.message().to_string();

		match code.as_deref() {
			Some(UNIQUE_VIOLATION) => Self::Conflict(detail),
			Some(FOREIGN_KEY_VIOLATION) => Self::NotFound(detail),
			Some(CHECK_VIOLATION) => Self::InvalidArgument(detail),
			_ => Self::Sqlx(err),
		}
	}
}
