pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Conflict: {message}")]
	Conflict { message: String },
	/// The log store could not be read. Distinct from a read that returned no logs.
	#[error("Log store unavailable: {message}")]
	LogFetch { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl Error {
	pub(crate) fn invalid(message: impl Into<String>) -> Self {
		Self::InvalidRequest { message: message.into() }
	}

	pub(crate) fn not_found(message: impl Into<String>) -> Self {
		Self::NotFound { message: message.into() }
	}

	pub(crate) fn log_fetch(err: medtrack_storage::Error) -> Self {
		tracing::warn!(error = %err, "Log store fetch failed.");

		Self::LogFetch { message: err.to_string() }
	}
}

impl From<medtrack_storage::Error> for Error {
	fn from(err: medtrack_storage::Error) -> Self {
		match err {
			medtrack_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			medtrack_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			medtrack_storage::Error::NotFound(message) => Self::NotFound { message },
			medtrack_storage::Error::Conflict(message) => Self::Conflict { message },
		}
	}
}
