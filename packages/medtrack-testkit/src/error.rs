pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("MEDTRACK_PG_DSN is not a valid Postgres DSN: {0}")]
	InvalidDsn(#[source] sqlx::Error),
	#[error("Neither the postgres nor the template1 database is reachable: {0}")]
	AdminUnavailable(#[source] sqlx::Error),
	#[error("Failed to create test database {name}: {source}")]
	CreateDatabase { name: String, source: sqlx::Error },
	#[error("Failed to drop test database {name}: {source}")]
	DropDatabase { name: String, source: sqlx::Error },
	#[error("Failed to start the cleanup runtime: {0}")]
	Runtime(#[from] std::io::Error),
}
