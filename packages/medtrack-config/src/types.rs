use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub security: Security,
	#[serde(default)]
	pub adherence: Adherence,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Security {
	pub bind_localhost_only: bool,
	/// Optional. When set, every `/api` request must carry `Authorization: Bearer <token>`.
	pub api_auth_token: Option<String>,
}

/// Calendar-day and window settings shared by the dashboard and calendar views.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Adherence {
	/// Fixed offset from UTC, in minutes, that defines where a calendar day starts and ends.
	pub utc_offset_minutes: i32,
	/// Number of days, today included, scanned when computing the current streak.
	pub streak_window_days: u32,
	/// Number of days, today included, covered by the weekly adherence series.
	pub weekly_window_days: u32,
}
impl Default for Adherence {
	fn default() -> Self {
		Self { utc_offset_minutes: 0, streak_window_days: 30, weekly_window_days: 7 }
	}
}

fn default_log_level() -> String {
	"info".to_string()
}
