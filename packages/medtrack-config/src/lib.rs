mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Adherence, Config, Postgres, Security, Service, Storage};

use std::{fs, path::Path};

pub const MAX_UTC_OFFSET_MINUTES: i32 = 18 * 60;
pub const MAX_STREAK_WINDOW_DAYS: u32 = 366;
pub const MAX_WEEKLY_WINDOW_DAYS: u32 = 31;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.adherence.utc_offset_minutes.unsigned_abs() > MAX_UTC_OFFSET_MINUTES.unsigned_abs() {
		return Err(Error::Validation {
			message: format!(
				"adherence.utc_offset_minutes must be within -{MAX_UTC_OFFSET_MINUTES} and {MAX_UTC_OFFSET_MINUTES}."
			),
		});
	}
	if !(1..=MAX_STREAK_WINDOW_DAYS).contains(&cfg.adherence.streak_window_days) {
		return Err(Error::Validation {
			message: format!(
				"adherence.streak_window_days must be in the range 1-{MAX_STREAK_WINDOW_DAYS}."
			),
		});
	}
	if !(1..=MAX_WEEKLY_WINDOW_DAYS).contains(&cfg.adherence.weekly_window_days) {
		return Err(Error::Validation {
			message: format!(
				"adherence.weekly_window_days must be in the range 1-{MAX_WEEKLY_WINDOW_DAYS}."
			),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.security.api_auth_token.as_deref().map(|token| token.trim().is_empty()).unwrap_or(false)
	{
		cfg.security.api_auth_token = None;
	}
	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}
