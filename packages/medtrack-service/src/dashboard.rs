use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use crate::{Error, MedtrackService, Result};
use medtrack_domain::{DateWindow, adherence};

/// `date` stands in for "today" when given.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AdherenceRequest {
	#[serde(default, with = "crate::time_serde::date::option")]
	pub date: Option<Date>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
	pub total_medications: i64,
	pub today_adherence: u8,
	pub current_streak: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyAdherencePoint {
	#[serde(with = "crate::time_serde::date")]
	pub date: Date,
	pub adherence: u8,
}

impl MedtrackService {
	/// Medication count, today's adherence and the current streak.
	///
	/// The three reads run concurrently. Any failed read fails the whole call.
	pub async fn dashboard_stats(
		&self,
		user_id: Uuid,
		req: AdherenceRequest,
	) -> Result<DashboardStats> {
		let today = req.date.unwrap_or_else(|| self.today());
		let streak_window = DateWindow::trailing(today, self.cfg.adherence.streak_window_days);
		let count = async {
			self.stores.medications.count_medications(user_id).await.map_err(Error::from)
		};
		let (total_medications, today_logs, streak_logs) = tokio::try_join!(
			count,
			self.fetch_logs_on(user_id, today),
			self.fetch_logs_between(user_id, streak_window),
		)?;
		let stats = DashboardStats {
			total_medications,
			today_adherence: adherence::today_adherence(&today_logs),
			current_streak: adherence::current_streak(&streak_logs, streak_window, self.offset()),
		};

		tracing::debug!(
			%user_id,
			%today,
			total_medications = stats.total_medications,
			today_adherence = stats.today_adherence,
			current_streak = stats.current_streak,
			"Dashboard stats computed."
		);

		Ok(stats)
	}

	/// Daily adherence over the trailing week, oldest first. Days without logs are omitted.
	pub async fn weekly_adherence(
		&self,
		user_id: Uuid,
		req: AdherenceRequest,
	) -> Result<Vec<WeeklyAdherencePoint>> {
		let today = req.date.unwrap_or_else(|| self.today());
		let window = DateWindow::trailing(today, self.cfg.adherence.weekly_window_days);
		let logs = self.fetch_logs_between(user_id, window).await?;

		Ok(adherence::weekly_series(&logs, window, self.offset())
			.into_iter()
			.map(|point| WeeklyAdherencePoint {
				date: point.date,
				adherence: point.adherence_percent,
			})
			.collect())
	}
}
