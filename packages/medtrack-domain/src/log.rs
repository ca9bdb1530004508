use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, UtcOffset};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogStatus {
	Taken,
	Missed,
	Skipped,
}
impl LogStatus {
	pub const ALL: [Self; 3] = [Self::Taken, Self::Missed, Self::Skipped];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Taken => "taken",
			Self::Missed => "missed",
			Self::Skipped => "skipped",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|status| status.as_str() == raw.trim())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
	Patient,
	Caretaker,
}
impl Role {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Patient => "patient",
			Self::Caretaker => "caretaker",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim() {
			"patient" => Some(Self::Patient),
			"caretaker" => Some(Self::Caretaker),
			_ => None,
		}
	}
}

/// The slice of a medication log the aggregator reasons about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
	pub medication_id: Uuid,
	pub taken_at: OffsetDateTime,
	pub status: LogStatus,
}
impl LogEntry {
	/// Calendar date of `taken_at` as seen from `offset`.
	pub fn local_date(&self, offset: UtcOffset) -> Date {
		self.taken_at.to_offset(offset).date()
	}

	pub fn is_taken(&self) -> bool {
		self.status == LogStatus::Taken
	}
}
