pub mod adherence;
pub mod log;
pub mod window;

pub use adherence::{AdherencePoint, DayBucket, DayStatus, DayStatusEntry};
pub use log::{LogEntry, LogStatus, Role};
pub use window::DateWindow;
