use std::sync::Arc;

use medtrack_service::MedtrackService;
use medtrack_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<MedtrackService>,
}
impl AppState {
	pub async fn new(config: medtrack_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let service = MedtrackService::new(config, db)?;

		Ok(Self::from_service(service))
	}

	pub fn from_service(service: MedtrackService) -> Self {
		Self { service: Arc::new(service) }
	}
}
