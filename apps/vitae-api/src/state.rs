use std::sync::Arc;

use vitae_service::VitaeService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<VitaeService>,
}
impl AppState {
	/// Reads the knowledge base and prepares the retriever; fails on any unreadable document.
	pub fn new(config: vitae_config::Config) -> color_eyre::Result<Self> {
		let service = VitaeService::new(config)?;

		Ok(Self::from_service(service))
	}

	pub fn from_service(service: VitaeService) -> Self {
		Self { service: Arc::new(service) }
	}
}
