use crate::charts::ChartTheme;
use crate::client::ApiClient;
use crate::config::DashboardConfig;
use crate::errors::FetchError;
use crate::render::HeatmapRenderer;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DashboardConfig>,
    pub client: ApiClient,
    pub renderer: HeatmapRenderer,
    pub theme: Arc<ChartTheme>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Result<Self, FetchError> {
        let client = ApiClient::new(&config.api_url, config.fetch_timeout)?;
        let renderer = HeatmapRenderer::new(config.render.clone());
        let theme = ChartTheme::dark(&config.people);
        Ok(Self {
            config: Arc::new(config),
            client,
            renderer,
            theme: Arc::new(theme),
        })
    }

    pub fn tracks(&self, person: &str) -> bool {
        self.config.people.iter().any(|id| id == person)
    }
}
