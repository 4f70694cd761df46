use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::application::context::AppContext;
use crate::interface::http::auth::AdminAuthenticator;

#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<AppContext>,
    pub admin: Arc<dyn AdminAuthenticator>,
    /// Prometheus render handle; `None` when no recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}
