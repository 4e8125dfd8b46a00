use crate::controller::dispatch::routes::DispatchRoutes;
use crate::controller::health::routes::HealthRoutes;
use crate::controller::recipient::routes::RecipientRoutes;
use crate::controller::report::routes::ReportRoutes;
use crate::controller::session::routes::SessionRoutes;
use crate::controller::settings::routes::SettingsRoutes;
use crate::state::AppState;
use axum::http::header::AUTHORIZATION;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;

pub struct Routes;

impl Routes {
    pub async fn routes(app_state: AppState) -> Router {
        Router::new()
            .nest("/health", HealthRoutes::routes())
            .nest("/recipients", RecipientRoutes::routes())
            .nest("/settings", SettingsRoutes::routes())
            .nest("/dispatch", DispatchRoutes::routes())
            .nest("/report", ReportRoutes::routes())
            .nest("/session", SessionRoutes::routes())
            .layer(CatchPanicLayer::new())
            .layer(SetSensitiveRequestHeadersLayer::new(std::iter::once(AUTHORIZATION)))
            .with_state(app_state)
    }
}
