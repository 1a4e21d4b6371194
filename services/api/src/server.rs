use crate::cli::ServeArgs;
use crate::infra::{AppState, Services};
use crate::routes::with_operational_routes;
use activity_tracker::config::AppConfig;
use activity_tracker::error::AppError;
use activity_tracker::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let services = Services::in_memory(config.review);
    if let Some(admin) = &config.bootstrap_admin {
        let record = services.accounts.bootstrap_admin(admin)?;
        info!(admin = %record.id, email = %record.email, "bootstrap administrator available");
    }

    let app = with_operational_routes(&services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        max_credits = config.review.max_credits_per_activity,
        "student activity tracker ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
