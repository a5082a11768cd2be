use crate::cli::ServeArgs;
use crate::infra::{seeded_service, workflow_config, AppState};
use crate::routes::with_member_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use medicaid_assist::config::AppConfig;
use medicaid_assist::error::AppError;
use medicaid_assist::telemetry;
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
    config.workflow = workflow_config(&config, args.halt_on_error);

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = seeded_service(config.workflow.clone());

    let app = with_member_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        failure_policy = %config.workflow.failure_policy,
        "medicaid member workflow service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
