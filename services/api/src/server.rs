use crate::cli::ServeArgs;
use crate::infra::{load_catalog, response_recorder, AppState};
use crate::routes::with_site_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use toolstack::config::AppConfig;
use toolstack::error::AppError;
use toolstack::quiz::{spawn_recorder, QuizService, ScoringConfig};
use toolstack::telemetry;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let catalog = Arc::new(load_catalog(&config.catalog)?);
    let sink = response_recorder(&config.recorder)?;
    let (responses, recorder_worker) = spawn_recorder(sink, config.recorder.queue_capacity);
    let quiz_service = Arc::new(QuizService::from_catalog(
        Arc::clone(&catalog),
        ScoringConfig::standard(),
        responses.clone(),
    )?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        responses,
    };

    let app = with_site_routes(quiz_service, catalog)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "toolstack api ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    readiness_flag.store(false, Ordering::Release);
    let stats = recorder_worker.shutdown().await;
    info!(
        recorded = stats.recorded,
        failed = stats.failed,
        dropped = stats.dropped,
        "quiz response recorder drained"
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        // Keep serving; without a signal handler the process is stopped externally.
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
