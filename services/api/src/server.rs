use crate::cli::ServeArgs;
use crate::infra::{AppState, ConfiguredDirectory, ConfiguredSheet};
use crate::routes::with_form_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use place_preference::config::AppConfig;
use place_preference::error::AppError;
use place_preference::telemetry;
use place_preference::workflows::preference::SheetIntakeService;
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

    let directory = ConfiguredDirectory::from_config(&config.directory, config.submission.timeout())?;
    let sheet = ConfiguredSheet::from_config(&config.sheet);
    info!(
        directory = directory.describe(),
        sheet = %sheet.describe(),
        "preference collaborators configured"
    );
    let intake = Arc::new(SheetIntakeService::new(Arc::new(sheet)));

    let app = with_form_routes(Arc::new(directory), intake)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "place preference service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
