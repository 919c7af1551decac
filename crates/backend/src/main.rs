use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::middleware::{self, Next};
use axum::response::Response;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use backend::api::handlers::usecases::set_import_options;
use backend::routes::configure_routes;
use backend::shared::config::{load_config, resolve_path, Config};
use backend::shared::dataset::{replace_dataset, Dataset};
use backend::shared::settings_store::initialize_settings;
use backend::usecases::u501_import_workbook::{import_files, ImportOptions};
use contracts::usecases::u501_import_workbook::{ImportFile, ImportRequest};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;
    init_tracing(&config)?;

    tracing::info!(
        "Configuration loaded: data sheet \"{}\", {} startup file(s)",
        config.import.data_sheet,
        config.import.files.len()
    );

    initialize_settings(&config.targets, resolve_path(&config.targets.settings_path))?;

    let options = ImportOptions::from_config(&config);
    replace_dataset(Dataset::empty(options.default_store_order.clone()));
    load_startup_files(&config, &options).await;
    set_import_options(options);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let app = configure_routes()
        .layer(middleware::from_fn(request_logger))
        .layer(cors);

    let addr = format!("{}:{}", config.server.host, config.server.port);

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    config.server.port
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}

/// Stdout plus an append-only file layer in the configured log directory.
fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let log_dir = resolve_path(&config.logging.dir);
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("backend.log"))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    Ok(())
}

/// Imports the workbooks listed in the config; failures leave the empty dataset in place.
async fn load_startup_files(config: &Config, options: &ImportOptions) {
    if config.import.files.is_empty() {
        tracing::info!("No startup files configured, waiting for an import request");
        return;
    }

    let request = ImportRequest {
        files: config
            .import
            .files
            .iter()
            .map(|f| ImportFile {
                path: f.path.clone(),
                year: f.year,
            })
            .collect(),
    };

    match import_files(&request, options).await {
        Ok(outcome) => replace_dataset(outcome.dataset),
        Err(e) => tracing::warn!("Startup import failed: {}", e),
    }
}

async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    tracing::info!(
        "{} {} -> {} in {}ms",
        method,
        path,
        response.status().as_u16(),
        start.elapsed().as_millis()
    );
    response
}
