use std::{net::SocketAddr, path::PathBuf, process::exit};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use expense_tracker::{
    AppState, Database, LogConfig, build_router, get_local_offset, graceful_shutdown,
    init_logging, logging_middleware,
};

/// The web server for the expense tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, env = "EXPENSE_TRACKER_DB_PATH")]
    db_path: PathBuf,

    /// The port to serve the application from.
    #[arg(short, long, env = "EXPENSE_TRACKER_PORT", default_value_t = 8000)]
    port: u16,

    /// The canonical name of the local timezone, e.g. "Pacific/Auckland".
    #[arg(long, env = "EXPENSE_TRACKER_TIMEZONE", default_value = "Etc/UTC")]
    timezone: String,

    /// File path to the detailed log file.
    #[arg(long, env = "EXPENSE_TRACKER_LOG_PATH", default_value = "server.log")]
    log_path: PathBuf,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let log_config = LogConfig {
        log_file: Some(args.log_path.clone()),
        ..Default::default()
    };

    if let Err(error) = init_logging(&log_config) {
        eprintln!("{error}");
        exit(1);
    }

    if get_local_offset(&args.timezone).is_none() {
        tracing::error!("Invalid timezone {}", args.timezone);
        exit(1);
    }

    let state = match AppState::new(Database::new(&args.db_path), &args.timezone) {
        Ok(state) => state,
        Err(error) => {
            tracing::error!(
                "Could not initialize database at {}: {error}",
                args.db_path.display()
            );
            exit(1);
        }
    };

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(
        build_router(state).layer(middleware::from_fn(logging_middleware)),
    );

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    tracing::info!("HTTP server listening on {}", addr);
    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server error: {error}");
        exit(1);
    }
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
