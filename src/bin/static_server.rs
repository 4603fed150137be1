use std::{
    net::{IpAddr, SocketAddr},
    path::PathBuf,
    process::ExitCode,
};

use axum::{Router, extract::Request, routing::get};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use pastel_finance::{StaticAssets, graceful_shutdown, serve_static_asset};

/// Serves the files in a directory so the offline app can be opened from
/// another device on the same network.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The directory to serve files from.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// The file served for `/`.
    #[arg(long, default_value = "index.html")]
    entry_document: String,

    /// The address to listen on.
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// The port to serve files from.
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(filter::LevelFilter::INFO))
        .init();

    let args = Args::parse();

    if !args.root.is_dir() {
        tracing::error!("{} is not a directory", args.root.display());
        return ExitCode::FAILURE;
    }

    let assets = StaticAssets {
        root: args.root,
        entry_document: args.entry_document,
    };

    let router = Router::new()
        .fallback(get(serve_static_asset))
        .with_state(assets.clone())
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request| {
                let method = req.method();
                let uri = req.uri();

                tracing::debug_span!("request", %method, %uri)
            }),
        );

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let addr = SocketAddr::new(args.host, args.port);
    tracing::info!(
        "Serving {} on http://localhost:{} (network: http://{addr})",
        assets.root.display(),
        args.port
    );

    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server stopped with an error: {error}");
        return ExitCode::FAILURE;
    }

    tracing::info!("Server terminated");
    ExitCode::SUCCESS
}
