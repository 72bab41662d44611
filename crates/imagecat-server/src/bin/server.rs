//! imagecat Server
//!
//! HTTP server for browsing annotated images and their protanope variants

use anyhow::Context;
use clap::Parser;
use imagecat::{ImageResolver, MetadataService};
use imagecat_server::{AppState, Router, ServerConfig};
use std::convert::Infallible;
use std::path::PathBuf;
use tracing::{error, info};

use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;

#[derive(Parser, Debug)]
#[command(name = "imagecat-server")]
#[command(about = "HTTP server for an annotated image catalog")]
struct Args {
    /// CSV file with image metadata (needs a `filename` column)
    #[arg(short = 'c', long, default_value = "images.csv")]
    csv_path: PathBuf,

    /// Directory holding `original/` and `protanope/` image folders
    #[arg(short = 'i', long, default_value = "images")]
    images_dir: PathBuf,

    /// Directory with the viewer's static assets
    #[arg(short = 's', long, default_value = "static")]
    static_dir: PathBuf,

    /// Bind address
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number
    #[arg(short = 'P', long, default_value = "8888")]
    port: u16,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        ServerConfig {
            csv_path: args.csv_path,
            images_dir: args.images_dir,
            static_dir: args.static_dir,
            host: args.host,
            port: args.port,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config: ServerConfig = Args::parse().into();
    info!("Starting imagecat server");

    // The catalog must load before any connection is accepted
    let service = MetadataService::new(&config.csv_path);
    let count = service.load().map_err(|e| {
        error!("Failed to load image catalog: {}", e);
        e
    })?;
    info!("Successfully loaded {} images", count);

    let router = Router::new(AppState {
        service,
        resolver: ImageResolver::new(&config.images_dir),
        static_dir: config.static_dir.clone(),
    });
    info!("Serving images from {:?}", config.images_dir);

    let addr = config
        .bind_addr()
        .with_context(|| format!("Invalid bind address {}:{}", config.host, config.port))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    let local_addr = listener.local_addr()?;

    let http_server = ConnBuilder::new(TokioExecutor::new());

    info!("Server started on http://{}", local_addr);
    info!("Press Ctrl+C to stop the server");

    loop {
        // Accept connection or wait for Ctrl+C
        tokio::select! {
            result = listener.accept() => {
                match result {
                    Ok((socket, peer)) => {
                        let router = router.clone();
                        let http_server = http_server.clone();
                        tokio::spawn(async move {
                            let service = service_fn(move |req: Request<Incoming>| {
                                let router = router.clone();
                                async move { Ok::<_, Infallible>(router.handle(req).await) }
                            });
                            if let Err(e) = http_server.serve_connection(TokioIo::new(socket), service).await {
                                error!("Connection error from {}: {}", peer, e);
                            }
                        });
                    }
                    Err(e) => {
                        error!("Failed to accept connection: {}", e);
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    info!("Server stopped");

    Ok(())
}
