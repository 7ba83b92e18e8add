#![doc = include_str!("../README.md")]

mod server;

use anyhow::Context;
use clap::Parser;
use flights_tonic_core::{
    Error,
    proto::{FILE_DESCRIPTOR_SET, flights_server::FlightsServer},
    telemetry::init_tracing,
};
use futures::Stream;
use server::config::{CliArgs, ServerConfig};
use server::service::handler::FlightService;
use server::telemetry::init_telemetry;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tokio::signal;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::server::Connected;
use tonic::{codec::CompressionEncoding, transport::Server};
use tonic_reflection::server::Builder;
use tonic_web::GrpcWebLayer;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = ServerConfig::try_from(args)?;

    init_tracing(config.log_format)?;
    let providers = init_telemetry()?;

    let res = run(config).await;
    if let Err(e) = &res {
        tracing::error!("Server failed: {e:#}");
    }

    providers.shutdown();
    res
}

async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let tcp = bind_listener(&config.server_addr).await?;
    let local_addr = tcp.local_addr().context("failed to read listener address")?;
    log_startup_info(&local_addr.to_string(), &config);

    let service = FlightService::new(config);
    run_server_with_incoming(TcpListenerStream::new(tcp), service, shutdown_signal()).await
}

async fn bind_listener(addr: &str) -> flights_tonic_core::Result<TcpListener> {
    TcpListener::bind(addr).await.map_err(|e| Error::Setup {
        context: format!("failed to listen on {addr}: {e}"),
    })
}

/// Serves the Flights, health, and reflection services on `incoming` until
/// `signal` resolves, then drains in-flight calls.
async fn run_server_with_incoming<I, IO, IE, F>(
    incoming: I,
    service: FlightService,
    signal: F,
) -> anyhow::Result<()>
where
    I: Stream<Item = Result<IO, IE>>,
    IO: AsyncRead + AsyncWrite + Connected + Unpin + Send + 'static,
    IE: Into<tower::BoxError>,
    F: Future<Output = ()>,
{
    let (health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter
        .set_serving::<FlightsServer<FlightService>>()
        .await;

    let reflection = Builder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build_v1()?;

    let shutdown = {
        let service = service.clone();
        async move {
            signal.await;
            tracing::info!("Shutdown signal received, terminating gracefully...");

            // 1. Publish the status
            health_reporter
                .set_not_serving::<FlightsServer<FlightService>>()
                .await;

            // 2. Stop streaming, then let tonic drain connections
            service.shutdown();
        }
    };

    Server::builder()
        .accept_http1(true)
        .http2_adaptive_window(Some(true))
        .layer(
            ServiceBuilder::new()
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(GrpcWebLayer::new()),
        )
        .add_service(health_service)
        .add_service(reflection)
        .add_service(build_flight_service(service))
        .serve_with_incoming_shutdown(incoming, shutdown)
        .await?;

    tracing::info!("Service shut down successfully");
    Ok(())
}

fn log_startup_info(addr: &str, config: &ServerConfig) {
    if cfg!(debug_assertions) {
        tracing::info!(
            "Starting Flights service on {} with full config: {:#?}",
            addr,
            config
        );
    } else {
        tracing::info!("Starting Flights service on {}", addr);
    }
}

fn build_flight_service(service: FlightService) -> FlightsServer<FlightService> {
    FlightsServer::new(service)
        .send_compressed(CompressionEncoding::Zstd)
        .send_compressed(CompressionEncoding::Gzip)
        .send_compressed(CompressionEncoding::Deflate)
        .accept_compressed(CompressionEncoding::Zstd)
        .accept_compressed(CompressionEncoding::Gzip)
        .accept_compressed(CompressionEncoding::Deflate)
}

async fn shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C signal"),
        () = terminate => tracing::info!("Received SIGTERM signal"),
    }
}
