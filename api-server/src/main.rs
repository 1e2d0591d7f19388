use clap::Parser;
use line_rpc::{transport::serialport::SerialTransport, SerialChannel};
use sensor_bridge_server::{api, config::Config, AppState};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::parse();

    // Nothing can be served without the device, refuse to start if the port cannot be opened
    let transport = match SerialTransport::new(&config.port, config.baud) {
        Ok(transport) => transport,
        Err(e) => {
            error!("{e}");
            ::std::process::exit(1);
        }
    };
    info!("Using serial port {} at {} baud", config.port, config.baud);

    let channel = SerialChannel::new(transport, config.timeout());
    if let Err(e) = channel.reset().await {
        error!("Failed to reset serial port {}: {e}", config.port);
        ::std::process::exit(1);
    }

    let state = Arc::new(AppState::new(channel, config.frame_width));

    let listener = match tokio::net::TcpListener::bind(config.listen).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to listen on {}: {e}", config.listen);
            ::std::process::exit(1);
        }
    };
    info!("Serving on http://{}", config.listen);

    if let Err(e) = axum::serve(listener, api::router(state)).await {
        error!("Server error: {e}");
        ::std::process::exit(1);
    }
}
