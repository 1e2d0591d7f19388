pub mod api;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod service;
pub mod store;

use line_rpc::{transport::Transport, SerialChannel};
use service::MeasurementService;
use std::sync::Arc;
use store::ReadingStores;

/// Everything a request handler can reach, built once at startup.
pub struct AppState<T> {
    pub measurements: MeasurementService<T>,
    pub readings: Arc<ReadingStores>,
}

impl<T: Transport + 'static> AppState<T> {
    pub fn new(channel: SerialChannel<T>, frame_width: usize) -> Self {
        let readings = Arc::new(ReadingStores::default());
        Self {
            measurements: MeasurementService::new(channel, readings.clone(), frame_width),
            readings,
        }
    }
}
