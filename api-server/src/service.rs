use crate::store::ReadingStores;
use line_rpc::{transport::Transport, SerialChannel};
use sensor_bridge_protocol::{CommandFrame, MeasurementKind, Reading};
use std::sync::Arc;
use tracing::{error, info, warn};

/// A reading that has just been taken and stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    pub index: usize,
    pub reading: Reading,
}

/// Takes readings from the device and records them.
///
/// This is the only place that starts transactions on the serial channel.
pub struct MeasurementService<T> {
    channel: Arc<SerialChannel<T>>,
    stores: Arc<ReadingStores>,
    frame_width: usize,
}

impl<T: Transport + 'static> MeasurementService<T> {
    pub fn new(channel: SerialChannel<T>, stores: Arc<ReadingStores>, frame_width: usize) -> Self {
        Self {
            channel: Arc::new(channel),
            stores,
            frame_width,
        }
    }

    /// Asks the device for a reading of `kind` and appends it to that kind's
    /// store.
    ///
    /// Nothing is stored when the device does not answer. The channel reset,
    /// frame write, reply read and append run on their own task, so dropping
    /// the returned future does not abandon an exchange the device is still
    /// answering.
    pub async fn measure(&self, kind: MeasurementKind) -> Result<Measurement, line_rpc::Error> {
        let frame = CommandFrame::for_kind(kind, self.frame_width);
        let channel = self.channel.clone();
        let stores = self.stores.clone();

        let exchange = tokio::spawn(async move {
            let line = channel.transact(&frame).await.inspect_err(|e| {
                warn!("Failed to read {kind}: {e}");
            })?;

            let reading = Reading::from_line(kind, &line);
            let index = stores.for_kind(kind).append(reading.clone()).await;
            info!("Stored {kind} reading {reading:?} at index {index}");

            Ok::<_, line_rpc::Error>(Measurement { index, reading })
        });

        exchange.await.unwrap_or_else(|e| {
            error!("Measurement task for {kind} failed: {e}");
            Err(line_rpc::Error::TransportError)
        })
    }
}
