use crate::{debug, transport::Transport, warn};
use core::time::Duration;
use sensor_bridge_protocol::CommandFrame;
use tokio::sync::Mutex;

/// Default time to wait for a reply line.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// A transport shared between any number of callers, with at most one
/// transaction on the wire at a time.
pub struct SerialChannel<T> {
    transport: Mutex<T>,
    timeout: Duration,
}

impl<T: Transport> SerialChannel<T> {
    pub fn new(transport: T, timeout: Duration) -> Self {
        Self {
            transport: Mutex::new(transport),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Discards buffered input and output, waiting for any in-flight
    /// transaction to finish first.
    pub async fn reset(&self) -> Result<usize, crate::Error> {
        let mut transport = self.transport.lock().await;
        transport.reset().await
    }

    /// Resets the link, sends `frame` and waits for the reply line.
    ///
    /// The channel is held for the whole exchange, callers queue on it in
    /// arrival order.
    pub async fn transact(&self, frame: &CommandFrame) -> Result<String, crate::Error> {
        let mut transport = self.transport.lock().await;

        let flushed_bytes = transport.reset().await?;
        if flushed_bytes > 0 {
            debug!("Flushed {} bytes prior to transaction", flushed_bytes);
        }

        debug!("Sending frame {:?}", String::from_utf8_lossy(frame.as_bytes()));
        transport.write_frame(frame.as_bytes()).await?;

        match transport.read_line(self.timeout).await {
            Ok(line) => {
                debug!("Received reply {:?}", line);
                Ok(line)
            }
            Err(crate::Error::Timeout) => {
                warn!(
                    "Timeout waiting for reply to {:?}",
                    String::from_utf8_lossy(frame.as_bytes())
                );
                Err(crate::Error::Timeout)
            }
            Err(e) => {
                warn!("Error waiting for reply: {e}");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::SerialChannel;
    use crate::transport::tokio_channels::TokioChannelTransport;
    use core::time::Duration;
    use sensor_bridge_protocol::CommandFrame;
    use std::sync::Arc;

    const TIMEOUT: Duration = Duration::from_millis(100);

    #[tokio::test]
    async fn basic() {
        let (t1, mut device) = TokioChannelTransport::new_pair(256);
        let channel = SerialChannel::new(t1, TIMEOUT);

        let run_device = async move {
            let frame = device
                .receive_raw(8, Duration::from_millis(500))
                .await
                .unwrap();
            assert_eq!(frame, b"GET_T   ");

            device.transmit_raw(b"23.5\r\n").await.unwrap();
            device
        };

        let run_host = async {
            let reply = channel
                .transact(&CommandFrame::new("GET_T", 8))
                .await
                .unwrap();
            assert_eq!(reply, "23.5");
        };

        tokio::join!(run_device, run_host);
    }

    #[tokio::test]
    async fn no_reply() {
        let (t1, mut device) = TokioChannelTransport::new_pair(256);
        let channel = SerialChannel::new(t1, TIMEOUT);

        let result = channel.transact(&CommandFrame::new("GET_P", 8)).await;
        assert_eq!(result, Err(crate::Error::Timeout));

        // The frame still went out in full
        let frame = device.receive_raw(8, Duration::ZERO).await.unwrap();
        assert_eq!(frame, b"GET_P   ");
    }

    #[tokio::test]
    async fn stale_bytes_are_discarded() {
        let (t1, mut device) = TokioChannelTransport::new_pair(256);
        let channel = SerialChannel::new(t1, TIMEOUT);

        // Leftovers of an interrupted exchange
        device.transmit_raw(b"99.9\r\n1").await.unwrap();

        let run_device = async move {
            device
                .receive_raw(8, Duration::from_millis(500))
                .await
                .unwrap();
            device.transmit_raw(b"23.5\r\n").await.unwrap();
            device
        };

        let run_host = async {
            channel
                .transact(&CommandFrame::new("GET_T", 8))
                .await
                .unwrap()
        };

        let (_, reply) = tokio::join!(run_device, run_host);
        assert_eq!(reply, "23.5");
    }

    #[tokio::test]
    async fn recover_after_late_reply() {
        let (t1, mut device) = TokioChannelTransport::new_pair(256);
        let channel = SerialChannel::new(t1, TIMEOUT);

        let run_device = async move {
            // Reply to the first request only after the host gave up
            device
                .receive_raw(8, Duration::from_millis(500))
                .await
                .unwrap();
            tokio::time::sleep(TIMEOUT * 2).await;
            device.transmit_raw(b"late\r\n").await.unwrap();

            // Normal
            device
                .receive_raw(8, Duration::from_millis(1000))
                .await
                .unwrap();
            device.transmit_raw(b"fresh\r\n").await.unwrap();
            device
        };

        let run_host = async {
            let result = channel.transact(&CommandFrame::new("GET_T", 8)).await;
            assert_eq!(result, Err(crate::Error::Timeout));

            tokio::time::sleep(TIMEOUT * 2).await;

            let result = channel.transact(&CommandFrame::new("GET_T", 8)).await;
            assert_eq!(result, Ok("fresh".to_owned()));
        };

        tokio::join!(run_device, run_host);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_transactions_do_not_interleave() {
        const CALLS: usize = 16;

        let (t1, mut device) = TokioChannelTransport::new_pair(256);
        let channel = Arc::new(SerialChannel::new(t1, Duration::from_secs(1)));

        let run_device = tokio::spawn(async move {
            let mut frames = Vec::new();

            for _ in 0..CALLS {
                let frame = device
                    .receive_raw(8, Duration::from_secs(5))
                    .await
                    .unwrap();

                // Echo the command back so every caller can check it got its own reply
                let reply = format!("{}\r\n", String::from_utf8_lossy(&frame).trim_end());
                device.transmit_raw(reply.as_bytes()).await.unwrap();

                frames.push(frame);
            }

            frames
        });

        let callers: Vec<_> = (0..CALLS)
            .map(|i| {
                let channel = channel.clone();
                tokio::spawn(async move {
                    let command = format!("CMD_{i:02}");
                    let reply = channel
                        .transact(&CommandFrame::new(&command, 8))
                        .await
                        .unwrap();
                    assert_eq!(reply, command);
                })
            })
            .collect();

        for caller in callers {
            caller.await.unwrap();
        }

        let mut frames = run_device.await.unwrap();
        frames.sort();

        let mut expected: Vec<Vec<u8>> = (0..CALLS)
            .map(|i| format!("CMD_{i:02}  ").into_bytes())
            .collect();
        expected.sort();

        assert_eq!(frames, expected);
    }

    #[tokio::test]
    async fn explicit_reset() {
        let (t1, mut device) = TokioChannelTransport::new_pair(256);
        let channel = SerialChannel::new(t1, TIMEOUT);

        device.transmit_raw(b"noise").await.unwrap();

        assert_eq!(channel.reset().await, Ok(5));
        assert_eq!(channel.reset().await, Ok(0));
        assert_eq!(channel.timeout(), TIMEOUT);
    }
}
