use crate::warn;
use core::time::Duration;
use tokio::sync::mpsc::{channel, error::TryRecvError, Receiver, Sender};

/// One end of an in-memory byte pipe.
///
/// The host end is handed to a [`crate::SerialChannel`], the other end plays
/// the device using [`TokioChannelTransport::receive_raw`] and
/// [`TokioChannelTransport::transmit_raw`].
pub struct TokioChannelTransport {
    tx: Sender<u8>,
    rx: Receiver<u8>,
}

impl TokioChannelTransport {
    pub fn new_pair(capacity: usize) -> (Self, Self) {
        let (tx1, rx1) = channel::<u8>(capacity);
        let (tx2, rx2) = channel::<u8>(capacity);
        let transport_1 = Self { tx: tx1, rx: rx2 };
        let transport_2 = Self { tx: tx2, rx: rx1 };
        (transport_1, transport_2)
    }

    pub async fn transmit_raw(&mut self, data: &[u8]) -> Result<(), crate::Error> {
        for b in data {
            self.tx
                .send(*b)
                .await
                .map_err(|_| crate::Error::TransportError)?;
        }

        Ok(())
    }

    /// Receives exactly `count` bytes.
    pub async fn receive_raw(
        &mut self,
        count: usize,
        timeout: Duration,
    ) -> Result<Vec<u8>, crate::Error> {
        let mut buffer = Vec::with_capacity(count);

        let receive = async {
            while buffer.len() < count {
                match self.rx.recv().await {
                    Some(b) => buffer.push(b),
                    None => return Err(crate::Error::TransportError),
                }
            }
            Ok(())
        };

        match tokio::time::timeout(timeout, receive).await {
            Ok(Ok(())) => Ok(buffer),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(crate::Error::Timeout),
        }
    }
}

impl super::Transport for TokioChannelTransport {
    async fn reset(&mut self) -> Result<usize, crate::Error> {
        let mut count: usize = 0;

        loop {
            match self.rx.try_recv() {
                Ok(_) => {
                    count = count.saturating_add(1);
                }
                Err(TryRecvError::Empty) => {
                    break;
                }
                Err(TryRecvError::Disconnected) => {
                    warn!("Channel closed");
                    return Err(crate::Error::TransportError);
                }
            }
        }

        Ok(count)
    }

    async fn write_frame(&mut self, frame: &[u8]) -> Result<(), crate::Error> {
        self.transmit_raw(frame).await
    }

    async fn read_line(&mut self, timeout: Duration) -> Result<String, crate::Error> {
        let mut buffer = Vec::new();

        let receive = async {
            loop {
                match self.rx.recv().await {
                    Some(b) => {
                        buffer.push(b);
                        if b == b'\n' {
                            return Ok(());
                        }
                    }
                    None => {
                        warn!("Channel closed");
                        return Err(crate::Error::TransportError);
                    }
                }
            }
        };

        match tokio::time::timeout(timeout, receive).await {
            Ok(Ok(())) => Ok(super::decode_line(&buffer)),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(crate::Error::Timeout),
        }
    }
}
