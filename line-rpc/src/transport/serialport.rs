use crate::{debug, error, warn};
use core::{pin::Pin, time::Duration};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio_serial::{
    ClearBuffer, DataBits, Parity, SerialPort, SerialPortBuilderExt, SerialStream, StopBits,
};

pub struct SerialTransport {
    port: BufReader<SerialStream>,
}

impl SerialTransport {
    pub fn new(port: &str, baud: u32) -> Result<Self, crate::Error> {
        let stream = tokio_serial::new(port, baud)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .open_native_async()
            .map_err(|e| {
                error!("Failed to open serial port {port} with error {e}");
                crate::Error::ChannelUnavailable {
                    port: port.to_owned(),
                    reason: e.to_string(),
                }
            })?;

        debug!("Opened serial port {port} at {baud} baud");

        Ok(Self {
            port: BufReader::new(stream),
        })
    }
}

impl super::Transport for SerialTransport {
    async fn reset(&mut self) -> Result<usize, crate::Error> {
        let buffered = self.port.buffer().len();
        AsyncBufRead::consume(Pin::new(&mut self.port), buffered);

        // Only used for the flushed byte count, the clear below still runs
        let pending = match self.port.get_ref().bytes_to_read() {
            Ok(pending) => pending as usize,
            Err(e) => {
                warn!("Failed to query pending serial input with error {e}");
                0
            }
        };

        self.port.get_mut().clear(ClearBuffer::All).map_err(|e| {
            error!("Failed to clear serial port buffers with error {e}");
            crate::Error::TransportError
        })?;

        Ok(buffered.saturating_add(pending))
    }

    async fn write_frame(&mut self, frame: &[u8]) -> Result<(), crate::Error> {
        self.port.write_all(frame).await.map_err(|e| {
            error!("Failed to write to serial port with error {e}");
            crate::Error::TransportError
        })?;

        self.port.flush().await.map_err(|e| {
            error!("Failed to flush serial port with error {e}");
            crate::Error::TransportError
        })
    }

    async fn read_line(&mut self, timeout: Duration) -> Result<String, crate::Error> {
        let mut buffer = Vec::new();

        let result = tokio::time::timeout(timeout, self.port.read_until(b'\n', &mut buffer)).await;

        match result {
            Ok(Ok(0)) => {
                error!("Serial port closed");
                Err(crate::Error::TransportError)
            }
            Ok(Ok(_)) if buffer.last() == Some(&b'\n') => Ok(super::decode_line(&buffer)),
            Ok(Ok(n)) => {
                error!("Serial port closed after {n} bytes of an incomplete line");
                Err(crate::Error::TransportError)
            }
            Ok(Err(e)) => {
                error!("Serial error: {e}");
                Err(crate::Error::TransportError)
            }
            Err(_) => {
                debug!("Read timed out with {} bytes of a partial line", buffer.len());
                Err(crate::Error::Timeout)
            }
        }
    }
}
