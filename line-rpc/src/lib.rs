//! Exclusive command/reply transactions with a line oriented serial device.
//!
//! A [`channel::SerialChannel`] owns a [`transport::Transport`] and makes sure
//! only one frame is ever in flight: each transaction discards whatever the
//! previous exchange left behind, writes a single command frame and waits for
//! a single `\n` terminated reply line.

use log::{debug, error, warn};

pub mod channel;
pub mod transport;

#[cfg(test)]
mod test;

pub use channel::SerialChannel;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Serial port {port} is unavailable: {reason}")]
    ChannelUnavailable { port: String, reason: String },

    #[error("Timeout")]
    Timeout,

    #[error("Transport error")]
    TransportError,
}
