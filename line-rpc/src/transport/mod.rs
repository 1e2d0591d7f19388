use core::{future::Future, time::Duration};

pub mod serialport;
pub mod tokio_channels;

/// Byte level link to the device.
///
/// Futures are required to be `Send` so a channel can be driven from any
/// task of a multi threaded runtime.
pub trait Transport: Send {
    /// Discards any unread input and unwritten output, returning the number
    /// of bytes thrown away where known.
    fn reset(&mut self) -> impl Future<Output = Result<usize, crate::Error>> + Send;

    fn write_frame(
        &mut self,
        frame: &[u8],
    ) -> impl Future<Output = Result<(), crate::Error>> + Send;

    /// Reads up to and including the next `\n`, returning the line without
    /// its terminator.
    fn read_line(
        &mut self,
        timeout: Duration,
    ) -> impl Future<Output = Result<String, crate::Error>> + Send;
}

/// Strips a trailing `\n` or `\r\n` and decodes the rest, replacing invalid
/// UTF-8.
pub(crate) fn decode_line(buffer: &[u8]) -> String {
    let line = buffer.strip_suffix(b"\n").unwrap_or(buffer);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}

#[cfg(test)]
mod tests {
    use super::decode_line;

    #[test]
    fn decode_crlf() {
        assert_eq!(decode_line(b"23.5\r\n"), "23.5");
    }

    #[test]
    fn decode_lf() {
        assert_eq!(decode_line(b"101325.00\n"), "101325.00");
    }

    #[test]
    fn decode_keeps_inner_whitespace() {
        assert_eq!(decode_line(b" 23.5 \r\n"), " 23.5 ");
    }

    #[test]
    fn decode_invalid_utf8() {
        assert_eq!(decode_line(b"2\xff3\n"), "2\u{fffd}3");
    }
}
