use crate::kind::MeasurementKind;

/// Width of a command frame expected by the stock device firmware.
pub const DEFAULT_FRAME_WIDTH: usize = 8;

const PADDING: u8 = b' ';

/// A command encoded to the fixed width the device reads per request.
///
/// Shorter commands are right padded with spaces, longer ones are truncated
/// to the first `width` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFrame {
    bytes: Vec<u8>,
}

impl CommandFrame {
    pub fn new(command: &str, width: usize) -> Self {
        let mut bytes: Vec<u8> = command.bytes().take(width).collect();
        bytes.resize(width, PADDING);
        Self { bytes }
    }

    pub fn for_kind(kind: MeasurementKind, width: usize) -> Self {
        Self::new(kind.command(), width)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for CommandFrame {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
