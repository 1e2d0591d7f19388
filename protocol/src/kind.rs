use strum::{Display, EnumIter};

/// The quantities the sensor can be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum MeasurementKind {
    Temperature,
    Pressure,
}

impl MeasurementKind {
    /// Command identifier understood by the device firmware.
    pub fn command(&self) -> &'static str {
        match self {
            Self::Temperature => "GET_T",
            Self::Pressure => "GET_P",
        }
    }

    /// Number of characters of a reply line that make up a reading.
    pub fn max_reading_len(&self) -> usize {
        match self {
            Self::Temperature => 9,
            Self::Pressure => 20,
        }
    }

    /// Path segment the kind is served under, e.g. `/api/temp/`.
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Temperature => "temp",
            Self::Pressure => "pres",
        }
    }
}
