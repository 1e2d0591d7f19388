use sensor_bridge_protocol::{MeasurementKind, Reading};
use tokio::sync::RwLock;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Index {index} is out of range for {len} readings")]
pub struct IndexOutOfRange {
    pub index: usize,
    pub len: usize,
}

/// An ordered history of readings of one kind.
///
/// The position of a reading is its identifier, removing a reading shifts
/// every later reading down by one.
#[derive(Default)]
pub struct ReadingStore {
    readings: RwLock<Vec<Reading>>,
}

impl ReadingStore {
    /// Appends a reading to the end of the history.
    ///
    /// # Returns
    /// - The index the reading was stored at.
    pub async fn append(&self, reading: Reading) -> usize {
        let mut readings = self.readings.write().await;
        readings.push(reading);
        readings.len() - 1
    }

    /// Returns the reading at `index`.
    pub async fn get(&self, index: usize) -> Result<Reading, IndexOutOfRange> {
        let readings = self.readings.read().await;
        readings.get(index).cloned().ok_or(IndexOutOfRange {
            index,
            len: readings.len(),
        })
    }

    /// Returns every reading, oldest first.
    pub async fn get_all(&self) -> Vec<Reading> {
        self.readings.read().await.clone()
    }

    /// Removes and returns the reading at `index`.
    ///
    /// The store is left untouched when `index` is out of range.
    pub async fn remove(&self, index: usize) -> Result<Reading, IndexOutOfRange> {
        let mut readings = self.readings.write().await;
        if index < readings.len() {
            Ok(readings.remove(index))
        } else {
            Err(IndexOutOfRange {
                index,
                len: readings.len(),
            })
        }
    }

    pub async fn len(&self) -> usize {
        self.readings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.readings.read().await.is_empty()
    }
}

/// One independent [`ReadingStore`] per measurement kind.
#[derive(Default)]
pub struct ReadingStores {
    temperature: ReadingStore,
    pressure: ReadingStore,
}

impl ReadingStores {
    pub fn for_kind(&self, kind: MeasurementKind) -> &ReadingStore {
        match kind {
            MeasurementKind::Temperature => &self.temperature,
            MeasurementKind::Pressure => &self.pressure,
        }
    }
}
