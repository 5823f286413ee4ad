use biogate_core::roster::normalize;
use biogate_core::types::FingerId;
use tokio::sync::RwLock;

/// Last snapshot of enrolled slots reported by the sensor.
///
/// Every sync replaces the whole snapshot; there is no incremental update.
pub struct ActiveRoster {
    ids: RwLock<Vec<FingerId>>,
}

impl ActiveRoster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self {
            ids: RwLock::new(Vec::new()),
        }
    }

    /// Replace the snapshot. Returns the number of distinct slots stored.
    pub async fn replace(&self, ids: Vec<FingerId>) -> usize {
        let ids = normalize(ids);
        let count = ids.len();
        *self.ids.write().await = ids;
        count
    }

    /// Slots in ascending order.
    pub async fn ids(&self) -> Vec<FingerId> {
        self.ids.read().await.clone()
    }
}

impl Default for ActiveRoster {
    fn default() -> Self {
        Self::new()
    }
}
