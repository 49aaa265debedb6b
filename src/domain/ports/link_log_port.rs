//! Link log port definition.

use async_trait::async_trait;

use crate::domain::entities::LinkRecord;
use crate::domain::errors::LinkLogError;

/// Port for the append-only log of published links.
#[async_trait]
pub trait LinkLogPort: Send + Sync {
    /// Appends a record. Returns the number of records now in the log.
    async fn append(&self, record: &LinkRecord) -> Result<usize, LinkLogError>;
}
