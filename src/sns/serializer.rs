use crate::{stream::UserRecord, Result};

pub struct JsonSerializer;

impl JsonSerializer {
    /// Encodes the whole batch as one JSON array.
    pub fn serialize(batch: &[UserRecord]) -> Result<String> {
        serde_json::to_string(batch).map_err(Into::into)
    }
}
