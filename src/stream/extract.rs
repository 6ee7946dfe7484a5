use super::types::{AttributeValue, Image};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The simplified user published downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub status: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserRecord {
    /// Builds a user from a stream image.
    ///
    /// Extraction is total: a missing attribute, a `NULL`, or a set/list/map
    /// value all become an empty string.
    pub fn from_image(image: &Image) -> Self {
        Self {
            id: field_text(image, "id"),
            status: field_text(image, "status"),
            first_name: field_text(image, "firstName"),
            last_name: field_text(image, "lastName"),
        }
    }
}

fn field_text(image: &Image, name: &str) -> String {
    match image.get(name) {
        Some(value) => value.as_text().unwrap_or_else(|| {
            debug!(field = name, tag = value.type_tag(), "Non-scalar attribute, using empty string");
            String::new()
        }),
        None => {
            debug!(field = name, "Attribute missing from image");
            String::new()
        }
    }
}

impl From<&Image> for UserRecord {
    fn from(image: &Image) -> Self {
        UserRecord::from_image(image)
    }
}

/// Convenience for building images in code, mostly fixtures.
pub fn string_image<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Image {
    fields
        .into_iter()
        .map(|(k, v)| (k.to_string(), AttributeValue::S(v.to_string())))
        .collect()
}
