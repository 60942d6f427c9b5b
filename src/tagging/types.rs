//! Request and response shapes for tag suggestion.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Upper bound on the number of tags returned for one product.
pub const MAX_TAGS: usize = 10;

/// Body of `POST /suggest-tags` as it arrives on the wire.
///
/// Both fields are optional here so that a missing field, a `null` and an
/// empty string all end up as the same validation error.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TagRequestBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A validated product: both fields present and not blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRequest {
    pub name: String,
    pub description: String,
}

/// Which required fields were missing or blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields(pub Vec<&'static str>);

impl TryFrom<TagRequestBody> for TagRequest {
    type Error = MissingFields;

    fn try_from(body: TagRequestBody) -> Result<Self, Self::Error> {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        match (present(body.name), present(body.description)) {
            (Some(name), Some(description)) => Ok(TagRequest { name, description }),
            (name, description) => {
                let mut missing = Vec::new();
                if name.is_none() {
                    missing.push("name");
                }
                if description.is_none() {
                    missing.push("description");
                }
                Err(MissingFields(missing))
            }
        }
    }
}

/// Structured reply from the model, returned verbatim to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TagResponse {
    pub tags: Vec<String>,
}

impl TagResponse {
    /// JSON schema the model runtime is asked to constrain its output to.
    pub fn json_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "tags": {
                    "type": "array",
                    "items": { "type": "string" },
                    "maxItems": MAX_TAGS
                }
            },
            "required": ["tags"]
        })
    }
}
