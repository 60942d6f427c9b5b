//! Tag suggestion: prompt, model call, typed reply.

use std::sync::Arc;
use std::time::Instant;

use crate::observability::metrics;
use crate::tagging::model::{LanguageModel, ModelError};
use crate::tagging::types::{TagRequest, TagResponse, MAX_TAGS};

/// Builds the single user prompt for a product.
pub fn build_prompt(name: &str, description: &str) -> String {
    format!("Suggest tags for the following product: {name} {description}")
}

/// Suggests tags for products using a pre-configured language model.
#[derive(Clone)]
pub struct TagSuggestionService {
    model: Arc<dyn LanguageModel>,
}

impl TagSuggestionService {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Ask the model for tags. Every call is independent; nothing is cached.
    pub async fn suggest_tags(&self, request: &TagRequest) -> Result<TagResponse, ModelError> {
        let prompt = build_prompt(&request.name, &request.description);
        let started = Instant::now();

        let result = self
            .model
            .complete(&prompt, &TagResponse::json_schema())
            .await
            .and_then(|raw| parse_tags(&raw));

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.outcome(),
        };
        metrics::record_model_call(outcome, started);

        match &result {
            Ok(response) => tracing::info!(
                model = self.model.name(),
                tags = response.tags.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Tags suggested"
            ),
            Err(e) => tracing::error!(
                model = self.model.name(),
                outcome,
                error = %e,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Tag suggestion failed"
            ),
        }

        result
    }
}

/// Deserialize the structured reply, keeping at most [`MAX_TAGS`] tags.
fn parse_tags(raw: &str) -> Result<TagResponse, ModelError> {
    let mut response: TagResponse =
        serde_json::from_str(raw.trim()).map_err(|e| ModelError::MalformedReply(e.to_string()))?;
    if response.tags.len() > MAX_TAGS {
        tracing::debug!(returned = response.tags.len(), "Truncating tag list");
        response.tags.truncate(MAX_TAGS);
    }
    Ok(response)
}
