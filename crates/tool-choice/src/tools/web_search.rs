use std::future::ready;

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tool_choice_core::tool::{Tool, ToolResult};

#[derive(Deserialize, JsonSchema)]
pub struct WebSearchToolParameters {
    #[schemars(description = "The topic to search the web for")]
    topic: String,
}

/// Pretends to search the web for a topic.
#[derive(Default)]
pub struct WebSearchTool;

impl Tool for WebSearchTool {
    type Input = WebSearchToolParameters;

    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "A tool to retrieve up to date information on a given topic by \
         searching the web. Only search the web for queries that you cannot \
         confidently answer."
    }

    fn execute(
        &self,
        input: WebSearchToolParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        info!("searching the web for: {}", input.topic);
        ready(Ok(json!({
            "topic": input.topic,
            "results": [],
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_search() {
        let output = WebSearchTool
            .execute(WebSearchToolParameters {
                topic: "2024 Miami Grand Prix winner".to_owned(),
            })
            .await
            .unwrap();
        assert_eq!(output["topic"], "2024 Miami Grand Prix winner");
        assert_eq!(output["results"], json!([]));
    }
}
