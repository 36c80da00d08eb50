use std::future::ready;

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tool_choice_core::tool::{Error as ToolError, Tool, ToolResult};

#[derive(Deserialize, JsonSchema)]
pub struct SentimentScoresToolParameters {
    #[schemars(
        description = "The positive sentiment score, ranging from 0.0 to 1.0."
    )]
    positive_score: f64,
    #[schemars(
        description = "The negative sentiment score, ranging from 0.0 to 1.0."
    )]
    negative_score: f64,
    #[schemars(
        description = "The neutral sentiment score, ranging from 0.0 to 1.0."
    )]
    neutral_score: f64,
}

/// Receives the sentiment scores the model assigned to a text.
#[derive(Default)]
pub struct SentimentScoresTool;

impl Tool for SentimentScoresTool {
    type Input = SentimentScoresToolParameters;

    fn name(&self) -> &str {
        "print_sentiment_scores"
    }

    fn description(&self) -> &str {
        "Prints the sentiment scores of a given tweet or piece of text."
    }

    fn execute(
        &self,
        input: SentimentScoresToolParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        let scores = [
            input.positive_score,
            input.negative_score,
            input.neutral_score,
        ];
        if scores.iter().any(|s| !(0.0..=1.0).contains(s)) {
            return ready(Err(ToolError::invalid_input()
                .with_reason("scores must be between 0.0 and 1.0")));
        }
        ready(Ok(json!({
            "positive_score": input.positive_score,
            "negative_score": input.negative_score,
            "neutral_score": input.neutral_score,
        })))
    }
}
