use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::cli::OutputFormat;
use crate::runtime::{ConversationController, SendOutcome};

/// Result of a non-interactive run
#[derive(Debug, Serialize, Deserialize)]
pub struct NonInteractiveResult {
    /// The prompt that was sent
    pub prompt: String,
    /// The service's reply, empty on failure
    pub response: String,
    /// Any errors that occurred
    pub errors: Vec<String>,
    /// Metadata about the execution
    pub metadata: ExecutionMetadata,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExecutionMetadata {
    /// Session the exchange was recorded in
    pub session_id: String,
    /// Request identifier of the send
    pub request_id: String,
    /// Execution time in milliseconds
    pub duration_ms: u128,
}

/// Runs a single prompt through a fresh session
pub struct NonInteractiveRunner {
    controller: Arc<ConversationController>,
}

impl NonInteractiveRunner {
    pub fn new(controller: Arc<ConversationController>) -> Self {
        Self { controller }
    }

    /// Execute a single prompt and return the result
    pub async fn execute(&self, prompt: String) -> Result<NonInteractiveResult> {
        let start_time = std::time::Instant::now();
        let session = self.controller.create_session()?;
        let outcome = self.controller.send_message(&session.id, &prompt).await?;

        let (response, errors, request_id) = match outcome {
            SendOutcome::Replied {
                bot_message,
                request_id,
                ..
            } => (bot_message.content, Vec::new(), request_id),
            SendOutcome::Failed {
                error, request_id, ..
            } => (String::new(), vec![error.to_string()], request_id),
        };

        Ok(NonInteractiveResult {
            prompt,
            response,
            errors,
            metadata: ExecutionMetadata {
                session_id: session.id.clone(),
                request_id,
                duration_ms: start_time.elapsed().as_millis(),
            },
        })
    }

    /// Format the result for output
    pub fn format_result(&self, result: &NonInteractiveResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(result).unwrap_or_else(|e| {
                format!("{{\"error\": \"Failed to serialize result: {}\"}}", e)
            }),
            OutputFormat::Text => {
                let mut output = String::new();
                output.push_str(&result.response);

                if !result.errors.is_empty() {
                    output.push_str("\n--- Errors ---\n");
                    for error in &result.errors {
                        output.push_str(&format!("• {}\n", error));
                    }
                }

                output
            }
            OutputFormat::Markdown => {
                let mut output = String::new();

                output.push_str("## Query\n\n");
                output.push_str(&result.prompt);
                output.push_str("\n\n## Response\n\n");
                output.push_str(&result.response);
                output.push_str("\n\n");

                if !result.errors.is_empty() {
                    output.push_str("## Errors\n\n");
                    for error in &result.errors {
                        output.push_str(&format!("- {}\n", error));
                    }
                    output.push('\n');
                }

                output.push_str(&format!(
                    "---\n*Session: {} | Request: {} | Time: {}ms*\n",
                    result.metadata.session_id,
                    result.metadata.request_id,
                    result.metadata.duration_ms
                ));

                output
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MockQueryGateway;
    use crate::session::ChatState;
    use crate::utils::GatewayError;

    fn runner_with(gateway: MockQueryGateway) -> NonInteractiveRunner {
        let controller = ConversationController::new(Arc::new(ChatState::default()), Arc::new(gateway));
        NonInteractiveRunner::new(Arc::new(controller))
    }

    #[tokio::test]
    async fn test_execute_success() {
        let mut gateway = MockQueryGateway::new();
        gateway
            .expect_query()
            .times(1)
            .returning(|_| Ok("Paris".to_string()));
        let runner = runner_with(gateway);

        let result = runner.execute("capital of France?".to_string()).await.unwrap();

        assert_eq!(result.response, "Paris");
        assert!(result.errors.is_empty());
        assert_eq!(runner.format_result(&result, OutputFormat::Text), "Paris");

        let json: serde_json::Value =
            serde_json::from_str(&runner.format_result(&result, OutputFormat::Json)).unwrap();
        assert_eq!(json["response"], "Paris");
        assert_eq!(json["metadata"]["session_id"], result.metadata.session_id.as_str());
    }

    #[tokio::test]
    async fn test_execute_failure_reports_error() {
        let mut gateway = MockQueryGateway::new();
        gateway
            .expect_query()
            .returning(|_| Err(GatewayError::Decode("missing field `response`".to_string())));
        let runner = runner_with(gateway);

        let result = runner.execute("x".to_string()).await.unwrap();

        assert!(result.response.is_empty());
        assert_eq!(result.errors.len(), 1);
        let markdown = runner.format_result(&result, OutputFormat::Markdown);
        assert!(markdown.contains("## Errors"));
        assert!(markdown.contains("missing field"));
    }

    #[tokio::test]
    async fn test_blank_prompt_is_rejected() {
        let mut gateway = MockQueryGateway::new();
        gateway.expect_query().never();
        let runner = runner_with(gateway);

        assert!(runner.execute("   ".to_string()).await.is_err());
    }
}
