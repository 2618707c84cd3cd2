use crate::core::prompt;
use crate::error::Result;
use async_openai::{
    self,
    types::responses::{
        CreateResponseArgs, EasyInputMessageArgs, InputItem, InputParam, OutputItem,
        OutputMessageContent, Role,
    },
};
use std::env;

const DEFAULT_MODEL: &str = "gpt-4.1-mini";
const MODEL_ENV: &str = "TUBEASK_MODEL";
const MAX_OUTPUT_TOKENS: u32 = 4096;

/// Sends assembled prompts to the model and returns its text unmodified.
/// No retries, no streaming; failures propagate to the caller. The API
/// credential comes from the environment (`OPENAI_API_KEY`).
#[derive(Clone)]
pub struct AnswerService {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
}

impl AnswerService {
    pub fn new() -> Self {
        Self::with_model(None)
    }

    /// Model resolution order: explicit override, then `TUBEASK_MODEL`, then
    /// the built-in default.
    pub fn with_model(model: Option<String>) -> Self {
        let model = model
            .or_else(|| env::var(MODEL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Self {
            client: async_openai::Client::new(),
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn ask(&self, transcript: &str, question: &str) -> Result<String> {
        self.complete(prompt::question_prompt(transcript, question))
            .await
    }

    pub async fn summarize(&self, transcript: &str) -> Result<String> {
        self.complete(prompt::summary_prompt(transcript)).await
    }

    async fn complete(&self, user_prompt: String) -> Result<String> {
        let request = CreateResponseArgs::default()
            .max_output_tokens(MAX_OUTPUT_TOKENS)
            .model(self.model.as_str())
            .input(InputParam::Items(vec![
                InputItem::EasyMessage(
                    EasyInputMessageArgs::default()
                        .role(Role::System)
                        .content(prompt::SYSTEM_PROMPT)
                        .build()?,
                ),
                InputItem::EasyMessage(
                    EasyInputMessageArgs::default()
                        .role(Role::User)
                        .content(user_prompt)
                        .build()?,
                ),
            ]))
            .build()?;

        let response = self.client.responses().create(request).await?;

        let mut content = String::new();
        for output in response.output {
            if let OutputItem::Message(message) = output {
                for part in message.content {
                    match part {
                        OutputMessageContent::OutputText(text) => content.push_str(&text.text),
                        // Refusals and other content kinds have no text to show.
                        _ => continue,
                    }
                }
            }
        }

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::AnswerService;

    #[test]
    fn explicit_model_override_wins() {
        let service = AnswerService::with_model(Some("gpt-test".to_string()));
        assert_eq!(service.model(), "gpt-test");
    }
}
