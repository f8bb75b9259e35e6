//! OpenAI chat-completion summarization backend.

use super::Summarizer;
use crate::config::{Prompts, SummarizationSettings};
use crate::error::{Result, SummarizationError};
use crate::openai::create_client_with;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

/// Summarizer backed by an OpenAI-compatible chat model.
pub struct OpenAiSummarizer {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    language: String,
    max_tokens: u32,
    temperature: f32,
    prompts: Prompts,
}

impl OpenAiSummarizer {
    /// Create a summarizer from settings, prompts and a resolved API key.
    pub fn from_settings(
        settings: &SummarizationSettings,
        prompts: Prompts,
        api_key: &str,
    ) -> Result<Self> {
        let client = create_client_with(
            api_key,
            Some(settings.api_base.as_str()),
            Duration::from_secs(settings.timeout_seconds),
        )?;

        Ok(Self {
            client,
            model: settings.model.clone(),
            language: settings.language.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            prompts,
        })
    }

    /// Fill the user prompt with the target language and text.
    fn render_user_prompt(&self, text: &str) -> String {
        let mut vars = HashMap::new();
        vars.insert("language".to_string(), self.language.clone());
        vars.insert("text".to_string(), text.to_string());
        self.prompts
            .render_with_custom(&self.prompts.summarize.user, &vars)
    }

    fn build_messages(&self, text: &str) -> Result<Vec<ChatCompletionRequestMessage>> {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::with_capacity(2);

        if !self.prompts.summarize.system.trim().is_empty() {
            messages.push(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(self.prompts.summarize.system.clone())
                    .build()
                    .map_err(|e| SummarizationError::request("failed to build request", e))?
                    .into(),
            );
        }

        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(self.render_user_prompt(text))
                .build()
                .map_err(|e| SummarizationError::request("failed to build request", e))?
                .into(),
        );

        Ok(messages)
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    #[instrument(skip(self, text), fields(model = %self.model, chars = text.len()))]
    async fn summarize_one(&self, text: &str) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(self.build_messages(text)?)
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .build()
            .map_err(|e| SummarizationError::request("failed to build request", e))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            SummarizationError::request(format!("{} request failed: {}", self.model, e), e)
        })?;

        let summary = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(SummarizationError::EmptyResponse)?
            .to_string();

        debug!("Summarized {} chars into {} chars", text.len(), summary.len());
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summarizer(prompts: Prompts) -> OpenAiSummarizer {
        OpenAiSummarizer::from_settings(&SummarizationSettings::default(), prompts, "sk-test")
            .unwrap()
    }

    #[test]
    fn test_prompt_embeds_language_and_text() {
        let summarizer = summarizer(Prompts::default());
        let prompt = summarizer.render_user_prompt("the lecture text");
        assert_eq!(
            prompt,
            "Summarize the following text in Hebrew with bullet points:\n\nthe lecture text"
        );
    }

    #[test]
    fn test_transcript_placeholders_reach_backend_verbatim() {
        let summarizer = summarizer(Prompts::default());
        for _ in 0..64 {
            let prompt = summarizer.render_user_prompt("the slide said {{language}} here");
            assert!(prompt.ends_with("\n\nthe slide said {{language}} here"));
        }
    }

    #[test]
    fn test_no_system_message_by_default() {
        let summarizer = summarizer(Prompts::default());
        let messages = summarizer.build_messages("text").unwrap();
        assert_eq!(messages.len(), 1);
        assert!(matches!(messages[0], ChatCompletionRequestMessage::User(_)));
    }

    #[test]
    fn test_custom_system_message_is_sent_first() {
        let mut prompts = Prompts::default();
        prompts.summarize.system = "You write study notes.".to_string();
        let messages = summarizer(prompts).build_messages("text").unwrap();
        assert_eq!(messages.len(), 2);
        assert!(matches!(messages[0], ChatCompletionRequestMessage::System(_)));
    }
}
