//! Pipeline composition and the type-erased [`Runnable`] interface.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chainserve_core::{ChainError, ChatMessage};
use chainserve_llm::{ChatModel, TextStream};
use futures::future::try_join_all;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::parser::StrOutputParser;
use crate::prompt::PromptAssembler;
use crate::schema::InputSchema;

/// A pipeline callable with untyped JSON input.
///
/// Converting the JSON into the pipeline's input type is the validation step:
/// a value that does not fit fails with [`ChainError::InvalidInput`] and the
/// model is never called.
#[async_trait]
pub trait Runnable: Send + Sync {
    /// Short name used in schema titles and logs.
    fn name(&self) -> &str;

    /// JSON Schema of the accepted input.
    fn input_schema(&self) -> Value;

    /// JSON Schema of the produced output.
    fn output_schema(&self) -> Value {
        json!({ "title": format!("{}Output", title_case(self.name())), "type": "string" })
    }

    /// JSON Schema of the per-request config. Pipelines expose no configurable fields.
    fn config_schema(&self) -> Value {
        json!({
            "title": format!("{}Config", title_case(self.name())),
            "type": "object",
            "properties": {},
        })
    }

    /// Checks that `input` fits the pipeline without running it.
    fn validate(&self, input: &Value) -> Result<(), ChainError>;

    async fn invoke(&self, input: Value) -> Result<String, ChainError>;

    /// Runs several inputs concurrently; outputs keep input order.
    ///
    /// Every input is validated before any model call is made.
    async fn batch(&self, inputs: Vec<Value>) -> Result<Vec<String>, ChainError>;

    async fn stream(&self, input: Value) -> Result<TextStream, ChainError>;
}

/// Assembler → model → parser, exposed as a single unit.
pub struct Pipeline<A> {
    name: String,
    assembler: A,
    model: Arc<dyn ChatModel>,
    parser: StrOutputParser,
}

impl<A: PromptAssembler> Pipeline<A> {
    pub fn new(name: impl Into<String>, assembler: A, model: Arc<dyn ChatModel>) -> Self {
        Self {
            name: name.into(),
            assembler,
            model,
            parser: StrOutputParser,
        }
    }

    /// Builds the prompt for `input` without calling the model.
    pub fn render(&self, input: A::Input) -> Vec<ChatMessage> {
        self.assembler.assemble(input)
    }

    /// Runs the pipeline to completion.
    pub async fn invoke(&self, input: A::Input) -> Result<String, ChainError> {
        let start = Instant::now();
        let messages = self.render(input);
        debug!("{}: sending {} messages to {}", self.name, messages.len(), self.model.model());

        let response = self.model.generate(&messages).await?;
        let output = self.parser.parse(response)?;

        info!(
            "{}: {}ms, {} chars",
            self.name,
            start.elapsed().as_millis(),
            output.chars().count()
        );
        Ok(output)
    }

    /// Runs the pipeline, yielding text as the model produces it.
    pub async fn stream(&self, input: A::Input) -> Result<TextStream, ChainError> {
        let messages = self.render(input);
        debug!("{}: streaming {} messages from {}", self.name, messages.len(), self.model.model());
        self.model.stream(&messages).await
    }

    fn parse_input(value: Value) -> Result<A::Input, ChainError> {
        Ok(serde_json::from_value(value)?)
    }
}

#[async_trait]
impl<A: PromptAssembler> Runnable for Pipeline<A> {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_schema(&self) -> Value {
        A::Input::input_schema()
    }

    fn validate(&self, input: &Value) -> Result<(), ChainError> {
        Self::parse_input(input.clone()).map(|_| ())
    }

    async fn invoke(&self, input: Value) -> Result<String, ChainError> {
        let input = Self::parse_input(input)?;
        Pipeline::invoke(self, input).await
    }

    async fn batch(&self, inputs: Vec<Value>) -> Result<Vec<String>, ChainError> {
        let parsed = inputs
            .into_iter()
            .map(Self::parse_input)
            .collect::<Result<Vec<_>, _>>()?;

        info!("{}: batch of {}", self.name, parsed.len());
        try_join_all(parsed.into_iter().map(|input| Pipeline::invoke(self, input))).await
    }

    async fn stream(&self, input: Value) -> Result<TextStream, ChainError> {
        let input = Self::parse_input(input)?;
        Pipeline::stream(self, input).await
    }
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{ChatPrompt, TopicPrompt, TranslatePrompt, CHAT_SYSTEM_PROMPT};
    use chainserve_llm::mock::MockChatModel;
    use futures::StreamExt;

    fn topic(model: Arc<MockChatModel>) -> Pipeline<TopicPrompt> {
        Pipeline::new("prompt", TopicPrompt::default(), model)
    }

    #[tokio::test]
    async fn invoke_runs_assembler_model_and_parser() {
        let model = Arc::new(MockChatModel::fixed("Rust is a systems language."));
        let chain = topic(model.clone());

        let out = Runnable::invoke(&chain, json!({"topic": "Rust"})).await.unwrap();

        assert_eq!(out, "Rust is a systems language.");
        let calls = model.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], vec![ChatMessage::human("Rust 에 대하여 간략히 설명해 줘.")]);
        assert!(calls[0].iter().all(|m| m.content() != CHAT_SYSTEM_PROMPT));
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_model() {
        let model = Arc::new(MockChatModel::echo());
        let chain = Pipeline::new("translate", TranslatePrompt::default(), model.clone());

        let err = Runnable::invoke(&chain, json!({"text": "hello"})).await.unwrap_err();
        assert!(matches!(err, ChainError::InvalidInput(_)));

        let err = Runnable::invoke(&chain, json!({"input": 42})).await.unwrap_err();
        assert!(matches!(err, ChainError::InvalidInput(_)));

        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn batch_keeps_order() {
        let model = Arc::new(MockChatModel::echo());
        let chain = Pipeline::new("translate", TranslatePrompt::new("{input}"), model.clone());

        let out = chain
            .batch(vec![json!({"input": "one"}), json!({"input": "two"}), json!({"input": "three"})])
            .await
            .unwrap();

        assert_eq!(out, vec!["one", "two", "three"]);
        assert_eq!(model.call_count(), 3);
    }

    #[tokio::test]
    async fn batch_validates_everything_first() {
        let model = Arc::new(MockChatModel::echo());
        let chain = topic(model.clone());

        let err = chain
            .batch(vec![json!({"topic": "ok"}), json!({"nope": true})])
            .await
            .unwrap_err();

        assert!(matches!(err, ChainError::InvalidInput(_)));
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn model_errors_propagate() {
        let model = Arc::new(MockChatModel::failing(ChainError::ModelTimeout("slow".into())));
        let chain = topic(model);

        let err = Runnable::invoke(&chain, json!({"topic": "x"})).await.unwrap_err();
        assert_eq!(err, ChainError::ModelTimeout("slow".into()));
    }

    #[tokio::test]
    async fn stream_yields_model_chunks() {
        let model = Arc::new(MockChatModel::fixed("안녕 하세요 테디입니다"));
        let chain = Pipeline::new("chat", ChatPrompt::default(), model.clone());

        let stream = Runnable::stream(&chain, json!({"messages": [{"type": "human", "content": "hi"}]}))
            .await
            .unwrap();
        let text: String = stream.map(|c| c.unwrap()).collect::<Vec<_>>().await.concat();

        assert_eq!(text, "안녕 하세요 테디입니다");
        assert_eq!(model.calls()[0][0], ChatMessage::system(CHAT_SYSTEM_PROMPT));
    }

    #[test]
    fn schemas_are_titled_by_name() {
        let chain = topic(Arc::new(MockChatModel::echo()));
        assert_eq!(chain.output_schema(), json!({"title": "PromptOutput", "type": "string"}));
        assert_eq!(chain.config_schema()["title"], "PromptConfig");
        assert_eq!(chain.input_schema()["title"], "PromptInput");
    }
}
