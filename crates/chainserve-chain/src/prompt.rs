//! Prompt assemblers and the input types they accept.
//!
//! An assembler is a pure function from caller input to the ordered message
//! list sent to the model. Inputs are passed through as given: an empty topic
//! or sentence is rendered as-is, and rejecting it is the caller's business.

use chainserve_core::ChatMessage;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::schema::{messages_schema, object_schema, string_property, InputSchema};

/// Instruction asking for a short explanation of a topic.
pub const TOPIC_TEMPLATE: &str = "{topic} 에 대하여 간략히 설명해 줘.";

/// Persona and response-language directive for the conversational pipeline.
pub const CHAT_SYSTEM_PROMPT: &str =
    "You are a helpful AI Assistant. Your name is '테디'. You must answer in Korean.";

/// Instruction asking for a translation into Korean.
pub const TRANSLATE_TEMPLATE: &str = "Translate following sentences into Korean:\n{input}";

/// Turns caller input into a model-ready message list.
pub trait PromptAssembler: Send + Sync + 'static {
    type Input: DeserializeOwned + InputSchema + Send + 'static;

    fn assemble(&self, input: Self::Input) -> Vec<ChatMessage>;
}

/// A single-variable prompt template rendered as one human message.
///
/// The placeholder is substituted in the template only, so braces inside the
/// substituted value are never interpreted.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
    placeholder: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>, variable: &str) -> Self {
        Self {
            template: template.into(),
            placeholder: format!("{{{variable}}}"),
        }
    }

    pub fn render(&self, value: &str) -> String {
        self.template.replace(&self.placeholder, value)
    }
}

// === Input types ===

/// Input for the topic-explanation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicInput {
    pub topic: String,
}

impl InputSchema for TopicInput {
    fn input_schema() -> Value {
        object_schema("PromptInput", &[("topic", string_property("Topic"))])
    }
}

/// Input for the conversational pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatInput {
    pub messages: Vec<ChatMessage>,
}

impl InputSchema for ChatInput {
    fn input_schema() -> Value {
        let mut schema = object_schema("InputChat", &[("messages", messages_schema("Messages"))]);
        schema["description"] = json!("Input for the chat endpoint.");
        schema["properties"]["messages"]["description"] =
            json!("The chat messages representing the current conversation.");
        schema
    }
}

/// Input for the translation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateInput {
    pub input: String,
}

impl InputSchema for TranslateInput {
    fn input_schema() -> Value {
        object_schema("TranslateInput", &[("input", string_property("Input"))])
    }
}

/// Raw model input: a bare string or a list of messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LanguageModelInput {
    Text(String),
    Messages(Vec<ChatMessage>),
}

impl InputSchema for LanguageModelInput {
    fn input_schema() -> Value {
        json!({
            "title": "ChatOllamaInput",
            "anyOf": [
                { "type": "string" },
                messages_schema("Messages"),
            ]
        })
    }
}

// === Assemblers ===

/// Renders "explain {topic} briefly".
#[derive(Debug, Clone)]
pub struct TopicPrompt {
    template: PromptTemplate,
}

impl TopicPrompt {
    pub fn new(template: &str) -> Self {
        Self { template: PromptTemplate::new(template, "topic") }
    }
}

impl Default for TopicPrompt {
    fn default() -> Self {
        Self::new(TOPIC_TEMPLATE)
    }
}

impl PromptAssembler for TopicPrompt {
    type Input = TopicInput;

    fn assemble(&self, input: TopicInput) -> Vec<ChatMessage> {
        vec![ChatMessage::human(self.template.render(&input.topic))]
    }
}

/// Prepends a fixed system preamble to the caller's conversation.
#[derive(Debug, Clone)]
pub struct ChatPrompt {
    system: String,
}

impl ChatPrompt {
    pub fn new(system: impl Into<String>) -> Self {
        Self { system: system.into() }
    }
}

impl Default for ChatPrompt {
    fn default() -> Self {
        Self::new(CHAT_SYSTEM_PROMPT)
    }
}

impl PromptAssembler for ChatPrompt {
    type Input = ChatInput;

    fn assemble(&self, input: ChatInput) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(input.messages.len() + 1);
        messages.push(ChatMessage::system(self.system.clone()));
        messages.extend(input.messages);
        messages
    }
}

/// Renders a translation instruction followed by the sentence.
#[derive(Debug, Clone)]
pub struct TranslatePrompt {
    template: PromptTemplate,
}

impl TranslatePrompt {
    pub fn new(template: &str) -> Self {
        Self { template: PromptTemplate::new(template, "input") }
    }
}

impl Default for TranslatePrompt {
    fn default() -> Self {
        Self::new(TRANSLATE_TEMPLATE)
    }
}

impl PromptAssembler for TranslatePrompt {
    type Input = TranslateInput;

    fn assemble(&self, input: TranslateInput) -> Vec<ChatMessage> {
        vec![ChatMessage::human(self.template.render(&input.input))]
    }
}

/// Hands raw model input straight to the model.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl PromptAssembler for Passthrough {
    type Input = LanguageModelInput;

    fn assemble(&self, input: LanguageModelInput) -> Vec<ChatMessage> {
        match input {
            LanguageModelInput::Text(text) => vec![ChatMessage::human(text)],
            LanguageModelInput::Messages(messages) => messages,
        }
    }
}
