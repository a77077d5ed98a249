//! The pipelines served by chainserve, all sharing one model handle.

use std::sync::Arc;

use chainserve_llm::ChatModel;

use crate::pipeline::Pipeline;
use crate::prompt::{ChatPrompt, Passthrough, TopicPrompt, TranslatePrompt};

/// Explains a topic briefly.
pub fn topic_chain(model: Arc<dyn ChatModel>) -> Pipeline<TopicPrompt> {
    Pipeline::new("prompt", TopicPrompt::default(), model)
}

/// Converses as the Korean-speaking assistant persona.
pub fn chat_chain(model: Arc<dyn ChatModel>) -> Pipeline<ChatPrompt> {
    Pipeline::new("chat", ChatPrompt::default(), model)
}

/// Translates sentences into Korean.
pub fn translate_chain(model: Arc<dyn ChatModel>) -> Pipeline<TranslatePrompt> {
    Pipeline::new("translate", TranslatePrompt::default(), model)
}

/// Direct model access without any prompt assembly.
pub fn llm_chain(model: Arc<dyn ChatModel>) -> Pipeline<Passthrough> {
    Pipeline::new("llm", Passthrough, model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{ChatInput, LanguageModelInput, TopicInput, TranslateInput, CHAT_SYSTEM_PROMPT};
    use chainserve_core::ChatMessage;
    use chainserve_llm::mock::MockChatModel;

    #[tokio::test]
    async fn topic_chain_answers_without_persona() {
        let model = Arc::new(MockChatModel::fixed("짧은 설명입니다."));
        let out = topic_chain(model.clone())
            .invoke(TopicInput { topic: "LangChain".into() })
            .await
            .unwrap();

        assert!(!out.is_empty());
        let prompt = &model.calls()[0];
        assert!(prompt.iter().all(|m| !matches!(m, ChatMessage::System { .. })));
    }

    #[test]
    fn chat_chain_renders_persona_then_conversation() {
        let chain = chat_chain(Arc::new(MockChatModel::echo()));
        let conversation = vec![ChatMessage::human("안녕"), ChatMessage::ai("반가워요"), ChatMessage::human("넌 누구야?")];

        let prompt = chain.render(ChatInput { messages: conversation.clone() });

        assert_eq!(prompt[0], ChatMessage::system(CHAT_SYSTEM_PROMPT));
        assert_eq!(prompt.iter().filter(|m| m.content() == CHAT_SYSTEM_PROMPT).count(), 1);
        assert_eq!(&prompt[1..], conversation.as_slice());
    }

    #[test]
    fn translate_chain_contains_prefix_and_sentence() {
        let chain = translate_chain(Arc::new(MockChatModel::echo()));
        let prompt = chain.render(TranslateInput { input: "I love Rust.".into() });

        assert_eq!(
            prompt,
            vec![ChatMessage::human("Translate following sentences into Korean:\nI love Rust.")]
        );
    }

    #[test]
    fn llm_chain_adds_nothing() {
        let chain = llm_chain(Arc::new(MockChatModel::echo()));
        let prompt = chain.render(LanguageModelInput::Text("raw".into()));
        assert_eq!(prompt, vec![ChatMessage::human("raw")]);
    }
}
