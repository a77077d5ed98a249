use chainserve_core::ChainError;
use chainserve_llm::ModelResponse;

/// Extracts the text payload of a model response.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrOutputParser;

impl StrOutputParser {
    pub fn parse(&self, response: ModelResponse) -> Result<String, ChainError> {
        response.content.ok_or_else(|| {
            ChainError::MalformedResponse(format!("{} returned no message content", response.model))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_text_unchanged() {
        let out = StrOutputParser.parse(ModelResponse::text("m", "  spaced\n")).unwrap();
        assert_eq!(out, "  spaced\n");
    }

    #[test]
    fn empty_string_is_still_text() {
        assert_eq!(StrOutputParser.parse(ModelResponse::text("m", "")).unwrap(), "");
    }

    #[test]
    fn missing_payload_is_malformed() {
        let response = ModelResponse { model: "m".into(), ..Default::default() };
        let err = StrOutputParser.parse(response).unwrap_err();
        assert!(matches!(err, ChainError::MalformedResponse(_)));
    }
}
