//! Output parsers turning a chat response into a value

use std::fmt::Debug;

use crate::domain::llm::LlmResponse;
use crate::domain::DomainError;

pub trait OutputParser: Send + Sync + Debug {
    type Output;

    fn parse(&self, response: &LlmResponse) -> Result<Self::Output, DomainError>;
}

/// Returns the assistant text unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct StrOutputParser;

impl OutputParser for StrOutputParser {
    type Output = String;

    fn parse(&self, response: &LlmResponse) -> Result<String, DomainError> {
        Ok(response.content().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::Message;

    #[test]
    fn test_str_output_parser() {
        let response = LlmResponse::new(
            "id".to_string(),
            "gpt-4o".to_string(),
            Message::assistant("Employees get 25 vacation days."),
        );

        let parsed = StrOutputParser.parse(&response).unwrap();
        assert_eq!(parsed, "Employees get 25 vacation days.");
    }

    #[test]
    fn test_str_output_parser_empty_content() {
        let response =
            LlmResponse::new("id".to_string(), "gpt-4o".to_string(), Message::assistant(""));

        assert_eq!(StrOutputParser.parse(&response).unwrap(), "");
    }
}
