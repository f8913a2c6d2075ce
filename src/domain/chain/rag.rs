//! Retrieval-augmented question answering chain

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use super::output::{OutputParser, StrOutputParser};
use crate::domain::knowledge_base::{Document, Retriever};
use crate::domain::llm::ChatModel;
use crate::domain::prompt::{PromptTemplate, RAG_PROMPT_TEMPLATE};
use crate::domain::DomainError;

/// Join page contents with a blank line between documents
pub fn format_documents(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|d| d.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Answer plus the documents that grounded it
#[derive(Debug, Clone)]
pub struct RagAnswer<T = String> {
    pub question: String,
    pub answer: T,
    pub sources: Vec<Document>,
}

/// Retrieve → format → render prompt → invoke model → parse output.
///
/// The rendered prompt is sent as a single user message. The template must
/// declare `context` and `question` placeholders.
pub struct RagChain<P = StrOutputParser> {
    retriever: Arc<dyn Retriever>,
    prompt: PromptTemplate,
    model: ChatModel,
    parser: P,
}

impl<P> std::fmt::Debug for RagChain<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RagChain")
            .field("deployment", &self.model.deployment())
            .field("variables", &self.prompt.variables())
            .finish()
    }
}

impl RagChain<StrOutputParser> {
    /// Chain with the default QA template and a plain-text parser
    pub fn new(retriever: Arc<dyn Retriever>, model: ChatModel) -> Result<Self, DomainError> {
        let prompt = PromptTemplate::parse(RAG_PROMPT_TEMPLATE)?;
        Self::with_parts(retriever, prompt, model, StrOutputParser)
    }
}

impl<P: OutputParser> RagChain<P> {
    pub fn with_parts(
        retriever: Arc<dyn Retriever>,
        prompt: PromptTemplate,
        model: ChatModel,
        parser: P,
    ) -> Result<Self, DomainError> {
        for required in ["context", "question"] {
            if !prompt.variables().iter().any(|v| v == required) {
                return Err(DomainError::validation(format!(
                    "RAG prompt template must contain a {{{}}} placeholder",
                    required
                )));
            }
        }

        Ok(Self {
            retriever,
            prompt,
            model,
            parser,
        })
    }

    pub fn prompt(&self) -> &PromptTemplate {
        &self.prompt
    }

    /// Run a question through the chain and return the parsed answer
    pub async fn invoke(&self, question: &str) -> Result<P::Output, DomainError> {
        Ok(self.invoke_with_sources(question).await?.answer)
    }

    /// Like `invoke`, also returning the retrieved documents
    pub async fn invoke_with_sources(
        &self,
        question: &str,
    ) -> Result<RagAnswer<P::Output>, DomainError> {
        let start = Instant::now();

        let sources = self.retriever.retrieve(question).await?;
        let context = format_documents(&sources);

        debug!(
            documents = sources.len(),
            context_chars = context.chars().count(),
            "Formatted retrieval context"
        );

        let values = HashMap::from([
            ("context".to_string(), context),
            ("question".to_string(), question.to_string()),
        ]);
        let prompt = self.prompt.render(&values)?;

        let response = self.model.invoke(&prompt).await?;
        let answer = self.parser.parse(&response)?;

        info!(
            deployment = %self.model.deployment(),
            sources = sources.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "RAG chain completed"
        );

        Ok(RagAnswer {
            question: question.to_string(),
            answer,
            sources,
        })
    }
}
