//! Prompt template parsing and rendering
//!
//! Placeholders use `{name}` syntax. `{{` and `}}` render as literal braces.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

/// Matches escaped braces or a `{name}` placeholder
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{|\}\}|\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid placeholder regex")
});

/// Template used by the retrieval QA chain
pub const RAG_PROMPT_TEMPLATE: &str = "Answer the question based on the following context:

Context: {context}

Question: {question}

Answer:";

/// Template processing errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TemplateError {
    #[error("Missing required variable: {name}")]
    MissingVariable { name: String },

    #[error("Template parsing error: {message}")]
    ParseError { message: String },
}

/// A parsed prompt template
#[derive(Debug, Clone, PartialEq)]
pub struct PromptTemplate {
    content: String,
    /// Placeholder names in order of first appearance
    variables: Vec<String>,
}

impl PromptTemplate {
    /// Parse a template and collect its placeholders.
    ///
    /// Any brace left unmatched once escapes and placeholders are removed is
    /// rejected.
    pub fn parse(content: impl Into<String>) -> Result<Self, TemplateError> {
        let content = content.into();
        let mut variables = Vec::new();
        let mut seen = HashSet::new();

        for cap in TOKEN_PATTERN.captures_iter(&content) {
            if let Some(name) = cap.get(1) {
                if seen.insert(name.as_str()) {
                    variables.push(name.as_str().to_string());
                }
            }
        }

        let leftover = TOKEN_PATTERN.replace_all(&content, "");
        if let Some(pos) = leftover.find(['{', '}']) {
            return Err(TemplateError::ParseError {
                message: format!("unmatched brace near offset {} in remaining text", pos),
            });
        }

        Ok(Self { content, variables })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn has_variables(&self) -> bool {
        !self.variables.is_empty()
    }

    /// Render with the given values; every placeholder must be supplied
    pub fn render(&self, values: &HashMap<String, String>) -> Result<String, TemplateError> {
        if let Some(missing) = self.variables.iter().find(|v| !values.contains_key(*v)) {
            return Err(TemplateError::MissingVariable {
                name: missing.clone(),
            });
        }

        let rendered = TOKEN_PATTERN.replace_all(&self.content, |cap: &Captures| {
            match cap.get(1) {
                Some(name) => values[name.as_str()].clone(),
                None => cap[0][..1].to_string(),
            }
        });

        Ok(rendered.into_owned())
    }
}

/// Render a template string directly
pub fn render_template(
    template: &str,
    values: &HashMap<String, String>,
) -> Result<String, TemplateError> {
    PromptTemplate::parse(template)?.render(values)
}
