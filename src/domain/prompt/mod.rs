//! Prompt templates with `{name}` placeholders

mod template;

pub use template::{render_template, PromptTemplate, TemplateError, RAG_PROMPT_TEMPLATE};
