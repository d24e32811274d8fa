//! The fixed RAG prompt template and its input rendering.

use crate::domain::llm::Message;
use crate::domain::retrieval::RetrievedDocument;

/// Prompt template for knowledge-base answers. Placeholders: `{context}`,
/// `{chatHistory}`, `{question}`.
pub const SYSTEM_TEMPLATE: &str = r#"Answer the user's question based on the context below.
Present your answer in a structured Markdown format.

If the context doesn't contain any relevant information to the question, don't make something up and just say "I don't know":

<context>
{context}
</context>

<chat_history>
{chatHistory}
</chat_history>

<question>
{question}
</question>

Answer:
"#;

/// Render each message as `"{role}: {content}"`, newline-joined, preserving
/// conversation order.
pub fn serialize_messages(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|message| format!("{}: {}", message.role, message.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Concatenate document contents, one per paragraph, in their current order.
pub fn format_documents(documents: &[RetrievedDocument]) -> String {
    documents
        .iter()
        .map(|document| document.page_content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Substitute the three placeholders into the template.
pub fn render_prompt(context: &str, chat_history: &str, question: &str) -> String {
    SYSTEM_TEMPLATE
        .replace("{context}", context)
        .replace("{chatHistory}", chat_history)
        .replace("{question}", question)
}
