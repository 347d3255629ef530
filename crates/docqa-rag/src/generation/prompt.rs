//! Prompt template for context-grounded answers

/// Separator placed between retrieved chunks
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// Prompt builder for document questions
pub struct PromptBuilder;

impl PromptBuilder {
    /// Join retrieved chunks into one context block
    pub fn build_context<S: AsRef<str>>(chunks: &[S]) -> String {
        chunks
            .iter()
            .map(|c| c.as_ref())
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR)
    }

    /// Build the question-answering prompt
    pub fn build_qa_prompt(question: &str, context: &str) -> String {
        format!(
            r#"You are an expert assistant who answers questions based on the information provided.

CONTEXT:
{context}

INSTRUCTIONS:
- Answer the question using only the information in the CONTEXT above.
- If the information is not in the CONTEXT, say honestly that you cannot answer.
- Be concise and direct.
- Do not make up information.

QUESTION: {question}

ANSWER:"#,
            context = context,
            question = question
        )
    }
}
