//! Fixed instruction text and prompt rendering.

use docqa_core::RetrievalResult;

/// The exact sentence the model is told to produce when the context lacks the answer.
pub const REFUSAL: &str = "Sorry, I am unable to answer your question with the information available to me";

pub const SYSTEM_INSTRUCTIONS: &str = "You are an AI-driven bot. Your task is to answer queries based on the provided documents. \
Your responses should strictly adhere to the information presented in the documents. \
Your responses must be brief and direct. Do not engage with abusive queries. \
Please provide concise yet comprehensive answers.\n\
Don't justify your answers. Don't give information not mentioned in the CONTEXT INFORMATION. \
If the answer is not in the context, say the words \"Sorry, I am unable to answer your question with the information available to me\"";

/// Hit contents in rank order, separated by blank lines.
pub fn render_context(result: &RetrievalResult) -> String {
    result.units().map(|u| u.content.as_str()).collect::<Vec<_>>().join("\n\n")
}

pub fn render_prompt(instructions: &str, context: &str, question: &str) -> String {
    format!("{instructions}\n\nQuery: {question}\n\nContext:\n{context}\n\nAnswer:\n")
}

fn is_wrapping(c: char) -> bool {
    c.is_whitespace() || matches!(c, '"' | '\'' | '\u{201c}' | '\u{201d}' | '`')
}

// Strips quotes and trailing punctuation in any nesting, e.g. `"...".`
fn normalize(text: &str) -> String {
    let mut current = text;
    loop {
        let next = current
            .trim_matches(is_wrapping)
            .trim_end_matches(|c: char| is_wrapping(c) || matches!(c, '.' | '!' | '?'));
        if next.len() == current.len() {
            break;
        }
        current = next;
    }
    current.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// True when `text` is the refusal sentence, ignoring case, quoting, and trailing punctuation.
pub fn is_refusal(text: &str) -> bool {
    normalize(text) == normalize(REFUSAL)
}
