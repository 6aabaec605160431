use super::types::AnswerResult;

/// Renders the user-facing reply: the answer, a blank line, then one
/// numbered reference per citation with its confidence percentage.
pub fn format_reply(result: &AnswerResult) -> String {
    let mut reply = format!("{}\n\nReferences:\n", result.response_text);
    for (idx, citation) in result.cited_passages.iter().enumerate() {
        reply.push_str(&format!(
            "{}. {} (Confidence: {:.1}%)\n",
            idx + 1,
            citation.excerpt,
            citation.certainty * 100.0
        ));
    }
    reply
}
