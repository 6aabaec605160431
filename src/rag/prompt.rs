use super::types::Passage;

/// Joins passage contents in retrieval order, separated by blank lines.
pub fn build_context(passages: &[Passage]) -> String {
    passages
        .iter()
        .map(|p| p.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Embeds the context block and the question into the instruction template
/// sent to the completion service.
pub fn build_prompt(query: &str, passages: &[Passage]) -> String {
    format!(
        "Based on the following context information, provide a clear and accurate \
         response to the question. Include only information that is supported by \
         the context.\n\nContext:\n{}\n\nQuestion: {}\n\nAnswer:",
        build_context(passages),
        query
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_joins_passages_with_blank_lines() {
        let passages = vec![
            Passage::new("First passage.", 0.9),
            Passage::new("Second passage.", 0.8),
        ];
        assert_eq!(
            build_context(&passages),
            "First passage.\n\nSecond passage."
        );
    }

    #[test]
    fn context_is_empty_for_no_passages() {
        assert_eq!(build_context(&[]), "");
    }

    #[test]
    fn prompt_embeds_context_and_question() {
        let passages = vec![Passage::new("Water boils at 100C.", 0.9)];
        let prompt = build_prompt("When does water boil?", &passages);

        assert!(prompt.starts_with("Based on the following context information"));
        assert!(prompt.contains("Context:\nWater boils at 100C.\n\n"));
        assert!(prompt.contains("Question: When does water boil?"));
        assert!(prompt.ends_with("Answer:"));
    }

    #[test]
    fn prompt_with_no_passages_keeps_template_shape() {
        let prompt = build_prompt("Anything?", &[]);
        assert!(prompt.contains("Context:\n\n\nQuestion: Anything?"));
    }
}
