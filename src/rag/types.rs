use serde::{Deserialize, Serialize};

/// Characters of passage content shown in a citation before truncation.
pub const EXCERPT_MAX_CHARS: usize = 100;

/// A retrieved unit of text with its relevance score.
///
/// Lives for one orchestration cycle; nothing is cached or persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passage {
    pub content: String,
    /// Relevance in `[0, 1]` as reported by the index.
    pub certainty: f64,
}

impl Passage {
    pub fn new(content: impl Into<String>, certainty: f64) -> Self {
        Self {
            content: content.into(),
            certainty: certainty.clamp(0.0, 1.0),
        }
    }
}

/// One source reference shown under an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitedPassage {
    pub excerpt: String,
    pub certainty: f64,
}

impl CitedPassage {
    /// Truncates the passage content to [`EXCERPT_MAX_CHARS`] characters,
    /// appending `...` only when something was cut off.
    pub fn from_passage(passage: &Passage) -> Self {
        let mut chars = passage.content.chars();
        let mut excerpt: String = chars.by_ref().take(EXCERPT_MAX_CHARS).collect();
        if chars.next().is_some() {
            excerpt.push_str("...");
        }

        Self {
            excerpt,
            certainty: passage.certainty,
        }
    }
}

/// The outcome of one query: the generated answer plus its citations, in
/// retrieval order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResult {
    pub response_text: String,
    pub cited_passages: Vec<CitedPassage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_content_is_kept_verbatim() {
        let passage = Passage::new("Photosynthesis converts light into energy.", 0.92);
        let cited = CitedPassage::from_passage(&passage);
        assert_eq!(cited.excerpt, "Photosynthesis converts light into energy.");
        assert!((cited.certainty - 0.92).abs() < f64::EPSILON);
    }

    #[test]
    fn exact_limit_is_not_marked_truncated() {
        let passage = Passage::new("x".repeat(EXCERPT_MAX_CHARS), 0.5);
        let cited = CitedPassage::from_passage(&passage);
        assert_eq!(cited.excerpt.chars().count(), EXCERPT_MAX_CHARS);
        assert!(!cited.excerpt.ends_with("..."));
    }

    #[test]
    fn over_limit_is_truncated_with_ellipsis() {
        let passage = Passage::new("x".repeat(EXCERPT_MAX_CHARS + 1), 0.5);
        let cited = CitedPassage::from_passage(&passage);
        assert_eq!(cited.excerpt.chars().count(), EXCERPT_MAX_CHARS + 3);
        assert!(cited.excerpt.ends_with("..."));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let passage = Passage::new("日".repeat(EXCERPT_MAX_CHARS + 5), 0.5);
        let cited = CitedPassage::from_passage(&passage);
        assert!(cited.excerpt.ends_with("..."));
        assert_eq!(
            cited.excerpt.trim_end_matches("...").chars().count(),
            EXCERPT_MAX_CHARS
        );
    }

    #[test]
    fn certainty_is_clamped_to_unit_interval() {
        assert!((Passage::new("a", 1.7).certainty - 1.0).abs() < f64::EPSILON);
        assert!(Passage::new("a", -0.2).certainty.abs() < f64::EPSILON);
    }
}
