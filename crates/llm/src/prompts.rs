//! Prompt templates for summarization and entity recognition

use aiengine_nlp::EntityLabel;

/// Prompt for a bounded abstractive summary
pub fn summary_prompt(text: &str, min_words: usize, max_words: usize) -> String {
    format!(
        "Write an abstractive summary of the text below in {} to {} words. \
         Reply with the summary only, without a title or any preamble.\n\n\
         Text:\n---\n{}\n---\n\nSummary:",
        min_words, max_words, text
    )
}

/// Prompt asking for entity spans as JSON
pub fn entity_prompt(text: &str) -> String {
    let codes = EntityLabel::KNOWN
        .iter()
        .map(|l| format!("{} ({})", l.code(), l.display_name()))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Extract the named entities from the text below. Use only these labels: {}.\n\
         Return JSON of the form {{\"entities\": [{{\"text\": \"...\", \"label\": \"...\"}}]}} \
         listing every occurrence in the order it appears. Copy entity text exactly as written.\n\n\
         Text:\n---\n{}\n---",
        codes, text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_prompt_carries_bounds() {
        let prompt = summary_prompt("Rust is a language.", 5, 60);
        assert!(prompt.contains("5 to 60 words"));
        assert!(prompt.contains("Rust is a language."));
    }

    #[test]
    fn test_entity_prompt_lists_all_codes() {
        let prompt = entity_prompt("Apple Inc.");
        for label in EntityLabel::KNOWN.iter() {
            assert!(prompt.contains(label.code()));
        }
        assert!(prompt.contains("{\"entities\""));
    }
}
