//! Keyword extraction by TF-IDF ranking

use aiengine_common::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::export::Export;
use crate::stopwords::is_stop_word;

/// Default number of keywords returned
pub const DEFAULT_TOP_K: usize = 10;

/// Tokens of two or more word characters
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// A term and its relevance score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredKeyword {
    pub keyword: String,
    pub score: f64,
}

/// Term scoring model
pub trait TermScorer: Send + Sync {
    /// Score every distinct term of `text`, in vocabulary order
    fn score(&self, text: &str) -> Result<Vec<ScoredKeyword>>;
}

/// TF-IDF over a corpus consisting of the single input document
///
/// With one document every term has document frequency 1, so the smoothed
/// IDF `ln((1 + n) / (1 + df)) + 1` is exactly 1 and the score reduces to the
/// L2-normalised term frequency.
#[derive(Debug, Default, Clone)]
pub struct TfidfScorer;

impl TfidfScorer {
    pub fn new() -> Self {
        Self
    }

    /// Lowercased tokens with stop words removed
    pub fn tokenize(text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        TOKEN_PATTERN
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|t| !is_stop_word(t))
            .map(|t| t.to_string())
            .collect()
    }
}

impl TermScorer for TfidfScorer {
    fn score(&self, text: &str) -> Result<Vec<ScoredKeyword>> {
        // BTreeMap keeps the vocabulary sorted
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for token in Self::tokenize(text) {
            *counts.entry(token).or_insert(0) += 1;
        }

        let n_docs = 1.0_f64;
        let doc_freq = 1.0_f64;
        let idf = ((1.0 + n_docs) / (1.0 + doc_freq)).ln() + 1.0;

        let weighted: Vec<(String, f64)> = counts
            .into_iter()
            .map(|(term, count)| (term, count as f64 * idf))
            .collect();

        let norm = weighted.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();

        Ok(weighted
            .into_iter()
            .map(|(keyword, w)| ScoredKeyword {
                keyword,
                score: if norm > 0.0 { w / norm } else { 0.0 },
            })
            .collect())
    }
}

/// Stable sort by descending score, then keep the first `top_k`
pub fn rank_keywords(mut scored: Vec<ScoredKeyword>, top_k: usize) -> Vec<ScoredKeyword> {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(top_k);
    scored
}

/// JSON body for keyword results
#[derive(Debug, Serialize)]
struct KeywordsResponse<'a> {
    keywords: &'a [ScoredKeyword],
}

/// Export format for keywords
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeywordExport {
    #[default]
    Json,
    Csv,
}

impl KeywordExport {
    /// Map the `export` query value; anything but `csv` is JSON
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

/// Keyword extraction handler
#[derive(Clone)]
pub struct KeywordExtractor {
    scorer: Arc<dyn TermScorer>,
}

impl KeywordExtractor {
    pub fn new(scorer: Arc<dyn TermScorer>) -> Self {
        Self { scorer }
    }

    /// Score, rank and truncate
    pub fn extract(&self, text: &str, top_k: usize) -> Result<Vec<ScoredKeyword>> {
        debug!("Keyword extraction - Text length: {} | Top K: {}", text.len(), top_k);

        let scored = self.scorer.score(text)?;
        let vocabulary = scored.len();
        let ranked = rank_keywords(scored, top_k);

        info!("Ranked {} of {} terms", ranked.len(), vocabulary);
        Ok(ranked)
    }

    /// Render keywords as JSON (`{"keywords": [...]}`) or CSV
    pub fn render(keywords: &[ScoredKeyword], format: KeywordExport) -> Result<Export> {
        match format {
            KeywordExport::Json => Export::json(&KeywordsResponse { keywords }),
            KeywordExport::Csv => Export::csv(
                "keywords.csv",
                &["Keyword", "TF-IDF Score"],
                keywords
                    .iter()
                    .map(|k| [k.keyword.clone(), format_score(k.score)]),
            ),
        }
    }
}

/// Round to 5 decimals without trailing zeros; integral values keep a `.0`
pub fn format_score(score: f64) -> String {
    if !score.is_finite() {
        return score.to_string();
    }
    let fixed = format!("{:.5}", score);
    let trimmed = fixed.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{}0", trimmed)
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_tokenize_lowercases_and_drops_stop_words() {
        let tokens = TfidfScorer::tokenize("The Rust compiler, and a borrow-checker! I x");
        assert_eq!(tokens, vec!["rust", "compiler", "borrow", "checker"]);
    }

    #[test]
    fn test_scores_are_normalised_term_frequency() {
        let scored = TfidfScorer::new().score("rust rust safe fast code").unwrap();

        let terms: Vec<&str> = scored.iter().map(|k| k.keyword.as_str()).collect();
        assert_eq!(terms, vec!["code", "fast", "rust", "safe"]);

        let sqrt7 = 7.0_f64.sqrt();
        assert!(approx(scored[2].score, 2.0 / sqrt7));
        assert!(approx(scored[0].score, 1.0 / sqrt7));

        let norm: f64 = scored.iter().map(|k| k.score * k.score).sum();
        assert!(approx(norm, 1.0));
    }

    #[test]
    fn test_empty_vocabulary() {
        assert!(TfidfScorer::new().score("").unwrap().is_empty());
        assert!(TfidfScorer::new().score("the and of").unwrap().is_empty());
    }

    #[test]
    fn test_rank_is_descending_and_stable() {
        let scored = TfidfScorer::new().score("rust rust safe fast code").unwrap();
        let ranked = rank_keywords(scored, 10);

        let terms: Vec<&str> = ranked.iter().map(|k| k.keyword.as_str()).collect();
        assert_eq!(terms, vec!["rust", "code", "fast", "safe"]);
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_top_k_bounds() {
        let extractor = KeywordExtractor::new(Arc::new(TfidfScorer::new()));
        let text = "compiler borrow checker lifetime trait compiler";

        assert!(extractor.extract(text, 0).unwrap().is_empty());

        let top3 = extractor.extract(text, 3).unwrap();
        assert_eq!(top3.len(), 3);
        assert_eq!(top3[0].keyword, "compiler");

        assert_eq!(extractor.extract(text, 100).unwrap().len(), 5);
    }

    #[test]
    fn test_json_render() {
        let keywords = vec![ScoredKeyword { keyword: "rust".to_string(), score: 1.0 }];
        let Export::Json(value) = KeywordExtractor::render(&keywords, KeywordExport::Json).unwrap() else {
            panic!("expected JSON export");
        };
        assert_eq!(
            value,
            serde_json::json!({"keywords": [{"keyword": "rust", "score": 1.0}]})
        );
    }

    #[test]
    fn test_csv_render_rounds_scores() {
        let extractor = KeywordExtractor::new(Arc::new(TfidfScorer::new()));
        let keywords = extractor.extract("rust rust safe", 10).unwrap();
        let Export::Attachment { filename, body, .. } =
            KeywordExtractor::render(&keywords, KeywordExport::Csv).unwrap()
        else {
            panic!("expected attachment");
        };

        assert_eq!(filename, "keywords.csv");
        assert_eq!(body, "Keyword,TF-IDF Score\r\nrust,0.89443\r\nsafe,0.44721\r\n");
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(1.0), "1.0");
        assert_eq!(format_score(0.0), "0.0");
        assert_eq!(format_score(0.377964473), "0.37796");
        assert_eq!(format_score(0.5), "0.5");
        assert_eq!(format_score(0.123455), "0.12345");
        assert_eq!(format_score(0.100004), "0.1");
    }

    #[test]
    fn test_export_from_query() {
        assert_eq!(KeywordExport::from_query(Some("csv")), KeywordExport::Csv);
        assert_eq!(KeywordExport::from_query(Some("txt")), KeywordExport::Json);
        assert_eq!(KeywordExport::from_query(None), KeywordExport::Json);
    }
}
