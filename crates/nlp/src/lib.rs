//! AI Engine NLP handlers
//!
//! Entity grouping, keyword ranking and summary length policy over
//! pluggable model backends

pub mod entities;
pub mod export;
pub mod keywords;
pub mod stopwords;
pub mod summarize;

pub use entities::{
    group_entities, EntityExtractor, EntityFormat, EntityLabel, EntityOptions, EntityRecognizer,
    EntitySpan, EntityText, GroupedEntities, RuleBasedRecognizer,
};
pub use export::Export;
pub use keywords::{
    rank_keywords, KeywordExport, KeywordExtractor, ScoredKeyword, TermScorer, TfidfScorer, DEFAULT_TOP_K,
};
pub use summarize::{
    count_tokens, SummaryExport, SummaryLength, SummaryModel, SummaryResult, Summarizer,
    MIN_SUMMARY_LENGTH,
};
