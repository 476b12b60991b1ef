//! Named-entity extraction
//!
//! A recognizer reports raw spans; the extractor trims, filters, de-duplicates
//! and groups them, and renders the grouping as JSON or CSV.

mod label;
mod rules;

pub use label::EntityLabel;
pub use rules::RuleBasedRecognizer;

use aiengine_common::{AiEngineError, Result};
use async_trait::async_trait;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::export::Export;

/// One entity occurrence reported by a recognizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    /// Surface text
    pub text: String,

    /// Category code
    pub label: EntityLabel,
}

impl EntitySpan {
    pub fn new(text: impl Into<String>, label: impl Into<EntityLabel>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// Entity recognition model
#[async_trait]
pub trait EntityRecognizer: Send + Sync {
    /// Report entity spans in order of occurrence
    async fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>>;

    /// Short backend name for logs and health output
    fn name(&self) -> &str;
}

/// Filtering options for one extraction request
#[derive(Debug, Clone, Default)]
pub struct EntityOptions {
    /// Restrict output to these codes; `None` or an empty list keeps every code
    pub labels: Option<Vec<String>>,

    /// Drop repeated `(lowercased text, code)` pairs
    pub unique: bool,
}

impl EntityOptions {
    fn allows(&self, label: &EntityLabel) -> bool {
        match &self.labels {
            Some(labels) if !labels.is_empty() => labels.iter().any(|l| l == label.code()),
            _ => true,
        }
    }
}

/// Single entity record inside a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityText {
    pub text: String,
}

/// Entities grouped by category, in first-seen order
///
/// Serializes as a JSON object keyed by category code. Key order follows the
/// first occurrence of each category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedEntities {
    groups: Vec<(EntityLabel, Vec<EntityText>)>,
}

impl GroupedEntities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to its category's group, creating the group if needed
    pub fn push(&mut self, label: EntityLabel, text: String) {
        match self.groups.iter_mut().find(|(l, _)| *l == label) {
            Some((_, items)) => items.push(EntityText { text }),
            None => self.groups.push((label, vec![EntityText { text }])),
        }
    }

    pub fn get(&self, label: &EntityLabel) -> Option<&[EntityText]> {
        self.groups
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, items)| items.as_slice())
    }

    pub fn groups(&self) -> impl Iterator<Item = (&EntityLabel, &[EntityText])> {
        self.groups.iter().map(|(l, items)| (l, items.as_slice()))
    }

    /// Iterate `(label, text)` in group-then-insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&EntityLabel, &str)> {
        self.groups
            .iter()
            .flat_map(|(l, items)| items.iter().map(move |e| (l, e.text.as_str())))
    }

    /// Total number of entity records
    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, items)| items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Serialize for GroupedEntities {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (label, items) in &self.groups {
            map.serialize_entry(label.code(), items)?;
        }
        map.end()
    }
}

/// Trim, filter, de-duplicate and group raw spans
pub fn group_entities(spans: Vec<EntitySpan>, options: &EntityOptions) -> GroupedEntities {
    let mut grouped = GroupedEntities::new();
    let mut seen: HashSet<(String, EntityLabel)> = HashSet::new();

    for span in spans {
        if !options.allows(&span.label) {
            continue;
        }

        let text = span.text.trim();
        if text.is_empty() {
            continue;
        }

        if options.unique && !seen.insert((text.to_lowercase(), span.label.clone())) {
            continue;
        }

        grouped.push(span.label, text.to_string());
    }

    grouped
}

/// Output format for entity extraction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityFormat {
    #[default]
    Json,
    Csv,
}

/// Entity extraction handler
#[derive(Clone)]
pub struct EntityExtractor {
    recognizer: Arc<dyn EntityRecognizer>,
}

impl EntityExtractor {
    /// Create a new extractor over a recognizer
    pub fn new(recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self { recognizer }
    }

    pub fn backend_name(&self) -> &str {
        self.recognizer.name()
    }

    /// Run the recognizer and group its spans
    pub async fn extract(&self, text: &str, options: &EntityOptions) -> Result<GroupedEntities> {
        debug!(
            "Entity extraction - Text length: {} | Labels: {:?} | Unique: {}",
            text.len(),
            options.labels,
            options.unique
        );

        if text.trim().is_empty() {
            warn!("Empty text content received");
            return Err(AiEngineError::invalid_input("Text content is empty."));
        }

        let spans = self.recognizer.recognize(text).await?;
        let grouped = group_entities(spans, options);

        info!(
            "Extracted {} entities in {} categories ({})",
            grouped.len(),
            grouped.groups.len(),
            self.recognizer.name()
        );

        Ok(grouped)
    }

    /// Render a grouping in the requested format
    pub fn render(grouped: &GroupedEntities, format: EntityFormat) -> Result<Export> {
        match format {
            EntityFormat::Json => Export::json(grouped),
            EntityFormat::Csv => Export::csv(
                "entities.csv",
                &["label", "text"],
                grouped.iter().map(|(label, text)| [label.display_name(), text]),
            ),
        }
    }
}
