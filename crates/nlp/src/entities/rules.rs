// Pattern and gazetteer based entity recognizer.
// Runs fully offline and emits the standard category codes.

use aiengine_common::Result;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{EntityLabel, EntityRecognizer, EntitySpan};

static MONEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\s?\d+(?:,\d{3})*(?:\.\d+)?(?:\s?(?:thousand|million|billion|trillion)\b)?|\b\d+(?:,\d{3})*(?:\.\d+)?\s?(?:USD|EUR|GBP|dollars?|euros?|pounds?)\b").unwrap()
});

static PERCENT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d+(?:\.\d+)?(?:\s?%|\s?percent\b)").unwrap()
});

static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{1,2}(?::\d{2})?\s?(?:[ap]\.m\.|(?:AM|PM|am|pm)\b)|\b\d{1,2}:\d{2}\b").unwrap()
});

static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let months = "January|February|March|April|May|June|July|August|September|October|November|December|Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sept|Sep|Oct|Nov|Dec";
    vec![
        Regex::new(&format!(
            r"\b(?:{})\.?\s+\d{{1,2}}(?:st|nd|rd|th)?(?:,?\s+\d{{4}})?\b",
            months
        ))
        .unwrap(),
        Regex::new(&format!(r"\b(?:{})\s+\d{{4}}\b", months)).unwrap(),
        Regex::new(r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b|\b\d{4}-\d{2}-\d{2}\b").unwrap(),
        Regex::new(r"\b(?:Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday)\b").unwrap(),
        Regex::new(r"\b(?:19|20)\d{2}s?\b").unwrap(),
    ]
});

static ORG_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"\b(?:[A-Z][\w&'-]*\s+)+(?:Inc|Corp|Corporation|Ltd|LLC|Co|Company|Group|Institute|University|College|Bank|Foundation|Association|Agency|Labs)\b\.?").unwrap(),
        Regex::new(r"\b(?:University|Bank|Institute|Department|Ministry)\s+of\s+[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").unwrap(),
    ]
});

static GPE_PATTERN: Lazy<Regex> = Lazy::new(|| gazetteer_pattern(GPE_NAMES));

static NORP_PATTERN: Lazy<Regex> = Lazy::new(|| gazetteer_pattern(NORP_NAMES));

static PERSON_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:(?:Mr|Mrs|Ms|Dr|Prof)\.\s+)?[A-Z][a-z]+(?:\s+[A-Z]\.)?(?:\s+[A-Z][a-z]+)+\b").unwrap()
});

const GPE_NAMES: &[&str] = &[
    "United States", "United Kingdom", "USA", "UK", "America", "Canada", "Mexico",
    "Brazil", "Argentina", "France", "Germany", "Italy", "Spain", "Portugal",
    "Netherlands", "Belgium", "Switzerland", "Austria", "Sweden", "Norway",
    "Denmark", "Finland", "Poland", "Ireland", "Russia", "Ukraine", "China",
    "Japan", "South Korea", "Korea", "India", "Pakistan", "Australia",
    "New Zealand", "Egypt", "Nigeria", "Kenya", "South Africa", "Israel",
    "Turkey", "Iran", "Saudi Arabia", "Singapore", "Indonesia", "Vietnam",
    "California", "Texas", "Florida", "New York", "Washington", "Oregon",
    "Nevada", "Arizona", "Colorado", "Illinois", "Ohio", "Michigan", "Georgia",
    "Massachusetts", "Virginia", "Hawaii", "Alaska", "New Jersey", "Pennsylvania",
    "New York City", "Los Angeles", "San Francisco", "San Jose", "Seattle",
    "Chicago", "Boston", "Austin", "Denver", "Miami", "Atlanta", "Portland",
    "Cupertino", "London", "Paris", "Berlin", "Madrid", "Rome", "Tokyo",
    "Beijing", "Shanghai", "Seoul", "Mumbai", "Delhi", "Sydney", "Toronto",
    "Vancouver", "Dublin", "Amsterdam", "Moscow", "Hong Kong",
];

const NORP_NAMES: &[&str] = &[
    "American", "Americans", "British", "Canadian", "Mexican", "French", "German",
    "Italian", "Spanish", "Russian", "Chinese", "Japanese", "Korean", "Indian",
    "European", "African", "Asian", "Australian", "Christian", "Christians",
    "Muslim", "Muslims", "Jewish", "Buddhist", "Hindu", "Democrat", "Democrats",
    "Republican", "Republicans",
];

/// Words that start a capitalized run without being part of a name
const LEADING_NON_NAME: &[&str] = &[
    "The", "A", "An", "This", "That", "These", "Those", "In", "On", "At", "By",
    "For", "From", "With", "And", "But", "Or", "If", "When", "While", "After",
    "Before", "During", "Since", "Yesterday", "Today", "Tomorrow", "Monday",
    "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
    "January", "February", "March", "April", "May", "June", "July", "August",
    "September", "October", "November", "December", "Dear", "Hello", "Hi",
];

/// Words that mark a capitalized run as an organization rather than a person
const ORG_SUFFIXES: &[&str] = &[
    "Inc", "Corp", "Corporation", "Ltd", "LLC", "Co", "Company", "Group",
    "Institute", "University", "College", "Bank", "Foundation", "Association",
    "Agency", "Labs",
];

/// Build a whole-word alternation, longest names first so "New York City" beats "New York"
fn gazetteer_pattern(names: &[&str]) -> Regex {
    let mut sorted: Vec<&str> = names.to_vec();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()));
    let alternation = sorted
        .iter()
        .map(|n| regex::escape(n))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{})\b", alternation)).unwrap()
}

/// Candidate span before overlap resolution
#[derive(Debug)]
struct Candidate {
    start: usize,
    end: usize,
    label: EntityLabel,
    priority: usize,
}

/// Offline recognizer built from regular expressions and small gazetteers
#[derive(Debug, Default, Clone)]
pub struct RuleBasedRecognizer;

impl RuleBasedRecognizer {
    pub fn new() -> Self {
        Self
    }

    /// Recognize spans synchronously
    pub fn recognize_text(&self, text: &str) -> Vec<EntitySpan> {
        let mut candidates = Vec::new();

        // Lower priority value wins when two candidates share start and length
        push_matches(&mut candidates, text, &MONEY_PATTERN, EntityLabel::Money, 0);
        push_matches(&mut candidates, text, &PERCENT_PATTERN, EntityLabel::Other("PERCENT".to_string()), 1);
        push_matches(&mut candidates, text, &TIME_PATTERN, EntityLabel::Time, 2);
        for pattern in DATE_PATTERNS.iter() {
            push_matches(&mut candidates, text, pattern, EntityLabel::Date, 3);
        }
        for pattern in ORG_PATTERNS.iter() {
            for m in pattern.find_iter(text) {
                if let Some(start) = strip_leading_non_names(text, m.start(), m.end()) {
                    candidates.push(Candidate { start, end: m.end(), label: EntityLabel::Org, priority: 4 });
                }
            }
        }
        push_matches(&mut candidates, text, &GPE_PATTERN, EntityLabel::Gpe, 5);
        push_matches(&mut candidates, text, &NORP_PATTERN, EntityLabel::Norp, 6);

        for m in PERSON_PATTERN.find_iter(text) {
            let Some(start) = strip_leading_non_names(text, m.start(), m.end()) else {
                continue;
            };
            let words: Vec<&str> = text[start..m.end()].split_whitespace().collect();
            let looks_like_org = words
                .iter()
                .any(|w| ORG_SUFFIXES.contains(&w.trim_end_matches('.')));
            if words.len() >= 2 && !looks_like_org {
                candidates.push(Candidate { start, end: m.end(), label: EntityLabel::Person, priority: 7 });
            }
        }

        resolve_overlaps(candidates)
            .into_iter()
            .map(|c| EntitySpan {
                text: text[c.start..c.end].to_string(),
                label: c.label,
            })
            .collect()
    }
}

#[async_trait]
impl EntityRecognizer for RuleBasedRecognizer {
    async fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>> {
        Ok(self.recognize_text(text))
    }

    fn name(&self) -> &str {
        "rules"
    }
}

fn push_matches(
    candidates: &mut Vec<Candidate>,
    text: &str,
    pattern: &Regex,
    label: EntityLabel,
    priority: usize,
) {
    for m in pattern.find_iter(text) {
        candidates.push(Candidate {
            start: m.start(),
            end: m.end(),
            label: label.clone(),
            priority,
        });
    }
}

/// Skip determiners and other non-name words at the start of a capitalized run.
/// Returns `None` if nothing is left.
fn strip_leading_non_names(text: &str, start: usize, end: usize) -> Option<usize> {
    let mut pos = start;
    loop {
        let rest = &text[pos..end];
        let word_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let word = &rest[..word_len];
        if !LEADING_NON_NAME.contains(&word) {
            break;
        }
        let after = &rest[word_len..];
        let skipped = after.len() - after.trim_start().len();
        if word_len + skipped >= rest.len() {
            return None;
        }
        pos += word_len + skipped;
    }
    Some(pos)
}

/// Keep the earliest, then longest, non-overlapping candidates in text order
fn resolve_overlaps(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then((b.end - b.start).cmp(&(a.end - a.start)))
            .then(a.priority.cmp(&b.priority))
    });

    let mut accepted: Vec<Candidate> = Vec::new();
    let mut last_end = 0;
    for candidate in candidates {
        if candidate.start >= last_end {
            last_end = candidate.end;
            accepted.push(candidate);
        }
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'a>(spans: &'a [EntitySpan], label: &EntityLabel) -> Vec<&'a str> {
        spans
            .iter()
            .filter(|s| &s.label == label)
            .map(|s| s.text.as_str())
            .collect()
    }

    #[test]
    fn test_company_founder_sentence() {
        let spans = RuleBasedRecognizer::new()
            .recognize_text("Apple Inc. was founded by Steve Jobs in California.");

        assert_eq!(find(&spans, &EntityLabel::Org), vec!["Apple Inc."]);
        assert_eq!(find(&spans, &EntityLabel::Person), vec!["Steve Jobs"]);
        assert_eq!(find(&spans, &EntityLabel::Gpe), vec!["California"]);
    }

    #[test]
    fn test_spans_are_in_text_order() {
        let spans = RuleBasedRecognizer::new()
            .recognize_text("Barack Obama was born in Hawaii. He worked in Chicago.");
        let texts: Vec<&str> = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["Barack Obama", "Hawaii", "Chicago"]);
    }

    #[test]
    fn test_leading_determiner_is_not_a_person() {
        let spans = RuleBasedRecognizer::new().recognize_text("In California the sun shines.");
        assert!(find(&spans, &EntityLabel::Person).is_empty());
        assert_eq!(find(&spans, &EntityLabel::Gpe), vec!["California"]);
    }

    #[test]
    fn test_longest_gazetteer_entry_wins() {
        let spans = RuleBasedRecognizer::new().recognize_text("She moved to New York City last year.");
        assert_eq!(find(&spans, &EntityLabel::Gpe), vec!["New York City"]);
    }

    #[test]
    fn test_numeric_entities() {
        let spans = RuleBasedRecognizer::new().recognize_text(
            "On March 3, 2024 at 10:30 am the fund raised $4.5 million, up 12% from 2023.",
        );

        assert_eq!(find(&spans, &EntityLabel::Date), vec!["March 3, 2024", "2023"]);
        assert_eq!(find(&spans, &EntityLabel::Time), vec!["10:30 am"]);
        assert_eq!(find(&spans, &EntityLabel::Money), vec!["$4.5 million"]);
        assert_eq!(
            find(&spans, &EntityLabel::Other("PERCENT".to_string())),
            vec!["12%"]
        );
    }

    #[test]
    fn test_nationalities() {
        let spans = RuleBasedRecognizer::new().recognize_text("The German and French delegations met.");
        assert_eq!(find(&spans, &EntityLabel::Norp), vec!["German", "French"]);
    }

    #[tokio::test]
    async fn test_trait_object() {
        let recognizer: std::sync::Arc<dyn EntityRecognizer> =
            std::sync::Arc::new(RuleBasedRecognizer::new());
        let spans = recognizer.recognize("Tim Cook visited Tokyo.").await.unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(recognizer.name(), "rules");
    }
}
