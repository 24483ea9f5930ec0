//! Core data model types for rekishi.
//!
//! These are the types the whole quiz engine passes around: parsed records,
//! the dataset they live in, era selections, answer fields and option sets.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Columns every dataset must provide.
pub const REQUIRED_COLUMNS: [&str; 5] = ["person", "year", "event", "relation", "era"];

/// One historical fact: a single data row of the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// The person the question is about (the prompt text).
    pub person: String,
    /// Year of the event, kept as text exactly as it appears in the source.
    pub year: String,
    /// What happened.
    pub event: String,
    /// How the person relates to the event.
    pub relation: String,
    /// Era label used for filtering.
    pub era: String,
    /// Any additional columns, passed through untouched.
    #[serde(flatten, default)]
    pub extra: BTreeMap<String, String>,
}

impl Record {
    /// Look up a value by column name, including extra columns.
    pub fn get(&self, column: &str) -> Option<&str> {
        match column {
            "person" => Some(&self.person),
            "year" => Some(&self.year),
            "event" => Some(&self.event),
            "relation" => Some(&self.relation),
            "era" => Some(&self.era),
            other => self.extra.get(other).map(String::as_str),
        }
    }

    /// The true value of an answer field.
    pub fn answer(&self, field: AnswerField) -> &str {
        match field {
            AnswerField::Year => &self.year,
            AnswerField::Event => &self.event,
            AnswerField::Relation => &self.relation,
        }
    }
}

/// An ordered collection of records sharing one header row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    headers: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    pub(crate) fn new(headers: Vec<String>, records: Vec<Record>) -> Self {
        Self { headers, records }
    }

    /// Trimmed header names in source order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct era labels in order of first appearance.
    pub fn eras(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.era.as_str())
            .filter(|era| seen.insert(*era))
            .collect()
    }
}

/// The three fields a player has to answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerField {
    Year,
    Event,
    Relation,
}

impl AnswerField {
    /// All answer fields in display order.
    pub const ALL: [AnswerField; 3] = [AnswerField::Year, AnswerField::Event, AnswerField::Relation];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerField::Year => "year",
            AnswerField::Event => "event",
            AnswerField::Relation => "relation",
        }
    }
}

impl fmt::Display for AnswerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnswerField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "year" | "y" => Ok(AnswerField::Year),
            "event" | "e" => Ok(AnswerField::Event),
            "relation" | "r" => Ok(AnswerField::Relation),
            other => Err(format!("unknown answer field: {other}")),
        }
    }
}

/// A set of era labels to filter by. Empty means every era.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EraSelection(BTreeSet<String>);

impl EraSelection {
    /// The empty selection, which matches every record.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_all(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether a record with this era passes the selection.
    pub fn matches(&self, era: &str) -> bool {
        self.is_all() || self.0.contains(era)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for EraSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(Into::into)
                .map(|s: String| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }
}

/// Candidate values shown for one answer field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSet {
    pub field: AnswerField,
    values: Vec<String>,
}

impl OptionSet {
    pub(crate) fn new(field: AnswerField, values: Vec<String>) -> Self {
        Self { field, values }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    /// Option at a zero-based position.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(era: &str) -> Record {
        Record {
            person: "Oda".into(),
            year: "1582".into(),
            event: "HonnojiIncident".into(),
            relation: "retainer".into(),
            era: era.into(),
            extra: BTreeMap::from([("source".to_string(), "textbook".to_string())]),
        }
    }

    #[test]
    fn answer_field_display_and_parse() {
        assert_eq!(AnswerField::Year.to_string(), "year");
        assert_eq!("Relation".parse::<AnswerField>().unwrap(), AnswerField::Relation);
        assert_eq!("e".parse::<AnswerField>().unwrap(), AnswerField::Event);
        assert!("person".parse::<AnswerField>().is_err());
    }

    #[test]
    fn record_lookup_covers_extra_columns() {
        let r = record("Sengoku");
        assert_eq!(r.get("era"), Some("Sengoku"));
        assert_eq!(r.get("source"), Some("textbook"));
        assert_eq!(r.get("missing"), None);
        assert_eq!(r.answer(AnswerField::Event), "HonnojiIncident");
    }

    #[test]
    fn era_selection_semantics() {
        let all = EraSelection::all();
        assert!(all.is_all());
        assert!(all.matches("anything"));

        let edo: EraSelection = [" Edo ", ""].into_iter().collect();
        assert!(!edo.is_all());
        assert!(edo.matches("Edo"));
        assert!(!edo.matches("Sengoku"));
        assert_eq!(edo.labels().collect::<Vec<_>>(), vec!["Edo"]);
    }

    #[test]
    fn dataset_eras_in_first_seen_order() {
        let ds = Dataset::new(
            REQUIRED_COLUMNS.iter().map(|s| s.to_string()).collect(),
            vec![record("Sengoku"), record("Edo"), record("Sengoku")],
        );
        assert_eq!(ds.eras(), vec!["Sengoku", "Edo"]);
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn record_serializes_extra_columns_flat() {
        let json = serde_json::to_value(record("Sengoku")).unwrap();
        assert_eq!(json["person"], "Oda");
        assert_eq!(json["source"], "textbook");
    }
}
