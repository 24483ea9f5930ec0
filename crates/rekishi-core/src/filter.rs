//! Era filtering.

use serde::{Deserialize, Serialize};

use crate::model::{Dataset, EraSelection, Record};

/// Records whose era is in `selection`, in dataset order.
///
/// An empty selection returns every record.
pub fn filter_by_era<'a>(records: &'a [Record], selection: &EraSelection) -> Vec<&'a Record> {
    records.iter().filter(|r| selection.matches(&r.era)).collect()
}

/// Number of records tagged with one era.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EraCount {
    pub era: String,
    pub records: usize,
}

/// Record counts per era, in order of first appearance.
pub fn era_counts(dataset: &Dataset) -> Vec<EraCount> {
    let mut counts: Vec<EraCount> = Vec::new();
    for record in dataset.records() {
        match counts.iter_mut().find(|c| c.era == record.era) {
            Some(count) => count.records += 1,
            None => counts.push(EraCount {
                era: record.era.clone(),
                records: 1,
            }),
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_dataset, RowPolicy};

    const TEXT: &str = "\
person,year,event,relation,era
Oda,1582,HonnojiIncident,retainer,Sengoku
Tokugawa,1603,Shogunate,founder,Edo
Toyotomi,1598,Death,successor,Sengoku
Minamoto,1192,Shogunate,founder,Kamakura
";

    fn dataset() -> Dataset {
        parse_dataset(TEXT, RowPolicy::Strict).unwrap().dataset
    }

    #[test]
    fn empty_selection_returns_everything_in_order() {
        let ds = dataset();
        let all = filter_by_era(ds.records(), &EraSelection::all());
        assert_eq!(all.len(), ds.len());
        for (filtered, original) in all.iter().zip(ds.records()) {
            assert_eq!(*filtered, original);
        }
    }

    #[test]
    fn selection_keeps_only_matching_eras() {
        let ds = dataset();
        let selection: EraSelection = ["Sengoku", "Kamakura"].into_iter().collect();
        let filtered = filter_by_era(ds.records(), &selection);
        let people: Vec<&str> = filtered.iter().map(|r| r.person.as_str()).collect();
        assert_eq!(people, vec!["Oda", "Toyotomi", "Minamoto"]);
        assert!(filtered.iter().all(|r| selection.matches(&r.era)));
    }

    #[test]
    fn unmatched_selection_is_empty() {
        let ds = dataset();
        let selection: EraSelection = ["Meiji"].into_iter().collect();
        assert!(filter_by_era(ds.records(), &selection).is_empty());
        assert_eq!(ds.len(), 4);
    }

    #[test]
    fn counts_per_era() {
        let counts = era_counts(&dataset());
        assert_eq!(
            counts,
            vec![
                EraCount {
                    era: "Sengoku".into(),
                    records: 2
                },
                EraCount {
                    era: "Edo".into(),
                    records: 1
                },
                EraCount {
                    era: "Kamakura".into(),
                    records: 1
                },
            ]
        );
    }
}
