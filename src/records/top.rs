//! The popularity top (`bm_top.dat`): most requested exchange directions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::FIELD_SEPARATOR;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopRecord {
    pub give_id: u32,
    pub get_id: u32,
    /// Share of aggregator queries that asked for this direction.
    pub percentage: f64,
}

/// Popular directions sorted descending by percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct Top {
    records: Vec<TopRecord>,
}

impl Top {
    /// Parses `give_id;get_id;percentage` rows. Malformed rows are skipped.
    pub fn parse(text: &str) -> Self {
        let mut records = Vec::new();
        let mut skipped = 0usize;
        for line in text.lines() {
            let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
            match parse_row(&fields) {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }
        debug!(kept = records.len(), skipped, "parsed top directions");
        records.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
        Self { records }
    }

    /// All records, most popular direction first.
    pub fn all(&self) -> &[TopRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &TopRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn parse_row(fields: &[&str]) -> Option<TopRecord> {
    Some(TopRecord {
        give_id: fields.first()?.parse().ok()?,
        get_id: fields.get(1)?.parse().ok()?,
        percentage: fields.get(2)?.parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_descending_by_percentage() {
        let top = Top::parse("1;2;3.5\n93;42;14.25\n42;93;7.1\n");

        assert_eq!(top.len(), 3);
        let percentages: Vec<f64> = top.iter().map(|t| t.percentage).collect();
        assert_eq!(percentages, [14.25, 7.1, 3.5]);
        assert_eq!(top.all()[0].give_id, 93);
        assert_eq!(top.all()[0].get_id, 42);
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let top = Top::parse("1;2;high\n93;42\n42;93;7.1\n");

        assert_eq!(top.len(), 1);
        assert_eq!(top.all()[0].percentage, 7.1);
    }
}
