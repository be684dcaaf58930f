//! The city directory (`bm_cities.dat`) for cash exchange directions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Directory, FIELD_SEPARATOR, NamedRecord, ids_by_name};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    pub id: u32,
    pub name: String,
}

impl NamedRecord for CityRecord {
    fn id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Cities keyed by id, iterated in name order.
#[derive(Debug, Clone, PartialEq)]
pub struct Cities {
    by_id: HashMap<u32, CityRecord>,
    order: Vec<u32>,
}

impl Cities {
    /// Parses `id;name` rows. A duplicate id keeps the later row; malformed
    /// rows are skipped.
    pub fn parse(text: &str) -> Self {
        let mut by_id = HashMap::new();
        let mut skipped = 0usize;
        for line in text.lines() {
            let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
            match parse_row(&fields) {
                Some(record) => {
                    by_id.insert(record.id, record);
                }
                None => skipped += 1,
            }
        }
        debug!(kept = by_id.len(), skipped, "parsed cities");
        let order = ids_by_name(&by_id);
        Self { by_id, order }
    }
}

impl Directory for Cities {
    type Record = CityRecord;

    fn all(&self) -> &HashMap<u32, CityRecord> {
        &self.by_id
    }

    fn ids(&self) -> &[u32] {
        &self.order
    }
}

fn parse_row(fields: &[&str]) -> Option<CityRecord> {
    Some(CityRecord {
        id: fields.first()?.parse().ok()?,
        name: (*fields.get(1)?).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_rows_and_orders_by_name() {
        let cities = Cities::parse("7;Москва\n3;Киев\n12;Минск\n");

        assert_eq!(cities.len(), 3);
        let names: Vec<&str> = cities.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Киев", "Минск", "Москва"]);
        assert_eq!(cities.name_by_id(7), Some("Москва"));
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let cities = Cities::parse("oops;Нет\n3;Киев\n44\n");

        assert_eq!(cities.len(), 1);
        assert!(cities.get_by_id(44).is_none());
    }

    #[test]
    fn test_search_matches_cyrillic_names() {
        let cities = Cities::parse("7;Москва\n3;Киев\n12;Минск\n");

        let hits = cities.search_by_name("м");
        assert_eq!(hits.len(), 2);
        assert!(hits.contains_key(&7));
        assert!(hits.contains_key(&12));
    }
}
