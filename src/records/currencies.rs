//! The currency directory (`bm_cy.dat`).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Directory, FIELD_SEPARATOR, NamedRecord, ids_by_name};

/// One currency position of the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRecord {
    pub id: u32,
    /// Position in the site's currency selector.
    pub display_position: u32,
    pub name: String,
}

impl NamedRecord for CurrencyRecord {
    fn id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Currencies keyed by id, iterated in name order.
#[derive(Debug, Clone, PartialEq)]
pub struct Currencies {
    by_id: HashMap<u32, CurrencyRecord>,
    order: Vec<u32>,
}

impl Currencies {
    /// Parses `id;display_position;name` rows. A duplicate id keeps the later
    /// row; malformed rows are skipped.
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
        debug!(kept = by_id.len(), skipped, "parsed currencies");
        let order = ids_by_name(&by_id);
        Self { by_id, order }
    }
}

impl Directory for Currencies {
    type Record = CurrencyRecord;

    fn all(&self) -> &HashMap<u32, CurrencyRecord> {
        &self.by_id
    }

    fn ids(&self) -> &[u32] {
        &self.order
    }
}

fn parse_row(fields: &[&str]) -> Option<CurrencyRecord> {
    Some(CurrencyRecord {
        id: fields.first()?.parse().ok()?,
        display_position: fields.get(1)?.parse().ok()?,
        name: (*fields.get(2)?).to_string(),
    })
}
