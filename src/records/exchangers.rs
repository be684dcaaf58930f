//! The exchanger directory (`bm_exch.dat`).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::rates::Rates;
use super::{Directory, FIELD_SEPARATOR, NamedRecord, Reviews};

/// One exchange service listed by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangerRecord {
    pub id: u32,
    pub name: String,
    /// Bit flags the site attaches to the listing.
    pub flags: u32,
    /// Declared total reserve across all directions.
    pub reserve: f64,
    /// Review counters, present only after [`Exchangers::attach_reviews`].
    pub reviews: Option<Reviews>,
}

impl NamedRecord for ExchangerRecord {
    fn id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Exchangers keyed by id, iterated in id order.
#[derive(Debug, Clone, PartialEq)]
pub struct Exchangers {
    by_id: HashMap<u32, ExchangerRecord>,
    order: Vec<u32>,
}

impl Exchangers {
    /// Parses `id;name;;flags;reserve` rows (the third column is unused).
    /// A duplicate id keeps the later row; malformed rows are skipped.
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
        debug!(kept = by_id.len(), skipped, "parsed exchangers");
        let mut order: Vec<u32> = by_id.keys().copied().collect();
        order.sort_unstable();
        Self { by_id, order }
    }

    /// Copies the first review value quoted for each exchanger in the rates
    /// table onto the matching record. Exchangers without quoted rates keep
    /// `reviews: None`; rates naming an unknown exchanger are ignored.
    pub fn attach_reviews(&mut self, rates: &Rates) {
        let mut first_seen: HashMap<u32, &Reviews> = HashMap::new();
        for rate in rates.iter() {
            first_seen.entry(rate.exchanger_id).or_insert(&rate.reviews);
        }
        for (id, reviews) in first_seen {
            if let Some(record) = self.by_id.get_mut(&id) {
                record.reviews = Some(reviews.clone());
            }
        }
    }
}

impl Directory for Exchangers {
    type Record = ExchangerRecord;

    fn all(&self) -> &HashMap<u32, ExchangerRecord> {
        &self.by_id
    }

    fn ids(&self) -> &[u32] {
        &self.order
    }
}

fn parse_row(fields: &[&str]) -> Option<ExchangerRecord> {
    Some(ExchangerRecord {
        id: fields.first()?.parse().ok()?,
        name: (*fields.get(1)?).to_string(),
        flags: fields.get(3)?.parse().ok()?,
        reserve: fields.get(4)?.parse().ok()?,
        reviews: None,
    })
}
