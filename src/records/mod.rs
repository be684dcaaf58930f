//! Parsers and typed collections for the feed's delimited tables.
//!
//! Every table is line-delimited text with `;`-separated fields addressed by
//! ordinal. The skip policy is decided here once for all parsers: a row that
//! is short a field or fails numeric coercion is skipped, it never aborts the
//! surrounding file. Rows quoting a zero `get_amount` in the rates table are
//! dropped the same way; the feed publishes such rows occasionally and they
//! carry no usable rate.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub mod cities;
pub mod currencies;
pub mod exchangers;
pub mod rates;
pub mod top;

pub use cities::{Cities, CityRecord};
pub use currencies::{Currencies, CurrencyRecord};
pub use exchangers::{ExchangerRecord, Exchangers};
pub use rates::{NormalizedRate, RateRecord, Rates};
pub use top::{Top, TopRecord};

pub(crate) const FIELD_SEPARATOR: char = ';';

/// Review counters as published in the rates table.
///
/// The feed writes them as one dot-separated field (for example `5.0.2`).
/// With the `split_reviews` option off the field is kept verbatim; with it on
/// the first segment becomes the positive count and the last the negative
/// count. A field that does not yield two integer counts stays [`Raw`].
///
/// [`Raw`]: Reviews::Raw
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reviews {
    /// The verbatim feed field.
    Raw(String),
    /// Split counters.
    Counts {
        /// Positive reviews.
        positive: u32,
        /// Negative reviews.
        negative: u32,
    },
}

impl Reviews {
    pub(crate) fn parse(raw: &str, split: bool) -> Self {
        if split && let Some((positive, negative)) = split_counts(raw) {
            return Self::Counts { positive, negative };
        }
        Self::Raw(raw.to_string())
    }
}

fn split_counts(raw: &str) -> Option<(u32, u32)> {
    let mut segments = raw.split('.');
    let positive = segments.next()?.parse().ok()?;
    let negative = segments.next_back()?.parse().ok()?;
    Some((positive, negative))
}

/// A record addressed by numeric id and carrying a display name.
pub trait NamedRecord {
    fn id(&self) -> u32;
    fn name(&self) -> &str;
}

/// Shared behavior of the map-shaped collections (currencies, exchangers,
/// cities): an id → record table plus a fixed display order.
pub trait Directory {
    type Record: NamedRecord;

    /// The full id → record mapping.
    fn all(&self) -> &HashMap<u32, Self::Record>;

    /// Record ids in display order.
    fn ids(&self) -> &[u32];

    fn get_by_id(&self, id: u32) -> Option<&Self::Record> {
        self.all().get(&id)
    }

    /// Name of the record with this id, the common shortcut for lookups.
    fn name_by_id(&self, id: u32) -> Option<&str> {
        self.get_by_id(id).map(|record| record.name())
    }

    /// Case-insensitive substring search over record names. An empty query
    /// matches every record.
    fn search_by_name(&self, query: &str) -> HashMap<u32, &Self::Record> {
        let needle = query.to_lowercase();
        self.all()
            .iter()
            .filter(|(_, record)| record.name().to_lowercase().contains(&needle))
            .map(|(id, record)| (*id, record))
            .collect()
    }

    /// Records in display order.
    fn iter(&self) -> impl Iterator<Item = &Self::Record> {
        self.ids().iter().filter_map(|id| self.all().get(id))
    }

    fn len(&self) -> usize {
        self.all().len()
    }

    fn is_empty(&self) -> bool {
        self.all().is_empty()
    }
}

/// Ids sorted by record name (byte-wise, ties by id), the display order of
/// the currency and city directories.
pub(crate) fn ids_by_name<R: NamedRecord>(map: &HashMap<u32, R>) -> Vec<u32> {
    let mut ids: Vec<u32> = map.keys().copied().collect();
    ids.sort_by(|a, b| map[a].name().cmp(map[b].name()).then(a.cmp(b)));
    ids
}
