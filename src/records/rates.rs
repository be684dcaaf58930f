//! The rates table (`bm_rates.dat`) and the direction query over it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{FIELD_SEPARATOR, Reviews};

/// One exchange direction quoted by an exchanger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateRecord {
    pub give_id: u32,
    pub get_id: u32,
    pub exchanger_id: u32,
    /// Cost of one target unit: `give_amount / get_amount` from the feed row.
    pub rate: f64,
    /// Reserve the exchanger declares for this direction.
    pub reserve: f64,
    pub reviews: Reviews,
    pub min_sum: f64,
    pub max_sum: f64,
    /// City for cash directions; `0` for online-only ones.
    pub city_id: u32,
}

/// A filtered rate with display-normalized amounts: the cheaper side is
/// pinned to one unit so every entry reads as "give `give` to get `get`".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRate {
    pub record: RateRecord,
    pub give: f64,
    pub get: f64,
}

impl NormalizedRate {
    fn from_record(record: &RateRecord) -> Self {
        let (give, get) = if record.rate < 1.0 {
            (1.0, 1.0 / record.rate)
        } else {
            (record.rate, 1.0)
        };
        Self {
            record: record.clone(),
            give,
            get,
        }
    }
}

/// The rates table in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Rates {
    records: Vec<RateRecord>,
}

impl Rates {
    /// Parses `give_id;get_id;exchanger_id;give_amount;get_amount;reserve;
    /// reviews;;min_sum;max_sum;city_id` rows. Rows quoting a zero
    /// `get_amount` are dropped along with malformed ones.
    pub fn parse(text: &str, split_reviews: bool) -> Self {
        let mut records = Vec::new();
        let mut skipped = 0usize;
        for line in text.lines() {
            let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
            match parse_row(&fields, split_reviews) {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }
        debug!(kept = records.len(), skipped, "parsed rates");
        Self { records }
    }

    /// All records in file order.
    pub fn all(&self) -> &[RateRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &RateRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All offers for the `give_id` → `get_id` direction, normalized for
    /// display and sorted ascending by rate (best offer first).
    pub fn filter(&self, give_id: u32, get_id: u32) -> Vec<NormalizedRate> {
        let mut matches: Vec<NormalizedRate> = self
            .records
            .iter()
            .filter(|record| record.give_id == give_id && record.get_id == get_id)
            .map(NormalizedRate::from_record)
            .collect();
        matches.sort_by(|a, b| a.record.rate.total_cmp(&b.record.rate));
        matches
    }
}

fn parse_row(fields: &[&str], split_reviews: bool) -> Option<RateRecord> {
    let give_id = fields.first()?.parse().ok()?;
    let get_id = fields.get(1)?.parse().ok()?;
    let exchanger_id = fields.get(2)?.parse().ok()?;
    let give_amount: f64 = fields.get(3)?.parse().ok()?;
    let get_amount: f64 = fields.get(4)?.parse().ok()?;
    if get_amount == 0.0 {
        return None;
    }
    Some(RateRecord {
        give_id,
        get_id,
        exchanger_id,
        rate: give_amount / get_amount,
        reserve: fields.get(5)?.parse().ok()?,
        reviews: Reviews::parse(fields.get(6)?, split_reviews),
        min_sum: fields.get(8)?.parse().ok()?,
        max_sum: fields.get(9)?.parse().ok()?,
        city_id: fields.get(10)?.parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_rate_is_quotient_of_amounts() {
        let rates = Rates::parse("1;2;10;100;90;25000.5;5.0.2;;1;100000;7\n", false);

        assert_eq!(rates.len(), 1);
        let record = &rates.all()[0];
        assert_eq!(record.give_id, 1);
        assert_eq!(record.get_id, 2);
        assert_eq!(record.exchanger_id, 10);
        assert!((record.rate - 100.0 / 90.0).abs() < TOLERANCE);
        assert_eq!(record.reserve, 25000.5);
        assert_eq!(record.reviews, Reviews::Raw("5.0.2".to_string()));
        assert_eq!(record.min_sum, 1.0);
        assert_eq!(record.max_sum, 100000.0);
        assert_eq!(record.city_id, 7);
    }

    #[test]
    fn test_zero_divisor_rows_are_dropped() {
        let text = "93;42;10;2;1;100;1.0.0;;1;10;0\n\
                    93;42;11;5;0;100;1.0.0;;1;10;0\n\
                    93;42;12;1;4;100;1.0.0;;1;10;0\n";
        let rates = Rates::parse(text, false);

        assert_eq!(rates.len(), 2);
        assert!(rates.iter().all(|record| record.exchanger_id != 11));
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let text = "93;42;abc;2;1;100;1.0.0;;1;10;0\n\
                    93;42;10;2;1;100;1.0.0;;1;10\n\
                    93;42;10;2;1;100;1.0.0;;1;10;0\n";
        let rates = Rates::parse(text, false);

        assert_eq!(rates.len(), 1);
    }

    #[test]
    fn test_filter_normalizes_and_sorts_by_rate() {
        let text = "93;42;150;1;6.5;1000;2.0.0;;50;5000;0\n\
                    42;93;150;6.5;1;1000;2.0.0;;50;5000;0\n\
                    93;42;200;2;1;500;3.0.1;;100;9000;0\n";
        let rates = Rates::parse(text, false);

        let offers = rates.filter(93, 42);
        assert_eq!(offers.len(), 2);

        // Ascending by rate: 1/6.5 before 2.
        assert_eq!(offers[0].record.exchanger_id, 150);
        assert_eq!(offers[1].record.exchanger_id, 200);

        // rate < 1: one unit given, 1/rate received.
        assert_eq!(offers[0].give, 1.0);
        assert!((offers[0].get - 6.5).abs() < TOLERANCE);

        // rate >= 1: rate given, one unit received.
        assert!((offers[1].give - 2.0).abs() < TOLERANCE);
        assert_eq!(offers[1].get, 1.0);

        for offer in &offers {
            assert!((offer.give / offer.get - offer.record.rate).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_filter_without_matches_is_empty() {
        let rates = Rates::parse("93;42;150;1;6.5;1000;2.0.0;;50;5000;0\n", false);
        assert!(rates.filter(42, 93).is_empty());
    }

    #[test]
    fn test_split_reviews_produces_counts() {
        let rates = Rates::parse("1;2;10;100;90;25000.5;5.0.2;;1;100000;7\n", true);

        assert_eq!(
            rates.all()[0].reviews,
            Reviews::Counts {
                positive: 5,
                negative: 2
            }
        );
    }
}
