//! Immutable generations of market data.

use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;

use super::quote::QuoteBook;

/// One generation of the quote book.
///
/// A refresh never edits a snapshot; it derives the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSnapshot {
    pub quotes: QuoteBook,
    pub as_of: DateTime<Utc>,
    pub generation: u64,
}

impl MarketSnapshot {
    pub fn initial(quotes: QuoteBook, as_of: DateTime<Utc>) -> Self {
        MarketSnapshot {
            quotes,
            as_of,
            generation: 0,
        }
    }

    pub fn refreshed<R: Rng + ?Sized>(
        &self,
        max_change: f64,
        rng: &mut R,
        as_of: DateTime<Utc>,
    ) -> MarketSnapshot {
        MarketSnapshot {
            quotes: self.quotes.refreshed(max_change, rng),
            as_of,
            generation: self.generation + 1,
        }
    }

    /// `as_of` as an ISO 8601 string with millisecond precision.
    pub fn timestamp(&self) -> String {
        iso_timestamp(self.as_of)
    }
}

pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quote::{DEFAULT_MAX_FLUCTUATION, Quote};
    use chrono::{Duration, TimeZone};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn book() -> QuoteBook {
        vec![
            Quote {
                symbol: "INFY".into(),
                cmp: 1465.0,
                pe_ratio: 22.3,
                latest_earnings: 15_200.0,
            },
            Quote {
                symbol: "WIPRO".into(),
                cmp: 410.0,
                pe_ratio: 19.5,
                latest_earnings: 7_200.0,
            },
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn refresh_derives_next_generation() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 9, 15, 0).unwrap();
        let first = MarketSnapshot::initial(book(), start);
        let later = start + Duration::seconds(15);
        let mut rng = StdRng::seed_from_u64(3);

        let second = first.refreshed(DEFAULT_MAX_FLUCTUATION, &mut rng, later);

        assert_eq!(first.generation, 0);
        assert_eq!(second.generation, 1);
        assert_eq!(second.as_of, later);
        assert_eq!(second.quotes.len(), first.quotes.len());
        assert_eq!(first.quotes, book());
    }

    #[test]
    fn timestamp_is_iso8601_utc() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 15, 0).unwrap();
        let snapshot = MarketSnapshot::initial(book(), at);
        assert_eq!(snapshot.timestamp(), "2024-05-01T09:15:00.000Z");
    }
}
