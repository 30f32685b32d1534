//! Sector grouping of valued holdings.

use serde::Serialize;

use super::holding::{EnrichedHolding, Holding};
use super::money::round2;

/// Totals for one sector plus its member holdings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorAggregate {
    pub sector: String,
    pub total_investment: f64,
    pub total_present_value: f64,
    #[serde(rename = "gainLoss")]
    pub total_gain_loss: f64,
    #[serde(rename = "stocks")]
    pub holdings: Vec<EnrichedHolding>,
}

impl SectorAggregate {
    fn new(sector: &str) -> Self {
        SectorAggregate {
            sector: sector.to_string(),
            total_investment: 0.0,
            total_present_value: 0.0,
            total_gain_loss: 0.0,
            holdings: Vec::new(),
        }
    }

    fn push(&mut self, holding: &EnrichedHolding) {
        self.total_investment = round2(self.total_investment + holding.investment);
        self.total_present_value = round2(self.total_present_value + holding.present_value);
        self.total_gain_loss = round2(self.total_gain_loss + holding.gain_loss);
        self.holdings.push(holding.clone());
    }
}

/// Group `holdings` by exact sector label.
///
/// Sectors appear in the order they are first seen; holdings keep their
/// input order within each sector.
pub fn aggregate_by_sector(holdings: &[EnrichedHolding]) -> Vec<SectorAggregate> {
    let mut sectors: Vec<SectorAggregate> = Vec::new();

    for holding in holdings {
        let label = holding.holding.sector.as_str();
        match sectors.iter_mut().find(|s| s.sector == label) {
            Some(aggregate) => aggregate.push(holding),
            None => {
                let mut aggregate = SectorAggregate::new(label);
                aggregate.push(holding);
                sectors.push(aggregate);
            }
        }
    }

    sectors
}

/// Distinct sector labels in first-seen order.
pub fn sector_names(holdings: &[Holding]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for holding in holdings {
        if !names.iter().any(|n| *n == holding.sector) {
            names.push(holding.sector.clone());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::*;

    fn enriched(id: &str, sector: &str, investment: f64, present_value: f64) -> EnrichedHolding {
        EnrichedHolding {
            holding: Holding {
                id: id.to_string(),
                name: format!("Holding {id}"),
                symbol: format!("SYM{id}"),
                purchase_price: investment,
                quantity: 1,
                exchange: "NSE".to_string(),
                sector: sector.to_string(),
            },
            investment,
            portfolio_percentage: 0.0,
            cmp: present_value,
            present_value,
            gain_loss: round2(present_value - investment),
            pe_ratio: 10.0,
            latest_earnings: 1_000.0,
        }
    }

    #[test]
    fn groups_in_first_seen_order() {
        let holdings = vec![
            enriched("1", "Financials", 72_500.0, 79_000.0),
            enriched("2", "Technology", 56_800.0, 58_600.0),
            enriched("3", "Energy", 73_500.0, 75_600.0),
            enriched("4", "Technology", 81_250.0, 79_500.0),
            enriched("5", "Financials", 49_200.0, 52_500.0),
        ];

        let sectors = aggregate_by_sector(&holdings);
        let names: Vec<&str> = sectors.iter().map(|s| s.sector.as_str()).collect();
        assert_eq!(names, vec!["Financials", "Technology", "Energy"]);

        let tech = &sectors[1];
        let ids: Vec<&str> = tech.holdings.iter().map(|h| h.holding.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "4"]);
        assert_relative_eq!(tech.total_investment, 138_050.0);
        assert_relative_eq!(tech.total_present_value, 138_100.0);
        assert_relative_eq!(tech.total_gain_loss, 50.0);
    }

    #[test]
    fn sector_match_is_exact() {
        let holdings = vec![
            enriched("1", "Technology", 1.0, 1.0),
            enriched("2", "technology", 1.0, 1.0),
            enriched("3", "Technology ", 1.0, 1.0),
        ];
        assert_eq!(aggregate_by_sector(&holdings).len(), 3);
    }

    #[test]
    fn empty_input_has_no_sectors() {
        assert!(aggregate_by_sector(&[]).is_empty());
        assert!(sector_names(&[]).is_empty());
    }

    #[test]
    fn sector_names_deduplicate_in_order() {
        let holdings: Vec<Holding> = ["Energy", "Healthcare", "Energy", "Consumer Goods"]
            .iter()
            .enumerate()
            .map(|(i, s)| enriched(&i.to_string(), s, 1.0, 1.0).holding)
            .collect();
        assert_eq!(
            sector_names(&holdings),
            vec!["Energy", "Healthcare", "Consumer Goods"]
        );
    }

    #[test]
    fn serializes_with_dashboard_field_names() {
        let sectors = aggregate_by_sector(&[enriched("1", "Energy", 10.0, 12.0)]);
        let json = serde_json::to_value(&sectors[0]).unwrap();
        assert_eq!(json["sector"], "Energy");
        assert_eq!(json["totalInvestment"], 10.0);
        assert_eq!(json["totalPresentValue"], 12.0);
        assert_eq!(json["gainLoss"], 2.0);
        assert_eq!(json["stocks"].as_array().unwrap().len(), 1);
    }

    proptest! {
        #[test]
        fn sector_totals_match_member_sums(
            rows in prop::collection::vec((0usize..4, 0.0f64..100_000.0, 0.0f64..100_000.0), 0..40)
        ) {
            const SECTORS: [&str; 4] = ["Financials", "Technology", "Energy", "Healthcare"];
            let holdings: Vec<EnrichedHolding> = rows
                .iter()
                .enumerate()
                .map(|(i, (s, inv, pv))| enriched(&i.to_string(), SECTORS[*s], round2(*inv), round2(*pv)))
                .collect();

            let sectors = aggregate_by_sector(&holdings);
            let member_count: usize = sectors.iter().map(|s| s.holdings.len()).sum();
            prop_assert_eq!(member_count, holdings.len());

            for s in &sectors {
                let inv: f64 = s.holdings.iter().map(|h| h.investment).sum();
                let pv: f64 = s.holdings.iter().map(|h| h.present_value).sum();
                let gl: f64 = s.holdings.iter().map(|h| h.gain_loss).sum();
                assert_abs_diff_eq!(s.total_investment, inv, epsilon = 0.01);
                assert_abs_diff_eq!(s.total_present_value, pv, epsilon = 0.01);
                assert_abs_diff_eq!(s.total_gain_loss, gl, epsilon = 0.01);
                prop_assert!(s.holdings.iter().all(|h| h.holding.sector == s.sector));
            }
        }
    }
}
