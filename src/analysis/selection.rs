use chrono::Datelike;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::PriceRecord;

/// Criteria for narrowing a cleaned table before fitting. Every field is
/// optional; `None` means "all". Passed in explicitly (typically from the
/// configuration file) rather than read from ambient state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub market: Option<String>,
    pub commodity: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),
}

impl Selection {
    /// True when no criterion is set, distinguishing "no selection applied"
    /// from a selection that happened to match nothing.
    pub fn is_unfiltered(&self) -> bool {
        self.year.is_none()
            && self.month.is_none()
            && self.market.is_none()
            && self.commodity.is_none()
    }

    /// Rejects out-of-range months at the configuration boundary instead of
    /// silently matching nothing.
    pub fn validate(&self) -> Result<(), SelectionError> {
        match self.month {
            Some(month) if !(1..=12).contains(&month) => {
                Err(SelectionError::InvalidMonth(month))
            }
            _ => Ok(()),
        }
    }

    /// Every specified criterion must hold exactly: case-sensitive equality
    /// on market/commodity, exact calendar match on year/month.
    pub fn matches(&self, record: &PriceRecord) -> bool {
        if let Some(year) = self.year {
            if record.arrival_date.year() != year {
                return false;
            }
        }
        if let Some(month) = self.month {
            if record.arrival_date.month() != month {
                return false;
            }
        }
        if let Some(market) = &self.market {
            if &record.market != market {
                return false;
            }
        }
        if let Some(commodity) = &self.commodity {
            if &record.commodity != commodity {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PriceTable;

    fn record(date: &str, market: &str, commodity: &str) -> PriceRecord {
        PriceRecord {
            arrival_date: date.parse().unwrap(),
            market: market.to_string(),
            commodity: commodity.to_string(),
            min_price: None,
            modal_price: 100.0,
            max_price: None,
        }
    }

    fn table() -> PriceTable {
        PriceTable::new(vec![
            record("2023-12-30", "Bowenpally", "Tomato"),
            record("2024-01-05", "Bowenpally", "Tomato"),
            record("2024-01-20", "Gudimalkapur", "Tomato"),
            record("2024-02-03", "Bowenpally", "Onion"),
        ])
    }

    #[test]
    fn test_unfiltered_selects_everything() {
        let selection = Selection::default();
        assert!(selection.is_unfiltered());
        assert_eq!(table().select(&selection).len(), 4);
    }

    #[test]
    fn test_each_criterion() {
        let by_year = Selection {
            year: Some(2024),
            ..Selection::default()
        };
        assert_eq!(table().select(&by_year).len(), 3);

        let by_month = Selection {
            month: Some(1),
            ..Selection::default()
        };
        assert_eq!(table().select(&by_month).len(), 2);

        let by_market = Selection {
            market: Some("Bowenpally".to_string()),
            ..Selection::default()
        };
        assert_eq!(table().select(&by_market).len(), 3);

        let by_commodity = Selection {
            commodity: Some("Onion".to_string()),
            ..Selection::default()
        };
        assert_eq!(table().select(&by_commodity).len(), 1);
    }

    #[test]
    fn test_combined_criteria_must_all_hold() {
        let selection = Selection {
            year: Some(2024),
            month: Some(1),
            market: Some("Bowenpally".to_string()),
            commodity: Some("Tomato".to_string()),
        };
        let sub = table().select(&selection);
        assert_eq!(sub.len(), 1);
        assert_eq!(
            sub.records()[0].arrival_date,
            "2024-01-05".parse().unwrap()
        );
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let selection = Selection {
            market: Some("bowenpally".to_string()),
            ..Selection::default()
        };
        let sub = table().select(&selection);
        assert!(sub.is_empty());
        assert!(!selection.is_unfiltered());
    }

    #[test]
    fn test_empty_result_is_valid() {
        let selection = Selection {
            year: Some(1999),
            ..Selection::default()
        };
        assert!(table().select(&selection).is_empty());
    }

    #[test]
    fn test_month_validation() {
        let selection = Selection {
            month: Some(13),
            ..Selection::default()
        };
        assert_eq!(
            selection.validate(),
            Err(SelectionError::InvalidMonth(13))
        );

        let selection = Selection {
            month: Some(12),
            ..Selection::default()
        };
        assert_eq!(selection.validate(), Ok(()));
        assert_eq!(Selection::default().validate(), Ok(()));
    }
}
