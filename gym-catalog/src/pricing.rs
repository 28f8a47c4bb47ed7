use gym_core::{Service, ServiceSelection};
use serde::{Deserialize, Serialize};

/// Membership price list, in whole currency units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTable {
    /// One-off fee charged on every registration
    pub admission_fee: i64,
    pub gym_per_month: i64,
    pub cardio_per_month: i64,
    pub crossfit_per_month: i64,
    pub pt_per_month: i64,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            admission_fee: 100,
            gym_per_month: 1500,
            cardio_per_month: 500,
            crossfit_per_month: 500,
            pt_per_month: 12000,
        }
    }
}

impl PriceTable {
    pub fn rate(&self, service: Service) -> i64 {
        match service {
            Service::Gym => self.gym_per_month,
            Service::Cardio => self.cardio_per_month,
            Service::Crossfit => self.crossfit_per_month,
            Service::PersonalTraining => self.pt_per_month,
        }
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.admission_fee < 0 {
            return Err(CatalogError::NegativePrice("admission_fee".to_string()));
        }
        for service in Service::ALL {
            if self.rate(service) < 0 {
                return Err(CatalogError::NegativePrice(service.display_name().to_string()));
            }
        }
        Ok(())
    }
}

/// One line of the price summary shown before checkout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLine {
    pub label: String,
    pub service: Option<Service>,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub lines: Vec<PriceLine>,
    pub subtotal: i64,
}

/// Base membership pricing
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    table: PriceTable,
}

impl PricingEngine {
    pub fn new(table: PriceTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PriceTable {
        &self.table
    }

    /// Sum of per-month rates of the selected services
    pub fn monthly_total(&self, selection: &ServiceSelection) -> i64 {
        selection.selected().map(|s| self.table.rate(s)).sum()
    }

    /// admission fee + months x monthly total. Zero months or an empty
    /// selection are not rejected here; both leave just the admission fee.
    pub fn base_price(&self, selection: &ServiceSelection, months: u32) -> i64 {
        self.table.admission_fee + self.monthly_total(selection) * i64::from(months)
    }

    /// Line-by-line composition of `base_price`
    pub fn breakdown(&self, selection: &ServiceSelection, months: u32) -> PriceBreakdown {
        let mut lines = vec![PriceLine {
            label: "Admission Fee".to_string(),
            service: None,
            amount: self.table.admission_fee,
        }];

        for service in selection.selected() {
            lines.push(PriceLine {
                label: format!("{} ({} months)", service.display_name(), months),
                service: Some(service),
                amount: self.table.rate(service) * i64::from(months),
            });
        }

        let subtotal = lines.iter().map(|l| l.amount).sum();
        PriceBreakdown { lines, subtotal }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Price cannot be negative: {0}")]
    NegativePrice(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> PricingEngine {
        PricingEngine::new(PriceTable::default())
    }

    #[test]
    fn test_base_price_single_service() {
        let gym = ServiceSelection::of(&[Service::Gym]);
        assert_eq!(engine().base_price(&gym, 3), 4600);
        assert_eq!(engine().base_price(&gym, 1), 1600);
    }

    #[test]
    fn test_base_price_all_services() {
        let all = ServiceSelection::of(&Service::ALL);
        assert_eq!(engine().monthly_total(&all), 14500);
        assert_eq!(engine().base_price(&all, 2), 100 + 2 * 14500);
    }

    #[test]
    fn test_base_price_without_services_is_admission_fee() {
        let none = ServiceSelection::default();
        for months in [0, 1, 6, 24] {
            assert_eq!(engine().base_price(&none, months), 100);
        }
        let gym = ServiceSelection::of(&[Service::Gym]);
        assert_eq!(engine().base_price(&gym, 0), 100);
    }

    #[test]
    fn test_breakdown_matches_base_price() {
        let selection = ServiceSelection::of(&[Service::Gym, Service::PersonalTraining]);
        let breakdown = engine().breakdown(&selection, 12);

        assert_eq!(breakdown.lines.len(), 3);
        assert_eq!(breakdown.lines[1].label, "Gym (12 months)");
        assert_eq!(breakdown.lines[2].amount, 144000);
        assert_eq!(breakdown.subtotal, engine().base_price(&selection, 12));
        assert_eq!(breakdown.subtotal, 162100);
    }

    #[test]
    fn test_table_validation() {
        assert!(PriceTable::default().validate().is_ok());
        let table = PriceTable {
            cardio_per_month: -1,
            ..PriceTable::default()
        };
        assert!(matches!(table.validate(), Err(CatalogError::NegativePrice(_))));
    }

    #[test]
    fn test_table_deserializes_from_config_shape() {
        let table: PriceTable = serde_json::from_str(
            r#"{"admission_fee":200,"gym_per_month":1000,"cardio_per_month":400,"crossfit_per_month":600,"pt_per_month":9000}"#,
        )
        .unwrap();
        assert_eq!(table.rate(Service::Crossfit), 600);
        assert_eq!(PricingEngine::new(table).base_price(&ServiceSelection::of(&[Service::Cardio]), 2), 1000);
    }
}
