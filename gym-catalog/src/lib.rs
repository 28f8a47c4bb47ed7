pub mod pricing;

pub use pricing::{CatalogError, PriceBreakdown, PriceLine, PriceTable, PricingEngine};
