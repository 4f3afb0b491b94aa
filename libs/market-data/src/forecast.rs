use flatstore::{flat_record, load, optional, required, DecodeError, Decoder};
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Endpoint};

flat_record! {
    /// Analyst estimate for one fiscal quarter.
    pub struct Estimation {
        pub date: String = optional("dates"),
        pub eps: f64 = optional("eps"),
        pub eps_growth: f64 = optional("epsGrowth"),
        pub fiscal_quarter: String = optional("fiscalQuarter"),
        pub fiscal_year: String = required("fiscalYear"),
        pub revenue: f64 = optional("revenue"),
        pub revenue_growth: f64 = optional("revenueGrowth"),
    }
}

flat_record! {
    /// Analyst price target summary.
    pub struct TargetPrice {
        pub average: f64 = required("average"),
        pub high: f64 = required("high"),
        pub low: f64 = required("low"),
        pub median: f64 = required("median"),
    }
}

/// Everything the forecast page carries: quarterly estimates plus the
/// price target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockForecast {
    pub estimations: Vec<Estimation>,
    pub target_price: TargetPrice,
}

/// Decode both parts of a forecast page from one parse of the document.
pub fn decode_forecast(bytes: &[u8], catalog: &Catalog) -> Result<StockForecast, DecodeError> {
    let estimates = catalog.config(Endpoint::Estimations);
    let targets = catalog.config(Endpoint::TargetPrice);
    if estimates.node_index != targets.node_index {
        return Err(DecodeError::Config(format!(
            "forecast parts live in different nodes ({} and {})",
            estimates.node_index, targets.node_index
        )));
    }

    let store = load(bytes, estimates.node_index)?;
    let estimations = Decoder::new(&store, estimates)?
        .many::<Estimation>()
        .map_err(|e| e.with_context(Endpoint::Estimations))?;
    let target_price = Decoder::new(&store, targets)?
        .one::<TargetPrice>()
        .map_err(|e| e.with_context(Endpoint::TargetPrice))?;

    tracing::debug!(quarters = estimations.len(), "decoded forecast");
    Ok(StockForecast { estimations, target_price })
}
