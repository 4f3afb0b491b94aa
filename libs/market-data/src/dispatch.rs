use flatstore::{decode_many, decode_one, DecodeError, Record, RecordSchema};
use serde::Serialize;

use crate::catalog::{Catalog, Endpoint};
use crate::etf::EtfOverview;
use crate::forecast::{decode_forecast, Estimation, TargetPrice};
use crate::listings::{Industry, IndustryStock, Sector, SectorStock};
use crate::news::NewsArticle;
use crate::profile::StockProfile;
use crate::statements::{BalanceSheet, CashFlow, FinancialRatios, IncomeStatement};

/// Field table of the record an endpoint yields.
pub fn schema(endpoint: Endpoint) -> &'static RecordSchema {
    match endpoint {
        Endpoint::BalanceSheets => BalanceSheet::schema(),
        Endpoint::CashFlows => CashFlow::schema(),
        Endpoint::IncomeStatements => IncomeStatement::schema(),
        Endpoint::FinancialRatios => FinancialRatios::schema(),
        Endpoint::Estimations => Estimation::schema(),
        Endpoint::TargetPrice => TargetPrice::schema(),
        Endpoint::Sectors => Sector::schema(),
        Endpoint::SectorStocks => SectorStock::schema(),
        Endpoint::Industries => Industry::schema(),
        Endpoint::IndustryStocks => IndustryStock::schema(),
        Endpoint::StockProfile => StockProfile::schema(),
        Endpoint::EtfOverview => EtfOverview::schema(),
        Endpoint::MarketNews => NewsArticle::schema(),
    }
}

/// Decode `bytes` as `endpoint` and return the records as JSON: an array
/// for tabular and listing endpoints, an object for scalar ones.
///
/// Errors carry the endpoint name as context.
pub fn decode_json(endpoint: Endpoint, bytes: &[u8], catalog: &Catalog) -> Result<serde_json::Value, DecodeError> {
    let config = catalog.config(endpoint);
    let result = match endpoint {
        Endpoint::BalanceSheets => decode_many::<BalanceSheet>(bytes, config).and_then(to_json),
        Endpoint::CashFlows => decode_many::<CashFlow>(bytes, config).and_then(to_json),
        Endpoint::IncomeStatements => decode_many::<IncomeStatement>(bytes, config).and_then(to_json),
        Endpoint::FinancialRatios => decode_many::<FinancialRatios>(bytes, config).and_then(to_json),
        Endpoint::Estimations => decode_many::<Estimation>(bytes, config).and_then(to_json),
        Endpoint::TargetPrice => decode_one::<TargetPrice>(bytes, config).and_then(to_json),
        Endpoint::Sectors => decode_many::<Sector>(bytes, config).and_then(to_json),
        Endpoint::SectorStocks => decode_many::<SectorStock>(bytes, config).and_then(to_json),
        Endpoint::Industries => decode_many::<Industry>(bytes, config).and_then(to_json),
        Endpoint::IndustryStocks => decode_many::<IndustryStock>(bytes, config).and_then(to_json),
        Endpoint::StockProfile => decode_one::<StockProfile>(bytes, config).and_then(to_json),
        Endpoint::EtfOverview => decode_one::<EtfOverview>(bytes, config).and_then(to_json),
        Endpoint::MarketNews => decode_many::<NewsArticle>(bytes, config).and_then(to_json),
    };
    result.map_err(|e| e.with_context(endpoint))
}

/// Decode a whole forecast page (estimations plus target price) as one
/// `StockForecast` object.
pub fn decode_forecast_json(bytes: &[u8], catalog: &Catalog) -> Result<serde_json::Value, DecodeError> {
    decode_forecast(bytes, catalog)
        .and_then(to_json)
        .map_err(|e| e.with_context("forecast"))
}

fn to_json<T: Serialize>(records: T) -> Result<serde_json::Value, DecodeError> {
    Ok(serde_json::to_value(records)?)
}
