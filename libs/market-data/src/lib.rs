pub mod catalog;
pub mod dispatch;
pub mod etf;
pub mod forecast;
pub mod listings;
pub mod news;
pub mod profile;
pub mod statements;

pub use catalog::{Catalog, Endpoint, EndpointOverride};
pub use dispatch::{decode_forecast_json, decode_json, schema};
pub use etf::{EtfHolding, EtfOverview};
pub use forecast::{decode_forecast, Estimation, StockForecast, TargetPrice};
pub use listings::{Industry, IndustryStock, Sector, SectorStock};
pub use news::NewsArticle;
pub use profile::StockProfile;
pub use statements::{BalanceSheet, CashFlow, FinancialRatios, IncomeStatement};
