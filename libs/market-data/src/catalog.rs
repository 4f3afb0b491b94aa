use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use flatstore::{DecodeError, EndpointConfig, Mode};
use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════
//  Endpoint
// ════════════════════════════════════════════════════════════════

/// Every page payload the decoder knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    BalanceSheets,
    CashFlows,
    IncomeStatements,
    FinancialRatios,
    Estimations,
    TargetPrice,
    Sectors,
    SectorStocks,
    Industries,
    IndustryStocks,
    StockProfile,
    EtfOverview,
    MarketNews,
}

impl Endpoint {
    pub const ALL: [Endpoint; 13] = [
        Endpoint::BalanceSheets,
        Endpoint::CashFlows,
        Endpoint::IncomeStatements,
        Endpoint::FinancialRatios,
        Endpoint::Estimations,
        Endpoint::TargetPrice,
        Endpoint::Sectors,
        Endpoint::SectorStocks,
        Endpoint::Industries,
        Endpoint::IndustryStocks,
        Endpoint::StockProfile,
        Endpoint::EtfOverview,
        Endpoint::MarketNews,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Endpoint::BalanceSheets => "balance_sheets",
            Endpoint::CashFlows => "cash_flows",
            Endpoint::IncomeStatements => "income_statements",
            Endpoint::FinancialRatios => "financial_ratios",
            Endpoint::Estimations => "estimations",
            Endpoint::TargetPrice => "target_price",
            Endpoint::Sectors => "sectors",
            Endpoint::SectorStocks => "sector_stocks",
            Endpoint::Industries => "industries",
            Endpoint::IndustryStocks => "industry_stocks",
            Endpoint::StockProfile => "stock_profile",
            Endpoint::EtfOverview => "etf_overview",
            Endpoint::MarketNews => "market_news",
        }
    }

    /// Page path relative to the site root. `{symbol}`, `{sector}` or
    /// `{industry}` is filled in by [`Endpoint::page_path`].
    pub fn page_template(self) -> &'static str {
        match self {
            Endpoint::BalanceSheets => "stocks/{symbol}/financials/balance-sheet/__data.json?p=quarterly",
            Endpoint::CashFlows => "stocks/{symbol}/financials/cash-flow-statement/__data.json?p=quarterly",
            Endpoint::IncomeStatements => "stocks/{symbol}/financials/__data.json?p=quarterly",
            Endpoint::FinancialRatios => "stocks/{symbol}/financials/ratios/__data.json?p=quarterly",
            Endpoint::Estimations | Endpoint::TargetPrice => "stocks/{symbol}/forecast/__data.json",
            Endpoint::Sectors => "stocks/industry/sectors/__data.json",
            Endpoint::SectorStocks => "stocks/sector/{sector}/__data.json",
            Endpoint::Industries => "stocks/industry/all/__data.json",
            Endpoint::IndustryStocks => "stocks/industry/{industry}/__data.json",
            Endpoint::StockProfile => "stocks/{symbol}/company/__data.json",
            Endpoint::EtfOverview => "etf/{symbol}/__data.json",
            Endpoint::MarketNews => "news/__data.json",
        }
    }

    /// Placeholder the page template expects, if any.
    pub fn subject(self) -> Option<&'static str> {
        match self {
            Endpoint::Sectors | Endpoint::Industries | Endpoint::MarketNews => None,
            Endpoint::SectorStocks => Some("sector"),
            Endpoint::IndustryStocks => Some("industry"),
            _ => Some("symbol"),
        }
    }

    /// Page path for `subject`. Symbols are lowercased, as the site expects.
    pub fn page_path(self, subject: Option<&str>) -> Result<String, DecodeError> {
        let template = self.page_template();
        match (self.subject(), subject) {
            (None, _) => Ok(template.to_string()),
            (Some(placeholder), Some(value)) if !value.is_empty() => {
                Ok(template.replace(&format!("{{{placeholder}}}"), &value.to_lowercase()))
            }
            (Some(placeholder), _) => Err(DecodeError::Config(format!("{self} needs a {placeholder}"))),
        }
    }

    /// Built-in layout of the endpoint's payload.
    pub fn default_config(self) -> EndpointConfig {
        match self {
            Endpoint::BalanceSheets
            | Endpoint::CashFlows
            | Endpoint::IncomeStatements
            | Endpoint::FinancialRatios => EndpointConfig::tabular(2, "financialData", "datekey"),
            Endpoint::Estimations => {
                EndpointConfig::tabular(2, "estimates", "fiscalYear").descend(&["table", "quarterly"])
            }
            Endpoint::TargetPrice => EndpointConfig::scalar(2, "targets"),
            Endpoint::Sectors => EndpointConfig::listing(2, "sectors"),
            Endpoint::SectorStocks => EndpointConfig::listing(1, "data"),
            Endpoint::Industries => EndpointConfig::listing(2, "industries"),
            Endpoint::IndustryStocks => EndpointConfig::listing(2, "data"),
            Endpoint::StockProfile => EndpointConfig::scalar(2, "profile"),
            Endpoint::EtfOverview => EndpointConfig::scalar(2, "data"),
            Endpoint::MarketNews => EndpointConfig::listing(1, "data"),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Endpoint {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        Endpoint::ALL
            .into_iter()
            .find(|e| e.name() == wanted)
            .ok_or_else(|| DecodeError::Config(format!("unknown endpoint '{s}'")))
    }
}

// ════════════════════════════════════════════════════════════════
//  Overrides
// ════════════════════════════════════════════════════════════════

/// Per-endpoint layout override, for when the site moves things around.
/// Unset fields keep the built-in value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EndpointOverride {
    pub node_index: Option<usize>,
    pub anchor: Option<String>,
    pub descend: Option<Vec<String>>,
    /// Tabular endpoints only.
    pub key_field: Option<String>,
    pub sentinels: Option<Vec<String>>,
}

impl EndpointOverride {
    pub fn apply(&self, endpoint: Endpoint, config: &mut EndpointConfig) -> Result<(), DecodeError> {
        if let Some(node_index) = self.node_index {
            config.node_index = node_index;
        }
        if let Some(anchor) = &self.anchor {
            if anchor.is_empty() {
                return Err(DecodeError::Config(format!("{endpoint}: anchor must not be empty")));
            }
            config.anchor = anchor.clone();
        }
        if let Some(descend) = &self.descend {
            config.descend = descend.clone();
        }
        if let Some(key) = &self.key_field {
            match &mut config.mode {
                Mode::Tabular { key_field } => *key_field = key.clone(),
                other => {
                    return Err(DecodeError::Config(format!(
                        "{endpoint}: key_field given for {other} endpoint"
                    )));
                }
            }
        }
        if let Some(sentinels) = &self.sentinels {
            config.sentinels = sentinels.clone();
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════
//  Catalog
// ════════════════════════════════════════════════════════════════

/// Resolved configuration of every endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    configs: BTreeMap<Endpoint, EndpointConfig>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            configs: Endpoint::ALL.into_iter().map(|e| (e, e.default_config())).collect(),
        }
    }
}

impl Catalog {
    /// Built-in layouts with `overrides` applied on top.
    pub fn with_overrides(overrides: &BTreeMap<Endpoint, EndpointOverride>) -> Result<Self, DecodeError> {
        let mut catalog = Self::default();
        for (endpoint, patch) in overrides {
            let config = catalog.config_mut(*endpoint);
            patch.apply(*endpoint, config)?;
            tracing::debug!(endpoint = %endpoint, anchor = %config.anchor_path(), node = config.node_index, "endpoint overridden");
        }
        Ok(catalog)
    }

    pub fn config(&self, endpoint: Endpoint) -> &EndpointConfig {
        // Populated for every endpoint at construction.
        &self.configs[&endpoint]
    }

    fn config_mut(&mut self, endpoint: Endpoint) -> &mut EndpointConfig {
        self.configs.entry(endpoint).or_insert_with(|| endpoint.default_config())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Endpoint, &EndpointConfig)> {
        self.configs.iter().map(|(e, c)| (*e, c))
    }
}
