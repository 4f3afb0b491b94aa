use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Args;
use serde::Deserialize;

use market_data::{Catalog, Endpoint, EndpointOverride};

use super::error::MarketDecodeError;

pub const DEFAULT_CONCURRENCY: usize = 4;

// ═══════════════════════════════════════════════════════════════
//  Config file (TOML)
// ═══════════════════════════════════════════════════════════════

/// ```toml
/// pretty = true
/// concurrency = 8
///
/// [endpoints.sector_stocks]
/// node_index = 2
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub pretty: Option<bool>,
    pub concurrency: Option<usize>,
    /// Layout overrides keyed by endpoint name.
    #[serde(default)]
    pub endpoints: BTreeMap<String, EndpointOverride>,
}

pub fn load_config(path: &Path) -> Result<Config, MarketDecodeError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| MarketDecodeError::Config(format!("cannot read config {}: {e}", path.display())))?;
    toml::from_str(&content)
        .map_err(|e| MarketDecodeError::Config(format!("bad config {}: {e}", path.display())))
}

/// A missing config file means built-in layouts; an unreadable or broken
/// one is an error.
fn load_or_default(path: &Path) -> Result<Config, MarketDecodeError> {
    match load_config(path) {
        Ok(cfg) => Ok(cfg),
        Err(_) if !path.exists() => {
            tracing::debug!(path = %path.display(), "no config file, using built-in layouts");
            Ok(Config::default())
        }
        Err(e) => Err(e),
    }
}

impl Config {
    /// Endpoint catalog with this file's overrides applied.
    pub fn catalog(&self) -> Result<Catalog, MarketDecodeError> {
        let overrides = self
            .endpoints
            .iter()
            .map(|(name, patch)| Ok((name.parse::<Endpoint>()?, patch.clone())))
            .collect::<Result<BTreeMap<_, _>, MarketDecodeError>>()?;
        Ok(Catalog::with_overrides(&overrides)?)
    }
}

// ═══════════════════════════════════════════════════════════════
//  CLI args
// ═══════════════════════════════════════════════════════════════

#[derive(Args, Clone, Debug)]
pub struct CommonArgs {
    /// Path to config.toml
    #[arg(long, default_value = "config.toml", env = "MARKET_DECODE_CONFIG", global = true)]
    pub config: PathBuf,
}

#[derive(Args, Clone, Debug)]
pub struct DecodeArgs {
    /// Endpoint the documents belong to (see `endpoints`), or `forecast`
    /// for the whole forecast page
    pub endpoint: String,

    /// `__data.json` files to decode; `-` reads stdin
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Documents decoded at once
    #[arg(long, env = "MARKET_DECODE_CONCURRENCY")]
    pub concurrency: Option<usize>,

    /// Override the node index for this run
    #[arg(long)]
    pub node_index: Option<usize>,

    /// Override the anchor field for this run
    #[arg(long)]
    pub anchor: Option<String>,
}

// ═══════════════════════════════════════════════════════════════
//  Target
// ═══════════════════════════════════════════════════════════════

const FORECAST: &str = "forecast";

/// What `decode` produces: one endpoint's records, or the composite
/// forecast (estimations + target price from the same page).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Endpoint(Endpoint),
    Forecast,
}

impl Target {
    /// Endpoints whose layout the target reads.
    pub fn endpoints(self) -> Vec<Endpoint> {
        match self {
            Target::Endpoint(endpoint) => vec![endpoint],
            Target::Forecast => vec![Endpoint::Estimations, Endpoint::TargetPrice],
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Endpoint(endpoint) => fmt::Display::fmt(endpoint, f),
            Target::Forecast => f.write_str(FORECAST),
        }
    }
}

impl FromStr for Target {
    type Err = MarketDecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == FORECAST {
            return Ok(Target::Forecast);
        }
        Ok(Target::Endpoint(s.parse()?))
    }
}

// ═══════════════════════════════════════════════════════════════
//  Effective — merged config
// ═══════════════════════════════════════════════════════════════

/// Final settings after merging: config.toml < env/CLI
#[derive(Debug)]
pub struct Effective {
    pub target: Target,
    pub files: Vec<PathBuf>,
    pub pretty: bool,
    pub concurrency: usize,
    pub catalog: Catalog,
}

impl Effective {
    pub fn new(common: &CommonArgs, args: &DecodeArgs) -> Result<Self, MarketDecodeError> {
        let mut cfg = load_or_default(&common.config)?;
        let target: Target = args.endpoint.parse()?;
        if target == Target::Forecast && args.anchor.is_some() {
            return Err(MarketDecodeError::Config(
                "--anchor names one endpoint; set forecast anchors per endpoint in the config file".into(),
            ));
        }

        if args.node_index.is_some() || args.anchor.is_some() {
            for endpoint in target.endpoints() {
                let patch = cfg.endpoints.entry(endpoint.name().to_string()).or_default();
                patch.node_index = args.node_index.or(patch.node_index);
                patch.anchor = args.anchor.clone().or(patch.anchor.take());
            }
        }

        let concurrency = args.concurrency.or(cfg.concurrency).unwrap_or(DEFAULT_CONCURRENCY);
        if concurrency == 0 {
            return Err(MarketDecodeError::Config("concurrency must be at least 1".into()));
        }

        Ok(Self {
            target,
            files: args.files.clone(),
            pretty: args.pretty || cfg.pretty.unwrap_or(false),
            concurrency,
            catalog: cfg.catalog()?,
        })
    }
}

/// Catalog for commands that only read configuration.
pub fn catalog(common: &CommonArgs) -> Result<Catalog, MarketDecodeError> {
    load_or_default(&common.config)?.catalog()
}
