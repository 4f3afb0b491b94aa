use clap::Args;
use market_data::{schema, Catalog};
use serde_json::json;

use super::decode::print_json;
use super::error::MarketDecodeError;

#[derive(Args, Clone, Debug)]
pub struct EndpointsArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Include each endpoint's field table (JSON output only)
    #[arg(long, requires = "json")]
    pub fields: bool,
}

pub fn run(catalog: &Catalog, args: &EndpointsArgs) -> Result<(), MarketDecodeError> {
    if args.json {
        print_json(&describe(catalog, args.fields), true)
    } else {
        print!("{}", table(catalog));
        Ok(())
    }
}

/// Effective layout of every endpoint, overrides included.
pub fn describe(catalog: &Catalog, with_fields: bool) -> serde_json::Value {
    let entries = catalog
        .iter()
        .map(|(endpoint, config)| {
            let mut entry = json!({
                "endpoint": endpoint.name(),
                "page": endpoint.page_template(),
                "record": schema(endpoint).name,
                "config": config,
            });
            if with_fields {
                entry["fields"] = json!(schema(endpoint).fields);
            }
            entry
        })
        .collect();
    serde_json::Value::Array(entries)
}

pub fn table(catalog: &Catalog) -> String {
    let mut out = String::new();
    for (endpoint, config) in catalog.iter() {
        out.push_str(&format!(
            "{:<18} node={} {:<28} {:<24} {}\n",
            endpoint.name(),
            config.node_index,
            config.anchor_path(),
            config.mode.to_string(),
            endpoint.page_template(),
        ));
    }
    out
}
