#![allow(dead_code)]

use serde_json::{json, Map, Value};

/// Assembles a flat store slot by slot, the way the page serializer lays
/// one out: slot 0 is the root descriptor, everything else is appended.
pub struct StoreBuilder {
    values: Vec<Value>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self { values: vec![json!({})] }
    }

    pub fn push(&mut self, value: Value) -> usize {
        self.values.push(value);
        self.values.len() - 1
    }

    /// Values first, then the column of their indices.
    pub fn column(&mut self, cells: impl IntoIterator<Item = Value>) -> usize {
        let indices: Vec<usize> = cells.into_iter().map(|c| self.push(c)).collect();
        self.push(json!(indices))
    }

    pub fn list(&mut self, indices: &[usize]) -> usize {
        self.push(json!(indices))
    }

    /// `{"value": index}` in front of `value`.
    pub fn wrapped(&mut self, value: Value) -> usize {
        let inner = self.push(value);
        self.push(json!({ "value": inner }))
    }

    pub fn descriptor(&mut self, fields: &[(&str, usize)]) -> usize {
        self.push(dict(fields))
    }

    /// Descriptor whose fields are plain values pushed on the fly.
    pub fn record(&mut self, fields: &[(&str, Value)]) -> usize {
        let slots: Vec<(&str, usize)> = fields.iter().map(|(k, v)| (*k, self.push(v.clone()))).collect();
        self.descriptor(&slots)
    }

    pub fn root(&mut self, fields: &[(&str, usize)]) {
        self.values[0] = dict(fields);
    }

    pub fn data(&self) -> Value {
        Value::Array(self.values.clone())
    }

    /// Full `__data.json` body with the store in `nodes[node_index]`.
    pub fn document(&self, node_index: usize) -> Vec<u8> {
        let mut nodes = vec![json!({"type": "data", "data": [{}], "uses": {}}); node_index];
        nodes.push(json!({"type": "data", "data": self.data(), "uses": {"params": ["symbol"]}}));
        serde_json::to_vec(&json!({"type": "data", "nodes": nodes})).unwrap()
    }
}

fn dict(fields: &[(&str, usize)]) -> Value {
    Value::Object(fields.iter().map(|(k, i)| (k.to_string(), json!(i))).collect::<Map<_, _>>())
}

/// Two-quarter balance sheet page. The second quarter has no `cashneq`
/// and a premium-gated `debt`.
pub fn balance_sheet_page() -> Vec<u8> {
    let mut b = StoreBuilder::new();
    let datekey = b.column([json!("2024-12-31"), json!("2024-09-30")]);
    let fiscal_year = b.column([json!("2025"), json!("2025")]);
    let fiscal_quarter = b.column([json!("Q4"), json!("Q3")]);
    let cashneq = b.column([json!(8_589_000_000.0)]);
    let debt = b.column([json!(10_463_000_000.0), json!("[PRO]")]);
    let assets = b.column([json!(111_601_000_000.0), json!(96_013_000_000.0)]);
    let financial = b.descriptor(&[
        ("datekey", datekey),
        ("fiscalYear", fiscal_year),
        ("fiscalQuarter", fiscal_quarter),
        ("cashneq", cashneq),
        ("debt", debt),
        ("assets", assets),
    ]);
    b.root(&[("financialData", financial)]);
    b.document(2)
}

/// Company page with a wrapped industry and sector.
pub fn profile_page() -> Vec<u8> {
    let mut b = StoreBuilder::new();
    let name = b.push(json!("NVIDIA Corporation"));
    let country = b.push(json!("United States"));
    let founded = b.push(json!(1993));
    let ipo = b.push(json!("Jan 22, 1999"));
    let industry = b.wrapped(json!("Semiconductors"));
    let sector = b.wrapped(json!("Technology"));
    let ceo = b.push(json!("Jensen Huang"));
    let profile = b.descriptor(&[
        ("name", name),
        ("country", country),
        ("founded", founded),
        ("ipoDate", ipo),
        ("industry", industry),
        ("sector", sector),
        ("ceo", ceo),
    ]);
    let description = b.push(json!("NVIDIA designs GPUs."));
    b.root(&[("profile", profile), ("description", description)]);
    b.document(2)
}

/// Forecast page: two estimate quarters plus a price target.
pub fn forecast_page() -> Vec<u8> {
    let mut b = StoreBuilder::new();
    let dates = b.column([json!("2025-04-30"), json!("2025-07-31")]);
    let eps = b.column([json!(0.93), json!("[PRO]")]);
    let fiscal_year = b.column([json!("2026"), json!("2026")]);
    let fiscal_quarter = b.column([json!("Q1"), json!("Q2")]);
    let revenue = b.column([json!(43_280_000_000.0), json!(45_900_000_000.0)]);
    let last_date = b.push(json!("2025-01-31"));
    let quarterly = b.descriptor(&[
        ("dates", dates),
        ("eps", eps),
        ("fiscalYear", fiscal_year),
        ("fiscalQuarter", fiscal_quarter),
        ("revenue", revenue),
        ("lastDate", last_date),
    ]);
    let annual = b.descriptor(&[]);
    let table = b.descriptor(&[("quarterly", quarterly), ("annual", annual)]);
    let estimates = b.descriptor(&[("table", table)]);
    let targets = b.record(&[
        ("average", json!(175.5)),
        ("high", json!(220.0)),
        ("low", json!(120.0)),
        ("median", json!(180.0)),
    ]);
    b.root(&[("estimates", estimates), ("targets", targets)]);
    b.document(2)
}

/// Sector listing page with `count` sectors.
pub fn sectors_page(count: usize) -> Vec<u8> {
    let mut b = StoreBuilder::new();
    let entries: Vec<usize> = (0..count)
        .map(|i| {
            b.record(&[
                ("sector_name", json!(format!("Sector {i}"))),
                ("url", json!(format!("sector-{i}"))),
                ("stocks", json!(100 + i)),
                ("marketCap", json!(1.0e12 + i as f64)),
                ("peRatio", json!(20.5)),
                ("ch1y", json!(12.25)),
            ])
        })
        .collect();
    let list = b.list(&entries);
    b.root(&[("sectors", list)]);
    b.document(2)
}
