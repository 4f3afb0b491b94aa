mod common;

use std::thread;

use common::{balance_sheet_page, profile_page, sectors_page};
use flatstore::{load, Decoder, ErrorKind, Kind};
use market_data::{decode_json, schema, BalanceSheet, Catalog, Endpoint, Sector};
use serde_json::json;

#[test]
fn one_store_many_threads_same_records() {
    let catalog = Catalog::default();
    let config = catalog.config(Endpoint::Sectors);
    let store = load(&sectors_page(50), config.node_index).unwrap();

    let expected: Vec<Sector> = Decoder::new(&store, config).unwrap().many().unwrap();
    assert_eq!(expected.len(), 50);

    thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| Decoder::new(&store, config).and_then(|d| d.many::<Sector>())))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), expected);
        }
    });
}

#[test]
fn independent_documents_decode_in_parallel() {
    let catalog = Catalog::default();
    let config = catalog.config(Endpoint::BalanceSheets);
    let pages: Vec<Vec<u8>> = (0..4).map(|_| balance_sheet_page()).collect();

    let decoded: Vec<Vec<BalanceSheet>> = thread::scope(|s| {
        let handles: Vec<_> = pages
            .iter()
            .map(|page| s.spawn(move || flatstore::decode_many::<BalanceSheet>(page, config)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap().unwrap()).collect()
    });
    assert!(decoded.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn dispatch_yields_arrays_for_sequences_and_objects_for_scalars() {
    let catalog = Catalog::default();

    let sheets = decode_json(Endpoint::BalanceSheets, &balance_sheet_page(), &catalog).unwrap();
    let rows = sheets.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["datekey"], json!("2024-12-31"));
    assert_eq!(rows[0]["total_debt"], json!(10_463_000_000.0));

    let profile = decode_json(Endpoint::StockProfile, &profile_page(), &catalog).unwrap();
    assert_eq!(profile["industry"], json!("Semiconductors"));
    assert_eq!(profile["founded"], json!(1993));
}

#[test]
fn dispatch_errors_name_the_endpoint() {
    let err = decode_json(Endpoint::Industries, &sectors_page(1), &Catalog::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structural);
    assert_eq!(err.path(), Some("industries: nodes[2].data[0].industries"));

    let err = decode_json(Endpoint::MarketNews, b"<html>", &Catalog::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Json);
    assert!(err.to_string().contains("market_news"), "{err}");
}

#[test]
fn every_endpoint_has_a_field_table() {
    for endpoint in Endpoint::ALL {
        let table = schema(endpoint);
        assert!(!table.fields.is_empty(), "{endpoint}");
        assert!(table.required().count() <= table.fields.len());
    }
    assert_eq!(schema(Endpoint::EtfOverview).field("top_holdings").unwrap().kind, Kind::Records);
    assert_eq!(schema(Endpoint::StockProfile).field("industry").unwrap().hops, 2);
}
