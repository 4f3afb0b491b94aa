//! Sector and industry overviews and their constituent stocks.

use flatstore::{flat_record, optional, required};

flat_record! {
    pub struct Sector {
        pub name: String = required("sector_name"),
        pub url_name: String = optional("url"),
        pub number_of_stocks: i64 = optional("stocks"),
        pub market_cap: f64 = optional("marketCap"),
        pub dividend_yield_pct: f64 = optional("dividendYield"),
        pub pe_ratio: f64 = optional("peRatio"),
        pub profit_margin_pct: f64 = optional("profitMargin"),
        pub one_year_change_pct: f64 = optional("ch1y"),
    }
}

flat_record! {
    pub struct Industry {
        pub name: String = required("industry_name"),
        pub url_name: String = optional("url"),
        pub number_of_stocks: i64 = optional("stocks"),
        pub market_cap: f64 = optional("marketCap"),
        /// Not published for every industry.
        pub dividend_yield_pct: f64 = optional("dividendYield"),
        /// Not published for every industry.
        pub pe_ratio: f64 = optional("peRatio"),
        pub profit_margin_pct: f64 = optional("profitMargin"),
        pub one_year_change_pct: f64 = optional("ch1y"),
    }
}

flat_record! {
    pub struct SectorStock {
        pub symbol: String = required("s"),
        pub company_name: String = optional("n"),
        pub market_cap: f64 = optional("marketCap"),
    }
}

flat_record! {
    pub struct IndustryStock {
        pub symbol: String = required("s"),
        pub company_name: String = optional("n"),
        pub market_cap: f64 = optional("marketCap"),
    }
}
