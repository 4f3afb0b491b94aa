use flatstore::{flat_record, optional, LabeledPairs};

pub const ASSET_CLASS_LABEL: &str = "Asset Class";
pub const CATEGORY_LABEL: &str = "Category";

flat_record! {
    /// Top holding of an ETF. Weight is kept as published (`"7.25%"`).
    pub struct EtfHolding {
        pub symbol: String = optional("s"),
        pub name: String = optional("n"),
        pub weight: String = optional("as"),
    }
}

flat_record! {
    /// ETF overview page. Figures are display strings (`"$512.3B"`,
    /// `"0.09%"`), the way the page renders them. Top holdings come from
    /// `holdingsTable: {count, holdings}`.
    pub struct EtfOverview {
        pub symbol: String = optional("symbol"),
        pub description: String = optional("description"),
        pub aum: String = optional("aum"),
        pub nav: String = optional("nav"),
        pub expense_ratio: String = optional("expenseRatio"),
        pub pe_ratio: String = optional("peRatio"),
        pub dividend_per_share: String = optional("dps"),
        pub dividend_yield: String = optional("dividendYield"),
        pub payout_ratio: String = optional("payoutRatio"),
        pub one_year_return: String = optional("ch1y"),
        pub beta: String = optional("beta"),
        pub number_of_holdings: i64 = optional("holdings"),
        pub website: String = optional("etf_website"),
        pub info: LabeledPairs = optional("infoTable"),
        pub top_holdings: Vec<EtfHolding> = optional("holdingsTable").within("holdings"),
    }
}

impl EtfOverview {
    pub fn asset_class(&self) -> &str {
        self.info.get(ASSET_CLASS_LABEL).unwrap_or_default()
    }

    pub fn category(&self) -> &str {
        self.info.get(CATEGORY_LABEL).unwrap_or_default()
    }
}
