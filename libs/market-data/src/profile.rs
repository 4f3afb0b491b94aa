use flatstore::{flat_record, optional, required};

flat_record! {
    /// Company profile page.
    ///
    /// `industry` and `sector` sit behind a `{"value": index}` wrapper; the
    /// long description is published on the root descriptor, not the profile.
    pub struct StockProfile {
        pub name: String = required("name"),
        pub description: String = optional("description").from_root(),
        pub country: String = optional("country"),
        pub founded: i64 = optional("founded"),
        pub ipo_date: String = optional("ipoDate"),
        pub industry: String = optional("industry").hops(2),
        pub sector: String = optional("sector").hops(2),
        pub ceo: String = optional("ceo"),
    }
}
