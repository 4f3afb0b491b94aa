use flatstore::{flat_record, optional, required};

flat_record! {
    /// Market news headline.
    pub struct NewsArticle {
        pub url: String = required("url"),
        pub image: String = optional("img"),
        pub title: String = required("title"),
        pub text: String = optional("text"),
        pub source: String = optional("source"),
        /// Publication time as rendered by the page.
        pub time: String = optional("time"),
    }
}
