use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Upstream query type. Serialized with the exact wire names the
/// realtime API expects in the `source` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "google_shopping_search")]
    Search,
    #[serde(rename = "google_shopping_product")]
    Product,
    #[serde(rename = "google_shopping_pricing")]
    Pricing,
}

impl Source {
    /// Short mode name, used for default output file paths and logging.
    pub fn mode(&self) -> &'static str {
        match self {
            Source::Search => "search",
            Source::Product => "product",
            Source::Pricing => "pricing",
        }
    }

    /// The fixed column list of the table this source extracts into.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Source::Search => &["Product Title", "Price", "Store"],
            Source::Product => &[
                "Product Title",
                "Product Details",
                "Highlights",
                "Rating",
                "Reviews Count",
            ],
            Source::Pricing => &[
                "Product Name",
                "Special Offer",
                "Item Price",
                "Total Price",
                "Shipping",
            ],
        }
    }
}

/// A key/value pair narrowing or sorting upstream results
/// (e.g. `sort_by=pd`, `min_price=30`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextFilter {
    pub key: String,
    pub value: serde_json::Value,
}

impl ContextFilter {
    pub fn new(key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Parse a `key=value` CLI pair. Values that parse as JSON numbers are
    /// sent as numbers, everything else as a string.
    pub fn parse(pair: &str) -> Result<Self, AppError> {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            AppError::SerializationError(serde::de::Error::custom(format!(
                "context filter must be key=value, got: {pair}"
            )))
        })?;
        let value = match value.parse::<serde_json::Number>() {
            Ok(n) => serde_json::Value::Number(n),
            Err(_) => serde_json::Value::from(value),
        };
        Ok(Self::new(key, value))
    }
}

/// One upstream query, immutable once built.
///
/// Serializes directly to the request body the realtime API expects.
/// `pages` and `context` are omitted when unset/empty; product and pricing
/// queries carry neither.
#[derive(Debug, Clone, Serialize)]
pub struct QueryConfig {
    pub source: Source,
    pub domain: String,
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<ContextFilter>,
    pub parse: bool,
}

impl QueryConfig {
    /// Create a query against the `com` domain with parsing enabled.
    pub fn new(source: Source, query: impl Into<String>) -> Self {
        Self {
            source,
            domain: "com".to_string(),
            query: query.into(),
            pages: None,
            context: Vec::new(),
            parse: true,
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Request a number of result pages. Clamped to at least 1.
    pub fn with_pages(mut self, pages: u32) -> Self {
        self.pages = Some(pages.max(1));
        self
    }

    pub fn with_context(mut self, filter: ContextFilter) -> Self {
        self.context.push(filter);
        self
    }

    /// Serialize to the request body sent to the upstream API.
    pub fn to_payload(&self) -> Result<serde_json::Value, AppError> {
        Ok(serde_json::to_value(self)?)
    }
}
