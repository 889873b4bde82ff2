//! Per-mode extraction of flat records from the decoded API response.
//!
//! Each mode is a pure function from the `results[0].content` subtree to a
//! [`ResultTable`]. Lookups are typed: an absent key fails with
//! [`AppError::MissingFieldError`] naming the key and, for array items, the
//! item index, instead of silently producing a corrupt table.

use serde_json::Value;

use crate::error::AppError;
use crate::query::Source;
use crate::table::ResultTable;

/// Pull `results[0].content` out of a decoded response body.
pub fn content(response: &Value) -> Result<&Value, AppError> {
    let results = response
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            AppError::ResponseFormatError("response has no `results` array".to_string())
        })?;
    results
        .first()
        .and_then(|r| r.get("content"))
        .ok_or_else(|| {
            AppError::ResponseFormatError("`results` has no entry with `content`".to_string())
        })
}

/// Extract a table from response content for the given source.
///
/// Rows appear in upstream order.
pub fn extract(source: Source, content: &Value) -> Result<ResultTable, AppError> {
    match source {
        Source::Search => extract_search(content),
        Source::Product => extract_product(content),
        Source::Pricing => extract_pricing(content),
    }
}

/// Search mode: one row per `content.results.organic` item.
fn extract_search(content: &Value) -> Result<ResultTable, AppError> {
    let organic = field(content, "results", None)?;
    let organic = field(organic, "organic", None)?;
    let items = organic.as_array().ok_or_else(|| {
        AppError::ResponseFormatError("`results.organic` is not an array".to_string())
    })?;

    let mut table = ResultTable::new(Source::Search.columns());
    for (index, item) in items.iter().enumerate() {
        let title = field(item, "title", Some(index))?;
        let price = field(item, "price_str", Some(index))?;
        let store = field(field(item, "merchant", Some(index))?, "name", Some(index))?;
        table.push_row(vec![title.clone(), price.clone(), store.clone()])?;
    }
    Ok(table)
}

/// Product mode: exactly one row, taken from the content root.
fn extract_product(content: &Value) -> Result<ResultTable, AppError> {
    let title = field(content, "title", None)?;
    let details = field(content, "description", None)?;
    let highlights = field(content, "highlights", None)?;
    let reviews = field(content, "reviews", None)?;
    let rating = field(reviews, "rating", None)?;
    let reviews_count = field(reviews, "reviews_count", None)?;

    let mut table = ResultTable::new(Source::Product.columns());
    table.push_row(vec![
        title.clone(),
        details.clone(),
        highlights.clone(),
        rating.clone(),
        reviews_count.clone(),
    ])?;
    Ok(table)
}

/// Pricing mode: one row per `content.pricing` offer, with the product
/// title repeated on every row.
fn extract_pricing(content: &Value) -> Result<ResultTable, AppError> {
    let title = field(content, "title", None)?;
    let pricing = field(content, "pricing", None)?;
    let offers = pricing
        .as_array()
        .ok_or_else(|| AppError::ResponseFormatError("`pricing` is not an array".to_string()))?;

    let mut table = ResultTable::new(Source::Pricing.columns());
    for (index, offer) in offers.iter().enumerate() {
        let details = field(offer, "details", Some(index))?;
        let price = field(offer, "price", Some(index))?;
        let total = field(offer, "price_total", Some(index))?;
        let shipping = field(offer, "price_shipping", Some(index))?;
        table.push_row(vec![
            title.clone(),
            details.clone(),
            price.clone(),
            total.clone(),
            shipping.clone(),
        ])?;
    }
    Ok(table)
}

/// Look up a key, failing with the key name and item index when absent.
fn field<'a>(value: &'a Value, key: &str, index: Option<usize>) -> Result<&'a Value, AppError> {
    value.get(key).ok_or_else(|| AppError::MissingFieldError {
        key: key.to_string(),
        index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{pricing_content, product_content, search_content, search_item};
    use serde_json::json;

    #[test]
    fn content_accessor_unwraps_envelope() {
        let response = json!({"results": [{"content": {"title": "x"}}]});
        assert_eq!(content(&response).unwrap(), &json!({"title": "x"}));
    }

    #[test]
    fn content_accessor_rejects_missing_envelope() {
        let err = content(&json!({"status": "ok"})).unwrap_err();
        assert!(matches!(err, AppError::ResponseFormatError(_)));

        let err = content(&json!({"results": []})).unwrap_err();
        assert!(matches!(err, AppError::ResponseFormatError(_)));
    }

    #[test]
    fn search_extracts_one_row_per_organic_item() {
        let content = search_content(vec![
            search_item("Levi's 501", "$59.99", "Macy's"),
            search_item("Levi's 505", "$49.99", "Target"),
        ]);
        let table = extract(Source::Search, &content).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0][2], json!("Macy's"));
        assert_eq!(table.rows()[1][2], json!("Target"));
    }

    #[test]
    fn search_rows_follow_upstream_order() {
        let content = search_content(vec![
            search_item("first", "$1", "A"),
            search_item("second", "$2", "B"),
            search_item("third", "$3", "C"),
        ]);
        let table = extract(Source::Search, &content).unwrap();

        let titles: Vec<_> = table.rows().iter().map(|r| r[0].clone()).collect();
        assert_eq!(titles, vec![json!("first"), json!("second"), json!("third")]);
    }

    #[test]
    fn search_empty_organic_yields_zero_rows_with_columns() {
        let content = search_content(vec![]);
        let table = extract(Source::Search, &content).unwrap();

        assert!(table.is_empty());
        assert_eq!(table.columns(), &["Product Title", "Price", "Store"]);
    }

    #[test]
    fn search_missing_merchant_name_names_key_and_index() {
        let mut broken = search_item("Levi's 501", "$59.99", "Macy's");
        broken["merchant"] = json!({});
        let content = search_content(vec![search_item("ok", "$1", "A"), broken]);

        let err = extract(Source::Search, &content).unwrap_err();
        match err {
            AppError::MissingFieldError { key, index } => {
                assert_eq!(key, "name");
                assert_eq!(index, Some(1));
            }
            other => panic!("expected MissingFieldError, got {other}"),
        }
    }

    #[test]
    fn product_extracts_single_record() {
        let content = product_content();
        let table = extract(Source::Product, &content).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0][0], json!("Levi's 501 Original Fit"));
        // Highlights list is stored as-is.
        assert!(table.rows()[0][2].is_array());
        assert_eq!(table.rows()[0][4], json!(2412));
    }

    #[test]
    fn product_missing_reviews_fails_naming_key() {
        let mut content = product_content();
        content.as_object_mut().unwrap().remove("reviews");

        let err = extract(Source::Product, &content).unwrap_err();
        match err {
            AppError::MissingFieldError { key, index } => {
                assert_eq!(key, "reviews");
                assert_eq!(index, None);
            }
            other => panic!("expected MissingFieldError, got {other}"),
        }
    }

    #[test]
    fn pricing_repeats_title_per_offer() {
        let content = pricing_content(3);
        let table = extract(Source::Pricing, &content).unwrap();

        assert_eq!(table.len(), 3);
        for row in table.rows() {
            assert_eq!(row[0], json!("Levi's 501 Original Fit"));
        }
        assert_eq!(table.rows()[1][2], json!("$51.99"));
    }

    #[test]
    fn pricing_missing_shipping_names_offer_index() {
        let mut content = pricing_content(2);
        content["pricing"][1]
            .as_object_mut()
            .unwrap()
            .remove("price_shipping");

        let err = extract(Source::Pricing, &content).unwrap_err();
        match err {
            AppError::MissingFieldError { key, index } => {
                assert_eq!(key, "price_shipping");
                assert_eq!(index, Some(1));
            }
            other => panic!("expected MissingFieldError, got {other}"),
        }
    }
}
