//! Test utilities: a mock query executor and response fixtures.
//!
//! The mock uses `Arc<Mutex<_>>` for interior mutability, allowing test
//! assertions on recorded payloads.

use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use crate::error::AppError;
use crate::traits::QueryExecutor;

// ---------------------------------------------------------------------------
// MockExecutor
// ---------------------------------------------------------------------------

/// Mock executor that returns queued responses and records every payload
/// it was given.
#[derive(Clone)]
pub struct MockExecutor {
    /// Queue of responses. Each call pops the first element.
    responses: Arc<Mutex<Vec<Result<Value, AppError>>>>,
    /// Payloads passed to `execute`, in call order.
    pub payloads: Arc<Mutex<Vec<Value>>>,
}

impl MockExecutor {
    pub fn new(response: Value) -> Self {
        Self::with_responses(vec![Ok(response)])
    }

    pub fn with_error(error: AppError) -> Self {
        Self::with_responses(vec![Err(error)])
    }

    pub fn with_responses(responses: Vec<Result<Value, AppError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            payloads: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl QueryExecutor for MockExecutor {
    async fn execute(&self, payload: &Value) -> Result<Value, AppError> {
        self.payloads.lock().unwrap().push(payload.clone());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(envelope(json!({})))
        } else {
            responses.remove(0)
        }
    }
}

// ---------------------------------------------------------------------------
// Response fixtures
// ---------------------------------------------------------------------------

/// Wrap content in the `results[0].content` envelope the API returns.
pub fn envelope(content: Value) -> Value {
    json!({"results": [{"content": content}]})
}

/// One organic search result item.
pub fn search_item(title: &str, price: &str, store: &str) -> Value {
    json!({
        "title": title,
        "price_str": price,
        "merchant": {"name": store},
    })
}

/// Search-mode content with the given organic items.
pub fn search_content(items: Vec<Value>) -> Value {
    json!({"results": {"organic": items}})
}

/// Product-mode content with a full field set.
pub fn product_content() -> Value {
    json!({
        "title": "Levi's 501 Original Fit",
        "description": "The original straight-fit jean since 1873.",
        "highlights": ["Button fly", "100% cotton"],
        "reviews": {"rating": 4.6, "reviews_count": 2412},
    })
}

/// Pricing-mode content with `offers` generated offers.
pub fn pricing_content(offers: usize) -> Value {
    let pricing: Vec<Value> = (0..offers)
        .map(|i| {
            json!({
                "details": format!("Offer {i}"),
                "price": format!("$5{i}.99"),
                "price_total": format!("$5{i}.99 + tax"),
                "price_shipping": "Free shipping",
            })
        })
        .collect();
    json!({
        "title": "Levi's 501 Original Fit",
        "pricing": pricing,
    })
}
