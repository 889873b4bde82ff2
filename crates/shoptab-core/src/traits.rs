use std::future::Future;

use crate::error::AppError;

/// Sends one query payload to the upstream API and returns the decoded
/// response body.
///
/// The single seam between the extraction pipeline and the network,
/// enabling dependency injection and testability without real HTTP calls.
pub trait QueryExecutor: Send + Sync + Clone {
    fn execute(
        &self,
        payload: &serde_json::Value,
    ) -> impl Future<Output = Result<serde_json::Value, AppError>> + Send;
}
