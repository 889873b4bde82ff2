use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::export;
use crate::extract;
use crate::query::QueryConfig;
use crate::table::ResultTable;
use crate::traits::QueryExecutor;

/// Outcome of one export run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub table: ResultTable,
    pub csv_path: PathBuf,
    pub json_path: PathBuf,
}

/// Orchestrates the full export pipeline: build payload → query → extract → export.
///
/// Generic over the network seam via [`QueryExecutor`], enabling dependency
/// injection and testability without real HTTP calls.
pub struct ExportService<X>
where
    X: QueryExecutor,
{
    executor: X,
}

impl<X> ExportService<X>
where
    X: QueryExecutor,
{
    pub fn new(executor: X) -> Self {
        Self { executor }
    }

    /// Run the full pipeline for one query.
    ///
    /// 1. Serialize the query payload
    /// 2. Execute the upstream request
    /// 3. Pull `results[0].content`
    /// 4. Extract the per-mode table, rows in upstream order
    /// 5. Export CSV + JSON
    ///
    /// Any failure aborts before files are written; there is no
    /// partial-success mode.
    pub async fn run(
        &self,
        config: &QueryConfig,
        csv_path: &Path,
        json_path: &Path,
    ) -> Result<RunSummary, AppError> {
        let payload = config.to_payload()?;

        tracing::info!(
            source = config.source.mode(),
            query = %config.query,
            "Submitting query"
        );
        let response = self.executor.execute(&payload).await?;

        let content = extract::content(&response)?;
        let table = extract::extract(config.source, content)?;
        tracing::info!("Extracted {} rows", table.len());

        export::export(&table, csv_path, json_path)?;
        tracing::info!(
            csv = %csv_path.display(),
            json = %json_path.display(),
            "Export complete"
        );

        Ok(RunSummary {
            table,
            csv_path: csv_path.to_path_buf(),
            json_path: json_path.to_path_buf(),
        })
    }
}
