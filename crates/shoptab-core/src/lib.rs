pub mod error;
pub mod export;
pub mod extract;
pub mod query;
pub mod run;
pub mod table;
pub mod traits;

#[cfg(test)]
pub mod testutil;

pub use error::AppError;
pub use query::{ContextFilter, QueryConfig, Source};
pub use run::{ExportService, RunSummary};
pub use table::ResultTable;
pub use traits::QueryExecutor;
