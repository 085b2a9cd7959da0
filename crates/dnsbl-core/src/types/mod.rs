//! Types shared by lookups, batches and reports.

mod list;
mod result;
mod target;

pub use list::OneOrMany;
pub use result::{BatchItem, LookupResult, QueryReport, QueryStatus};
pub use target::QueryTarget;
