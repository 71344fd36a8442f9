//! # sqlseam
//!
//! Bidirectional mapping between structured query state and raw SQL text
//! for a deliberately narrow, single-table-family SQL subset.
//!
//! ## Features
//!
//! - **Builder → text**: a fluent [`QueryBuilder`] renders SELECT, INSERT,
//!   UPDATE and DELETE statements (use `qb::query()` and the `*_sql`
//!   methods)
//! - **Text → structure**: [`decompose::decompose`] scans an arbitrary raw
//!   SELECT back into select fields, sources, join, where/group/having/
//!   order text, limit and offset
//! - **One scanning primitive**: every clause extractor is a configuration
//!   of the same regex-bounded [`ClauseScanner`]
//! - **Safe defaults**: UPDATE and DELETE require a WHERE filter
//! - **Execution stays outside**: rendered statements go through the
//!   caller-supplied [`Executor`] seam; no connection handling in-core
//!
//! ## Known limitations (contract, not bugs)
//!
//! - No value quoting or escaping: literals pass through as given
//! - Clause keywords inside string literals terminate scans all the same
//! - Decomposition recovers at most one join; WHERE/HAVING stay opaque text
//! - Filter groups render adjacent with no connective between them
//!
//! ```ignore
//! use sqlseam::qb;
//!
//! let sql = qb::query("users")
//!     .where_and([("status", "'active'")])
//!     .limit(10)
//!     .select_sql(&["id", "name"], "");
//!
//! let parsed = sqlseam::decompose::decompose(&sql)?;
//! assert_eq!(parsed.where_clause(), Some("status = 'active'"));
//! ```

pub mod decompose;
pub mod error;
pub mod executor;
pub mod qb;
pub mod scan;

pub use decompose::{JoinSpec, ParsedQuery, SortSpec, Source, decompose};
pub use error::{QueryError, QueryResult};
pub use executor::Executor;
pub use qb::{QueryBuilder, query};
pub use scan::ClauseScanner;
