//! Fluent query builder for a single base table.
//!
//! The builder holds five independent WHERE filter slots (AND-equality,
//! OR-equality, IN, AND-LIKE, OR-LIKE), an accumulating join fragment, and
//! pre-rendered order/group/limit fragments. Setters chain by consuming
//! `self`; rendering lives in [`render`] and execution goes through the
//! [`Executor`](crate::Executor) seam.
//!
//! ```ignore
//! use sqlseam::qb;
//!
//! let sql = qb::query("users")
//!     .where_and([("status", "'active'")])
//!     .order_by([("created_at", "DESC")])
//!     .limit(10)
//!     .select_sql(&["id", "name"], "");
//! ```

mod builder;
mod render;

pub use builder::QueryBuilder;

/// Create a query builder for the given base table.
///
/// # Example
/// ```ignore
/// let qb = sqlseam::qb::query("users").where_and([("id", "1")]);
/// ```
pub fn query(table: &str) -> QueryBuilder {
    QueryBuilder::new(table)
}

#[cfg(test)]
mod tests;
