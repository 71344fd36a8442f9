//! External execution seam.
//!
//! The core never opens a connection, loads a driver, or reads connection
//! configuration. It renders statements to plain SQL text and hands them to
//! an [`Executor`] supplied by the caller. Connection setup (host, port,
//! database, user, password) and result-set shape are entirely the
//! implementor's concern.

/// Abstraction over whatever actually runs a rendered statement.
///
/// Implementations wrap a live connection (or a recording stub in tests).
/// Failures are surfaced to the caller as
/// [`QueryError::Execution`](crate::QueryError::Execution); the core never
/// retries and never substitutes a default value.
pub trait Executor {
    /// Row type produced by [`query`](Executor::query).
    type Row;

    /// Execution failure type.
    type Error: std::fmt::Display;

    /// Run a mutation statement, returning the affected-row count.
    fn execute(&mut self, sql: &str) -> Result<u64, Self::Error>;

    /// Run a SELECT statement, returning the result rows.
    fn query(&mut self, sql: &str) -> Result<Vec<Self::Row>, Self::Error>;
}
