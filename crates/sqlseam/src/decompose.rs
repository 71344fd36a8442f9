//! Decomposition of raw SELECT statements into structured parts.
//!
//! Each clause is recovered by an independent [`ClauseScanner`] pass over
//! the same input text, plus two numeric scans for LIMIT/OFFSET. The scans
//! do not interact: a failed optional clause leaves its slot empty, while a
//! present-but-malformed clause fails the whole decomposition.
//!
//! Supported input shape (keywords case-insensitive):
//!
//! ```text
//! SELECT <fields> FROM <table>[, <table> ...]
//!   [(LEFT|RIGHT|INNER) JOIN <table> ON (<col> = <col>)]
//!   [WHERE <expr>] [GROUP BY <fields>] [HAVING <expr>]
//!   [ORDER BY <field> <dir>[, ...]]
//!   [LIMIT <n> | LIMIT <offset>,<n>] [OFFSET <n>]
//! ```
//!
//! Known, deliberate limitations: at most one join is recovered, WHERE and
//! HAVING stay opaque text, and clause keywords inside string literals are
//! matched like any other keyword.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{QueryError, QueryResult};
use crate::scan::ClauseScanner;

/// One FROM entry: a table plus an optional alias (empty when absent).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Source {
    pub table: String,
    pub alias: String,
}

/// A single recovered join: joined table and one column equality.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JoinSpec {
    pub table: String,
    /// Left column = right column.
    pub condition: (String, String),
}

/// One ORDER BY entry. The direction is kept verbatim, not validated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub order: String,
}

/// Structured view of a decomposed SELECT statement.
///
/// Produced only by [`decompose`]; independent of any builder state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedQuery {
    columns: Vec<String>,
    from: Vec<Source>,
    join: Option<JoinSpec>,
    where_clause: Option<String>,
    group_by: Vec<String>,
    having: Option<String>,
    order_by: Vec<SortSpec>,
    limit: Option<u64>,
    offset: u64,
}

impl ParsedQuery {
    /// SELECT field list.
    pub fn select_fields(&self) -> &[String] {
        &self.columns
    }

    /// FROM sources in statement order.
    pub fn from_sources(&self) -> &[Source] {
        &self.from
    }

    /// The single recovered join, if any.
    pub fn join(&self) -> Option<&JoinSpec> {
        self.join.as_ref()
    }

    /// Opaque WHERE expression text.
    pub fn where_clause(&self) -> Option<&str> {
        self.where_clause.as_deref()
    }

    /// GROUP BY field list.
    pub fn group_by_fields(&self) -> &[String] {
        &self.group_by
    }

    /// Opaque HAVING expression text.
    pub fn having_clause(&self) -> Option<&str> {
        self.having.as_deref()
    }

    /// ORDER BY entries in statement order.
    pub fn order_by_fields(&self) -> &[SortSpec] {
        &self.order_by
    }

    /// LIMIT value, if present.
    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// OFFSET value (0 when absent).
    pub fn offset(&self) -> u64 {
        self.offset
    }
}

// ==================== Clause scanners ====================

fn select_scanner() -> &'static ClauseScanner {
    static SCANNER: OnceLock<ClauseScanner> = OnceLock::new();
    SCANNER.get_or_init(|| ClauseScanner::new(&["SELECT"], &["FROM"]))
}

fn from_scanner() -> &'static ClauseScanner {
    static SCANNER: OnceLock<ClauseScanner> = OnceLock::new();
    SCANNER.get_or_init(|| {
        ClauseScanner::new(
            &["FROM"],
            &["LEFT", "RIGHT", "INNER", "WHERE", "JOIN", "ORDER", "GROUP", "LIMIT", "OFFSET"],
        )
    })
}

fn join_scanner() -> &'static ClauseScanner {
    static SCANNER: OnceLock<ClauseScanner> = OnceLock::new();
    SCANNER.get_or_init(|| {
        ClauseScanner::new(
            &["LEFT JOIN", "RIGHT JOIN", "INNER JOIN"],
            &["WHERE", "ORDER", "GROUP", "LIMIT", "OFFSET"],
        )
    })
}

fn where_scanner() -> &'static ClauseScanner {
    static SCANNER: OnceLock<ClauseScanner> = OnceLock::new();
    SCANNER.get_or_init(|| ClauseScanner::new(&["WHERE"], &["ORDER", "GROUP", "LIMIT", "OFFSET"]))
}

fn group_scanner() -> &'static ClauseScanner {
    static SCANNER: OnceLock<ClauseScanner> = OnceLock::new();
    SCANNER.get_or_init(|| {
        ClauseScanner::new(&["GROUP BY"], &["HAVING", "ORDER", "LIMIT", "OFFSET"])
    })
}

fn having_to_order_scanner() -> &'static ClauseScanner {
    static SCANNER: OnceLock<ClauseScanner> = OnceLock::new();
    SCANNER.get_or_init(|| ClauseScanner::new(&["HAVING"], &["ORDER"]))
}

fn having_to_limit_scanner() -> &'static ClauseScanner {
    static SCANNER: OnceLock<ClauseScanner> = OnceLock::new();
    SCANNER.get_or_init(|| ClauseScanner::new(&["HAVING"], &["LIMIT"]))
}

fn order_scanner() -> &'static ClauseScanner {
    static SCANNER: OnceLock<ClauseScanner> = OnceLock::new();
    SCANNER.get_or_init(|| {
        ClauseScanner::new(&["ORDER BY"], &["HAVING", "GROUP", "LIMIT", "OFFSET"])
    })
}

fn on_split_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\bON\b").expect("invalid built-in ON pattern"))
}

fn limit_span_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\bLIMIT\s+([\w,]+)").expect("invalid built-in LIMIT pattern"))
}

fn offset_span_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\bOFFSET\s+(\w+)").expect("invalid built-in OFFSET pattern"))
}

// ==================== Per-clause extractors ====================

/// Extract the SELECT field list (between SELECT and the FROM boundary).
pub fn select_fields(sql: &str) -> QueryResult<Vec<String>> {
    if !from_scanner().has_start(sql) {
        return Err(QueryError::clause_not_found("FROM"));
    }
    let body = select_scanner()
        .scan(sql)
        .ok_or(QueryError::clause_not_found("SELECT"))?;
    Ok(split_commas(&body))
}

/// Extract the FROM sources as table + optional alias pairs.
pub fn from_sources(sql: &str) -> QueryResult<Vec<Source>> {
    let body = from_scanner()
        .scan(sql)
        .ok_or(QueryError::clause_not_found("FROM"))?;
    let sources = split_commas(&body)
        .into_iter()
        .map(|entry| {
            let mut words = entry.split_whitespace();
            Source {
                table: words.next().unwrap_or_default().to_string(),
                alias: words.next().unwrap_or_default().to_string(),
            }
        })
        .collect();
    Ok(sources)
}

/// Extract the single supported join.
///
/// Fails with [`QueryError::UnsupportedShape`] when more than one join is
/// present, or when the ON condition is not a single column equality.
pub fn join(sql: &str) -> QueryResult<JoinSpec> {
    let scanner = join_scanner();
    if scanner.start_count(sql) > 1 {
        return Err(QueryError::unsupported(
            "more than one join; only a single join is decomposed",
        ));
    }
    let body = scanner.scan(sql).ok_or(QueryError::clause_not_found("JOIN"))?;
    let mut parts = on_split_pattern().splitn(&body, 2);
    let table = parts.next().unwrap_or_default().trim().to_string();
    let condition = parts
        .next()
        .ok_or_else(|| QueryError::unsupported(format!("join without ON condition: {body:?}")))?;
    let condition = condition.replace(['(', ')'], "");
    let columns: Vec<&str> = condition.split('=').map(str::trim).collect();
    if columns.len() != 2 {
        return Err(QueryError::unsupported(format!(
            "join condition is not a single equality: {condition:?}"
        )));
    }
    Ok(JoinSpec {
        table,
        condition: (columns[0].to_string(), columns[1].to_string()),
    })
}

/// Extract the WHERE expression as opaque text.
///
/// The expression is not decomposed into field/operator/value triples.
pub fn where_clause(sql: &str) -> QueryResult<String> {
    where_scanner()
        .scan(sql)
        .ok_or(QueryError::clause_not_found("WHERE"))
}

/// Extract the GROUP BY field list.
pub fn group_by_fields(sql: &str) -> QueryResult<Vec<String>> {
    let body = group_scanner()
        .scan(sql)
        .ok_or(QueryError::clause_not_found("GROUP BY"))?;
    Ok(split_commas(&body))
}

/// Extract the HAVING expression as opaque text.
///
/// Scans up to ORDER when an ORDER BY clause is present in the statement,
/// up to LIMIT otherwise.
pub fn having_clause(sql: &str) -> QueryResult<String> {
    let scanner = if order_scanner().has_start(sql) {
        having_to_order_scanner()
    } else {
        having_to_limit_scanner()
    };
    scanner.scan(sql).ok_or(QueryError::clause_not_found("HAVING"))
}

/// Extract the ORDER BY entries.
///
/// Each entry must carry an explicit direction token; a bare field fails
/// with [`QueryError::UnsupportedShape`].
pub fn order_by_fields(sql: &str) -> QueryResult<Vec<SortSpec>> {
    let body = order_scanner()
        .scan(sql)
        .ok_or(QueryError::clause_not_found("ORDER BY"))?;
    split_commas(&body)
        .into_iter()
        .map(|entry| {
            let mut words = entry.split_whitespace();
            let field = words.next().unwrap_or_default().to_string();
            let order = words
                .next()
                .ok_or_else(|| {
                    QueryError::unsupported(format!("order by entry without direction: {entry:?}"))
                })?
                .to_string();
            Ok(SortSpec { field, order })
        })
        .collect()
}

/// Extract the LIMIT value.
///
/// Accepts both `LIMIT n` and the legacy comma form `LIMIT offset,n`
/// (second number is the limit).
pub fn limit(sql: &str) -> QueryResult<u64> {
    let span = limit_span(sql).ok_or(QueryError::clause_not_found("LIMIT"))?;
    let value = match span.split_once(',') {
        Some((_, n)) => n.trim(),
        None => span.trim(),
    };
    value
        .parse()
        .map_err(|_| QueryError::malformed_numeric(span.clone()))
}

/// Extract the OFFSET value.
///
/// An explicit `OFFSET n` clause always wins; without one, the first number
/// of a comma-form `LIMIT offset,n` span is used, and a plain `LIMIT n`
/// (or no LIMIT at all) yields 0.
pub fn offset(sql: &str) -> QueryResult<u64> {
    if let Some(captures) = offset_span_pattern().captures(sql) {
        let span = &captures[1];
        return span
            .parse()
            .map_err(|_| QueryError::malformed_numeric(span));
    }
    match limit_span(sql) {
        Some(span) => match span.split_once(',') {
            Some((off, _)) => off
                .trim()
                .parse()
                .map_err(|_| QueryError::malformed_numeric(span.clone())),
            None => Ok(0),
        },
        None => Ok(0),
    }
}

fn limit_span(sql: &str) -> Option<String> {
    limit_span_pattern()
        .captures(sql)
        .map(|captures| captures[1].to_string())
}

fn split_commas(body: &str) -> Vec<String> {
    body.split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

// ==================== Whole-statement decomposition ====================

/// Decompose a raw SELECT statement into its structured parts.
///
/// SELECT fields and FROM sources are required; every other clause is
/// optional and left empty when absent. A clause that is present but
/// malformed (a non-numeric LIMIT, an ORDER BY entry without a direction)
/// still fails the whole decomposition.
pub fn decompose(sql: &str) -> QueryResult<ParsedQuery> {
    let parsed = ParsedQuery {
        columns: select_fields(sql)?,
        from: from_sources(sql)?,
        join: optional(join(sql))?,
        where_clause: optional(where_clause(sql))?,
        group_by: optional(group_by_fields(sql))?.unwrap_or_default(),
        having: optional(having_clause(sql))?,
        order_by: optional(order_by_fields(sql))?.unwrap_or_default(),
        limit: optional(limit(sql))?,
        offset: offset(sql)?,
    };
    tracing::debug!(sql = %sql, "decomposed statement");
    Ok(parsed)
}

/// Treat a missing optional clause as absent; keep every other failure.
fn optional<T>(result: QueryResult<T>) -> QueryResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_clause_not_found() => Ok(None),
        Err(err) => Err(err),
    }
}
