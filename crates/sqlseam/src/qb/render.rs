//! Statement rendering for [`QueryBuilder`].
//!
//! Values are inserted exactly as given, unquoted; callers pass
//! already-quoted literals. The five WHERE filter slots render in the fixed
//! order where → where_or → where_in → where_like → where_like_or, each
//! group with its own internal joiner and **no connective between groups**:
//! mixing groups yields textually adjacent conditions (`a = 1 AND b = 2
//! c = 3 OR d = 4`), which is not valid SQL without caller-supplied boolean
//! glue. This is a documented contract of the narrow subset, not something
//! the renderer papers over.

use crate::error::{QueryError, QueryResult};
use crate::executor::Executor;
use crate::qb::builder::QueryBuilder;

impl QueryBuilder {
    /// Render a SELECT statement.
    ///
    /// Produces `SELECT <fields> FROM <table> <alias> <joins> <where>
    /// <order by> <group by> <limit>` with empty sections omitted. The
    /// section order is fixed and mirrors the builder slots, not general
    /// SQL clause order.
    pub fn select_sql(&self, fields: &[&str], alias: &str) -> String {
        let mut sql = format!("SELECT {} FROM {}", fields.join(", "), self.table);
        let where_sql = self.prepare_where();
        for section in [
            alias,
            self.join_clause.as_str(),
            where_sql.as_str(),
            self.order_clause.as_str(),
            self.group_clause.as_str(),
            self.limit_clause.as_str(),
        ] {
            if !section.is_empty() {
                sql.push(' ');
                sql.push_str(section);
            }
        }
        tracing::debug!(sql = %sql, "rendered SELECT");
        sql
    }

    /// Render the WHERE section from the five filter slots.
    ///
    /// Returns an empty string when no slot is set, never `" WHERE  "`.
    pub fn prepare_where(&self) -> String {
        let mut groups: Vec<String> = Vec::new();
        if !self.where_and.is_empty() {
            groups.push(
                self.where_and
                    .iter()
                    .map(|(field, value)| format!("{field} = {value}"))
                    .collect::<Vec<_>>()
                    .join(" AND "),
            );
        }
        if !self.where_or.is_empty() {
            groups.push(
                self.where_or
                    .iter()
                    .map(|(field, value)| format!("{field} = {value}"))
                    .collect::<Vec<_>>()
                    .join(" OR "),
            );
        }
        for (field, values) in self.where_in.iter() {
            groups.push(format!("{field} IN ({})", values.join(",")));
        }
        if !self.where_like.is_empty() {
            groups.push(
                self.where_like
                    .iter()
                    .map(|(field, value)| format!("{field} LIKE {value}"))
                    .collect::<Vec<_>>()
                    .join(" AND "),
            );
        }
        if !self.where_like_or.is_empty() {
            groups.push(
                self.where_like_or
                    .iter()
                    .map(|(field, value)| format!("{field} LIKE {value}"))
                    .collect::<Vec<_>>()
                    .join(" OR "),
            );
        }
        if groups.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", groups.join(" "))
        }
    }

    /// Render an INSERT statement from column → value pairs.
    pub fn insert_sql<I, K, V>(&self, fields: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let (columns, values): (Vec<String>, Vec<String>) = fields
            .into_iter()
            .map(|(column, value)| (column.into(), value.into()))
            .unzip();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            columns.join(", "),
            values.join(", ")
        );
        tracing::debug!(sql = %sql, "rendered INSERT");
        sql
    }

    /// Render an UPDATE statement from column → value pairs.
    ///
    /// Fails with [`QueryError::MissingFilter`] before any SQL is built
    /// when no WHERE filter slot is set: an unfiltered update would mutate
    /// the whole table.
    pub fn update_sql<I, K, V>(&self, fields: I) -> QueryResult<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        if !self.has_filter() {
            return Err(QueryError::MissingFilter);
        }
        let assignments: Vec<String> = fields
            .into_iter()
            .map(|(column, value)| format!("{} = {}", column.into(), value.into()))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} {}",
            self.table,
            assignments.join(", "),
            self.prepare_where()
        );
        tracing::debug!(sql = %sql, "rendered UPDATE");
        Ok(sql)
    }

    /// Render a DELETE statement.
    ///
    /// Fails with [`QueryError::MissingFilter`] before any SQL is built
    /// when no WHERE filter slot is set.
    pub fn delete_sql(&self) -> QueryResult<String> {
        if !self.has_filter() {
            return Err(QueryError::MissingFilter);
        }
        let sql = format!("DELETE FROM {} {}", self.table, self.prepare_where());
        tracing::debug!(sql = %sql, "rendered DELETE");
        Ok(sql)
    }

    // ==================== Execution through the seam ====================

    /// Render the SELECT and run it through the executor.
    pub fn get<E: Executor>(
        &self,
        executor: &mut E,
        fields: &[&str],
        alias: &str,
    ) -> QueryResult<Vec<E::Row>> {
        let sql = self.select_sql(fields, alias);
        executor
            .query(&sql)
            .map_err(|err| QueryError::Execution(err.to_string()))
    }

    /// Render the INSERT and run it, returning the affected-row count.
    pub fn insert<E, I, K, V>(&self, executor: &mut E, fields: I) -> QueryResult<u64>
    where
        E: Executor,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let sql = self.insert_sql(fields);
        executor
            .execute(&sql)
            .map_err(|err| QueryError::Execution(err.to_string()))
    }

    /// Render the UPDATE and run it, returning the affected-row count.
    ///
    /// Rejected with [`QueryError::MissingFilter`] before anything reaches
    /// the executor when no WHERE filter is set.
    pub fn update<E, I, K, V>(&self, executor: &mut E, fields: I) -> QueryResult<u64>
    where
        E: Executor,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let sql = self.update_sql(fields)?;
        executor
            .execute(&sql)
            .map_err(|err| QueryError::Execution(err.to_string()))
    }

    /// Render the DELETE and run it, returning the affected-row count.
    ///
    /// Rejected with [`QueryError::MissingFilter`] before anything reaches
    /// the executor when no WHERE filter is set.
    pub fn delete<E: Executor>(&self, executor: &mut E) -> QueryResult<u64> {
        let sql = self.delete_sql()?;
        executor
            .execute(&sql)
            .map_err(|err| QueryError::Execution(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_bare_table() {
        let qb = QueryBuilder::new("users");
        assert_eq!(qb.select_sql(&["*"], ""), "SELECT * FROM users");
    }

    #[test]
    fn test_select_with_alias_and_fields() {
        let qb = QueryBuilder::new("users");
        assert_eq!(
            qb.select_sql(&["u.id", "u.name"], "u"),
            "SELECT u.id, u.name FROM users u"
        );
    }

    #[test]
    fn test_prepare_where_empty_is_blank() {
        let qb = QueryBuilder::new("users");
        assert_eq!(qb.prepare_where(), "");
        assert!(!qb.select_sql(&["*"], "").contains("WHERE"));
    }

    #[test]
    fn test_prepare_where_and_group() {
        let qb = QueryBuilder::new("users").where_and([("id", "1"), ("status", "'active'")]);
        assert_eq!(qb.prepare_where(), "WHERE id = 1 AND status = 'active'");
    }

    #[test]
    fn test_prepare_where_in_group() {
        let qb = QueryBuilder::new("users").where_in([("id", ["1", "2", "3"])]);
        assert_eq!(qb.prepare_where(), "WHERE id IN (1,2,3)");
    }

    #[test]
    fn test_prepare_where_like_groups() {
        let qb = QueryBuilder::new("users")
            .where_like([("name", "'%jo%'")])
            .where_like_or([("email", "'%@org%'"), ("login", "'%adm%'")]);
        assert_eq!(
            qb.prepare_where(),
            "WHERE name LIKE '%jo%' email LIKE '%@org%' OR login LIKE '%adm%'"
        );
    }

    #[test]
    fn test_where_groups_are_juxtaposed_without_connective() {
        // Known limitation, asserted literally: no connective and no
        // parentheses are inserted between filter groups.
        let qb = QueryBuilder::new("users")
            .where_and([("a", "1"), ("b", "2")])
            .where_or([("c", "3"), ("d", "4")]);
        assert_eq!(qb.prepare_where(), "WHERE a = 1 AND b = 2 c = 3 OR d = 4");
    }

    #[test]
    fn test_select_full_section_order() {
        let qb = QueryBuilder::new("author")
            .inner_join("book", [("author.id", "book.author_id")])
            .where_and([("author.active", "1")])
            .order_by([("author.name", "ASC")])
            .group_by(["author.name"])
            .limit(10);
        assert_eq!(
            qb.select_sql(&["author.name"], "a"),
            "SELECT author.name FROM author a \
             INNER JOIN book ON author.id = book.author_id \
             WHERE author.active = 1 \
             ORDER BY author.name ASC \
             GROUP BY author.name \
             LIMIT 10"
        );
    }

    #[test]
    fn test_insert_sql() {
        let qb = QueryBuilder::new("users");
        assert_eq!(
            qb.insert_sql([("name", "'alice'"), ("age", "30")]),
            "INSERT INTO users (name, age) VALUES ('alice', 30)"
        );
    }

    #[test]
    fn test_update_sql() {
        let qb = QueryBuilder::new("users").where_and([("id", "1")]);
        assert_eq!(
            qb.update_sql([("status", "'inactive'")]).unwrap(),
            "UPDATE users SET status = 'inactive' WHERE id = 1"
        );
    }

    #[test]
    fn test_update_without_filter_is_rejected() {
        let qb = QueryBuilder::new("users");
        let err = qb.update_sql([("status", "'inactive'")]).unwrap_err();
        assert!(err.is_missing_filter());
    }

    #[test]
    fn test_delete_sql() {
        let qb = QueryBuilder::new("users").where_and([("id", "1")]);
        assert_eq!(qb.delete_sql().unwrap(), "DELETE FROM users WHERE id = 1");
    }

    #[test]
    fn test_delete_without_filter_is_rejected() {
        let err = QueryBuilder::new("users").delete_sql().unwrap_err();
        assert!(err.is_missing_filter());
    }
}
