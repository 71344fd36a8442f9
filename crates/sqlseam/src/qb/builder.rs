//! Query builder state and chaining setters.

/// Insertion-ordered field → value map with last-write-wins keys.
///
/// Backed by a `Vec` so that rendering order is deterministic and follows
/// insertion order. Duplicate field names overwrite the earlier value.
#[derive(Clone, Debug, Default)]
pub(crate) struct FilterMap<V = String> {
    entries: Vec<(String, V)>,
}

impl<V> FilterMap<V> {
    pub(crate) fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
    {
        let mut map = Self { entries: Vec::new() };
        for (field, value) in pairs {
            map.insert(field.into(), value);
        }
        map
    }

    fn insert(&mut self, field: String, value: V) {
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| *name == field) {
            entry.1 = value;
        } else {
            self.entries.push((field, value));
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(field, value)| (field.as_str(), value))
    }
}

/// Structured, mutable representation of a query against one base table.
///
/// Built by chaining setters, consumed by the rendering methods in
/// [`crate::qb::render`]. Each `where_*` setter replaces its whole slot;
/// only [`inner_join`](QueryBuilder::inner_join) accumulates. Field names
/// and values pass through verbatim and unquoted — quoting and escaping are
/// the caller's responsibility.
///
/// Intended as a single-owner, short-lived value per statement; it is not
/// synchronized for shared mutation.
#[derive(Clone, Debug, Default)]
pub struct QueryBuilder {
    pub(crate) table: String,
    pub(crate) where_and: FilterMap,
    pub(crate) where_or: FilterMap,
    pub(crate) where_in: FilterMap<Vec<String>>,
    pub(crate) where_like: FilterMap,
    pub(crate) where_like_or: FilterMap,
    pub(crate) join_clause: String,
    pub(crate) order_clause: String,
    pub(crate) group_clause: String,
    pub(crate) limit_clause: String,
}

impl QueryBuilder {
    /// Create a builder for the given base table.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            ..Self::default()
        }
    }

    // ==================== WHERE filter slots ====================

    /// Set the AND-joined equality filters, replacing any earlier set.
    pub fn where_and<I, K, V>(mut self, filter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.where_and = into_filter_map(filter);
        self
    }

    /// Set the OR-joined equality filters, replacing any earlier set.
    pub fn where_or<I, K, V>(mut self, filter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.where_or = into_filter_map(filter);
        self
    }

    /// Set the IN filters (field → ordered literal list), replacing any
    /// earlier set.
    pub fn where_in<I, K, L, V>(mut self, filter: I) -> Self
    where
        I: IntoIterator<Item = (K, L)>,
        K: Into<String>,
        L: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.where_in = FilterMap::from_pairs(
            filter
                .into_iter()
                .map(|(field, values)| (field, values.into_iter().map(Into::into).collect())),
        );
        self
    }

    /// Set the AND-joined LIKE filters, replacing any earlier set.
    pub fn where_like<I, K, V>(mut self, filter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.where_like = into_filter_map(filter);
        self
    }

    /// Set the OR-joined LIKE filters, replacing any earlier set.
    pub fn where_like_or<I, K, V>(mut self, filter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.where_like_or = into_filter_map(filter);
        self
    }

    // ==================== Ordering, grouping, pagination ====================

    /// Set the ORDER BY fields (field → direction), replacing any earlier set.
    pub fn order_by<I, K, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let parts: Vec<String> = fields
            .into_iter()
            .map(|(field, direction)| format!("{} {}", field.into(), direction.into()))
            .collect();
        if !parts.is_empty() {
            self.order_clause = format!("ORDER BY {}", parts.join(", "));
        }
        self
    }

    /// Set the GROUP BY fields, replacing any earlier set.
    pub fn group_by<I, F>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        let parts: Vec<String> = fields.into_iter().map(Into::into).collect();
        if !parts.is_empty() {
            self.group_clause = format!("GROUP BY {}", parts.join(", "));
        }
        self
    }

    /// Set the LIMIT, replacing any earlier set.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit_clause = format!("LIMIT {n}");
        self
    }

    // ==================== Joins ====================

    /// Append an `INNER JOIN <table> ON <left = right> AND ...` fragment.
    ///
    /// Unlike the `where_*` setters this accumulates: repeated calls
    /// compose multiple joins, even though decomposition only ever recovers
    /// a single one.
    pub fn inner_join<I, K, V>(mut self, table: &str, on: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let conditions: Vec<String> = on
            .into_iter()
            .map(|(left, right)| format!("{} = {}", left.into(), right.into()))
            .collect();
        if !self.join_clause.is_empty() {
            self.join_clause.push(' ');
        }
        self.join_clause
            .push_str(&format!("INNER JOIN {} ON {}", table, conditions.join(" AND ")));
        self
    }

    /// Whether any of the five WHERE filter slots is set.
    pub(crate) fn has_filter(&self) -> bool {
        !self.where_and.is_empty()
            || !self.where_or.is_empty()
            || !self.where_in.is_empty()
            || !self.where_like.is_empty()
            || !self.where_like_or.is_empty()
    }
}

fn into_filter_map<I, K, V>(pairs: I) -> FilterMap
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    FilterMap::from_pairs(pairs.into_iter().map(|(field, value)| (field, value.into())))
}
