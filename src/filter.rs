// 🔍 Filter Predicate Builder - set-membership predicates for OData $filter
//
// Builds `field in (v1,v2,...)` expressions from fetched records so that a
// later query can be restricted to exactly the keys an earlier query
// surfaced. Duplicate keys are dropped (oversized predicates waste query
// string budget and server work) and absent keys are skipped.

use std::collections::HashSet;
use std::fmt;

// ============================================================================
// SET FILTER
// ============================================================================

/// A set-membership predicate over a named field.
///
/// Values are de-duplicated with a `HashSet` at insert time and kept in
/// first-seen order. An empty filter still renders a syntactically valid
/// predicate: `field in ()`.
#[derive(Debug, Clone)]
pub struct SetFilter {
    field: String,
    values: Vec<i64>,
    seen: HashSet<i64>,
}

impl SetFilter {
    /// Create an empty filter over `field`.
    pub fn new(field: impl Into<String>) -> Self {
        SetFilter {
            field: field.into(),
            values: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Build a filter from an explicit id list (duplicates dropped,
    /// first-seen order preserved).
    pub fn from_ids(field: impl Into<String>, ids: &[i64]) -> Self {
        let mut filter = SetFilter::new(field);
        for &id in ids {
            filter.insert(id);
        }
        filter
    }

    /// Build a filter by extracting zero-or-one key from each record.
    ///
    /// Records whose extracted key is `None` are skipped.
    pub fn collect<T>(
        field: impl Into<String>,
        records: &[T],
        extract: impl Fn(&T) -> Option<i64>,
    ) -> Self {
        let mut filter = SetFilter::new(field);
        for record in records {
            if let Some(key) = extract(record) {
                filter.insert(key);
            }
        }
        filter
    }

    /// Insert one key. Returns false if it was already present.
    pub fn insert(&mut self, value: i64) -> bool {
        if !self.seen.insert(value) {
            return false;
        }
        self.values.push(value);
        true
    }

    /// Re-target the same value set at a different field path.
    ///
    /// Used where one query filters on `jobId` and a nested expansion must
    /// apply the same set as `job/id`.
    pub fn for_field(&self, field: impl Into<String>) -> Self {
        SetFilter {
            field: field.into(),
            values: self.values.clone(),
            seen: self.seen.clone(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Render the predicate: `field in (v1,v2,...)`.
    pub fn render(&self) -> String {
        let joined: Vec<String> = self.values.iter().map(|v| v.to_string()).collect();
        format!("{} in ({})", self.field, joined.join(","))
    }
}

impl fmt::Display for SetFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
