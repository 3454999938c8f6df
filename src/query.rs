// 📡 Resource Query - description of one OData list request
//
// A query names a resource collection and carries up to three directives:
// a $select projection, a $filter predicate and a $expand directive. The
// grammar inside $expand is opaque to this crate; callers supply the
// directive text and the server interprets it.

use crate::filter::SetFilter;

/// One list request against the retrieval service.
#[derive(Debug, Clone)]
pub struct ResourceQuery {
    resource: String,
    select: Vec<String>,
    filter: Option<String>,
    expand: Option<String>,
}

impl ResourceQuery {
    pub fn new(resource: impl Into<String>) -> Self {
        ResourceQuery {
            resource: resource.into(),
            select: Vec::new(),
            filter: None,
            expand: None,
        }
    }

    /// Set the field projection list.
    pub fn select(mut self, fields: &[&str]) -> Self {
        self.select = fields.iter().map(|f| (*f).to_string()).collect();
        self
    }

    /// Set the predicate from a raw expression.
    pub fn filter(mut self, predicate: impl Into<String>) -> Self {
        self.filter = Some(predicate.into());
        self
    }

    /// Set the predicate from a set filter.
    pub fn filter_in(self, filter: &SetFilter) -> Self {
        self.filter(filter.render())
    }

    /// Set the nested-expansion directive.
    pub fn expand(mut self, directive: impl Into<String>) -> Self {
        self.expand = Some(directive.into());
        self
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Query-string pairs in OData option order. URL encoding is left to the
    /// HTTP client.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.select.is_empty() {
            pairs.push(("$select", self.select.join(",")));
        }
        if let Some(expand) = &self.expand {
            pairs.push(("$expand", expand.clone()));
        }
        if let Some(filter) = &self.filter {
            pairs.push(("$filter", filter.clone()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs_include_only_supplied_directives() {
        let query = ResourceQuery::new("lots").select(&["id", "lotBlock"]);
        assert_eq!(query.resource(), "lots");
        assert_eq!(
            query.query_pairs(),
            vec![("$select", "id,lotBlock".to_string())]
        );
    }

    #[test]
    fn test_query_pairs_full() {
        let filter = SetFilter::from_ids("lotId", &[10, 11]);
        let query = ResourceQuery::new("jobs")
            .select(&["id", "lotId", "planId"])
            .expand("pendingConstructionStages($select=jobId)")
            .filter_in(&filter);

        assert_eq!(
            query.query_pairs(),
            vec![
                ("$select", "id,lotId,planId".to_string()),
                ("$expand", "pendingConstructionStages($select=jobId)".to_string()),
                ("$filter", "lotId in (10,11)".to_string()),
            ]
        );
    }
}
