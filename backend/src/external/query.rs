//! GraphQL document builder for the tranche subgraph
//!
//! Builds `query { bonds(first: 10, orderBy: ..., where: { ... }) { ... } }`
//! style documents. Field names are checked against the entity before a
//! document is built, and filter values are escaped, so user input never
//! lands in a document verbatim.

use std::fmt;

use shared::{validate_constraint_key, validate_order_field, validate_page_size, Address, OrderDirection};

use crate::error::{AppError, AppResult};

/// Value of a `where` filter
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    String(String),
    Int(i64),
    Bool(bool),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::String(s) => write!(f, "\"{}\"", escape_string(s)),
            FilterValue::Int(n) => write!(f, "{}", n),
            FilterValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::String(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::String(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Int(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

/// Entity ids are keyed by the lowercase address
impl From<Address> for FilterValue {
    fn from(value: Address) -> Self {
        FilterValue::String(value.to_lowercase_hex())
    }
}

/// Paging, ordering and filtering for a list query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub first: Option<u32>,
    pub order_by: Option<String>,
    pub direction: OrderDirection,
    pub constraints: Vec<(String, FilterValue)>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first(mut self, first: u32) -> Self {
        self.first = Some(first);
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: OrderDirection) -> Self {
        self.order_by = Some(field.into());
        self.direction = direction;
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.constraints.push((key.into(), value.into()));
        self
    }

    /// Check page size, order field and filter keys against the entity's fields
    pub fn check(&self, fields: &[&str]) -> AppResult<()> {
        if let Some(first) = self.first {
            validate_page_size(first).map_err(|e| AppError::InvalidQuery(e.to_string()))?;
        }
        if let Some(order_by) = &self.order_by {
            validate_order_field(fields, order_by).map_err(AppError::InvalidQuery)?;
        }
        for (key, _) in &self.constraints {
            validate_constraint_key(fields, key).map_err(AppError::InvalidQuery)?;
        }
        Ok(())
    }

    /// Argument list including the parentheses, or an empty string
    pub fn arguments(&self) -> String {
        let mut args = Vec::new();

        if let Some(first) = self.first {
            args.push(format!("first: {}", first));
        }
        if let Some(order_by) = &self.order_by {
            args.push(format!(
                "orderBy: {}, orderDirection: {}",
                order_by, self.direction
            ));
        }
        if !self.constraints.is_empty() {
            let filters = self
                .constraints
                .iter()
                .map(|(key, value)| format!("{}: {}", key, value))
                .collect::<Vec<_>>()
                .join(", ");
            args.push(format!("where: {{ {} }}", filters));
        }

        if args.is_empty() {
            String::new()
        } else {
            format!("({})", args.join(", "))
        }
    }
}

/// Document for a list query over `collection`
pub fn list_document(collection: &str, selection: &str, query: &ListQuery) -> String {
    format!(
        "query {{ {}{} {{ {} }} }}",
        collection,
        query.arguments(),
        selection
    )
}

/// Document for a lookup by id; ids are matched in lowercase
pub fn by_id_document(entity: &str, id: &str, selection: &str) -> String {
    format!(
        "query {{ {}(id: \"{}\") {{ {} }} }}",
        entity,
        escape_string(&id.to_lowercase()),
        selection
    )
}

/// Escape a value for use inside a GraphQL string literal
pub fn escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use shared::{AccountBalance, Bond, Entity, Token};

    #[test]
    fn test_empty_query_has_no_arguments() {
        assert_eq!(ListQuery::new().arguments(), "");
        assert_eq!(
            list_document("bonds", "id", &ListQuery::new()),
            "query { bonds { id } }"
        );
    }

    #[test]
    fn test_ordered_arguments() {
        let query = ListQuery::new()
            .first(10)
            .order_by("totalSupply", OrderDirection::Desc);
        assert_eq!(
            query.arguments(),
            "(first: 10, orderBy: totalSupply, orderDirection: desc)"
        );
    }

    #[test]
    fn test_filtered_arguments() {
        let query = ListQuery::new()
            .order_by("amount", OrderDirection::Desc)
            .filter("tranche", "0xaaa35282144c902d908a8a93dbc1e2bf36a6f5c7")
            .filter("amount_gt", 0i64);
        assert_eq!(
            query.arguments(),
            "(orderBy: amount, orderDirection: desc, where: { tranche: \"0xaaa35282144c902d908a8a93dbc1e2bf36a6f5c7\", amount_gt: 0 })"
        );
    }

    #[test]
    fn test_filter_only() {
        let query = ListQuery::new().filter("isMature", false);
        assert_eq!(query.arguments(), "(where: { isMature: false })");
    }

    #[test]
    fn test_address_filter_is_lowercase() {
        let tranche: Address = "0xAAA35282144C902d908a8a93dBc1e2bF36A6f5C7".parse().unwrap();
        let query = ListQuery::new().filter("tranche", tranche);
        assert!(query
            .arguments()
            .contains("\"0xaaa35282144c902d908a8a93dbc1e2bf36a6f5c7\""));
    }

    #[test]
    fn test_list_document() {
        let query = ListQuery::new().order_by("isMature", OrderDirection::Asc);
        assert_eq!(
            list_document(Bond::COLLECTION, "id", &query),
            "query { bonds(orderBy: isMature, orderDirection: asc) { id } }"
        );
    }

    #[test]
    fn test_by_id_document_lowercases() {
        assert_eq!(
            by_id_document("token", "0xABCDEF", Token::SELECTION),
            format!("query {{ token(id: \"0xabcdef\") {{ {} }} }}", Token::SELECTION)
        );
    }

    #[test]
    fn test_check_rejects_unknown_fields() {
        let bad_order = ListQuery::new().order_by("nope", OrderDirection::Asc);
        assert!(matches!(
            bad_order.check(Bond::FIELDS),
            Err(AppError::InvalidQuery(_))
        ));

        let bad_filter = ListQuery::new().filter("owner_in", "x");
        assert!(bad_filter.check(AccountBalance::FIELDS).is_err());

        let bad_page = ListQuery::new().first(5000);
        assert!(bad_page.check(Bond::FIELDS).is_err());

        let good = ListQuery::new()
            .first(100)
            .order_by("amount", OrderDirection::Desc)
            .filter("tranche", "0x1");
        assert!(good.check(AccountBalance::FIELDS).is_ok());
    }

    #[test]
    fn test_escape_string() {
        assert_eq!(escape_string("plain"), "plain");
        assert_eq!(escape_string("a\"b"), "a\\\"b");
        assert_eq!(escape_string("a\\b"), "a\\\\b");
        assert_eq!(escape_string("a\nb"), "a\\nb");
    }

    proptest! {
        /// An escaped string never terminates the surrounding literal early
        #[test]
        fn prop_escaped_string_has_no_bare_quote(input in ".*") {
            let escaped = escape_string(&input);
            let mut chars = escaped.chars();
            while let Some(c) = chars.next() {
                if c == '\\' {
                    prop_assert!(chars.next().is_some());
                } else {
                    prop_assert_ne!(c, '"');
                    prop_assert!(!c.is_control());
                }
            }
        }
    }
}
