//! Validation utilities for subgraph queries and user input

use crate::types::Address;

/// The Graph refuses pages larger than this
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Parse a user-supplied address (path segment, query string)
pub fn validate_address(input: &str) -> Result<Address, &'static str> {
    input
        .parse()
        .map_err(|_| "Given id could not be formatted to Ethereum Address")
}

/// The order field must be a top-level field of the entity
pub fn validate_order_field(fields: &[&str], order_by: &str) -> Result<(), String> {
    if fields.contains(&order_by) {
        Ok(())
    } else {
        Err(format!("{} not a field", order_by))
    }
}

/// Filter keys may carry a suffix (`amount_gt`, `id_in`); the part before
/// the first `_` must be a top-level field of the entity
pub fn validate_constraint_key(fields: &[&str], key: &str) -> Result<(), String> {
    let field = key.split('_').next().unwrap_or(key);
    if !field.is_empty() && fields.contains(&field) {
        Ok(())
    } else {
        Err(format!("{} not a field", field))
    }
}

/// Validate a requested page size
pub fn validate_page_size(first: u32) -> Result<(), &'static str> {
    if first == 0 {
        return Err("Page size must be at least 1");
    }
    if first > MAX_PAGE_SIZE {
        return Err("Page size must be at most 1000");
    }
    Ok(())
}
