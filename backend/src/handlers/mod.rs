//! HTTP handlers: HTML pages for the browser and the JSON API

pub mod account;
pub mod bond;
pub mod dashboard;
pub mod health;
pub mod token;
pub mod tranche;

pub use account::*;
pub use bond::*;
pub use dashboard::*;
pub use health::*;
pub use token::*;
pub use tranche::*;

use shared::{validate_address, Address};

use crate::error::{AppError, AppResult};

/// Validate a path id before anything is sent upstream
pub(crate) fn parse_address(id: &str) -> AppResult<Address> {
    validate_address(id).map_err(|_| AppError::InvalidAddress(id.to_string()))
}
