//! Server-rendered pages (askama templates under `backend/templates`)

pub mod chart;
pub mod pages;

pub use pages::*;

use askama::Template;

use crate::error::{AppError, AppResult};

/// Render a template, mapping template failures to an internal error
pub(crate) fn render<T: Template>(template: &T) -> AppResult<String> {
    template
        .render()
        .map_err(|e| AppError::Internal(format!("Template rendering failed: {}", e)))
}
