//! Chart.js chart blocks

use askama::Template;
use serde::Serialize;

use crate::error::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Pie,
}

impl ChartKind {
    fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
        }
    }
}

/// A single chart; labels and values are parallel
#[derive(Debug, Clone)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub legend: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Template)]
#[template(path = "chart.html")]
struct ChartTemplate<'a> {
    canvas_id: String,
    kind: &'a str,
    title: &'a str,
    labels_json: String,
    legend_json: String,
    values_json: String,
    show_legend: bool,
}

/// Serialize a value as JSON that is safe to embed inside a `<script>` block
pub fn script_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

impl Chart {
    pub fn new(kind: ChartKind, title: impl Into<String>, legend: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            legend: legend.into(),
            labels: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn point(mut self, label: impl Into<String>, value: f64) -> Self {
        self.labels.push(label.into());
        self.values.push(value);
        self
    }

    /// Render with a canvas id unique within the page
    pub fn render(&self, index: usize) -> AppResult<String> {
        let template = ChartTemplate {
            canvas_id: format!("chart-{}", index),
            kind: self.kind.as_str(),
            title: &self.title,
            labels_json: script_json(&self.labels),
            legend_json: script_json(&self.legend),
            values_json: script_json(&self.values),
            show_legend: self.kind == ChartKind::Bar,
        };
        super::render(&template)
    }
}

/// Numbers charts so every canvas on a page gets its own id
#[derive(Debug, Default)]
pub struct ChartCounter(usize);

impl ChartCounter {
    pub fn render(&mut self, chart: &Chart) -> AppResult<String> {
        let html = chart.render(self.0)?;
        self.0 += 1;
        Ok(html)
    }
}
