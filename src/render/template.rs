//! Embedded Tera templates for starter input files and reports

use chrono::{DateTime, Local};
use rust_embed::Embed;
use serde::Serialize;
use tera::Tera;
use thiserror::Error;

use crate::core::units::{from_hours, TimeUnit};

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

pub const INPUTS_TEMPLATE: &str = "inputs.yaml.tera";
pub const REPORT_TEMPLATE: &str = "report.md.tera";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template rendering error: {0}")]
    RenderError(String),
}

/// Context for a starter input file
#[derive(Debug, Clone)]
pub struct InputsContext {
    pub name: Option<String>,
    pub created: DateTime<Local>,
    pub unit: TimeUnit,
    /// Fill in a worked example instead of empty fields
    pub example: bool,
}

impl InputsContext {
    pub fn new(unit: TimeUnit) -> Self {
        Self {
            name: None,
            created: Local::now(),
            unit,
            example: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_example(mut self, example: bool) -> Self {
        self.example = example;
        self
    }
}

/// Field values written into the starter file, already in the file's unit
#[derive(Debug, Serialize)]
struct StarterValues {
    item_operating_time: String,
    failed_items: String,
    operating_time: String,
    failures: String,
    repair_time: String,
    detection_time: String,
    pm_time: String,
    pm_actions: String,
    planned_actions: String,
    corrective_actions: String,
}

impl StarterValues {
    fn empty() -> Self {
        let e = || "~".to_string();
        Self {
            item_operating_time: e(),
            failed_items: e(),
            operating_time: e(),
            failures: e(),
            repair_time: e(),
            detection_time: e(),
            pm_time: e(),
            pm_actions: e(),
            planned_actions: e(),
            corrective_actions: e(),
        }
    }

    /// One pump over 5,000 h: a single failure, 8 h repair, quarterly PM
    fn example(unit: TimeUnit) -> Self {
        let d = |hours: f64| from_hours(hours, unit).to_string();
        Self {
            item_operating_time: d(20_000.0),
            failed_items: "1".to_string(),
            operating_time: d(5_000.0),
            failures: "1".to_string(),
            repair_time: d(6.0),
            detection_time: d(2.0),
            pm_time: d(16.0),
            pm_actions: "4".to_string(),
            planned_actions: "4".to_string(),
            corrective_actions: "1".to_string(),
        }
    }
}

/// Template generator using Tera
pub struct TemplateGenerator {
    tera: Tera,
}

impl TemplateGenerator {
    /// Create a new template generator with embedded templates
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();

        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                if let Ok(template_str) = std::str::from_utf8(&content.data) {
                    tera.add_raw_template(filename, template_str)
                        .map_err(|e| TemplateError::RenderError(e.to_string()))?;
                }
            }
        }

        Ok(Self { tera })
    }

    /// Render a named template
    pub fn render(&self, name: &str, context: &tera::Context) -> Result<String, TemplateError> {
        if !self.tera.get_template_names().any(|n| n == name) {
            return Err(TemplateError::NotFound(name.to_string()));
        }
        self.tera
            .render(name, context)
            .map_err(|e| TemplateError::RenderError(render_error_chain(&e)))
    }

    /// Generate a starter input file
    pub fn generate_inputs(&self, ctx: &InputsContext) -> Result<String, TemplateError> {
        let mut context = tera::Context::new();
        context.insert("name", &ctx.name);
        context.insert("created_date", &ctx.created.format("%Y-%m-%d").to_string());
        context.insert("unit", ctx.unit.as_str());
        let values = if ctx.example {
            StarterValues::example(ctx.unit)
        } else {
            StarterValues::empty()
        };
        context.insert("values", &values);

        self.render(INPUTS_TEMPLATE, &context)
    }
}

/// Tera hides the useful part of an error in its source chain
fn render_error_chain(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
