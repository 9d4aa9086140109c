//! # Input Form Rendering
//!
//! Groups the parameter table into ordered sections for the host
//! platform's input form. A declaration with a section title opens a
//! new section; untitled declarations continue the preceding one.

use crate::params::{ParamDecl, ParamRegistry, ParamType, ParamValue};
use serde::Serialize;

/// Section title used when the first declaration carries none.
const UNTITLED_SECTION: &str = "Parameters";

/// One field of the rendered input form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    /// Parameter name.
    pub name: &'static str,
    /// Declared value type.
    pub ty: ParamType,
    /// Whether the caller must supply a value.
    pub required: bool,
    /// Declared default, if any.
    pub default: Option<ParamValue>,
    /// Human-readable description.
    pub description: &'static str,
}

impl From<&ParamDecl> for FormField {
    fn from(decl: &ParamDecl) -> Self {
        Self {
            name: decl.name,
            ty: decl.ty,
            required: decl.required,
            default: decl.default.clone(),
            description: decl.description,
        }
    }
}

/// One titled section of the rendered input form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSection {
    /// Section title.
    pub title: &'static str,
    /// Fields in declaration order.
    pub fields: Vec<FormField>,
}

/// Render the registry into ordered form sections.
#[must_use]
pub fn render_form(registry: &ParamRegistry) -> Vec<FormSection> {
    let mut sections: Vec<FormSection> = Vec::new();
    for decl in registry.iter() {
        if let Some(title) = decl.section_title {
            sections.push(FormSection {
                title,
                fields: Vec::new(),
            });
        } else if sections.is_empty() {
            sections.push(FormSection {
                title: UNTITLED_SECTION,
                fields: Vec::new(),
            });
        }
        if let Some(section) = sections.last_mut() {
            section.fields.push(FormField::from(decl));
        }
    }
    sections
}

/// Render the form as plain text for terminal display.
#[must_use]
pub fn render_text(registry: &ParamRegistry) -> String {
    let mut output = String::new();
    for section in render_form(registry) {
        output.push_str(section.title);
        output.push('\n');
        for field in &section.fields {
            let required = if field.required { ", required" } else { "" };
            let default = field
                .default
                .as_ref()
                .map(|v| format!(" [default: {}]", v.render()))
                .unwrap_or_default();
            output.push_str(&format!(
                "  --{} ({}{}){}\n      {}\n",
                field.name, field.ty, required, default, field.description
            ));
        }
        output.push('\n');
    }
    output
}

// =============================================================================
// TESTS
// =============================================================================
