// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Starter layouts supplied as nested literal trees.
//!
//! A template is decoded from JSON, turned into a `HierarchyNode` forest and
//! flattened before it enters a node store. Beyond the shape enforced by
//! decoding, templates are not validated.

use page_model::{flatten, ElementId, ElementKind, ElementRecord, HierarchyNode, Style};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Error type for template decoding and lookup.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Externally supplied JSON did not match the template shape.
    #[error("template decode error: {0}")]
    Decode(#[from] serde_json::Error),
    /// A bundled template failed to decode.
    #[error("built-in template {id} is malformed: {source}")]
    Builtin {
        /// Template id.
        id: &'static str,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
    /// No template with this id.
    #[error("unknown template: {0}")]
    UnknownTemplate(String),
}

/// One element of a template literal, with its children nested inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateNode {
    /// Element id; kept when the template is loaded.
    pub id: ElementId,
    /// Element kind tag.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Content payload.
    #[serde(default)]
    pub content: String,
    /// Style properties.
    #[serde(default)]
    pub style: Style,
    /// Nested children.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TemplateNode>,
}

impl TemplateNode {
    /// Equivalent hierarchy node (no parent references yet).
    pub fn to_hierarchy(&self) -> HierarchyNode {
        HierarchyNode::from_tree(
            self,
            |node| &node.children,
            |node| ElementRecord {
                id: node.id.clone(),
                kind: node.kind,
                content: node.content.clone(),
                style: node.style.clone(),
                parent_id: None,
            },
        )
    }
}

impl Drop for TemplateNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// A named starter layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Stable id (`"landing-page"`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// One-line description.
    #[serde(default)]
    pub description: String,
    /// Thumbnail glyph.
    #[serde(default)]
    pub thumbnail: String,
    /// Top-level elements.
    pub elements: Vec<TemplateNode>,
}

impl Template {
    /// Decode a template literal.
    pub fn from_json(json: &str) -> Result<Self, TemplateError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The template as a forest.
    pub fn hierarchy(&self) -> Vec<HierarchyNode> {
        self.elements.iter().map(TemplateNode::to_hierarchy).collect()
    }

    /// The template as flat records, ready for a node store.
    pub fn to_records(&self) -> Vec<ElementRecord> {
        let records = flatten(&self.hierarchy());
        debug!(template = %self.id, records = records.len(), "template flattened");
        records
    }

    /// Total number of elements, nested ones included.
    pub fn element_count(&self) -> usize {
        self.hierarchy()
            .iter()
            .map(|root| root.descendant_count() + 1)
            .sum()
    }
}

const BUILTIN: [(&str, &str); 4] = [
    ("landing-page", include_str!("../templates/landing-page.json")),
    ("portfolio", include_str!("../templates/portfolio.json")),
    ("blog", include_str!("../templates/blog.json")),
    ("complete-website", include_str!("../templates/complete-website.json")),
];

/// Ids of the bundled templates, in gallery order.
pub fn builtin_ids() -> impl Iterator<Item = &'static str> {
    BUILTIN.iter().map(|(id, _)| *id)
}

fn decode_builtin(id: &'static str, json: &str) -> Result<Template, TemplateError> {
    serde_json::from_str(json).map_err(|source| TemplateError::Builtin { id, source })
}

/// All bundled templates, in gallery order.
pub fn builtin_templates() -> Result<Vec<Template>, TemplateError> {
    BUILTIN
        .iter()
        .map(|&(id, json)| decode_builtin(id, json))
        .collect()
}

/// Bundled template with the given id.
pub fn find_template(id: &str) -> Result<Template, TemplateError> {
    let (found, json) = BUILTIN
        .into_iter()
        .find(|(candidate, _)| *candidate == id)
        .ok_or_else(|| TemplateError::UnknownTemplate(id.to_owned()))?;
    decode_builtin(found, json)
}
