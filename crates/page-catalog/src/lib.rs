// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! page-catalog: static data the page editor is seeded with.
//!
//! - [`catalog`]: palette entries, default style and new-element drafts.
//! - [`Device`]: preview presets and their scale factors.
//! - [`Template`]: bundled starter layouts, decoded from JSON.
#![forbid(unsafe_code)]

pub mod catalog;
mod device;
mod template;

pub use catalog::{default_style, new_element, CatalogEntry, Category};
pub use device::{Device, UnknownDevice};
pub use template::{
    builtin_ids, builtin_templates, find_template, Template, TemplateError, TemplateNode,
};
