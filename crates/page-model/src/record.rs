// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Flat element records as held by the node store.

use std::collections::BTreeMap;
use std::fmt;

use crate::ident::ElementId;

/// Open style mapping: property name (camelCase, e.g. `fontSize`) to value.
///
/// Values are either bare tokens (`"bold"`) or numbers with a unit suffix
/// (`"16px"`). Only the scaling transform interprets them.
pub type Style = BTreeMap<String, String>;

/// Closed set of building-block types.
///
/// Tags match the element tags used by page literals (`div`, `h1`, ...); the
/// descriptive names are accepted as aliases when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementKind {
    /// Generic block container.
    #[cfg_attr(feature = "serde", serde(rename = "div", alias = "container"))]
    Container,
    /// Top-level heading.
    #[cfg_attr(feature = "serde", serde(rename = "h1", alias = "heading1"))]
    Heading1,
    /// Section heading.
    #[cfg_attr(feature = "serde", serde(rename = "h2", alias = "heading2"))]
    Heading2,
    /// Sub-section heading.
    #[cfg_attr(feature = "serde", serde(rename = "h3", alias = "heading3"))]
    Heading3,
    /// Body text.
    #[cfg_attr(feature = "serde", serde(rename = "p", alias = "paragraph"))]
    Paragraph,
    /// Clickable button; content is the caption.
    #[cfg_attr(feature = "serde", serde(rename = "button"))]
    Button,
    /// Image; content is the source URL.
    #[cfg_attr(feature = "serde", serde(rename = "img", alias = "image"))]
    Image,
    /// Video; content is the source URL.
    #[cfg_attr(feature = "serde", serde(rename = "video"))]
    Video,
    /// Single-line text field; content is the placeholder.
    #[cfg_attr(feature = "serde", serde(rename = "input", alias = "textInput"))]
    TextInput,
    /// Multi-line text field; content is the placeholder.
    #[cfg_attr(feature = "serde", serde(rename = "textarea", alias = "textArea"))]
    TextArea,
    /// Drop-down select.
    #[cfg_attr(feature = "serde", serde(rename = "select"))]
    Select,
    /// Grid layout container.
    #[cfg_attr(feature = "serde", serde(rename = "grid"))]
    Grid,
    /// Flex layout container.
    #[cfg_attr(feature = "serde", serde(rename = "flex", alias = "flexBox"))]
    FlexBox,
    /// Single glyph icon; content is the glyph.
    #[cfg_attr(feature = "serde", serde(rename = "icon"))]
    Icon,
}

impl ElementKind {
    /// Every kind, in sidebar order.
    pub const ALL: [Self; 14] = [
        Self::Container,
        Self::Grid,
        Self::FlexBox,
        Self::Heading1,
        Self::Heading2,
        Self::Heading3,
        Self::Paragraph,
        Self::Button,
        Self::Icon,
        Self::Image,
        Self::Video,
        Self::TextInput,
        Self::TextArea,
        Self::Select,
    ];

    /// Element tag used by page literals.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Container => "div",
            Self::Heading1 => "h1",
            Self::Heading2 => "h2",
            Self::Heading3 => "h3",
            Self::Paragraph => "p",
            Self::Button => "button",
            Self::Image => "img",
            Self::Video => "video",
            Self::TextInput => "input",
            Self::TextArea => "textarea",
            Self::Select => "select",
            Self::Grid => "grid",
            Self::FlexBox => "flex",
            Self::Icon => "icon",
        }
    }

    /// Parse a tag (`"h1"`) or descriptive name (`"heading1"`).
    pub fn from_tag(tag: &str) -> Option<Self> {
        let kind = match tag {
            "div" | "container" => Self::Container,
            "h1" | "heading1" => Self::Heading1,
            "h2" | "heading2" => Self::Heading2,
            "h3" | "heading3" => Self::Heading3,
            "p" | "paragraph" => Self::Paragraph,
            "button" => Self::Button,
            "img" | "image" => Self::Image,
            "video" => Self::Video,
            "input" | "textInput" => Self::TextInput,
            "textarea" | "textArea" => Self::TextArea,
            "select" => Self::Select,
            "grid" => Self::Grid,
            "flex" | "flexBox" => Self::FlexBox,
            "icon" => Self::Icon,
            _ => return None,
        };
        Some(kind)
    }

    /// Layout kinds are the ones expected to receive children.
    pub const fn is_layout(self) -> bool {
        matches!(self, Self::Container | Self::Grid | Self::FlexBox)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One flat node entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ElementRecord {
    /// Store-unique identity; immutable once added.
    pub id: ElementId,
    /// Building-block type.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: ElementKind,
    /// Type-dependent payload (text, URL, placeholder).
    #[cfg_attr(feature = "serde", serde(default))]
    pub content: String,
    /// Style properties.
    #[cfg_attr(feature = "serde", serde(default))]
    pub style: Style,
    /// Parent reference; `None` means root.
    #[cfg_attr(feature = "serde", serde(default))]
    pub parent_id: Option<ElementId>,
}

impl ElementRecord {
    /// Root record with empty content and style.
    pub fn new(id: impl Into<ElementId>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            content: String::new(),
            style: Style::new(),
            parent_id: None,
        }
    }

    /// Record without an id, ready to be handed to [`crate::add`].
    pub fn draft(kind: ElementKind) -> Self {
        Self::new(ElementId::default(), kind)
    }

    /// Replace the content payload.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Set one style property.
    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }

    /// Replace the whole style mapping.
    pub fn with_style_map(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the parent reference.
    pub fn with_parent(mut self, parent: impl Into<ElementId>) -> Self {
        self.parent_id = Some(parent.into());
        self
    }

    /// True when the record has no parent reference.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn tags_round_trip_through_from_tag() {
        for kind in ElementKind::ALL {
            assert_eq!(ElementKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(ElementKind::from_tag("flexBox"), Some(ElementKind::FlexBox));
        assert_eq!(ElementKind::from_tag("marquee"), None);
    }

    #[test]
    fn all_lists_each_kind_once() {
        let mut kinds = ElementKind::ALL.to_vec();
        kinds.sort();
        kinds.dedup();
        assert_eq!(kinds.len(), 14);
    }

    #[test]
    fn builder_sets_fields() {
        let rec = ElementRecord::new("a", ElementKind::Paragraph)
            .with_content("hi")
            .with_style("padding", "16px")
            .with_parent("root");
        assert_eq!(rec.content, "hi");
        assert_eq!(rec.style.get("padding").map(String::as_str), Some("16px"));
        assert_eq!(rec.parent_id, Some(ElementId::from("root")));
        assert!(!rec.is_root());
        assert!(ElementRecord::draft(ElementKind::Icon).id.is_unassigned());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn records_decode_from_literal_tags_and_aliases() {
        let rec: ElementRecord = serde_json::from_str(
            r#"{"id":"hero","type":"h1","content":"Hi","style":{"fontSize":"48px"},"parentId":"top"}"#,
        )
        .unwrap();
        assert_eq!(rec.kind, ElementKind::Heading1);
        assert_eq!(rec.parent_id, Some(ElementId::from("top")));

        let alias: ElementRecord =
            serde_json::from_str(r#"{"id":"x","type":"flexBox"}"#).unwrap();
        assert_eq!(alias.kind, ElementKind::FlexBox);
        assert!(alias.is_root());
        assert!(alias.style.is_empty());
    }
}
