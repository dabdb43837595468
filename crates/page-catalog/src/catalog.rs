// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Element palette: how each kind is presented and what a fresh one holds.

use page_model::{ElementKind, ElementRecord, Style};

/// Palette section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Containers that hold other elements.
    Layout,
    /// Text and simple controls.
    Basic,
    /// Images and video.
    Media,
    /// Form controls.
    Form,
}

impl Category {
    /// Sections in palette order.
    pub const ALL: [Self; 4] = [Self::Layout, Self::Basic, Self::Media, Self::Form];

    /// Section heading.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Layout => "Layout",
            Self::Basic => "Basic",
            Self::Media => "Media",
            Self::Form => "Form",
        }
    }
}

/// Presentation data for one element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Kind described by this entry.
    pub kind: ElementKind,
    /// Palette label.
    pub label: &'static str,
    /// Palette glyph.
    pub icon: &'static str,
    /// Palette section.
    pub category: Category,
    /// Text shown when the element's content is empty.
    pub placeholder: &'static str,
}

/// Catalog entry for `kind`.
pub const fn entry(kind: ElementKind) -> CatalogEntry {
    use ElementKind as K;
    let (label, icon, category, placeholder) = match kind {
        K::Container => ("Container", "⬚", Category::Layout, "Container"),
        K::Grid => ("Grid", "▤", Category::Layout, "Grid"),
        K::FlexBox => ("Flex", "⇿", Category::Layout, "Flex"),
        K::Heading1 => ("Heading 1", "H1", Category::Basic, "Heading 1"),
        K::Heading2 => ("Heading 2", "H2", Category::Basic, "Heading 2"),
        K::Heading3 => ("Heading 3", "H3", Category::Basic, "Heading 3"),
        K::Paragraph => ("Paragraph", "¶", Category::Basic, "Paragraph text"),
        K::Button => ("Button", "⏺", Category::Basic, "Button"),
        K::Icon => ("Icon", "★", Category::Basic, "★"),
        K::Image => ("Image", "🖼", Category::Media, "Image placeholder"),
        K::Video => ("Video", "▶", Category::Media, "Video placeholder"),
        K::TextInput => ("Text Input", "⌨", Category::Form, "Text input"),
        K::TextArea => ("Text Area", "✎", Category::Form, "Text area"),
        K::Select => ("Select", "▾", Category::Form, "Select an option"),
    };
    CatalogEntry {
        kind,
        label,
        icon,
        category,
        placeholder,
    }
}

/// Every entry, in palette order.
pub fn entries() -> impl Iterator<Item = CatalogEntry> {
    ElementKind::ALL.into_iter().map(entry)
}

/// Kinds listed under `category`, in palette order.
pub fn kinds_in(category: Category) -> impl Iterator<Item = ElementKind> {
    entries()
        .filter(move |e| e.category == category)
        .map(|e| e.kind)
}

/// Style every freshly dropped element starts with.
pub fn default_style() -> Style {
    [
        ("color", "#000000"),
        ("backgroundColor", "transparent"),
        ("fontSize", "16px"),
        ("fontWeight", "normal"),
        ("textAlign", "left"),
        ("padding", "16px"),
        ("margin", "0px"),
        ("borderRadius", "0px"),
        ("borderWidth", "0px"),
        ("borderColor", "#000000"),
        ("borderStyle", "solid"),
        ("width", "auto"),
        ("height", "auto"),
        ("opacity", "1"),
        ("display", "block"),
        ("flexDirection", "row"),
        ("justifyContent", "flex-start"),
        ("alignItems", "stretch"),
        ("gridTemplateColumns", "1fr 1fr"),
        ("gap", "16px"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v.to_owned()))
    .collect()
}

/// Draft for a new element of `kind`: empty content, default style, no id.
pub fn new_element(kind: ElementKind) -> ElementRecord {
    ElementRecord::draft(kind).with_style_map(default_style())
}

/// Content to display for `record`, falling back to its placeholder.
pub fn display_text(record: &ElementRecord) -> &str {
    if record.content.is_empty() {
        entry(record.kind).placeholder
    } else {
        &record.content
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn every_kind_belongs_to_exactly_one_category() {
        let total: usize = Category::ALL.iter().map(|&c| kinds_in(c).count()).sum();
        assert_eq!(total, ElementKind::ALL.len());
    }

    #[test]
    fn layout_section_lists_containers_first() {
        let layout: Vec<_> = kinds_in(Category::Layout).collect();
        assert_eq!(
            layout,
            [ElementKind::Container, ElementKind::Grid, ElementKind::FlexBox]
        );
        assert!(layout.iter().all(|k| k.is_layout()));
    }

    #[test]
    fn new_elements_carry_the_default_style() {
        let draft = new_element(ElementKind::Button);
        assert!(draft.id.is_unassigned());
        assert!(draft.content.is_empty());
        assert_eq!(draft.style["padding"], "16px");
        assert_eq!(draft.style["gridTemplateColumns"], "1fr 1fr");
        assert_eq!(draft.style.len(), 20);
    }

    #[test]
    fn display_text_falls_back_to_placeholder() {
        let empty = ElementRecord::draft(ElementKind::Paragraph);
        assert_eq!(display_text(&empty), "Paragraph text");
        let filled = empty.with_content("Hello");
        assert_eq!(display_text(&filled), "Hello");
    }
}
