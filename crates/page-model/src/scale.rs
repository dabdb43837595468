// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Responsive scaling of pixel-valued style properties.
//!
//! Preview rendering shrinks a page for narrower devices by multiplying the
//! pixel sizes below by a factor. The transform is conservative: it never adds
//! a property and never touches a unit it does not recognise (`%`, `rem`,
//! `em`, keywords such as `auto`).

use tracing::warn;

use crate::hierarchy::HierarchyNode;
use crate::record::Style;

/// Style properties rewritten by [`scale`].
pub const SCALED_PROPERTIES: [&str; 7] = [
    "fontSize",
    "padding",
    "margin",
    "width",
    "height",
    "borderRadius",
    "gap",
];

/// Only property whose bare numbers (no unit) count as pixels.
const UNITLESS_PIXEL_PROPERTY: &str = "fontSize";

const PX: &str = "px";

/// Scale `node` and all of its descendants by `factor`.
///
/// Returns a new tree; the input is left untouched. A non-finite or negative
/// factor yields an unscaled copy.
pub fn scale(node: &HierarchyNode, factor: f64) -> HierarchyNode {
    if !factor.is_finite() || factor < 0.0 {
        warn!(factor, "ignoring invalid scale factor");
        return node.clone();
    }
    scale_node(node, factor)
}

/// [`scale`] applied to each root of a forest.
pub fn scale_forest(roots: &[HierarchyNode], factor: f64) -> Vec<HierarchyNode> {
    roots.iter().map(|root| scale(root, factor)).collect()
}

fn scale_node(node: &HierarchyNode, factor: f64) -> HierarchyNode {
    HierarchyNode::from_tree(
        node,
        |at| &at.children,
        |at| {
            let mut record = at.record.clone();
            scale_style(&mut record.style, factor);
            record
        },
    )
}

/// Rewrite the scalable entries of `style` in place.
pub fn scale_style(style: &mut Style, factor: f64) {
    for property in SCALED_PROPERTIES {
        if let Some(value) = style.get_mut(property) {
            if let Some(scaled) = scale_value(property, value, factor) {
                *value = scaled;
            }
        }
    }
}

/// Scaled form of `value`, or `None` when it must pass through unchanged.
///
/// `"16px"` scaled by 0.7 is `"11.2px"`. Shorthands scale component-wise
/// only when every component is a pixel value (`"12px 24px"`). Factor 1 and
/// results too large to print as a finite number leave the value as written.
pub fn scale_value(property: &str, value: &str, factor: f64) -> Option<String> {
    if (factor - 1.0).abs() < f64::EPSILON {
        return None;
    }
    let unitless_ok = property == UNITLESS_PIXEL_PROPERTY;
    let mut parts = Vec::new();
    for component in value.split_whitespace() {
        let (number, unit) = match component.strip_suffix(PX) {
            Some(number) => (number, PX),
            None if unitless_ok => (component, ""),
            None => return None,
        };
        let scaled = parse_number(number)? * factor;
        if !scaled.is_finite() {
            return None;
        }
        parts.push(format!("{}{unit}", format_number(scaled)));
    }
    if parts.is_empty() {
        return None;
    }
    Some(parts.join(" "))
}

/// Plain decimal literal: optional sign, digits, at most one dot.
fn parse_number(raw: &str) -> Option<f64> {
    let digits = raw.strip_prefix(['-', '+']).unwrap_or(raw);
    let mut seen_digit = false;
    let mut seen_dot = false;
    for ch in digits.chars() {
        match ch {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => return None,
        }
    }
    if !seen_digit {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Round to two decimals and print without trailing zeros.
fn format_number(v: f64) -> String {
    // Past 1e15 an f64 has no fractional digits left to round.
    let rounded = if v.abs() >= 1e15 {
        v
    } else {
        (v * 100.0).round() / 100.0
    };
    // Avoid printing "-0".
    let rounded = if rounded.abs() < f64::EPSILON { 0.0 } else { rounded };
    format!("{rounded}")
}
