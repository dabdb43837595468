// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Element identifiers and the id sources that mint them.

use std::fmt;

/// Opaque, stable identifier of an element record.
///
/// Ids are plain strings so that externally supplied trees (starter layouts)
/// can keep their human-readable ids; ids minted by [`SequentialIds`] use the
/// `el-<n>` form.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ElementId(String);

impl ElementId {
    /// Wraps a raw id string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the placeholder id carried by drafts that were never added.
    pub fn is_unassigned(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({})", self.0)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ElementId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl AsRef<str> for ElementId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Source of fresh element ids.
///
/// Every id returned must differ from every id previously returned by the same
/// source, including ids minted in the same instant.
pub trait IdSource {
    /// Mint the next id.
    fn next_id(&mut self) -> ElementId;
}

impl<F> IdSource for F
where
    F: FnMut() -> ElementId,
{
    fn next_id(&mut self) -> ElementId {
        self()
    }
}

const SEQUENTIAL_PREFIX: &str = "el-";

/// Monotonic counter producing `el-1`, `el-2`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u64,
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl SequentialIds {
    /// Counter starting at `el-1`.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Counter that will never re-issue any of `existing`.
    pub fn seeded_from<'a>(existing: impl IntoIterator<Item = &'a ElementId>) -> Self {
        let mut ids = Self::new();
        for id in existing {
            ids.observe(id);
        }
        ids
    }

    /// Bump the counter past `id` if it has the sequential form.
    ///
    /// Foreign ids (`"hero-section"`) cannot collide with `el-<n>` and are
    /// ignored.
    pub fn observe(&mut self, id: &ElementId) {
        let Some(n) = id
            .as_str()
            .strip_prefix(SEQUENTIAL_PREFIX)
            .and_then(|digits| digits.parse::<u64>().ok())
        else {
            return;
        };
        if n >= self.next {
            self.next = n.saturating_add(1);
        }
    }

    /// Number the next minted id will carry.
    pub fn peek(&self) -> u64 {
        self.next
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> ElementId {
        let n = self.next;
        self.next = self.next.saturating_add(1);
        ElementId(format!("{SEQUENTIAL_PREFIX}{n}"))
    }
}
