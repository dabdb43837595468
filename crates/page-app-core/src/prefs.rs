// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persisted editor preferences (preview device, panel layout).

use page_catalog::Device;
use serde::{Deserialize, Serialize};

/// Saved preferences for an editor window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EditorPrefs {
    /// Device the preview opens on.
    pub device: Device,
    /// Panel visibility.
    pub panels: PanelPrefs,
    /// Id of the template loaded last, if any.
    pub last_template: Option<String>,
}

/// Side panel toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PanelPrefs {
    /// Element palette collapsed.
    pub sidebar_collapsed: bool,
    /// Properties panel collapsed.
    pub properties_collapsed: bool,
}
