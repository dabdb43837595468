// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Preview device presets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Simulated viewport for previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    /// Full-width desktop view.
    #[default]
    Desktop,
    /// Tablet, 768px wide.
    Tablet,
    /// Phone, 375px wide.
    Mobile,
}

/// Unrecognised device id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown device: {0}")]
pub struct UnknownDevice(pub String);

impl Device {
    /// Presets in toolbar order.
    pub const ALL: [Self; 3] = [Self::Desktop, Self::Tablet, Self::Mobile];

    /// Stable lowercase id.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Tablet => "tablet",
            Self::Mobile => "mobile",
        }
    }

    /// Toolbar label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Desktop => "Desktop",
            Self::Tablet => "Tablet",
            Self::Mobile => "Mobile",
        }
    }

    /// Factor handed to `page_model::scale`.
    pub const fn factor(self) -> f64 {
        match self {
            Self::Desktop => 1.0,
            Self::Tablet => 0.85,
            Self::Mobile => 0.7,
        }
    }

    /// CSS width of the preview frame.
    pub const fn preview_width(self) -> &'static str {
        match self {
            Self::Desktop => "100%",
            Self::Tablet => "768px",
            Self::Mobile => "375px",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Device {
    type Err = UnknownDevice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.id() == s)
            .ok_or_else(|| UnknownDevice(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn presets_carry_the_expected_factors() {
        assert!((Device::Desktop.factor() - 1.0).abs() < f64::EPSILON);
        assert!((Device::Tablet.factor() - 0.85).abs() < f64::EPSILON);
        assert!((Device::Mobile.factor() - 0.7).abs() < f64::EPSILON);
        assert_eq!(Device::default(), Device::Desktop);
    }

    #[test]
    fn ids_parse_back() {
        for device in Device::ALL {
            assert_eq!(device.id().parse::<Device>(), Ok(device));
        }
        assert_eq!(
            "watch".parse::<Device>(),
            Err(UnknownDevice("watch".to_owned()))
        );
    }

    #[test]
    fn serde_uses_lowercase_ids() {
        assert_eq!(serde_json::to_string(&Device::Tablet).unwrap(), "\"tablet\"");
        let parsed: Device = serde_json::from_str("\"mobile\"").unwrap();
        assert_eq!(parsed, Device::Mobile);
    }
}
