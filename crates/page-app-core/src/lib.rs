// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Application services for the page editor (session, config, prefs).
//! Keeps UI adapters thin and framework-agnostic.
#![forbid(unsafe_code)]

pub mod config;
pub mod config_port;
pub mod prefs;
pub mod render_port;
pub mod session;

pub use config::{ConfigError, ConfigService, ConfigStore, MemoryStore};
pub use config_port::{ConfigPort, PREFS_KEY};
pub use prefs::{EditorPrefs, PanelPrefs};
pub use render_port::RenderPort;
pub use session::{EditorSession, Tab};
