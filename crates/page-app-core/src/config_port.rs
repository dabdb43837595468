// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config port for editor preferences.

use tracing::warn;

use crate::config::{ConfigService, ConfigStore};
use crate::prefs::EditorPrefs;

/// Key editor preferences are stored under.
pub const PREFS_KEY: &str = "editor_prefs";

/// Config-facing port for loading/saving editor preferences.
pub trait ConfigPort {
    /// Load editor preferences (None if missing or unreadable).
    fn load_prefs(&self) -> Option<EditorPrefs>;
    /// Persist editor preferences (best-effort; failures are logged).
    fn save_prefs(&self, prefs: &EditorPrefs);
}

impl<S: ConfigStore> ConfigPort for ConfigService<S> {
    fn load_prefs(&self) -> Option<EditorPrefs> {
        match self.load(PREFS_KEY) {
            Ok(prefs) => prefs,
            Err(err) => {
                warn!(%err, key = PREFS_KEY, "ignoring unreadable editor prefs");
                None
            }
        }
    }

    fn save_prefs(&self, prefs: &EditorPrefs) {
        if let Err(err) = self.save(PREFS_KEY, prefs) {
            warn!(%err, key = PREFS_KEY, "failed to save editor prefs");
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::config::{ConfigError, MemoryStore};
    use page_catalog::Device;

    struct ReadOnly;

    impl ConfigStore for ReadOnly {
        fn load_raw(&self, _key: &str) -> Result<Vec<u8>, ConfigError> {
            Err(ConfigError::Other("offline".into()))
        }

        fn save_raw(&self, _key: &str, _data: &[u8]) -> Result<(), ConfigError> {
            Err(ConfigError::Other("read-only".into()))
        }
    }

    #[test]
    fn prefs_round_trip_through_the_service() {
        let service = ConfigService::new(MemoryStore::new());
        assert_eq!(service.load_prefs(), None);
        let prefs = EditorPrefs {
            device: Device::Mobile,
            last_template: Some("blog".into()),
            ..EditorPrefs::default()
        };
        service.save_prefs(&prefs);
        assert_eq!(service.load_prefs(), Some(prefs));
    }

    #[test]
    fn store_failures_are_swallowed() {
        let service = ConfigService::new(ReadOnly);
        service.save_prefs(&EditorPrefs::default());
        assert_eq!(service.load_prefs(), None);
    }

    #[test]
    fn corrupt_prefs_load_as_none() {
        let service = ConfigService::new(MemoryStore::new());
        service.store().save_raw(PREFS_KEY, b"\"tablet\"").unwrap();
        assert_eq!(service.load_prefs(), None);
    }
}
