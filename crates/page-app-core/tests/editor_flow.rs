// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used)]
//! A whole editing pass: prefs in, template, edits, preview, prefs out.

use page_app_core::{ConfigPort, ConfigService, EditorPrefs, EditorSession, MemoryStore, Tab};
use page_catalog::Device;
use page_model::{check_invariants, ElementId, ElementKind, ElementPatch};

#[test]
fn edit_preview_and_persist() {
    let config = ConfigService::new(MemoryStore::new());
    config.save_prefs(&EditorPrefs {
        device: Device::Tablet,
        ..EditorPrefs::default()
    });

    let mut session = EditorSession::new();
    let prefs = config.load_prefs().unwrap_or_default();
    session.apply_prefs(&prefs);
    session.load_builtin("landing-page").unwrap();

    let features = ElementId::from("features-grid");
    let card = session.add_element(ElementKind::Container, Some(&features));
    let title = session.add_element(ElementKind::Heading3, Some(&card));
    session.select(&title);
    session.update_selected(&ElementPatch::new().content("Fast").style("fontSize", "20px"));

    // Hero button moves into the new card; moving the card into its own
    // child is refused.
    assert!(session.move_element(&ElementId::from("cta-button"), Some(&card)));
    assert!(!session.move_element(&card, Some(&title)));
    check_invariants(session.store().records()).unwrap();

    session.set_tab(Tab::Preview);
    let preview = session.preview();
    let scaled = preview
        .iter()
        .find_map(|root| root.find(&title))
        .expect("title in preview");
    assert_eq!(scaled.record.style["fontSize"], "17px");
    assert_eq!(scaled.record.content, "Fast");

    session.remove_element(&features);
    assert!(session.selected().is_none());
    assert!(!session.store().contains(&ElementId::from("cta-button")));

    config.save_prefs(&session.prefs(&prefs));
    let reloaded = config.load_prefs().unwrap();
    assert_eq!(reloaded.device, Device::Tablet);
    assert_eq!(reloaded.last_template.as_deref(), Some("landing-page"));
}
