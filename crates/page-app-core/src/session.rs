// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Editor session: the node store plus the UI state that drives it.
//!
//! A shell (desktop, web, TUI) forwards palette drops, canvas drags and
//! property edits to the session and redraws when told to through its
//! [`RenderPort`]. Every structural change goes through `page_model`'s
//! mutation engine, so no-ops never bump the store revision or trigger a
//! redraw.

use std::fmt;
use std::sync::Arc;

use page_catalog::{catalog, find_template, Device, Template, TemplateError};
use page_model::{
    build, mutation, scale_forest, ElementId, ElementKind, ElementPatch, ElementRecord,
    HierarchyNode, NodeStore, SequentialIds, Snapshot,
};
use tracing::{debug, info};

use crate::prefs::EditorPrefs;
use crate::render_port::RenderPort;

/// Top-level editor view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    /// Template gallery.
    #[default]
    Templates,
    /// Canvas with palette and properties panel.
    Editor,
    /// Scaled device preview.
    Preview,
}

/// One open page and the editor state around it.
pub struct EditorSession {
    store: NodeStore,
    ids: SequentialIds,
    selected: Option<ElementId>,
    tab: Tab,
    device: Device,
    template: Option<String>,
    render: Option<Box<dyn RenderPort>>,
}

impl fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorSession")
            .field("revision", &self.store.revision())
            .field("records", &self.store.len())
            .field("selected", &self.selected)
            .field("tab", &self.tab)
            .field("device", &self.device)
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    /// Blank page on the template gallery, previewing on desktop.
    pub fn new() -> Self {
        Self {
            store: NodeStore::new(),
            ids: SequentialIds::new(),
            selected: None,
            tab: Tab::default(),
            device: Device::default(),
            template: None,
            render: None,
        }
    }

    /// Attach a redraw port (builder style).
    pub fn with_render_port(mut self, port: Box<dyn RenderPort>) -> Self {
        self.render = Some(port);
        self
    }

    /// Attach or detach the redraw port.
    pub fn set_render_port(&mut self, port: Option<Box<dyn RenderPort>>) {
        self.render = port;
    }

    /// The underlying store.
    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    /// Read-only copy of the current collection.
    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    /// Active tab.
    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Preview device.
    pub fn device(&self) -> Device {
        self.device
    }

    /// Id of the template the page was started from.
    pub fn current_template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    /// Currently selected element id.
    pub fn selected(&self) -> Option<&ElementId> {
        self.selected.as_ref()
    }

    /// Record of the selected element.
    pub fn selected_record(&self) -> Option<&ElementRecord> {
        self.selected.as_ref().and_then(|id| self.store.get(id))
    }

    /// Replace the page with `template` and switch to the editor.
    pub fn load_template(&mut self, template: &Template) {
        let records = template.to_records();
        self.ids = SequentialIds::seeded_from(records.iter().map(|r| &r.id));
        self.store.replace(Arc::from(records));
        self.selected = None;
        self.tab = Tab::Editor;
        self.template = Some(template.id.clone());
        info!(
            template = %template.id,
            records = self.store.len(),
            revision = self.store.revision(),
            "template loaded"
        );
        self.redraw();
    }

    /// Load a bundled template by id.
    pub fn load_builtin(&mut self, id: &str) -> Result<(), TemplateError> {
        let template = find_template(id)?;
        self.load_template(&template);
        Ok(())
    }

    /// Drop a fresh `kind` element (catalog defaults) under `parent`.
    pub fn add_element(&mut self, kind: ElementKind, parent: Option<&ElementId>) -> ElementId {
        self.add_record(catalog::new_element(kind), parent)
    }

    /// Append `draft` under `parent`; its id is replaced by a minted one.
    pub fn add_record(&mut self, draft: ElementRecord, parent: Option<&ElementId>) -> ElementId {
        let (next, id) = mutation::add(&self.store.snapshot(), &mut self.ids, draft, parent);
        self.commit(next);
        id
    }

    /// Remove `id` and its subtree. Returns whether anything was removed.
    ///
    /// The selection is cleared when the selected element was part of the
    /// removed subtree.
    pub fn remove_element(&mut self, id: &ElementId) -> bool {
        let next = mutation::remove(&self.store.snapshot(), id);
        let changed = self.commit(next);
        if changed && self.selected.as_ref().is_some_and(|s| !self.store.contains(s)) {
            debug!(%id, "selection cleared by removal");
            self.selected = None;
        }
        changed
    }

    /// Reparent `id` under `parent` (`None` for a root). Returns whether the
    /// move was applied.
    pub fn move_element(&mut self, id: &ElementId, parent: Option<&ElementId>) -> bool {
        let next = mutation::move_element(&self.store.snapshot(), id, parent);
        self.commit(next)
    }

    /// Merge `patch` into element `id`.
    pub fn update_element(&mut self, id: &ElementId, patch: &ElementPatch) -> bool {
        let next = mutation::update(&self.store.snapshot(), id, patch);
        self.commit(next)
    }

    /// Merge `patch` into the selected element, if any.
    pub fn update_selected(&mut self, patch: &ElementPatch) -> bool {
        match self.selected.clone() {
            Some(id) => self.update_element(&id, patch),
            None => false,
        }
    }

    /// Select `id`. Unknown ids are ignored; returns whether the selection
    /// now points at `id`.
    pub fn select(&mut self, id: &ElementId) -> bool {
        if !self.store.contains(id) {
            debug!(%id, "select ignored: element not found");
            return false;
        }
        if self.selected.as_ref() != Some(id) {
            self.selected = Some(id.clone());
            self.redraw();
        }
        true
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        if self.selected.take().is_some() {
            self.redraw();
        }
    }

    /// Switch tabs.
    pub fn set_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            debug!(?tab, "tab switched");
            self.tab = tab;
            self.redraw();
        }
    }

    /// Switch preview device.
    pub fn set_device(&mut self, device: Device) {
        if self.device != device {
            debug!(%device, "preview device switched");
            self.device = device;
            self.redraw();
        }
    }

    /// The page as a forest, for the canvas and the layers view.
    pub fn hierarchy(&self) -> Vec<HierarchyNode> {
        build(self.store.records())
    }

    /// The page scaled for the current preview device.
    pub fn preview(&self) -> Vec<HierarchyNode> {
        scale_forest(&self.hierarchy(), self.device.factor())
    }

    /// Preferences reflecting this session (panel toggles taken from `base`).
    pub fn prefs(&self, base: &EditorPrefs) -> EditorPrefs {
        EditorPrefs {
            device: self.device,
            last_template: self.template.clone().or_else(|| base.last_template.clone()),
            ..base.clone()
        }
    }

    /// Apply saved preferences. The page itself is not reloaded.
    pub fn apply_prefs(&mut self, prefs: &EditorPrefs) {
        self.set_device(prefs.device);
    }

    fn commit(&mut self, next: Snapshot) -> bool {
        let changed = self.store.replace(next);
        if changed {
            self.redraw();
        }
        changed
    }

    fn redraw(&self) {
        if let Some(port) = &self.render {
            port.request_redraw();
        }
    }
}
