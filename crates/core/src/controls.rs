//! Per-overlay editor controls and the editor session that owns overlays.
//!
//! [`OverlayControls`] holds no state of its own: each intent is turned into
//! a call on the caller-supplied [`OverlayActions`]. [`EditorSession`] is the
//! usual implementor and owns the overlays for one editing session.

use crate::overlay::{Overlay, OverlayPatch};

/// Callbacks the owning editor state provides to the controls.
pub trait OverlayActions {
    /// Apply a partial update to the overlay with `id`.
    fn update(&mut self, id: &str, patch: OverlayPatch);
    /// Open the settings view for the overlay with `id`.
    fn open_settings(&mut self, id: &str);
    /// Remove the overlay with `id`.
    fn delete(&mut self, id: &str);
}

/// The four mutation intents exposed for a single overlay.
#[derive(Debug, Clone, Copy)]
pub struct OverlayControls<'a> {
    overlay: &'a Overlay,
}

impl<'a> OverlayControls<'a> {
    pub fn new(overlay: &'a Overlay) -> Self {
        Self { overlay }
    }

    pub fn toggle_flip_h(&self, actions: &mut impl OverlayActions) {
        let patch = OverlayPatch {
            flip_h: Some(!self.overlay.flip_h),
            ..Default::default()
        };
        actions.update(&self.overlay.id, patch);
    }

    pub fn toggle_flip_v(&self, actions: &mut impl OverlayActions) {
        let patch = OverlayPatch {
            flip_v: Some(!self.overlay.flip_v),
            ..Default::default()
        };
        actions.update(&self.overlay.id, patch);
    }

    pub fn open_settings(&self, actions: &mut impl OverlayActions) {
        actions.open_settings(&self.overlay.id);
    }

    pub fn delete(&self, actions: &mut impl OverlayActions) {
        actions.delete(&self.overlay.id);
    }
}

// ---------------------------------------------------------------------------
// Editor session
// ---------------------------------------------------------------------------

/// Overlays for one editing session, in stacking order (bottom first).
///
/// Nothing here is shared between sessions; dropping the session drops its
/// overlays.
#[derive(Debug, Default)]
pub struct EditorSession {
    overlays: Vec<Overlay>,
    settings_open: Option<String>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an overlay on top of the stack and return its id.
    pub fn add(&mut self, overlay: Overlay) -> String {
        let id = overlay.id.clone();
        self.overlays.push(overlay);
        id
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    pub fn get(&self, id: &str) -> Option<&Overlay> {
        self.overlays.iter().find(|o| o.id == id)
    }

    /// Controls bound to the overlay with `id`, if it exists.
    pub fn controls(&self, id: &str) -> Option<OverlayControls<'_>> {
        self.get(id).map(OverlayControls::new)
    }

    /// Id of the overlay whose settings view is open.
    pub fn settings_open(&self) -> Option<&str> {
        self.settings_open.as_deref()
    }

    pub fn close_settings(&mut self) {
        self.settings_open = None;
    }

    /// Run one control intent against the overlay with `id`.
    ///
    /// The controls read a snapshot of the overlay, so the borrow on the
    /// session is released before the resulting action is applied.
    pub fn dispatch(&mut self, id: &str, intent: impl FnOnce(OverlayControls<'_>, &mut Recorded)) {
        let Some(overlay) = self.get(id).cloned() else {
            tracing::debug!(overlay_id = id, "Control intent for unknown overlay ignored");
            return;
        };
        let mut recorded = Recorded::default();
        intent(OverlayControls::new(&overlay), &mut recorded);
        for action in recorded.0 {
            match action {
                Action::Update(id, patch) => self.update(&id, patch),
                Action::OpenSettings(id) => OverlayActions::open_settings(self, &id),
                Action::Delete(id) => OverlayActions::delete(self, &id),
            }
        }
    }
}

impl OverlayActions for EditorSession {
    fn update(&mut self, id: &str, patch: OverlayPatch) {
        match self.overlays.iter_mut().find(|o| o.id == id) {
            Some(overlay) => overlay.apply(&patch),
            None => tracing::debug!(overlay_id = id, "Update for unknown overlay ignored"),
        }
    }

    fn open_settings(&mut self, id: &str) {
        if self.get(id).is_some() {
            self.settings_open = Some(id.to_string());
        }
    }

    fn delete(&mut self, id: &str) {
        let before = self.overlays.len();
        self.overlays.retain(|o| o.id != id);
        if self.overlays.len() == before {
            tracing::debug!(overlay_id = id, "Delete for unknown overlay ignored");
            return;
        }
        if self.settings_open.as_deref() == Some(id) {
            self.settings_open = None;
        }
    }
}

/// Actions captured from a control intent, replayed by
/// [`EditorSession::dispatch`].
#[derive(Debug, Default)]
pub struct Recorded(Vec<Action>);

#[derive(Debug)]
enum Action {
    Update(String, OverlayPatch),
    OpenSettings(String),
    Delete(String),
}

impl OverlayActions for Recorded {
    fn update(&mut self, id: &str, patch: OverlayPatch) {
        self.0.push(Action::Update(id.to_string(), patch));
    }

    fn open_settings(&mut self, id: &str) {
        self.0.push(Action::OpenSettings(id.to_string()));
    }

    fn delete(&mut self, id: &str) {
        self.0.push(Action::Delete(id.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::OverlayKind;

    /// Captures calls so tests can inspect exactly what the controls sent.
    #[derive(Default)]
    struct Spy {
        updates: Vec<(String, OverlayPatch)>,
        opened: Vec<String>,
        deleted: Vec<String>,
    }

    impl OverlayActions for Spy {
        fn update(&mut self, id: &str, patch: OverlayPatch) {
            self.updates.push((id.to_string(), patch));
        }
        fn open_settings(&mut self, id: &str) {
            self.opened.push(id.to_string());
        }
        fn delete(&mut self, id: &str) {
            self.deleted.push(id.to_string());
        }
    }

    fn session_with_one() -> (EditorSession, String) {
        let mut session = EditorSession::new();
        let id = session.add(Overlay::new(OverlayKind::Css, "linear-gradient(red, blue)"));
        (session, id)
    }

    #[test]
    fn flip_h_sends_only_the_toggled_field() {
        let overlay = Overlay::new(OverlayKind::Css, "red");
        let mut spy = Spy::default();
        OverlayControls::new(&overlay).toggle_flip_h(&mut spy);

        assert_eq!(spy.updates.len(), 1);
        let (id, patch) = &spy.updates[0];
        assert_eq!(id, &overlay.id);
        assert_eq!(
            patch,
            &OverlayPatch {
                flip_h: Some(true),
                ..Default::default()
            }
        );
    }

    #[test]
    fn flip_v_sends_only_the_toggled_field() {
        let mut overlay = Overlay::new(OverlayKind::Css, "red");
        overlay.flip_v = true;
        let mut spy = Spy::default();
        OverlayControls::new(&overlay).toggle_flip_v(&mut spy);

        let (_, patch) = &spy.updates[0];
        assert_eq!(
            patch,
            &OverlayPatch {
                flip_v: Some(false),
                ..Default::default()
            }
        );
    }

    #[test]
    fn settings_and_delete_forward_the_id() {
        let overlay = Overlay::new(OverlayKind::Css, "red");
        let controls = OverlayControls::new(&overlay);
        let mut spy = Spy::default();
        controls.open_settings(&mut spy);
        controls.delete(&mut spy);

        assert_eq!(spy.opened, vec![overlay.id.clone()]);
        assert_eq!(spy.deleted, vec![overlay.id.clone()]);
        assert!(spy.updates.is_empty());
    }

    #[test]
    fn double_flip_h_restores_original() {
        let (mut session, id) = session_with_one();
        let original = session.get(&id).unwrap().clone();

        session.dispatch(&id, |c, a| c.toggle_flip_h(a));
        assert!(session.get(&id).unwrap().flip_h);
        session.dispatch(&id, |c, a| c.toggle_flip_h(a));

        assert_eq!(session.get(&id).unwrap(), &original);
    }

    #[test]
    fn flip_axes_are_independent() {
        let (mut session, id) = session_with_one();

        session.dispatch(&id, |c, a| c.toggle_flip_v(a));
        let overlay = session.get(&id).unwrap();
        assert!(overlay.flip_v);
        assert!(!overlay.flip_h);

        session.dispatch(&id, |c, a| c.toggle_flip_h(a));
        let overlay = session.get(&id).unwrap();
        assert!(overlay.flip_v);
        assert!(overlay.flip_h);
    }

    #[test]
    fn open_settings_then_delete_closes_settings() {
        let (mut session, id) = session_with_one();

        session.dispatch(&id, |c, a| c.open_settings(a));
        assert_eq!(session.settings_open(), Some(id.as_str()));

        session.dispatch(&id, |c, a| c.delete(a));
        assert!(session.get(&id).is_none());
        assert!(session.overlays().is_empty());
        assert_eq!(session.settings_open(), None);
    }

    #[test]
    fn delete_leaves_other_overlays_in_order() {
        let mut session = EditorSession::new();
        let a = session.add(Overlay::new(OverlayKind::Css, "red"));
        let b = session.add(Overlay::new(OverlayKind::Css, "green"));
        let c = session.add(Overlay::new(OverlayKind::Css, "blue"));

        OverlayActions::delete(&mut session, &b);

        let ids: Vec<&str> = session.overlays().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec![a.as_str(), c.as_str()]);
    }

    #[test]
    fn intents_for_unknown_ids_are_ignored() {
        let (mut session, id) = session_with_one();
        session.dispatch("missing", |c, a| c.delete(a));
        session.update(
            "missing",
            OverlayPatch {
                opacity: Some(0.1),
                ..Default::default()
            },
        );
        OverlayActions::open_settings(&mut session, "missing");

        assert_eq!(session.overlays().len(), 1);
        assert_eq!(session.get(&id).unwrap().opacity, 1.0);
        assert_eq!(session.settings_open(), None);
    }

    #[test]
    fn controls_lookup_by_id() {
        let (session, id) = session_with_one();
        assert!(session.controls(&id).is_some());
        assert!(session.controls("missing").is_none());
    }
}
