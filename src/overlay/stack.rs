//! Ordered stack of active modal names with transition notifications.

use tracing::trace;

/// Receives stack transition notifications.
///
/// The stack makes exactly one explicit call into its listener per mutation,
/// rather than broadcasting an event, so hook ordering stays deterministic.
pub trait StackListener {
    /// `name` was pushed on top. `obscured` is the entry that was top
    /// immediately before the push, if any.
    fn modal_pushed(&mut self, name: &'static str, obscured: Option<&'static str>);

    /// `name` was removed. `revealed` is the new top, set only when the
    /// removed entry was the top itself.
    fn modal_popped(&mut self, name: &'static str, revealed: Option<&'static str>);
}

/// LIFO collection of active modal names, stored bottom to top.
///
/// A name appears at most once at any time. The stack also owns the
/// escape-key edge state, since "close the topmost modal" is the one input
/// the stack itself is responsible for detecting.
#[derive(Debug, Default)]
pub struct ModalStack {
    entries: Vec<&'static str>,
    esc_was_down: bool,
}

impl ModalStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `name` on top and notify the listener. No-op if the name is
    /// already present anywhere in the stack.
    pub fn push(&mut self, name: &'static str, listener: &mut dyn StackListener) {
        if self.contains(name) {
            trace!(name, "push ignored, already on stack");
            return;
        }
        let obscured = self.entries.last().copied();
        self.entries.push(name);
        listener.modal_pushed(name, obscured);
    }

    /// Remove `name` and notify the listener exactly once. The top entry
    /// pops normally; a buried entry is spliced out with the relative order
    /// of all other entries preserved, tolerating callers that close a
    /// non-frontmost dialog. No-op if the name is absent.
    pub fn pop(&mut self, name: &str, listener: &mut dyn StackListener) {
        let Some(index) = self.entries.iter().position(|entry| *entry == name) else {
            return;
        };
        let was_top = index + 1 == self.entries.len();
        let removed = self.entries.remove(index);
        let revealed = if was_top {
            self.entries.last().copied()
        } else {
            None
        };
        listener.modal_popped(removed, revealed);
    }

    /// Remove everything, top first, with one pop notification per entry.
    /// No reveal notifications fire in between; this is a hard reset, not a
    /// sequence of ordinary pops.
    pub fn clear(&mut self, listener: &mut dyn StackListener) {
        while let Some(name) = self.entries.pop() {
            listener.modal_popped(name, None);
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| *entry == name)
    }

    #[must_use]
    pub fn top(&self) -> Option<&'static str> {
        self.entries.last().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of the stack, top to bottom.
    #[must_use]
    pub fn snapshot(&self) -> Vec<&'static str> {
        self.entries.iter().rev().copied().collect()
    }

    /// Rising-edge escape detection: true only on the call where the key
    /// transitions from not-down to down. Each call consumes the transition,
    /// so this must be polled exactly once per frame from a single call site.
    pub fn was_esc_just_pressed(&mut self, is_down: bool) -> bool {
        let edge = is_down && !self.esc_was_down;
        self.esc_was_down = is_down;
        edge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Note {
        Pushed(&'static str, Option<&'static str>),
        Popped(&'static str, Option<&'static str>),
    }

    #[derive(Default)]
    struct Recorder {
        notes: Vec<Note>,
    }

    impl StackListener for Recorder {
        fn modal_pushed(&mut self, name: &'static str, obscured: Option<&'static str>) {
            self.notes.push(Note::Pushed(name, obscured));
        }

        fn modal_popped(&mut self, name: &'static str, revealed: Option<&'static str>) {
            self.notes.push(Note::Popped(name, revealed));
        }
    }

    #[test]
    fn test_lifo_order() {
        let mut stack = ModalStack::new();
        let mut recorder = Recorder::default();

        stack.push("a", &mut recorder);
        stack.push("b", &mut recorder);
        stack.push("c", &mut recorder);

        assert!(stack.contains("a"));
        assert_eq!(stack.top(), Some("c"));
        assert_eq!(stack.snapshot(), vec!["c", "b", "a"]);

        stack.pop("c", &mut recorder);
        assert_eq!(stack.top(), Some("b"));
        assert!(!stack.contains("c"));

        stack.pop("b", &mut recorder);
        stack.pop("a", &mut recorder);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_duplicate_push_is_noop() {
        let mut stack = ModalStack::new();
        let mut recorder = Recorder::default();

        stack.push("a", &mut recorder);
        stack.push("a", &mut recorder);

        assert_eq!(stack.len(), 1);
        assert_eq!(recorder.notes, vec![Note::Pushed("a", None)]);
    }

    #[test]
    fn test_push_reports_obscured_neighbor() {
        let mut stack = ModalStack::new();
        let mut recorder = Recorder::default();

        stack.push("a", &mut recorder);
        stack.push("b", &mut recorder);

        assert_eq!(
            recorder.notes,
            vec![Note::Pushed("a", None), Note::Pushed("b", Some("a"))]
        );
    }

    #[test]
    fn test_pop_top_reveals_neighbor() {
        let mut stack = ModalStack::new();
        let mut recorder = Recorder::default();
        stack.push("a", &mut recorder);
        stack.push("b", &mut recorder);
        recorder.notes.clear();

        stack.pop("b", &mut recorder);

        assert_eq!(recorder.notes, vec![Note::Popped("b", Some("a"))]);
    }

    #[test]
    fn test_out_of_order_pop_splices() {
        let mut stack = ModalStack::new();
        let mut recorder = Recorder::default();
        stack.push("a", &mut recorder);
        stack.push("b", &mut recorder);
        stack.push("c", &mut recorder);
        recorder.notes.clear();

        stack.pop("a", &mut recorder);

        assert_eq!(stack.snapshot(), vec!["c", "b"]);
        // One notification, no reveal: the visible top did not change.
        assert_eq!(recorder.notes, vec![Note::Popped("a", None)]);
    }

    #[test]
    fn test_pop_absent_is_silent() {
        let mut stack = ModalStack::new();
        let mut recorder = Recorder::default();

        stack.pop("ghost", &mut recorder);

        assert!(recorder.notes.is_empty());
    }

    #[test]
    fn test_clear_pops_top_first_without_reveals() {
        let mut stack = ModalStack::new();
        let mut recorder = Recorder::default();
        stack.push("a", &mut recorder);
        stack.push("b", &mut recorder);
        recorder.notes.clear();

        stack.clear(&mut recorder);

        assert!(stack.is_empty());
        assert_eq!(
            recorder.notes,
            vec![Note::Popped("b", None), Note::Popped("a", None)]
        );
    }

    #[test]
    fn test_esc_edge_fires_once_per_press() {
        let mut stack = ModalStack::new();

        // Idle.
        assert!(!stack.was_esc_just_pressed(false));
        // Press: edge on the first down frame only.
        assert!(stack.was_esc_just_pressed(true));
        assert!(!stack.was_esc_just_pressed(true));
        assert!(!stack.was_esc_just_pressed(true));
        // Release, then a fresh press fires again.
        assert!(!stack.was_esc_just_pressed(false));
        assert!(stack.was_esc_just_pressed(true));
    }
}
