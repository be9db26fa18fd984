//! # Note editor state machine
//!
//! Drives the detail pane: nothing selected, viewing a note, or editing a
//! note through a working draft. The draft is a copy of the viewed note's
//! mutable fields; draft edits never write through to the viewed or cached
//! note until the server confirms the update, so cancelling discards them
//! unconditionally.

use crate::models::{Note, NoteDraft};

/// What the detail pane is doing.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum EditorState {
    /// No note selected; the list placeholder renders.
    #[default]
    NoneSelected,
    /// A note is open read-only.
    Viewing(Note),
    /// A note is open with a working draft of its mutable fields.
    Editing { note: Note, draft: NoteDraft },
}

impl EditorState {
    /// Open a note read-only, from any state.
    pub fn open(&mut self, note: Note) {
        *self = EditorState::Viewing(note);
    }

    /// Start editing the viewed note; the draft is initialized from its
    /// mutable fields. No-op unless currently viewing.
    pub fn edit(&mut self) {
        *self = match std::mem::take(self) {
            EditorState::Viewing(note) => {
                let draft = NoteDraft::from_note(&note);
                EditorState::Editing { note, draft }
            }
            other => other,
        };
    }

    /// Abandon the draft and return to viewing the unmodified note. No-op
    /// unless currently editing.
    pub fn cancel(&mut self) {
        *self = match std::mem::take(self) {
            EditorState::Editing { note, .. } => EditorState::Viewing(note),
            other => other,
        };
    }

    /// A save was confirmed by the server: view its returned representation.
    pub fn saved(&mut self, updated: Note) {
        *self = EditorState::Viewing(updated);
    }

    /// Back to the list.
    pub fn close(&mut self) {
        *self = EditorState::NoneSelected;
    }

    /// The note being viewed or edited, if any.
    pub fn note(&self) -> Option<&Note> {
        match self {
            EditorState::NoneSelected => None,
            EditorState::Viewing(note) => Some(note),
            EditorState::Editing { note, .. } => Some(note),
        }
    }

    pub fn draft(&self) -> Option<&NoteDraft> {
        match self {
            EditorState::Editing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut NoteDraft> {
        match self {
            EditorState::Editing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditorState::Editing { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: i64, title: &str) -> Note {
        Note {
            id,
            title: title.to_string(),
            content: "body".to_string(),
            is_favorite: false,
            category_id: None,
            category: None,
            tags: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn select_edit_cancel_back_to_viewing() {
        let mut editor = EditorState::default();
        assert_eq!(editor, EditorState::NoneSelected);

        editor.open(note(1, "Original"));
        assert!(!editor.is_editing());

        editor.edit();
        assert!(editor.is_editing());
        assert_eq!(editor.draft().unwrap().title, "Original");

        editor.cancel();
        assert_eq!(editor, EditorState::Viewing(note(1, "Original")));
    }

    #[test]
    fn cancel_discards_draft_mutations() {
        let mut editor = EditorState::Viewing(note(1, "Original"));
        editor.edit();
        editor.draft_mut().unwrap().title = "Mutated".to_string();

        editor.cancel();
        // The viewed note is untouched by the abandoned draft.
        assert_eq!(editor.note().unwrap().title, "Original");
        assert!(editor.draft().is_none());
    }

    #[test]
    fn draft_edits_do_not_touch_the_viewed_note() {
        let mut editor = EditorState::Viewing(note(1, "Original"));
        editor.edit();
        editor.draft_mut().unwrap().title = "Work in progress".to_string();
        assert_eq!(editor.note().unwrap().title, "Original");
    }

    #[test]
    fn saved_replaces_the_viewed_note_with_the_server_copy() {
        let mut editor = EditorState::Viewing(note(1, "Original"));
        editor.edit();
        editor.draft_mut().unwrap().title = "Renamed".to_string();

        editor.saved(note(1, "Renamed"));
        assert_eq!(editor.note().unwrap().title, "Renamed");
        assert!(!editor.is_editing());
    }

    #[test]
    fn edit_outside_viewing_is_a_no_op() {
        let mut editor = EditorState::NoneSelected;
        editor.edit();
        assert_eq!(editor, EditorState::NoneSelected);
    }

    #[test]
    fn close_returns_to_none_selected_from_any_state() {
        let mut editor = EditorState::Viewing(note(1, "A"));
        editor.close();
        assert_eq!(editor, EditorState::NoneSelected);

        let mut editor = EditorState::Viewing(note(2, "B"));
        editor.edit();
        editor.close();
        assert_eq!(editor, EditorState::NoneSelected);
    }
}
