//! Note list, read-only detail pane and the create/edit form.
//!
//! The form is a controlled component: the owning view holds the draft
//! (inside the editor state machine for edits) and receives every field
//! change through `on_change`, so unsaved edits live only in the draft.

use dioxus::prelude::*;

use api::{Category, Note, NoteDraft, Tag};

fn content_preview(content: &str) -> String {
    const MAX: usize = 120;
    if content.chars().count() <= MAX {
        content.to_string()
    } else {
        let cut: String = content.chars().take(MAX).collect();
        format!("{cut}...")
    }
}

/// Grid of note cards with favorite/delete shortcuts.
#[component]
pub fn NoteList(
    notes: Vec<Note>,
    on_select: EventHandler<Note>,
    on_toggle_favorite: EventHandler<i64>,
    on_delete: EventHandler<i64>,
    #[props(default = "No notes yet.".to_string())] empty_message: String,
) -> Element {
    if notes.is_empty() {
        return rsx! {
            div {
                class: "notes-empty",
                p { "{empty_message}" }
            }
        };
    }

    rsx! {
        div {
            class: "notes-grid",
            for note in notes {
                NoteCard {
                    key: "{note.id}",
                    note: note.clone(),
                    on_select,
                    on_toggle_favorite,
                    on_delete,
                }
            }
        }
    }
}

#[component]
fn NoteCard(
    note: Note,
    on_select: EventHandler<Note>,
    on_toggle_favorite: EventHandler<i64>,
    on_delete: EventHandler<i64>,
) -> Element {
    let id = note.id;
    let preview = content_preview(&note.content);
    let selected = note.clone();

    rsx! {
        div {
            class: "note-card",
            onclick: move |_| on_select.call(selected.clone()),

            div {
                class: "note-card-header",
                h3 { class: "note-title", "{note.title}" }
                button {
                    class: if note.is_favorite { "fav-btn active" } else { "fav-btn" },
                    title: "Toggle favorite",
                    onclick: move |evt: MouseEvent| {
                        evt.stop_propagation();
                        on_toggle_favorite.call(id);
                    },
                    if note.is_favorite { "⭐" } else { "☆" }
                }
            }

            p { class: "note-preview", "{preview}" }

            div {
                class: "note-tags",
                if let Some(ref category) = note.category {
                    span {
                        class: "tag category-tag",
                        style: "background: {category.color};",
                        "{category.name}"
                    }
                }
                for tag in &note.tags {
                    span { key: "{tag.id}", class: "tag", "{tag.name}" }
                }
            }

            div {
                class: "note-card-footer",
                if let Some(ref updated) = note.updated_at {
                    span { class: "note-meta", "Updated {updated}" }
                } else if let Some(ref created) = note.created_at {
                    span { class: "note-meta", "Created {created}" }
                }
                button {
                    class: "delete-btn",
                    title: "Delete note",
                    onclick: move |evt: MouseEvent| {
                        evt.stop_propagation();
                        on_delete.call(id);
                    },
                    "🗑"
                }
            }
        }
    }
}

/// Read-only view of a selected note.
#[component]
pub fn NoteView(
    note: Note,
    on_edit: EventHandler<()>,
    on_back: EventHandler<()>,
    on_toggle_favorite: EventHandler<i64>,
    on_delete: EventHandler<i64>,
) -> Element {
    let id = note.id;

    rsx! {
        div {
            class: "note-view",

            div {
                class: "note-view-toolbar",
                button {
                    class: "btn-secondary",
                    onclick: move |_| on_back.call(()),
                    "← Back"
                }
                div {
                    class: "note-view-actions",
                    button {
                        class: if note.is_favorite { "fav-btn active" } else { "fav-btn" },
                        onclick: move |_| on_toggle_favorite.call(id),
                        if note.is_favorite { "⭐ Favorited" } else { "☆ Favorite" }
                    }
                    button {
                        class: "btn-primary",
                        onclick: move |_| on_edit.call(()),
                        "Edit"
                    }
                    button {
                        class: "btn-danger",
                        onclick: move |_| on_delete.call(id),
                        "Delete"
                    }
                }
            }

            h1 { class: "note-view-title", "{note.title}" }

            div {
                class: "note-tags",
                if let Some(ref category) = note.category {
                    span {
                        class: "tag category-tag",
                        style: "background: {category.color};",
                        "{category.name}"
                    }
                }
                for tag in &note.tags {
                    span { key: "{tag.id}", class: "tag", "{tag.name}" }
                }
            }

            p { class: "note-view-content", "{note.content}" }
        }
    }
}

/// Create/edit form over a [`NoteDraft`]. Controlled: every field change is
/// reported through `on_change`; submit/cancel decisions stay with the
/// owning view.
#[component]
pub fn NoteForm(
    draft: NoteDraft,
    categories: Vec<Category>,
    tags: Vec<Tag>,
    error: Option<String>,
    #[props(default = false)] busy: bool,
    #[props(default = "Save Note".to_string())] submit_label: String,
    on_change: EventHandler<NoteDraft>,
    on_add_tag: EventHandler<String>,
    on_submit: EventHandler<()>,
    on_cancel: Option<EventHandler<()>>,
) -> Element {
    let mut new_tag = use_signal(String::new);

    let title_draft = draft.clone();
    let content_draft = draft.clone();
    let category_draft = draft.clone();
    let selected_category = draft
        .category_id
        .map(|id| id.to_string())
        .unwrap_or_default();

    rsx! {
        div {
            class: "create-note-form",

            if let Some(ref err) = error {
                div { class: "error-message", "{err}" }
            }

            input {
                class: "note-title-input",
                r#type: "text",
                placeholder: "Note title...",
                value: "{draft.title}",
                oninput: move |evt: FormEvent| {
                    let mut draft = title_draft.clone();
                    draft.title = evt.value();
                    on_change.call(draft);
                },
            }

            textarea {
                class: "note-content-input",
                placeholder: "Start writing your note...",
                rows: 12,
                value: "{draft.content}",
                oninput: move |evt: FormEvent| {
                    let mut draft = content_draft.clone();
                    draft.content = evt.value();
                    on_change.call(draft);
                },
            }

            div {
                class: "form-field",
                label { "Category" }
                select {
                    value: "{selected_category}",
                    onchange: move |evt| {
                        let mut draft = category_draft.clone();
                        draft.category_id = evt.value().parse::<i64>().ok();
                        on_change.call(draft);
                    },
                    option { value: "", "No category" }
                    for category in &categories {
                        option {
                            key: "{category.id}",
                            value: "{category.id}",
                            "{category.name}"
                        }
                    }
                }
            }

            div {
                class: "form-field",
                label { "Tags" }
                div {
                    class: "tag-picker",
                    for tag in &tags {
                        {
                            let tag_draft = draft.clone();
                            let tag_id = tag.id;
                            rsx! {
                                label {
                                    key: "{tag.id}",
                                    class: "tag-option",
                                    input {
                                        r#type: "checkbox",
                                        checked: draft.tag_ids.contains(&tag_id),
                                        onchange: move |_| {
                                            let mut draft = tag_draft.clone();
                                            if draft.tag_ids.contains(&tag_id) {
                                                draft.tag_ids.retain(|id| *id != tag_id);
                                            } else {
                                                draft.tag_ids.push(tag_id);
                                            }
                                            on_change.call(draft);
                                        },
                                    }
                                    "{tag.name}"
                                }
                            }
                        }
                    }
                }
                div {
                    class: "tag-add",
                    input {
                        r#type: "text",
                        placeholder: "New tag...",
                        value: new_tag(),
                        oninput: move |evt: FormEvent| new_tag.set(evt.value()),
                    }
                    button {
                        class: "btn-secondary",
                        onclick: move |_| {
                            let name = new_tag().trim().to_string();
                            if !name.is_empty() {
                                on_add_tag.call(name);
                                new_tag.set(String::new());
                            }
                        },
                        "Add Tag"
                    }
                }
            }

            div {
                class: "form-actions",
                button {
                    class: "btn-primary",
                    disabled: busy,
                    onclick: move |_| on_submit.call(()),
                    if busy { "Saving..." } else { "{submit_label}" }
                }
                if let Some(cancel) = on_cancel {
                    button {
                        class: "btn-secondary",
                        onclick: move |_| cancel.call(()),
                        "Cancel"
                    }
                }
            }
        }
    }
}
