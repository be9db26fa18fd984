//! Dashboard view: sidebar tabs over the shared note collection.
//!
//! All note data lives in the [`NoteCollection`] caches inside the shared
//! clients; this view reads them through computed views and bumps a local
//! version signal after every refresh or mutation so the render re-reads
//! them. The detail pane (view/edit) lives in the All Notes tab and is
//! driven by the editor state machine.

use dioxus::prelude::*;

use api::{CategoryDraft, EditorState, Note, NoteDraft, NoteFilter};
use ui::{
    confirm_action, use_auth, use_clients, Clients, DashboardSidebar, DashboardTab, NoteForm,
    NoteList, NoteView, RequireAuth,
};

use crate::Route;

/// Dashboard page component. Content is gated behind authentication.
#[component]
pub fn Dashboard() -> Element {
    rsx! {
        RequireAuth {
            DashboardContent {}
        }
    }
}

/// Refetch the note list with the active search/category filter. While a
/// constraining filter is active the list view renders only the ids the
/// fetch returned; the cache itself keeps merging and stays a superset.
fn refresh_filtered(
    clients: &Clients,
    search: String,
    category_id: Option<i64>,
    mut matching_ids: Signal<Option<Vec<i64>>>,
    mut version: Signal<u32>,
    mut load_error: Signal<Option<String>>,
) {
    let clients = clients.clone();
    spawn(async move {
        let filter = NoteFilter {
            search: Some(search),
            category_id,
            ..NoteFilter::default()
        };
        let constrained = filter.is_constrained();
        match clients.notes.refresh_notes(&filter).await {
            Ok(matches) => {
                load_error.set(None);
                matching_ids.set(constrained.then(|| matches.iter().map(|n| n.id).collect()));
            }
            Err(e) => load_error.set(Some(e.to_string())),
        }
        *version.write() += 1;
    });
}

/// The notes the list should show: the whole cache when no filter is
/// active, otherwise only the ids the filtered fetch matched. Reading
/// through the cache keeps deletions and favorite toggles visible without
/// another fetch.
fn visible_notes(all: &[Note], matching: Option<&[i64]>) -> Vec<Note> {
    match matching {
        Some(ids) => all
            .iter()
            .filter(|note| ids.contains(&note.id))
            .cloned()
            .collect(),
        None => all.to_vec(),
    }
}

#[component]
fn DashboardContent() -> Element {
    let clients = use_clients();
    let auth = use_auth();
    let nav = use_navigator();

    let mut active_tab = use_signal(|| DashboardTab::Overview);
    // Bumped after every cache change so the render re-reads the collection.
    let mut version = use_signal(|| 0u32);
    let mut editor = use_signal(EditorState::default);
    let mut create_draft = use_signal(NoteDraft::default);
    let mut new_category = use_signal(CategoryDraft::default);
    let mut search = use_signal(String::new);
    let mut category_filter = use_signal(|| Option::<i64>::None);
    // Ids matched by the active filter; `None` when no filter constrains.
    let matching_ids = use_signal(|| Option::<Vec<i64>>::None);
    let mut saving = use_signal(|| false);
    let mut load_error = use_signal(|| Option::<String>::None);
    let mut create_error = use_signal(|| Option::<String>::None);
    let mut edit_error = use_signal(|| Option::<String>::None);
    let mut category_error = use_signal(|| Option::<String>::None);

    // Initial load of every cache.
    let _loader = use_resource({
        let clients = clients.clone();
        move || {
            let clients = clients.clone();
            async move {
                if let Err(e) = clients.notes.refresh_notes(&NoteFilter::default()).await {
                    load_error.set(Some(e.to_string()));
                }
                if let Err(e) = clients.notes.refresh_categories().await {
                    tracing::warn!("category load failed: {e}");
                }
                if let Err(e) = clients.notes.refresh_tags().await {
                    tracing::warn!("tag load failed: {e}");
                }
                if let Err(e) = clients.notes.refresh_dashboard().await {
                    tracing::warn!("dashboard load failed: {e}");
                }
                *version.write() += 1;
            }
        }
    });

    // ---- shared handlers ----

    let open_note = move |note| {
        editor.write().open(note);
        edit_error.set(None);
    };

    let toggle_favorite = {
        let clients = clients.clone();
        move |id: i64| {
            let clients = clients.clone();
            spawn(async move {
                match clients.notes.toggle_favorite(id).await {
                    Ok(updated) => {
                        let viewing = matches!(
                            &*editor.read(),
                            EditorState::Viewing(n) if n.id == updated.id
                        );
                        if viewing {
                            editor.write().open(updated);
                        }
                        *version.write() += 1;
                    }
                    Err(e) => load_error.set(Some(e.to_string())),
                }
            });
        }
    };

    let delete_note = {
        let clients = clients.clone();
        move |id: i64| {
            if !confirm_action("Delete this note? This cannot be undone.") {
                return;
            }
            let clients = clients.clone();
            spawn(async move {
                match clients.notes.delete_note(id).await {
                    Ok(()) => {
                        let open = editor.read().note().map(|n| n.id) == Some(id);
                        if open {
                            editor.write().close();
                        }
                        *version.write() += 1;
                    }
                    Err(e) => load_error.set(Some(e.to_string())),
                }
            });
        }
    };

    // ---- create tab ----

    let submit_create = {
        let clients = clients.clone();
        move |_| {
            let clients = clients.clone();
            spawn(async move {
                create_error.set(None);
                saving.set(true);
                match clients.notes.create_note(&create_draft()).await {
                    Ok(note) => {
                        create_draft.set(NoteDraft::default());
                        editor.write().open(note);
                        active_tab.set(DashboardTab::Notes);
                        *version.write() += 1;
                    }
                    Err(e) => create_error.set(Some(e.to_string())),
                }
                saving.set(false);
            });
        }
    };

    let add_tag_create = {
        let clients = clients.clone();
        move |name: String| {
            let clients = clients.clone();
            spawn(async move {
                match clients.notes.create_tag(&name).await {
                    Ok(tag) => {
                        let mut draft = create_draft();
                        if !draft.tag_ids.contains(&tag.id) {
                            draft.tag_ids.push(tag.id);
                            create_draft.set(draft);
                        }
                        *version.write() += 1;
                    }
                    Err(e) => create_error.set(Some(e.to_string())),
                }
            });
        }
    };

    // ---- edit flow (All Notes tab) ----

    let change_edit_draft = move |updated: NoteDraft| {
        if let Some(draft) = editor.write().draft_mut() {
            *draft = updated;
        }
    };

    let submit_edit = {
        let clients = clients.clone();
        move |_| {
            let target = {
                let state = editor.read();
                state.note().map(|n| n.id).zip(state.draft().cloned())
            };
            let Some((id, draft)) = target else {
                return;
            };
            let clients = clients.clone();
            spawn(async move {
                edit_error.set(None);
                saving.set(true);
                match clients.notes.update_note(id, &draft.into_update()).await {
                    Ok(updated) => {
                        editor.write().saved(updated);
                        *version.write() += 1;
                    }
                    Err(e) => edit_error.set(Some(e.to_string())),
                }
                saving.set(false);
            });
        }
    };

    let add_tag_edit = {
        let clients = clients.clone();
        move |name: String| {
            let clients = clients.clone();
            spawn(async move {
                match clients.notes.create_tag(&name).await {
                    Ok(tag) => {
                        if let Some(draft) = editor.write().draft_mut() {
                            if !draft.tag_ids.contains(&tag.id) {
                                draft.tag_ids.push(tag.id);
                            }
                        }
                        *version.write() += 1;
                    }
                    Err(e) => edit_error.set(Some(e.to_string())),
                }
            });
        }
    };

    // ---- categories tab ----

    let submit_category = {
        let clients = clients.clone();
        move |_| {
            let clients = clients.clone();
            spawn(async move {
                category_error.set(None);
                match clients.notes.create_category(&new_category()).await {
                    Ok(_) => {
                        new_category.set(CategoryDraft::default());
                        *version.write() += 1;
                    }
                    Err(e) => category_error.set(Some(e.to_string())),
                }
            });
        }
    };

    let delete_category = {
        let clients = clients.clone();
        move |id: i64| {
            if !confirm_action("Delete this category? Its notes are kept.") {
                return;
            }
            let clients = clients.clone();
            spawn(async move {
                match clients.notes.delete_category(id).await {
                    Ok(()) => *version.write() += 1,
                    Err(e) => category_error.set(Some(e.to_string())),
                }
            });
        }
    };

    // Re-read the caches whenever the version bumps.
    let _ = version();
    let active_ids = matching_ids();
    let notes = visible_notes(&clients.notes.notes(), active_ids.as_deref());
    let favorites = clients.notes.favorites();
    let categories = clients.notes.categories();
    let tags = clients.notes.tags();
    let stats = clients.notes.dashboard();
    let selected_category = category_filter()
        .map(|id| id.to_string())
        .unwrap_or_default();

    rsx! {
        div {
            class: "dashboard-layout",

            DashboardSidebar {
                user: auth().user,
                active_tab: active_tab(),
                on_select: move |tab| {
                    active_tab.set(tab);
                    editor.write().close();
                },
                on_profile: move |_| {
                    nav.push(Route::Profile {});
                },
            }

            main {
                class: "dashboard-main",

                {match active_tab() {
                    DashboardTab::Overview => rsx! {
                        div {
                            class: "overview-pane",
                            h1 { "Overview" }
                            if let Some(stats) = stats.clone() {
                                div {
                                    class: "stats-grid",
                                    StatCard { icon: "📝", label: "Total Notes", value: stats.total_notes }
                                    StatCard { icon: "⭐", label: "Favorites", value: stats.favorite_notes }
                                    StatCard { icon: "📁", label: "Categories", value: stats.categories_count }
                                    StatCard { icon: "🏷", label: "Tags", value: stats.tags_count }
                                }
                                h2 { "Recent Notes" }
                                NoteList {
                                    notes: stats.recent_notes.clone(),
                                    empty_message: "Nothing here yet. Create your first note!".to_string(),
                                    on_select: move |note| {
                                        editor.write().open(note);
                                        active_tab.set(DashboardTab::Notes);
                                    },
                                    on_toggle_favorite: toggle_favorite.clone(),
                                    on_delete: delete_note.clone(),
                                }
                            } else {
                                div { class: "loading" }
                            }
                        }
                    },

                    DashboardTab::Notes => rsx! {
                        div {
                            class: "notes-pane",
                            {match editor() {
                                EditorState::NoneSelected => rsx! {
                                    div {
                                        class: "notes-toolbar",
                                        input {
                                            class: "search-input",
                                            r#type: "text",
                                            placeholder: "Search notes...",
                                            value: search(),
                                            oninput: {
                                                let clients = clients.clone();
                                                move |evt: FormEvent| {
                                                    search.set(evt.value());
                                                    refresh_filtered(
                                                        &clients,
                                                        search(),
                                                        category_filter(),
                                                        matching_ids,
                                                        version,
                                                        load_error,
                                                    );
                                                }
                                            },
                                        }
                                        select {
                                            class: "category-select",
                                            value: "{selected_category}",
                                            onchange: {
                                                let clients = clients.clone();
                                                move |evt: FormEvent| {
                                                    category_filter.set(evt.value().parse::<i64>().ok());
                                                    refresh_filtered(
                                                        &clients,
                                                        search(),
                                                        category_filter(),
                                                        matching_ids,
                                                        version,
                                                        load_error,
                                                    );
                                                }
                                            },
                                            option { value: "", "All categories" }
                                            for category in &categories {
                                                option {
                                                    key: "{category.id}",
                                                    value: "{category.id}",
                                                    "{category.name}"
                                                }
                                            }
                                        }
                                    }
                                    if let Some(err) = load_error() {
                                        div { class: "error-message", "{err}" }
                                    }
                                    NoteList {
                                        notes: notes.clone(),
                                        on_select: open_note,
                                        on_toggle_favorite: toggle_favorite.clone(),
                                        on_delete: delete_note.clone(),
                                    }
                                },
                                EditorState::Viewing(note) => rsx! {
                                    NoteView {
                                        note: note.clone(),
                                        on_edit: move |_| editor.write().edit(),
                                        on_back: move |_| editor.write().close(),
                                        on_toggle_favorite: toggle_favorite.clone(),
                                        on_delete: delete_note.clone(),
                                    }
                                },
                                EditorState::Editing { draft, .. } => rsx! {
                                    NoteForm {
                                        draft: draft.clone(),
                                        categories: categories.clone(),
                                        tags: tags.clone(),
                                        error: edit_error(),
                                        busy: saving(),
                                        submit_label: "Save Changes".to_string(),
                                        on_change: change_edit_draft,
                                        on_add_tag: add_tag_edit.clone(),
                                        on_submit: submit_edit.clone(),
                                        on_cancel: move |_| {
                                            editor.write().cancel();
                                            edit_error.set(None);
                                        },
                                    }
                                },
                            }}
                        }
                    },

                    DashboardTab::Create => rsx! {
                        div {
                            class: "create-pane",
                            h1 { "Create Note" }
                            NoteForm {
                                draft: create_draft(),
                                categories: categories.clone(),
                                tags: tags.clone(),
                                error: create_error(),
                                busy: saving(),
                                submit_label: "Create Note".to_string(),
                                on_change: move |draft| create_draft.set(draft),
                                on_add_tag: add_tag_create.clone(),
                                on_submit: submit_create.clone(),
                            }
                        }
                    },

                    DashboardTab::Categories => rsx! {
                        div {
                            class: "categories-pane",
                            h1 { "Categories" }

                            if let Some(err) = category_error() {
                                div { class: "error-message", "{err}" }
                            }

                            div {
                                class: "category-form",
                                input {
                                    r#type: "text",
                                    placeholder: "Category name",
                                    value: new_category().name,
                                    oninput: move |evt: FormEvent| {
                                        let mut draft = new_category();
                                        draft.name = evt.value();
                                        new_category.set(draft);
                                    },
                                }
                                input {
                                    r#type: "text",
                                    placeholder: "Description (optional)",
                                    value: new_category().description.unwrap_or_default(),
                                    oninput: move |evt: FormEvent| {
                                        let mut draft = new_category();
                                        let value = evt.value();
                                        draft.description =
                                            if value.trim().is_empty() { None } else { Some(value) };
                                        new_category.set(draft);
                                    },
                                }
                                input {
                                    r#type: "color",
                                    value: new_category().color,
                                    oninput: move |evt: FormEvent| {
                                        let mut draft = new_category();
                                        draft.color = evt.value();
                                        new_category.set(draft);
                                    },
                                }
                                button {
                                    class: "btn-primary",
                                    onclick: submit_category.clone(),
                                    "Add Category"
                                }
                            }

                            div {
                                class: "category-list",
                                if categories.is_empty() {
                                    p { class: "notes-empty", "No categories yet." }
                                }
                                for category in categories.clone() {
                                    div {
                                        key: "{category.id}",
                                        class: "category-row",
                                        span {
                                            class: "category-swatch",
                                            style: "background: {category.color};",
                                        }
                                        div {
                                            class: "category-info",
                                            span { class: "category-name", "{category.name}" }
                                            if let Some(ref desc) = category.description {
                                                span { class: "category-desc", "{desc}" }
                                            }
                                        }
                                        button {
                                            class: "delete-btn",
                                            onclick: {
                                                let mut delete = delete_category.clone();
                                                let id = category.id;
                                                move |_| delete(id)
                                            },
                                            "🗑"
                                        }
                                    }
                                }
                            }
                        }
                    },

                    DashboardTab::Favorites => rsx! {
                        div {
                            class: "favorites-pane",
                            h1 { "Favorites" }
                            NoteList {
                                notes: favorites.clone(),
                                empty_message: "No favorite notes yet.".to_string(),
                                on_select: move |note| {
                                    editor.write().open(note);
                                    active_tab.set(DashboardTab::Notes);
                                },
                                on_toggle_favorite: toggle_favorite.clone(),
                                on_delete: delete_note.clone(),
                            }
                        }
                    },
                }}
            }
        }
    }
}

#[component]
fn StatCard(icon: &'static str, label: &'static str, value: u32) -> Element {
    rsx! {
        div {
            class: "stat-card",
            span { class: "stat-icon", "{icon}" }
            div {
                class: "stat-body",
                span { class: "stat-value", "{value}" }
                span { class: "stat-label", "{label}" }
            }
        }
    }
}
