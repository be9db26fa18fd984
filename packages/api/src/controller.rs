//! # Note collection controller
//!
//! [`NoteCollection`] is the client-side cache and mutation coordinator for
//! notes, categories, tags and the dashboard summary. It is generic over
//! [`NotesApi`], so the browser wires it to the REST service while tests
//! drive it with an in-memory fake.
//!
//! ## Cache model
//!
//! One normalized map from note id to note. The "all notes" and "favorites"
//! views are computed on read, so a mutation reconciles exactly one place
//! and every view stays consistent without a full refetch. An unfiltered
//! list fetch is authoritative and replaces the map; a constrained fetch
//! (search, favorite, category, tag filters) merges into it, since its
//! result is only a subset of what the map may hold.
//!
//! ## Mutation protocol
//!
//! Create/update/delete/toggle-favorite validate locally where applicable,
//! issue the remote call, swap the affected cache entry with the server's
//! returned representation, and then refresh the dashboard summary. A failed
//! summary refresh is logged and does not fail the mutation; each fetch has
//! its own error slot.
//!
//! ## Superseded fetches
//!
//! The note-list and dashboard fetch paths carry a generation counter. A
//! resolved fetch whose generation is no longer current is discarded instead
//! of written, so a slow response from a previous tab cannot clobber a newer
//! one.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::{ApiError, ApiResult};
use crate::models::{
    Category, CategoryDraft, DashboardStats, Note, NoteDraft, NoteFilter, NoteList, NoteUpdate,
    Tag,
};
use crate::notes::NotesApi;

/// Client-side collection of notes, categories, tags and dashboard stats.
/// Cheap to clone; clones share the caches.
#[derive(Clone)]
pub struct NoteCollection<A: NotesApi> {
    api: A,
    notes: Arc<Mutex<BTreeMap<i64, Note>>>,
    categories: Arc<Mutex<Vec<Category>>>,
    tags: Arc<Mutex<Vec<Tag>>>,
    dashboard: Arc<Mutex<Option<DashboardStats>>>,
    notes_gen: Arc<AtomicU64>,
    dashboard_gen: Arc<AtomicU64>,
}

impl<A: NotesApi> NoteCollection<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            notes: Arc::new(Mutex::new(BTreeMap::new())),
            categories: Arc::new(Mutex::new(Vec::new())),
            tags: Arc::new(Mutex::new(Vec::new())),
            dashboard: Arc::new(Mutex::new(None)),
            notes_gen: Arc::new(AtomicU64::new(0)),
            dashboard_gen: Arc::new(AtomicU64::new(0)),
        }
    }

    // ---- views (computed on read) ----

    /// All cached notes, newest id first.
    pub fn notes(&self) -> Vec<Note> {
        self.notes.lock().unwrap().values().rev().cloned().collect()
    }

    /// Cached favorites, newest id first.
    pub fn favorites(&self) -> Vec<Note> {
        self.notes
            .lock()
            .unwrap()
            .values()
            .rev()
            .filter(|n| n.is_favorite)
            .cloned()
            .collect()
    }

    pub fn note(&self, id: i64) -> Option<Note> {
        self.notes.lock().unwrap().get(&id).cloned()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.categories.lock().unwrap().clone()
    }

    pub fn tags(&self) -> Vec<Tag> {
        self.tags.lock().unwrap().clone()
    }

    pub fn dashboard(&self) -> Option<DashboardStats> {
        self.dashboard.lock().unwrap().clone()
    }

    // ---- fetches ----

    /// Fetch notes matching `filter` into the cache and return the matching
    /// set. A stale resolution (superseded by a newer fetch) is discarded.
    pub async fn refresh_notes(&self, filter: &NoteFilter) -> ApiResult<Vec<Note>> {
        let generation = self.notes_gen.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.api.list_notes(filter).await;
        self.apply_note_list(generation, filter.is_constrained(), result)
    }

    fn apply_note_list(
        &self,
        generation: u64,
        merge: bool,
        result: ApiResult<NoteList>,
    ) -> ApiResult<Vec<Note>> {
        let list = result?;
        if self.notes_gen.load(Ordering::SeqCst) != generation {
            tracing::warn!(generation, "discarding superseded note list fetch");
            return Ok(self.notes());
        }
        let fetched: Vec<Note> = {
            let mut notes = self.notes.lock().unwrap();
            if !merge {
                notes.clear();
            }
            for note in &list.notes {
                notes.insert(note.id, note.clone());
            }
            list.notes
        };
        Ok(fetched)
    }

    /// Refresh the dashboard summary. Stale resolutions are discarded.
    pub async fn refresh_dashboard(&self) -> ApiResult<DashboardStats> {
        let generation = self.dashboard_gen.fetch_add(1, Ordering::SeqCst) + 1;
        let stats = self.api.dashboard().await?;
        if self.dashboard_gen.load(Ordering::SeqCst) == generation {
            *self.dashboard.lock().unwrap() = Some(stats.clone());
        } else {
            tracing::warn!(generation, "discarding superseded dashboard fetch");
        }
        Ok(stats)
    }

    pub async fn refresh_categories(&self) -> ApiResult<Vec<Category>> {
        let categories = self.api.list_categories().await?;
        *self.categories.lock().unwrap() = categories.clone();
        Ok(categories)
    }

    pub async fn refresh_tags(&self) -> ApiResult<Vec<Tag>> {
        let tags = self.api.list_tags().await?;
        *self.tags.lock().unwrap() = tags.clone();
        Ok(tags)
    }

    // ---- mutations ----

    /// Create a note. Empty or whitespace-only title/content is rejected
    /// locally without a network call.
    pub async fn create_note(&self, draft: &NoteDraft) -> ApiResult<Note> {
        validate_note_fields(&draft.title, &draft.content)?;
        let note = self.api.create_note(draft).await?;
        self.notes.lock().unwrap().insert(note.id, note.clone());
        self.refresh_dashboard_after_mutation().await;
        Ok(note)
    }

    /// Update a note; provided fields are validated the same way as create.
    /// The cached entry is swapped for the server's representation.
    pub async fn update_note(&self, id: i64, update: &NoteUpdate) -> ApiResult<Note> {
        if let Some(ref title) = update.title {
            if title.trim().is_empty() {
                return Err(ApiError::validation("Title is required"));
            }
        }
        if let Some(ref content) = update.content {
            if content.trim().is_empty() {
                return Err(ApiError::validation("Content is required"));
            }
        }
        let note = self.api.update_note(id, update).await?;
        self.notes.lock().unwrap().insert(note.id, note.clone());
        self.refresh_dashboard_after_mutation().await;
        Ok(note)
    }

    /// Delete a note and drop it from the cache. The caller is responsible
    /// for confirming the action with the user first.
    pub async fn delete_note(&self, id: i64) -> ApiResult<()> {
        self.api.delete_note(id).await?;
        self.notes.lock().unwrap().remove(&id);
        self.refresh_dashboard_after_mutation().await;
        Ok(())
    }

    /// Toggle a note's favorite flag. The whole cached note is swapped, so
    /// the favorites view gains or loses it atomically.
    pub async fn toggle_favorite(&self, id: i64) -> ApiResult<Note> {
        let note = self.api.toggle_favorite(id).await?;
        self.notes.lock().unwrap().insert(note.id, note.clone());
        self.refresh_dashboard_after_mutation().await;
        Ok(note)
    }

    pub async fn create_category(&self, draft: &CategoryDraft) -> ApiResult<Category> {
        if draft.name.trim().is_empty() {
            return Err(ApiError::validation("Category name is required"));
        }
        let category = self.api.create_category(draft).await?;
        self.categories.lock().unwrap().push(category.clone());
        self.refresh_dashboard_after_mutation().await;
        Ok(category)
    }

    pub async fn delete_category(&self, id: i64) -> ApiResult<()> {
        self.api.delete_category(id).await?;
        self.categories.lock().unwrap().retain(|c| c.id != id);
        self.refresh_dashboard_after_mutation().await;
        Ok(())
    }

    /// Create a tag, reusing an existing one when the name matches
    /// case-insensitively. The reuse check runs locally before any request,
    /// so rapid-fire duplicate input issues at most one remote create.
    pub async fn create_tag(&self, name: &str) -> ApiResult<Tag> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::validation("Tag name is required"));
        }
        let existing = self
            .tags
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .cloned();
        if let Some(tag) = existing {
            return Ok(tag);
        }
        let tag = self.api.create_tag(name).await?;
        self.tags.lock().unwrap().push(tag.clone());
        Ok(tag)
    }

    /// Summary counts derive from the full note set, so every mutation
    /// refreshes them regardless of the active view. A refresh failure is
    /// its own error slot and never fails the mutation that triggered it.
    async fn refresh_dashboard_after_mutation(&self) {
        if let Err(err) = self.refresh_dashboard().await {
            tracing::warn!("dashboard refresh after mutation failed: {err}");
        }
    }
}

fn validate_note_fields(title: &str, content: &str) -> ApiResult<()> {
    if title.trim().is_empty() {
        return Err(ApiError::validation("Title is required"));
    }
    if content.trim().is_empty() {
        return Err(ApiError::validation("Content is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteList;

    /// In-memory NotesApi backing the controller tests.
    #[derive(Clone, Default)]
    struct MemoryNotesApi {
        state: Arc<Mutex<MemoryState>>,
    }

    #[derive(Default)]
    struct MemoryState {
        notes: Vec<Note>,
        categories: Vec<Category>,
        tags: Vec<Tag>,
        next_id: i64,
        note_create_calls: usize,
        tag_create_calls: usize,
        fail_dashboard: bool,
    }

    impl MemoryNotesApi {
        fn new() -> Self {
            Self::default()
        }

        fn note_create_calls(&self) -> usize {
            self.state.lock().unwrap().note_create_calls
        }

        fn tag_create_calls(&self) -> usize {
            self.state.lock().unwrap().tag_create_calls
        }

        fn set_fail_dashboard(&self, fail: bool) {
            self.state.lock().unwrap().fail_dashboard = fail;
        }
    }

    impl NotesApi for MemoryNotesApi {
        async fn list_notes(&self, filter: &NoteFilter) -> ApiResult<NoteList> {
            let state = self.state.lock().unwrap();
            let notes: Vec<Note> = state
                .notes
                .iter()
                .filter(|n| match filter.is_favorite {
                    Some(fav) => n.is_favorite == fav,
                    None => true,
                })
                .filter(|n| match filter.search.as_deref() {
                    Some(q) if !q.trim().is_empty() => {
                        let q = q.to_ascii_lowercase();
                        n.title.to_ascii_lowercase().contains(&q)
                            || n.content.to_ascii_lowercase().contains(&q)
                    }
                    _ => true,
                })
                .cloned()
                .collect();
            let total = notes.len() as u32;
            Ok(NoteList {
                notes,
                total,
                limit: filter.limit.unwrap_or(20),
                offset: filter.offset.unwrap_or(0),
            })
        }

        async fn get_note(&self, id: i64) -> ApiResult<Note> {
            self.state
                .lock()
                .unwrap()
                .notes
                .iter()
                .find(|n| n.id == id)
                .cloned()
                .ok_or_else(|| ApiError::remote("Note not found"))
        }

        async fn create_note(&self, draft: &NoteDraft) -> ApiResult<Note> {
            let mut state = self.state.lock().unwrap();
            state.note_create_calls += 1;
            state.next_id += 1;
            let note = Note {
                id: state.next_id,
                title: draft.title.clone(),
                content: draft.content.clone(),
                is_favorite: draft.is_favorite,
                category_id: draft.category_id,
                category: None,
                tags: Vec::new(),
                created_at: None,
                updated_at: None,
            };
            state.notes.push(note.clone());
            Ok(note)
        }

        async fn update_note(&self, id: i64, update: &NoteUpdate) -> ApiResult<Note> {
            let mut state = self.state.lock().unwrap();
            let note = state
                .notes
                .iter_mut()
                .find(|n| n.id == id)
                .ok_or_else(|| ApiError::remote("Note not found"))?;
            if let Some(ref title) = update.title {
                note.title = title.clone();
            }
            if let Some(ref content) = update.content {
                note.content = content.clone();
            }
            if let Some(fav) = update.is_favorite {
                note.is_favorite = fav;
            }
            Ok(note.clone())
        }

        async fn delete_note(&self, id: i64) -> ApiResult<()> {
            let mut state = self.state.lock().unwrap();
            let before = state.notes.len();
            state.notes.retain(|n| n.id != id);
            if state.notes.len() == before {
                return Err(ApiError::remote("Note not found"));
            }
            Ok(())
        }

        async fn toggle_favorite(&self, id: i64) -> ApiResult<Note> {
            let mut state = self.state.lock().unwrap();
            let note = state
                .notes
                .iter_mut()
                .find(|n| n.id == id)
                .ok_or_else(|| ApiError::remote("Note not found"))?;
            note.is_favorite = !note.is_favorite;
            Ok(note.clone())
        }

        async fn dashboard(&self) -> ApiResult<DashboardStats> {
            let state = self.state.lock().unwrap();
            if state.fail_dashboard {
                return Err(ApiError::Network);
            }
            Ok(DashboardStats {
                total_notes: state.notes.len() as u32,
                favorite_notes: state.notes.iter().filter(|n| n.is_favorite).count() as u32,
                categories_count: state.categories.len() as u32,
                tags_count: state.tags.len() as u32,
                recent_notes: state.notes.iter().rev().take(5).cloned().collect(),
            })
        }

        async fn list_categories(&self) -> ApiResult<Vec<Category>> {
            Ok(self.state.lock().unwrap().categories.clone())
        }

        async fn create_category(&self, draft: &CategoryDraft) -> ApiResult<Category> {
            let mut state = self.state.lock().unwrap();
            state.next_id += 1;
            let category = Category {
                id: state.next_id,
                name: draft.name.clone(),
                description: draft.description.clone(),
                color: draft.color.clone(),
            };
            state.categories.push(category.clone());
            Ok(category)
        }

        async fn delete_category(&self, id: i64) -> ApiResult<()> {
            self.state.lock().unwrap().categories.retain(|c| c.id != id);
            Ok(())
        }

        async fn list_tags(&self) -> ApiResult<Vec<Tag>> {
            Ok(self.state.lock().unwrap().tags.clone())
        }

        async fn create_tag(&self, name: &str) -> ApiResult<Tag> {
            let mut state = self.state.lock().unwrap();
            state.tag_create_calls += 1;
            state.next_id += 1;
            let tag = Tag {
                id: state.next_id,
                name: name.to_string(),
            };
            state.tags.push(tag.clone());
            Ok(tag)
        }
    }

    fn draft(title: &str, content: &str) -> NoteDraft {
        NoteDraft {
            title: title.to_string(),
            content: content.to_string(),
            ..NoteDraft::default()
        }
    }

    #[tokio::test]
    async fn empty_title_or_content_issues_no_request() {
        let api = MemoryNotesApi::new();
        let collection = NoteCollection::new(api.clone());

        let err = collection.create_note(&draft("", "body")).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        let err = collection
            .create_note(&draft("title", "   "))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(api.note_create_calls(), 0);
        assert!(collection.notes().is_empty());
    }

    #[tokio::test]
    async fn toggle_favorite_moves_note_through_favorites_view() {
        let api = MemoryNotesApi::new();
        let collection = NoteCollection::new(api);
        let note = collection
            .create_note(&draft("Meeting Notes", "Q1 planning"))
            .await
            .unwrap();
        assert!(collection.favorites().is_empty());

        let toggled = collection.toggle_favorite(note.id).await.unwrap();
        assert!(toggled.is_favorite);
        let favorites = collection.favorites();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, note.id);
        // Present exactly once across views.
        assert_eq!(
            collection.notes().iter().filter(|n| n.id == note.id).count(),
            1
        );

        collection.toggle_favorite(note.id).await.unwrap();
        assert!(collection.favorites().is_empty());
        assert_eq!(collection.notes().len(), 1);
    }

    #[tokio::test]
    async fn delete_removes_note_everywhere_and_decrements_total() {
        let api = MemoryNotesApi::new();
        let collection = NoteCollection::new(api);
        let keep = collection.create_note(&draft("Keep", "stays")).await.unwrap();
        let gone = collection.create_note(&draft("Gone", "leaves")).await.unwrap();
        collection.toggle_favorite(gone.id).await.unwrap();

        let total_before = collection.dashboard().unwrap().total_notes;

        collection.delete_note(gone.id).await.unwrap();
        assert!(collection.note(gone.id).is_none());
        assert!(collection.notes().iter().all(|n| n.id != gone.id));
        assert!(collection.favorites().iter().all(|n| n.id != gone.id));
        assert_eq!(
            collection.dashboard().unwrap().total_notes,
            total_before - 1
        );
        assert!(collection.note(keep.id).is_some());
    }

    #[tokio::test]
    async fn duplicate_tag_names_reuse_the_existing_tag() {
        let api = MemoryNotesApi::new();
        let collection = NoteCollection::new(api.clone());

        let first = collection.create_tag("Work").await.unwrap();
        let second = collection.create_tag("work").await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(api.tag_create_calls(), 1);

        let third = collection.create_tag("  WORK ").await.unwrap();
        assert_eq!(third.id, first.id);
        assert_eq!(api.tag_create_calls(), 1);
    }

    #[tokio::test]
    async fn update_replaces_the_cached_note() {
        let api = MemoryNotesApi::new();
        let collection = NoteCollection::new(api);
        let note = collection
            .create_note(&draft("Draft title", "original"))
            .await
            .unwrap();

        let update = NoteUpdate {
            title: Some("Final title".to_string()),
            content: Some("revised".to_string()),
            ..NoteUpdate::default()
        };
        collection.update_note(note.id, &update).await.unwrap();

        let notes = collection.notes();
        let matching: Vec<&Note> = notes.iter().filter(|n| n.id == note.id).collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].title, "Final title");
        assert_eq!(matching[0].content, "revised");
    }

    #[tokio::test]
    async fn update_with_blank_field_is_rejected_locally() {
        let api = MemoryNotesApi::new();
        let collection = NoteCollection::new(api);
        let note = collection.create_note(&draft("Title", "body")).await.unwrap();

        let update = NoteUpdate {
            title: Some("  ".to_string()),
            ..NoteUpdate::default()
        };
        assert!(collection.update_note(note.id, &update).await.is_err());
        assert_eq!(collection.note(note.id).unwrap().title, "Title");
    }

    #[tokio::test]
    async fn superseded_note_fetch_is_discarded() {
        let api = MemoryNotesApi::new();
        let collection = NoteCollection::new(api);
        let current = collection.create_note(&draft("Current", "body")).await.unwrap();
        collection
            .refresh_notes(&NoteFilter::default())
            .await
            .unwrap();

        // A fetch that resolved after being superseded must not be written.
        let stale_generation = 0;
        let stale_list = NoteList {
            notes: vec![Note {
                id: 99,
                title: "Stale".to_string(),
                content: String::new(),
                is_favorite: false,
                category_id: None,
                category: None,
                tags: Vec::new(),
                created_at: None,
                updated_at: None,
            }],
            total: 1,
            limit: 20,
            offset: 0,
        };
        collection
            .apply_note_list(stale_generation, false, Ok(stale_list))
            .unwrap();

        assert!(collection.note(99).is_none());
        assert!(collection.note(current.id).is_some());
    }

    #[tokio::test]
    async fn constrained_fetch_merges_instead_of_replacing() {
        let api = MemoryNotesApi::new();
        let collection = NoteCollection::new(api);
        let plain = collection.create_note(&draft("Plain", "body")).await.unwrap();
        let starred = collection.create_note(&draft("Starred", "body")).await.unwrap();
        collection.toggle_favorite(starred.id).await.unwrap();
        collection
            .refresh_notes(&NoteFilter::default())
            .await
            .unwrap();

        let favorites = collection
            .refresh_notes(&NoteFilter::favorites())
            .await
            .unwrap();
        assert_eq!(favorites.len(), 1);
        // The favorites-only fetch must not evict the unfiltered cache.
        assert!(collection.note(plain.id).is_some());
        assert_eq!(collection.notes().len(), 2);
    }

    #[tokio::test]
    async fn search_fetch_returns_only_the_matching_set() {
        let api = MemoryNotesApi::new();
        let collection = NoteCollection::new(api);
        collection.create_note(&draft("Alpha", "body")).await.unwrap();
        collection.create_note(&draft("Beta", "body")).await.unwrap();
        collection
            .refresh_notes(&NoteFilter::default())
            .await
            .unwrap();

        let filter = NoteFilter {
            search: Some("Alpha".to_string()),
            ..NoteFilter::default()
        };
        let matches = collection.refresh_notes(&filter).await.unwrap();
        // The returned set is what a filtered list renders; the cache keeps
        // the superset for the other views.
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "Alpha");
        assert_eq!(collection.notes().len(), 2);
    }

    #[tokio::test]
    async fn failed_summary_refresh_does_not_fail_the_mutation() {
        let api = MemoryNotesApi::new();
        let collection = NoteCollection::new(api.clone());
        collection.create_note(&draft("First", "body")).await.unwrap();
        let stats_before = collection.dashboard().unwrap();

        api.set_fail_dashboard(true);
        let note = collection.create_note(&draft("Second", "body")).await.unwrap();
        assert!(collection.note(note.id).is_some());
        // The stale summary stays until a refresh succeeds.
        assert_eq!(collection.dashboard().unwrap(), stats_before);
    }

    #[tokio::test]
    async fn category_create_and_delete_mirror_the_server() {
        let api = MemoryNotesApi::new();
        let collection = NoteCollection::new(api);

        assert!(collection
            .create_category(&CategoryDraft {
                name: " ".to_string(),
                ..CategoryDraft::default()
            })
            .await
            .is_err());

        let category = collection
            .create_category(&CategoryDraft {
                name: "Work".to_string(),
                ..CategoryDraft::default()
            })
            .await
            .unwrap();
        assert_eq!(collection.categories().len(), 1);

        collection.delete_category(category.id).await.unwrap();
        assert!(collection.categories().is_empty());
    }
}
