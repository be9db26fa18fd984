//! # Notes service wrapper
//!
//! [`NotesApi`] is the seam between the collection controller and the
//! remote notes service. All controller logic is written against the trait,
//! so the same code runs against the REST implementation ([`NotesService`])
//! in the browser and against an in-memory fake in tests.
//!
//! Category and tag list responses are decoded defensively: a payload that
//! is not the expected envelope shape yields an empty list rather than an
//! error. This mirrors observed server behavior and is not a documented
//! contract.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::ApiResult;
use crate::http::HttpClient;
use crate::models::{
    Category, CategoryDraft, DashboardStats, Note, NoteDraft, NoteFilter, NoteList, NoteUpdate,
    Tag,
};

/// Async interface to the remote notes service.
pub trait NotesApi {
    fn list_notes(
        &self,
        filter: &NoteFilter,
    ) -> impl std::future::Future<Output = ApiResult<NoteList>>;
    fn get_note(&self, id: i64) -> impl std::future::Future<Output = ApiResult<Note>>;
    fn create_note(&self, draft: &NoteDraft) -> impl std::future::Future<Output = ApiResult<Note>>;
    fn update_note(
        &self,
        id: i64,
        update: &NoteUpdate,
    ) -> impl std::future::Future<Output = ApiResult<Note>>;
    fn delete_note(&self, id: i64) -> impl std::future::Future<Output = ApiResult<()>>;
    fn toggle_favorite(&self, id: i64) -> impl std::future::Future<Output = ApiResult<Note>>;
    fn dashboard(&self) -> impl std::future::Future<Output = ApiResult<DashboardStats>>;
    fn list_categories(&self) -> impl std::future::Future<Output = ApiResult<Vec<Category>>>;
    fn create_category(
        &self,
        draft: &CategoryDraft,
    ) -> impl std::future::Future<Output = ApiResult<Category>>;
    fn delete_category(&self, id: i64) -> impl std::future::Future<Output = ApiResult<()>>;
    fn list_tags(&self) -> impl std::future::Future<Output = ApiResult<Vec<Tag>>>;
    fn create_tag(&self, name: &str) -> impl std::future::Future<Output = ApiResult<Tag>>;
}

/// REST implementation of [`NotesApi`].
#[derive(Clone)]
pub struct NotesService {
    http: HttpClient,
    base_url: String,
}

impl NotesService {
    pub fn new(http: HttpClient, config: &ApiConfig) -> Self {
        Self {
            http,
            base_url: config.notes_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl NotesApi for NotesService {
    async fn list_notes(&self, filter: &NoteFilter) -> ApiResult<NoteList> {
        self.http
            .get_json(&self.url("/notes"), &filter.to_query(), "Failed to fetch notes")
            .await
    }

    async fn get_note(&self, id: i64) -> ApiResult<Note> {
        self.http
            .get_json(&self.url(&format!("/notes/{id}")), &[], "Failed to fetch note")
            .await
    }

    async fn create_note(&self, draft: &NoteDraft) -> ApiResult<Note> {
        self.http
            .post_json(&self.url("/notes"), draft, "Failed to create note")
            .await
    }

    async fn update_note(&self, id: i64, update: &NoteUpdate) -> ApiResult<Note> {
        self.http
            .put_json(
                &self.url(&format!("/notes/{id}")),
                update,
                "Failed to update note",
            )
            .await
    }

    async fn delete_note(&self, id: i64) -> ApiResult<()> {
        self.http
            .delete(&self.url(&format!("/notes/{id}")), "Failed to delete note")
            .await
    }

    async fn toggle_favorite(&self, id: i64) -> ApiResult<Note> {
        self.http
            .post_empty(
                &self.url(&format!("/notes/{id}/favorite")),
                "Failed to toggle favorite",
            )
            .await
    }

    async fn dashboard(&self) -> ApiResult<DashboardStats> {
        self.http
            .get_json(
                &self.url("/dashboard"),
                &[],
                "Failed to fetch dashboard stats",
            )
            .await
    }

    async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        let value = self
            .http
            .get_value(&self.url("/categories"), "Failed to fetch categories")
            .await?;
        Ok(decode_list(&value, "categories"))
    }

    async fn create_category(&self, draft: &CategoryDraft) -> ApiResult<Category> {
        self.http
            .post_json(&self.url("/categories"), draft, "Failed to create category")
            .await
    }

    async fn delete_category(&self, id: i64) -> ApiResult<()> {
        self.http
            .delete(
                &self.url(&format!("/categories/{id}")),
                "Failed to delete category",
            )
            .await
    }

    async fn list_tags(&self) -> ApiResult<Vec<Tag>> {
        let value = self
            .http
            .get_value(&self.url("/tags"), "Failed to fetch tags")
            .await?;
        Ok(decode_list(&value, "tags"))
    }

    async fn create_tag(&self, name: &str) -> ApiResult<Tag> {
        let payload = serde_json::json!({ "name": name });
        self.http
            .post_json(&self.url("/tags"), &payload, "Failed to create tag")
            .await
    }
}

/// Pull `key` out of a list envelope, tolerating unexpected shapes: a
/// missing or non-array field decodes to an empty list, and malformed items
/// are skipped.
fn decode_list<T: DeserializeOwned>(value: &Value, key: &str) -> Vec<T> {
    match value.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect(),
        _ => {
            tracing::warn!("unexpected {key} payload shape, treating as empty");
            Vec::new()
        }
    }
}
