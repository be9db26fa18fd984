//! # Domain models for the notes platform
//!
//! Defines the data structures exchanged with the auth and notes services.
//! These types are `Serialize + Deserialize` so they can cross the REST
//! boundary as JSON.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`UserProfile`] | The authenticated account: name, email, phone, optional embedded profile image (data URL). Owned by the session. |
//! | [`Note`] | A note with title, content, favorite flag, optional embedded [`Category`] and a list of [`Tag`]s. |
//! | [`Category`] | A named grouping with an optional description and a `#rrggbb` color. |
//! | [`Tag`] | A free-form label; created implicitly during note composition. |
//! | [`DashboardStats`] | Server-computed summary counts plus the most recent notes. |
//! | [`NoteList`] / [`CategoryList`] / [`TagList`] | List-endpoint envelopes carrying the items and totals. |
//!
//! ## Request payloads
//!
//! [`NoteDraft`] doubles as the note-create body and the editor's working
//! copy. [`NoteUpdate`] carries only the fields to change (`None` = leave
//! unchanged). [`NoteFilter`] builds the query string for the list endpoint.

use serde::{Deserialize, Serialize};

/// The authenticated user's profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// Embedded image as a data URL, if the user uploaded one.
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl UserProfile {
    /// "JD" for Jane Doe; used for the avatar placeholder.
    pub fn initials(&self) -> String {
        let mut out = String::new();
        if let Some(c) = self.first_name.chars().next() {
            out.extend(c.to_uppercase());
        }
        if let Some(c) = self.last_name.chars().next() {
            out.extend(c.to_uppercase());
        }
        out
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A note as returned by the notes service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub category_id: Option<i64>,
    /// Embedded category record, when the note has one.
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A note category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_category_color")]
    pub color: String,
}

/// The color the server assigns when none is given.
pub fn default_category_color() -> String {
    "#667eea".to_string()
}

/// A note tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// Server-computed dashboard summary. Refetched after every note mutation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_notes: u32,
    pub favorite_notes: u32,
    pub categories_count: u32,
    pub tags_count: u32,
    #[serde(default)]
    pub recent_notes: Vec<Note>,
}

/// Envelope returned by `GET /notes`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteList {
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

/// Envelope returned by `GET /categories`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryList {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub total: u32,
}

/// Envelope returned by `GET /tags`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TagList {
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub total: u32,
}

/// Mutable note fields: the note-create body and the editor's working copy.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub is_favorite: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    pub tag_ids: Vec<i64>,
}

impl NoteDraft {
    /// Initialize a draft from an existing note's mutable fields.
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            is_favorite: note.is_favorite,
            category_id: note.category_id.or(note.category.as_ref().map(|c| c.id)),
            tag_ids: note.tags.iter().map(|t| t.id).collect(),
        }
    }

    /// Convert into an update payload that replaces every mutable field.
    pub fn into_update(self) -> NoteUpdate {
        NoteUpdate {
            title: Some(self.title),
            content: Some(self.content),
            is_favorite: Some(self.is_favorite),
            category_id: self.category_id,
            tag_ids: Some(self.tag_ids),
        }
    }
}

/// Partial note update; `None` fields are left unchanged by the server.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NoteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<i64>>,
}

/// Query parameters accepted by the note list endpoint.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoteFilter {
    pub search: Option<String>,
    pub is_favorite: Option<bool>,
    pub category_id: Option<i64>,
    pub tag_ids: Vec<i64>,
    /// Pagination window accepted by the endpoint. The dashboard fetches
    /// the list unpaginated; these exist for programmatic callers.
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl NoteFilter {
    /// Filter for the favorites view.
    pub fn favorites() -> Self {
        Self {
            is_favorite: Some(true),
            ..Self::default()
        }
    }

    /// True when the filter narrows the result set (ignoring pagination).
    pub fn is_constrained(&self) -> bool {
        self.search.as_deref().is_some_and(|s| !s.trim().is_empty())
            || self.is_favorite.is_some()
            || self.category_id.is_some()
            || !self.tag_ids.is_empty()
    }

    /// Build `key=value` pairs for the query string. `tag_ids` repeats.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(ref search) = self.search {
            if !search.trim().is_empty() {
                pairs.push(("search", search.clone()));
            }
        }
        if let Some(fav) = self.is_favorite {
            pairs.push(("is_favorite", fav.to_string()));
        }
        if let Some(id) = self.category_id {
            pairs.push(("category_id", id.to_string()));
        }
        for id in &self.tag_ids {
            pairs.push(("tag_ids", id.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        pairs
    }
}

/// Category create payload.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: String,
}

impl Default for CategoryDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            color: default_category_color(),
        }
    }
}

/// Registration payload for `POST /auth/register`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

/// Credentials for `POST /auth/login`.
#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response. Only the token is used by this client.
#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Profile update payload for `PUT /auth/me`; `None` fields are unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_query_repeats_tag_ids() {
        let filter = NoteFilter {
            search: Some("plan".to_string()),
            is_favorite: Some(true),
            tag_ids: vec![3, 7],
            limit: Some(20),
            ..NoteFilter::default()
        };
        let pairs = filter.to_query();
        assert_eq!(
            pairs,
            vec![
                ("search", "plan".to_string()),
                ("is_favorite", "true".to_string()),
                ("tag_ids", "3".to_string()),
                ("tag_ids", "7".to_string()),
                ("limit", "20".to_string()),
            ]
        );
    }

    #[test]
    fn blank_search_is_not_a_constraint() {
        let filter = NoteFilter {
            search: Some("   ".to_string()),
            ..NoteFilter::default()
        };
        assert!(!filter.is_constrained());
        assert!(filter.to_query().is_empty());
    }

    #[test]
    fn draft_from_note_copies_mutable_fields() {
        let note = Note {
            id: 9,
            title: "Groceries".to_string(),
            content: "milk".to_string(),
            is_favorite: true,
            category_id: None,
            category: Some(Category {
                id: 2,
                name: "Lists".to_string(),
                description: None,
                color: default_category_color(),
            }),
            tags: vec![Tag {
                id: 4,
                name: "home".to_string(),
            }],
            created_at: None,
            updated_at: None,
        };
        let draft = NoteDraft::from_note(&note);
        assert_eq!(draft.title, "Groceries");
        assert_eq!(draft.category_id, Some(2));
        assert_eq!(draft.tag_ids, vec![4]);
    }
}
