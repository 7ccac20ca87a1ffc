use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest title a post may carry, in characters.
pub const TITLE_MAX_LEN: usize = 100;

/// Post entity - a blog entry owned by exactly one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub date_posted: DateTime<Utc>,
    pub author_id: Uuid,
}

impl Post {
    /// Create a new post authored by `author_id`, stamped with the current time.
    pub fn new(author_id: Uuid, title: String, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            date_posted: Utc::now(),
            author_id,
        }
    }

    /// Whether `user_id` is the author of this post.
    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }

    /// Copy the editable fields of `form` onto this post.
    pub fn apply(&mut self, form: PostForm) {
        self.title = form.title;
        self.content = form.content;
    }
}

/// The externally settable fields of a post.
///
/// Any other submitted field (an `author`, say) is dropped on deserialization.
/// Missing fields deserialize as empty and are caught by [`PostForm::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostForm {
    pub title: String,
    pub content: String,
}

impl PostForm {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Check the form, returning every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push("title: this field is required".to_string());
        } else if self.title.chars().count() > TITLE_MAX_LEN {
            errors.push(format!(
                "title: ensure this value has at most {TITLE_MAX_LEN} characters"
            ));
        }
        if self.content.trim().is_empty() {
            errors.push("content: this field is required".to_string());
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
