//! Blog posts for the posts lab.
//!
//! Posts are embedded in the binary from `content/posts.json` and parsed once
//! at startup. They are addressed by their position in the list.

use thiserror::Error;

use web_labs_core::Post;

/// Embedded post list.
const POSTS_JSON: &str = include_str!("../content/posts.json");

/// Errors that can occur when loading content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to parse posts: {0}")]
    Parse(#[from] serde_json::Error),
}

/// In-memory post list.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    posts: Vec<Post>,
}

impl ContentStore {
    /// Create a store from an explicit list of posts.
    #[must_use]
    pub const fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    /// Load the posts embedded in the binary.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Parse` if the embedded JSON is malformed.
    pub fn load_embedded() -> Result<Self, ContentError> {
        Self::from_json(POSTS_JSON)
    }

    /// Parse a JSON array of posts.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Parse` if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let posts: Vec<Post> = serde_json::from_str(json)?;
        tracing::info!(count = posts.len(), "Loaded posts");
        Ok(Self::new(posts))
    }

    /// All posts, in display order.
    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// The post at `index`, if any.
    #[must_use]
    pub fn get_post(&self, index: usize) -> Option<&Post> {
        self.posts.get(index)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_posts_load() {
        let store = ContentStore::load_embedded().unwrap();
        assert!(!store.posts().is_empty());

        let first = store.get_post(0).unwrap();
        assert!(!first.title.is_empty());
        assert!(!first.comments.is_empty());
        assert!(first.comments.iter().any(|c| !c.replies.is_empty()));
    }

    #[test]
    fn test_missing_index() {
        let store = ContentStore::load_embedded().unwrap();
        assert!(store.get_post(store.posts().len()).is_none());
        assert!(store.get_post(999).is_none());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(ContentStore::from_json("{not json").is_err());
    }

    #[test]
    fn test_post_without_image_rejected() {
        let result = ContentStore::from_json(
            r#"[{"title":"t","text":"x","author":"a","date":"2024-01-31"}]"#,
        );
        assert!(matches!(result, Err(ContentError::Parse(_))));
    }

    #[test]
    fn test_embedded_images_exist() {
        let images = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("static/images");
        let store = ContentStore::load_embedded().unwrap();
        for post in store.posts() {
            assert!(images.join(&post.image_id).is_file(), "{}", post.image_id);
        }
    }

    #[test]
    fn test_dates_parse() {
        let store = ContentStore::from_json(
            r#"[{"title":"t","text":"x","author":"a","date":"2024-01-31","image_id":"t.svg"}]"#,
        )
        .unwrap();
        assert_eq!(store.get_post(0).unwrap().display_date(), "31.01.2024");
    }
}
