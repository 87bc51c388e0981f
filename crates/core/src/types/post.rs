//! Blog post and comment types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used when rendering posts (`31.12.2024`).
pub const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y";

/// A blog post with its comment thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    pub text: String,
    pub author: String,
    pub date: NaiveDate,
    /// File name of the illustration under `/static/images/`.
    pub image_id: String,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Post {
    /// Returns the publication date as `DD.MM.YYYY`.
    #[must_use]
    pub fn display_date(&self) -> String {
        self.date.format(DISPLAY_DATE_FORMAT).to_string()
    }

    /// Returns at most `max_chars` characters of the text, followed by an
    /// ellipsis when truncated.
    #[must_use]
    pub fn excerpt(&self, max_chars: usize) -> String {
        let mut chars = self.text.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{}…", head.trim_end())
        } else {
            head
        }
    }

    /// Total number of comments including nested replies.
    #[must_use]
    pub fn comment_count(&self) -> usize {
        self.comments.iter().map(Comment::thread_size).sum()
    }
}

/// A comment, optionally with replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    pub text: String,
    #[serde(default)]
    pub replies: Vec<Comment>,
}

impl Comment {
    /// Create a comment without replies.
    #[must_use]
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
            replies: Vec::new(),
        }
    }

    /// Attach a reply.
    #[must_use]
    pub fn with_reply(mut self, reply: Self) -> Self {
        self.replies.push(reply);
        self
    }

    /// This comment plus all nested replies.
    fn thread_size(&self) -> usize {
        1 + self.replies.iter().map(Self::thread_size).sum::<usize>()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn post(text: &str) -> Post {
        Post {
            title: "Title".to_string(),
            text: text.to_string(),
            author: "Author".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
            image_id: "title.svg".to_string(),
            comments: vec![
                Comment::new("a", "first").with_reply(Comment::new("b", "reply")),
                Comment::new("c", "second"),
            ],
        }
    }

    #[test]
    fn test_display_date() {
        assert_eq!(post("x").display_date(), "07.03.2024");
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(post("short").excerpt(10), "short");
        assert_eq!(post("привет мир").excerpt(6), "привет…");
    }

    #[test]
    fn test_comment_count_includes_replies() {
        assert_eq!(post("x").comment_count(), 3);
    }
}
