//! # Post Entity
//!
//! Wire format follows the `/fakeApi/posts` payloads: the author is carried
//! as `user` and the creation timestamp as `date`.

use super::{PostId, UserId};
use crate::errors::BulletinError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Reactions
// ============================================================================

/// The closed set of reactions a post can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReactionName {
    /// 👍
    ThumbsUp,
    /// 🎉
    Tada,
    /// ❤️
    Heart,
    /// 🚀
    Rocket,
    /// 👀
    Eyes,
}

impl ReactionName {
    /// Every reaction, in display order.
    pub const ALL: [ReactionName; 5] = [
        Self::ThumbsUp,
        Self::Tada,
        Self::Heart,
        Self::Rocket,
        Self::Eyes,
    ];

    /// Wire name of the reaction.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThumbsUp => "thumbsUp",
            Self::Tada => "tada",
            Self::Heart => "heart",
            Self::Rocket => "rocket",
            Self::Eyes => "eyes",
        }
    }

    /// Emoji shown on the reaction button.
    #[must_use]
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::ThumbsUp => "👍",
            Self::Tada => "🎉",
            Self::Heart => "❤️",
            Self::Rocket => "🚀",
            Self::Eyes => "👀",
        }
    }
}

impl fmt::Display for ReactionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReactionName {
    type Err = BulletinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|reaction| reaction.as_str() == s)
            .ok_or_else(|| BulletinError::invalid(format!("unknown reaction: {s}")))
    }
}

/// Per-post reaction counters.
///
/// Counters only ever grow; there is no decrement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reactions {
    /// 👍 count
    pub thumbs_up: u32,
    /// 🎉 count
    pub tada: u32,
    /// ❤️ count
    pub heart: u32,
    /// 🚀 count
    pub rocket: u32,
    /// 👀 count
    pub eyes: u32,
}

impl Reactions {
    /// Read one counter.
    #[must_use]
    pub fn get(&self, reaction: ReactionName) -> u32 {
        match reaction {
            ReactionName::ThumbsUp => self.thumbs_up,
            ReactionName::Tada => self.tada,
            ReactionName::Heart => self.heart,
            ReactionName::Rocket => self.rocket,
            ReactionName::Eyes => self.eyes,
        }
    }

    /// Increment one counter by exactly one (saturating).
    pub fn increment(&mut self, reaction: ReactionName) {
        let counter = match reaction {
            ReactionName::ThumbsUp => &mut self.thumbs_up,
            ReactionName::Tada => &mut self.tada,
            ReactionName::Heart => &mut self.heart,
            ReactionName::Rocket => &mut self.rocket,
            ReactionName::Eyes => &mut self.eyes,
        };
        *counter = counter.saturating_add(1);
    }

    /// Sum of all counters.
    #[must_use]
    pub fn total(&self) -> u64 {
        ReactionName::ALL
            .into_iter()
            .map(|reaction| u64::from(self.get(reaction)))
            .sum()
    }
}

// ============================================================================
// Post
// ============================================================================

/// A post as cached by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Server-assigned identifier
    pub id: PostId,
    /// Title
    pub title: String,
    /// Body text
    pub content: String,
    /// Author
    #[serde(rename = "user")]
    pub author_id: UserId,
    /// ISO-8601 creation timestamp, ordered lexically
    #[serde(rename = "date")]
    pub created_at: String,
    /// Reaction counters
    #[serde(default)]
    pub reactions: Reactions,
}

impl Post {
    /// Newest-first presentation order by creation timestamp.
    pub fn newest_first(a: &Post, b: &Post) -> std::cmp::Ordering {
        b.created_at.cmp(&a.created_at)
    }
}

/// Body of a create-post request. The server assigns id, date and zeroed reactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    /// Title
    pub title: String,
    /// Body text
    pub content: String,
    /// Author stamped from the current session
    #[serde(rename = "user")]
    pub author_id: UserId,
}

/// Fields a local edit may overwrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostUpdate {
    /// Target post
    pub id: PostId,
    /// Replacement title
    pub title: String,
    /// Replacement body text
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_post() -> Post {
        Post {
            id: PostId::new("1"),
            title: "First Post!".to_string(),
            content: "Hello!".to_string(),
            author_id: UserId::new("0"),
            created_at: "2023-01-02T00:00:00.000Z".to_string(),
            reactions: Reactions::default(),
        }
    }

    #[test]
    fn test_reaction_increment_is_exactly_one() {
        let mut reactions = Reactions::default();
        reactions.increment(ReactionName::Rocket);
        reactions.increment(ReactionName::Rocket);
        assert_eq!(reactions.get(ReactionName::Rocket), 2);
        assert_eq!(reactions.get(ReactionName::Eyes), 0);
        assert_eq!(reactions.total(), 2);
    }

    #[test]
    fn test_reaction_increment_saturates() {
        let mut reactions = Reactions {
            heart: u32::MAX,
            ..Reactions::default()
        };
        reactions.increment(ReactionName::Heart);
        assert_eq!(reactions.heart, u32::MAX);
    }

    #[test]
    fn test_reaction_name_parse_roundtrip() {
        for reaction in ReactionName::ALL {
            assert_eq!(reaction.as_str().parse::<ReactionName>().unwrap(), reaction);
        }
        assert!("clap".parse::<ReactionName>().is_err());
    }

    #[test]
    fn test_post_wire_format() {
        let json = serde_json::to_value(sample_post()).unwrap();
        assert_eq!(json["user"], "0");
        assert_eq!(json["date"], "2023-01-02T00:00:00.000Z");
        assert_eq!(json["reactions"]["thumbsUp"], 0);
        assert!(json.get("author_id").is_none());
    }

    #[test]
    fn test_post_missing_reactions_defaults_to_zero() {
        let json = r#"{"id":"9","title":"t","content":"c","user":"1","date":"2023-01-01"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.reactions, Reactions::default());
    }

    #[test]
    fn test_newest_first_comparator() {
        let newer = sample_post();
        let mut older = sample_post();
        older.created_at = "2023-01-01T00:00:00.000Z".to_string();
        assert_eq!(
            Post::newest_first(&newer, &older),
            std::cmp::Ordering::Less
        );
    }

    proptest! {
        #[test]
        fn test_total_counts_every_increment(picks in prop::collection::vec(0usize..5, 0..64)) {
            let mut reactions = Reactions::default();
            for i in &picks {
                reactions.increment(ReactionName::ALL[*i]);
            }
            prop_assert_eq!(reactions.total(), picks.len() as u64);
        }
    }
}
