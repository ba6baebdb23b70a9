//! Operations for model-based testing.
//!
//! Operations are generated by proptest (or decoded by the fuzzer) and
//! applied to both the model and the real manager.

use arbitrary::Arbitrary;
use tweeter_core::{ErrorKind, MAX_TEXT_CHARS, TweetId, TweeterResult};

/// Index of one of the fixed test users. Reduced modulo [`NUM_USERS`].
pub type UserIdx = u8;

/// Tweet id as generated (kept small so operations hit existing tweets).
pub type ModelTweetId = u8;

/// Number of distinct users operations can name.
pub const NUM_USERS: usize = 4;

/// Slot a generated user index refers to.
pub fn user_slot(user: UserIdx) -> usize {
    usize::from(user) % NUM_USERS
}

/// Name of the user in `slot`.
pub fn user_name(slot: usize) -> String {
    format!("user{slot}")
}

/// Password registered for the user in `slot`.
pub fn user_password(slot: usize) -> String {
    format!("pw{slot}")
}

/// Password that matches nobody.
pub const WRONG_PASSWORD: &str = "wrong";

/// Operations that can be applied to the system.
#[derive(Debug, Clone, Arbitrary)]
pub enum Operation {
    /// Register a user with their password.
    Register {
        /// User to register.
        user: UserIdx,
    },

    /// Log a user in.
    Login {
        /// User logging in.
        user: UserIdx,
        /// Use the registered password, or a wrong one.
        correct_password: bool,
    },

    /// Log the current user out.
    Logout,

    /// Compose a text tweet as `author` and publish it.
    PublishText {
        /// Author of the tweet.
        author: UserIdx,
        /// Tweet text.
        text: SmallText,
    },

    /// Compose an image tweet as `author` and publish it.
    PublishImage {
        /// Author of the tweet.
        author: UserIdx,
        /// Caption.
        text: SmallText,
        /// Whether to attach a URL (an empty URL is rejected).
        with_url: bool,
    },

    /// Compose a quote of tweet `quoted` as `author` and publish it.
    PublishQuote {
        /// Author of the tweet.
        author: UserIdx,
        /// Comment.
        text: SmallText,
        /// Tweet being quoted.
        quoted: ModelTweetId,
    },

    /// Publish the most recently composed tweet again, as composed.
    ///
    /// Does nothing if no tweet has been composed yet.
    RepublishLast,

    /// Edit a tweet as the current user.
    Edit {
        /// Tweet to edit.
        id: ModelTweetId,
        /// Replacement text.
        text: SmallText,
    },

    /// Delete a tweet as the current user.
    Delete {
        /// Tweet to delete.
        id: ModelTweetId,
    },

    /// Make one user follow another.
    Follow {
        /// Following user.
        follower: UserIdx,
        /// Followed user.
        target: UserIdx,
    },

    /// Look up the latest tweet.
    Latest,

    /// Advance the clock.
    ///
    /// The model doesn't track time; timestamps are not observable.
    AdvanceTime {
        /// Seconds to advance.
        secs: u16,
    },
}

/// Compact tweet text.
///
/// Size classes cover the validation boundaries: empty, short, exactly the
/// limit in multi-byte characters, and one past the limit.
#[derive(Debug, Clone, Arbitrary)]
pub struct SmallText {
    /// Content seed.
    pub seed: u8,
    /// Length class (0-3 maps to empty/short/limit/over-limit).
    pub size_class: u8,
}

impl SmallText {
    /// Expand to the actual text.
    pub fn to_text(&self) -> String {
        match self.size_class % 4 {
            0 => String::new(),
            1 => format!("tweet {}", self.seed),
            2 => {
                // U+00E0..U+00EF, two bytes each in UTF-8
                let c = char::from(0xE0 + self.seed % 16);
                std::iter::repeat_n(c, MAX_TEXT_CHARS).collect()
            },
            _ => {
                let c = char::from(b'a' + self.seed % 26);
                std::iter::repeat_n(c, MAX_TEXT_CHARS + 1).collect()
            },
        }
    }
}

/// Convert a generated id to a real one.
pub fn tweet_id(id: ModelTweetId) -> TweetId {
    TweetId::from(id)
}

/// Result of applying an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationResult {
    /// Operation succeeded.
    Ok,

    /// Operation failed with this kind of error.
    Error(ErrorKind),
}

impl OperationResult {
    /// Check if operation succeeded.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Check if operation failed.
    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }
}

impl<T> From<TweeterResult<T>> for OperationResult {
    fn from(result: TweeterResult<T>) -> Self {
        match result {
            Ok(_) => Self::Ok,
            Err(e) => Self::Error(e.kind()),
        }
    }
}
