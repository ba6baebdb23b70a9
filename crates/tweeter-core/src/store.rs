//! Per-user tweet storage.
//!
//! One insertion-ordered list per registered user. Lists are created at
//! registration and never removed; tweets leave a list only through
//! [`TweetStore::remove`]. All lookups are linear scans, which is fine for an
//! in-memory feed that lives as long as the process.

use std::collections::HashMap;

use crate::tweet::{Tweet, TweetId};

/// Tweets keyed by author name.
#[derive(Debug, Default, Clone)]
pub struct TweetStore {
    timelines: HashMap<String, Vec<Tweet>>,
}

impl TweetStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the (empty) list for a new user. Existing lists are kept.
    pub fn add_user(&mut self, name: &str) {
        self.timelines.entry(name.to_string()).or_default();
    }

    /// Append a tweet to its author's list.
    ///
    /// Returns `false` (and drops nothing) if the author has no list.
    pub fn append(&mut self, tweet: Tweet) -> bool {
        match self.timelines.get_mut(tweet.author()) {
            Some(list) => {
                list.push(tweet);
                true
            },
            None => false,
        }
    }

    /// Tweets by `name`, in insertion order.
    pub fn user_tweets(&self, name: &str) -> Option<&[Tweet]> {
        self.timelines.get(name).map(Vec::as_slice)
    }

    /// All stored tweets, in no particular order across users.
    pub fn iter(&self) -> impl Iterator<Item = &Tweet> {
        self.timelines.values().flatten()
    }

    /// Tweet with the given id.
    pub fn find(&self, id: TweetId) -> Option<&Tweet> {
        self.iter().find(|tweet| tweet.id() == id)
    }

    /// Mutable tweet with the given id.
    pub fn find_mut(&mut self, id: TweetId) -> Option<&mut Tweet> {
        self.timelines.values_mut().flatten().find(|tweet| tweet.id() == id)
    }

    /// Whether any stored tweet is equal to `tweet`.
    pub fn contains(&self, tweet: &Tweet) -> bool {
        self.iter().any(|stored| stored == tweet)
    }

    /// Remove the tweet with the given id, returning it.
    pub fn remove(&mut self, id: TweetId) -> Option<Tweet> {
        self.timelines.values_mut().find_map(|list| {
            let index = list.iter().position(|tweet| tweet.id() == id)?;
            Some(list.remove(index))
        })
    }

    /// Highest id among stored tweets.
    pub fn max_id(&self) -> Option<TweetId> {
        self.iter().map(Tweet::id).max()
    }

    /// Number of stored tweets.
    pub fn len(&self) -> usize {
        self.timelines.values().map(Vec::len).sum()
    }

    /// Whether no tweets are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
