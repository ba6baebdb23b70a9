//! Manager configuration.

/// What "the latest tweet" means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LatestTweetPolicy {
    /// The tweet carrying the most recently issued id.
    ///
    /// If that tweet was deleted, or composed but never published, there is
    /// no latest tweet until the next one is composed and published.
    #[default]
    LastIssuedId,

    /// The stored tweet with the highest id.
    ///
    /// Falls back to older tweets when the newest one is deleted.
    HighestStoredId,
}

/// Tweet manager configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManagerConfig {
    /// Resolution rule for [`crate::TweetManager::get_latest_tweet`].
    pub latest_policy: LatestTweetPolicy,
}
