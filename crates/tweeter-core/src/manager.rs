//! Tweet Manager
//!
//! Orchestrates the user registry, the login session and tweet storage.
//!
//! ## Responsibilities
//!
//! - Identity: Register users, authenticate the single session
//! - Composition: Assign ids and timestamps to new tweets
//! - Authorization: Only the author may publish, edit or delete a tweet
//! - Timelines: Per-user lists and the aggregated followed-users view
//!
//! ## Design
//!
//! - Explicit state: The id sequence and the session are fields of the
//!   manager, so independent managers never interfere (tests create one each)
//! - Name-keyed: Users and tweet lists are keyed by user name; tweets refer to
//!   their author by name
//! - Author-grouped timelines: The aggregated timeline is the user's own
//!   tweets followed by each followed user's tweets, in follow order. Callers
//!   that want chronological order sort by `created_at`.

use std::collections::HashSet;

use crate::{
    config::{LatestTweetPolicy, ManagerConfig},
    env::Environment,
    error::{AuthError, LookupError, TweeterError, TweeterResult},
    session::Session,
    store::TweetStore,
    tweet::{Tweet, TweetId},
    user::{User, UserRegistry},
};

/// Owns all users, tweets and the session.
pub struct TweetManager<E>
where
    E: Environment,
{
    /// Clock for tweet timestamps
    env: E,
    config: ManagerConfig,
    registry: UserRegistry,
    store: TweetStore,
    session: Session,
    /// Next id to hand out
    next_id: TweetId,
    /// Most recently issued id, if any
    last_issued: Option<TweetId>,
    /// Every id that has been published, including since-deleted ones
    published: HashSet<TweetId>,
}

impl<E> TweetManager<E>
where
    E: Environment,
{
    /// Create a manager with the default configuration.
    pub fn new(env: E) -> Self {
        Self::with_config(env, ManagerConfig::default())
    }

    /// Create a manager with an explicit configuration.
    pub fn with_config(env: E, config: ManagerConfig) -> Self {
        Self {
            env,
            config,
            registry: UserRegistry::new(),
            store: TweetStore::new(),
            session: Session::new(),
            next_id: 0,
            last_issued: None,
            published: HashSet::new(),
        }
    }

    /// Read access to registered users and the follow graph.
    pub fn registry(&self) -> &UserRegistry {
        &self.registry
    }

    /// Drop all users and tweets, log out and restart ids at 0.
    pub fn reset(&mut self) {
        self.registry = UserRegistry::new();
        self.store = TweetStore::new();
        self.session = Session::new();
        self.next_id = 0;
        self.last_issued = None;
        self.published.clear();
        tracing::debug!("manager reset");
    }

    /// Register a new user with an empty timeline.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationError::InvalidName`,
    /// `RegistrationError::InvalidPassword` or
    /// `RegistrationError::AlreadyRegistered`.
    pub fn register(&mut self, user: &User) -> TweeterResult<()> {
        self.registry.register(user)?;
        self.store.add_user(user.name());
        tracing::debug!(user = user.name(), "registered user");
        Ok(())
    }

    /// Check if a user name is registered.
    pub fn is_registered(&self, name: &str) -> bool {
        self.registry.is_registered(name)
    }

    /// Log a user in.
    ///
    /// Name and password must match a registered user exactly. An unknown
    /// name and a wrong password produce the same error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AlreadyLoggedIn` if someone is logged in, and
    /// `AuthError::NotRegistered` if the credentials don't match.
    pub fn login(&mut self, user: &User) -> TweeterResult<()> {
        if self.session.is_logged_in() {
            return Err(AuthError::AlreadyLoggedIn.into());
        }
        if !self.registry.authenticate(user.name(), user.password()) {
            tracing::warn!(user = user.name(), "login rejected");
            return Err(AuthError::NotRegistered.into());
        }

        self.session.login(user.name())?;
        tracing::debug!(user = user.name(), "logged in");
        Ok(())
    }

    /// Log the current user out.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotLoggedIn` if nobody is logged in.
    pub fn logout(&mut self) -> TweeterResult<()> {
        self.session.logout()?;
        tracing::debug!("logged out");
        Ok(())
    }

    /// Name of the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotLoggedIn` if nobody is logged in.
    pub fn current_user(&self) -> TweeterResult<&str> {
        Ok(self.session.current_user()?)
    }

    /// Make `follower` follow `target`.
    ///
    /// # Errors
    ///
    /// Returns `RelationshipError::UserNotFound`,
    /// `RelationshipError::SelfFollow` or
    /// `RelationshipError::AlreadyFollowing`.
    pub fn follow(&mut self, follower: &str, target: &str) -> TweeterResult<()> {
        self.registry.follow(follower, target)?;
        tracing::debug!(follower, target, "followed");
        Ok(())
    }

    /// Make the logged-in user follow `target`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotLoggedIn` if nobody is logged in, otherwise the
    /// same errors as [`TweetManager::follow`].
    pub fn follow_current(&mut self, target: &str) -> TweeterResult<()> {
        let follower = self.session.current_user()?.to_string();
        self.follow(&follower, target)
    }

    /// Most recently issued tweet id.
    pub fn last_issued_id(&self) -> Option<TweetId> {
        self.last_issued
    }

    fn issue_id(&mut self) -> TweetId {
        let id = self.next_id;
        self.next_id += 1;
        self.last_issued = Some(id);
        id
    }

    /// Compose a text tweet.
    ///
    /// The text is validated before an id is drawn, so a rejected tweet does
    /// not consume an id. The tweet is not published.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyText` or `ValidationError::TextTooLong`.
    pub fn compose_text(&mut self, author: &str, text: &str) -> TweeterResult<Tweet> {
        crate::tweet::validate_text(text)?;
        let id = self.issue_id();
        Ok(Tweet::new_text(id, author, self.env.now(), text)?)
    }

    /// Compose an image tweet.
    ///
    /// # Errors
    ///
    /// Text errors as for [`TweetManager::compose_text`], then
    /// `ValidationError::MissingImageUrl`.
    pub fn compose_image(&mut self, author: &str, text: &str, url: &str) -> TweeterResult<Tweet> {
        crate::tweet::validate_image(text, url)?;
        let id = self.issue_id();
        Ok(Tweet::new_image(id, author, self.env.now(), text, url)?)
    }

    /// Compose a quote of the stored tweet `quoted_id`.
    ///
    /// The quote captures the quoted tweet as it is right now.
    ///
    /// # Errors
    ///
    /// Text errors as for [`TweetManager::compose_text`], then
    /// `LookupError::NotFound` if `quoted_id` is not stored.
    pub fn compose_quote(
        &mut self,
        author: &str,
        text: &str,
        quoted_id: TweetId,
    ) -> TweeterResult<Tweet> {
        crate::tweet::validate_text(text)?;
        let quoted = self.get_tweet_by_id(quoted_id)?.clone();
        let id = self.issue_id();
        Ok(Tweet::new_quote(id, author, self.env.now(), text, quoted)?)
    }

    /// Publish a composed tweet to its author's timeline.
    ///
    /// Each issued id can be published once. Publishing again fails even if
    /// the first tweet was edited or deleted since.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` unless the author is logged in,
    /// `TweeterError::UnissuedId` if this manager never issued the tweet's id,
    /// and `TweeterError::DuplicatePost` if the id was already published.
    pub fn publish_tweet(&mut self, tweet: Tweet) -> TweeterResult<TweetId> {
        if !self.session.is_current(tweet.author()) {
            tracing::warn!(author = tweet.author(), "publish rejected: author not logged in");
            return Err(AuthError::NotAuthenticated.into());
        }

        let id = tweet.id();
        if id >= self.next_id {
            tracing::warn!(id, next_id = self.next_id, "publish rejected: id never issued");
            return Err(TweeterError::UnissuedId(id));
        }
        // An equal tweet carries the same id, so this also covers equality.
        if self.published.contains(&id) {
            return Err(TweeterError::DuplicatePost(id));
        }

        let author = tweet.author().to_string();
        if !self.store.append(tweet) {
            return Err(LookupError::UserNotRegistered(author).into());
        }
        self.published.insert(id);

        tracing::debug!(id, author = %author, "published tweet");
        Ok(id)
    }

    /// Stored tweet by id.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::NotFound` if no stored tweet has this id.
    pub fn get_tweet_by_id(&self, id: TweetId) -> TweeterResult<&Tweet> {
        self.store.find(id).ok_or_else(|| LookupError::NotFound(id).into())
    }

    /// The latest tweet, as defined by [`ManagerConfig::latest_policy`].
    ///
    /// # Errors
    ///
    /// Returns `LookupError::NoTweets` if there is nothing to choose from,
    /// and `LookupError::NotFound` if the chosen id is no longer stored.
    pub fn get_latest_tweet(&self) -> TweeterResult<&Tweet> {
        let id = match self.config.latest_policy {
            LatestTweetPolicy::LastIssuedId => self.last_issued,
            LatestTweetPolicy::HighestStoredId => self.store.max_id(),
        };
        let id = id.ok_or(LookupError::NoTweets)?;
        self.get_tweet_by_id(id)
    }

    /// A user's own tweets, in publish order.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::UserNotRegistered` for unknown users.
    pub fn get_timeline_for_user(&self, name: &str) -> TweeterResult<&[Tweet]> {
        self.store
            .user_tweets(name)
            .ok_or_else(|| LookupError::UserNotRegistered(name.to_string()).into())
    }

    /// The logged-in user's timeline.
    ///
    /// Own tweets first, then each followed user's tweets in the order the
    /// follows were added. Each group keeps its publish order; there is no
    /// merge by timestamp.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotLoggedIn` if nobody is logged in.
    pub fn get_timeline(&self) -> TweeterResult<Vec<&Tweet>> {
        let current = self.session.current_user()?;

        let mut timeline: Vec<&Tweet> =
            self.store.user_tweets(current).unwrap_or_default().iter().collect();
        for followed in self.registry.following(current) {
            timeline.extend(self.store.user_tweets(followed).unwrap_or_default().iter());
        }

        Ok(timeline)
    }

    /// Check that tweet `id` exists and belongs to the logged-in user.
    fn authorize_owner(&self, id: TweetId) -> TweeterResult<()> {
        let owner = self.get_tweet_by_id(id)?.author();
        let current = self.session.current_user().map_err(|_| AuthError::NotAuthenticated)?;

        if current != owner {
            tracing::warn!(id, owner, user = current, "rejected change to someone else's tweet");
            return Err(AuthError::NotOwner { id, owner: owner.to_string() }.into());
        }

        Ok(())
    }

    /// Replace the text of one of the logged-in user's tweets.
    ///
    /// # Errors
    ///
    /// Returns, in order of checking, `LookupError::NotFound`,
    /// `AuthError::NotAuthenticated`, `AuthError::NotOwner`, then the
    /// validation errors of [`Tweet::set_text`].
    pub fn edit_tweet_by_id(&mut self, id: TweetId, text: &str) -> TweeterResult<()> {
        self.authorize_owner(id)?;

        let tweet = self.store.find_mut(id).ok_or(LookupError::NotFound(id))?;
        tweet.set_text(text)?;

        tracing::debug!(id, "edited tweet");
        Ok(())
    }

    /// Delete one of the logged-in user's tweets. Its id is never reused.
    ///
    /// # Errors
    ///
    /// Returns, in order of checking, `LookupError::NotFound`,
    /// `AuthError::NotAuthenticated` and `AuthError::NotOwner`.
    pub fn delete_tweet_by_id(&mut self, id: TweetId) -> TweeterResult<Tweet> {
        self.authorize_owner(id)?;

        let tweet = self.store.remove(id).ok_or(LookupError::NotFound(id))?;

        tracing::debug!(id, "deleted tweet");
        Ok(tweet)
    }

    /// Whether a tweet equal to `tweet` is stored under any user.
    pub fn tweet_exists(&self, tweet: &Tweet) -> bool {
        self.store.contains(tweet)
    }

    /// Number of stored tweets.
    pub fn tweet_count(&self) -> usize {
        self.store.len()
    }
}

impl<E> std::fmt::Debug for TweetManager<E>
where
    E: Environment,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TweetManager")
            .field("user_count", &self.registry.len())
            .field("tweet_count", &self.store.len())
            .field("session", self.session.state())
            .field("next_id", &self.next_id)
            .finish()
    }
}
