//! Error types for the tweet engine.
//!
//! Each family of failures has its own enum so that lower layers (tweet
//! construction, the registry, the session) only expose what they can
//! actually produce. The manager aggregates them into [`TweeterError`].

use thiserror::Error;

use crate::tweet::{TweetId, TweetKind};

/// Tweet content failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Tweet text is empty.
    #[error("tweet text can't be empty")]
    EmptyText,

    /// Tweet text exceeds the character limit.
    #[error("tweet text is {len} characters, the limit is {max}")]
    TextTooLong {
        /// Length of the rejected text, in characters.
        len: usize,
        /// Maximum allowed length, in characters.
        max: usize,
    },

    /// Image tweet without an image URL.
    #[error("image tweet needs an image URL")]
    MissingImageUrl,

    /// The operation is not available for this kind of tweet.
    #[error("operation not supported on {0} tweets")]
    NotSupported(TweetKind),
}

/// Session and authorization failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The caller is not logged in as the user the operation acts for.
    #[error("you must be logged in as the author to do that")]
    NotAuthenticated,

    /// No user is logged in.
    #[error("no user logged in")]
    NotLoggedIn,

    /// A user is already logged in.
    #[error("already logged in")]
    AlreadyLoggedIn,

    /// Unknown user or wrong password. The two cases are deliberately not
    /// distinguished.
    #[error("the user is not registered")]
    NotRegistered,

    /// The logged-in user does not own the tweet.
    #[error("tweet {id} belongs to @{owner}")]
    NotOwner {
        /// Tweet being modified.
        id: TweetId,
        /// Author of that tweet.
        owner: String,
    },
}

/// Registration failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Empty user name.
    #[error("invalid name")]
    InvalidName,

    /// Empty password.
    #[error("invalid password")]
    InvalidPassword,

    /// The name is taken.
    #[error("user @{0} is already registered")]
    AlreadyRegistered(String),
}

/// Lookups that found nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No stored tweet has this id.
    #[error("tweet {0} does not exist")]
    NotFound(TweetId),

    /// No tweets have been composed yet, so there is no latest tweet.
    #[error("no tweets have been published")]
    NoTweets,

    /// The user is unknown.
    #[error("user @{0} is not registered")]
    UserNotRegistered(String),
}

/// Follow graph failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelationshipError {
    /// One side of the relationship is not registered.
    #[error("user @{0} not found")]
    UserNotFound(String),

    /// Users can't follow themselves.
    #[error("you can't follow yourself")]
    SelfFollow,

    /// The relationship already exists.
    #[error("already following @{0}")]
    AlreadyFollowing(String),
}

/// Errors from [`crate::TweetManager`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TweeterError {
    /// Tweet content failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Session or authorization failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Registration failure.
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    /// Lookup failure.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Follow graph failure.
    #[error(transparent)]
    Relationship(#[from] RelationshipError),

    /// A tweet with this id was already published.
    #[error("tweet {0} was already published")]
    DuplicatePost(TweetId),

    /// The tweet's id was not issued by this manager.
    #[error("tweet id {0} was not issued here")]
    UnissuedId(TweetId),
}

/// Fieldless classification of every error the engine can return.
///
/// Callers that only care about *what* went wrong (the shell, the model
/// harness) match on this instead of on the nested enums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ErrorKind {
    EmptyText,
    TextTooLong,
    MissingImageUrl,
    NotSupported,
    NotAuthenticated,
    NotLoggedIn,
    AlreadyLoggedIn,
    NotRegistered,
    NotOwner,
    InvalidName,
    InvalidPassword,
    AlreadyRegistered,
    NotFound,
    UserNotRegistered,
    UserNotFound,
    SelfFollow,
    AlreadyFollowing,
    DuplicatePost,
    UnissuedId,
}

impl TweeterError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(e) => match e {
                ValidationError::EmptyText => ErrorKind::EmptyText,
                ValidationError::TextTooLong { .. } => ErrorKind::TextTooLong,
                ValidationError::MissingImageUrl => ErrorKind::MissingImageUrl,
                ValidationError::NotSupported(_) => ErrorKind::NotSupported,
            },
            Self::Auth(e) => match e {
                AuthError::NotAuthenticated => ErrorKind::NotAuthenticated,
                AuthError::NotLoggedIn => ErrorKind::NotLoggedIn,
                AuthError::AlreadyLoggedIn => ErrorKind::AlreadyLoggedIn,
                AuthError::NotRegistered => ErrorKind::NotRegistered,
                AuthError::NotOwner { .. } => ErrorKind::NotOwner,
            },
            Self::Registration(e) => match e {
                RegistrationError::InvalidName => ErrorKind::InvalidName,
                RegistrationError::InvalidPassword => ErrorKind::InvalidPassword,
                RegistrationError::AlreadyRegistered(_) => ErrorKind::AlreadyRegistered,
            },
            // An empty feed is reported as a missing tweet.
            Self::Lookup(e) => match e {
                LookupError::NotFound(_) | LookupError::NoTweets => ErrorKind::NotFound,
                LookupError::UserNotRegistered(_) => ErrorKind::UserNotRegistered,
            },
            Self::Relationship(e) => match e {
                RelationshipError::UserNotFound(_) => ErrorKind::UserNotFound,
                RelationshipError::SelfFollow => ErrorKind::SelfFollow,
                RelationshipError::AlreadyFollowing(_) => ErrorKind::AlreadyFollowing,
            },
            Self::DuplicatePost(_) => ErrorKind::DuplicatePost,
            Self::UnissuedId(_) => ErrorKind::UnissuedId,
        }
    }
}

/// Result alias for manager operations.
pub type TweeterResult<T> = Result<T, TweeterError>;
