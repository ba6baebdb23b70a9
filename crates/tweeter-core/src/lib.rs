//! Tweeter core engine.
//!
//! In-memory social feed: user registration, a single login session, tweets
//! in three shapes (text, image, quote) and timelines built from the follow
//! graph.
//!
//! ## Architecture
//!
//! ```text
//! tweeter-core
//!   ├─ TweetManager       (orchestrates everything below)
//!   │    ├─ UserRegistry  (identities + follow graph)
//!   │    ├─ Session       (LoggedOut | LoggedIn(user))
//!   │    └─ TweetStore    (per-user, insertion-ordered tweets)
//!   ├─ Tweet              (header + Text/Image/Quote body)
//!   └─ Environment        (clock, injected for deterministic tests)
//! ```
//!
//! All operations are synchronous and run to completion. The manager is a
//! plain owned value; wrap it in a lock if it ever needs to be shared.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod env;
mod error;
mod manager;
mod session;
mod store;
mod tweet;
mod user;

pub use config::{LatestTweetPolicy, ManagerConfig};
pub use env::Environment;
pub use error::{
    AuthError, ErrorKind, LookupError, RegistrationError, RelationshipError, TweeterError,
    TweeterResult, ValidationError,
};
pub use manager::TweetManager;
pub use session::{Session, SessionState};
pub use store::TweetStore;
pub use tweet::{
    MAX_TEXT_CHARS, Tweet, TweetBody, TweetId, TweetKind, validate_image, validate_text,
};
pub use user::{User, UserRegistry};
