//! Reference model for model-based testing.
//!
//! The model captures what the manager promises (ids, ownership, timelines,
//! error precedence) with the simplest data structures that can express it.
//!
//! # Design Principles
//!
//! - Simplicity: The model should be obviously correct
//! - Behavior not implementation: Errors are compared by kind only
//! - Deterministic: Same inputs produce same outputs

pub mod operation;
mod world;

pub use operation::{
    ModelTweetId, NUM_USERS, Operation, OperationResult, SmallText, UserIdx, WRONG_PASSWORD,
    tweet_id, user_name, user_password, user_slot,
};
pub use world::{ModelTweet, ModelWorld, ObservableState};
