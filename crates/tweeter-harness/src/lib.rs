//! Model-based testing harness for the tweeter engine.
//!
//! Random operation sequences are applied to both a reference model and the
//! real [`tweeter_core::TweetManager`]; results (by error kind) and
//! observable state must agree after every step.
//!
//! # Model-Based Testing
//!
//! ```text
//! proptest / libfuzzer generates: Vec<Operation>
//!                          │
//!           ┌──────────────┼──────────────┐
//!           ▼              ▼              ▼
//!      ModelWorld     RealWorld       Compare
//!      (reference)    (SimEnv clock)  results + state
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod model;
pub mod real;
pub mod sim_env;

pub use model::{
    ModelTweet, ModelTweetId, ModelWorld, NUM_USERS, ObservableState, Operation, OperationResult,
    SmallText, UserIdx,
};
pub use real::RealWorld;
pub use sim_env::SimEnv;
