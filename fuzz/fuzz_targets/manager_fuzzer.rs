//! Fuzz target for [`TweetManager`]
//!
//! Catch divergence from the reference model and text validation bugs
//!
//! # Strategy
//!
//! - Operation sequences: Arbitrary register/login/publish/edit/delete/follow
//!   sequences applied to both the model and the real manager
//! - Raw text: Arbitrary strings (any Unicode, any length) composed and
//!   edited by a logged-in user
//!
//! # Invariants
//!
//! - Model and real manager return the same result kind for every operation
//! - Observable state (timelines, follows, session) matches after every step
//! - Text is accepted iff it has 1 to 140 chars
//! - A rejected compose never consumes an id
//! - Issued ids are strictly increasing
//! - NEVER panic on any input

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tweeter_core::{LatestTweetPolicy, MAX_TEXT_CHARS, ManagerConfig, TweetManager, User};
use tweeter_harness::{ModelWorld, Operation, RealWorld, SimEnv};

/// Fuzz input.
#[derive(Debug, Clone, Arbitrary)]
struct FuzzInput {
    /// Use `HighestStoredId` instead of the default policy.
    highest_stored: bool,
    /// Operations checked against the model.
    ops: Vec<Operation>,
    /// Raw texts composed by a single logged-in user.
    texts: Vec<String>,
}

fuzz_target!(|input: FuzzInput| {
    let policy = if input.highest_stored {
        LatestTweetPolicy::HighestStoredId
    } else {
        LatestTweetPolicy::LastIssuedId
    };

    let mut model = ModelWorld::new(policy);
    let mut real = RealWorld::new(ManagerConfig { latest_policy: policy });

    for (i, op) in input.ops.iter().enumerate() {
        let model_result = model.apply(op);
        let real_result = real.apply(op);
        assert_eq!(model_result, real_result, "divergence at operation {i}: {op:?}");
        assert_eq!(model.observable_state(), real.observable_state(), "state after {i}: {op:?}");
    }

    let mut manager = TweetManager::new(SimEnv::new());
    let user = User::new("fuzz", "fuzz");
    manager.register(&user).unwrap();
    manager.login(&user).unwrap();

    let mut last_id = None;
    for text in &input.texts {
        let valid = (1..=MAX_TEXT_CHARS).contains(&text.chars().count());
        let before = manager.last_issued_id();

        match manager.compose_text("fuzz", text) {
            Ok(tweet) => {
                assert!(valid, "accepted invalid text of {} chars", text.chars().count());
                assert!(last_id < Some(tweet.id()), "ids went backwards");
                last_id = Some(tweet.id());

                let id = manager.publish_tweet(tweet).unwrap();
                assert_eq!(manager.get_tweet_by_id(id).unwrap().text(), text);

                // Editing with the same text must behave like composing it
                assert!(manager.edit_tweet_by_id(id, text).is_ok());
            },
            Err(_) => {
                assert!(!valid, "rejected valid text of {} chars", text.chars().count());
                assert_eq!(manager.last_issued_id(), before, "rejected compose consumed an id");
            },
        }
    }

    assert_eq!(manager.get_timeline().unwrap().len(), manager.tweet_count());
});
