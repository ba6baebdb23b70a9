//! Model-based property tests.
//!
//! These tests generate random operation sequences and verify that the real
//! manager behaves identically to the reference model.

use proptest::prelude::*;
use tweeter_core::{ErrorKind, LatestTweetPolicy, ManagerConfig};
use tweeter_harness::{ModelTweetId, ModelWorld, Operation, OperationResult, RealWorld, SmallText};

/// Strategy for generating SmallText.
fn small_text_strategy() -> impl Strategy<Value = SmallText> {
    // Mostly valid text, so sequences get past validation.
    let size_class = prop_oneof![6 => Just(1u8), 1 => Just(0u8), 1 => Just(2u8), 1 => Just(3u8)];
    (any::<u8>(), size_class).prop_map(|(seed, size_class)| SmallText { seed, size_class })
}

/// Strategy for generating operations over a handful of users and ids.
fn operation_strategy() -> impl Strategy<Value = Operation> {
    let user = 0..4u8;
    let id = 0..12 as ModelTweetId;

    prop_oneof![
        2 => user.clone().prop_map(|user| Operation::Register { user }),
        3 => (user.clone(), prop::bool::weighted(0.8))
            .prop_map(|(user, correct_password)| Operation::Login { user, correct_password }),
        2 => Just(Operation::Logout),
        6 => (user.clone(), small_text_strategy())
            .prop_map(|(author, text)| Operation::PublishText { author, text }),
        2 => (user.clone(), small_text_strategy(), prop::bool::weighted(0.8)).prop_map(
            |(author, text, with_url)| Operation::PublishImage { author, text, with_url }
        ),
        2 => (user.clone(), small_text_strategy(), id.clone())
            .prop_map(|(author, text, quoted)| Operation::PublishQuote { author, text, quoted }),
        1 => Just(Operation::RepublishLast),
        2 => (id.clone(), small_text_strategy())
            .prop_map(|(id, text)| Operation::Edit { id, text }),
        2 => id.prop_map(|id| Operation::Delete { id }),
        2 => (user.clone(), user)
            .prop_map(|(follower, target)| Operation::Follow { follower, target }),
        1 => Just(Operation::Latest),
        1 => any::<u16>().prop_map(|secs| Operation::AdvanceTime { secs }),
    ]
}

fn policy_strategy() -> impl Strategy<Value = LatestTweetPolicy> {
    prop_oneof![Just(LatestTweetPolicy::LastIssuedId), Just(LatestTweetPolicy::HighestStoredId)]
}

proptest! {
    /// Results and observable state match after every operation.
    #[test]
    fn prop_model_matches_real(
        policy in policy_strategy(),
        ops in prop::collection::vec(operation_strategy(), 0..80)
    ) {
        let mut model = ModelWorld::new(policy);
        let mut real = RealWorld::new(ManagerConfig { latest_policy: policy });

        for (i, op) in ops.iter().enumerate() {
            let model_result = model.apply(op);
            let real_result = real.apply(op);

            prop_assert_eq!(
                model_result,
                real_result,
                "Divergence at operation {}: {:?}",
                i, op
            );
            prop_assert_eq!(
                model.observable_state(),
                real.observable_state(),
                "State divergence after operation {}: {:?}",
                i, op
            );
        }

        prop_assert_eq!(model.tweet_count(), real.manager().tweet_count());
    }

    /// Tweet ids in every timeline are strictly increasing and never shared.
    #[test]
    fn prop_ids_unique_and_ordered(
        ops in prop::collection::vec(operation_strategy(), 0..120)
    ) {
        let mut real = RealWorld::new(ManagerConfig::default());
        for op in &ops {
            let _ = real.apply(op);
        }

        let state = real.observable_state();
        let mut all_ids = Vec::new();
        for timeline in state.timelines.iter().flatten() {
            let ids: Vec<_> = timeline.iter().map(|(id, _)| *id).collect();
            prop_assert!(ids.windows(2).all(|w| w[0] < w[1]), "timeline out of order: {:?}", ids);
            all_ids.extend(ids);
        }

        let count = all_ids.len();
        all_ids.sort_unstable();
        all_ids.dedup();
        prop_assert_eq!(all_ids.len(), count, "an id is stored twice");
    }

    /// Only the author may change a tweet.
    #[test]
    fn prop_non_author_cannot_modify(text in small_text_strategy()) {
        let mut real = RealWorld::new(ManagerConfig::default());
        for user in 0..2 {
            let _ = real.apply(&Operation::Register { user });
        }
        let _ = real.apply(&Operation::Login { user: 0, correct_password: true });
        let published = real.apply(&Operation::PublishText {
            author: 0,
            text: SmallText { seed: 1, size_class: 1 },
        });
        prop_assert!(published.is_ok());

        let _ = real.apply(&Operation::Logout);
        let _ = real.apply(&Operation::Login { user: 1, correct_password: true });

        prop_assert_eq!(
            real.apply(&Operation::Edit { id: 0, text }),
            OperationResult::Error(ErrorKind::NotOwner)
        );
        prop_assert_eq!(
            real.apply(&Operation::Delete { id: 0 }),
            OperationResult::Error(ErrorKind::NotOwner)
        );
        prop_assert_eq!(real.manager().tweet_count(), 1);
    }
}

#[cfg(test)]
mod smoke_tests {
    use super::*;

    /// Basic smoke test for the model.
    #[test]
    fn model_basic_operations() {
        let mut model = ModelWorld::default();
        let text = SmallText { seed: 1, size_class: 1 };

        assert!(model.apply(&Operation::Register { user: 0 }).is_ok());
        assert!(model.apply(&Operation::Register { user: 0 }).is_err());

        // Publishing before login fails
        let result = model.apply(&Operation::PublishText { author: 0, text: text.clone() });
        assert_eq!(result, OperationResult::Error(ErrorKind::NotAuthenticated));

        assert!(model.apply(&Operation::Login { user: 0, correct_password: true }).is_ok());
        assert!(model.apply(&Operation::PublishText { author: 0, text }).is_ok());

        // Second compose drew id 1
        assert!(model.apply(&Operation::Latest).is_ok());
        assert!(model.apply(&Operation::Delete { id: 1 }).is_ok());
        assert_eq!(
            model.apply(&Operation::Latest),
            OperationResult::Error(ErrorKind::NotFound)
        );
    }

    /// Same scenario through the real manager.
    #[test]
    fn real_matches_model_on_scenario() {
        let ops = [
            Operation::Register { user: 0 },
            Operation::Login { user: 0, correct_password: false },
            Operation::Login { user: 0, correct_password: true },
            Operation::PublishText { author: 0, text: SmallText { seed: 1, size_class: 1 } },
            Operation::PublishImage {
                author: 0,
                text: SmallText { seed: 2, size_class: 1 },
                with_url: false,
            },
            Operation::PublishQuote {
                author: 0,
                text: SmallText { seed: 3, size_class: 2 },
                quoted: 0,
            },
            Operation::Edit { id: 1, text: SmallText { seed: 4, size_class: 1 } },
            Operation::RepublishLast,
            Operation::Follow { follower: 0, target: 0 },
        ];

        let mut model = ModelWorld::default();
        let mut real = RealWorld::new(ManagerConfig::default());
        let results: Vec<_> = ops.iter().map(|op| (model.apply(op), real.apply(op))).collect();

        for (model_result, real_result) in &results {
            assert_eq!(model_result, real_result);
        }
        assert_eq!(
            results.iter().map(|(result, _)| *result).collect::<Vec<_>>(),
            vec![
                OperationResult::Ok,
                OperationResult::Error(ErrorKind::NotRegistered),
                OperationResult::Ok,
                OperationResult::Ok,
                OperationResult::Error(ErrorKind::MissingImageUrl),
                OperationResult::Ok,
                OperationResult::Error(ErrorKind::NotSupported),
                OperationResult::Error(ErrorKind::DuplicatePost),
                OperationResult::Error(ErrorKind::SelfFollow),
            ]
        );
        assert_eq!(model.observable_state(), real.observable_state());
    }
}
