//! The real manager behind the model's interface.

use std::time::Duration;

use tweeter_core::{ManagerConfig, Tweet, TweetManager, TweeterResult, User};

use crate::{
    model::{
        NUM_USERS, ObservableState, Operation, OperationResult, WRONG_PASSWORD, tweet_id,
        user_name, user_password, user_slot,
    },
    sim_env::SimEnv,
};

/// Real system wrapper that mirrors [`crate::ModelWorld`]'s interface.
#[derive(Debug)]
pub struct RealWorld {
    manager: TweetManager<SimEnv>,
    /// Handle on the manager's clock.
    env: SimEnv,
    /// Copy of the most recently composed tweet, for `RepublishLast`.
    last_composed: Option<Tweet>,
}

impl RealWorld {
    /// Wrap a fresh manager.
    pub fn new(config: ManagerConfig) -> Self {
        let env = SimEnv::new();
        Self {
            manager: TweetManager::with_config(env.clone(), config),
            env,
            last_composed: None,
        }
    }

    /// The wrapped manager.
    pub fn manager(&self) -> &TweetManager<SimEnv> {
        &self.manager
    }

    /// Apply an operation and return the result.
    pub fn apply(&mut self, op: &Operation) -> OperationResult {
        match op {
            Operation::Register { user } => {
                let slot = user_slot(*user);
                self.manager.register(&User::new(user_name(slot), user_password(slot))).into()
            },
            Operation::Login { user, correct_password } => {
                let slot = user_slot(*user);
                let password = if *correct_password {
                    user_password(slot)
                } else {
                    WRONG_PASSWORD.to_string()
                };
                self.manager.login(&User::new(user_name(slot), password)).into()
            },
            Operation::Logout => self.manager.logout().into(),
            Operation::PublishText { author, text } => {
                let author = user_name(user_slot(*author));
                let composed = self.manager.compose_text(&author, &text.to_text());
                self.publish_composed(composed)
            },
            Operation::PublishImage { author, text, with_url } => {
                let author = user_name(user_slot(*author));
                let url = if *with_url { "https://img.example/1.png" } else { "" };
                let composed = self.manager.compose_image(&author, &text.to_text(), url);
                self.publish_composed(composed)
            },
            Operation::PublishQuote { author, text, quoted } => {
                let author = user_name(user_slot(*author));
                let composed =
                    self.manager.compose_quote(&author, &text.to_text(), tweet_id(*quoted));
                self.publish_composed(composed)
            },
            Operation::RepublishLast => match self.last_composed.clone() {
                Some(tweet) => self.manager.publish_tweet(tweet).into(),
                None => OperationResult::Ok,
            },
            Operation::Edit { id, text } => {
                self.manager.edit_tweet_by_id(tweet_id(*id), &text.to_text()).into()
            },
            Operation::Delete { id } => self.manager.delete_tweet_by_id(tweet_id(*id)).into(),
            Operation::Follow { follower, target } => self
                .manager
                .follow(&user_name(user_slot(*follower)), &user_name(user_slot(*target)))
                .into(),
            Operation::Latest => self.manager.get_latest_tweet().into(),
            Operation::AdvanceTime { secs } => {
                self.env.advance(Duration::from_secs(u64::from(*secs)));
                OperationResult::Ok
            },
        }
    }

    fn publish_composed(&mut self, composed: TweeterResult<Tweet>) -> OperationResult {
        match composed {
            Ok(tweet) => {
                self.last_composed = Some(tweet.clone());
                self.manager.publish_tweet(tweet).into()
            },
            Err(e) => OperationResult::Error(e.kind()),
        }
    }

    /// Extract observable state for comparison.
    pub fn observable_state(&self) -> ObservableState {
        let timelines = (0..NUM_USERS)
            .map(|slot| {
                self.manager.get_timeline_for_user(&user_name(slot)).ok().map(|tweets| {
                    tweets.iter().map(|t| (t.id(), t.text().to_string())).collect()
                })
            })
            .collect();

        let following = (0..NUM_USERS)
            .map(|slot| {
                self.manager
                    .registry()
                    .following(&user_name(slot))
                    .iter()
                    .filter_map(|name| slot_of(name))
                    .collect()
            })
            .collect();

        let current_user = self.manager.current_user().ok().and_then(slot_of);
        let aggregated = self
            .manager
            .get_timeline()
            .ok()
            .map(|tweets| tweets.iter().map(|t| t.id()).collect());

        ObservableState { current_user, timelines, following, aggregated }
    }
}

fn slot_of(name: &str) -> Option<usize> {
    (0..NUM_USERS).find(|slot| user_name(*slot) == name)
}
