//! Model world.
//!
//! A deliberately naive reimplementation of the manager: vectors indexed by
//! user slot, linear scans, no shared types beyond error kinds. It is the
//! oracle the real implementation is checked against.

use tweeter_core::{ErrorKind, LatestTweetPolicy, MAX_TEXT_CHARS, TweetId, TweetKind};

use super::operation::{
    NUM_USERS, Operation, OperationResult, SmallText, tweet_id, user_slot,
};

/// Observable state for oracle comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservableState {
    /// Logged-in user slot.
    pub current_user: Option<usize>,
    /// Per-slot `(id, text)` timeline; `None` if the slot is unregistered.
    pub timelines: Vec<Option<Vec<(TweetId, String)>>>,
    /// Per-slot followed slots, in follow order.
    pub following: Vec<Vec<usize>>,
    /// Ids in the current user's aggregated timeline.
    pub aggregated: Option<Vec<TweetId>>,
}

/// A tweet as the model sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelTweet {
    /// Id.
    pub id: TweetId,
    /// Author slot.
    pub author: usize,
    /// Variant.
    pub kind: TweetKind,
    /// Current text.
    pub text: String,
}

/// Model world - the reference implementation.
#[derive(Debug, Clone)]
pub struct ModelWorld {
    policy: LatestTweetPolicy,
    /// Follow lists of registered slots.
    users: Vec<Option<Vec<usize>>>,
    timelines: Vec<Vec<ModelTweet>>,
    session: Option<usize>,
    next_id: TweetId,
    last_issued: Option<TweetId>,
    last_composed: Option<ModelTweet>,
    /// Ids published at least once.
    published: Vec<TweetId>,
}

impl Default for ModelWorld {
    fn default() -> Self {
        Self::new(LatestTweetPolicy::default())
    }
}

impl ModelWorld {
    /// Create an empty model using `policy` for latest-tweet lookups.
    pub fn new(policy: LatestTweetPolicy) -> Self {
        Self {
            policy,
            users: vec![None; NUM_USERS],
            timelines: vec![Vec::new(); NUM_USERS],
            session: None,
            next_id: 0,
            last_issued: None,
            last_composed: None,
            published: Vec::new(),
        }
    }

    /// Apply an operation and return the result.
    pub fn apply(&mut self, op: &Operation) -> OperationResult {
        match op {
            Operation::Register { user } => self.apply_register(user_slot(*user)),
            Operation::Login { user, correct_password } => {
                self.apply_login(user_slot(*user), *correct_password)
            },
            Operation::Logout => self.apply_logout(),
            Operation::PublishText { author, text } => self.apply_compose_and_publish(
                user_slot(*author),
                text,
                TweetKind::Text,
                true,
                None,
            ),
            Operation::PublishImage { author, text, with_url } => self.apply_compose_and_publish(
                user_slot(*author),
                text,
                TweetKind::Image,
                *with_url,
                None,
            ),
            Operation::PublishQuote { author, text, quoted } => self.apply_compose_and_publish(
                user_slot(*author),
                text,
                TweetKind::Quote,
                true,
                Some(tweet_id(*quoted)),
            ),
            Operation::RepublishLast => match self.last_composed.clone() {
                Some(tweet) => self.publish(tweet),
                None => OperationResult::Ok,
            },
            Operation::Edit { id, text } => self.apply_edit(tweet_id(*id), &text.to_text()),
            Operation::Delete { id } => self.apply_delete(tweet_id(*id)),
            Operation::Follow { follower, target } => {
                self.apply_follow(user_slot(*follower), user_slot(*target))
            },
            Operation::Latest => self.apply_latest(),
            Operation::AdvanceTime { .. } => OperationResult::Ok,
        }
    }

    /// Extract observable state for comparison.
    pub fn observable_state(&self) -> ObservableState {
        let timelines = (0..NUM_USERS)
            .map(|slot| {
                self.users[slot].as_ref().map(|_| {
                    self.timelines[slot].iter().map(|t| (t.id, t.text.clone())).collect()
                })
            })
            .collect();

        let following =
            self.users.iter().map(|user| user.clone().unwrap_or_default()).collect();

        let aggregated = self.session.map(|current| {
            let mut slots = vec![current];
            slots.extend(self.users[current].iter().flatten().copied());
            slots
                .into_iter()
                .flat_map(|slot| self.timelines[slot].iter().map(|t| t.id))
                .collect()
        });

        ObservableState { current_user: self.session, timelines, following, aggregated }
    }

    /// Number of stored tweets.
    pub fn tweet_count(&self) -> usize {
        self.timelines.iter().map(Vec::len).sum()
    }

    fn is_registered(&self, slot: usize) -> bool {
        self.users[slot].is_some()
    }

    fn find(&self, id: TweetId) -> Option<&ModelTweet> {
        self.timelines.iter().flatten().find(|t| t.id == id)
    }

    fn apply_register(&mut self, slot: usize) -> OperationResult {
        if self.is_registered(slot) {
            return OperationResult::Error(ErrorKind::AlreadyRegistered);
        }
        self.users[slot] = Some(Vec::new());
        OperationResult::Ok
    }

    fn apply_login(&mut self, slot: usize, correct_password: bool) -> OperationResult {
        if self.session.is_some() {
            return OperationResult::Error(ErrorKind::AlreadyLoggedIn);
        }
        if !self.is_registered(slot) || !correct_password {
            return OperationResult::Error(ErrorKind::NotRegistered);
        }
        self.session = Some(slot);
        OperationResult::Ok
    }

    fn apply_logout(&mut self) -> OperationResult {
        match self.session.take() {
            Some(_) => OperationResult::Ok,
            None => OperationResult::Error(ErrorKind::NotLoggedIn),
        }
    }

    fn validate(text: &str) -> Result<(), ErrorKind> {
        if text.is_empty() {
            return Err(ErrorKind::EmptyText);
        }
        if text.chars().count() > MAX_TEXT_CHARS {
            return Err(ErrorKind::TextTooLong);
        }
        Ok(())
    }

    fn apply_compose_and_publish(
        &mut self,
        author: usize,
        text: &SmallText,
        kind: TweetKind,
        with_url: bool,
        quoted: Option<TweetId>,
    ) -> OperationResult {
        let text = text.to_text();
        if let Err(kind) = Self::validate(&text) {
            return OperationResult::Error(kind);
        }
        if !with_url {
            return OperationResult::Error(ErrorKind::MissingImageUrl);
        }
        if let Some(quoted) = quoted
            && self.find(quoted).is_none()
        {
            return OperationResult::Error(ErrorKind::NotFound);
        }

        let id = self.next_id;
        self.next_id += 1;
        self.last_issued = Some(id);

        let tweet = ModelTweet { id, author, kind, text };
        self.last_composed = Some(tweet.clone());
        self.publish(tweet)
    }

    fn publish(&mut self, tweet: ModelTweet) -> OperationResult {
        if self.session != Some(tweet.author) {
            return OperationResult::Error(ErrorKind::NotAuthenticated);
        }
        if self.published.contains(&tweet.id) {
            return OperationResult::Error(ErrorKind::DuplicatePost);
        }
        self.published.push(tweet.id);
        self.timelines[tweet.author].push(tweet);
        OperationResult::Ok
    }

    fn authorize_owner(&self, id: TweetId) -> Result<usize, ErrorKind> {
        let owner = self.find(id).ok_or(ErrorKind::NotFound)?.author;
        let current = self.session.ok_or(ErrorKind::NotAuthenticated)?;
        if owner != current {
            return Err(ErrorKind::NotOwner);
        }
        Ok(owner)
    }

    fn apply_edit(&mut self, id: TweetId, text: &str) -> OperationResult {
        let owner = match self.authorize_owner(id) {
            Ok(owner) => owner,
            Err(kind) => return OperationResult::Error(kind),
        };

        let Some(tweet) = self.timelines[owner].iter_mut().find(|t| t.id == id) else {
            return OperationResult::Error(ErrorKind::NotFound);
        };
        if tweet.kind != TweetKind::Text {
            return OperationResult::Error(ErrorKind::NotSupported);
        }
        if let Err(kind) = Self::validate(text) {
            return OperationResult::Error(kind);
        }
        tweet.text = text.to_string();
        OperationResult::Ok
    }

    fn apply_delete(&mut self, id: TweetId) -> OperationResult {
        match self.authorize_owner(id) {
            Ok(owner) => {
                self.timelines[owner].retain(|t| t.id != id);
                OperationResult::Ok
            },
            Err(kind) => OperationResult::Error(kind),
        }
    }

    fn apply_follow(&mut self, follower: usize, target: usize) -> OperationResult {
        if !self.is_registered(target) {
            return OperationResult::Error(ErrorKind::UserNotFound);
        }
        if follower == target {
            return OperationResult::Error(ErrorKind::SelfFollow);
        }
        let Some(following) = self.users[follower].as_mut() else {
            return OperationResult::Error(ErrorKind::UserNotFound);
        };
        if following.contains(&target) {
            return OperationResult::Error(ErrorKind::AlreadyFollowing);
        }
        following.push(target);
        OperationResult::Ok
    }

    fn apply_latest(&self) -> OperationResult {
        let id = match self.policy {
            LatestTweetPolicy::LastIssuedId => self.last_issued,
            LatestTweetPolicy::HighestStoredId => {
                self.timelines.iter().flatten().map(|t| t.id).max()
            },
        };
        match id.and_then(|id| self.find(id)) {
            Some(_) => OperationResult::Ok,
            None => OperationResult::Error(ErrorKind::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(seed: u8) -> SmallText {
        SmallText { seed, size_class: 1 }
    }

    #[test]
    fn publish_requires_login_but_consumes_id() {
        let mut model = ModelWorld::default();
        model.apply(&Operation::Register { user: 0 });

        let result = model.apply(&Operation::PublishText { author: 0, text: text(1) });
        assert_eq!(result, OperationResult::Error(ErrorKind::NotAuthenticated));

        model.apply(&Operation::Login { user: 0, correct_password: true });
        model.apply(&Operation::PublishText { author: 0, text: text(2) });

        let state = model.observable_state();
        assert_eq!(state.timelines[0], Some(vec![(1, "tweet 2".to_string())]));
    }

    #[test]
    fn invalid_text_does_not_consume_id() {
        let mut model = ModelWorld::default();
        model.apply(&Operation::Register { user: 0 });
        model.apply(&Operation::Login { user: 0, correct_password: true });

        let empty = SmallText { seed: 0, size_class: 0 };
        let result = model.apply(&Operation::PublishText { author: 0, text: empty });
        assert_eq!(result, OperationResult::Error(ErrorKind::EmptyText));

        model.apply(&Operation::PublishText { author: 0, text: text(3) });
        assert_eq!(model.observable_state().aggregated, Some(vec![0]));
    }

    #[test]
    fn republish_is_duplicate() {
        let mut model = ModelWorld::default();
        model.apply(&Operation::Register { user: 0 });
        model.apply(&Operation::Login { user: 0, correct_password: true });
        model.apply(&Operation::PublishText { author: 0, text: text(1) });

        let result = model.apply(&Operation::RepublishLast);
        assert_eq!(result, OperationResult::Error(ErrorKind::DuplicatePost));
        assert_eq!(model.tweet_count(), 1);
    }

    #[test]
    fn deleted_tweet_cannot_be_republished() {
        let mut model = ModelWorld::default();
        model.apply(&Operation::Register { user: 0 });
        model.apply(&Operation::Login { user: 0, correct_password: true });
        model.apply(&Operation::PublishText { author: 0, text: text(1) });
        model.apply(&Operation::Delete { id: 0 });

        let result = model.apply(&Operation::RepublishLast);
        assert_eq!(result, OperationResult::Error(ErrorKind::DuplicatePost));
        assert_eq!(model.tweet_count(), 0);
    }

    #[test]
    fn aggregated_timeline_is_own_then_followed() {
        let mut model = ModelWorld::default();
        for user in 0..2 {
            model.apply(&Operation::Register { user });
        }
        model.apply(&Operation::Login { user: 1, correct_password: true });
        model.apply(&Operation::PublishText { author: 1, text: text(1) });
        model.apply(&Operation::Logout);
        model.apply(&Operation::Login { user: 0, correct_password: true });
        model.apply(&Operation::PublishText { author: 0, text: text(2) });
        model.apply(&Operation::Follow { follower: 0, target: 1 });

        assert_eq!(model.observable_state().aggregated, Some(vec![1, 0]));
    }
}
