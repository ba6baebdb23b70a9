//! Users and the follow graph.
//!
//! The registry is the single owner of user records. Callers hand in a
//! [`User`] to register it, but every later mutation (following) goes through
//! the registry by name, so there is never a stale caller-side copy that
//! diverges from the stored one.

use std::collections::HashMap;

use crate::error::{RegistrationError, RelationshipError};

/// A registered (or about to be registered) user.
///
/// # Security
///
/// - **Debug Redaction**: The `Debug` impl redacts `password` so that
///   credentials never end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    name: String,
    password: String,
    following: Vec<String>,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("name", &self.name)
            .field("password", &format!("<redacted {} bytes>", self.password.len()))
            .field("following", &self.following)
            .finish()
    }
}

impl User {
    /// Create a user with the given credentials, following nobody.
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self { name: name.into(), password: password.into(), following: Vec::new() }
    }

    /// User name (identity key).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Users this user follows, in the order they were followed.
    pub fn following(&self) -> &[String] {
        &self.following
    }

    /// Check whether this user follows `name`.
    pub fn is_following(&self, name: &str) -> bool {
        self.following.iter().any(|followed| followed == name)
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    /// Credentials match bit-for-bit.
    pub fn has_password(&self, password: &str) -> bool {
        self.password == password
    }
}

/// Registered users, keyed by name.
#[derive(Debug, Default, Clone)]
pub struct UserRegistry {
    users: HashMap<String, User>,
}

impl UserRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user.
    ///
    /// The stored record keeps the name and password only; it starts out
    /// following nobody regardless of the `following` list of `user`.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationError::InvalidName` for an empty name,
    /// `RegistrationError::InvalidPassword` for an empty password and
    /// `RegistrationError::AlreadyRegistered` if the name is taken.
    pub fn register(&mut self, user: &User) -> Result<(), RegistrationError> {
        if user.name.is_empty() {
            return Err(RegistrationError::InvalidName);
        }
        if user.password.is_empty() {
            return Err(RegistrationError::InvalidPassword);
        }
        if self.is_registered(&user.name) {
            return Err(RegistrationError::AlreadyRegistered(user.name.clone()));
        }

        self.users.insert(user.name.clone(), User::new(&*user.name, &*user.password));
        Ok(())
    }

    /// Check if a name is registered. The password is not compared.
    pub fn is_registered(&self, name: &str) -> bool {
        self.users.contains_key(name)
    }

    /// Check that `name` is registered with exactly this password.
    pub fn authenticate(&self, name: &str, password: &str) -> bool {
        self.users.get(name).is_some_and(|user| user.has_password(password))
    }

    /// Registered user by name.
    pub fn get(&self, name: &str) -> Option<&User> {
        self.users.get(name)
    }

    /// Add `target` to the users `follower` follows.
    ///
    /// # Errors
    ///
    /// Returns `RelationshipError::UserNotFound` if either user is unknown,
    /// `RelationshipError::SelfFollow` if they are the same user and
    /// `RelationshipError::AlreadyFollowing` if the edge already exists.
    pub fn follow(&mut self, follower: &str, target: &str) -> Result<(), RelationshipError> {
        if !self.is_registered(target) {
            return Err(RelationshipError::UserNotFound(target.to_string()));
        }
        if follower == target {
            return Err(RelationshipError::SelfFollow);
        }

        let user = self
            .users
            .get_mut(follower)
            .ok_or_else(|| RelationshipError::UserNotFound(follower.to_string()))?;

        if user.is_following(target) {
            return Err(RelationshipError::AlreadyFollowing(target.to_string()));
        }

        user.following.push(target.to_string());
        Ok(())
    }

    /// Users `name` follows, in follow order. Empty for unknown users.
    pub fn following(&self, name: &str) -> &[String] {
        self.users.get(name).map(User::following).unwrap_or_default()
    }

    /// Number of registered users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether no users are registered.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
