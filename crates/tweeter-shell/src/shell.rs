//! Interactive shell over a [`TweetManager`].
//!
//! The shell is line-in, lines-out: [`Shell::handle_line`] never touches
//! stdio, so the binary owns the terminal and tests drive the shell
//! directly.

use thiserror::Error;
use tweeter_core::{Environment, ManagerConfig, Tweet, TweetId, TweetManager, TweeterError, User};

use crate::command::{Command, HELP, ParseError};

/// Errors reported by the shell.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The line could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The engine rejected the operation.
    #[error("{op}: {source}")]
    Operation {
        /// Command name
        op: &'static str,
        /// Engine error
        #[source]
        source: TweeterError,
    },
}

/// Result of handling one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Output lines to print; may be empty.
    Lines(Vec<String>),
    /// The user asked to leave.
    Exit,
}

impl Reply {
    fn line(line: impl Into<String>) -> Self {
        Self::Lines(vec![line.into()])
    }
}

/// Command interpreter owning one manager.
#[derive(Debug)]
pub struct Shell<E>
where
    E: Environment,
{
    manager: TweetManager<E>,
}

impl<E> Shell<E>
where
    E: Environment,
{
    /// Create a shell over a fresh manager.
    pub fn new(env: E, config: ManagerConfig) -> Self {
        Self { manager: TweetManager::with_config(env, config) }
    }

    /// Underlying manager.
    pub fn manager(&self) -> &TweetManager<E> {
        &self.manager
    }

    /// Parse and execute one line.
    ///
    /// Errors become a single `error: ...` line; a blank line produces no
    /// output.
    pub fn handle_line(&mut self, line: &str) -> Reply {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(ParseError::Empty) => return Reply::Lines(Vec::new()),
            Err(e) => return Reply::line(format!("error: {}", ShellError::from(e))),
        };

        match self.execute(command) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::debug!(error = %e, "command failed");
                Reply::line(format!("error: {e}"))
            },
        }
    }

    /// Execute a parsed command.
    ///
    /// # Errors
    ///
    /// Returns `ShellError::Operation` carrying the command name and the
    /// engine error.
    pub fn execute(&mut self, command: Command) -> Result<Reply, ShellError> {
        let op = command.name();
        self.run(command).map_err(|source| ShellError::Operation { op, source })
    }

    fn run(&mut self, command: Command) -> Result<Reply, TweeterError> {
        let manager = &mut self.manager;

        let reply = match command {
            Command::Register { name, password } => {
                manager.register(&User::new(name.as_str(), password))?;
                Reply::line(format!("registered @{name}"))
            },
            Command::Login { name, password } => {
                manager.login(&User::new(name.as_str(), password))?;
                Reply::line(format!("logged in as @{name}"))
            },
            Command::Logout => {
                let name = manager.current_user()?.to_string();
                manager.logout()?;
                Reply::line(format!("logged out @{name}"))
            },
            Command::WhoAmI => Reply::line(format!("@{}", manager.current_user()?)),
            Command::Tweet { text } => {
                let author = manager.current_user()?.to_string();
                let tweet = manager.compose_text(&author, &text)?;
                published(manager.publish_tweet(tweet)?)
            },
            Command::Image { url, text } => {
                let author = manager.current_user()?.to_string();
                let tweet = manager.compose_image(&author, &text, &url)?;
                published(manager.publish_tweet(tweet)?)
            },
            Command::Quote { id, text } => {
                let author = manager.current_user()?.to_string();
                let tweet = manager.compose_quote(&author, &text, id)?;
                published(manager.publish_tweet(tweet)?)
            },
            Command::Show { id } => render_all([manager.get_tweet_by_id(id)?]),
            Command::Latest => render_all([manager.get_latest_tweet()?]),
            Command::Timeline { user: Some(user) } => {
                render_all(manager.get_timeline_for_user(&user)?)
            },
            Command::Timeline { user: None } => render_all(manager.get_timeline()?),
            Command::Edit { id, text } => {
                manager.edit_tweet_by_id(id, &text)?;
                Reply::line(format!("edited tweet {id}"))
            },
            Command::Delete { id } => {
                manager.delete_tweet_by_id(id)?;
                Reply::line(format!("deleted tweet {id}"))
            },
            Command::Follow { user } => {
                manager.follow_current(&user)?;
                Reply::line(format!("following @{user}"))
            },
            Command::Following => {
                let current = manager.current_user()?;
                let names = manager.registry().following(current);
                if names.is_empty() {
                    Reply::line("(not following anyone)")
                } else {
                    Reply::Lines(names.iter().map(|name| format!("@{name}")).collect())
                }
            },
            Command::Help => Reply::Lines(HELP.lines().map(str::to_string).collect()),
            Command::Exit => Reply::Exit,
        };

        Ok(reply)
    }
}

fn published(id: TweetId) -> Reply {
    Reply::line(format!("published tweet {id}"))
}

/// One or more lines per tweet (image and quote bodies add a line).
fn render_all<'a>(tweets: impl IntoIterator<Item = &'a Tweet>) -> Reply {
    let lines: Vec<String> = tweets
        .into_iter()
        .flat_map(|tweet| tweet.render().lines().map(str::to_string).collect::<Vec<_>>())
        .collect();

    if lines.is_empty() { Reply::line("(no tweets)") } else { Reply::Lines(lines) }
}
