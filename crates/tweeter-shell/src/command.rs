//! Command line parsing.
//!
//! One command per line. The first word selects the command; commands that
//! take free text (`tweet`, `image`, `quote`, `edit`) use everything after
//! their fixed arguments verbatim, internal whitespace included.

use thiserror::Error;
use tweeter_core::TweetId;

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `register <name> <password>`
    Register {
        /// User name
        name: String,
        /// Password
        password: String,
    },
    /// `login <name> <password>`
    Login {
        /// User name
        name: String,
        /// Password
        password: String,
    },
    /// `logout`
    Logout,
    /// `whoami`
    WhoAmI,
    /// `tweet <text...>`
    Tweet {
        /// Tweet text
        text: String,
    },
    /// `image <url> <text...>`
    Image {
        /// Image location
        url: String,
        /// Caption
        text: String,
    },
    /// `quote <id> <text...>`
    Quote {
        /// Tweet being quoted
        id: TweetId,
        /// Comment
        text: String,
    },
    /// `show <id>`
    Show {
        /// Tweet to display
        id: TweetId,
    },
    /// `latest`
    Latest,
    /// `timeline [<user>]`
    Timeline {
        /// Show only this user's tweets instead of the aggregated timeline
        user: Option<String>,
    },
    /// `edit <id> <text...>`
    Edit {
        /// Tweet to edit
        id: TweetId,
        /// New text
        text: String,
    },
    /// `delete <id>`
    Delete {
        /// Tweet to delete
        id: TweetId,
    },
    /// `follow <user>`
    Follow {
        /// User to follow
        user: String,
    },
    /// `following`
    Following,
    /// `help`
    Help,
    /// `exit` or `quit`
    Exit,
}

/// Errors from parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Blank line.
    #[error("empty command")]
    Empty,

    /// First word is not a known command.
    #[error("unknown command '{0}', type 'help' to see commands")]
    UnknownCommand(String),

    /// A required argument is missing.
    #[error("{command}: missing <{argument}>")]
    MissingArgument {
        /// Command being parsed
        command: &'static str,
        /// Name of the missing argument
        argument: &'static str,
    },

    /// A tweet id argument is not a number.
    #[error("'{0}' is not a tweet id")]
    InvalidId(String),

    /// Arguments given to a command that takes fewer.
    #[error("{command}: unexpected argument '{argument}'")]
    UnexpectedArgument {
        /// Command being parsed
        command: &'static str,
        /// First extra argument
        argument: String,
    },
}

/// Usage summary printed by `help`.
pub const HELP: &str = "\
register <name> <password>   register a new user
login <name> <password>      log in
logout                       log out
whoami                       show the logged-in user
tweet <text...>              publish a text tweet
image <url> <text...>        publish an image tweet
quote <id> <text...>         publish a quote of tweet <id>
show <id>                    show tweet <id>
latest                       show the latest tweet
timeline [<user>]            your timeline, or <user>'s tweets
edit <id> <text...>          change the text of one of your tweets
delete <id>                  delete one of your tweets
follow <user>                follow <user>
following                    list who you follow
help                         this help
exit | quit                  leave";

/// Split off the first whitespace-delimited word.
fn next_word(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    match input.find(char::is_whitespace) {
        Some(end) => Some((&input[..end], &input[end..])),
        None => Some((input, "")),
    }
}

struct Args<'a> {
    command: &'static str,
    rest: &'a str,
}

impl<'a> Args<'a> {
    fn word(&mut self, argument: &'static str) -> Result<&'a str, ParseError> {
        let (word, rest) = next_word(self.rest)
            .ok_or(ParseError::MissingArgument { command: self.command, argument })?;
        self.rest = rest;
        Ok(word)
    }

    fn optional_word(&mut self) -> Option<&'a str> {
        let (word, rest) = next_word(self.rest)?;
        self.rest = rest;
        Some(word)
    }

    fn id(&mut self) -> Result<TweetId, ParseError> {
        let word = self.word("id")?;
        word.parse().map_err(|_| ParseError::InvalidId(word.to_string()))
    }

    /// Everything left, minus the separating whitespace. May be empty; the
    /// engine reports empty tweet text itself.
    fn text(self) -> String {
        self.rest.trim_start().trim_end_matches(['\r', '\n']).to_string()
    }

    fn finish(mut self) -> Result<(), ParseError> {
        match self.optional_word() {
            Some(extra) => Err(ParseError::UnexpectedArgument {
                command: self.command,
                argument: extra.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl Command {
    /// Parse one input line.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Empty` for blank lines and the other variants for
    /// malformed input.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let (name, rest) = next_word(line).ok_or(ParseError::Empty)?;

        let command: &'static str = match name {
            "register" => "register",
            "login" => "login",
            "logout" => "logout",
            "whoami" => "whoami",
            "tweet" => "tweet",
            "image" => "image",
            "quote" => "quote",
            "show" => "show",
            "latest" => "latest",
            "timeline" => "timeline",
            "edit" => "edit",
            "delete" => "delete",
            "follow" => "follow",
            "following" => "following",
            "help" => "help",
            "exit" | "quit" => "exit",
            other => return Err(ParseError::UnknownCommand(other.to_string())),
        };
        let mut args = Args { command, rest };

        let parsed = match command {
            "register" | "login" => {
                let name = args.word("name")?.to_string();
                let password = args.word("password")?.to_string();
                args.finish()?;
                if command == "register" {
                    Self::Register { name, password }
                } else {
                    Self::Login { name, password }
                }
            },
            "tweet" => Self::Tweet { text: args.text() },
            "image" => {
                let url = args.word("url")?.to_string();
                Self::Image { url, text: args.text() }
            },
            "quote" => {
                let id = args.id()?;
                Self::Quote { id, text: args.text() }
            },
            "edit" => {
                let id = args.id()?;
                Self::Edit { id, text: args.text() }
            },
            "show" | "delete" => {
                let id = args.id()?;
                args.finish()?;
                if command == "show" { Self::Show { id } } else { Self::Delete { id } }
            },
            "timeline" => {
                let user = args.optional_word().map(str::to_string);
                args.finish()?;
                Self::Timeline { user }
            },
            "follow" => {
                let user = args.word("user")?.to_string();
                args.finish()?;
                Self::Follow { user }
            },
            _ => {
                args.finish()?;
                match command {
                    "logout" => Self::Logout,
                    "whoami" => Self::WhoAmI,
                    "latest" => Self::Latest,
                    "following" => Self::Following,
                    "help" => Self::Help,
                    _ => Self::Exit,
                }
            },
        };

        Ok(parsed)
    }

    /// Name used when reporting errors for this command.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Register { .. } => "register",
            Self::Login { .. } => "login",
            Self::Logout => "logout",
            Self::WhoAmI => "whoami",
            Self::Tweet { .. } => "tweet",
            Self::Image { .. } => "image",
            Self::Quote { .. } => "quote",
            Self::Show { .. } => "show",
            Self::Latest => "latest",
            Self::Timeline { .. } => "timeline",
            Self::Edit { .. } => "edit",
            Self::Delete { .. } => "delete",
            Self::Follow { .. } => "follow",
            Self::Following => "following",
            Self::Help => "help",
            Self::Exit => "exit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_is_empty() {
        assert_eq!(Command::parse("   \n"), Err(ParseError::Empty));
    }

    #[test]
    fn parses_credentials() {
        assert_eq!(
            Command::parse("register root secret\n"),
            Ok(Command::Register { name: "root".into(), password: "secret".into() })
        );
        assert_eq!(
            Command::parse("login root secret"),
            Ok(Command::Login { name: "root".into(), password: "secret".into() })
        );
    }

    #[test]
    fn register_requires_password() {
        assert_eq!(
            Command::parse("register root"),
            Err(ParseError::MissingArgument { command: "register", argument: "password" })
        );
    }

    #[test]
    fn tweet_text_keeps_inner_whitespace() {
        assert_eq!(
            Command::parse("tweet hello   there world\r\n"),
            Ok(Command::Tweet { text: "hello   there world".into() })
        );
    }

    #[test]
    fn tweet_without_text_is_left_to_the_engine() {
        assert_eq!(Command::parse("tweet"), Ok(Command::Tweet { text: String::new() }));
    }

    #[test]
    fn parses_image_and_quote() {
        assert_eq!(
            Command::parse("image https://a.b/c.png look at this"),
            Ok(Command::Image { url: "https://a.b/c.png".into(), text: "look at this".into() })
        );
        assert_eq!(
            Command::parse("quote 3 so true"),
            Ok(Command::Quote { id: 3, text: "so true".into() })
        );
    }

    #[test]
    fn rejects_bad_ids() {
        assert_eq!(Command::parse("show abc"), Err(ParseError::InvalidId("abc".into())));
        assert_eq!(Command::parse("delete -1"), Err(ParseError::InvalidId("-1".into())));
        assert_eq!(
            Command::parse("edit"),
            Err(ParseError::MissingArgument { command: "edit", argument: "id" })
        );
    }

    #[test]
    fn timeline_user_is_optional() {
        assert_eq!(Command::parse("timeline"), Ok(Command::Timeline { user: None }));
        assert_eq!(
            Command::parse("timeline bob"),
            Ok(Command::Timeline { user: Some("bob".into()) })
        );
    }

    #[test]
    fn rejects_extra_arguments() {
        assert_eq!(
            Command::parse("logout now"),
            Err(ParseError::UnexpectedArgument { command: "logout", argument: "now".into() })
        );
    }

    #[test]
    fn unknown_command() {
        assert_eq!(Command::parse("retweet 1"), Err(ParseError::UnknownCommand("retweet".into())));
    }

    #[test]
    fn quit_is_exit() {
        assert_eq!(Command::parse("quit"), Ok(Command::Exit));
        assert_eq!(Command::parse("exit").map(|c| c.name()), Ok("exit"));
    }
}
