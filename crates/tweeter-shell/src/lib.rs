//! Tweeter interactive shell.
//!
//! Line-oriented front end for [`tweeter_core::TweetManager`]. The library
//! half holds the command parser and interpreter; `src/main.rs` wires them to
//! stdin/stdout and sets up logging.
//!
//! ## Architecture
//!
//! ```text
//! stdin line ──> Command::parse ──> Shell::execute ──> TweetManager
//!                     │                   │
//!                     └─ ParseError       └─ ShellError { op, TweeterError }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod command;
pub mod shell;
pub mod system_env;

pub use command::{Command, HELP, ParseError};
pub use shell::{Reply, Shell, ShellError};
pub use system_env::SystemEnv;
