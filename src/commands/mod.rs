// src/commands/mod.rs

//! Command handlers.
//!
//! Each resource module has pure builders (`*_input`) turning parsed flags
//! into request structs and async handlers that call the capability, render
//! the answer and map logical failure to [`Failure::AlreadyReported`].
//!
//! [`Failure::AlreadyReported`]: crate::error::Failure::AlreadyReported

/// Run a handler once per entry of [`testing::OUTCOMES`] and check what it
/// printed and returned. `$fake` builds the capability for an outcome.
#[cfg(test)]
macro_rules! assert_outcomes {
    ($prefix:literal, $fake:expr, |$api:ident, $out:ident| $call:expr) => {
        for expected in $crate::commands::testing::OUTCOMES {
            let $api = ($fake)(expected);
            let mut $out: Vec<u8> = Vec::new();
            let result = $call.await;
            expected.check(result, $out, $prefix);
        }
    };
}

mod channel;
mod completion;
mod graph;
mod notification;
mod pixel;
mod profile;
mod user;
mod webhook;

use crate::api::ClientFactory;
use crate::cli::{Command, DeleteArgs};

use anyhow::Result;
use std::io::Write;

/// Printed instead of deleting when `--delete-me` is missing.
pub const DELETE_WARNING: &str = "Specify the '--delete-me' flag to confirm the deletion.";

/// Dispatch a parsed command. Everything the command prints goes to `out`.
pub async fn run(command: Command, factory: &ClientFactory, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::User(cmd) => user::run(cmd, factory, out).await,
        Command::Profile(cmd) => profile::run(cmd, factory, out).await,
        Command::Graph(cmd) => graph::run(cmd, factory, out).await,
        Command::Pixel(cmd) => pixel::run(cmd, factory, out).await,
        Command::Channel(cmd) => channel::run(cmd, factory, out).await,
        Command::Notification(cmd) => notification::run(cmd, factory, out).await,
        Command::Webhook(cmd) => webhook::run(cmd, factory, out).await,
        Command::Completion { shell } => completion::run(shell, out),
    }
}

/// Deletion gate. Returns `false` after printing the warning when the
/// caller did not confirm.
fn confirmed(confirm: &DeleteArgs, out: &mut dyn Write) -> Result<bool> {
    if confirm.delete_me {
        return Ok(true);
    }

    tracing::debug!("deletion not confirmed, skipping request");
    writeln!(out, "{}", DELETE_WARNING)?;
    Ok(false)
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::api::fakes::{Canned, EnvelopeFake};
    use crate::error::is_reported;
    use crate::pixela::{Envelope, Reply};

    pub(crate) fn success() -> EnvelopeFake {
        Expected::Success.envelope_fake()
    }

    pub(crate) fn failure() -> EnvelopeFake {
        Expected::Reported.envelope_fake()
    }

    pub(crate) fn transport() -> EnvelopeFake {
        Expected::Transport.envelope_fake()
    }

    pub(crate) fn printed(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }

    pub(crate) const SUCCESS_LINE: &str =
        "{\"message\":\"Success.\",\"isSuccess\":true,\"isRejected\":false,\"statusCode\":200}\n";

    pub(crate) const FAILURE_LINE: &str =
        "{\"message\":\"Invalid request.\",\"isSuccess\":false,\"isRejected\":false,\"statusCode\":400}\n";

    /// `{:#}` rendering of a handler error, as `main` prints it.
    pub(crate) fn message(err: &anyhow::Error) -> String {
        format!("{:#}", err)
    }

    /// The three ways a call can end.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) enum Expected {
        /// Answer printed, exit 0.
        Success,
        /// `isSuccess: false` printed, then the sentinel.
        Reported,
        /// Nothing printed, error carries the command prefix.
        Transport,
    }

    pub(crate) const OUTCOMES: [Expected; 3] =
        [Expected::Success, Expected::Reported, Expected::Transport];

    impl Expected {
        pub(crate) fn envelope_fake(self) -> EnvelopeFake {
            let answer = match self {
                Expected::Success => Canned::Ok(Envelope::success("Success.")),
                Expected::Reported => Canned::Ok(Envelope::failure("Invalid request.", 400)),
                Expected::Transport => Canned::Transport,
            };
            EnvelopeFake::answering(answer)
        }

        /// Canned query answer matching this outcome.
        pub(crate) fn reply<T: Default>(self) -> Canned<Reply<T>> {
            match self {
                Expected::Success => Canned::Ok(Reply::Data(T::default())),
                Expected::Reported => {
                    Canned::Ok(Reply::Failure(Envelope::failure("Invalid request.", 400)))
                }
                Expected::Transport => Canned::Transport,
            }
        }

        pub(crate) fn check(self, result: anyhow::Result<()>, out: Vec<u8>, prefix: &str) {
            let out = printed(out);

            match self {
                Expected::Success => {
                    if let Err(err) = result {
                        panic!("{}: unexpected error {:#}", prefix, err);
                    }
                    assert!(out.ends_with('\n'), "{}: printed {:?}", prefix, out);
                    assert!(!out.contains("\"isSuccess\":false"), "{}: printed {:?}", prefix, out);
                }
                Expected::Reported => {
                    let err = result.expect_err(prefix);
                    assert!(is_reported(&err), "{}: {:#}", prefix, err);
                    assert!(out.contains("\"isSuccess\":false"), "{}: printed {:?}", prefix, out);
                    assert!(out.contains("\"statusCode\":400"), "{}: printed {:?}", prefix, out);
                }
                Expected::Transport => {
                    let err = result.expect_err(prefix);
                    assert!(!is_reported(&err), "{}: {:#}", prefix, err);
                    assert!(
                        message(&err).starts_with(&format!("{}:", prefix)),
                        "{}: {:#}",
                        prefix,
                        err
                    );
                    assert!(out.is_empty(), "{}: printed {:?}", prefix, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fakes::settings;
    use crate::cli::Cli;
    use clap::Parser;

    #[tokio::test]
    async fn unconfirmed_deletes_print_warning_without_a_request() {
        // The factory points at a closed port; a request would fail.
        let factory = ClientFactory::new(settings());

        for argv in [
            vec!["pa", "user", "delete"],
            vec!["pa", "graph", "delete", "--id", "g1"],
        ] {
            let cli = Cli::try_parse_from(argv).unwrap();
            let mut out = Vec::new();

            run(cli.command, &factory, &mut out).await.unwrap();

            assert_eq!(
                String::from_utf8(out).unwrap(),
                format!("{}\n", DELETE_WARNING)
            );
        }
    }
}
