//! Systems, Resources, and commands implementing a small developer console for inspecting the
//! label registry at runtime.
//!
//! The console keeps a store of [`CommandObject`]s, which are registered through
//! [`registration::RegisterConsoleCommand`].
//!
//! [`io`] handles command input and output during the normal game loop, and [`commands`] holds
//! the commands that come with the console.

#![warn(clippy::unwrap_used)]
#![warn(clippy::perf, clippy::disallowed_types)] // performance warns
#![warn(clippy::pedantic)]
// most bevy systems violate these. Nothing I can do about it at the moment.
#![allow(
    clippy::type_complexity,
    clippy::too_many_arguments,
    clippy::needless_pass_by_value // TODO: separate out system functions from non-system
)]

pub mod commands;
pub mod io;
pub mod registration;

use std::collections::VecDeque;

use bevy_derive::{Deref, DerefMut};
use bevy_ecs::prelude::*;
use bevy_log::prelude::*;
use bevy_utils::HashMap;
use thiserror::Error;

pub use io::{ConsoleHistory, ConsoleInput, Output};


#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Token {
    pub string: String,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unexpected character at char {0}; We expected you to escape either a space, backslash, or quote")]
    EscapedIncorrectCharacter(usize),
    #[error("Input ended before closing all quotes.")]
    EndQuoted(),
    #[error("Input contains a backslash at end.")]
    EndEscaped(),
}

/// Parse commandline input. Splits up strings on spaces, with backslash and quote escaping
///
/// # Errors
/// Fails on a backslash that escapes anything but a space, backslash, or quote, and on input that
/// ends inside quotes or after a backslash.
pub fn parse(to_parse: &str) -> Result<VecDeque<Token>, ParseError> {
    trace!("parsing string `{}`", to_parse);

    let mut tokens: VecDeque<Token> = VecDeque::new();
    let mut cur_string = String::new();
    let mut is_backslash_escaped = false;
    let mut is_in_quotes = false;

    for (i, char) in to_parse.char_indices() {
        if is_backslash_escaped {
            match char {
                ' ' | '\\' | '"' => {
                    cur_string.push(char);
                    is_backslash_escaped = false;
                }
                _ => return Err(ParseError::EscapedIncorrectCharacter(i)),
            }
        } else if is_in_quotes {
            match char {
                '"' => is_in_quotes = false,
                '\\' => is_backslash_escaped = true,
                c => cur_string.push(c),
            }
        } else {
            match char {
                '\\' => is_backslash_escaped = true,
                '"' => is_in_quotes = true,
                ' ' => {
                    // runs of spaces don't produce empty tokens, but `""` does
                    if !cur_string.is_empty() || to_parse[..i].ends_with('"') {
                        tokens.push_back(Token { string: cur_string });
                    }
                    cur_string = String::new();
                }
                c => cur_string.push(c),
            }
        }
    }

    if is_backslash_escaped {
        return Err(ParseError::EndEscaped());
    } else if is_in_quotes {
        return Err(ParseError::EndQuoted());
    } else if !cur_string.is_empty() || to_parse.ends_with('"') {
        tokens.push_back(Token { string: cur_string });
    }

    trace!("{:?}", tokens);

    tokens.shrink_to_fit(); // you shouldn't really be pushing and pulling from it at all after
                            // this
    Ok(tokens)
}

/// A console command type-object for registration
pub type CommandObject = fn(VecDeque<Token>, &mut Commands);

/// A resource to store all registered Console commands
#[derive(Deref, DerefMut, Resource, Default)]
pub struct RegisteredConsoleCommands(HashMap<Box<str>, CommandObject>);

pub struct Plugin;
impl bevy_app::Plugin for Plugin {
    fn build(&self, app: &mut bevy_app::App) {
        app.init_resource::<RegisteredConsoleCommands>()
            .add_plugins(self::io::Plugin)
            .add_systems(bevy_app::Startup, commands::setup_label_commands);
    }
}

/// A command to print self.0 to the console
#[derive(Deref, DerefMut)]
pub struct PrintStringCommand(pub String);

impl bevy_ecs::system::Command for PrintStringCommand {
    fn apply(self, world: &mut World) {
        world.send_event(Output::String(self.0));
        world.send_event(Output::End);
    }
}
