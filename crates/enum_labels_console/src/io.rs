//! Console input and output during the game loop
//!
//! Input arrives as [`ConsoleInput`] events, one per submitted line. Commands answer with
//! [`Output`] events, which are collected into [`ConsoleHistory`] for whatever displays it.

use bevy_app::prelude::*;
use bevy_derive::Deref;
use bevy_ecs::prelude::*;
use bevy_log::prelude::*;

use super::{parse, RegisteredConsoleCommands};

/// A line of input submitted to the console
#[derive(Event, Debug, Clone, Deref)]
pub struct ConsoleInput(pub String);

/// events for a command to output to console
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// A string to write to the console.
    String(String),
    /// Tells the console that the current command has ended
    End,
}

/// Everything written to the console so far, one line per [`Output::String`]
#[derive(Resource, Debug, Default, Deref)]
pub struct ConsoleHistory(String);

impl ConsoleHistory {
    fn write(&mut self, string: &str) {
        if self.0.len() + string.len() > MAX_HISTORY_SIZE {
            warn!("max output size going to be exceeded; clearing buffer");
            self.0.clear();
        };

        self.0.push('\n');
        self.0.push_str(string);
    }
}

pub const MAX_HISTORY_SIZE: usize = 500;

/// run the command named by the first token of each input line
fn run_console_input(
    mut input: EventReader<ConsoleInput>,
    console_commands: Res<RegisteredConsoleCommands>,
    mut output: EventWriter<Output>,
    mut commands: Commands,
) {
    let mut write_output = |string: String| {
        output.send(Output::String(string));
        output.send(Output::End);
    };

    for line in input.iter() {
        trace!("console input `{}`", **line);

        let mut tokens = match parse(line) {
            Ok(tokens) => tokens,
            Err(error) => {
                write_output(format!("Error `{error}` in input `{}`", **line));
                continue;
            }
        };

        let Some(command) = tokens.pop_front() else {
            write_output("Please enter a command".into());
            continue;
        };

        match console_commands.get(command.string.as_str()) {
            Some(command_obj) => command_obj(tokens, &mut commands),
            None => write_output(format!("Command `{}` not found", command.string)),
        }
    }
}

fn collect_output(mut output: EventReader<Output>, mut history: ResMut<ConsoleHistory>) {
    for event in output.iter() {
        match event {
            Output::String(string) => history.write(string),
            Output::End => trace!("console command ended"),
        }
    }
}

pub(super) struct Plugin;
impl bevy_app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ConsoleHistory>()
            .add_event::<ConsoleInput>()
            .add_event::<Output>()
            .add_systems(Update, run_console_input)
            .add_systems(PostUpdate, collect_output);
    }
}
