//! See [`RegisterConsoleCommand`]

use super::{CommandObject, RegisteredConsoleCommands};
use bevy_ecs::prelude::*;
use bevy_log::prelude::*;

/// a struct to easily register a [`CommandObject`] for the console to use
pub struct RegisterConsoleCommand(Box<str>, CommandObject);

impl bevy_ecs::system::Command for RegisterConsoleCommand {
    fn apply(self, world: &mut World) {
        let previous = world
            .get_resource_or_insert_with(RegisteredConsoleCommands::default)
            .insert(self.0.clone(), self.1);

        if previous.is_some() {
            warn!("console command `{}` registered twice; keeping the latest", self.0);
        }
    }
}

impl RegisterConsoleCommand {
    /// create a registration command that will register `command` under `name`
    #[must_use]
    pub fn new(name: Box<str>, command: CommandObject) -> Self {
        Self(name, command)
    }
}
