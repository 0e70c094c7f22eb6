//! The commands every console starts with: `echo`, plus `labels`, `label`, and `parse` for
//! querying the [`EnumLabels`] registry by type name.

use std::collections::VecDeque;

use bevy_ecs::prelude::*;
use enum_labels_core::{Case, EnumLabels, LabelError};

use crate::registration::RegisterConsoleCommand;
use crate::{Output, PrintStringCommand, Token};

fn echo_command(input: VecDeque<Token>, commands: &mut Commands) {
    commands.add(PrintStringCommand(
        input
            .iter()
            .map(|i| i.string.as_str())
            .collect::<Vec<_>>()
            .join(" "),
    ));
}

/// write each line to the console, then end the command
fn print_lines(world: &mut World, lines: Vec<String>) {
    for line in lines {
        world.send_event(Output::String(line));
    }
    world.send_event(Output::End);
}

/// Run `query` against the registry and the enum named `type_name`, printing its lines
fn query_labels<F>(commands: &mut Commands, type_name: String, query: F)
where
    F: FnOnce(&EnumLabels, enum_labels_core::EnumType) -> Result<Vec<String>, LabelError>
        + Send
        + 'static,
{
    commands.add(move |world: &mut World| {
        let lines = match world.get_resource::<EnumLabels>() {
            None => vec!["No label registry installed".to_string()],
            Some(labels) => match labels.find_type(&type_name) {
                None => vec![format!("Unknown enum `{type_name}`")],
                Some(enum_type) => {
                    query(labels, enum_type).unwrap_or_else(|e| vec![e.to_string()])
                }
            },
        };

        print_lines(world, lines);
    });
}

/// labels <Type>
fn labels_command(mut input: VecDeque<Token>, commands: &mut Commands) {
    let len = input.len();
    let (1, Some(Token { string: type_name })) = (len, input.pop_front()) else {
        commands.add(PrintStringCommand(format!(
            "Wrong amount of inputs. Expected 1, got {len}"
        )));
        return;
    };

    query_labels(commands, type_name, |labels, enum_type| {
        let members = labels.all_labeled_members_dyn(enum_type)?;

        Ok(if members.is_empty() {
            vec![format!("`{}` declares no labels", enum_type.short_name())]
        } else {
            members
                .into_iter()
                .map(|(value, label)| format!("{value}: {label}"))
                .collect()
        })
    });
}

/// label <Type> <value>
fn label_command(mut input: VecDeque<Token>, commands: &mut Commands) {
    let len = input.len();
    let (2, Some(Token { string: type_name }), Some(Token { string: value })) =
        (len, input.pop_front(), input.pop_front())
    else {
        commands.add(PrintStringCommand(format!(
            "Wrong amount of inputs. Expected 2, got {len}"
        )));
        return;
    };

    let value = match value.parse::<i64>() {
        Ok(value) => value,
        Err(e) => {
            commands.add(PrintStringCommand(format!("Parsing error `{e}`")));
            return;
        }
    };

    query_labels(commands, type_name, move |labels, enum_type| {
        Ok(vec![match labels.label_dyn(enum_type, value)? {
            Some(label) => label.to_string(),
            None => format!("{value} has no label"),
        }])
    });
}

/// parse <Type> <label> [-i]
fn parse_command(mut input: VecDeque<Token>, commands: &mut Commands) {
    let case = match input.back() {
        Some(flag) if input.len() == 3 && flag.string == "-i" => Case::Insensitive,
        _ => Case::Sensitive,
    };

    let len = input.len();
    let expected = if case == Case::Insensitive { 3 } else { 2 };
    let (true, Some(Token { string: type_name }), Some(Token { string: label })) =
        (len == expected, input.pop_front(), input.pop_front())
    else {
        commands.add(PrintStringCommand(format!(
            "Wrong amount of inputs. Expected `parse <Type> <label> [-i]`, got {len} inputs"
        )));
        return;
    };

    query_labels(commands, type_name, move |labels, enum_type| {
        Ok(vec![match labels.parse_dyn(enum_type, &label, case)? {
            Some(member) => format!(
                "{}::{} ({})",
                enum_type.short_name(),
                member.name,
                member.value
            ),
            None => format!("No member labeled `{label}`"),
        }])
    });
}

pub(super) fn setup_label_commands(mut commands: Commands) {
    // register each command in this array
    for to_register in [
        RegisterConsoleCommand::new("echo".into(), echo_command),
        RegisterConsoleCommand::new("labels".into(), labels_command),
        RegisterConsoleCommand::new("label".into(), label_command),
        RegisterConsoleCommand::new("parse".into(), parse_command),
    ] {
        commands.add(to_register);
    }
}
