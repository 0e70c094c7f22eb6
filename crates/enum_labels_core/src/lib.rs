//! Labels for enum members: declaration, lookup, parsing, and caching
//!
//! Declare an enum and its labels with [`labeled_enum!`], register it through [`LabelsPlugin`],
//! then take `Res<EnumLabels>` in any system that needs to display or parse labels.
//!
//! Almost every other crate will depend on this crate.

#![warn(clippy::unwrap_used)]
#![warn(clippy::perf, clippy::disallowed_types)] // performance warns
#![warn(clippy::pedantic)]
// most bevy systems violate these. Nothing I can do about it at the moment.
#![allow(
    clippy::type_complexity,
    clippy::too_many_arguments,
    clippy::needless_pass_by_value // TODO: separate out system functions from non-system
)]

pub mod labeled;
pub mod registration;
pub mod registry;

pub use labeled::{LabeledEnum, Member};
pub use registry::{Case, EnumLabels, EnumType, LabelError, LabeledMember};

#[cfg(test)]
mod test;

/// Inserts the [`EnumLabels`] resource, with every enum given through [`LabelsPlugin::with`]
/// registered.
///
/// Several of these may be added to one app; they all register into the same resource.
#[derive(Default, Clone)]
pub struct LabelsPlugin {
    registrations: Vec<fn(&mut EnumLabels)>,
}

impl LabelsPlugin {
    #[must_use]
    pub fn with<E: LabeledEnum>(mut self) -> Self {
        self.registrations.push(registration::register_into::<E>);
        self
    }
}

impl bevy_app::Plugin for LabelsPlugin {
    fn build(&self, app: &mut bevy_app::App) {
        let mut labels = app
            .world
            .remove_resource::<EnumLabels>()
            .unwrap_or_default();

        for register in &self.registrations {
            register(&mut labels);
        }

        app.insert_resource(labels);
    }

    fn is_unique(&self) -> bool {
        false
    }
}

/// A plugin that sets up things that nearly every system expects to exist, for quick test setup
pub mod test_utils {
    pub struct DefaultTestPlugin;

    use crate::EnumLabels;
    use bevy_app::prelude::*;
    use bevy_ecs::prelude::*;
    use bevy_log::prelude::*;

    impl Plugin for DefaultTestPlugin {
        fn build(&self, app: &mut App) {
            // log every change to the registry so failing tests show what was registered
            app.add_systems(Last, |labels: Option<Res<EnumLabels>>| {
                if let Some(labels) = labels.filter(|l| l.is_changed()) {
                    labels.registered_types().for_each(|t| {
                        debug!("`{}` is registered", t.name());
                    });
                }
            });

            app.add_plugins(bevy_log::LogPlugin::default());
        }
    }
}
