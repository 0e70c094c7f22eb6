//! See [`RegisterLabeledEnum`]

use std::marker::PhantomData;

use bevy_ecs::prelude::*;

use crate::{EnumLabels, LabeledEnum};

/// a command to register `E` with the [`EnumLabels`] resource after startup, inserting the
/// resource if it doesn't exist yet
pub struct RegisterLabeledEnum<E>(PhantomData<fn() -> E>);

impl<E: LabeledEnum> bevy_ecs::system::Command for RegisterLabeledEnum<E> {
    fn apply(self, world: &mut World) {
        world
            .get_resource_or_insert_with(EnumLabels::default)
            .register::<E>();
    }
}

impl<E: LabeledEnum> RegisterLabeledEnum<E> {
    /// create a registration command that will register `E`
    #[must_use]
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<E: LabeledEnum> Default for RegisterLabeledEnum<E> {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn register_into<E: LabeledEnum>(labels: &mut EnumLabels) {
    labels.register::<E>();
}
