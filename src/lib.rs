//! Labels for enum members, for display and for parsing text back into members.
//!
//! ```
//! use enum_labels::{labeled_enum, Case, EnumLabels};
//!
//! labeled_enum! {
//!     pub enum Color {
//!         Red => "red-label",
//!         Green,
//!         Blue => "blue-label",
//!     }
//! }
//!
//! let labels = EnumLabels::new().with::<Color>();
//!
//! assert_eq!(labels.label(Color::Red), Some("red-label"));
//! assert_eq!(labels.label(Color::Green), None);
//! assert_eq!(labels.parse::<Color>("RED-LABEL", Case::Insensitive), Some(Color::Red));
//! assert_eq!(labels.all_labels::<Color>(), ["red-label", "blue-label"]);
//! ```
//!
//! In a bevy app, add [`LabelPlugins`] and take `Res<EnumLabels>` in systems.

#![warn(clippy::unwrap_used)]
#![warn(clippy::perf, clippy::disallowed_types)] // performance warns
#![warn(clippy::pedantic)]

pub use enum_labels_core::registration::RegisterLabeledEnum;
pub use enum_labels_core::{
    labeled_enum, Case, EnumLabels, EnumType, LabelError, LabeledEnum, LabeledMember,
    LabelsPlugin, Member,
};

#[cfg(feature = "developer-tools")]
pub use enum_labels_console as console;

/// The label registry, plus the developer console when built with `developer-tools`
pub struct LabelPlugins(pub LabelsPlugin);

impl bevy_app::Plugin for LabelPlugins {
    fn build(&self, app: &mut bevy_app::App) {
        app.add_plugins(self.0.clone());

        #[cfg(feature = "developer-tools")]
        app.add_plugins(enum_labels_console::Plugin);
    }
}
