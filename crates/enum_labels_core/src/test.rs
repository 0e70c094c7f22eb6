//! Tests for the label registry and its plugin

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;

use crate::registration::RegisterLabeledEnum;
use crate::test_utils::DefaultTestPlugin;
use crate::{Case, EnumLabels, EnumType, LabelError, LabeledEnum, LabelsPlugin};

crate::labeled_enum! {
    enum Color {
        Red => "red-label",
        Green,
        Blue => "blue-label",
    }
}

crate::labeled_enum! {
    #[repr(u8)]
    pub(crate) enum Facing {
        North = 10 => "N",
        East => "E",
        South = 30,
        West => "W",
    }
}

crate::labeled_enum! {
    enum Weather {
        Sunny => "Ensoleillé",
        Rainy => "pluie",
        /// reuses a label on purpose
        Drizzle => "pluie",
    }
}

fn registry() -> EnumLabels {
    EnumLabels::new()
        .with::<Color>()
        .with::<Facing>()
        .with::<Weather>()
}

#[test]
fn declared_labels_resolve() {
    let labels = registry();

    assert_eq!(labels.label(Color::Red), Some("red-label"));
    assert_eq!(labels.label(Color::Blue), Some("blue-label"));
    assert_eq!(labels.label(Facing::West), Some("W"));
}

#[test]
fn undeclared_label_is_absent() {
    let labels = registry();

    assert_eq!(labels.label(Color::Green), None);
    assert_eq!(labels.label(Facing::South), None);
}

#[test]
fn parse_finds_declaring_member() {
    let labels = registry();

    for member in Color::MEMBERS {
        if let Some(label) = member.label {
            let parsed = labels.parse::<Color>(label, Case::Sensitive);
            assert_eq!(parsed, Some(member.value));
            assert_eq!(parsed.and_then(|m| labels.label(m)), Some(label));
        }
    }
}

#[test]
fn parse_respects_case() {
    let labels = registry();

    assert_eq!(labels.parse::<Color>("RED-LABEL", Case::Sensitive), None);
    assert_eq!(
        labels.parse::<Color>("RED-LABEL", Case::Insensitive),
        Some(Color::Red)
    );
    assert_eq!(
        labels.parse::<Color>("Blue-Label", Case::Insensitive),
        labels.parse::<Color>("blue-label", Case::Sensitive)
    );
    assert!(!labels.is_defined::<Color>("RED-LABEL", Case::Sensitive));
    assert!(labels.is_defined::<Color>("RED-LABEL", Case::Insensitive));
}

#[test]
fn insensitive_parse_only_folds_ascii() {
    let labels = registry();

    assert_eq!(
        labels.parse::<Weather>("ENSOLEILLé", Case::Insensitive),
        Some(Weather::Sunny)
    );
    assert_eq!(labels.parse::<Weather>("ENSOLEILLÉ", Case::Insensitive), None);
}

#[test]
fn parse_does_not_match_member_names() {
    let labels = registry();

    assert_eq!(labels.parse::<Color>("Green", Case::Insensitive), None);
    assert_eq!(labels.parse::<Color>("Red", Case::Sensitive), None);
    assert_eq!(labels.parse::<Color>("", Case::Sensitive), None);
}

#[test]
fn duplicate_labels_parse_to_first_member() {
    let labels = registry();

    assert_eq!(
        labels.parse::<Weather>("pluie", Case::Sensitive),
        Some(Weather::Rainy)
    );
    assert_eq!(labels.label(Weather::Drizzle), Some("pluie"));
}

#[test]
fn all_labels_skip_unlabeled_members() {
    let labels = registry();

    assert_eq!(labels.all_labels::<Color>(), vec!["red-label", "blue-label"]);
    assert_eq!(labels.all_labels::<Facing>(), vec!["N", "E", "W"]);
}

#[test]
fn labeled_members_carry_underlying_values() {
    let labels = registry();

    assert_eq!(
        labels.all_labeled_members::<Color>(),
        vec![(0, "red-label"), (2, "blue-label")]
    );
    assert_eq!(
        labels.all_labeled_members::<Facing>(),
        vec![(10, "N"), (11, "E"), (31, "W")]
    );
}

#[test]
fn display_falls_back_to_member_name() {
    assert_eq!(Color::Red.to_string(), "red-label");
    assert_eq!(Color::Green.to_string(), "Green");
    assert_eq!(Facing::South.to_string(), "South");
}

#[test]
fn only_label_lookups_fill_cache() {
    let labels = registry();

    let _ = labels.parse::<Color>("red-label", Case::Sensitive);
    let _ = labels.all_labels::<Color>();
    let _ = labels.all_labeled_members_dyn(EnumType::of::<Color>());
    assert_eq!(labels.cached_len(), 0);

    assert_eq!(labels.label(Color::Red), Some("red-label"));
    assert_eq!(labels.label(Color::Red), Some("red-label"));
    assert_eq!(labels.label(Color::Green), None);
    assert_eq!(labels.label(Color::Green), None);
    assert_eq!(labels.cached_len(), 2);

    // typed and dynamic lookups of the same member share an entry
    assert_eq!(
        labels.label_dyn(EnumType::of::<Color>(), 0),
        Ok(Some("red-label"))
    );
    assert_eq!(labels.cached_len(), 2);
}

#[test]
fn dynamic_queries_match_typed_queries() {
    let labels = registry();
    let facing = EnumType::of::<Facing>();

    assert_eq!(labels.label_dyn(facing, 11), Ok(Some("E")));
    assert_eq!(labels.label_dyn(facing, 30), Ok(None));
    assert_eq!(labels.label_dyn(facing, 12), Ok(None));

    let parsed = labels
        .parse_dyn(facing, "w", Case::Insensitive)
        .expect("Facing is registered")
        .expect("W is declared");
    assert_eq!(parsed.name, "West");
    assert_eq!(parsed.value, 31);
    assert_eq!(parsed.label, "W");
    assert_eq!(parsed.enum_type, facing);

    assert_eq!(labels.is_defined_dyn(facing, "w", Case::Sensitive), Ok(false));
    assert_eq!(
        labels.all_labels_dyn(facing),
        Ok(labels.all_labels::<Facing>())
    );
    assert_eq!(
        labels.all_labeled_members_dyn(facing),
        Ok(labels.all_labeled_members::<Facing>())
    );
}

#[test]
fn non_enum_types_are_rejected() {
    let labels = registry();
    let string = EnumType::of::<String>();
    let expected = LabelError::NotAnEnum {
        type_name: std::any::type_name::<String>(),
    };

    assert_eq!(labels.label_dyn(string, 0), Err(expected));
    assert_eq!(
        labels.parse_dyn(string, "red-label", Case::Sensitive),
        Err(expected)
    );
    assert!(labels.is_defined_dyn(string, "x", Case::Sensitive).is_err());
    assert!(labels.all_labels_dyn(string).is_err());
    assert!(labels.all_labeled_members_dyn(string).is_err());

    // rejected before any scan, so nothing is cached
    assert_eq!(labels.cached_len(), 0);
}

#[test]
fn unregistered_enum_is_rejected_dynamically() {
    let labels = EnumLabels::new().with::<Facing>();

    assert!(labels.label_dyn(EnumType::of::<Color>(), 0).is_err());
    // typed queries read the enum's own table
    assert_eq!(labels.label(Color::Red), Some("red-label"));
}

#[test]
fn not_an_enum_error_names_the_type() {
    let error = EnumLabels::new()
        .all_labels_dyn(EnumType::of::<u32>())
        .expect_err("u32 is not an enum");

    assert_eq!(error.to_string(), "`u32` is not a registered labeled enum");
}

#[test]
fn find_type_by_short_and_full_name() {
    let labels = registry();

    assert_eq!(labels.find_type("Color"), Some(EnumType::of::<Color>()));
    assert_eq!(
        labels.find_type(std::any::type_name::<Facing>()),
        Some(EnumType::of::<Facing>())
    );
    assert_eq!(labels.find_type("String"), None);
    assert_eq!(labels.registered_types().count(), 3);
}

#[test]
fn registering_twice_is_a_no_op() {
    let mut labels = registry();
    labels.register::<Color>().register::<Color>();

    assert_eq!(labels.registered_types().count(), 3);
}

#[test]
fn plugin_inserts_registry() {
    let mut app = App::new();

    app.add_plugins(DefaultTestPlugin);
    app.add_plugins((
        LabelsPlugin::default().with::<Color>(),
        LabelsPlugin::default().with::<Facing>(),
    ));

    app.update();

    let labels = app.world.resource::<EnumLabels>();
    assert!(labels.find_type("Color").is_some());
    assert!(labels.find_type("Facing").is_some());
    assert!(labels.find_type("Weather").is_none());
}

#[test]
fn register_command_adds_enum_at_startup() {
    let mut app = App::new();

    app.add_plugins(DefaultTestPlugin);
    app.add_plugins(LabelsPlugin::default().with::<Color>());
    app.add_systems(Startup, |mut commands: Commands| {
        commands.add(RegisterLabeledEnum::<Weather>::new());
    });

    app.update();

    let labels = app.world.resource::<EnumLabels>();
    assert_eq!(
        labels.all_labels_dyn(EnumType::of::<Weather>()),
        Ok(vec!["Ensoleillé", "pluie", "pluie"])
    );
}

#[test]
fn systems_read_labels_through_resource() {
    #[derive(Resource, Default)]
    struct Seen(Vec<&'static str>);

    let mut app = App::new();

    app.add_plugins(DefaultTestPlugin);
    app.add_plugins(LabelsPlugin::default().with::<Color>());
    app.init_resource::<Seen>();
    app.add_systems(
        Update,
        |labels: Res<EnumLabels>, mut seen: ResMut<Seen>| {
            let members = [Color::Red, Color::Green, Color::Blue];
            seen.0
                .extend(members.map(|c| labels.label(c).unwrap_or("-")));
        },
    );

    app.update();

    assert_eq!(
        app.world.resource::<Seen>().0,
        vec!["red-label", "-", "blue-label"]
    );
    assert_eq!(app.world.resource::<EnumLabels>().cached_len(), 3);
}

#[test]
fn values_naming_no_member_are_not_cached() {
    let labels = registry();
    let facing = EnumType::of::<Facing>();

    assert_eq!(labels.label_dyn(facing, 12), Ok(None));
    assert_eq!(labels.cached_len(), 0);

    for value in 1000..1100 {
        assert_eq!(labels.label_dyn(EnumType::of::<Color>(), value), Ok(None));
    }
    assert_eq!(labels.cached_len(), 0);

    // a member without a label is still cached
    assert_eq!(labels.label_dyn(facing, 30), Ok(None));
    assert_eq!(labels.cached_len(), 1);
}

#[test]
fn concurrent_lookups_fill_cache_once_per_member() {
    let labels = registry();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    [Color::Red, Color::Green, Color::Blue].map(|c| labels.label(c))
                })
            })
            .collect();

        for handle in handles {
            let seen = handle.join().expect("lookup thread panicked");
            assert_eq!(seen, [Some("red-label"), None, Some("blue-label")]);
        }
    });

    assert_eq!(labels.cached_len(), 3);
}

mod ui {
    crate::labeled_enum! {
        pub enum Palette {
            Dark => "dark",
        }
    }
}

mod map {
    crate::labeled_enum! {
        pub enum Palette {
            Sea => "sea",
        }
    }
}

#[test]
fn ambiguous_short_name_needs_full_name() {
    let labels = registry().with::<ui::Palette>().with::<map::Palette>();

    assert_eq!(labels.find_type("Palette"), None);
    assert_eq!(
        labels.find_type(std::any::type_name::<ui::Palette>()),
        Some(EnumType::of::<ui::Palette>())
    );
    assert_eq!(
        labels.find_type(std::any::type_name::<map::Palette>()),
        Some(EnumType::of::<map::Palette>())
    );
    // unambiguous short names still resolve
    assert_eq!(labels.find_type("Color"), Some(EnumType::of::<Color>()));
}
