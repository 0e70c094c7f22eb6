//! Declaring enums together with their labels
//!
//! A [`LabeledEnum`] carries its own member table in declaration order, so label lookups never
//! need runtime type introspection. The table is normally written by [`crate::labeled_enum`]:
//!
//! ```
//! enum_labels_core::labeled_enum! {
//!     pub enum Color {
//!         Red => "red-label",
//!         Green,
//!         Blue => "blue-label",
//!     }
//! }
//!
//! assert_eq!(Color::Red.to_string(), "red-label");
//! assert_eq!(Color::Green.to_string(), "Green");
//! ```

use std::hash::Hash;

/// One declared member of a [`LabeledEnum`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Member<E> {
    pub value: E,
    /// the symbolic name, as written in source
    pub name: &'static str,
    /// the underlying value of the member, widened to `i64`
    pub discriminant: i64,
    pub label: Option<&'static str>,
}

/// A fieldless enum whose members may carry a string label.
///
/// Implement this through [`crate::labeled_enum`] rather than by hand, so that [`Self::MEMBERS`]
/// always lists every member exactly once.
pub trait LabeledEnum: Copy + Eq + Hash + Send + Sync + 'static {
    /// Every member, in declaration order
    const MEMBERS: &'static [Member<Self>];

    /// The underlying value of `self`
    fn discriminant(self) -> i64;
}

/// Declare a fieldless enum and its labels in one place.
///
/// Each member may have an explicit discriminant and an optional label, in that order:
/// `Member = 3 => "label"`. The enum derives `Clone, Copy, PartialEq, Eq, Hash, Debug`, so don't
/// derive those again. [`std::fmt::Display`] writes the label, or the member name when the member
/// has no label.
#[macro_export]
macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident $(= $disc:expr)? $(=> $label:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant $(= $disc)?,
            )*
        }

        impl $crate::labeled::LabeledEnum for $name {
            const MEMBERS: &'static [$crate::labeled::Member<Self>] = &[
                $(
                    $crate::labeled::Member {
                        value: $name::$variant,
                        name: stringify!($variant),
                        discriminant: $name::$variant as i64,
                        label: $crate::__label!($($label)?),
                    },
                )*
            ];

            #[inline]
            fn discriminant(self) -> i64 {
                self as i64
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    $(
                        $name::$variant => f.write_str(
                            $crate::__label!($($label)?).unwrap_or(stringify!($variant)),
                        ),
                    )*
                }
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __label {
    () => {
        ::std::option::Option::<&'static str>::None
    };
    ($label:literal) => {
        ::std::option::Option::<&'static str>::Some($label)
    };
}
