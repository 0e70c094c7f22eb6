//! The label registry: bidirectional lookups between enum members and their labels
//!
//! [`EnumLabels`] answers two kinds of queries:
//!
//! - typed queries (`label`, `parse`, ...) for callers that know the enum at compile time. These
//!   read the enum's own member table, so they work whether or not the enum was registered.
//! - dynamic queries (`label_dyn`, `parse_dyn`, ...) for callers that only hold an [`EnumType`]
//!   descriptor, such as the developer console. These only know registered enums and reject any
//!   other type with [`LabelError::NotAnEnum`] before scanning anything.
//!
//! Label lookups are memoized per member. Parsing always scans, as its input is arbitrary text.

use std::any::TypeId;

use bevy_ecs::prelude::Resource;
use bevy_log::prelude::*;
use bevy_utils::HashMap;
use dashmap::DashMap;
use thiserror::Error;

use crate::labeled::LabeledEnum;

/// How labels are compared when parsing
///
/// [`Case::Insensitive`] folds ASCII letters only; any other byte must match exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Case {
    #[default]
    Sensitive,
    Insensitive,
}

impl Case {
    #[must_use]
    #[inline]
    pub fn matches(self, declared: &str, input: &str) -> bool {
        match self {
            Case::Sensitive => declared == input,
            Case::Insensitive => declared.eq_ignore_ascii_case(input),
        }
    }
}

/// A runtime handle for a type, used to address enums dynamically.
///
/// Any `'static` type has a descriptor; only the ones registered with [`EnumLabels`] are treated
/// as enums.
#[derive(Debug, Clone, Copy)]
pub struct EnumType {
    id: TypeId,
    name: &'static str,
}

impl EnumType {
    #[must_use]
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// full path of the type, eg `my_game::ui::Color`
    #[must_use]
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// the last path segment of [`Self::name`]
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

impl PartialEq for EnumType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EnumType {}

impl std::hash::Hash for EnumType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A member found through the dynamic API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabeledMember {
    pub enum_type: EnumType,
    pub name: &'static str,
    pub value: i64,
    pub label: &'static str,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelError {
    #[error("`{type_name}` is not a registered labeled enum")]
    NotAnEnum { type_name: &'static str },
}

/// A member with its enum type erased
#[derive(Debug, Clone, Copy)]
struct ErasedMember {
    name: &'static str,
    discriminant: i64,
    label: Option<&'static str>,
}

#[derive(Debug, Clone)]
struct EnumTable {
    enum_type: EnumType,
    members: Box<[ErasedMember]>,
}

impl EnumTable {
    fn of<E: LabeledEnum>() -> Self {
        Self {
            enum_type: EnumType::of::<E>(),
            members: E::MEMBERS
                .iter()
                .map(|m| ErasedMember {
                    name: m.name,
                    discriminant: m.discriminant,
                    label: m.label,
                })
                .collect(),
        }
    }

    fn labeled(&self) -> impl Iterator<Item = (&ErasedMember, &'static str)> {
        self.members
            .iter()
            .filter_map(|m| m.label.map(|label| (m, label)))
    }
}

/// The registry of labeled enums and the cache of resolved labels.
///
/// Built once (usually by [`crate::LabelsPlugin`]) and shared as a resource. The only state that
/// changes afterwards is the label cache, which is safe to fill from several systems at once.
#[derive(Resource, Debug, Default)]
pub struct EnumLabels {
    tables: HashMap<TypeId, EnumTable>,
    cache: DashMap<(TypeId, i64), Option<&'static str>>,
}

impl EnumLabels {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Self::register`]
    #[must_use]
    pub fn with<E: LabeledEnum>(mut self) -> Self {
        self.register::<E>();
        self
    }

    /// Make `E` addressable through the dynamic API. Registering twice is a no-op.
    pub fn register<E: LabeledEnum>(&mut self) -> &mut Self {
        let table = EnumTable::of::<E>();
        let type_name = table.enum_type.name();

        if self.tables.contains_key(&table.enum_type.id) {
            trace!("`{}` already registered", type_name);
            return self;
        }

        for (i, (member, label)) in table.labeled().enumerate() {
            if let Some((first, _)) = table.labeled().take(i).find(|(_, l)| *l == label) {
                warn!(
                    "`{}::{}` reuses label `{}` of `{}`; parsing will resolve to `{}`",
                    type_name, member.name, label, first.name, first.name
                );
            }
        }

        debug!(
            "registered `{}` with {} members",
            type_name,
            table.members.len()
        );
        self.tables.insert(table.enum_type.id, table);
        self
    }

    /// Every registered enum, in no particular order
    pub fn registered_types(&self) -> impl Iterator<Item = EnumType> + '_ {
        self.tables.values().map(|t| t.enum_type)
    }

    /// Resolve a registered enum by its full or short type name.
    ///
    /// A short name shared by several registered enums resolves to `None`; use the full name for
    /// those.
    #[must_use]
    pub fn find_type(&self, name: &str) -> Option<EnumType> {
        if let Some(found) = self.registered_types().find(|t| t.name() == name) {
            return Some(found);
        }

        let mut by_short_name = self.registered_types().filter(|t| t.short_name() == name);
        let found = by_short_name.next()?;

        if let Some(other) = by_short_name.next() {
            warn!(
                "`{}` is ambiguous between `{}` and `{}`; use the full type name",
                name,
                found.name(),
                other.name()
            );
            return None;
        }

        Some(found)
    }

    /// Number of memoized label lookups
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    fn table(&self, enum_type: EnumType) -> Result<&EnumTable, LabelError> {
        self.tables
            .get(&enum_type.id)
            .ok_or(LabelError::NotAnEnum {
                type_name: enum_type.name(),
            })
    }

    /// look up `key` in the cache, scanning with `scan` on a miss.
    ///
    /// `scan` yields the label of the member `key` names, or `None` when no member has that
    /// value. Values naming no member are never cached.
    fn cached_label(
        &self,
        key: (TypeId, i64),
        scan: impl FnOnce() -> Option<Option<&'static str>>,
    ) -> Option<&'static str> {
        if let Some(label) = self.cache.get(&key) {
            return *label;
        }

        trace!("label cache miss for {:?}; scanning members", key);
        let label = scan()?;

        *self.cache.entry(key).or_insert(label)
    }

    // --- typed queries ---

    /// The label declared on `member`, if any
    #[must_use]
    pub fn label<E: LabeledEnum>(&self, member: E) -> Option<&'static str> {
        self.cached_label((TypeId::of::<E>(), member.discriminant()), || {
            E::MEMBERS
                .iter()
                .find(|m| m.value == member)
                .map(|m| m.label)
        })
    }

    /// The first member, in declaration order, whose label matches `label`
    #[must_use]
    pub fn parse<E: LabeledEnum>(&self, label: &str, case: Case) -> Option<E> {
        trace!(
            "parsing `{}` as {} ({:?})",
            label,
            std::any::type_name::<E>(),
            case
        );

        E::MEMBERS
            .iter()
            .find(|m| m.label.is_some_and(|declared| case.matches(declared, label)))
            .map(|m| m.value)
    }

    #[must_use]
    pub fn is_defined<E: LabeledEnum>(&self, label: &str, case: Case) -> bool {
        self.parse::<E>(label, case).is_some()
    }

    /// Labels of the members that declare one, in declaration order
    #[must_use]
    pub fn all_labels<E: LabeledEnum>(&self) -> Vec<&'static str> {
        E::MEMBERS.iter().filter_map(|m| m.label).collect()
    }

    /// `(underlying value, label)` of each labeled member, in declaration order
    #[must_use]
    pub fn all_labeled_members<E: LabeledEnum>(&self) -> Vec<(i64, &'static str)> {
        E::MEMBERS
            .iter()
            .filter_map(|m| m.label.map(|label| (m.discriminant, label)))
            .collect()
    }

    // --- dynamic queries ---

    /// The label declared on the member of `enum_type` whose underlying value is `value`.
    ///
    /// A value that matches no member resolves to `Ok(None)`.
    ///
    /// # Errors
    /// Fails if `enum_type` is not a registered enum.
    pub fn label_dyn(
        &self,
        enum_type: EnumType,
        value: i64,
    ) -> Result<Option<&'static str>, LabelError> {
        let table = self.table(enum_type)?;

        Ok(self.cached_label((enum_type.id, value), || {
            table
                .members
                .iter()
                .find(|m| m.discriminant == value)
                .map(|m| m.label)
        }))
    }

    /// # Errors
    /// Fails if `enum_type` is not a registered enum.
    pub fn parse_dyn(
        &self,
        enum_type: EnumType,
        label: &str,
        case: Case,
    ) -> Result<Option<LabeledMember>, LabelError> {
        let table = self.table(enum_type)?;

        trace!(
            "parsing `{}` as {} ({:?})",
            label,
            enum_type.name(),
            case
        );

        Ok(table
            .labeled()
            .find(|(_, declared)| case.matches(declared, label))
            .map(|(member, declared)| LabeledMember {
                enum_type,
                name: member.name,
                value: member.discriminant,
                label: declared,
            }))
    }

    /// # Errors
    /// Fails if `enum_type` is not a registered enum.
    pub fn is_defined_dyn(
        &self,
        enum_type: EnumType,
        label: &str,
        case: Case,
    ) -> Result<bool, LabelError> {
        Ok(self.parse_dyn(enum_type, label, case)?.is_some())
    }

    /// # Errors
    /// Fails if `enum_type` is not a registered enum.
    pub fn all_labels_dyn(&self, enum_type: EnumType) -> Result<Vec<&'static str>, LabelError> {
        Ok(self
            .table(enum_type)?
            .labeled()
            .map(|(_, label)| label)
            .collect())
    }

    /// # Errors
    /// Fails if `enum_type` is not a registered enum.
    pub fn all_labeled_members_dyn(
        &self,
        enum_type: EnumType,
    ) -> Result<Vec<(i64, &'static str)>, LabelError> {
        Ok(self
            .table(enum_type)?
            .labeled()
            .map(|(member, label)| (member.discriminant, label))
            .collect())
    }
}
