use indexmap::IndexMap;
use std::{any, fmt};

/// Opaque identity handle for an entity type.
///
/// Carries the Rust type's identity plus its name, which acts as the
/// implicit default table name until an explicit one is registered.
#[derive(Copy, Clone, Eq)]
pub struct EntityId {
    type_id: any::TypeId,
    type_name: &'static str,
}

impl EntityId {
    pub fn of<T: 'static>() -> Self {
        Self {
            type_id: any::TypeId::of::<T>(),
            type_name: any::type_name::<T>(),
        }
    }

    /// The type's own name with any module path stripped: the implicit
    /// default table name.
    pub fn default_name(&self) -> &'static str {
        self.type_name
            .rsplit("::")
            .next()
            .unwrap_or(self.type_name)
    }
}

impl PartialEq for EntityId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl std::hash::Hash for EntityId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.default_name())
    }
}

/// Options supplied with a column registration. `None` fields leave any
/// previously registered setting in place, so a column may be declared
/// incrementally across multiple registration calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct ColumnOptions {
    pub primary: Option<bool>,
    pub auto_increment: Option<bool>,
}

impl ColumnOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primary(mut self, primary: bool) -> Self {
        self.primary = Some(primary);
        self
    }

    pub fn auto_increment(mut self, auto_increment: bool) -> Self {
        self.auto_increment = Some(auto_increment);
        self
    }
}

/// A registered column. Invariant: `auto_increment` implies `primary`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub primary: bool,
    pub auto_increment: bool,
}

/// A registered entity: table name, own columns, optional parent link.
///
/// Built incrementally. Column registrations may arrive before the entity
/// registration that names the table; until then the descriptor carries the
/// implicit default name and `named_explicitly` stays false.
#[derive(Debug, Clone)]
pub struct EntityDescriptor {
    pub id: EntityId,
    pub table_name: String,
    pub named_explicitly: bool,
    pub columns: IndexMap<String, ColumnDescriptor>,
    pub parent: Option<EntityId>,
}

impl EntityDescriptor {
    pub(crate) fn new(id: EntityId, table_name: String, named_explicitly: bool) -> Self {
        Self {
            id,
            table_name,
            named_explicitly,
            columns: IndexMap::new(),
            parent: None,
        }
    }
}

/// The inheritance-merged view of an entity: the ancestor chain walked
/// root-to-leaf with each descendant's columns overlaid (leaf wins on name
/// collisions). Derived on demand, never stored.
#[derive(Debug, Clone)]
pub struct ResolvedEntity {
    pub table_name: String,
    pub columns: Vec<ColumnDescriptor>,
}

impl ResolvedEntity {
    /// The merged primary column, if the chain declares one.
    pub fn primary(&self) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|column| column.primary)
    }

    /// Names of the primary key components, in declared order.
    pub fn key_components(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|column| column.primary)
            .map(|column| column.name.as_str())
            .collect()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|column| column.name == name)
    }
}
