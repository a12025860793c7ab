use super::{ColumnDescriptor, ColumnOptions, EntityDescriptor, EntityId, ResolvedEntity};
use crate::{Error, Result};

use indexmap::IndexMap;
use std::collections::HashSet;

/// The entity metadata registry: entity identity to table descriptor, plus a
/// table-name index enforcing name uniqueness across entities.
///
/// Registration is two-phase by necessity: the ordering between an entity
/// registration and its column registrations is not guaranteed, so a column
/// registration lazily creates the descriptor under the type's default name
/// and the entity registration later confirms or renames it. A rename is
/// permitted exactly once, away from the implicit default.
///
/// The registry stays mutable until the owning database finishes opening, at
/// which point it is sealed for good.
#[derive(Debug, Default)]
pub struct Registry {
    entities: IndexMap<EntityId, EntityDescriptor>,
    names: IndexMap<String, EntityId>,
    sealed: bool,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an entity, creating its descriptor or confirming/renaming
    /// the one a column registration created earlier.
    pub fn register_entity(
        &mut self,
        id: EntityId,
        explicit_name: Option<&str>,
        parent: Option<EntityId>,
    ) -> Result<()> {
        self.check_unsealed()?;

        if let Some(name) = explicit_name {
            if name.is_empty() {
                return Err(Error::configuration(format!(
                    "entity `{}` registered with an empty table name",
                    id.default_name()
                )));
            }
        }

        if !self.entities.contains_key(&id) {
            let name = explicit_name.unwrap_or(id.default_name()).to_string();
            self.claim_name(&name, id)?;
            self.entities.insert(
                id,
                EntityDescriptor::new(id, name, explicit_name.is_some()),
            );
        } else if let Some(name) = explicit_name {
            self.rename(id, name)?;
        }

        if let Some(parent) = parent {
            let descriptor = &mut self.entities[&id];
            match descriptor.parent {
                None => descriptor.parent = Some(parent),
                Some(existing) if existing == parent => {}
                Some(existing) => {
                    return Err(Error::configuration(format!(
                        "entity `{}` already has parent `{}`; cannot re-parent to `{}`",
                        descriptor.table_name,
                        existing.default_name(),
                        parent.default_name()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Registers (or incrementally re-registers) a column on an entity,
    /// lazily creating the descriptor when the entity itself has not been
    /// registered yet.
    pub fn register_column(
        &mut self,
        id: EntityId,
        name: &str,
        options: ColumnOptions,
    ) -> Result<()> {
        self.check_unsealed()?;

        if name.is_empty() {
            return Err(Error::configuration(format!(
                "entity `{}` registered a column with an empty name",
                id.default_name()
            )));
        }

        if !self.entities.contains_key(&id) {
            let default = id.default_name().to_string();
            self.claim_name(&default, id)?;
            self.entities
                .insert(id, EntityDescriptor::new(id, default, false));
        }

        let descriptor = &self.entities[&id];

        // Merge onto any earlier partial declaration of the same column.
        let prior = descriptor.columns.get(name);
        let merged = ColumnDescriptor {
            name: name.to_string(),
            primary: options
                .primary
                .unwrap_or_else(|| prior.is_some_and(|c| c.primary)),
            auto_increment: options
                .auto_increment
                .unwrap_or_else(|| prior.is_some_and(|c| c.auto_increment)),
        };

        if merged.auto_increment && !merged.primary {
            return Err(Error::configuration(format!(
                "column `{}.{}` is auto-increment but not primary",
                descriptor.table_name, name
            )));
        }

        if merged.primary {
            if let Some(other) = descriptor
                .columns
                .values()
                .find(|column| column.primary && column.name != name)
            {
                return Err(Error::configuration(format!(
                    "entity `{}` already has primary column `{}`; cannot also mark `{}` primary",
                    descriptor.table_name, other.name, name
                )));
            }
        }

        self.entities[&id].columns.insert(name.to_string(), merged);

        Ok(())
    }

    /// Resolves the inheritance-merged view of an entity: ancestor columns
    /// overlaid root-to-leaf, validated to carry at most one primary column.
    pub fn resolve(&self, id: EntityId) -> Result<ResolvedEntity> {
        let leaf = self.descriptor(id)?;

        // Walk the parent links leaf-to-root, then overlay in reverse.
        let mut chain = vec![leaf];
        let mut visited: HashSet<EntityId> = [id].into();
        let mut current = leaf;

        while let Some(parent) = current.parent {
            if !visited.insert(parent) {
                return Err(Error::configuration(format!(
                    "entity `{}` has a cyclic parent chain",
                    leaf.table_name
                )));
            }
            current = self.descriptor(parent).map_err(|_| {
                Error::configuration(format!(
                    "entity `{}` names unregistered parent `{}`",
                    leaf.table_name,
                    parent.default_name()
                ))
            })?;
            chain.push(current);
        }

        let mut columns: IndexMap<&str, &ColumnDescriptor> = IndexMap::new();
        for descriptor in chain.iter().rev() {
            for column in descriptor.columns.values() {
                columns.insert(&column.name, column);
            }
        }

        let primaries: Vec<&str> = columns
            .values()
            .filter(|column| column.primary)
            .map(|column| column.name.as_str())
            .collect();

        if primaries.len() > 1 {
            return Err(Error::configuration(format!(
                "entity `{}` resolves to multiple primary columns: {}",
                leaf.table_name,
                primaries.join(", ")
            )));
        }

        Ok(ResolvedEntity {
            table_name: leaf.table_name.clone(),
            columns: columns.into_values().cloned().collect(),
        })
    }

    pub fn entities(&self) -> impl Iterator<Item = &EntityDescriptor> {
        self.entities.values()
    }

    pub fn descriptor(&self, id: EntityId) -> Result<&EntityDescriptor> {
        self.entities.get(&id).ok_or_else(|| {
            Error::configuration(format!(
                "entity `{}` is not registered",
                id.default_name()
            ))
        })
    }

    /// Seals the registry. One-way; every later mutation fails.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Testing/administrative hook: clears all registrations and unseals.
    /// Normal operation never calls this; tests usually build a fresh
    /// registry instead.
    pub fn reset(&mut self) {
        self.entities.clear();
        self.names.clear();
        self.sealed = false;
    }

    fn check_unsealed(&self) -> Result<()> {
        if self.sealed {
            Err(Error::configuration(
                "registry is sealed; registration is only permitted before the database opens",
            ))
        } else {
            Ok(())
        }
    }

    /// Reserves a table name for `id`, failing when a different entity
    /// already holds it.
    fn claim_name(&mut self, name: &str, id: EntityId) -> Result<()> {
        match self.names.get(name) {
            Some(holder) if *holder != id => Err(Error::configuration(format!(
                "table name `{}` is already registered by entity `{}`",
                name,
                holder.default_name()
            ))),
            _ => {
                self.names.insert(name.to_string(), id);
                Ok(())
            }
        }
    }

    /// The one-time rename: implicit default to explicit name.
    fn rename(&mut self, id: EntityId, new_name: &str) -> Result<()> {
        let descriptor = &self.entities[&id];

        if descriptor.table_name == new_name {
            self.entities[&id].named_explicitly = true;
            return Ok(());
        }

        if descriptor.named_explicitly {
            return Err(Error::configuration(format!(
                "entity `{}` already carries explicit table name `{}`; renaming to `{}` is not permitted",
                id.default_name(),
                descriptor.table_name,
                new_name
            )));
        }

        let old_name = descriptor.table_name.clone();
        self.claim_name(new_name, id)?;
        self.names.shift_remove(&old_name);

        let descriptor = &mut self.entities[&id];
        descriptor.table_name = new_name.to_string();
        descriptor.named_explicitly = true;

        Ok(())
    }
}
