use super::{db, Registry, ResolvedEntity};
use crate::Result;

/// Derives the storage schema from a registry's entities.
#[derive(Debug, Default)]
pub struct Builder;

impl Builder {
    pub fn new() -> Self {
        Self
    }

    /// Resolves every registered entity and emits its table declaration,
    /// sorted by table name. Resolution failures (conflicting primaries,
    /// broken parent links) abort the build.
    pub fn build(&self, registry: &Registry) -> Result<db::Schema> {
        let mut resolved: Vec<ResolvedEntity> = registry
            .entities()
            .map(|descriptor| registry.resolve(descriptor.id))
            .collect::<Result<_>>()?;

        resolved.sort_by(|a, b| a.table_name.cmp(&b.table_name));

        let tables = resolved
            .into_iter()
            .map(|entity| db::Table {
                definition: definition(&entity),
                primary: entity.primary().map(|column| db::PrimaryKey {
                    column: column.name.clone(),
                    auto_increment: column.auto_increment,
                }),
                name: entity.table_name,
            })
            .collect();

        Ok(db::Schema { tables })
    }
}

/// The table declaration string: primary column first (`++`-prefixed when
/// auto-increment), then the remaining columns sorted lexicographically.
fn definition(entity: &ResolvedEntity) -> String {
    let mut parts = Vec::with_capacity(entity.columns.len());

    if let Some(primary) = entity.primary() {
        if primary.auto_increment {
            parts.push(format!("++{}", primary.name));
        } else {
            parts.push(primary.name.clone());
        }
    }

    let mut rest: Vec<&str> = entity
        .columns
        .iter()
        .filter(|column| !column.primary)
        .map(|column| column.name.as_str())
        .collect();
    rest.sort_unstable();
    parts.extend(rest.iter().map(ToString::to_string));

    parts.join(", ")
}
