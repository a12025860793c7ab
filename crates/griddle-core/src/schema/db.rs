use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// The derived storage schema: one declaration per table, sorted by table
/// name so repeated builds of the same registrations are byte-identical.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    pub tables: Vec<Table>,
}

/// A single table's storage declaration.
///
/// The definition string lists the primary column first (prefixed with the
/// `++` auto-increment marker when applicable), then the remaining columns
/// sorted lexicographically, comma-space-joined. The primary key is also
/// carried structurally for drivers, since a definition without the marker
/// does not say on its own whether its first column is primary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub definition: String,
    pub primary: Option<PrimaryKey>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    pub column: String,
    pub auto_increment: bool,
}

impl Schema {
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|table| table.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// A stable digest of the schema's shape.
    ///
    /// Entries are keyed by table name in a sorted map and serialized
    /// canonically before hashing, so any two schemas with identical
    /// name-to-definition mappings produce the same signature regardless of
    /// the order tables were registered or built in.
    pub fn signature(&self) -> String {
        let entries: BTreeMap<&str, &str> = self
            .tables
            .iter()
            .map(|table| (table.name.as_str(), table.definition.as_str()))
            .collect();

        let canonical =
            serde_json::to_string(&entries).expect("schema serialization cannot fail");

        let digest = Sha256::digest(canonical.as_bytes());
        digest.iter().map(|byte| format!("{byte:02x}")).collect()
    }
}
