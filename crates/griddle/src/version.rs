use griddle_core::{driver::VersionStore, schema::db::Schema};

use serde::{Deserialize, Serialize};

/// Key prefix under which version records are persisted, one per database
/// name.
const KEY_PREFIX: &str = "griddle.schema/";

/// The persisted schema version for one database.
///
/// Read once at open time. Rewritten only when the freshly computed schema
/// signature differs from the stored one, in which case the version advances
/// by exactly one step. Repeatedly opening an unchanged schema keeps both
/// fields untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    pub version: u32,
    pub signature: String,
}

impl VersionRecord {
    /// The record assumed when nothing (readable) is persisted yet.
    fn initial() -> Self {
        Self {
            version: 1,
            signature: String::new(),
        }
    }
}

/// Decides the schema version to open the store at.
///
/// Without a persistent version store (headless context) this is a no-op
/// reporting version 1. Corrupt stored records are treated as absent.
pub(crate) fn resolve(store: Option<&dyn VersionStore>, db_name: &str, schema: &Schema) -> u32 {
    let Some(store) = store else {
        return 1;
    };

    let key = format!("{KEY_PREFIX}{db_name}");

    let stored = match store.get(&key) {
        Some(raw) => serde_json::from_str::<VersionRecord>(&raw).unwrap_or_else(|err| {
            log::warn!("discarding unreadable version record for `{db_name}`: {err}");
            VersionRecord::initial()
        }),
        None => VersionRecord::initial(),
    };

    let signature = schema.signature();

    if stored.signature == signature {
        return stored.version;
    }

    let next = VersionRecord {
        version: stored.version + 1,
        signature,
    };

    let raw = serde_json::to_string(&next).expect("version record serialization cannot fail");
    store.set(&key, &raw);

    log::debug!(
        "schema shape changed for `{db_name}`: version {} -> {}",
        stored.version,
        next.version
    );

    next.version
}
