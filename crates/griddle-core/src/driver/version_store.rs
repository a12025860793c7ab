use std::fmt::Debug;

/// Host-provided persistent key-value facility used only for the schema
/// version record. Absent in headless contexts, in which case the version
/// manager degrades to always reporting version 1.
pub trait VersionStore: Debug + Send + Sync + 'static {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);
}
