use griddle_core::{
    schema::ResolvedEntity,
    stmt::{FieldFilter, FieldOp, Filter, Key, Record},
    Error, Result,
};

/// Recognizes a filter as an exact primary-key probe.
///
/// Matches only when the field-level keys are exactly the key's component
/// names (no extras, no combinators) and each component is constrained by a
/// literal or an equals-only operator list. Anything else returns `None` and
/// the caller falls back to a scan.
pub(crate) fn key_from_filter(entity: &ResolvedEntity, filter: &Filter) -> Option<Key> {
    if !filter.and.is_empty() || !filter.or.is_empty() || !filter.not.is_empty() {
        return None;
    }

    let components = entity.key_components();
    if components.is_empty() || filter.fields.len() != components.len() {
        return None;
    }

    let mut parts = Vec::with_capacity(components.len());

    for name in components {
        let value = match filter.fields.get(name)? {
            FieldFilter::Literal(value) => value,
            FieldFilter::All(ops) => match &ops[..] {
                [FieldOp::Equals(value)] => value,
                _ => return None,
            },
        };

        parts.push(Key::from_value(value)?);
    }

    Some(Key::from_components(parts))
}

/// Extracts the primary key from a stored record, for update/delete flows
/// that located their target through a scan.
pub(crate) fn key_from_record(entity: &ResolvedEntity, record: &Record) -> Result<Key> {
    let components = entity.key_components();
    if components.is_empty() {
        return Err(Error::key_resolution(format!(
            "table `{}` has no primary column",
            entity.table_name
        )));
    }

    let mut parts = Vec::with_capacity(components.len());

    for name in components {
        let value = record.get(name).ok_or_else(|| {
            Error::key_resolution(format!(
                "record in `{}` is missing key component `{name}`",
                entity.table_name
            ))
        })?;

        let part = Key::from_value(value).ok_or_else(|| {
            Error::key_resolution(format!(
                "field `{name}` in `{}` does not hold a keyable value",
                entity.table_name
            ))
        })?;

        parts.push(part);
    }

    Ok(Key::from_components(parts))
}

/// Writes a key's value(s) back into a record's key field(s). Used when a
/// freshly inserted record must be returned without read-back.
pub(crate) fn merge_key_into(entity: &ResolvedEntity, record: &mut Record, key: &Key) {
    let components = entity.key_components();

    match (&components[..], key) {
        ([name], key) => {
            record.insert(name.to_string(), key.to_value());
        }
        (names, Key::Composite(parts)) => {
            for (name, part) in names.iter().zip(parts) {
                record.insert(name.to_string(), part.to_value());
            }
        }
        _ => {}
    }
}
