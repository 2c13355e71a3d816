// src/project.rs
// Metadata projection: keep a fixed allowlist of fields per entity type.

use serde_json::{Map, Value};

use crate::entity::{Entity, EntityType};

/// Copy `fields` out of `entity`, in allowlist order. Absent fields become `null`.
fn pick(entity: &Entity, fields: &[&str]) -> Entity {
    let mut out = Map::with_capacity(fields.len());
    for &field in fields {
        let v = entity.get(field).cloned().unwrap_or(Value::Null);
        out.insert(field.to_string(), v);
    }
    out
}

pub fn project(entity: &Entity, ty: EntityType) -> Entity {
    pick(entity, ty.key_fields())
}

/// Same as [`project`], but for a type given by name. Names outside the known
/// set fall back to the id + self-link projection.
pub fn project_named(entity: &Entity, type_name: &str) -> Entity {
    pick(entity, EntityType::key_fields_for(type_name))
}
