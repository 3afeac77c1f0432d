//! One record per object from the field and object indices.

use crate::parser::PermissionIndex;
use crate::permission::{FieldPermission, ObjectAccess};

/// Object grants together with that object's field grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedPermissionRecord {
    name: String,
    field_permissions: Vec<FieldPermission>,
    access: ObjectAccess,
}

impl MergedPermissionRecord {
    pub fn new(
        name: impl Into<String>,
        access: ObjectAccess,
        field_permissions: Vec<FieldPermission>,
    ) -> Self {
        Self {
            name: name.into(),
            field_permissions,
            access,
        }
    }

    /// Object API name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_permissions(&self) -> &[FieldPermission] {
        &self.field_permissions
    }

    pub fn access(&self) -> &ObjectAccess {
        &self.access
    }
}

/// Merge field and object grants into one record per object.
///
/// Objects with object-level grants come first, in index order, followed by
/// objects that only appear through field grants (all object grants denied).
pub fn merge(index: &PermissionIndex) -> Vec<MergedPermissionRecord> {
    let mut records = Vec::with_capacity(index.objects.len() + index.fields.len());

    for (name, access) in index.objects.iter() {
        let fields = index.fields.get(name).cloned().unwrap_or_default();
        records.push(MergedPermissionRecord::new(name, *access, fields));
    }

    for (name, fields) in index.fields.iter() {
        if !index.objects.contains_key(name) {
            records.push(MergedPermissionRecord::new(
                name,
                ObjectAccess::default(),
                fields.clone(),
            ));
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn field(name: &str) -> FieldPermission {
        FieldPermission {
            field: name.to_string(),
            editable: false,
            readable: true,
        }
    }

    fn read_only() -> ObjectAccess {
        ObjectAccess {
            allow_read: true,
            ..Default::default()
        }
    }

    fn sample_index() -> PermissionIndex {
        let mut index = PermissionIndex::default();
        index.fields.insert("Lead", vec![field("Company")]);
        index.fields.insert("Account", vec![field("Name"), field("Phone")]);
        index.fields.insert("Contact", vec![field("Email")]);
        index.objects.insert("Account", read_only());
        index.objects.insert("Opportunity", ObjectAccess::default());
        index
    }

    #[test]
    fn test_object_backed_records_first() {
        let records = merge(&sample_index());
        let names: Vec<_> = records.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Account", "Opportunity", "Lead", "Contact"]);
    }

    #[test]
    fn test_fields_attached_to_their_object() {
        let records = merge(&sample_index());
        let account = &records[0];
        assert_eq!(account.access(), &read_only());
        let fields: Vec<_> = account
            .field_permissions()
            .iter()
            .map(|f| f.field.as_str())
            .collect();
        assert_eq!(fields, vec!["Name", "Phone"]);
        assert!(records[1].field_permissions().is_empty());
    }

    #[test]
    fn test_field_only_object_denied_at_object_level() {
        let records = merge(&sample_index());
        let contact = records.iter().find(|r| r.name() == "Contact").unwrap();
        assert_eq!(contact.access(), &ObjectAccess::default());
        assert_eq!(contact.field_permissions(), &[field("Email")]);
    }

    #[test]
    fn test_one_record_per_object() {
        let index = sample_index();
        let records = merge(&index);

        let expected: HashSet<&str> = index.objects.keys().chain(index.fields.keys()).collect();
        let names: Vec<&str> = records.iter().map(|r| r.name()).collect();
        let unique: HashSet<&str> = names.iter().copied().collect();

        assert_eq!(names.len(), unique.len());
        assert_eq!(unique, expected);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let index = sample_index();
        assert_eq!(merge(&index), merge(&index));
    }

    #[test]
    fn test_empty_index() {
        assert!(merge(&PermissionIndex::default()).is_empty());
    }
}
