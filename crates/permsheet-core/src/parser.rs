//! Field and object permission extraction.

use crate::document::Element;
use crate::ordered::OrderedIndex;
use crate::permission::{FieldPermission, ObjectAccess, ObjectPermission};

/// Document kinds that carry permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarrierKind {
    PermissionSet,
    Profile,
}

impl CarrierKind {
    /// Match a root element name.
    pub fn from_root_name(name: &str) -> Option<Self> {
        match name {
            "PermissionSet" => Some(CarrierKind::PermissionSet),
            "Profile" => Some(CarrierKind::Profile),
            _ => None,
        }
    }
}

/// Permissions extracted from one document, keyed by object API name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionIndex {
    /// `None` when the root element carries no permissions.
    pub carrier: Option<CarrierKind>,
    pub fields: OrderedIndex<Vec<FieldPermission>>,
    pub objects: OrderedIndex<ObjectAccess>,
}

impl PermissionIndex {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.objects.is_empty()
    }
}

/// Extract field and object permissions from a PermissionSet or Profile.
///
/// Any other root yields an empty index with `carrier == None`.
pub fn parse_permissions(doc: &Element) -> PermissionIndex {
    let Some(carrier) = CarrierKind::from_root_name(doc.name()) else {
        return PermissionIndex::default();
    };

    let mut index = PermissionIndex {
        carrier: Some(carrier),
        ..Default::default()
    };

    for entry in doc.children_named("fieldPermissions") {
        if let Some((object, permission)) = parse_field_permission(entry) {
            index
                .fields
                .get_or_insert_with(object, Vec::new)
                .push(permission);
        }
    }

    for entry in doc.children_named("objectPermissions") {
        if let Some(permission) = parse_object_permission(entry) {
            index.objects.insert(permission.object, permission.access);
        }
    }

    index
}

/// `None` unless the `field` value is `Object.Field` with both sides non-empty.
fn parse_field_permission(entry: &Element) -> Option<(&str, FieldPermission)> {
    let (object, field) = entry.scalar("field")?.split_once('.')?;
    if object.is_empty() || field.is_empty() {
        return None;
    }
    Some((
        object,
        FieldPermission {
            field: field.to_string(),
            editable: flag(entry, "editable"),
            readable: flag(entry, "readable"),
        },
    ))
}

fn parse_object_permission(entry: &Element) -> Option<ObjectPermission> {
    let object = entry.scalar("object").filter(|o| !o.is_empty())?;
    Some(ObjectPermission {
        object: object.to_string(),
        access: ObjectAccess {
            allow_create: flag(entry, "allowCreate"),
            allow_delete: flag(entry, "allowDelete"),
            allow_edit: flag(entry, "allowEdit"),
            allow_read: flag(entry, "allowRead"),
            modify_all_records: flag(entry, "modifyAllRecords"),
            view_all_records: flag(entry, "viewAllRecords"),
        },
    })
}

/// Granted only when the value is exactly `true`.
fn flag(entry: &Element, name: &str) -> bool {
    entry.scalar(name) == Some("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> PermissionIndex {
        parse_permissions(&Element::parse(xml).unwrap())
    }

    #[test]
    fn test_profile_root_recognized() {
        let index = parse("<Profile><objectPermissions><object>Case</object></objectPermissions></Profile>");
        assert_eq!(index.carrier, Some(CarrierKind::Profile));
        assert!(index.objects.contains_key("Case"));
    }

    #[test]
    fn test_unrecognized_root_is_empty() {
        let index = parse(
            "<CustomObject><objectPermissions><object>Case</object></objectPermissions></CustomObject>",
        );
        assert_eq!(index.carrier, None);
        assert!(index.is_empty());
    }

    #[test]
    fn test_field_key_without_dot_is_dropped() {
        let index = parse(
            r#"<PermissionSet>
    <fieldPermissions><editable>true</editable><field>BadKey</field><readable>true</readable></fieldPermissions>
    <fieldPermissions><field>.Name</field><readable>true</readable></fieldPermissions>
    <fieldPermissions><field>Account.</field><readable>true</readable></fieldPermissions>
    <fieldPermissions><readable>true</readable></fieldPermissions>
    <fieldPermissions><field>Account.Name</field><readable>true</readable></fieldPermissions>
</PermissionSet>"#,
        );
        let objects: Vec<_> = index.fields.keys().collect();
        assert_eq!(objects, vec!["Account"]);
        assert_eq!(index.fields.get("Account").map(Vec::len), Some(1));
    }

    #[test]
    fn test_field_key_splits_on_first_dot() {
        let index = parse(
            "<PermissionSet><fieldPermissions><field>Account.Sub.Field</field></fieldPermissions></PermissionSet>",
        );
        let fields = index.fields.get("Account").unwrap();
        assert_eq!(fields[0].field, "Sub.Field");
    }

    #[test]
    fn test_missing_flags_default_to_false() {
        let index = parse(
            r#"<PermissionSet>
    <fieldPermissions><field>Account.Name</field></fieldPermissions>
    <objectPermissions><object>Account</object><allowRead>true</allowRead></objectPermissions>
</PermissionSet>"#,
        );
        let field = &index.fields.get("Account").unwrap()[0];
        assert!(!field.editable);
        assert!(!field.readable);

        let access = index.objects.get("Account").unwrap();
        assert!(access.allow_read);
        assert!(!access.allow_create);
        assert!(!access.allow_delete);
        assert!(!access.allow_edit);
        assert!(!access.modify_all_records);
        assert!(!access.view_all_records);
    }

    #[test]
    fn test_only_exact_true_is_granted() {
        let index = parse(
            r#"<PermissionSet>
    <objectPermissions>
        <object>Account</object>
        <allowCreate>TRUE</allowCreate>
        <allowDelete> true</allowDelete>
        <allowEdit></allowEdit>
        <allowRead>1</allowRead>
        <modifyAllRecords>false</modifyAllRecords>
        <viewAllRecords>true</viewAllRecords>
    </objectPermissions>
</PermissionSet>"#,
        );
        let access = index.objects.get("Account").unwrap();
        assert_eq!(
            access.report_order(),
            [false, false, false, false, false, true]
        );
    }

    #[test]
    fn test_object_without_name_is_dropped() {
        let index = parse(
            r#"<PermissionSet>
    <objectPermissions><allowRead>true</allowRead></objectPermissions>
    <objectPermissions><object></object><allowRead>true</allowRead></objectPermissions>
</PermissionSet>"#,
        );
        assert!(index.objects.is_empty());
    }

    #[test]
    fn test_fields_grouped_in_encounter_order() {
        let index = parse(
            r#"<PermissionSet>
    <fieldPermissions><field>Contact.Phone</field></fieldPermissions>
    <fieldPermissions><field>Account.Name</field></fieldPermissions>
    <fieldPermissions><field>Contact.Email</field></fieldPermissions>
</PermissionSet>"#,
        );
        let objects: Vec<_> = index.fields.keys().collect();
        assert_eq!(objects, vec!["Contact", "Account"]);
        let contact: Vec<_> = index
            .fields
            .get("Contact")
            .unwrap()
            .iter()
            .map(|f| f.field.as_str())
            .collect();
        assert_eq!(contact, vec!["Phone", "Email"]);
    }

    #[test]
    fn test_repeated_object_entry_last_wins() {
        let index = parse(
            r#"<PermissionSet>
    <objectPermissions><object>Account</object><allowRead>true</allowRead></objectPermissions>
    <objectPermissions><object>Case</object></objectPermissions>
    <objectPermissions><object>Account</object><allowEdit>true</allowEdit></objectPermissions>
</PermissionSet>"#,
        );
        let objects: Vec<_> = index.objects.keys().collect();
        assert_eq!(objects, vec!["Account", "Case"]);
        let access = index.objects.get("Account").unwrap();
        assert!(access.allow_edit);
        assert!(!access.allow_read);
    }
}
