//! Permission value types.

/// Read/edit grant on one field of one object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPermission {
    /// Field API name, without the object prefix.
    pub field: String,
    pub editable: bool,
    pub readable: bool,
}

/// Object-level grants. The default grants nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectAccess {
    pub allow_create: bool,
    pub allow_delete: bool,
    pub allow_edit: bool,
    pub allow_read: bool,
    pub modify_all_records: bool,
    pub view_all_records: bool,
}

impl ObjectAccess {
    /// Grants in report column order: Edit, Read, Create, Delete, Modify All, View All.
    pub fn report_order(&self) -> [bool; 6] {
        [
            self.allow_edit,
            self.allow_read,
            self.allow_create,
            self.allow_delete,
            self.modify_all_records,
            self.view_all_records,
        ]
    }
}

/// Object-level grants for one object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectPermission {
    pub object: String,
    pub access: ObjectAccess,
}
