//! Metadata fixtures for end-to-end report tests
//!
//! Builds an SFDX-style source tree in a temp directory:
//! - `permissionsets/` and `profiles/` with permission files
//! - `objects/<Object>/` with object and field definitions

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub const SALES_OPS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<PermissionSet xmlns="http://soap.sforce.com/2006/04/metadata">
    <fieldPermissions>
        <editable>true</editable>
        <field>Account.Name</field>
        <readable>true</readable>
    </fieldPermissions>
    <fieldPermissions>
        <editable>false</editable>
        <field>Contact.Email</field>
        <readable>true</readable>
    </fieldPermissions>
    <fieldPermissions>
        <editable>true</editable>
        <field>BadKey</field>
        <readable>true</readable>
    </fieldPermissions>
    <label>Sales Ops</label>
    <objectPermissions>
        <allowCreate>false</allowCreate>
        <allowDelete>false</allowDelete>
        <allowEdit>false</allowEdit>
        <allowRead>true</allowRead>
        <modifyAllRecords>false</modifyAllRecords>
        <object>Account</object>
        <viewAllRecords>false</viewAllRecords>
    </objectPermissions>
</PermissionSet>
"#;

pub const ADMIN_PROFILE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Profile xmlns="http://soap.sforce.com/2006/04/metadata">
    <custom>false</custom>
    <objectPermissions>
        <allowCreate>true</allowCreate>
        <allowDelete>true</allowDelete>
        <allowEdit>true</allowEdit>
        <allowRead>true</allowRead>
        <modifyAllRecords>true</modifyAllRecords>
        <object>Invoice__c</object>
        <viewAllRecords>true</viewAllRecords>
    </objectPermissions>
</Profile>
"#;

pub const NO_PERMISSIONS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<PermissionSet xmlns="http://soap.sforce.com/2006/04/metadata">
    <label>Empty</label>
</PermissionSet>
"#;

pub const MALFORMED: &str = "<PermissionSet><objectPermissions><object>Account";

/// A metadata source tree rooted in a temp directory
pub struct SourceTree {
    dir: TempDir,
}

impl SourceTree {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn permission_sets(&self) -> PathBuf {
        self.root().join("permissionsets")
    }

    pub fn profiles(&self) -> PathBuf {
        self.root().join("profiles")
    }

    pub fn objects(&self) -> PathBuf {
        self.root().join("objects")
    }

    pub fn output(&self) -> PathBuf {
        self.root().join("out/permissions.xlsx")
    }

    /// Write `contents` to `rel` under the root, creating parent directories
    pub fn write(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.root().join(rel);
        fs::create_dir_all(path.parent().expect("fixture has a parent")).expect("create fixture dir");
        fs::write(&path, contents).expect("write fixture");
        path
    }

    pub fn permission_set(&self, name: &str, contents: &str) -> PathBuf {
        self.write(&format!("permissionsets/{}.permissionset-meta.xml", name), contents)
    }

    pub fn profile(&self, name: &str, contents: &str) -> PathBuf {
        self.write(&format!("profiles/{}.profile-meta.xml", name), contents)
    }

    pub fn object_label(&self, object: &str, label: &str) -> PathBuf {
        self.write(
            &format!("objects/{0}/{0}.object-meta.xml", object),
            &format!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<CustomObject xmlns=\"http://soap.sforce.com/2006/04/metadata\">\n    <label>{}</label>\n</CustomObject>\n",
                label
            ),
        )
    }

    pub fn field_label(&self, object: &str, field: &str, label: &str) -> PathBuf {
        self.write(
            &format!("objects/{}/fields/{}.field-meta.xml", object, field),
            &format!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<CustomField xmlns=\"http://soap.sforce.com/2006/04/metadata\">\n    <fullName>{}</fullName>\n    <label>{}</label>\n</CustomField>\n",
                field, label
            ),
        )
    }
}
