// SPDX-License-Identifier: AGPL-3.0-or-later

use serde::{Deserialize, Serialize};

/// Single entry of a field tree.
///
/// Attributes shared by every field kind live on this struct, kind specific attributes and
/// children are part of [`FieldKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name, absent for layout-only kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Documents must contain a value for this field.
    #[serde(default)]
    pub required: bool,

    /// Value is stored once per configured locale.
    #[serde(default)]
    pub localized: bool,

    /// Value is copied into the session token of auth collections.
    #[serde(default, rename = "saveToJWT")]
    pub save_to_jwt: bool,

    /// Explicit query complexity estimate of this field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<usize>,

    /// Overrides the derived GraphQL type name of group, array and tab shapes.
    #[serde(
        default,
        rename = "interfaceName",
        skip_serializing_if = "Option::is_none"
    )]
    pub interface_name: Option<String>,

    /// Kind of the field.
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl Field {
    /// Returns a named field of the given kind with all other attributes unset.
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: Some(name.to_string()),
            required: false,
            localized: false,
            save_to_jwt: false,
            complexity: None,
            interface_name: None,
            kind,
        }
    }

    /// Returns a layout-only field without a name.
    pub fn layout(kind: FieldKind) -> Self {
        Self {
            name: None,
            ..Self::new("", kind)
        }
    }

    /// Marks this field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks this field as localized.
    pub fn localized(mut self) -> Self {
        self.localized = true;
        self
    }

    /// Returns the name of this field, or an empty string for layout fields.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Layout-only fields group other fields in editing interfaces but do not change the shape
    /// of stored documents.
    pub fn is_layout(&self) -> bool {
        matches!(
            self.kind,
            FieldKind::Row { .. } | FieldKind::Collapsible { .. } | FieldKind::Tabs { .. }
        )
    }

    /// Returns true if the field has a name and contributes to the stored document.
    pub fn affects_data(&self) -> bool {
        !self.is_layout() && self.name.is_some()
    }

    /// Returns true if the field points at documents of other collections.
    pub fn is_relational(&self) -> bool {
        matches!(
            self.kind,
            FieldKind::Relationship { .. } | FieldKind::Upload { .. }
        )
    }
}

/// Closed set of supported field kinds, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldKind {
    /// Single line string.
    Text,

    /// Email address string.
    Email,

    /// Multi line string.
    Textarea,

    /// Source code string.
    Code,

    /// Arbitrary JSON value.
    Json,

    /// Rich text document, stored as JSON.
    RichText,

    /// Floating point number, or a list of them.
    Number {
        #[serde(default, rename = "hasMany")]
        has_many: bool,
    },

    /// Boolean value.
    Checkbox,

    /// Date and time string.
    Date,

    /// Geographic coordinate as `[longitude, latitude]`.
    Point,

    /// One value out of a fixed set of options.
    Radio { options: Vec<SelectOption> },

    /// One or many values out of a fixed set of options.
    Select {
        options: Vec<SelectOption>,
        #[serde(default, rename = "hasMany")]
        has_many: bool,
    },

    /// Reference to documents of one or several collections.
    Relationship {
        #[serde(rename = "relationTo")]
        relation_to: RelationTo,
        #[serde(default, rename = "hasMany")]
        has_many: bool,
    },

    /// Reference to a document of an upload collection.
    Upload {
        #[serde(rename = "relationTo")]
        relation_to: String,
    },

    /// Named object of nested fields.
    Group { fields: Vec<Field> },

    /// List of objects of nested fields.
    Array { fields: Vec<Field> },

    /// List of objects, each one shaped by one of several blocks.
    Blocks {
        #[serde(default)]
        blocks: Vec<Block>,
        /// Slugs of blocks defined in the shared block library.
        #[serde(default, rename = "blockReferences")]
        block_references: Vec<String>,
    },

    /// Layout-only horizontal grouping.
    Row { fields: Vec<Field> },

    /// Layout-only collapsible grouping.
    Collapsible { fields: Vec<Field> },

    /// Tabbed grouping. Named tabs nest their fields like a group, unnamed tabs are layout-only.
    Tabs { tabs: Vec<Tab> },
}

impl FieldKind {
    /// Configuration name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Textarea => "textarea",
            FieldKind::Code => "code",
            FieldKind::Json => "json",
            FieldKind::RichText => "richText",
            FieldKind::Number { .. } => "number",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Date => "date",
            FieldKind::Point => "point",
            FieldKind::Radio { .. } => "radio",
            FieldKind::Select { .. } => "select",
            FieldKind::Relationship { .. } => "relationship",
            FieldKind::Upload { .. } => "upload",
            FieldKind::Group { .. } => "group",
            FieldKind::Array { .. } => "array",
            FieldKind::Blocks { .. } => "blocks",
            FieldKind::Row { .. } => "row",
            FieldKind::Collapsible { .. } => "collapsible",
            FieldKind::Tabs { .. } => "tabs",
        }
    }
}

/// Option of a select or radio field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectOption {
    /// Option where label and value are the same string.
    Value(String),

    /// Option with a separate label.
    Labelled { label: String, value: String },
}

impl SelectOption {
    /// Stored value of this option.
    pub fn value(&self) -> &str {
        match self {
            SelectOption::Value(value) => value,
            SelectOption::Labelled { value, .. } => value,
        }
    }
}

impl From<&str> for SelectOption {
    fn from(value: &str) -> Self {
        SelectOption::Value(value.to_string())
    }
}

/// Target collection(s) of a relationship field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationTo {
    /// Relates to documents of one collection.
    One(String),

    /// Relates to documents of several collections, values carry the collection they belong to.
    Many(Vec<String>),
}

impl RelationTo {
    /// Slugs of all target collections.
    pub fn slugs(&self) -> Vec<&str> {
        match self {
            RelationTo::One(slug) => vec![slug.as_str()],
            RelationTo::Many(slugs) => slugs.iter().map(String::as_str).collect(),
        }
    }

    /// Returns true if values of this relationship can point at more than one collection.
    pub fn is_polymorphic(&self) -> bool {
        matches!(self, RelationTo::Many(_))
    }
}

/// Reusable shape of an entry in a blocks field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Identifier of the block, stored as `blockType` on every entry.
    pub slug: String,

    /// Overrides the name the GraphQL type of this block is derived from.
    #[serde(
        default,
        rename = "singularName",
        skip_serializing_if = "Option::is_none"
    )]
    pub singular_name: Option<String>,

    /// Fields of this block.
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// Tab of a tabs field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    /// Named tabs store their fields in a nested object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Overrides the derived GraphQL type name of a named tab.
    #[serde(
        default,
        rename = "interfaceName",
        skip_serializing_if = "Option::is_none"
    )]
    pub interface_name: Option<String>,

    /// Fields of this tab.
    #[serde(default)]
    pub fields: Vec<Field>,
}
