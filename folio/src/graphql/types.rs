// SPDX-License-Identifier: AGPL-3.0-or-later

//! Intermediate description of the derived type graph.
//!
//! Builders produce these plain values instead of `async-graphql` types directly. This keeps the
//! graph inspectable (tests, complexity estimation) and turns it into a dynamic schema only once,
//! when everything got derived.
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_graphql::dynamic::{FieldFuture, ResolverContext, TypeRef};

use crate::operations::{EntityRef, Operation};

/// Reference to a named type, including list and non-null wrappers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GqlType {
    /// Name of the referenced type.
    pub name: String,

    /// Type is a list of `name`.
    pub list: bool,

    /// Value can not be null.
    pub required: bool,

    /// Items of a list can not be null.
    pub item_required: bool,
}

impl GqlType {
    /// Nullable reference to a named type.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            list: false,
            required: false,
            item_required: false,
        }
    }

    /// Non-null reference to a named type.
    pub fn named_nn(name: &str) -> Self {
        Self::named(name).required_if(true)
    }

    /// Nullable list of non-null items.
    pub fn list_of(name: &str) -> Self {
        Self {
            name: name.to_string(),
            list: true,
            required: false,
            item_required: true,
        }
    }

    /// Nullable list of nullable items.
    pub fn list_of_nullable(name: &str) -> Self {
        Self {
            item_required: false,
            ..Self::list_of(name)
        }
    }

    /// Makes the outer type non-null if `required` is true.
    pub fn required_if(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Returns the `async-graphql` type reference.
    pub fn to_type_ref(&self) -> TypeRef {
        match (self.list, self.item_required, self.required) {
            (false, _, false) => TypeRef::named(&self.name),
            (false, _, true) => TypeRef::named_nn(&self.name),
            (true, false, false) => TypeRef::named_list(&self.name),
            (true, true, false) => TypeRef::named_nn_list(&self.name),
            (true, false, true) => TypeRef::named_list_nn(&self.name),
            (true, true, true) => TypeRef::named_nn_list_nn(&self.name),
        }
    }
}

impl fmt::Display for GqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let item_marker = if self.item_required { "!" } else { "" };
        let marker = if self.required { "!" } else { "" };

        if self.list {
            write!(f, "[{}{}]{}", self.name, item_marker, marker)
        } else {
            write!(f, "{}{}", self.name, marker)
        }
    }
}

/// Argument of an output field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    /// Argument name.
    pub name: String,

    /// Argument type, always an input or scalar type.
    pub ty: GqlType,
}

impl Argument {
    /// Returns an argument.
    pub fn new(name: &str, ty: GqlType) -> Self {
        Self {
            name: name.to_string(),
            ty,
        }
    }
}

/// Resolver signature of custom root fields.
pub type CustomResolver =
    Arc<dyn for<'a> Fn(ResolverContext<'a>) -> FieldFuture<'a> + Send + Sync>;

/// Describes how an output field gets its value.
#[derive(Clone)]
pub enum Resolution {
    /// Reads the property with the field's name from the parent value.
    Property(Shape),

    /// Reads a property with a different name from the parent value.
    Renamed(String, Shape),

    /// Dispatches to the operation handler.
    Operation(OperationBinding, Shape),

    /// Custom resolver function.
    Custom(CustomResolver),
}

impl Resolution {
    /// Plain property lookup.
    pub fn property() -> Self {
        Resolution::Property(Shape::Plain)
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Property(shape) => f.debug_tuple("Property").field(shape).finish(),
            Resolution::Renamed(name, shape) => {
                f.debug_tuple("Renamed").field(name).field(shape).finish()
            }
            Resolution::Operation(binding, shape) => f
                .debug_tuple("Operation")
                .field(binding)
                .field(shape)
                .finish(),
            Resolution::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// Operation a root field dispatches to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationBinding {
    /// Bound operation.
    pub operation: Operation,

    /// Targeted collection or global.
    pub entity: Option<EntityRef>,
}

impl OperationBinding {
    /// Binds an operation to an entity.
    pub fn new(operation: Operation, entity: Option<EntityRef>) -> Self {
        Self { operation, entity }
    }
}

/// Conversion of resolved values into the field's GraphQL type.
#[derive(Debug, Clone)]
pub enum Shape {
    /// Values are returned as they are.
    Plain,

    /// Related documents. Values which are not objects are unpopulated identifiers and get
    /// returned as objects holding only the `id`.
    Relation,

    /// Stored strings are mapped to enum value names.
    Enum(Arc<EnumType>),

    /// Values resolve to one member of a union.
    Union(Arc<UnionShape>),
}

/// Selects the union member a value resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionShape {
    /// Where the discriminating string is read from.
    pub discriminator: Discriminator,

    /// Maps discriminator values to member type names.
    pub members: HashMap<String, String>,

    /// Values are related documents which might be unpopulated.
    pub relation: bool,
}

/// Location of the discriminating string of a union value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discriminator {
    /// Property of the value itself, for example `blockType` of block entries.
    Own(String),

    /// Property of the parent value, for example `relationTo` of polymorphic relationships.
    Parent(String),
}

/// Output field of an object type.
#[derive(Debug, Clone)]
pub struct OutputField {
    /// Field name.
    pub name: String,

    /// Return type.
    pub ty: GqlType,

    /// Arguments.
    pub args: Vec<Argument>,

    /// How the value is resolved.
    pub resolution: Resolution,

    /// Complexity estimate of this field, excluding its sub-selection.
    pub complexity: usize,

    /// Value depends on the requested locale.
    pub localized: bool,

    /// Field description.
    pub description: Option<String>,
}

impl OutputField {
    /// Field reading the property with the same name from its parent value.
    pub fn new(name: &str, ty: GqlType) -> Self {
        Self {
            name: name.to_string(),
            ty,
            args: Vec::new(),
            resolution: Resolution::property(),
            complexity: crate::graphql::constants::DEFAULT_COMPLEXITY,
            localized: false,
            description: None,
        }
    }

    /// Adds an argument.
    pub fn argument(mut self, name: &str, ty: GqlType) -> Self {
        self.args.push(Argument::new(name, ty));
        self
    }

    /// Adds several arguments.
    pub fn arguments(mut self, args: Vec<Argument>) -> Self {
        self.args.extend(args);
        self
    }

    /// Sets the resolution of this field.
    pub fn resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Binds this field to an operation, returning values as they are.
    pub fn operation(self, operation: Operation, entity: Option<EntityRef>) -> Self {
        self.resolution(Resolution::Operation(
            OperationBinding::new(operation, entity),
            Shape::Plain,
        ))
    }

    /// Sets the complexity estimate of this field.
    pub fn complexity(mut self, complexity: usize) -> Self {
        self.complexity = complexity;
        self
    }

    /// Sets the description of this field.
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Returns an argument by name.
    pub fn arg(&self, name: &str) -> Option<&Argument> {
        self.args.iter().find(|arg| arg.name == name)
    }
}

/// Object type.
#[derive(Debug, Clone)]
pub struct ObjectType {
    /// Type name.
    pub name: String,

    /// Type description.
    pub description: Option<String>,

    /// Fields in declaration order.
    pub fields: Vec<OutputField>,
}

impl ObjectType {
    /// Returns an object type without description.
    pub fn new(name: &str, fields: Vec<OutputField>) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            fields,
        }
    }

    /// Returns a field by name.
    pub fn field(&self, name: &str) -> Option<&OutputField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Returns the names of all fields in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.name.as_str()).collect()
    }
}

/// Field of an input object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputField {
    /// Field name.
    pub name: String,

    /// Field type.
    pub ty: GqlType,
}

impl InputField {
    /// Returns an input field.
    pub fn new(name: &str, ty: GqlType) -> Self {
        Self {
            name: name.to_string(),
            ty,
        }
    }
}

/// Input object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputObjectType {
    /// Type name.
    pub name: String,

    /// Fields in declaration order.
    pub fields: Vec<InputField>,
}

impl InputObjectType {
    /// Returns a field by name.
    pub fn field(&self, name: &str) -> Option<&InputField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Returns the names of all fields in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.name.as_str()).collect()
    }
}

/// Union of object types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionType {
    /// Type name.
    pub name: String,

    /// Names of the member object types.
    pub members: Vec<String>,
}

/// Value of an enum type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    /// GraphQL name of the value.
    pub name: String,

    /// Stored value.
    pub value: String,
}

/// Enum type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    /// Type name.
    pub name: String,

    /// Values in declaration order.
    pub values: Vec<EnumValue>,
}

impl EnumType {
    /// Returns the GraphQL name of a stored value.
    pub fn name_of(&self, value: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|item| item.value == value)
            .map(|item| item.name.as_str())
    }

    /// Returns the stored value of a GraphQL enum name.
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|item| item.name == name)
            .map(|item| item.value.as_str())
    }
}

/// Any named type of the type graph.
#[derive(Debug, Clone)]
pub enum NamedType {
    /// Object type.
    Object(Arc<ObjectType>),
    /// Input object type.
    Input(Arc<InputObjectType>),
    /// Union type.
    Union(Arc<UnionType>),
    /// Enum type.
    Enum(Arc<EnumType>),
}

impl NamedType {
    /// Name of this type.
    pub fn name(&self) -> &str {
        match self {
            NamedType::Object(object) => &object.name,
            NamedType::Input(input) => &input.name,
            NamedType::Union(union) => &union.name,
            NamedType::Enum(enumeration) => &enumeration.name,
        }
    }
}

impl From<ObjectType> for NamedType {
    fn from(object: ObjectType) -> Self {
        NamedType::Object(Arc::new(object))
    }
}

impl From<InputObjectType> for NamedType {
    fn from(input: InputObjectType) -> Self {
        NamedType::Input(Arc::new(input))
    }
}

impl From<UnionType> for NamedType {
    fn from(union: UnionType) -> Self {
        NamedType::Union(Arc::new(union))
    }
}

impl From<EnumType> for NamedType {
    fn from(enumeration: EnumType) -> Self {
        NamedType::Enum(Arc::new(enumeration))
    }
}
