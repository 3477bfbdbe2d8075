// SPDX-License-Identifier: AGPL-3.0-or-later

//! Turns the derived type graph into `async-graphql` dynamic types and wires up their resolvers.
//!
//! Root operations dispatch to the [`OperationHandler`](crate::OperationHandler), every nested
//! field reads its value from the JSON-like value resolved by its parent.
use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::dynamic::{
    Enum, EnumItem, Field, FieldFuture, FieldValue, InputObject, InputValue, Object,
    ResolverContext, Union,
};
use async_graphql::indexmap::IndexMap;
use async_graphql::{Error, ErrorExtensions, Name, Value};
use log::debug;

use crate::graphql::constants::ID_FIELD;
use crate::graphql::types::{
    Discriminator, EnumType, InputObjectType, ObjectType, OperationBinding, OutputField,
    Resolution, Shape, UnionType,
};
use crate::operations::{OperationRequest, RequestAuth, SharedOperationHandler};

/// Maps enum value names used in arguments back to the strings the operation handler expects,
/// for example locale codes.
///
/// Values are looked up by the declared type of their argument or input field, enums of different
/// types may use the same value name for different strings.
#[derive(Debug, Clone, Default)]
pub struct ArgumentEnums {
    /// Enum type name to value name to stored string.
    enums: HashMap<String, HashMap<String, String>>,

    /// Input object type name to field name to field type name.
    inputs: HashMap<String, HashMap<String, String>>,
}

impl ArgumentEnums {
    /// Collects the values of the given enum types and the field types of all input objects.
    pub fn new<'a>(
        enums: impl IntoIterator<Item = &'a EnumType>,
        inputs: impl IntoIterator<Item = &'a InputObjectType>,
    ) -> Self {
        let enums = enums
            .into_iter()
            .map(|enumeration| {
                let values = enumeration
                    .values
                    .iter()
                    .map(|item| (item.name.clone(), item.value.clone()))
                    .collect();
                (enumeration.name.clone(), values)
            })
            .collect();

        let inputs = inputs
            .into_iter()
            .map(|input| {
                let fields = input
                    .fields
                    .iter()
                    .map(|field| (field.name.clone(), field.ty.name.clone()))
                    .collect();
                (input.name.clone(), fields)
            })
            .collect();

        Self { enums, inputs }
    }

    /// Replaces enum values of a value declared as `type_name` with their strings, recursively.
    ///
    /// Enum values may arrive as names or as strings holding the name.
    pub fn convert(&self, value: Value, type_name: &str) -> Value {
        match value {
            Value::List(items) => Value::List(
                items
                    .into_iter()
                    .map(|item| self.convert(item, type_name))
                    .collect(),
            ),
            Value::Enum(name) => self.enum_value(type_name, name.as_str()),
            Value::String(name) if self.enums.contains_key(type_name) => {
                self.enum_value(type_name, &name)
            }
            Value::Object(fields) => match self.inputs.get(type_name) {
                Some(types) => Value::Object(
                    fields
                        .into_iter()
                        .map(|(name, value)| {
                            let field_type = types.get(name.as_str()).map_or("", String::as_str);
                            let value = self.convert(value, field_type);
                            (name, value)
                        })
                        .collect(),
                ),
                None => Value::Object(fields),
            },
            value => value,
        }
    }

    fn enum_value(&self, type_name: &str, name: &str) -> Value {
        let value = self
            .enums
            .get(type_name)
            .and_then(|values| values.get(name))
            .cloned()
            .unwrap_or_else(|| name.to_string());
        Value::String(value)
    }
}

/// Resolution of one output field together with what the resolver needs to know about its type.
#[derive(Debug, Clone)]
struct FieldResolver {
    resolution: Resolution,
    list: bool,
    argument_types: Arc<HashMap<String, String>>,
}

/// Returns the dynamic object type.
pub fn to_object(object: &ObjectType) -> Object {
    let mut result = Object::new(&object.name);

    if let Some(description) = &object.description {
        result = result.description(description);
    }

    for field in &object.fields {
        result = result.field(to_field(field));
    }

    result
}

fn to_field(field: &OutputField) -> Field {
    let mut result = match &field.resolution {
        Resolution::Custom(resolver) => {
            let resolver = resolver.clone();
            Field::new(&field.name, field.ty.to_type_ref(), move |ctx| resolver(ctx))
        }
        resolution => {
            let resolver = FieldResolver {
                resolution: resolution.clone(),
                list: field.ty.list,
                argument_types: Arc::new(
                    field
                        .args
                        .iter()
                        .map(|argument| (argument.name.clone(), argument.ty.name.clone()))
                        .collect(),
                ),
            };

            Field::new(&field.name, field.ty.to_type_ref(), move |ctx| {
                let resolver = resolver.clone();
                FieldFuture::new(async move { resolve_field(ctx, resolver).await })
            })
        }
    };

    for argument in &field.args {
        result = result.argument(InputValue::new(&argument.name, argument.ty.to_type_ref()));
    }

    if let Some(description) = &field.description {
        result = result.description(description);
    }

    result
}

/// Returns the dynamic input object type.
pub fn to_input(input: &InputObjectType) -> InputObject {
    input.fields.iter().fold(InputObject::new(&input.name), |result, field| {
        result.field(InputValue::new(&field.name, field.ty.to_type_ref()))
    })
}

/// Returns the dynamic union type.
pub fn to_union(union: &UnionType) -> Union {
    union
        .members
        .iter()
        .fold(Union::new(&union.name), |result, member| {
            result.possible_type(member)
        })
}

/// Returns the dynamic enum type.
pub fn to_enum(enumeration: &EnumType) -> Enum {
    enumeration
        .values
        .iter()
        .fold(Enum::new(&enumeration.name), |result, item| {
            result.item(EnumItem::new(&item.name))
        })
}

async fn resolve_field<'a>(
    ctx: ResolverContext<'a>,
    resolver: FieldResolver,
) -> Result<Option<FieldValue<'a>>, Error> {
    let parent = ctx.parent_value.as_value();

    match &resolver.resolution {
        Resolution::Property(shape) => {
            let value = property(parent, ctx.field().name());
            shape_value(value, shape, resolver.list, parent)
        }
        Resolution::Renamed(name, shape) => {
            let value = property(parent, name);
            shape_value(value, shape, resolver.list, parent)
        }
        Resolution::Operation(binding, shape) => {
            let value = dispatch(&ctx, binding, &resolver.argument_types).await?;
            shape_value(value, shape, resolver.list, None)
        }
        // Custom resolvers are called directly by the field
        Resolution::Custom(_) => Ok(FieldValue::NONE),
    }
}

/// Passes the arguments of a root field to the operation handler.
async fn dispatch(
    ctx: &ResolverContext<'_>,
    binding: &OperationBinding,
    argument_types: &HashMap<String, String>,
) -> Result<Value, Error> {
    let handler = ctx.data::<SharedOperationHandler>()?;
    let enums = ctx.data_opt::<ArgumentEnums>();

    let arguments = ctx
        .args
        .iter()
        .map(|(name, value)| {
            // Enum values deserialize into their names as strings
            let value = value.deserialize::<Value>()?;
            let value = match (enums, argument_types.get(name.as_str())) {
                (Some(enums), Some(type_name)) => enums.convert(value, type_name),
                _ => value,
            };
            Ok((name.clone(), value))
        })
        .collect::<Result<IndexMap<Name, Value>, Error>>()?;

    let request = OperationRequest {
        operation: binding.operation,
        entity: binding.entity.clone(),
        arguments,
        auth: ctx.data_opt::<RequestAuth>().cloned(),
    };

    debug!(
        "Dispatch {} operation of field '{}'",
        binding.operation,
        ctx.field().name()
    );

    handler
        .handle(request)
        .await
        .map_err(|err| err.extend())
}

/// Reads a property of the parent object, missing properties are null.
fn property(parent: Option<&Value>, name: &str) -> Value {
    match parent {
        Some(Value::Object(fields)) => fields.get(name).cloned().unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

/// Converts a resolved value into the shape of the field type.
fn shape_value<'a>(
    value: Value,
    shape: &Shape,
    list: bool,
    parent: Option<&Value>,
) -> Result<Option<FieldValue<'a>>, Error> {
    if value == Value::Null {
        return Ok(FieldValue::NONE);
    }

    match value {
        Value::List(items) if list => {
            let items = items
                .into_iter()
                .map(|item| shape_item(item, shape, parent))
                .collect::<Result<Vec<_>, Error>>()?;
            Ok(Some(FieldValue::list(items)))
        }
        value => shape_item(value, shape, parent).map(Some),
    }
}

fn shape_item<'a>(
    value: Value,
    shape: &Shape,
    parent: Option<&Value>,
) -> Result<FieldValue<'a>, Error> {
    if value == Value::Null {
        return Ok(FieldValue::NULL);
    }

    match shape {
        Shape::Plain => Ok(FieldValue::value(value)),
        Shape::Relation => Ok(FieldValue::value(relation_value(value))),
        Shape::Enum(enumeration) => match &value {
            Value::String(stored) => match enumeration.name_of(stored) {
                Some(name) => Ok(FieldValue::value(Value::Enum(Name::new(name)))),
                None => Err(Error::new(format!(
                    "Value '{}' is not part of enum {}",
                    stored, enumeration.name
                ))),
            },
            // Values which already are enum names
            Value::Enum(_) => Ok(FieldValue::value(value)),
            _ => Err(Error::new(format!(
                "Expected string value for enum {}",
                enumeration.name
            ))),
        },
        Shape::Union(union) => {
            let discriminator = match &union.discriminator {
                Discriminator::Own(key) => property(Some(&value), key),
                Discriminator::Parent(key) => property(parent, key),
            };

            let type_name = match &discriminator {
                Value::String(key) => union.members.get(key),
                _ => None,
            }
            .ok_or_else(|| Error::new(format!("Can not resolve union member of {discriminator}")))?;

            let value = if union.relation {
                relation_value(value)
            } else {
                value
            };

            Ok(FieldValue::value(value).with_type(type_name.clone()))
        }
    }
}

/// Unpopulated relationships hold the identifier of the related document only.
fn relation_value(value: Value) -> Value {
    match value {
        Value::Object(_) => value,
        id => {
            let mut fields = IndexMap::new();
            fields.insert(Name::new(ID_FIELD), id);
            Value::Object(fields)
        }
    }
}
