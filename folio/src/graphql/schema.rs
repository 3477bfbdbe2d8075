// SPDX-License-Identifier: AGPL-3.0-or-later

//! Build and manage the GraphQL schema derived from the content configuration.
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use async_graphql::dynamic::Schema;
use async_graphql::{Request, Response};
use dynamic_graphql::internal::Registry;
use log::{debug, info};
use tokio::sync::RwLock;

use crate::adapter::DatabaseAdapter;
use crate::collections::{sanitize_collection, sanitize_global};
use crate::config::Configuration;
use crate::errors::SchemaError;
use crate::graphql::builders::{
    build_access_type, build_locale_types, BuildContext, RelationTarget,
};
use crate::graphql::complexity::{ComplexityLimit, ComplexityTable};
use crate::graphql::constants::{
    ACCESS_QUERY, ACCESS_TYPE, FALLBACK_LOCALE_INPUT_TYPE, LOCALE_INPUT_TYPE, MUTATION, QUERY,
};
use crate::graphql::entities::{
    register_collection, register_global, CollectionEntity, GlobalEntity, GraphParts,
};
use crate::graphql::input_values::{
    BooleanOperator, DateOperator, JsonOperator, NumberOperator, PointOperator, RelationOperator,
    TextOperator,
};
use crate::graphql::naming::NameTable;
use crate::graphql::registry::TypeRegistry;
use crate::graphql::resolvers::{to_enum, to_input, to_object, to_union, ArgumentEnums};
use crate::graphql::root::RootFields;
use crate::graphql::scalars::{DateTimeScalar, JsonScalar};
use crate::graphql::types::{
    EnumType, GqlType, InputObjectType, NamedType, ObjectType, OutputField,
};
use crate::operations::{Operation, SharedOperationHandler};

/// Suffix of enums naming the target collection in polymorphic relationship inputs.
const RELATION_INPUT_ENUM_SUFFIX: &str = "RelationshipInputRelationTo";

/// Adds custom root fields on top of the generated ones.
///
/// Custom fields are merged after all collections and globals got derived. A custom field with
/// the name of a generated one replaces it.
pub trait CustomOperations: Send + Sync {
    /// Returns additional query fields.
    ///
    /// `generated` holds the query fields derived so far, types used by the returned fields can be
    /// added to `registry`.
    fn queries(
        &self,
        _registry: &mut TypeRegistry,
        _generated: &RootFields,
    ) -> Result<Vec<OutputField>, SchemaError> {
        Ok(Vec::new())
    }

    /// Returns additional mutation fields.
    fn mutations(
        &self,
        _registry: &mut TypeRegistry,
        _generated: &RootFields,
    ) -> Result<Vec<OutputField>, SchemaError> {
        Ok(Vec::new())
    }
}

/// Derived types and root fields, before they are turned into an executable schema.
#[derive(Debug)]
pub struct TypeGraph {
    /// All named types.
    pub registry: TypeRegistry,

    /// Fields of the root query.
    pub query: RootFields,

    /// Fields of the root mutation.
    pub mutation: RootFields,

    /// Queries with a higher complexity get rejected.
    pub max_complexity: usize,
}

impl TypeGraph {
    /// Turns the type graph into an executable schema.
    ///
    /// Every root field dispatches to `handler`.
    pub fn finish(self, handler: SharedOperationHandler) -> Result<Schema, SchemaError> {
        // Static input types and scalars are defined once and shared by all schemas
        let registry = Registry::new()
            .register::<JsonScalar>()
            .register::<DateTimeScalar>()
            .register::<TextOperator>()
            .register::<NumberOperator>()
            .register::<DateOperator>()
            .register::<BooleanOperator>()
            .register::<RelationOperator>()
            .register::<JsonOperator>()
            .register::<PointOperator>();

        let mutation = (!self.mutation.is_empty()).then(|| MUTATION);
        let mut schema_builder = Schema::build(QUERY, mutation, None);
        schema_builder = registry.apply_into_schema_builder(schema_builder);

        let mut objects: Vec<Arc<ObjectType>> = Vec::new();
        let mut argument_enums: Vec<Arc<EnumType>> = Vec::new();
        let mut inputs: Vec<Arc<InputObjectType>> = Vec::new();

        for ty in self.registry.types() {
            schema_builder = match ty {
                NamedType::Object(object) => {
                    objects.push(object.clone());
                    schema_builder.register(to_object(object))
                }
                NamedType::Input(input) => {
                    inputs.push(input.clone());
                    schema_builder.register(to_input(input))
                }
                NamedType::Union(union) => schema_builder.register(to_union(union)),
                NamedType::Enum(enumeration) => {
                    if is_argument_enum(&enumeration.name) {
                        argument_enums.push(enumeration.clone());
                    }
                    schema_builder.register(to_enum(enumeration))
                }
            };
        }

        let query = self.query.to_object();
        schema_builder = schema_builder.register(to_object(&query));
        objects.push(Arc::new(query));

        if mutation.is_some() {
            let mutation = self.mutation.to_object();
            schema_builder = schema_builder.register(to_object(&mutation));
            objects.push(Arc::new(mutation));
        }

        let complexity = ComplexityTable::new(objects.iter().map(|object| object.as_ref()));
        let argument_enums = ArgumentEnums::new(
            argument_enums.iter().map(|enumeration| enumeration.as_ref()),
            inputs.iter().map(|input| input.as_ref()),
        );

        let schema = schema_builder
            .data(handler)
            .data(argument_enums)
            .extension(ComplexityLimit::new(complexity, self.max_complexity))
            .finish()?;

        Ok(schema)
    }
}

/// Enums whose values are passed as arguments into the operation handler.
fn is_argument_enum(name: &str) -> bool {
    name == LOCALE_INPUT_TYPE
        || name == FALLBACK_LOCALE_INPUT_TYPE
        || name.ends_with(RELATION_INPUT_ENUM_SUFFIX)
}

/// Derives the GraphQL schema from a configuration.
///
/// Each build starts with empty type and name registries, builds never share state.
#[derive(Clone)]
pub struct SchemaBuilder {
    config: Configuration,
    adapter: Arc<dyn DatabaseAdapter>,
    extensions: Vec<Arc<dyn CustomOperations>>,
}

impl SchemaBuilder {
    /// Returns a builder for the given configuration and storage adapter.
    pub fn new(config: Configuration, adapter: Arc<dyn DatabaseAdapter>) -> Self {
        Self {
            config,
            adapter,
            extensions: Vec::new(),
        }
    }

    /// Adds custom root fields. Extensions are applied in the order they were added.
    pub fn extension(mut self, extension: impl CustomOperations + 'static) -> Self {
        self.extensions.push(Arc::new(extension));
        self
    }

    /// Replaces the configuration, keeping adapter and extensions.
    pub fn with_config(mut self, config: Configuration) -> Self {
        self.config = config;
        self
    }

    /// Configuration the schema is derived from.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Derives all types and root fields.
    pub fn derive(&self) -> Result<TypeGraph, SchemaError> {
        let config = &self.config;

        let mut names = NameTable::new();
        let mut targets = Vec::new();

        // Names and identifier types of all collections need to be known before the first field
        // tree is built, relationships can point at any of them
        let mut collection_slugs = HashSet::new();
        let mut collections = Vec::new();
        for collection in &config.collections {
            if !collection_slugs.insert(collection.slug.as_str()) {
                return Err(SchemaError::DuplicateSlug(collection.slug.clone()));
            }

            let sanitized = sanitize_collection(collection);
            let id_type = self.adapter.collection_id_type(&sanitized.fields);

            if !sanitized.graphql.enabled {
                debug!("Collection '{}' is not exposed", sanitized.slug);
                targets.push(RelationTarget {
                    slug: sanitized.slug.clone(),
                    type_name: None,
                    id_type,
                });
                continue;
            }

            let entity_names = names.claim_collection(&sanitized.slug, &sanitized.graphql)?;
            targets.push(RelationTarget {
                slug: sanitized.slug.clone(),
                type_name: Some(entity_names.singular.clone()),
                id_type,
            });
            collections.push(CollectionEntity {
                config: sanitized,
                names: entity_names,
                id_type,
            });
        }

        let mut global_slugs = HashSet::new();
        let mut globals = Vec::new();
        for global in &config.globals {
            if !global_slugs.insert(global.slug.as_str()) {
                return Err(SchemaError::DuplicateSlug(global.slug.clone()));
            }

            let sanitized = sanitize_global(global);
            if !sanitized.graphql.enabled {
                debug!("Global '{}' is not exposed", sanitized.slug);
                continue;
            }

            let name = names.claim_global(&sanitized.slug, sanitized.graphql.name.as_deref())?;
            globals.push(GlobalEntity {
                config: sanitized,
                name,
            });
        }

        let ctx = BuildContext::new(config, targets);
        let mut parts = GraphParts::new();

        if let Some(localization) = &config.localization {
            build_locale_types(&mut parts.registry, localization)?;
        }

        for collection in &collections {
            register_collection(&ctx, &mut parts, collection)?;
        }

        for global in &globals {
            register_global(&ctx, &mut parts, global)?;
        }

        build_access_type(&mut parts.registry, &parts.policies)?;
        parts.query.insert(
            OutputField::new(ACCESS_QUERY, GqlType::named(ACCESS_TYPE))
                .operation(Operation::Access, None),
        )?;

        for extension in &self.extensions {
            let queries = extension.queries(&mut parts.registry, &parts.query)?;
            for field in queries {
                parts.query.merge(field);
            }

            let mutations = extension.mutations(&mut parts.registry, &parts.mutation)?;
            for field in mutations {
                parts.mutation.merge(field);
            }
        }

        info!(
            "Derived GraphQL schema of {} collections and {} globals with {} types",
            collections.len(),
            globals.len(),
            parts.registry.len()
        );

        Ok(TypeGraph {
            registry: parts.registry,
            query: parts.query,
            mutation: parts.mutation,
            max_complexity: config.graphql.max_complexity,
        })
    }

    /// Derives the type graph and turns it into an executable schema.
    pub fn build(&self, handler: SharedOperationHandler) -> Result<Schema, SchemaError> {
        self.derive()?.finish(handler)
    }
}

impl fmt::Debug for SchemaBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Extensions do not implement `Debug`
        f.debug_struct("SchemaBuilder")
            .field("config", &self.config)
            .field("adapter", &self.adapter)
            .field("extensions", &self.extensions.len())
            .finish()
    }
}

/// Returns the GraphQL schema of a configuration, dispatching all root fields to `handler`.
pub fn build_schema(
    config: &Configuration,
    adapter: Arc<dyn DatabaseAdapter>,
    handler: SharedOperationHandler,
) -> Result<Schema, SchemaError> {
    SchemaBuilder::new(config.to_owned(), adapter).build(handler)
}

struct ManagedSchema {
    builder: SchemaBuilder,
    schema: Schema,
}

/// Executes incoming GraphQL requests with the current schema.
///
/// The schema can be rebuilt from a new configuration during runtime. Requests being executed
/// while rebuilding finish with the schema they started with.
#[derive(Clone)]
pub struct GraphQLSchemaManager {
    current: Arc<RwLock<ManagedSchema>>,
    handler: SharedOperationHandler,
}

impl GraphQLSchemaManager {
    /// Builds the initial schema and returns a new instance of `GraphQLSchemaManager`.
    pub fn new(
        builder: SchemaBuilder,
        handler: SharedOperationHandler,
    ) -> Result<Self, SchemaError> {
        let schema = builder.build(handler.clone())?;
        debug!("Finished building initial GraphQL schema");

        Ok(Self {
            current: Arc::new(RwLock::new(ManagedSchema { builder, schema })),
            handler,
        })
    }

    /// Executes an incoming GraphQL request.
    pub async fn execute(&self, request: impl Into<Request>) -> Response {
        let schema = self.current.read().await.schema.clone();
        schema.execute(request).await
    }

    /// Replaces the schema with one derived from a new configuration.
    ///
    /// The current schema stays in place if the new configuration is invalid.
    pub async fn rebuild(&self, config: Configuration) -> Result<(), SchemaError> {
        let builder = self.current.read().await.builder.clone().with_config(config);
        let schema = builder.build(self.handler.clone())?;

        info!("Configuration changed, replaced GraphQL schema");
        *self.current.write().await = ManagedSchema { builder, schema };

        Ok(())
    }

    /// Returns the current schema in GraphQL schema definition language.
    pub async fn sdl(&self) -> String {
        self.current.read().await.schema.sdl()
    }

    /// Returns the configuration of the current schema.
    pub async fn config(&self) -> Configuration {
        self.current.read().await.builder.config().clone()
    }
}

impl fmt::Debug for GraphQLSchemaManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `Schema` and the handler do not implement `Debug`
        f.debug_struct("GraphQLSchemaManager").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_graphql::dynamic::{FieldFuture, FieldValue, ResolverContext, TypeRef};
    use async_graphql::{value, Value};
    use rstest::rstest;
    use serde_json::json;

    use crate::adapter::IdType;
    use crate::config::Configuration;
    use crate::errors::SchemaError;
    use crate::graphql::complexity::COMPLEXITY_ERROR;
    use crate::graphql::registry::TypeRegistry;
    use crate::graphql::root::RootFields;
    use crate::graphql::types::{CustomResolver, GqlType, OutputField, Resolution};
    use crate::operations::{EntityRef, Operation};
    use crate::test_utils::{blog_config, config_from_json, RecordingHandler, TestAdapter};

    use super::{CustomOperations, GraphQLSchemaManager, SchemaBuilder, TypeGraph};

    fn derive(config: Configuration) -> TypeGraph {
        SchemaBuilder::new(config, Arc::new(TestAdapter(IdType::Text)))
            .derive()
            .unwrap()
    }

    fn derive_err(config: Configuration) -> SchemaError {
        SchemaBuilder::new(config, Arc::new(TestAdapter(IdType::Text)))
            .derive()
            .unwrap_err()
    }

    #[rstest]
    fn root_operations(blog_config: Configuration) {
        let graph = derive(blog_config);

        for name in [
            "Post",
            "Posts",
            "docAccessPost",
            "versionPost",
            "versionsPosts",
            "Category",
            "Categories",
            "meUser",
            "initializedUser",
            "Menu",
            "docAccessMenu",
            "versionMenu",
            "versionsMenu",
            "Access",
        ] {
            assert!(graph.query.contains(name), "missing query {}", name);
        }

        for name in [
            "createPost",
            "updatePost",
            "deletePost",
            "restoreVersionPost",
            "loginUser",
            "logoutUser",
            "refreshTokenUser",
            "forgotPasswordUser",
            "resetPasswordUser",
            "verifyEmailUser",
            "unlockUser",
            "updateMenu",
            "restoreVersionMenu",
        ] {
            assert!(graph.mutation.contains(name), "missing mutation {}", name);
        }

        let access = graph.registry.object("Access").unwrap();
        assert_eq!(
            access.field_names(),
            ["canAccessAdmin", "posts", "categories", "users", "images", "menu"]
        );
    }

    #[test]
    fn colliding_plurals_are_prefixed() {
        let graph = derive(config_from_json(json!({
            "collections": [
                { "slug": "sheep", "fields": [{ "name": "name", "type": "text" }] },
                {
                    "slug": "people",
                    "graphQL": { "singularName": "Person", "pluralName": "Person" },
                    "fields": [{ "name": "name", "type": "text" }]
                },
            ]
        })));

        assert!(graph.query.contains("Sheep"));
        assert!(graph.query.contains("allSheep"));
        assert!(!graph.query.contains("Sheeps"));
        assert!(graph.query.contains("Person"));
        assert!(graph.query.contains("allPerson"));
    }

    #[rstest]
    #[case(IdType::Text, "String", "TextOperator")]
    #[case(IdType::Number, "Int", "NumberOperator")]
    fn synthetic_id_field(
        blog_config: Configuration,
        #[case] id_type: IdType,
        #[case] scalar: &str,
        #[case] operator: &str,
    ) {
        let graph = SchemaBuilder::new(blog_config, Arc::new(TestAdapter(id_type)))
            .derive()
            .unwrap();

        let category = graph.registry.object("Category").unwrap();
        assert_eq!(category.field("id").unwrap().ty, GqlType::named(scalar));

        let filter = graph.registry.input("Category_where").unwrap();
        assert_eq!(filter.field("id").unwrap().ty, GqlType::named(operator));

        let query = graph.query.get("Category").unwrap();
        assert_eq!(query.arg("id").unwrap().ty, GqlType::named_nn(scalar));
    }

    #[rstest]
    fn drafts_are_nullable(blog_config: Configuration) {
        let graph = derive(blog_config);

        // `title` is required but posts can be saved as drafts
        let post = graph.registry.object("Post").unwrap();
        assert!(post.fields.iter().all(|field| !field.ty.required));

        let category = graph.registry.object("Category").unwrap();
        assert!(category.field("name").unwrap().ty.required);
    }

    #[test]
    fn auth_without_local_strategy() {
        let graph = derive(config_from_json(json!({
            "collections": [{
                "slug": "users",
                "auth": { "disableLocalStrategy": true },
                "fields": [{ "name": "name", "type": "text" }]
            }]
        })));

        assert!(graph.query.contains("meUser"));
        assert!(graph.query.contains("initializedUser"));
        assert!(graph.mutation.contains("refreshTokenUser"));
        assert!(graph.mutation.contains("logoutUser"));

        for name in [
            "loginUser",
            "forgotPasswordUser",
            "resetPasswordUser",
            "verifyEmailUser",
            "unlockUser",
        ] {
            assert!(!graph.mutation.contains(name), "unexpected mutation {}", name);
        }

        // No email field is added without local strategy
        let user = graph.registry.object("User").unwrap();
        assert!(user.field("email").is_none());
    }

    #[rstest]
    #[case(0, false)]
    #[case(3, true)]
    fn unlock_depends_on_login_attempts(#[case] max_login_attempts: u32, #[case] expected: bool) {
        let graph = derive(config_from_json(json!({
            "collections": [{
                "slug": "users",
                "auth": { "maxLoginAttempts": max_login_attempts },
            }]
        })));

        assert!(graph.mutation.contains("loginUser"));
        assert_eq!(graph.mutation.contains("unlockUser"), expected);
    }

    #[rstest]
    fn update_input_mirrors_output(blog_config: Configuration) {
        let graph = derive(blog_config);

        let object = graph.registry.object("Category").unwrap();
        let input = graph.registry.input("mutationCategoryUpdateInput").unwrap();

        let mut expected = object.field_names();
        expected.retain(|name| *name != "id");
        assert_eq!(input.field_names(), expected);
    }

    #[rstest]
    fn shared_shapes_are_built_once(blog_config: Configuration) {
        let graph = derive(blog_config);

        // The library block is used by posts and their versions
        let post_layout = graph.registry.union("PostLayout").unwrap();
        let version_layout = graph.registry.union("PostVersionVersionLayout").unwrap();
        assert_eq!(post_layout.members, ["QuoteBlock"]);
        assert_eq!(version_layout.members, ["QuoteBlock"]);
        assert!(graph.registry.pending().is_empty());
    }

    #[test]
    fn self_referencing_blocks_terminate() {
        let graph = derive(config_from_json(json!({
            "blocks": [{
                "slug": "section",
                "fields": [
                    { "name": "title", "type": "text" },
                    { "name": "children", "type": "blocks", "blockReferences": ["section"] },
                ]
            }],
            "collections": [{
                "slug": "pages",
                "fields": [
                    { "name": "content", "type": "blocks", "blockReferences": ["section"] },
                ]
            }]
        })));

        let section = graph.registry.object("SectionBlock").unwrap();
        let children = section.field("children").unwrap();
        let union = graph.registry.union(&children.ty.name).unwrap();
        assert_eq!(union.members, ["SectionBlock"]);
    }

    #[test]
    fn localized_operations() {
        let graph = derive(config_from_json(json!({
            "localization": { "locales": ["en", "de-CH"], "default_locale": "en" },
            "collections": [{
                "slug": "posts",
                "fields": [{ "name": "title", "type": "text", "required": true, "localized": true }]
            }]
        })));

        let find = graph.query.get("Posts").unwrap();
        assert!(find.arg("locale").is_some());
        assert!(find.arg("fallbackLocale").is_some());

        let create = graph.mutation.get("createPost").unwrap();
        assert!(create.arg("locale").is_some());
        assert!(create.arg("fallbackLocale").is_none());

        // Localized values might be missing in the requested locale
        let post = graph.registry.object("Post").unwrap();
        assert!(!post.field("title").unwrap().ty.required);
        assert!(post.field("title").unwrap().localized);
    }

    #[test]
    fn hidden_collections_are_related_by_id() {
        let graph = derive(config_from_json(json!({
            "collections": [
                { "slug": "secrets", "graphQL": { "enabled": false } },
                {
                    "slug": "posts",
                    "fields": [{ "name": "secret", "type": "relationship", "relationTo": "secrets" }]
                },
            ]
        })));

        assert!(!graph.query.contains("Secret"));
        let post = graph.registry.object("Post").unwrap();
        assert_eq!(post.field("secret").unwrap().ty, GqlType::named("String"));
    }

    #[rstest]
    #[case::duplicate_slug(
        json!({ "collections": [{ "slug": "posts" }, { "slug": "posts" }] }),
        "slug 'posts' is used more than once"
    )]
    #[case::name_collision(
        json!({
            "collections": [{ "slug": "posts" }],
            "globals": [{ "slug": "post" }],
        }),
        "'post' resolves to the name 'Post' which is already taken"
    )]
    #[case::unknown_relation(
        json!({
            "collections": [{
                "slug": "posts",
                "fields": [{ "name": "author", "type": "relationship", "relationTo": "users" }]
            }]
        }),
        "field 'author' relates to unknown collection 'users'"
    )]
    #[case::duplicate_field(
        json!({
            "collections": [{
                "slug": "posts",
                "fields": [
                    { "name": "title", "type": "text" },
                    { "type": "row", "fields": [{ "name": "title", "type": "text" }] },
                ]
            }]
        }),
        "duplicate field 'title' in 'Post'"
    )]
    fn configuration_errors(#[case] config: serde_json::Value, #[case] expected: &str) {
        assert_eq!(derive_err(config_from_json(config)).to_string(), expected);
    }

    struct Greetings;

    fn hello(_ctx: ResolverContext<'_>) -> FieldFuture<'_> {
        FieldFuture::new(async { Ok(Some(FieldValue::value("world"))) })
    }

    impl CustomOperations for Greetings {
        fn queries(
            &self,
            _registry: &mut TypeRegistry,
            generated: &RootFields,
        ) -> Result<Vec<OutputField>, SchemaError> {
            assert!(generated.contains("Post"));

            let resolver: CustomResolver = Arc::new(hello);
            Ok(vec![
                OutputField::new("hello", GqlType::named_nn(TypeRef::STRING))
                    .resolution(Resolution::Custom(resolver.clone())),
                OutputField::new("Post", GqlType::named(TypeRef::STRING))
                    .resolution(Resolution::Custom(resolver)),
            ])
        }
    }

    #[rstest]
    #[tokio::test]
    async fn custom_operations_replace_generated_ones(blog_config: Configuration) {
        let builder =
            SchemaBuilder::new(blog_config, Arc::new(TestAdapter(IdType::Text))).extension(Greetings);

        let graph = builder.derive().unwrap();
        assert_eq!(graph.query.get("Post").unwrap().ty.name, "String");

        let schema = builder.build(Arc::new(RecordingHandler::new())).unwrap();
        let response = schema.execute("{ hello Post }").await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        assert_eq!(
            response.data,
            value!({ "hello": "world", "Post": "world" })
        );
    }

    #[rstest]
    #[tokio::test]
    async fn operations_dispatch_to_handler(blog_config: Configuration) {
        let handler = Arc::new(RecordingHandler::new().respond(
            Operation::FindById,
            value!({
                "id": "1",
                "title": "Hello",
                "author": "u1",
                "_status": "draft",
                "layout": [{ "blockType": "quote", "text": "Hi" }],
            }),
        ));

        let schema = SchemaBuilder::new(blog_config, Arc::new(TestAdapter(IdType::Text)))
            .build(handler.clone())
            .unwrap();

        let response = schema
            .execute(
                r#"{
                    Post(id: "1") {
                        id
                        title
                        author { id }
                        _status
                        layout {
                            __typename
                            ... on QuoteBlock { text }
                        }
                    }
                }"#,
            )
            .await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        assert_eq!(
            response.data.into_json().unwrap(),
            json!({
                "Post": {
                    "id": "1",
                    "title": "Hello",
                    "author": { "id": "u1" },
                    "_status": "draft",
                    "layout": [{ "__typename": "QuoteBlock", "text": "Hi" }],
                }
            })
        );

        let requests = handler.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].operation, Operation::FindById);
        assert_eq!(requests[0].entity, Some(EntityRef::collection("posts")));
        assert_eq!(
            requests[0].argument("id"),
            Some(&Value::String("1".into()))
        );
    }

    #[tokio::test]
    async fn locale_arguments_are_passed_as_codes() {
        let config = config_from_json(json!({
            "localization": { "locales": ["en", "de-CH"], "default_locale": "en" },
            "collections": [{ "slug": "posts", "fields": [{ "name": "title", "type": "text" }] }]
        }));
        let handler = Arc::new(RecordingHandler::new().respond(Operation::FindById, Value::Null));

        let schema = SchemaBuilder::new(config, Arc::new(TestAdapter(IdType::Text)))
            .build(handler.clone())
            .unwrap();

        let response = schema
            .execute(r#"{ Post(id: "1", locale: de_CH, fallbackLocale: none) { title } }"#)
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);

        let requests = handler.requests();
        assert_eq!(
            requests[0].argument("locale"),
            Some(&Value::String("de-CH".into()))
        );
        assert_eq!(
            requests[0].argument("fallbackLocale"),
            Some(&Value::String("none".into()))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn handler_errors_are_request_errors(blog_config: Configuration) {
        let schema = SchemaBuilder::new(blog_config, Arc::new(TestAdapter(IdType::Text)))
            .build(Arc::new(RecordingHandler::new()))
            .unwrap();

        let response = schema.execute(r#"mutation { deletePost(id: "1") { id } }"#).await;
        assert_eq!(response.errors.len(), 1);
        assert_eq!(
            response.errors[0].message,
            "The requested resource was not found"
        );
        assert_eq!(response.data, Value::Null);

        let extensions = serde_json::to_value(&response.errors[0].extensions).unwrap();
        assert_eq!(extensions, json!({ "code": "NOT_FOUND" }));
    }

    #[rstest]
    #[tokio::test]
    async fn complex_queries_are_rejected(mut blog_config: Configuration) {
        blog_config.graphql.max_complexity = 10;
        let handler = Arc::new(RecordingHandler::new());

        let schema = SchemaBuilder::new(blog_config, Arc::new(TestAdapter(IdType::Text)))
            .build(handler.clone())
            .unwrap();

        // Posts (1) + docs (1) + author (10) + id (1)
        let response = schema.execute("{ Posts { docs { author { id } } } }").await;
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].message, COMPLEXITY_ERROR);
        assert!(handler.requests().is_empty());

        let response = schema.execute("{ __schema { queryType { name } } }").await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
    }

    #[rstest]
    #[tokio::test]
    async fn schema_manager_rebuilds(blog_config: Configuration) {
        let builder = SchemaBuilder::new(
            config_from_json(json!({ "collections": [{ "slug": "posts" }] })),
            Arc::new(TestAdapter(IdType::Text)),
        );
        let manager = GraphQLSchemaManager::new(builder, Arc::new(RecordingHandler::new())).unwrap();
        assert!(!manager.sdl().await.contains("type Category"));

        // Invalid configurations keep the current schema
        let invalid = config_from_json(json!({
            "collections": [{ "slug": "posts" }, { "slug": "posts" }]
        }));
        assert!(manager.rebuild(invalid).await.is_err());
        assert_eq!(manager.config().await.collections.len(), 1);

        manager.rebuild(blog_config).await.unwrap();
        assert!(manager.sdl().await.contains("type Category"));

        let response = manager.execute("{ __type(name: \"Category\") { name } }").await;
        assert_eq!(
            response.data,
            value!({ "__type": { "name": "Category" } })
        );
    }
}
