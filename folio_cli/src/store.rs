// SPDX-License-Identifier: AGPL-3.0-or-later

//! Volatile document store serving the generated operations of a configuration.
//!
//! Documents are kept as GraphQL values in memory and get lost when the process exits. Access
//! control is not enforced, every permission is granted.
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_graphql::indexmap::IndexMap;
use async_graphql::{Name, Value};
use async_trait::async_trait;
use folio::graphql::constants::{
    CAN_ACCESS_ADMIN_FIELD, DATA_ARG, ID_ARG, ID_FIELD, LIMIT_ARG, PAGE_ARG,
};
use folio::graphql::naming::format_name;
use folio::{
    Configuration, DatabaseAdapter, EntityKind, EntityRef, IdType, Operation, OperationError,
    OperationHandler, OperationRequest,
};
use log::debug;
use tokio::sync::RwLock;

const DEFAULT_LIMIT: u64 = 10;

type Object = IndexMap<Name, Value>;

#[derive(Debug)]
pub struct MemoryStore {
    config: Configuration,
    id_type: IdType,
    next_id: AtomicU64,
    collections: RwLock<HashMap<String, Vec<Object>>>,
    globals: RwLock<HashMap<String, Object>>,
}

impl MemoryStore {
    pub fn new(config: Configuration, id_type: IdType) -> Self {
        Self {
            config,
            id_type,
            next_id: AtomicU64::new(1),
            collections: RwLock::new(HashMap::new()),
            globals: RwLock::new(HashMap::new()),
        }
    }

    fn generate_id(&self) -> Value {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        match self.id_type {
            IdType::Text => Value::String(id.to_string()),
            IdType::Number => Value::Number(id.into()),
        }
    }

    async fn find(&self, entity: &EntityRef, request: &OperationRequest) -> Value {
        if entity.kind == EntityKind::Global {
            let globals = self.globals.read().await;
            return globals
                .get(&entity.slug)
                .cloned()
                .map(Value::Object)
                .unwrap_or(Value::Null);
        }

        let collections = self.collections.read().await;
        let docs = collections
            .get(&entity.slug)
            .map(Vec::as_slice)
            .unwrap_or_default();

        paginate(
            docs,
            integer_argument(request, LIMIT_ARG),
            integer_argument(request, PAGE_ARG),
        )
    }

    async fn find_by_id(&self, entity: &EntityRef, id: &Value) -> Result<Value, OperationError> {
        let collections = self.collections.read().await;
        collections
            .get(&entity.slug)
            .and_then(|docs| docs.iter().find(|doc| doc.get(ID_FIELD) == Some(id)))
            .cloned()
            .map(Value::Object)
            .ok_or(OperationError::NotFound)
    }

    async fn create(&self, entity: &EntityRef, data: Object) -> Value {
        let mut doc = Object::new();
        doc.insert(Name::new(ID_FIELD), self.generate_id());
        doc.extend(data);

        let mut collections = self.collections.write().await;
        collections
            .entry(entity.slug.clone())
            .or_default()
            .push(doc.clone());

        debug!("Create document in '{}'", entity.slug);

        Value::Object(doc)
    }

    async fn update(
        &self,
        entity: &EntityRef,
        id: Option<&Value>,
        data: Object,
    ) -> Result<Value, OperationError> {
        if entity.kind == EntityKind::Global {
            let mut globals = self.globals.write().await;
            let doc = globals.entry(entity.slug.clone()).or_default();
            doc.extend(data);
            return Ok(Value::Object(doc.clone()));
        }

        let id = id.ok_or_else(|| OperationError::Validation("Missing id".into()))?;

        let mut collections = self.collections.write().await;
        let doc = collections
            .get_mut(&entity.slug)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.get(ID_FIELD) == Some(id)))
            .ok_or(OperationError::NotFound)?;

        // Identifiers can not be changed
        doc.extend(data.into_iter().filter(|(name, _)| name.as_str() != ID_FIELD));

        Ok(Value::Object(doc.clone()))
    }

    async fn delete(&self, entity: &EntityRef, id: &Value) -> Result<Value, OperationError> {
        let mut collections = self.collections.write().await;
        let docs = collections
            .get_mut(&entity.slug)
            .ok_or(OperationError::NotFound)?;
        let index = docs
            .iter()
            .position(|doc| doc.get(ID_FIELD) == Some(id))
            .ok_or(OperationError::NotFound)?;

        debug!("Delete document from '{}'", entity.slug);

        Ok(Value::Object(docs.remove(index)))
    }

    async fn init(&self, entity: &EntityRef) -> Value {
        let collections = self.collections.read().await;
        let initialized = collections
            .get(&entity.slug)
            .map(|docs| !docs.is_empty())
            .unwrap_or_default();
        Value::Boolean(initialized)
    }

    /// Permissions of every collection and global, all of them granted.
    fn access(&self) -> Value {
        let mut access = Object::new();
        access.insert(Name::new(CAN_ACCESS_ADMIN_FIELD), Value::Boolean(true));

        for collection in &self.config.collections {
            if let Some(policy) = self.policy(&EntityRef::collection(&collection.slug)) {
                access.insert(Name::new(format_name(&collection.slug)), policy);
            }
        }

        for global in &self.config.globals {
            if let Some(policy) = self.policy(&EntityRef::global(&global.slug)) {
                access.insert(Name::new(format_name(&global.slug)), policy);
            }
        }

        Value::Object(access)
    }

    fn policy(&self, entity: &EntityRef) -> Option<Value> {
        let operations = match entity.kind {
            EntityKind::Collection => {
                let config = self
                    .config
                    .collections
                    .iter()
                    .find(|collection| collection.slug == entity.slug)?;

                let mut operations = vec!["create", "read", "update", "delete"];
                if config.versions.is_some() {
                    operations.push("readVersions");
                }
                if config.auth.is_some() {
                    operations.push("unlock");
                }
                operations
            }
            EntityKind::Global => {
                let config = self
                    .config
                    .globals
                    .iter()
                    .find(|global| global.slug == entity.slug)?;

                let mut operations = vec!["read", "update"];
                if config.versions.is_some() {
                    operations.push("readVersions");
                }
                operations
            }
        };

        let policy = operations
            .into_iter()
            .map(|operation| {
                let mut permission = Object::new();
                permission.insert(Name::new("permission"), Value::Boolean(true));
                (Name::new(operation), Value::Object(permission))
            })
            .collect();

        Some(Value::Object(policy))
    }
}

impl DatabaseAdapter for MemoryStore {
    fn default_id_type(&self) -> IdType {
        self.id_type
    }
}

#[async_trait]
impl OperationHandler for MemoryStore {
    async fn handle(&self, request: OperationRequest) -> Result<Value, OperationError> {
        if request.operation == Operation::Access {
            return Ok(self.access());
        }

        let entity = request.entity.as_ref().ok_or_else(|| {
            OperationError::Internal(format!("{} operation without entity", request.operation))
        })?;

        match request.operation {
            Operation::Find => Ok(self.find(entity, &request).await),
            Operation::FindById => self.find_by_id(entity, required_id(&request)?).await,
            Operation::Create => Ok(self.create(entity, data_argument(&request)?).await),
            Operation::Update => {
                self.update(entity, request.argument(ID_ARG), data_argument(&request)?)
                    .await
            }
            Operation::Delete => self.delete(entity, required_id(&request)?).await,
            Operation::DocAccess => self.policy(entity).ok_or(OperationError::NotFound),
            Operation::Init => Ok(self.init(entity).await),
            operation => Err(OperationError::Unsupported(operation.to_string())),
        }
    }
}

fn required_id(request: &OperationRequest) -> Result<&Value, OperationError> {
    request
        .argument(ID_ARG)
        .ok_or_else(|| OperationError::Validation("Missing id".into()))
}

fn data_argument(request: &OperationRequest) -> Result<Object, OperationError> {
    match request.argument(DATA_ARG) {
        Some(Value::Object(data)) => Ok(data.clone()),
        None => Ok(Object::new()),
        Some(_) => Err(OperationError::Validation("Data must be an object".into())),
    }
}

fn integer_argument(request: &OperationRequest, name: &str) -> Option<u64> {
    match request.argument(name) {
        Some(Value::Number(number)) => number.as_u64(),
        _ => None,
    }
}

/// Returns one page of documents shaped like the paginated type of a collection.
fn paginate(docs: &[Object], limit: Option<u64>, page: Option<u64>) -> Value {
    let limit = limit.filter(|limit| *limit > 0).unwrap_or(DEFAULT_LIMIT);
    let page = page.filter(|page| *page > 0).unwrap_or(1);

    let total_docs = docs.len() as u64;
    let total_pages = (total_docs + limit - 1) / limit;
    let offset = (page - 1).saturating_mul(limit);

    let page_docs: Vec<Value> = docs
        .iter()
        .skip(offset as usize)
        .take(limit as usize)
        .cloned()
        .map(Value::Object)
        .collect();

    let has_prev_page = page > 1;
    let has_next_page = page < total_pages;

    let optional_page = |condition: bool, page: u64| {
        if condition {
            Value::Number(page.into())
        } else {
            Value::Null
        }
    };

    let mut result = Object::new();
    result.insert(Name::new("docs"), Value::List(page_docs));
    result.insert(Name::new("totalDocs"), Value::Number(total_docs.into()));
    result.insert(Name::new("limit"), Value::Number(limit.into()));
    result.insert(Name::new("totalPages"), Value::Number(total_pages.into()));
    result.insert(Name::new("page"), Value::Number(page.into()));
    result.insert(Name::new("pagingCounter"), Value::Number((offset + 1).into()));
    result.insert(Name::new("hasPrevPage"), Value::Boolean(has_prev_page));
    result.insert(Name::new("hasNextPage"), Value::Boolean(has_next_page));
    result.insert(Name::new("prevPage"), optional_page(has_prev_page, page - 1));
    result.insert(Name::new("nextPage"), optional_page(has_next_page, page + 1));

    Value::Object(result)
}
