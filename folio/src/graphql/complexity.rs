// SPDX-License-Identifier: AGPL-3.0-or-later

//! Rejects queries exceeding a complexity ceiling before they get executed.
//!
//! The complexity of a selected field is its estimate plus the complexity of its sub-selection.
//! Relationship fields are estimated higher than plain values as resolving them usually means
//! loading more documents.
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_graphql::extensions::{Extension, ExtensionContext, ExtensionFactory, NextParseQuery};
use async_graphql::parser::types::{
    ExecutableDocument, FragmentDefinition, OperationType, Selection, SelectionSet,
};
use async_graphql::{Name, Positioned, ServerError, ServerResult, Variables};
use log::debug;

use crate::graphql::constants::{DEFAULT_COMPLEXITY, MUTATION, QUERY};
use crate::graphql::types::ObjectType;

/// Error message of rejected queries.
pub const COMPLEXITY_ERROR: &str = "Query is too complex";

#[derive(Debug, Clone)]
struct FieldCost {
    /// Named type of the field.
    child: String,

    /// Estimate of the field itself.
    cost: usize,
}

/// Complexity estimates of all object fields, keyed by type and field name.
#[derive(Debug, Clone, Default)]
pub struct ComplexityTable {
    types: HashMap<String, HashMap<String, FieldCost>>,
}

impl ComplexityTable {
    /// Collects the estimates of the given object types.
    pub fn new<'a>(objects: impl IntoIterator<Item = &'a ObjectType>) -> Self {
        let types = objects
            .into_iter()
            .map(|object| {
                let fields = object
                    .fields
                    .iter()
                    .map(|field| {
                        (
                            field.name.clone(),
                            FieldCost {
                                child: field.ty.name.clone(),
                                cost: field.complexity,
                            },
                        )
                    })
                    .collect();
                (object.name.clone(), fields)
            })
            .collect();

        Self { types }
    }

    /// Returns the complexity of the most expensive operation in the document.
    ///
    /// Walking the document stops as soon as the complexity exceeds `limit`, the returned value is
    /// then larger than `limit` but not necessarily the full complexity.
    pub fn document_complexity(&self, document: &ExecutableDocument, limit: usize) -> usize {
        let mut walk = ComplexityWalk {
            table: self,
            fragments: &document.fragments,
            fragment_costs: HashMap::new(),
            visiting: HashSet::new(),
            limit,
        };

        let mut max = 0;
        for (_, operation) in document.operations.iter() {
            let root = match operation.node.ty {
                OperationType::Query => QUERY,
                OperationType::Mutation => MUTATION,
                OperationType::Subscription => continue,
            };

            max = max.max(walk.selection(root, &operation.node.selection_set.node));
            if max > limit {
                break;
            }
        }

        max
    }

    fn field_cost(&self, type_name: &str, field: &str) -> Option<&FieldCost> {
        self.types.get(type_name).and_then(|fields| fields.get(field))
    }
}

/// State of one walk over a document.
///
/// Fragments are evaluated once, spreading the same fragment again reuses its cost.
struct ComplexityWalk<'a> {
    table: &'a ComplexityTable,
    fragments: &'a HashMap<Name, Positioned<FragmentDefinition>>,
    fragment_costs: HashMap<Name, usize>,
    visiting: HashSet<Name>,
    limit: usize,
}

impl<'a> ComplexityWalk<'a> {
    fn selection(&mut self, type_name: &str, selection_set: &SelectionSet) -> usize {
        let table = self.table;
        let mut total: usize = 0;

        for selection in &selection_set.items {
            let cost = match &selection.node {
                Selection::Field(field) => {
                    let name = field.node.name.node.as_str();

                    // Introspection is free
                    if name.starts_with("__") {
                        continue;
                    }

                    let (child, cost) = match table.field_cost(type_name, name) {
                        Some(field_cost) => (field_cost.child.as_str(), field_cost.cost),
                        None => ("", DEFAULT_COMPLEXITY),
                    };

                    cost.saturating_add(self.selection(child, &field.node.selection_set.node))
                }
                Selection::FragmentSpread(spread) => self.fragment(&spread.node.fragment_name.node),
                Selection::InlineFragment(fragment) => {
                    let on = fragment
                        .node
                        .type_condition
                        .as_ref()
                        .map(|condition| condition.node.on.node.as_str())
                        .unwrap_or(type_name);

                    self.selection(on, &fragment.node.selection_set.node)
                }
            };

            total = total.saturating_add(cost);
            if total > self.limit {
                break;
            }
        }

        total
    }

    fn fragment(&mut self, name: &Name) -> usize {
        if let Some(cost) = self.fragment_costs.get(name) {
            return *cost;
        }

        // Fragment cycles are invalid, they are rejected during validation
        if !self.visiting.insert(name.clone()) {
            return 0;
        }

        let fragments = self.fragments;
        let cost = match fragments.get(name) {
            Some(fragment) => self.selection(
                fragment.node.type_condition.node.on.node.as_str(),
                &fragment.node.selection_set.node,
            ),
            None => 0,
        };

        self.visiting.remove(name);
        self.fragment_costs.insert(name.clone(), cost);

        cost
    }
}

/// Extension rejecting queries with a complexity above `max_complexity`.
pub struct ComplexityLimit {
    table: Arc<ComplexityTable>,
    max_complexity: usize,
}

impl ComplexityLimit {
    /// Returns the extension for the given estimates and ceiling.
    pub fn new(table: ComplexityTable, max_complexity: usize) -> Self {
        Self {
            table: Arc::new(table),
            max_complexity,
        }
    }
}

impl ExtensionFactory for ComplexityLimit {
    fn create(&self) -> Arc<dyn Extension> {
        Arc::new(ComplexityLimitExtension {
            table: self.table.clone(),
            max_complexity: self.max_complexity,
        })
    }
}

struct ComplexityLimitExtension {
    table: Arc<ComplexityTable>,
    max_complexity: usize,
}

#[async_trait::async_trait]
impl Extension for ComplexityLimitExtension {
    async fn parse_query(
        &self,
        ctx: &ExtensionContext<'_>,
        query: &str,
        variables: &Variables,
        next: NextParseQuery<'_>,
    ) -> ServerResult<ExecutableDocument> {
        let document = next.run(ctx, query, variables).await?;

        let complexity = self.table.document_complexity(&document, self.max_complexity);
        if complexity > self.max_complexity {
            debug!(
                "Reject query with complexity {} above {}",
                complexity, self.max_complexity
            );
            return Err(ServerError::new(COMPLEXITY_ERROR, None));
        }

        Ok(document)
    }
}
