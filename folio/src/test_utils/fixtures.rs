// SPDX-License-Identifier: AGPL-3.0-or-later

use rstest::fixture;
use serde_json::json;

use crate::adapter::{DatabaseAdapter, IdType};
use crate::config::Configuration;

/// Storage adapter with a fixed identifier type.
#[derive(Debug, Clone, Copy)]
pub struct TestAdapter(pub IdType);

impl DatabaseAdapter for TestAdapter {
    fn default_id_type(&self) -> IdType {
        self.0
    }
}

/// Parses a configuration from JSON, panics if it is invalid.
pub fn config_from_json(value: serde_json::Value) -> Configuration {
    serde_json::from_value(value).expect("Invalid test configuration")
}

/// Content model of a small blog.
///
/// Posts are versioned with drafts and relate to users, categories and images, users can log in
/// and the menu global links to posts or categories.
#[fixture]
pub fn blog_config() -> Configuration {
    config_from_json(json!({
        "blocks": [{
            "slug": "quote",
            "fields": [
                { "name": "text", "type": "textarea", "required": true },
                { "name": "author", "type": "text" },
            ]
        }],
        "collections": [
            {
                "slug": "posts",
                "versions": { "drafts": true },
                "fields": [
                    { "name": "title", "type": "text", "required": true },
                    { "name": "author", "type": "relationship", "relationTo": "users" },
                    {
                        "name": "categories",
                        "type": "relationship",
                        "relationTo": "categories",
                        "hasMany": true
                    },
                    { "name": "hero", "type": "upload", "relationTo": "images" },
                    {
                        "type": "tabs",
                        "tabs": [
                            {
                                "label": "Content",
                                "fields": [
                                    { "name": "layout", "type": "blocks", "blockReferences": ["quote"] },
                                ]
                            },
                            {
                                "name": "meta",
                                "fields": [
                                    { "name": "description", "type": "textarea" },
                                    { "name": "keywords", "type": "text" },
                                ]
                            },
                        ]
                    },
                ]
            },
            {
                "slug": "categories",
                "fields": [
                    { "name": "name", "type": "text", "required": true },
                    {
                        "type": "row",
                        "fields": [
                            { "name": "color", "type": "select", "options": ["red", "green", "dark-blue"] },
                            { "name": "featured", "type": "checkbox" },
                        ]
                    },
                ]
            },
            {
                "slug": "users",
                "auth": { "maxLoginAttempts": 5 },
                "fields": [
                    { "name": "name", "type": "text" },
                    {
                        "name": "role",
                        "type": "select",
                        "options": ["admin", "editor"],
                        "required": true,
                        "saveToJWT": true
                    },
                ]
            },
            {
                "slug": "images",
                "fields": [
                    { "name": "alt", "type": "text", "required": true },
                    { "name": "location", "type": "point" },
                ]
            },
        ],
        "globals": [{
            "slug": "menu",
            "versions": {},
            "fields": [{
                "name": "items",
                "type": "array",
                "fields": [
                    { "name": "label", "type": "text", "required": true },
                    { "name": "link", "type": "relationship", "relationTo": ["posts", "categories"] },
                ]
            }]
        }]
    }))
}
