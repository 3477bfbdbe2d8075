// SPDX-License-Identifier: AGPL-3.0-or-later

//! Derives GraphQL names from slugs and field names.
use std::collections::HashMap;

use inflector::Inflector;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::collections::CollectionGraphQL;
use crate::errors::SchemaError;

static NAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[_A-Za-z][_0-9A-Za-z]*$").unwrap());

/// Checks if a string can be used as a GraphQL name.
///
/// Names starting with two underscores are reserved for introspection.
pub fn validate_name(name: &str) -> Result<(), SchemaError> {
    if NAME_REGEX.is_match(name) && !name.starts_with("__") {
        Ok(())
    } else {
        Err(SchemaError::InvalidName(name.to_string()))
    }
}

/// Turns an arbitrary string into a GraphQL name.
///
/// Whitespace is removed, all other characters which are not allowed in names are replaced with
/// underscores. Names starting with a digit get an underscore prefix.
pub fn format_name(value: &str) -> String {
    let formatted: String = value
        .chars()
        .filter(|char| !char.is_whitespace())
        .map(|char| {
            if char.is_ascii_alphanumeric() || char == '_' {
                char
            } else {
                '_'
            }
        })
        .collect();

    if formatted.starts_with(|char: char| char.is_ascii_digit()) {
        format!("_{formatted}")
    } else {
        formatted
    }
}

/// Upper camel case form of a slug or field name, for example `blog-posts` → `BlogPosts`.
pub fn to_words(value: &str) -> String {
    format_name(&value.to_pascal_case())
}

/// Name of a type nested under a parent type, for example `Post` + `meta` → `PostMeta`.
pub fn combine_parent_name(parent: &str, name: &str) -> String {
    format!("{parent}{}", to_words(name))
}

/// Singular and plural names derived from a slug.
///
/// The slug gets singularized first, the plural is derived from that singular form. This makes
/// `posts` and `post` both result in `Post` / `Posts`.
pub fn names_from_slug(slug: &str) -> (String, String) {
    let singular = inflect_last_word(&slug.to_snake_case(), singular_of);
    let plural = inflect_last_word(&singular, plural_of);
    (to_words(&singular), to_words(&plural))
}

/// Nouns with the same singular and plural form.
const UNCOUNTABLE: &[&str] = &[
    "deer",
    "equipment",
    "fish",
    "information",
    "moose",
    "news",
    "series",
    "sheep",
    "species",
];

/// Singular and plural forms not covered by regular inflection rules.
const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("man", "men"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    ("person", "people"),
    ("tooth", "teeth"),
    ("woman", "women"),
];

/// Inflects the last word of a snake cased name, for example `blog_posts` → `blog_post`.
fn inflect_last_word(value: &str, inflect: fn(&str) -> String) -> String {
    match value.rsplit_once('_') {
        Some((prefix, word)) => format!("{}_{}", prefix, inflect(word)),
        None => inflect(value),
    }
}

fn singular_of(word: &str) -> String {
    if UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }

    match IRREGULAR
        .iter()
        .find(|(singular, plural)| *plural == word || *singular == word)
    {
        Some((singular, _)) => singular.to_string(),
        None => word.to_singular(),
    }
}

fn plural_of(word: &str) -> String {
    if UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }

    match IRREGULAR
        .iter()
        .find(|(singular, plural)| *singular == word || *plural == word)
    {
        Some((_, plural)) => plural.to_string(),
        None => word.to_plural(),
    }
}

/// Resolved names of a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityNames {
    /// Name of the document type and the find-by-id query.
    pub singular: String,

    /// Name of the paginated list type and the find query.
    pub plural: String,
}

/// Keeps track of names claimed by collections and globals during one schema build.
///
/// Singular names need to be unique. When a plural name equals its singular name or was already
/// claimed, it gets the prefix `all`.
#[derive(Debug, Default)]
pub struct NameTable {
    claimed: HashMap<String, String>,
}

impl NameTable {
    /// Returns an empty name table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims singular and plural names for a collection.
    pub fn claim_collection(
        &mut self,
        slug: &str,
        overrides: &CollectionGraphQL,
    ) -> Result<EntityNames, SchemaError> {
        let (singular_from_slug, plural_from_slug) = names_from_slug(slug);

        let singular = overrides
            .singular_name
            .clone()
            .unwrap_or(singular_from_slug);
        let plural = overrides.plural_name.clone().unwrap_or(plural_from_slug);

        validate_name(&singular)?;
        validate_name(&plural)?;

        self.claim(slug, &singular)?;

        let candidates = [
            plural.clone(),
            format!("all{plural}"),
            format!("all{singular}"),
        ];

        let plural = candidates
            .iter()
            .filter(|candidate| **candidate != singular)
            .find(|candidate| !self.claimed.contains_key(candidate.as_str()))
            .cloned()
            .ok_or_else(|| SchemaError::NameCollision {
                slug: slug.to_string(),
                name: plural.clone(),
            })?;

        self.claimed.insert(plural.clone(), slug.to_string());

        Ok(EntityNames { singular, plural })
    }

    /// Claims the name of a global.
    pub fn claim_global(&mut self, slug: &str, name: Option<&str>) -> Result<String, SchemaError> {
        let name = match name {
            Some(name) => name.to_string(),
            None => to_words(slug),
        };

        validate_name(&name)?;
        self.claim(slug, &name)?;

        Ok(name)
    }

    fn claim(&mut self, slug: &str, name: &str) -> Result<(), SchemaError> {
        if self.claimed.contains_key(name) {
            return Err(SchemaError::NameCollision {
                slug: slug.to_string(),
                name: name.to_string(),
            });
        }

        self.claimed.insert(name.to_string(), slug.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::collections::CollectionGraphQL;
    use crate::errors::SchemaError;

    use super::{combine_parent_name, format_name, names_from_slug, EntityNames, NameTable};

    fn overrides(singular: Option<&str>, plural: Option<&str>) -> CollectionGraphQL {
        CollectionGraphQL {
            enabled: true,
            singular_name: singular.map(String::from),
            plural_name: plural.map(String::from),
        }
    }

    #[rstest]
    #[case("posts", "Post", "Posts")]
    #[case("post", "Post", "Posts")]
    #[case("categories", "Category", "Categories")]
    #[case("blog-posts", "BlogPost", "BlogPosts")]
    #[case("site_pages", "SitePage", "SitePages")]
    #[case("people", "Person", "People")]
    #[case("person", "Person", "People")]
    #[case("team-members", "TeamMember", "TeamMembers")]
    #[case("sales-people", "SalesPerson", "SalesPeople")]
    #[case("fish", "Fish", "Fish")]
    #[case("children", "Child", "Children")]
    fn derives_names_from_slug(
        #[case] slug: &str,
        #[case] singular: &str,
        #[case] plural: &str,
    ) {
        assert_eq!(
            names_from_slug(slug),
            (singular.to_string(), plural.to_string())
        );
    }

    #[rstest]
    #[case("en-US", "en_US")]
    #[case("my field", "myfield")]
    #[case("2024", "_2024")]
    #[case("a.b/c", "a_b_c")]
    fn formats_names(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(format_name(value), expected);
    }

    #[test]
    fn combines_parent_names() {
        assert_eq!(combine_parent_name("Post", "seoMeta"), "PostSeoMeta");
        assert_eq!(combine_parent_name("PostSeoMeta", "image"), "PostSeoMetaImage");
    }

    #[test]
    fn uncountable_slug_gets_all_prefix() {
        let mut names = NameTable::new();
        assert_eq!(
            names
                .claim_collection("sheep", &CollectionGraphQL::default())
                .unwrap(),
            EntityNames {
                singular: "Sheep".into(),
                plural: "allSheep".into(),
            }
        );
    }

    #[test]
    fn equal_overrides_get_all_prefix() {
        let mut names = NameTable::new();
        let resolved = names
            .claim_collection("media", &overrides(Some("Media"), Some("Media")))
            .unwrap();
        assert_eq!(resolved.singular, "Media");
        assert_eq!(resolved.plural, "allMedia");
    }

    #[test]
    fn same_plural_in_two_collections() {
        let mut names = NameTable::new();
        let articles = names
            .claim_collection("articles", &overrides(Some("Article"), Some("Posts")))
            .unwrap();
        let posts = names
            .claim_collection("posts", &CollectionGraphQL::default())
            .unwrap();

        assert_eq!(articles.plural, "Posts");
        assert_eq!(posts.singular, "Post");
        assert_eq!(posts.plural, "allPosts");
    }

    #[test]
    fn singular_collision_is_fatal() {
        let mut names = NameTable::new();
        names
            .claim_collection("posts", &CollectionGraphQL::default())
            .unwrap();

        let result = names.claim_collection("post", &CollectionGraphQL::default());
        assert!(matches!(
            result,
            Err(SchemaError::NameCollision { name, .. }) if name == "Post"
        ));

        let result = names.claim_global("post", None);
        assert!(matches!(result, Err(SchemaError::NameCollision { .. })));
    }

    #[rstest]
    #[case(Some("My Post"), None)]
    #[case(None, Some("all-posts"))]
    fn invalid_overrides(#[case] singular: Option<&str>, #[case] plural: Option<&str>) {
        let mut names = NameTable::new();
        let result = names.claim_collection("posts", &overrides(singular, plural));
        assert!(matches!(result, Err(SchemaError::InvalidName(_))));
    }
}
