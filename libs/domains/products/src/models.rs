use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};

pub const DEFAULT_LIMIT: u64 = 25;

/// Image URLs in the three sizes the storefront renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductUrls {
    pub regular: String,
    pub small: String,
    pub thumb: String,
}

/// API and HTML links for the product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    pub html: String,
}

/// Author of the product photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductUser {
    pub id: String,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio_url: Option<String>,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductTag {
    pub title: String,
}

/// Product entity, stored in the `products` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_description: Option<String>,
    #[serde(deserialize_with = "whole_number")]
    pub likes: i64,
    pub urls: ProductUrls,
    pub links: ProductLinks,
    pub user: ProductUser,
    #[serde(default)]
    pub tags: Vec<ProductTag>,
}

/// Client-supplied [`ProductUrls`]; every field is checked on persist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductUrlsInput {
    pub regular: Option<String>,
    pub small: Option<String>,
    pub thumb: Option<String>,
}

/// Client-supplied [`ProductLinks`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductLinksInput {
    #[serde(rename = "self")]
    pub self_link: Option<String>,
    pub html: Option<String>,
}

/// Client-supplied [`ProductUser`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductUserInput {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub portfolio_url: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductTagInput {
    pub title: Option<String>,
}

/// DTO for creating a product.
///
/// Every required field, nested ones included, is optional here so a missing
/// one is reported by [`Product::try_from`] when the record is persisted, not
/// by the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateProduct {
    /// Caller-chosen identifier; generated when absent
    #[serde(default, rename = "_id", alias = "id")]
    pub id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub alt_description: Option<String>,
    /// Required; a float is accepted when it has no fractional part
    #[serde(default, deserialize_with = "optional_whole_number")]
    pub likes: Option<i64>,
    /// Required
    #[serde(default)]
    pub urls: Option<ProductUrlsInput>,
    /// Required
    #[serde(default)]
    pub links: Option<ProductLinksInput>,
    /// Required
    #[serde(default)]
    pub user: Option<ProductUserInput>,
    #[serde(default)]
    pub tags: Option<Vec<ProductTagInput>>,
}

/// Editable fields of a product. Nested objects replace the stored value
/// whole; keys outside this list (`_id` included) are ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateProduct {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub alt_description: Option<String>,
    /// Must not be negative
    #[serde(default, deserialize_with = "optional_whole_number")]
    pub likes: Option<i64>,
    #[serde(default)]
    pub urls: Option<ProductUrlsInput>,
    #[serde(default)]
    pub links: Option<ProductLinksInput>,
    #[serde(default)]
    pub user: Option<ProductUserInput>,
    #[serde(default)]
    pub tags: Option<Vec<ProductTagInput>>,
}

/// Query parameters for listing products
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Number of records to skip
    #[serde(default)]
    pub offset: u64,
    /// Maximum number of records; 0 means no limit
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Only products carrying a tag with this title
    pub tag: Option<String>,
}

/// Acknowledgment returned by a successful delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteProductResponse {
    pub message: String,
}

/// Outcome of importing a batch of seed records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub inserted: usize,
    pub existing: usize,
    pub invalid: usize,
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
            tag: None,
        }
    }
}

impl ProductFilter {
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn page(mut self, offset: u64, limit: u64) -> Self {
        self.offset = offset;
        self.limit = limit;
        self
    }

    /// `true` when `product` passes the tag filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self.tag {
            Some(ref tag) => product.has_tag(tag),
            None => true,
        }
    }
}

impl DeleteProductResponse {
    pub fn deleted() -> Self {
        Self {
            message: "Product deleted successfully".to_string(),
        }
    }
}

/// New identifier: a time-ordered UUIDv7 as 32 lowercase hex chars, so
/// ascending `_id` order is insertion order.
pub fn generate_id() -> String {
    Uuid::now_v7().simple().to_string()
}

/// 2^63, exactly representable as `f64`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

struct WholeNumberVisitor;

impl<'de> Visitor<'de> for WholeNumberVisitor {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a whole number")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
        i64::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
        // Lossless: integral and inside the i64 range.
        if v.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&v) {
            Ok(v as i64)
        } else {
            Err(E::invalid_value(Unexpected::Float(v), &self))
        }
    }
}

struct WholeNumber(i64);

impl<'de> Deserialize<'de> for WholeNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(WholeNumberVisitor).map(WholeNumber)
    }
}

/// `likes` as stored: integers, and floats like `3.0` with no fraction.
fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    WholeNumber::deserialize(deserializer).map(|n| n.0)
}

fn optional_whole_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i64>, D::Error> {
    Ok(Option::<WholeNumber>::deserialize(deserializer)?.map(|n| n.0))
}

/// Dotted paths of required fields absent from client input.
#[derive(Debug, Default)]
struct MissingFields(Vec<String>);

impl MissingFields {
    fn require<T>(&mut self, value: Option<T>, path: &str) -> Option<T> {
        if value.is_none() {
            self.0.push(path.to_string());
        }
        value
    }

    fn nested<I, T>(
        &mut self,
        value: Option<I>,
        path: &str,
        resolve: impl FnOnce(I, &str, &mut Self) -> Option<T>,
    ) -> Option<T> {
        match value {
            Some(input) => resolve(input, path, self),
            None => {
                self.0.push(path.to_string());
                None
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_error(self) -> ProductError {
        ProductError::Validation(format!(
            "Product validation failed: missing required field(s): {}",
            self.0.join(", ")
        ))
    }
}

impl ProductUrlsInput {
    fn resolve(self, path: &str, missing: &mut MissingFields) -> Option<ProductUrls> {
        let regular = missing.require(self.regular, &format!("{path}.regular"));
        let small = missing.require(self.small, &format!("{path}.small"));
        let thumb = missing.require(self.thumb, &format!("{path}.thumb"));
        Some(ProductUrls {
            regular: regular?,
            small: small?,
            thumb: thumb?,
        })
    }
}

impl ProductLinksInput {
    fn resolve(self, path: &str, missing: &mut MissingFields) -> Option<ProductLinks> {
        let self_link = missing.require(self.self_link, &format!("{path}.self"));
        let html = missing.require(self.html, &format!("{path}.html"));
        Some(ProductLinks {
            self_link: self_link?,
            html: html?,
        })
    }
}

impl ProductUserInput {
    fn resolve(self, path: &str, missing: &mut MissingFields) -> Option<ProductUser> {
        let id = missing.require(self.id, &format!("{path}.id"));
        let first_name = missing.require(self.first_name, &format!("{path}.first_name"));
        let username = missing.require(self.username, &format!("{path}.username"));
        Some(ProductUser {
            id: id?,
            first_name: first_name?,
            last_name: self.last_name,
            portfolio_url: self.portfolio_url,
            username: username?,
        })
    }
}

fn resolve_tags(tags: Vec<ProductTagInput>, missing: &mut MissingFields) -> Option<Vec<ProductTag>> {
    // Visit every tag before giving up so all missing titles are reported.
    let resolved: Vec<_> = tags
        .into_iter()
        .enumerate()
        .map(|(i, tag)| {
            missing
                .require(tag.title, &format!("tags[{i}].title"))
                .map(|title| ProductTag { title })
        })
        .collect();
    resolved.into_iter().collect()
}

impl TryFrom<CreateProduct> for Product {
    type Error = ProductError;

    /// Enforce required fields at every depth, generating `_id` when absent.
    fn try_from(input: CreateProduct) -> ProductResult<Self> {
        let mut missing = MissingFields::default();
        let likes = missing.require(input.likes, "likes");
        let urls = missing.nested(input.urls, "urls", ProductUrlsInput::resolve);
        let links = missing.nested(input.links, "links", ProductLinksInput::resolve);
        let user = missing.nested(input.user, "user", ProductUserInput::resolve);
        let tags = match input.tags {
            Some(tags) => resolve_tags(tags, &mut missing),
            None => Some(Vec::new()),
        };

        let (Some(likes), Some(urls), Some(links), Some(user), Some(tags)) =
            (likes, urls, links, user, tags)
        else {
            return Err(missing.into_error());
        };

        Ok(Self {
            id: input
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(generate_id),
            description: input.description,
            alt_description: input.alt_description,
            likes,
            urls,
            links,
            user,
            tags,
        })
    }
}

impl Product {
    pub fn has_tag(&self, title: &str) -> bool {
        self.tags.iter().any(|t| t.title == title)
    }

    /// Copy every field present in `change` onto this product.
    ///
    /// Nothing is written unless the whole change is valid: `likes` must not
    /// be negative and replaced nested objects must be complete.
    pub fn apply_update(&mut self, change: UpdateProduct) -> ProductResult<()> {
        if change.likes.is_some_and(|likes| likes < 0) {
            return Err(ProductError::Validation(
                "Likes cannot be negative".to_string(),
            ));
        }

        let mut missing = MissingFields::default();
        let urls = change
            .urls
            .map(|urls| urls.resolve("urls", &mut missing));
        let links = change
            .links
            .map(|links| links.resolve("links", &mut missing));
        let user = change
            .user
            .map(|user| user.resolve("user", &mut missing));
        let tags = change.tags.map(|tags| resolve_tags(tags, &mut missing));
        if !missing.is_empty() {
            return Err(missing.into_error());
        }

        if let Some(description) = change.description {
            self.description = Some(description);
        }
        if let Some(alt_description) = change.alt_description {
            self.alt_description = Some(alt_description);
        }
        if let Some(likes) = change.likes {
            self.likes = likes;
        }
        if let Some(urls) = urls.flatten() {
            self.urls = urls;
        }
        if let Some(links) = links.flatten() {
            self.links = links;
        }
        if let Some(user) = user.flatten() {
            self.user = user;
        }
        if let Some(tags) = tags.flatten() {
            self.tags = tags;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn user_input(id: &str, first_name: &str, username: &str) -> ProductUserInput {
        ProductUserInput {
            id: Some(id.to_string()),
            first_name: Some(first_name.to_string()),
            last_name: None,
            portfolio_url: None,
            username: Some(username.to_string()),
        }
    }

    pub fn create_input(likes: i64, tags: &[&str]) -> CreateProduct {
        CreateProduct {
            id: None,
            description: Some("A red bicycle leaning on a wall".to_string()),
            alt_description: None,
            likes: Some(likes),
            urls: Some(ProductUrlsInput {
                regular: Some("https://images.example.com/bike?w=1080".to_string()),
                small: Some("https://images.example.com/bike?w=400".to_string()),
                thumb: Some("https://images.example.com/bike?w=200".to_string()),
            }),
            links: Some(ProductLinksInput {
                self_link: Some("https://api.example.com/photos/bike".to_string()),
                html: Some("https://example.com/photos/bike".to_string()),
            }),
            user: Some(user_input("u1", "Ada", "ada")),
            tags: Some(
                tags.iter()
                    .map(|t| ProductTagInput {
                        title: Some(t.to_string()),
                    })
                    .collect(),
            ),
        }
    }

    pub fn product(id: &str, likes: i64, tags: &[&str]) -> Product {
        let mut input = create_input(likes, tags);
        input.id = Some(id.to_string());
        Product::try_from(input).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_try_from_generates_id() {
        let product = Product::try_from(create_input(3, &["bike"])).unwrap();
        assert_eq!(product.id.len(), 32);
        assert_eq!(product.likes, 3);
        assert!(product.has_tag("bike"));
    }

    #[test]
    fn test_try_from_keeps_supplied_id() {
        let mut input = create_input(0, &[]);
        input.id = Some("my-id".to_string());
        assert_eq!(Product::try_from(input).unwrap().id, "my-id");
    }

    #[test]
    fn test_try_from_reports_missing_fields() {
        let mut input = create_input(1, &[]);
        input.likes = None;
        input.user = None;

        let err = Product::try_from(input).unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, ProductError::Validation(_)));
        assert!(message.contains("likes"));
        assert!(message.contains("user"));
    }

    #[test]
    fn test_try_from_reports_every_missing_nested_path() {
        let input: CreateProduct = serde_json::from_value(serde_json::json!({
            "likes": 1,
            "urls": { "regular": "r" },
            "links": { "self": "s", "html": "h" },
            "user": { "id": "u1", "first_name": "Ada" },
            "tags": [{ "title": "bike" }, {}]
        }))
        .unwrap();

        let err = Product::try_from(input).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Product validation failed: missing required field(s): \
             urls.small, urls.thumb, user.username, tags[1].title"
        );
    }

    #[test]
    fn test_negative_likes_allowed_on_create() {
        assert_eq!(Product::try_from(create_input(-4, &[])).unwrap().likes, -4);
    }

    #[test]
    fn test_generated_ids_sort_in_creation_order() {
        let first = generate_id();
        let second = generate_id();
        assert!(first < second);
    }

    #[test]
    fn test_apply_update_replaces_nested_objects_whole() {
        let mut product = product("p1", 5, &["bike", "red"]);
        product.user.last_name = Some("Lovelace".to_string());

        product
            .apply_update(UpdateProduct {
                likes: Some(6),
                user: Some(user_input("u2", "Grace", "grace")),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(product.likes, 6);
        assert_eq!(product.user.username, "grace");
        assert_eq!(product.user.last_name, None);
        assert_eq!(product.tags.len(), 2);
        assert_eq!(product.description.as_deref(), Some("A red bicycle leaning on a wall"));
    }

    #[test]
    fn test_apply_update_incomplete_nested_object_changes_nothing() {
        let mut product = product("p1", 5, &[]);
        let before = product.clone();

        let err = product
            .apply_update(UpdateProduct {
                likes: Some(9),
                urls: Some(ProductUrlsInput {
                    regular: Some("r".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            })
            .unwrap_err();

        assert!(err.to_string().ends_with("urls.small, urls.thumb"));
        assert_eq!(product, before);
    }

    #[test]
    fn test_apply_update_likes_rule() {
        let mut product = product("p1", 5, &[]);

        let err = product
            .apply_update(UpdateProduct {
                likes: Some(-1),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "Likes cannot be negative");
        assert_eq!(product.likes, 5);

        product
            .apply_update(UpdateProduct {
                likes: Some(0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(product.likes, 0);
    }

    #[test]
    fn test_update_ignores_fields_outside_whitelist() {
        let change: UpdateProduct =
            serde_json::from_str(r#"{"_id": "other", "likes": 1, "price": 9}"#).unwrap();
        assert_eq!(change.likes, Some(1));
        assert!(change.description.is_none());
    }

    #[test]
    fn test_likes_accepts_integral_float() {
        let change: UpdateProduct = serde_json::from_str(r#"{"likes": 3.0}"#).unwrap();
        assert_eq!(change.likes, Some(3));

        let input: CreateProduct = serde_json::from_str(r#"{"likes": 12}"#).unwrap();
        assert_eq!(input.likes, Some(12));

        let input: CreateProduct = serde_json::from_str(r#"{"likes": null}"#).unwrap();
        assert_eq!(input.likes, None);
    }

    #[test]
    fn test_likes_rejects_fractions_and_out_of_range() {
        assert!(serde_json::from_str::<UpdateProduct>(r#"{"likes": 3.5}"#).is_err());
        assert!(serde_json::from_str::<UpdateProduct>(r#"{"likes": 1e300}"#).is_err());
        assert!(serde_json::from_str::<UpdateProduct>(r#"{"likes": 18446744073709551615}"#).is_err());
        assert!(serde_json::from_str::<UpdateProduct>(r#"{"likes": "3"}"#).is_err());
    }

    #[test]
    fn test_stored_product_accepts_integral_float_likes() {
        let mut json = serde_json::to_value(product("p1", 2, &[])).unwrap();
        json["likes"] = serde_json::json!(4.0);

        let product: Product = serde_json::from_value(json).unwrap();
        assert_eq!(product.likes, 4);
    }

    #[test]
    fn test_product_json_shape() {
        let json = serde_json::to_value(product("p1", 2, &["x"])).unwrap();
        assert_eq!(json["_id"], "p1");
        assert_eq!(json["links"]["self"], "https://api.example.com/photos/bike");
        assert_eq!(json["tags"][0]["title"], "x");
        assert!(json.get("alt_description").is_none());
    }

    #[test]
    fn test_filter_defaults() {
        let filter: ProductFilter = serde_json::from_str("{}").unwrap();
        assert_eq!(filter.offset, 0);
        assert_eq!(filter.limit, DEFAULT_LIMIT);
        assert!(filter.tag.is_none());
    }
}
