//! HAL representations of products.
//!
//! A single product is rendered with its fields at the top level plus
//! `_links.self` and `_links.products`; a collection nests the items under
//! `_embedded.productList` next to its own `_links.self`.

use axum::{
    Json,
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Product;

/// Media type of every HAL document this crate produces
pub const HAL_JSON: &str = "application/hal+json";

/// Where the products router is mounted
pub const PRODUCTS_PATH: &str = "/api/products";

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Link {
    #[schema(example = "/api/products/1")]
    pub href: String,
}

impl Link {
    fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
    pub products: Link,
}

/// A product with its links.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductModel {
    #[serde(flatten)]
    pub product: Product,
    #[serde(rename = "_links")]
    pub links: ProductLinks,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CollectionLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductEmbedded {
    #[serde(rename = "productList")]
    pub product_list: Vec<ProductModel>,
}

/// All products with a link back to the collection.
///
/// `_embedded` is left out entirely when there are no products.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductCollectionModel {
    #[serde(rename = "_embedded", skip_serializing_if = "Option::is_none")]
    pub embedded: Option<ProductEmbedded>,
    #[serde(rename = "_links")]
    pub links: CollectionLinks,
}

impl ProductCollectionModel {
    /// Embedded products, empty when `_embedded` is absent
    pub fn products(&self) -> &[ProductModel] {
        self.embedded
            .as_ref()
            .map(|e| e.product_list.as_slice())
            .unwrap_or_default()
    }
}

/// Builds HAL documents from a fixed collection URL.
#[derive(Debug, Clone)]
pub struct ProductAssembler {
    base: String,
}

impl ProductAssembler {
    /// `base` is the collection URL, e.g. `https://shop.example.com/api/products`.
    pub fn new(base: impl Into<String>) -> Self {
        let base: String = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// Assembler for a service reachable at `public_url` (may be empty,
    /// which yields root-relative links).
    pub fn for_public_url(public_url: &str) -> Self {
        Self::new(format!(
            "{}{}",
            public_url.trim_end_matches('/'),
            PRODUCTS_PATH
        ))
    }

    pub fn collection_href(&self) -> &str {
        &self.base
    }

    /// URL of a single product, also used for the `Location` header
    pub fn location(&self, id: i64) -> String {
        format!("{}/{}", self.base, id)
    }

    pub fn to_model(&self, product: Product) -> ProductModel {
        let links = ProductLinks {
            self_link: Link::new(self.location(product.id)),
            products: Link::new(self.base.as_str()),
        };

        ProductModel { product, links }
    }

    pub fn to_collection_model(&self, products: Vec<Product>) -> ProductCollectionModel {
        let embedded = (!products.is_empty()).then(|| ProductEmbedded {
            product_list: products.into_iter().map(|p| self.to_model(p)).collect(),
        });

        ProductCollectionModel {
            embedded,
            links: CollectionLinks {
                self_link: Link::new(self.base.as_str()),
            },
        }
    }
}

/// JSON body served as `application/hal+json`.
pub struct Hal<T>(pub T);

impl<T: Serialize> IntoResponse for Hal<T> {
    fn into_response(self) -> Response {
        (
            [(header::CONTENT_TYPE, HeaderValue::from_static(HAL_JSON))],
            Json(self.0),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use serde_json::Value;

    fn product(id: i64, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: None,
            price: Decimal::new(700, 2),
            quantity: 7,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_model_links() {
        let assembler = ProductAssembler::new("http://localhost:8080/api/products");
        let json = serde_json::to_value(assembler.to_model(product(5, "Solo"))).unwrap();

        assert_eq!(json["id"], 5);
        assert_eq!(json["name"], "Solo");
        assert_eq!(json["description"], Value::Null);
        assert_eq!(
            json["_links"]["self"]["href"],
            "http://localhost:8080/api/products/5"
        );
        assert_eq!(
            json["_links"]["products"]["href"],
            "http://localhost:8080/api/products"
        );
    }

    #[test]
    fn test_collection_model_keeps_order() {
        let assembler = ProductAssembler::for_public_url("");
        let collection =
            assembler.to_collection_model(vec![product(2, "P2"), product(1, "P1")]);
        let json = serde_json::to_value(&collection).unwrap();

        let list = json["_embedded"]["productList"].as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["name"], "P2");
        assert_eq!(list[1]["_links"]["self"]["href"], "/api/products/1");
        assert_eq!(json["_links"]["self"]["href"], "/api/products");
    }

    #[test]
    fn test_empty_collection_omits_embedded() {
        let assembler = ProductAssembler::for_public_url("https://shop.example.com/");
        let collection = assembler.to_collection_model(Vec::new());
        assert!(collection.products().is_empty());

        let json = serde_json::to_value(&collection).unwrap();
        assert!(json.get("_embedded").is_none());
        assert_eq!(
            json["_links"]["self"]["href"],
            "https://shop.example.com/api/products"
        );
    }

    #[test]
    fn test_location_and_trailing_slash() {
        let assembler = ProductAssembler::new("/api/products/");
        assert_eq!(assembler.collection_href(), "/api/products");
        assert_eq!(assembler.location(10), "/api/products/10");
    }

    #[test]
    fn test_model_flattens_product_fields() {
        let assembler = ProductAssembler::new("/api/products");
        let json = serde_json::to_value(assembler.to_model(product(3, "Mug"))).unwrap();

        assert!(json.get("product").is_none());
        assert_eq!(json["id"], 3);
        assert_eq!(json["quantity"], 7);
    }

    #[test]
    fn test_price_is_exact_string() {
        let json = serde_json::to_value(product(1, "Mug")).unwrap();
        assert_eq!(json["price"], "7.00");
    }
}
