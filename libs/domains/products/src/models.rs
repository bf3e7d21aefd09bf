use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Decimal places kept by the `NUMERIC(19,4)` price column
const PRICE_SCALE: u32 = 4;

/// Exclusive upper bound of the price column (15 integer digits)
const PRICE_LIMIT: i64 = 1_000_000_000_000_000;

/// Accepts exactly the prices the store can hold without rounding.
fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        return Err(ValidationError::new("non_negative")
            .with_message("price must not be negative".into()));
    }
    if price.normalize().scale() > PRICE_SCALE {
        return Err(ValidationError::new("scale")
            .with_message("price must have at most 4 decimal places".into()));
    }
    if *price >= Decimal::from(PRICE_LIMIT) {
        return Err(ValidationError::new("range")
            .with_message("price must be below 1000000000000000".into()));
    }
    Ok(())
}

/// A catalog product.
///
/// `price` is an exact decimal; it is written to JSON as a string
/// (`"19.99"`) so no precision is lost on the way out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Store-assigned identifier
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Espresso beans 1kg")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = "19.99")]
    pub price: Decimal,
    #[schema(example = 12)]
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Overwrite the client-editable fields and bump `updated_at`.
    ///
    /// `id` and `created_at` are left as they are.
    pub fn apply_draft(&mut self, draft: ProductDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.price = draft.price;
        self.quantity = draft.quantity;
        self.updated_at = Utc::now();
    }
}

/// Body of create and update requests.
///
/// Unknown fields, including `id`, are ignored: identifiers are always
/// assigned by the store or taken from the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductDraft {
    #[validate(length(min = 1, max = 255))]
    #[schema(example = "Espresso beans 1kg")]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Accepts a JSON number (`7.5`) or string (`"7.50"`), both parsed
    /// from their literal digits
    #[serde(deserialize_with = "rust_decimal::serde::arbitrary_precision::deserialize")]
    #[validate(custom(function = "validate_price"))]
    #[schema(example = "19.99")]
    pub price: Decimal,

    #[validate(range(min = 0))]
    #[schema(example = 12)]
    pub quantity: i32,
}
