//! Product HTTP Routes
//!
//! CRUD endpoints for the `products` collection. Handlers validate path
//! identifiers with one shared predicate, pass queries straight through
//! to the collection handle, and map outcomes to HTTP statuses.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::serialize_object_id_as_hex_string;
use mongodb::bson::{doc, Bson, Document};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::errors::{ApiError, ApiResult};

/// Name of the backing collection
pub const COLLECTION_NAME: &str = "products";

// ==================
// Shared State
// ==================

/// Product state shared across handlers
///
/// Holds the one collection accessor handed out by the gateway. The
/// handle is cheap to clone and issues independent operations per call,
/// so it is shared read-only across concurrent requests.
pub struct ProductState {
    products: Collection<Document>,
}

impl ProductState {
    pub fn new(db: &Database) -> Self {
        Self {
            products: db.collection(COLLECTION_NAME),
        }
    }

    /// Typed view of the collection for reads
    fn typed(&self) -> Collection<Product> {
        self.products.clone_with_type()
    }
}

// ==================
// Request/Response Types
// ==================

/// A stored product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identifier, rendered as its 24-char hex form
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for create and update
///
/// Field values are passed through unvalidated. Absent fields are written
/// as null, so an update always replaces exactly these three fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductInput {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
}

impl ProductInput {
    fn into_document(self) -> Document {
        doc! {
            "name": self.name.map(Bson::String).unwrap_or(Bson::Null),
            "price": self.price.map(Bson::Double).unwrap_or(Bson::Null),
            "description": self.description.map(Bson::String).unwrap_or(Bson::Null),
        }
    }
}

/// Insert acknowledgement (the created record itself is not returned)
#[derive(Debug, Serialize)]
pub struct InsertAck {
    pub acknowledged: bool,
    pub inserted_id: String,
}

/// Update acknowledgement
#[derive(Debug, Serialize)]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Delete acknowledgement
#[derive(Debug, Serialize)]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

// ==================
// Outcome Mapping
// ==================

/// Map a lookup result: an absent document is 404
fn get_outcome(product: Option<Product>) -> ApiResult<Product> {
    product.ok_or(ApiError::NotFound("Product not found"))
}

/// Map update counts: zero modified documents is 404.
///
/// This covers both a missing id and an update that changed nothing;
/// a matched-but-unmodified record still reports not found.
fn update_outcome(matched_count: u64, modified_count: u64) -> ApiResult<UpdateAck> {
    if modified_count == 0 {
        return Err(ApiError::NotFound("Product not found or no changes"));
    }

    Ok(UpdateAck {
        acknowledged: true,
        matched_count,
        modified_count,
    })
}

/// Map delete count: zero deleted documents is 404
fn delete_outcome(deleted_count: u64) -> ApiResult<DeleteAck> {
    if deleted_count == 0 {
        return Err(ApiError::NotFound("Product not found"));
    }

    Ok(DeleteAck {
        acknowledged: true,
        deleted_count,
    })
}

// ==================
// Identifier Validation
// ==================

/// Shared identifier predicate used by every handler taking a path id.
///
/// Valid iff the string is exactly the canonical textual form of an
/// ObjectId: 24 lowercase hex characters, nothing else. Uppercase hex
/// parses but does not round-trip, so it is rejected. An invalid id
/// never reaches the storage layer.
pub fn parse_product_id(raw: &str) -> ApiResult<ObjectId> {
    ObjectId::parse_str(raw)
        .ok()
        .filter(|id| id.to_hex() == raw)
        .ok_or(ApiError::InvalidId)
}

// ==================
// Routes
// ==================

/// Create product routes
pub fn product_routes(state: Arc<ProductState>) -> Router {
    Router::new()
        .route("/products", get(list_products_handler))
        .route("/products", post(create_product_handler))
        .route("/products/{id}", get(get_product_handler))
        .route("/products/{id}", put(update_product_handler))
        .route("/products/{id}", delete(delete_product_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

/// List all products (unbounded, no pagination)
async fn list_products_handler(
    State(state): State<Arc<ProductState>>,
) -> ApiResult<Json<Vec<Product>>> {
    let cursor = state
        .typed()
        .find(doc! {})
        .await
        .map_err(|e| ApiError::database("Error listing products", e))?;

    let products: Vec<Product> = cursor
        .try_collect()
        .await
        .map_err(|e| ApiError::database("Error listing products", e))?;

    Ok(Json(products))
}

/// Get a single product by id
async fn get_product_handler(
    State(state): State<Arc<ProductState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    info!(id = %id, "Received request to fetch product");

    let id = parse_product_id(&id)?;

    let product = state
        .typed()
        .find_one(doc! { "_id": id })
        .await
        .map_err(|e| ApiError::database("Error fetching product", e))?;

    Ok(Json(get_outcome(product)?))
}

/// Create a product; the store assigns the id
async fn create_product_handler(
    State(state): State<Arc<ProductState>>,
    Json(input): Json<ProductInput>,
) -> ApiResult<(StatusCode, Json<InsertAck>)> {
    let result = state
        .products
        .insert_one(input.into_document())
        .await
        .map_err(|e| ApiError::database("Error creating product", e))?;

    let inserted_id = match result.inserted_id {
        Bson::ObjectId(id) => id.to_hex(),
        other => other.to_string(),
    };

    Ok((
        StatusCode::CREATED,
        Json(InsertAck {
            acknowledged: true,
            inserted_id,
        }),
    ))
}

/// Replace the three product fields on an existing record
async fn update_product_handler(
    State(state): State<Arc<ProductState>>,
    Path(id): Path<String>,
    Json(input): Json<ProductInput>,
) -> ApiResult<Json<UpdateAck>> {
    let id = parse_product_id(&id)?;

    let result = state
        .products
        .update_one(doc! { "_id": id }, doc! { "$set": input.into_document() })
        .await
        .map_err(|e| ApiError::database("Error updating product", e))?;

    Ok(Json(update_outcome(
        result.matched_count,
        result.modified_count,
    )?))
}

/// Delete a product by id
async fn delete_product_handler(
    State(state): State<Arc<ProductState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteAck>> {
    let id = parse_product_id(&id)?;

    let result = state
        .products
        .delete_one(doc! { "_id": id })
        .await
        .map_err(|e| ApiError::database("Error deleting product", e))?;

    Ok(Json(delete_outcome(result.deleted_count)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_id_is_accepted() {
        let id = parse_product_id("507f1f77bcf86cd799439011").unwrap();
        assert_eq!(id.to_hex(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn test_short_id_is_rejected() {
        assert!(parse_product_id("507f1f77bcf86cd7994390").is_err());
    }

    #[test]
    fn test_long_id_is_rejected() {
        assert!(parse_product_id("507f1f77bcf86cd79943901100").is_err());
    }

    #[test]
    fn test_non_hex_id_is_rejected() {
        assert!(parse_product_id("507f1f77bcf86cd79943901z").is_err());
        assert!(parse_product_id("not-an-id").is_err());
        assert!(parse_product_id("").is_err());
    }

    #[test]
    fn test_uppercase_hex_is_rejected() {
        // parses as an ObjectId but is not the canonical textual form
        assert!(parse_product_id("507F1F77BCF86CD799439011").is_err());
    }

    #[test]
    fn test_get_outcome_absent_document_is_not_found() {
        // a valid-but-absent id reaches the store and comes back empty
        let err = get_outcome(None).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Product not found");
    }

    #[test]
    fn test_get_outcome_passes_through_found_document() {
        let product = Product {
            id: ObjectId::new(),
            name: Some("A".to_string()),
            price: Some(1.0),
            description: Some("d".to_string()),
        };
        let found = get_outcome(Some(product.clone())).unwrap();
        assert_eq!(found.id, product.id);
    }

    #[test]
    fn test_update_outcome_missing_id_is_not_found() {
        let err = update_outcome(0, 0).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Product not found or no changes");
    }

    #[test]
    fn test_update_outcome_no_op_update_is_not_found() {
        // record exists but every field already held the supplied value:
        // matched but unmodified still reports not found
        let err = update_outcome(1, 0).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Product not found or no changes");
    }

    #[test]
    fn test_update_outcome_modified_record_is_acknowledged() {
        let ack = update_outcome(1, 1).unwrap();
        assert!(ack.acknowledged);
        assert_eq!(ack.matched_count, 1);
        assert_eq!(ack.modified_count, 1);
    }

    #[test]
    fn test_delete_outcome_is_idempotent_with_not_found() {
        // first delete removes the record, second finds nothing
        let ack = delete_outcome(1).unwrap();
        assert!(ack.acknowledged);
        assert_eq!(ack.deleted_count, 1);

        let err = delete_outcome(0).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Product not found");
    }

    #[test]
    fn test_input_document_fills_absent_fields_with_null() {
        let input = ProductInput {
            name: Some("A".to_string()),
            price: None,
            description: None,
        };
        let doc = input.into_document();
        assert_eq!(doc.get("name"), Some(&Bson::String("A".to_string())));
        assert_eq!(doc.get("price"), Some(&Bson::Null));
        assert_eq!(doc.get("description"), Some(&Bson::Null));
    }

    #[test]
    fn test_input_document_keeps_all_three_fields() {
        let doc = ProductInput::default().into_document();
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn test_product_serializes_id_as_hex_string() {
        let product = Product {
            id: ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap(),
            name: Some("A".to_string()),
            price: Some(1.0),
            description: Some("d".to_string()),
        };
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["_id"], "507f1f77bcf86cd799439011");
        assert_eq!(value["name"], "A");
        assert_eq!(value["price"], 1.0);
        assert_eq!(value["description"], "d");
    }

    #[test]
    fn test_product_deserializes_missing_fields_as_none() {
        let id = ObjectId::new();
        let doc = doc! { "_id": id };
        let product: Product = mongodb::bson::from_document(doc).unwrap();
        assert_eq!(product.id, id);
        assert!(product.name.is_none());
        assert!(product.price.is_none());
        assert!(product.description.is_none());
    }

    #[test]
    fn test_input_accepts_partial_body() {
        let input: ProductInput = serde_json::from_value(json!({ "name": "A" })).unwrap();
        assert_eq!(input.name.as_deref(), Some("A"));
        assert!(input.price.is_none());
        assert!(input.description.is_none());
    }

    #[test]
    fn test_ack_serialization() {
        let ack = InsertAck {
            acknowledged: true,
            inserted_id: "507f1f77bcf86cd799439011".to_string(),
        };
        let value = serde_json::to_value(&ack).unwrap();
        assert_eq!(value["acknowledged"], true);
        assert_eq!(value["inserted_id"], "507f1f77bcf86cd799439011");

        let ack = DeleteAck {
            acknowledged: true,
            deleted_count: 1,
        };
        let value = serde_json::to_value(&ack).unwrap();
        assert_eq!(value["deleted_count"], 1);
    }
}
