use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, ServiceUnavailableResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::assembler::{
    CollectionLinks, Hal, Link, ProductAssembler, ProductCollectionModel, ProductEmbedded,
    ProductLinks, ProductModel,
};
use crate::error::ProductResult;
use crate::models::{Product, ProductDraft};
use crate::repository::ProductRepository;
use crate::service::ProductService;

pub const TAG: &str = "products";

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        get_product,
        create_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(
            Product,
            ProductDraft,
            ProductModel,
            ProductLinks,
            ProductCollectionModel,
            ProductEmbedded,
            CollectionLinks,
            Link,
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse,
            ServiceUnavailableResponse
        )
    ),
    tags(
        (name = TAG, description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Shared handler state
pub struct ProductsState<R: ProductRepository> {
    pub service: ProductService<R>,
    pub assembler: ProductAssembler,
}

/// Create the product router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(
    service: ProductService<R>,
    assembler: ProductAssembler,
) -> Router {
    let state = Arc::new(ProductsState { service, assembler });

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(state)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All products", body = ProductCollectionModel, content_type = "application/hal+json"),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(state): State<Arc<ProductsState<R>>>,
) -> ProductResult<Hal<ProductCollectionModel>> {
    let products = state.service.find_all().await?;
    Ok(Hal(state.assembler.to_collection_model(products)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductModel, content_type = "application/hal+json"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(state): State<Arc<ProductsState<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Hal<ProductModel>> {
    let product = state.service.find_by_id(id).await?;
    Ok(Hal(state.assembler.to_model(product)))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = ProductDraft,
    responses(
        (status = 201, description = "Product created", body = ProductModel, content_type = "application/hal+json",
            headers(("Location" = String, description = "URL of the new product"))),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(state): State<Arc<ProductsState<R>>>,
    ValidatedJson(draft): ValidatedJson<ProductDraft>,
) -> ProductResult<impl IntoResponse> {
    let product = state.service.create(draft).await?;
    let location = state.assembler.location(product.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Hal(state.assembler.to_model(product)),
    ))
}

/// Replace a product's name, description, price and quantity
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = ProductDraft,
    responses(
        (status = 200, description = "Product updated", body = ProductModel, content_type = "application/hal+json"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(state): State<Arc<ProductsState<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(draft): ValidatedJson<ProductDraft>,
) -> ProductResult<Hal<ProductModel>> {
    let product = state.service.update(id, draft).await?;
    Ok(Hal(state.assembler.to_model(product)))
}

/// Delete a product; succeeds whether or not it existed
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(state): State<Arc<ProductsState<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<StatusCode> {
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
