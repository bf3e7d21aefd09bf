//! Products Domain
//!
//! CRUD over a single `Product` resource, served as HAL documents.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐      ┌─────────────┐
//! │  Handlers   │ ───▶ │  Assembler  │  ← `_links` / `_embedded` envelopes
//! └──────┬──────┘      └─────────────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← not-found handling, draft validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← trait + PostgreSQL / in-memory implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product, ProductDraft, SeaORM entity
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{
//!     handlers,
//!     InMemoryProductRepository, ProductAssembler, ProductService,
//! };
//!
//! let service = ProductService::new(InMemoryProductRepository::new());
//! let assembler = ProductAssembler::new("/api/products");
//!
//! let router = handlers::router(service, assembler);
//! ```

pub mod assembler;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use assembler::{
    HAL_JSON, Hal, Link, ProductAssembler, ProductCollectionModel, ProductModel, PRODUCTS_PATH,
};
pub use error::{ProductError, ProductResult};
pub use models::{Product, ProductDraft};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
