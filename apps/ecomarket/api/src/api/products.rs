use axum::Router;
use domain_products::{PgProductRepository, ProductAssembler, ProductService, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgProductRepository::new(state.db.clone());
    let service = ProductService::new(repository);
    let assembler = ProductAssembler::for_public_url(&state.config.server.public_url);
    handlers::router(service, assembler)
}
