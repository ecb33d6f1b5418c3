//! Movie search HTTP handlers
//!
//! Both endpoints proxy to the movie search service. An unknown movie ID
//! and a search without a configured catalog credential both answer 200
//! with an empty list.

use actix_web::{get, web, HttpResponse};
use serde::Deserialize;

use reelscore_core::AppContext;

use crate::errors::ApiResult;

/// Configure movie search routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/movies")
            .service(search_by_name)
            .service(search_by_id),
    );
}

#[derive(Deserialize)]
struct SearchQuery {
    query: String,
}

/// Search the catalog by title
#[get("/search")]
async fn search_by_name(
    ctx: web::Data<AppContext>,
    query: web::Query<SearchQuery>,
) -> ApiResult<HttpResponse> {
    let results = ctx.movies.search_by_name(&query.query).await?;
    Ok(HttpResponse::Ok().json(results))
}

/// Look a movie up by catalog ID
#[get("/{id}")]
async fn search_by_id(
    ctx: web::Data<AppContext>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let results = ctx.movies.search_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(results))
}
