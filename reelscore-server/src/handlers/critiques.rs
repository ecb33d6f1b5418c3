//! Critique HTTP handlers

use actix_web::{get, patch, post, web, HttpResponse};
use serde::Deserialize;

use reelscore_core::{AppContext, Critique};

use crate::errors::{ApiError, ApiResult};

/// Configure critique routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/critiques")
            .service(list_critiques)
            .service(rate_movie)
            .service(get_rating)
            .service(recent)
            .service(recent_distinct)
            .service(rankings)
            .service(create_critique)
            .service(edit_critique),
    );
}

#[derive(Deserialize)]
struct CritiqueFilter {
    id: Option<String>,
    user_id: Option<String>,
    movie_id: Option<i64>,
}

/// Query critiques by document ID, user or movie; no filter returns all.
/// An ID lookup that misses is a 404; an empty filtered list is a 200.
#[get("")]
async fn list_critiques(
    ctx: web::Data<AppContext>,
    filter: web::Query<CritiqueFilter>,
) -> ApiResult<HttpResponse> {
    if let Some(id) = &filter.id {
        return match ctx.critiques.get_by_id(id).await? {
            Some(critique) => Ok(HttpResponse::Ok().json(critique)),
            None => Err(ApiError::not_found(format!("no critique with id {id}"))),
        };
    }
    let critiques = if let Some(user_id) = &filter.user_id {
        ctx.critiques.get_by_user(user_id).await?
    } else if let Some(movie_id) = filter.movie_id {
        ctx.critiques.get_by_movie(movie_id).await?
    } else {
        ctx.critiques.get_all().await?
    };
    Ok(HttpResponse::Ok().json(critiques))
}

/// Create a critique with a store-assigned ID
#[post("")]
async fn create_critique(
    ctx: web::Data<AppContext>,
    body: web::Json<Critique>,
) -> ApiResult<HttpResponse> {
    let created = ctx.critiques.add(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

#[derive(Deserialize)]
struct RatingRequest {
    user_id: String,
    movie_id: i64,
    rating: i32,
    comment: String,
}

/// Rate a movie: one critique per user per movie, last write wins
#[post("/ratings")]
async fn rate_movie(
    ctx: web::Data<AppContext>,
    body: web::Json<RatingRequest>,
) -> ApiResult<HttpResponse> {
    let request = body.into_inner();
    let stored = ctx
        .critiques
        .rate(&request.user_id, request.movie_id, request.rating, &request.comment)
        .await?;
    Ok(HttpResponse::Ok().json(stored))
}

#[derive(Deserialize)]
struct RatingLookup {
    user_id: String,
    movie_id: i64,
}

/// The critique one user wrote for one movie through the rating entry point
#[get("/ratings")]
async fn get_rating(
    ctx: web::Data<AppContext>,
    query: web::Query<RatingLookup>,
) -> ApiResult<HttpResponse> {
    match ctx
        .critiques
        .get_by_user_and_movie(&query.user_id, query.movie_id)
        .await?
    {
        Some(critique) => Ok(HttpResponse::Ok().json(critique)),
        None => Err(ApiError::not_found(format!(
            "user {} has not rated movie {}",
            query.user_id, query.movie_id
        ))),
    }
}

#[derive(Deserialize)]
struct CountQuery {
    count: i64,
}

/// The N most recent critiques; movies may repeat
#[get("/recent")]
async fn recent(
    ctx: web::Data<AppContext>,
    query: web::Query<CountQuery>,
) -> ApiResult<HttpResponse> {
    let critiques = ctx.critiques.get_recent(query.count).await?;
    Ok(HttpResponse::Ok().json(critiques))
}

/// The most recent critique per movie; count <= 0 returns every movie
#[get("/recent/distinct")]
async fn recent_distinct(
    ctx: web::Data<AppContext>,
    query: web::Query<CountQuery>,
) -> ApiResult<HttpResponse> {
    let critiques = ctx
        .critiques
        .get_recent_distinct_by_movie(query.count)
        .await?;
    Ok(HttpResponse::Ok().json(critiques))
}

/// Movies ranked by mean rating; count <= 0 returns the full ranking
#[get("/rankings")]
async fn rankings(
    ctx: web::Data<AppContext>,
    query: web::Query<CountQuery>,
) -> ApiResult<HttpResponse> {
    let ranking = ctx.critiques.get_average_ratings_ranked(query.count).await?;
    Ok(HttpResponse::Ok().json(ranking))
}

#[derive(Deserialize)]
struct CritiqueEdit {
    comment: Option<String>,
    rating: Option<i32>,
}

/// Partial edit of comment and/or rating
#[patch("/{id}")]
async fn edit_critique(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    body: web::Json<CritiqueEdit>,
) -> ApiResult<HttpResponse> {
    let edit = body.into_inner();
    let updated = ctx
        .critiques
        .edit(&path.into_inner(), edit.comment, edit.rating)
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}
