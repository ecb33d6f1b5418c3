//! User HTTP handlers

use actix_web::{delete, get, patch, post, put, web, HttpResponse};
use serde::Deserialize;

use reelscore_core::{AppContext, User};

use crate::errors::{ApiError, ApiResult};

/// Configure user routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .service(list_users)
            .service(get_by_nick)
            .service(get_user)
            .service(create_user)
            .service(update_user)
            .service(delete_user)
            .service(change_nick)
            .service(change_image)
            .service(mutual_friends)
            .service(add_friend)
            .service(remove_friend),
    );
}

/// List all users
#[get("")]
async fn list_users(ctx: web::Data<AppContext>) -> ApiResult<HttpResponse> {
    let users = ctx.users.get_all().await?;
    Ok(HttpResponse::Ok().json(users))
}

/// Users matching a nick exactly; an empty list is a valid answer
#[get("/nick/{nick}")]
async fn get_by_nick(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let users = ctx.users.get_by_nick(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(users))
}

/// Get user by ID
#[get("/{id}")]
async fn get_user(ctx: web::Data<AppContext>, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    match ctx.users.get_by_id(&id).await? {
        Some(user) => Ok(HttpResponse::Ok().json(user)),
        None => Err(ApiError::not_found(format!("no user with id {id}"))),
    }
}

/// Register a new user
#[post("")]
async fn create_user(
    ctx: web::Data<AppContext>,
    body: web::Json<User>,
) -> ApiResult<HttpResponse> {
    let created = ctx.users.add(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Full-document update
#[put("/{id}")]
async fn update_user(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    body: web::Json<User>,
) -> ApiResult<HttpResponse> {
    let updated = ctx.users.update(&path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Delete a user
#[delete("/{id}")]
async fn delete_user(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    if ctx.users.delete(&id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(ApiError::not_found(format!("no user with id {id}")))
    }
}

#[derive(Deserialize)]
struct NickChange {
    nick: String,
}

/// Nick-only patch
#[patch("/{id}/nick")]
async fn change_nick(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    body: web::Json<NickChange>,
) -> ApiResult<HttpResponse> {
    let updated = ctx
        .users
        .change_nick(&path.into_inner(), &body.nick)
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

#[derive(Deserialize)]
struct ImageChange {
    /// Absent or null clears the image.
    #[serde(default)]
    image: Option<String>,
}

/// Profile-image-only patch
#[patch("/{id}/image")]
async fn change_image(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    body: web::Json<ImageChange>,
) -> ApiResult<HttpResponse> {
    let updated = ctx
        .users
        .change_profile_image(&path.into_inner(), body.into_inner().image)
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Number of friends two users have in common
#[get("/{id}/friends/{friend_id}/mutual")]
async fn mutual_friends(
    ctx: web::Data<AppContext>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (id, friend_id) = path.into_inner();
    match ctx.users.count_mutual_friends(&id, &friend_id).await? {
        Some(count) => Ok(HttpResponse::Ok().json(count)),
        None => Err(ApiError::not_found("both users must exist")),
    }
}

/// Add a friend (idempotent)
#[post("/{id}/friends/{friend_id}")]
async fn add_friend(
    ctx: web::Data<AppContext>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (id, friend_id) = path.into_inner();
    ctx.users.add_friend(&id, &friend_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Remove a friend
#[delete("/{id}/friends/{friend_id}")]
async fn remove_friend(
    ctx: web::Data<AppContext>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (id, friend_id) = path.into_inner();
    ctx.users.remove_friend(&id, &friend_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
