use std::sync::Arc;

use actix_web::{delete, get, patch, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{LoginRequest, RegisterRequest, UserListQuery},
};

#[post("/register")]
async fn register(
    state: web::Data<Arc<AppState>>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.user_service.register(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[post("/login")]
async fn login(
    state: web::Data<Arc<AppState>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.user_service.login(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/users")]
async fn list_users(
    state: web::Data<Arc<AppState>>,
    query: web::Query<UserListQuery>,
) -> Result<HttpResponse, AppError> {
    let response = state.user_service.list_users(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[patch("/users/{id}/status")]
async fn toggle_user_status(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = state.user_service.toggle_status(&id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[delete("/users/{id}")]
async fn delete_user(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = state.user_service.delete_user(&id).await?;
    Ok(HttpResponse::Ok().json(response))
}
