use std::sync::Arc;

use actix_web::{delete, get, patch, post, put, web, HttpResponse};
use serde_json::Value;

use crate::{app_state::AppState, errors::AppError, models::dto::request::QuizItemListQuery};

#[post("/quiz-items")]
async fn create_quiz_item(
    state: web::Data<Arc<AppState>>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let response = state.quiz_item_service.create_quiz_item(&payload).await?;
    Ok(HttpResponse::Created().json(response))
}

#[get("/quiz-items")]
async fn list_quiz_items(
    state: web::Data<Arc<AppState>>,
    query: web::Query<QuizItemListQuery>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .quiz_item_service
        .list_quiz_items(query.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/quiz-items/{id}")]
async fn get_quiz_item(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let item = state.quiz_item_service.get_quiz_item(&id).await?;
    Ok(HttpResponse::Ok().json(item))
}

#[put("/quiz-items/{id}")]
async fn update_quiz_item(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .quiz_item_service
        .update_quiz_item(&id, &payload)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[patch("/quiz-items/{id}/status")]
async fn toggle_quiz_item_status(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = state.quiz_item_service.toggle_status(&id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[delete("/quiz-items/{id}")]
async fn delete_quiz_item(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = state.quiz_item_service.delete_quiz_item(&id).await?;
    Ok(HttpResponse::Ok().json(response))
}
