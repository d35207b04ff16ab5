use std::sync::Arc;

use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{CatalogQuery, CreateChapterListRequest, UpdateChapterListRequest},
};

#[post("/chapters")]
async fn create_chapter_list(
    state: web::Data<Arc<AppState>>,
    request: web::Json<CreateChapterListRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .chapter_service
        .create_chapter_list(request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(response))
}

#[get("/chapter")]
async fn list_chapter_lists(
    state: web::Data<Arc<AppState>>,
    query: web::Query<CatalogQuery>,
) -> Result<HttpResponse, AppError> {
    let lists = state
        .chapter_service
        .list_chapter_lists(query.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(lists))
}

#[get("/chapters/{id}")]
async fn get_chapter_list(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let list = state.chapter_service.get_chapter_list(&id).await?;
    Ok(HttpResponse::Ok().json(list))
}

#[put("/chapters/{id}")]
async fn update_chapter_list(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    request: web::Json<UpdateChapterListRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .chapter_service
        .update_chapter_list(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[delete("/chapters/{id}")]
async fn delete_chapter_list(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = state.chapter_service.delete_chapter_list(&id).await?;
    Ok(HttpResponse::Ok().json(response))
}
