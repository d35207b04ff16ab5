use std::sync::Arc;

use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{CatalogQuery, CreateBookRequest, UpdateBookRequest},
};

#[post("/books")]
async fn create_book(
    state: web::Data<Arc<AppState>>,
    request: web::Json<CreateBookRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.book_service.create_book(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[get("/allbooks")]
async fn list_books(
    state: web::Data<Arc<AppState>>,
    query: web::Query<CatalogQuery>,
) -> Result<HttpResponse, AppError> {
    let books = state.book_service.list_books(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(books))
}

#[get("/books/{id}")]
async fn get_book(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let book = state.book_service.get_book(&id).await?;
    Ok(HttpResponse::Ok().json(book))
}

#[put("/book/{id}")]
async fn update_book(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    request: web::Json<UpdateBookRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .book_service
        .update_book(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[delete("/books/{id}")]
async fn delete_book(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = state.book_service.delete_book(&id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/subjects")]
async fn list_subjects(
    state: web::Data<Arc<AppState>>,
    query: web::Query<CatalogQuery>,
) -> Result<HttpResponse, AppError> {
    let subjects = state
        .book_service
        .list_subjects(query.into_inner().class_name)
        .await?;
    Ok(HttpResponse::Ok().json(subjects))
}
