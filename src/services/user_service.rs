use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::{hash_password, verify_password},
    errors::{AppError, AppResult},
    models::{
        domain::{User, UserRole},
        dto::{
            request::{LoginRequest, RegisterRequest, UserListQuery},
            response::{
                ApiResponse, DeleteResponse, PaginatedResponse, PaginationMetadata, UserDto,
                UserResponse,
            },
        },
    },
    repositories::UserRepository,
    services::db_helpers::parse_object_id,
};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<UserResponse> {
        request.validate()?;

        let username = request.username.trim().to_string();
        if self.repository.find_by_username(&username).await?.is_some() {
            return Err(AppError::AlreadyExists(format!(
                "Username '{}' is already taken",
                username
            )));
        }

        let password_hash = hash_in_background(request.password).await?;
        let user = User::new(
            &username,
            password_hash,
            request.role.unwrap_or_default(),
            request.status.unwrap_or(true),
        );

        let created = self.repository.create(user).await?;
        log::info!("Registered {} account '{}'", created.role, created.username);

        Ok(ApiResponse::new(created.into(), "User created successfully"))
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<UserResponse> {
        request.validate()?;

        let user = self
            .repository
            .find_by_username(request.username.trim())
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        let hash = user.password.clone();
        let password = request.password;
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| AppError::InternalError(format!("Password check failed: {}", e)))??;

        if !matches {
            log::warn!("Failed login for '{}'", user.username);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        if !user.status {
            return Err(AppError::Unauthorized("Account is inactive".to_string()));
        }

        Ok(ApiResponse::new(user.into(), "Login successful"))
    }

    pub async fn list_users(&self, query: UserListQuery) -> AppResult<PaginatedResponse<UserDto>> {
        query.validate()?;
        let pagination = query.pagination();

        let (users, total) = self
            .repository
            .list(query.role, pagination.offset(), pagination.page_size())
            .await?;

        Ok(PaginatedResponse {
            data: users.into_iter().map(UserDto::from).collect(),
            pagination: PaginationMetadata::new(total, pagination.page(), pagination.page_size()),
        })
    }

    pub async fn toggle_status(&self, id: &str) -> AppResult<UserResponse> {
        let oid = parse_object_id(id)?;
        let mut user = self
            .repository
            .find_by_id(&oid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", id)))?;

        user.status = !user.status;
        let updated = self.repository.replace(user).await?;

        let message = format!(
            "User status updated to {}",
            if updated.status { "active" } else { "inactive" }
        );
        Ok(ApiResponse::new(updated.into(), message))
    }

    pub async fn delete_user(&self, id: &str) -> AppResult<DeleteResponse> {
        let oid = parse_object_id(id)?;
        self.repository.delete(&oid).await?;

        Ok(DeleteResponse {
            message: "User deleted successfully".to_string(),
            deleted_id: oid.to_hex(),
        })
    }

    /// Creates the configured admin account unless that username already exists.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> AppResult<()> {
        if self.repository.find_by_username(username).await?.is_some() {
            log::info!("Admin account '{}' already present", username);
            return Ok(());
        }

        let password_hash = hash_in_background(password.to_string()).await?;
        let admin = User::new(username, password_hash, UserRole::Admin, true);
        self.repository.create(admin).await?;
        log::info!("Created admin account '{}'", username);
        Ok(())
    }
}

async fn hash_in_background(password: String) -> AppResult<String> {
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))??;
    Ok(hash)
}
