use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::errors::{AppError, AppResult};

/// Parses a path id into an ObjectId, rejecting malformed ids as client errors.
pub fn parse_object_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id.trim())
        .map_err(|_| AppError::ValidationError(format!("'{}' is not a valid id", id)))
}

/// Case-insensitive "contains" match on a string field. The needle is matched literally.
pub fn substring_pattern(needle: &str) -> Document {
    doc! {
        "$regex": regex::escape(needle.trim()),
        "$options": "i",
    }
}

/// Trims an optional query value, dropping it when nothing is left.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
