//! Extractors that turn Axum's plain-text rejections into JSON `AppError` responses.

use axum::extract::{FromRequest, FromRequestParts};

use crate::errors::AppError;

/// `Json<T>` whose rejection (malformed body, wrong field type, missing
/// content type) is reported as a 400 `InvalidInput`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `Path<T>` whose rejection (e.g. a non-numeric id) is reported as a 400 `InvalidInput`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);
