//! Request extractors

use axum::extract::FromRequest;

use crate::error::AuthError;

/// `axum::Json` whose rejections (bad syntax, missing fields, wrong
/// content type) render as a 400 problem body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AuthError))]
pub struct AppJson<T>(pub T);
