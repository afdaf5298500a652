//! Request extractors that reject with the gallery's JSON error body
//!
//! Axum's stock `Form`, `Query` and `Json` answer malformed input with a
//! plain-text 400/422. These wrappers turn the rejection into
//! [`GalleryError::InvalidRequest`] so every failure has the same shape.

use axum::{
    Form, Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::errors::GalleryError;

/// URL-encoded form body
pub struct GalleryForm<T>(pub T);

impl<T, S> FromRequest<S> for GalleryForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = GalleryError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|rejection| GalleryError::invalid_request("form", rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Query string parameters
pub struct GalleryQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for GalleryQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = GalleryError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| GalleryError::invalid_request("query", rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// JSON body
pub struct GalleryJson<T>(pub T);

impl<T, S> FromRequest<S> for GalleryJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = GalleryError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| GalleryError::invalid_request("body", rejection.body_text()))?;
        Ok(Self(value))
    }
}
