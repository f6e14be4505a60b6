//! Body extraction for endpoints whose payload is optional.
//!
//! An empty body means "nothing submitted" and yields `T::default()`. A body
//! that is present but has the wrong content type or does not deserialize is
//! a 400, never silently dropped.

use axum::{
    body::{to_bytes, Body},
    extract::{FromRequest, Request},
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

const MAX_BODY_BYTES: usize = 64 * 1024;

async fn buffered(req: Request) -> Result<Option<Request>> {
    let (parts, body) = req.into_parts();
    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| Error::BadRequest(format!("Failed to read request body: {}", e)))?;
    if bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(Request::from_parts(parts, Body::from(bytes))))
}

pub async fn json_or_default<T>(req: Request) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let Some(req) = buffered(req).await? else {
        return Ok(T::default());
    };
    let Json(value) = Json::<T>::from_request(req, &())
        .await
        .map_err(|rejection| Error::BadRequest(rejection.body_text()))?;
    Ok(value)
}

pub async fn form_or_default<T>(req: Request) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let Some(req) = buffered(req).await? else {
        return Ok(T::default());
    };
    let Form(value) = Form::<T>::from_request(req, &())
        .await
        .map_err(|rejection| Error::BadRequest(rejection.body_text()))?;
    Ok(value)
}
