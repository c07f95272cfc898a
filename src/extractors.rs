use crate::errors::AppError;
use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

/// A student identifier taken from the `{id}` path segment. Anything that is
/// not a UUID is rejected with a 400 before a handler runs.
pub struct StudentId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for StudentId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state).await?;
        let id = Uuid::parse_str(&raw)
            .map_err(|_| AppError::bad_request("id", format!("'{raw}' is not a valid UUID")))?;
        Ok(Self(id))
    }
}
