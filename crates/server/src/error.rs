//! hanzi server error type.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use hanzi_api::response as res;

pub type HanziResult<T> = Result<T, HanziError>;

pub enum HanziError {
    BadRequest(String),
    Internal(eyre::Report),
}

impl<E> From<E> for HanziError
where
    E: Into<eyre::Report>,
{
    fn from(value: E) -> Self {
        Self::Internal(value.into())
    }
}

impl IntoResponse for HanziError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Internal(err) => {
                tracing::error!("{err:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{err:#}"))
            }
        };
        (status, Json(res::Error { message })).into_response()
    }
}
