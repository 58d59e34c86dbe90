//! Frequently used imports for handlers.

pub use crate::{
    error::{HanziError, HanziResult},
    HanziState,
};
pub use axum::{extract::State, Json};
pub use hanzi_api::{request as req, response as res};
pub use tracing::instrument;
