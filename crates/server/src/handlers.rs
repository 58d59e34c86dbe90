//! Handlers for each main route.

pub mod analyze;
pub mod segment;

mod prelude;

use prelude::*;

pub async fn health() -> &'static str {
    "ok"
}

// rejects texts over the configured limit before any work is done
fn check_length(state: &HanziState, text: &str) -> HanziResult<()> {
    if text.len() > state.max_text_bytes {
        return Err(HanziError::BadRequest(format!(
            "Text is {} bytes, the limit is {}",
            text.len(),
            state.max_text_bytes
        )));
    }
    Ok(())
}
