//! /analyze

use super::prelude::*;
use hanzi::DifficultyAnalyzer;
use std::sync::Arc;

#[instrument(skip_all)]
pub async fn analyze(
    State(state): State<HanziState>,
    text: Json<req::Text<'static>>,
) -> HanziResult<Json<res::DifficultyReport>> {
    let req::Text { text } = text.0;
    super::check_length(&state, &text)?;

    let text = text.into_owned();
    if let Some(report) = state.analyses.get(&text).await {
        tracing::debug!("Using cached analysis");
        return Ok(Json(report.as_ref().clone()));
    }

    tracing::info!("Analyzing {} bytes of text", text.len());
    let report = {
        let state = state.clone();
        let text = text.clone();
        tokio::task::spawn_blocking(move || {
            DifficultyAnalyzer::new(&state.frequency_table).analyze(&text)
        })
        .await?
    };
    state.analyses.insert(text, Arc::new(report.clone())).await;
    Ok(Json(report))
}
