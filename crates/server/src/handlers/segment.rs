//! /segment

use super::prelude::*;

#[instrument(skip_all)]
pub async fn segment(
    State(state): State<HanziState>,
    text: Json<req::Text<'static>>,
) -> HanziResult<Json<res::Segmented>> {
    let req::Text { text } = text.0;
    super::check_length(&state, &text)?;
    tracing::info!("Segmenting {} bytes of text", text.len());

    let sentences = tokio::task::spawn_blocking(move || {
        state
            .segmenter
            .process_text_detailed(&text)
            .into_iter()
            .map(|processed| {
                let resolved_by_context = processed.resolved_by_context();
                if !resolved_by_context {
                    tracing::warn!(
                        "Sentence {} fell back to per-character readings",
                        processed.sentence
                    );
                }
                res::SegmentedSentence {
                    sentence: processed.sentence,
                    tokens: processed.tokens,
                    resolved_by_context,
                }
            })
            .collect::<Vec<_>>()
    })
    .await?;
    Ok(Json(res::Segmented { sentences }))
}
