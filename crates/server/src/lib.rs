//! Web backend for hanzi.

pub mod config;
pub mod error;
pub mod handlers;

use crate::handlers::{analyze, segment};
use axum::{
    routing::{get, post},
    Router,
};
use config::Config;
use hanzi::{FrequencyTable, PinyinTransliterator, Segmenter};
use hanzi_core::DifficultyReport;
use moka::future::Cache;
use std::{fmt::Debug, ops::Deref, sync::Arc};
use tower_http::cors::CorsLayer;

/// Analyses are pure, so they are cached by text.
pub type AnalysisCache = Cache<String, Arc<DifficultyReport>>;

/// A cache that holds at most `max_bytes` of text in its keys.
pub fn analysis_cache(max_bytes: u64) -> AnalysisCache {
    Cache::builder()
        .weigher(|text: &String, _report: &Arc<DifficultyReport>| -> u32 {
            text.len().try_into().unwrap_or(u32::MAX)
        })
        .max_capacity(max_bytes)
        .build()
}

#[derive(Clone)]
pub struct HanziState(Arc<HanziStateCore>);

impl Deref for HanziState {
    type Target = HanziStateCore;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Debug for HanziState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Hanzi")
    }
}

pub struct HanziStateCore {
    pub segmenter: Segmenter<PinyinTransliterator>,
    pub frequency_table: FrequencyTable,
    pub analyses: AnalysisCache,
    pub max_text_bytes: usize,
}

impl HanziState {
    pub fn new(
        segmenter: Segmenter<PinyinTransliterator>,
        frequency_table: FrequencyTable,
        analyses: AnalysisCache,
        max_text_bytes: usize,
    ) -> Self {
        Self(Arc::new(HanziStateCore {
            segmenter,
            frequency_table,
            analyses,
            max_text_bytes,
        }))
    }
}

pub fn router(state: HanziState) -> Router<()> {
    Router::new()
        .nest(
            "/api",
            Router::new()
                .route("/health", get(handlers::health))
                .route("/segment", post(segment::segment))
                .route("/analyze", post(analyze::analyze)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub fn router_from_config(config: &Config) -> Router<()> {
    let frequency_table = match &config.frequency_table {
        Some(path) => FrequencyTable::load_or_empty(path),
        None => FrequencyTable::bundled(),
    };
    tracing::info!("Using {} ranked characters", frequency_table.len());
    let transliterator = match &config.phrase_table {
        Some(path) => PinyinTransliterator::load_or_bundled(path),
        None => PinyinTransliterator::new(),
    };
    let state = HanziState::new(
        Segmenter::new(transliterator),
        frequency_table,
        analysis_cache(config.analysis_cache_bytes),
        config.max_text_bytes,
    );
    router(state)
}
