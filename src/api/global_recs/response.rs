//! Response normalization for the legacy global recs contract.
//!
//! Stale desktop clients still consume the pre-gateway feed schema, so the
//! same recommendations payload is projected onto that envelope: constant
//! status/settings blocks and feed items with CDN-resized image URLs.

use serde::Serialize;
use serde_json::{json, Value};

use crate::api::recommendations::response::{append_utm_source, resolve_utm_source};
use crate::graph::queries::{CorpusRecommendation, NewTabRecommendationsData};

/// Static hash mimicking the legacy response schema's settings version.
const LEGACY_SETTINGS_VERSION: &str = "6f605b0212069b4b8d3d040faf55742061a25c16";

const IMAGE_CDN_BASE: &str = "https://img-getpocket.cdn.mozilla.net/direct";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalRecsResponse {
    pub status: i64,
    pub spocs: Vec<Value>,
    pub settings: LegacySettings,
    pub recommendations: Vec<LegacyFeedItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacySettings {
    pub domain_affinity_parameter_sets: Value,
    pub time_segments: Vec<TimeSegment>,
    pub recs_expire_time: i64,
    pub spocs_per_new_tabs: f64,
    pub version: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSegment {
    pub id: &'static str,
    pub start_time: i64,
    pub end_time: i64,
    pub weight_position: f64,
}

/// Legacy feed item keys are a fixed wire contract; note the mixed casing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegacyFeedItem {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub excerpt: String,
    pub domain: String,
    pub raw_image_src: String,
    pub image_src: String,
}

fn legacy_settings() -> LegacySettings {
    LegacySettings {
        domain_affinity_parameter_sets: json!({}),
        time_segments: vec![
            TimeSegment {
                id: "week",
                start_time: 604_800,
                end_time: 0,
                weight_position: 1.0,
            },
            TimeSegment {
                id: "month",
                start_time: 2_592_000,
                end_time: 604_800,
                weight_position: 0.5,
            },
        ],
        recs_expire_time: 5400,
        spocs_per_new_tabs: 0.5,
        version: LEGACY_SETTINGS_VERSION,
    }
}

/// Image CDN resize URL with the original image URL percent-encoded into
/// the `url` parameter.
fn cached_image_url(image_url: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(image_url.as_bytes()).collect();
    format!("{IMAGE_CDN_BASE}?url={encoded}&resize=w450")
}

pub fn map_recommendation(
    recommendation: CorpusRecommendation,
    utm_source: &str,
) -> LegacyFeedItem {
    let item = recommendation.corpus_item;
    LegacyFeedItem {
        id: recommendation.tile_id,
        url: append_utm_source(&item.url, utm_source),
        title: item.title,
        excerpt: item.excerpt,
        domain: item.publisher,
        image_src: cached_image_url(&item.image_url),
        raw_image_src: item.image_url,
    }
}

pub fn response_transformer(data: NewTabRecommendationsData) -> GlobalRecsResponse {
    let slate = data.new_tab_slate;
    let utm_source = resolve_utm_source(slate.utm_source.as_deref()).to_string();

    GlobalRecsResponse {
        status: 1,
        spocs: Vec::new(),
        settings: legacy_settings(),
        recommendations: slate
            .recommendations
            .into_iter()
            .map(|recommendation| map_recommendation(recommendation, &utm_source))
            .collect(),
    }
}
