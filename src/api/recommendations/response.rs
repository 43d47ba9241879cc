//! Response normalization for recommendations.

use serde::Serialize;
use url::Url;

use crate::graph::queries::{CorpusRecommendation, NewTabRecommendationsData};

/// Substituted when the slate arrives without a utmSource.
pub const DEFAULT_UTM_SOURCE: &str = "pocket-newtab";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationsResponse {
    pub data: Vec<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(rename = "__typename")]
    pub typename: &'static str,
    pub tile_id: i64,
    pub url: String,
    pub title: String,
    pub excerpt: String,
    pub publisher: String,
    pub image_url: String,
}

/// Pick the slate's utmSource, or fall back to the default.
///
/// The fallback is logged: a slate without a utmSource is an upstream data
/// problem worth surfacing, not worth failing the request over.
pub fn resolve_utm_source(utm_source: Option<&str>) -> &str {
    match utm_source {
        Some(source) if !source.is_empty() => source,
        _ => {
            tracing::warn!(
                fallback = DEFAULT_UTM_SOURCE,
                "utmSource missing from slate, substituting default"
            );
            DEFAULT_UTM_SOURCE
        }
    }
}

/// Set `utm_source` on a URL, replacing any existing value.
///
/// Idempotent: applying this twice yields the same URL as applying it once.
/// Handles URLs with no query string, an existing query string, and a
/// fragment. A URL the gateway sends that does not parse is passed through
/// unmodified rather than failing the whole response.
pub fn append_utm_source(url: &str, utm_source: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        tracing::warn!(url, "recommendation url did not parse, skipping enrichment");
        return url.to_string();
    };

    let existing: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(name, _)| name != "utm_source")
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();

    {
        let mut pairs = parsed.query_pairs_mut();
        pairs.clear();
        for (name, value) in &existing {
            pairs.append_pair(name, value);
        }
        pairs.append_pair("utm_source", utm_source);
    }

    parsed.to_string()
}

pub fn map_recommendation(
    recommendation: CorpusRecommendation,
    utm_source: &str,
) -> Recommendation {
    let item = recommendation.corpus_item;
    Recommendation {
        typename: "Recommendation",
        tile_id: recommendation.tile_id,
        url: append_utm_source(&item.url, utm_source),
        title: item.title,
        excerpt: item.excerpt,
        publisher: item.publisher,
        image_url: item.image_url,
    }
}

pub fn response_transformer(data: NewTabRecommendationsData) -> RecommendationsResponse {
    let slate = data.new_tab_slate;
    let utm_source = resolve_utm_source(slate.utm_source.as_deref()).to_string();

    RecommendationsResponse {
        data: slate
            .recommendations
            .into_iter()
            .map(|recommendation| map_recommendation(recommendation, &utm_source))
            .collect(),
    }
}
