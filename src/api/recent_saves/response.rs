//! Response normalization for recent saves.
//!
//! Projects the gateway's polymorphic saved-item list onto the fixed REST
//! schema. Unrecognized item variants produce no output record: the gateway
//! ships new node types before REST consumers learn about them, and stale
//! consumers must degrade gracefully rather than error.

use serde::Serialize;

use crate::graph::queries::{RecentSavesData, SavedItem, SavedItemVariant};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentSavesResponse {
    pub data: Vec<SavedItemRecord>,
}

/// One normalized saved item, discriminated for the REST consumer.
///
/// Absent optional fields serialize as explicit `null`, never as an empty
/// string or zero stand-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "__typename")]
pub enum SavedItemRecord {
    #[serde(rename_all = "camelCase")]
    Save {
        id: String,
        resolved_url: Option<String>,
        given_url: String,
        title: Option<String>,
        excerpt: Option<String>,
        domain: Option<String>,
        word_count: Option<i64>,
        top_image_url: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    PendingSave {
        id: String,
        given_url: Option<String>,
    },
}

/// Select the record shape for one saved item, or drop it.
fn reduce_item(node: SavedItem) -> Option<SavedItemRecord> {
    match node.item {
        SavedItemVariant::Item(item) => Some(SavedItemRecord::Save {
            id: node.id,
            resolved_url: item.resolved_url,
            given_url: item.given_url,
            title: item.title,
            excerpt: item.excerpt,
            domain: item.domain,
            word_count: item.word_count,
            top_image_url: item.top_image.map(|image| image.url),
        }),
        SavedItemVariant::PendingItem => Some(SavedItemRecord::PendingSave {
            id: node.id,
            given_url: node.url,
        }),
        SavedItemVariant::Unknown => None,
    }
}

pub fn response_transformer(data: RecentSavesData) -> RecentSavesResponse {
    let edges = data
        .user
        .and_then(|user| user.saved_items)
        .map(|connection| connection.edges)
        .unwrap_or_default();

    RecentSavesResponse {
        data: edges
            .into_iter()
            .filter_map(|edge| edge.node)
            .filter_map(reduce_item)
            .collect(),
    }
}
