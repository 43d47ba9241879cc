//! Gateway queries and their wire types.
//!
//! The documents and the types below are a hand-maintained contract with the
//! gateway schema. Any change to a document must be mirrored in the
//! corresponding variables/payload types, and vice versa.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RecentSaves
// ---------------------------------------------------------------------------

pub const RECENT_SAVES_QUERY: &str = r#"
query RecentSaves($pagination: PaginationInput) {
  user {
    savedItems(
      pagination: $pagination
      filter: { statuses: [UNREAD] }
      sort: { sortBy: CREATED_AT, sortOrder: DESC }
    ) {
      edges {
        cursor
        node {
          id
          status
          url
          item {
            __typename
            ... on Item {
              wordCount
              topImage {
                url
              }
              title
              resolvedUrl
              givenUrl
              excerpt
              domain
            }
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentSavesVariables {
    pub pagination: PaginationInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationInput {
    pub first: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecentSavesData {
    pub user: Option<SavedItemsUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SavedItemsUser {
    #[serde(rename = "savedItems")]
    pub saved_items: Option<SavedItemConnection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SavedItemConnection {
    #[serde(default)]
    pub edges: Vec<SavedItemEdge>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SavedItemEdge {
    pub node: Option<SavedItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SavedItem {
    pub id: String,
    /// The URL the save was created with.
    pub url: Option<String>,
    pub item: SavedItemVariant,
}

/// The polymorphic half of a saved item.
///
/// The gateway may introduce new variants before this service knows about
/// them; `Unknown` absorbs those so normalization can drop them instead of
/// failing the whole response.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "__typename")]
pub enum SavedItemVariant {
    Item(ItemNode),
    PendingItem,
    #[serde(other)]
    Unknown,
}

/// A fully parsed item. Everything but `givenUrl` is nullable upstream.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemNode {
    pub word_count: Option<i64>,
    pub top_image: Option<ImageRef>,
    pub title: Option<String>,
    pub resolved_url: Option<String>,
    pub given_url: String,
    pub excerpt: Option<String>,
    pub domain: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageRef {
    pub url: String,
}

// ---------------------------------------------------------------------------
// NewTabRecommendations
// ---------------------------------------------------------------------------

pub const NEW_TAB_RECOMMENDATIONS_QUERY: &str = r#"
query NewTabRecommendations($locale: String!, $region: String, $count: Int) {
  newTabSlate(locale: $locale, region: $region) {
    utmSource
    recommendations(count: $count) {
      id
      tileId
      corpusItem {
        excerpt
        imageUrl
        publisher
        title
        url
      }
    }
  }
}
"#;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationsVariables {
    pub locale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub count: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTabRecommendationsData {
    pub new_tab_slate: CorpusSlate,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusSlate {
    pub utm_source: Option<String>,
    #[serde(default)]
    pub recommendations: Vec<CorpusRecommendation>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusRecommendation {
    pub tile_id: i64,
    pub corpus_item: CorpusItem,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusItem {
    pub url: String,
    pub title: String,
    pub excerpt: String,
    pub publisher: String,
    pub image_url: String,
}
