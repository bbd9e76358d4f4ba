use serde::{Deserialize, Serialize};

use crate::domain::{PairId, TaggedType};

/// Batch label the backend expects when none was recorded for a pair.
pub const DEFAULT_BATCH: &str = "1_1";

/// One annotatable unit: two images and a description. `image_paths` is a
/// fixed-size array so a payload with any other arity fails deserialization
/// instead of reaching display code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageTextPair {
    pub id: PairId,
    pub image_paths: [String; 2],
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagged_type: Option<TaggedType>,
    pub batch: String,
}

impl ImageTextPair {
    pub fn source_image(&self) -> &str {
        &self.image_paths[0]
    }

    pub fn target_image(&self) -> &str {
        &self.image_paths[1]
    }
}

/// One page of the `/tags` listing. The counter fields keep the backend's
/// camelCase wire names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairPage {
    pub tags: Vec<ImageTextPair>,
    #[serde(rename = "currentPage")]
    pub current_page: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
    #[serde(rename = "totalTags")]
    pub total_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkPairRequest {
    pub tagged_type: TaggedType,
    pub id: PairId,
    pub batch: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePairRequest {
    pub image_paths: [String; 2],
    pub description: String,
    pub id: PairId,
    pub batch: String,
}
