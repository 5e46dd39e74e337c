// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Ranking configuration.
//!
//! Every knob has a default, so `{}` is a valid config file and a partial file
//! only overrides what it names. A weight table is replaced as a whole.
//! Keys are camelCase like the catalog payloads.
//!
//! ```json
//! {
//!   "relevanceWeights": { "title": 100, "content": 80, "attributes": 70, "sku": 60, "price": 90 },
//!   "penalty": { "keyword": "universal", "amount": 20 },
//!   "inScopeItemTypes": ["product"]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

// =============================================================================
// DEFAULTS
// =============================================================================

/// Additive relevance weights (summed across every matched field).
pub const RELEVANCE_TITLE: u32 = 100;
pub const RELEVANCE_PRICE: u32 = 90;
pub const RELEVANCE_CONTENT: u32 = 80;
pub const RELEVANCE_ATTRIBUTES: u32 = 70;
pub const RELEVANCE_SKU: u32 = 60;

/// Best-single-field weights for `token_score`.
pub const TOKEN_TITLE: u32 = 10;
pub const TOKEN_SKU: u32 = 8;
pub const TOKEN_ATTRIBUTES: u32 = 6;
pub const TOKEN_CONTENT: u32 = 5;
pub const TOKEN_PRICE: u32 = 4;

/// Catchword de-ranking. Tuned for one catalog where "universal" appears on
/// hundreds of accessory listings; other catalogs should set their own word
/// or disable it.
pub const PENALTY_KEYWORD: &str = "universal";
pub const PENALTY_AMOUNT: u32 = 20;

/// Per-field weights. Used twice with different defaults: once additively for
/// `relevance`, once as a per-token maximum for `token_score`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldWeights {
    pub title: u32,
    pub content: u32,
    pub attributes: u32,
    pub sku: u32,
    pub price: u32,
}

impl FieldWeights {
    pub const RELEVANCE: FieldWeights = FieldWeights {
        title: RELEVANCE_TITLE,
        content: RELEVANCE_CONTENT,
        attributes: RELEVANCE_ATTRIBUTES,
        sku: RELEVANCE_SKU,
        price: RELEVANCE_PRICE,
    };

    pub const TOKEN: FieldWeights = FieldWeights {
        title: TOKEN_TITLE,
        content: TOKEN_CONTENT,
        attributes: TOKEN_ATTRIBUTES,
        sku: TOKEN_SKU,
        price: TOKEN_PRICE,
    };

    pub fn max(&self) -> u32 {
        self.title
            .max(self.content)
            .max(self.attributes)
            .max(self.sku)
            .max(self.price)
    }

    pub fn total(&self) -> u64 {
        u64::from(self.title)
            + u64::from(self.content)
            + u64::from(self.attributes)
            + u64::from(self.sku)
            + u64::from(self.price)
    }
}

/// The catchword penalty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PenaltyConfig {
    pub enabled: bool,
    /// Lower-cased on load.
    pub keyword: String,
    pub amount: u32,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            keyword: PENALTY_KEYWORD.to_string(),
            amount: PENALTY_AMOUNT,
        }
    }
}

/// Store meta keys that ambient order-by hints refer to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetaKeys {
    pub price: String,
    pub sku: String,
    pub rating: String,
    pub popularity: String,
}

impl Default for MetaKeys {
    fn default() -> Self {
        Self {
            price: "_price".to_string(),
            sku: "_sku".to_string(),
            rating: "_wc_average_rating".to_string(),
            popularity: "total_sales".to_string(),
        }
    }
}

/// Everything tunable about ranking and plan emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RankingConfig {
    pub relevance_weights: FieldWeights,
    pub token_weights: FieldWeights,
    pub penalty: PenaltyConfig,
    pub meta_keys: MetaKeys,
    /// Taxonomy prefix whose term names make up the attribute text.
    pub attribute_taxonomy_prefix: String,
    /// Ambient order-by tokens meaning "sort the meta value numerically".
    pub numeric_sort_tokens: Vec<String>,
    /// Ambient order-by tokens meaning "sort the meta value" for ratings.
    pub rating_sort_tokens: Vec<String>,
    /// Item types this ranker augments. Anything else passes through.
    pub in_scope_item_types: Vec<String>,
    /// OR our filter with a host search filter already on the plan instead of
    /// AND-ing it.
    pub combine_host_filter: bool,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            relevance_weights: FieldWeights::RELEVANCE,
            token_weights: FieldWeights::TOKEN,
            penalty: PenaltyConfig::default(),
            meta_keys: MetaKeys::default(),
            attribute_taxonomy_prefix: "pa_".to_string(),
            numeric_sort_tokens: vec!["meta_value_num".to_string()],
            rating_sort_tokens: vec![
                "meta_value_num".to_string(),
                "meta_value".to_string(),
                "rating".to_string(),
            ],
            in_scope_item_types: vec!["product".to_string()],
            combine_host_filter: false,
        }
    }
}

impl RankingConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: RankingConfig = serde_json::from_str(json).map_err(|source| Error::Json {
            context: "ranking config".to_string(),
            source,
        })?;
        config.validated()
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Normalize case-sensitive values and reject configs that cannot rank.
    pub fn validated(mut self) -> Result<Self> {
        self.penalty.keyword = self.penalty.keyword.trim().to_lowercase();
        if self.penalty.enabled && self.penalty.keyword.is_empty() {
            return Err(Error::InvalidConfig {
                reason: "penalty.keyword is empty while the penalty is enabled".to_string(),
            });
        }
        if self.in_scope_item_types.is_empty() {
            return Err(Error::InvalidConfig {
                reason: "inScopeItemTypes must name at least one item type".to_string(),
            });
        }
        if self.relevance_weights.total() == 0 {
            return Err(Error::InvalidConfig {
                reason: "relevanceWeights are all zero".to_string(),
            });
        }
        for tokens in [&mut self.numeric_sort_tokens, &mut self.rating_sort_tokens] {
            for token in tokens.iter_mut() {
                *token = crate::utils::normalize_sort_key(token);
            }
        }
        Ok(self)
    }

    /// Whether queries over these item types get augmented.
    pub fn in_scope<S: AsRef<str>>(&self, item_types: &[S]) -> bool {
        item_types
            .iter()
            .any(|t| self.in_scope_item_types.iter().any(|s| s == t.as_ref()))
    }

    /// Penalty keyword as matched: trimmed and lower-cased, whether or not the
    /// config went through [`RankingConfig::validated`].
    pub(crate) fn penalty_keyword(&self) -> String {
        self.penalty.keyword.trim().to_lowercase()
    }

    /// Penalty amount as a signed score delta (0 when disabled).
    pub(crate) fn penalty_amount(&self) -> i64 {
        if self.penalty.enabled {
            i64::from(self.penalty.amount)
        } else {
            0
        }
    }
}
