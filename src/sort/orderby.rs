// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Ambient order-by configuration.
//!
//! Hosts hand us their current order-by in whatever shape they keep it:
//!
//! ```json
//! "price"                                  // one token
//! "meta_value_num date"                    // space or comma delimited
//! ["popularity", "date"]                   // a list
//! {"meta_value_num": "DESC", "ID": "ASC"}  // key -> direction
//! ```
//!
//! All four collapse into [`AmbientTokens`]: a normalized token list, the
//! primary token and a derived direction.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::Direction;
use crate::utils::normalize_sort_key;

/// Key/direction pairs in the order the host wrote them.
///
/// A `HashMap` would lose the order, and the first direction wins.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderPairs(pub Vec<(String, String)>);

impl<'de> Deserialize<'de> for OrderPairs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PairsVisitor;

        impl<'de> Visitor<'de> for PairsVisitor {
            type Value = OrderPairs;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of order-by keys to directions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, String>()? {
                    pairs.push((key, value));
                }
                Ok(OrderPairs(pairs))
            }
        }

        deserializer.deserialize_map(PairsVisitor)
    }
}

impl Serialize for OrderPairs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// The host's order-by value in any of its shapes.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum OrderByValue {
    /// One token or a space/comma delimited list.
    Text(String),
    List(Vec<String>),
    Map(OrderPairs),
}

impl OrderByValue {
    /// Raw entries in order. Map entries yield the key then the direction.
    pub fn entries(&self) -> Vec<String> {
        fn split(text: &str) -> impl Iterator<Item = String> + '_ {
            text.split(|c: char| c.is_whitespace() || c == ',')
                .filter(|piece| !piece.is_empty())
                .map(str::to_string)
        }

        match self {
            OrderByValue::Text(text) => split(text).collect(),
            OrderByValue::List(items) => items.iter().flat_map(|item| split(item)).collect(),
            OrderByValue::Map(pairs) => pairs
                .0
                .iter()
                .flat_map(|(key, direction)| split(key).chain(split(direction)))
                .collect(),
        }
    }
}

impl From<&str> for OrderByValue {
    fn from(text: &str) -> Self {
        OrderByValue::Text(text.to_string())
    }
}

/// The host's ordering state for one query.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AmbientOrder {
    pub orderby: Option<OrderByValue>,
    /// Meta key the host sorts by, e.g. `_price`.
    pub meta_key: Option<String>,
    /// Direction hint (`asc`/`desc`).
    pub order: Option<String>,
}

/// Normalized view of an [`AmbientOrder`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AmbientTokens {
    /// First non-direction token.
    pub primary: Option<String>,
    /// First `asc`/`desc` in the order-by entries, else the hint.
    pub direction: Option<Direction>,
    /// Every non-direction token, normalized and deduplicated.
    pub tokens: Vec<String>,
    /// Trimmed meta key hint; `None` when blank.
    pub meta_key: Option<String>,
}

impl AmbientTokens {
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    pub fn contains_any<S: AsRef<str>>(&self, tokens: &[S]) -> bool {
        tokens.iter().any(|t| self.contains(t.as_ref()))
    }

    /// Add a token if it is not already present, optionally at the front.
    pub fn insert(&mut self, token: String, front: bool) {
        if token.is_empty() || self.contains(&token) {
            return;
        }
        if front {
            self.tokens.insert(0, token);
            self.primary = self.tokens.first().cloned();
        } else {
            if self.primary.is_none() {
                self.primary = Some(token.clone());
            }
            self.tokens.push(token);
        }
    }
}

/// Normalize an ambient order into tokens and a direction.
pub fn parse_ambient(ambient: &AmbientOrder) -> AmbientTokens {
    let mut parsed = AmbientTokens {
        meta_key: ambient
            .meta_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string),
        ..Default::default()
    };

    let entries = ambient
        .orderby
        .as_ref()
        .map(OrderByValue::entries)
        .unwrap_or_default();
    for entry in entries {
        let token = normalize_sort_key(&entry);
        if token.is_empty() {
            continue;
        }
        match Direction::parse(&token) {
            Some(direction) => {
                parsed.direction.get_or_insert(direction);
            }
            None => parsed.insert(token, false),
        }
    }

    if parsed.direction.is_none() {
        parsed.direction = ambient.order.as_deref().and_then(Direction::parse);
    }
    parsed
}
