//! Domain identifiers (strongly-typed IDs).
//!
//! - `ItemId`: host (CMS) が所有するコンテンツの ID。整数でも文字列でもよい
//! - `CollectionKey`: 1 つの順序列を共有するパーティション名（例: post type）
//! - `Actor`: 認証済みのリクエスト主体
//! - `Revision`: コミットされた rank 割り当て 1 回分を識別する ULID

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

use super::errors::InvalidCollectionKey;

/// Opaque identifier of a content record owned by the host.
///
/// JSON form is a bare number or a bare string. The derived ordering puts
/// every integer before every string; it is the tie-breaker for equal ranks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Int(i64),
    Key(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Int(n) => n.fmt(f),
            ItemId::Key(s) => s.fmt(f),
        }
    }
}

impl From<i64> for ItemId {
    fn from(n: i64) -> Self {
        ItemId::Int(n)
    }
}

impl From<i32> for ItemId {
    fn from(n: i32) -> Self {
        ItemId::Int(i64::from(n))
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId::Key(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId::Key(s)
    }
}

/// Name of one ordering partition.
///
/// Always trimmed and non-empty. Separate keys never share ranks, so two
/// content types can order the same item id independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CollectionKey(String);

impl CollectionKey {
    pub fn new(key: impl AsRef<str>) -> Result<Self, InvalidCollectionKey> {
        let key = key.as_ref().trim();
        if key.is_empty() {
            return Err(InvalidCollectionKey);
        }
        Ok(Self(key.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CollectionKey {
    type Error = InvalidCollectionKey;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CollectionKey> for String {
    fn from(key: CollectionKey) -> Self {
        key.0
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The authenticated principal behind a request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor(String);

impl Actor {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier of one committed rank assignment.
///
/// コミットごとに一意です。並び順はコミット順を表しません
/// （revision は書き込みの前に採番されます）。
/// 同じ collection に対する並行 reorder のうち、どれが最後に勝ったかは
/// 現在の snapshot の revision と一致するかで確認します。
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision(Ulid);

impl Revision {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl From<Ulid> for Revision {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rev-{}", self.0)
    }
}
