//! Errors - エラー型と分類
//!
//! - `StoreError`: 永続化層（RankRepository）の失敗
//! - `ContentError`: host のコンテンツ照会の失敗
//! - `ApiError`: OrderingApi / QueryAdapter が呼び出し側に返すエラー

use thiserror::Error;

use super::ids::{Actor, CollectionKey};

/// ErrorKind は呼び出し側がどう振る舞うべきかの分類
///
/// - Rejected: リクエスト自体を直す必要がある（再送しても同じ結果）
/// - Retryable: そのまま再送してよい（書き込みは all-or-nothing かつ冪等）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Rejected,
    Retryable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("collection key must not be blank")]
pub struct InvalidCollectionKey;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The transaction was rejected; nothing from it is visible.
    #[error("write failed for collection={collection}: {reason}")]
    WriteFailed {
        collection: CollectionKey,
        reason: String,
    },

    #[error("read failed for collection={collection}: {reason}")]
    ReadFailed {
        collection: CollectionKey,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("content lookup failed for collection={collection}: {reason}")]
pub struct ContentError {
    pub collection: CollectionKey,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("actor={actor} may not reorder collection={collection}")]
    Forbidden {
        actor: Actor,
        collection: CollectionKey,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Content(#[from] ContentError),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Forbidden { .. } | ApiError::InvalidInput(_) => ErrorKind::Rejected,
            ApiError::Store(_) | ApiError::Content(_) => ErrorKind::Retryable,
        }
    }
}

impl From<InvalidCollectionKey> for ApiError {
    fn from(err: InvalidCollectionKey) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_failures_are_retryable() {
        let err: ApiError = StoreError::WriteFailed {
            collection: CollectionKey::new("event").unwrap(),
            reason: "connection reset".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Retryable);
        assert_eq!(
            err.to_string(),
            "write failed for collection=event: connection reset"
        );
    }

    #[test]
    fn validation_failures_are_rejected() {
        let err: ApiError = InvalidCollectionKey.into();
        assert_eq!(err.kind(), ErrorKind::Rejected);
        assert!(err.to_string().contains("blank"));
    }
}
