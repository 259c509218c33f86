//! CapabilityTable - 静的な権限テーブルによる Authorizer
//!
//! actor ごとに並び替えてよい collection を保持します。
//! `grant_all` を受けた actor はすべての collection を並び替えられます。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use crate::domain::{Actor, CollectionKey};
use crate::ports::Authorizer;

#[derive(Debug, Clone)]
enum Grant {
    All,
    Only(HashSet<CollectionKey>),
}

#[derive(Debug, Clone, Default)]
pub struct CapabilityTable {
    grants: HashMap<Actor, Grant>,
}

impl CapabilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(mut self, actor: Actor, collection: CollectionKey) -> Self {
        match self
            .grants
            .entry(actor)
            .or_insert_with(|| Grant::Only(HashSet::new()))
        {
            Grant::All => {}
            Grant::Only(collections) => {
                collections.insert(collection);
            }
        }
        self
    }

    pub fn grant_all(mut self, actor: Actor) -> Self {
        self.grants.insert(actor, Grant::All);
        self
    }

    pub fn allows(&self, actor: &Actor, collection: &CollectionKey) -> bool {
        match self.grants.get(actor) {
            Some(Grant::All) => true,
            Some(Grant::Only(collections)) => collections.contains(collection),
            None => false,
        }
    }
}

#[async_trait]
impl Authorizer for CapabilityTable {
    async fn can_reorder(&self, actor: &Actor, collection: &CollectionKey) -> bool {
        self.allows(actor, collection)
    }
}
