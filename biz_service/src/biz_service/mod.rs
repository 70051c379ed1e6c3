pub mod friend_service;
pub mod match_service;

use crate::store::memory_store::{MemoryFriendRequestStore, MemoryUserStore};
use crate::store::mongo_store::{MongoFriendRequestStore, MongoUserStore};
use crate::store::{FriendRequestStore, UserStore};
use common::errors::AppResult;
use friend_service::FriendService;
use match_service::MatchService;
use mongodb::Database;
use std::sync::Arc;

/// 两个存储的共享句柄，服务之间共用同一份
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub requests: Arc<dyn FriendRequestStore>,
}

impl Stores {
    pub async fn mongo(db: &Database) -> AppResult<Self> {
        Ok(Self {
            users: Arc::new(MongoUserStore::new(db).await?),
            requests: Arc::new(MongoFriendRequestStore::new(db).await?),
        })
    }

    pub fn memory(users: MemoryUserStore) -> Self {
        Self { users: Arc::new(users), requests: Arc::new(MemoryFriendRequestStore::new()) }
    }

    pub fn match_service(&self) -> MatchService {
        MatchService::new(self.users.clone())
    }

    pub fn friend_service(&self) -> FriendService {
        FriendService::new(self.users.clone(), self.requests.clone())
    }
}
