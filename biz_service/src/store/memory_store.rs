use crate::entitys::friend_request_entity::{FriendRequestEntity, FriendRequestStatus, pair_key};
use crate::entitys::match_criteria::MatchCriteria;
use crate::entitys::user_entity::{UserInfoEntity, UserSeedDto};
use crate::store::{FriendRequestStore, InsertOutcome, UserStore};
use anyhow::Context;
use async_trait::async_trait;
use common::errors::{AppError, AppResult};
use common::{RequestId, UserId};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use log::info;
use mongodb::bson::DateTime;
use std::path::Path;

/// 进程内用户存储，单条记录的读写由 DashMap 分片锁保证原子性
#[derive(Default)]
pub struct MemoryUserStore {
    users: DashMap<UserId, UserInfoEntity>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 数组文件加载种子用户
    pub fn load_seed(&self, path: &Path) -> AppResult<usize> {
        let raw = std::fs::read_to_string(path).with_context(|| format!("read seed file {}", path.display()))?;
        let seeds: Vec<UserSeedDto> = serde_json::from_str(&raw)?;
        let count = seeds.len();
        for seed in seeds {
            let user = UserInfoEntity::from(seed);
            self.users.insert(user.id.clone(), user);
        }
        info!("loaded {} seed users from {}", count, path.display());
        Ok(count)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<UserInfoEntity>> {
        Ok(self.users.get(id).map(|u| u.value().clone()))
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> AppResult<Vec<UserInfoEntity>> {
        Ok(ids.iter().filter_map(|id| self.users.get(id).map(|u| u.value().clone())).collect())
    }

    async fn find_matches(&self, criteria: &MatchCriteria) -> AppResult<Vec<UserInfoEntity>> {
        Ok(self.users.iter().filter(|u| criteria.matches(u.value())).map(|u| u.value().clone()).collect())
    }

    async fn add_friend(&self, uid: &str, friend_id: &str) -> AppResult<bool> {
        let Some(mut user) = self.users.get_mut(uid) else {
            return Ok(false);
        };
        if !user.is_friend_of(friend_id) {
            user.friends.push(friend_id.to_string());
            user.updated_at = DateTime::now();
        }
        Ok(true)
    }

    async fn insert(&self, user: &UserInfoEntity) -> AppResult<()> {
        match self.users.entry(user.id.clone()) {
            Entry::Occupied(_) => Err(AppError::Internal(format!("duplicate user id {}", user.id))),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(())
            }
        }
    }
}

/// 进程内好友申请存储，`pairs` 充当 pairKey 唯一索引
#[derive(Default)]
pub struct MemoryFriendRequestStore {
    requests: DashMap<RequestId, FriendRequestEntity>,
    pairs: DashMap<String, RequestId>,
}

impl MemoryFriendRequestStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    fn collect<F>(&self, pred: F) -> Vec<FriendRequestEntity>
    where
        F: Fn(&FriendRequestEntity) -> bool,
    {
        self.requests.iter().filter(|r| pred(r.value())).map(|r| r.value().clone()).collect()
    }
}

#[async_trait]
impl FriendRequestStore for MemoryFriendRequestStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<FriendRequestEntity>> {
        Ok(self.requests.get(id).map(|r| r.value().clone()))
    }

    async fn find_between(&self, a: &str, b: &str) -> AppResult<Option<FriendRequestEntity>> {
        let Some(id) = self.pairs.get(&pair_key(a, b)).map(|id| id.value().clone()) else {
            return Ok(None);
        };
        Ok(self.requests.get(&id).map(|r| r.value().clone()))
    }

    async fn insert(&self, request: &FriendRequestEntity) -> AppResult<InsertOutcome> {
        match self.pairs.entry(request.pair_key.clone()) {
            Entry::Occupied(_) => Ok(InsertOutcome::Duplicate),
            Entry::Vacant(slot) => {
                self.requests.insert(request.id.clone(), request.clone());
                slot.insert(request.id.clone());
                Ok(InsertOutcome::Created)
            }
        }
    }

    async fn set_status(&self, id: &str, status: FriendRequestStatus, updated_at: DateTime) -> AppResult<()> {
        if let Some(mut request) = self.requests.get_mut(id) {
            request.status = status;
            request.updated_at = updated_at;
        }
        Ok(())
    }

    async fn find_by_recipient(&self, uid: &str, status: FriendRequestStatus) -> AppResult<Vec<FriendRequestEntity>> {
        Ok(self.collect(|r| r.recipient == uid && r.status == status))
    }

    async fn find_by_sender(&self, uid: &str, status: FriendRequestStatus) -> AppResult<Vec<FriendRequestEntity>> {
        Ok(self.collect(|r| r.sender == uid && r.status == status))
    }
}
