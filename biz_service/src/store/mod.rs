pub mod memory_store;
pub mod mongo_store;

use crate::entitys::friend_request_entity::{FriendRequestEntity, FriendRequestStatus};
use crate::entitys::match_criteria::MatchCriteria;
use crate::entitys::user_entity::UserInfoEntity;
use async_trait::async_trait;
use common::errors::AppResult;
use common::UserId;
use mongodb::bson::DateTime;

/// 用户存储：每次读写只涉及单个文档
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<UserInfoEntity>>;

    /// 不存在的 ID 直接忽略，返回顺序不保证
    async fn find_by_ids(&self, ids: &[UserId]) -> AppResult<Vec<UserInfoEntity>>;

    /// 全部满足条件的用户，存储原生顺序，不分页
    async fn find_matches(&self, criteria: &MatchCriteria) -> AppResult<Vec<UserInfoEntity>>;

    /// 将 `friend_id` 加入 `uid` 的好友集合（已存在则不变），返回用户是否存在
    async fn add_friend(&self, uid: &str, friend_id: &str) -> AppResult<bool>;

    async fn insert(&self, user: &UserInfoEntity) -> AppResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Created,
    /// 同一用户对已有记录（唯一索引冲突）
    Duplicate,
}

#[async_trait]
pub trait FriendRequestStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<FriendRequestEntity>>;

    /// 两个用户之间任意方向、任意状态的申请
    async fn find_between(&self, a: &str, b: &str) -> AppResult<Option<FriendRequestEntity>>;

    async fn insert(&self, request: &FriendRequestEntity) -> AppResult<InsertOutcome>;

    async fn set_status(&self, id: &str, status: FriendRequestStatus, updated_at: DateTime) -> AppResult<()>;

    async fn find_by_recipient(&self, uid: &str, status: FriendRequestStatus) -> AppResult<Vec<FriendRequestEntity>>;

    async fn find_by_sender(&self, uid: &str, status: FriendRequestStatus) -> AppResult<Vec<FriendRequestEntity>>;
}
