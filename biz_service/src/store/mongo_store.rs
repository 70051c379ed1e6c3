use crate::entitys::friend_request_entity::{FriendRequestEntity, FriendRequestStatus};
use crate::entitys::match_criteria::MatchCriteria;
use crate::entitys::user_entity::UserInfoEntity;
use crate::store::{FriendRequestStore, InsertOutcome, UserStore};
use async_trait::async_trait;
use common::errors::AppResult;
use common::index_trait::MongoIndexModelProvider;
use common::query_builder::QueryBuilder;
use common::repository_util::{BaseRepository, Repository, is_duplicate_key, parse_object_id};
use common::UserId;
use log::{debug, warn};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{DateTime, doc};
use mongodb::Database;

pub const USER_COLLECTION: &str = "users";
pub const FRIEND_REQUEST_COLLECTION: &str = "friend_requests";

fn object_ids(ids: &[UserId]) -> Vec<ObjectId> {
    ids.iter().filter_map(|id| parse_object_id(id)).collect()
}

pub struct MongoUserStore {
    pub dao: BaseRepository<UserInfoEntity>,
}

impl MongoUserStore {
    pub async fn new(db: &Database) -> AppResult<Self> {
        let dao = BaseRepository::new(db.collection::<UserInfoEntity>(USER_COLLECTION));
        dao.ensure_indexes(UserInfoEntity::index_models()).await?;
        Ok(Self { dao })
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<UserInfoEntity>> {
        Ok(self.dao.find_by_id(id).await?)
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> AppResult<Vec<UserInfoEntity>> {
        let oids = object_ids(ids);
        if oids.is_empty() {
            return Ok(vec![]);
        }
        Ok(self.dao.query(QueryBuilder::new().in_array("_id", oids).build()).await?)
    }

    async fn find_matches(&self, criteria: &MatchCriteria) -> AppResult<Vec<UserInfoEntity>> {
        let filter = criteria.to_filter();
        debug!("match filter: {}", filter);
        Ok(self.dao.query(filter).await?)
    }

    async fn add_friend(&self, uid: &str, friend_id: &str) -> AppResult<bool> {
        let (Some(uid_oid), Some(friend_oid)) = (parse_object_id(uid), parse_object_id(friend_id)) else {
            warn!("add_friend skipped, malformed id {} / {}", uid, friend_id);
            return Ok(false);
        };
        let update = doc! {
            "$addToSet": { "friends": friend_oid },
            "$set": { "updatedAt": DateTime::now() },
        };
        let matched = self.dao.update_one(doc! { "_id": uid_oid }, update).await?;
        Ok(matched > 0)
    }

    async fn insert(&self, user: &UserInfoEntity) -> AppResult<()> {
        Ok(self.dao.insert(user).await?)
    }
}

pub struct MongoFriendRequestStore {
    pub dao: BaseRepository<FriendRequestEntity>,
}

impl MongoFriendRequestStore {
    pub async fn new(db: &Database) -> AppResult<Self> {
        let dao = BaseRepository::new(db.collection::<FriendRequestEntity>(FRIEND_REQUEST_COLLECTION));
        dao.ensure_indexes(FriendRequestEntity::index_models()).await?;
        Ok(Self { dao })
    }

    async fn find_by_party(&self, field: &str, uid: &str, status: FriendRequestStatus) -> AppResult<Vec<FriendRequestEntity>> {
        let Some(oid) = parse_object_id(uid) else {
            return Ok(vec![]);
        };
        let filter = QueryBuilder::new().eq(field, oid).eq("status", status.as_ref()).build();
        Ok(self.dao.query(filter).await?)
    }
}

#[async_trait]
impl FriendRequestStore for MongoFriendRequestStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<FriendRequestEntity>> {
        Ok(self.dao.find_by_id(id).await?)
    }

    async fn find_between(&self, a: &str, b: &str) -> AppResult<Option<FriendRequestEntity>> {
        let (Some(a), Some(b)) = (parse_object_id(a), parse_object_id(b)) else {
            return Ok(None);
        };
        let filter = QueryBuilder::new()
            .eq("sender", a)
            .eq("recipient", b)
            .or()
            .eq("sender", b)
            .eq("recipient", a)
            .build();
        Ok(self.dao.find_one(filter).await?)
    }

    async fn insert(&self, request: &FriendRequestEntity) -> AppResult<InsertOutcome> {
        match self.dao.insert(request).await {
            Ok(()) => Ok(InsertOutcome::Created),
            Err(e) if is_duplicate_key(&e) => Ok(InsertOutcome::Duplicate),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_status(&self, id: &str, status: FriendRequestStatus, updated_at: DateTime) -> AppResult<()> {
        let Some(oid) = parse_object_id(id) else {
            return Ok(());
        };
        let update = doc! { "$set": { "status": status.as_ref(), "updatedAt": updated_at } };
        self.dao.update_one(doc! { "_id": oid }, update).await?;
        Ok(())
    }

    async fn find_by_recipient(&self, uid: &str, status: FriendRequestStatus) -> AppResult<Vec<FriendRequestEntity>> {
        self.find_by_party("recipient", uid, status).await
    }

    async fn find_by_sender(&self, uid: &str, status: FriendRequestStatus) -> AppResult<Vec<FriendRequestEntity>> {
        self.find_by_party("sender", uid, status).await
    }
}
