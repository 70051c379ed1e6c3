use crate::entitys::user_entity::UserBriefDto;
use crate::entitys::{deserialize_object_id_as_hex_string, new_id, serialize_hex_string_as_object_id};
use common::{RequestId, UserId};
use mongo_macro::MongoIndexModelProvider as MongoDeriveMongoIndex;
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// 好友申请状态，只允许 pending → accepted
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, ToSchema, AsRefStr, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FriendRequestStatus {
    #[default]
    Pending,
    Accepted,
}

/// 好友申请（集合 `friend_requests`）
#[derive(Debug, Clone, Serialize, Deserialize, MongoDeriveMongoIndex)]
#[mongo_index(fields("pairKey"), unique, name("uniq_pair_key"))]
#[mongo_index(fields("recipient", "status"), name("idx_recipient_status"))]
#[mongo_index(fields("sender", "status"), name("idx_sender_status"))]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestEntity {
    #[serde(rename = "_id", serialize_with = "serialize_hex_string_as_object_id", deserialize_with = "deserialize_object_id_as_hex_string")]
    pub id: RequestId,
    #[serde(serialize_with = "serialize_hex_string_as_object_id", deserialize_with = "deserialize_object_id_as_hex_string")]
    pub sender: UserId,
    #[serde(serialize_with = "serialize_hex_string_as_object_id", deserialize_with = "deserialize_object_id_as_hex_string")]
    pub recipient: UserId,
    #[serde(default)]
    pub status: FriendRequestStatus,
    /// 无序用户对，唯一索引保证一对用户最多一条申请
    #[serde(default)]
    pub pair_key: String,
    #[serde(default = "DateTime::now")]
    pub created_at: DateTime,
    #[serde(default = "DateTime::now")]
    pub updated_at: DateTime,
}

impl FriendRequestEntity {
    pub fn new_pending(sender: &str, recipient: &str) -> Self {
        let now = DateTime::now();
        Self {
            id: new_id(),
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            status: FriendRequestStatus::Pending,
            pair_key: pair_key(sender, recipient),
            created_at: now,
            updated_at: now,
        }
    }

    /// 未关联用户资料的原始记录
    pub fn to_dto(&self) -> FriendRequestDto {
        self.to_dto_with(PartyDto::Id(self.sender.clone()), PartyDto::Id(self.recipient.clone()))
    }

    pub fn to_dto_with(&self, sender: PartyDto, recipient: PartyDto) -> FriendRequestDto {
        FriendRequestDto {
            id: self.id.clone(),
            sender,
            recipient,
            status: self.status,
            created_at: self.created_at.timestamp_millis(),
            updated_at: self.updated_at.timestamp_millis(),
        }
    }
}

/// 与方向无关的用户对标识
pub fn pair_key(a: &str, b: &str) -> String {
    if a <= b { format!("{}:{}", a, b) } else { format!("{}:{}", b, a) }
}

/// 申请中的一方：关联到用户资料时为对象，否则为用户 ID
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(untagged)]
pub enum PartyDto {
    Profile(UserBriefDto),
    Id(UserId),
}

impl PartyDto {
    pub fn id(&self) -> &str {
        match self {
            PartyDto::Profile(p) => &p.id,
            PartyDto::Id(id) => id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestDto {
    #[serde(rename = "_id")]
    pub id: RequestId,
    pub sender: PartyDto,
    pub recipient: PartyDto,
    pub status: FriendRequestStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// 通知面板：收到的待处理申请 + 自己发出且已通过的申请
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct FriendRequestsDto {
    pub incoming: Vec<FriendRequestDto>,
    pub accepted: Vec<FriendRequestDto>,
}
