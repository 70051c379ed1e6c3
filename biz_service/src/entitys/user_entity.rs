use crate::entitys::{
    deserialize_object_id_as_hex_string, deserialize_object_ids_as_hex_strings, new_id, serialize_hex_string_as_object_id,
    serialize_hex_strings_as_object_ids,
};
use common::UserId;
use mongo_macro::MongoIndexModelProvider as MongoDeriveMongoIndex;
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 用户文档（集合 `users`），由注册流程创建，本服务只追加好友
#[derive(Debug, Clone, Serialize, Deserialize, MongoDeriveMongoIndex)]
#[mongo_index(fields("gainedSkills"), name("idx_gained_skills"))]
#[serde(rename_all = "camelCase")]
pub struct UserInfoEntity {
    #[serde(rename = "_id", serialize_with = "serialize_hex_string_as_object_id", deserialize_with = "deserialize_object_id_as_hex_string")]
    pub id: UserId,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    /// 登录凭证（哈希），任何接口都不返回
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub profile_pic: String,
    #[serde(default)]
    pub is_onboarded: bool,
    #[serde(default)]
    pub gained_skills: Vec<String>,
    #[serde(default)]
    pub learning_skills: Vec<String>,
    #[serde(default, serialize_with = "serialize_hex_strings_as_object_ids", deserialize_with = "deserialize_object_ids_as_hex_strings")]
    pub friends: Vec<UserId>,
    #[serde(default = "DateTime::now")]
    pub created_at: DateTime,
    #[serde(default = "DateTime::now")]
    pub updated_at: DateTime,
}

impl UserInfoEntity {
    pub fn new(full_name: &str) -> Self {
        let now = DateTime::now();
        Self {
            id: new_id(),
            email: String::new(),
            full_name: full_name.to_string(),
            password: String::new(),
            bio: String::new(),
            profile_pic: String::new(),
            is_onboarded: false,
            gained_skills: vec![],
            learning_skills: vec![],
            friends: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_friend_of(&self, other: &str) -> bool {
        self.friends.iter().any(|f| f == other)
    }

    /// 推荐列表使用：去掉凭证、邮箱与好友列表
    pub fn to_profile(&self) -> UserProfileDto {
        UserProfileDto {
            id: self.id.clone(),
            full_name: self.full_name.clone(),
            bio: self.bio.clone(),
            profile_pic: self.profile_pic.clone(),
            is_onboarded: self.is_onboarded,
            gained_skills: self.gained_skills.clone(),
            learning_skills: self.learning_skills.clone(),
            created_at: self.created_at.timestamp_millis(),
            updated_at: self.updated_at.timestamp_millis(),
        }
    }

    pub fn to_brief(&self, projection: ProfileProjection) -> UserBriefDto {
        let with_skills = matches!(projection, ProfileProjection::Friend | ProfileProjection::RequestParty);
        UserBriefDto {
            id: self.id.clone(),
            full_name: self.full_name.clone(),
            profile_pic: self.profile_pic.clone(),
            gained_skills: with_skills.then(|| self.gained_skills.clone()),
            learning_skills: with_skills.then(|| self.learning_skills.clone()),
            bio: matches!(projection, ProfileProjection::Friend).then(|| self.bio.clone()),
        }
    }
}

/// 关联用户时选取的字段组合
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileProjection {
    /// 好友列表：姓名、头像、技能、简介
    Friend,
    /// 待处理申请的对方：姓名、头像、技能
    RequestParty,
    /// 已通过申请的对方：姓名、头像
    Contact,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileDto {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub full_name: String,
    pub bio: String,
    pub profile_pic: String,
    pub is_onboarded: bool,
    pub gained_skills: Vec<String>,
    pub learning_skills: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserBriefDto {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub full_name: String,
    pub profile_pic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gained_skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// 本地调试用的种子用户（JSON 文件），字段与接口返回一致
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSeedDto {
    #[serde(rename = "_id")]
    pub id: Option<UserId>,
    #[serde(default)]
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub profile_pic: String,
    #[serde(default)]
    pub is_onboarded: bool,
    #[serde(default)]
    pub gained_skills: Vec<String>,
    #[serde(default)]
    pub learning_skills: Vec<String>,
    #[serde(default)]
    pub friends: Vec<UserId>,
}

impl From<UserSeedDto> for UserInfoEntity {
    fn from(seed: UserSeedDto) -> Self {
        let mut user = UserInfoEntity::new(&seed.full_name);
        if let Some(id) = seed.id {
            user.id = id;
        }
        user.email = seed.email;
        user.bio = seed.bio;
        user.profile_pic = seed.profile_pic;
        user.is_onboarded = seed.is_onboarded;
        user.gained_skills = seed.gained_skills;
        user.learning_skills = seed.learning_skills;
        user.friends = seed.friends;
        user
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::index_trait::MongoIndexModelProvider;

    fn sample() -> UserInfoEntity {
        let mut user = UserInfoEntity::new("Alice");
        user.email = "alice@example.com".into();
        user.password = "$2a$10$hash".into();
        user.bio = "learning go".into();
        user.gained_skills = vec!["rust".into()];
        user.learning_skills = vec!["go".into()];
        user
    }

    #[test]
    fn profile_never_carries_credentials() {
        let json = serde_json::to_value(sample().to_profile()).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("email").is_none());
        assert!(json.get("friends").is_none());
        assert_eq!(json["fullName"], "Alice");
    }

    #[test]
    fn brief_projections_select_fields() {
        let user = sample();

        let friend = serde_json::to_value(user.to_brief(ProfileProjection::Friend)).unwrap();
        assert_eq!(friend["bio"], "learning go");
        assert_eq!(friend["gainedSkills"], serde_json::json!(["rust"]));

        let party = serde_json::to_value(user.to_brief(ProfileProjection::RequestParty)).unwrap();
        assert!(party.get("bio").is_none());
        assert_eq!(party["learningSkills"], serde_json::json!(["go"]));

        let contact = serde_json::to_value(user.to_brief(ProfileProjection::Contact)).unwrap();
        let keys: Vec<_> = contact.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 3);
        assert!(contact.get("password").is_none());
    }

    #[test]
    fn stored_document_uses_object_ids() {
        let mut user = sample();
        let friend_id = new_id();
        user.friends.push(friend_id.clone());

        let doc = mongodb::bson::to_document(&user).unwrap();
        assert!(doc.get_object_id("_id").is_ok());
        let friends = doc.get_array("friends").unwrap();
        assert_eq!(friends[0].as_object_id().unwrap().to_hex(), friend_id);

        let back: UserInfoEntity = mongodb::bson::from_document(doc).unwrap();
        assert_eq!(back.id, user.id);
        assert_eq!(back.friends, vec![friend_id]);
    }

    #[test]
    fn declares_skill_index() {
        assert_eq!(UserInfoEntity::index_models().len(), 1);
    }
}
