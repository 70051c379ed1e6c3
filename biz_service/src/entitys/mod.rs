pub mod friend_request_entity;
pub mod match_criteria;
pub mod user_entity;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub fn deserialize_object_id_as_hex_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let oid = ObjectId::deserialize(deserializer)?;
    Ok(oid.to_hex())
}

// 序列化：从 String（hex） -> BSON 的 ObjectId
pub fn serialize_hex_string_as_object_id<S>(hex: &String, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let object_id = ObjectId::parse_str(hex).map_err(serde::ser::Error::custom)?;
    object_id.serialize(serializer)
}

pub fn deserialize_object_ids_as_hex_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let oids = Vec::<ObjectId>::deserialize(deserializer)?;
    Ok(oids.into_iter().map(ObjectId::to_hex).collect())
}

pub fn serialize_hex_strings_as_object_ids<S>(hexes: &Vec<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let oids = hexes
        .iter()
        .map(|hex| ObjectId::parse_str(hex).map_err(serde::ser::Error::custom))
        .collect::<Result<Vec<_>, _>>()?;
    oids.serialize(serializer)
}

/// 新记录 ID，与 MongoDB 的 `_id` 格式一致
pub fn new_id() -> String {
    ObjectId::new().to_hex()
}
