use async_trait::async_trait;
use futures::stream::TryStreamExt;
use log::{error, info};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};
use mongodb::{Collection, IndexModel, error::Result};
use serde::{Serialize, de::DeserializeOwned};

/// 解析 24 位十六进制 ObjectId，格式非法时视为不存在
pub fn parse_object_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

/// 统一 ID 的字符串形式：合法 ObjectId 转为小写十六进制，其余原样保留
pub fn normalize_id(id: &str) -> String {
    match parse_object_id(id) {
        Some(oid) => oid.to_hex(),
        None => id.to_string(),
    }
}

#[async_trait]
pub trait Repository<T> {
    async fn find_by_id(&self, id: &str) -> Result<Option<T>>;
    async fn insert(&self, entity: &T) -> Result<()>;
    async fn find_one(&self, filter: Document) -> Result<Option<T>>;
    async fn query(&self, filter: Document) -> Result<Vec<T>>;
    async fn update_one(&self, filter: Document, update: Document) -> Result<u64>;
}

pub struct BaseRepository<T: Send + Sync> {
    pub collection: Collection<T>,
}

impl<T: Send + Sync> BaseRepository<T> {
    pub fn new(collection: Collection<T>) -> Self {
        Self { collection }
    }

    /// 按声明创建索引；已存在的同名同结构索引由 MongoDB 自行忽略
    pub async fn ensure_indexes(&self, models: Vec<IndexModel>) -> Result<()> {
        if models.is_empty() {
            return Ok(());
        }
        match self.collection.create_indexes(models).await {
            Ok(result) => {
                info!("indexes ready on {}: {:?}", self.collection.name(), result.index_names);
                Ok(())
            }
            Err(e) => {
                error!("index creation failed on {}: {:?}", self.collection.name(), e);
                Err(e)
            }
        }
    }
}

#[async_trait]
impl<T: Send + Sync> Repository<T> for BaseRepository<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    async fn find_by_id(&self, id: &str) -> Result<Option<T>> {
        let Some(obj_id) = parse_object_id(id) else {
            return Ok(None);
        };
        self.find_one(doc! { "_id": obj_id }).await
    }

    async fn insert(&self, entity: &T) -> Result<()> {
        self.collection.insert_one(entity).await?;
        Ok(())
    }

    async fn find_one(&self, filter: Document) -> Result<Option<T>> {
        let result = self.collection.find_one(filter).await?;
        Ok(result)
    }

    async fn query(&self, filter: Document) -> Result<Vec<T>> {
        let cursor = self.collection.find(filter).await?;
        cursor.try_collect().await
    }

    async fn update_one(&self, filter: Document, update: Document) -> Result<u64> {
        let result = self.collection.update_one(filter, update).await?;
        Ok(result.matched_count)
    }
}

/// 是否为唯一索引冲突（E11000）
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == 11000,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_ids_do_not_parse() {
        assert!(parse_object_id("not-an-id").is_none());
        assert!(parse_object_id("").is_none());
    }

    #[test]
    fn uppercase_hex_normalizes_to_lowercase() {
        let oid = ObjectId::new();
        assert_eq!(normalize_id(&oid.to_hex().to_uppercase()), oid.to_hex());
        assert_eq!(normalize_id("not-an-id"), "not-an-id");
    }

    #[test]
    fn hex_ids_round_trip() {
        let oid = ObjectId::new();
        assert_eq!(parse_object_id(&oid.to_hex()), Some(oid));
    }
}
