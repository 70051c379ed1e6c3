pub mod db;
pub mod index_trait;
pub mod query_builder;
pub mod repository_util;
