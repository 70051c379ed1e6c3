use crate::entitys::match_criteria::MatchCriteria;
use crate::entitys::user_entity::{UserInfoEntity, UserProfileDto};
use crate::store::UserStore;
use common::errors::{AppError, AppResult};
use common::repository_util::normalize_id;
use log::debug;
use std::sync::Arc;

/// 技能匹配推荐
pub struct MatchService {
    users: Arc<dyn UserStore>,
}

impl MatchService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// 推荐会教本人想学技能的用户，不排序、不分页
    pub async fn recommend(&self, requester_id: &str) -> AppResult<Vec<UserProfileDto>> {
        let requester = self
            .users
            .find_by_id(&normalize_id(requester_id))
            .await?
            .ok_or_else(|| AppError::NotFound("Current user not found".to_string()))?;

        let Some(criteria) = MatchCriteria::for_requester(&requester) else {
            debug!("user {} has no learning skills, nothing to recommend", requester_id);
            return Ok(vec![]);
        };

        let candidates = self.users.find_matches(&criteria).await?;
        debug!("user {} matched {} candidates", requester_id, candidates.len());
        Ok(candidates.iter().map(UserInfoEntity::to_profile).collect())
    }
}
