use crate::entitys::user_entity::UserInfoEntity;
use common::UserId;
use common::query_builder::QueryBuilder;
use common::repository_util::parse_object_id;
use mongodb::bson::{Bson, Document};

/// 推荐匹配条件
///
/// 候选人需同时满足：不是本人、不在本人好友中、已完成引导、
/// 至少会一项本人想学的技能。同一条件既可渲染成 MongoDB 过滤器，
/// 也可以直接在内存中判定，两种存储使用同一规则。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCriteria {
    pub requester_id: UserId,
    pub excluded_ids: Vec<UserId>,
    pub wanted_skills: Vec<String>,
}

impl MatchCriteria {
    /// 本人没有想学的技能时没有匹配依据，返回 None
    pub fn for_requester(requester: &UserInfoEntity) -> Option<Self> {
        if requester.learning_skills.is_empty() {
            return None;
        }
        Some(Self {
            requester_id: requester.id.clone(),
            excluded_ids: requester.friends.clone(),
            wanted_skills: requester.learning_skills.clone(),
        })
    }

    pub fn matches(&self, candidate: &UserInfoEntity) -> bool {
        candidate.id != self.requester_id
            && !self.excluded_ids.contains(&candidate.id)
            && candidate.is_onboarded
            && candidate.gained_skills.iter().any(|skill| self.wanted_skills.contains(skill))
    }

    pub fn to_filter(&self) -> Document {
        QueryBuilder::new()
            .ne("_id", id_value(&self.requester_id))
            .and()
            .not_in("_id", self.excluded_ids.iter().map(|id| id_value(id)).collect())
            .and()
            .eq("isOnboarded", true)
            .and()
            .in_array("gainedSkills", self.wanted_skills.clone())
            .build()
    }
}

// 存量数据中的 `_id` 均为 ObjectId，非法格式原样保留（不会命中任何文档）
fn id_value(id: &str) -> Bson {
    match parse_object_id(id) {
        Some(oid) => Bson::ObjectId(oid),
        None => Bson::String(id.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    fn user(name: &str, gained: &[&str], learning: &[&str], onboarded: bool) -> UserInfoEntity {
        let mut u = UserInfoEntity::new(name);
        u.gained_skills = gained.iter().map(|s| s.to_string()).collect();
        u.learning_skills = learning.iter().map(|s| s.to_string()).collect();
        u.is_onboarded = onboarded;
        u
    }

    #[test]
    fn no_learning_skills_means_no_criteria() {
        assert!(MatchCriteria::for_requester(&user("alice", &["rust"], &[], true)).is_none());
    }

    #[test]
    fn candidate_must_teach_a_wanted_skill() {
        let alice = user("alice", &[], &["go", "piano"], true);
        let criteria = MatchCriteria::for_requester(&alice).unwrap();

        assert!(criteria.matches(&user("bob", &["go"], &[], true)));
        assert!(criteria.matches(&user("carol", &["piano", "chess"], &[], true)));
        assert!(!criteria.matches(&user("dave", &["chess"], &[], true)));
    }

    #[test]
    fn excludes_self_friends_and_not_onboarded() {
        let bob = user("bob", &["go"], &[], true);
        let mut alice = user("alice", &["go"], &["go"], true);
        alice.friends.push(bob.id.clone());
        let criteria = MatchCriteria::for_requester(&alice).unwrap();

        assert!(!criteria.matches(&alice));
        assert!(!criteria.matches(&bob));
        assert!(!criteria.matches(&user("erin", &["go"], &[], false)));
    }

    #[test]
    fn filter_uses_object_ids() {
        let friend = user("bob", &[], &[], true);
        let mut alice = user("alice", &[], &["go"], true);
        alice.friends.push(friend.id.clone());
        let criteria = MatchCriteria::for_requester(&alice).unwrap();

        let me = parse_object_id(&alice.id).unwrap();
        let f = parse_object_id(&friend.id).unwrap();
        assert_eq!(
            criteria.to_filter(),
            doc! { "$and": [
                { "_id": { "$ne": me } },
                { "_id": { "$nin": [f] } },
                { "isOnboarded": true },
                { "gainedSkills": { "$in": ["go"] } },
            ] }
        );
    }
}
