use crate::entitys::friend_request_entity::{
    FriendRequestDto, FriendRequestEntity, FriendRequestStatus, FriendRequestsDto, PartyDto,
};
use crate::entitys::user_entity::{ProfileProjection, UserBriefDto, UserInfoEntity};
use crate::store::{FriendRequestStore, InsertOutcome, UserStore};
use common::errors::{AppError, AppResult};
use common::repository_util::normalize_id;
use common::UserId;
use log::{info, warn};
use mongodb::bson::DateTime;
use std::collections::HashMap;
use std::sync::Arc;

const REQUEST_EXISTS: &str = "A friend request already exists between you and this user";

/// 关联用户资料时替换的一方
#[derive(Debug, Clone, Copy)]
enum Side {
    Sender,
    Recipient,
}

impl Side {
    fn of(self, request: &FriendRequestEntity) -> &str {
        match self {
            Side::Sender => &request.sender,
            Side::Recipient => &request.recipient,
        }
    }
}

/// 好友申请与好友关系
pub struct FriendService {
    users: Arc<dyn UserStore>,
    requests: Arc<dyn FriendRequestStore>,
}

impl FriendService {
    pub fn new(users: Arc<dyn UserStore>, requests: Arc<dyn FriendRequestStore>) -> Self {
        Self { users, requests }
    }

    /// 获取好友列表（保持好友集合中的顺序，已不存在的用户跳过）
    pub async fn list_friends(&self, uid: &str) -> AppResult<Vec<UserBriefDto>> {
        let uid = normalize_id(uid);
        let user = self
            .users
            .find_by_id(&uid)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let mut by_id = self.load_users(&user.friends).await?;
        Ok(user
            .friends
            .iter()
            .filter_map(|id| by_id.remove(id))
            .map(|friend| friend.to_brief(ProfileProjection::Friend))
            .collect())
    }

    /// 发送好友申请
    pub async fn send_request(&self, sender_id: &str, recipient_id: &str) -> AppResult<FriendRequestDto> {
        // 大小写不同的同一 ObjectId 视为同一用户
        let (sender_id, recipient_id) = (normalize_id(sender_id), normalize_id(recipient_id));
        let (sender_id, recipient_id) = (sender_id.as_str(), recipient_id.as_str());
        if sender_id == recipient_id {
            return Err(AppError::InvalidOperation("You can't send friend request to yourself".to_string()));
        }

        let recipient = self
            .users
            .find_by_id(recipient_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Recipient not found".to_string()))?;

        if recipient.is_friend_of(sender_id) {
            return Err(AppError::Conflict("You are already friends with this user".to_string()));
        }

        // 任意方向、任意状态的历史申请都会阻止新申请
        if self.requests.find_between(sender_id, recipient_id).await?.is_some() {
            return Err(AppError::Conflict(REQUEST_EXISTS.to_string()));
        }

        let request = FriendRequestEntity::new_pending(sender_id, recipient_id);
        match self.requests.insert(&request).await? {
            InsertOutcome::Created => {
                info!("friend request {} created: {} -> {}", request.id, sender_id, recipient_id);
                Ok(request.to_dto())
            }
            InsertOutcome::Duplicate => {
                warn!("concurrent friend request between {} and {} rejected by pair index", sender_id, recipient_id);
                Err(AppError::Conflict(REQUEST_EXISTS.to_string()))
            }
        }
    }

    /// 接受好友申请，只有接收方可以操作
    ///
    /// 状态最后写入：申请仍为 pending 时，双方好友集合可能尚未补全，
    /// 接收方重试即可补齐；对已通过的申请重复接受同样会补齐双方。
    pub async fn accept_request(&self, request_id: &str, accepting_uid: &str) -> AppResult<()> {
        let accepting_uid = normalize_id(accepting_uid);
        let request = self
            .requests
            .find_by_id(&normalize_id(request_id))
            .await?
            .ok_or_else(|| AppError::NotFound("Friend request not found".to_string()))?;

        if request.recipient != accepting_uid {
            return Err(AppError::Forbidden("You are not authorized to accept this request".to_string()));
        }

        for (uid, friend_id) in [(&request.sender, &request.recipient), (&request.recipient, &request.sender)] {
            if !self.users.add_friend(uid, friend_id).await? {
                warn!("friend request {}: user {} no longer exists", request.id, uid);
            }
        }

        let now = DateTime::now();
        self.requests.set_status(&request.id, FriendRequestStatus::Accepted, now).await?;
        info!("friend request {} accepted at {}: {} <-> {}", request.id, now, request.sender, request.recipient);
        Ok(())
    }

    /// 收到的待处理申请（附发送方资料）+ 自己发出且已通过的申请（附接收方资料）
    pub async fn list_incoming_requests(&self, uid: &str) -> AppResult<FriendRequestsDto> {
        let uid = normalize_id(uid);
        let incoming = self.requests.find_by_recipient(&uid, FriendRequestStatus::Pending).await?;
        let accepted = self.requests.find_by_sender(&uid, FriendRequestStatus::Accepted).await?;
        Ok(FriendRequestsDto {
            incoming: self.populate(incoming, Side::Sender, ProfileProjection::RequestParty).await?,
            accepted: self.populate(accepted, Side::Recipient, ProfileProjection::Contact).await?,
        })
    }

    /// 自己发出、仍待处理的申请（附接收方资料）
    pub async fn list_outgoing_requests(&self, uid: &str) -> AppResult<Vec<FriendRequestDto>> {
        let outgoing = self.requests.find_by_sender(&normalize_id(uid), FriendRequestStatus::Pending).await?;
        self.populate(outgoing, Side::Recipient, ProfileProjection::RequestParty).await
    }

    async fn load_users(&self, ids: &[UserId]) -> AppResult<HashMap<UserId, UserInfoEntity>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let users = self.users.find_by_ids(ids).await?;
        Ok(users.into_iter().map(|u| (u.id.clone(), u)).collect())
    }

    async fn populate(
        &self,
        requests: Vec<FriendRequestEntity>,
        side: Side,
        projection: ProfileProjection,
    ) -> AppResult<Vec<FriendRequestDto>> {
        let ids: Vec<UserId> = requests.iter().map(|r| side.of(r).to_string()).collect();
        let profiles = self.load_users(&ids).await?;

        Ok(requests
            .iter()
            .map(|r| {
                let party = match profiles.get(side.of(r)) {
                    Some(user) => PartyDto::Profile(user.to_brief(projection)),
                    None => PartyDto::Id(side.of(r).to_string()),
                };
                match side {
                    Side::Sender => r.to_dto_with(party, PartyDto::Id(r.recipient.clone())),
                    Side::Recipient => r.to_dto_with(PartyDto::Id(r.sender.clone()), party),
                }
            })
            .collect())
    }
}
