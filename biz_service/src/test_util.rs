use crate::biz_service::Stores;
use crate::entitys::user_entity::UserInfoEntity;
use crate::store::memory_store::MemoryUserStore;

pub fn skills(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

pub fn user(name: &str, gained: &[&str], learning: &[&str]) -> UserInfoEntity {
    let mut u = UserInfoEntity::new(name);
    u.email = format!("{}@example.com", name.to_lowercase());
    u.password = "$2a$10$not-a-real-hash".to_string();
    u.is_onboarded = true;
    u.gained_skills = skills(gained);
    u.learning_skills = skills(learning);
    u
}

pub async fn stores_with(users: &[&UserInfoEntity]) -> Stores {
    let stores = Stores::memory(MemoryUserStore::new());
    for u in users {
        stores.users.insert(u).await.unwrap();
    }
    stores
}
