use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::{FindOneAndUpdateOptions, ReturnDocument},
    Database,
};
use tokio::sync::RwLock;

use crate::models::{NewUser, Plan, User};

pub const USERS: &str = "users";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,

    #[error("db error: {0}")]
    Db(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(e: mongodb::error::Error) -> Self {
        let msg = e.to_string();
        if msg.contains("E11000") {
            StoreError::DuplicateEmail
        } else {
            StoreError::Db(msg)
        }
    }
}

/// Persistence for user documents.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, StoreError>;

    /// Fails with `DuplicateEmail` without writing if the email is taken.
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    /// Overwrites the stored history. `false` if the user does not exist.
    async fn set_history(&self, id: ObjectId, history: &[String]) -> Result<bool, StoreError>;

    async fn set_plan(&self, id: ObjectId, plan: Plan) -> Result<Option<User>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

fn new_document(user: NewUser) -> User {
    User {
        id: ObjectId::new(),
        name: user.name,
        email: user.email,
        password_hash: user.password_hash,
        plan: Plan::Free,
        history: Vec::new(),
        created_at: Utc::now().timestamp(),
    }
}

// ---------------- Mongo ----------------

#[derive(Clone)]
pub struct MongoUserStore {
    db: Database,
}

impl MongoUserStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn users(&self) -> mongodb::Collection<User> {
        self.db.collection::<User>(USERS)
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users().find_one(doc! { "email": email }, None).await?)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, StoreError> {
        Ok(self.users().find_one(doc! { "_id": id }, None).await?)
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        // the unique index catches races this check misses
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(StoreError::DuplicateEmail);
        }

        let user = new_document(user);
        self.users().insert_one(&user, None).await?;
        Ok(user)
    }

    async fn set_history(&self, id: ObjectId, history: &[String]) -> Result<bool, StoreError> {
        let res = self
            .users()
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "history": history.to_vec() } },
                None,
            )
            .await?;
        Ok(res.matched_count > 0)
    }

    async fn set_plan(&self, id: ObjectId, plan: Plan) -> Result<Option<User>, StoreError> {
        let opts = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        Ok(self
            .users()
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$set": { "plan": plan.as_str() } },
                opts,
            )
            .await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}

// ---------------- in-memory ----------------

/// Process-local store for tests and `MONGODB_URI=memory` runs.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<ObjectId, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail);
        }
        let user = new_document(user);
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn set_history(&self, id: ObjectId, history: &[String]) -> Result<bool, StoreError> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(u) => {
                u.history = history.to_vec();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_plan(&self, id: ObjectId, plan: Plan) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(&id).map(|u| {
            u.plan = plan;
            u.clone()
        }))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
