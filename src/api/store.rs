//! Entity-level backend seam used by services.
//!
//! Records travel as JSON values so that read-modify-write updates keep the
//! fields this console does not model.

use async_trait::async_trait;
use serde_json::Value;

use crate::api::client::CollectionClient;
use crate::api::errors::ApiResult;
use crate::domain::resource::Resource;

#[async_trait(?Send)]
pub trait EntityStore {
    async fn get_value(&self, resource: Resource, id: i32) -> ApiResult<Value>;

    async fn create_value(&self, resource: Resource, body: Value) -> ApiResult<Value>;

    async fn update_value(&self, resource: Resource, id: i32, body: Value) -> ApiResult<Value>;

    async fn delete_entity(&self, resource: Resource, id: i32) -> ApiResult<()>;
}

/// Exchanges credentials for a bearer token.
#[async_trait(?Send)]
pub trait TokenIssuer {
    async fn issue_token(&self, email: &str, password: &str) -> ApiResult<String>;
}

#[async_trait(?Send)]
impl EntityStore for CollectionClient {
    async fn get_value(&self, resource: Resource, id: i32) -> ApiResult<Value> {
        self.get(resource, id).await
    }

    async fn create_value(&self, resource: Resource, body: Value) -> ApiResult<Value> {
        self.create(resource, &body).await
    }

    async fn update_value(&self, resource: Resource, id: i32, body: Value) -> ApiResult<Value> {
        self.update(resource, id, &body).await
    }

    async fn delete_entity(&self, resource: Resource, id: i32) -> ApiResult<()> {
        self.delete(resource, id).await
    }
}

#[async_trait(?Send)]
impl TokenIssuer for CollectionClient {
    async fn issue_token(&self, email: &str, password: &str) -> ApiResult<String> {
        self.sign_in(email, password).await
    }
}
