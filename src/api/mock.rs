//! Mock backend for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;
use serde_json::Value;

use crate::api::errors::ApiResult;
use crate::api::store::{EntityStore, TokenIssuer};
use crate::domain::resource::Resource;

mock! {
    pub Backend {}

    #[async_trait(?Send)]
    impl EntityStore for Backend {
        async fn get_value(&self, resource: Resource, id: i32) -> ApiResult<Value>;
        async fn create_value(&self, resource: Resource, body: Value) -> ApiResult<Value>;
        async fn update_value(&self, resource: Resource, id: i32, body: Value) -> ApiResult<Value>;
        async fn delete_entity(&self, resource: Resource, id: i32) -> ApiResult<()>;
    }

    #[async_trait(?Send)]
    impl TokenIssuer for Backend {
        async fn issue_token(&self, email: &str, password: &str) -> ApiResult<String>;
    }
}
