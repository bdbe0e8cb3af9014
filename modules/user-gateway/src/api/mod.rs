//! The gateway's user API contract.

pub mod v1;

use async_trait::async_trait;

use crate::error::GatewayError;
use v1::{
    CreateReq, CreateRes, DeleteReq, DeleteRes, GetListReq, GetListRes, GetOneReq, GetOneRes,
    UpdateReq, UpdateRes,
};

/// Version 1 of the user API served by the gateway.
#[async_trait]
pub trait UserApiV1: Send + Sync {
    async fn create(&self, req: CreateReq) -> Result<CreateRes, GatewayError>;

    /// `data` is `None` when the user does not exist.
    async fn get_one(&self, req: GetOneReq) -> Result<GetOneRes, GatewayError>;

    async fn get_list(&self, req: GetListReq) -> Result<GetListRes, GatewayError>;

    async fn update(&self, req: UpdateReq) -> Result<UpdateRes, GatewayError>;

    async fn delete(&self, req: DeleteReq) -> Result<DeleteRes, GatewayError>;
}
