//! `UserApiV1` implemented by forwarding to the user service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};
use user_service_sdk::convert::{parse_id, parse_ids};
use user_service_sdk::{NewUser, UserClientV1, UserListFilter, UserPatch};

use crate::api::UserApiV1;
use crate::api::v1::{
    CreateReq, CreateRes, DeleteReq, DeleteRes, GetListReq, GetListRes, GetOneReq, GetOneRes,
    UpdateReq, UpdateRes, UserItem,
};
use crate::error::GatewayError;

/// Gateway controller. Holds the user service client it was constructed with.
#[derive(Clone)]
pub struct ControllerV1 {
    users: Arc<dyn UserClientV1>,
}

impl ControllerV1 {
    pub fn new(users: Arc<dyn UserClientV1>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserApiV1 for ControllerV1 {
    #[instrument(skip_all)]
    async fn create(&self, req: CreateReq) -> Result<CreateRes, GatewayError> {
        let id = self
            .users
            .create(NewUser { name: req.name })
            .await
            .map_err(GatewayError::upstream("create user"))?;

        debug!(%id, "user created upstream");
        Ok(CreateRes { id: id.to_hex() })
    }

    #[instrument(skip_all, fields(id = %req.id))]
    async fn get_one(&self, req: GetOneReq) -> Result<GetOneRes, GatewayError> {
        let id = parse_id(&req.id)?;
        let user = self
            .users
            .get_one(id)
            .await
            .map_err(GatewayError::upstream("get user"))?;

        Ok(GetOneRes {
            data: user.map(UserItem::from),
        })
    }

    #[instrument(skip_all, fields(ids = req.ids.len()))]
    async fn get_list(&self, req: GetListReq) -> Result<GetListRes, GatewayError> {
        let ids = parse_ids(&req.ids)?;
        let users = self
            .users
            .get_list(UserListFilter { ids })
            .await
            .map_err(GatewayError::upstream("get user list"))?;

        Ok(GetListRes {
            list: users.into_iter().map(UserItem::from).collect(),
        })
    }

    #[instrument(skip_all, fields(id = %req.id))]
    async fn update(&self, req: UpdateReq) -> Result<UpdateRes, GatewayError> {
        let id = parse_id(&req.id)?;
        self.users
            .update(id, UserPatch { name: req.name })
            .await
            .map_err(GatewayError::upstream("update user"))?;

        Ok(UpdateRes {})
    }

    #[instrument(skip_all, fields(ids = req.ids.len()))]
    async fn delete(&self, req: DeleteReq) -> Result<DeleteRes, GatewayError> {
        let ids = parse_ids(&req.ids)?;
        self.users
            .delete(ids)
            .await
            .map_err(GatewayError::upstream("delete user"))?;

        Ok(DeleteRes {})
    }
}
