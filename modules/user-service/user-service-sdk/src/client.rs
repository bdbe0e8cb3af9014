//! gRPC client implementation of `UserClientV1`.
//!
//! Internal client used by `connect_client()`. Not exported from the SDK.

use anyhow::Result;
use async_trait::async_trait;
use bson::oid::ObjectId;
use svckit_transport_grpc::{GrpcClientConfig, connect_with_retry};
use tonic::transport::Channel;

use crate::api::UserClientV1;
use crate::convert::ids_to_hex;
use crate::errors::UserServiceError;
use crate::models::{NewUser, User, UserListFilter, UserPatch};
use crate::proto::user_client::UserClient;
use crate::proto::{CreateReq, DeleteReq, GetListReq, GetOneReq, UpdateReq};

pub(crate) struct UserGrpcClient {
    inner: UserClient<Channel>,
}

impl UserGrpcClient {
    pub(crate) async fn connect(uri: impl Into<String>, cfg: &GrpcClientConfig) -> Result<Self> {
        let channel = connect_with_retry(uri, cfg).await?;
        Ok(Self {
            inner: UserClient::new(channel),
        })
    }
}

fn decode_user(item: crate::proto::UserItem) -> Result<User, UserServiceError> {
    User::try_from(item).map_err(|e| UserServiceError::internal(format!("malformed reply: {e}")))
}

#[async_trait]
impl UserClientV1 for UserGrpcClient {
    async fn create(&self, new_user: NewUser) -> Result<ObjectId, UserServiceError> {
        let mut client = self.inner.clone();
        let res = client
            .create(CreateReq { name: new_user.name })
            .await?
            .into_inner();

        ObjectId::parse_str(&res.id)
            .map_err(|_| UserServiceError::internal(format!("malformed reply: bad id '{}'", res.id)))
    }

    async fn get_one(&self, id: ObjectId) -> Result<Option<User>, UserServiceError> {
        let mut client = self.inner.clone();
        let res = client
            .get_one(GetOneReq { id: id.to_hex() })
            .await?
            .into_inner();

        res.data.map(decode_user).transpose()
    }

    async fn get_list(&self, filter: UserListFilter) -> Result<Vec<User>, UserServiceError> {
        let mut client = self.inner.clone();
        let res = client
            .get_list(GetListReq {
                ids: ids_to_hex(&filter.ids),
            })
            .await?
            .into_inner();

        res.list.into_iter().map(decode_user).collect()
    }

    async fn update(&self, id: ObjectId, patch: UserPatch) -> Result<(), UserServiceError> {
        let mut client = self.inner.clone();
        client
            .update(UpdateReq {
                id: id.to_hex(),
                name: patch.name,
            })
            .await?;
        Ok(())
    }

    async fn delete(&self, ids: Vec<ObjectId>) -> Result<(), UserServiceError> {
        let mut client = self.inner.clone();
        client
            .delete(DeleteReq {
                ids: ids_to_hex(&ids),
            })
            .await?;
        Ok(())
    }
}
