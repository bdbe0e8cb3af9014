//! gRPC server implementation for the user service.
//!
//! Decodes protobuf requests, delegates to the domain `Service` and maps
//! failures onto `tonic::Status`.

use std::sync::Arc;

use tonic::{Request, Response, Status};
use user_service_sdk::convert::{parse_id, parse_ids};
use user_service_sdk::proto::{
    CreateReq, CreateRes, DeleteReq, DeleteRes, GetListReq, GetListRes, GetOneReq, GetOneRes,
    UpdateReq, UpdateRes, UserItem,
};
use user_service_sdk::{InvalidIdError, NewUser, UserPatch, UserService};

use crate::domain::{DomainError, Service};

/// gRPC service implementation that wraps the domain `Service`.
#[derive(Clone)]
pub struct UserController {
    service: Arc<Service>,
}

impl UserController {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

fn invalid_id(err: &InvalidIdError) -> Status {
    Status::invalid_argument(err.to_string())
}

fn internal(err: &DomainError) -> Status {
    tracing::error!(action = err.action, error = %err, "user service call failed");
    Status::internal(err.to_string())
}

#[tonic::async_trait]
impl UserService for UserController {
    async fn create(&self, request: Request<CreateReq>) -> Result<Response<CreateRes>, Status> {
        let req = request.into_inner();
        let id = self
            .service
            .create(NewUser { name: req.name })
            .await
            .map_err(|e| internal(&e))?;

        Ok(Response::new(CreateRes { id: id.to_hex() }))
    }

    async fn get_one(&self, request: Request<GetOneReq>) -> Result<Response<GetOneRes>, Status> {
        let req = request.into_inner();
        let id = parse_id(&req.id).map_err(|e| invalid_id(&e))?;

        let user = self.service.get_by_id(id).await.map_err(|e| internal(&e))?;

        Ok(Response::new(GetOneRes {
            data: user.map(UserItem::from),
        }))
    }

    async fn get_list(&self, request: Request<GetListReq>) -> Result<Response<GetListRes>, Status> {
        let req = request.into_inner();
        let ids = parse_ids(&req.ids).map_err(|e| invalid_id(&e))?;

        let users = self.service.get_list(ids).await.map_err(|e| internal(&e))?;

        Ok(Response::new(GetListRes {
            list: users.into_iter().map(UserItem::from).collect(),
        }))
    }

    async fn update(&self, request: Request<UpdateReq>) -> Result<Response<UpdateRes>, Status> {
        let req = request.into_inner();
        let id = parse_id(&req.id).map_err(|e| invalid_id(&e))?;

        self.service
            .update(id, UserPatch { name: req.name })
            .await
            .map_err(|e| internal(&e))?;

        Ok(Response::new(UpdateRes {}))
    }

    async fn delete(&self, request: Request<DeleteReq>) -> Result<Response<DeleteRes>, Status> {
        let req = request.into_inner();
        let ids = parse_ids(&req.ids).map_err(|e| invalid_id(&e))?;

        self.service
            .delete_by_ids(&ids)
            .await
            .map_err(|e| internal(&e))?;

        Ok(Response::new(DeleteRes {}))
    }
}
