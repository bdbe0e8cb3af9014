//! Axum handlers for `/user/v1`.

use std::sync::Arc;

use axum::extract::{Path, Query};
use axum::{Extension, Json};
use http::StatusCode;
use serde::Deserialize;

use crate::api::UserApiV1;
use crate::api::v1::{
    CreateReq, CreateRes, DeleteReq, DeleteRes, GetListReq, GetListRes, GetOneReq, GetOneRes,
    UpdateReq, UpdateRes,
};
use crate::rest::problem::Problem;

pub type Api = Arc<dyn UserApiV1>;

/// `?ids=a,b,c`. Missing or empty means no ids.
#[derive(Debug, Default, Deserialize)]
pub struct IdsQuery {
    #[serde(default)]
    pub ids: Option<String>,
}

impl IdsQuery {
    fn into_ids(self) -> Vec<String> {
        self.ids
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

/// PATCH body. The id comes from the path.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBody {
    #[serde(default)]
    pub name: Option<String>,
}

pub async fn create(
    Extension(api): Extension<Api>,
    Json(req): Json<CreateReq>,
) -> Result<(StatusCode, Json<CreateRes>), Problem> {
    let res = api.create(req).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn get_one(
    Extension(api): Extension<Api>,
    Path(id): Path<String>,
) -> Result<Json<GetOneRes>, Problem> {
    Ok(Json(api.get_one(GetOneReq { id }).await?))
}

pub async fn get_list(
    Extension(api): Extension<Api>,
    Query(query): Query<IdsQuery>,
) -> Result<Json<GetListRes>, Problem> {
    let req = GetListReq {
        ids: query.into_ids(),
    };
    Ok(Json(api.get_list(req).await?))
}

pub async fn update(
    Extension(api): Extension<Api>,
    Path(id): Path<String>,
    Json(body): Json<UpdateBody>,
) -> Result<Json<UpdateRes>, Problem> {
    let req = UpdateReq {
        id,
        name: body.name,
    };
    Ok(Json(api.update(req).await?))
}

pub async fn delete(
    Extension(api): Extension<Api>,
    Query(query): Query<IdsQuery>,
) -> Result<Json<DeleteRes>, Problem> {
    let req = DeleteReq {
        ids: query.into_ids(),
    };
    Ok(Json(api.delete(req).await?))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn ids_query_splits_and_trims() {
        let q = IdsQuery {
            ids: Some(" a, b ,,c,".to_owned()),
        };
        assert_eq!(q.into_ids(), vec!["a", "b", "c"]);
        assert!(IdsQuery::default().into_ids().is_empty());
        assert!(IdsQuery { ids: Some(String::new()) }.into_ids().is_empty());
    }
}
