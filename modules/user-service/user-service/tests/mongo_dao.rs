#![allow(clippy::unwrap_used, clippy::expect_used)]

//! `MongoUserDao` against a live server. Run with
//! `MONGODB_URI=mongodb://127.0.0.1:27017 cargo test -- --ignored`.

use bson::doc;
use user_service::{MongoUserDao, UserDao};
use user_service_sdk::{NewUser, ObjectId, UserListFilter, UserPatch};

async fn dao() -> MongoUserDao {
    let uri = std::env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://127.0.0.1:27017".to_owned());
    let collection = format!("user_test_{}", ObjectId::new().to_hex());
    let dao = MongoUserDao::connect(&uri, "practice_test", &collection)
        .await
        .expect("MongoDB reachable");
    dao.collection().delete_many(doc! {}).await.unwrap();
    dao
}

#[tokio::test]
#[ignore = "requires a running MongoDB at MONGODB_URI"]
async fn scenario_against_mongo() {
    let dao = dao().await;

    let id = dao.create(NewUser::new("alice")).await.unwrap();
    let created = dao.get_one(id).await.unwrap().unwrap();
    assert_eq!(created.name, "alice");
    assert_eq!(created.created_at, created.updated_at);

    dao.update(
        id,
        UserPatch {
            name: Some("bob".to_owned()),
        },
    )
    .await
    .unwrap();
    let updated = dao.get_one(id).await.unwrap().unwrap();
    assert_eq!(updated.name, "bob");
    assert!(updated.updated_at > created.updated_at);

    dao.update(id, UserPatch::default()).await.unwrap();
    let touched = dao.get_one(id).await.unwrap().unwrap();
    assert_eq!(touched.name, "bob");
    assert!(touched.updated_at > updated.updated_at);

    dao.delete(&[id]).await.unwrap();
    assert!(dao.get_one(id).await.unwrap().is_none());

    dao.collection().drop().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running MongoDB at MONGODB_URI"]
async fn list_sorting_filtering_and_sparse_rows() {
    let dao = dao().await;

    let a = dao.create(NewUser::new("a")).await.unwrap();
    let b = dao.create(NewUser::new("b")).await.unwrap();

    // A row written by an older client without name or timestamps.
    let sparse = ObjectId::new();
    dao.collection()
        .clone_with_type::<bson::Document>()
        .insert_one(doc! { "_id": sparse })
        .await
        .unwrap();

    let all = dao.get_list(UserListFilter::default()).await.unwrap();
    assert_eq!(all.iter().map(|u| u.id).collect::<Vec<_>>(), vec![a, b, sparse]);
    assert_eq!(all[2].name, "");
    assert_eq!(all[2].updated_at, 0);

    let only_b = dao.get_list(UserListFilter::by_ids([b])).await.unwrap();
    assert_eq!(only_b.len(), 1);

    dao.delete(&[]).await.unwrap();
    assert_eq!(dao.get_list(UserListFilter::default()).await.unwrap().len(), 3);

    dao.collection().drop().await.unwrap();
}
