//! Integration tests for the PostgreSQL repositories and `PgStore`.
//!
//! These need a live database (`DATABASE_URL`) and are ignored by default:
//! run them with `cargo test -p alazar-db -- --ignored`.

use alazar_core::content::ContentBlock;
use alazar_db::models::case::CaseFields;
use alazar_db::models::contact::ContactFields;
use alazar_db::models::developer::DeveloperFields;
use alazar_db::models::discussion::DiscussionFields;
use alazar_db::repositories::{CaseRepo, ContactRepo, DeveloperRepo, DiscussionRepo};
use alazar_db::store::{Store, Stores};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_case(title: &str) -> CaseFields {
    CaseFields {
        title: title.to_string(),
        price: 1200,
        developer_ids: vec![3, 4],
        images: vec!["g1.png".into(), "g2.png".into()],
        content_blocks: vec![ContentBlock::text("intro"), ContentBlock::image("b1.png")],
        ..Default::default()
    }
}

fn new_discussion(name: &str) -> DiscussionFields {
    DiscussionFields {
        name: name.to_string(),
        budget: Some(2500.5),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Repositories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_case_crud(pool: PgPool) {
    let created = CaseRepo::create(&pool, &new_case("Site")).await.unwrap();
    assert_eq!(created.fields, new_case("Site"));

    let found = CaseRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(found.fields.content_blocks, new_case("Site").content_blocks);

    let mut changed = found.fields.clone();
    changed.title = "Shop".into();
    changed.shop = true;
    let updated = CaseRepo::update(&pool, created.id, &changed)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.fields.title, "Shop");
    assert!(updated.fields.shop);
    assert_eq!(updated.created_at, created.created_at);

    assert!(CaseRepo::delete(&pool, created.id).await.unwrap());
    assert!(!CaseRepo::delete(&pool, created.id).await.unwrap());
    assert!(CaseRepo::find_by_id(&pool, created.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_missing_returns_none(pool: PgPool) {
    let fields = DeveloperFields {
        name: "Ghost".into(),
        ..Default::default()
    };
    assert!(DeveloperRepo::update(&pool, 999, &fields).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_discussions_list_newest_first(pool: PgPool) {
    let first = DiscussionRepo::create(&pool, &new_discussion("first")).await.unwrap();
    let second = DiscussionRepo::create(&pool, &new_discussion("second")).await.unwrap();

    let ids: Vec<_> = DiscussionRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(ids, [second.id, first.id]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_contacts_list_newest_first(pool: PgPool) {
    let old = ContactRepo::create(&pool, &ContactFields::default()).await.unwrap();
    let new = ContactRepo::create(
        &pool,
        &ContactFields {
            phone: Some("+7 900 000 00 00".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let list = ContactRepo::list(&pool).await.unwrap();
    assert_eq!(list[0].id, new.id);
    assert_eq!(list[1].id, old.id);
}

// ---------------------------------------------------------------------------
// Store facade
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_postgres_stores(pool: PgPool) {
    let stores = Stores::postgres(pool);
    stores.health_check().await.unwrap();
    assert_eq!(stores.backend_name(), "postgres");

    let created = stores.cases.create(new_case("Via store")).await.unwrap();
    let listed = stores.cases.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
    assert!(stores.cases.delete(created.id).await.unwrap());
}
