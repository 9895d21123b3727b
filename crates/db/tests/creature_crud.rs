//! Integration tests for the creature repository.
//!
//! Exercises the repository against a real database:
//! - Insert and lookup by handle
//! - Unique handle constraint
//! - CHECK constraints on types, names and handle format
//! - `updated_at` trigger

use sqlx::PgPool;
use v0mon_db::models::creature::CreateCreature;
use v0mon_db::repositories::CreatureRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_creature(handle: &str, name: &str) -> CreateCreature {
    CreateCreature {
        handle: handle.to_string(),
        image_location: format!("http://localhost:3000/media/{handle}.png"),
        primary_type: "fire".to_string(),
        secondary_type: None,
        creature_name: name.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_find_by_handle(pool: PgPool) {
    let created = CreatureRepo::create(&pool, &new_creature("elonmusk", "Zyrx"))
        .await
        .unwrap();
    assert_eq!(created.handle, "elonmusk");
    assert_eq!(created.creature_name, "Zyrx");
    assert_eq!(created.created_at, created.updated_at);

    let found = CreatureRepo::find_by_handle(&pool, "elonmusk")
        .await
        .unwrap()
        .expect("creature should exist");
    assert_eq!(found.id, created.id);
    assert_eq!(found.image_location, created.image_location);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_missing_handle_returns_none(pool: PgPool) {
    let found = CreatureRepo::find_by_handle(&pool, "nobody").await.unwrap();
    assert!(found.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_handle_is_unique_violation(pool: PgPool) {
    CreatureRepo::create(&pool, &new_creature("rauchg", "Vercho"))
        .await
        .unwrap();

    let err = CreatureRepo::create(&pool, &new_creature("rauchg", "Other"))
        .await
        .unwrap_err();

    assert!(v0mon_db::is_unique_violation(&err));
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("uq_creatures_handle"));
        }
        other => panic!("expected database error, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dual_type_round_trips(pool: PgPool) {
    let mut input = new_creature("dualtype", "Twinx");
    input.primary_type = "water".into();
    input.secondary_type = Some("ice".into());
    let created = CreatureRepo::create(&pool, &input).await.unwrap();

    let types = created.types().unwrap();
    assert_eq!(types.describe(), "water/ice dual-type");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rejects_unknown_type(pool: PgPool) {
    let mut input = new_creature("badtype", "Oops");
    input.primary_type = "plasma".into();
    let err = CreatureRepo::create(&pool, &input).await.unwrap_err();
    assert!(!v0mon_db::is_unique_violation(&err));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rejects_identical_types(pool: PgPool) {
    let mut input = new_creature("sametype", "Oops");
    input.secondary_type = Some("fire".into());
    assert!(CreatureRepo::create(&pool, &input).await.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rejects_unnormalized_handle(pool: PgPool) {
    assert!(CreatureRepo::create(&pool, &new_creature("ElonMusk", "Zyrx"))
        .await
        .is_err());
    assert!(CreatureRepo::create(&pool, &new_creature("", "Zyrx"))
        .await
        .is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rejects_overlong_name(pool: PgPool) {
    let name = "n".repeat(21);
    assert!(CreatureRepo::create(&pool, &new_creature("longname", &name))
        .await
        .is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_updated_at_trigger_refreshes_on_update(pool: PgPool) {
    let created = CreatureRepo::create(&pool, &new_creature("touched", "Touchy"))
        .await
        .unwrap();

    sqlx::query("SELECT pg_sleep(0.01)")
        .execute(&pool)
        .await
        .unwrap();

    // No update path exists in the repository; exercise the trigger directly.
    sqlx::query("UPDATE creatures SET creature_name = 'Touchy' WHERE id = $1")
        .bind(created.id)
        .execute(&pool)
        .await
        .unwrap();

    let found = CreatureRepo::find_by_handle(&pool, "touched")
        .await
        .unwrap()
        .unwrap();
    assert!(found.updated_at > created.updated_at);
    assert_eq!(found.created_at, created.created_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_recent_and_count(pool: PgPool) {
    for handle in ["first", "second", "third"] {
        CreatureRepo::create(&pool, &new_creature(handle, "Namey"))
            .await
            .unwrap();
    }

    assert_eq!(CreatureRepo::count(&pool).await.unwrap(), 3);

    let recent = CreatureRepo::list_recent(&pool, 2).await.unwrap();
    let handles: Vec<_> = recent.iter().map(|c| c.handle.as_str()).collect();
    assert_eq!(handles, vec!["third", "second"]);
}
