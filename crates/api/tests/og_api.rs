//! Integration tests for the PNG preview card endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_bytes, get, FakeGenerator};
use image::{GenericImageView, Rgba};
use sqlx::PgPool;
use v0mon_core::element::{ElementType, TypePair};
use v0mon_core::handle::Handle;
use v0mon_db::models::creature::CreateCreature;
use v0mon_db::repositories::CreatureRepo;
use v0mon_storage::ObjectStorage;

const PLACEHOLDER: Rgba<u8> = Rgba([0xF3, 0xF4, 0xF6, 255]);

/// Whether any pixel in the given region satisfies `pred`.
fn any_pixel(
    card: &image::DynamicImage,
    xs: std::ops::Range<u32>,
    ys: std::ops::Range<u32>,
    pred: impl Fn(Rgba<u8>) -> bool,
) -> bool {
    ys.flat_map(|y| xs.clone().map(move |x| (x, y)))
        .any(|(x, y)| pred(card.get_pixel(x, y)))
}

async fn decode_card(response: axum::response::Response) -> image::DynamicImage {
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("content-type").unwrap(), "image/png");
    let bytes = body_bytes(response).await;
    let card = image::load_from_memory(&bytes).unwrap();
    assert_eq!(card.dimensions(), (1200, 630));
    card
}

/// Insert a record and its artwork directly, bypassing generation.
async fn seed(app: &common::TestApp, handle: &str, artwork: Option<Vec<u8>>) {
    let handle = Handle::parse(handle).unwrap();
    let key = handle.storage_key("png");
    let location = format!("{}/media/{key}", common::TEST_BASE_URL);
    if let Some(bytes) = artwork {
        app.storage.put(&key, bytes, "image/png").await.unwrap();
    }
    let input = CreateCreature::new(
        &handle,
        location,
        &TypePair::single(ElementType::Fire),
        "Zyrx".into(),
    );
    CreatureRepo::create(&app.pool, &input).await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn og_for_existing_creature_renders_artwork_card(pool: PgPool) {
    let app = common::build_test_app_with(pool, common::test_config(), None);
    seed(&app, "elonmusk", Some(common::artwork_png())).await;

    let card = decode_card(get(app.app(), "/api/og?username=elonmusk").await).await;

    // Darkened artwork (220, 80, 40) x 0.2 in the background.
    assert_eq!(card.get_pixel(2, 2), Rgba([44, 16, 8, 255]));
    // The creature name is written in white in the right-hand column.
    assert!(any_pixel(&card, 800..1180, 170..242, |p| p.0[..3]
        .iter()
        .all(|&c| c > 200)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn og_generates_on_first_request(pool: PgPool) {
    let app = common::build_test_app(pool);

    let card = decode_card(get(app.app(), "/api/og?username=@NewUser").await).await;

    assert_eq!(card.get_pixel(2, 2), Rgba([44, 16, 8, 255]));
    assert_eq!(app.generator_calls(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn og_without_creature_is_placeholder(pool: PgPool) {
    let app = common::build_test_app_with(pool, common::test_config(), None);

    let card = decode_card(get(app.app(), "/api/og?username=nobody").await).await;

    assert_eq!(card.get_pixel(0, 0), PLACEHOLDER);
    // "Creature for @nobody" is written across the middle.
    assert!(any_pixel(&card, 60..1140, 291..347, |p| p.0[..3]
        .iter()
        .all(|&c| c < 120)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn og_with_missing_artwork_is_placeholder(pool: PgPool) {
    let app = common::build_test_app_with(pool, common::test_config(), None);
    seed(&app, "ghost", None).await;

    let card = decode_card(get(app.app(), "/api/og?username=ghost").await).await;

    assert_eq!(card.get_pixel(0, 0), PLACEHOLDER);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn og_with_undecodable_artwork_is_placeholder(pool: PgPool) {
    let app = common::build_test_app_with(pool, common::test_config(), None);
    seed(&app, "broken", Some(b"not a png".to_vec())).await;

    let card = decode_card(get(app.app(), "/api/og?username=broken").await).await;

    assert_eq!(card.get_pixel(0, 0), PLACEHOLDER);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn og_invalid_username_is_placeholder(pool: PgPool) {
    let app = common::build_test_app(pool);

    let card = decode_card(get(app.app(), "/api/og?username=%23%23%23").await).await;

    assert_eq!(card.get_pixel(0, 0), PLACEHOLDER);
    assert_eq!(app.generator_calls(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn og_missing_username_defaults_to_user(pool: PgPool) {
    let app = common::build_test_app_with(
        pool.clone(),
        common::test_config(),
        Some(FakeGenerator::named("Pokemon Name: Usrix")),
    );

    decode_card(get(app.app(), "/api/og").await).await;

    let record = CreatureRepo::find_by_handle(&pool, "user").await.unwrap();
    assert_eq!(record.unwrap().creature_name, "Usrix");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn og_home_is_static_dark_card(pool: PgPool) {
    let app = common::build_test_app(pool);

    let card = decode_card(get(app.app(), "/api/og-home").await).await;

    assert_eq!(card.get_pixel(0, 0), Rgba([0x0F, 0x0F, 0x23, 255]));
    assert_eq!(app.generator_calls(), 0);
}
