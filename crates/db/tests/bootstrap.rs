use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    v0mon_db::health_check(&pool).await.unwrap();

    let (exists,): (bool,) = sqlx::query_as(
        "SELECT EXISTS (
             SELECT 1 FROM information_schema.tables
             WHERE table_schema = 'public' AND table_name = 'creatures'
         )",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert!(exists, "creatures table should exist after migrations");
}

/// Every table (except _sqlx_migrations) must have created_at and updated_at as timestamptz.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_timestamps(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table,) in &tables {
        for col in ["created_at", "updated_at"] {
            let result: Option<(String,)> = sqlx::query_as(&format!(
                "SELECT data_type
                 FROM information_schema.columns
                 WHERE table_schema = 'public'
                   AND table_name = '{table}'
                   AND column_name = '{col}'"
            ))
            .fetch_optional(&pool)
            .await
            .unwrap();

            let (data_type,) =
                result.unwrap_or_else(|| panic!("Table {table} is missing column {col}"));
            assert_eq!(
                data_type, "timestamp with time zone",
                "Table {table}.{col} should be timestamptz, got {data_type}"
            );
        }
    }
}

/// No character varying columns should exist; TEXT is used throughout.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_no_varchar_columns(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, column_name
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND data_type = 'character varying'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name, column_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(
        rows.is_empty(),
        "Found VARCHAR columns (should use TEXT): {:?}",
        rows
    );
}
