use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema and seed data.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    // Health check
    skillswap_db::health_check(&pool).await.unwrap();

    // Verify all core tables exist.
    let tables = [
        "profiles",
        "categories",
        "posts",
        "likes",
        "applications",
        "notifications",
        "blocks",
        "user_sessions",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert!(count.0 >= 0);
    }

    // Categories are seeded.
    let categories: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(categories.0 > 0, "categories should have seed data");
}
