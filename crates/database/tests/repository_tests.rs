//! Integration tests for the user and item repositories.

use groundwork_config::DatabaseConfig;
use groundwork_database::{
    prepare_database, revert_last_migration, run_migrations, DbError, HashedPassword, Item,
    ItemReader, ItemRepository, ItemWriter, Session, User, UserReader, UserRepository, UserWriter,
};
use sqlx::AnyPool;
use tempfile::TempDir;
use uuid::Uuid;

fn sqlite_config(url: String) -> DatabaseConfig {
    DatabaseConfig {
        host: String::new(),
        port: 5432,
        user: String::new(),
        password: String::new(),
        name: String::new(),
        ssl_mode: "disable".to_string(),
        min_idle_conns: 1,
        max_open_conns: 5,
        conn_lifetime_seconds: 300,
        url: Some(url),
    }
}

async fn test_session() -> (AnyPool, Session, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let config = sqlite_config(format!("sqlite://{}", db_path.display()));

    let pool = prepare_database(&config).await.unwrap();
    run_migrations(&pool).await.unwrap();
    let session = Session::from_pool(pool.clone());
    (pool, session, temp_dir)
}

fn sample_user(name: &str, email: &str) -> User {
    User::new(name, email, HashedPassword::new("argon2-digest".to_string()))
}

#[tokio::test]
async fn user_crud_round_trip() {
    let (pool, session, _temp_dir) = test_session().await;
    let repo = UserRepository::new();

    let created = repo
        .create_user(&session, &sample_user("Ada", "ada@example.com"))
        .await
        .unwrap();
    assert_eq!(created.name(), "Ada");

    let fetched = repo.get_user(&session, created.id()).await.unwrap();
    assert_eq!(fetched.email(), "ada@example.com");
    // Reads never load the digest.
    assert!(fetched.password().is_none());

    let by_email = repo
        .get_user_by_email(&session, "ada@example.com")
        .await
        .unwrap();
    assert_eq!(by_email.id(), created.id());

    let renamed = repo
        .update_user(
            &session,
            &User::from_source(created.id(), "Ada Lovelace", created.email()),
        )
        .await
        .unwrap();
    assert_eq!(renamed.name(), "Ada Lovelace");

    repo.delete_user(&session, created.id()).await.unwrap();
    assert!(matches!(
        repo.get_user(&session, created.id()).await,
        Err(DbError::NotFound)
    ));

    pool.close().await;
}

#[tokio::test]
async fn missing_user_maps_to_not_found() {
    let (pool, session, _temp_dir) = test_session().await;
    let repo = UserRepository::new();

    assert!(matches!(
        repo.get_user(&session, Uuid::new_v4()).await,
        Err(DbError::NotFound)
    ));
    assert!(matches!(
        repo.get_user_by_email(&session, "ghost@example.com").await,
        Err(DbError::NotFound)
    ));

    pool.close().await;
}

#[tokio::test]
async fn duplicate_email_maps_to_duplicate() {
    let (pool, session, _temp_dir) = test_session().await;
    let repo = UserRepository::new();

    repo.create_user(&session, &sample_user("Ada", "ada@example.com"))
        .await
        .unwrap();
    let err = repo
        .create_user(&session, &sample_user("Another Ada", "ada@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::Duplicate(_)));
    pool.close().await;
}

#[tokio::test]
async fn user_without_digest_is_rejected() {
    let (pool, session, _temp_dir) = test_session().await;
    let repo = UserRepository::new();

    let read_side = User::from_source(Uuid::new_v4(), "Ada", "ada@example.com");
    let err = repo.create_user(&session, &read_side).await.unwrap_err();

    assert!(matches!(err, DbError::InvalidColumn(_)));
    pool.close().await;
}

#[tokio::test]
async fn list_users_honors_limit_and_offset() {
    let (pool, session, _temp_dir) = test_session().await;
    let repo = UserRepository::new();

    for index in 0..5 {
        repo.create_user(
            &session,
            &sample_user(&format!("User {index}"), &format!("user{index}@example.com")),
        )
        .await
        .unwrap();
    }

    let first_page = repo.list_users(&session, 2, 0).await.unwrap();
    assert_eq!(first_page.len(), 2);

    let last_page = repo.list_users(&session, 10, 4).await.unwrap();
    assert_eq!(last_page.len(), 1);

    pool.close().await;
}

#[tokio::test]
async fn item_crud_round_trip() {
    let (pool, session, _temp_dir) = test_session().await;
    let repo = ItemRepository::new();

    let created = repo.create_item(&session, &Item::new(7)).await.unwrap();
    assert_eq!(created.type_id(), 7);

    let fetched = repo.get_item(&session, created.id()).await.unwrap();
    assert_eq!(fetched, created);

    let updated = repo
        .update_item(&session, &Item::from_source(created.id(), 11))
        .await
        .unwrap();
    assert_eq!(updated.type_id(), 11);

    let listed = repo.list_items(&session, 10, 0).await.unwrap();
    assert_eq!(listed.len(), 1);

    repo.delete_item(&session, created.id()).await.unwrap();
    assert!(matches!(
        repo.get_item(&session, created.id()).await,
        Err(DbError::NotFound)
    ));

    pool.close().await;
}

#[tokio::test]
async fn migrations_revert_one_step_at_a_time() {
    let (pool, _session, _temp_dir) = test_session().await;

    // Items is the most recent migration; reverting drops it but leaves users.
    revert_last_migration(&pool).await.unwrap();
    assert!(sqlx::query("SELECT COUNT(*) FROM items")
        .fetch_one(&pool)
        .await
        .is_err());
    sqlx::query("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();

    // Re-applying brings the schema back.
    run_migrations(&pool).await.unwrap();
    sqlx::query("SELECT COUNT(*) FROM items")
        .fetch_one(&pool)
        .await
        .unwrap();

    pool.close().await;
}
