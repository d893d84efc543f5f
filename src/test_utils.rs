//! Test utilities with lazy testcontainers support
//!
//! One Postgres container is started on first use and shared by every test.
//! Each test gets its own freshly migrated database inside it.

pub mod containers {
    use sqlx::PgPool;
    use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
    use testcontainers_modules::postgres::Postgres;
    use tokio::sync::OnceCell;
    use uuid::Uuid;

    struct SharedPostgres {
        _container: ContainerAsync<Postgres>,
        base_url: String,
    }

    static POSTGRES: OnceCell<SharedPostgres> = OnceCell::const_new();

    async fn start_postgres() -> SharedPostgres {
        let container = Postgres::default()
            .with_tag("16-alpine")
            .start()
            .await
            .expect("Failed to start PostgreSQL container");

        let host = container.get_host().await.unwrap();
        let port = container.get_host_port_ipv4(5432).await.unwrap();

        SharedPostgres {
            base_url: format!("postgres://postgres:postgres@{host}:{port}"),
            _container: container,
        }
    }

    /// Connection URL of the shared server, without a database name
    pub async fn postgres_url() -> &'static str {
        &POSTGRES.get_or_init(start_postgres).await.base_url
    }

    /// Pool on a new, migrated database of its own
    pub async fn fresh_pool() -> PgPool {
        let base_url = postgres_url().await;
        let name = format!("teamdeck_{}", Uuid::new_v4().simple());

        let admin = PgPool::connect(&format!("{base_url}/postgres"))
            .await
            .expect("Failed to connect to test server");
        sqlx::query(&format!("CREATE DATABASE {name}"))
            .execute(&admin)
            .await
            .expect("Failed to create test database");
        admin.close().await;

        let pool = PgPool::connect(&format!("{base_url}/{name}"))
            .await
            .expect("Failed to connect to test database");
        crate::db::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }
}

pub mod test_app {
    use std::sync::Arc;

    use sqlx::PgPool;
    use uuid::Uuid;

    use crate::calendar::{CalendarSource, UnconfiguredCalendarSource};
    use crate::config::Config;
    use crate::db;
    use crate::models::Profile;
    use crate::notify::{LogNotifier, Notifier};
    use crate::state::AppState;

    /// State over a real pool with the given collaborators
    pub fn state_with(
        pool: PgPool,
        notifier: Arc<dyn Notifier>,
        calendar: Arc<dyn CalendarSource>,
    ) -> AppState {
        AppState::new(pool, Config::for_tests(), notifier, calendar)
    }

    /// State whose pool never connects; for paths that must not reach the database
    pub fn lazy_state() -> AppState {
        let config = Config::for_tests();
        let pool = db::create_lazy_pool(&config.database).unwrap();
        AppState::new(
            pool,
            config,
            Arc::new(LogNotifier),
            Arc::new(UnconfiguredCalendarSource),
        )
    }

    /// Insert an active profile in the rotation pool
    pub async fn insert_profile(pool: &PgPool, full_name: &str, base_role: &str) -> Profile {
        let email = format!(
            "{}@example.com",
            full_name.to_lowercase().replace(' ', ".")
        );

        sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (id, full_name, email, base_role)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(full_name)
        .bind(email)
        .bind(base_role)
        .fetch_one(pool)
        .await
        .expect("Failed to insert profile")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_containers_start_lazily() {
        let first = containers::postgres_url().await;
        assert!(first.starts_with("postgres://"));
        assert_eq!(first, containers::postgres_url().await);
    }

    #[tokio::test]
    async fn test_fresh_pools_are_isolated() {
        let a = containers::fresh_pool().await;
        let b = containers::fresh_pool().await;

        test_app::insert_profile(&a, "Ada Lovelace", "user").await;

        let count = |pool: sqlx::PgPool| async move {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM profiles")
                .fetch_one(&pool)
                .await
                .unwrap()
        };
        assert_eq!(count(a).await, 1);
        assert_eq!(count(b).await, 0);
    }
}
