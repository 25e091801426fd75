use std::sync::Arc;
use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DbConn, DbErr, Schema};

use super::entity::{comment, post, revoked_token, user};

/// Connection pool configuration.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub sqlx_logging: bool,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 20,
            min_connections: 2,
            connect_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(300),
            sqlx_logging: true,
        }
    }
}

/// Connection handle shared by every repository.
pub type SharedConn = Arc<DbConn>;

/// Database connection manager.
///
/// Cheap to clone; every clone shares the same pool.
#[derive(Clone)]
pub struct DatabaseConnections {
    pub main: SharedConn,
}

impl DatabaseConnections {
    /// Open the connection pool.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connections...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout)
            .sqlx_logging(config.sqlx_logging)
            .to_owned();

        let main = Database::connect(opts).await?;
        tracing::info!(pool = config.max_connections, "Database connected");

        Ok(Self {
            main: Arc::new(main),
        })
    }

    /// Wrap an existing connection (tests, embedded databases).
    pub fn from_connection(main: DbConn) -> Self {
        Self {
            main: Arc::new(main),
        }
    }

    /// Round-trip to the database, used by the health check.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.main.ping().await
    }

    /// Create every table from the entity definitions if it does not exist.
    ///
    /// Production schemas are managed by the `migration` app; this is for
    /// throwaway databases such as in-memory SQLite.
    pub async fn create_schema(&self) -> Result<(), DbErr> {
        let backend = self.main.get_database_backend();
        let schema = Schema::new(backend);

        let statements = [
            schema.create_table_from_entity(user::Entity),
            schema.create_table_from_entity(post::Entity),
            schema.create_table_from_entity(comment::Entity),
            schema.create_table_from_entity(revoked_token::Entity),
        ];
        for mut statement in statements {
            statement.if_not_exists();
            self.main.execute(backend.build(&statement)).await?;
        }
        Ok(())
    }
}
