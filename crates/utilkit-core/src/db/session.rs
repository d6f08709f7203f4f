//! Blocking connect / query / execute helpers.

use sqlx::mysql::MySqlConnection;
use sqlx::postgres::PgConnection;
use sqlx::sqlite::SqliteConnection;
use sqlx::Connection as _;
use tokio::runtime::{Builder, Runtime};

use super::decode;
use super::error::DbError;
use super::types::{Backend, ConnectionConfig, Row};

/// Driver connection for the configured backend.
enum Session {
    Sqlite(SqliteConnection),
    Postgres(PgConnection),
    Mysql(MySqlConnection),
}

/// Run the same code against whichever driver connection `session` holds.
macro_rules! with_session {
    ($session:expr, $conn:ident => $body:expr) => {
        match $session {
            Session::Sqlite($conn) => $body,
            Session::Postgres($conn) => $body,
            Session::Mysql($conn) => $body,
        }
    };
}

/// Database helper bound to one set of connection settings.
pub struct Database {
    config: ConnectionConfig,
    runtime: Runtime,
}

impl Database {
    pub fn new(config: ConnectionConfig) -> Result<Self, DbError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { config, runtime })
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Open a session and check it answers a ping.
    pub fn connect(&self) -> Result<Connection<'_>, DbError> {
        let url = self.config.url()?;
        let session = self
            .runtime
            .block_on(Session::open(self.config.backend, &url))
            .map_err(|source| DbError::Connect {
                target: self.config.display_target(),
                source,
            })?;
        tracing::debug!(db = %self.config.display_target(), "connected");
        Ok(Connection {
            runtime: &self.runtime,
            session,
        })
    }

    /// Run a query on a fresh connection and return all rows.
    /// The connection is closed whether or not the query succeeds.
    pub fn query(&self, sql: &str) -> Result<Vec<Row>, DbError> {
        let mut conn = self.connect()?;
        let result = conn.query(sql);
        conn.close();
        result
    }

    /// Run a statement on a fresh connection and commit it.
    pub fn execute(&self, sql: &str) -> Result<(), DbError> {
        self.execute_attempt(sql, 1)
    }

    /// Like [`execute`](Self::execute), but any failure (connecting included)
    /// is retried once on a new connection.
    pub fn execute_with_single_retry(&self, sql: &str) -> Result<(), DbError> {
        single_retry(|attempt| self.execute_attempt(sql, attempt))
    }

    /// Run several statements in one transaction with a single commit.
    /// Nothing is committed if any statement fails. Returns rows affected.
    pub fn execute_many(&self, statements: &[&str]) -> Result<u64, DbError> {
        let mut conn = self.connect()?;
        let result = conn.run_in_transaction(statements);
        conn.close();
        result.map_err(|source| DbError::Execute {
            sql: statements.join(";\n"),
            attempts: 1,
            source,
        })
    }

    fn execute_attempt(&self, sql: &str, attempt: u32) -> Result<(), DbError> {
        let mut conn = self.connect()?;
        let result = conn.run_in_transaction(&[sql]);
        conn.close();
        match result {
            Ok(affected) => {
                tracing::debug!(attempt, affected, "statement committed");
                Ok(())
            }
            Err(source) => Err(DbError::Execute {
                sql: sql.to_string(),
                attempts: attempt,
                source,
            }),
        }
    }
}

/// An open session. Obtained from [`Database::connect`]; close it with
/// [`Connection::close`].
pub struct Connection<'db> {
    runtime: &'db Runtime,
    session: Session,
}

impl Connection<'_> {
    pub fn query(&mut self, sql: &str) -> Result<Vec<Row>, DbError> {
        let runtime = self.runtime;
        let fetched = match &mut self.session {
            Session::Sqlite(conn) => runtime
                .block_on(sqlx::query(sql).fetch_all(conn))
                .map(|rows| decode::rows(&rows, decode::sqlite_value)),
            Session::Postgres(conn) => runtime
                .block_on(sqlx::query(sql).fetch_all(conn))
                .map(|rows| decode::rows(&rows, decode::postgres_value)),
            Session::Mysql(conn) => runtime
                .block_on(sqlx::query(sql).fetch_all(conn))
                .map(|rows| decode::rows(&rows, decode::mysql_value)),
        };
        fetched.map_err(|source| DbError::Query {
            sql: sql.to_string(),
            source,
        })?
    }

    /// Run `sql` in its own transaction and commit.
    pub fn execute(&mut self, sql: &str) -> Result<u64, DbError> {
        self.run_in_transaction(&[sql])
            .map_err(|source| DbError::Execute {
                sql: sql.to_string(),
                attempts: 1,
                source,
            })
    }

    pub fn close(self) {
        let closed = with_session!(self.session, conn => self.runtime.block_on(conn.close()));
        if let Err(e) = closed {
            tracing::debug!("error while closing connection: {e}");
        }
    }

    fn run_in_transaction(&mut self, statements: &[&str]) -> Result<u64, sqlx::Error> {
        let runtime = self.runtime;
        with_session!(&mut self.session, conn => runtime.block_on(async move {
            let mut tx = conn.begin().await?;
            let mut affected = 0;
            for sql in statements {
                affected += sqlx::query(sql).execute(&mut *tx).await?.rows_affected();
            }
            tx.commit().await?;
            Ok(affected)
        }))
    }
}

impl Session {
    async fn open(backend: Backend, url: &str) -> Result<Self, sqlx::Error> {
        let mut session = match backend {
            Backend::Sqlite => Session::Sqlite(SqliteConnection::connect(url).await?),
            Backend::Postgres => Session::Postgres(PgConnection::connect(url).await?),
            Backend::Mysql => Session::Mysql(MySqlConnection::connect(url).await?),
        };
        with_session!(&mut session, conn => conn.ping().await)?;
        Ok(session)
    }
}

/// Run `attempt(1)`; on failure log it and run `attempt(2)` exactly once.
pub(crate) fn single_retry<T>(
    mut attempt: impl FnMut(u32) -> Result<T, DbError>,
) -> Result<T, DbError> {
    match attempt(1) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::warn!("statement failed, retrying once: {e}");
            match attempt(2) {
                Ok(value) => Ok(value),
                Err(e) => {
                    tracing::warn!("statement failed again, giving up: {e}");
                    Err(e)
                }
            }
        }
    }
}
