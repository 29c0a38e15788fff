//! Versioned schema migrations, applied in order at startup.
//!
//! Every applied version is recorded in `schema_migrations`. The steps are
//! also idempotent on their own, so a database created by an older build
//! (the original `code`/`preset`/`ts` table, a table without `status`, no
//! bookkeeping table) converges to the same schema as a fresh one.

use chrono::Utc;
use sqlx::SqliteConnection;

use crate::DbPool;

/// A single schema change inside a migration.
#[derive(Debug)]
pub enum Step {
    /// Statements that are idempotent by construction (`IF NOT EXISTS`).
    Sql(&'static str),
    /// `ALTER TABLE ... ADD COLUMN`, skipped when the column is already present.
    AddColumnIfMissing {
        table: &'static str,
        column: &'static str,
        definition: &'static str,
    },
    /// `ALTER TABLE ... RENAME COLUMN`, applied only while `from` exists and
    /// `to` does not.
    RenameColumnIfPresent {
        table: &'static str,
        from: &'static str,
        to: &'static str,
    },
}

/// One recorded entry in the migration list.
#[derive(Debug)]
pub struct Migration {
    pub version: i64,
    pub description: &'static str,
    pub steps: &'static [Step],
}

/// The full migration list. Versions are strictly increasing; never edit an
/// entry that has shipped, append a new one instead.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "create presets table",
        steps: &[Step::Sql(
            "CREATE TABLE IF NOT EXISTS presets (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                name          TEXT NOT NULL,
                material_code TEXT NOT NULL,
                thickness     REAL NOT NULL,
                payload       TEXT NOT NULL,
                status        TEXT NOT NULL DEFAULT 'active'
                              CHECK (status IN ('active', 'deleted')),
                updated_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            )",
        )],
    },
    Migration {
        version: 2,
        description: "rename columns of the original presets table",
        steps: &[
            Step::RenameColumnIfPresent {
                table: "presets",
                from: "code",
                to: "material_code",
            },
            Step::RenameColumnIfPresent {
                table: "presets",
                from: "preset",
                to: "payload",
            },
            Step::RenameColumnIfPresent {
                table: "presets",
                from: "ts",
                to: "updated_at",
            },
            // Old rows carry `YYYY-MM-DD HH:MM:SS[.ffffff]` or NULL.
            Step::Sql(
                "UPDATE presets SET updated_at = COALESCE(
                    strftime('%Y-%m-%dT%H:%M:%fZ', updated_at),
                    strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
                 WHERE updated_at IS NULL OR updated_at NOT LIKE '%T%'",
            ),
        ],
    },
    Migration {
        version: 3,
        description: "add presets.status soft-delete marker",
        steps: &[Step::AddColumnIfMissing {
            table: "presets",
            column: "status",
            definition: "TEXT NOT NULL DEFAULT 'active'",
        }],
    },
    Migration {
        version: 4,
        description: "index presets for listing and material lookup",
        steps: &[
            Step::Sql(
                "CREATE INDEX IF NOT EXISTS idx_presets_status_updated_at \
                 ON presets (status, updated_at)",
            ),
            Step::Sql(
                "CREATE INDEX IF NOT EXISTS idx_presets_material \
                 ON presets (material_code, thickness)",
            ),
        ],
    },
];

const CREATE_BOOKKEEPING: &str = "CREATE TABLE IF NOT EXISTS schema_migrations (
        version     INTEGER PRIMARY KEY,
        description TEXT NOT NULL,
        applied_at  TEXT NOT NULL
    )";

/// Apply every pending migration, returning the versions applied by this call.
///
/// Each migration runs in its own transaction together with its
/// bookkeeping row, so a failure leaves neither half-applied.
pub async fn run_migrations(pool: &DbPool) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query(CREATE_BOOKKEEPING).execute(pool).await?;

    let applied = applied_versions(pool).await?;
    let mut newly_applied = Vec::new();

    for migration in MIGRATIONS {
        if applied.contains(&migration.version) {
            tracing::debug!(version = migration.version, "Migration already applied");
            continue;
        }

        let mut tx = pool.begin().await?;
        for step in migration.steps {
            apply_step(&mut tx, step).await?;
        }
        sqlx::query(
            "INSERT INTO schema_migrations (version, description, applied_at) VALUES (?, ?, ?)",
        )
        .bind(migration.version)
        .bind(migration.description)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::info!(
            version = migration.version,
            description = migration.description,
            "Applied migration"
        );
        newly_applied.push(migration.version);
    }

    Ok(newly_applied)
}

/// Versions recorded in `schema_migrations`, ascending.
pub async fn applied_versions(pool: &DbPool) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query_scalar("SELECT version FROM schema_migrations ORDER BY version")
        .fetch_all(pool)
        .await
}

/// Whether `table` currently has a column called `column`.
pub async fn column_exists(
    conn: &mut SqliteConnection,
    table: &str,
    column: &str,
) -> Result<bool, sqlx::Error> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM pragma_table_info(?) WHERE name = ?")
            .bind(table)
            .bind(column)
            .fetch_one(&mut *conn)
            .await?;
    Ok(count > 0)
}

async fn apply_step(conn: &mut SqliteConnection, step: &Step) -> Result<(), sqlx::Error> {
    match step {
        Step::Sql(sql) => {
            sqlx::raw_sql(sql).execute(&mut *conn).await?;
        }
        Step::AddColumnIfMissing {
            table,
            column,
            definition,
        } => {
            if column_exists(conn, table, column).await? {
                tracing::debug!(table, column, "Column already present, skipping");
                return Ok(());
            }
            let sql = format!("ALTER TABLE {table} ADD COLUMN {column} {definition}");
            sqlx::query(&sql).execute(&mut *conn).await?;
            tracing::info!(table, column, "Added missing column");
        }
        Step::RenameColumnIfPresent { table, from, to } => {
            if !column_exists(conn, table, from).await? || column_exists(conn, table, to).await? {
                return Ok(());
            }
            let sql = format!("ALTER TABLE {table} RENAME COLUMN {from} TO {to}");
            sqlx::query(&sql).execute(&mut *conn).await?;
            tracing::info!(table, from, to, "Renamed legacy column");
        }
    }
    Ok(())
}
