//! Startup schema manager
//!
//! Creates missing tables, then adds any column of the target list that an
//! older database lacks. Additive only: nothing is ever dropped or renamed,
//! and running it again on an up-to-date database changes nothing.

use serde::Serialize;
use sqlx::SqlitePool;

use super::Repository;
use crate::error::AppResult;

/// Table definition: creation statement plus the columns later versions added
struct TableSpec {
    name: &'static str,
    create: &'static str,
    /// (column, type and constant default) checked on every start
    columns: &'static [(&'static str, &'static str)],
}

const PORTAL_USERS: TableSpec = TableSpec {
    name: "portal_users",
    create: r#"
        CREATE TABLE IF NOT EXISTS portal_users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT UNIQUE NOT NULL,
            password TEXT NOT NULL,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
    "#,
    columns: &[],
};

const PROFILES: TableSpec = TableSpec {
    name: "profiles",
    create: r#"
        CREATE TABLE IF NOT EXISTS profiles (
            user_id INTEGER PRIMARY KEY,
            full_name TEXT,
            phone TEXT,
            role TEXT DEFAULT 'user',
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
    "#,
    columns: &[("phone", "TEXT"), ("role", "TEXT DEFAULT 'user'")],
};

const EQUIPMENT: TableSpec = TableSpec {
    name: "equipment",
    create: r#"
        CREATE TABLE IF NOT EXISTS equipment (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            health_percentage INTEGER DEFAULT 100,
            status TEXT DEFAULT 'active',
            employee TEXT,
            department TEXT,
            serial_number TEXT,
            technician TEXT,
            equipment_category_id INTEGER,
            company TEXT DEFAULT 'My Company (San Francisco)',
            used_by TEXT,
            maintenance_team TEXT,
            assigned_date TEXT,
            description TEXT,
            scrap_date TEXT,
            used_in_location TEXT,
            work_center_id INTEGER,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
    "#,
    columns: &[
        ("employee", "TEXT"),
        ("department", "TEXT"),
        ("serial_number", "TEXT"),
        ("technician", "TEXT"),
        ("equipment_category_id", "INTEGER"),
        ("company", "TEXT"),
        ("used_by", "TEXT"),
        ("maintenance_team", "TEXT"),
        ("assigned_date", "TEXT"),
        ("description", "TEXT"),
        ("scrap_date", "TEXT"),
        ("used_in_location", "TEXT"),
        ("work_center_id", "INTEGER"),
    ],
};

const EQUIPMENT_CATEGORIES: TableSpec = TableSpec {
    name: "equipment_categories",
    create: r#"
        CREATE TABLE IF NOT EXISTS equipment_categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            responsible TEXT,
            company TEXT DEFAULT 'My Company (San Francisco)',
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
    "#,
    columns: &[
        ("responsible", "TEXT"),
        ("company", "TEXT DEFAULT 'My Company (San Francisco)'"),
        ("updated_at", "TIMESTAMP"),
    ],
};

const TECHNICIANS: TableSpec = TableSpec {
    name: "technicians",
    create: r#"
        CREATE TABLE IF NOT EXISTS technicians (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            utilization_percentage INTEGER DEFAULT 0,
            status TEXT DEFAULT 'active',
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
    "#,
    columns: &[],
};

// request_type, priority and maintenance_for are added without a default so
// that the legacy backfill below can tell pre-existing rows apart.
const MAINTENANCE_REQUESTS: TableSpec = TableSpec {
    name: "maintenance_requests",
    create: r#"
        CREATE TABLE IF NOT EXISTS maintenance_requests (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            subject TEXT NOT NULL,
            employee TEXT NOT NULL,
            technician TEXT,
            category TEXT,
            stage TEXT DEFAULT 'New',
            company TEXT NOT NULL DEFAULT 'My company',
            status TEXT DEFAULT 'New',
            request_type TEXT DEFAULT 'Corrective',
            priority TEXT DEFAULT 'Medium',
            description TEXT,
            scheduled_date TEXT,
            due_date TEXT,
            equipment_id INTEGER,
            work_center_id INTEGER,
            maintenance_for TEXT DEFAULT 'Equipment',
            notes TEXT,
            instructions TEXT,
            team TEXT,
            request_date TEXT,
            duration TEXT,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
    "#,
    columns: &[
        ("request_type", "TEXT"),
        ("priority", "TEXT"),
        ("description", "TEXT"),
        ("scheduled_date", "TEXT"),
        ("due_date", "TEXT"),
        ("equipment_id", "INTEGER"),
        ("work_center_id", "INTEGER"),
        ("maintenance_for", "TEXT"),
        ("notes", "TEXT"),
        ("instructions", "TEXT"),
        ("team", "TEXT"),
        ("request_date", "TEXT"),
        ("duration", "TEXT"),
        ("updated_at", "TIMESTAMP"),
    ],
};

const WORKSHEET_COMMENTS: TableSpec = TableSpec {
    name: "worksheet_comments",
    create: r#"
        CREATE TABLE IF NOT EXISTS worksheet_comments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            request_id INTEGER NOT NULL,
            user TEXT NOT NULL,
            comment TEXT NOT NULL,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
    "#,
    columns: &[],
};

const WORK_CENTERS: TableSpec = TableSpec {
    name: "work_centers",
    create: r#"
        CREATE TABLE IF NOT EXISTS work_centers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            code TEXT,
            tag TEXT,
            alternative_workcenters TEXT,
            cost_per_hour REAL DEFAULT 0.0,
            capacity_time_efficiency REAL DEFAULT 100.0,
            oee_target REAL DEFAULT 0.0,
            company TEXT DEFAULT 'My company',
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
    "#,
    columns: &[
        ("code", "TEXT"),
        ("tag", "TEXT"),
        ("alternative_workcenters", "TEXT"),
        ("cost_per_hour", "REAL DEFAULT 0.0"),
        ("capacity_time_efficiency", "REAL DEFAULT 100.0"),
        ("oee_target", "REAL DEFAULT 0.0"),
        ("company", "TEXT DEFAULT 'My company'"),
        ("updated_at", "TIMESTAMP"),
    ],
};

/// Values written into pre-existing requests when a column first appears
const LEGACY_BACKFILL: &[(&str, &str)] = &[
    ("request_type", "Corrective (Breakdown)"),
    ("priority", "Medium"),
    ("maintenance_for", "Equipment"),
];

/// Outcome of a schema pass, as `table.column` entries
#[derive(Debug, Default, Clone, Serialize)]
pub struct SchemaReport {
    pub added: Vec<String>,
    pub failed: Vec<String>,
}

impl SchemaReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Bring all three stores up to the current schema
pub async fn ensure_schema(repository: &Repository) -> AppResult<SchemaReport> {
    let mut report = SchemaReport::default();

    for spec in [&PORTAL_USERS, &PROFILES] {
        ensure_table(&repository.auth_pool, spec, &mut report).await?;
    }
    for spec in [&EQUIPMENT, &EQUIPMENT_CATEGORIES, &TECHNICIANS] {
        ensure_table(&repository.equipment_pool, spec, &mut report).await?;
    }
    for spec in [&MAINTENANCE_REQUESTS, &WORKSHEET_COMMENTS, &WORK_CENTERS] {
        ensure_table(&repository.requests_pool, spec, &mut report).await?;
    }

    if report.added.is_empty() {
        tracing::debug!("Schema up to date");
    } else {
        tracing::info!("Schema updated, added columns: {}", report.added.join(", "));
    }

    Ok(report)
}

async fn ensure_table(pool: &SqlitePool, spec: &TableSpec, report: &mut SchemaReport) -> AppResult<()> {
    sqlx::query(spec.create).execute(pool).await?;

    let existing = existing_columns(pool, spec.name).await?;

    for (column, definition) in spec.columns {
        if existing.iter().any(|name| name == column) {
            continue;
        }

        let alter = format!("ALTER TABLE {} ADD COLUMN {} {}", spec.name, column, definition);
        match sqlx::query(&alter).execute(pool).await {
            Ok(_) => {
                tracing::info!("Added column '{}' to {} table", column, spec.name);
                report.added.push(format!("{}.{}", spec.name, column));

                if spec.name == MAINTENANCE_REQUESTS.name {
                    backfill_legacy(pool, column).await;
                }
            }
            Err(e) => {
                tracing::warn!("Could not add column '{}' to {} table: {}", column, spec.name, e);
                report.failed.push(format!("{}.{}", spec.name, column));
            }
        }
    }

    Ok(())
}

/// Column names currently present on a table
pub async fn existing_columns(pool: &SqlitePool, table: &str) -> AppResult<Vec<String>> {
    let columns: Vec<String> =
        sqlx::query_scalar(&format!("SELECT name FROM pragma_table_info('{}')", table))
            .fetch_all(pool)
            .await?;
    Ok(columns)
}

async fn backfill_legacy(pool: &SqlitePool, column: &str) {
    let Some((_, value)) = LEGACY_BACKFILL.iter().find(|(name, _)| *name == column) else {
        return;
    };

    let update = format!(
        "UPDATE maintenance_requests SET {} = ? WHERE {} IS NULL",
        column, column
    );
    match sqlx::query(&update).bind(*value).execute(pool).await {
        Ok(result) => {
            tracing::info!(
                "Backfilled {} legacy requests with {} = '{}'",
                result.rows_affected(),
                column,
                value
            );
        }
        Err(e) => tracing::warn!("Could not backfill {}: {}", column, e),
    }
}
