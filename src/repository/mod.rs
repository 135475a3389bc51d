//! Repository layer for database operations
//!
//! Three independent SQLite stores: auth (users, profiles), equipment
//! (equipment, categories, technicians) and requests (requests, comments,
//! work centers). No statement spans two stores.

pub mod equipment;
pub mod equipment_categories;
pub mod requests;
pub mod schema;
pub mod technicians;
pub mod users;
pub mod work_centers;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// Main repository struct holding the three store pools
#[derive(Clone)]
pub struct Repository {
    pub auth_pool: SqlitePool,
    pub equipment_pool: SqlitePool,
    pub requests_pool: SqlitePool,
    pub users: users::UsersRepository,
    pub equipment: equipment::EquipmentRepository,
    pub equipment_categories: equipment_categories::EquipmentCategoriesRepository,
    pub technicians: technicians::TechniciansRepository,
    pub work_centers: work_centers::WorkCentersRepository,
    pub requests: requests::RequestsRepository,
}

impl Repository {
    /// Create a new repository over the given store pools
    pub fn new(auth_pool: SqlitePool, equipment_pool: SqlitePool, requests_pool: SqlitePool) -> Self {
        Self {
            users: users::UsersRepository::new(auth_pool.clone()),
            equipment: equipment::EquipmentRepository::new(equipment_pool.clone()),
            equipment_categories: equipment_categories::EquipmentCategoriesRepository::new(
                equipment_pool.clone(),
            ),
            technicians: technicians::TechniciansRepository::new(equipment_pool.clone()),
            work_centers: work_centers::WorkCentersRepository::new(requests_pool.clone()),
            requests: requests::RequestsRepository::new(requests_pool.clone()),
            auth_pool,
            equipment_pool,
            requests_pool,
        }
    }

    /// Ping every store
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        for pool in [&self.auth_pool, &self.equipment_pool, &self.requests_pool] {
            sqlx::query("SELECT 1").execute(pool).await?;
        }
        Ok(())
    }
}

/// Open a pool on a SQLite URL, creating the database file when missing
pub async fn open_pool(url: &str, max_connections: u32, min_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .min_connections(min_connections)
        .connect_with(options)
        .await
}
