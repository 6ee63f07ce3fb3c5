use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use model::entities::user;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use tracing::{debug, error, info, trace, warn};

use crate::auth::hash_password;

pub async fn init_database(database_url: &str, seed_admin: Option<(&str, &str)>) -> Result<()> {
    trace!("Entering init_database function");
    info!("Initializing database");
    debug!("Database URL: {}", database_url);

    trace!("Attempting to connect to database");
    let db: DatabaseConnection = match Database::connect(database_url).await {
        Ok(connection) => {
            info!("Successfully connected to database");
            connection
        }
        Err(e) => {
            error!("Failed to connect to database '{}': {}", database_url, e);
            return Err(e.into());
        }
    };

    info!("Running database migrations");
    match Migrator::up(&db, None).await {
        Ok(_) => {
            info!("Database migrations completed successfully");
        }
        Err(e) => {
            error!("Failed to run database migrations: {}", e);
            return Err(e.into());
        }
    }

    if let Some((username, password)) = seed_admin {
        seed_admin_account(&db, username, password).await?;
    }

    info!("Database initialization completed successfully!");
    Ok(())
}

/// Create a bootstrap ADMIN account unless the username is already taken.
async fn seed_admin_account(db: &DatabaseConnection, username: &str, password: &str) -> Result<()> {
    let existing = user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?;
    if existing.is_some() {
        info!("User '{}' already exists, skipping admin seed", username);
        return Ok(());
    }

    let password_hash =
        hash_password(password).map_err(|e| anyhow::anyhow!("password hashing failed: {}", e))?;
    user::ActiveModel {
        username: Set(username.to_string()),
        password_hash: Set(password_hash),
        role: Set(user::Role::Admin),
        employee_id: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;

    warn!("Seeded initial admin account '{}', change its password immediately", username);
    Ok(())
}
