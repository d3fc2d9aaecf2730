//! Create the target database before the pool connects to it.

use crate::error::AppError;
use sqlx::ConnectOptions;
use std::str::FromStr;

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split `postgres://host/db?opts` into (`postgres://host/postgres?opts`, `db`).
fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    // No path means the server picks the database (the user name); nothing to create.
    let Some(path_start) = url[scheme_end..].find('/').map(|i| scheme_end + i + 1) else {
        return Ok((url.to_string(), String::new()));
    };
    let path_and_query = url.get(path_start..).unwrap_or("");
    let mut parts = path_and_query.splitn(2, '?');
    let db_name = parts.next().unwrap_or("").trim();
    let query = parts.next();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = match query {
        Some(q) => format!("{}postgres?{}", base, q),
        None => format!("{}postgres", base),
    };
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_database_name() {
        let (admin, name) = parse_db_name_from_url("postgres://app:pw@localhost:5432/shop").unwrap();
        assert_eq!(admin, "postgres://app:pw@localhost:5432/postgres");
        assert_eq!(name, "shop");
    }

    #[test]
    fn keeps_query_options_on_admin_url() {
        let (admin, name) = parse_db_name_from_url("postgres://localhost/shop?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://localhost/postgres?sslmode=disable");
        assert_eq!(name, "shop");
    }

    #[test]
    fn missing_path_yields_empty_name() {
        let (admin, name) = parse_db_name_from_url("postgres://app@localhost:5432").unwrap();
        assert_eq!(admin, "postgres://app@localhost:5432");
        assert_eq!(name, "");
    }

    #[tokio::test]
    async fn ensure_database_exists_skips_url_without_path() {
        // Returns before connecting, so no server is needed.
        ensure_database_exists("postgres://localhost").await.unwrap();
    }

    #[test]
    fn empty_database_name() {
        let (_, name) = parse_db_name_from_url("postgres://localhost/").unwrap();
        assert_eq!(name, "");
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("shop"), "\"shop\"");
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    }
}
