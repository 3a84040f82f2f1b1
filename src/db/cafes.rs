//! Record store for café rows.
//!
//! The four amenity flags are stored as 0/1 integers in SQLite but exposed
//! as `bool` here; the integer encoding stays at this boundary.

use serde::Serialize;
use sqlx::SqlitePool;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Cafe {
    pub id: i64,
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

/// Field set for creating or fully replacing a café row. The store assigns
/// the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCafe {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cafe {0} not found")]
    NotFound(i64),

    #[error("a cafe with that name already exists")]
    DuplicateName,

    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

const COLUMNS: &str = "id, name, map_url, img_url, location, seats, \
                       has_toilet, has_wifi, has_sockets, can_take_calls, coffee_price";

/// All cafés, oldest first.
pub async fn list(pool: &SqlitePool) -> Result<Vec<Cafe>, StoreError> {
    let cafes = sqlx::query_as::<_, Cafe>(&format!("SELECT {COLUMNS} FROM cafes ORDER BY id"))
        .fetch_all(pool)
        .await?;
    Ok(cafes)
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Cafe, StoreError> {
    sqlx::query_as::<_, Cafe>(&format!("SELECT {COLUMNS} FROM cafes WHERE id = ?1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::NotFound(id))
}

pub async fn create(pool: &SqlitePool, cafe: &NewCafe) -> Result<Cafe, StoreError> {
    let created = sqlx::query_as::<_, Cafe>(&format!(
        "INSERT INTO cafes (name, map_url, img_url, location, seats, \
                            has_toilet, has_wifi, has_sockets, can_take_calls, coffee_price) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10) \
         RETURNING {COLUMNS}"
    ))
    .bind(&cafe.name)
    .bind(&cafe.map_url)
    .bind(&cafe.img_url)
    .bind(&cafe.location)
    .bind(&cafe.seats)
    .bind(cafe.has_toilet)
    .bind(cafe.has_wifi)
    .bind(cafe.has_sockets)
    .bind(cafe.can_take_calls)
    .bind(&cafe.coffee_price)
    .fetch_one(pool)
    .await
    .map_err(map_unique)?;
    Ok(created)
}

/// Replace every field of an existing row; the id itself never changes.
pub async fn update(pool: &SqlitePool, id: i64, cafe: &NewCafe) -> Result<Cafe, StoreError> {
    sqlx::query_as::<_, Cafe>(&format!(
        "UPDATE cafes SET name = ?1, map_url = ?2, img_url = ?3, location = ?4, seats = ?5, \
                          has_toilet = ?6, has_wifi = ?7, has_sockets = ?8, \
                          can_take_calls = ?9, coffee_price = ?10 \
         WHERE id = ?11 \
         RETURNING {COLUMNS}"
    ))
    .bind(&cafe.name)
    .bind(&cafe.map_url)
    .bind(&cafe.img_url)
    .bind(&cafe.location)
    .bind(&cafe.seats)
    .bind(cafe.has_toilet)
    .bind(cafe.has_wifi)
    .bind(cafe.has_sockets)
    .bind(cafe.can_take_calls)
    .bind(&cafe.coffee_price)
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(map_unique)?
    .ok_or(StoreError::NotFound(id))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM cafes WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound(id));
    }
    Ok(())
}

fn map_unique(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicateName,
        _ => StoreError::Db(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        // A single connection keeps every query on the same in-memory db.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::MIGRATOR.run(&pool).await.unwrap();
        pool
    }

    fn sample(name: &str) -> NewCafe {
        NewCafe {
            name: name.to_string(),
            map_url: "https://maps.example/x".to_string(),
            img_url: "https://img.example/y".to_string(),
            location: "Downtown".to_string(),
            seats: "10-20".to_string(),
            has_toilet: true,
            has_wifi: true,
            has_sockets: false,
            can_take_calls: false,
            coffee_price: Some("£2.50".to_string()),
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let pool = test_pool().await;
        let input = sample("Bean There");

        let created = create(&pool, &input).await.unwrap();
        let fetched = get(&pool, created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.name, input.name);
        assert_eq!(fetched.map_url, input.map_url);
        assert!(fetched.has_wifi);
        assert!(!fetched.has_sockets);
        assert_eq!(fetched.coffee_price.as_deref(), Some("£2.50"));
    }

    #[tokio::test]
    async fn list_returns_rows_in_insertion_order() {
        let pool = test_pool().await;
        create(&pool, &sample("First")).await.unwrap();
        create(&pool, &sample("Second")).await.unwrap();

        let names: Vec<String> = list(&pool).await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_id() {
        let pool = test_pool().await;
        let created = create(&pool, &sample("Bean There")).await.unwrap();

        let mut changed = sample("Bean Here");
        changed.location = "Uptown".to_string();
        changed.has_sockets = true;

        let updated = update(&pool, created.id, &changed).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Bean Here");
        assert_eq!(updated.location, "Uptown");
        assert!(updated.has_sockets);

        let fetched = get(&pool, created.id).await.unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found() {
        let pool = test_pool().await;
        let err = update(&pool, 999, &sample("Ghost")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(999)));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let pool = test_pool().await;
        let created = create(&pool, &sample("Bean There")).await.unwrap();

        delete(&pool, created.id).await.unwrap();
        let err = get(&pool, created.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        let err = delete(&pool, created.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected() {
        let pool = test_pool().await;
        create(&pool, &sample("Bean There")).await.unwrap();

        let err = create(&pool, &sample("Bean There")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName));
    }

    #[tokio::test]
    async fn renaming_onto_an_existing_name_is_rejected() {
        let pool = test_pool().await;
        create(&pool, &sample("Bean There")).await.unwrap();
        let other = create(&pool, &sample("Bean Here")).await.unwrap();

        let err = update(&pool, other.id, &sample("Bean There")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName));
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let pool = test_pool().await;
        let first = create(&pool, &sample("First")).await.unwrap();
        delete(&pool, first.id).await.unwrap();

        let second = create(&pool, &sample("Second")).await.unwrap();
        assert!(second.id > first.id);
    }
}
