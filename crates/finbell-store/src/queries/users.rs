// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User directory operations.

use finbell_core::types::OwnerId;
use finbell_core::FinbellError;
use rusqlite::params;

use crate::database::Database;

/// Insert or update a directory entry.
pub async fn upsert_user(
    db: &Database,
    id: &OwnerId,
    email: Option<&str>,
    display_name: Option<&str>,
) -> Result<(), FinbellError> {
    let id = id.0.clone();
    let email = email.map(|e| e.to_string());
    let display_name = display_name.map(|n| n.to_string());
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO users (id, email, display_name) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET email = ?2, display_name = ?3",
                params![id, email, display_name],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Look up an owner's email address.
///
/// Returns `None` for unknown owners and for owners with a NULL or empty
/// address; the batch cannot distinguish the cases and skips the bill
/// either way.
pub async fn email_for(db: &Database, owner_id: &OwnerId) -> Result<Option<String>, FinbellError> {
    let owner = owner_id.0.clone();
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                "SELECT email FROM users WHERE id = ?1",
                params![owner],
                |row| row.get::<_, Option<String>>(0),
            );
            match result {
                Ok(email) => Ok(email.filter(|e| !e.trim().is_empty())),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn email_for_known_user_returns_address() {
        let (db, _dir) = setup_db().await;
        let owner = OwnerId("user-1".to_string());
        upsert_user(&db, &owner, Some("ana@example.com"), Some("Ana"))
            .await
            .unwrap();

        let email = email_for(&db, &owner).await.unwrap();
        assert_eq!(email.as_deref(), Some("ana@example.com"));
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn email_for_unknown_user_returns_none() {
        let (db, _dir) = setup_db().await;
        let email = email_for(&db, &OwnerId("ghost".to_string())).await.unwrap();
        assert!(email.is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn email_for_user_without_address_returns_none() {
        let (db, _dir) = setup_db().await;
        let owner = OwnerId("user-no-email".to_string());
        upsert_user(&db, &owner, None, Some("No Email")).await.unwrap();

        let email = email_for(&db, &owner).await.unwrap();
        assert!(email.is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn email_for_user_with_blank_address_returns_none() {
        let (db, _dir) = setup_db().await;
        let owner = OwnerId("user-blank".to_string());
        upsert_user(&db, &owner, Some("   "), None).await.unwrap();

        let email = email_for(&db, &owner).await.unwrap();
        assert!(email.is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn upsert_replaces_existing_address() {
        let (db, _dir) = setup_db().await;
        let owner = OwnerId("user-move".to_string());
        upsert_user(&db, &owner, Some("old@example.com"), None)
            .await
            .unwrap();
        upsert_user(&db, &owner, Some("new@example.com"), None)
            .await
            .unwrap();

        let email = email_for(&db, &owner).await.unwrap();
        assert_eq!(email.as_deref(), Some("new@example.com"));
        db.close().await.unwrap();
    }
}
