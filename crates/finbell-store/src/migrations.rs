// SPDX-FileCopyrightText: 2026 Finbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded schema migrations.
//!
//! The SQL files under `migrations/` are compiled in with refinery's
//! `embed_migrations!` and applied every time the database opens; already
//! applied versions are skipped via `refinery_schema_history`.

use finbell_core::FinbellError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Apply any pending migrations on the given connection.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), FinbellError> {
    let report = embedded::migrations::runner()
        .run(conn)
        .map_err(|e| FinbellError::Storage { source: Box::new(e) })?;
    for migration in report.applied_migrations() {
        tracing::debug!(%migration, "applied schema migration");
    }
    Ok(())
}
