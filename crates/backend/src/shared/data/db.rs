use std::path::Path;

use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, DbErr, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Схема хранилища. Рецепт ссылается на доктора и пациента,
/// удаление используемой записи запрещено внешним ключом.
const SCHEMA: [(&str, &str); 3] = [
    (
        "a001_doctor",
        r#"
        CREATE TABLE IF NOT EXISTS a001_doctor (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            patronymic TEXT NOT NULL,
            specialization TEXT NOT NULL,
            formula_count INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a002_patient",
        r#"
        CREATE TABLE IF NOT EXISTS a002_patient (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            patronymic TEXT NOT NULL,
            phone_number TEXT NOT NULL
        );
        "#,
    ),
    (
        "a003_formula",
        r#"
        CREATE TABLE IF NOT EXISTS a003_formula (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            description TEXT NOT NULL,
            priority TEXT NOT NULL,
            doctor_id INTEGER NOT NULL,
            patient_id INTEGER,
            creation_date TEXT NOT NULL,
            validity_date TEXT NOT NULL,
            FOREIGN KEY (doctor_id) REFERENCES a001_doctor(id) ON DELETE RESTRICT,
            FOREIGN KEY (patient_id) REFERENCES a002_patient(id) ON DELETE RESTRICT
        );
        "#,
    ),
];

/// URL подключения к SQLite-файлу; файл создаётся при первом открытии
pub fn sqlite_url(db_file: &Path) -> String {
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = db_file.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    format!("sqlite://{}{}?mode=rwc", prefix, normalized)
}

/// Открыть соединение и создать недостающие таблицы
pub async fn connect(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let conn = Database::connect(db_url).await?;
    ensure_schema(&conn).await?;
    Ok(conn)
}

pub async fn ensure_schema<C: ConnectionTrait>(conn: &C) -> Result<(), DbErr> {
    for (table, sql) in SCHEMA {
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
            .await?;
        tracing::debug!("Table {} is ready", table);
    }
    Ok(())
}

pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    let db_url = sqlite_url(&absolute_path);
    tracing::info!("Opening database {}", absolute_path.display());

    let conn = connect(&db_url).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

/// Временная база для тестов; файл удаляется вместе с каталогом
#[cfg(test)]
pub async fn open_test_database() -> (tempfile::TempDir, DatabaseConnection) {
    let dir = tempfile::tempdir().expect("temp dir");
    let url = sqlite_url(&dir.path().join("hospital.db"));
    let conn = connect(&url).await.expect("test database");
    (dir, conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_url_handles_windows_paths() {
        assert_eq!(
            sqlite_url(Path::new("/tmp/hospital.db")),
            "sqlite:///tmp/hospital.db?mode=rwc"
        );
        assert_eq!(
            sqlite_url(Path::new(r"C:\data\hospital.db")),
            "sqlite:///C:/data/hospital.db?mode=rwc"
        );
    }

    #[tokio::test]
    async fn schema_bootstrap_is_repeatable() {
        let (_dir, conn) = open_test_database().await;
        ensure_schema(&conn).await.unwrap();

        let tables = conn
            .query_all(Statement::from_string(
                DatabaseBackend::Sqlite,
                "SELECT name FROM sqlite_master WHERE type='table' AND name LIKE 'a00%' ORDER BY name"
                    .to_string(),
            ))
            .await
            .unwrap();
        let names: Vec<String> = tables
            .iter()
            .map(|row| row.try_get("", "name").unwrap())
            .collect();
        assert_eq!(names, vec!["a001_doctor", "a002_patient", "a003_formula"]);
    }
}
