//! `SQLite` implementation of [`WidgetRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use widgethub_app::ports::WidgetRepository;
use widgethub_domain::error::{NotFoundError, VersionConflictError, WidgetHubError};
use widgethub_domain::id::WidgetId;
use widgethub_domain::version::Version;
use widgethub_domain::widget::{Widget, WidgetChanges};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Widget`].
struct Wrapper(Widget);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Widget> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let description: String = row.try_get("description")?;
        let version: i64 = row.try_get("version")?;

        let id = WidgetId::new(id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let version = Version::new(version).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Widget {
            id: Some(id),
            name,
            description,
            version,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO widgets (name, description, version)
    VALUES (?, ?, ?)
    RETURNING id, name, description, version
";

const SELECT_BY_ID: &str = "SELECT id, name, description, version FROM widgets WHERE id = ?";
const SELECT_ALL: &str = "SELECT id, name, description, version FROM widgets ORDER BY id";
const SELECT_VERSION: &str = "SELECT version FROM widgets WHERE id = ?";

// The version comparison and the increment happen in one statement, so two
// writers holding the same version cannot both succeed.
const UPDATE_IF_VERSION: &str = r"
    UPDATE widgets
    SET name = ?, description = ?, version = version + 1
    WHERE id = ? AND version = ?
    RETURNING id, name, description, version
";

const DELETE_BY_ID: &str = "DELETE FROM widgets WHERE id = ?";

/// `SQLite`-backed widget repository.
pub struct SqliteWidgetRepository {
    pool: SqlitePool,
}

impl SqliteWidgetRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl WidgetRepository for SqliteWidgetRepository {
    fn create(
        &self,
        widget: Widget,
    ) -> impl Future<Output = Result<Widget, WidgetHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Wrapper = sqlx::query_as(INSERT)
                .bind(&widget.name)
                .bind(&widget.description)
                .bind(Version::INITIAL.get())
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.0)
        }
    }

    fn get_by_id(
        &self,
        id: WidgetId,
    ) -> impl Future<Output = Result<Option<Widget>, WidgetHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.get())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Widget>, WidgetHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        id: WidgetId,
        expected: Version,
        changes: WidgetChanges,
    ) -> impl Future<Output = Result<Widget, WidgetHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(UPDATE_IF_VERSION)
                .bind(&changes.name)
                .bind(&changes.description)
                .bind(id.get())
                .bind(expected.get())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            if let Some(updated) = Wrapper::maybe(row) {
                return Ok(updated);
            }

            // Nothing matched: tell a missing row apart from a stale version.
            let actual: Option<i64> = sqlx::query_scalar(SELECT_VERSION)
                .bind(id.get())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            match actual {
                None => Err(NotFoundError {
                    entity: "Widget",
                    id: id.to_string(),
                }
                .into()),
                Some(actual) => Err(VersionConflictError {
                    id,
                    expected,
                    actual: Version::new(actual)?,
                }
                .into()),
            }
        }
    }

    fn delete(&self, id: WidgetId) -> impl Future<Output = Result<(), WidgetHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            tracing::debug!(%id, rows = result.rows_affected(), "delete executed");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;

    async fn setup() -> SqliteWidgetRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteWidgetRepository::new(db.pool().clone())
    }

    fn test_widget(name: &str) -> Widget {
        Widget::builder()
            .name(name)
            .description("Description")
            .build()
            .unwrap()
    }

    fn changes(name: &str, description: &str) -> WidgetChanges {
        WidgetChanges {
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    fn version(value: i64) -> Version {
        Version::new(value).unwrap()
    }

    #[tokio::test]
    async fn should_assign_first_id_and_initial_version_on_create() {
        let repo = setup().await;

        let created = repo.create(test_widget("Widget Name")).await.unwrap();

        assert_eq!(created.id, Some(WidgetId::new(1).unwrap()));
        assert_eq!(created.name, "Widget Name");
        assert_eq!(created.description, "Description");
        assert_eq!(created.version, Version::INITIAL);
    }

    #[tokio::test]
    async fn should_ignore_caller_supplied_id_and_version_on_create() {
        let repo = setup().await;
        let widget = Widget::builder()
            .id(WidgetId::new(50).unwrap())
            .name("Widget")
            .description("Description")
            .version(version(9))
            .build()
            .unwrap();

        let created = repo.create(widget).await.unwrap();

        assert_eq!(created.id, Some(WidgetId::new(1).unwrap()));
        assert_eq!(created.version, Version::INITIAL);
    }

    #[tokio::test]
    async fn should_create_and_retrieve_widget() {
        let repo = setup().await;
        let created = repo.create(test_widget("Gear")).await.unwrap();

        let fetched = repo.get_by_id(created.id.unwrap()).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn should_return_none_when_widget_not_found() {
        let repo = setup().await;
        let result = repo.get_by_id(WidgetId::new(7).unwrap()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_list_all_widgets_in_id_order() {
        let repo = setup().await;
        repo.create(test_widget("First")).await.unwrap();
        repo.create(test_widget("Second")).await.unwrap();

        let all = repo.get_all().await.unwrap();
        let names: Vec<&str> = all.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn should_update_and_bump_version_when_expected_matches() {
        let repo = setup().await;
        let id = repo.create(test_widget("Widget")).await.unwrap().id.unwrap();

        let updated = repo
            .update(
                id,
                Version::INITIAL,
                changes("Widget update", "This is my widget update"),
            )
            .await
            .unwrap();

        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.version, version(2));
        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn should_report_conflict_and_leave_row_when_expected_is_stale() {
        let repo = setup().await;
        let id = repo.create(test_widget("Widget")).await.unwrap().id.unwrap();
        let current = repo
            .update(id, Version::INITIAL, changes("Second", "Bump"))
            .await
            .unwrap();

        let result = repo
            .update(id, Version::INITIAL, changes("Lost", "Update"))
            .await;

        match result {
            Err(WidgetHubError::Conflict(err)) => {
                assert_eq!(err.id, id);
                assert_eq!(err.expected, Version::INITIAL);
                assert_eq!(err.actual, version(2));
            }
            other => panic!("expected conflict, got {other:?}"),
        }
        assert_eq!(repo.get_by_id(id).await.unwrap(), Some(current));
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_missing_widget() {
        let repo = setup().await;
        let result = repo
            .update(
                WidgetId::new(3).unwrap(),
                Version::INITIAL,
                changes("Widget", "Description"),
            )
            .await;
        assert!(matches!(result, Err(WidgetHubError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_let_only_one_of_two_concurrent_updates_win() {
        let repo = setup().await;
        let id = repo.create(test_widget("Widget")).await.unwrap().id.unwrap();

        let (a, b) = tokio::join!(
            repo.update(id, Version::INITIAL, changes("From A", "a")),
            repo.update(id, Version::INITIAL, changes("From B", "b")),
        );

        let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
        assert_eq!(successes, 1);
        assert!(
            matches!(a, Err(WidgetHubError::Conflict(_)))
                || matches!(b, Err(WidgetHubError::Conflict(_)))
        );
        let stored = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.version, version(2));
    }

    #[tokio::test]
    async fn should_delete_widget_when_exists() {
        let repo = setup().await;
        let id = repo.create(test_widget("Widget")).await.unwrap().id.unwrap();

        repo.delete(id).await.unwrap();

        assert!(repo.get_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_ignore_delete_of_missing_widget() {
        let repo = setup().await;
        let kept = repo.create(test_widget("Kept")).await.unwrap();

        repo.delete(WidgetId::new(99).unwrap()).await.unwrap();

        assert_eq!(repo.get_all().await.unwrap(), vec![kept]);
    }

    #[tokio::test]
    async fn should_not_reuse_ids_after_delete() {
        let repo = setup().await;
        let first = repo.create(test_widget("First")).await.unwrap().id.unwrap();
        repo.delete(first).await.unwrap();

        let second = repo.create(test_widget("Second")).await.unwrap().id.unwrap();
        assert!(second > first);
    }
}
