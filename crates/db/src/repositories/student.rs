//! Student repository for database operations.

use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set, Unchanged},
    DatabaseConnection, EntityTrait, QueryOrder,
};

use super::db_error;
use crate::entities::students;
use escola_core::RepositoryError;
use escola_core::profile::{ProfileRepository, Student, StudentFields};

/// Student repository implementation.
#[derive(Debug, Clone)]
pub struct StudentRepository {
    db: DatabaseConnection,
}

impl StudentRepository {
    /// Create a new student repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ProfileRepository for StudentRepository {
    type Record = Student;
    type Fields = StudentFields;

    async fn find_all(&self) -> Result<Vec<Student>, RepositoryError> {
        let models = students::Entity::find()
            .order_by_asc(students::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Student>, RepositoryError> {
        let model = students::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(to_domain))
    }

    async fn save(
        &self,
        id: Option<i32>,
        fields: StudentFields,
        image_link: String,
    ) -> Result<Student, RepositoryError> {
        let active_model = students::ActiveModel {
            id: id.map_or(NotSet, Unchanged),
            name: Set(fields.name),
            email: Set(fields.email),
            age: Set(fields.age),
            image_link: Set(Some(image_link)),
        };

        let model = match id {
            Some(_) => active_model.update(&self.db).await,
            None => active_model.insert(&self.db).await,
        }
        .map_err(db_error)?;

        Ok(to_domain(model))
    }

    async fn remove(&self, id: i32) -> Result<bool, RepositoryError> {
        let result = students::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected > 0)
    }
}

fn to_domain(model: students::Model) -> Student {
    Student {
        id: model.id,
        name: model.name,
        email: model.email,
        age: model.age,
        image_link: model.image_link,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    fn model(id: i32, name: &str) -> students::Model {
        students::Model {
            id,
            name: name.to_string(),
            email: format!("{}@x.com", name.to_lowercase()),
            age: 20,
            image_link: Some(format!("memory://profiles/{id}_img.png")),
        }
    }

    #[tokio::test]
    async fn test_find_all_maps_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "Ana"), model(2, "Bia")]])
            .into_connection();
        let repo = StudentRepository::new(db);

        let students = repo.find_all().await.unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(students[0].name, "Ana");
        assert_eq!(students[1].email, "bia@x.com");
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<students::Model>::new()])
            .into_connection();
        let repo = StudentRepository::new(db);

        assert!(repo.find_by_id(9).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_returns_generated_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(5, "Ana")]])
            .into_connection();
        let repo = StudentRepository::new(db);

        let student = repo
            .save(
                None,
                StudentFields {
                    name: "Ana".to_string(),
                    email: "ana@x.com".to_string(),
                    age: 20,
                },
                "memory://profiles/5_img.png".to_string(),
            )
            .await
            .unwrap();

        assert_eq!(student.id, 5);
        assert_eq!(student.image_link.as_deref(), Some("memory://profiles/5_img.png"));
    }

    #[tokio::test]
    async fn test_remove_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = StudentRepository::new(db);

        assert!(repo.remove(1).await.unwrap());
        assert!(!repo.remove(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_database_failure_maps_to_repository_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let repo = StudentRepository::new(db);

        let err = repo.find_all().await.unwrap_err();
        assert!(matches!(err, RepositoryError::Database(ref m) if m.contains("connection reset")));
    }
}
