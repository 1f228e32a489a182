//! Professor repository for database operations.

use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set, Unchanged},
    DatabaseConnection, EntityTrait, QueryOrder,
};

use super::db_error;
use crate::entities::professors;
use escola_core::RepositoryError;
use escola_core::profile::{Professor, ProfessorFields, ProfileRepository};

/// Professor repository implementation.
#[derive(Debug, Clone)]
pub struct ProfessorRepository {
    db: DatabaseConnection,
}

impl ProfessorRepository {
    /// Create a new professor repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ProfileRepository for ProfessorRepository {
    type Record = Professor;
    type Fields = ProfessorFields;

    async fn find_all(&self) -> Result<Vec<Professor>, RepositoryError> {
        let models = professors::Entity::find()
            .order_by_asc(professors::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Professor>, RepositoryError> {
        let model = professors::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(to_domain))
    }

    async fn save(
        &self,
        id: Option<i32>,
        fields: ProfessorFields,
        image_link: String,
    ) -> Result<Professor, RepositoryError> {
        let active_model = professors::ActiveModel {
            id: id.map_or(NotSet, Unchanged),
            name: Set(fields.name),
            role: Set(fields.role),
            email: Set(fields.email),
            password_hash: Set(fields.password_hash),
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
        let result = professors::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected > 0)
    }
}

fn to_domain(model: professors::Model) -> Professor {
    Professor {
        id: model.id,
        name: model.name,
        role: model.role,
        email: model.email,
        password_hash: model.password_hash,
        image_link: model.image_link,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_update_returns_stored_row() {
        let stored = professors::Model {
            id: 3,
            name: "Carlos".to_string(),
            role: "Coordenador".to_string(),
            email: "c@x.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            image_link: Some("memory://profiles/2_new.png".to_string()),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored.clone()]])
            .into_connection();
        let repo = ProfessorRepository::new(db);

        let professor = repo
            .save(
                Some(3),
                ProfessorFields {
                    name: stored.name.clone(),
                    role: stored.role.clone(),
                    email: stored.email.clone(),
                    password_hash: stored.password_hash.clone(),
                },
                "memory://profiles/2_new.png".to_string(),
            )
            .await
            .unwrap();

        assert_eq!(professor.id, 3);
        assert_eq!(professor.role, "Coordenador");
        assert_eq!(professor.password_hash, stored.password_hash);
    }
}
