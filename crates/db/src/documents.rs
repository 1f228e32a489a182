//! Comment storage in the MongoDB document store.

use bson::{Document, doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::{Client, Collection, Database, IndexModel, error::Error as MongoError};
use serde::{Deserialize, Serialize};
use tracing::info;

use escola_core::RepositoryError;
use escola_core::comment::{Comment, CommentFields, CommentRepository as CommentRepoTrait};
use escola_shared::DocumentStoreConfig;

/// Collection holding comments.
pub const COMMENTS_COLLECTION: &str = "comments";

/// Open the document store and verify it answers.
///
/// Also makes sure the per-student lookup index exists.
///
/// # Errors
///
/// Returns an error if the URI is invalid, the server does not answer a
/// ping, or the index cannot be created.
pub async fn connect(config: &DocumentStoreConfig) -> Result<Database, MongoError> {
    let client = Client::with_uri_str(&config.uri).await?;
    let database = client.database(&config.database);

    database.run_command(doc! { "ping": 1 }).await?;
    CommentRepository::new(&database).ensure_indexes().await?;

    info!(database = %config.database, "Connected to document store");
    Ok(database)
}

/// Comment as stored in the collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentDocument {
    /// Store-generated identifier.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Student the comment is about.
    pub id_aluno: i32,
    /// Comment text.
    pub comentario: String,
}

impl CommentDocument {
    fn into_domain(self) -> Option<Comment> {
        Some(Comment {
            id: self.id?.to_hex(),
            student_id: self.id_aluno,
            text: self.comentario,
        })
    }
}

/// Comment repository implementation.
#[derive(Debug, Clone)]
pub struct CommentRepository {
    collection: Collection<CommentDocument>,
}

impl CommentRepository {
    /// Create a new comment repository over `database`.
    #[must_use]
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(COMMENTS_COLLECTION),
        }
    }

    /// Create the `id_aluno` index used by per-student lookups.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the index.
    pub async fn ensure_indexes(&self) -> Result<(), MongoError> {
        let index = IndexModel::builder().keys(doc! { "id_aluno": 1 }).build();
        self.collection.create_index(index).await?;
        Ok(())
    }

    async fn find_many(&self, filter: Document) -> Result<Vec<Comment>, RepositoryError> {
        let documents: Vec<CommentDocument> = self
            .collection
            .find(filter)
            .await
            .map_err(mongo_error)?
            .try_collect()
            .await
            .map_err(mongo_error)?;

        Ok(documents
            .into_iter()
            .filter_map(CommentDocument::into_domain)
            .collect())
    }
}

impl CommentRepoTrait for CommentRepository {
    async fn find_all(&self) -> Result<Vec<Comment>, RepositoryError> {
        self.find_many(doc! {}).await
    }

    async fn find_by_student(&self, student_id: i32) -> Result<Vec<Comment>, RepositoryError> {
        self.find_many(doc! { "id_aluno": student_id }).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Comment>, RepositoryError> {
        let oid = parse_object_id(id)?;
        let document = self
            .collection
            .find_one(doc! { "_id": oid })
            .await
            .map_err(mongo_error)?;

        Ok(document.and_then(CommentDocument::into_domain))
    }

    async fn save(
        &self,
        id: Option<&str>,
        fields: CommentFields,
    ) -> Result<Comment, RepositoryError> {
        let mut document = CommentDocument {
            id: id.map(parse_object_id).transpose()?,
            id_aluno: fields.student_id,
            comentario: fields.text,
        };

        match document.id {
            Some(oid) => {
                self.collection
                    .replace_one(doc! { "_id": oid }, &document)
                    .await
                    .map_err(mongo_error)?;
            }
            None => {
                let result = self
                    .collection
                    .insert_one(&document)
                    .await
                    .map_err(mongo_error)?;
                let oid = result.inserted_id.as_object_id().ok_or_else(|| {
                    RepositoryError::database("inserted comment has no ObjectId")
                })?;
                document.id = Some(oid);
            }
        }

        document
            .into_domain()
            .ok_or_else(|| RepositoryError::database("saved comment has no identifier"))
    }

    async fn remove(&self, id: &str) -> Result<bool, RepositoryError> {
        let oid = parse_object_id(id)?;
        let result = self
            .collection
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(mongo_error)?;

        Ok(result.deleted_count > 0)
    }
}

fn parse_object_id(id: &str) -> Result<ObjectId, RepositoryError> {
    ObjectId::parse_str(id).map_err(|_| RepositoryError::InvalidId(id.to_string()))
}

fn mongo_error(err: MongoError) -> RepositoryError {
    RepositoryError::database(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("42")]
    #[case("not-an-object-id")]
    #[case("0123456789abcdef0123456z")]
    fn test_parse_object_id_rejects(#[case] id: &str) {
        assert!(matches!(
            parse_object_id(id),
            Err(RepositoryError::InvalidId(ref bad)) if bad == id
        ));
    }

    #[test]
    fn test_parse_object_id_accepts_hex() {
        let oid = parse_object_id("65f1a2b3c4d5e6f708192a3b").unwrap();
        assert_eq!(oid.to_hex(), "65f1a2b3c4d5e6f708192a3b");
    }

    #[test]
    fn test_document_wire_shape() {
        let oid = ObjectId::new();
        let document = CommentDocument {
            id: Some(oid),
            id_aluno: 7,
            comentario: "Participativo".to_string(),
        };

        let raw = bson::to_document(&document).unwrap();
        assert_eq!(raw.get_object_id("_id").unwrap(), oid);
        assert_eq!(raw.get_i32("id_aluno").unwrap(), 7);
        assert_eq!(raw.get_str("comentario").unwrap(), "Participativo");

        let fresh = CommentDocument {
            id: None,
            ..document
        };
        assert!(!bson::to_document(&fresh).unwrap().contains_key("_id"));
    }

    #[test]
    fn test_into_domain() {
        let oid = ObjectId::new();
        let comment = CommentDocument {
            id: Some(oid),
            id_aluno: 7,
            comentario: "Participativo".to_string(),
        }
        .into_domain()
        .unwrap();

        assert_eq!(comment.id, oid.to_hex());
        assert_eq!(comment.student_id, 7);
        assert_eq!(comment.text, "Participativo");
    }
}
