//! Router harness for route tests.
//!
//! The relational store is a `SeaORM` mock, the blob store is OpenDAL's
//! in-memory service, and the document store client is never contacted.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, header::CONTENT_TYPE},
    response::Response,
};
use bytes::Bytes;
use http_body_util::BodyExt;
use sea_orm::{DatabaseConnection, MockDatabase};
use serde_json::Value;
use tower::ServiceExt;

use crate::{AppState, create_router};
use escola_core::storage::{BlobStore, StorageConfig, StorageProvider};

pub(crate) const BASE_URL: &str = "memory://profiles";
const BOUNDARY: &str = "escola-test-boundary";

/// One multipart part.
pub(crate) enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
}

/// PNG upload in the `LINK_IMAGE` part.
pub(crate) fn png(file_name: &str) -> Part<'_> {
    Part::File {
        name: "LINK_IMAGE",
        file_name,
        content_type: "image/png",
        data: b"\x89PNG\r\n\x1a\n",
    }
}

pub(crate) fn memory_store() -> Arc<BlobStore> {
    let config = StorageConfig::new(StorageProvider::memory(BASE_URL));
    Arc::new(BlobStore::from_config(config).expect("memory store"))
}

pub(crate) struct TestApp {
    router: Router,
    db: DatabaseConnection,
    pub storage: Arc<BlobStore>,
}

impl TestApp {
    pub async fn new(mock: MockDatabase) -> Self {
        Self::with_storage(mock, memory_store()).await
    }

    pub async fn with_storage(mock: MockDatabase, storage: Arc<BlobStore>) -> Self {
        let db = mock.into_connection();
        let client = mongodb::Client::with_uri_str("mongodb://127.0.0.1:27017")
            .await
            .expect("document store client");
        let state = AppState {
            db: Arc::new(db.clone()),
            documents: client.database("escola_test"),
            storage: storage.clone(),
        };

        Self {
            router: create_router(state, 50 * 1024 * 1024),
            db,
            storage,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str) -> Response {
        self.send(Request::delete(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn multipart(&self, method: Method, uri: &str, parts: &[Part<'_>]) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        self.send(request).await
    }

    pub async fn json(&self, method: Method, uri: &str, body: &Value) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Every statement the mock received, rendered with its bound values.
    pub fn sql_log(&self) -> String {
        format!("{:?}", self.db.clone().into_transaction_log())
    }

    /// Image URL bound into the first statement that carried one.
    pub fn written_link(&self) -> Option<String> {
        let log = self.sql_log();
        let start = log.find(BASE_URL)?;
        let rest = &log[start..];
        let end = rest.find('"')?;
        Some(rest[..end].to_string())
    }
}

fn multipart_body(parts: &[Part<'_>]) -> Bytes {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File {
                name,
                file_name,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    Bytes::from(body)
}

pub(crate) async fn json_body(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("JSON body")
}
