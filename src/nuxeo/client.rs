use super::models::{Batch, Document, Entries, NewDocument, Task, Workflow};
use crate::config::Credential;
use crate::constants::{API_PREFIX, PROPERTIES_HEADER};
use crate::errors::{Error, Result};
use crate::substitution::{BatchUploader, UploadResult};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// REST client authenticated as a single user
#[derive(Debug, Clone)]
pub struct NuxeoClient {
    http: Client,
    base_url: Url,
    username: String,
    password: String,
}

impl NuxeoClient {
    /// Creates a client for `server_url` using basic authentication
    ///
    /// # Arguments
    /// * `server_url` - Server root, e.g. `http://localhost:8080/nuxeo`
    /// * `credential` - Login of the acting user
    /// * `timeout` - Timeout applied to every request
    pub fn new(server_url: &str, credential: &Credential, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(server_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url,
            username: credential.username.clone(),
            password: credential.password.clone(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Fetches a document by path with all schemas
    pub async fn fetch_document(&self, path: &str) -> Result<Document> {
        let url = self.document_url(path)?;
        let req = self
            .request(Method::GET, url)
            .header(PROPERTIES_HEADER, "*");
        send_json(req).await
    }

    /// Creates `document` under `parent_path` and returns the stored document
    pub async fn create_document(&self, parent_path: &str, document: &NewDocument) -> Result<Document> {
        let url = self.document_url(parent_path)?;
        let req = self
            .request(Method::POST, url)
            .header(PROPERTIES_HEADER, "*")
            .json(document);
        send_json(req).await
    }

    pub async fn delete_document(&self, path: &str) -> Result<()> {
        let url = self.document_url(path)?;
        check_status(self.request(Method::DELETE, url).send().await?).await?;
        Ok(())
    }

    /// Starts the workflow model `model_name` on the document `doc_id`
    pub async fn start_workflow(&self, doc_id: &str, model_name: &str, variables: &Value) -> Result<Workflow> {
        let url = self.endpoint(&format!("id/{}/@workflow", doc_id))?;
        let body = json!({
            "entity-type": "workflow",
            "workflowModelName": model_name,
            "variables": variables,
        });
        send_json(self.request(Method::POST, url).json(&body)).await
    }

    /// Lists the workflows currently running on the document `doc_id`
    pub async fn fetch_workflows(&self, doc_id: &str) -> Result<Vec<Workflow>> {
        let url = self.endpoint(&format!("id/{}/@workflow", doc_id))?;
        let list: Entries<Workflow> = send_json(self.request(Method::GET, url)).await?;
        Ok(list.entries)
    }

    /// Lists the open tasks of a workflow instance
    pub async fn fetch_tasks(&self, workflow_id: &str) -> Result<Vec<Task>> {
        let url = self.endpoint(&format!("workflow/{}/task", workflow_id))?;
        let list: Entries<Task> = send_json(self.request(Method::GET, url)).await?;
        Ok(list.entries)
    }

    /// Completes `task` with `action`, submitting `variables` alongside
    pub async fn complete_task(&self, task: &Task, action: &str, variables: &Value) -> Result<Task> {
        let url = self.endpoint(&format!("task/{}/{}", task.id, action))?;
        let body = json!({
            "entity-type": "task",
            "id": task.id,
            "variables": variables,
        });
        send_json(self.request(Method::PUT, url).json(&body)).await
    }

    async fn create_batch(&self) -> Result<String> {
        let url = self.endpoint("upload/")?;
        let batch: Batch = send_json(self.request(Method::POST, url)).await?;
        Ok(batch.batch_id)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!("{} {} as {}", method, url, self.username);
        self.http
            .request(method, url)
            .basic_auth(&self.username, Some(&self.password))
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(&format!("{}{}", API_PREFIX, path))?)
    }

    fn document_url(&self, doc_path: &str) -> Result<Url> {
        self.endpoint(&format!("path/{}", doc_path.trim_start_matches('/')))
    }
}

#[async_trait]
impl BatchUploader for NuxeoClient {
    /// Uploads the file as index 0 of a freshly created batch
    async fn upload(
        &self,
        file: tokio::fs::File,
        file_name: &str,
        mime_type: &str,
        size: u64,
    ) -> Result<UploadResult> {
        let batch_id = self.create_batch().await?;
        let file_id = "0";
        let url = self.endpoint(&format!("upload/{}/{}", batch_id, file_id))?;
        let encoded_name: String = url::form_urlencoded::byte_serialize(file_name.as_bytes()).collect();

        let res = self
            .request(Method::POST, url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .header("X-File-Name", encoded_name)
            .header("X-File-Type", mime_type)
            .header("X-File-Size", size.to_string())
            .body(reqwest::Body::from(file))
            .send()
            .await?;
        check_status(res).await?;

        Ok(UploadResult::new(batch_id, file_id))
    }
}

async fn check_status(res: Response) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        Ok(res)
    } else {
        let body = res.text().await.unwrap_or_default();
        Err(Error::Api { status, body })
    }
}

async fn send_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T> {
    let res = check_status(req.send().await?).await?;
    Ok(res.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{basic_auth, body_partial_json, body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> NuxeoClient {
        let credential = Credential {
            username: "alice".into(),
            password: "secret".into(),
        };
        NuxeoClient::new(&server.uri(), &credential, Duration::from_secs(5)).unwrap()
    }

    fn document_json(uid: &str, path: &str) -> Value {
        json!({
            "entity-type": "document",
            "uid": uid,
            "path": path,
            "type": "File",
            "title": "contract",
            "state": "project",
            "properties": {"dc:title": "contract"}
        })
    }

    #[tokio::test]
    async fn fetch_document_sends_auth_and_schema_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/path/default-domain/ws/contract"))
            .and(basic_auth("alice", "secret"))
            .and(header("properties", "*"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(document_json("doc-1", "/default-domain/ws/contract")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let doc = client(&server)
            .fetch_document("/default-domain/ws/contract")
            .await
            .unwrap();
        assert_eq!(doc.uid, "doc-1");
        assert_eq!(doc.doc_type, "File");
        assert_eq!(doc.properties["dc:title"], json!("contract"));
    }

    #[tokio::test]
    async fn server_prefix_is_kept() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/nuxeo/api/v1/path/ws/contract"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let credential = Credential {
            username: "alice".into(),
            password: "secret".into(),
        };
        let client = NuxeoClient::new(
            &format!("{}/nuxeo", server.uri()),
            &credential,
            Duration::from_secs(5),
        )
        .unwrap();
        client.delete_document("/ws/contract").await.unwrap();
    }

    #[tokio::test]
    async fn error_status_becomes_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/path/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let err = client(&server).fetch_document("/missing").await.unwrap_err();
        match err {
            Error::Api { status, body } => {
                assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
                assert_eq!(body, "not found");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn create_document_posts_entity() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/path/ws"))
            .and(body_partial_json(json!({
                "entity-type": "document",
                "name": "contract",
                "type": "File",
                "properties": {"dc:creator": "alice"}
            })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(document_json("doc-1", "/ws/contract")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let new_doc = NewDocument::new("contract", "File", json!({"dc:creator": "alice"}));
        let doc = client(&server).create_document("/ws", &new_doc).await.unwrap();
        assert_eq!(doc.path, "/ws/contract");
    }

    #[tokio::test]
    async fn workflow_and_task_endpoints() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/id/doc-1/@workflow"))
            .and(body_partial_json(json!({"workflowModelName": "SerialDocumentReview"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "entity-type": "workflow",
                "id": "wf-1",
                "workflowModelName": "SerialDocumentReview",
                "state": "running"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/id/doc-1/@workflow"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "entity-type": "workflows",
                "entries": [{"id": "wf-1", "workflowModelName": "SerialDocumentReview"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/workflow/wf-1/task"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "entity-type": "tasks",
                "entries": [{"id": "task-1", "name": "wf.serialDocumentReview.Validate"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/task/task-1/validate"))
            .and(body_partial_json(json!({"id": "task-1", "variables": {"comment": "ok"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "task-1",
                "name": "wf.serialDocumentReview.Validate",
                "state": "ended"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let started = client
            .start_workflow("doc-1", "SerialDocumentReview", &json!({}))
            .await
            .unwrap();
        assert_eq!(started.id, "wf-1");

        let workflows = client.fetch_workflows("doc-1").await.unwrap();
        assert_eq!(workflows.len(), 1);
        let tasks = client.fetch_tasks(&workflows[0].id).await.unwrap();
        let done = client
            .complete_task(&tasks[0], "validate", &json!({"comment": "ok"}))
            .await
            .unwrap();
        assert_eq!(done.state.as_deref(), Some("ended"));
    }

    #[tokio::test]
    async fn upload_creates_batch_and_streams_file() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/upload/"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"batchId": "batch-42"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/upload/batch-42/0"))
            .and(header("X-File-Name", "my+report.txt"))
            .and(header("X-File-Type", "text/plain"))
            .and(header("X-File-Size", "11"))
            .and(body_string("hello world"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "uploaded": "true",
                "fileIdx": "0"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("my report.txt");
        std::fs::write(&file_path, "hello world").unwrap();
        let file = tokio::fs::File::open(&file_path).await.unwrap();

        let result = client(&server)
            .upload(file, "my report.txt", "text/plain", 11)
            .await
            .unwrap();
        assert_eq!(result, UploadResult::new("batch-42", "0"));
    }
}
