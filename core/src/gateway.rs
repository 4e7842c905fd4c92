//! The persistence boundary: CRUD intents in, remote results out.
//!
//! # Design
//! `RemoteTodoGateway` is the seam the store depends on. `HttpGateway`
//! composes the sans-IO `TodoCodec` with an `HttpTransport`; every call is
//! exactly one request/response pair with no retry and no retained state.

use async_trait::async_trait;
use tracing::debug;

use crate::codec::TodoCodec;
use crate::config::ClientConfig;
use crate::error::TodoError;
use crate::http::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::types::{Draft, Todo, TodoId, TodoPatch};

#[async_trait]
pub trait RemoteTodoGateway: Send + Sync {
    /// Full collection, in the order the service returns it.
    async fn list(&self) -> Result<Vec<Todo>, TodoError>;

    async fn get(&self, id: &TodoId) -> Result<Todo, TodoError>;

    /// The service assigns `id` and `created_at`; `completed` starts false.
    async fn create(&self, draft: &Draft) -> Result<Todo, TodoError>;

    /// Returns the full entity after the patch is applied.
    async fn update(&self, id: &TodoId, patch: &TodoPatch) -> Result<Todo, TodoError>;

    /// `NotFound` when the entity is already gone.
    async fn remove(&self, id: &TodoId) -> Result<(), TodoError>;
}

#[derive(Debug, Clone)]
pub struct HttpGateway<T> {
    codec: TodoCodec,
    transport: T,
}

impl HttpGateway<ReqwestTransport> {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(TodoCodec::new(&config.base_url), ReqwestTransport::new())
    }
}

impl<T: HttpTransport> HttpGateway<T> {
    pub fn new(codec: TodoCodec, transport: T) -> Self {
        Self { codec, transport }
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TodoError> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");
        self.transport.execute(request).await
    }
}

#[async_trait]
impl<T: HttpTransport> RemoteTodoGateway for HttpGateway<T> {
    async fn list(&self) -> Result<Vec<Todo>, TodoError> {
        let request = self.codec.build_list();
        let response = self.send(request).await?;
        self.codec.parse_list(response)
    }

    async fn get(&self, id: &TodoId) -> Result<Todo, TodoError> {
        let request = self.codec.build_get(id)?;
        let response = self.send(request).await?;
        self.codec.parse_get(response, id)
    }

    async fn create(&self, draft: &Draft) -> Result<Todo, TodoError> {
        let request = self.codec.build_create(draft)?;
        let response = self.send(request).await?;
        self.codec.parse_create(response)
    }

    async fn update(&self, id: &TodoId, patch: &TodoPatch) -> Result<Todo, TodoError> {
        let request = self.codec.build_update(id, patch)?;
        let response = self.send(request).await?;
        self.codec.parse_update(response, id)
    }

    async fn remove(&self, id: &TodoId) -> Result<(), TodoError> {
        let request = self.codec.build_delete(id)?;
        let response = self.send(request).await?;
        self.codec.parse_delete(response, id)
    }
}
