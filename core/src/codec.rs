//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoCodec` holds only the API root (`{base_url}/api`) and carries no
//! mutable state between calls. Each CRUD operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`, so the protocol can be checked without
//! a network. Status codes map onto the error taxonomy here and nowhere
//! else.

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::TodoError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Draft, Todo, TodoId, TodoPatch};

/// Path prefix every route of the service lives under.
pub const API_PREFIX: &str = "/api";

#[derive(Debug, Clone)]
pub struct TodoCodec {
    api_url: String,
}

impl TodoCodec {
    pub fn new(base_url: &str) -> Self {
        Self {
            api_url: format!("{}{API_PREFIX}", base_url.trim_end_matches('/')),
        }
    }

    pub fn build_list(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.collection_url(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get(&self, id: &TodoId) -> Result<HttpRequest, TodoError> {
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: self.item_url(id)?,
            headers: Vec::new(),
            body: None,
        })
    }

    pub fn build_create(&self, draft: &Draft) -> Result<HttpRequest, TodoError> {
        json_request(HttpMethod::Post, self.collection_url(), draft)
    }

    pub fn build_update(&self, id: &TodoId, patch: &TodoPatch) -> Result<HttpRequest, TodoError> {
        json_request(HttpMethod::Put, self.item_url(id)?, patch)
    }

    pub fn build_delete(&self, id: &TodoId) -> Result<HttpRequest, TodoError> {
        Ok(HttpRequest {
            method: HttpMethod::Delete,
            url: self.item_url(id)?,
            headers: Vec::new(),
            body: None,
        })
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Todo>, TodoError> {
        check_status(&response, &[200], None)?;
        decode(&response)
    }

    pub fn parse_get(&self, response: HttpResponse, id: &TodoId) -> Result<Todo, TodoError> {
        check_status(&response, &[200], Some(id))?;
        reject_error_body(&response, id)?;
        decode(&response)
    }

    /// Create is answered with 200 or 201 depending on the deployment.
    pub fn parse_create(&self, response: HttpResponse) -> Result<Todo, TodoError> {
        check_status(&response, &[200, 201], None)?;
        decode(&response)
    }

    pub fn parse_update(&self, response: HttpResponse, id: &TodoId) -> Result<Todo, TodoError> {
        check_status(&response, &[200], Some(id))?;
        reject_error_body(&response, id)?;
        decode(&response)
    }

    /// A 200 body is only inspected for an `error` report; any other
    /// content is ignored.
    pub fn parse_delete(&self, response: HttpResponse, id: &TodoId) -> Result<(), TodoError> {
        check_status(&response, &[200, 204], Some(id))?;
        reject_error_body(&response, id)
    }

    fn collection_url(&self) -> String {
        format!("{}/todos", self.api_url)
    }

    /// The id is pushed as a single path segment, so `/`, `?` and the
    /// like are percent-encoded rather than changing the route.
    fn item_url(&self, id: &TodoId) -> Result<String, TodoError> {
        let mut url = Url::parse(&self.collection_url())
            .map_err(|e| TodoError::Transport(format!("invalid base URL {}: {e}", self.api_url)))?;
        url.path_segments_mut()
            .map_err(|()| TodoError::Transport(format!("base URL {} cannot have a path", self.api_url)))?
            .push(id.as_str());
        Ok(url.into())
    }
}

fn json_request<T: Serialize>(
    method: HttpMethod,
    url: String,
    payload: &T,
) -> Result<HttpRequest, TodoError> {
    let body = serde_json::to_string(payload)
        .map_err(|e| TodoError::Validation(format!("could not encode request: {e}")))?;
    Ok(HttpRequest {
        method,
        url,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

/// A success status with a body that does not decode is a protocol
/// violation by the service, hence `Server`.
fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, TodoError> {
    serde_json::from_str(&response.body).map_err(|e| TodoError::Server {
        status: response.status,
        message: format!("malformed response body: {e}"),
    })
}

/// Map non-success status codes to the appropriate `TodoError` variant.
fn check_status(
    response: &HttpResponse,
    expected: &[u16],
    id: Option<&TodoId>,
) -> Result<(), TodoError> {
    if expected.contains(&response.status) {
        return Ok(());
    }
    match response.status {
        404 => Err(TodoError::NotFound { id: id.cloned() }),
        400 | 422 => Err(TodoError::Validation(error_message(response))),
        status => Err(TodoError::Server {
            status,
            message: error_message(response),
        }),
    }
}

/// Some deployments answer an unknown id with 200 and `{"error": ...}`
/// instead of 404.
fn reject_error_body(response: &HttpResponse, id: &TodoId) -> Result<(), TodoError> {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(&response.body) {
        if map.contains_key("error") {
            return Err(TodoError::not_found(id));
        }
    }
    Ok(())
}

/// Prefer the service's `detail` string; fall back to the raw body.
fn error_message(response: &HttpResponse) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(&response.body) {
        if let Some(serde_json::Value::String(detail)) = map.get("detail") {
            return detail.clone();
        }
    }
    if response.body.trim().is_empty() {
        format!("HTTP {}", response.status)
    } else {
        response.body.clone()
    }
}
