//! JSON envelope for handing an assembled request to a transport.

use serde::Serialize;

use crate::error::{QueryError, QueryResult};

/// The body of a GraphQL-over-HTTP request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlPayload {
    /// The assembled request string.
    pub query: String,
    /// Operation to run when the document holds several.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    /// Variables referenced by the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}

impl GraphQlPayload {
    /// Wrap a request string.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            operation_name: None,
            variables: None,
        }
    }

    /// Set the operation name.
    pub fn operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// Set the variables.
    pub fn variables(mut self, variables: serde_json::Value) -> Self {
        self.variables = Some(variables);
        self
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> QueryResult<String> {
        serde_json::to_string(self)
            .map_err(|e| QueryError::internal(format!("failed to encode payload: {}", e)).with_source(e))
    }
}
