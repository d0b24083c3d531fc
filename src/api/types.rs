use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::models::{Company, Identity, Page, Task, UserSummary};

// ============================================================================
// Envelope
// ============================================================================

/// Request body for every GraphQL operation
#[derive(Debug, Serialize)]
pub struct GraphQLRequest<'a> {
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<&'a Value>,
}

impl<'a> GraphQLRequest<'a> {
    /// Null variables are left out of the body.
    pub fn new(query: &'a str, variables: &'a Value) -> Self {
        Self {
            query,
            variables: Some(variables).filter(|v| !v.is_null()),
        }
    }
}

/// Top-level GraphQL response. Errors are handled by the fetch wrapper.
#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
}

// ============================================================================
// Paging
// ============================================================================

/// Offset paging variables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Paging {
    pub limit: u32,
    pub offset: u32,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            limit: 20,
            offset: 0,
        }
    }
}

impl Paging {
    /// `{filter, sorting, paging}` variables for a list query, newest first.
    pub fn list_variables(&self) -> Value {
        json!({
            "filter": {},
            "sorting": [{"field": "createdAt", "direction": "DESC"}],
            "paging": {"limit": self.limit, "offset": self.offset},
        })
    }
}

// ============================================================================
// Operation results
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub login: LoginPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
pub struct MeData {
    pub me: Identity,
}

/// Probe result: only proves that `me` resolved.
#[derive(Debug, Deserialize)]
pub struct MeProbeData {
    #[allow(dead_code)]
    pub me: Value,
}

#[derive(Debug, Deserialize)]
pub struct CompaniesData {
    pub companies: Page<Company>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyData {
    pub create_one_company: Company,
}

#[derive(Debug, Deserialize)]
pub struct UsersData {
    pub users: Page<UserSummary>,
}

#[derive(Debug, Deserialize)]
pub struct TasksData {
    pub tasks: Page<Task>,
}
