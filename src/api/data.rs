//! Data access facade: GraphQL operations issued through the fetch wrapper.

use log::debug;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::client::truncate_for_log;
use super::error::DataError;
use super::fetch::{FetchWrapper, RequestOptions};
use super::queries::{
    COMPANIES_LIST_QUERY, CREATE_COMPANY_MUTATION, TASKS_QUERY, USERS_SELECT_QUERY,
};
use super::types::{
    CompaniesData, CreateCompanyData, GraphQLRequest, GraphQLResponse, Paging, TasksData,
    UsersData,
};
use crate::models::{Company, NewCompany, Page, Task, UserSummary};

/// A raw GraphQL operation.
#[derive(Debug, Clone)]
pub struct CustomRequest {
    /// Endpoint override; the provider's API URL when `None`.
    pub url: Option<String>,
    pub headers: HeaderMap,
    pub raw_query: String,
    pub variables: Value,
}

impl CustomRequest {
    pub fn new(raw_query: impl Into<String>) -> Self {
        Self {
            url: None,
            headers: HeaderMap::new(),
            raw_query: raw_query.into(),
            variables: Value::Null,
        }
    }

    pub fn with_variables(mut self, variables: Value) -> Self {
        self.variables = variables;
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }
}

pub struct DataProvider {
    api_url: String,
    fetch: FetchWrapper,
}

impl DataProvider {
    pub fn new(api_url: impl Into<String>, fetch: FetchWrapper) -> Self {
        Self {
            api_url: api_url.into(),
            fetch,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Send a GraphQL document and decode its `data` member.
    pub fn custom<T: DeserializeOwned>(&self, request: CustomRequest) -> Result<T, DataError> {
        let url = request.url.as_deref().unwrap_or(&self.api_url);
        let body = GraphQLRequest::new(&request.raw_query, &request.variables);
        let options = RequestOptions::post_json(&body)
            .map_err(|e| DataError::Decode(format!("encode request: {}", e)))?
            .with_headers(request.headers);

        let response = self.fetch.fetch(url, options)?;
        debug!("  graphql response: HTTP {}", response.status);

        let envelope: GraphQLResponse<T> = response.json().map_err(|e| {
            debug!("  deserialization error: {}", e);
            debug!("  response body: {}", truncate_for_log(&response.text(), 500));
            DataError::Decode(e.to_string())
        })?;

        envelope
            .data
            .ok_or_else(|| DataError::Decode("response contained no data".to_string()))
    }

    // ========================================================================
    // Company Methods
    // ========================================================================

    pub fn list_companies(&self, paging: Paging) -> Result<Page<Company>, DataError> {
        let request =
            CustomRequest::new(COMPANIES_LIST_QUERY).with_variables(paging.list_variables());
        let data: CompaniesData = self.custom(request)?;
        Ok(data.companies)
    }

    pub fn create_company(&self, company: &NewCompany) -> Result<Company, DataError> {
        let request = CustomRequest::new(CREATE_COMPANY_MUTATION)
            .with_variables(json!({ "input": { "company": company } }));
        let data: CreateCompanyData = self.custom(request)?;
        Ok(data.create_one_company)
    }

    // ========================================================================
    // Task Methods
    // ========================================================================

    pub fn list_tasks(&self, paging: Paging) -> Result<Page<Task>, DataError> {
        let request = CustomRequest::new(TASKS_QUERY).with_variables(paging.list_variables());
        let data: TasksData = self.custom(request)?;
        Ok(data.tasks)
    }

    // ========================================================================
    // User Methods
    // ========================================================================

    /// Users projected for select lists (id, name, avatar)
    pub fn list_users(&self, paging: Paging) -> Result<Page<UserSummary>, DataError> {
        let request =
            CustomRequest::new(USERS_SELECT_QUERY).with_variables(paging.list_variables());
        let data: UsersData = self.custom(request)?;
        Ok(data.users)
    }
}
