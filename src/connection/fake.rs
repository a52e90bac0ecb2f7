use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{CliConnection, Organization, Space};
use crate::error::ConnectionError;

/// A host connection with fixed answers, for tests.
///
/// Defaults to an empty session: no endpoint, logged out, no target.
/// Queries listed via [`fail_on`](Self::fail_on) return
/// [`ConnectionError::Unavailable`]. Every query made is recorded in order.
#[derive(Debug, Default)]
pub struct FakeCliConnection {
    has_api_endpoint: bool,
    api_endpoint: String,
    is_logged_in: bool,
    username: String,
    has_organization: bool,
    organization: Organization,
    has_space: bool,
    space: Space,
    failing: HashSet<&'static str>,
    calls: Mutex<Vec<&'static str>>,
}

impl FakeCliConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Endpoint set, logged in as `username`, nothing targeted.
    pub fn logged_in(endpoint: &str, username: &str) -> Self {
        Self::new()
            .api_endpoint_returns(endpoint)
            .is_logged_in_returns(true)
            .username_returns(username)
    }

    pub fn has_api_endpoint_returns(mut self, value: bool) -> Self {
        self.has_api_endpoint = value;
        self
    }

    /// Sets the endpoint and marks it as present.
    pub fn api_endpoint_returns(mut self, endpoint: &str) -> Self {
        self.has_api_endpoint = true;
        self.api_endpoint = endpoint.to_string();
        self
    }

    pub fn is_logged_in_returns(mut self, value: bool) -> Self {
        self.is_logged_in = value;
        self
    }

    pub fn username_returns(mut self, username: &str) -> Self {
        self.username = username.to_string();
        self
    }

    pub fn has_organization_returns(mut self, value: bool) -> Self {
        self.has_organization = value;
        self
    }

    pub fn current_organization_returns(mut self, org: Organization) -> Self {
        self.organization = org;
        self
    }

    pub fn has_space_returns(mut self, value: bool) -> Self {
        self.has_space = value;
        self
    }

    pub fn current_space_returns(mut self, space: Space) -> Self {
        self.space = space;
        self
    }

    /// Target `org` / `space` by name.
    pub fn targeting(self, org: &str, space: &str) -> Self {
        self.has_organization_returns(true)
            .current_organization_returns(Organization::named(org))
            .has_space_returns(true)
            .current_space_returns(Space::named(space))
    }

    /// Make the named query fail, e.g. `"IsLoggedIn"`.
    pub fn fail_on(mut self, query: &'static str) -> Self {
        self.failing.insert(query);
        self
    }

    /// Queries made so far, in call order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.call_log().clone()
    }

    fn call_log(&self) -> MutexGuard<'_, Vec<&'static str>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn answer<T: Clone>(&self, query: &'static str, value: &T) -> Result<T, ConnectionError> {
        self.call_log().push(query);
        if self.failing.contains(query) {
            return Err(ConnectionError::Unavailable(format!("{query} failed")));
        }
        Ok(value.clone())
    }
}

impl CliConnection for FakeCliConnection {
    fn has_api_endpoint(&self) -> Result<bool, ConnectionError> {
        self.answer("HasAPIEndpoint", &self.has_api_endpoint)
    }

    fn api_endpoint(&self) -> Result<String, ConnectionError> {
        self.answer("ApiEndpoint", &self.api_endpoint)
    }

    fn is_logged_in(&self) -> Result<bool, ConnectionError> {
        self.answer("IsLoggedIn", &self.is_logged_in)
    }

    fn username(&self) -> Result<String, ConnectionError> {
        self.answer("Username", &self.username)
    }

    fn has_organization(&self) -> Result<bool, ConnectionError> {
        self.answer("HasOrganization", &self.has_organization)
    }

    fn current_organization(&self) -> Result<Organization, ConnectionError> {
        self.answer("GetCurrentOrg", &self.organization)
    }

    fn has_space(&self) -> Result<bool, ConnectionError> {
        self.answer("HasSpace", &self.has_space)
    }

    fn current_space(&self) -> Result<Space, ConnectionError> {
        self.answer("GetCurrentSpace", &self.space)
    }
}
