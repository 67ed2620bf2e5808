//! Typed endpoints of the GitHub organization API.

use super::{
    ApiError, GitHubOrganization, GitHubPullRequest, GitHubRepository, GitHubTeam, GitHubUser,
    HttpTransport, ReqwestTransport, RestClient, RestRequest,
};

/// Base URL of the JSON API the index was originally built against.
pub const DEFAULT_API_BASE_URL: &str = "https://github.com/api/v2/json";

/// GitHub API facade over a [`RestClient`].
///
/// Every call is a single unauthenticated GET; there is no paging.
#[derive(Debug, Clone)]
pub struct GitHubApi<T = ReqwestTransport> {
    client: RestClient<T>,
}

impl<T: HttpTransport> GitHubApi<T> {
    /// Creates a facade for the API at `base_url`.
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        Self {
            client: RestClient::new(base_url, transport),
        }
    }

    /// Returns the underlying REST client.
    pub fn client(&self) -> &RestClient<T> {
        &self.client
    }

    /// Returns the transport, e.g. for raw content downloads.
    pub fn transport(&self) -> &T {
        self.client.transport()
    }

    /// Gets a single organization.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request or decoding fails.
    pub fn get_organization(&self, org: &str) -> Result<GitHubOrganization, ApiError> {
        let request = RestRequest::new("organizations/{org}")
            .with_segment("org", org)
            .with_root_element("organizations");
        self.client.get_one(&request)
    }

    /// Gets the organizations a user is a member of.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request or decoding fails.
    pub fn get_organizations(&self, user: &str) -> Result<Vec<GitHubOrganization>, ApiError> {
        let request = RestRequest::new("organizations/{user}")
            .with_segment("user", user)
            .with_root_element("organizations");
        self.client.get_many(&request)
    }

    /// Gets the public repositories of an organization.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request or decoding fails.
    pub fn get_public_repositories(&self, org: &str) -> Result<Vec<GitHubRepository>, ApiError> {
        let request = RestRequest::new("organizations/{org}/public_repositories")
            .with_segment("org", org)
            .with_root_element("repositories");
        self.client.get_many(&request)
    }

    /// Gets the public members of an organization.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request or decoding fails.
    pub fn get_public_members(&self, org: &str) -> Result<Vec<GitHubUser>, ApiError> {
        let request = RestRequest::new("organizations/{org}/public_members")
            .with_segment("org", org)
            .with_root_element("users");
        self.client.get_many(&request)
    }

    /// Gets the teams of an organization.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request or decoding fails.
    pub fn get_teams(&self, org: &str) -> Result<Vec<GitHubTeam>, ApiError> {
        let request = RestRequest::new("organizations/{org}/teams")
            .with_segment("org", org)
            .with_root_element("teams");
        self.client.get_many(&request)
    }

    /// Gets a single team.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request or decoding fails.
    pub fn get_team(&self, team_id: u64) -> Result<GitHubTeam, ApiError> {
        let request = RestRequest::new("teams/{team_id}")
            .with_segment("team_id", team_id)
            .with_root_element("team");
        self.client.get_one(&request)
    }

    /// Gets the members of a team.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request or decoding fails.
    pub fn get_team_members(&self, team_id: u64) -> Result<Vec<GitHubUser>, ApiError> {
        let request = RestRequest::new("teams/{team_id}/members")
            .with_segment("team_id", team_id)
            .with_root_element("users");
        self.client.get_many(&request)
    }

    /// Gets the repositories a team has access to.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request or decoding fails.
    pub fn get_team_repositories(&self, team_id: u64) -> Result<Vec<GitHubRepository>, ApiError> {
        let request = RestRequest::new("teams/{team_id}/repositories")
            .with_segment("team_id", team_id)
            .with_root_element("repositories");
        self.client.get_many(&request)
    }

    /// Gets a single user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request or decoding fails.
    pub fn get_user(&self, name: &str) -> Result<GitHubUser, ApiError> {
        let request = RestRequest::new("user/show/{name}")
            .with_segment("name", name)
            .with_root_element("user");
        self.client.get_one(&request)
    }

    /// Searches users by name.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request or decoding fails.
    pub fn search_users(&self, name: &str) -> Result<Vec<GitHubUser>, ApiError> {
        let request = RestRequest::new("user/search/{name}")
            .with_segment("name", name)
            .with_root_element("users");
        self.client.get_many(&request)
    }

    /// Looks up users by their public email address.
    ///
    /// The API answers with a single `user` object; it is returned as a
    /// one-element list, or an empty one for `null`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request or decoding fails.
    pub fn search_user_email(&self, email: &str) -> Result<Vec<GitHubUser>, ApiError> {
        let request = RestRequest::new("user/email/{email}")
            .with_segment("email", email)
            .with_root_element("user");
        self.client.get_many(&request)
    }

    /// Gets the users a user follows.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request or decoding fails.
    pub fn get_user_following(&self, user: &str) -> Result<Vec<GitHubUser>, ApiError> {
        let request = RestRequest::new("user/show/{user}/following")
            .with_segment("user", user)
            .with_root_element("users");
        self.client.get_many(&request)
    }

    /// Gets the followers of a user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request or decoding fails.
    pub fn get_user_followers(&self, user: &str) -> Result<Vec<GitHubUser>, ApiError> {
        let request = RestRequest::new("user/show/{user}/followers")
            .with_segment("user", user)
            .with_root_element("users");
        self.client.get_many(&request)
    }

    /// Gets the repositories a user watches.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request or decoding fails.
    pub fn get_watched_repositories(&self, user: &str) -> Result<Vec<GitHubRepository>, ApiError> {
        let request = RestRequest::new("repos/watched/{user}")
            .with_segment("user", user)
            .with_root_element("repositories");
        self.client.get_many(&request)
    }

    /// Gets the pull requests of a repository, optionally filtered by state
    /// (`open` or `closed`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request or decoding fails.
    pub fn get_pull_requests(
        &self,
        user: &str,
        repo: &str,
        state: Option<&str>,
    ) -> Result<Vec<GitHubPullRequest>, ApiError> {
        let path = match state {
            Some(_) => "pulls/{user}/{repo}/{state}",
            None => "pulls/{user}/{repo}",
        };
        let mut request = RestRequest::new(path)
            .with_segment("user", user)
            .with_segment("repo", repo)
            .with_root_element("pulls");
        if let Some(state) = state {
            request = request.with_segment("state", state);
        }
        self.client.get_many(&request)
    }

    /// Gets a single pull request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request or decoding fails.
    pub fn get_pull_request(
        &self,
        user: &str,
        repo: &str,
        number: u64,
    ) -> Result<GitHubPullRequest, ApiError> {
        let request = RestRequest::new("pulls/{user}/{repo}/{number}")
            .with_segment("user", user)
            .with_segment("repo", repo)
            .with_segment("number", number)
            .with_root_element("pull");
        self.client.get_one(&request)
    }
}
