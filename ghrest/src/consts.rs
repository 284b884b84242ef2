//! Constants for the ghrest client

/// Base URL for the official SaaS GitHub API
pub const API_BASE_URL: &str = "https://api.github.com";

/// User-Agent header value sent by the HTTP transport
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Accept header value applied to every request
pub const ACCEPT_JSON: &str = "application/json";

/// Content-Type header value applied to requests carrying a body
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Body sent by POST and PUT when the caller supplies none
pub const EMPTY_JSON_BODY: &str = "{}";

/// Header carrying the token on write requests
pub const AUTHORIZATION: &str = "Authorization";

/// Query parameter carrying the token on read requests
pub const ACCESS_TOKEN_PARAM: &str = "access_token";

/// Header pinning the REST API version
pub const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";

/// REST API version requested by the bundled resource wrappers
pub const API_VERSION: &str = "2022-11-28";

/// Placeholder printed instead of credentials in logs
pub const REDACTED: &str = "<redacted>";

/// Environment variable overriding the API base URL
pub const ENV_API_URL: &str = "GHREST_API_URL";

/// Environment variable holding the API token
pub const ENV_TOKEN: &str = "GHREST_TOKEN";

/// Fallback environment variable holding the API token
pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";
