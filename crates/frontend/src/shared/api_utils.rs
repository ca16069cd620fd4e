//! API configuration for frontend-backend communication
//!
//! Every endpoint lives under `{origin}/api/v1`. The base is taken from the
//! page location by default; `ApiConfig::new` overrides it.

/// Path prefix of the backend API
pub const API_PREFIX: &str = "/api/v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Use an explicit base URL, e.g. `"https://mes.example.com/api/v1"`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// Same origin as the page the app was loaded from.
    pub fn from_window() -> Self {
        Self::new(format!("{}{}", window_origin(), API_PREFIX))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full API URL from a path such as `/quality/defects/`
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// `scheme://host[:port]` of the base URL; empty for a relative base.
    pub fn origin(&self) -> &str {
        match self.base_url.find("://") {
            Some(scheme_end) => {
                let rest = &self.base_url[scheme_end + 3..];
                match rest.find('/') {
                    Some(path_start) => &self.base_url[..scheme_end + 3 + path_start],
                    None => &self.base_url,
                }
            }
            None => "",
        }
    }

    /// Resolve a server-relative file URL (`/static/...`) against the origin.
    pub fn resolve_file_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else if url.starts_with('/') {
            format!("{}{}", self.origin(), url)
        } else {
            format!("{}/{}", self.origin(), url)
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_window()
    }
}

fn window_origin() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    window.location().origin().unwrap_or_default()
}
