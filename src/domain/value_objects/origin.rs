/// Scheme and host a response's absolute URLs are built from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin {
    scheme: String,
    host: String,
}

impl Origin {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
        }
    }

    /// Plain-http origin for a host
    pub fn http(host: impl Into<String>) -> Self {
        Self::new("http", host)
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Absolute URL of a stored relative path, e.g. `http://host/images/a.png`
    pub fn url_for(&self, relative_path: &str) -> String {
        format!(
            "{}://{}/{}",
            self.scheme,
            self.host,
            relative_path.trim_start_matches('/')
        )
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)
    }
}
