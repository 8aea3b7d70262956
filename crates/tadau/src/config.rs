//! Client configuration and builder.

use crate::types::Scalar;
use crate::Error;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// Default collect endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.google-analytics.com/mp/collect";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Tadau client configuration.
///
/// Resolved once at build time and immutable afterwards; credentials are
/// validated during [`TadauBuilder::build`] and never re-checked per call.
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) api_secret: String,
    pub(crate) measurement_id: String,
    pub(crate) opt_in: bool,
    pub(crate) fixed_dimensions: HashMap<String, Scalar>,
    pub(crate) endpoint: String,
    pub(crate) timeout: Duration,
}

impl Config {
    /// Get the API secret.
    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }

    /// Get the measurement ID.
    pub fn measurement_id(&self) -> &str {
        &self.measurement_id
    }

    /// Whether the host application opted in to telemetry.
    pub fn opt_in(&self) -> bool {
        self.opt_in
    }

    /// Get the dimensions attached to every outgoing event.
    pub fn fixed_dimensions(&self) -> &HashMap<String, Scalar> {
        &self.fixed_dimensions
    }

    /// Get the collect endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get the request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Builder for the Tadau client.
#[derive(Debug, Default)]
pub struct TadauBuilder {
    api_secret: Option<String>,
    measurement_id: Option<String>,
    opt_in: bool,
    fixed_dimensions: HashMap<String, Scalar>,
    config_file: Option<PathBuf>,
    endpoint: Option<String>,
    timeout: Option<Duration>,
}

impl TadauBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API secret of the target GA property.
    pub fn api_secret(mut self, secret: impl Into<String>) -> Self {
        self.api_secret = Some(secret.into());
        self
    }

    /// Set the measurement ID of the target GA property.
    pub fn measurement_id(mut self, id: impl Into<String>) -> Self {
        self.measurement_id = Some(id.into());
        self
    }

    /// Opt in to telemetry. Defaults to `false`, which turns the whole
    /// pipeline into a no-op.
    pub fn opt_in(mut self, opt_in: bool) -> Self {
        self.opt_in = opt_in;
        self
    }

    /// Add one dimension sent with every event.
    pub fn fixed_dimension(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.fixed_dimensions.insert(key.into(), value.into());
        self
    }

    /// Set all fixed dimensions at once.
    pub fn fixed_dimensions(mut self, dimensions: HashMap<String, Scalar>) -> Self {
        self.fixed_dimensions = dimensions;
        self
    }

    /// Load configuration from a YAML file of flat key-value pairs.
    ///
    /// `api_secret` and `measurement_id` found in the file take precedence
    /// over the explicitly set values; every other key becomes a fixed
    /// dimension, replacing any explicitly set dimensions. A file that
    /// cannot be read or parsed is logged and ignored.
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Override the collect endpoint.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Resolve the effective configuration.
    pub(crate) fn build_config(mut self) -> Result<Config, Error> {
        if let Some(path) = self.config_file.take() {
            match load_config_file(&path) {
                Ok(loaded) => self.apply_loaded(loaded),
                Err(e) => warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to load config file, falling back to explicit values"
                ),
            }
        }

        let api_secret = self.api_secret.unwrap_or_default();
        let measurement_id = self.measurement_id.unwrap_or_default();
        if api_secret.is_empty() || measurement_id.is_empty() {
            return Err(Error::Config(
                "api_secret and measurement_id are required".into(),
            ));
        }

        Ok(Config {
            api_secret,
            measurement_id,
            opt_in: self.opt_in,
            fixed_dimensions: self.fixed_dimensions,
            endpoint: self.endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.into()),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        })
    }

    fn apply_loaded(&mut self, mut loaded: HashMap<String, Scalar>) {
        if let Some(Scalar::String(secret)) = loaded.remove("api_secret") {
            self.api_secret = Some(secret);
        }
        if let Some(Scalar::String(id)) = loaded.remove("measurement_id") {
            self.measurement_id = Some(id);
        }
        // Opting in is an explicit decision by the host application and is
        // never taken from the file.
        loaded.remove("opt_in");
        // Remaining keys ride along as deployment metadata (deploy id,
        // infra, timestamps), replacing explicitly set dimensions.
        self.fixed_dimensions = loaded;
    }
}

fn load_config_file(path: &Path) -> Result<HashMap<String, Scalar>, Error> {
    let raw = std::fs::read_to_string(path)?;
    let doc: HashMap<String, serde_yaml::Value> = serde_yaml::from_str(&raw)?;

    let mut out = HashMap::with_capacity(doc.len());
    for (key, value) in doc {
        match yaml_scalar(&value) {
            Some(scalar) => {
                out.insert(key, scalar);
            }
            None => warn!(key = %key, "ignoring non-scalar config value"),
        }
    }
    Ok(out)
}

fn yaml_scalar(value: &serde_yaml::Value) -> Option<Scalar> {
    match value {
        serde_yaml::Value::String(s) => Some(Scalar::String(s.clone())),
        serde_yaml::Value::Bool(b) => Some(Scalar::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Scalar::Int(i))
            } else {
                n.as_f64().map(Scalar::Float)
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_builder_defaults() {
        let config = TadauBuilder::new()
            .api_secret("S")
            .measurement_id("M")
            .build_config()
            .unwrap();

        assert_eq!(config.api_secret(), "S");
        assert_eq!(config.measurement_id(), "M");
        assert!(!config.opt_in());
        assert!(config.fixed_dimensions().is_empty());
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_missing_credentials_fail() {
        assert!(matches!(
            TadauBuilder::new().build_config(),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            TadauBuilder::new().api_secret("S").build_config(),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            TadauBuilder::new()
                .api_secret("")
                .measurement_id("M")
                .build_config(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_config_file_overrides_credentials() {
        let file = write_config("api_secret: file_secret\nmeasurement_id: file_id\n");

        let config = TadauBuilder::new()
            .api_secret("explicit_secret")
            .measurement_id("explicit_id")
            .config_file(file.path())
            .build_config()
            .unwrap();

        assert_eq!(config.api_secret(), "file_secret");
        assert_eq!(config.measurement_id(), "file_id");
    }

    #[test]
    fn test_config_file_extra_keys_become_dimensions() {
        let file = write_config(
            "api_secret: S\nmeasurement_id: M\ndeploy_id: 123456asc\ndeploy_ts: 1706400000\n",
        );

        let config = TadauBuilder::new().config_file(file.path()).build_config().unwrap();

        assert_eq!(
            config.fixed_dimensions().get("deploy_id"),
            Some(&Scalar::from("123456asc"))
        );
        assert_eq!(
            config.fixed_dimensions().get("deploy_ts"),
            Some(&Scalar::from(1706400000_i64))
        );
        assert!(!config.fixed_dimensions().contains_key("api_secret"));
        assert!(!config.fixed_dimensions().contains_key("measurement_id"));
    }

    #[test]
    fn test_config_file_replaces_explicit_dimensions() {
        let file = write_config("api_secret: S\nmeasurement_id: M\ndeploy_id: from_file\n");

        let config = TadauBuilder::new()
            .fixed_dimension("deploy_id", "explicit")
            .fixed_dimension("infra", "gcp")
            .config_file(file.path())
            .build_config()
            .unwrap();

        // Replacement is wholesale, not a merge.
        assert_eq!(
            config.fixed_dimensions().get("deploy_id"),
            Some(&Scalar::from("from_file"))
        );
        assert!(!config.fixed_dimensions().contains_key("infra"));
    }

    #[test]
    fn test_opt_in_never_read_from_file() {
        let file = write_config("api_secret: S\nmeasurement_id: M\nopt_in: true\n");

        let config = TadauBuilder::new().config_file(file.path()).build_config().unwrap();

        assert!(!config.opt_in());
        assert!(!config.fixed_dimensions().contains_key("opt_in"));
    }

    #[test]
    fn test_missing_file_falls_back_to_explicit() {
        let config = TadauBuilder::new()
            .api_secret("S")
            .measurement_id("M")
            .config_file("/nonexistent/tadau.yaml")
            .build_config()
            .unwrap();

        assert_eq!(config.api_secret(), "S");
        assert_eq!(config.measurement_id(), "M");
    }

    #[test]
    fn test_unparseable_file_falls_back_to_explicit() {
        let file = write_config(": not [ yaml\n  - broken");

        let config = TadauBuilder::new()
            .api_secret("S")
            .measurement_id("M")
            .fixed_dimension("deploy_id", "123")
            .config_file(file.path())
            .build_config()
            .unwrap();

        // Failed load contributes nothing, explicit dimensions survive.
        assert_eq!(config.api_secret(), "S");
        assert_eq!(
            config.fixed_dimensions().get("deploy_id"),
            Some(&Scalar::from("123"))
        );
    }

    #[test]
    fn test_non_scalar_config_values_ignored() {
        let file = write_config("api_secret: S\nmeasurement_id: M\nnested:\n  a: 1\n");

        let config = TadauBuilder::new().config_file(file.path()).build_config().unwrap();

        assert!(!config.fixed_dimensions().contains_key("nested"));
    }

    #[test]
    fn test_file_without_credentials_keeps_explicit() {
        let file = write_config("deploy_id: 123456asc\n");

        let config = TadauBuilder::new()
            .api_secret("S")
            .measurement_id("M")
            .config_file(file.path())
            .build_config()
            .unwrap();

        assert_eq!(config.api_secret(), "S");
        assert_eq!(config.measurement_id(), "M");
        assert_eq!(
            config.fixed_dimensions().get("deploy_id"),
            Some(&Scalar::from("123456asc"))
        );
    }
}
