
use std::path::PathBuf;

pub const DEFAULT_PER_PAGE: usize = 10;
pub const DEFAULT_PAGINATION_DELTA: usize = 2;
pub const DEFAULT_SITE_NAME: &str = "Blog";

#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required setting -{}", .0)]
    Missing(&'static str),
    #[error("Invalid value for {}: {:?}", .name, .value)]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// JSON export of the blog records
    pub input: PathBuf,
    pub output: PathBuf,
    /// Absolute site URL without trailing slash, or empty for relative links only
    pub base_url: String,
    pub site_name: String,
    pub per_page: usize,
    pub pagination_delta: usize,
    pub utc_offset: time::UtcOffset,
}

/// Settings collected from flags, with unset ones filled from the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub base_url: Option<String>,
    pub site_name: Option<String>,
    pub per_page: Option<usize>,
    pub pagination_delta: Option<usize>,
    pub utc_offset: Option<i8>,
}

fn parse_var<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid { name, value })
}

impl ConfigBuilder {
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_vars(|name| std::env::var(name).ok())
    }

    /// Fill unset values from `SITE_*` variables looked up through `var`.
    pub fn with_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if self.base_url.is_none() {
            self.base_url = var("SITE_BASE_URL");
        }
        if self.site_name.is_none() {
            self.site_name = var("SITE_NAME");
        }
        if self.per_page.is_none() {
            self.per_page = var("SITE_PER_PAGE").map(|v| parse_var("SITE_PER_PAGE", v)).transpose()?;
        }
        if self.utc_offset.is_none() {
            self.utc_offset = var("SITE_UTC_OFFSET").map(|v| parse_var("SITE_UTC_OFFSET", v)).transpose()?;
        }
        Ok(self)
    }

    pub fn build(self) -> Result<Config, ConfigError> {
        let input = self.input.ok_or(ConfigError::Missing("in"))?;
        let output = self.output.ok_or(ConfigError::Missing("out"))?;

        let base_url = self.base_url.unwrap_or_default();
        let base_url = base_url.trim().trim_end_matches('/');
        if !(base_url.is_empty() || base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(ConfigError::Invalid { name: "base-url", value: base_url.into() });
        }

        let per_page = self.per_page.unwrap_or(DEFAULT_PER_PAGE);
        if per_page == 0 {
            return Err(ConfigError::Invalid { name: "per-page", value: per_page.to_string() });
        }

        let utc_offset = match self.utc_offset {
            Some(hours) if !(-25..=25).contains(&hours) => {
                return Err(ConfigError::Invalid { name: "utc-offset", value: hours.to_string() });
            },
            Some(hours) => runtime::utils::offset_from_hours(hours),
            None => runtime::utils::default_offset(),
        };

        let site_name = self.site_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SITE_NAME.into());

        Ok(Config {
            input,
            output,
            base_url: base_url.into(),
            site_name,
            per_page,
            pagination_delta: self.pagination_delta.unwrap_or(DEFAULT_PAGINATION_DELTA),
            utc_offset,
        })
    }
}

impl Config {
    /// Absolute URL when a base URL is configured, otherwise the root-relative path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
