use crate::api::ApiClient;
use crate::cli::Cli;
use crate::global::Config;

pub mod config;
pub mod shell;
pub mod tool;

/// Where the effective backend url came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlSource {
    Override,
    ConfigFile,
}

pub struct Context {
    pub config: Config,
    backend_override: Option<String>,
}

impl Context {
    pub fn new(cli: &Cli, config: Config) -> Self {
        Self {
            config,
            backend_override: cli
                .backend_url
                .clone()
                .filter(|url| !url.trim().is_empty()),
        }
    }

    pub fn backend_url(&self) -> (&str, UrlSource) {
        match &self.backend_override {
            Some(url) => (url, UrlSource::Override),
            None => (&self.config.backend.url, UrlSource::ConfigFile),
        }
    }

    pub fn client(&self) -> miette::Result<ApiClient> {
        let (url, _) = self.backend_url();
        Ok(ApiClient::new(url)?)
    }
}
