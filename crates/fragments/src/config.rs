// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Runner configuration
//
// Settings shared by the page-fragments launcher and the test binaries it
// runs: where the application under test lives, how to reach the browser
// automation server, and which command runs the suites.
//
// Resolution order (later wins):
// 1. Built-in defaults
// 2. JSON config file (optional, camelCase keys)
// 3. Environment variables
//
// The launcher exports the resolved config to the runner process through
// to_env(), so test code can rebuild the same values with from_env().

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444/wd/hub";

/// Environment variable that overrides the composed base URL.
pub const ENV_BASE_URL: &str = "BASE_URL";
pub const ENV_HTTP_PROTOCOL: &str = "HTTP_PROTOCOL";
pub const ENV_HTTP_HOST: &str = "HTTP_HOST";
pub const ENV_HTTP_PORT: &str = "HTTP_PORT";
pub const ENV_SELENIUM_URL: &str = "SELENIUM_URL";
pub const ENV_DIRECT_CONNECT: &str = "DIRECT_CONNECT";
pub const ENV_BROWSER_NAME: &str = "TEST_BROWSER_NAME";
pub const ENV_BROWSER_VERSION: &str = "TEST_BROWSER_VERSION";

/// Configuration for a page-fragments test run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunnerConfig {
    /// Root URL that relative navigation paths are joined onto
    pub base_url: Url,

    /// Remote WebDriver endpoint; ignored when `direct_connect` is set
    pub webdriver_url: Option<Url>,

    /// Talk to the browser driver directly instead of a remote server
    pub direct_connect: bool,

    pub browser_name: String,

    pub browser_version: String,

    /// Program and arguments that run the test suites
    pub runner: Vec<String>,

    /// Extra arguments appended to the runner command (test filters, paths)
    pub specs: Vec<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            webdriver_url: Some(
                Url::parse(DEFAULT_WEBDRIVER_URL).expect("default WebDriver URL is valid"),
            ),
            direct_connect: false,
            browser_name: "chrome".to_string(),
            browser_version: "ANY".to_string(),
            runner: vec!["cargo".to_string(), "test".to_string()],
            specs: Vec::new(),
        }
    }
}

impl RunnerConfig {
    /// Loads a JSON config file and applies environment overrides.
    ///
    /// Fields missing from the file keep their defaults.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading runner config from {}", path.display());

        let contents = tokio::fs::read_to_string(path).await?;
        let mut config: RunnerConfig = serde_json::from_str(&contents)?;
        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Builds a config from defaults and the process environment.
    pub fn from_env() -> Result<Self> {
        let mut config = RunnerConfig::default();
        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Applies environment overrides read through `lookup`.
    ///
    /// `HTTP_PROTOCOL`, `HTTP_HOST` and `HTTP_PORT` each replace one part of
    /// the base URL; `BASE_URL` replaces it entirely.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let protocol = lookup(ENV_HTTP_PROTOCOL);
        let host = lookup(ENV_HTTP_HOST);
        let port = lookup(ENV_HTTP_PORT);

        if protocol.is_some() || host.is_some() || port.is_some() {
            let scheme = protocol
                .as_deref()
                .map(|p| p.trim_end_matches("://").to_string())
                .unwrap_or_else(|| self.base_url.scheme().to_string());
            let host = host
                .or_else(|| self.base_url.host_str().map(str::to_string))
                .unwrap_or_else(|| "localhost".to_string());
            let port = match port {
                Some(port) => Some(port.parse::<u16>().map_err(|_| {
                    Error::Config(format!("{} must be a port number, got '{}'", ENV_HTTP_PORT, port))
                })?),
                None => self.base_url.port(),
            };

            let authority = match port {
                Some(port) => format!("{}:{}", host, port),
                None => host,
            };
            self.base_url = Url::parse(&format!("{}://{}", scheme, authority))?;
        }

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = Url::parse(&base_url)?;
        }
        // An empty SELENIUM_URL clears the remote endpoint
        if let Some(webdriver_url) = lookup(ENV_SELENIUM_URL) {
            self.webdriver_url = match webdriver_url.as_str() {
                "" => None,
                url => Some(Url::parse(url)?),
            };
        }
        if let Some(direct) = lookup(ENV_DIRECT_CONNECT) {
            self.direct_connect = parse_flag(ENV_DIRECT_CONNECT, &direct)?;
        }
        if let Some(name) = lookup(ENV_BROWSER_NAME) {
            self.browser_name = name;
        }
        if let Some(version) = lookup(ENV_BROWSER_VERSION) {
            self.browser_version = version;
        }

        Ok(())
    }

    /// Checks that the config can launch a run.
    pub fn validate(&self) -> Result<()> {
        match self.runner.first() {
            Some(program) if !program.is_empty() => {}
            _ => {
                return Err(Error::Config(
                    "runner must name a program to execute".to_string(),
                ));
            }
        }
        if self.browser_name.is_empty() {
            return Err(Error::Config("browserName must not be empty".to_string()));
        }
        Ok(())
    }

    /// Joins a relative navigation path onto the base URL.
    ///
    /// ```ignore
    /// let config = RunnerConfig::default();
    /// assert_eq!(config.url_for("/search?q=rust")?.as_str(), "http://localhost:3000/search?q=rust");
    /// ```
    pub fn url_for(&self, path: &str) -> Result<Url> {
        if path.is_empty() {
            return Err(Error::invalid_argument(
                "url_for(path): path must be a populated string",
            ));
        }
        Ok(self.base_url.join(path)?)
    }

    /// Returns the runner program and its full argument list.
    pub fn command(&self) -> Result<(&str, Vec<&str>)> {
        self.validate()?;
        let program = self.runner[0].as_str();
        let args = self.runner[1..]
            .iter()
            .chain(self.specs.iter())
            .map(String::as_str)
            .collect();
        Ok((program, args))
    }

    /// Environment variables that reproduce this config in a child process.
    pub fn to_env(&self) -> Vec<(&'static str, String)> {
        let webdriver_url = self
            .webdriver_url
            .as_ref()
            .map(Url::to_string)
            .unwrap_or_default();
        vec![
            (ENV_BASE_URL, self.base_url.to_string()),
            (ENV_SELENIUM_URL, webdriver_url),
            (ENV_DIRECT_CONNECT, self.direct_connect.to_string()),
            (ENV_BROWSER_NAME, self.browser_name.clone()),
            (ENV_BROWSER_VERSION, self.browser_version.clone()),
        ]
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        other => Err(Error::Config(format!(
            "{} must be true or false, got '{}'",
            name, other
        ))),
    }
}
