//! Where the view engine gets its datasets from: a built site directory or a served
//! site over HTTP. Both resolve the same four relative paths.

use reqwest::Url;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::types::{Dataset, Lang, MemberProject};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid dataset URL: {url}")]
    InvalidUrl { url: String },

    #[error("request for {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to parse {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A provider of the raw dataset documents, addressed by file name
pub trait DataSource {
    fn fetch_text(&self, file: &str) -> Result<String, LoadError>;

    /// Load one language's datasets and build the catalog in one step
    fn load(&self, lang: Lang) -> Result<Catalog, LoadError> {
        let dataset: Dataset = fetch_json(self, lang.data_file())?;
        let members: Vec<MemberProject> = fetch_json(self, lang.projects_file())?;
        log::debug!(
            "Loaded {} tools, {} experiences, {} member projects for {}",
            dataset.tools.len(),
            dataset.experiences.len(),
            members.len(),
            lang.as_str()
        );
        Ok(Catalog::build(lang, dataset, members))
    }
}

impl<S: DataSource + ?Sized> DataSource for Box<S> {
    fn fetch_text(&self, file: &str) -> Result<String, LoadError> {
        (**self).fetch_text(file)
    }
}

fn fetch_json<S, T>(source: &S, file: &str) -> Result<T, LoadError>
where
    S: DataSource + ?Sized,
    T: DeserializeOwned,
{
    let text = source.fetch_text(file)?;
    serde_json::from_str(&text).map_err(|source| LoadError::Parse {
        file: file.to_string(),
        source,
    })
}

/// Datasets read from a directory, usually the bundler's `dist/`
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DataSource for DirSource {
    fn fetch_text(&self, file: &str) -> Result<String, LoadError> {
        let path = self.root.join(file);
        fs::read_to_string(&path).map_err(|source| LoadError::Read {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Datasets fetched from a served site, relative to its base URL
pub struct HttpSource {
    client: reqwest::blocking::Client,
    base: Url,
}

impl HttpSource {
    pub fn new(base: &str) -> Result<Self, LoadError> {
        // Without a trailing slash the last path segment would be replaced on join
        let normalized = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{}/", base)
        };
        let base = Url::parse(&normalized).map_err(|_| LoadError::InvalidUrl {
            url: base.to_string(),
        })?;
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("ainotes/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| LoadError::Request {
                url: base.to_string(),
                source,
            })?;
        Ok(Self { client, base })
    }

    pub fn url_for(&self, file: &str) -> Result<Url, LoadError> {
        self.base.join(file).map_err(|_| LoadError::InvalidUrl {
            url: format!("{}{}", self.base, file),
        })
    }
}

impl DataSource for HttpSource {
    fn fetch_text(&self, file: &str) -> Result<String, LoadError> {
        let url = self.url_for(file)?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|source| LoadError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|source| LoadError::Request {
            url: url.to_string(),
            source,
        })
    }
}

/// A directory path or an `http(s)://` base URL
pub fn open_source(location: &str) -> Result<Box<dyn DataSource>, LoadError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location)?))
    } else {
        Ok(Box::new(DirSource::new(location)))
    }
}
