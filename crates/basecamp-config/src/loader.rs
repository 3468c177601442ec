//! # Environment Loader
//!
//! Resolves environment configuration from an ordered list of sources and
//! merges them into a single immutable [`LoadedEnv`].
//!
//! ## Precedence
//!
//! Sources are consulted in order; the first source to define a key wins and
//! later sources never override it:
//!
//! ```text
//!   process environment      (already exported variables)
//!   <monorepo-root>/.env     (<cwd>/../../.env)
//!   <service-dir>/.env       (<cwd>/.env)
//!   default .env             (first .env from <cwd> up to the monorepo root)
//! ```
//!
//! Loading never fails: a missing file is recorded and skipped, an
//! unparseable file is recorded, logged and skipped as a whole. The loader
//! never writes to the process environment.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::layout::Layout;

/// Default env file name
pub const DEFAULT_ENV_FILENAME: &str = ".env";

/// A place key/value pairs are read from at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvSource {
    /// Variables already present in the process environment
    Process,
    /// `.env` in the monorepo root, two levels above the service
    MonorepoRoot,
    /// `.env` in the service's working directory
    ServiceDir,
    /// First `.env` found searching from the service directory upwards,
    /// stopping at the monorepo root
    Default,
}

impl EnvSource {
    /// The standard precedence order for a service
    pub const STANDARD: [Self; 4] = [
        Self::Process,
        Self::MonorepoRoot,
        Self::ServiceDir,
        Self::Default,
    ];
}

impl fmt::Display for EnvSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Process => "process",
            Self::MonorepoRoot => "monorepo_root",
            Self::ServiceDir => "service_dir",
            Self::Default => "default",
        };
        f.write_str(name)
    }
}

/// What happened when a source was consulted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceStatus {
    /// Source was read. `keys` is how many pairs it held, `applied` how many
    /// were new after higher-precedence sources.
    Loaded { keys: usize, applied: usize },
    /// No file at the candidate location
    Missing,
    /// File exists but could not be read or parsed; nothing was applied
    Invalid { reason: String },
}

/// One entry of the load report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceOutcome {
    pub source: EnvSource,
    pub path: Option<PathBuf>,
    #[serde(flatten)]
    pub status: SourceStatus,
}

impl SourceOutcome {
    pub const fn is_found(&self) -> bool {
        matches!(self.status, SourceStatus::Loaded { .. })
    }
}

/// Which sources were actually found, in precedence order
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub loaded_at: DateTime<Utc>,
    pub outcomes: Vec<SourceOutcome>,
}

impl LoadReport {
    /// Outcomes for sources that were present and parsed
    pub fn found(&self) -> impl Iterator<Item = &SourceOutcome> {
        self.outcomes.iter().filter(|o| o.is_found())
    }

    /// Outcome for a specific source, if it was configured
    pub fn outcome(&self, source: EnvSource) -> Option<&SourceOutcome> {
        self.outcomes.iter().find(|o| o.source == source)
    }
}

#[derive(Debug, Clone)]
struct EnvEntry {
    value: String,
    source: EnvSource,
}

/// The merged, immutable environment configuration
#[derive(Debug, Clone)]
pub struct LoadedEnv {
    values: BTreeMap<String, EnvEntry>,
    report: LoadReport,
}

impl LoadedEnv {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|e| e.value.as_str())
    }

    pub fn get_or<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        self.get(key).unwrap_or(fallback)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Which source supplied a key
    pub fn source_of(&self, key: &str) -> Option<EnvSource> {
        self.values.get(key).map(|e| e.source)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(k, e)| (k.as_str(), e.value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub const fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Build directly from pairs, attributed to the process environment.
    /// Later duplicates do not override earlier ones.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut merger = Merger::default();
        let pairs: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let status = merger.apply(EnvSource::Process, pairs);
        merger.finish(vec![SourceOutcome {
            source: EnvSource::Process,
            path: None,
            status,
        }])
    }
}

#[derive(Debug, Clone)]
enum ProcessVars {
    Inherit,
    Fixed(Vec<(String, String)>),
}

/// Builder for resolving a [`LoadedEnv`]
#[derive(Debug, Clone)]
pub struct EnvLoader {
    layout: Layout,
    sources: Vec<EnvSource>,
    filename: String,
    process: ProcessVars,
}

impl EnvLoader {
    /// Loader for a service running from `service_dir`, using the standard
    /// source order
    pub fn new(service_dir: impl Into<PathBuf>) -> Self {
        Self::for_layout(Layout::from_service_dir(service_dir))
    }

    pub fn for_layout(layout: Layout) -> Self {
        Self {
            layout,
            sources: EnvSource::STANDARD.to_vec(),
            filename: DEFAULT_ENV_FILENAME.to_string(),
            process: ProcessVars::Inherit,
        }
    }

    /// Loader rooted at the process working directory
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined.
    pub fn from_current_dir() -> std::io::Result<Self> {
        Ok(Self::for_layout(Layout::from_current_dir()?))
    }

    /// Replace the ordered source list
    #[must_use]
    pub fn with_sources(mut self, sources: impl IntoIterator<Item = EnvSource>) -> Self {
        self.sources = sources.into_iter().collect();
        self
    }

    /// Use a different env file name than `.env`
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Use fixed variables for the [`EnvSource::Process`] layer instead of
    /// the real process environment
    #[must_use]
    pub fn with_process_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.process = ProcessVars::Fixed(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Treat the process environment as empty
    #[must_use]
    pub fn without_process_env(self) -> Self {
        self.with_process_vars(std::iter::empty::<(String, String)>())
    }

    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn sources(&self) -> &[EnvSource] {
        &self.sources
    }

    /// Candidate file for a source, if it has one
    pub fn candidate_path(&self, source: EnvSource) -> Option<PathBuf> {
        match source {
            EnvSource::Process => None,
            EnvSource::MonorepoRoot => Some(self.layout.monorepo_root().join(&self.filename)),
            EnvSource::ServiceDir => Some(self.layout.service_dir().join(&self.filename)),
            EnvSource::Default => self.search_default(),
        }
    }

    fn search_default(&self) -> Option<PathBuf> {
        let root = self.layout.monorepo_root();
        let service = self.layout.service_dir();
        // A relative service dir may not have the root among its lexical
        // ancestors; it then only searches itself.
        service
            .ancestors()
            .take_while(|dir| *dir == service || dir.starts_with(root))
            .map(|dir| dir.join(&self.filename))
            .find(|candidate| candidate.is_file())
    }

    /// Consult every source in order and merge the results
    pub fn load(&self) -> LoadedEnv {
        let mut merger = Merger::default();
        let mut outcomes = Vec::with_capacity(self.sources.len());

        for &source in &self.sources {
            let outcome = match source {
                EnvSource::Process => {
                    let pairs = match &self.process {
                        ProcessVars::Inherit => std::env::vars_os()
                            .filter_map(|(k, v)| {
                                Some((k.into_string().ok()?, v.into_string().ok()?))
                            })
                            .collect(),
                        ProcessVars::Fixed(vars) => vars.clone(),
                    };
                    SourceOutcome {
                        source,
                        path: None,
                        status: merger.apply(source, pairs),
                    }
                }
                _ => match self.candidate_path(source) {
                    Some(path) => {
                        let status = match read_env_file(&path) {
                            Ok(Some(pairs)) => merger.apply(source, pairs),
                            Ok(None) => SourceStatus::Missing,
                            Err(reason) => {
                                tracing::warn!(
                                    %source,
                                    path = %path.display(),
                                    %reason,
                                    "Ignoring unreadable env file"
                                );
                                SourceStatus::Invalid { reason }
                            }
                        };
                        SourceOutcome {
                            source,
                            path: Some(path),
                            status,
                        }
                    }
                    None => SourceOutcome {
                        source,
                        path: None,
                        status: SourceStatus::Missing,
                    },
                },
            };

            tracing::debug!(
                source = %outcome.source,
                path = ?outcome.path,
                status = ?outcome.status,
                "Env source consulted"
            );
            outcomes.push(outcome);
        }

        let env = merger.finish(outcomes);
        tracing::info!(
            keys = env.len(),
            found = env.report().found().count(),
            sources = env.report().outcomes.len(),
            "Environment resolved"
        );
        env
    }
}

/// Read every pair of an env file.
///
/// `Ok(None)` means the file does not exist. Any parse error rejects the
/// whole file.
fn read_env_file(path: &Path) -> Result<Option<Vec<(String, String)>>, String> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => return Ok(None),
        Err(e) => return Err(e.to_string()),
    };

    iter.collect::<Result<Vec<_>, _>>()
        .map(Some)
        .map_err(|e| e.to_string())
}

/// First-wins merge of successive sources
#[derive(Debug, Default)]
struct Merger {
    values: BTreeMap<String, EnvEntry>,
}

impl Merger {
    fn apply(&mut self, source: EnvSource, pairs: Vec<(String, String)>) -> SourceStatus {
        let keys = pairs.len();
        let mut applied = 0;
        for (key, value) in pairs {
            if !self.values.contains_key(&key) {
                self.values.insert(key, EnvEntry { value, source });
                applied += 1;
            }
        }
        SourceStatus::Loaded { keys, applied }
    }

    fn finish(self, outcomes: Vec<SourceOutcome>) -> LoadedEnv {
        LoadedEnv {
            values: self.values,
            report: LoadReport {
                loaded_at: Utc::now(),
                outcomes,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// `<tmp>/apps/api` with optional root and service env files
    fn monorepo(root_env: Option<&str>, service_env: Option<&str>) -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let service = tmp.path().join("apps").join("api");
        fs::create_dir_all(&service).unwrap();
        if let Some(body) = root_env {
            fs::write(tmp.path().join(".env"), body).unwrap();
        }
        if let Some(body) = service_env {
            fs::write(service.join(".env"), body).unwrap();
        }
        (tmp, service)
    }

    #[test]
    fn test_missing_files_are_ignored() {
        let (_tmp, service) = monorepo(None, None);
        let env = EnvLoader::new(&service)
            .with_sources([
                EnvSource::Process,
                EnvSource::MonorepoRoot,
                EnvSource::ServiceDir,
            ])
            .without_process_env()
            .load();

        assert!(env.is_empty());
        let report = env.report();
        assert_eq!(
            report.outcome(EnvSource::MonorepoRoot).unwrap().status,
            SourceStatus::Missing
        );
        assert_eq!(
            report.outcome(EnvSource::ServiceDir).unwrap().status,
            SourceStatus::Missing
        );
    }

    #[test]
    fn test_root_wins_over_service() {
        let (_tmp, service) = monorepo(
            Some("REDIS_URL=redis://root:6379\n"),
            Some("REDIS_URL=redis://svc:6379\nONLY_SVC=1\n"),
        );
        let env = EnvLoader::new(&service).without_process_env().load();

        assert_eq!(env.get("REDIS_URL"), Some("redis://root:6379"));
        assert_eq!(env.source_of("REDIS_URL"), Some(EnvSource::MonorepoRoot));
        assert_eq!(env.get("ONLY_SVC"), Some("1"));
        assert_eq!(env.source_of("ONLY_SVC"), Some(EnvSource::ServiceDir));
    }

    #[test]
    fn test_process_env_wins_over_files() {
        let (_tmp, service) = monorepo(Some("LOG_LEVEL=debug\n"), None);
        let env = EnvLoader::new(&service)
            .with_process_vars([("LOG_LEVEL", "warn")])
            .load();

        assert_eq!(env.get("LOG_LEVEL"), Some("warn"));
        assert_eq!(
            env.report().outcome(EnvSource::MonorepoRoot).unwrap().status,
            SourceStatus::Loaded { keys: 1, applied: 0 }
        );
    }

    #[test]
    fn test_default_source_finds_service_file_without_new_keys() {
        let (_tmp, service) = monorepo(None, Some("A=1\n"));
        let loader = EnvLoader::new(&service).without_process_env();
        let env = loader.load();

        assert_eq!(loader.candidate_path(EnvSource::Default), Some(service.join(".env")));
        assert_eq!(
            env.report().outcome(EnvSource::Default).unwrap().status,
            SourceStatus::Loaded { keys: 1, applied: 0 }
        );
    }

    #[test]
    fn test_default_search_stops_at_monorepo_root() {
        let tmp = TempDir::new().unwrap();
        let service = tmp.path().join("mono").join("apps").join("api");
        fs::create_dir_all(&service).unwrap();
        fs::write(tmp.path().join(".env"), "STRAY=1\n").unwrap();

        let loader = EnvLoader::new(&service).without_process_env();
        assert_eq!(loader.candidate_path(EnvSource::Default), None);

        fs::write(tmp.path().join("mono").join("apps").join(".env"), "APPS=1\n").unwrap();
        assert_eq!(
            loader.candidate_path(EnvSource::Default),
            Some(tmp.path().join("mono").join("apps").join(".env"))
        );
    }

    #[test]
    fn test_invalid_file_is_skipped_whole() {
        let (_tmp, service) = monorepo(Some("GOOD=1\nthis is not valid\n"), Some("GOOD=2\n"));
        let env = EnvLoader::new(&service).without_process_env().load();

        assert_eq!(env.get("GOOD"), Some("2"));
        assert!(matches!(
            env.report().outcome(EnvSource::MonorepoRoot).unwrap().status,
            SourceStatus::Invalid { .. }
        ));
    }

    #[test]
    fn test_custom_filename() {
        let (tmp, service) = monorepo(None, None);
        fs::write(tmp.path().join(".env.local"), "X=y\n").unwrap();
        let env = EnvLoader::new(&service)
            .with_filename(".env.local")
            .without_process_env()
            .load();

        assert_eq!(env.get("X"), Some("y"));
    }

    #[test]
    fn test_from_pairs_first_wins() {
        let env = LoadedEnv::from_pairs([("K", "first"), ("K", "second")]);
        assert_eq!(env.get("K"), Some("first"));
        assert_eq!(env.get_or("MISSING", "fallback"), "fallback");
        assert!(env.contains("K"));
        assert_eq!(env.iter().collect::<Vec<_>>(), vec![("K", "first")]);
    }
}
