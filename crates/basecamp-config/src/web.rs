//! # Web Build Configuration
//!
//! Packaging settings for the frontend app. The app is built as a
//! self-contained bundle and file tracing starts at the monorepo root so
//! workspace packages outside the app directory are included.
//!
//! Only affects packaging; nothing here changes runtime behaviour.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::layout::Layout;
use crate::loader::{EnvLoader, EnvSource};

/// Bundler output mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Self-contained server bundle with traced dependencies
    #[default]
    Standalone,
    /// Static export
    Export,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebBuildConfig {
    pub output: OutputMode,
    pub output_file_tracing_root: PathBuf,
    #[serde(skip)]
    layout: Layout,
}

impl WebBuildConfig {
    /// Build configuration for a web app at `app_dir` (`<root>/apps/<app>`)
    pub fn for_app(app_dir: impl Into<PathBuf>) -> Self {
        let layout = Layout::from_service_dir(app_dir);
        Self {
            output: OutputMode::Standalone,
            output_file_tracing_root: layout.monorepo_root().to_path_buf(),
            layout,
        }
    }

    pub fn app_dir(&self) -> &Path {
        self.layout.service_dir()
    }

    /// Env loader for the web app: the monorepo root file on top of the
    /// app's own default env loading
    pub fn env_loader(&self) -> EnvLoader {
        EnvLoader::for_layout(self.layout.clone()).with_sources([
            EnvSource::Process,
            EnvSource::MonorepoRoot,
            EnvSource::ServiceDir,
        ])
    }
}
