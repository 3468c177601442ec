//! Datasource configuration consumed by the data-access tooling.

use std::path::{Path, PathBuf};

use crate::settings::{DatabaseUrl, Settings};

/// Schema file, relative to the service directory
pub const SCHEMA_PATH: &str = "prisma/schema.prisma";

/// Migrations directory, relative to the service directory
pub const MIGRATIONS_PATH: &str = "prisma/migrations";

/// Seed command run by the migration tooling
pub const SEED_COMMAND: &str = "ts-node prisma/seed.ts";

/// Where the schema and migrations live and which database they target
#[derive(Debug, Clone)]
pub struct DatasourceConfig {
    pub schema: PathBuf,
    pub migrations: PathBuf,
    pub seed: Option<String>,
    pub url: DatabaseUrl,
}

impl DatasourceConfig {
    pub fn for_service(service_dir: &Path, settings: &Settings) -> Self {
        Self {
            schema: service_dir.join(SCHEMA_PATH),
            migrations: service_dir.join(MIGRATIONS_PATH),
            seed: Some(SEED_COMMAND.to_string()),
            url: settings.database_url.clone(),
        }
    }

    /// Same config with the connection password masked
    pub fn redacted(&self) -> serde_json::Value {
        serde_json::json!({
            "schema": self.schema,
            "migrations": self.migrations,
            "seed": self.seed,
            "url": self.url.redacted(),
            "placeholder": self.url.is_placeholder(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::LoadedEnv;

    #[test]
    fn test_paths_are_service_relative() {
        let settings = Settings::from_env(&LoadedEnv::from_pairs([(
            "DATABASE_URL",
            "postgresql://u:p@db/app",
        )]))
        .unwrap();
        let ds = DatasourceConfig::for_service(Path::new("/repo/apps/api"), &settings);

        assert_eq!(ds.schema, PathBuf::from("/repo/apps/api/prisma/schema.prisma"));
        assert_eq!(ds.migrations, PathBuf::from("/repo/apps/api/prisma/migrations"));
        assert_eq!(ds.seed.as_deref(), Some("ts-node prisma/seed.ts"));
        assert_eq!(ds.redacted()["url"], "postgresql://u:****@db/app");
    }
}
