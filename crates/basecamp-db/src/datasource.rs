//! Building the client from a [`DatasourceConfig`].

use basecamp_config::DatasourceConfig;

use crate::client::{ClientOptions, DbClient};
use crate::error::Result;

/// Client that connects on first query.
///
/// Accepts the build placeholder URL, since nothing is contacted here; a
/// warning is logged so a misconfigured deployment is visible.
///
/// # Errors
///
/// Returns an error if the URL cannot be parsed.
pub fn connect_lazy(datasource: &DatasourceConfig, options: &ClientOptions) -> Result<DbClient> {
    if datasource.url.is_placeholder() {
        tracing::warn!(
            url = %datasource.url.redacted(),
            "Database client bound to build placeholder, queries fail until DATABASE_URL is set"
        );
    }
    Ok(DbClient::connect_lazy(datasource.url.as_str(), options)?)
}

/// Client with an open connection. Refuses the build placeholder URL.
///
/// # Errors
///
/// Returns [`DbError::Config`](crate::DbError::Config) for the placeholder
/// URL, or the client error if connecting fails.
pub async fn connect(datasource: &DatasourceConfig, options: &ClientOptions) -> Result<DbClient> {
    let url = datasource.url.require_live()?;
    tracing::info!(url = %datasource.url.redacted(), "Connecting to database");
    Ok(DbClient::connect(url, options).await?)
}
