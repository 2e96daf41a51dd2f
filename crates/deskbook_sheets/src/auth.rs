// File: crates/deskbook_sheets/src/auth.rs
use deskbook_config::SheetsConfig;
use google_sheets4::{
    hyper_rustls::{self, HttpsConnectorBuilder},
    hyper_util::client::legacy::connect::HttpConnector,
    hyper_util::client::legacy::Client,
    yup_oauth2::{parse_service_account_key, read_service_account_key, ServiceAccountAuthenticator},
    Sheets,
};
use std::{error::Error, path::Path};
use tracing::info;

/// Environment variable holding the service account JSON when no key file is configured.
pub const SERVICE_ACCOUNT_JSON_ENV: &str = "GOOGLE_SHEETS_SERVICE_ACCOUNT_JSON";

// Type aliases for clarity
type Connector = hyper_rustls::HttpsConnector<HttpConnector>;

pub type HubType = Sheets<Connector>;

pub async fn create_sheets_hub(
    config: &SheetsConfig,
) -> Result<HubType, Box<dyn Error + Send + Sync>> {
    let sa_key = match config.key_path.as_deref() {
        Some(key_path) => {
            info!("Reading service account key from {}", key_path);
            read_service_account_key(Path::new(key_path)).await?
        }
        None => {
            let json = std::env::var(SERVICE_ACCOUNT_JSON_ENV)
                .map_err(|_| format!("Neither key_path nor {} is set", SERVICE_ACCOUNT_JSON_ENV))?;
            parse_service_account_key(json)?
        }
    };

    let auth = ServiceAccountAuthenticator::builder(sa_key).build().await?;

    let https = HttpsConnectorBuilder::new()
        .with_native_roots()?
        .https_or_http()
        .enable_http1()
        .build();

    let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(https);

    Ok(Sheets::new(client, auth))
}
