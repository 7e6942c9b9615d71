use clap::Args;

use crate::cli::utils::{output_success, output_table};
use crate::cli::OutputFormat;
use crate::config::config;
use crate::services::ListingService;
use crate::track::{http_client, Credentials};

#[derive(Debug, Args)]
pub struct ListingsArgs {
    #[arg(long, env = "TRACK_DOMAIN", help = "Tenant subdomain (the <domain> in <domain>.trackhs.com)")]
    pub domain: String,

    #[arg(long, env = "TRACK_API_KEY", help = "API key")]
    pub api_key: String,

    #[arg(long, env = "TRACK_API_SECRET", hide_env_values = true, help = "API secret")]
    pub api_secret: String,
}

pub async fn handle(args: ListingsArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let upstream = &config().upstream;
    let credentials = Credentials::new(args.domain, args.api_key, args.api_secret)?;

    let service = ListingService::for_tenant(http_client(upstream)?, upstream, &credentials)?;
    let response = service.aggregate().await?;

    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            let rows: Vec<Vec<String>> = response
                .listings
                .iter()
                .map(|listing| {
                    vec![
                        listing.id.to_string(),
                        listing.name.clone().unwrap_or_default(),
                        listing.address.clone().unwrap_or_default(),
                        listing.picture.clone().unwrap_or_else(|| "-".to_string()),
                    ]
                })
                .collect();

            output_table(&["ID", "NAME", "ADDRESS", "PICTURE"], &rows);
            output_success(
                &output_format,
                &format!("{} active listings from {}", response.count, credentials.domain()),
                None,
            )?;
        }
    }

    Ok(())
}
