use crate::cli::OutputFormat;
use crate::config::config;

pub fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let config = config();

    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        OutputFormat::Text => {
            let upstream = &config.upstream;
            println!("Environment: {:?}", config.environment);
            println!("Listen: {}:{}", config.server.host, config.server.port);
            println!("Upstream: {}", upstream.base_url);
            println!("Page size: {} (max {} pages)", upstream.page_size, upstream.max_pages);
            println!("Invalid page status: {}", upstream.invalid_page_status);
            println!("Image source: {:?} (concurrency {})", upstream.image_source, upstream.image_concurrency);
            println!(
                "Timeouts: connect {}s, request {}s",
                upstream.connect_timeout_secs, upstream.request_timeout_secs
            );
        }
    }

    Ok(())
}
