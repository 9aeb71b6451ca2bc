use anyhow::{Context, Result};
use clap::Parser;
use keystone_auth::client::{AddAuthentication, KeepaliveKeystoneClient, KeystoneClient};
use keystone_auth::observability::metrics::get_metrics;
use keystone_auth::utils::config_loader;
use keystone_auth::utils::logging;
use keystone_auth::utils::logging::LogLevel;
use reqwest::{Client, Method, Request, Url};
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "keystone-auth.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    /// GET this url with the token injected and report the status
    #[arg(long)]
    probe: Option<Url>,
    /// print prometheus metrics before exiting
    #[arg(long)]
    print_metrics: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load YAML config, init logging
    // -------------------------------

    let args = Args::parse();
    let service_config = config_loader::run(&args.config).await?;
    logging::run(&service_config, args.log_level).await?;

    // -------------------------------
    // 2. Build keystone client and authenticate
    // -------------------------------

    if service_config.settings.keepalive {
        let mut client = KeepaliveKeystoneClient::from_config(&service_config)?;
        match &args.probe {
            Some(url) => probe(&mut client, url).await?,
            None => client.inner_mut().authenticate().await?,
        }
        report(client.inner());
    } else {
        let mut client = KeystoneClient::from_config(&service_config)?;
        match &args.probe {
            Some(url) => probe(&mut client, url).await?,
            None => client.authenticate().await?,
        }
        report(&client);
    }

    // -------------------------------
    // 3. Metrics
    // -------------------------------

    if args.print_metrics {
        println!("{}", get_metrics().await.encode()?);
    }
    Ok(())
}

/// GET `url` with the token injected and log the status.
async fn probe<C: AddAuthentication>(client: &mut C, url: &Url) -> Result<()> {
    let mut request = Request::new(Method::GET, url.clone());
    client.add_authentication(&mut request).await?;
    let response = Client::new()
        .execute(request)
        .await
        .with_context(|| format!("probe request to {} failed", url))?;
    info!(url = %url, status = %response.status(), "probe finished");
    Ok(())
}

fn report(client: &KeystoneClient) {
    if let Some(token) = client.token() {
        info!(
            protocol = ?client.state().protocol(),
            issued_at = %token.issued_at,
            expires_at = %token.expires_at,
            "token acquired"
        );
    }
}
