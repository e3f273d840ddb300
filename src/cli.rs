use cdn_signer::server::{
    config::{Command, Config},
    router::{create_router, AppState},
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Config::parse();

    // Initialize logging; stdout is reserved for the signed URL
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Command::Sign(args) => {
            let key = cli.key.as_deref().unwrap_or_default();

            match args.to_request(key).sign() {
                Ok(signed) => {
                    debug!(format = %signed.format, hostname = %signed.hostname, "signed url");
                    println!("{}", signed);
                }
                Err(e) => Config::command()
                    .error(ErrorKind::MissingRequiredArgument, e.to_string())
                    .exit(),
            }
        }
        Command::Serve { listen } => {
            let key = cli
                .key
                .clone()
                .filter(|k| !k.is_empty())
                .ok_or_else(|| anyhow::anyhow!("CDN_SIGNING_KEY is required"))?;

            let state = Arc::new(AppState::new(key));
            let app = create_router(state);

            let listener = tokio::net::TcpListener::bind(listen).await?;
            info!("cdn-signer listening on {}", listen);

            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
