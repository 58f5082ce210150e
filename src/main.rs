use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use social_login_adapter::{
    AdapterConfig, AdapterError, AuthorizationResponse, CustomProvider, FacebookProvider,
    GraphProvider, ProfileFields, ProviderApiAdapter, TracingLogger,
};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Parser)]
#[command(
    name = "social-login",
    about = "Exchange Facebook login codes for access tokens and fetch user profiles as JSON."
)]
struct Cli {
    #[command(flatten)]
    app: AppArgs,

    /// Log request details to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct AppArgs {
    #[arg(long, env = "FB_APP_ID")]
    app_id: String,

    #[arg(long, env = "FB_APP_SECRET", hide_env_values = true)]
    app_secret: String,

    #[arg(long, env = "FB_REDIRECT_URI")]
    redirect_uri: String,

    /// Graph API version, e.g. `v19.0`.
    #[arg(long, env = "FB_GRAPH_VERSION")]
    graph_version: Option<String>,

    /// Graph-compatible base URL used instead of facebook.com.
    #[arg(long, conflicts_with = "graph_version")]
    base_url: Option<String>,

    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Sign profile requests with `appsecret_proof`.
    #[arg(long)]
    appsecret_proof: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the authorization dialog URL.
    DialogUrl,
    /// Exchange an authorization code for an access token.
    Exchange {
        #[arg(long, required_unless_present = "callback_url")]
        code: Option<String>,

        /// Full redirect URL the provider sent the browser to.
        #[arg(long, conflicts_with = "code")]
        callback_url: Option<String>,
    },
    /// Fetch the profile behind an access token.
    Profile {
        #[arg(long, env = "FB_ACCESS_TOKEN", hide_env_values = true)]
        token: String,

        /// Comma-separated field list, e.g. `id,name,email`.
        #[arg(long, default_value = "")]
        fields: ProfileFields,
    },
}

#[tokio::main]
async fn main() -> Result<(), AdapterError> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install tracing subscriber: {err}");
    }

    let config = AdapterConfig::new(
        cli.app.app_id.clone(),
        cli.app.app_secret.clone(),
        cli.app.redirect_uri.clone(),
    )
    .with_timeout(Duration::from_secs(cli.app.timeout_secs))
    .with_appsecret_proof(cli.app.appsecret_proof);

    match (&cli.app.base_url, &cli.app.graph_version) {
        (Some(base_url), _) => {
            run(CustomProvider::from_base_url("custom", base_url), config, cli.command).await
        }
        (None, Some(version)) => {
            run(FacebookProvider::with_version(version), config, cli.command).await
        }
        (None, None) => run(FacebookProvider::new(), config, cli.command).await,
    }
}

async fn run<P: GraphProvider>(
    provider: P,
    config: AdapterConfig,
    command: Command,
) -> Result<(), AdapterError> {
    let adapter = ProviderApiAdapter::new(provider, config)?.with_logger(TracingLogger);

    match command {
        Command::DialogUrl => {
            println!("{}", adapter.redirect_target()?);
            Ok(())
        }
        Command::Exchange { code, callback_url } => {
            let code = match (code, callback_url) {
                (Some(code), _) => code,
                (None, Some(url)) => AuthorizationResponse::from_url(&url)?.code,
                (None, None) => return Err(AdapterError::MissingAuthorizationCode),
            };
            let tokens = adapter.token_response(&code).await?;
            print_json(&tokens)
        }
        Command::Profile { token, fields } => {
            let profile = adapter.fetch_profile(&token, &fields).await?;
            print_json(&profile)
        }
    }
}

fn print_json(value: &impl Serialize) -> Result<(), AdapterError> {
    let output = serde_json::to_string_pretty(value)?;
    println!("{output}");
    Ok(())
}
