mod cli;

use plexletter::{
    config,
    mail::{Mailer, Recipients, SendEmailRequest, SmtpMailer},
    metadata::search_media,
    newsletter::GenerateRequest,
    server::{self, AppContext},
};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = config::load_with_env(config_path)?;

    // Override host/port from CLI if specified
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting plexletter for {}", config.newsletter.owner_name);
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    server::start_server(config).await
}

async fn search(query: &str, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_with_env(config_path)?;
    let ctx = AppContext::from_config(config);

    let hits = search_media(ctx.metadata.as_ref(), query).await?;
    if hits.is_empty() {
        println!("No results for {:?}", query);
        return Ok(());
    }

    for hit in &hits {
        println!(
            "{:>8}  {:<8}  {} ({})",
            hit.id,
            hit.kind.label(),
            hit.title,
            hit.year
        );
    }

    Ok(())
}

async fn generate(
    payload: &Path,
    output: Option<&Path>,
    raw: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = config::load_with_env(config_path)?;
    let ctx = AppContext::from_config(config);

    let content = std::fs::read_to_string(payload)
        .with_context(|| format!("Failed to read payload: {:?}", payload))?;
    let request: GenerateRequest = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse payload: {:?}", payload))?;

    let html = if raw {
        let document = ctx.newsletter.assemble(request).await;
        ctx.newsletter.render(&document)?
    } else {
        ctx.newsletter.generate(request).await?
    };

    match output {
        Some(path) => {
            std::fs::write(path, &html)
                .with_context(|| format!("Failed to write output: {:?}", path))?;
            println!("Wrote {} bytes to {}", html.len(), path.display());
        }
        None => println!("{}", html),
    }

    Ok(())
}

async fn send(
    to: Vec<String>,
    subject: String,
    html_path: &Path,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = config::load_with_env(config_path)?;

    let html = std::fs::read_to_string(html_path)
        .with_context(|| format!("Failed to read HTML file: {:?}", html_path))?;

    let email = SendEmailRequest {
        recipients: Some(Recipients::List(to)),
        subject: Some(subject),
        html: Some(html),
    }
    .into_email()
    .context("Missing recipients, subject, or HTML content")?;

    let mailer = SmtpMailer::from_config(&config.mail)?;
    mailer.send(&email).await?;

    println!("Email sent to {} recipient(s)", email.to.len());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "plexletter=trace,tower_http=debug".to_string()
        } else {
            "plexletter=debug,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, config_path))
        }
        Commands::Search { query } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(search(&query, config_path))
        }
        Commands::Generate {
            payload,
            output,
            raw,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(generate(&payload, output.as_deref(), raw, config_path))
        }
        Commands::Send { to, subject, html } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(send(to, subject, &html, config_path))
        }
        Commands::Validate {
            config: validate_path,
        } => {
            validate_config(validate_path.as_deref().or(config_path))
        }
        Commands::Version => {
            println!("plexletter {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            config::Config::default()
        }
    };

    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Owner: {}", config.newsletter.owner_name);
    println!(
        "  TMDB key: {}",
        if config.tmdb.api_key.trim().is_empty() { "missing" } else { "set" }
    );
    println!(
        "  OMDb key: {}",
        if config.omdb.api_key.is_some() { "set" } else { "not set (critic scores disabled)" }
    );
    println!(
        "  Mail: {} via {}:{} ({})",
        if config.mail.has_credentials() { "configured" } else { "not configured" },
        config.mail.smtp_host,
        config.mail.smtp_port,
        config.mail.tls
    );

    Ok(())
}
