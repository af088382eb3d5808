#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use args::{Args, Command};
use clap::Parser;
use secrecy::ExposeSecret;
use tenor_config::Config;
use tenor_intent::{AnalyzeRequest, Analyzer, AnalyzerSettings};
use tenor_llm::{Gateway, HttpTransport, Message, Request};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args.config)?;

    // Initialize logging
    tenor_telemetry::init(&config.telemetry)?;

    tracing::debug!(
        config_path = %args.config.display(),
        provider = %config.provider.name,
        model = %config.provider.model,
        "starting tenor"
    );

    let transport = HttpTransport::with_timeout(config.http.timeout_duration()?)?;
    let gateway = Gateway::new(transport);

    // Abandon the in-flight request on Ctrl+C
    let shutdown = CancellationToken::new();
    let shutdown_clone = shutdown.clone();

    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_clone.cancel();
    });

    let output = match args.command {
        Command::Chat {
            prompt,
            system,
            json_schema,
        } => {
            let request = chat_request(&config, prompt, system, json_schema.as_deref())?;
            let response = gateway.chat_with_cancel(&request, &shutdown).await?;
            serde_json::to_string_pretty(&response)?
        }
        Command::Analyze { text } => {
            let text = match text {
                Some(text) => text,
                None => read_stdin()?,
            };

            let analyzer = Analyzer::new(gateway, AnalyzerSettings::from_config(&config));
            let request = AnalyzeRequest { text };
            let reply = tokio::select! {
                () = shutdown.cancelled() => anyhow::bail!("analysis cancelled"),
                reply = analyzer.handle(&request) => reply,
            };
            serde_json::to_string_pretty(&reply)?
        }
    };

    println!("{output}");
    Ok(())
}

fn chat_request(
    config: &Config,
    prompt: String,
    system: Option<String>,
    json_schema: Option<&Path>,
) -> anyhow::Result<Request> {
    let provider = &config.provider;

    let mut messages = Vec::with_capacity(2);
    if let Some(system) = system {
        messages.push(Message::system(system));
    }
    messages.push(Message::user(prompt));

    let mut request = Request::new(
        provider.name.as_str(),
        provider.api_key.expose_secret(),
        provider.model.as_str(),
    )
    .messages(messages);

    if let Some(url) = &provider.base_url {
        request = request.custom_url(url.as_str());
    }

    if let Some(path) = json_schema {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read schema file {}", path.display()))?;
        let schema = serde_json::from_str(&raw).with_context(|| format!("invalid JSON in {}", path.display()))?;
        request = request.json_schema(schema);
    }

    Ok(request)
}

fn read_stdin() -> anyhow::Result<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("failed to read post text from stdin")?;
    Ok(text.trim_end().to_owned())
}

/// Wait for a shutdown signal (`SIGINT` or `SIGTERM`)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::debug!("shutdown signal received");
}
