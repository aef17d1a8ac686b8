//! Checks that the configured Google API key works: lists the models it can
//! see, then tries a short generation, walking a fallback list on failure.

use clap::Parser;
use quiz_backend::config::Config;
use quiz_backend::services::ai_service::GeminiService;
use tracing::{error, info, warn};

const DEFAULT_FALLBACKS: [&str; 4] = [
    "models/gemini-pro",
    "gemini-1.5-flash",
    "gemini-2.0-flash-exp",
    "gemini-1.5-pro",
];

#[derive(Parser, Debug)]
#[command(version, about = "Probe the Gemini API key and available models")]
struct Args {
    /// Model tried first
    #[arg(long, default_value = "gemini-pro")]
    model: String,

    /// Models tried in order when the first one fails
    #[arg(long = "fallback")]
    fallbacks: Vec<String>,

    #[arg(long, default_value = "Say hello in 3 words")]
    prompt: String,
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 14 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..10].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();
    let args = Args::parse();
    let config = Config::from_env()?;

    if config.google_api_key.is_empty() {
        anyhow::bail!("GOOGLE_API_KEY not found in environment or .env file");
    }
    info!("API key loaded: {}", mask_key(&config.google_api_key));

    let gemini = GeminiService::from_config(&config)?;

    info!("Fetching available models...");
    let models = gemini.list_models().await?;
    if models.is_empty() {
        warn!("No models found");
    } else {
        info!("Found {} available models:", models.len());
        for model in &models {
            info!("  - {}", model.name);
        }
    }

    info!("Testing content generation with {}...", args.model);
    match gemini.generate_content(&args.model, &args.prompt).await {
        Ok(text) => {
            info!("Content generation successful!");
            info!("Response: {:?}", text.trim());
            return Ok(());
        }
        Err(e) => error!("Content generation failed: {}", e),
    }

    let fallbacks: Vec<String> = if args.fallbacks.is_empty() {
        DEFAULT_FALLBACKS.iter().map(|m| m.to_string()).collect()
    } else {
        args.fallbacks
    };

    info!("Trying alternative model names...");
    match gemini.first_working_model(&fallbacks, "Hi").await {
        Ok((model, _)) => info!("{} works!", model),
        Err(e) => anyhow::bail!("no candidate model worked, last error: {}", e),
    }

    Ok(())
}
