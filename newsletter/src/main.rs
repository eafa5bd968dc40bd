use anyhow::{bail, Result};
use clap::Parser;
use newsletter::external::{NewsletterClient, StaticToken};
use newsletter::{submit, Cli, Commands, FormState, Settings, Tone, API_URL_VAR};

fn resolve_settings(api_url: Option<String>) -> Result<Settings> {
    match api_url {
        Some(api_url) => Ok(Settings::with_api_url(api_url)),
        None => Settings::from_env(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config => {
            let settings = resolve_settings(cli.api_url)?;
            println!("🌐 {}: {}", API_URL_VAR, settings.api_url);
            println!("📮 Endpoint: {}", settings.newsletter_endpoint());
            println!(
                "🔑 {}: {}",
                newsletter::RECAPTCHA_SITE_KEY_VAR,
                if settings.recaptcha_site_key.is_empty() {
                    "(not set)"
                } else {
                    settings.recaptcha_site_key.as_str()
                }
            );
        }
        Commands::Subscribe { email, token } => {
            let settings = resolve_settings(cli.api_url)?;
            let client = NewsletterClient::new(&settings);
            let challenge = StaticToken(token);

            let mut form = FormState::new();
            form.set_email(email);
            let Some(email) = form.begin_submission() else {
                bail!("a submission is already in flight");
            };

            println!("📨 Subscribing {} via {}", email, client.endpoint());
            let outcome = submit(&email, &challenge, &client).await;
            match &outcome {
                Ok(response) => println!("📥 API response: {}", response),
                Err(e) => eprintln!("❌ Error: {}", e),
            }

            form.finish(&outcome);
            if let Some(notification) = form.notification() {
                let icon = match notification.tone() {
                    Tone::Success => "✅",
                    Tone::Failure => "⚠️ ",
                };
                println!("{} {}", icon, notification.title);
                println!("   {}", notification.description);
            }

            if outcome.is_err() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
