use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the API, overrides API_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Subscribe an email address to the newsletter
    Subscribe {
        /// Email address to subscribe
        #[arg(long)]
        email: String,

        /// Verification token to send along, e.g. one issued for a reCAPTCHA test key
        #[arg(long, env = "RECAPTCHA_TOKEN")]
        token: Option<String>,
    },
    /// Print the resolved settings
    Config,
}
