// src/cli.rs
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// API server port
    #[arg(long, env = "WEB_PORT")]
    pub port: Option<u16>,

    /// Backend base URL
    #[arg(long, env = "BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Backend project API key
    #[arg(long, env = "BACKEND_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}
