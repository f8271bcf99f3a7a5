use clap::Parser;
use cobalt_proxy::cli::{self, Cli};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "cobalt_proxy=info,tower_http=info".to_string()),
        )
        .init();

    let cli = Cli::parse();
    if let Err(error) = cli::execute(cli).await {
        eprintln!("Server error: {}", error.message_text());
        std::process::exit(1);
    }
}
