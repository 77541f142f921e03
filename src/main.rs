use clap::Parser;

use thesis_lab::adapter::inbound::cli::{self, command::Cli, output};
use thesis_lab::infrastructure::operator::entry::Operator;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let _ = cli::operator::install(Box::new(Operator));
    let cli = Cli::parse();

    if let Err(e) = cli::execute(&cli).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
