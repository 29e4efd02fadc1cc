use clap::Parser;
use dotenv::dotenv;
use std::process;
use support_query::cli::Args;

#[tokio::main]
async fn main() {
    dotenv().ok();
    let args = Args::parse();
    let default_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    if let Err(err) = support_query::run(args).await {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
