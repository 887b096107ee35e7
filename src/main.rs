//! Rolling Release - recreate a rolling GitHub release at the current commit.

use rolling_release::cli;
use std::process;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let exit_code = cli::run().await;
    process::exit(exit_code);
}
