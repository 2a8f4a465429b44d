use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = parley_client::Cli::parse();
    parley_client::init_tracing();

    parley_client::run(cli).await
}
