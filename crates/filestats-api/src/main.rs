use filestats_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    let (_state, router) = filestats_api::setup::initialize_app(config.clone()).await?;

    filestats_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
