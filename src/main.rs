#[tokio::main]
async fn main() -> chatgpt_relay::error::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("chatgpt_relay=info,serenity=warn"),
    )
    .init();

    if rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .is_err()
    {
        log::debug!("rustls crypto provider already installed");
    }

    log::info!("Starting chatgpt-relay Discord bot");

    match chatgpt_relay::run().await {
        Ok(()) => {
            log::info!("Bot shut down successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Bot encountered an error: {e}");
            Err(e)
        }
    }
}
