use {clap::Parser, pbm_bootstrap::bootstrap::BootstrapError};

#[tokio::main]
async fn main() {
    let args = pbm_bootstrap::arguments::Arguments::parse();
    observe::tracing::initialize(&args.logging.config());
    tracing::info!("running pbm-bootstrap with validated arguments:\n{}", args);
    if let Err(err) = pbm_bootstrap::run(args).await {
        match err.downcast_ref::<BootstrapError>() {
            Some(failure) => tracing::error!(
                step = %failure.step(),
                kind = ?failure.kind(),
                "bootstrap failed: {err:?}"
            ),
            None => tracing::error!("bootstrap failed: {err:?}"),
        }
        std::process::exit(1);
    }
}
