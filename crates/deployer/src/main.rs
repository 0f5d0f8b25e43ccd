use {clap::Parser, std::process::ExitCode};

#[tokio::main]
async fn main() -> ExitCode {
    let args = deployer::arguments::Arguments::parse();
    observe::tracing::initialize(&args.log_config());
    tracing::info!("running deployer with validated arguments:\n{}", args);
    deployer::main(args).await
}
