use clap::Parser;

use staticd::config::ServerArgs;
use staticd::server::listener;
use staticd::server::static_files::StaticFiles;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let args = ServerArgs::parse();

    if !args.root_dir.is_dir() {
        println!(
            "The directory {} does not exist on the server",
            args.root_dir.display()
        );
        return Ok(());
    }

    let files = StaticFiles::new(args.root_dir);

    tokio::select! {
        res = listener::run(args.port, files) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
