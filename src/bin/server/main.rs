mod handler;
mod notify;
mod server;
mod stores;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tokio::task;
use tracing::info;
use tracing_subscriber::EnvFilter;

use contact_desk::config::Config;

use notify::Notifier;
use server::{PersistedState, Server};

#[derive(Parser, Debug)]
#[command(name = "server", about = "Contact desk persistence and notification server")]
struct CliArgs {
    /// Path to the desk.toml config file
    #[arg(short, long, default_value = "./desk.toml")]
    config: PathBuf,

    /// Listen address, overriding the config file
    #[arg(short, long)]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = CliArgs::parse();
    let config = Config::load(&args.config)?;
    let addr = args.addr.unwrap_or_else(|| config.server.listen_addr.clone());
    let state_path = config.server.state_file.clone();

    // Run server
    let state = load_state(&state_path)?.unwrap_or_default();
    let server = Arc::new(Server::new(state, Notifier::new(config.notifier)));
    server.set_interrupt_handler();

    run_server(server.clone(), &addr).await;

    let server = Arc::into_inner(server).expect("some connection tasks did not shut down in time");

    // Save server state
    save_state(&server, &state_path)?;

    Ok(())
}

async fn run_server(server: Arc<Server>, addr: &str) {
    info!(%addr, "starting the server");

    let future = server.listen(addr);
    let run_result = task::LocalSet::new().run_until(future).await;

    match run_result {
        Ok(()) => info!("server stopped"),
        Err(e) => tracing::error!(error = %e, "server shutdown with error"),
    }
}

fn save_state(server: &Server, save_path: &Path) -> std::io::Result<()> {
    info!(path = %save_path.display(), "saving server state");

    let mut file = File::create(save_path)?;

    bincode::serialize_into(&mut file, &server.state())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    Ok(())
}

fn load_state(save_path: &Path) -> Result<Option<PersistedState>, std::io::Error> {
    if Path::exists(save_path) {
        info!(path = %save_path.display(), "loading existing server state");

        let file = File::open(save_path)?;

        let state = bincode::deserialize_from::<_, PersistedState>(file)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        Ok(Some(state))
    } else {
        Ok(None)
    }
}
