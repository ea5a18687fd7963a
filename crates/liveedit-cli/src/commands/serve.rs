use anyhow::Result;
use liveedit_config::Config;
use liveedit_server::LiveEditServer;
use std::path::PathBuf;

pub async fn handle(
    mut config: Config,
    host: Option<String>,
    port: Option<u16>,
    static_dir: Option<PathBuf>,
) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(static_dir) = static_dir {
        config.server.static_dir = static_dir;
    }

    println!("Starting liveedit on http://{}", config.server.bind_addr());
    LiveEditServer::serve(&config).await?;

    Ok(())
}
