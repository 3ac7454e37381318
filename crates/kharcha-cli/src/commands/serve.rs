//! Web server command

use std::path::Path;

use anyhow::Result;

use kharcha_server::ServerConfig;

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_auth: bool,
    no_encrypt: bool,
    static_dir: Option<&Path>,
) -> Result<()> {
    let db = open_db(db_path, no_encrypt)?;

    let config = ServerConfig {
        require_auth: !no_auth,
        ..Default::default()
    };

    let static_dir = static_dir.and_then(|p| p.to_str());
    kharcha_server::serve_with_config(db, host, port, static_dir, config).await
}
