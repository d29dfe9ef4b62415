use super::{AppConfig, DEFAULT_CONFIG_PATH};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "sprint-horoscope")]
#[command(about = "Serves sarcastic sprint horoscopes for your team", version)]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Override server.host
    #[arg(long)]
    pub host: Option<String>,

    /// Override server.port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override database.url (`memory` keeps results in process)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Never call the generation service; every horoscope uses the template
    #[arg(long)]
    pub offline: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

impl CliArgs {
    /// 命令列參數覆蓋設定檔
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = &self.database_url {
            config.database.url = url.clone();
        }
        if self.offline {
            config.generation.enabled = false;
        }
        config.logging.verbose |= self.verbose;
        config.logging.json |= self.json_logs;
    }
}
