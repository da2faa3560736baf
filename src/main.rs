use std::str::FromStr;

use clap::{error::ErrorKind, Parser};
use log::{error, info, LevelFilter};

use vhost_deploy::cli::Cli;
use vhost_deploy::config::DeployConfig;
use vhost_deploy::provision::{self, Provisioner};
use vhost_deploy::ssh::SshConnector;
use vhost_deploy::vhost::VhostTemplates;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    // init logger
    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::from_str(&cli.log_level).unwrap_or(LevelFilter::Info))
        .init();

    let config = match DeployConfig::from_cli(&cli) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Invalid parameters: {:#}", e);
            std::process::exit(1);
        }
    };
    log::debug!("{:?}", config);

    let templates = match VhostTemplates::load(&config.vhosts_dir) {
        Ok(templates) => templates,
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    };

    let provisioner = Provisioner::new(
        config.site.clone(),
        &templates,
        config.github.clone(),
        config.enable_ssl,
    );

    match provision::deploy(&SshConnector, &config.connection, &provisioner).await {
        Ok(_) => {
            info!("SSH connection closed gracefully!");
            std::process::exit(0);
        }
        Err(e) => {
            error!("Provisioning failed: {:#}", e);
            std::process::exit(1);
        }
    }
}
