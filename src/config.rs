/// Configuration loading and resolution.
use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::cli::Cli;
use crate::github::GitHubParameters;
use crate::ssh::ConnectionParameters;
use crate::vhost::SiteParameters;

pub const DEFAULT_SSH_USERNAME: &str = "root";
pub const DEFAULT_SSH_PORT: u16 = 22;
pub const DEFAULT_VHOSTS_DIR: &str = "./vhosts";

// config like:
// host = "203.0.113.5"
// ssh_username = "root"
// ssh_port = 22
//
// server_admin = "admin@example.com"
// server_domain = "sub.example.com"
// docker_port = "3000"
//
// github_username = "octocat"
// github_repository = "site"
// vhosts_dir = "./vhosts"
// enable_ssl = false
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    pub host: Option<String>,
    pub ssh_username: Option<String>,
    pub ssh_password: Option<String>,
    pub ssh_port: Option<u16>,

    pub server_admin: Option<String>,
    pub server_domain: Option<String>,
    pub docker_port: Option<String>,

    pub github_token: Option<String>,
    pub github_username: Option<String>,
    pub github_repository: Option<String>,

    pub vhosts_dir: Option<PathBuf>,
    pub enable_ssl: Option<bool>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }
}

/// Everything one run needs, validated.
#[derive(Debug)]
pub struct DeployConfig {
    pub connection: ConnectionParameters,
    pub site: SiteParameters,
    pub github: GitHubParameters,
    pub vhosts_dir: PathBuf,
    pub enable_ssl: bool,
}

impl DeployConfig {
    /// Merge the command line over the optional config file, prompting for
    /// the SSH password when neither supplies one.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let file = match cli.config {
            Some(ref path) => Config::load(path)?,
            None => Config::default(),
        };

        Self::resolve(cli, file, |prompt| {
            rpassword::prompt_password(prompt).context("Failed to read password")
        })
    }

    pub fn resolve<F>(cli: &Cli, file: Config, read_password: F) -> Result<Self>
    where
        F: FnOnce(&str) -> Result<String>,
    {
        let host = required("host", cli.host.clone().or(file.host))?;
        let username = cli
            .ssh_username
            .clone()
            .or(file.ssh_username)
            .unwrap_or_else(|| DEFAULT_SSH_USERNAME.to_string());
        let port = cli.ssh_port.or(file.ssh_port).unwrap_or(DEFAULT_SSH_PORT);

        let site = SiteParameters {
            server_admin: required("server-admin", cli.server_admin.clone().or(file.server_admin))?,
            server_domain: required(
                "server-domain",
                cli.server_domain.clone().or(file.server_domain),
            )?,
            docker_port: required("docker-port", cli.docker_port.clone().or(file.docker_port))?,
        };
        validate_domain(&site.server_domain)?;

        let github = GitHubParameters {
            token: required("github-token", cli.github_token.clone().or(file.github_token))?,
            username: required(
                "github-username",
                cli.github_username.clone().or(file.github_username),
            )?,
            repository: required(
                "github-repository",
                cli.github_repository.clone().or(file.github_repository),
            )?,
        };

        let password = match cli.ssh_password.clone().or(file.ssh_password) {
            Some(password) => password,
            None => read_password(&format!("{}@{}'s password: ", username, host))?,
        };
        let password = required("ssh-password", Some(password))?;

        let mut connection = ConnectionParameters::new(host, username, password);
        connection.with_port(port);

        Ok(Self {
            connection,
            site,
            github,
            vhosts_dir: cli
                .vhosts_dir
                .clone()
                .or(file.vhosts_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_VHOSTS_DIR)),
            enable_ssl: cli.enable_ssl || file.enable_ssl.unwrap_or(false),
        })
    }
}

fn required(name: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(anyhow!("Missing required parameter: --{}", name)),
    }
}

// The domain ends up in file names and shell commands.
fn validate_domain(domain: &str) -> Result<()> {
    let valid = domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        && !domain.starts_with('.')
        && !domain.starts_with('-');

    if !valid {
        return Err(anyhow!("Invalid server domain: {}", domain));
    }
    Ok(())
}
