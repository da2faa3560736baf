/// CLI interface.
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(name = "vhost-deploy", version)]
#[command(
    about = "Provision an Apache virtual host over SSH and clone a GitHub project into it"
)]
pub struct Cli {
    /// SSH host
    pub host: Option<String>,

    /// Docker port to proxy
    #[arg(short = 'c', long)]
    pub docker_port: Option<String>,

    /// Server SSH password (prompted for when missing)
    #[arg(short = 'p', long)]
    pub ssh_password: Option<String>,

    /// Server SSH username [default: root]
    #[arg(short = 'u', long)]
    pub ssh_username: Option<String>,

    /// Server SSH port [default: 22]
    #[arg(short = 'P', long)]
    pub ssh_port: Option<u16>,

    /// Server admin email address
    #[arg(short = 'e', long)]
    pub server_admin: Option<String>,

    /// New domain/subdomain to create, e.g. sub.example.com
    #[arg(short = 'd', long)]
    pub server_domain: Option<String>,

    /// GitHub PAT token
    #[arg(short = 'T', long)]
    pub github_token: Option<String>,

    /// GitHub username
    #[arg(short = 'U', long)]
    pub github_username: Option<String>,

    /// GitHub repository name, e.g. my-repo
    #[arg(short = 'R', long)]
    pub github_repository: Option<String>,

    /// Directory holding http.conf and https.conf [default: ./vhosts]
    #[arg(long)]
    pub vhosts_dir: Option<PathBuf>,

    /// Also enable the <domain>-ssl.conf site
    #[arg(long)]
    pub enable_ssl: bool,

    /// Optional TOML file providing any of the values above
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
