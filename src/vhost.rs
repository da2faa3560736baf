/// Apache virtual-host templates.
use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

pub const SITES_AVAILABLE: &str = "/etc/apache2/sites-available";

pub const SERVER_ADMIN_PLACEHOLDER: &str = "__SERVER_ADMIN__";
pub const SERVER_NAME_PLACEHOLDER: &str = "__SERVER_NAME__";
pub const PORT_PLACEHOLDER: &str = "__PORT__";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteParameters {
    pub server_admin: String,
    pub server_domain: String,
    pub docker_port: String,
}

impl SiteParameters {
    /// Name of the plain HTTP site file, as passed to `a2ensite`.
    pub fn http_site(&self) -> String {
        format!("{}.conf", self.server_domain)
    }

    pub fn https_site(&self) -> String {
        format!("{}-ssl.conf", self.server_domain)
    }

    pub fn http_config_path(&self) -> String {
        format!("{}/{}", SITES_AVAILABLE, self.http_site())
    }

    pub fn https_config_path(&self) -> String {
        format!("{}/{}", SITES_AVAILABLE, self.https_site())
    }
}

/// The raw `http.conf` / `https.conf` templates.
#[derive(Debug, Clone)]
pub struct VhostTemplates {
    http: String,
    https: String,
}

impl VhostTemplates {
    pub fn new(http: String, https: String) -> Self {
        Self { http, https }
    }

    /// Load `http.conf` and `https.conf` from `dir`.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let http = read_template(dir.join("http.conf"))?;
        let https = read_template(dir.join("https.conf"))?;

        Ok(Self { http, https })
    }

    /// The HTTP vhost only knows the admin and the server name; `__PORT__` is left alone.
    pub fn render_http(&self, site: &SiteParameters) -> String {
        self.http
            .replace(SERVER_ADMIN_PLACEHOLDER, &site.server_admin)
            .replace(SERVER_NAME_PLACEHOLDER, &site.server_domain)
    }

    pub fn render_https(&self, site: &SiteParameters) -> String {
        self.https
            .replace(SERVER_ADMIN_PLACEHOLDER, &site.server_admin)
            .replace(SERVER_NAME_PLACEHOLDER, &site.server_domain)
            .replace(PORT_PLACEHOLDER, &site.docker_port)
    }
}

fn read_template(path: PathBuf) -> Result<String> {
    fs::read_to_string(&path)
        .with_context(|| format!("Failed to read vhost template: {}", path.display()))
}
