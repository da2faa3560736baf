/// SSH related functionality.
use std::future::Future;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use russh::{
    client::{self, Config, Handle, Msg},
    keys::ssh_key,
    Channel, Disconnect,
};

/// Everything needed to open a password-authenticated SSH session.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParameters {
    host: String,
    port: u16,
    username: String,
    password: String,
}

impl ConnectionParameters {
    pub fn new(host: String, username: String, password: String) -> Self {
        Self {
            host,
            port: 22,
            username,
            password,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn user(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn with_port(&mut self, port: u16) {
        self.port = port;
    }
}

impl std::fmt::Display for ConnectionParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}:{}", self.username, self.host, self.port)
    }
}

// Keep the password out of debug logs.
impl std::fmt::Debug for ConnectionParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionParameters")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the remote side closed the channel without reporting a code.
    pub exit_status: Option<u32>,
    pub signal: Option<String>,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.exit_status == Some(0)
    }
}

/// A remote shell that runs one command at a time.
pub trait RemoteShell {
    fn current_user(&self) -> &str;

    fn execute_command(&self, command: &str) -> impl Future<Output = Result<CommandResult>>;

    /// Graceful shutdown of the underlying connection.
    fn close(self) -> impl Future<Output = Result<()>>;

    fn execute_with_sudo(&self, command: &str) -> impl Future<Output = Result<CommandResult>> {
        async move {
            if self.current_user() == "root" {
                self.execute_command(command).await
            } else {
                let quoted_command = shell_words::quote(command);
                let sudo_command = format!("sudo sh -c {}", quoted_command);
                self.execute_command(&sudo_command).await
            }
        }
    }
}

/// Opens a [`RemoteShell`] from connection parameters.
pub trait Connector {
    type Shell: RemoteShell;

    fn connect(
        &self,
        params: &ConnectionParameters,
    ) -> impl Future<Output = Result<Self::Shell>>;
}

/// Connector backed by russh.
#[derive(Debug, Default, Clone, Copy)]
pub struct SshConnector;

impl Connector for SshConnector {
    type Shell = Session;

    async fn connect(&self, params: &ConnectionParameters) -> Result<Session> {
        let config = Arc::new(Config::default());

        let handler = Handler {};
        let mut session = client::connect(config, (params.host(), params.port()), handler)
            .await
            .with_context(|| format!("Failed to reach {}:{}", params.host(), params.port()))?;

        let auth_result = session
            .authenticate_password(params.user(), params.password())
            .await?;

        if !auth_result.success() {
            return Err(anyhow!(
                "SSH authentication failed for user: {}",
                params.user()
            ));
        }

        Ok(Session {
            user: params.user().to_string(),
            handler: session,
        })
    }
}

pub struct Session {
    user: String,
    handler: Handle<Handler>,
}

impl RemoteShell for Session {
    fn current_user(&self) -> &str {
        &self.user
    }

    async fn execute_command(&self, command: &str) -> Result<CommandResult> {
        let mut channel = self.handler.channel_open_session().await?;
        channel.exec(true, command).await?;

        let result = wait_result_from_channel(&mut channel).await?;
        Ok(result)
    }

    async fn close(self) -> Result<()> {
        self.handler
            .disconnect(Disconnect::ByApplication, "", "English")
            .await?;
        Ok(())
    }
}

pub async fn wait_result_from_channel(channel: &mut Channel<Msg>) -> Result<CommandResult> {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let mut result = CommandResult::default();

    // exit-status may arrive after EOF, so only a close ends the exchange
    while let Some(data) = channel.wait().await {
        match data {
            russh::ChannelMsg::Data { data } => {
                stdout.extend_from_slice(&data);
            }
            russh::ChannelMsg::ExtendedData { data, ext } => {
                if ext == 1 {
                    stderr.extend_from_slice(&data);
                }
            }
            russh::ChannelMsg::ExitStatus { exit_status } => {
                result.exit_status = Some(exit_status);
            }
            russh::ChannelMsg::ExitSignal { signal_name, .. } => {
                result.signal = Some(format!("{:?}", signal_name));
            }
            russh::ChannelMsg::Close => break,
            _ => {}
        }
    }

    result.stdout = String::from_utf8_lossy(&stdout).into_owned();
    result.stderr = String::from_utf8_lossy(&stderr).into_owned();

    Ok(result)
}

#[derive(Debug)]
struct Handler {}

impl client::Handler for Handler {
    type Error = russh::Error;

    fn check_server_key(
        &mut self,
        _server_public_key: &ssh_key::PublicKey,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send {
        async { Ok(true) }
    }
}
