use base64::{engine::general_purpose, Engine as _};

/// Shell command that writes `content` to `path` verbatim.
///
/// The payload travels base64-encoded, so nothing in it is ever
/// interpreted by the remote shell.
pub fn create_file_command(path: &str, content: &str, mode: Option<&str>) -> String {
    let encoded = general_purpose::STANDARD.encode(content.as_bytes());
    let path = shell_words::quote(path);
    if let Some(mode) = mode {
        format!(
            "echo '{}' | base64 -d > {} && chmod {} {}",
            encoded, path, mode, path
        )
    } else {
        format!("echo '{}' | base64 -d > {}", encoded, path)
    }
}

/// Indent every line of remote output for display under a log line.
pub fn indent_output(output: &str) -> String {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| format!("   {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}
