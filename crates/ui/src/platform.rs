use std::process::Command;

use url::Url;

use services::{LaunchError, ShareLauncher};

/// Opens links in the system browser, outside the webview.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl ShareLauncher for SystemLauncher {
    fn open(&self, url: &Url) -> Result<(), LaunchError> {
        let mut command = opener(url.as_str()).ok_or(LaunchError::Unavailable)?;
        command
            .spawn()
            .map(|_| ())
            .map_err(|err| LaunchError::Failed(err.to_string()))
    }
}

#[cfg(target_os = "macos")]
fn opener(url: &str) -> Option<Command> {
    let mut command = Command::new("open");
    command.arg(url);
    Some(command)
}

#[cfg(target_os = "windows")]
fn opener(url: &str) -> Option<Command> {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", "", url]);
    Some(command)
}

#[cfg(all(unix, not(target_os = "macos")))]
fn opener(url: &str) -> Option<Command> {
    let mut command = Command::new("xdg-open");
    command.arg(url);
    Some(command)
}

#[cfg(not(any(unix, target_os = "windows")))]
fn opener(_url: &str) -> Option<Command> {
    None
}
