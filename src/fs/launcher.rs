// src/fs/launcher.rs
//! Hand a file over to the desktop's default application.

use std::{io, path::Path, process::Command};

/// Opens a file with whatever the platform considers the default handler.
pub trait Launcher {
    fn launch(&self, path: &Path) -> io::Result<()>;
}

/// Uses `xdg-open`, `open` or `start` depending on the platform. The path is
/// passed as its own argument, never through a shell string.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&self, path: &Path) -> io::Result<()> {
        let mut cmd = opener_command();
        cmd.arg(path);
        // Detach: the viewer outlives this call.
        cmd.spawn().map(|_| ())
    }
}

#[cfg(target_os = "windows")]
fn opener_command() -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]);
    cmd
}

#[cfg(target_os = "macos")]
fn opener_command() -> Command {
    Command::new("open")
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn opener_command() -> Command {
    Command::new("xdg-open")
}
