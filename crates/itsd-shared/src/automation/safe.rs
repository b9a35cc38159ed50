//! Allow-listed diagnostic commands.
//!
//! Read-only commands the copilot may offer to run. Execution is simulated:
//! the canned output is returned and nothing touches the host.

use crate::error::{ItsdError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Keys of the allow-list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafeCommand {
    DiskSpace,
    MemoryUsage,
    ProcessList,
    SystemUptime,
    LoggedInUsers,
}

impl SafeCommand {
    pub const ALL: [SafeCommand; 5] = [
        SafeCommand::DiskSpace,
        SafeCommand::MemoryUsage,
        SafeCommand::ProcessList,
        SafeCommand::SystemUptime,
        SafeCommand::LoggedInUsers,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SafeCommand::DiskSpace => "disk_space",
            SafeCommand::MemoryUsage => "memory_usage",
            SafeCommand::ProcessList => "process_list",
            SafeCommand::SystemUptime => "system_uptime",
            SafeCommand::LoggedInUsers => "logged_in_users",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// The shell command this key stands for
    pub fn command(&self) -> &'static str {
        match self {
            SafeCommand::DiskSpace => "df -h",
            SafeCommand::MemoryUsage => "free -h",
            SafeCommand::ProcessList => "ps aux",
            SafeCommand::SystemUptime => "uptime",
            SafeCommand::LoggedInUsers => "who",
        }
    }

    fn simulated_output(&self) -> &'static str {
        match self {
            SafeCommand::DiskSpace => {
                "Filesystem      Size  Used Avail Use% Mounted on\n\
                 /dev/sda1        20G   15G  4.5G  77% /\n"
            }
            SafeCommand::MemoryUsage => {
                "              total        used        free      shared  buff/cache   available\n\
                 Mem:           7.7G        2.1G        3.2G        256M        2.4G        5.1G\n\
                 Swap:          2.0G          0B        2.0G"
            }
            SafeCommand::ProcessList => {
                "USER       PID %CPU %MEM    VSZ   RSS TTY      STAT START   TIME COMMAND\n\
                 root         1  0.0  0.0 169316 13128 ?        Ss   10:00   0:01 /sbin/init"
            }
            SafeCommand::SystemUptime => {
                "10:00:30 up 2 days,  3:15,  1 user,  load average: 0.05, 0.10, 0.15"
            }
            SafeCommand::LoggedInUsers => "user1    pts/0        2023-12-01 09:30 (192.168.1.100)",
        }
    }
}

impl std::fmt::Display for SafeCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Result of a (simulated) run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafeCommandOutput {
    pub key: SafeCommand,
    pub command: String,
    pub output: String,
    pub executed_at: DateTime<Utc>,
}

/// Run an allow-listed command by key
pub fn execute_safe_command(key: &str) -> Result<SafeCommandOutput> {
    let cmd = SafeCommand::from_key(key).ok_or_else(|| ItsdError::UnknownCommand(key.to_string()))?;
    tracing::debug!(key, command = cmd.command(), "simulating safe command");
    Ok(SafeCommandOutput {
        key: cmd,
        command: cmd.command().to_string(),
        output: cmd.simulated_output().to_string(),
        executed_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_key() {
        let out = execute_safe_command("disk_space").unwrap();
        assert_eq!(out.command, "df -h");
        assert!(out.output.contains("Filesystem"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = execute_safe_command("rm_rf").unwrap_err();
        assert!(matches!(err, ItsdError::UnknownCommand(ref k) if k == "rm_rf"));
    }

    #[test]
    fn test_keys_roundtrip() {
        for cmd in SafeCommand::ALL {
            assert_eq!(SafeCommand::from_key(cmd.key()), Some(cmd));
        }
    }
}
