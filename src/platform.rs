//! Platform detection and per-user default locations.
use std::fmt;
use std::path::PathBuf;

/// Detected operating system platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux and other Unix-like systems.
    Linux,
    /// macOS.
    MacOs,
    /// Windows.
    Windows,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::MacOs => write!(f, "macos"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

/// Environment variables consulted when computing default locations.
///
/// Captured once so that path resolution is a pure function of this struct,
/// which keeps it testable without touching the process environment.
#[derive(Debug, Clone, Default)]
pub struct Env {
    /// `HOME`
    pub home: Option<PathBuf>,
    /// `USERPROFILE`
    pub user_profile: Option<PathBuf>,
    /// `APPDATA`
    pub app_data: Option<PathBuf>,
    /// `LOCALAPPDATA`
    pub local_app_data: Option<PathBuf>,
    /// `XDG_CONFIG_HOME`
    pub xdg_config_home: Option<PathBuf>,
    /// `XDG_DATA_HOME`
    pub xdg_data_home: Option<PathBuf>,
    /// `XDG_CACHE_HOME`
    pub xdg_cache_home: Option<PathBuf>,
}

impl Env {
    /// Read the relevant variables from the process environment.
    #[must_use]
    pub fn capture() -> Self {
        let var = |name: &str| {
            std::env::var_os(name)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };
        Self {
            home: var("HOME"),
            user_profile: var("USERPROFILE"),
            app_data: var("APPDATA"),
            local_app_data: var("LOCALAPPDATA"),
            xdg_config_home: var("XDG_CONFIG_HOME"),
            xdg_data_home: var("XDG_DATA_HOME"),
            xdg_cache_home: var("XDG_CACHE_HOME"),
        }
    }
}

/// Platform information for the current system.
#[derive(Debug, Clone)]
pub struct Platform {
    /// Operating system.
    pub os: Os,
    /// Environment snapshot used for default paths.
    pub env: Env,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub fn detect() -> Self {
        Self {
            os: Self::detect_os(),
            env: Env::capture(),
        }
    }

    /// Create a platform with explicit values.
    #[must_use]
    pub const fn new(os: Os, env: Env) -> Self {
        Self { os, env }
    }

    /// `true` on Windows.
    #[must_use]
    pub fn is_windows(&self) -> bool {
        self.os == Os::Windows
    }

    /// The user's home directory.
    fn home(&self) -> Option<PathBuf> {
        if self.is_windows() {
            self.env
                .user_profile
                .clone()
                .or_else(|| self.env.home.clone())
        } else {
            self.env.home.clone()
        }
    }

    /// Default per-user module installation root.
    ///
    /// - Windows: `~/Documents/PowerShell/Modules`
    /// - elsewhere: `$XDG_DATA_HOME/powershell/Modules`, falling back to
    ///   `~/.local/share/powershell/Modules`
    #[must_use]
    pub fn user_module_root(&self) -> Option<PathBuf> {
        if self.is_windows() {
            return self
                .home()
                .map(|h| h.join("Documents").join("PowerShell").join("Modules"));
        }
        self.env
            .xdg_data_home
            .clone()
            .or_else(|| self.home().map(|h| h.join(".local").join("share")))
            .map(|d| d.join("powershell").join("Modules"))
    }

    /// Default location of the settings document.
    ///
    /// - Windows: `%APPDATA%\psmod\settings.json`
    /// - elsewhere: `$XDG_CONFIG_HOME/psmod/settings.json`, falling back to
    ///   `~/.config/psmod/settings.json`
    #[must_use]
    pub fn settings_path(&self) -> Option<PathBuf> {
        let base = if self.is_windows() {
            self.env.app_data.clone().or_else(|| {
                self.home()
                    .map(|h| h.join("AppData").join("Roaming"))
            })
        } else {
            self.env
                .xdg_config_home
                .clone()
                .or_else(|| self.home().map(|h| h.join(".config")))
        };
        base.map(|b| b.join("psmod").join("settings.json"))
    }

    /// Log file for a run of `command`.
    ///
    /// - Windows: `%LOCALAPPDATA%\psmod\logs\<command>.log`
    /// - elsewhere: `$XDG_CACHE_HOME/psmod/<command>.log`, falling back to
    ///   `~/.cache/psmod/<command>.log`
    #[must_use]
    pub fn log_file(&self, command: &str) -> Option<PathBuf> {
        let dir = if self.is_windows() {
            self.env
                .local_app_data
                .clone()
                .or_else(|| self.home().map(|h| h.join("AppData").join("Local")))
                .map(|d| d.join("psmod").join("logs"))
        } else {
            self.env
                .xdg_cache_home
                .clone()
                .or_else(|| self.home().map(|h| h.join(".cache")))
                .map(|d| d.join("psmod"))
        };
        dir.map(|d| d.join(format!("{command}.log")))
    }

    const fn detect_os() -> Os {
        if cfg!(target_os = "windows") {
            Os::Windows
        } else if cfg!(target_os = "macos") {
            Os::MacOs
        } else {
            Os::Linux
        }
    }
}
