//! Host platform identification.
//!
//! Platforms are described in the runner's conventions: OS types such as
//! `Linux`, `Darwin` and `Windows_NT`, and architectures such as `x64`,
//! `arm64` and `arm`. Tool crates translate these into vendor naming.

use serde::{Deserialize, Serialize};

/// Operating system family.
///
/// Closed set: any OS type that is neither `Linux` nor `Darwin` is treated as
/// [`Os::Windows`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Linux,
    MacOs,
    Windows,
}

impl Os {
    /// Classify a runner OS type string.
    #[must_use]
    pub fn from_os_type(os_type: &str) -> Self {
        match os_type {
            "Linux" => Self::Linux,
            "Darwin" => Self::MacOs,
            // Windows_NT and every unrecognized OS type
            _ => Self::Windows,
        }
    }
}

impl std::fmt::Display for Os {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::MacOs => write!(f, "darwin"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

/// Platform of the current process. Computed once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Platform {
    /// OS type string as reported by the host (`Linux`, `Darwin`, `Windows_NT`).
    pub os_type: String,
    /// OS family derived from `os_type`.
    pub os: Os,
    /// Architecture as reported by the host (`x64`, `arm64`, `arm`).
    pub arch: String,
}

impl Platform {
    /// Create a platform from host OS type and architecture strings.
    #[must_use]
    pub fn from_host(os_type: impl Into<String>, arch: impl Into<String>) -> Self {
        let os_type = os_type.into();
        Self {
            os: Os::from_os_type(&os_type),
            os_type,
            arch: arch.into(),
        }
    }

    /// Get the current platform.
    #[must_use]
    pub fn current() -> Self {
        Self::from_host(
            host_os_type(std::env::consts::OS),
            host_arch(std::env::consts::ARCH),
        )
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

/// Map a Rust target OS to the runner OS type.
fn host_os_type(target_os: &str) -> String {
    match target_os {
        "linux" => "Linux".to_string(),
        "macos" => "Darwin".to_string(),
        "windows" => "Windows_NT".to_string(),
        other => {
            let mut chars = other.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        }
    }
}

/// Map a Rust target architecture to the runner architecture name.
fn host_arch(target_arch: &str) -> String {
    match target_arch {
        "x86_64" => "x64",
        "aarch64" => "arm64",
        "x86" => "ia32",
        "powerpc64" => "ppc64",
        other => other,
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_from_os_type() {
        assert_eq!(Os::from_os_type("Linux"), Os::Linux);
        assert_eq!(Os::from_os_type("Darwin"), Os::MacOs);
        assert_eq!(Os::from_os_type("Windows_NT"), Os::Windows);
    }

    #[test]
    fn test_unrecognized_os_is_windows() {
        assert_eq!(Os::from_os_type("FreeBSD"), Os::Windows);
        assert_eq!(Os::from_os_type(""), Os::Windows);
        // Matching is exact, not case-insensitive
        assert_eq!(Os::from_os_type("linux"), Os::Windows);
    }

    #[test]
    fn test_host_os_type_mapping() {
        assert_eq!(host_os_type("linux"), "Linux");
        assert_eq!(host_os_type("macos"), "Darwin");
        assert_eq!(host_os_type("windows"), "Windows_NT");
        assert_eq!(host_os_type("freebsd"), "Freebsd");
    }

    #[test]
    fn test_host_arch_mapping() {
        assert_eq!(host_arch("x86_64"), "x64");
        assert_eq!(host_arch("aarch64"), "arm64");
        assert_eq!(host_arch("arm"), "arm");
        assert_eq!(host_arch("x86"), "ia32");
        assert_eq!(host_arch("riscv64"), "riscv64");
    }

    #[test]
    fn test_platform_from_host() {
        let p = Platform::from_host("Darwin", "arm64");
        assert_eq!(p.os, Os::MacOs);
        assert_eq!(p.os_type, "Darwin");
        assert_eq!(p.arch, "arm64");
        assert_eq!(p.to_string(), "darwin-arm64");
    }

    #[test]
    fn test_platform_current() {
        let p = Platform::current();
        assert!(!p.os_type.is_empty());
        assert!(!p.arch.is_empty());
        #[cfg(target_os = "linux")]
        assert_eq!(p.os, Os::Linux);
        #[cfg(target_os = "macos")]
        assert_eq!(p.os, Os::MacOs);
        #[cfg(target_os = "windows")]
        assert_eq!(p.os, Os::Windows);
    }
}
