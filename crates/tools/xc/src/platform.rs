//! Vendor naming for the host platform.

use setup_xc_core::tools::Platform;

/// Architecture token used in xc release asset names.
///
/// `x64` becomes `amd64`; everything else passes through unchanged.
#[must_use]
pub fn architecture_name(platform: &Platform) -> String {
    match platform.arch.as_str() {
        "x64" => "amd64".to_string(),
        other => other.to_string(),
    }
}

/// File suffix of executables on the host: `.exe` for `Win*` OS types.
#[must_use]
pub fn executable_suffix(platform: &Platform) -> &'static str {
    if platform.os_type.starts_with("Win") {
        ".exe"
    } else {
        ""
    }
}

/// File name of the installed binary (`xc` or `xc.exe`).
#[must_use]
pub fn binary_name(tool: &str, platform: &Platform) -> String {
    format!("{tool}{}", executable_suffix(platform))
}
