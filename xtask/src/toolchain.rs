//! Host detection and toolchain selection.

use std::fmt;

use crate::error::XtaskError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostOs {
    Windows,
    Linux,
    MacOs,
    Other(&'static str),
}

impl HostOs {
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &'static str) -> Self {
        match os {
            "windows" => HostOs::Windows,
            "linux" => HostOs::Linux,
            "macos" => HostOs::MacOs,
            other => HostOs::Other(other),
        }
    }

    /// The toolchain used when none is given on the command line.
    pub fn default_toolchain(self) -> Result<Toolchain, XtaskError> {
        match self {
            HostOs::Windows => Ok(Toolchain::Vs2019),
            HostOs::Linux => Ok(Toolchain::Gmake),
            HostOs::MacOs => Ok(Toolchain::Xcode4),
            HostOs::Other(os) => Err(XtaskError::UnsupportedHost(os.to_string())),
        }
    }
}

/// Toolchain identifier, shared by premake (as its action) and the dispatcher.
///
/// Identifiers outside the known set are kept verbatim; the dispatcher reports
/// them instead of failing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Toolchain {
    Vs2019,
    Gmake,
    Xcode4,
    Unsupported(String),
}

impl Toolchain {
    pub fn id(&self) -> &str {
        match self {
            Toolchain::Vs2019 => "vs2019",
            Toolchain::Gmake => "gmake",
            Toolchain::Xcode4 => "xcode4",
            Toolchain::Unsupported(id) => id,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Toolchain::Unsupported(_))
    }
}

impl From<&str> for Toolchain {
    fn from(id: &str) -> Self {
        match id {
            "vs2019" => Toolchain::Vs2019,
            "gmake" => Toolchain::Gmake,
            "xcode4" => Toolchain::Xcode4,
            other => Toolchain::Unsupported(other.to_string()),
        }
    }
}

impl fmt::Display for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// An explicit override always wins, even for a host we cannot default.
pub fn resolve_toolchain(host: HostOs, requested: Option<&str>) -> Result<Toolchain, XtaskError> {
    match requested {
        Some(id) => Ok(Toolchain::from(id)),
        None => host.default_toolchain(),
    }
}
