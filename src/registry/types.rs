use crate::error::{JustInstallError, Result};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Target architecture of an installer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture {
    X86,
    X86_64,
}

impl Architecture {
    pub const ALL: [Architecture; 2] = [Architecture::X86, Architecture::X86_64];

    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::X86 => "x86",
            Architecture::X86_64 => "x86_64",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Architecture {
    type Err = JustInstallError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "x86" => Ok(Architecture::X86),
            "x86_64" => Ok(Architecture::X86_64),
            other => Err(JustInstallError::UnknownArchitecture(other.to_string())),
        }
    }
}

/// Silent-install convention of an installer.
///
/// Tags the registry uses but this build does not know are kept in
/// `Unknown` so one odd entry doesn't reject the whole registry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum InstallerKind {
    AdvancedInstaller,
    Appx,
    AsIs,
    Copy,
    Custom,
    InnoSetup,
    Msi,
    Nsis,
    Squirrel,
    Zip,
    Unknown(String),
}

impl InstallerKind {
    pub fn as_str(&self) -> &str {
        match self {
            InstallerKind::AdvancedInstaller => "advancedinstaller",
            InstallerKind::Appx => "appx",
            InstallerKind::AsIs => "as-is",
            InstallerKind::Copy => "copy",
            InstallerKind::Custom => "custom",
            InstallerKind::InnoSetup => "innosetup",
            InstallerKind::Msi => "msi",
            InstallerKind::Nsis => "nsis",
            InstallerKind::Squirrel => "squirrel",
            InstallerKind::Zip => "zip",
            InstallerKind::Unknown(tag) => tag,
        }
    }
}

impl From<String> for InstallerKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "advancedinstaller" => InstallerKind::AdvancedInstaller,
            "appx" => InstallerKind::Appx,
            "as-is" => InstallerKind::AsIs,
            "copy" => InstallerKind::Copy,
            "custom" => InstallerKind::Custom,
            "innosetup" => InstallerKind::InnoSetup,
            "msi" => InstallerKind::Msi,
            "nsis" => InstallerKind::Nsis,
            "squirrel" => InstallerKind::Squirrel,
            "zip" => InstallerKind::Zip,
            _ => InstallerKind::Unknown(tag),
        }
    }
}

impl From<&str> for InstallerKind {
    fn from(tag: &str) -> Self {
        InstallerKind::from(tag.to_string())
    }
}

impl fmt::Display for InstallerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ContainerKind {
    Zip,
    Unknown(String),
}

impl From<String> for ContainerKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "zip" => ContainerKind::Zip,
            _ => ContainerKind::Unknown(tag),
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerKind::Zip => f.write_str("zip"),
            ContainerKind::Unknown(tag) => f.write_str(tag),
        }
    }
}

/// Archive wrapping the real installer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Container {
    pub kind: ContainerKind,
    /// Path of the installer inside the archive. When absent the archive
    /// must contain exactly one entry.
    #[serde(default)]
    pub installer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Shortcut {
    pub name: String,
    pub target: String,
}

/// Installation options. String fields are templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    pub arguments: Vec<String>,
    pub container: Option<Container>,
    pub destination: Option<String>,
    pub shims: Vec<String>,
    pub shortcuts: Vec<Shortcut>,
}

/// Options as written in the registry: one map for every architecture, or
/// one map per architecture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallerOptions {
    Flat(Options),
    PerArch {
        x86: Option<Options>,
        x86_64: Option<Options>,
    },
}

impl<'de> Deserialize<'de> for InstallerOptions {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;

        let per_arch = Architecture::ALL
            .iter()
            .any(|arch| map.contains_key(arch.as_str()));

        if !per_arch {
            return Options::deserialize(serde_json::Value::Object(map))
                .map(InstallerOptions::Flat)
                .map_err(de::Error::custom);
        }

        let decode = |arch: Architecture| -> std::result::Result<Option<Options>, D::Error> {
            map.get(arch.as_str())
                .map(|value| Options::deserialize(value.clone()).map_err(de::Error::custom))
                .transpose()
        };

        Ok(InstallerOptions::PerArch {
            x86: decode(Architecture::X86)?,
            x86_64: decode(Architecture::X86_64)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Installer {
    pub kind: InstallerKind,
    #[serde(default)]
    pub interactive: bool,
    #[serde(default)]
    pub x86: Option<String>,
    #[serde(default)]
    pub x86_64: Option<String>,
    #[serde(default)]
    pub options: Option<InstallerOptions>,
}

impl Installer {
    /// Options that apply when installing for `arch`.
    pub fn options_for_arch(&self, arch: Architecture) -> Result<Options> {
        match &self.options {
            None => Ok(Options::default()),
            Some(InstallerOptions::Flat(options)) => Ok(options.clone()),
            Some(InstallerOptions::PerArch { x86, x86_64 }) => {
                let picked = match arch {
                    Architecture::X86 => x86.as_ref(),
                    // 64-bit hosts fall back to the 32-bit installer, and
                    // with it to the 32-bit options.
                    Architecture::X86_64 => x86_64.as_ref().or(x86.as_ref()),
                };

                picked.cloned().ok_or_else(|| {
                    JustInstallError::InvalidPackage(format!(
                        "could not find options for architecture {}",
                        arch
                    ))
                })
            }
        }
    }

    /// Installer URL template for `arch`.
    pub fn url_for_arch(&self, arch: Architecture) -> Result<&str> {
        let x86 = non_blank(self.x86.as_deref());
        let x86_64 = non_blank(self.x86_64.as_deref());

        match (arch, x86, x86_64) {
            (_, None, None) => Err(JustInstallError::InvalidPackage(
                "package entry is missing both 32-bit and 64-bit installers".to_string(),
            )),
            (Architecture::X86, Some(url), _) => Ok(url),
            (Architecture::X86, None, Some(_)) => Err(JustInstallError::InvalidPackage(
                "this package doesn't offer a 32-bit installer".to_string(),
            )),
            (Architecture::X86_64, _, Some(url)) => Ok(url),
            (Architecture::X86_64, Some(url), None) => Ok(url),
        }
    }

    /// Every architecture URL present in the entry, in declaration order.
    pub fn urls(&self) -> Vec<(Architecture, &str)> {
        let mut urls = Vec::new();
        if let Some(url) = non_blank(self.x86.as_deref()) {
            urls.push((Architecture::X86, url));
        }
        if let Some(url) = non_blank(self.x86_64.as_deref()) {
            urls.push((Architecture::X86_64, url));
        }
        urls
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub version: String,
    pub installer: Installer,
    #[serde(default)]
    pub skip_audit: bool,
}
