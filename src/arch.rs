//! The closed set of architectures a Contents index is published for

use std::fmt;
use std::str::FromStr;

use clap::builder::PossibleValue;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::DebtopError;

/// Architecture identifier selecting which `Contents-<arch>.gz` to analyze
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Architecture {
    All,
    Amd64,
    Arm64,
    Armel,
    Armhf,
    I386,
    Mips64el,
    Mipsel,
    Ppc64el,
    S390x,
    Source,
    UdebAll,
    UdebAmd64,
    UdebArm64,
    UdebArmel,
    UdebArmhf,
    UdebI386,
    UdebMips64el,
    UdebMipsel,
    UdebPpc64el,
    UdebS390x,
}

impl Architecture {
    /// Every known architecture, in the order they are listed to users
    pub const ALL: [Architecture; 21] = [
        Self::All,
        Self::Amd64,
        Self::Arm64,
        Self::Armel,
        Self::Armhf,
        Self::I386,
        Self::Mips64el,
        Self::Mipsel,
        Self::Ppc64el,
        Self::S390x,
        Self::Source,
        Self::UdebAll,
        Self::UdebAmd64,
        Self::UdebArm64,
        Self::UdebArmel,
        Self::UdebArmhf,
        Self::UdebI386,
        Self::UdebMips64el,
        Self::UdebMipsel,
        Self::UdebPpc64el,
        Self::UdebS390x,
    ];

    /// Identifier as used in index file names and cache keys
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Amd64 => "amd64",
            Self::Arm64 => "arm64",
            Self::Armel => "armel",
            Self::Armhf => "armhf",
            Self::I386 => "i386",
            Self::Mips64el => "mips64el",
            Self::Mipsel => "mipsel",
            Self::Ppc64el => "ppc64el",
            Self::S390x => "s390x",
            Self::Source => "source",
            Self::UdebAll => "udeb-all",
            Self::UdebAmd64 => "udeb-amd64",
            Self::UdebArm64 => "udeb-arm64",
            Self::UdebArmel => "udeb-armel",
            Self::UdebArmhf => "udeb-armhf",
            Self::UdebI386 => "udeb-i386",
            Self::UdebMips64el => "udeb-mips64el",
            Self::UdebMipsel => "udeb-mipsel",
            Self::UdebPpc64el => "udeb-ppc64el",
            Self::UdebS390x => "udeb-s390x",
        }
    }

    /// File name of the Contents index for this architecture
    pub fn index_file_name(self) -> String {
        format!("Contents-{}.gz", self.as_str())
    }
}

impl ValueEnum for Architecture {
    fn value_variants<'a>() -> &'a [Self] {
        &Self::ALL
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(self.as_str()))
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Architecture {
    type Err = DebtopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|arch| arch.as_str() == s)
            .ok_or_else(|| DebtopError::InvalidArgument(format!("Invalid architecture: {s}")))
    }
}
