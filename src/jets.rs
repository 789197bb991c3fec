use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::error::Error;

/// Sequential recombination algorithms
///
/// The algorithms only differ in the power `p` of the transverse momentum
/// in the distance measure `d_ij = min(kt_i^(2p), kt_j^(2p)) ΔR_ij² / R²`.
#[derive(
    Display,
    EnumIter,
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
    Deserialize,
    Serialize,
)]
pub enum JetAlgorithm {
    /// The [kt](https://arxiv.org/abs/hep-ph/9305266) algorithm, p = 1
    #[default]
    #[strum(to_string = "kt")]
    Kt,
    /// The [Cambridge][C]/[Aachen][A] algorithm, p = 0
    ///
    /// [C]: https://arxiv.org/abs/hep-ph/9707323
    /// [A]: https://arxiv.org/abs/hep-ph/9907280
    #[strum(to_string = "Cambridge/Aachen")]
    CambridgeAachen,
    /// The [anti-kt](https://arxiv.org/abs/0802.1189) algorithm, p = -1
    #[strum(to_string = "anti-kt")]
    AntiKt,
}

impl JetAlgorithm {
    /// The clustering mode `p`
    pub fn mode(self) -> i32 {
        match self {
            Self::Kt => 1,
            Self::CambridgeAachen => 0,
            Self::AntiKt => -1,
        }
    }
}

impl TryFrom<i32> for JetAlgorithm {
    type Error = Error;

    fn try_from(mode: i32) -> Result<Self, Self::Error> {
        match mode {
            1 => Ok(Self::Kt),
            0 => Ok(Self::CambridgeAachen),
            -1 => Ok(Self::AntiKt),
            _ => Err(Error::UnknownMode(mode)),
        }
    }
}

impl FromStr for JetAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "anti_kt" | "antikt" | "anti-kt" | "anti-kT" | "antiKt" => {
                Ok(Self::AntiKt)
            }
            "kt" | "kT" => Ok(Self::Kt),
            "Cambridge/Aachen" | "Cambridge-Aachen" | "Cambridge_Aachen"
            | "cambridge/aachen" | "cambridge-aachen" | "cambridge_aachen"
            | "ca" | "CA" => Ok(Self::CambridgeAachen),
            _ => Err(Error::UnknownJetAlgorithm(s.to_string())),
        }
    }
}

/// How the four-momenta of two merged particles are combined
#[derive(
    Display,
    EnumIter,
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
    Deserialize,
    Serialize,
)]
pub enum RecombinationScheme {
    /// Four-vector addition
    #[default]
    #[strum(to_string = "E-scheme")]
    E,
    #[strum(to_string = "pt-scheme")]
    Pt,
    #[strum(to_string = "pt²-scheme")]
    Pt2,
}

impl RecombinationScheme {
    /// Numeric identifier: 1 for E, 2 for pt, 3 for pt²
    pub fn id(self) -> i32 {
        match self {
            Self::E => 1,
            Self::Pt => 2,
            Self::Pt2 => 3,
        }
    }

    /// Whether clustering with this scheme is available
    pub fn is_supported(self) -> bool {
        self == Self::E
    }
}

impl TryFrom<i32> for RecombinationScheme {
    type Error = Error;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Self::E),
            2 => Ok(Self::Pt),
            3 => Ok(Self::Pt2),
            _ => Err(Error::UnknownRecombination(id)),
        }
    }
}

/// Full set of jet clustering parameters
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct JetDefinition {
    pub algorithm: JetAlgorithm,
    pub radius: f64,
    pub min_pt: f64,
    #[serde(default)]
    pub recombination: RecombinationScheme,
}

impl Default for JetDefinition {
    fn default() -> Self {
        Self {
            algorithm: JetAlgorithm::AntiKt,
            radius: 0.4,
            min_pt: 0.,
            recombination: RecombinationScheme::E,
        }
    }
}
