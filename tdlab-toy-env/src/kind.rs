//! Selection of environments by name.
use crate::{FrozenLakeConfig, FrozenLakeMap, TaxiConfig};
use tdlab_core::TdlabError;

/// An environment recognized by name, with its configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvKind {
    /// Any name starting with `frozenlake` (case-insensitive).
    ///
    /// Names containing `8x8` select the 8x8 map.
    FrozenLake(FrozenLakeConfig),

    /// Any name starting with `taxi` (case-insensitive).
    Taxi(TaxiConfig),
}

impl EnvKind {
    /// Resolves an environment name such as `FrozenLake-v1` or `Taxi-v3`.
    ///
    /// `is_slippery` only affects FrozenLake.
    pub fn from_name(name: &str, is_slippery: bool) -> Result<Self, TdlabError> {
        let lower = name.to_lowercase();
        if lower.starts_with("frozenlake") {
            let map = match lower.contains("8x8") {
                true => FrozenLakeMap::EightByEight,
                false => FrozenLakeMap::FourByFour,
            };
            Ok(Self::FrozenLake(
                FrozenLakeConfig::default().map(map).slippery(is_slippery),
            ))
        } else if lower.starts_with("taxi") {
            Ok(Self::Taxi(TaxiConfig::default()))
        } else {
            Err(TdlabError::UnknownEnv(name.to_string()))
        }
    }
}
