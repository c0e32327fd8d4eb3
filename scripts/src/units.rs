//! Conversion of human-readable token quantities into base units

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use alloy_primitives::{
    utils::{parse_units, ParseUnits},
    U256,
};

use crate::errors::ScriptError;

/// A named denomination, following the unit names used by web3 tooling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denomination {
    /// 10^0
    Wei,
    /// 10^3
    Kwei,
    /// 10^6
    Mwei,
    /// 10^9
    Gwei,
    /// 10^12
    Szabo,
    /// 10^15
    Finney,
    /// 10^18
    Ether,
    /// 10^21
    Kether,
    /// 10^24
    Mether,
    /// 10^27
    Gether,
    /// 10^30
    Tether,
}

impl Denomination {
    /// The power of ten by which one unit of this denomination
    /// exceeds the base unit
    pub fn exponent(&self) -> u8 {
        match self {
            Denomination::Wei => 0,
            Denomination::Kwei => 3,
            Denomination::Mwei => 6,
            Denomination::Gwei => 9,
            Denomination::Szabo => 12,
            Denomination::Finney => 15,
            Denomination::Ether => 18,
            Denomination::Kether => 21,
            Denomination::Mether => 24,
            Denomination::Gether => 27,
            Denomination::Tether => 30,
        }
    }
}

impl FromStr for Denomination {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wei" => Ok(Denomination::Wei),
            "kwei" | "babbage" | "femtoether" => Ok(Denomination::Kwei),
            "mwei" | "lovelace" | "picoether" => Ok(Denomination::Mwei),
            "gwei" | "shannon" | "nanoether" | "nano" => Ok(Denomination::Gwei),
            "szabo" | "microether" | "micro" => Ok(Denomination::Szabo),
            "finney" | "milliether" | "milli" => Ok(Denomination::Finney),
            "ether" => Ok(Denomination::Ether),
            "kether" | "grand" => Ok(Denomination::Kether),
            "mether" => Ok(Denomination::Mether),
            "gether" => Ok(Denomination::Gether),
            "tether" => Ok(Denomination::Tether),
            other => Err(ScriptError::UnitConversion(format!(
                "unknown denomination `{}`",
                other
            ))),
        }
    }
}

impl Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Denomination::Wei => write!(f, "wei"),
            Denomination::Kwei => write!(f, "kwei"),
            Denomination::Mwei => write!(f, "mwei"),
            Denomination::Gwei => write!(f, "gwei"),
            Denomination::Szabo => write!(f, "szabo"),
            Denomination::Finney => write!(f, "finney"),
            Denomination::Ether => write!(f, "ether"),
            Denomination::Kether => write!(f, "kether"),
            Denomination::Mether => write!(f, "mether"),
            Denomination::Gether => write!(f, "gether"),
            Denomination::Tether => write!(f, "tether"),
        }
    }
}

/// Converts a decimal quantity in the given denomination into base units,
/// e.g. `("1", "kether")` becomes `1000 * 10^18`
pub fn to_base_units(amount: &str, denomination: &str) -> Result<U256, ScriptError> {
    let denomination = Denomination::from_str(denomination)?;
    match parse_units(amount, denomination.exponent())
        .map_err(|e| {
            ScriptError::UnitConversion(format!("`{} {}`: {}", amount, denomination, e))
        })?
    {
        ParseUnits::U256(value) => Ok(value),
        ParseUnits::I256(_) => Err(ScriptError::UnitConversion(format!(
            "negative quantity `{} {}` cannot be converted to base units",
            amount, denomination
        ))),
    }
}
