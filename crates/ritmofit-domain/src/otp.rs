//! One-time code purposes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::UnknownVariant;

/// Flow a one-time code was issued for. Codes are stored per (user, purpose),
/// so a code issued for one flow never replaces the in-flight code of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    Login,
    Register,
    Reset,
    Delete,
}

impl OtpPurpose {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::Reset => "reset",
            Self::Delete => "delete",
        }
    }

    /// Email subject line for a code of this purpose.
    pub fn subject(self) -> &'static str {
        match self {
            Self::Login => "RitmoFit - Código de inicio de sesión",
            Self::Register => "RitmoFit - Confirmá tu cuenta",
            Self::Reset => "RitmoFit - Recuperación de contraseña",
            Self::Delete => "RitmoFit - Confirmación de baja de cuenta",
        }
    }
}

impl fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OtpPurpose {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "login" => Ok(Self::Login),
            "register" => Ok(Self::Register),
            "reset" => Ok(Self::Reset),
            "delete" => Ok(Self::Delete),
            other => Err(UnknownVariant {
                kind: "otp purpose",
                value: other.to_owned(),
            }),
        }
    }
}
