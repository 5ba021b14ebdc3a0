//! Booking lifecycle state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::UnknownVariant;

/// Lifecycle state of a `Reserva`.
///
/// Bookings are created as `Activa` and hard-deleted on cancellation; the other
/// states are only ever written out-of-band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservaEstado {
    Activa,
    Cancelada,
    Asistida,
    Ausente,
    Expirada,
}

impl ReservaEstado {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Activa => "activa",
            Self::Cancelada => "cancelada",
            Self::Asistida => "asistida",
            Self::Ausente => "ausente",
            Self::Expirada => "expirada",
        }
    }
}

impl fmt::Display for ReservaEstado {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservaEstado {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "activa" => Ok(Self::Activa),
            "cancelada" => Ok(Self::Cancelada),
            "asistida" => Ok(Self::Asistida),
            "ausente" => Ok(Self::Ausente),
            "expirada" => Ok(Self::Expirada),
            other => Err(UnknownVariant {
                kind: "reserva estado",
                value: other.to_owned(),
            }),
        }
    }
}
