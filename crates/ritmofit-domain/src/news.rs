//! Editorial content types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::UnknownVariant;

/// Kind of a `Noticia` item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticiaTipo {
    Noticia,
    Promo,
    Evento,
}

impl NoticiaTipo {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Noticia => "noticia",
            Self::Promo => "promo",
            Self::Evento => "evento",
        }
    }
}

impl fmt::Display for NoticiaTipo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoticiaTipo {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "noticia" => Ok(Self::Noticia),
            "promo" => Ok(Self::Promo),
            "evento" => Ok(Self::Evento),
            other => Err(UnknownVariant {
                kind: "noticia tipo",
                value: other.to_owned(),
            }),
        }
    }
}
