//! sea-orm entities for the RitmoFit database.

pub mod asistencias;
pub mod calificaciones;
pub mod clases;
pub mod noticias;
pub mod notificaciones;
pub mod objetivos;
pub mod otp_codes;
pub mod reservas;
pub mod sedes;
pub mod users;
