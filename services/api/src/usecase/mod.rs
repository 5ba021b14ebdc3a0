pub mod asistencia;
pub mod auth;
pub mod calificacion;
pub mod clase;
pub mod noticia;
pub mod notificacion;
pub mod objetivo;
pub mod otp;
pub mod reminder;
pub mod reserva;
pub mod sede;
pub mod user;
