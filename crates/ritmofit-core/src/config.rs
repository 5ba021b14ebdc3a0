/// Trait for loading service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize` (using `#[serde(default = ...)]`
/// for optional settings) and call `Config::from_env()` at startup.
/// Field names map to upper-cased env vars (`database_url` -> `DATABASE_URL`).
pub trait Config: Sized + serde::de::DeserializeOwned {
    fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Load from an explicit set of `(key, value)` pairs. Used by tests.
    fn from_pairs<I>(pairs: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(pairs)
    }
}
