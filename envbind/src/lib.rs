//! Bind environment variables into structs and string maps
//!
//! `envbind` fills an existing value from environment variables. The
//! destination is either a struct deriving [`Bind`], or a
//! `String` to `String` map whose keys name the variables to read.
//!
//! # Features
//!
//! - **Declarative**: per-field `#[env("...")]` tags pick the variable name
//! - **In place**: binds into caller-owned values, allocating `None` pointers
//!   and maps along the way
//! - **Typed**: signed and unsigned integers, floats and strings, range checked
//!   against the field's exact width
//! - **Injectable**: bind against any [`Environment`], not only the process
//!
//! # Example
//!
//! ```rust
//! use envbind::Bind;
//!
//! #[derive(Debug, Default, Bind)]
//! struct Config {
//!     #[env("DATABASE_URL")]
//!     pub database_url: String,
//!
//!     #[env("MAX_CONNECTIONS,omitempty")]
//!     pub max_connections: u32,
//!
//!     #[env("-")]
//!     pub cache: Vec<String>,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! #     std::env::set_var("DATABASE_URL", "postgres://localhost/db");
//! #     std::env::remove_var("MAX_CONNECTIONS");
//! let mut config = Config {
//!     max_connections: 10,
//!     ..Config::default()
//! };
//! envbind::bind(&mut config)?;
//! assert_eq!(config.database_url, "postgres://localhost/db");
//! assert_eq!(config.max_connections, 10);
//! #     Ok(())
//! # }
//! ```
//!
//! # Tags
//!
//! | Tag                       | Variable     | When absent or empty |
//! |---------------------------|--------------|----------------------|
//! | *(none)*                  | field name   | [`Error::Missing`]   |
//! | `#[env("-")]`             | *(ignored)*  | *(ignored)*          |
//! | `#[env("NAME")]`          | `NAME`       | [`Error::Missing`]   |
//! | `#[env("NAME,omitempty")]`| `NAME`       | field left unchanged |
//! | `#[env(",omitempty")]`    | field name   | field left unchanged |
//!
//! The field name is used exactly as declared, with no case conversion.
//! Fields that are not `pub` are skipped.
//!
//! # Maps
//!
//! Only keys already in the map are looked up; each value is overwritten,
//! with an empty string for absent variables.
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! # fn main() -> anyhow::Result<()> {
//! #     std::env::set_var("HOME_DIR", "/home/me");
//! #     std::env::remove_var("NOT_SET_ANYWHERE");
//! let mut vars: HashMap<String, String> = HashMap::new();
//! vars.insert("HOME_DIR".to_string(), String::new());
//! vars.insert("NOT_SET_ANYWHERE".to_string(), "stale".to_string());
//!
//! envbind::bind(&mut vars)?;
//! assert_eq!(vars["HOME_DIR"], "/home/me");
//! assert_eq!(vars["NOT_SET_ANYWHERE"], "");
//! #     Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! Binding stops at the first failing field and is not rolled back: fields
//! bound before it keep their new values.

extern crate self as envbind;

mod de;
mod env;
mod error;
mod field;
mod resolve;
mod tag;

pub use env::{Environment, ProcessEnv};
pub use envbind_derive::Bind;
pub use error::Error;
pub use field::{Field, Fields, Kind, Slot};
pub use resolve::{Destination, Resolved, StringMap};
pub use tag::TagOptions;

/// Bind environment variables of the current process into `dest`.
///
/// # Errors
///
/// - `dest` resolves through a null reference ([`Error::InvalidUnmarshal`])
/// - `dest` is neither a struct nor a `String` to `String` map
///   ([`Error::InvalidIndirect`])
/// - A required variable is absent or empty ([`Error::Missing`])
/// - A value cannot be converted into its field's type
///   ([`Error::UnmarshalType`])
pub fn bind<D>(dest: &mut D) -> Result<(), Error>
where
    D: Destination + ?Sized,
{
    bind_with(dest, &ProcessEnv)
}

/// Bind variables from `env` into `dest`.
///
/// See [`bind`] for the error conditions.
pub fn bind_with<D, E>(dest: &mut D, env: &E) -> Result<(), Error>
where
    D: Destination + ?Sized,
    E: Environment + ?Sized,
{
    match dest.resolve()? {
        Resolved::Struct(target) => de::bind_struct(target, env),
        Resolved::Map(target) => {
            de::bind_map(target, env);
            Ok(())
        }
    }
}

/// Build a `T` from its default value and bind the process environment into it.
///
/// ```rust
/// use envbind::Bind;
///
/// #[derive(Default, Bind)]
/// struct Limits {
///     #[env("LIMITS_WORKERS")]
///     pub workers: u8,
/// }
///
/// # fn main() -> anyhow::Result<()> {
/// #     std::env::set_var("LIMITS_WORKERS", "4");
/// let limits: Limits = envbind::from_env()?;
/// assert_eq!(limits.workers, 4);
/// #     Ok(())
/// # }
/// ```
pub fn from_env<T>() -> Result<T, Error>
where
    T: Destination + Default,
{
    let mut value = T::default();
    bind(&mut value)?;
    Ok(value)
}
