//! Error types for environment variable binding

/// Errors that can occur while binding environment variables into a destination.
///
/// Binding stops at the first error. It is not transactional: fields bound
/// before the failing one keep their new values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The destination is a null reference with nothing to allocate behind it.
    ///
    /// Occurs when a `None` in an `Option<&mut T>` is reached while resolving
    /// the destination.
    #[error("cannot bind into a null reference of type {type_name}")]
    InvalidUnmarshal {
        /// Type of the null reference
        type_name: &'static str,
    },

    /// The resolved destination is neither a struct nor a string-to-string map.
    #[error("{}", indirect_message(.type_name, .map))]
    InvalidIndirect {
        /// Fully qualified type the destination resolved to
        type_name: &'static str,
        /// Whether the offending type is a map with non-`String` keys or values
        map: bool,
    },

    /// Required environment variable is absent or empty.
    ///
    /// Occurs when a field without the `omitempty` option has no value.
    #[error("environment variable {name} is not set")]
    Missing {
        /// Name of the missing environment variable
        name: String,
    },

    /// The environment variable value cannot be converted into the field type,
    /// or the field type is not one the binder can assign.
    #[error("cannot bind {name}'s value {value:?} into type {type_name}")]
    UnmarshalType {
        /// Name of the environment variable being converted
        name: String,
        /// Raw value read from the environment
        value: String,
        /// Fully qualified type of the destination field
        type_name: &'static str,
    },
}

fn indirect_message(type_name: &str, map: &bool) -> String {
    if *map {
        format!("destination map {type_name} is not a String to String map")
    } else {
        format!("cannot bind into a value of type {type_name}")
    }
}

impl Error {
    /// Create an invalid unmarshal error for a null reference of type `T`
    #[doc(hidden)]
    pub fn invalid_unmarshal<T: ?Sized>() -> Self {
        Self::InvalidUnmarshal {
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Create an invalid indirect error for a non-map destination of type `T`
    #[doc(hidden)]
    pub fn invalid_indirect<T: ?Sized>() -> Self {
        Self::InvalidIndirect {
            type_name: std::any::type_name::<T>(),
            map: false,
        }
    }

    /// Create an invalid indirect error for a map destination of type `T`
    #[doc(hidden)]
    pub fn invalid_map<T: ?Sized>() -> Self {
        Self::InvalidIndirect {
            type_name: std::any::type_name::<T>(),
            map: true,
        }
    }

    /// Create a missing environment variable error
    #[doc(hidden)]
    pub fn missing(name: impl Into<String>) -> Self {
        Self::Missing { name: name.into() }
    }

    /// Create a conversion error
    #[doc(hidden)]
    pub fn unmarshal_type(
        name: impl Into<String>,
        value: impl Into<String>,
        type_name: &'static str,
    ) -> Self {
        Self::UnmarshalType {
            name: name.into(),
            value: value.into(),
            type_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_missing_message_names_key() {
        let err = Error::missing("DATABASE_URL");
        assert_eq!(err.to_string(), "environment variable DATABASE_URL is not set");
    }

    #[test]
    fn test_invalid_indirect_message_for_scalar() {
        let err = Error::invalid_indirect::<i32>();
        assert_eq!(err.to_string(), "cannot bind into a value of type i32");
    }

    #[test]
    fn test_invalid_indirect_message_for_map() {
        let err = Error::invalid_map::<HashMap<String, i32>>();
        let msg = err.to_string();
        assert!(msg.starts_with("destination map"));
        assert!(msg.contains("i32"));
    }

    #[test]
    fn test_unmarshal_type_message() {
        let err = Error::unmarshal_type("PORT", "abc", "u16");
        assert_eq!(err.to_string(), r#"cannot bind PORT's value "abc" into type u16"#);
    }
}
