//! Conversion of environment variable values into struct fields and map entries

use crate::env::Environment;
use crate::error::Error;
use crate::field::{Fields, Slot};
use crate::resolve::StringMap;
use crate::tag::TagOptions;
use std::str::FromStr;
use tracing::{debug, trace};

/// Bind every settable, non-ignored field of `target`, in declared order.
///
/// Stops at the first error; fields already assigned keep their values.
pub(crate) fn bind_struct<E>(target: &mut dyn Fields, env: &E) -> Result<(), Error>
where
    E: Environment + ?Sized,
{
    for field in target.fields() {
        let name = field.name();
        if !field.is_settable() {
            debug!(field = name, "skipping unexported field");
            continue;
        }

        let opts = TagOptions::parse(field.tag());
        if opts.ignored {
            debug!(field = name, "skipping ignored field");
            continue;
        }

        let key = opts.key(name);
        let value = match env.get(key) {
            Some(value) if !value.is_empty() => value,
            _ if opts.omit_empty => {
                debug!(field = name, key, "environment variable not set, keeping current value");
                continue;
            }
            _ => return Err(Error::missing(key)),
        };

        let kind = field.kind();
        assign(field.into_slot(), key, value)?;
        trace!(field = name, key, %kind, "bound field");
    }
    Ok(())
}

/// Overwrite every existing entry of `target` with the variable named by its key.
///
/// Absent variables become empty strings.
pub(crate) fn bind_map<E>(target: &mut dyn StringMap, env: &E)
where
    E: Environment + ?Sized,
{
    target.for_each_entry(&mut |key, value| {
        *value = env.get(key).unwrap_or_default();
        trace!(key, "bound map entry");
    });
}

/// Convert `value` into the slot's type and store it.
pub(crate) fn assign(slot: Slot<'_>, key: &str, value: String) -> Result<(), Error> {
    match slot {
        Slot::I8(dst) => *dst = parse(key, &value)?,
        Slot::I16(dst) => *dst = parse(key, &value)?,
        Slot::I32(dst) => *dst = parse(key, &value)?,
        Slot::I64(dst) => *dst = parse(key, &value)?,
        Slot::Isize(dst) => *dst = parse(key, &value)?,
        Slot::U8(dst) => *dst = parse_unsigned(key, &value)?,
        Slot::U16(dst) => *dst = parse_unsigned(key, &value)?,
        Slot::U32(dst) => *dst = parse_unsigned(key, &value)?,
        Slot::U64(dst) => *dst = parse_unsigned(key, &value)?,
        Slot::Usize(dst) => *dst = parse_unsigned(key, &value)?,
        Slot::F32(dst) => *dst = parse_float(key, &value)?,
        Slot::F64(dst) => *dst = parse_float(key, &value)?,
        Slot::Str(dst) => *dst = value,
        Slot::Unsupported(type_name) => return Err(Error::unmarshal_type(key, value, type_name)),
    }
    Ok(())
}

/// Parse a base-10 integer, range checked against `T`.
fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, Error> {
    value
        .parse::<T>()
        .map_err(|_| Error::unmarshal_type(key, value, std::any::type_name::<T>()))
}

/// Parse a base-10 unsigned integer. No sign is accepted, not even `+`.
fn parse_unsigned<T: FromStr>(key: &str, value: &str) -> Result<T, Error> {
    if value.starts_with('+') {
        return Err(Error::unmarshal_type(key, value, std::any::type_name::<T>()));
    }
    parse(key, value)
}

trait Float: FromStr {
    fn is_infinite(&self) -> bool;
}

impl Float for f32 {
    fn is_infinite(&self) -> bool {
        f32::is_infinite(*self)
    }
}

impl Float for f64 {
    fn is_infinite(&self) -> bool {
        f64::is_infinite(*self)
    }
}

/// Parse a decimal float, rejecting finite literals that overflow `T`.
///
/// Hexadecimal float literals such as `0x1p-2` are not accepted.
fn parse_float<T: Float>(key: &str, value: &str) -> Result<T, Error> {
    let parsed: T = parse(key, value)?;
    if parsed.is_infinite() && !is_infinity_literal(value) {
        return Err(Error::unmarshal_type(key, value, std::any::type_name::<T>()));
    }
    Ok(parsed)
}

fn is_infinity_literal(value: &str) -> bool {
    let unsigned = value.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(value);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_assign_signed_widths() {
        let mut a = 0i8;
        let mut b = 0i64;
        assign(Slot::I8(&mut a), "A", "-128".to_string()).unwrap();
        assign(Slot::I64(&mut b), "B", "+9223372036854775807".to_string()).unwrap();
        assert_eq!(a, i8::MIN);
        assert_eq!(b, i64::MAX);
    }

    #[test]
    fn test_assign_signed_out_of_range() {
        let mut a = 7i8;
        let result = assign(Slot::I8(&mut a), "A", "128".to_string());
        match result {
            Err(Error::UnmarshalType {
                name,
                value,
                type_name,
            }) => {
                assert_eq!(name, "A");
                assert_eq!(value, "128");
                assert_eq!(type_name, "i8");
            }
            _ => panic!("Expected UnmarshalType error"),
        }
        assert_eq!(a, 7);
    }

    #[test]
    fn test_assign_unsigned_rejects_negative() {
        let mut port = 0u16;
        assert!(assign(Slot::U16(&mut port), "PORT", "-1".to_string()).is_err());
        assert!(assign(Slot::U16(&mut port), "PORT", "65536".to_string()).is_err());
        assign(Slot::U16(&mut port), "PORT", "65535".to_string()).unwrap();
        assert_eq!(port, u16::MAX);
    }

    #[test]
    fn test_assign_unsigned_rejects_plus_sign() {
        let mut port = 7u16;
        match assign(Slot::U16(&mut port), "PORT", "+5".to_string()) {
            Err(Error::UnmarshalType {
                name,
                value,
                type_name,
            }) => {
                assert_eq!(name, "PORT");
                assert_eq!(value, "+5");
                assert_eq!(type_name, "u16");
            }
            _ => panic!("Expected UnmarshalType error"),
        }
        assert_eq!(port, 7);

        let mut n = 0usize;
        assert!(assign(Slot::Usize(&mut n), "N", "+0".to_string()).is_err());
    }

    #[test]
    fn test_assign_float_rejects_hex_literal() {
        let mut f = 0f64;
        assert!(assign(Slot::F64(&mut f), "F", "0x1p-2".to_string()).is_err());
    }

    #[test]
    fn test_assign_integer_is_base_ten() {
        let mut n = 0u32;
        assert!(assign(Slot::U32(&mut n), "N", "0x10".to_string()).is_err());
        assign(Slot::U32(&mut n), "N", "010".to_string()).unwrap();
        assert_eq!(n, 10);
    }

    #[test]
    fn test_assign_float() {
        let mut f = 0f32;
        let mut g = 0f64;
        assign(Slot::F32(&mut f), "F", "0.1".to_string()).unwrap();
        assign(Slot::F64(&mut g), "G", "-2.5e3".to_string()).unwrap();
        assert_eq!(f, 0.1f32);
        assert_eq!(g, -2500.0);
    }

    #[test]
    fn test_assign_float_overflow_is_error() {
        let mut f = 0f32;
        assert!(assign(Slot::F32(&mut f), "F", "1e39".to_string()).is_err());

        let mut g = 0f64;
        assign(Slot::F64(&mut g), "G", "1e39".to_string()).unwrap();
        assert_eq!(g, 1e39);
    }

    #[test]
    fn test_assign_float_infinity_literal() {
        let mut f = 0f64;
        assign(Slot::F64(&mut f), "F", "-Infinity".to_string()).unwrap();
        assert_eq!(f, f64::NEG_INFINITY);
        assign(Slot::F64(&mut f), "F", "inf".to_string()).unwrap();
        assert_eq!(f, f64::INFINITY);
    }

    #[test]
    fn test_assign_string_verbatim() {
        let mut s = String::new();
        assign(Slot::Str(&mut s), "S", "  spaced, and=odd ".to_string()).unwrap();
        assert_eq!(s, "  spaced, and=odd ");
    }

    #[test]
    fn test_assign_unsupported() {
        let result = assign(Slot::Unsupported("bool"), "DEBUG", "true".to_string());
        assert!(matches!(
            result,
            Err(Error::UnmarshalType { type_name: "bool", .. })
        ));
    }

    struct Pair {
        first: String,
        second: u8,
    }

    impl Fields for Pair {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![
                Field::new("first", "FIRST", Slot::Str(&mut self.first)),
                Field::new("second", "SECOND", Slot::U8(&mut self.second)),
            ]
        }
    }

    #[test]
    fn test_bind_struct_is_not_transactional() {
        let mut pair = Pair {
            first: String::new(),
            second: 3,
        };
        let env = vars(&[("FIRST", "set"), ("SECOND", "300")]);

        let result = bind_struct(&mut pair, &env);
        assert!(matches!(result, Err(Error::UnmarshalType { .. })));
        assert_eq!(pair.first, "set");
        assert_eq!(pair.second, 3);
    }

    #[test]
    fn test_bind_struct_empty_value_is_missing() {
        let mut pair = Pair {
            first: "keep".to_string(),
            second: 0,
        };
        let env = vars(&[("FIRST", "")]);

        match bind_struct(&mut pair, &env) {
            Err(Error::Missing { name }) => assert_eq!(name, "FIRST"),
            _ => panic!("Expected Missing error"),
        }
        assert_eq!(pair.first, "keep");
    }

    #[test]
    fn test_bind_map_overwrites_existing_keys_only() {
        let mut map = vars(&[("HOME_DIR", "old"), ("UNSET_KEY", "old")]);
        let env = vars(&[("HOME_DIR", "/home/me"), ("EXTRA", "x")]);

        bind_map(&mut map, &env);
        assert_eq!(map.len(), 2);
        assert_eq!(map["HOME_DIR"], "/home/me");
        assert_eq!(map["UNSET_KEY"], "");
    }
}
