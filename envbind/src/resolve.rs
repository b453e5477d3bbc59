//! Resolution of a destination handle down to a bindable struct or map

use crate::error::Error;
use crate::field::Fields;
use std::any::Any;
use std::collections::{BTreeMap, HashMap};

/// The concrete, mutable target a destination resolves to.
pub enum Resolved<'a> {
    Struct(&'a mut dyn Fields),
    Map(&'a mut dyn StringMap),
}

/// A value that can be bound from environment variables.
///
/// Implemented for derived structs, `String` to `String` maps, and the
/// indirections that lead to them:
///
/// - `&mut T` and `Box<T>` (including `Box<dyn Destination>`) are followed.
/// - `Option<Box<T>>` is allocated with `T::default()` when `None`.
/// - `Option<HashMap<..>>` and `Option<BTreeMap<..>>` are allocated empty
///   when `None`.
/// - `Option<&mut T>` is followed when `Some`; `None` fails with
///   [`Error::InvalidUnmarshal`].
///
/// Anything else resolves to [`Error::InvalidIndirect`]. Allocations are
/// written into the caller's memory and stay in place even when binding
/// fails afterwards.
pub trait Destination {
    fn resolve(&mut self) -> Result<Resolved<'_>, Error>;
}

/// A map whose existing values are overwritten from the environment.
pub trait StringMap {
    /// Visit every entry, keyed by its existing key.
    fn for_each_entry(&mut self, f: &mut dyn FnMut(&str, &mut String));
}

impl<S> StringMap for HashMap<String, String, S> {
    fn for_each_entry(&mut self, f: &mut dyn FnMut(&str, &mut String)) {
        for (key, value) in self.iter_mut() {
            f(key, value);
        }
    }
}

impl StringMap for BTreeMap<String, String> {
    fn for_each_entry(&mut self, f: &mut dyn FnMut(&str, &mut String)) {
        for (key, value) in self.iter_mut() {
            f(key, value);
        }
    }
}

impl<T: Destination + ?Sized> Destination for &mut T {
    fn resolve(&mut self) -> Result<Resolved<'_>, Error> {
        (**self).resolve()
    }
}

impl<T: Destination + ?Sized> Destination for Box<T> {
    fn resolve(&mut self) -> Result<Resolved<'_>, Error> {
        (**self).resolve()
    }
}

impl<T: Destination + Default> Destination for Option<Box<T>> {
    fn resolve(&mut self) -> Result<Resolved<'_>, Error> {
        self.get_or_insert_with(Box::default).resolve()
    }
}

impl<T: Destination + ?Sized> Destination for Option<&mut T> {
    fn resolve(&mut self) -> Result<Resolved<'_>, Error> {
        match self {
            Some(inner) => inner.resolve(),
            None => Err(Error::invalid_unmarshal::<Self>()),
        }
    }
}

impl<K: 'static, V: 'static, S: 'static> Destination for HashMap<K, V, S> {
    fn resolve(&mut self) -> Result<Resolved<'_>, Error> {
        let any: &mut dyn Any = self;
        match any.downcast_mut::<HashMap<String, String, S>>() {
            Some(map) => Ok(Resolved::Map(map)),
            None => Err(Error::invalid_map::<Self>()),
        }
    }
}

impl<K: 'static, V: 'static, S: Default + 'static> Destination for Option<HashMap<K, V, S>> {
    fn resolve(&mut self) -> Result<Resolved<'_>, Error> {
        self.get_or_insert_with(HashMap::default).resolve()
    }
}

impl<K: 'static, V: 'static> Destination for BTreeMap<K, V> {
    fn resolve(&mut self) -> Result<Resolved<'_>, Error> {
        let any: &mut dyn Any = self;
        match any.downcast_mut::<BTreeMap<String, String>>() {
            Some(map) => Ok(Resolved::Map(map)),
            None => Err(Error::invalid_map::<Self>()),
        }
    }
}

impl<K: 'static, V: 'static> Destination for Option<BTreeMap<K, V>> {
    fn resolve(&mut self) -> Result<Resolved<'_>, Error> {
        self.get_or_insert_with(BTreeMap::new).resolve()
    }
}

macro_rules! impl_unbindable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Destination for $ty {
                fn resolve(&mut self) -> Result<Resolved<'_>, Error> {
                    Err(Error::invalid_indirect::<Self>())
                }
            }
        )*
    };
}

impl_unbindable!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
    String, (),
);

impl<T> Destination for Vec<T> {
    fn resolve(&mut self) -> Result<Resolved<'_>, Error> {
        Err(Error::invalid_indirect::<Self>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_map(resolved: Result<Resolved<'_>, Error>) -> bool {
        matches!(resolved, Ok(Resolved::Map(_)))
    }

    #[test]
    fn test_resolve_plain_map() {
        let mut map: HashMap<String, String> = HashMap::new();
        assert!(is_map(map.resolve()));
    }

    #[test]
    fn test_resolve_allocates_nil_map_through_nil_pointer() {
        let mut outer: Option<Box<Option<HashMap<String, String>>>> = None;

        match outer.resolve() {
            Ok(Resolved::Map(map)) => {
                map.for_each_entry(&mut |_, _| unreachable!("freshly allocated map is empty"));
            }
            _ => panic!("expected a map"),
        }

        // The allocation is reachable through the original chain.
        let inner = outer.as_deref_mut().and_then(Option::as_mut).unwrap();
        inner.insert("foo".to_string(), String::new());
        match outer.resolve() {
            Ok(Resolved::Map(map)) => {
                let mut keys = Vec::new();
                map.for_each_entry(&mut |key, value| {
                    *value = "bar".to_string();
                    keys.push(key.to_string());
                });
                assert_eq!(keys, vec!["foo".to_string()]);
            }
            _ => panic!("expected a map"),
        }
        let inner = outer.as_deref().and_then(Option::as_ref).unwrap();
        assert_eq!(inner["foo"], "bar");
    }

    #[test]
    fn test_resolve_boxed_dyn_destination() {
        let mut boxed: Box<dyn Destination> = Box::new(BTreeMap::<String, String>::new());
        assert!(is_map(boxed.resolve()));
    }

    #[test]
    fn test_resolve_null_reference() {
        let mut dest: Option<&mut HashMap<String, String>> = None;
        assert!(matches!(
            dest.resolve(),
            Err(Error::InvalidUnmarshal { .. })
        ));
    }

    #[test]
    fn test_resolve_non_null_reference() {
        let mut map: HashMap<String, String> = HashMap::new();
        let mut dest = Some(&mut map);
        assert!(is_map(dest.resolve()));
    }

    #[test]
    fn test_resolve_scalar_is_invalid_indirect() {
        let mut value = 0i32;
        match value.resolve() {
            Err(Error::InvalidIndirect { type_name, map }) => {
                assert_eq!(type_name, "i32");
                assert!(!map);
            }
            _ => panic!("expected InvalidIndirect"),
        }
    }

    #[test]
    fn test_resolve_non_string_map_is_invalid_indirect() {
        let mut map: HashMap<String, i32> = HashMap::new();
        assert!(matches!(
            map.resolve(),
            Err(Error::InvalidIndirect { map: true, .. })
        ));

        let mut map: Option<BTreeMap<i32, String>> = None;
        assert!(matches!(
            map.resolve(),
            Err(Error::InvalidIndirect { map: true, .. })
        ));
        // The map was still allocated before the shape check failed.
        assert!(map.is_some());
    }
}
