//! Sources of environment variable values

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// A read-only store of environment variables, queried by exact key.
///
/// [`bind`](crate::bind) reads from [`ProcessEnv`]. Use
/// [`bind_with`](crate::bind_with) to bind against any other store, such as
/// a `HashMap<String, String>` in tests.
pub trait Environment {
    /// Look up `key`, returning `None` if it is absent.
    fn get(&self, key: &str) -> Option<String>;
}

/// The environment inherited by the current process.
///
/// Variables whose value is not valid Unicode are treated as absent.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl<S: BuildHasher> Environment for HashMap<String, String, S> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl Environment for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    #[serial]
    fn test_process_env_present() {
        env::set_var("ENVBIND_PROCESS_PRESENT", "value");
        assert_eq!(ProcessEnv.get("ENVBIND_PROCESS_PRESENT"), Some("value".to_string()));
        env::remove_var("ENVBIND_PROCESS_PRESENT");
    }

    #[test]
    #[serial]
    fn test_process_env_absent() {
        env::remove_var("ENVBIND_PROCESS_ABSENT");
        assert_eq!(ProcessEnv.get("ENVBIND_PROCESS_ABSENT"), None);
    }

    #[test]
    fn test_map_env_is_exact_match() {
        let vars: HashMap<String, String> = [("Port".to_string(), "80".to_string())].into();
        assert_eq!(Environment::get(&vars, "Port"), Some("80".to_string()));
        assert_eq!(Environment::get(&vars, "PORT"), None);
    }
}
