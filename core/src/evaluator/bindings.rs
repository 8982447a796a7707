use std::collections::BTreeMap;
use std::hash::BuildHasher;

/// Per-call local values, looked up by exact condition name before any
/// condition pattern is consulted.
pub trait Bindings<V> {
    fn lookup(&self, name: &str) -> Option<&V>;
}

impl<V, S: BuildHasher> Bindings<V> for std::collections::HashMap<String, V, S> {
    fn lookup(&self, name: &str) -> Option<&V> {
        self.get(name)
    }
}

impl<V, S: BuildHasher> Bindings<V> for hashbrown::HashMap<String, V, S> {
    fn lookup(&self, name: &str) -> Option<&V> {
        self.get(name)
    }
}

impl<V> Bindings<V> for BTreeMap<String, V> {
    fn lookup(&self, name: &str) -> Option<&V> {
        self.get(name)
    }
}

/// The first pair with a matching name wins.
impl<V> Bindings<V> for [(&str, V)] {
    fn lookup(&self, name: &str) -> Option<&V> {
        self.iter().find(|(key, _)| *key == name).map(|(_, value)| value)
    }
}

impl<V, const N: usize> Bindings<V> for [(&str, V); N] {
    fn lookup(&self, name: &str) -> Option<&V> {
        self.as_slice().lookup(name)
    }
}

impl<V> Bindings<V> for Vec<(&str, V)> {
    fn lookup(&self, name: &str) -> Option<&V> {
        self.as_slice().lookup(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let pairs = [("a", 1), ("b", 2), ("a", 3)];
        assert_eq!(pairs.lookup("a"), Some(&1));
        assert_eq!(pairs.lookup("c"), None);

        let mut map = hashbrown::HashMap::new();
        map.insert("x".to_string(), 7);
        assert_eq!(map.lookup("x"), Some(&7));

        let tree: BTreeMap<String, i32> = [("y".to_string(), 8)].into_iter().collect();
        assert_eq!(tree.lookup("y"), Some(&8));
    }
}
