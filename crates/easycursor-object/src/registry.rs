//! Process-wide field-map cache, keyed by record type.
//!
//! Multiple cursors over the same record type may be constructed from
//! different threads at once. The cache makes first use safe: the map is
//! computed outside the lock, and the first writer wins, so every caller
//! ends up sharing one identical `Arc<FieldMap>` per type.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use easycursor_core::field::{CaseMode, FieldMap};

use crate::descriptor::Record;

/// Thread-safe cache of per-type field maps.
struct DescriptorCache {
    cache: RwLock<HashMap<TypeId, Arc<FieldMap>>>,
}

impl DescriptorCache {
    fn new() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
        }
    }

    fn get_or_build<T: Record>(&self) -> Arc<FieldMap> {
        let key = TypeId::of::<T>();

        // Fast path: already cached.
        {
            let cache = self.cache.read().unwrap();
            if let Some(fields) = cache.get(&key) {
                return Arc::clone(fields);
            }
        }

        // Compute outside the lock, install once.
        let mut fields = FieldMap::new(CaseMode::Insensitive);
        for name in T::descriptor().names() {
            fields.push(name.as_str());
        }
        tracing::debug!(
            record_type = std::any::type_name::<T>(),
            fields = fields.len(),
            "built field map for record type"
        );
        let fields = Arc::new(fields);
        let mut cache = self.cache.write().unwrap();
        Arc::clone(cache.entry(key).or_insert(fields))
    }
}

/// Global cache singleton.
fn descriptor_cache() -> &'static DescriptorCache {
    static CACHE: OnceLock<DescriptorCache> = OnceLock::new();
    CACHE.get_or_init(DescriptorCache::new)
}

/// The shared field map for a record type, computed on first use.
#[must_use]
pub fn field_map_for<T: Record>() -> Arc<FieldMap> {
    descriptor_cache().get_or_build::<T>()
}

#[cfg(test)]
mod tests {
    use easycursor_core::Value;

    use super::*;
    use crate::descriptor::FieldDescriptor;

    struct Cached {
        n: i64,
    }

    impl Record for Cached {
        fn descriptor() -> FieldDescriptor<Self> {
            FieldDescriptor::new().field("getN", |c| Value::from(c.n))
        }
    }

    #[test]
    fn test_same_type_shares_one_map() {
        let a = field_map_for::<Cached>();
        let b = field_map_for::<Cached>();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.names(), &["n".to_string()]);
    }

    #[test]
    fn test_concurrent_first_use_converges() {
        struct Raced {
            x: i64,
        }
        impl Record for Raced {
            fn descriptor() -> FieldDescriptor<Self> {
                FieldDescriptor::new().field("getX", |r| Value::from(r.x))
            }
        }

        let maps: Vec<Arc<FieldMap>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(field_map_for::<Raced>))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        for map in &maps[1..] {
            assert!(Arc::ptr_eq(&maps[0], map));
        }
    }
}
