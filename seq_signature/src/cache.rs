//! Memoized term vectors shared by all workers of a run.
use super::term::TermSignature;
use super::{Config, ConfigError, SignatureError};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Term bytes -> term vector. Each distinct term is built at most once,
/// however many threads ask for it at the same time. Entries are never evicted.
pub struct TermCache {
    inner: DashMap<Vec<u8>, Arc<TermSignature>>,
    config: Config,
    // Entries inserted or reserved. Only consulted when `max_terms` is set.
    reserved: AtomicUsize,
    computed: AtomicUsize,
}

impl std::fmt::Debug for TermCache {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "TermCache({} terms, {} built)",
            self.inner.len(),
            self.computed()
        )
    }
}

impl TermCache {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            inner: DashMap::new(),
            config: config.clone(),
            reserved: AtomicUsize::new(0),
            computed: AtomicUsize::new(0),
        })
    }
    /// Return the vector of `term`, building it if no one did before.
    /// When several threads race on an unseen term, the first one to take
    /// the shard builds it and the others receive that same vector.
    pub fn get_or_create(&self, term: &[u8]) -> Result<Arc<TermSignature>, SignatureError> {
        if let Some(sig) = self.inner.get(term) {
            return Ok(Arc::clone(sig.value()));
        }
        match self.inner.entry(term.to_vec()) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                self.reserve()?;
                match TermSignature::build(term, &self.config) {
                    Ok(sig) => {
                        self.computed.fetch_add(1, Ordering::Relaxed);
                        trace!("Built {}:{:?}", String::from_utf8_lossy(term), sig);
                        let sig = Arc::new(sig);
                        entry.insert(Arc::clone(&sig));
                        Ok(sig)
                    }
                    Err(why) => {
                        self.release();
                        Err(why)
                    }
                }
            }
        }
    }
    fn reserve(&self) -> Result<(), SignatureError> {
        let capacity = match self.config.max_terms {
            Some(capacity) => capacity,
            None => return Ok(()),
        };
        self.reserved
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |x| {
                if x < capacity {
                    Some(x + 1)
                } else {
                    None
                }
            })
            .map(|_| ())
            .map_err(|_| SignatureError::CacheFull { capacity })
    }
    fn release(&self) {
        if self.config.max_terms.is_some() {
            self.reserved.fetch_sub(1, Ordering::AcqRel);
        }
    }
    /// The number of distinct terms in the cache.
    pub fn len(&self) -> usize {
        self.inner.len()
    }
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
    /// How many times a term vector has been built.
    pub fn computed(&self) -> usize {
        self.computed.load(Ordering::Relaxed)
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_CONFIG;
    use std::sync::Barrier;
    #[test]
    fn memoize() {
        let cache = TermCache::new(&DEFAULT_CONFIG).unwrap();
        assert!(cache.is_empty());
        let x = cache.get_or_create(b"CST").unwrap();
        let y = cache.get_or_create(b"CST").unwrap();
        assert!(Arc::ptr_eq(&x, &y));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.computed(), 1);
        let z = cache.get_or_create(b"TSC").unwrap();
        assert_ne!(x, z);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.computed(), 2);
    }
    #[test]
    fn same_as_uncached() {
        let cache = TermCache::new(&DEFAULT_CONFIG).unwrap();
        for term in [&b"AAA"[..], b"WYF", b"QHR", b"AAA"].iter() {
            let cached = cache.get_or_create(term).unwrap();
            let fresh = TermSignature::build(term, &DEFAULT_CONFIG).unwrap();
            assert_eq!(*cached, fresh);
        }
        assert_eq!(cache.computed(), 3);
    }
    #[test]
    fn invalid_term_is_not_cached() {
        let cache = TermCache::new(&DEFAULT_CONFIG).unwrap();
        assert!(cache.get_or_create(b"CBT").is_err());
        assert!(cache.get_or_create(b"CBT").is_err());
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.computed(), 0);
    }
    #[test]
    fn concurrent_same_term() {
        let threads = 16;
        let cache = Arc::new(TermCache::new(&DEFAULT_CONFIG).unwrap());
        let barrier = Arc::new(Barrier::new(threads));
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    cache.get_or_create(b"KMI").unwrap()
                })
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let expected = TermSignature::build(b"KMI", &DEFAULT_CONFIG).unwrap();
        assert!(results.iter().all(|sig| **sig == expected));
        assert!(results.iter().all(|sig| Arc::ptr_eq(sig, &results[0])));
        assert_eq!(cache.computed(), 1);
        assert_eq!(cache.len(), 1);
    }
    #[test]
    fn concurrent_many_terms() {
        use crate::alphabet::AMINO_ACIDS;
        let threads = 8;
        let terms: Vec<Vec<u8>> = AMINO_ACIDS
            .iter()
            .flat_map(|&a| AMINO_ACIDS.iter().map(move |&b| vec![a, b, b'W']))
            .collect();
        let terms = Arc::new(terms);
        let cache = Arc::new(TermCache::new(&DEFAULT_CONFIG).unwrap());
        let barrier = Arc::new(Barrier::new(threads));
        let handles: Vec<_> = (0..threads)
            .map(|i| {
                let (cache, barrier, terms) =
                    (Arc::clone(&cache), Arc::clone(&barrier), Arc::clone(&terms));
                std::thread::spawn(move || {
                    barrier.wait();
                    // Each thread walks the terms from a different starting point.
                    let offset = i * terms.len() / threads;
                    (0..terms.len())
                        .map(|j| &terms[(j + offset) % terms.len()])
                        .map(|t| (t.clone(), cache.get_or_create(t).unwrap()))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            for (term, sig) in handle.join().unwrap() {
                assert_eq!(*sig, TermSignature::build(&term, &DEFAULT_CONFIG).unwrap());
            }
        }
        assert_eq!(cache.len(), 400);
        assert_eq!(cache.computed(), 400);
    }
    #[test]
    fn capacity() {
        let config = Config {
            max_terms: Some(2),
            ..DEFAULT_CONFIG
        };
        let cache = TermCache::new(&config).unwrap();
        cache.get_or_create(b"CST").unwrap();
        assert!(cache.get_or_create(b"CXT").is_err());
        cache.get_or_create(b"PAG").unwrap();
        assert_eq!(
            cache.get_or_create(b"NDE"),
            Err(SignatureError::CacheFull { capacity: 2 })
        );
        // Known terms still resolve.
        assert!(cache.get_or_create(b"CST").is_ok());
        assert_eq!(cache.len(), 2);
    }
    #[test]
    fn rejects_bad_config() {
        let config = Config::new(3, 16, 12, 21);
        assert!(TermCache::new(&config).is_err());
    }
}
