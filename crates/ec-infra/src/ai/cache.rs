use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use ec_core::ports::{AiServiceError, ClassifierPort};
use ec_core::scan::{CapturedImage, ClassificationResult};
use ec_core::Language;

/// Entries kept by [`CachingClassifier::new`].
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

type CacheKey = (String, Language);

#[derive(Default)]
struct Entries {
    results: HashMap<CacheKey, ClassificationResult>,
    /// Insertion order; the front is evicted first.
    order: VecDeque<CacheKey>,
}

/// Memoizes successful classifications by (image digest, language).
///
/// Failures are never cached, so a retry always reaches the inner classifier.
/// The cache is in-memory only and holds at most `capacity` results; the
/// oldest insertion is evicted first.
pub struct CachingClassifier {
    inner: Arc<dyn ClassifierPort>,
    capacity: usize,
    entries: Mutex<Entries>,
}

impl CachingClassifier {
    pub fn new(inner: Arc<dyn ClassifierPort>) -> Self {
        Self::with_capacity(inner, DEFAULT_CACHE_CAPACITY)
    }

    /// A capacity of zero is treated as one.
    pub fn with_capacity(inner: Arc<dyn ClassifierPort>, capacity: usize) -> Self {
        Self {
            inner,
            capacity: capacity.max(1),
            entries: Mutex::new(Entries::default()),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.results.len()
    }
}

#[async_trait]
impl ClassifierPort for CachingClassifier {
    async fn classify(
        &self,
        image: &CapturedImage,
        language: Language,
    ) -> Result<ClassificationResult, AiServiceError> {
        let key = (image.digest(), language);
        if let Some(hit) = self.entries.lock().await.results.get(&key) {
            debug!(digest = %key.0, %language, "classification cache hit");
            return Ok(hit.clone());
        }

        let result = self.inner.classify(image, language).await?;

        let mut entries = self.entries.lock().await;
        if !entries.results.contains_key(&key) {
            while entries.results.len() >= self.capacity {
                let Some(oldest) = entries.order.pop_front() else {
                    break;
                };
                entries.results.remove(&oldest);
                debug!(digest = %oldest.0, "classification cache evicted oldest entry");
            }
            entries.order.push_back(key.clone());
        }
        entries.results.insert(key, result.clone());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ec_core::scan::{Classification, ImageMime};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingClassifier {
        calls: AtomicUsize,
        fail_first: bool,
    }

    #[async_trait]
    impl ClassifierPort for CountingClassifier {
        async fn classify(
            &self,
            _image: &CapturedImage,
            _language: Language,
        ) -> Result<ClassificationResult, AiServiceError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_first && n == 0 {
                return Err(AiServiceError::Transport("timeout".into()));
            }
            Ok(ClassificationResult {
                classification: Classification::Reusable,
                reason: "r".into(),
                material_name: "Jar".into(),
                impact_message: "i".into(),
                suggestions: Vec::new(),
            })
        }
    }

    fn image(bytes: &[u8]) -> CapturedImage {
        CapturedImage::new(bytes.to_vec(), ImageMime::Png).unwrap()
    }

    #[tokio::test]
    async fn repeated_image_and_language_hits_cache() {
        let inner = Arc::new(CountingClassifier {
            calls: AtomicUsize::new(0),
            fail_first: false,
        });
        let cache = CachingClassifier::new(inner.clone());

        cache.classify(&image(b"abc"), Language::En).await.unwrap();
        cache.classify(&image(b"abc"), Language::En).await.unwrap();
        cache.classify(&image(b"abc"), Language::Ta).await.unwrap();
        cache.classify(&image(b"xyz"), Language::En).await.unwrap();

        assert_eq!(inner.calls.load(Ordering::SeqCst), 3);
        assert_eq!(cache.len().await, 3);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let inner = Arc::new(CountingClassifier {
            calls: AtomicUsize::new(0),
            fail_first: true,
        });
        let cache = CachingClassifier::new(inner.clone());

        assert!(cache.classify(&image(b"abc"), Language::En).await.is_err());
        assert!(cache.classify(&image(b"abc"), Language::En).await.is_ok());
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn oldest_entry_is_evicted_at_capacity() {
        let inner = Arc::new(CountingClassifier {
            calls: AtomicUsize::new(0),
            fail_first: false,
        });
        let cache = CachingClassifier::with_capacity(inner.clone(), 2);

        cache.classify(&image(b"one"), Language::En).await.unwrap();
        cache.classify(&image(b"two"), Language::En).await.unwrap();
        cache.classify(&image(b"three"), Language::En).await.unwrap();
        assert_eq!(cache.len().await, 2);
        assert_eq!(inner.calls.load(Ordering::SeqCst), 3);

        // "two" survived, "one" was evicted and goes back to the inner classifier.
        cache.classify(&image(b"two"), Language::En).await.unwrap();
        assert_eq!(inner.calls.load(Ordering::SeqCst), 3);
        cache.classify(&image(b"one"), Language::En).await.unwrap();
        assert_eq!(inner.calls.load(Ordering::SeqCst), 4);
        assert_eq!(cache.len().await, 2);
    }
}
