//! Cache construction with shared defaults

use super::id::{CacheId, IdGenerator};
use super::policy::RemeasurePolicy;
use super::position_cache::PositionCache;
use crate::config::ResolvedConfig;
use crate::error::CacheError;

/// Creates [`PositionCache`]s with a shared policy and default estimate.
///
/// Ids come from the injected generator unless the caller names the cache explicitly.
///
/// # Examples
///
/// ```
/// use rowcache::cache::{CacheFactory, RemeasurePolicy, SequentialIds};
///
/// let mut factory = CacheFactory::new(SequentialIds::new(), RemeasurePolicy::Once, 60.0);
/// let first = factory.create(10, None, None)?;
/// let second = factory.create(3, Some(20.0), None)?;
/// assert_eq!(first.id().as_str(), "0");
/// assert_eq!(second.id().as_str(), "1");
/// assert_eq!(second.total_height(), 60.0);
/// # Ok::<(), rowcache::error::CacheError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CacheFactory<G> {
    ids: G,
    policy: RemeasurePolicy,
    default_estimate: f64,
}

impl<G: IdGenerator> CacheFactory<G> {
    /// Factory drawing ids from `ids`.
    pub fn new(ids: G, policy: RemeasurePolicy, default_estimate: f64) -> Self {
        Self {
            ids,
            policy,
            default_estimate,
        }
    }

    /// Factory using the policy and estimate of a resolved configuration.
    pub fn from_config(ids: G, config: &ResolvedConfig) -> Self {
        Self::new(ids, config.remeasure_policy, config.estimated_row_height)
    }

    /// Create a cache of `length` rows.
    ///
    /// `estimated_row_height` falls back to the factory default and `id` to the next
    /// generated id. An explicit id does not consume a generated one.
    ///
    /// # Errors
    ///
    /// Same as [`PositionCache::new`].
    pub fn create(
        &mut self,
        length: usize,
        estimated_row_height: Option<f64>,
        id: Option<CacheId>,
    ) -> Result<PositionCache, CacheError> {
        let id = id.unwrap_or_else(|| self.ids.next_id());
        PositionCache::new(
            length,
            estimated_row_height.unwrap_or(self.default_estimate),
            id,
            self.policy,
        )
    }

    /// Policy given to every created cache.
    pub fn policy(&self) -> RemeasurePolicy {
        self.policy
    }

    /// Estimate used when none is supplied.
    pub fn default_estimate(&self) -> f64 {
        self.default_estimate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::SequentialIds;

    #[test]
    fn explicit_id_does_not_consume_generator() {
        let mut factory = CacheFactory::new(SequentialIds::new(), RemeasurePolicy::Once, 10.0);
        let named = factory.create(1, None, Some(CacheId::new("parent"))).unwrap();
        let generated = factory.create(1, None, None).unwrap();
        assert_eq!(named.id().as_str(), "parent");
        assert_eq!(generated.id().as_str(), "0");
    }

    #[test]
    fn created_caches_share_policy() {
        let mut factory = CacheFactory::new(SequentialIds::new(), RemeasurePolicy::Always, 10.0);
        let cache = factory.create(2, None, None).unwrap();
        assert_eq!(cache.policy(), RemeasurePolicy::Always);
        assert_eq!(cache.estimated_row_height(), 10.0);
    }

    #[test]
    fn from_config_uses_resolved_values() {
        let config = ResolvedConfig {
            estimated_row_height: 42.0,
            remeasure_policy: RemeasurePolicy::Always,
            ..ResolvedConfig::default()
        };
        let factory = CacheFactory::from_config(SequentialIds::new(), &config);
        assert_eq!(factory.default_estimate(), 42.0);
        assert_eq!(factory.policy(), RemeasurePolicy::Always);
    }

    #[test]
    fn zero_length_propagates_invalid_argument() {
        let mut factory = CacheFactory::new(SequentialIds::new(), RemeasurePolicy::Once, 10.0);
        assert!(matches!(
            factory.create(0, None, None),
            Err(CacheError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn deterministic_closure_generator() {
        let mut n = 0;
        let ids = move || {
            n += 1;
            CacheId::new(format!("node-{}", n))
        };
        let mut factory = CacheFactory::new(ids, RemeasurePolicy::Once, 10.0);
        assert_eq!(factory.create(1, None, None).unwrap().id().as_str(), "node-1");
        assert_eq!(factory.create(1, None, None).unwrap().id().as_str(), "node-2");
    }
}
