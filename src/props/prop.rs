//! The page property ("prop") model.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;

use crate::error::BoxError;

/// Group a deferred prop belongs to when none is assigned.
pub const DEFAULT_DEFERRED_GROUP: &str = "default";

/// Future returned by a lazy prop resolver.
pub type LazyFuture = BoxFuture<'static, Result<Value, BoxError>>;

type LazyFn = Arc<dyn Fn() -> LazyFuture + Send + Sync>;

enum PropSource {
    /// Value captured at construction.
    Immediate(Value),
    /// Construction-time serialization failure, surfaced at resolution.
    Invalid(String),
    /// Resolver invoked on demand.
    Lazy(LazyFn),
}

impl Clone for PropSource {
    fn clone(&self) -> Self {
        match self {
            Self::Immediate(value) => Self::Immediate(value.clone()),
            Self::Invalid(message) => Self::Invalid(message.clone()),
            Self::Lazy(resolver) => Self::Lazy(Arc::clone(resolver)),
        }
    }
}

/// A single named property destined for the client page component.
///
/// Props control data visibility, lazy loading, merge behavior, and
/// resolution timing. Create them with the constructors:
///
/// - [`Prop::new`]: standard prop, included on the initial render
/// - [`Prop::always`]: always included, ignores partial reload filters
/// - [`Prop::optional`]: lazy, resolved only when explicitly requested
/// - [`Prop::deferred`]: lazy, advertised by group and fetched by the client
///   after the initial render
#[derive(Clone)]
pub struct Prop {
    key: String,
    source: PropSource,
    group: String,
    mergeable: bool,
    deferred: bool,
    lazy: bool,
    ignorable: bool,
    concurrent: bool,
}

impl Prop {
    /// A standard prop, included on initial loads and partial reloads.
    pub fn new(key: impl Into<String>, value: impl Serialize) -> Self {
        Self {
            key: key.into(),
            source: PropSource::from_serialize(value),
            group: DEFAULT_DEFERRED_GROUP.to_string(),
            mergeable: false,
            deferred: false,
            lazy: false,
            ignorable: true,
            concurrent: false,
        }
    }

    /// A prop that is always included, bypassing partial reload filters.
    ///
    /// Use for data that must be present on every response, such as
    /// authentication state or global configuration.
    pub fn always(key: impl Into<String>, value: impl Serialize) -> Self {
        let mut prop = Self::new(key, value);
        prop.ignorable = false;
        prop
    }

    /// A lazily-evaluated prop resolved only when a partial reload
    /// explicitly requests it.
    pub fn optional<F, Fut, T, E>(key: impl Into<String>, resolver: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Serialize,
        E: Into<BoxError>,
    {
        let mut prop = Self::from_resolver(key, resolver);
        prop.lazy = true;
        prop
    }

    /// A lazily-evaluated prop withheld from the initial response; only its
    /// key and group are advertised, and the client fetches the value in a
    /// follow-up partial request.
    pub fn deferred<F, Fut, T, E>(key: impl Into<String>, resolver: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Serialize,
        E: Into<BoxError>,
    {
        let mut prop = Self::from_resolver(key, resolver);
        prop.lazy = true;
        prop.deferred = true;
        prop
    }

    /// Tell the client to merge this prop into its existing value on update
    /// instead of replacing it.
    pub fn merge(mut self) -> Self {
        self.mergeable = true;
        self
    }

    /// Assign the deferred group. Meaningful only for deferred props.
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Mark the prop as eligible for parallel resolution. Meaningful only
    /// for lazy props.
    pub fn concurrent(mut self) -> Self {
        self.concurrent = true;
        self
    }

    /// The key under which the resolved value is placed in the page props.
    pub fn key(&self) -> &str {
        &self.key
    }

    fn from_resolver<F, Fut, T, E>(key: impl Into<String>, resolver: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Serialize,
        E: Into<BoxError>,
    {
        let resolver: LazyFn = Arc::new(move || {
            let fut = resolver();
            Box::pin(async move {
                let value = fut.await.map_err(Into::into)?;
                serde_json::to_value(value).map_err(BoxError::from)
            })
        });

        Self {
            key: key.into(),
            source: PropSource::Lazy(resolver),
            group: DEFAULT_DEFERRED_GROUP.to_string(),
            mergeable: false,
            deferred: false,
            lazy: false,
            ignorable: true,
            concurrent: false,
        }
    }

    pub(crate) fn is_lazy(&self) -> bool {
        self.lazy
    }

    pub(crate) fn is_ignorable(&self) -> bool {
        self.ignorable
    }

    pub(crate) fn is_deferred(&self) -> bool {
        self.deferred
    }

    pub(crate) fn is_mergeable(&self) -> bool {
        self.mergeable
    }

    pub(crate) fn is_concurrent(&self) -> bool {
        self.concurrent
    }

    pub(crate) fn group_name(&self) -> &str {
        &self.group
    }

    /// An owned future resolving the prop value, detached from `self` so it
    /// can be submitted to the worker pool.
    pub(crate) fn resolver(&self) -> LazyFuture {
        match &self.source {
            PropSource::Immediate(value) => {
                let value = value.clone();
                Box::pin(async move { Ok(value) })
            }
            PropSource::Invalid(message) => {
                let message = message.clone();
                Box::pin(async move { Err(BoxError::from(message)) })
            }
            PropSource::Lazy(resolver) => resolver(),
        }
    }

    fn kind(&self) -> &'static str {
        match (self.lazy, self.deferred, self.ignorable) {
            (false, _, false) => "always",
            (false, _, true) => "standard",
            (true, true, _) => "deferred",
            (true, false, _) => "optional",
        }
    }
}

impl PropSource {
    fn from_serialize(value: impl Serialize) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => Self::Immediate(value),
            Err(err) => Self::Invalid(err.to_string()),
        }
    }
}

impl fmt::Debug for Prop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prop")
            .field("key", &self.key)
            .field("kind", &self.kind())
            .field("group", &self.group)
            .field("mergeable", &self.mergeable)
            .field("concurrent", &self.concurrent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[tokio::test]
    async fn test_standard_prop_resolves_captured_value() {
        let prop = Prop::new("count", 42);
        assert!(!prop.is_lazy());
        assert!(prop.is_ignorable());
        assert_eq!(prop.resolver().await.unwrap(), serde_json::json!(42));
    }

    #[tokio::test]
    async fn test_always_prop_is_not_ignorable() {
        let prop = Prop::always("auth", "user-1");
        assert!(!prop.is_ignorable());
        assert!(!prop.is_lazy());
    }

    #[tokio::test]
    async fn test_optional_prop_is_lazy() {
        let prop = Prop::optional("stats", || async { Ok::<_, Infallible>(vec![1, 2, 3]) });
        assert!(prop.is_lazy());
        assert!(!prop.is_deferred());
        assert_eq!(prop.resolver().await.unwrap(), serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn test_deferred_prop_defaults_to_default_group() {
        let prop = Prop::deferred("feed", || async { Ok::<_, Infallible>(()) });
        assert!(prop.is_lazy());
        assert!(prop.is_deferred());
        assert_eq!(prop.group_name(), DEFAULT_DEFERRED_GROUP);

        let grouped = Prop::deferred("feed", || async { Ok::<_, Infallible>(()) }).group("g1");
        assert_eq!(grouped.group_name(), "g1");
    }

    #[tokio::test]
    async fn test_lazy_resolver_error_is_propagated() {
        let prop = Prop::optional("broken", || async { Err::<(), String>("nope".to_string()) });
        let err: BoxError = prop.resolver().await.unwrap_err();
        assert_eq!(err.to_string(), "nope");
    }
}
