//! Prop resolution engine.
//!
//! # Responsibilities
//! - Compute the key → value mapping for a page render
//! - Apply partial-reload whitelist/blacklist filtering
//! - Run concurrent-marked props on a bounded worker pool
//! - Abort everything on the first resolution error
//!
//! # Design Decisions
//! - The pool is scoped to one page render; dropping the render future
//!   aborts in-flight and queued resolutions
//! - Pool results are inserted in submission order, so the mapping content
//!   is deterministic regardless of scheduling order

use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use super::Prop;
use crate::error::Error;

/// Partial-reload inclusion filter parsed from the request headers.
pub(crate) struct PartialFilter {
    pub whitelist: Option<Vec<String>>,
    pub blacklist: Option<Vec<String>>,
}

impl PartialFilter {
    fn excludes(&self, key: &str) -> bool {
        if let Some(whitelist) = &self.whitelist {
            if !whitelist.is_empty() && !whitelist.iter().any(|k| k == key) {
                return true;
            }
        }

        if let Some(blacklist) = &self.blacklist {
            if !blacklist.is_empty() && blacklist.iter().any(|k| k == key) {
                return true;
            }
        }

        false
    }
}

/// Resolve props for a full render: every eager prop is computed, lazy
/// props are skipped entirely (their existence is surfaced through the
/// deferred-group index instead).
pub(crate) async fn resolve_full(props: &[Prop]) -> Result<Map<String, Value>, Error> {
    let mut resolved = Map::new();

    for prop in props {
        if prop.is_lazy() {
            continue;
        }

        let value = prop
            .resolver()
            .await
            .map_err(|err| Error::prop(prop.key(), err))?;
        resolved.insert(prop.key().to_string(), value);
    }

    Ok(resolved)
}

/// Resolve props for a partial render.
///
/// Ignorable props go through the inclusion filter; survivors are computed
/// inline, except concurrent-marked props, which are submitted to a worker
/// pool bounded by `concurrency`. A `concurrency` of zero disables the pool
/// and resolves everything sequentially.
pub(crate) async fn resolve_partial(
    props: &[Prop],
    filter: &PartialFilter,
    concurrency: usize,
) -> Result<Map<String, Value>, Error> {
    let mut resolved = Map::new();
    let mut pooled: Vec<&Prop> = Vec::new();

    for prop in props {
        if prop.is_ignorable() && filter.excludes(prop.key()) {
            continue;
        }

        if prop.is_concurrent() && concurrency > 0 {
            pooled.push(prop);
            continue;
        }

        let value = prop
            .resolver()
            .await
            .map_err(|err| Error::prop(prop.key(), err))?;
        resolved.insert(prop.key().to_string(), value);
    }

    if !pooled.is_empty() {
        let values = resolve_pooled(&pooled, concurrency).await?;
        for (prop, value) in pooled.iter().zip(values) {
            resolved.insert(prop.key().to_string(), value);
        }
    }

    Ok(resolved)
}

/// Run the concurrent group on a worker pool of `concurrency` permits.
///
/// The first failing resolution shuts the pool down, aborting in-flight and
/// queued work, and becomes the sole reported error.
async fn resolve_pooled(props: &[&Prop], concurrency: usize) -> Result<Vec<Value>, Error> {
    tracing::debug!(
        props = props.len(),
        concurrency,
        "resolving props on the worker pool"
    );

    let permits = Arc::new(Semaphore::new(concurrency));
    let mut pool: JoinSet<Result<(usize, Value), Error>> = JoinSet::new();

    for (idx, prop) in props.iter().enumerate() {
        let permits = Arc::clone(&permits);
        let key = prop.key().to_string();
        let resolver = prop.resolver();

        pool.spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|err| Error::prop(key.clone(), err.to_string()))?;

            let value = resolver.await.map_err(|err| Error::prop(key, err))?;
            Ok((idx, value))
        });
    }

    let mut values: Vec<Option<Value>> = vec![None; props.len()];

    while let Some(joined) = pool.join_next().await {
        match joined {
            Ok(Ok((idx, value))) => values[idx] = Some(value),
            Ok(Err(err)) => {
                pool.shutdown().await;
                return Err(err);
            }
            Err(err) => {
                pool.shutdown().await;
                return Err(Error::Task(err));
            }
        }
    }

    Ok(values
        .into_iter()
        .map(|value| value.unwrap_or(Value::Null))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn no_filter() -> PartialFilter {
        PartialFilter {
            whitelist: None,
            blacklist: None,
        }
    }

    fn keys(resolved: &Map<String, Value>) -> Vec<&str> {
        resolved.keys().map(String::as_str).collect()
    }

    #[tokio::test]
    async fn test_full_render_skips_lazy_props() {
        let props = vec![
            Prop::new("a", 1),
            Prop::always("b", 2),
            Prop::optional("c", || async { Ok::<_, Infallible>(3) }),
            Prop::deferred("d", || async { Ok::<_, Infallible>(4) }),
        ];

        let resolved = resolve_full(&props).await.unwrap();
        assert_eq!(keys(&resolved), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_full_render_last_key_wins() {
        let props = vec![Prop::new("a", "first"), Prop::new("a", "second")];

        let resolved = resolve_full(&props).await.unwrap();
        assert_eq!(resolved["a"], serde_json::json!("second"));
    }

    #[tokio::test]
    async fn test_partial_whitelist_filters_ignorable_props() {
        let props = vec![
            Prop::new("a", 1),
            Prop::new("b", 2),
            Prop::new("c", 3),
            Prop::always("auth", "u1"),
        ];
        let filter = PartialFilter {
            whitelist: Some(vec!["a".to_string(), "b".to_string()]),
            blacklist: None,
        };

        let resolved = resolve_partial(&props, &filter, 0).await.unwrap();
        assert_eq!(keys(&resolved), vec!["a", "auth", "b"]);
    }

    #[tokio::test]
    async fn test_partial_blacklist_excludes_keys() {
        let props = vec![Prop::new("a", 1), Prop::new("b", 2), Prop::new("c", 3)];
        let filter = PartialFilter {
            whitelist: None,
            blacklist: Some(vec!["c".to_string()]),
        };

        let resolved = resolve_partial(&props, &filter, 0).await.unwrap();
        assert_eq!(keys(&resolved), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_partial_resolves_requested_lazy_props() {
        let props = vec![
            Prop::optional("stats", || async { Ok::<_, Infallible>(7) }),
            Prop::deferred("feed", || async { Ok::<_, Infallible>(8) }),
        ];

        let resolved = resolve_partial(&props, &no_filter(), 0).await.unwrap();
        assert_eq!(resolved["stats"], serde_json::json!(7));
        assert_eq!(resolved["feed"], serde_json::json!(8));
    }

    #[tokio::test]
    async fn test_concurrent_props_all_resolve() {
        let props: Vec<Prop> = (0..16)
            .map(|i| {
                Prop::deferred(format!("p{i}"), move || async move {
                    Ok::<_, Infallible>(i)
                })
                .concurrent()
            })
            .collect();

        let resolved = resolve_partial(&props, &no_filter(), 4).await.unwrap();
        assert_eq!(resolved.len(), 16);
        for i in 0..16 {
            assert_eq!(resolved[&format!("p{i}")], serde_json::json!(i));
        }
    }

    #[tokio::test]
    async fn test_sequential_error_short_circuits() {
        let touched = Arc::new(AtomicUsize::new(0));
        let later = Arc::clone(&touched);
        let props = vec![
            Prop::optional("broken", || async { Err::<(), String>("boom".to_string()) }),
            Prop::optional("after", move || {
                let later = Arc::clone(&later);
                async move {
                    later.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, Infallible>(1)
                }
            }),
        ];

        let err = resolve_partial(&props, &no_filter(), 0).await.unwrap_err();
        assert!(err.to_string().contains("broken"));
        assert_eq!(touched.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_concurrent_error_aborts_the_pool() {
        let completions = Arc::new(AtomicUsize::new(0));

        let mut props = vec![Prop::deferred("broken", || async {
            Err::<(), String>("boom".to_string())
        })
        .concurrent()];

        for i in 0..4 {
            let completions = Arc::clone(&completions);
            props.push(
                Prop::deferred(format!("slow{i}"), move || {
                    let completions = Arc::clone(&completions);
                    async move {
                        tokio::time::sleep(Duration::from_secs(5)).await;
                        completions.fetch_add(1, Ordering::SeqCst);
                        Ok::<_, Infallible>(i)
                    }
                })
                .concurrent(),
            );
        }

        let err = resolve_partial(&props, &no_filter(), 8).await.unwrap_err();
        assert!(err.to_string().contains("broken"));

        // Aborted resolutions never complete after the render has failed.
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(completions.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_pool_results_override_sequential_duplicates() {
        let props = vec![
            Prop::optional("dup", || async { Ok::<_, Infallible>("inline") }),
            Prop::deferred("dup", || async { Ok::<_, Infallible>("pooled") }).concurrent(),
        ];

        let resolved = resolve_partial(&props, &no_filter(), 2).await.unwrap();
        assert_eq!(resolved["dup"], serde_json::json!("pooled"));
    }
}
