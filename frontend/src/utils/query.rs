use std::{any::Any, cell::RefCell, collections::HashMap, fmt, future::Future, rc::Rc, time::Duration};
use dioxus::logger::tracing::{debug, info, warn};
use futures::channel::oneshot;

use super::server::AppError;

/// Cache key made of ordered segments, e.g. `orderBook/alice/buy/20`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
  pub fn root(segment: &str) -> Self {
    QueryKey(vec![segment.to_string()])
  }

  pub fn with(mut self, segment: impl ToString) -> Self {
    self.0.push(segment.to_string());
    self
  }

  /// Optional segments keep their slot so `None` and `Some` never collide.
  pub fn with_opt<T: ToString>(self, segment: Option<T>) -> Self {
    match segment {
      Some(value) => self.with(value),
      None => self.with("-")
    }
  }

  pub fn starts_with(&self, prefix: &QueryKey) -> bool {
    self.0.starts_with(&prefix.0)
  }
}

impl fmt::Display for QueryKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.join("/"))
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Retry {
  Never,
  Times(u32)
}

impl Retry {
  pub fn attempts(&self) -> u32 {
    match self {
      Retry::Never => 1,
      Retry::Times(n) => 1 + n
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryOptions {
  pub retry: Retry,
  // `None`: cached until invalidated
  pub stale_time: Option<Duration>,
  pub refetch_interval: Option<Duration>
}

impl Default for QueryOptions {
  fn default() -> Self {
    Self { retry: Retry::Times(1), stale_time: None, refetch_interval: None }
  }
}

impl QueryOptions {
  pub fn retry(mut self, retry: Retry) -> Self {
    self.retry = retry;
    self
  }

  pub fn stale_time(mut self, stale_time: Duration) -> Self {
    self.stale_time = Some(stale_time);
    self
  }

  pub fn refetch_interval(mut self, interval: Duration) -> Self {
    self.refetch_interval = Some(interval);
    self
  }
}

pub fn now_ms() -> i64 {
  chrono::Utc::now().timestamp_millis()
}

struct CacheEntry {
  value: Rc<dyn Any>,
  fetched_at_ms: i64,
  invalidated: bool
}

impl CacheEntry {
  fn is_fresh(&self, stale_time: Option<Duration>, now_ms: i64) -> bool {
    if self.invalidated {
      return false;
    }
    match stale_time {
      Some(stale_time) => now_ms - self.fetched_at_ms < stale_time.as_millis() as i64,
      None => true
    }
  }
}

type Shared = Result<Rc<dyn Any>, AppError>;
type Waiters = Rc<RefCell<HashMap<QueryKey, Vec<oneshot::Sender<Shared>>>>>;

/* Marks a key as being fetched. Dropping it without `finish` releases the waiters so one of them can take over. */
struct InFlight {
  waiters: Waiters,
  key: QueryKey
}

impl InFlight {
  fn finish(&self, outcome: Shared) {
    let waiting = self.waiters.borrow_mut().remove(&self.key).unwrap_or_default();
    for waiter in waiting {
      let _ = waiter.send(outcome.clone());
    }
  }
}

impl Drop for InFlight {
  fn drop(&mut self) {
    self.waiters.borrow_mut().remove(&self.key);
  }
}

/// Read-through cache shared by every query of the app.
#[derive(Clone, Default)]
pub struct QueryCache {
  entries: Rc<RefCell<HashMap<QueryKey, CacheEntry>>>,
  in_flight: Waiters
}

impl QueryCache {
  pub fn fresh<T: Clone + 'static>(&self, key: &QueryKey, options: &QueryOptions, now_ms: i64) -> Option<T> {
    let entries = self.entries.borrow();
    let entry = entries.get(key)?;
    if !entry.is_fresh(options.stale_time, now_ms) {
      return None;
    }
    entry.value.downcast_ref::<T>().cloned()
  }

  pub fn set<T: 'static>(&self, key: QueryKey, value: T, now_ms: i64) {
    self.entries.borrow_mut().insert(key, CacheEntry { value: Rc::new(value), fetched_at_ms: now_ms, invalidated: false });
  }

  /// Marks every entry under `prefix` for refetch. Returns how many matched.
  pub fn invalidate(&self, prefix: &QueryKey) -> usize {
    let mut matched = 0;
    for (key, entry) in self.entries.borrow_mut().iter_mut() {
      if key.starts_with(prefix) {
        entry.invalidated = true;
        matched += 1;
      }
    }
    info!("invalidated {} entries under {}", matched, prefix);
    matched
  }

  /// Marks one exact key for refetch, used by polling.
  pub fn expire(&self, key: &QueryKey) {
    if let Some(entry) = self.entries.borrow_mut().get_mut(key) {
      entry.invalidated = true;
    }
  }

  pub fn clear(&self) {
    self.entries.borrow_mut().clear();
  }

  pub fn len(&self) -> usize {
    self.entries.borrow().len()
  }

  /// Serves a fresh entry, joins a fetch already running for `key`, or runs `fetcher` up to `retry.attempts()` times.
  pub async fn fetch<T, F, Fut>(&self, key: &QueryKey, options: &QueryOptions, fetcher: F) -> Result<T, AppError>
  where
    T: Clone + 'static,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, AppError>>
  {
    loop {
      if let Some(cached) = self.fresh::<T>(key, options, now_ms()) {
        return Ok(cached);
      }

      let waiting = {
        let mut in_flight = self.in_flight.borrow_mut();
        match in_flight.get_mut(key) {
          Some(waiters) => {
            let (tx, rx) = oneshot::channel();
            waiters.push(tx);
            Some(rx)
          }
          None => {
            in_flight.insert(key.clone(), Vec::new());
            None
          }
        }
      };

      let Some(rx) = waiting else { break };
      debug!("query {} already in flight, waiting", key);
      match rx.await {
        Ok(Ok(shared)) => {
          if let Some(value) = shared.downcast_ref::<T>() {
            return Ok(value.clone());
          }
        }
        Ok(Err(e)) => return Err(e),
        // the running fetch was dropped
        Err(_) => {}
      }
    }

    let guard = InFlight { waiters: self.in_flight.clone(), key: key.clone() };
    let result = self.fetch_with_retry(key, options, fetcher).await;
    guard.finish(result.clone().map(|value| Rc::new(value) as Rc<dyn Any>));
    result
  }

  async fn fetch_with_retry<T, F, Fut>(&self, key: &QueryKey, options: &QueryOptions, fetcher: F) -> Result<T, AppError>
  where
    T: Clone + 'static,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, AppError>>
  {
    let attempts = options.retry.attempts();
    let mut attempt = 1;
    loop {
      match fetcher().await {
        Ok(value) => {
          self.set(key.clone(), value.clone(), now_ms());
          return Ok(value);
        }
        Err(e) if attempt < attempts => {
          warn!("query {} failed (attempt {}/{}): {}", key, attempt, attempts, e);
          attempt += 1;
        }
        Err(e) => return Err(e)
      }
    }
  }
}

/// Runs a write, then invalidates `invalidates` only when it succeeded.
pub async fn run_mutation<T, Fut>(cache: &QueryCache, invalidates: &[QueryKey], mutation: Fut) -> Result<T, AppError>
where
  Fut: Future<Output = Result<T, AppError>>
{
  let result = mutation.await;
  if result.is_ok() {
    for key in invalidates {
      cache.invalidate(key);
    }
  }
  result
}

#[cfg(test)]
mod tests {
  use super::*;
  use futures::{channel::oneshot, executor::block_on, future::join3};
  use std::cell::Cell;

  #[test]
  fn prefix_matching_is_segment_wise() {
    let balance_usdc = QueryKey::root("balance").with("USDC");
    assert!(balance_usdc.starts_with(&QueryKey::root("balance")));
    assert!(!balance_usdc.starts_with(&QueryKey::root("bal")));

    let book = QueryKey::root("orderBook").with("XYZ").with("buy").with(20);
    assert!(!book.starts_with(&QueryKey::root("orderBook").with("ABC")));
    assert!(book.starts_with(&QueryKey::root("orderBook").with("XYZ")));
  }

  #[test]
  fn optional_segments_keep_their_slot() {
    let none = QueryKey::root("priceHistory").with("a").with_opt(None::<u64>);
    let some = QueryKey::root("priceHistory").with("a").with_opt(Some(120));
    assert_ne!(none, some);
    assert_eq!(some.to_string(), "priceHistory/a/120");
  }

  #[test]
  fn retry_attempts() {
    assert_eq!(Retry::Never.attempts(), 1);
    assert_eq!(Retry::Times(1).attempts(), 2);
  }

  #[test]
  fn stale_time_expires_entries() {
    let cache = QueryCache::default();
    let key = QueryKey::root("leaderboard");
    let options = QueryOptions::default().stale_time(Duration::from_secs(30));
    cache.set(key.clone(), 5u64, 1_000);

    assert_eq!(cache.fresh::<u64>(&key, &options, 30_999), Some(5));
    assert_eq!(cache.fresh::<u64>(&key, &options, 31_000), None);
    assert_eq!(cache.fresh::<u64>(&key, &QueryOptions::default(), 10_000_000), Some(5));
  }

  #[test]
  fn wrong_type_is_a_miss() {
    let cache = QueryCache::default();
    let key = QueryKey::root("balance").with("USDC");
    cache.set(key.clone(), 5u64, 0);
    assert_eq!(cache.fresh::<String>(&key, &QueryOptions::default(), 0), None);
  }

  #[test]
  fn invalidation_only_touches_the_prefix() {
    let cache = QueryCache::default();
    let options = QueryOptions::default();
    let usdc = QueryKey::root("balance").with("USDC");
    let alice = QueryKey::root("balance").with("alice");
    let profile = QueryKey::root("currentUserProfile");
    for key in [&usdc, &alice, &profile] {
      cache.set(key.clone(), 1u64, 0);
    }

    assert_eq!(cache.invalidate(&QueryKey::root("balance")), 2);
    assert_eq!(cache.fresh::<u64>(&usdc, &options, 0), None);
    assert_eq!(cache.fresh::<u64>(&alice, &options, 0), None);
    assert_eq!(cache.fresh::<u64>(&profile, &options, 0), Some(1));
  }

  #[test]
  fn fresh_entries_skip_the_fetcher() {
    let cache = QueryCache::default();
    let key = QueryKey::root("callerRole");
    let calls = Cell::new(0);
    let fetcher = || {
      calls.set(calls.get() + 1);
      async { Ok::<_, AppError>(7u64) }
    };

    assert_eq!(block_on(cache.fetch(&key, &QueryOptions::default(), fetcher)), Ok(7));
    assert_eq!(block_on(cache.fetch(&key, &QueryOptions::default(), fetcher)), Ok(7));
    assert_eq!(calls.get(), 1);

    cache.invalidate(&key);
    assert_eq!(block_on(cache.fetch(&key, &QueryOptions::default(), fetcher)), Ok(7));
    assert_eq!(calls.get(), 2);
  }

  #[test]
  fn concurrent_fetches_of_one_key_share_a_call() {
    let cache = QueryCache::default();
    let calls = Cell::new(0);
    let (tx, rx) = oneshot::channel::<u64>();
    let pending = RefCell::new(Some(rx));
    let fetcher = || {
      calls.set(calls.get() + 1);
      let rx = pending.borrow_mut().take();
      async move {
        match rx {
          Some(rx) => rx.await.map_err(|_| AppError::TransportError("sender dropped".into())),
          None => Err(AppError::TransportError("fetched twice".into()))
        }
      }
    };

    let key = QueryKey::root("currentUserProfile");
    let options = QueryOptions::default().retry(Retry::Never);
    let release = async move {
      let _ = tx.send(7);
    };
    let (first, second, ()) = block_on(join3(cache.fetch(&key, &options, fetcher), cache.fetch(&key, &options, fetcher), release));

    assert_eq!(first, Ok(7));
    assert_eq!(second, Ok(7));
    assert_eq!(calls.get(), 1);
    assert!(cache.in_flight.borrow().is_empty());
  }

  #[test]
  fn failures_reach_every_waiter_and_free_the_key() {
    let cache = QueryCache::default();
    let calls = Cell::new(0);
    let failing = || {
      calls.set(calls.get() + 1);
      async { Err::<u64, _>(AppError::Rejected("nope".into())) }
    };
    let key = QueryKey::root("a");
    let never = QueryOptions::default().retry(Retry::Never);

    assert_eq!(block_on(cache.fetch(&key, &never, failing)), Err(AppError::Rejected("nope".into())));
    assert!(cache.in_flight.borrow().is_empty());
    assert_eq!(block_on(cache.fetch(&key, &never, failing)), Err(AppError::Rejected("nope".into())));
    assert_eq!(calls.get(), 2);
  }

  #[test]
  fn retries_at_most_once_more() {
    let cache = QueryCache::default();
    let calls = Cell::new(0);
    let failing = || {
      calls.set(calls.get() + 1);
      async { Err::<u64, _>(AppError::TransportError("down".into())) }
    };

    let once = QueryOptions::default();
    assert!(block_on(cache.fetch(&QueryKey::root("a"), &once, failing)).is_err());
    assert_eq!(calls.get(), 2);

    calls.set(0);
    let never = QueryOptions::default().retry(Retry::Never);
    assert!(block_on(cache.fetch(&QueryKey::root("b"), &never, failing)).is_err());
    assert_eq!(calls.get(), 1);
    assert_eq!(cache.len(), 0);
  }

  #[test]
  fn retry_recovers_from_one_failure() {
    let cache = QueryCache::default();
    let calls = Cell::new(0);
    let flaky = || {
      calls.set(calls.get() + 1);
      let attempt = calls.get();
      async move {
        if attempt == 1 { Err(AppError::TransportError("blip".into())) } else { Ok(3u64) }
      }
    };
    assert_eq!(block_on(cache.fetch(&QueryKey::root("c"), &QueryOptions::default(), flaky)), Ok(3));
  }

  #[test]
  fn failed_mutation_leaves_cache_alone() {
    let cache = QueryCache::default();
    let key = QueryKey::root("balance").with("USDC");
    cache.set(key.clone(), 100u64, 0);

    let failed = block_on(run_mutation(&cache, &[QueryKey::root("balance")], async {
      Err::<(), _>(AppError::Rejected("Insufficient balance".into()))
    }));
    assert_eq!(failed, Err(AppError::Rejected("Insufficient balance".into())));
    assert_eq!(cache.fresh::<u64>(&key, &QueryOptions::default(), 0), Some(100));

    block_on(run_mutation(&cache, &[QueryKey::root("balance")], async { Ok::<_, AppError>(()) })).unwrap();
    assert_eq!(cache.fresh::<u64>(&key, &QueryOptions::default(), 0), None);
  }

  #[test]
  fn expire_is_exact() {
    let cache = QueryCache::default();
    let options = QueryOptions::default();
    let book = QueryKey::root("orderBook").with("alice").with("buy");
    let deeper = book.clone().with(20);
    cache.set(book.clone(), 1u64, 0);
    cache.set(deeper.clone(), 2u64, 0);

    cache.expire(&book);
    assert_eq!(cache.fresh::<u64>(&book, &options, 0), None);
    assert_eq!(cache.fresh::<u64>(&deeper, &options, 0), Some(2));
  }

  #[test]
  fn clear_drops_everything() {
    let cache = QueryCache::default();
    cache.set(QueryKey::root("a"), 1u64, 0);
    cache.set(QueryKey::root("b"), 2u64, 0);
    cache.clear();
    assert_eq!(cache.len(), 0);
  }
}
