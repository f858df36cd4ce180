use std::{cell::RefCell, future::Future, rc::Rc};
use candid::Principal;
use dioxus::{logger::tracing::info, prelude::*};

use crate::utils::{
  actor::BackendActor,
  identity::IdentitySession,
  query::{run_mutation, QueryCache, QueryKey, QueryOptions},
  server::AppError
};

pub mod mutations;
pub mod queries;

/* Cache handle shared through context. Bumping `epoch` makes every live query re-check the cache. */
#[derive(Clone)]
pub struct QueryClient {
  pub cache: QueryCache,
  epoch: Signal<u64>
}

impl QueryClient {
  pub fn new() -> Self {
    Self { cache: QueryCache::default(), epoch: Signal::new(0) }
  }

  fn subscribe(&self) -> u64 {
    (self.epoch)()
  }

  fn bump(&self) {
    let mut epoch = self.epoch;
    *epoch.write() += 1;
  }

  pub fn clear(&self) {
    self.cache.clear();
    self.bump();
  }
}

/* Login state: the opaque identity session plus a signal the UI can react to */
#[derive(Clone)]
pub struct Auth {
  session: IdentitySession,
  principal: Signal<Option<Principal>>,
  client: QueryClient
}

impl Auth {
  pub fn new(session: IdentitySession, client: QueryClient) -> Self {
    let principal = Signal::new(session.principal());
    Self { session, principal, client }
  }

  pub fn principal(&self) -> Option<Principal> {
    (self.principal)()
  }

  pub fn is_authenticated(&self) -> bool {
    self.principal.read().is_some()
  }

  pub async fn login(&self) -> Result<Principal, AppError> {
    let principal = self.session.login().await?;
    self.client.clear();
    let mut signal = self.principal;
    signal.set(Some(principal));
    Ok(principal)
  }

  pub fn logout(&self) {
    self.session.logout();
    self.client.clear();
    let mut signal = self.principal;
    signal.set(None);
  }
}

pub fn use_auth() -> Auth {
  use_context::<Auth>()
}

pub fn use_actor() -> BackendActor {
  use_context::<BackendActor>()
}

pub fn use_query_client() -> QueryClient {
  use_context::<QueryClient>()
}

/// Result of [`use_query`]; `data` keeps the previous value while a refetch runs.
pub struct QueryState<T: 'static> {
  resource: Resource<Option<Result<T, AppError>>>,
  client: QueryClient,
  last_key: Rc<RefCell<Option<QueryKey>>>
}

impl<T: 'static> Clone for QueryState<T> {
  fn clone(&self) -> Self {
    Self { resource: self.resource, client: self.client.clone(), last_key: self.last_key.clone() }
  }
}

impl<T: Clone + 'static> QueryState<T> {
  pub fn data(&self) -> Option<T> {
    match &*self.resource.read() {
      Some(Some(Ok(value))) => Some(value.clone()),
      _ => None
    }
  }

  pub fn error(&self) -> Option<AppError> {
    match &*self.resource.read() {
      Some(Some(Err(e))) => Some(e.clone()),
      _ => None
    }
  }

  pub fn is_loading(&self) -> bool {
    self.resource.read().is_none()
  }

  /// Drops this query's cache entry and runs it again.
  pub fn refetch(&self) {
    let key = self.last_key.borrow().clone();
    if let Some(key) = key {
      self.client.cache.invalidate(&key);
    }
    let mut resource = self.resource;
    resource.restart();
  }
}

/// Cached remote read. `key` returning `None` disables the query.
pub fn use_query<T, K, F, Fut>(key: K, options: QueryOptions, fetch: F) -> QueryState<T>
where
  T: Clone + 'static,
  K: Fn() -> Option<QueryKey> + 'static,
  F: Fn(BackendActor) -> Fut + 'static,
  Fut: Future<Output = Result<T, AppError>> + 'static
{
  let client = use_query_client();
  let actor = use_actor();
  let last_key = use_hook(|| Rc::new(RefCell::new(None::<QueryKey>)));
  let fetch = use_hook(|| Rc::new(fetch));

  let resource = {
    let client = client.clone();
    let last_key = last_key.clone();
    use_resource(move || {
      let client = client.clone();
      let actor = actor.clone();
      let fetch = fetch.clone();
      let _epoch = client.subscribe();
      let key = key();
      *last_key.borrow_mut() = key.clone();

      async move {
        let key = key?;
        Some(client.cache.fetch(&key, &options, || fetch(actor.clone())).await)
      }
    })
  };

  {
    let client = client.clone();
    let last_key = last_key.clone();
    use_future(move || {
      let client = client.clone();
      let last_key = last_key.clone();
      let mut resource = resource;
      async move {
        let Some(interval) = options.refetch_interval else { return };
        loop {
          async_std::task::sleep(interval).await;
          let key = last_key.borrow().clone();
          if let Some(key) = key {
            client.cache.expire(&key);
            resource.restart();
          }
        }
      }
    });
  }

  QueryState { resource, client, last_key }
}

/// Write state for one kind of mutation.
pub struct UseMutation<T: 'static> {
  pending: Signal<bool>,
  outcome: Signal<Option<Result<T, AppError>>>,
  client: QueryClient
}

impl<T: 'static> Clone for UseMutation<T> {
  fn clone(&self) -> Self {
    Self { pending: self.pending, outcome: self.outcome, client: self.client.clone() }
  }
}

impl<T: Clone + 'static> UseMutation<T> {
  pub fn is_pending(&self) -> bool {
    (self.pending)()
  }

  pub fn error(&self) -> Option<AppError> {
    match &*self.outcome.read() {
      Some(Err(e)) => Some(e.clone()),
      _ => None
    }
  }

  pub fn data(&self) -> Option<T> {
    match &*self.outcome.read() {
      Some(Ok(value)) => Some(value.clone()),
      _ => None
    }
  }

  pub fn reset(&self) {
    let mut outcome = self.outcome;
    outcome.set(None);
  }

  pub async fn run<Fut>(&self, invalidates: Vec<QueryKey>, mutation: Fut) -> Result<T, AppError>
  where
    Fut: Future<Output = Result<T, AppError>>
  {
    let (mut pending, mut outcome) = (self.pending, self.outcome);
    pending.set(true);
    outcome.set(None);

    let result = run_mutation(&self.client.cache, &invalidates, mutation).await;
    if result.is_ok() && !invalidates.is_empty() {
      info!("mutation succeeded, refreshing {} key(s)", invalidates.len());
      self.client.bump();
    }

    pending.set(false);
    outcome.set(Some(result.clone()));
    result
  }
}

pub fn use_mutation<T: Clone + 'static>() -> UseMutation<T> {
  let client = use_query_client();
  let pending = use_signal(|| false);
  let outcome = use_signal(|| None);
  UseMutation { pending, outcome, client }
}
