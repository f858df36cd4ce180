use std::collections::BTreeMap;
use candid::Principal;
use dioxus::prelude::*;

use crate::utils::{
  actor::BackendActor,
  config::{ORDER_BOOK_POLL, PRICE_HISTORY_POLL, RANKING_STALE_TIME, STABLECOIN_SYMBOL},
  query::{QueryKey, QueryOptions, Retry},
  server::{AppError, Coin, MarketCapTrendPoint, Order, OrderSide, PricePoint, UserProfile, UserRole}
};
use super::{use_auth, use_query, QueryState};

pub mod keys {
  use candid::Principal;
  use crate::utils::{config::STABLECOIN_SYMBOL, query::QueryKey, server::OrderSide};

  pub fn current_user_profile() -> QueryKey { QueryKey::root("currentUserProfile") }
  pub fn user_profile(user: &Principal) -> QueryKey { QueryKey::root("userProfile").with(user) }
  pub fn public_user_profile(user: &Principal) -> QueryKey { QueryKey::root("publicUserProfile").with(user) }
  pub fn caller_role() -> QueryKey { QueryKey::root("callerRole") }
  pub fn is_caller_admin() -> QueryKey { QueryKey::root("isCallerAdmin") }
  pub fn balances() -> QueryKey { QueryKey::root("balance") }
  pub fn balance(symbol: &str) -> QueryKey { balances().with(symbol) }
  pub fn stablecoin_balance() -> QueryKey { balance(STABLECOIN_SYMBOL) }
  pub fn order_books(symbol: &str) -> QueryKey { QueryKey::root("orderBook").with(symbol) }
  pub fn order_book(symbol: &str, side: OrderSide, depth: Option<u64>) -> QueryKey { order_books(symbol).with(side).with_opt(depth) }
  pub fn price_histories(symbol: &str) -> QueryKey { QueryKey::root("priceHistory").with(symbol) }
  pub fn price_history(symbol: &str, max_points: Option<u64>) -> QueryKey { price_histories(symbol).with_opt(max_points) }
  pub fn leaderboard() -> QueryKey { QueryKey::root("leaderboard") }
  pub fn creator_cap_ranking() -> QueryKey { QueryKey::root("creatorCapRanking") }
  pub fn caller_creator_cap() -> QueryKey { QueryKey::root("callerCreatorCap") }
  pub fn market_cap_trend(user: &Principal) -> QueryKey { QueryKey::root("marketCapTrend").with(user) }
  pub fn coins_directory() -> QueryKey { QueryKey::root("coinsDirectory") }
  pub fn stripe_configured() -> QueryKey { QueryKey::root("stripeConfigured") }
}

/* Per-hook fetch policies */
pub fn account_options() -> QueryOptions {
  QueryOptions::default().retry(Retry::Never)
}

pub fn order_book_options() -> QueryOptions {
  QueryOptions::default().retry(Retry::Times(1)).refetch_interval(ORDER_BOOK_POLL)
}

pub fn price_history_options() -> QueryOptions {
  QueryOptions::default().retry(Retry::Times(1)).refetch_interval(PRICE_HISTORY_POLL)
}

pub fn ranking_options() -> QueryOptions {
  QueryOptions::default().retry(Retry::Times(1)).stale_time(RANKING_STALE_TIME)
}

pub fn directory_options() -> QueryOptions {
  QueryOptions::default()
}

fn trimmed(symbol: &ReadOnlySignal<String>) -> Option<String> {
  let symbol = symbol.read().trim().to_string();
  if symbol.is_empty() { None } else { Some(symbol) }
}

/* Derived shapes */
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
  pub principal: Principal,
  pub creator_market_cap: u64,
  pub rank: usize
}

/// Numbers creators 1..n in backend order.
pub fn number_leaderboard(ranking: Vec<(Principal, u64)>) -> Vec<LeaderboardEntry> {
  ranking.into_iter().enumerate()
    .map(|(idx, (principal, creator_market_cap))| LeaderboardEntry { principal, creator_market_cap, rank: idx + 1 })
    .collect()
}

pub fn caller_creator_cap(ranking: &[(Principal, u64)], caller: &Principal) -> u64 {
  ranking.iter().find(|(principal, _)| principal == caller).map(|(_, cap)| *cap).unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoinEntry {
  pub coin: Coin,
  pub creator: Principal,
  pub creator_market_cap: u64
}

pub type CoinsDirectory = BTreeMap<String, CoinEntry>;

pub fn build_directory(creators: Vec<(Principal, Vec<Coin>, u64)>) -> CoinsDirectory {
  let mut directory = CoinsDirectory::new();
  for (creator, coins, creator_market_cap) in creators {
    for coin in coins {
      directory.insert(coin.symbol.clone(), CoinEntry { coin, creator, creator_market_cap });
    }
  }
  directory
}

pub fn coin_by_symbol(directory: &CoinsDirectory, symbol: &str) -> Option<CoinEntry> {
  directory.get(symbol.trim()).cloned()
}

/// Case-insensitive match on symbol or name; blank search keeps everything.
pub fn filter_directory(directory: &CoinsDirectory, search: &str) -> Vec<CoinEntry> {
  let needle = search.trim().to_lowercase();
  directory.values()
    .filter(|entry| needle.is_empty()
      || entry.coin.symbol.to_lowercase().contains(&needle)
      || entry.coin.name.to_lowercase().contains(&needle))
    .cloned()
    .collect()
}

/* Profiles & roles */
pub fn use_caller_profile() -> QueryState<Option<UserProfile>> {
  let auth = use_auth();
  use_query(
    move || auth.principal().map(|_| keys::current_user_profile()),
    account_options(),
    |actor: BackendActor| async move { actor.get_caller_user_profile().await }
  )
}

pub fn use_user_profile(user: ReadOnlySignal<Option<Principal>>) -> QueryState<Option<UserProfile>> {
  use_query(
    move || user().map(|p| keys::user_profile(&p)),
    account_options(),
    move |actor: BackendActor| async move {
      let user = user().ok_or_else(|| AppError::InvalidInput("principal is required".to_string()))?;
      actor.get_user_profile(user).await
    }
  )
}

/// Profile as any visitor sees it, used for coin creators.
pub fn use_public_profile(user: ReadOnlySignal<Option<Principal>>) -> QueryState<Option<UserProfile>> {
  use_query(
    move || user().map(|p| keys::public_user_profile(&p)),
    account_options(),
    move |actor: BackendActor| async move {
      let user = user().ok_or_else(|| AppError::InvalidInput("principal is required".to_string()))?;
      actor.get_public_user_profile(user).await
    }
  )
}

pub fn use_caller_role() -> QueryState<UserRole> {
  let auth = use_auth();
  use_query(
    move || auth.principal().map(|_| keys::caller_role()),
    account_options(),
    |actor: BackendActor| async move { actor.get_caller_user_role().await }
  )
}

pub fn use_is_caller_admin() -> QueryState<bool> {
  let auth = use_auth();
  use_query(
    move || auth.principal().map(|_| keys::is_caller_admin()),
    account_options(),
    |actor: BackendActor| async move { actor.is_caller_admin().await }
  )
}

/* Balances */
pub fn use_balance(symbol: ReadOnlySignal<String>) -> QueryState<u64> {
  let auth = use_auth();
  use_query(
    move || {
      auth.principal()?;
      trimmed(&symbol).map(|s| keys::balance(&s))
    },
    account_options(),
    move |actor: BackendActor| async move {
      let symbol = symbol.read().clone();
      actor.get_balance(&symbol).await
    }
  )
}

pub fn use_stablecoin_balance() -> QueryState<u64> {
  let auth = use_auth();
  use_query(
    move || auth.principal().map(|_| keys::stablecoin_balance()),
    account_options(),
    |actor: BackendActor| async move { actor.get_balance(STABLECOIN_SYMBOL).await }
  )
}

/* Market data */
pub fn use_order_book(symbol: ReadOnlySignal<String>, side: OrderSide, depth: Option<u64>) -> QueryState<Vec<Order>> {
  use_query(
    move || trimmed(&symbol).map(|s| keys::order_book(&s, side, depth)),
    order_book_options(),
    move |actor: BackendActor| async move {
      let symbol = symbol.read().clone();
      actor.get_order_book(&symbol, side, depth).await
    }
  )
}

pub fn use_price_history(symbol: ReadOnlySignal<String>, max_points: Option<u64>) -> QueryState<Vec<PricePoint>> {
  use_query(
    move || trimmed(&symbol).map(|s| keys::price_history(&s, max_points)),
    price_history_options(),
    move |actor: BackendActor| async move {
      let symbol = symbol.read().clone();
      actor.get_price_history(&symbol, max_points).await
    }
  )
}

pub fn use_leaderboard() -> QueryState<Vec<LeaderboardEntry>> {
  use_query(
    || Some(keys::leaderboard()),
    ranking_options(),
    |actor: BackendActor| async move { actor.get_creator_cap_ranking().await.map(number_leaderboard) }
  )
}

pub fn use_creator_cap_ranking() -> QueryState<Vec<(Principal, u64)>> {
  use_query(
    || Some(keys::creator_cap_ranking()),
    ranking_options(),
    |actor: BackendActor| async move { actor.get_creator_cap_ranking().await }
  )
}

pub fn use_caller_creator_cap() -> QueryState<u64> {
  let auth = use_auth();
  let caller = auth.clone();
  use_query(
    move || auth.principal().map(|_| keys::caller_creator_cap()),
    ranking_options(),
    move |actor: BackendActor| {
      let caller = caller.principal();
      async move {
        let caller = caller.ok_or_else(|| AppError::AuthorizationError("not logged in".to_string()))?;
        let ranking = actor.get_creator_cap_ranking().await?;
        Ok(caller_creator_cap(&ranking, &caller))
      }
    }
  )
}

pub fn use_market_cap_trend(user: ReadOnlySignal<Option<Principal>>) -> QueryState<Vec<MarketCapTrendPoint>> {
  use_query(
    move || user().map(|p| keys::market_cap_trend(&p)),
    ranking_options(),
    move |actor: BackendActor| async move {
      let user = user().ok_or_else(|| AppError::InvalidInput("principal is required".to_string()))?;
      actor.get_market_cap_trend(user).await
    }
  )
}

pub fn use_coins_directory() -> QueryState<CoinsDirectory> {
  use_query(
    || Some(keys::coins_directory()),
    directory_options(),
    |actor: BackendActor| async move { actor.get_creator_coins_with_market_caps().await.map(build_directory) }
  )
}

/// Directory entry for `symbol`; `None` while loading or when unknown.
pub fn use_coin_by_symbol(symbol: ReadOnlySignal<String>) -> (QueryState<CoinsDirectory>, Memo<Option<CoinEntry>>) {
  let directory = use_coins_directory();
  let lookup = directory.clone();
  let entry = use_memo(move || lookup.data().and_then(|dir| coin_by_symbol(&dir, &symbol.read())));
  (directory, entry)
}

pub fn use_stripe_configured() -> QueryState<bool> {
  use_query(
    || Some(keys::stripe_configured()),
    account_options(),
    |actor: BackendActor| async move { actor.is_stripe_configured().await }
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  fn coin(symbol: &str, name: &str) -> Coin {
    Coin {
      owner: Principal::anonymous(),
      symbol: symbol.into(),
      name: name.into(),
      description: String::new(),
      total_supply: 1_000,
      metadata: None
    }
  }

  #[test]
  fn leaderboard_is_numbered_in_backend_order() {
    let ranking = vec![(Principal::management_canister(), 10), (Principal::anonymous(), 900)];
    let board = number_leaderboard(ranking);
    assert_eq!(board.iter().map(|e| e.rank).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(board[1].creator_market_cap, 900);
  }

  #[test]
  fn caller_cap_defaults_to_zero() {
    let ranking = vec![(Principal::management_canister(), 10)];
    assert_eq!(caller_creator_cap(&ranking, &Principal::management_canister()), 10);
    assert_eq!(caller_creator_cap(&ranking, &Principal::anonymous()), 0);
  }

  #[test]
  fn directory_maps_every_symbol_to_its_creator() {
    let alice = Principal::management_canister();
    let directory = build_directory(vec![
      (alice, vec![coin("alice", "Alice Coin")], 5_000),
      (Principal::anonymous(), vec![coin("bob", "Bob Coin")], 20),
    ]);
    let entry = coin_by_symbol(&directory, " alice ").unwrap();
    assert_eq!(entry.creator, alice);
    assert_eq!(entry.creator_market_cap, 5_000);
    assert!(coin_by_symbol(&directory, "carol").is_none());
  }

  #[test]
  fn directory_search_is_case_insensitive() {
    let directory = build_directory(vec![
      (Principal::anonymous(), vec![coin("alice", "Alice Coin"), coin("bob", "Builder Bob")], 0),
    ]);
    assert_eq!(filter_directory(&directory, "ALI").len(), 1);
    assert_eq!(filter_directory(&directory, "builder")[0].coin.symbol, "bob");
    assert_eq!(filter_directory(&directory, "  ").len(), 2);
    assert!(filter_directory(&directory, "zed").is_empty());
  }

  #[test]
  fn fetch_policies_per_hook() {
    use std::time::Duration;

    let account = account_options();
    assert_eq!(account.retry, Retry::Never);
    assert_eq!(account.retry.attempts(), 1);
    assert_eq!(account.stale_time, None);
    assert_eq!(account.refetch_interval, None);

    let book = order_book_options();
    assert_eq!(book.retry, Retry::Times(1));
    assert_eq!(book.stale_time, None);
    assert_eq!(book.refetch_interval, Some(Duration::from_secs(5)));

    let history = price_history_options();
    assert_eq!(history.retry, Retry::Times(1));
    assert_eq!(history.stale_time, None);
    assert_eq!(history.refetch_interval, Some(Duration::from_secs(10)));

    let ranking = ranking_options();
    assert_eq!(ranking.retry, Retry::Times(1));
    assert_eq!(ranking.stale_time, Some(Duration::from_secs(30)));
    assert_eq!(ranking.refetch_interval, None);

    let directory = directory_options();
    assert_eq!(directory.retry.attempts(), 2);
    assert_eq!(directory.stale_time, None);
    assert_eq!(directory.refetch_interval, None);
  }

  #[test]
  fn keys_follow_the_documented_shapes() {
    assert_eq!(keys::stablecoin_balance(), QueryKey::root("balance").with("USDC"));
    assert_eq!(keys::order_book("abc", OrderSide::Sell, Some(20)).to_string(), "orderBook/abc/sell/20");
    assert!(keys::order_book("abc", OrderSide::Buy, None).starts_with(&keys::order_books("abc")));
    assert!(!keys::order_book("xyz", OrderSide::Buy, None).starts_with(&keys::order_books("abc")));
    assert_eq!(keys::market_cap_trend(&Principal::anonymous()).to_string(), "marketCapTrend/2vxsx-fae");
    assert_eq!(keys::public_user_profile(&Principal::anonymous()).to_string(), "publicUserProfile/2vxsx-fae");
  }
}
