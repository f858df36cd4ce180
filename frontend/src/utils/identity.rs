use std::{cell::RefCell, rc::Rc};
use candid::Principal;
use dioxus::{logger::tracing::{info, warn}, prelude::*};
use serde::{Deserialize, Serialize};

use super::config::{IDENTITY_PROVIDER_URL, SESSION_STORAGE_KEY, SESSION_TTL};
use super::server::AppError;

/// Credential handed back by the identity provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
  pub principal: Principal,
  // serialized delegation chain, forwarded to the gateway as-is
  pub delegation: String,
  pub expires_at_ns: u64
}

impl Credential {
  pub fn is_expired(&self, now_ns: u64) -> bool {
    now_ns >= self.expires_at_ns
  }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderResponse {
  user_public_key: Vec<u8>,
  delegation: String,
  expiration: String
}

impl ProviderResponse {
  fn into_credential(self) -> Result<Credential, AppError> {
    if self.user_public_key.is_empty() {
      return Err(AppError::AuthorizationError("identity provider returned no public key".to_string()));
    }
    let expires_at_ns = self.expiration.parse::<u64>().map_err(|e| AppError::DeserializeError(e.to_string()))?;
    Ok(Credential {
      principal: Principal::self_authenticating(&self.user_public_key),
      delegation: self.delegation,
      expires_at_ns
    })
  }
}

pub fn now_ns() -> u64 {
  chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0).max(0) as u64
}

/// Current login, shared between the transport (for headers) and the UI.
#[derive(Clone, Default)]
pub struct IdentitySession {
  current: Rc<RefCell<Option<Credential>>>
}

impl IdentitySession {
  pub fn handle(&self) -> Rc<RefCell<Option<Credential>>> {
    self.current.clone()
  }

  pub fn principal(&self) -> Option<Principal> {
    self.current.borrow().as_ref().map(|c| c.principal)
  }

  pub fn set(&self, credential: Option<Credential>) {
    *self.current.borrow_mut() = credential;
  }

  /// Picks up a still-valid credential saved by an earlier login.
  pub fn restore(&self) {
    let Some(raw) = storage().and_then(|s| s.get_item(SESSION_STORAGE_KEY).ok().flatten()) else {
      return;
    };
    match serde_json::from_str::<Credential>(&raw) {
      Ok(credential) if !credential.is_expired(now_ns()) => {
        info!("restored identity for {}", credential.principal);
        self.set(Some(credential));
      }
      Ok(_) => {
        info!("stored identity expired");
        forget_stored();
      }
      Err(e) => {
        warn!("discarding unreadable stored identity: {}", e);
        forget_stored();
      }
    }
  }

  pub async fn login(&self) -> Result<Principal, AppError> {
    let script = login_script(IDENTITY_PROVIDER_URL, SESSION_TTL.as_nanos() as u64);
    let response = document::eval(&script).join::<ProviderResponse>().await
      .map_err(|e| AppError::AuthorizationError(e.to_string()))?;
    let credential = response.into_credential()?;
    let principal = credential.principal;

    if let Some(storage) = storage() {
      let raw = serde_json::to_string(&credential).map_err(|e| AppError::SerializeError(e.to_string()))?;
      storage.set_item(SESSION_STORAGE_KEY, &raw).map_err(|e| AppError::WasmError(format!("{:?}", e)))?;
    }
    self.set(Some(credential));
    info!("logged in as {}", principal);
    Ok(principal)
  }

  pub fn logout(&self) {
    self.set(None);
    forget_stored();
    info!("logged out");
  }
}

fn storage() -> Option<web_sys::Storage> {
  web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn forget_stored() {
  if let Some(storage) = storage() {
    storage_outcome("clear stored identity", storage.remove_item(SESSION_STORAGE_KEY));
  }
}

/// Logs a failed storage write; returns whether it went through.
fn storage_outcome<E: std::fmt::Debug>(action: &str, result: Result<(), E>) -> bool {
  match result {
    Ok(()) => true,
    Err(e) => {
      warn!("could not {}: {:?}", action, e);
      false
    }
  }
}

/* Internet Identity window protocol: authorize-ready -> authorize-client -> authorize-client-success */
fn login_script(provider_url: &str, ttl_ns: u64) -> String {
  format!(r##"
    const keyPair = await crypto.subtle.generateKey({{ name: "ECDSA", namedCurve: "P-256" }}, false, ["sign", "verify"]);
    const sessionPublicKey = new Uint8Array(await crypto.subtle.exportKey("spki", keyPair.publicKey));
    const providerUrl = new URL("{provider_url}");
    providerUrl.hash = "#authorize";
    const popup = window.open(providerUrl.toString(), "idpWindow", "width=500,height=600");
    if (!popup) {{ throw new Error("identity provider window was blocked"); }}

    return await new Promise((resolve, reject) => {{
      const closed = setInterval(() => {{
        if (popup.closed) {{ clearInterval(closed); window.removeEventListener("message", onMessage); reject("login window closed"); }}
      }}, 500);
      function onMessage(event) {{
        if (event.origin !== providerUrl.origin) return;
        const msg = event.data;
        if (msg.kind === "authorize-ready") {{
          popup.postMessage({{ kind: "authorize-client", sessionPublicKey, maxTimeToLive: BigInt("{ttl_ns}") }}, providerUrl.origin);
        }} else if (msg.kind === "authorize-client-success") {{
          clearInterval(closed);
          window.removeEventListener("message", onMessage);
          popup.close();
          const delegation = JSON.stringify(msg.delegations, (_, v) =>
            typeof v === "bigint" ? v.toString() : (v instanceof Uint8Array ? Array.from(v) : v));
          resolve({{
            userPublicKey: Array.from(msg.userPublicKey),
            delegation,
            expiration: msg.delegations[0].delegation.expiration.toString()
          }});
        }} else if (msg.kind === "authorize-client-failure") {{
          clearInterval(closed);
          window.removeEventListener("message", onMessage);
          popup.close();
          reject(msg.text);
        }}
      }}
      window.addEventListener("message", onMessage);
    }});
  "##)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn provider_response_derives_self_authenticating_principal() {
    let key = vec![48, 42, 48, 5, 6, 3, 43, 101, 112, 3, 33, 0, 7, 7, 7];
    let response = ProviderResponse { user_public_key: key.clone(), delegation: "[]".into(), expiration: "1700000000000000000".into() };
    let credential = response.into_credential().unwrap();
    assert_eq!(credential.principal, Principal::self_authenticating(&key));
    assert_eq!(credential.expires_at_ns, 1_700_000_000_000_000_000);
  }

  #[test]
  fn empty_key_is_rejected() {
    let response = ProviderResponse { user_public_key: vec![], delegation: "[]".into(), expiration: "1".into() };
    assert!(matches!(response.into_credential(), Err(AppError::AuthorizationError(_))));
  }

  #[test]
  fn expiry_is_inclusive() {
    let credential = Credential { principal: Principal::anonymous(), delegation: String::new(), expires_at_ns: 100 };
    assert!(!credential.is_expired(99));
    assert!(credential.is_expired(100));
  }

  #[test]
  fn session_shares_one_slot() {
    let session = IdentitySession::default();
    let handle = session.handle();
    assert!(session.principal().is_none());

    session.set(Some(Credential { principal: Principal::anonymous(), delegation: "d".into(), expires_at_ns: 1 }));
    assert_eq!(handle.borrow().as_ref().map(|c| c.delegation.clone()), Some("d".to_string()));
    assert_eq!(session.principal(), Some(Principal::anonymous()));
  }

  #[test]
  fn credential_survives_storage_format() {
    let credential = Credential { principal: Principal::management_canister(), delegation: "[1]".into(), expires_at_ns: 42 };
    let raw = serde_json::to_string(&credential).unwrap();
    assert_eq!(serde_json::from_str::<Credential>(&raw).unwrap(), credential);
  }

  #[test]
  fn failed_storage_writes_are_reported() {
    assert!(storage_outcome::<String>("clear stored identity", Ok(())));
    assert!(!storage_outcome("clear stored identity", Err("SecurityError: storage disabled")));
  }
}
