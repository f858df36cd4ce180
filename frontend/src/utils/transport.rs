use std::{cell::RefCell, rc::Rc};
use dioxus::logger::tracing::{debug, error};
use futures::future::{FutureExt, LocalBoxFuture};
use serde_json::Value;

use super::{auth::AuthSignature, identity::Credential, server::{AppError, RpcRequest, RpcResponse}};

/// Carries one canister method call and hands back its decoded `Ok` payload.
pub trait Transport {
  fn call<'a>(&'a self, method: &'a str, args: Vec<Value>) -> LocalBoxFuture<'a, Result<Value, AppError>>;

  /// Whether calls go out under a logged-in principal.
  fn has_identity(&self) -> bool;
}

pub fn unwrap_envelope(envelope: RpcResponse) -> Result<Value, AppError> {
  match envelope {
    RpcResponse::Ok(value) => Ok(value),
    RpcResponse::Err(msg) => Err(AppError::Rejected(msg))
  }
}

/// JSON envelope over the canister's HTTP gateway.
pub struct HttpTransport {
  client: reqwest::Client,
  endpoint: String,
  signer: RefCell<Option<Rc<AuthSignature>>>,
  credential: Rc<RefCell<Option<Credential>>>
}

impl HttpTransport {
  pub fn new(endpoint: &str, credential: Rc<RefCell<Option<Credential>>>) -> Self {
    Self {
      client: reqwest::Client::new(),
      endpoint: endpoint.to_string(),
      signer: RefCell::new(None),
      credential
    }
  }

  async fn signer(&self) -> Result<Rc<AuthSignature>, AppError> {
    let cached = self.signer.borrow().clone();
    if let Some(signer) = cached {
      return Ok(signer);
    }
    let signer = Rc::new(AuthSignature::new().await?);
    *self.signer.borrow_mut() = Some(signer.clone());
    Ok(signer)
  }

  async fn post(&self, method: &str, args: Vec<Value>) -> Result<Value, AppError> {
    let timestamp = (js_sys::Date::now() / 1000.0) as u64;
    let signature = self.signer().await?.sign_call(method, timestamp).await?;

    let mut req = self.client.post(&self.endpoint)
      .json(&RpcRequest { method, args })
      .header("x-timestamp", timestamp.to_string())
      .header("x-signature", signature);

    let credential = self.credential.borrow().clone();
    if let Some(credential) = credential {
      req = req.header("x-principal", credential.principal.to_text())
        .header("x-delegation", credential.delegation);
    }

    let resp = req.send().await.map_err(|e| AppError::TransportError(e.to_string()))?;
    if !resp.status().is_success() {
      return Err(AppError::TransportError(format!("gateway answered {} for {}", resp.status(), method)));
    }
    let envelope = resp.json::<RpcResponse>().await.map_err(|e| AppError::DeserializeError(e.to_string()))?;
    unwrap_envelope(envelope)
  }
}

impl Transport for HttpTransport {
  fn call<'a>(&'a self, method: &'a str, args: Vec<Value>) -> LocalBoxFuture<'a, Result<Value, AppError>> {
    async move {
      debug!("calling {}", method);
      let result = self.post(method, args).await;
      if let Err(e) = &result {
        error!("{} failed: {}", method, e);
      }
      result
    }.boxed_local()
  }

  fn has_identity(&self) -> bool {
    self.credential.borrow().is_some()
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn gateway_envelope_decodes() {
    let ok: RpcResponse = serde_json::from_str(r#"{"Ok":{"username":"alice"}}"#).unwrap();
    assert_eq!(unwrap_envelope(ok).unwrap()["username"], "alice");

    let err: RpcResponse = serde_json::from_str(r#"{"Err":"Unauthorized: Only users can place orders"}"#).unwrap();
    assert_eq!(unwrap_envelope(err), Err(AppError::Rejected("Unauthorized: Only users can place orders".into())));
  }

  #[test]
  fn request_envelope_shape() {
    let body = serde_json::to_value(RpcRequest { method: "getBalance", args: vec![Value::from("USDC")] }).unwrap();
    assert_eq!(body, serde_json::json!({ "method": "getBalance", "args": ["USDC"] }));
  }
}
