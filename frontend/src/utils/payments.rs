use std::future::Future;
use dioxus::{logger::tracing::info, prelude::*};
use serde::Deserialize;
use uuid::Uuid;

use super::actor::BackendActor;
use super::config::STRIPE_PUBLISHABLE_KEY;
use super::currency::{DepositQuote, WithdrawQuote};
use super::server::{AppError, StripeSessionStatus};

pub const CARD_ELEMENT_ID: &str = "stripe-card-element";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionKind {
  Deposit,
  Withdraw
}

pub fn session_id(kind: SessionKind) -> String {
  let prefix = match kind {
    SessionKind::Deposit => "deposit",
    SessionKind::Withdraw => "withdraw"
  };
  format!("{}_{}", prefix, Uuid::new_v4())
}

/* Card element events posted back from the provider script */
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CardEvent {
  Ready,
  Change { error: Option<String> },
  Failed { error: String }
}

/// Loads the provider script once, then mounts a card element into `#CARD_ELEMENT_ID`.
pub fn mount_card_script() -> String {
  format!(r##"
    try {{
      if (!window.Stripe) {{
        await new Promise((resolve, reject) => {{
          const script = document.createElement("script");
          script.src = "https://js.stripe.com/v3/";
          script.onload = resolve;
          script.onerror = () => reject("failed to load Stripe.js");
          document.head.appendChild(script);
        }});
      }}
      window.__squadStripe = window.__squadStripe || window.Stripe("{key}");
      if (window.__squadCard) {{ window.__squadCard.unmount(); }}
      const card = window.__squadStripe.elements().create("card", {{
        hidePostalCode: true,
        style: {{
          base: {{ fontSize: "16px", color: "#e6edf3", fontFamily: "monospace", "::placeholder": {{ color: "#7d8590" }} }},
          invalid: {{ color: "#f85149", iconColor: "#f85149" }}
        }}
      }});
      card.mount("#{id}");
      window.__squadCard = card;
      card.on("change", (event) => dioxus.send({{ kind: "change", error: event.error ? event.error.message : null }}));
      dioxus.send({{ kind: "ready" }});
    }} catch (err) {{
      dioxus.send({{ kind: "failed", error: String(err) }});
    }}
  "##, key = STRIPE_PUBLISHABLE_KEY, id = CARD_ELEMENT_ID)
}

pub const UNMOUNT_CARD_SCRIPT: &str = r#"
  if (window.__squadCard) { window.__squadCard.unmount(); window.__squadCard = null; }
"#;

#[derive(Debug, Deserialize)]
struct PaymentMethodOutcome {
  id: Option<String>,
  error: Option<String>
}

impl PaymentMethodOutcome {
  fn into_result(self) -> Result<String, AppError> {
    match (self.id, self.error) {
      (_, Some(error)) => Err(AppError::PaymentError(error)),
      (Some(id), None) => Ok(id),
      (None, None) => Err(AppError::PaymentError("Payment method creation failed".to_string()))
    }
  }
}

fn payment_method_script(cardholder_name: &str) -> Result<String, AppError> {
  let name = serde_json::to_string(cardholder_name).map_err(|e| AppError::SerializeError(e.to_string()))?;
  Ok(format!(r#"
    const stripe = window.__squadStripe;
    const card = window.__squadCard;
    if (!stripe || !card) {{ return {{ error: "Stripe not loaded" }}; }}
    const {{ error, paymentMethod }} = await stripe.createPaymentMethod({{
      type: "card", card, billing_details: {{ name: {name} }}
    }});
    if (error) {{ return {{ error: error.message || "Failed to create payment method" }}; }}
    return {{ id: paymentMethod ? paymentMethod.id : null, error: null }};
  "#))
}

/// Tokenises the mounted card through the provider's browser script.
pub async fn create_card_payment_method(cardholder_name: String) -> Result<String, AppError> {
  let script = payment_method_script(&cardholder_name)?;
  let outcome = document::eval(&script).join::<PaymentMethodOutcome>().await
    .map_err(|e| AppError::PaymentError(e.to_string()))?;
  outcome.into_result()
}

/// Session -> card payment method -> credit. Returns the session id.
pub async fn deposit_with<F, Fut>(actor: &BackendActor, quote: &DepositQuote, cardholder_name: &str, create_payment_method: F) -> Result<String, AppError>
where
  F: FnOnce(String) -> Fut,
  Fut: Future<Output = Result<String, AppError>>
{
  if !quote.is_valid() {
    return Err(AppError::InvalidInput("Minimum deposit is $1.00".to_string()));
  }
  let cardholder_name = cardholder_name.trim();
  if cardholder_name.is_empty() {
    return Err(AppError::InvalidInput("Cardholder name is required".to_string()));
  }

  let session = session_id(SessionKind::Deposit);
  actor.create_stripe_session(&session, quote.charge_cents()).await?;
  let payment_method = create_payment_method(cardholder_name.to_string()).await?;
  info!("payment method {} created for {}", payment_method, session);
  actor.finalize_deposit(&session).await?;
  Ok(session)
}

pub async fn deposit(actor: &BackendActor, quote: &DepositQuote, cardholder_name: &str) -> Result<String, AppError> {
  deposit_with(actor, quote, cardholder_name, create_card_payment_method).await
}

pub async fn withdraw(actor: &BackendActor, quote: &WithdrawQuote, balance_cents: u64) -> Result<String, AppError> {
  if !quote.is_valid(balance_cents) {
    return Err(AppError::InvalidInput("Withdrawal must be at least $10.00 and no more than your balance".to_string()));
  }
  let session = session_id(SessionKind::Withdraw);
  let amount_cents = quote.amount_cents();
  actor.create_stripe_session(&session, amount_cents).await?;
  actor.complete_withdrawal(&session, amount_cents).await?;
  Ok(session)
}

pub async fn session_status(actor: &BackendActor, session_id: &str) -> Result<StripeSessionStatus, AppError> {
  actor.get_stripe_session_status(session_id).await
}
