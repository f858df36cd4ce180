use dioxus::{logger::tracing::{error, info, warn}, prelude::*};
use rust_decimal::Decimal;
use crate::{
  components::{
    accordion::{ComplianceAccordion, NoticeKind},
    card_fields::CardFields,
    payment_setup::PaymentSetupPanel,
    skeleton::Skeleton
  },
  hooks::{
    mutations::use_fiat_ramp,
    queries::{use_stablecoin_balance, use_stripe_configured},
    use_actor
  },
  utils::{
    currency::{format_stablecoin_with_unit, format_usd, parse_amount, DepositQuote},
    payments::session_status,
    server::StripeSessionStatus
  }
};

#[component]
pub fn Deposit() -> Element {
  let balance = use_stablecoin_balance();
  let configured = use_stripe_configured();
  let ramp = use_fiat_ramp();
  let actor = use_actor();
  let mut amount = use_signal(String::new);
  let cardholder_name = use_signal(String::new);
  let card_ready = use_signal(|| false);
  let mut receipt: Signal<Option<StripeSessionStatus>> = use_signal(|| None);

  let quote = DepositQuote::new(parse_amount(&amount.read()));
  let pending = ramp.state.is_pending();
  let deposit_error = ramp.state.error();
  let can_submit = quote.is_valid() && !cardholder_name.read().trim().is_empty() && card_ready() && !pending;
  let total_label = format_usd(quote.total);
  let provider_missing = configured.data() == Some(false);

  rsx! {
    div {
      class: "fiat-page",
      div {
        class: "page-header",
        h1 { "FUND ACCOUNT" }
        p { class: "muted mono", "Deposit USD to receive stablecoin balance" }
      }
      div {
        class: "card balance-card",
        h3 { class: "card-title", "CURRENT BALANCE" }
        if balance.is_loading() {
          Skeleton { width: "12em", height: "3em" }
        } else {
          div { class: "stat-value large", {format_stablecoin_with_unit(balance.data().unwrap_or(0))} }
        }
        p { class: "form-hint", "Available for trading" }
      }
      if provider_missing {
        div { class: "alert alert-error", "Card payments are not configured yet. Please try again later." }
        PaymentSetupPanel { }
      }
      if let Some(status) = receipt() {
        div {
          class: "alert alert-success",
          strong { "DEPOSIT SUCCESSFUL" }
          p { "Your USDC balance has been updated. You can now trade on the platform." }
          {match status {
            StripeSessionStatus::Completed { response, .. } => rsx! { p { class: "form-hint", "{response}" } },
            StripeSessionStatus::Failed { error } => rsx! { p { class: "form-hint", "Provider reported: {error}" } }
          }}
        }
      }
      div {
        class: "card",
        h3 { class: "card-title", "DEPOSIT FUNDS" }
        p { class: "muted", "Add USD to your account via secure card payment" }
        form {
          onsubmit: move |evt| {
            evt.prevent_default();
            let quote = DepositQuote::new(parse_amount(&amount.read()));
            let name = cardholder_name.read().clone();
            let (ramp, actor) = (ramp.clone(), actor.clone());
            let mut cardholder_name = cardholder_name;
            spawn(async move {
              match ramp.deposit(quote, name).await {
                Ok(session) => {
                  info!("deposit {} finalized", session);
                  amount.set(String::new());
                  cardholder_name.set(String::new());
                  match session_status(&actor, &session).await {
                    Ok(status) => receipt.set(Some(status)),
                    Err(e) => {
                      warn!("could not read status of {}: {}", session, e);
                      receipt.set(Some(StripeSessionStatus::Completed { user_principal: None, response: session }));
                    }
                  }
                }
                Err(e) => error!("deposit failed: {}", e)
              }
            });
          },
          div {
            class: "form-group",
            label { class: "form-label", r#for: "amount", "DEPOSIT AMOUNT (USD)" },
            input {
              class: "form-input large",
              id: "amount",
              r#type: "number",
              min: "1",
              step: "0.01",
              placeholder: "0.00",
              value: "{amount}",
              oninput: move |evt| {
                receipt.set(None);
                amount.set(evt.value());
              }
            }
            p { class: "form-hint", "Minimum: $1.00" }
          }
          CardFields { cardholder_name, card_ready }
          if quote.amount > Decimal::ZERO {
            div {
              class: "fee-breakdown",
              FeeLine { label: "Deposit Amount:", value: format_usd(quote.amount) }
              FeeLine { label: "Processing Fee (est.):", value: format_usd(quote.fee) }
              FeeLine { label: "Total Charge:", value: total_label.clone(), emphasis: true }
              FeeLine { label: "You Receive:", value: format!("{:.2} USDC", quote.receive) }
            }
          }
          button {
            r#type: "submit",
            class: "button button-primary button-wide",
            disabled: !can_submit || provider_missing,
            if pending { "PROCESSING PAYMENT..." } else { "DEPOSIT {total_label}" }
          }
          if let Some(err) = deposit_error {
            div {
              class: "alert alert-error",
              strong { "Deposit Failed" }
              p { {err.message()} }
            }
          }
        }
      }
      ComplianceAccordion { kind: NoticeKind::Deposit }
    }
  }
}

#[component]
pub fn FeeLine(label: &'static str, value: String, #[props(default = false)] emphasis: bool) -> Element {
  rsx! {
    div {
      class: if emphasis { "fee-line total" } else { "fee-line" },
      span { "{label}" }
      span { class: "mono", "{value}" }
    }
  }
}
