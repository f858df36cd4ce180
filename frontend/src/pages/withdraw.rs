use dioxus::{logger::tracing::{error, info}, prelude::*};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use crate::{
  components::{
    accordion::{ComplianceAccordion, NoticeKind},
    skeleton::Skeleton
  },
  hooks::{mutations::use_fiat_ramp, queries::use_stablecoin_balance},
  pages::deposit::FeeLine,
  utils::currency::{format_stablecoin_with_unit, format_usd, parse_amount, quick_amount, WithdrawQuote}
};

const QUICK_FRACTIONS: [(&str, Decimal); 4] = [("25%", dec!(0.25)), ("50%", dec!(0.5)), ("75%", dec!(0.75)), ("MAX", dec!(1))];

#[derive(Debug, Clone, Default, PartialEq)]
struct BankDetails {
  account_holder: String,
  account_number: String,
  routing_number: String
}

impl BankDetails {
  fn is_complete(&self) -> bool {
    [&self.account_holder, &self.account_number, &self.routing_number]
      .iter()
      .all(|field| !field.trim().is_empty())
  }
}

#[component]
pub fn Withdraw() -> Element {
  let balance = use_stablecoin_balance();
  let ramp = use_fiat_ramp();
  let mut amount = use_signal(String::new);
  let mut bank = use_signal(BankDetails::default);

  let balance_cents = balance.data().unwrap_or(0);
  let quote = WithdrawQuote::new(parse_amount(&amount.read()));
  let pending = ramp.state.is_pending();
  let withdraw_error = ramp.state.error();
  let succeeded = ramp.state.data().is_some();
  let outcome = ramp.state.clone();
  let can_submit = quote.is_valid(balance_cents) && bank.read().is_complete() && !pending;
  let over_balance = quote.amount_cents() > balance_cents;
  let net_label = format_usd(quote.net);

  rsx! {
    div {
      class: "fiat-page",
      div {
        class: "page-header",
        h1 { "WITHDRAW FUNDS" }
        p { class: "muted mono", "Convert stablecoin balance to USD" }
      }
      div {
        class: "card balance-card",
        h3 { class: "card-title", "AVAILABLE BALANCE" }
        if balance.is_loading() {
          Skeleton { width: "12em", height: "3em" }
        } else {
          div { class: "stat-value large", {format_stablecoin_with_unit(balance_cents)} }
        }
        p { class: "form-hint", "Available for withdrawal" }
      }
      if succeeded {
        div {
          class: "alert alert-success",
          strong { "WITHDRAWAL INITIATED" }
          p { "Your withdrawal is being processed. Funds typically arrive within 3-5 business days." }
        }
      }
      div {
        class: "card",
        h3 { class: "card-title", "WITHDRAW TO BANK" }
        form {
          onsubmit: move |evt| {
            evt.prevent_default();
            let quote = WithdrawQuote::new(parse_amount(&amount.read()));
            let ramp = ramp.clone();
            spawn(async move {
              match ramp.withdraw(quote, balance_cents).await {
                Ok(session) => {
                  info!("withdrawal {} completed", session);
                  amount.set(String::new());
                  bank.set(BankDetails::default());
                }
                Err(e) => error!("withdrawal failed: {}", e)
              }
            });
          },
          div {
            class: "form-group",
            label { class: "form-label", r#for: "withdraw-amount", "WITHDRAWAL AMOUNT (USD)" },
            input {
              class: "form-input large",
              id: "withdraw-amount",
              r#type: "number",
              min: "10",
              step: "0.01",
              placeholder: "0.00",
              value: "{amount}",
              oninput: move |evt| {
                outcome.reset();
                amount.set(evt.value());
              }
            }
            div {
              class: "quick-amounts",
              for (label, fraction) in QUICK_FRACTIONS {
                button {
                  key: "{label}",
                  r#type: "button",
                  class: "button button-ghost",
                  disabled: balance_cents == 0,
                  onclick: move |_| amount.set(quick_amount(balance_cents, fraction).to_string()),
                  "{label}"
                }
              }
            }
            p { class: "form-hint", "Minimum: $10.00" }
            if over_balance {
              p { class: "form-error", "Amount exceeds your available balance" }
            }
          }
          div {
            class: "form-group",
            label { class: "form-label", r#for: "account-holder", "ACCOUNT HOLDER NAME" },
            input {
              class: "form-input",
              id: "account-holder",
              placeholder: "John Doe",
              value: "{bank.read().account_holder}",
              oninput: move |evt| bank.write().account_holder = evt.value()
            }
          }
          div {
            class: "form-group",
            label { class: "form-label", r#for: "account-number", "BANK ACCOUNT NUMBER" },
            input {
              class: "form-input",
              id: "account-number",
              placeholder: "000123456789",
              value: "{bank.read().account_number}",
              oninput: move |evt| bank.write().account_number = evt.value()
            }
          }
          div {
            class: "form-group",
            label { class: "form-label", r#for: "routing-number", "ROUTING NUMBER" },
            input {
              class: "form-input",
              id: "routing-number",
              placeholder: "110000000",
              value: "{bank.read().routing_number}",
              oninput: move |evt| bank.write().routing_number = evt.value()
            }
          }
          if quote.amount > Decimal::ZERO {
            div {
              class: "fee-breakdown",
              FeeLine { label: "Withdrawal Amount:", value: format_usd(quote.amount) }
              FeeLine { label: "Processing Fee (est.):", value: format_usd(quote.fee) }
              FeeLine { label: "You Receive:", value: net_label.clone(), emphasis: true }
            }
          }
          button {
            r#type: "submit",
            class: "button button-primary button-wide",
            disabled: !can_submit,
            if pending { "PROCESSING..." } else { "WITHDRAW {net_label}" }
          }
          if let Some(err) = withdraw_error {
            div {
              class: "alert alert-error",
              strong { "Withdrawal Failed" }
              p { {err.message()} }
            }
          }
        }
      }
      ComplianceAccordion { kind: NoticeKind::Withdraw }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bank_details_need_every_field() {
    let mut details = BankDetails {
      account_holder: "Jane Doe".to_string(),
      account_number: "000123456789".to_string(),
      routing_number: "  ".to_string()
    };
    assert!(!details.is_complete());
    details.routing_number = "110000000".to_string();
    assert!(details.is_complete());
  }
}
