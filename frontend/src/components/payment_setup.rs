#![allow(non_snake_case)]

use dioxus::{logger::tracing::{error, info}, prelude::*};
use crate::{
  hooks::{mutations::use_payment_setup, queries::use_is_caller_admin},
  utils::server::StripeConfiguration
};

/// Upper-cased two-letter country codes from a comma or space separated list.
pub fn parse_countries(input: &str) -> Vec<String> {
  let mut countries: Vec<String> = input
    .split(|c: char| c == ',' || c.is_whitespace())
    .map(|code| code.trim().to_uppercase())
    .filter(|code| code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()))
    .collect();
  countries.dedup();
  countries
}

/// Card provider setup, only rendered for admins.
#[component]
pub fn PaymentSetupPanel() -> Element {
  let is_admin = use_is_caller_admin();
  let setup = use_payment_setup();
  let mut secret_key = use_signal(String::new);
  let mut countries = use_signal(|| "US, CA, GB".to_string());
  let pending = setup.state.is_pending();
  let setup_error = setup.state.error();

  if is_admin.data() != Some(true) {
    return rsx! {};
  }

  rsx! {
    div {
      class: "card admin-card",
      h3 { class: "card-title", "PAYMENT PROVIDER SETUP" }
      p { class: "muted", "Card payments are disabled until a provider secret key is stored." }
      form {
        onsubmit: move |evt| {
          evt.prevent_default();
          let config = StripeConfiguration {
            secret_key: secret_key.read().trim().to_string(),
            allowed_countries: parse_countries(&countries.read())
          };
          let setup = setup.clone();
          spawn(async move {
            match setup.configure(config).await {
              Ok(()) => {
                info!("payment provider configured");
                secret_key.set(String::new());
              }
              Err(e) => error!("payment provider setup failed: {}", e)
            }
          });
        },
        div {
          class: "form-group",
          label { class: "form-label", r#for: "stripe-secret", "SECRET KEY" },
          input {
            class: "form-input",
            id: "stripe-secret",
            r#type: "password",
            placeholder: "sk_live_...",
            value: "{secret_key}",
            oninput: move |evt| secret_key.set(evt.value())
          }
        }
        div {
          class: "form-group",
          label { class: "form-label", r#for: "stripe-countries", "ALLOWED COUNTRIES" },
          input {
            class: "form-input",
            id: "stripe-countries",
            value: "{countries}",
            oninput: move |evt| countries.set(evt.value())
          }
        }
        if let Some(err) = setup_error {
          div { class: "alert alert-error", {err.message()} }
        }
        button {
          r#type: "submit",
          class: "button button-primary",
          disabled: pending || secret_key.read().trim().is_empty(),
          if pending { "Saving..." } else { "Save Configuration" }
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn country_list_is_normalized() {
    assert_eq!(parse_countries("us, ca  gb"), vec!["US", "CA", "GB"]);
    assert_eq!(parse_countries("US,US,usa,,1x"), vec!["US"]);
    assert!(parse_countries("   ").is_empty());
  }
}
