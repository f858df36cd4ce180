#![allow(non_snake_case)]

use dioxus::{logger::tracing::{info, warn}, prelude::*};
use crate::utils::payments::{mount_card_script, CardEvent, CARD_ELEMENT_ID, UNMOUNT_CARD_SCRIPT};

/// Cardholder name plus the provider-hosted card element. `card_ready` flips once the element mounted.
#[component]
pub fn CardFields(mut cardholder_name: Signal<String>, mut card_ready: Signal<bool>) -> Element {
  let mut card_error: Signal<Option<String>> = use_signal(|| None);

  use_future(move || async move {
    let mut eval = document::eval(&mount_card_script());
    loop {
      match eval.recv::<CardEvent>().await {
        Ok(CardEvent::Ready) => {
          info!("card element mounted");
          card_ready.set(true);
        }
        Ok(CardEvent::Change { error }) => card_error.set(error),
        Ok(CardEvent::Failed { error }) => {
          warn!("card element failed: {}", error);
          card_ready.set(false);
          card_error.set(Some(error));
        }
        Err(e) => {
          warn!("card element channel closed: {:?}", e);
          break;
        }
      }
    }
  });

  use_drop(move || {
    document::eval(UNMOUNT_CARD_SCRIPT);
  });

  rsx! {
    div {
      class: "form-group",
      label { class: "form-label", r#for: "cardholder-name", "CARDHOLDER NAME" },
      input {
        class: "form-input",
        id: "cardholder-name",
        placeholder: "John Doe",
        value: "{cardholder_name}",
        oninput: move |evt| cardholder_name.set(evt.value())
      }
    }
    div {
      class: "form-group",
      label { class: "form-label", "CARD DETAILS" },
      div { id: CARD_ELEMENT_ID, class: "card-element" }
      if let Some(message) = card_error() {
        p { class: "form-error", "{message}" }
      }
      p { class: "form-hint", "Secured by Stripe. Card details never touch our servers." }
    }
  }
}
