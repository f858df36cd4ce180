#![allow(non_snake_case)]

use dioxus::{logger::tracing::{error, info}, prelude::*};
use crate::{
  hooks::mutations::use_profile_write,
  utils::validation::{friendly_profile_error, ProfileForm, MAX_USERNAME_LEN}
};

/// Blocking first-run dialog: a logged-in caller without a profile must create one.
#[component]
pub fn ProfileSetupDialog() -> Element {
  let mut form = use_signal(ProfileForm::default);
  let mut error_message: Signal<Option<String>> = use_signal(|| None);
  let profile_write = use_profile_write();
  let pending = profile_write.state.is_pending();
  let can_submit = form.read().is_submittable() && !pending;
  let preview = match form.read().username.trim() {
    "" => "...".to_string(),
    name => name.to_string()
  };

  rsx! {
    div {
      class: "dialog-backdrop",
      div {
        class: "dialog",
        div {
          class: "dialog-header",
          h2 { "Welcome to the Squad!" }
          p { class: "muted", "Create your profile to get started. Your username will be your unique identifier on the platform." }
        }
        form {
          id: "profile-setup",
          onsubmit: move |evt| {
            evt.prevent_default();
            let profile = match form.read().validate() {
              Ok(profile) => profile,
              Err(e) => {
                error_message.set(Some(e.message()));
                return;
              }
            };
            error_message.set(None);
            let profile_write = profile_write.clone();
            spawn(async move {
              match profile_write.create(profile).await {
                Ok(()) => info!("profile created"),
                Err(e) => {
                  error!("failed to create profile: {}", e);
                  error_message.set(Some(friendly_profile_error(&e).to_string()));
                }
              }
            });
          },
          if let Some(message) = error_message() {
            div { class: "alert alert-error", "{message}" }
          }
          div {
            class: "form-group",
            label { class: "form-label", r#for: "username", "Username *" },
            input {
              class: "form-input",
              id: "username",
              placeholder: "cooltrader",
              maxlength: "{MAX_USERNAME_LEN}",
              value: "{form.read().username}",
              oninput: move |evt| form.write().username = evt.value()
            }
            p { class: "form-hint", "Your unique identifier: " code { "{preview}" } }
          },
          div {
            class: "form-group",
            label { class: "form-label", r#for: "display-name", "Display Name *" },
            input {
              class: "form-input",
              id: "display-name",
              placeholder: "Cool Trader",
              value: "{form.read().display_name}",
              oninput: move |evt| form.write().display_name = evt.value()
            }
            p { class: "form-hint", "This is how others will see your name" }
          },
          div {
            class: "form-group",
            label { class: "form-label", r#for: "bio", "Bio" },
            textarea {
              class: "form-input",
              id: "bio",
              rows: "3",
              placeholder: "Tell us about yourself...",
              value: "{form.read().bio}",
              oninput: move |evt| form.write().bio = evt.value()
            }
          },
          div {
            class: "form-group confirm-box",
            input {
              id: "name-confirmation",
              r#type: "checkbox",
              checked: form.read().name_confirmed,
              onchange: move |evt| form.write().name_confirmed = evt.checked()
            }
            div {
              label { r#for: "name-confirmation", "I confirm this is my real name and I'm not impersonating anyone else" }
              p { class: "form-hint", "Usernames are unique and cannot be changed after creation" }
            }
          },
          div {
            class: "form-actions",
            button {
              r#type: "submit",
              class: "button button-primary",
              disabled: !can_submit,
              if pending { "Creating Profile..." } else { "Create Profile" }
            }
          }
        }
      }
    }
  }
}
