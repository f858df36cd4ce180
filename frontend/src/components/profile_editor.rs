#![allow(non_snake_case)]

use dioxus::{logger::tracing::{error, info}, prelude::*};
use crate::{
  components::skeleton::Skeleton,
  hooks::{mutations::use_profile_write, queries::{use_caller_profile, use_caller_role}},
  utils::{server::UserRole, validation::ProfileForm}
};

/// Caller's profile card; display name and bio can be edited, the username cannot.
#[component]
pub fn ProfileEditor() -> Element {
  let profile = use_caller_profile();
  let role = use_caller_role();
  let profile_write = use_profile_write();
  let mut draft: Signal<Option<ProfileForm>> = use_signal(|| None);
  let mut error_message: Signal<Option<String>> = use_signal(|| None);
  let pending = profile_write.state.is_pending();

  let Some(current) = profile.data().flatten() else {
    return rsx! { Skeleton { height: "6em" } };
  };
  let role_label = match role.data() {
    Some(UserRole::Admin) => "ADMIN",
    Some(UserRole::User) => "MEMBER",
    Some(UserRole::Guest) => "GUEST",
    None => ""
  };
  let editing = draft.read().is_some();
  let editable = ProfileForm::from_profile(&current);

  rsx! {
    div {
      class: "card profile-card",
      div {
        class: "card-header",
        h3 { class: "card-title", "PROFILE" }
        if !role_label.is_empty() {
          span { class: "role-badge", "{role_label}" }
        }
      }
      if editing {
        form {
          onsubmit: move |evt| {
            evt.prevent_default();
            let Some(form) = draft() else { return };
            let updated = match form.validate() {
              Ok(updated) => updated,
              Err(e) => {
                error_message.set(Some(e.message()));
                return;
              }
            };
            error_message.set(None);
            let profile_write = profile_write.clone();
            spawn(async move {
              match profile_write.save(updated).await {
                Ok(()) => {
                  info!("profile saved");
                  draft.set(None);
                }
                Err(e) => {
                  error!("failed to save profile: {}", e);
                  error_message.set(Some(e.message()));
                }
              }
            });
          },
          p { class: "form-hint", "Username: " code { "{current.username}" } }
          div {
            class: "form-group",
            label { class: "form-label", r#for: "edit-display-name", "Display Name" },
            input {
              class: "form-input",
              id: "edit-display-name",
              value: draft.read().as_ref().map(|f| f.display_name.clone()).unwrap_or_default(),
              oninput: move |evt| if let Some(form) = draft.write().as_mut() { form.display_name = evt.value() }
            }
          }
          div {
            class: "form-group",
            label { class: "form-label", r#for: "edit-bio", "Bio" },
            textarea {
              class: "form-input",
              id: "edit-bio",
              rows: "3",
              value: draft.read().as_ref().map(|f| f.bio.clone()).unwrap_or_default(),
              oninput: move |evt| if let Some(form) = draft.write().as_mut() { form.bio = evt.value() }
            }
          }
          if let Some(message) = error_message() {
            div { class: "alert alert-error", "{message}" }
          }
          div {
            class: "form-actions",
            button {
              r#type: "button",
              class: "button button-ghost",
              onclick: move |_| {
                error_message.set(None);
                draft.set(None);
              },
              "Cancel"
            }
            button {
              r#type: "submit",
              class: "button button-primary",
              disabled: pending,
              if pending { "Saving..." } else { "Save" }
            }
          }
        }
      } else {
        div { class: "creator-name", "{current.display_name}" }
        p { class: "mono form-hint", "@{current.username}" }
        if !current.bio.is_empty() {
          p { class: "muted", "{current.bio}" }
        }
        button {
          class: "button button-ghost",
          onclick: move |_| draft.set(Some(editable.clone())),
          "Edit Profile"
        }
      }
    }
  }
}
