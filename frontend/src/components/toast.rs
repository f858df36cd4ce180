#![allow(non_snake_case)]

use dioxus::prelude::*;

/// Flashes the toast with `id` for a few seconds.
pub fn show_toast(id: &str) {
  document::eval(&format!(r#"
    var x = document.getElementById("{id}");
    if (x) {{
      x.classList.add("show");
      setTimeout(function(){{ x.classList.remove("show"); }}, 4000);
    }}
  "#));
}

#[component]
pub fn SuccessToast(id: String, content: String) -> Element {
  rsx! {
    div {
      id,
      class: "toast toast-success",
      span { class: "toast-icon", "✓" }
      span { {content} }
    }
  }
}

#[component]
pub fn ErrorToast(id: String, content: String) -> Element {
  rsx! {
    div {
      id,
      class: "toast toast-error",
      span { class: "toast-icon", "!" }
      span { {content} }
    }
  }
}
