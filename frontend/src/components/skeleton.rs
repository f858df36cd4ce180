#![allow(non_snake_case)]

use dioxus::prelude::*;

#[component]
pub fn Skeleton(#[props(default = "100%".to_string())] width: String, #[props(default = "1.5em".to_string())] height: String) -> Element {
  rsx! {
    div { class: "skeleton", width, height }
  }
}

#[component]
pub fn SkeletonRows(rows: usize) -> Element {
  rsx! {
    div {
      class: "skeleton-rows",
      for idx in 0..rows {
        Skeleton { key: "sk{idx}", height: "2.5em" }
      }
    }
  }
}
