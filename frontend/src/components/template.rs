use dioxus::{logger::tracing::info, prelude::*};
use crate::{
  components::formDialog::ProfileSetupDialog,
  hooks::{queries::{use_caller_profile, use_stablecoin_balance}, use_auth},
  utils::currency::format_stablecoin_short,
  Route
};

/// Layout for every signed-in page. Visitors without a session are sent back to the landing page.
#[component]
pub fn AppShell() -> Element {
  static CSS: Asset = asset!("assets/template.css");
  let auth = use_auth();
  let profile = use_caller_profile();
  let signed_in = auth.is_authenticated();

  let gate = auth.clone();
  use_effect(move || {
    if !gate.is_authenticated() {
      info!("no session, redirecting to landing page");
      navigator().replace(Route::Home {});
    }
  });

  if !signed_in {
    return rsx! {};
  }

  let needs_profile = !profile.is_loading() && profile.error().is_none() && profile.data() == Some(None);

  rsx! {
    document::Stylesheet {href: CSS},
    Header { }
    main {
      class: "app-main",
      Outlet::<Route> {}
    }
    Footer { }
    if needs_profile {
      ProfileSetupDialog { }
    }
  }
}

#[component]
fn Header() -> Element {
  let auth = use_auth();
  let profile = use_caller_profile();
  let balance = use_stablecoin_balance();
  let mut menu_open = use_signal(|| false);

  let display_name = profile.data().flatten().map(|p| p.display_name);
  let funds = balance.data().map(format_stablecoin_short);

  rsx!{
    nav {
      div {
        class: "nav-container",
        Link {
          class: "logo",
          to: Route::Dashboard { },
          "StonkSquad",
        }
        button {
          class: "menu-button",
          onclick: move |_| menu_open.toggle(),
          span {
            class: "menu-icon",
            svg {
              class: "menu-icon-svg",
              xmlns: "http://www.w3.org/2000/svg",
              view_box: "0 0 24 24",
              path {
                d: "M6 12H18",
                stroke: "currentcolor",
                stroke_linecap: "round"
              }
              path {
                d: "M6 15.5H18",
                stroke: "currentcolor",
                stroke_linecap: "round"
              }
              path {
                d: "M6 8.5H18",
                stroke: "currentcolor",
                stroke_linecap: "round"
              }
            }
          }
        },
        div {
          class: if menu_open() { "nav-links open" } else { "nav-links" },
          onclick: move |_| menu_open.set(false),
          Link { active_class: "nav-active", to: Route::Dashboard { }, "Dashboard" },
          Link { active_class: "nav-active", to: Route::Coins { }, "People" },
          Link { active_class: "nav-active", to: Route::Activity { }, "Activity" },
          Link { active_class: "nav-active", to: Route::Deposit { }, "Deposit" },
          Link { active_class: "nav-active", to: Route::Withdraw { }, "Withdraw" },
        }
        div {
          class: "nav-account",
          if let Some(funds) = funds {
            span { class: "nav-balance", "{funds}" }
          }
          if let Some(name) = display_name {
            span { class: "nav-user", "{name}" }
          }
          button {
            class: "button button-ghost",
            onclick: move |_| {
              auth.logout();
              navigator().replace(Route::Home {});
            },
            "Logout"
          }
        }
      }
    }
  }
}

#[component]
fn Footer() -> Element {
  rsx!{
    footer {
      div {
        class: "footer-container",
        div {
          class: "copyright",
          p { "© 2026 StonkSquad" }
          p { class: "muted", "For entertainment and educational purposes. Not financial advice." }
        },
        div {
          class: "social-links",
          Link {
            to: Route::Activity { },
            class: "social-link",
            title: "Leaderboard",
            svg {
              xmlns: "http://www.w3.org/2000/svg",
              width: "24",
              height: "24",
              view_box: "0 0 24 24",
              fill: "none",
              stroke: "currentcolor",
              stroke_width: "2",
              stroke_linecap: "round",
              stroke_linejoin: "round",
              polyline { points: "22 12 18 12 15 21 9 3 6 12 2 12" }
            }
          }
          Link {
            to: Route::Coins { },
            class: "social-link",
            title: "People",
            svg {
              xmlns: "http://www.w3.org/2000/svg",
              width: "24",
              height: "24",
              view_box: "0 0 24 24",
              fill: "none",
              stroke: "currentcolor",
              stroke_width: "2",
              stroke_linecap: "round",
              stroke_linejoin: "round",
              path { d: "M17 21v-2a4 4 0 0 0-4-4H5a4 4 0 0 0-4 4v2" }
              circle { cx: "9", cy: "7", r: "4" }
              path { d: "M23 21v-2a4 4 0 0 0-3-3.87" }
              path { d: "M16 3.13a4 4 0 0 1 0 7.75" }
            }
          }
        }
      }
    }
  }
}
