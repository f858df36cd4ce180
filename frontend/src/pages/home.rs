use dioxus::{logger::tracing::{error, info}, prelude::*};
use crate::{hooks::use_auth, Route};

#[component]
pub fn Home() -> Element {
  static CSS: Asset = asset!("assets/home.css");
  let auth = use_auth();
  let mut connecting = use_signal(|| false);
  let mut login_error: Signal<Option<String>> = use_signal(|| None);

  let gate = auth.clone();
  use_effect(move || {
    if gate.is_authenticated() {
      navigator().replace(Route::Dashboard {});
    }
  });

  let get_started = move |_| {
    if auth.is_authenticated() {
      navigator().push(Route::Dashboard {});
      return;
    }
    let auth = auth.clone();
    connecting.set(true);
    login_error.set(None);
    spawn(async move {
      match auth.login().await {
        Ok(principal) => info!("landing page session ready for {}", principal),
        Err(e) => {
          error!("login failed: {}", e);
          login_error.set(Some(e.to_string()));
        }
      }
      connecting.set(false);
    });
  };

  let cta = if connecting() { "Connecting..." } else { "Create Your Profile" };

  rsx! {
    document::Stylesheet {href: CSS},
    div {
      class: "home-page",
      section {
        class : "hero",
        h1 { "Connect and Trade with " span { class: "accent", "Your Squad" } },
        p { "Create your profile, browse your friends, and trade shares with USDC. Build your social portfolio and connect with your community!" },
        button {
          class: "cta-button",
          disabled: connecting(),
          onclick: get_started,
          "{cta}"
        }
        if let Some(message) = login_error() {
          div { class: "alert alert-error", "{message}" }
        }
      },
      section {
        class: "features",
        div {
          class: "feature-card",
          h3 {
            class: "feature-card-title",
            span {"👥"}
            "Create Your Profile"
          }
          p { "Every user gets their own unique identifier when they join. Your personal brand, ready to share and trade!" }
        },
        div {
          class: "feature-card",
          h3 {
            class: "feature-card-title",
            span {"📈"}
            "Trade & Connect"
          }
          p { "Place limit or market orders on anyone's coin. Watch the order book and the price history as your community trades." }
        },
        div {
          class: "feature-card",
          h3 {
            class: "feature-card-title",
            span {"⚡"}
            "Instant Matching"
          }
          p { "When buy meets sell the trade executes and balances update right away. Climb the creator ranks as your coin's market cap grows." }
        }
      },
      section {
        class: "how-it-works",
        h2 { "How It Works" }
        Step {
          number: 1,
          title: "Sign Up & Create Profile",
          body: "Connect with Internet Identity and create your profile. Your username becomes the symbol others trade."
        }
        Step {
          number: 2,
          title: "Browse People",
          body: "Explore every profile on the platform. Check order books, price history and find interesting people to back."
        }
        Step {
          number: 3,
          title: "Trade & Build",
          body: "Deposit funds, place buy and sell orders, and build your portfolio with your squad."
        }
      }
    }
  }
}

#[component]
fn Step(number: u8, title: &'static str, body: &'static str) -> Element {
  rsx! {
    div {
      class: "step",
      div { class: "step-number", "{number}" }
      div {
        h3 { "{title}" }
        p { "{body}" }
      }
    }
  }
}
