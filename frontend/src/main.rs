#![allow(non_snake_case)]
mod components;
mod hooks;
mod pages;
mod utils;

use std::rc::Rc;
use components::template::AppShell;
use dioxus::{logger::tracing::Level, prelude::*};
use hooks::{Auth, QueryClient};
use pages::{
  activity::Activity, coin_detail::CoinDetail, coins::Coins, dashboard::Dashboard,
  deposit::Deposit, home::Home, withdraw::Withdraw
};
use utils::{actor::BackendActor, config::BACKEND_URL, identity::IdentitySession, transport::HttpTransport};

#[derive(Routable, PartialEq, Clone)]
enum Route {
    #[route("/")]
    Home {},
    #[layout(AppShell)]
        #[route("/dashboard")]
        Dashboard {},
        #[route("/coins")]
        Coins {},
        #[route("/coins/:symbol")]
        CoinDetail { symbol: String },
        #[route("/activity")]
        Activity {},
        #[route("/deposit")]
        Deposit {},
        #[route("/withdraw")]
        Withdraw {},
    #[end_layout]
    #[route("/:..route")]
    PageNotFound { route: Vec<String> }
}

fn main() {
    if let Err(e) = dioxus::logger::init(Level::INFO) {
        eprintln!("logger already initialised: {e}");
    }
    dioxus::launch(App);
}

fn App() -> Element {
    static CSS: Asset = asset!("assets/main.css");

    let session = use_hook(|| {
        let session = IdentitySession::default();
        session.restore();
        session
    });
    let client = use_context_provider(QueryClient::new);
    use_context_provider({
        let session = session.clone();
        move || Auth::new(session, client)
    });
    use_context_provider(move || {
        BackendActor::new(Rc::new(HttpTransport::new(BACKEND_URL, session.handle())))
    });

    rsx! {
        document::Stylesheet {href: CSS},
        Router::<Route> {}
    }
}

#[component]
fn PageNotFound(route: Vec<String>) -> Element {
    rsx! {
        div {
            class: "not-found",
            h1 { "Page not found" }
            p { "We are terribly sorry, but the page you requested doesn't exist." }
            pre { color: "red", "log:\nattemped to navigate to: {route:?}" }
            Link { to: Route::Home {}, "Back to start" }
        }
    }
}
