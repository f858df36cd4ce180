#![allow(non_snake_case)]

use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoticeKind {
  Deposit,
  Withdraw
}

/// Verification and risk notices shown under the fiat forms.
#[component]
pub fn ComplianceAccordion(kind: NoticeKind) -> Element {
  rsx! {
    div {
      class: "notice-accordion",
      details {
        summary { "Verification required" }
        div {
          class: "acc-param-list",
          div {
            class: "acc-param-value",
            {match kind {
              NoticeKind::Deposit => "Identity verification may be required and is handled by our payment provider (Stripe). Deposits may be delayed for review or compliance checks.",
              NoticeKind::Withdraw => "Withdrawals are reviewed before payout. Identity verification may be required by our payment provider (Stripe), and payouts typically arrive within 3-5 business days."
            }}
          }
          div {
            class: "acc-param-range",
            {match kind {
              NoticeKind::Deposit => "By depositing, you agree to our Terms of Service and acknowledge the risks of trading digital assets.",
              NoticeKind::Withdraw => "Fees are estimates. The final amount may differ slightly depending on your bank."
            }}
          }
        }
      }
      details {
        summary { "Risk warning" }
        div {
          class: "acc-note-container",
          div { class: "acc-note-icon", "⚠️" }
          div {
            class: "acc-note-text",
            strong { "Note:" }
            " Trading involves substantial risk of loss. Only deposit funds you can afford to lose. This platform is for entertainment and educational purposes."
          }
        }
      }
    }
  }
}
