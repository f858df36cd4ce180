pub mod accordion;
pub mod card_fields;
pub mod formDialog;
pub mod modeselect;
pub mod orderbook;
pub mod payment_setup;
pub mod plot;
pub mod price_chart;
pub mod profile_editor;
pub mod rank_badge;
pub mod results;
pub mod skeleton;
pub mod sparkline;
pub mod template;
pub mod toast;
pub mod trades;
pub mod trend_dialog;
