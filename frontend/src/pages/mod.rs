pub mod activity;
pub mod coin_detail;
pub mod coins;
pub mod dashboard;
pub mod deposit;
pub mod home;
pub mod withdraw;
