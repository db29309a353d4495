pub mod admin;
pub mod api;
pub mod earnings;
pub mod matches;
pub mod payment_methods;
pub mod referrals;
pub mod transactions;
pub mod users;
