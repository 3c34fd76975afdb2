//! One module per page/action.

pub mod completions;
pub mod employees;
pub mod login;
pub mod products;
pub mod register;
pub mod reports;
pub mod sales;
