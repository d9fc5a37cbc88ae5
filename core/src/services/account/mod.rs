//! User and emoji bookkeeping behind the `user.*` and `emoji.*` operations

mod service;


pub use service::AccountService;
