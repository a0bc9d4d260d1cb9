//! gRPC service implementation.
//!
//! ## Structure
//!
//! - [`handler`] - `user.UserService` entry point ([`handler::AccountService`]).

pub mod handler;
