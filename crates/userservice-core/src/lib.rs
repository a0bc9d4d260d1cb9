#![doc = include_str!("../README.md")]

mod common;
pub use common::*;

/// gRPC service and message definitions generated from `proto/user.proto`.
///
/// ## Service
///
/// - `RegisterUser` - validates and persists a new account.
/// - `LoginUser` - looks an account up by email address.
///
/// The server side lives in [`proto::user_service_server`], the client in
/// [`proto::user_service_client`].
pub mod proto {
    tonic::include_proto!("user");

    /// Encoded descriptor set for `user.proto`, registered with the reflection
    /// service.
    pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("user_descriptor");
}
