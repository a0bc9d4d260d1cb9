/// Builds the gRPC client and server code for `proto/user.proto` using
/// `tonic-prost-build`.
///
/// Besides the message and service bindings, the encoded file descriptor set
/// is written to `OUT_DIR/user_descriptor.bin` so the server can expose gRPC
/// reflection.
///
/// Generated code is accessible via:
///
/// ```rust,ignore
/// pub mod proto {
///     tonic::include_proto!("user");
/// }
/// ```
///
/// # Panics
///
/// Panics if `OUT_DIR` is unset or code generation fails.
use std::env;
use std::path::PathBuf;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let descriptor_path = out_dir.join("user_descriptor.bin");

    let mut config = tonic_prost_build::Config::new();
    config.file_descriptor_set_path(&descriptor_path);

    tonic_prost_build::configure()
        .compile_with_config(config, &["proto/user.proto"], &["proto"])
        .unwrap();
}
