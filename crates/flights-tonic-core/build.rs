/// Builds the gRPC client and server code for the `flight.proto` definition
/// using `tonic-prost-build`.
///
/// This code generation step processes the Protocol Buffer definitions located
/// in the `proto` directory and emits Rust modules with gRPC bindings into the
/// crate's `OUT_DIR`.
///
/// # Well-known types
///
/// `GetFlightList` takes a `google.protobuf.Empty`. Well-known types are not
/// compiled, so prost maps `Empty` to `()` and the generated service methods
/// take a `tonic::Request<()>`.
///
/// # Descriptor set
///
/// An encoded `FileDescriptorSet` is written next to the generated code as
/// `flight_descriptor.bin` so the server can expose gRPC reflection.
///
/// # Output
///
/// Generated code will be accessible in Rust via:
///
/// ```rust
/// pub mod proto {
///     tonic::include_proto!("flight");
/// }
/// ```
use std::env;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=proto/flight.proto");

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let descriptor_path = out_dir.join("flight_descriptor.bin");

    let mut config = tonic_prost_build::Config::new();

    config.file_descriptor_set_path(&descriptor_path);

    tonic_prost_build::configure().compile_with_config(
        config,
        &["proto/flight.proto"],
        &["proto"],
    )?;

    Ok(())
}
