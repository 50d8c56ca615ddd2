//! Generate step: drive protoc through tonic-prost-build.

use eyre::{Result, WrapErr};
use std::fs;
use tracing::info;

use crate::config::PipelineConfig;

/// Generate binding sources for the configured proto file into the
/// output directory.
///
/// The output directory is created recursively if absent. A single
/// compiler pass requests both output modes: prost message types and the
/// tonic RPC client stubs. Success means the compiler exited zero; the
/// generated files themselves are not inspected.
///
/// Generation is not incremental. Every call regenerates from the
/// current state of the mirror.
pub async fn call_generate(config: &PipelineConfig) -> Result<()> {
    fs::create_dir_all(config.out_dir()).wrap_err_with(|| {
        format!(
            "Failed to create the output directory {}",
            config.out_dir().display()
        )
    })?;

    info!(
        "Compiling {} into {}",
        config.proto_path().display(),
        config.out_dir().display()
    );

    tonic_prost_build::configure()
        .build_client(true)
        .build_server(false)
        .out_dir(config.out_dir())
        .compile_protos(&[config.proto_path()], &[config.proto_include_dir()])
        .wrap_err_with(|| format!("error compiling {}", config.proto_file()))?;

    Ok(())
}

/// Whether a runnable `protoc` binary is reachable, honoring the same
/// PROTOC override prost-build itself uses.
pub fn protoc_available() -> bool {
    let protoc = std::env::var("PROTOC").unwrap_or_else(|_| "protoc".to_string());
    std::process::Command::new(protoc)
        .arg("--version")
        .output()
        .is_ok_and(|output| output.status.success())
}
