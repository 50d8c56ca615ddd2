use serde::Serialize;
use std::path::{Path, PathBuf};

/// Default remote repository holding the proto definitions
const DEFAULT_REMOTE: &str = "https://github.com/sourcenetwork/defradb";

/// Default branch tracked on the remote
const DEFAULT_BRANCH: &str = "develop";

/// Default local mirror directory the remote is cloned into
const DEFAULT_MIRROR_DIR: &str = "defradb";

/// Default directory inside the mirror holding the proto file
const DEFAULT_PROTO_DIR: &str = "net/api/pb";

/// Default proto definition file compiled by the generate step
const DEFAULT_PROTO_FILE: &str = "api.proto";

/// Default directory the generated stubs are written to
const DEFAULT_OUT_DIR: &str = "proto/generated";

/// Resolved configuration for the fetch-and-generate pipeline
#[derive(Debug, Clone, Serialize)]
pub struct PipelineConfig {
    /// Remote repository address passed to `git clone`
    pub(crate) remote: String,
    /// Branch pulled on every run
    pub(crate) branch: String,
    /// Local mirror directory (clone of the remote)
    pub(crate) mirror_dir: PathBuf,
    /// Path inside the mirror holding the proto file
    pub(crate) proto_dir: String,
    /// Proto definition file to compile
    pub(crate) proto_file: String,
    /// Directory the generated stubs are written to
    pub(crate) out_dir: PathBuf,
}

impl PipelineConfig {
    /// Create a new builder for PipelineConfig
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Get the remote repository address
    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// Get the tracked branch
    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Get the local mirror directory
    pub fn mirror_dir(&self) -> &Path {
        &self.mirror_dir
    }

    /// Get the proto definition filename
    pub fn proto_file(&self) -> &str {
        &self.proto_file
    }

    /// Get the output directory for generated stubs
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Directory handed to the compiler as the include root
    pub fn proto_include_dir(&self) -> PathBuf {
        self.mirror_dir.join(&self.proto_dir)
    }

    /// Full path of the proto definition file inside the mirror
    pub fn proto_path(&self) -> PathBuf {
        self.proto_include_dir().join(&self.proto_file)
    }
}

/// Builder for PipelineConfig
///
/// Each field resolves in order: explicit setter, then the matching
/// `STUBGEN_*` environment variable, then the built-in default.
#[derive(Default)]
pub struct PipelineConfigBuilder {
    remote: Option<String>,
    branch: Option<String>,
    mirror_dir: Option<PathBuf>,
    proto_dir: Option<String>,
    proto_file: Option<String>,
    out_dir: Option<PathBuf>,
}

impl PipelineConfigBuilder {
    /// Set the remote repository address
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = Some(remote.into());
        self
    }

    /// Set the branch pulled on every run
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Set the local mirror directory
    pub fn with_mirror_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.mirror_dir = Some(dir.into());
        self
    }

    /// Set the proto directory relative to the mirror root
    pub fn with_proto_dir(mut self, dir: impl Into<String>) -> Self {
        self.proto_dir = Some(dir.into());
        self
    }

    /// Set the proto definition filename
    pub fn with_proto_file(mut self, file: impl Into<String>) -> Self {
        self.proto_file = Some(file.into());
        self
    }

    /// Set the output directory for generated stubs
    pub fn with_out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(dir.into());
        self
    }

    /// Build the PipelineConfig
    pub fn build(self) -> PipelineConfig {
        PipelineConfig {
            remote: resolve(self.remote, "STUBGEN_REMOTE", DEFAULT_REMOTE),
            branch: resolve(self.branch, "STUBGEN_BRANCH", DEFAULT_BRANCH),
            mirror_dir: resolve_path(self.mirror_dir, "STUBGEN_MIRROR_DIR", DEFAULT_MIRROR_DIR),
            proto_dir: resolve(self.proto_dir, "STUBGEN_PROTO_DIR", DEFAULT_PROTO_DIR),
            proto_file: resolve(self.proto_file, "STUBGEN_PROTO_FILE", DEFAULT_PROTO_FILE),
            out_dir: resolve_path(self.out_dir, "STUBGEN_OUT_DIR", DEFAULT_OUT_DIR),
        }
    }
}

fn resolve(explicit: Option<String>, env_key: &str, default: &str) -> String {
    explicit
        .or_else(|| std::env::var(env_key).ok())
        .unwrap_or_else(|| default.to_string())
}

fn resolve_path(explicit: Option<PathBuf>, env_key: &str, default: &str) -> PathBuf {
    explicit
        .or_else(|| std::env::var_os(env_key).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(default))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = PipelineConfig::builder().build();
        assert_eq!(config.remote(), "https://github.com/sourcenetwork/defradb");
        assert_eq!(config.branch(), "develop");
        assert_eq!(config.proto_file(), "api.proto");
        assert_eq!(
            config.proto_path(),
            PathBuf::from("defradb/net/api/pb/api.proto")
        );
    }

    #[test]
    fn test_builder_overrides() {
        let config = PipelineConfig::builder()
            .with_remote("https://example.com/protos")
            .with_mirror_dir("/tmp/mirror")
            .with_proto_file("other.proto")
            .build();
        assert_eq!(config.remote(), "https://example.com/protos");
        assert_eq!(
            config.proto_path(),
            PathBuf::from("/tmp/mirror/net/api/pb/other.proto")
        );
    }

    #[test]
    fn test_config_serializes_to_json() {
        let config = PipelineConfig::builder().build();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"branch\":\"develop\""));
        assert!(json.contains("api.proto"));
    }
}
