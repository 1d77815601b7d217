//! Temporary directory holding colormaps, fake introspection tools and
//! config files.

use std::path::{Path, PathBuf};

use palette_validate::models::IntrospectionConfig;
use tempfile::TempDir;

pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `name` and return its path
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// A stand-in introspection tool that prints `output` for any raster
    pub fn tool_printing(&self, output: &str) -> IntrospectionConfig {
        let data = self.write("introspection.txt", output);
        self.tool_script(&format!("cat '{}'\n", data.display()))
    }

    /// A stand-in introspection tool running `script` under `sh`; the raster
    /// path is `$1`
    pub fn tool_script(&self, script: &str) -> IntrospectionConfig {
        let path = self.write("fake-gdalinfo.sh", script);
        IntrospectionConfig {
            program: "sh".to_string(),
            args: vec![path.display().to_string()],
            timeout_secs: 10,
        }
    }

    /// YAML config pointing the binary at a stand-in tool
    pub fn config_file(&self, tool: &IntrospectionConfig, extra: &str) -> PathBuf {
        let args = tool
            .args
            .iter()
            .map(|a| format!("\"{}\"", a))
            .collect::<Vec<_>>()
            .join(", ");
        let yaml = format!(
            "host: test-host\nintrospection:\n  program: {}\n  args: [{}]\n  timeout_secs: {}\n{}",
            tool.program, args, tool.timeout_secs, extra
        );
        self.write("config.yaml", &yaml)
    }
}
