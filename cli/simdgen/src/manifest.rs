//! `simdgen.toml` manifest parsing and project configuration.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use simdgen_emit::EmitOptions;
use simdgen_targets::{load_catalog_toml, Catalog, CatalogOverrides, InstructionSet};

/// Manifest file name searched for upward from the working directory.
pub const MANIFEST_NAME: &str = "simdgen.toml";

/// Definitions directory used when neither the manifest nor the command line
/// names one.
pub const DEFAULT_DEFINITIONS_DIR: &str = "distance_metrics/definitions";

/// Output directory used when neither the manifest nor the command line
/// names one.
pub const DEFAULT_OUTPUT_DIR: &str = "distance_metrics/src/generated";

/// The top-level manifest structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimdgenManifest {
    /// Defaults for `simdgen generate`.
    #[serde(default)]
    pub generate: GenerateSection,
    /// Overrides of the emitted C++ conventions.
    #[serde(default)]
    pub emit: EmitOptions,
    /// Replacement instruction-set lists.
    #[serde(default)]
    pub catalog: CatalogSection,
}

/// `[generate]` section. Paths are relative to the manifest's directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateSection {
    /// Default target instruction set.
    #[serde(default)]
    pub target: Option<String>,
    /// Directory holding `.def` files.
    #[serde(default)]
    pub definitions: Option<PathBuf>,
    /// Directory receiving generated files.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

/// `[catalog]` section: inline replacement lists, or a catalog file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogSection {
    /// Catalog override document, relative to the manifest's directory.
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default)]
    pub x86: Option<Vec<InstructionSet>>,
    #[serde(default)]
    pub arm: Option<Vec<InstructionSet>>,
}

impl CatalogSection {
    pub fn is_empty(&self) -> bool {
        self.file.is_none() && self.inline().is_empty()
    }

    fn inline(&self) -> CatalogOverrides {
        CatalogOverrides {
            x86: self.x86.clone(),
            arm: self.arm.clone(),
        }
    }
}

impl SimdgenManifest {
    /// Search upward from `start_dir` for a `simdgen.toml` file, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_NAME);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: SimdgenManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing simdgen.toml")
    }
}

/// Where the command runs and what the manifest (if any) says.
#[derive(Debug, Clone)]
pub struct Project {
    /// Directory command-line paths are relative to.
    pub cwd: PathBuf,
    /// Directory manifest paths are relative to (the manifest's directory, or
    /// `cwd` without a manifest).
    pub root: PathBuf,
    pub manifest: SimdgenManifest,
}

impl Project {
    /// Load the nearest manifest above `cwd`, or fall back to defaults.
    pub fn discover(cwd: &Path) -> Result<Self> {
        let (manifest, root) = match SimdgenManifest::find_and_load(cwd)? {
            Some((manifest, root)) => (manifest, root),
            None => (SimdgenManifest::default(), cwd.to_path_buf()),
        };
        Ok(Self {
            cwd: cwd.to_path_buf(),
            root,
            manifest,
        })
    }

    /// Target from the command line, else from the manifest.
    pub fn target<'a>(&'a self, cli: Option<&'a str>) -> Option<&'a str> {
        cli.or(self.manifest.generate.target.as_deref())
    }

    pub fn definitions_dir(&self, cli: Option<&Path>) -> PathBuf {
        self.pick(
            cli,
            self.manifest.generate.definitions.as_deref(),
            DEFAULT_DEFINITIONS_DIR,
        )
    }

    pub fn output_dir(&self, cli: Option<&Path>) -> PathBuf {
        self.pick(cli, self.manifest.generate.output.as_deref(), DEFAULT_OUTPUT_DIR)
    }

    /// The instruction-set catalog with manifest overrides applied.
    pub fn catalog(&self) -> Result<Catalog> {
        let section = &self.manifest.catalog;
        let inline = section.inline();
        match &section.file {
            Some(file) => {
                if !inline.is_empty() {
                    bail!("[catalog] sets both `file` and inline x86/arm lists; use one or the other");
                }
                let path = self.root.join(file);
                load_catalog_toml(&path)
                    .with_context(|| format!("loading instruction-set catalog from {}", path.display()))
            }
            None => inline
                .into_catalog()
                .context("building instruction-set catalog from [catalog]"),
        }
    }

    pub fn emit_options(&self) -> EmitOptions {
        self.manifest.emit.clone()
    }

    fn pick(&self, cli: Option<&Path>, manifest: Option<&Path>, default: &str) -> PathBuf {
        match (cli, manifest) {
            (Some(path), _) => self.cwd.join(path),
            (None, Some(path)) => self.root.join(path),
            (None, None) => self.root.join(default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_manifest() {
        let toml_str = r#"
[generate]
target = "avx2"
definitions = "defs"
output = "build/generated"

[emit]
support-header = "simd_loop.hpp"
simd-namespace = "xsimd"

[catalog]
arm = ["neon"]
"#;
        let manifest = SimdgenManifest::from_str(toml_str).unwrap();
        assert_eq!(manifest.generate.target.as_deref(), Some("avx2"));
        assert_eq!(manifest.emit.support_header, "simd_loop.hpp");
        assert_eq!(manifest.emit.simd_namespace, "xsimd");
        assert_eq!(manifest.emit.loop_macro, "MAKE_STD_VEC_LOOP");
        assert_eq!(manifest.catalog.arm.as_ref().map(Vec::len), Some(1));
        assert!(manifest.catalog.x86.is_none());
    }

    #[test]
    fn parse_empty_manifest() {
        let manifest = SimdgenManifest::from_str("").unwrap();
        assert!(manifest.generate.target.is_none());
        assert_eq!(manifest.emit, EmitOptions::default());
        assert!(manifest.catalog.is_empty());
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(SimdgenManifest::from_str("[generate]\ntargte = \"avx\"\n").is_err());
        assert!(SimdgenManifest::from_str("[emit]\nindent = 2\n").is_err());
    }

    #[test]
    fn find_in_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_NAME),
            "[generate]\ndefinitions = \"defs\"\n",
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let project = Project::discover(&nested).unwrap();
        assert_eq!(project.root, dir.path());
        assert_eq!(project.definitions_dir(None), dir.path().join("defs"));
        assert_eq!(
            project.output_dir(None),
            dir.path().join(DEFAULT_OUTPUT_DIR)
        );
        assert_eq!(
            project.definitions_dir(Some(Path::new("local"))),
            nested.join("local")
        );
    }

    #[test]
    fn defaults_without_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let project = Project::discover(dir.path()).unwrap();
        assert_eq!(project.target(None), None);
        assert_eq!(project.target(Some("neon")), Some("neon"));
        assert_eq!(
            project.definitions_dir(None),
            dir.path().join(DEFAULT_DEFINITIONS_DIR)
        );
        assert!(project.catalog().unwrap().resolve("fma4").is_ok());
    }

    #[test]
    fn overlapping_catalog_reported() {
        let manifest = SimdgenManifest::from_str("[catalog]\narm = [\"sse2\"]\n").unwrap();
        let project = Project {
            cwd: PathBuf::from("."),
            root: PathBuf::from("."),
            manifest,
        };
        let err = project.catalog().unwrap_err();
        assert!(format!("{err:#}").contains("'sse2'"));
    }

    #[test]
    fn catalog_loaded_from_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_NAME),
            "[catalog]\nfile = \"isa/catalog.toml\"\n",
        )
        .unwrap();
        std::fs::create_dir(dir.path().join("isa")).unwrap();
        std::fs::write(
            dir.path().join("isa").join("catalog.toml"),
            "x86 = [\"sse2\", \"avx2\"]\n",
        )
        .unwrap();

        let project = Project::discover(dir.path()).unwrap();
        let catalog = project.catalog().unwrap();
        assert_eq!(catalog.resolve("avx2").unwrap().names(), vec!["sse2", "avx2"]);
        assert!(catalog.resolve("sse4_2").is_err());
        assert!(catalog.resolve("neon64").is_ok());
    }

    #[test]
    fn missing_catalog_file_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_NAME), "[catalog]\nfile = \"nope.toml\"\n").unwrap();
        let project = Project::discover(dir.path()).unwrap();
        let err = project.catalog().unwrap_err();
        assert!(format!("{err:#}").contains("catalog file not found"));
    }

    #[test]
    fn catalog_file_and_inline_lists_conflict() {
        let manifest =
            SimdgenManifest::from_str("[catalog]\nfile = \"c.toml\"\narm = [\"neon\"]\n").unwrap();
        let project = Project {
            cwd: PathBuf::from("."),
            root: PathBuf::from("."),
            manifest,
        };
        let err = project.catalog().unwrap_err();
        assert!(err.to_string().contains("use one or the other"));
    }
}
