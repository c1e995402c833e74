//! `shgen.toml` configuration.
//!
//! Every table is optional. Without a configuration file, declarations are generated for the standard families in the
//! current dialect and test programs in the legacy one.

use crate::{
  error::{Error, Result},
  types::{standard_families, Dialect, Revision, TypeSpec},
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file looked up from the current directory upwards.
pub const CONFIG_FILE: &str = "shgen.toml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Failed to read config file: {0}")]
  Io(#[from] std::io::Error),

  #[error("Failed to parse config: {0}")]
  Parse(#[from] toml::de::Error),

  #[error("Config file not found: {0}")]
  NotFound(String),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub generator: GeneratorConfig,

  /// Families to generate; the standard families when empty.
  #[serde(default, rename = "family")]
  pub families: Vec<FamilyConfig>,

  #[serde(default)]
  pub regress: RegressConfig,
}

/// Settings of the class generators.
#[derive(Clone, Debug, Deserialize)]
pub struct GeneratorConfig {
  #[serde(default)]
  pub revision: Revision,

  #[serde(default = "default_namespace")]
  pub namespace: String,

  #[serde(default = "default_generator_dir")]
  pub output_dir: PathBuf,
}

impl Default for GeneratorConfig {
  fn default() -> Self {
    GeneratorConfig {
      revision: Revision::default(),
      namespace: default_namespace(),
      output_dir: default_generator_dir(),
    }
  }
}

/// A family declared in the configuration file.
#[derive(Clone, Debug, Deserialize)]
pub struct FamilyConfig {
  pub name: String,
  pub tag: String,

  /// Noun used in the documentation; the lowercase name by default.
  #[serde(default)]
  pub comment_name: Option<String>,

  #[serde(default)]
  pub parent: Option<String>,

  #[serde(default)]
  pub parent_args: Option<String>,

  #[serde(default)]
  pub comment: Option<String>,

  /// Whether this is the root family, allocating its own nodes.
  #[serde(default)]
  pub root: bool,
}

impl FamilyConfig {
  pub fn to_spec(&self, dialect: &Dialect) -> TypeSpec {
    let comment_name = self.comment_name.clone().unwrap_or_else(|| self.name.to_lowercase());
    let mut spec = if self.root {
      TypeSpec {
        name: self.name.clone(),
        comment_name,
        tag: self.tag.clone(),
        ..TypeSpec::root()
      }
    } else {
      TypeSpec::semantic(dialect, &self.name, &comment_name, &self.tag)
    };

    if let Some(ref parent) = self.parent {
      spec = spec.with_parent(parent);
    }

    if let Some(ref parent_args) = self.parent_args {
      spec.parent_args = parent_args.clone();
    }

    if let Some(ref comment) = self.comment {
      spec = spec.with_comment(comment);
    }

    spec
  }
}

/// Settings of the test program generators.
#[derive(Clone, Debug, Deserialize)]
pub struct RegressConfig {
  #[serde(default = "default_regress_revision")]
  pub revision: Revision,

  /// Tolerance of test cases not setting their own.
  #[serde(default = "default_epsilon")]
  pub epsilon: f64,

  #[serde(default = "default_regress_dir")]
  pub output_dir: PathBuf,
}

impl Default for RegressConfig {
  fn default() -> Self {
    RegressConfig {
      revision: default_regress_revision(),
      epsilon: default_epsilon(),
      output_dir: default_regress_dir(),
    }
  }
}

fn default_namespace() -> String {
  "SH".to_owned()
}

fn default_generator_dir() -> PathBuf {
  PathBuf::from("generated")
}

fn default_regress_revision() -> Revision {
  Revision::Legacy
}

fn default_epsilon() -> f64 {
  crate::regress::EPSILON
}

fn default_regress_dir() -> PathBuf {
  PathBuf::from("regress")
}

impl Config {
  /// Load configuration from a file path.
  pub fn load(path: &Path) -> ConfigResult<Self> {
    if !path.exists() {
      return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    Ok(config)
  }

  /// Load configuration from the current directory or its parents.
  pub fn load_from_cwd() -> ConfigResult<Self> {
    let cwd = std::env::current_dir()?;
    Self::find_and_load(&cwd)
  }

  /// Find and load configuration by searching up from the given directory.
  ///
  /// Reaching the root without finding any configuration file yields the default configuration.
  pub fn find_and_load(start_dir: &Path) -> ConfigResult<Self> {
    let mut dir = start_dir.to_path_buf();

    loop {
      let path = dir.join(CONFIG_FILE);

      if path.exists() {
        return Self::load(&path);
      }

      if !dir.pop() {
        return Ok(Self::default());
      }
    }
  }

  /// Dialect of the class generators; `revision` overrides the configured one.
  pub fn dialect(&self, revision: Option<Revision>) -> Dialect {
    let mut dialect = Dialect::from(revision.unwrap_or(self.generator.revision));
    dialect.namespace = self.generator.namespace.clone();
    dialect
  }

  /// Dialect of the test programs; `revision` overrides the configured one.
  pub fn regress_dialect(&self, revision: Option<Revision>) -> Dialect {
    let mut dialect = Dialect::from(revision.unwrap_or(self.regress.revision));
    dialect.namespace = self.generator.namespace.clone();
    dialect
  }

  /// Families to generate under `dialect`.
  pub fn families(&self, dialect: &Dialect) -> Vec<TypeSpec> {
    if self.families.is_empty() {
      standard_families(dialect)
    } else {
      self.families.iter().map(|family| family.to_spec(dialect)).collect()
    }
  }

  /// The family called `name`.
  pub fn family(&self, dialect: &Dialect, name: &str) -> Result<TypeSpec> {
    self
      .families(dialect)
      .into_iter()
      .find(|spec| spec.name == name)
      .ok_or_else(|| Error::UnknownFamily(name.to_owned()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::FamilyKind;

  #[test]
  fn defaults() {
    let config = Config::default();

    assert_eq!(config.generator.revision, Revision::Current);
    assert_eq!(config.generator.namespace, "SH");
    assert_eq!(config.regress.revision, Revision::Legacy);
    assert_eq!(config.regress.epsilon, 0.01);
    assert_eq!(config.families(&Dialect::current()).len(), 7);
  }

  #[test]
  fn parse() {
    let config: Config = toml::from_str(
      r#"
[generator]
revision = "legacy"
output_dir = "out"

[[family]]
name = "Attrib"
tag = "ATTRIB"
root = true

[[family]]
name = "Tangent"
tag = "TANGENT"
parent = "Vector"

[regress]
epsilon = 0.001
"#,
    )
    .unwrap();

    assert_eq!(config.generator.revision, Revision::Legacy);
    assert_eq!(config.generator.output_dir, PathBuf::from("out"));
    assert_eq!(config.generator.namespace, "SH");
    assert_eq!(config.regress.epsilon, 0.001);
    assert_eq!(config.regress.output_dir, PathBuf::from("regress"));

    let dialect = config.dialect(None);
    let families = config.families(&dialect);

    assert_eq!(dialect, Dialect::legacy());
    assert_eq!(families.len(), 2);
    assert_eq!(families[0].kind, FamilyKind::Root);
    assert_eq!(families[0].parent, "Generic");
    assert_eq!(families[1].comment_name, "tangent");
    assert_eq!(families[1].parent, "Vector");
    assert_eq!(families[1].parent_args, "<N, Binding, T, Swizzled>");
  }

  #[test]
  fn revision_override() {
    let config = Config::default();

    assert_eq!(config.dialect(Some(Revision::Legacy)), Dialect::legacy());
    assert_eq!(config.regress_dialect(None), Dialect::legacy());
    assert_eq!(config.regress_dialect(Some(Revision::Current)), Dialect::current());
  }

  #[test]
  fn unknown_family() {
    let config = Config::default();

    assert!(config.family(&Dialect::current(), "Normal").is_ok());
    assert!(matches!(
      config.family(&Dialect::current(), "Fog"),
      Err(Error::UnknownFamily(name)) if name == "Fog"
    ));
  }

  #[test]
  fn missing_file() {
    let path = Path::new("/nonexistent/shgen.toml");
    assert!(matches!(Config::load(path), Err(ConfigError::NotFound(_))));
  }

  #[test]
  fn bad_revision() {
    let parsed = toml::from_str::<Config>("[generator]\nrevision = \"ancient\"\n");
    assert!(parsed.is_err());
  }
}
