//! `shgen`, command line front-end of the generators.

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use shgen::{
  artifact::{artifact_to_str, Artifact},
  config::Config,
  regress::{self, opcode, SUITES},
  types::{Dialect, Revision},
};
use std::{
  fs,
  io::{self, Write},
  path::{Path, PathBuf},
};
use tracing::info;

#[derive(Parser)]
#[command(name = "shgen")]
#[command(version)]
#[command(about = "Generate Sh shader-algebra classes and regression tests", long_about = None)]
struct Cli {
  /// Configuration file (default: shgen.toml in the current directory or a parent)
  #[arg(long, global = true, value_name = "PATH")]
  config: Option<PathBuf>,

  /// Revision of the generated code, overriding the configuration
  #[arg(long, global = true, value_enum)]
  revision: Option<RevisionArg>,

  /// Increase log verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, global = true, action = ArgAction::Count)]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum RevisionArg {
  Legacy,
  Current,
}

impl From<RevisionArg> for Revision {
  fn from(arg: RevisionArg) -> Self {
    match arg {
      RevisionArg::Legacy => Revision::Legacy,
      RevisionArg::Current => Revision::Current,
    }
  }
}

#[derive(Subcommand)]
enum Commands {
  /// Print the declaration header of a family
  Decl {
    family: String,

    /// Only alias the root family (requires the current revision)
    #[arg(long)]
    parametrization: bool,
  },

  /// Print the implementation header of a family
  Impl { family: String },

  /// Print the explicit instantiations of a family
  Instantiate { family: String },

  /// Write every file of every family
  All {
    /// Output directory (default: generator.output_dir)
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,
  },

  /// List the configured families
  Families,

  /// Print a regression suite, or write all of them
  Regress {
    #[arg(required_unless_present = "all")]
    suite: Option<String>,

    /// Write every suite to <suite>.cpp
    #[arg(long, conflicts_with = "suite")]
    all: bool,

    /// Output directory with --all (default: regress.output_dir)
    #[arg(long, value_name = "DIR", requires = "all")]
    out_dir: Option<PathBuf>,
  },

  /// List the regression suites
  Suites,

  /// Write the table-driven opcode tests, one <OPCODE>.cpp each
  Opcodes {
    /// Output directory (default: current directory)
    #[arg(long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  shgen::log::init(cli.verbose).context("Failed to install log subscriber")?;

  let config = match cli.config {
    Some(ref path) => {
      Config::load(path).with_context(|| format!("Failed to load configuration {}", path.display()))?
    }
    None => Config::load_from_cwd().context("Failed to load configuration")?,
  };
  let revision = cli.revision.map(Revision::from);

  match cli.command {
    Commands::Decl { family, parametrization } => cmd_decl(&config, revision, &family, parametrization),
    Commands::Impl { family } => cmd_family(&config, revision, "impl", &family, Artifact::Implementation),
    Commands::Instantiate { family } => {
      cmd_family(&config, revision, "instantiate", &family, Artifact::Instantiation)
    }
    Commands::All { out_dir } => {
      let out_dir = out_dir.unwrap_or_else(|| config.generator.output_dir.clone());
      cmd_all(&config, revision, &out_dir)
    }
    Commands::Families => cmd_families(&config, revision),
    Commands::Regress { suite, all, out_dir } => {
      let dialect = config.regress_dialect(revision);

      if all {
        let out_dir = out_dir.unwrap_or_else(|| config.regress.output_dir.clone());
        cmd_regress_all(&config, &dialect, &out_dir)
      } else {
        let suite = suite.context("No suite given")?;
        cmd_regress(&config, &dialect, &suite)
      }
    }
    Commands::Suites => {
      for name in SUITES {
        println!("{}", name);
      }

      Ok(())
    }
    Commands::Opcodes { out_dir } => cmd_opcodes(&config.regress_dialect(revision), &out_dir),
  }
}

fn print(text: &str) -> Result<()> {
  let mut stdout = io::stdout().lock();
  stdout.write_all(text.as_bytes()).context("Failed to write to stdout")?;
  stdout.flush().context("Failed to flush stdout")
}

fn write_file(path: &Path, text: &str) -> Result<()> {
  fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
  info!(path = %path.display(), "wrote file");
  Ok(())
}

fn create_dir(dir: &Path) -> Result<()> {
  fs::create_dir_all(dir).with_context(|| format!("Failed to create directory {}", dir.display()))
}

fn cmd_decl(config: &Config, revision: Option<Revision>, family: &str, parametrization: bool) -> Result<()> {
  let dialect = config.dialect(revision);

  if parametrization && !dialect.semantic_param {
    bail!("Parametrization headers need a revision with a semantic template parameter");
  }

  let artifact = if parametrization {
    Artifact::Parametrization
  } else {
    Artifact::Declaration
  };

  cmd_family(config, revision, "decl", family, artifact)
}

fn cmd_family(
  config: &Config,
  revision: Option<Revision>,
  command: &str,
  family: &str,
  artifact: Artifact,
) -> Result<()> {
  let dialect = config.dialect(revision);
  let spec = config.family(&dialect, family)?;
  let source = format!("shgen {} {}", command, family);
  let text = artifact_to_str(artifact, &spec, &dialect, &source).context("Failed to generate code")?;

  print(&text)
}

fn cmd_all(config: &Config, revision: Option<Revision>, out_dir: &Path) -> Result<()> {
  let dialect = config.dialect(revision);

  create_dir(out_dir)?;

  for spec in config.families(&dialect) {
    for &artifact in Artifact::for_family(&spec, &dialect) {
      let path = out_dir.join(artifact.file_name(&spec, &dialect));
      let text = artifact_to_str(artifact, &spec, &dialect, "shgen all")
        .with_context(|| format!("Failed to generate {}", path.display()))?;

      write_file(&path, &text)?;
    }
  }

  Ok(())
}

fn cmd_families(config: &Config, revision: Option<Revision>) -> Result<()> {
  let dialect = config.dialect(revision);

  for spec in config.families(&dialect) {
    println!("{}\t{}\t{}", dialect.name(&spec.name), dialect.enumerator(&spec.tag), dialect.name(&spec.parent));
  }

  Ok(())
}

fn cmd_regress(config: &Config, dialect: &Dialect, name: &str) -> Result<()> {
  let suite = regress::suite(name)?;
  let text = suite
    .to_str(dialect, config.regress.epsilon)
    .with_context(|| format!("Failed to generate suite {}", name))?;

  print(&text)
}

fn cmd_regress_all(config: &Config, dialect: &Dialect, out_dir: &Path) -> Result<()> {
  create_dir(out_dir)?;

  for name in SUITES {
    let suite = regress::suite(name)?;
    let text = suite
      .to_str(dialect, config.regress.epsilon)
      .with_context(|| format!("Failed to generate suite {}", name))?;

    write_file(&out_dir.join(format!("{}.cpp", name)), &text)?;
  }

  Ok(())
}

fn cmd_opcodes(dialect: &Dialect, out_dir: &Path) -> Result<()> {
  let generated_at = chrono::Local::now().naive_local();

  create_dir(out_dir)?;

  for op in opcode::table() {
    let text = opcode::opcode_to_str(&op, dialect, "shgen opcodes", generated_at)
      .with_context(|| format!("Failed to generate opcode {}", op.name))?;

    write_file(&out_dir.join(format!("{}.cpp", op.name)), &text)?;
  }

  Ok(())
}
