//! Whole generated files.
//!
//! An artifact wraps the output of a generator with the warning and license banners, an include guard for headers,
//! the includes it depends on and the library namespace.

use crate::{
  decl::ClassGen,
  emit::Emitter,
  implement::ImplGen,
  instantiate::instantiate,
  types::{Dialect, FamilyKind, TypeSpec},
  writer::cpp,
};
use std::fmt;
use tracing::info;

/// Kind of file generated for a family.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Artifact {
  /// `<Class>.hpp` with the class templates and typedefs.
  Declaration,

  /// `<Class>.hpp` with typedefs over the root family only.
  Parametrization,

  /// `<Class>Impl.hpp` with member definitions.
  Implementation,

  /// `<Class>.cpp` with explicit instantiations.
  Instantiation,
}

impl Artifact {
  /// Artifacts a family needs under a dialect.
  ///
  /// With a semantic template parameter, non-root families are typedefs of the root family and need nothing else.
  pub fn for_family(spec: &TypeSpec, dialect: &Dialect) -> &'static [Artifact] {
    if ClassGen::new(spec, dialect).is_parametrization() {
      &[Artifact::Parametrization]
    } else {
      &[Artifact::Declaration, Artifact::Implementation, Artifact::Instantiation]
    }
  }

  pub fn file_name(self, spec: &TypeSpec, dialect: &Dialect) -> String {
    let class = dialect.name(&spec.name);

    match self {
      Artifact::Declaration | Artifact::Parametrization => format!("{}.hpp", class),
      Artifact::Implementation => format!("{}Impl.hpp", class),
      Artifact::Instantiation => format!("{}.cpp", class),
    }
  }

  /// Include guard macro of header artifacts.
  pub fn guard(self, spec: &TypeSpec) -> Option<String> {
    let name = spec.name.to_uppercase();

    match self {
      Artifact::Declaration | Artifact::Parametrization => Some(format!("SH{}_HPP", name)),
      Artifact::Implementation => Some(format!("SH{}IMPL_HPP", name)),
      Artifact::Instantiation => None,
    }
  }

  fn includes(self, spec: &TypeSpec, dialect: &Dialect) -> Vec<String> {
    let class = dialect.name(&spec.name);

    match self {
      Artifact::Declaration => vec![format!("{}.hpp", dialect.name(&spec.parent))],
      Artifact::Parametrization => vec![format!("{}.hpp", dialect.name("Attrib"))],
      Artifact::Implementation if spec.kind == FamilyKind::Root => {
        let mut headers = vec![format!("{}.hpp", class)];
        headers.extend(["Context", "Statement", "Debug"].iter().map(|h| format!("{}.hpp", dialect.name(h))));
        headers
      }

      Artifact::Implementation => vec![format!("{}.hpp", class)],
      Artifact::Instantiation => vec![format!("{}.hpp", class), format!("{}Impl.hpp", class)],
    }
  }
}

/// Write a complete artifact of `spec`.
///
/// `source` is what the warning banner names as the origin of the file.
pub fn write_artifact<W>(
  e: &mut Emitter<W>,
  artifact: Artifact,
  spec: &TypeSpec,
  dialect: &Dialect,
  source: &str,
) -> Result<(), fmt::Error>
where
  W: fmt::Write,
{
  info!(family = %spec.name, ?artifact, "generating artifact");

  let class = ClassGen::new(spec, dialect);
  let guard = artifact.guard(spec);

  e.banner(source, dialect.license)?;

  if let Some(ref guard) = guard {
    e.guard(guard)?;
  }

  for header in artifact.includes(spec, dialect) {
    e.include(&header)?;
  }

  e.namespace(&dialect.namespace)?;

  match artifact {
    Artifact::Declaration => cpp::write_declarations(e, &class.declare_all())?,
    Artifact::Parametrization => cpp::write_parametrization(e, &class.declare_parametrization())?,

    Artifact::Implementation => {
      for def in ImplGen::from(class).implement_all() {
        cpp::write_definition(e, &def)?;
      }
    }

    Artifact::Instantiation => {
      cpp::write_instantiations(e, &instantiate(spec, dialect))?;
      e.blank()?;
    }
  }

  e.end_namespace(&dialect.namespace)?;

  if let Some(ref guard) = guard {
    e.end_guard(guard)?;
  }

  Ok(())
}

/// Write a complete artifact to a [`String`].
pub fn artifact_to_str(
  artifact: Artifact,
  spec: &TypeSpec,
  dialect: &Dialect,
  source: &str,
) -> Result<String, fmt::Error> {
  let mut e = Emitter::buffer();
  write_artifact(&mut e, artifact, spec, dialect, source)?;
  Ok(e.into_inner())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn current_color_is_a_parametrization() {
    let dialect = Dialect::current();
    let spec = TypeSpec::semantic(&dialect, "Color", "color", "COLOR");

    assert_eq!(Artifact::for_family(&spec, &dialect), [Artifact::Parametrization]);
    assert_eq!(Artifact::for_family(&TypeSpec::root(), &dialect).len(), 3);

    let out = artifact_to_str(Artifact::Parametrization, &spec, &dialect, "shgen decl Color").unwrap();

    assert!(out.contains(
      "#ifndef SHCOLOR_HPP\n#define SHCOLOR_HPP\n\n#include \"Attrib.hpp\"\nnamespace SH {\n\n/** An n-color.\n */\n\n"
    ));
    assert!(out.contains("typedef Attrib<4, SH_CONST, unsigned int, SH_COLOR> ConstColor4ui;\n"));
    assert!(out.ends_with("} // namespace SH\n\n#endif // SHCOLOR_HPP\n"));
  }

  #[test]
  fn legacy_files() {
    let dialect = Dialect::legacy();
    let spec = TypeSpec::semantic(&dialect, "Normal", "normal", "NORMAL").with_parent("Vector");

    assert_eq!(Artifact::Implementation.file_name(&spec, &dialect), "ShNormalImpl.hpp");
    assert_eq!(Artifact::Implementation.guard(&spec).as_deref(), Some("SHNORMALIMPL_HPP"));

    let decl = artifact_to_str(Artifact::Declaration, &spec, &dialect, "shgen decl Normal").unwrap();
    assert!(decl.contains("University of Waterloo"));
    assert!(decl.contains("#include \"ShVector.hpp\"\n"));
    assert!(decl.contains("class ShNormal : public ShVector<N, Binding, T, Swizzled> {\n"));

    let cpp = artifact_to_str(Artifact::Instantiation, &spec, &dialect, "shgen instantiate Normal").unwrap();
    assert!(cpp.contains("#include \"ShNormal.hpp\"\n#include \"ShNormalImpl.hpp\"\n"));
    assert!(!cpp.contains("#ifndef"));
    assert!(cpp.contains("template class ShNormal<4, SH_CONST, float, true>;\n"));
  }

  #[test]
  fn root_implementation_includes() {
    let dialect = Dialect::current();
    let out = artifact_to_str(Artifact::Implementation, &TypeSpec::root(), &dialect, "shgen impl Attrib").unwrap();

    assert!(out.contains(
      "#include \"Attrib.hpp\"\n#include \"Context.hpp\"\n#include \"Statement.hpp\"\n#include \"Debug.hpp\"\n"
    ));
    assert!(out.contains("shASN(*this, other);"));
  }
}
