use shgen::{
  artifact::{artifact_to_str, Artifact},
  config::Config,
  decl::ClassGen,
  implement::ImplGen,
  instantiate::instantiate,
  ir::Category,
  types::{standard_families, Dialect, Size, TypeSpec},
  writer::cpp,
};

#[test]
fn generation_is_deterministic() {
  for dialect in [Dialect::legacy(), Dialect::current()] {
    for spec in standard_families(&dialect) {
      for &artifact in Artifact::for_family(&spec, &dialect) {
        let a = artifact_to_str(artifact, &spec, &dialect, "shgen all").unwrap();
        let b = artifact_to_str(artifact, &spec, &dialect, "shgen all").unwrap();

        assert_eq!(a, b);
      }
    }
  }
}

#[test]
fn one_generic_and_four_sized_classes() {
  let dialect = Dialect::legacy();
  let spec = TypeSpec::semantic(&dialect, "Point", "point", "POINT");
  let decls = ClassGen::new(&spec, &dialect).declare_all();
  let classes: Vec<_> = decls.classes().collect();

  assert_eq!(classes.len(), 5);
  assert_eq!(classes[0].size, Size::Generic);
  assert!(classes[0].specialization.is_none());

  for (class, size) in classes[1..].iter().zip(Size::FIXED) {
    assert_eq!(class.size, size);
    assert!(class.specialization.is_some());
    assert_eq!(class.public_categories(), Category::PUBLIC);
  }
}

#[test]
fn scalar_overloads_depend_on_arity() {
  let dialect = Dialect::current();
  let spec = TypeSpec::semantic(&dialect, "Vector", "vector", "VECTOR");
  let class = ClassGen::new(&spec, &dialect);
  let broadcast = |size| {
    class
      .modifying(size)
      .into_iter()
      .filter(|sig| sig.params.iter().any(|p| p.ty.contains("Generic<1, T2>")))
      .count()
  };
  let host_assign = |size| {
    class
      .assignments(size)
      .into_iter()
      .filter(|sig| sig.params.iter().any(|p| p.ty == "host_type"))
      .count()
  };

  assert_eq!(host_assign(Size::D1), 1);
  assert_eq!(broadcast(Size::D1), 0);

  for size in [Size::Generic, Size::D2, Size::D3, Size::D4] {
    assert_eq!(host_assign(size), 0);
    assert_eq!(broadcast(size), 5);
  }
}

#[test]
fn current_typedef_table() {
  let dialect = Dialect::current();
  let spec = TypeSpec::semantic(&dialect, "Color", "color", "COLOR");
  let typedefs = ClassGen::new(&spec, &dialect).typedefs();

  assert_eq!(typedefs.groups.len(), 15);
  assert_eq!(typedefs.len(), 300);
  assert!(typedefs
    .iter()
    .any(|t| t.alias == "InputColor3f" && t.target == "Attrib<3, SH_INPUT, float, SH_COLOR>"));
  assert!(typedefs
    .iter()
    .any(|t| t.alias == "ConstColor1fui" && t.target == "Attrib<1, SH_CONST, FracUInt, SH_COLOR>"));
}

#[test]
fn legacy_family_is_complete() {
  let dialect = Dialect::legacy();
  let spec = TypeSpec::semantic(&dialect, "TexCoord", "texture coordinate", "TEXCOORD");

  assert_eq!(Artifact::for_family(&spec, &dialect).len(), 3);

  let decl = artifact_to_str(Artifact::Declaration, &spec, &dialect, "shgen decl TexCoord").unwrap();
  let body = cpp::write_declarations_to_str(&ClassGen::new(&spec, &dialect).declare_all()).unwrap();
  assert!(decl.contains("#ifndef SHTEXCOORD_HPP\n"));
  assert!(decl.contains(&body));
  assert!(decl.contains("typedef ShTexCoord<2, SH_OUTPUT, float> ShOutputTexCoord2f;\n"));

  let defs = ImplGen::from(ClassGen::new(&spec, &dialect)).implement_all();
  assert!(defs.iter().all(|d| d.owner.starts_with("ShTexCoord<")));

  // float only: every fixed size and binding, swizzled or not
  let insts = instantiate(&spec, &dialect);
  assert_eq!(insts.len(), 4 * 5 * 2);
  assert!(insts.iter().all(|i| i.class == "ShTexCoord"));
}

#[test]
fn configured_family_generates() {
  let config: Config = toml::from_str(
    r#"
[generator]
revision = "legacy"

[[family]]
name = "Tangent"
tag = "VECTOR"
parent = "Vector"
"#,
  )
  .unwrap();
  let dialect = config.dialect(None);
  let spec = config.family(&dialect, "Tangent").unwrap();
  let decl = artifact_to_str(Artifact::Declaration, &spec, &dialect, "shgen decl Tangent").unwrap();

  assert!(decl.contains("#include \"ShVector.hpp\"\n"));
  assert!(decl.contains("class ShTangent : public ShVector<N, Binding, T, Swizzled> {\n"));
  assert!(config.family(&dialect, "Color").is_err());
}
