//! Vocabulary of the generated C++ type families.
//!
//! A family (Attrib, Color, Point…) is described by a [`TypeSpec`]. It gets generated for every [`Size`], every
//! [`Binding`] role and every [`ElementType`] of the [`Dialect`] in use.

use serde::Deserialize;
use std::fmt;

/// Component count of a generated class.
///
/// - [`Size::Generic`]: the size-polymorphic template, parameterized by `N`.
/// - [`Size::D1`] to [`Size::D4`]: partial specializations with a fixed arity.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Size {
  /// Size-polymorphic template.
  Generic,

  /// One component.
  D1,

  /// Two components.
  D2,

  /// Three components.
  D3,

  /// Four components.
  D4,
}

impl Size {
  /// Fixed sizes, in emission order.
  pub const FIXED: [Size; 4] = [Size::D1, Size::D2, Size::D3, Size::D4];

  /// Size with the given arity, if any.
  pub fn fixed(arity: usize) -> Option<Self> {
    match arity {
      1 => Some(Size::D1),
      2 => Some(Size::D2),
      3 => Some(Size::D3),
      4 => Some(Size::D4),
      _ => None,
    }
  }

  /// Arity of a fixed size; [`None`] for [`Size::Generic`].
  pub fn arity(self) -> Option<usize> {
    match self {
      Size::Generic => None,
      Size::D1 => Some(1),
      Size::D2 => Some(2),
      Size::D3 => Some(3),
      Size::D4 => Some(4),
    }
  }

  /// Whether this size is exactly one component.
  ///
  /// The generic size is *not* scalar: it gets the broadcast overloads of the multi-component sizes.
  pub fn is_scalar(self) -> bool {
    self == Size::D1
  }

  /// C++ expression of the size: `N` or the arity literal.
  pub fn var(self) -> String {
    self.arity().map_or_else(|| "N".to_owned(), |n| n.to_string())
  }
}

impl fmt::Display for Size {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(&self.var())
  }
}

/// Storage role of a value in a shader program.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Binding {
  Input,
  Output,
  InOut,
  Temp,
  Const,
}

impl Binding {
  /// All roles, in emission order.
  pub const ALL: [Binding; 5] = [
    Binding::Input,
    Binding::Output,
    Binding::InOut,
    Binding::Temp,
    Binding::Const,
  ];

  /// Enumerator name, without the dialect’s enum prefix.
  pub fn enumerator(self) -> &'static str {
    match self {
      Binding::Input => "INPUT",
      Binding::Output => "OUTPUT",
      Binding::InOut => "INOUT",
      Binding::Temp => "TEMP",
      Binding::Const => "CONST",
    }
  }

  /// Prefix of typedef aliases bound to that role. Temporaries get the bare family name.
  pub fn alias_prefix(self) -> &'static str {
    match self {
      Binding::Input => "Input",
      Binding::Output => "Output",
      Binding::InOut => "InOut",
      Binding::Temp => "",
      Binding::Const => "Const",
    }
  }

  /// Name of the class-level typedef rebinding the class to that role (`InputType`…).
  pub fn member_typedef(self) -> &'static str {
    match self {
      Binding::Input => "InputType",
      Binding::Output => "OutputType",
      Binding::InOut => "InOutType",
      Binding::Temp => "TempType",
      Binding::Const => "ConstType",
    }
  }
}

/// Element type a family can be instantiated with.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ElementType {
  /// Suffix code used in aliases and test names (`f`, `ui`, `fub`…).
  pub code: &'static str,

  /// C++ name, without dialect prefix.
  pub name: &'static str,

  /// Builtin C++ types never take the dialect prefix.
  pub builtin: bool,
}

const fn builtin(code: &'static str, name: &'static str) -> ElementType {
  ElementType {
    code,
    name,
    builtin: true,
  }
}

const fn library(code: &'static str, name: &'static str) -> ElementType {
  ElementType {
    code,
    name,
    builtin: false,
  }
}

/// Every element type known to the runtime.
pub const ELEMENT_TYPES: [ElementType; 15] = [
  library("h", "Half"),
  builtin("f", "float"),
  builtin("d", "double"),
  builtin("b", "char"),
  builtin("s", "short"),
  builtin("i", "int"),
  builtin("ub", "unsigned char"),
  builtin("us", "unsigned short"),
  builtin("ui", "unsigned int"),
  library("fb", "FracByte"),
  library("fs", "FracShort"),
  library("fi", "FracInt"),
  library("fub", "FracUByte"),
  library("fus", "FracUShort"),
  library("fui", "FracUInt"),
];

/// Element types the early revision generated typedefs and instantiations for.
pub const FLOAT_ONLY: [ElementType; 1] = [builtin("f", "float")];

/// Generator revision.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Revision {
  /// `Sh`-prefixed classes, single element type operands, float-only tables.
  Legacy,

  /// Unprefixed classes in the `SH` namespace, semantic template parameter, mixed-type operands.
  Current,
}

impl Default for Revision {
  fn default() -> Self {
    Revision::Current
  }
}

/// Feature flags selecting the flavour of C++ to generate.
///
/// [`Dialect::legacy`] and [`Dialect::current`] are the two presets; flags can be toggled individually afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Dialect {
  /// Prefix of every library class and type name (`Sh` or nothing).
  pub prefix: String,

  /// Prefix of binding and semantic enumerators and of library macros.
  pub enum_prefix: String,

  /// Namespace wrapping generated code.
  pub namespace: String,

  /// Classes take a `SemanticType Semantic` template parameter and aliases target the root family.
  pub semantic_param: bool,

  /// Operands may have another element type `T2` than the receiver.
  pub mixed_operands: bool,

  /// Scalars are `host_type` and classes expose `storage_type`/`host_type`/`mem_type`.
  pub host_type: bool,

  /// `operator++`, `operator--` and assignment from a program.
  pub increments: bool,

  /// Members of the dependent base are reached through `this->`.
  pub qualified_members: bool,

  /// Element types aliases and instantiations are generated for.
  pub element_types: &'static [ElementType],

  pub license: crate::emit::License,
}

impl Dialect {
  pub fn legacy() -> Self {
    Dialect {
      prefix: "Sh".to_owned(),
      enum_prefix: "SH_".to_owned(),
      namespace: "SH".to_owned(),
      semantic_param: false,
      mixed_operands: false,
      host_type: false,
      increments: false,
      qualified_members: false,
      element_types: &FLOAT_ONLY,
      license: crate::emit::License::Zlib,
    }
  }

  pub fn current() -> Self {
    Dialect {
      prefix: String::new(),
      enum_prefix: "SH_".to_owned(),
      namespace: "SH".to_owned(),
      semantic_param: true,
      mixed_operands: true,
      host_type: true,
      increments: true,
      qualified_members: true,
      element_types: &ELEMENT_TYPES,
      license: crate::emit::License::Lgpl,
    }
  }

  /// Library name: `base` with the dialect prefix.
  pub fn name(&self, base: &str) -> String {
    format!("{}{}", self.prefix, base)
  }

  /// Enumerator or macro name with the dialect’s enum prefix.
  pub fn enumerator(&self, base: &str) -> String {
    format!("{}{}", self.enum_prefix, base)
  }

  pub fn binding(&self, binding: Binding) -> String {
    self.enumerator(binding.enumerator())
  }

  /// C++ spelling of an element type.
  pub fn element_name(&self, ty: &ElementType) -> String {
    if ty.builtin {
      ty.name.to_owned()
    } else {
      self.name(ty.name)
    }
  }

  /// Element type with the given suffix code, looked up in the full table.
  pub fn element_by_code(&self, code: &str) -> Option<ElementType> {
    ELEMENT_TYPES.iter().copied().find(|ty| ty.code == code)
  }

  /// Type of host scalars handed to constructors and operators.
  pub fn scalar(&self) -> &'static str {
    if self.host_type {
      "host_type"
    } else {
      "T"
    }
  }

  /// Access path to a member of the dependent base (`this->m_node` or `m_node`).
  pub fn member(&self, name: &str) -> String {
    if self.qualified_members {
      format!("this->{}", name)
    } else {
      name.to_owned()
    }
  }
}

impl From<Revision> for Dialect {
  fn from(revision: Revision) -> Self {
    match revision {
      Revision::Legacy => Dialect::legacy(),
      Revision::Current => Dialect::current(),
    }
  }
}

/// Whether a family is the root of the hierarchy or a semantic refinement of another family.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FamilyKind {
  /// The root family allocates its own variable nodes.
  Root,

  /// Other families delegate to their parent and tag the node with their semantic.
  Semantic,
}

/// Description of one value-type family.
///
/// Names are stored without dialect prefix; the generators apply it.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeSpec {
  /// Family name, e.g. `Color`.
  pub name: String,

  /// Lowercase noun used in documentation, e.g. `color`.
  pub comment_name: String,

  /// Semantic enumerator without prefix, e.g. `COLOR`.
  pub tag: String,

  /// Parent family name, without prefix.
  pub parent: String,

  /// Parent template arguments, angle brackets included; `N` stands for the size.
  pub parent_args: String,

  /// Doxygen text of the family.
  pub comment: String,

  pub kind: FamilyKind,
}

impl TypeSpec {
  /// A family refining `Attrib`.
  pub fn semantic(dialect: &Dialect, name: &str, comment_name: &str, tag: &str) -> Self {
    let parent_args = if dialect.semantic_param {
      "<N, Binding, T, Semantic, Swizzled>"
    } else {
      "<N, Binding, T, Swizzled>"
    };

    TypeSpec {
      name: name.to_owned(),
      comment_name: comment_name.to_owned(),
      tag: tag.to_owned(),
      parent: "Attrib".to_owned(),
      parent_args: parent_args.to_owned(),
      comment: format!("An n-{}.\n", comment_name),
      kind: FamilyKind::Semantic,
    }
  }

  /// The `Attrib` root family, built on top of `Generic`.
  pub fn root() -> Self {
    TypeSpec {
      name: "Attrib".to_owned(),
      comment_name: "attribute".to_owned(),
      tag: "ATTRIB".to_owned(),
      parent: "Generic".to_owned(),
      parent_args: "<N, T>".to_owned(),
      comment: "A generic attribute (or parameter) holding N values.\n\n\
                Every semantic family derives from it; it owns the variable\n\
                node the other families tag."
        .to_owned(),
      kind: FamilyKind::Root,
    }
  }

  /// Reparent the family.
  pub fn with_parent(mut self, parent: &str) -> Self {
    self.parent = parent.to_owned();
    self
  }

  pub fn with_comment(mut self, comment: &str) -> Self {
    self.comment = comment.to_owned();
    self
  }

  /// Parent template arguments with `N` replaced by `size`.
  pub fn parent_args_for(&self, size: Size) -> String {
    let inner = self.parent_args.trim().trim_start_matches('<').trim_end_matches('>');
    let args: Vec<String> = inner
      .split(',')
      .map(str::trim)
      .map(|arg| if arg == "N" { size.var() } else { arg.to_owned() })
      .collect();

    format!("<{}>", args.join(", "))
  }
}

/// Families generated by default, root first.
pub fn standard_families(dialect: &Dialect) -> Vec<TypeSpec> {
  vec![
    TypeSpec::root(),
    TypeSpec::semantic(dialect, "Color", "color", "COLOR"),
    TypeSpec::semantic(dialect, "Point", "point", "POINT"),
    TypeSpec::semantic(dialect, "Position", "position", "POSITION").with_parent("Point"),
    TypeSpec::semantic(dialect, "Vector", "vector", "VECTOR"),
    TypeSpec::semantic(dialect, "Normal", "normal", "NORMAL").with_parent("Vector"),
    TypeSpec::semantic(dialect, "TexCoord", "texture coordinate", "TEXCOORD"),
  ]
}
