//! Structured representation of the generated C++.
//!
//! Generators build these nodes; [`crate::writer::cpp`] turns them into text. Keeping both apart allows to check what
//! a class declares without parsing C++.

use crate::types::Size;

/// Access specifier of a class section.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Access {
  Public,
  Private,
}

/// Kind of members a section groups.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Category {
  /// Member typedefs and static constants.
  Constants,
  Constructors,
  Destructor,
  Assignments,
  /// Compound assignments, increments and decrements.
  Modifying,
  /// Swizzle accessors and negation.
  Swizzles,
}

impl Category {
  /// Public categories every class declares, in order.
  pub const PUBLIC: [Category; 6] = [
    Category::Constants,
    Category::Constructors,
    Category::Destructor,
    Category::Assignments,
    Category::Modifying,
    Category::Swizzles,
  ];
}

/// A function parameter.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Param {
  pub ty: String,
  pub name: String,

  /// Array extent written after the name, e.g. `N` in `data[N]`.
  pub extent: Option<String>,
}

impl Param {
  pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
    Param {
      ty: ty.into(),
      name: name.into(),
      extent: None,
    }
  }

  pub fn array(ty: impl Into<String>, name: impl Into<String>, extent: impl Into<String>) -> Self {
    Param {
      ty: ty.into(),
      name: name.into(),
      extent: Some(extent.into()),
    }
  }
}

/// Declaration of a member function, constructor or operator.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Signature {
  /// Template parameters of the member itself (`typename T2`), empty when not a template.
  pub template: Vec<String>,

  pub explicit: bool,

  /// Return type; [`None`] for constructors and destructors.
  pub ret: Option<String>,

  pub name: String,
  pub params: Vec<Param>,
  pub is_const: bool,
}

impl Signature {
  /// A constructor or destructor.
  pub fn ctor(name: impl Into<String>, params: Vec<Param>) -> Self {
    Signature {
      template: Vec::new(),
      explicit: false,
      ret: None,
      name: name.into(),
      params,
      is_const: false,
    }
  }

  /// A function returning `ret`.
  pub fn fun(ret: impl Into<String>, name: impl Into<String>, params: Vec<Param>) -> Self {
    Signature {
      ret: Some(ret.into()),
      ..Signature::ctor(name, params)
    }
  }

  pub fn templated(mut self, template: Vec<String>) -> Self {
    self.template = template;
    self
  }

  pub fn explicit(mut self) -> Self {
    self.explicit = true;
    self
  }

  pub fn constant(mut self) -> Self {
    self.is_const = true;
    self
  }
}

/// A `typedef <target> <alias>;`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Typedef {
  pub target: String,
  pub alias: String,
}

impl Typedef {
  pub fn new(target: impl Into<String>, alias: impl Into<String>) -> Self {
    Typedef {
      target: target.into(),
      alias: alias.into(),
    }
  }
}

/// A member of a class declaration.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Member {
  Typedef(Typedef),

  /// `static const <ty> <name> = <value>;`
  Constant { ty: String, name: String, value: String },

  Function(Signature),
}

/// A run of members sharing an access specifier and a category.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Section {
  pub access: Access,
  pub category: Category,
  pub members: Vec<Member>,
}

/// A class template declaration, either the size-polymorphic template or one of its partial specializations.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ClassDecl {
  pub size: Size,

  /// Template parameters, defaults included.
  pub template: Vec<String>,

  pub name: String,

  /// Arguments of a partial specialization; [`None`] for the primary template.
  pub specialization: Option<Vec<String>>,

  /// Public base class.
  pub base: String,

  pub sections: Vec<Section>,
}

impl ClassDecl {
  /// Member functions of a given category.
  pub fn functions(&self, category: Category) -> impl Iterator<Item = &Signature> + '_ {
    self
      .sections
      .iter()
      .filter(move |s| s.category == category)
      .flat_map(|s| &s.members)
      .filter_map(|m| match m {
        Member::Function(sig) => Some(sig),
        _ => None,
      })
  }

  /// Categories of the public sections, in declaration order.
  pub fn public_categories(&self) -> Vec<Category> {
    self
      .sections
      .iter()
      .filter(|s| s.access == Access::Public)
      .map(|s| s.category)
      .collect()
  }
}

/// Typedef aliases of a family, grouped by element type.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct TypedefBlock {
  pub groups: Vec<Vec<Typedef>>,
}

impl TypedefBlock {
  pub fn len(&self) -> usize {
    self.groups.iter().map(Vec::len).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn iter(&self) -> impl Iterator<Item = &Typedef> + '_ {
    self.groups.iter().flatten()
  }
}

/// Everything a declaration header holds for one family.
///
/// The primary template, the four specializations and the typedef block always come together, in that order.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Declarations {
  pub comment: String,
  pub generic: ClassDecl,
  pub sized: [ClassDecl; 4],
  pub typedefs: TypedefBlock,
}

impl Declarations {
  /// Every class declaration, in emission order.
  pub fn classes(&self) -> impl Iterator<Item = &ClassDecl> + '_ {
    std::iter::once(&self.generic).chain(self.sized.iter())
  }
}

/// Typedef-only header of a family whose classes are aliases of the root family.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Parametrization {
  pub comment: String,
  pub typedefs: TypedefBlock,
}

/// A statement of a function body.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Stmt {
  /// A single line, terminator included.
  Line(String),

  /// `if (cond) { … } else { … }`; the else branch is omitted when empty.
  If {
    cond: String,
    then: Vec<Stmt>,
    otherwise: Vec<Stmt>,
  },

  /// `for (init; cond; step) { … }`
  For { header: String, body: Vec<Stmt> },
}

impl Stmt {
  pub fn line(text: impl Into<String>) -> Self {
    Stmt::Line(text.into())
  }
}

/// Out-of-class definition of a member of a class template.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct FunctionDef {
  /// Template parameters of the enclosing class.
  pub class_template: Vec<String>,

  /// Qualified owner, e.g. `Color<N, Binding, T, Semantic, Swizzled>`.
  pub owner: String,

  /// Signature as declared in the class; its template parameters become a second `template<…>` line.
  pub sig: Signature,

  /// Member initializer list.
  pub init: Vec<String>,

  pub body: Vec<Stmt>,
}

/// An explicit instantiation `template class <class><args>;`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Instantiation {
  pub class: String,
  pub args: Vec<String>,
}
