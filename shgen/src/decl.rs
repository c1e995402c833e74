//! Class declarations of a family.
//!
//! C++ partial specialization cannot spell “N scalar parameters” for a generic `N`, so every family is declared five
//! times: the size-polymorphic primary template and one specialization per arity. [`ClassGen`] performs that
//! unrolling and produces [`ClassDecl`] nodes, ready to be rendered by [`crate::writer::cpp`].

use crate::{
  ir::{
    Access, Category, ClassDecl, Declarations, Member, Param, Parametrization, Section, Signature,
    Typedef, TypedefBlock,
  },
  types::{Binding, Dialect, FamilyKind, Size, TypeSpec},
};
use tracing::debug;

/// Compound operators taking a same-size or single-component operand, in declaration order.
pub(crate) const COMPOUND_OPS: [&str; 5] = ["+=", "-=", "*=", "/=", "%="];

/// Compound operators taking a host scalar, in declaration order.
pub(crate) const SCALAR_COMPOUND_OPS: [&str; 5] = ["*=", "/=", "%=", "+=", "-="];

/// Constructor kinds of a family class.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Ctor {
  /// `Color()`.
  Default,

  /// Conversion from a generic operand of any element type.
  FromGeneric,

  /// Same-type copy.
  Copy,

  /// Copy from the same family with another element type.
  FromFamily,

  /// Aliasing constructor from a node, a swizzle and a negation flag.
  Node,

  /// `explicit Color(const host_type data[N])`.
  Array,

  /// One host scalar per component; fixed sizes only.
  Scalars,

  /// One single-component generic per component; sizes above one only.
  Components,
}

impl Ctor {
  pub const ALL: [Ctor; 8] = [
    Ctor::Default,
    Ctor::FromGeneric,
    Ctor::Copy,
    Ctor::FromFamily,
    Ctor::Node,
    Ctor::Array,
    Ctor::Scalars,
    Ctor::Components,
  ];
}

/// Swizzle accessor kinds.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Swizzle {
  /// `operator()` with as many indices as the result has components.
  Select(usize),

  /// `operator[]`.
  Index,

  /// `swiz<N2>(int indices[])`.
  Dynamic,

  /// Unary `operator-`.
  Negate,
}

/// Declaration generator of one family.
#[derive(Clone, Copy, Debug)]
pub struct ClassGen<'a> {
  pub(crate) spec: &'a TypeSpec,
  pub(crate) dialect: &'a Dialect,
}

impl<'a> ClassGen<'a> {
  pub fn new(spec: &'a TypeSpec, dialect: &'a Dialect) -> Self {
    Self { spec, dialect }
  }

  /// Class name, dialect prefix included.
  pub fn class_name(&self) -> String {
    self.dialect.name(&self.spec.name)
  }

  /// The family’s class with explicit template arguments.
  pub(crate) fn class_type(&self, size: &str, binding: &str, elem: &str, swizzled: &str) -> String {
    if self.dialect.semantic_param {
      format!("{}<{}, {}, {}, Semantic, {}>", self.class_name(), size, binding, elem, swizzled)
    } else {
      format!("{}<{}, {}, {}, {}>", self.class_name(), size, binding, elem, swizzled)
    }
  }

  /// The class being declared, i.e. all template parameters forwarded.
  pub(crate) fn own_type(&self, size: Size) -> String {
    self.class_type(&size.var(), "Binding", "T", "Swizzled")
  }

  /// The family’s class bound to `binding`, unswizzled.
  pub(crate) fn role_type(&self, size: &str, binding: Binding) -> String {
    let binding = self.dialect.binding(binding);

    if self.dialect.semantic_param {
      format!("{}<{}, {}, T, Semantic>", self.class_name(), size, binding)
    } else {
      format!("{}<{}, {}, T>", self.class_name(), size, binding)
    }
  }

  pub(crate) fn parent_type(&self, size: Size) -> String {
    format!("{}{}", self.dialect.name(&self.spec.parent), self.spec.parent_args_for(size))
  }

  /// Semantic value a node gets tagged with: the template parameter, or the family tag when there is none.
  pub(crate) fn semantic(&self) -> String {
    if self.dialect.semantic_param {
      "Semantic".to_owned()
    } else {
      self.dialect.enumerator(&self.spec.tag)
    }
  }

  pub(crate) fn generic(&self, size: &str, elem: &str) -> String {
    format!("{}<{}, {}>", self.dialect.name("Generic"), size, elem)
  }

  /// Member template introducing the operand element type, and that type.
  fn operand(&self) -> (Vec<String>, &'static str) {
    if self.dialect.mixed_operands {
      (vec!["typename T2".to_owned()], "T2")
    } else {
      (Vec::new(), "T")
    }
  }

  /// Template parameters of the class.
  ///
  /// `defaults` adds the default arguments; they only belong to the primary template declaration.
  pub(crate) fn class_template(&self, size: Size, defaults: bool) -> Vec<String> {
    let d = |default: &str| if defaults { format!("={}", default) } else { String::new() };
    let mut params = Vec::new();

    if size == Size::Generic {
      params.push("int N".to_owned());
    }

    params.push(format!("{} Binding", self.dialect.name("BindingType")));
    params.push(format!("typename T{}", d("float")));

    if self.dialect.semantic_param {
      params.push(format!(
        "{} Semantic{}",
        self.dialect.name("SemanticType"),
        d(&self.dialect.enumerator("ATTRIB"))
      ));
    }

    params.push(format!("bool Swizzled{}", d("false")));
    params
  }

  fn specialization(&self, size: Size) -> Option<Vec<String>> {
    size.arity().map(|n| {
      let mut args = vec![n.to_string(), "Binding".to_owned(), "T".to_owned()];

      if self.dialect.semantic_param {
        args.push("Semantic".to_owned());
      }

      args.push("Swizzled".to_owned());
      args
    })
  }

  /// Declaration of a constructor kind, if the size has it.
  pub fn constructor(&self, ctor: Ctor, size: Size) -> Option<Signature> {
    let name = self.class_name();
    let s = size.var();
    let scalar = self.dialect.scalar();
    let (tpl, t2) = self.operand();

    let sig = match ctor {
      Ctor::Default => Signature::ctor(name, Vec::new()),

      Ctor::FromGeneric => Signature::ctor(
        name,
        vec![Param::new(format!("const {}&", self.generic(&s, t2)), "other")],
      )
      .templated(tpl),

      Ctor::Copy => Signature::ctor(name, vec![Param::new(format!("const {}&", self.own_type(size)), "other")]),

      Ctor::FromFamily if self.dialect.mixed_operands => Signature::ctor(
        name,
        vec![Param::new(
          format!("const {}&", self.class_type(&s, "Binding", t2, "Swizzled")),
          "other",
        )],
      )
      .templated(tpl),

      Ctor::FromFamily => return None,

      Ctor::Node => Signature::ctor(
        name,
        vec![
          Param::new(format!("const {}&", self.dialect.name("VariableNodePtr")), "node"),
          Param::new(format!("const {}&", self.dialect.name("Swizzle")), "swizzle"),
          Param::new("bool", "neg"),
        ],
      ),

      Ctor::Array => Signature::ctor(name, vec![Param::array(format!("const {}", scalar), "data", s)]).explicit(),

      Ctor::Scalars => {
        let n = size.arity()?;
        let params = (0..n).map(|i| Param::new(scalar, format!("s{}", i))).collect();
        Signature::ctor(name, params)
      }

      Ctor::Components => {
        let n = size.arity().filter(|&n| n > 1)?;
        let elem = |i: usize| {
          if self.dialect.mixed_operands {
            format!("T{}", i + 2)
          } else {
            "T".to_owned()
          }
        };
        let params = (0..n)
          .map(|i| Param::new(format!("const {}&", self.generic("1", &elem(i))), format!("s{}", i)))
          .collect();
        let tpl = if self.dialect.mixed_operands {
          (0..n).map(|i| format!("typename {}", elem(i))).collect()
        } else {
          Vec::new()
        };

        Signature::ctor(name, params).templated(tpl)
      }
    };

    Some(sig)
  }

  pub fn constructors(&self, size: Size) -> Vec<(Ctor, Signature)> {
    Ctor::ALL
      .iter()
      .filter_map(|&ctor| self.constructor(ctor, size).map(|sig| (ctor, sig)))
      .collect()
  }

  pub fn destructor(&self) -> Signature {
    Signature::ctor(format!("~{}", self.class_name()), Vec::new())
  }

  pub fn assignments(&self, size: Size) -> Vec<Signature> {
    let s = size.var();
    let ret = format!("{}&", self.class_name());
    let (tpl, t2) = self.operand();
    let mut sigs = vec![Signature::fun(
      &ret,
      "operator=",
      vec![Param::new(format!("const {}&", self.generic(&s, t2)), "other")],
    )
    .templated(tpl.clone())];

    if self.dialect.mixed_operands {
      sigs.push(
        Signature::fun(
          &ret,
          "operator=",
          vec![Param::new(
            format!("const {}&", self.class_type(&s, "Binding", t2, "Swizzled")),
            "other",
          )],
        )
        .templated(tpl),
      );
    }

    sigs.push(Signature::fun(
      &ret,
      "operator=",
      vec![Param::new(format!("const {}&", self.own_type(size)), "other")],
    ));

    if size.is_scalar() {
      sigs.push(Signature::fun(&ret, "operator=", vec![Param::new(self.dialect.scalar(), "other")]));
    }

    if self.dialect.increments {
      sigs.push(Signature::fun(
        &ret,
        "operator=",
        vec![Param::new(format!("const {}&", self.dialect.name("Program")), "prg")],
      ));
    }

    sigs
  }

  pub fn modifying(&self, size: Size) -> Vec<Signature> {
    let s = size.var();
    let ret = format!("{}&", self.class_name());
    let (tpl, t2) = self.operand();
    let mut sigs = Vec::new();

    if self.dialect.increments {
      sigs.push(Signature::fun(&ret, "operator++", Vec::new()));
      sigs.push(Signature::fun(&ret, "operator--", Vec::new()));
    }

    for op in COMPOUND_OPS {
      let right = Param::new(format!("const {}&", self.generic(&s, t2)), "right");
      sigs.push(Signature::fun(&ret, format!("operator{}", op), vec![right]).templated(tpl.clone()));
    }

    for op in SCALAR_COMPOUND_OPS {
      let right = Param::new(self.dialect.scalar(), "right");
      sigs.push(Signature::fun(&ret, format!("operator{}", op), vec![right]));
    }

    if !size.is_scalar() {
      for op in COMPOUND_OPS {
        let right = Param::new(format!("const {}&", self.generic("1", t2)), "right");
        sigs.push(Signature::fun(&ret, format!("operator{}", op), vec![right]).templated(tpl.clone()));
      }
    }

    sigs
  }

  pub fn swizzles(&self, size: Size) -> Vec<(Swizzle, Signature)> {
    let swizzled = |n: &str| self.class_type(n, "Binding", "T", "true");
    let mut sigs = Vec::new();

    for n in 1..=4 {
      let params = (0..n).map(|i| Param::new("int", format!("s{}", i))).collect();
      let sig = Signature::fun(swizzled(&n.to_string()), "operator()", params).constant();
      sigs.push((Swizzle::Select(n), sig));
    }

    sigs.push((
      Swizzle::Index,
      Signature::fun(swizzled("1"), "operator[]", vec![Param::new("int", "s0")]).constant(),
    ));
    sigs.push((
      Swizzle::Dynamic,
      Signature::fun(swizzled("N2"), "swiz", vec![Param::array("int", "indices", "")])
        .templated(vec!["int N2".to_owned()])
        .constant(),
    ));
    sigs.push((
      Swizzle::Negate,
      Signature::fun(self.own_type(size), "operator-", Vec::new()).constant(),
    ));

    sigs
  }

  fn constants(&self, size: Size) -> Vec<Member> {
    let typedef = |target: String, alias: &str| Member::Typedef(Typedef::new(target, alias));
    let constant = |ty: String, name: &str, value: String| Member::Constant {
      ty,
      name: name.to_owned(),
      value,
    };
    let mut members = Vec::new();

    if self.dialect.host_type {
      members.push(typedef("T".to_owned(), "storage_type"));
      members.push(typedef(format!("typename {}<T>::type", self.dialect.name("HostType")), "host_type"));
      members.push(typedef(format!("typename {}<T>::type", self.dialect.name("MemType")), "mem_type"));
    } else {
      members.push(typedef("T".to_owned(), "ValueType"));
      members.push(constant("int".to_owned(), "typesize", size.var()));
    }

    members.push(constant(self.dialect.name("BindingType"), "binding_type", "Binding".to_owned()));
    members.push(constant(self.dialect.name("SemanticType"), "semantic_type", self.semantic()));

    for binding in Binding::ALL {
      members.push(typedef(self.role_type(&size.var(), binding), binding.member_typedef()));
    }

    members
  }

  fn private_constants(&self, size: Size) -> Vec<Member> {
    vec![Member::Typedef(Typedef::new(self.parent_type(size), "ParentType"))]
  }

  fn class(&self, size: Size) -> ClassDecl {
    debug!(family = %self.spec.name, %size, "declaring class");

    let functions = |sigs: Vec<Signature>| -> Vec<Member> { sigs.into_iter().map(Member::Function).collect() };
    let public = |category: Category, members: Vec<Member>| Section {
      access: Access::Public,
      category,
      members,
    };
    let sections = vec![
      public(Category::Constants, self.constants(size)),
      public(
        Category::Constructors,
        functions(self.constructors(size).into_iter().map(|(_, sig)| sig).collect()),
      ),
      public(Category::Destructor, functions(vec![self.destructor()])),
      public(Category::Assignments, functions(self.assignments(size))),
      public(Category::Modifying, functions(self.modifying(size))),
      public(
        Category::Swizzles,
        functions(self.swizzles(size).into_iter().map(|(_, sig)| sig).collect()),
      ),
      Section {
        access: Access::Private,
        category: Category::Constants,
        members: self.private_constants(size),
      },
    ];

    ClassDecl {
      size,
      template: self.class_template(size, size == Size::Generic),
      name: self.class_name(),
      specialization: self.specialization(size),
      base: self.parent_type(size),
      sections,
    }
  }

  /// The size-polymorphic primary template.
  pub fn declare(&self) -> ClassDecl {
    self.class(Size::Generic)
  }

  /// The partial specialization for a fixed size.
  ///
  /// [`Size::Generic`] yields the primary template, as [`ClassGen::declare`] does.
  pub fn declare_sized(&self, size: Size) -> ClassDecl {
    self.class(size)
  }

  /// Typedef aliases, one group per element type of the dialect.
  ///
  /// Every group holds one alias per fixed size and binding role, named `<Role><Family><Size><Code>`.
  pub fn typedefs(&self) -> TypedefBlock {
    let d = self.dialect;
    let groups = d
      .element_types
      .iter()
      .map(|elem| {
        let mut group = Vec::with_capacity(Size::FIXED.len() * Binding::ALL.len());

        for size in Size::FIXED {
          for binding in Binding::ALL {
            let target = if d.semantic_param {
              format!(
                "{}<{}, {}, {}, {}>",
                d.name("Attrib"),
                size,
                d.binding(binding),
                d.element_name(elem),
                d.enumerator(&self.spec.tag)
              )
            } else {
              format!("{}<{}, {}, {}>", self.class_name(), size, d.binding(binding), d.element_name(elem))
            };
            let alias = format!(
              "{}{}{}{}{}",
              d.prefix,
              binding.alias_prefix(),
              self.spec.name,
              size,
              elem.code
            );

            group.push(Typedef::new(target, alias));
          }
        }

        group
      })
      .collect();

    TypedefBlock { groups }
  }

  /// Primary template, the four specializations and the typedef block.
  pub fn declare_all(&self) -> Declarations {
    let [d1, d2, d3, d4] = Size::FIXED;

    Declarations {
      comment: self.spec.comment.clone(),
      generic: self.declare(),
      sized: [
        self.declare_sized(d1),
        self.declare_sized(d2),
        self.declare_sized(d3),
        self.declare_sized(d4),
      ],
      typedefs: self.typedefs(),
    }
  }

  /// Documentation and typedef block only.
  ///
  /// With a semantic template parameter, non-root families are plain aliases of the root family and need no class
  /// of their own.
  pub fn declare_parametrization(&self) -> Parametrization {
    Parametrization {
      comment: self.spec.comment.clone(),
      typedefs: self.typedefs(),
    }
  }

  /// Whether the family is better declared as a parametrization of the root family.
  pub fn is_parametrization(&self) -> bool {
    self.dialect.semantic_param && self.spec.kind == FamilyKind::Semantic
  }
}
