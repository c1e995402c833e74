//! Out-of-class member definitions of a family.
//!
//! [`ImplGen`] walks the very same member lists as [`ClassGen`] and attaches a body to each of them:
//!
//! - Semantic families forward constructor arguments to `ParentType` and tag the node with their semantic.
//! - The root family allocates a fresh variable node. Constructors promoting host scalars write them straight into
//!   the node when the binding is constant, and go through a constant temporary otherwise.
//! - Assignments and compound assignments forward to the parent operator and return `*this`.
//! - Swizzles compose the requested indices with the receiver’s swizzle and keep its negation flag; negation aliases
//!   the receiver with the flag inverted.

use crate::{
  decl::{ClassGen, Ctor, Swizzle},
  ir::{FunctionDef, Signature, Stmt},
  types::{Binding, FamilyKind, Size},
};
use tracing::debug;

/// Definition generator of one family.
#[derive(Clone, Copy, Debug)]
pub struct ImplGen<'a> {
  class: ClassGen<'a>,
}

impl<'a> From<ClassGen<'a>> for ImplGen<'a> {
  fn from(class: ClassGen<'a>) -> Self {
    Self { class }
  }
}

impl<'a> ImplGen<'a> {
  fn def(&self, size: Size, sig: Signature, init: Vec<String>, body: Vec<Stmt>) -> FunctionDef {
    FunctionDef {
      class_template: self.class.class_template(size, false),
      owner: self.class.own_type(size),
      sig,
      init,
      body,
    }
  }

  fn arg_names(sig: &Signature) -> String {
    sig.params.iter().map(|p| p.name.as_str()).collect::<Vec<_>>().join(", ")
  }

  /// Constructor of a family refining another one.
  fn delegating_ctor(&self, size: Size, sig: Signature) -> FunctionDef {
    let d = self.class.dialect;
    let init = if sig.params.is_empty() {
      Vec::new()
    } else {
      vec![format!("ParentType({})", Self::arg_names(&sig))]
    };
    let body = vec![Stmt::line(format!(
      "{}->specialType({});",
      d.member("m_node"),
      d.enumerator(&self.class.spec.tag)
    ))];

    self.def(size, sig, init, body)
  }

  /// Constructor of the root family.
  fn root_ctor(&self, ctor: Ctor, size: Size, sig: Signature) -> FunctionDef {
    let d = self.class.dialect;
    let s = size.var();
    let base = self.class.generic(&s, "T");
    let fresh = format!(
      "{}(new {}(Binding, {}, {}<T>::value_type, {}))",
      base,
      d.name("VariableNode"),
      s,
      d.name("StorageTypeInfo"),
      self.class.semantic()
    );
    let is_const = format!("Binding == {}", d.binding(Binding::Const));
    let constant = |n: &str| self.class.role_type(n, Binding::Const);
    let n = size.arity().unwrap_or(0);
    let components = |f: &dyn Fn(usize) -> String| (0..n).map(f).collect::<Vec<_>>().join(", ");

    let (init, body) = match ctor {
      Ctor::Default => (vec![fresh], Vec::new()),

      Ctor::FromGeneric | Ctor::Copy | Ctor::FromFamily => {
        (vec![fresh], vec![Stmt::line("shASN(*this, other);")])
      }

      Ctor::Node => (vec![format!("{}(node, swizzle, neg)", base)], Vec::new()),

      Ctor::Array => (
        vec![fresh],
        vec![Stmt::If {
          cond: is_const,
          then: vec![Stmt::For {
            header: format!("int i = 0; i < {}; i++", s),
            body: vec![Stmt::line(format!("{}(i, data[i]);", d.member("setValue")))],
          }],
          otherwise: vec![Stmt::line(format!("(*this) = {}(data);", constant(&s)))],
        }],
      ),

      Ctor::Scalars => {
        let args = components(&|i| format!("s{}", i));
        let then = if n > 1 {
          vec![
            Stmt::line(format!("{} data[{}] = {{{}}};", d.scalar(), n, args)),
            Stmt::line(format!("{}(data);", d.member("setValues"))),
          ]
        } else {
          vec![Stmt::line(format!("{}(0, s0);", d.member("setValue")))]
        };

        (
          vec![fresh],
          vec![Stmt::If {
            cond: is_const,
            then,
            otherwise: vec![Stmt::line(format!("(*this) = {}({});", constant(&s), args))],
          }],
        )
      }

      Ctor::Components => {
        let mut then: Vec<Stmt> = (0..n)
          .map(|i| Stmt::line(format!("{}(s{}.hasValues());", d.enumerator("DEBUG_ASSERT"), i)))
          .collect();
        then.push(Stmt::line(format!(
          "{} data[{}] = {{{}}};",
          d.scalar(),
          n,
          components(&|i| format!("s{}.getValue(0)", i))
        )));
        then.push(Stmt::line(format!("{}(data);", d.member("setValues"))));

        let otherwise = (0..n).map(|i| Stmt::line(format!("(*this)[{}] = s{};", i, i))).collect();

        (
          vec![fresh],
          vec![Stmt::If {
            cond: is_const,
            then,
            otherwise,
          }],
        )
      }
    };

    self.def(size, sig, init, body)
  }

  /// Body forwarding to the parent operator and returning the receiver.
  fn forwarding(&self, size: Size, sig: Signature) -> FunctionDef {
    let body = vec![
      Stmt::line(format!("ParentType::{}({});", sig.name, Self::arg_names(&sig))),
      Stmt::line("return *this;"),
    ];

    self.def(size, sig, Vec::new(), body)
  }

  fn swizzle(&self, size: Size, kind: Swizzle, sig: Signature) -> FunctionDef {
    let d = self.class.dialect;
    let (node, swiz, neg) = (d.member("m_node"), d.member("m_swizzle"), d.member("m_neg"));
    let ret = sig.ret.clone().unwrap_or_default();

    let body = match kind {
      Swizzle::Select(_) | Swizzle::Index => format!(
        "return {}({}, {} * {}({}, {}), {});",
        ret,
        node,
        swiz,
        d.name("Swizzle"),
        size,
        Self::arg_names(&sig),
        neg
      ),

      Swizzle::Dynamic => format!(
        "return {}({}, {} * {}({}, N2, indices), {});",
        ret,
        node,
        swiz,
        d.name("Swizzle"),
        size,
        neg
      ),

      Swizzle::Negate => format!("return {}({}, {}, !{});", ret, node, swiz, neg),
    };

    self.def(size, sig, Vec::new(), vec![Stmt::Line(body)])
  }

  /// Definitions of every member declared for `size`, in declaration order.
  pub fn implement(&self, size: Size) -> Vec<FunctionDef> {
    debug!(family = %self.class.spec.name, %size, "implementing class");

    let mut defs = Vec::new();

    for (ctor, sig) in self.class.constructors(size) {
      defs.push(match self.class.spec.kind {
        FamilyKind::Root => self.root_ctor(ctor, size, sig),
        FamilyKind::Semantic => self.delegating_ctor(size, sig),
      });
    }

    defs.push(self.def(size, self.class.destructor(), Vec::new(), Vec::new()));

    for sig in self.class.assignments(size).into_iter().chain(self.class.modifying(size)) {
      defs.push(self.forwarding(size, sig));
    }

    for (kind, sig) in self.class.swizzles(size) {
      defs.push(self.swizzle(size, kind, sig));
    }

    defs
  }

  /// Definitions for the primary template, then for every fixed size.
  pub fn implement_all(&self) -> Vec<FunctionDef> {
    std::iter::once(Size::Generic)
      .chain(Size::FIXED)
      .flat_map(|size| self.implement(size))
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::{Dialect, TypeSpec};

  fn find<'d>(defs: &'d [FunctionDef], name: &str, arity: usize) -> &'d FunctionDef {
    defs
      .iter()
      .find(|d| d.sig.name == name && d.sig.params.len() == arity)
      .unwrap()
  }

  #[test]
  fn delegating_constructors_tag_the_node() {
    let dialect = Dialect::current();
    let spec = TypeSpec::semantic(&dialect, "Color", "color", "COLOR");
    let defs = ImplGen::from(ClassGen::new(&spec, &dialect)).implement(Size::D3);
    let scalars = defs
      .iter()
      .find(|d| {
        d.sig.name == "Color" && !d.sig.params.is_empty() && d.sig.params.iter().all(|p| p.ty == "host_type")
      })
      .unwrap();

    assert_eq!(scalars.sig.params.len(), 3);
    assert_eq!(scalars.init, ["ParentType(s0, s1, s2)"]);
    assert_eq!(scalars.body, [Stmt::line("this->m_node->specialType(SH_COLOR);")]);
    assert!(find(&defs, "Color", 0).init.is_empty());
    assert_eq!(find(&defs, "Color", 0).owner, "Color<3, Binding, T, Semantic, Swizzled>");
  }

  #[test]
  fn legacy_members_are_unqualified() {
    let dialect = Dialect::legacy();
    let spec = TypeSpec::semantic(&dialect, "Vector", "vector", "VECTOR");
    let defs = ImplGen::from(ClassGen::new(&spec, &dialect)).implement(Size::Generic);

    assert_eq!(find(&defs, "ShVector", 0).body, [Stmt::line("m_node->specialType(SH_VECTOR);")]);
  }

  #[test]
  fn root_scalar_constructor_branches_on_binding() {
    let dialect = Dialect::current();
    let spec = TypeSpec::root();
    let defs = ImplGen::from(ClassGen::new(&spec, &dialect)).implement(Size::D2);
    let scalars = find(&defs, "Attrib", 2);

    assert_eq!(
      scalars.init,
      ["Generic<2, T>(new VariableNode(Binding, 2, StorageTypeInfo<T>::value_type, Semantic))"]
    );
    assert_eq!(
      scalars.body,
      [Stmt::If {
        cond: "Binding == SH_CONST".to_owned(),
        then: vec![
          Stmt::line("host_type data[2] = {s0, s1};"),
          Stmt::line("this->setValues(data);"),
        ],
        otherwise: vec![Stmt::line("(*this) = Attrib<2, SH_CONST, T, Semantic>(s0, s1);")],
      }]
    );
  }

  #[test]
  fn forwarding_operators_return_receiver() {
    let dialect = Dialect::current();
    let spec = TypeSpec::semantic(&dialect, "Point", "point", "POINT");
    let defs = ImplGen::from(ClassGen::new(&spec, &dialect)).implement(Size::D1);
    let inc = find(&defs, "operator++", 0);

    assert_eq!(inc.sig.ret.as_deref(), Some("Point&"));
    assert_eq!(inc.body, [Stmt::line("ParentType::operator++();"), Stmt::line("return *this;")]);
  }

  #[test]
  fn swizzles_compose() {
    let dialect = Dialect::current();
    let spec = TypeSpec::semantic(&dialect, "Color", "color", "COLOR");
    let defs = ImplGen::from(ClassGen::new(&spec, &dialect)).implement(Size::Generic);

    assert_eq!(
      find(&defs, "operator()", 2).body,
      [Stmt::line(
        "return Color<2, Binding, T, Semantic, true>(this->m_node, this->m_swizzle * Swizzle(N, s0, s1), this->m_neg);"
      )]
    );
    assert_eq!(
      find(&defs, "operator-", 0).body,
      [Stmt::line(
        "return Color<N, Binding, T, Semantic, Swizzled>(this->m_node, this->m_swizzle, !this->m_neg);"
      )]
    );
  }

  #[test]
  fn every_declared_member_is_defined() {
    let dialect = Dialect::current();
    let spec = TypeSpec::semantic(&dialect, "Normal", "normal", "NORMAL").with_parent("Vector");
    let class = ClassGen::new(&spec, &dialect);
    let imp = ImplGen::from(class);

    for size in std::iter::once(Size::Generic).chain(Size::FIXED) {
      let decl = class.declare_sized(size);
      let declared = crate::ir::Category::PUBLIC
        .iter()
        .map(|&c| decl.functions(c).count())
        .sum::<usize>();

      assert_eq!(imp.implement(size).len(), declared);
    }
  }
}
