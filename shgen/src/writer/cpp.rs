//! C++ writers.

use crate::{
  emit::Emitter,
  ir::{
    Access, ClassDecl, Declarations, FunctionDef, Instantiation, Member, Param, Parametrization,
    Signature, Stmt, TypedefBlock,
  },
};
use std::fmt;

/// Write [`Declarations`] to a [`String`].
pub fn write_declarations_to_str(decls: &Declarations) -> Result<String, fmt::Error> {
  let mut e = Emitter::buffer();
  write_declarations(&mut e, decls)?;
  Ok(e.into_inner())
}

/// Write the comment, the primary template, its specializations and the typedef block of a family.
pub fn write_declarations<W>(e: &mut Emitter<W>, decls: &Declarations) -> Result<(), fmt::Error>
where
  W: fmt::Write,
{
  e.doc_comment(&decls.comment)?;

  for class in decls.classes() {
    write_class(e, class)?;
  }

  write_typedefs(e, &decls.typedefs)
}

pub fn write_parametrization<W>(e: &mut Emitter<W>, param: &Parametrization) -> Result<(), fmt::Error>
where
  W: fmt::Write,
{
  e.doc_comment(&param.comment)?;
  e.blank()?;
  write_typedefs(e, &param.typedefs)
}

fn write_access<W>(e: &mut Emitter<W>, access: Access) -> Result<(), fmt::Error>
where
  W: fmt::Write,
{
  match access {
    Access::Public => e.emit("public:"),
    Access::Private => e.emit("private:"),
  }
}

/// Write a class declaration.
pub fn write_class<W>(e: &mut Emitter<W>, class: &ClassDecl) -> Result<(), fmt::Error>
where
  W: fmt::Write,
{
  e.emit(format!("template<{}>", class.template.join(", ")))?;

  match &class.specialization {
    Some(args) => e.emit(format!("class {}<{}> : public {} {{", class.name, args.join(", "), class.base))?,
    None => e.emit(format!("class {} : public {} {{", class.name, class.base))?,
  }

  let mut access = None;

  for (i, section) in class.sections.iter().enumerate() {
    if access != Some(section.access) {
      write_access(e, section.access)?;
      access = Some(section.access);
    } else if i > 0 {
      e.blank()?;
    }

    e.increase_indent();
    for member in &section.members {
      write_member(e, member)?;
    }
    e.decrease_indent();
  }

  e.emit("};")?;
  e.blank()
}

fn write_member<W>(e: &mut Emitter<W>, member: &Member) -> Result<(), fmt::Error>
where
  W: fmt::Write,
{
  match member {
    Member::Typedef(typedef) => e.emit(format!("typedef {} {};", typedef.target, typedef.alias)),
    Member::Constant { ty, name, value } => e.emit(format!("static const {} {} = {};", ty, name, value)),
    Member::Function(sig) => write_declaration(e, sig),
  }
}

fn write_params(params: &[Param]) -> String {
  params
    .iter()
    .map(|p| match &p.extent {
      Some(extent) => format!("{} {}[{}]", p.ty, p.name, extent),
      None => format!("{} {}", p.ty, p.name),
    })
    .collect::<Vec<_>>()
    .join(", ")
}

/// Write a member declaration, ended by `;`.
fn write_declaration<W>(e: &mut Emitter<W>, sig: &Signature) -> Result<(), fmt::Error>
where
  W: fmt::Write,
{
  if !sig.template.is_empty() {
    e.emit(format!("template<{}>", sig.template.join(", ")))?;
  }

  let mut line = String::new();

  if sig.explicit {
    line.push_str("explicit ");
  }

  if let Some(ref ret) = sig.ret {
    line.push_str(ret);
    line.push(' ');
  }

  line.push_str(&format!("{}({})", sig.name, write_params(&sig.params)));

  if sig.is_const {
    line.push_str(" const");
  }

  line.push(';');
  e.emit(line)
}

/// Write the typedef block, groups separated by two empty lines.
pub fn write_typedefs<W>(e: &mut Emitter<W>, block: &TypedefBlock) -> Result<(), fmt::Error>
where
  W: fmt::Write,
{
  for group in &block.groups {
    for typedef in group {
      e.emit(format!("typedef {} {};", typedef.target, typedef.alias))?;
    }

    e.blank()?;
    e.blank()?;
  }

  Ok(())
}

/// Write [`FunctionDef`]s to a [`String`].
pub fn write_definitions_to_str(defs: &[FunctionDef]) -> Result<String, fmt::Error> {
  let mut e = Emitter::buffer();

  for def in defs {
    write_definition(&mut e, def)?;
  }

  Ok(e.into_inner())
}

/// Write the out-of-class definition of a member.
pub fn write_definition<W>(e: &mut Emitter<W>, def: &FunctionDef) -> Result<(), fmt::Error>
where
  W: fmt::Write,
{
  let sig = &def.sig;

  e.emit(format!("template<{}>", def.class_template.join(", ")))?;

  if !sig.template.is_empty() {
    e.emit(format!("template<{}>", sig.template.join(", ")))?;
  }

  if let Some(ref ret) = sig.ret {
    e.emit(ret)?;
  }

  let mut head = format!("{}::{}({})", def.owner, sig.name, write_params(&sig.params));

  if sig.is_const {
    head.push_str(" const");
  }

  e.emit(head)?;

  if !def.init.is_empty() {
    e.increase_indent();
    e.emit(format!(": {}", def.init.join(", ")))?;
    e.decrease_indent();
  }

  e.emit("{")?;
  e.increase_indent();
  write_stmts(e, &def.body)?;
  e.decrease_indent();
  e.emit("}")?;
  e.blank()
}

fn write_stmts<W>(e: &mut Emitter<W>, stmts: &[Stmt]) -> Result<(), fmt::Error>
where
  W: fmt::Write,
{
  for stmt in stmts {
    match stmt {
      Stmt::Line(line) => e.emit(line)?,

      Stmt::If { cond, then, otherwise } => {
        e.emit(format!("if ({}) {{", cond))?;
        e.increase_indent();
        write_stmts(e, then)?;
        e.decrease_indent();

        if !otherwise.is_empty() {
          e.emit("} else {")?;
          e.increase_indent();
          write_stmts(e, otherwise)?;
          e.decrease_indent();
        }

        e.emit("}")?;
      }

      Stmt::For { header, body } => {
        e.emit(format!("for ({}) {{", header))?;
        e.increase_indent();
        write_stmts(e, body)?;
        e.decrease_indent();
        e.emit("}")?;
      }
    }
  }

  Ok(())
}

pub fn write_instantiations<W>(e: &mut Emitter<W>, insts: &[Instantiation]) -> Result<(), fmt::Error>
where
  W: fmt::Write,
{
  for inst in insts {
    e.emit(format!("template class {}<{}>;", inst.class, inst.args.join(", ")))?;
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    decl::ClassGen,
    implement::ImplGen,
    ir::{Category, Section},
    types::{Dialect, Size, TypeSpec},
  };

  #[test]
  fn class_layout() {
    let class = ClassDecl {
      size: Size::D2,
      template: vec!["typename T".to_owned()],
      name: "Foo".to_owned(),
      specialization: Some(vec!["2".to_owned(), "T".to_owned()]),
      base: "Bar<2, T>".to_owned(),
      sections: vec![
        Section {
          access: Access::Public,
          category: Category::Constructors,
          members: vec![Member::Function(Signature::ctor("Foo", Vec::new()))],
        },
        Section {
          access: Access::Public,
          category: Category::Swizzles,
          members: vec![Member::Function(
            Signature::fun("Foo", "operator-", Vec::new()).constant(),
          )],
        },
        Section {
          access: Access::Private,
          category: Category::Constants,
          members: vec![Member::Typedef(crate::ir::Typedef::new("Bar<2, T>", "ParentType"))],
        },
      ],
    };

    let mut e = Emitter::buffer();
    write_class(&mut e, &class).unwrap();

    assert_eq!(
      e.into_inner(),
      "template<typename T>
class Foo<2, T> : public Bar<2, T> {
public:
  Foo();

  Foo operator-() const;
private:
  typedef Bar<2, T> ParentType;
};

"
    );
  }

  #[test]
  fn member_templates_and_arrays() {
    let sig = Signature::ctor("Color", vec![Param::array("const host_type", "data", "N")]).explicit();
    let mut e = Emitter::buffer();
    e.increase_indent();
    write_declaration(&mut e, &sig).unwrap();

    let swiz = Signature::fun("Color<N2, Binding, T, Semantic, true>", "swiz", vec![Param::array("int", "indices", "")])
      .templated(vec!["int N2".to_owned()])
      .constant();
    write_declaration(&mut e, &swiz).unwrap();

    assert_eq!(
      e.into_inner(),
      "  explicit Color(const host_type data[N]);
  template<int N2>
  Color<N2, Binding, T, Semantic, true> swiz(int indices[]) const;
"
    );
  }

  #[test]
  fn root_array_constructor_definition() {
    let dialect = Dialect::current();
    let spec = TypeSpec::root();
    let defs = ImplGen::from(ClassGen::new(&spec, &dialect)).implement(Size::Generic);
    let array = defs.iter().find(|d| d.sig.explicit).unwrap();
    let mut e = Emitter::buffer();
    write_definition(&mut e, array).unwrap();

    assert_eq!(
      e.into_inner(),
      "template<int N, BindingType Binding, typename T, SemanticType Semantic, bool Swizzled>
Attrib<N, Binding, T, Semantic, Swizzled>::Attrib(const host_type data[N])
  : Generic<N, T>(new VariableNode(Binding, N, StorageTypeInfo<T>::value_type, Semantic))
{
  if (Binding == SH_CONST) {
    for (int i = 0; i < N; i++) {
      this->setValue(i, data[i]);
    }
  } else {
    (*this) = Attrib<N, SH_CONST, T, Semantic>(data);
  }
}

"
    );
  }

  #[test]
  fn compound_assignment_definition() {
    let dialect = Dialect::legacy();
    let spec = TypeSpec::semantic(&dialect, "Color", "color", "COLOR");
    let defs = ImplGen::from(ClassGen::new(&spec, &dialect)).implement(Size::D4);
    let broadcast = defs
      .iter()
      .find(|d| d.sig.name == "operator%=" && d.sig.params[0].ty.contains("<1, T>"))
      .unwrap();

    assert_eq!(
      write_definitions_to_str(std::slice::from_ref(broadcast)).unwrap(),
      "template<ShBindingType Binding, typename T, bool Swizzled>
ShColor&
ShColor<4, Binding, T, Swizzled>::operator%=(const ShGeneric<1, T>& right)
{
  ParentType::operator%=(right);
  return *this;
}

"
    );
  }

  #[test]
  fn typedef_groups_are_spaced() {
    let mut block = TypedefBlock::default();
    block.groups.push(vec![crate::ir::Typedef::new("A<1>", "A1")]);
    block.groups.push(vec![crate::ir::Typedef::new("A<2>", "A2")]);

    let mut e = Emitter::buffer();
    write_typedefs(&mut e, &block).unwrap();

    assert_eq!(e.into_inner(), "typedef A<1> A1;\n\n\ntypedef A<2> A2;\n\n\n");
  }

  #[test]
  fn instantiation_lines() {
    let insts = [Instantiation {
      class: "Color".to_owned(),
      args: vec!["1".into(), "SH_INPUT".into(), "float".into(), "SH_COLOR".into(), "false".into()],
    }];
    let mut e = Emitter::buffer();
    write_instantiations(&mut e, &insts).unwrap();

    assert_eq!(e.into_inner(), "template class Color<1, SH_INPUT, float, SH_COLOR, false>;\n");
  }
}
