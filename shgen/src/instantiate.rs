//! Explicit template instantiations.

use crate::{
  decl::ClassGen,
  ir::Instantiation,
  types::{Binding, Dialect, Size, TypeSpec},
};

/// One instantiation per fixed size, binding role, element type of the dialect and swizzle flag.
pub fn instantiate(spec: &TypeSpec, dialect: &Dialect) -> Vec<Instantiation> {
  let class = ClassGen::new(spec, dialect).class_name();
  let mut insts = Vec::new();

  for size in Size::FIXED {
    for binding in Binding::ALL {
      for elem in dialect.element_types {
        for swizzled in ["false", "true"] {
          let mut args = vec![size.var(), dialect.binding(binding), dialect.element_name(elem)];

          if dialect.semantic_param {
            args.push(dialect.enumerator(&spec.tag));
          }

          args.push(swizzled.to_owned());
          insts.push(Instantiation {
            class: class.clone(),
            args,
          });
        }
      }
    }
  }

  insts
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cartesian_product() {
    let dialect = Dialect::current();
    let spec = TypeSpec::semantic(&dialect, "Color", "color", "COLOR");
    let insts = instantiate(&spec, &dialect);

    assert_eq!(insts.len(), 4 * 5 * 15 * 2);
    assert_eq!(insts[0].args, ["1", "SH_INPUT", "Half", "SH_COLOR", "false"]);
    assert_eq!(insts[1].args, ["1", "SH_INPUT", "Half", "SH_COLOR", "true"]);
    assert_eq!(insts.last().unwrap().args, ["4", "SH_CONST", "FracUInt", "SH_COLOR", "true"]);
  }

  #[test]
  fn legacy_float_only() {
    let dialect = Dialect::legacy();
    let spec = TypeSpec::semantic(&dialect, "Color", "color", "COLOR");
    let insts = instantiate(&spec, &dialect);

    assert_eq!(insts.len(), 40);
    assert_eq!(insts[2].class, "ShColor");
    assert_eq!(insts[2].args, ["1", "SH_OUTPUT", "float", "false"]);
  }
}
