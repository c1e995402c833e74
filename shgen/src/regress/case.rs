//! Test cases and their names.

use crate::{
  regress::value::Value,
  types::{Dialect, ELEMENT_TYPES},
};

/// Type every operand defaults to.
pub const DEFAULT_TYPE: &str = "f";

/// Inputs of an operation and the result it must compute.
#[derive(Clone, Debug, PartialEq)]
pub struct TestCase {
  pub expected: Value,
  pub inputs: Vec<Value>,

  /// Element types of the result then of every input, as suffix codes (`f`, `i`, `fub`…) or verbatim C++ names.
  pub types: Vec<String>,

  /// Tolerance of the comparison; zero or less selects the default one.
  pub epsilon: f64,
}

/// Build a test case, padding the type list with `float` so that every input has one.
pub fn make_test(expected: impl Into<Value>, inputs: Vec<Value>, types: &[&str], epsilon: f64) -> TestCase {
  let mut types = types.iter().map(|&ty| ty.to_owned()).collect::<Vec<_>>();

  if types.len() < inputs.len() + 1 {
    types.resize(inputs.len() + 1, DEFAULT_TYPE.to_owned());
  }

  TestCase {
    expected: expected.into(),
    inputs,
    types,
    epsilon,
  }
}

impl TestCase {
  /// A float-typed test case with the default tolerance.
  pub fn new(expected: impl Into<Value>, inputs: Vec<Value>) -> Self {
    make_test(expected, inputs, &[], 0.)
  }

  /// Element type of the result; [`DEFAULT_TYPE`] when missing.
  pub fn result_type(&self) -> &str {
    self.type_at(0)
  }

  /// Inputs zipped with their element types, missing ones defaulting to [`DEFAULT_TYPE`].
  pub fn typed_inputs(&self) -> impl Iterator<Item = (&Value, &str)> + '_ {
    self.inputs.iter().enumerate().map(move |(i, input)| (input, self.type_at(i + 1)))
  }

  fn type_at(&self, i: usize) -> &str {
    self.types.get(i).map_or(DEFAULT_TYPE, String::as_str)
  }
}

/// Alphanumeric characters of `s`.
pub fn identifier(s: &str) -> String {
  s.chars().filter(|c| c.is_alphanumeric()).collect()
}

/// C++ name of an element type given as a code or a name.
pub fn type_name(dialect: &Dialect, ty: &str) -> String {
  match dialect.element_by_code(ty) {
    Some(element) => dialect.element_name(&element),
    None => ty.to_owned(),
  }
}

/// Suffix code of an element type given as a code or a name.
///
/// Types missing from the element table are reduced to an identifier.
pub fn type_code(dialect: &Dialect, ty: &str) -> String {
  ELEMENT_TYPES
    .iter()
    .find(|element| element.code == ty || dialect.element_name(element) == ty)
    .map_or_else(|| identifier(ty), |element| element.code.to_owned())
}

/// Name of the `number`-th test case exercised with the call keyed `key`.
///
/// The name lists the result type, then the length (for arrays) and type of every input, then the call key.
pub fn testname(dialect: &Dialect, case: &TestCase, key: &str, number: usize) -> String {
  let mut name = type_code(dialect, case.result_type());

  for (input, ty) in case.typed_inputs() {
    name.push('_');

    if let Some(len) = input.array_len() {
      name.push_str(&len.to_string());
    }

    name.push_str(&type_code(dialect, ty));
  }

  format!("{}_{}_test{}", name, identifier(key), number)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn types_are_padded() {
    let case = make_test([3., 5., 7.], vec![[0., 1., 2.].into(), [3., 4., 5.].into()], &["i"], 0.);
    assert_eq!(case.types, ["i", "f", "f"]);

    let case = TestCase::new(1., vec![1.0.into()]);
    assert_eq!(case.types, ["f", "f"]);
  }

  #[test]
  fn missing_types_default_to_float() {
    let case = TestCase {
      expected: Value::from([2.]),
      inputs: vec![[1.].into(), [1.].into()],
      types: Vec::new(),
      epsilon: 0.,
    };

    assert_eq!(case.result_type(), "f");
    assert_eq!(case.typed_inputs().map(|(_, ty)| ty).collect::<Vec<_>>(), ["f", "f"]);
    assert_eq!(testname(&Dialect::legacy(), &case, "infix", 0), "f_1f_1f_infix_test0");
  }

  #[test]
  fn names() {
    let dialect = Dialect::legacy();
    let case = make_test([4., 5., 6.], vec![[1.].into(), [3., 4., 5.].into()], &["i", "SH_INT"], 0.);

    assert_eq!(testname(&dialect, &case, "infix", 1), "i_1SHINT_3f_infix_test1");
    assert_eq!(
      testname(&dialect, &TestCase::new(2., vec![1.4.into()]), "call_cond", 0),
      "f_f_callcond_test0"
    );
  }

  #[test]
  fn type_lookup() {
    let legacy = Dialect::legacy();

    assert_eq!(type_name(&legacy, "h"), "ShHalf");
    assert_eq!(type_name(&Dialect::current(), "h"), "Half");
    assert_eq!(type_name(&legacy, "ui"), "unsigned int");
    assert_eq!(type_name(&legacy, "SH_INT"), "SH_INT");
    assert_eq!(type_code(&legacy, "ShFracUByte"), "fub");
    assert_eq!(type_code(&legacy, "float"), "f");
  }
}
