//! Test programs.
//!
//! A [`Test`] associates call styles with test cases. Each test case is exercised with every call registered before
//! it, either inside a stream program run by the harness ([`Mode::Stream`]) or evaluated directly on the host
//! ([`Mode::Immediate`]). Every check is wrapped in a `try` block: a failing check or an exception bumps the error
//! counter and the program carries on, exiting non-zero at the end if anything went wrong.

use crate::{
  emit::Emitter,
  error::{self, Error},
  regress::{
    call::{operand, Call},
    case::{make_test, testname, type_name, TestCase},
    texture::{write_texture, Texture},
    value::{literal, Value},
  },
  types::{Binding, Dialect},
};
use std::{collections::HashMap, fmt};
use tracing::{debug, info};

/// Tolerance of comparisons when a test case does not set one.
pub const EPSILON: f64 = 0.01;

/// Where the operation under test runs.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Mode {
  /// Inside a program streamed over the inputs.
  Stream,

  /// Directly on host values.
  Immediate,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Test {
  pub name: String,
  pub arity: usize,
  pub mode: Mode,
  calls: Vec<Call>,
  textures: Vec<Texture>,

  /// Test cases along with the calls registered when they were added.
  tests: Vec<(TestCase, Vec<Call>)>,
}

impl Test {
  pub fn new(name: impl Into<String>, arity: usize, mode: Mode) -> Self {
    Test {
      name: name.into(),
      arity,
      mode,
      calls: Vec::new(),
      textures: Vec::new(),
      tests: Vec::new(),
    }
  }

  /// Register a call for the test cases added from now on.
  pub fn add_call(&mut self, call: Call) -> error::Result<()> {
    if call.arity != self.arity {
      return Err(Error::CallArityMismatch {
        test: self.name.clone(),
        expected: self.arity,
        got: call.arity,
      });
    }

    self.calls.push(call);
    Ok(())
  }

  /// Forget the registered calls; test cases already added keep theirs.
  pub fn clear_call(&mut self) {
    self.calls.clear();
  }

  pub fn add_texture(&mut self, texture: impl Into<Texture>) {
    self.textures.push(texture.into());
  }

  pub fn add_make_test(&mut self, expected: impl Into<Value>, inputs: Vec<Value>, types: &[&str], epsilon: f64) {
    self.add_test(make_test(expected, inputs, types, epsilon));
  }

  pub fn add_test(&mut self, case: TestCase) {
    self.tests.push((case, self.calls.clone()));
  }

  /// Number of checks the program performs.
  pub fn checks(&self) -> usize {
    self.tests.iter().map(|(_, calls)| calls.len()).sum()
  }

  /// Write the textures and test blocks, without the `main` header and footer.
  pub fn write<W>(&self, e: &mut Emitter<W>, dialect: &Dialect, epsilon: f64) -> Result<(), fmt::Error>
  where
    W: fmt::Write,
  {
    debug!(test = %self.name, mode = ?self.mode, checks = self.checks(), "writing test");

    e.increase_indent();

    for texture in &self.textures {
      write_texture(e, texture, dialect)?;
      e.blank()?;
      e.blank()?;
    }

    let out = Writer { dialect, epsilon };

    match self.mode {
      Mode::Stream => out.stream(e, self)?,
      Mode::Immediate => out.immediate(e, self)?,
    }

    e.decrease_indent();
    Ok(())
  }
}

/// Shared state of the writing of one test.
struct Writer<'a> {
  dialect: &'a Dialect,
  epsilon: f64,
}

impl<'a> Writer<'a> {
  /// C++ type of a variable holding `value`.
  fn variable(&self, value: &Value, binding: Binding, ty: &str) -> String {
    let d = self.dialect;
    let (binding, ty) = (d.binding(binding), type_name(d, ty));

    match value {
      Value::Matrix(rows) => {
        let cols = rows.first().map_or(0, Vec::len);
        format!("{}<{}, {}, {}, {}>", d.name("Matrix"), rows.len(), cols, binding, ty)
      }

      Value::Vector(v) => format!("{}<{}, {}, {}>", d.name("Attrib"), v.len(), binding, ty),
      Value::Scalar(_) => format!("{}<1, {}, {}>", d.name("Attrib"), binding, ty),
    }
  }

  fn init_variable<W>(&self, e: &mut Emitter<W>, value: &Value, ty: &str, name: &str) -> Result<(), fmt::Error>
  where
    W: fmt::Write,
  {
    let cast = |x: f64| format!("{}({})", type_name(self.dialect, ty), literal(x));

    match value {
      Value::Matrix(rows) => {
        e.emit(format!("{} {};", self.variable(value, Binding::Temp, ty), name))?;

        for (i, row) in rows.iter().enumerate() {
          let cells = row
            .iter()
            .enumerate()
            .map(|(j, &x)| format!("{}[{}]({}) = {};", name, i, j, literal(x)))
            .collect::<Vec<_>>();
          e.emit(cells.join(" "))?;
        }

        Ok(())
      }

      Value::Vector(v) => {
        let args = v.iter().map(|&x| cast(x)).collect::<Vec<_>>();
        e.emit(format!("{} {}({});", self.variable(value, Binding::Const, ty), name, args.join(", ")))
      }

      Value::Scalar(x) => e.emit(format!("{} {}({});", self.variable(value, Binding::Const, ty), name, cast(*x))),
    }
  }

  /// Inputs `a`, `b`… then `expected`.
  fn init_case<W>(&self, e: &mut Emitter<W>, case: &TestCase) -> Result<(), fmt::Error>
  where
    W: fmt::Write,
  {
    for (i, (input, ty)) in case.typed_inputs().enumerate() {
      self.init_variable(e, input, ty, &operand(i).to_string())?;
    }

    self.init_variable(e, &case.expected, case.result_type(), "expected")
  }

  fn epsilon(&self, case: &TestCase) -> String {
    literal(if case.epsilon > 0. { case.epsilon } else { self.epsilon })
  }

  /// Run `check` under `try`, counting failures and exceptions.
  fn guarded<W>(&self, e: &mut Emitter<W>, check: &str) -> Result<(), fmt::Error>
  where
    W: fmt::Write,
  {
    e.emit("try {")?;
    e.increase_indent();
    e.emit(format!("if ({} != 0) errors++;", check))?;
    e.decrease_indent();
    e.emit(format!("}} catch (const {} &e) {{", self.dialect.name("Exception")))?;
    e.increase_indent();
    e.emit(
      "std::cout << \"Caught Sh Exception in '\" << last_test << \"'.\" << std::endl << e.message() << std::endl;",
    )?;
    e.emit("errors++;")?;
    e.decrease_indent();
    e.emit("} catch (const std::exception& e) {")?;
    e.increase_indent();
    e.emit("std::cerr << \"Caught C++ exception in '\" << last_test << \"' : \" << e.what() << std::endl;")?;
    e.emit("errors++;")?;
    e.decrease_indent();
    e.emit("}")
  }

  /// One program per test case and call, each run in its own block.
  ///
  /// Programs are named after the test, the index of the call and the test name. A test name seen twice, e.g. two
  /// calls sharing a style, runs the program built the first time.
  fn stream<W>(&self, e: &mut Emitter<W>, test: &Test) -> Result<(), fmt::Error>
  where
    W: fmt::Write,
  {
    let d = self.dialect;
    let mut programs = HashMap::new();

    for (number, (case, calls)) in test.tests.iter().enumerate() {
      let inputs = (0..case.inputs.len()).map(operand).map(String::from).collect::<Vec<_>>();

      for (i, call) in calls.iter().enumerate() {
        let name = testname(d, case, &call.key(), number);

        let program = match programs.get(&name).cloned() {
          Some(program) => program,

          None => {
            let program = format!("{}_{}_{}", test.name, operand(i), name);

            e.emit(format!("{} {} = {}(\"stream\") {{", d.name("Program"), program, d.enumerator("BEGIN_PROGRAM")))?;
            e.increase_indent();

            for (j, (input, ty)) in case.typed_inputs().enumerate() {
              e.emit(format!("{} {};", self.variable(input, Binding::Input, ty), operand(j)))?;
            }

            e.emit(format!("{} out;", self.variable(&case.expected, Binding::Output, case.result_type())))?;
            e.emit(format!("{};", call))?;
            e.decrease_indent();
            e.emit(format!("}} {};", d.enumerator("END")))?;
            e.blank()?;
            e.emit(format!("{}.name(\"{}\");", program, program))?;
            e.emit(format!("last_test = \"{}\";", program))?;
            programs.insert(name.clone(), program.clone());
            program
          }
        };

        e.emit(format!("{{  // {}", name))?;
        e.increase_indent();
        self.init_case(e, case)?;
        e.blank()?;

        let mut args = vec![program];
        args.extend(inputs.iter().cloned());
        args.push("expected".to_owned());
        args.push(self.epsilon(case));
        self.guarded(e, &format!("test.run({})", args.join(", ")))?;

        e.decrease_indent();
        e.emit("}")?;
      }

      e.blank()?;
    }

    Ok(())
  }

  /// One block per test case and call, computing `out` on the host.
  fn immediate<W>(&self, e: &mut Emitter<W>, test: &Test) -> Result<(), fmt::Error>
  where
    W: fmt::Write,
  {
    for (number, (case, calls)) in test.tests.iter().enumerate() {
      for call in calls {
        let name = testname(self.dialect, case, &call.key(), number);

        e.emit(format!("{{  // {}", name))?;
        e.increase_indent();
        e.emit(format!("last_test = \"{}\";", name))?;
        self.init_case(e, case)?;
        e.blank()?;
        e.emit(format!("{} out;", self.variable(&case.expected, Binding::Temp, case.result_type())))?;
        e.emit(format!("{};", call))?;
        e.blank()?;
        self.guarded(
          e,
          &format!("test.check(\"{}\", out, expected, {})", name, self.epsilon(case)),
        )?;
        e.blank()?;
        e.decrease_indent();
        e.emit("}")?;
      }
    }

    Ok(())
  }
}

/// Opening of the `main` function shared by every test of a file.
pub fn write_header<W>(e: &mut Emitter<W>, dialect: &Dialect) -> Result<(), fmt::Error>
where
  W: fmt::Write,
{
  e.include("test.hpp")?;
  e.blank()?;
  e.emit("int main(int argc, char** argv) {")?;
  e.increase_indent();
  e.emit(format!("using namespace {};", dialect.namespace))?;
  e.blank()?;
  e.emit("char* last_test = \"none\";")?;
  e.blank()?;
  e.emit("Test test(argc, argv);")?;
  e.blank()?;
  e.emit("int errors = 0;")?;
  e.decrease_indent();
  Ok(())
}

/// Closing of the `main` function; the program fails if any check did.
pub fn write_footer<W>(e: &mut Emitter<W>) -> Result<(), fmt::Error>
where
  W: fmt::Write,
{
  e.increase_indent();
  e.emit("if (errors !=0) return 1;")?;
  e.decrease_indent();
  e.emit("}")?;
  e.blank()
}

/// An operation under test: the calls exercising it and the routine adding its test cases.
pub struct Op {
  pub name: String,
  pub calls: Vec<Call>,
  fill: Box<dyn Fn(&mut Test)>,
}

impl Op {
  pub fn new(name: impl Into<String>, call: Call, fill: impl Fn(&mut Test) + 'static) -> Self {
    Op {
      name: name.into(),
      calls: vec![call],
      fill: Box::new(fill),
    }
  }

  /// Exercise the operation with another spelling.
  pub fn or(mut self, call: Call) -> Self {
    self.calls.push(call);
    self
  }

  /// A test of the operation in the given mode.
  pub fn test(&self, name: impl Into<String>, mode: Mode) -> error::Result<Test> {
    let arity = self.calls.first().map_or(0, |call| call.arity);
    let mut test = Test::new(name, arity, mode);

    for call in &self.calls {
      test.add_call(call.clone())?;
    }

    (self.fill)(&mut test);
    Ok(test)
  }
}

impl fmt::Debug for Op {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Op").field("name", &self.name).field("calls", &self.calls).finish()
  }
}

/// Tests sharing one generated file.
#[derive(Clone, Debug, PartialEq)]
pub struct Suite {
  pub name: String,
  pub tests: Vec<Test>,
}

impl Suite {
  pub fn new(name: impl Into<String>) -> Self {
    Suite {
      name: name.into(),
      tests: Vec::new(),
    }
  }

  /// A suite exercising every operation in a stream program, then again in immediate mode.
  ///
  /// Immediate tests are named after their operation suffixed by `_im`.
  pub fn paired(name: impl Into<String>, ops: Vec<Op>) -> error::Result<Self> {
    let mut suite = Suite::new(name);

    for op in &ops {
      suite.tests.push(op.test(op.name.as_str(), Mode::Stream)?);
    }

    for op in &ops {
      suite.tests.push(op.test(format!("{}_im", op.name), Mode::Immediate)?);
    }

    Ok(suite)
  }

  /// Write the whole C++ program of the suite.
  #[tracing::instrument(skip_all, fields(suite = %self.name))]
  pub fn write<W>(&self, e: &mut Emitter<W>, dialect: &Dialect, epsilon: f64) -> Result<(), fmt::Error>
  where
    W: fmt::Write,
  {
    info!(tests = self.tests.len(), "writing suite");
    write_header(e, dialect)?;

    for test in &self.tests {
      test.write(e, dialect, epsilon)?;
    }

    write_footer(e)
  }

  pub fn to_str(&self, dialect: &Dialect, epsilon: f64) -> Result<String, fmt::Error> {
    let mut e = Emitter::buffer();
    self.write(&mut e, dialect, epsilon)?;
    Ok(e.into_inner())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::regress::call::Style;

  fn add_test(mode: Mode) -> Test {
    let mut test = Test::new("add", 2, mode);
    test.add_call(Call::new(Style::Infix, "+", 2).unwrap()).unwrap();
    test.add_make_test([3., 5., 7.], vec![[0., 1., 2.].into(), [3., 4., 5.].into()], &[], 0.);
    test
  }

  #[test]
  fn arity_mismatch() {
    let mut test = Test::new("add", 2, Mode::Stream);
    let err = test.add_call(Call::new(Style::Call, "abs", 1).unwrap()).unwrap_err();

    assert!(matches!(err, Error::CallArityMismatch { expected: 2, got: 1, .. }));
  }

  #[test]
  fn calls_bind_at_insertion() {
    let mut test = add_test(Mode::Immediate);
    test.add_call(Call::new(Style::Call, "add", 2).unwrap()).unwrap();
    test.add_make_test([8.], vec![[1.].into(), [7.].into()], &[], 0.);
    test.clear_call();
    test.add_make_test([0.], vec![[1.].into(), [-1.].into()], &[], 0.);

    assert_eq!(test.checks(), 1 + 2);
  }

  #[test]
  fn stream_block() {
    let mut e = Emitter::buffer();
    add_test(Mode::Stream).write(&mut e, &Dialect::legacy(), EPSILON).unwrap();

    assert_eq!(
      e.into_inner(),
      r#"  ShProgram add_a_f_3f_3f_infix_test0 = SH_BEGIN_PROGRAM("stream") {
    ShAttrib<3, SH_INPUT, float> a;
    ShAttrib<3, SH_INPUT, float> b;
    ShAttrib<3, SH_OUTPUT, float> out;
    out = a + b;
  } SH_END;

  add_a_f_3f_3f_infix_test0.name("add_a_f_3f_3f_infix_test0");
  last_test = "add_a_f_3f_3f_infix_test0";
  {  // f_3f_3f_infix_test0
    ShAttrib<3, SH_CONST, float> a(float(0.0), float(1.0), float(2.0));
    ShAttrib<3, SH_CONST, float> b(float(3.0), float(4.0), float(5.0));
    ShAttrib<3, SH_CONST, float> expected(float(3.0), float(5.0), float(7.0));

    try {
      if (test.run(add_a_f_3f_3f_infix_test0, a, b, expected, 0.01) != 0) errors++;
    } catch (const ShException &e) {
      std::cout << "Caught Sh Exception in '" << last_test << "'." << std::endl << e.message() << std::endl;
      errors++;
    } catch (const std::exception& e) {
      std::cerr << "Caught C++ exception in '" << last_test << "' : " << e.what() << std::endl;
      errors++;
    }
  }

"#
    );
  }

  #[test]
  fn stream_runs_only_declared_programs() {
    let mut test = Test::new("ops", 2, Mode::Stream);
    test.add_call(Call::new(Style::Infix, "+", 2).unwrap()).unwrap();
    test.add_call(Call::new(Style::Infix, "-", 2).unwrap()).unwrap();
    test.add_call(Call::new(Style::Call, "max", 2).unwrap()).unwrap();
    test.add_test(TestCase::new([3.], vec![[1.].into(), [2.].into()]));

    let mut e = Emitter::buffer();
    test.write(&mut e, &Dialect::legacy(), EPSILON).unwrap();
    let out = e.into_inner();

    let declared = out
      .lines()
      .filter_map(|line| line.trim().strip_prefix("ShProgram "))
      .filter_map(|line| line.split(' ').next())
      .collect::<Vec<_>>();
    let run = out
      .lines()
      .filter_map(|line| line.split("test.run(").nth(1))
      .filter_map(|args| args.split(',').next())
      .collect::<Vec<_>>();

    assert_eq!(declared, ["ops_a_f_1f_1f_infix_test0", "ops_c_f_1f_1f_callmax_test0"]);
    assert_eq!(run.len(), 3);
    assert!(run.iter().all(|program| declared.contains(program)), "{:?} not in {:?}", run, declared);
  }

  #[test]
  fn immediate_block() {
    let mut test = Test::new("det_im", 1, Mode::Immediate);
    test.add_call(Call::new(Style::Call, "det", 1).unwrap()).unwrap();
    test.add_make_test(2., vec![vec![vec![2.]].into()], &[], 0.5);

    let mut e = Emitter::buffer();
    test.write(&mut e, &Dialect::current(), EPSILON).unwrap();
    let out = e.into_inner();

    assert!(out.starts_with(
      "  {  // f_1f_calldet_test0
    last_test = \"f_1f_calldet_test0\";
    Matrix<1, 1, SH_TEMP, float> a;
    a[0](0) = 2.0;
    Attrib<1, SH_CONST, float> expected(float(2.0));

    Attrib<1, SH_TEMP, float> out;
    out = det(a);

    try {
      if (test.check(\"f_1f_calldet_test0\", out, expected, 0.5) != 0) errors++;
    } catch (const Exception &e) {
"
    ));
    assert!(out.ends_with("    }\n\n  }\n"));
  }

  #[test]
  fn header_and_footer() {
    let suite = Suite::new("empty");
    let out = suite.to_str(&Dialect::legacy(), EPSILON).unwrap();

    assert_eq!(
      out,
      r#"#include "test.hpp"

int main(int argc, char** argv) {
  using namespace SH;

  char* last_test = "none";

  Test test(argc, argv);

  int errors = 0;
  if (errors !=0) return 1;
}

"#
    );
  }

  #[test]
  fn paired_suites_list_stream_tests_first() {
    let ops = vec![
      Op::new("cos", Call::new(Style::Call, "cos", 1).unwrap(), |t| {
        t.add_test(TestCase::new(1., vec![0.0.into()]))
      }),
      Op::new("add", Call::new(Style::Infix, "+", 2).unwrap(), |t| {
        t.add_test(TestCase::new(1., vec![0.0.into(), 1.0.into()]))
      })
      .or(Call::new(Style::Call, "add", 2).unwrap()),
    ];
    let suite = Suite::paired("misc", ops).unwrap();
    let names = suite.tests.iter().map(|t| t.name.as_str()).collect::<Vec<_>>();

    assert_eq!(names, ["cos", "add", "cos_im", "add_im"]);
    assert_eq!(suite.tests[1].checks(), 2);
  }

  #[test]
  fn op_arity_is_checked() {
    let op = Op::new("add", Call::new(Style::Infix, "+", 2).unwrap(), |_| ())
      .or(Call::new(Style::Call, "abs", 1).unwrap());

    assert!(op.test("add", Mode::Stream).is_err());
  }
}
