//! Table-driven tests of the stream opcodes.
//!
//! Every opcode lists the sizes its operands may take, the expressions compiling to it and literal cases. One file
//! is generated per opcode: a program for every combination of operand sizes and expression, plus the explicit
//! `sh<OPCODE>(out, …)` form, each run against the cases whose operand lengths fit.

use crate::{
  emit::Emitter,
  regress::{math, value::literal},
  types::Dialect,
};
use chrono::NaiveDateTime;
use std::fmt;
use tracing::debug;

/// An opcode and its test material.
#[derive(Clone, Debug, PartialEq)]
pub struct Opcode {
  pub name: &'static str,

  /// Allowed sizes of every operand: `s` (1), `v` (3) or a digit.
  pub terms: Vec<&'static str>,

  /// Size of the result; `v` is the size of the widest operand.
  pub outsize: &'static str,

  /// Expressions over the operands `A`, `B`… compiling to the opcode.
  pub ops: Vec<&'static str>,

  /// Operand values followed by the expected result.
  pub cases: Vec<Vec<Vec<f64>>>,
}

impl Opcode {
  fn new(name: &'static str, terms: &[&'static str], outsize: &'static str, ops: &[&'static str]) -> Self {
    Opcode {
      name,
      terms: terms.to_vec(),
      outsize,
      ops: ops.to_vec(),
      cases: Vec::new(),
    }
  }

  fn with_cases(mut self, cases: Vec<Vec<Vec<f64>>>) -> Self {
    self.cases = cases;
    self
  }

  /// Statements computing `out`, the explicit opcode call last.
  pub fn statements(&self) -> Vec<String> {
    let operands = (0..self.terms.len())
      .map(|i| operand(i).to_string())
      .collect::<Vec<_>>();

    self
      .ops
      .iter()
      .map(|op| format!("out = {}", op))
      .chain(std::iter::once(format!("sh{}(out, {})", self.name, operands.join(", "))))
      .collect()
  }

  /// Every combination of operand sizes, in table order.
  pub fn combinations(&self) -> Vec<Vec<char>> {
    self.terms.iter().fold(vec![Vec::new()], |acc, term| {
      acc
        .iter()
        .flat_map(|prefix| {
          term.chars().map(move |size| {
            let mut combination = prefix.clone();
            combination.push(size);
            combination
          })
        })
        .collect()
    })
  }
}

/// Uppercase name of the `i`-th operand.
fn operand(i: usize) -> char {
  (b'A' + (i % 26) as u8) as char
}

/// Number of components of a size code.
pub fn varsize(code: char) -> usize {
  match code {
    'v' => 3,
    's' => 1,
    _ => code.to_digit(10).map_or(0, |d| d as usize),
  }
}

/// Cases `[l, f(l)]` of a componentwise function.
fn mapped(inputs: &[[f64; 3]], f: fn(f64) -> f64) -> Vec<Vec<Vec<f64>>> {
  inputs
    .iter()
    .map(|l| vec![l.to_vec(), l.iter().map(|&x| f(x)).collect()])
    .collect()
}

fn case(values: &[&[f64]]) -> Vec<Vec<f64>> {
  values.iter().map(|v| v.to_vec()).collect()
}

/// The opcode table.
pub fn table() -> Vec<Opcode> {
  use std::f64::consts::PI;

  let angles = [
    [0.0, 1.0, 2.0],
    [0.5, 0.8, 0.9],
    [PI, PI / 2.0, PI * 2.0],
    [-PI, -PI / 2.0, -PI * 2.0],
    [3.0, 4.0, 5.0],
    [-1.0, -3.0, -4.0],
    [0.5, 1.5, 2.5],
  ];
  let exponents = [[0.0, 1.0, 2.0], [3.0, 4.0, 5.0], [-1.0, -3.0, -4.0], [0.5, 1.5, 2.5]];
  let positives = [[0.1, 0.3, 0.7], [1.0, 2.0, 3.0], [4.0, 5.0, 12.0], [1.4, 2.7, 3.9]];
  let directions = [
    [1.0, 1.0, 1.0],
    [-1.0, -1.0, -1.0],
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [-1.0, 0.0, 1.0],
    [0.5, 0.5, 0.5],
    [10.0, 5.0, 1.0],
  ];
  let fmods = [
    ([1.0, 1.2, 1.6], [1.0, 1.0, 1.0]),
    ([0.0, 0.2, 0.6], [1.0, 1.0, 1.0]),
    ([-1.0, -1.2, -1.6], [1.0, 1.0, 1.0]),
    ([4.2, 6.7, 12.33], [2.2, 4.3, 5.7]),
  ];

  vec![
    Opcode::new("ADD", &["v", "v"], "v", &["A + B"]).with_cases(vec![case(&[
      &[-3.4, 4.5, 9.],
      &[3.7, -4.9, 12.],
      &[0.3, -0.4, 21.],
    ])]),
    Opcode::new("MUL", &["sv", "sv"], "v", &["A * B"]).with_cases(vec![
      case(&[&[1.], &[1.], &[1.]]),
      case(&[&[1., 2., 3.], &[1.], &[1., 2., 3.]]),
      case(&[&[1.], &[1., 2., 3.], &[1., 2., 3.]]),
      case(&[&[1., 2., 3.], &[4., 5., 6.], &[4., 10., 18.]]),
      case(&[&[-1., 2., -3.], &[4., -5., -6.], &[-4., -10., 18.]]),
      case(&[&[1., 2., 3.], &[0., 0., 0.], &[0., 0., 0.]]),
    ]),
    Opcode::new("DIV", &["v", "sv"], "v", &["A / B"]),
    Opcode::new("SLT", &["v", "sv"], "v", &["A < B"]),
    Opcode::new("SLE", &["v", "sv"], "v", &["A <= B"]),
    Opcode::new("SGT", &["v", "sv"], "v", &["A > B"]),
    Opcode::new("SGE", &["v", "sv"], "v", &["A >= B"]),
    Opcode::new("SEQ", &["v", "sv"], "v", &["A == B"]),
    Opcode::new("SNE", &["v", "sv"], "v", &["A != B"]),
    Opcode::new("ABS", &["v"], "v", &["abs(A)"]),
    Opcode::new("ACOS", &["v"], "v", &["acos(A)"]),
    Opcode::new("ASIN", &["v"], "v", &["asin(A)"]),
    Opcode::new("ATAN", &["v"], "v", &["atan(A)"]),
    Opcode::new("ATAN2", &["v", "v"], "v", &["atan2(A, B)"]),
    Opcode::new("CEIL", &["v"], "v", &["ceil(A)"]),
    Opcode::new("COS", &["v"], "v", &["cos(A)"]).with_cases(mapped(&angles, f64::cos)),
    Opcode::new("DOT", &["v", "v"], "1", &["dot(A, B)", "(A | B)"]).with_cases(vec![
      case(&[&[1.0, 1.0, 1.0], &[0.0, 0.0, 0.0], &[0.0]]),
      case(&[&[1.0, 1.0, 1.0], &[1.0, 0.0, -1.0], &[0.0]]),
      case(&[&[1.0, 1.0, 1.0], &[1.0, 0.0, -1.0], &[0.0]]),
      case(&[&[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0], &[3.0]]),
      case(&[&[-1.0, -1.0, -1.0], &[1.0, 1.0, 1.0], &[-3.0]]),
      case(&[&[0.0, 0.4, 0.8], &[0.8, 1.0, 1.2], &[0.4 + 0.8 * 1.2]]),
    ]),
    Opcode::new("EXP", &["v"], "v", &["exp(A)"]).with_cases(mapped(&exponents, f64::exp)),
    Opcode::new("EXP2", &["v"], "v", &["exp2(A)"]).with_cases(mapped(&exponents, f64::exp2)),
    Opcode::new("EXP10", &["v"], "v", &["exp10(A)"]).with_cases(mapped(&exponents, |x| 10f64.powf(x))),
    Opcode::new("FLR", &["v"], "v", &["floor(A)"]),
    Opcode::new("FRAC", &["v"], "v", &["frac(A)"]),
    Opcode::new("LRP", &["vs", "v", "v"], "v", &["lerp(A, B, C)"]),
    Opcode::new("MAD", &["vs", "v", "v"], "v", &["mad(A, B, C)"]),
    Opcode::new("MAX", &["v", "v"], "v", &["max(A, B)"]),
    Opcode::new("MIN", &["v", "v"], "v", &["min(A, B)"]),
    Opcode::new("MOD", &["v", "v"], "v", &["mod(A, B)"]).with_cases(
      fmods
        .iter()
        .map(|(a, b)| vec![a.to_vec(), b.to_vec(), a.iter().zip(b).map(|(x, y)| x % y).collect()])
        .collect(),
    ),
    Opcode::new("LOG", &["v"], "v", &["log(A)"]).with_cases(mapped(&positives, f64::ln)),
    Opcode::new("LOG2", &["v"], "v", &["log2(A)"]).with_cases(mapped(&positives, f64::log2)),
    Opcode::new("LOG10", &["v"], "v", &["log10(A)"]).with_cases(mapped(&positives, f64::log10)),
    Opcode::new("POW", &["v", "sv"], "v", &["pow(A, B)"]).with_cases(vec![
      case(&[&[1.0, 1.0, 1.0], &[1.0], &[1.0, 1.0, 1.0]]),
      case(&[&[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0]]),
    ]),
    Opcode::new("SIN", &["v"], "v", &["sin(A)"]),
    Opcode::new("SQRT", &["v"], "v", &["sqrt(A)"]),
    // no expression compiles to TAN, only the explicit call
    Opcode::new("TAN", &["v"], "v", &[]).with_cases(mapped(&angles, f64::tan)),
    Opcode::new("NORM", &["v"], "v", &["normalize(A)"]).with_cases(
      directions
        .iter()
        .map(|l| vec![l.to_vec(), math::normalize(l)])
        .collect(),
    ),
    Opcode::new("XPD", &["3", "3"], "3", &["cross(A, B)", "A ^ B"]),
    Opcode::new("COND", &["vs", "v", "v"], "v", &["cond(A, B, C)"]),
  ]
}

/// Write the test file of an opcode.
///
/// `source` and `generated_at` end up in the header comment.
pub fn write_opcode<W>(
  e: &mut Emitter<W>,
  opcode: &Opcode,
  dialect: &Dialect,
  source: &str,
  generated_at: NaiveDateTime,
) -> Result<(), fmt::Error>
where
  W: fmt::Write,
{
  debug!(opcode = opcode.name, "writing opcode tests");

  let attrib = dialect.name("Attrib");
  let (input, output) = (dialect.enumerator("INPUT"), dialect.enumerator("OUTPUT"));

  e.emit(format!("// Test cases for {}", opcode.name))?;
  e.emit(format!("// Generated by {} at {}", source, generated_at))?;
  e.blank()?;
  e.emit("#include <sh.hpp>")?;
  e.include("test.hpp")?;
  e.blank()?;
  e.emit(format!("using namespace {};", dialect.namespace))?;
  e.blank()?;
  e.emit("int main(int argc, char** argv) {")?;
  e.increase_indent();
  e.emit("Test test(argc, argv);")?;

  for combination in opcode.combinations() {
    let sizes = combination.iter().map(|&c| varsize(c)).collect::<Vec<_>>();
    let widest = sizes.iter().copied().fold(1, usize::max);
    let outsize = if opcode.outsize == "v" {
      widest.to_string()
    } else {
      opcode.outsize.to_owned()
    };
    let codes = combination.iter().map(ToString::to_string).collect::<Vec<_>>();

    for (oi, op) in opcode.statements().iter().enumerate() {
      let program = format!("{}{}{}", opcode.name, codes.concat(), oi);

      e.emit(format!(
        "{} {} = {}(\"gpu:stream\") {{",
        dialect.name("Program"),
        program,
        dialect.enumerator("BEGIN_PROGRAM")
      ))?;
      e.increase_indent();

      for (i, size) in sizes.iter().enumerate() {
        e.emit(format!("{}<{}, {}> {};", attrib, size, input, operand(i)))?;
      }

      e.emit(format!("{}<{}, {}> out;", attrib, outsize, output))?;
      e.emit(format!("{};", op))?;
      e.decrease_indent();
      e.emit(format!("}} {};", dialect.enumerator("END")))?;
      e.emit(format!("{}.name(\"{} [{}]\");", program, op, codes.join(" x ")))?;
      e.blank()?;

      let fitting = opcode.cases.iter().filter(|case| {
        case.len() == sizes.len() + 1 && case.iter().zip(&sizes).all(|(values, &size)| values.len() == size)
      });

      for case in fitting {
        let args = case
          .iter()
          .map(|values| {
            let literals = values.iter().map(|&x| literal(x)).collect::<Vec<_>>();
            format!("{}{}f({})", attrib, values.len(), literals.join(", "))
          })
          .collect::<Vec<_>>();

        e.emit(format!("test.run({}, {});", program, args.join(", ")))?;
      }

      e.blank()?;
    }
  }

  e.decrease_indent();
  e.emit("}")
}

pub fn opcode_to_str(
  opcode: &Opcode,
  dialect: &Dialect,
  source: &str,
  generated_at: NaiveDateTime,
) -> Result<String, fmt::Error> {
  let mut e = Emitter::buffer();
  write_opcode(&mut e, opcode, dialect, source, generated_at)?;
  Ok(e.into_inner())
}
