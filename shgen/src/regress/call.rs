//! Call styles.
//!
//! A call is the statement a test program runs: an operator or function applied to the inputs `a`, `b`, … and
//! stored into `out`. Several calls of the same arity exercise the different C++ spellings of one operation.

use crate::error::{Error, Result};
use std::fmt;

/// Shape of a call statement.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Style {
  /// `out = name a`
  Prefix,

  /// `out = a name`
  Postfix,

  /// `out = a name b`
  Infix,

  /// `out = name[a]`
  Lookup,

  /// `out = name(a, b, …)`
  Call,

  /// `name(out, a, b, …)`
  DestCall,
}

impl fmt::Display for Style {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Style::Prefix => f.write_str("prefix"),
      Style::Postfix => f.write_str("postfix"),
      Style::Infix => f.write_str("infix"),
      Style::Lookup => f.write_str("lookup"),
      Style::Call => f.write_str("call"),
      Style::DestCall => f.write_str("destcall"),
    }
  }
}

/// Name of the `i`-th operand.
pub fn operand(i: usize) -> char {
  (b'a' + (i % 26) as u8) as char
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Call {
  pub style: Style,
  pub name: String,
  pub arity: usize,
}

impl Call {
  pub fn new(style: Style, name: impl Into<String>, arity: usize) -> Result<Self> {
    let valid = match style {
      Style::Prefix | Style::Postfix | Style::Lookup => arity == 1,
      Style::Infix => arity == 2,
      Style::Call | Style::DestCall => true,
    };

    if !valid {
      return Err(Error::InvalidCallArity {
        style: style.to_string(),
        arity,
      });
    }

    Ok(Call {
      style,
      name: name.into(),
      arity,
    })
  }

  /// Key distinguishing calls in test names.
  ///
  /// Operators are told apart by their style only; named calls also carry their name.
  pub fn key(&self) -> String {
    match self.style {
      Style::Lookup | Style::Call | Style::DestCall => format!("{}_{}", self.style, self.name),
      _ => self.style.to_string(),
    }
  }
}

/// The call statement, without its terminating `;`.
impl fmt::Display for Call {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let args = (0..self.arity).map(operand).map(String::from).collect::<Vec<_>>();

    match self.style {
      Style::Prefix => write!(f, "out = {} {}", self.name, args[0]),
      Style::Postfix => write!(f, "out = {} {} ", args[0], self.name),
      Style::Infix => write!(f, "out = {} {} {}", args[0], self.name, args[1]),
      Style::Lookup => write!(f, "out = {}[{}]", self.name, args[0]),
      Style::Call => write!(f, "out = {}({})", self.name, args.join(", ")),
      Style::DestCall => write!(f, "{}(out, {})", self.name, args.join(", ")),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn statements() {
    let calls = [
      (Call::new(Style::Prefix, "!", 1), "out = ! a"),
      (Call::new(Style::Postfix, "++", 1), "out = a ++ "),
      (Call::new(Style::Infix, "&&", 2), "out = a && b"),
      (Call::new(Style::Lookup, "tex", 1), "out = tex[a]"),
      (Call::new(Style::Call, "cond", 3), "out = cond(a, b, c)"),
      (Call::new(Style::DestCall, "shADD", 2), "shADD(out, a, b)"),
    ];

    for (call, expected) in calls {
      assert_eq!(call.unwrap().to_string(), expected);
    }
  }

  #[test]
  fn keys() {
    assert_eq!(Call::new(Style::Infix, "+", 2).unwrap().key(), "infix");
    assert_eq!(Call::new(Style::Call, "atan2", 2).unwrap().key(), "call_atan2");
    assert_eq!(Call::new(Style::Lookup, "tex", 1).unwrap().key(), "lookup_tex");
  }

  #[test]
  fn arity_checks() {
    assert!(matches!(
      Call::new(Style::Infix, "+", 3),
      Err(Error::InvalidCallArity { arity: 3, .. })
    ));
    assert!(Call::new(Style::Prefix, "-", 2).is_err());
    assert!(Call::new(Style::Lookup, "tex", 2).is_err());
    assert!(Call::new(Style::Call, "lit", 3).is_ok());
  }
}
