//! Line-oriented text emission.
//!
//! An [`Emitter`] wraps any [`fmt::Write`] sink and carries the indentation cursor of a single generation run. Every
//! line written through [`Emitter::emit`] is prefixed by the current indentation and has its trailing spaces trimmed,
//! so that generated files stay diff-friendly whatever the templates feeding them look like.
//!
//! The cursor is owned by the emitter: two generation runs never share state, even in the same process.

use std::fmt;

// Number of spaces an indent level represents.
const INDENT_SPACES: usize = 2;

/// Warning block put at the very top of every generated file.
const WARNING_BANNER: &str = "// WARNING - DO NOT EDIT THIS FILE:
// This file was automatically generated from {source}.
// If you wish to change it, edit that file instead.
//
// ---
//";

/// License carried by generated files, right after the warning block.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum License {
  /// zlib-style license of the early University of Waterloo releases.
  Zlib,

  /// LGPL 2.1 license of the later releases.
  Lgpl,
}

impl License {
  /// License text, one `//` comment line per line.
  pub fn text(self) -> &'static str {
    match self {
      License::Zlib => {
        "// Sh: A GPU metaprogramming language.
//
// Copyright (c) 2003 University of Waterloo Computer Graphics Laboratory
// Project administrator: Michael D. McCool
// Authors: Zheng Qin, Stefanus Du Toit, Kevin Moule, Tiberiu S. Popa,
//          Michael D. McCool
//
// This software is provided 'as-is', without any express or implied
// warranty. In no event will the authors be held liable for any damages
// arising from the use of this software.
//
// Permission is granted to anyone to use this software for any purpose,
// including commercial applications, and to alter it and redistribute it
// freely, subject to the following restrictions:
//
// 1. The origin of this software must not be misrepresented; you must
// not claim that you wrote the original software. If you use this
// software in a product, an acknowledgment in the product documentation
// would be appreciated but is not required.
//
// 2. Altered source versions must be plainly marked as such, and must
// not be misrepresented as being the original software.
//
// 3. This notice may not be removed or altered from any source
// distribution."
      }

      License::Lgpl => {
        "// Sh: A GPU metaprogramming language.
//
// Copyright 2003-2006 Serious Hack Inc.
//
// This library is free software; you can redistribute it and/or
// modify it under the terms of the GNU Lesser General Public
// License as published by the Free Software Foundation; either
// version 2.1 of the License, or (at your option) any later version.
//
// This library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public
// License along with this library; if not, write to the Free Software
// Foundation, Inc., 51 Franklin Street, Fifth Floor, Boston,
// MA  02110-1301, USA"
      }
    }
  }
}

/// Indentation-aware writer.
///
/// The emitter tracks:
///
/// - The current indentation, in columns. [`Emitter::increase_indent`] and [`Emitter::decrease_indent`] move it by one
///   level; decreasing saturates at zero.
/// - A single saved indentation slot, used by [`Emitter::suspend_indent`] and [`Emitter::resume_indent`] to write
///   a region flush left (preprocessor directives, mostly).
///
/// > Note: the saved slot is not a stack. Suspending twice in a row overwrites the first saved value with zero.
#[derive(Debug)]
pub struct Emitter<W> {
  out: W,
  indent: usize,
  saved: usize,
}

impl Emitter<String> {
  /// Create an emitter accumulating into a fresh [`String`].
  pub fn buffer() -> Self {
    Self::new(String::new())
  }
}

impl<W> Emitter<W>
where
  W: fmt::Write,
{
  /// Wrap a sink.
  pub fn new(out: W) -> Self {
    Self {
      out,
      indent: 0,
      saved: 0,
    }
  }

  /// Give the sink back.
  pub fn into_inner(self) -> W {
    self.out
  }

  /// Current indentation, in columns.
  pub fn indentation(&self) -> usize {
    self.indent
  }

  /// Write `text`, each of its lines prefixed by the current indentation and stripped of trailing spaces.
  ///
  /// A newline is always appended, so `emit("")` writes an empty line.
  pub fn emit(&mut self, text: impl AsRef<str>) -> Result<(), fmt::Error> {
    for line in text.as_ref().split('\n') {
      let line = line.trim_end();

      if !line.is_empty() {
        write!(self.out, "{:indent$}", "", indent = self.indent)?;
        self.out.write_str(line)?;
      }

      self.out.write_str("\n")?;
    }

    Ok(())
  }

  /// Write an empty line.
  pub fn blank(&mut self) -> Result<(), fmt::Error> {
    self.out.write_str("\n")
  }

  pub fn increase_indent(&mut self) {
    self.indent += INDENT_SPACES;
  }

  pub fn decrease_indent(&mut self) {
    self.indent = self.indent.saturating_sub(INDENT_SPACES);
  }

  /// Save the current indentation and drop to column zero.
  pub fn suspend_indent(&mut self) {
    self.saved = self.indent;
    self.indent = 0;
  }

  /// Restore the indentation saved by the last [`Emitter::suspend_indent`].
  pub fn resume_indent(&mut self) {
    self.indent = self.saved;
  }

  /// Write the “do not edit” warning naming `source`, followed by `license`.
  pub fn banner(&mut self, source: &str, license: License) -> Result<(), fmt::Error> {
    self.emit(WARNING_BANNER.replace("{source}", source))?;
    self.emit(license.text())?;
    self.emit("/".repeat(78))?;
    self.blank()
  }

  /// Open an include guard.
  pub fn guard(&mut self, name: &str) -> Result<(), fmt::Error> {
    self.suspend_indent();
    self.emit(format!("#ifndef {}\n#define {}", name, name))?;
    self.resume_indent();
    self.blank()
  }

  /// Close an include guard opened with [`Emitter::guard`].
  pub fn end_guard(&mut self, name: &str) -> Result<(), fmt::Error> {
    self.suspend_indent();
    self.emit(format!("#endif // {}", name))?;
    self.resume_indent();
    Ok(())
  }

  pub fn include(&mut self, header: &str) -> Result<(), fmt::Error> {
    self.suspend_indent();
    self.emit(format!("#include \"{}\"", header))?;
    self.resume_indent();
    Ok(())
  }

  /// Open `namespace <name> {`.
  ///
  /// The namespace body is not indented.
  pub fn namespace(&mut self, name: &str) -> Result<(), fmt::Error> {
    self.emit(format!("namespace {} {{", name))?;
    self.blank()
  }

  pub fn end_namespace(&mut self, name: &str) -> Result<(), fmt::Error> {
    self.emit(format!("}} // namespace {}", name))?;
    self.blank()
  }

  /// Write a doxygen comment block.
  ///
  /// The first line of `text` follows the opening `/**`; the others are prefixed by ` * `.
  pub fn doc_comment(&mut self, text: &str) -> Result<(), fmt::Error> {
    let mut lines = text.lines();
    let mut block = format!("/** {}", lines.next().unwrap_or_default());

    for line in lines {
      block.push_str("\n * ");
      block.push_str(line);
    }

    block.push_str("\n */");
    self.emit(block)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  #[test]
  fn emit_indents_every_line() {
    let mut e = Emitter::buffer();
    e.emit("a").unwrap();
    e.increase_indent();
    e.emit("b\nc  \n\nd").unwrap();
    e.decrease_indent();
    e.emit("e").unwrap();

    assert_eq!(e.into_inner(), "a\n  b\n  c\n\n  d\ne\n");
  }

  #[test]
  fn decrease_saturates() {
    let mut e = Emitter::buffer();
    e.decrease_indent();
    e.decrease_indent();
    assert_eq!(e.indentation(), 0);

    e.increase_indent();
    assert_eq!(e.indentation(), 2);
  }

  #[test]
  fn suspend_is_single_slot() {
    let mut e = Emitter::buffer();
    e.increase_indent();
    e.increase_indent();

    e.suspend_indent();
    assert_eq!(e.indentation(), 0);
    e.resume_indent();
    assert_eq!(e.indentation(), 4);

    // a nested suspend overwrites the saved level
    e.suspend_indent();
    e.suspend_indent();
    e.resume_indent();
    assert_eq!(e.indentation(), 0);
  }

  #[test]
  fn guard_ignores_indentation() {
    let mut e = Emitter::buffer();
    e.increase_indent();
    e.guard("SHCOLOR_HPP").unwrap();
    e.emit("x").unwrap();
    e.end_guard("SHCOLOR_HPP").unwrap();

    assert_eq!(
      e.into_inner(),
      "#ifndef SHCOLOR_HPP\n#define SHCOLOR_HPP\n\n  x\n#endif // SHCOLOR_HPP\n"
    );
  }

  #[test]
  fn doc_comment_block() {
    let mut e = Emitter::buffer();
    e.doc_comment("An n-color.\n\n").unwrap();

    assert_eq!(e.into_inner(), "/** An n-color.\n *\n */\n");
  }

  #[test]
  fn banner_names_source() {
    let mut e = Emitter::buffer();
    e.banner("shgen decl Color", License::Lgpl).unwrap();
    let out = e.into_inner();

    assert!(out.starts_with("// WARNING - DO NOT EDIT THIS FILE:\n"));
    assert!(out.contains("// This file was automatically generated from shgen decl Color.\n"));
    assert!(out.contains("Serious Hack Inc."));
    assert!(out.ends_with(&format!("{}\n\n", "/".repeat(78))));
  }

  proptest! {
    #[test]
    fn indentation_balance(ups in 0usize..32, moves in proptest::collection::vec(any::<bool>(), 0..64)) {
      let mut e = Emitter::buffer();

      for _ in 0..ups {
        e.increase_indent();
      }

      let start = e.indentation();
      let mut net = 0i64;

      for up in &moves {
        if *up {
          e.increase_indent();
          net += 1;
        } else {
          e.decrease_indent();
          net -= 1;
        }
      }

      // unwinding what is left puts the cursor back whenever no decrease was clamped
      let lowest = moves.iter().scan(0i64, |acc, up| {
        *acc += if *up { 1 } else { -1 };
        Some(*acc)
      }).min().unwrap_or(0);

      if lowest >= -(ups as i64) {
        while net > 0 {
          e.decrease_indent();
          net -= 1;
        }

        while net < 0 {
          e.increase_indent();
          net += 1;
        }

        prop_assert_eq!(e.indentation(), start);
      }

      prop_assert!(e.indentation() % INDENT_SPACES == 0);
    }
  }
}
