//! Code generators for the Sh shader algebra.
//!
//! Sh exposes its GPU values as a family of C++ class templates (`Attrib`, `Color`, `Point`, `Position`, `Vector`,
//! `Normal`, `TexCoord`) parametrized by a size (1 to 4 components), a binding (input, output, input-output, temporary
//! or constant), an element type and a swizzling flag. Those classes only differ by name and by the semantic they
//! stamp on the nodes they create, so they are generated rather than written by hand. This crate generates:
//!
//! - The class declarations of a family ([`decl`]): a size-polymorphic primary template, four partial specializations
//!   and a typedef block aliasing every size, binding and element type.
//! - The out-of-class member definitions ([`implement`]).
//! - The explicit instantiations compiled into the library ([`instantiate`]).
//! - Regression-test programs checking the runtime against values computed on the host ([`regress`]).
//!
//! Generators build a structured representation ([`ir`]) rendered by [`writer::cpp`] through an [`emit::Emitter`],
//! which owns the indentation of a generation run. Whole files, banners and include guards included, are produced by
//! [`artifact`].
//!
//! # Dialects
//!
//! The library went through two revisions with incompatible conventions: `Sh`-prefixed float-only classes first, then
//! unprefixed classes carrying their semantic as a template parameter and accepting operands of other element types.
//! A [`types::Dialect`] holds the corresponding feature flags; [`types::Dialect::legacy`] and
//! [`types::Dialect::current`] are the two presets.
//!
//! ```
//! use shgen::{artifact::{artifact_to_str, Artifact}, types::{Dialect, TypeSpec}};
//!
//! let dialect = Dialect::legacy();
//! let color = TypeSpec::semantic(&dialect, "Color", "color", "COLOR");
//! let header = artifact_to_str(Artifact::Declaration, &color, &dialect, "shgen decl Color").unwrap();
//!
//! assert!(header.contains("#ifndef SHCOLOR_HPP"));
//! assert!(header.contains("typedef ShColor<3, SH_INPUT, float> ShInputColor3f;"));
//! ```

pub mod artifact;
pub mod config;
pub mod decl;
pub mod emit;
pub mod error;
pub mod implement;
pub mod instantiate;
pub mod ir;
pub mod log;
pub mod regress;
pub mod types;
pub mod writer;

pub use crate::error::{Error, Result};
