//! Textures set up ahead of the tests of a program.

use crate::{emit::Emitter, types::Dialect};
use std::fmt;

/// A 2D or rectangular texture loaded from a PNG file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImageTexture {
  /// C++ texture type, e.g. `ShTexture2D<ShColor3f>`.
  pub textype: String,
  pub name: String,
  pub filename: String,
}

/// A texture of any dimension filled on the host by a C++ expression.
///
/// The expression sees the loop variables `i`, `j`, `k`… (one per dimension, `i` varying fastest), the component
/// index `elem` and the flat `index`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GenTexture {
  pub textype: String,

  /// Host value type of the texels, e.g. `float`.
  pub value_type: String,

  /// Storage type enumerator handed to the host memory, e.g. `SH_FLOAT`.
  pub storage_type: String,

  /// Components per texel.
  pub tex_size: usize,

  pub dims: Vec<usize>,
  pub name: String,
  pub code: String,
}

impl GenTexture {
  /// Number of values of the texture, as a C++ expression.
  fn size(&self) -> String {
    let dims = self.dims.iter().map(ToString::to_string).collect::<Vec<_>>();
    format!("({} * {})", self.tex_size, dims.join(" * "))
  }

  fn mem(&self) -> String {
    format!("{}_memdata", self.name)
  }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Texture {
  Image(ImageTexture),
  Gen(GenTexture),
}

impl From<ImageTexture> for Texture {
  fn from(tex: ImageTexture) -> Self {
    Texture::Image(tex)
  }
}

impl From<GenTexture> for Texture {
  fn from(tex: GenTexture) -> Self {
    Texture::Gen(tex)
  }
}

/// Write the declaration and initialization of a texture.
pub fn write_texture<W>(e: &mut Emitter<W>, texture: &Texture, dialect: &Dialect) -> Result<(), fmt::Error>
where
  W: fmt::Write,
{
  match texture {
    Texture::Image(tex) => write_image_texture(e, tex, dialect),
    Texture::Gen(tex) => write_gen_texture(e, tex, dialect),
  }
}

fn write_image_texture<W>(e: &mut Emitter<W>, tex: &ImageTexture, dialect: &Dialect) -> Result<(), fmt::Error>
where
  W: fmt::Write,
{
  e.emit(format!("{} {};", tex.textype, tex.name))?;
  e.emit("{")?;
  e.increase_indent();
  e.emit(format!("{} image;", dialect.name("Image")))?;
  e.emit(format!("image.loadPng(\"{}\");", tex.filename))?;
  e.emit(format!("{}.size(image.width(), image.height());", tex.name))?;
  e.emit(format!("{}.memory(image.memory());", tex.name))?;
  e.decrease_indent();
  e.emit("}")
}

fn write_gen_texture<W>(e: &mut Emitter<W>, tex: &GenTexture, dialect: &Dialect) -> Result<(), fmt::Error>
where
  W: fmt::Write,
{
  let dims = tex.dims.iter().map(ToString::to_string).collect::<Vec<_>>();
  let pointer = dialect.name("Pointer");
  let variant = |space: &str| {
    format!(
      "{}<{}, {}>",
      dialect.name("DataVariant"),
      tex.value_type,
      dialect.enumerator(space)
    )
  };
  let (mem_type, host_type) = (variant("MEM"), variant("HOST"));
  let (size, mem) = (tex.size(), tex.mem());

  e.emit(format!("{} {}({});", tex.textype, tex.name, dims.join(",")))?;
  e.emit(format!("{}<{} > {} = new {}({});", pointer, mem_type, mem, mem_type, size))?;
  e.emit("{")?;
  e.increase_indent();
  e.emit(format!("{}<{} > data = new {}({});", pointer, host_type, host_type, size))?;
  e.emit("int index = 0;")?;

  // the last dimension varies slowest
  for (i, dim) in tex.dims.iter().enumerate().rev() {
    let var = (b'i' + i as u8) as char;
    e.emit(format!("for(int {} = 0; {} < {}; ++{})", var, var, dim, var))?;
  }

  e.emit(format!("for(int elem = 0; elem < {}; ++elem, ++index)", tex.tex_size))?;
  e.emit("{")?;
  e.increase_indent();
  e.emit(format!("(*data)[index] = {};", tex.code))?;
  e.decrease_indent();
  e.emit("}")?;
  e.emit(format!("{}->set(data);", mem))?;
  e.emit(format!(
    "{}<{}> hostmem = new {}({} * {}->datasize(), {}->array(), {});",
    pointer,
    dialect.name("HostMemory"),
    dialect.name("HostMemory"),
    size,
    mem,
    mem,
    tex.storage_type
  ))?;
  e.emit(format!("{}.memory(hostmem);", tex.name))?;
  e.decrease_indent();
  e.emit("}")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn image_texture() {
    let tex = ImageTexture {
      textype: "ShTexture2D<ShColor3f>".to_owned(),
      name: "mytex".to_owned(),
      filename: "mytex.png".to_owned(),
    };
    let mut e = Emitter::buffer();
    e.increase_indent();
    write_texture(&mut e, &tex.into(), &Dialect::legacy()).unwrap();

    assert_eq!(
      e.into_inner(),
      "  ShTexture2D<ShColor3f> mytex;
  {
    ShImage image;
    image.loadPng(\"mytex.png\");
    mytex.size(image.width(), image.height());
    mytex.memory(image.memory());
  }
"
    );
  }

  #[test]
  fn generated_texture() {
    let tex = GenTexture {
      textype: "ShTexture2D<ShColor3f>".to_owned(),
      value_type: "float".to_owned(),
      storage_type: "SH_FLOAT".to_owned(),
      tex_size: 3,
      dims: vec![128, 64],
      name: "mytex2".to_owned(),
      code: "i / 128.0 + j / 64.0".to_owned(),
    };
    let mut e = Emitter::buffer();
    write_texture(&mut e, &tex.into(), &Dialect::legacy()).unwrap();

    assert_eq!(
      e.into_inner(),
      "ShTexture2D<ShColor3f> mytex2(128,64);
ShPointer<ShDataVariant<float, SH_MEM> > mytex2_memdata = new ShDataVariant<float, SH_MEM>((3 * 128 * 64));
{
  ShPointer<ShDataVariant<float, SH_HOST> > data = new ShDataVariant<float, SH_HOST>((3 * 128 * 64));
  int index = 0;
  for(int j = 0; j < 64; ++j)
  for(int i = 0; i < 128; ++i)
  for(int elem = 0; elem < 3; ++elem, ++index)
  {
    (*data)[index] = i / 128.0 + j / 64.0;
  }
  mytex2_memdata->set(data);
  ShPointer<ShHostMemory> hostmem = new ShHostMemory((3 * 128 * 64) * mytex2_memdata->datasize(), mytex2_memdata->array(), SH_FLOAT);
  mytex2.memory(hostmem);
}
"
    );
  }
}
