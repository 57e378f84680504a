mod texture;

pub use self::texture::*;
