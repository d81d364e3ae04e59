pub mod factory;
pub mod roaring_factory;

pub use factory::{BitmapFactory, ImmutableBitmap, MutableBitmap};
pub use roaring_factory::{ImmutableRoaringBitmap, RoaringBitmapFactory};
