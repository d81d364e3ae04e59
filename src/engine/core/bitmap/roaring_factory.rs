use roaring::RoaringBitmap;
use std::sync::Arc;

use crate::engine::core::bitmap::factory::{BitmapFactory, ImmutableBitmap, MutableBitmap};

impl MutableBitmap for RoaringBitmap {
    fn add(&mut self, row: u32) {
        self.insert(row);
    }

    fn size(&self) -> usize {
        self.len() as usize
    }
}

/// Shared, read-only roaring bitmap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImmutableRoaringBitmap(Arc<RoaringBitmap>);

impl ImmutableRoaringBitmap {
    pub fn as_roaring(&self) -> &RoaringBitmap {
        &self.0
    }
}

impl ImmutableBitmap for ImmutableRoaringBitmap {
    fn size(&self) -> usize {
        self.0.len() as usize
    }

    fn contains(&self, row: u32) -> bool {
        self.0.contains(row)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = u32> + '_> {
        Box::new(self.0.iter())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RoaringBitmapFactory;

impl BitmapFactory for RoaringBitmapFactory {
    type Mutable = RoaringBitmap;
    type Immutable = ImmutableRoaringBitmap;

    fn make_empty_mutable(&self) -> RoaringBitmap {
        RoaringBitmap::new()
    }

    fn make_empty_immutable(&self) -> ImmutableRoaringBitmap {
        ImmutableRoaringBitmap::default()
    }

    fn make_immutable(&self, bitmap: RoaringBitmap) -> ImmutableRoaringBitmap {
        ImmutableRoaringBitmap(Arc::new(bitmap))
    }

    fn union<'b, I>(&self, bitmaps: I) -> ImmutableRoaringBitmap
    where
        I: IntoIterator<Item = &'b ImmutableRoaringBitmap>,
    {
        let mut out = RoaringBitmap::new();
        for bitmap in bitmaps {
            out |= bitmap.as_roaring();
        }
        ImmutableRoaringBitmap(Arc::new(out))
    }
}
