use std::fmt;

/// Accumulator for row numbers while an index is being built.
pub trait MutableBitmap {
    fn add(&mut self, row: u32);

    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

/// Frozen set of row numbers. Clones are cheap and share storage.
pub trait ImmutableBitmap: Clone + fmt::Debug + Send + Sync {
    fn size(&self) -> usize;

    fn contains(&self, row: u32) -> bool;

    /// Row numbers in ascending order.
    fn iter(&self) -> Box<dyn Iterator<Item = u32> + '_>;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

/// Capability used by the adapter to create and freeze bitmaps without knowing the
/// concrete representation.
pub trait BitmapFactory: Send + Sync {
    type Mutable: MutableBitmap;
    type Immutable: ImmutableBitmap;

    fn make_empty_mutable(&self) -> Self::Mutable;

    fn make_empty_immutable(&self) -> Self::Immutable;

    fn make_immutable(&self, bitmap: Self::Mutable) -> Self::Immutable;

    fn union<'b, I>(&self, bitmaps: I) -> Self::Immutable
    where
        I: IntoIterator<Item = &'b Self::Immutable>,
        Self::Immutable: 'b;
}
