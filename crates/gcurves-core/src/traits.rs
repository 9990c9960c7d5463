/// Compute an axis-aligned bounding box without touching any cached state.
///
/// Implementations must recompute from scratch on every call so the trait is
/// safe to use through shared references while a lazy cache exists elsewhere.
pub trait BoundingBox {
    type Output;
    fn bounding_box(&self) -> Option<Self::Output>;
}
