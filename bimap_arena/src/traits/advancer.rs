/// An iterator that does not borrow its collection.
///
/// Rust's iterators borrow the collection for their whole lifetime, so
/// erasing entries while walking a `BiMap` would otherwise require collecting
/// the `Ptr`s first. With an advancer the loop looks like
///
/// ```text
/// let mut adv = map.advancer_left();
/// while let Some(p) = adv.advance(&map) {
///     ... map.get(p) ...
///     // removing the current entry is fine, the advancer already knows
///     // which entry comes next
///     ... map.remove(p) ...
/// }
/// ```
///
/// # Note
///
/// Removing the entry that comes _after_ the current one during the loop is
/// not supported, and entries inserted during the loop may or may not be
/// encountered. An advancer never returns the same item twice.
pub trait Advancer {
    type Collection;
    type Item;

    fn advance(&mut self, collection: &Self::Collection) -> Option<Self::Item>;
}
