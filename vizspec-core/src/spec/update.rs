/// Set one optional property of a record through an accessor.
///
/// ```
/// use vizspec_core::spec::mark::{MarkDef, MarkType};
/// use vizspec_core::spec::update::UpdateField;
///
/// let bar = MarkDef::new(MarkType::Bar)
///     .update(|m| &mut m.opacity, 0.5)
///     .update(|m| &mut m.tooltip, true);
/// assert_eq!(bar.opacity, Some(0.5));
/// ```
pub trait UpdateField: Sized {
    fn update<T, V, F>(mut self, accessor: F, value: V) -> Self
    where
        F: FnOnce(&mut Self) -> &mut Option<T>,
        V: Into<T>,
    {
        self.set(accessor, value);
        self
    }

    fn set<T, V, F>(&mut self, accessor: F, value: V)
    where
        F: FnOnce(&mut Self) -> &mut Option<T>,
        V: Into<T>,
    {
        *accessor(self) = Some(value.into());
    }

    fn clear<T, F>(&mut self, accessor: F)
    where
        F: FnOnce(&mut Self) -> &mut Option<T>,
    {
        *accessor(self) = None;
    }
}
