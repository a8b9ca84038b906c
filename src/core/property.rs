//! Explicit "set a field, then notify" mutators.
//!
//! These replace setter instrumentation: the field is written first and the
//! notifier is called afterwards, so a listener that reads the target back
//! always observes the new value.

use crate::core::ChangeNotifier;
use std::any::Any;

/// Replace a field of `target` and notify listeners of the change.
///
/// `field` selects the field to update. Listeners receive `target`, `property`,
/// the new value and the old value, both present. Returns the old value.
///
/// # Examples
///
/// ```rust
/// use change_notifier::prelude::*;
///
/// struct Order { status: String }
///
/// let notifier = ChangeNotifier::new();
/// notifier.register_fn(|change| {
///     let order = change.target::<Order>().unwrap();
///     // The target already holds the new value.
///     assert_eq!(Some(&order.status), change.new_value::<String>());
/// });
///
/// let mut order = Order { status: "pending".to_string() };
/// let old = set_property(&notifier, &mut order, "status", |o| &mut o.status, "paid".to_string());
/// assert_eq!(old, "pending");
/// assert_eq!(order.status, "paid");
/// ```
pub fn set_property<T, V>(
    notifier: &ChangeNotifier,
    target: &mut T,
    property: &str,
    field: impl FnOnce(&mut T) -> &mut V,
    value: V,
) -> V
where
    T: Any,
    V: Any + Clone,
{
    let old = std::mem::replace(field(target), value.clone());
    notifier.notify(&*target, property, Some(&value), Some(&old));
    old
}

/// Replace an optional field of `target` and notify listeners of the change.
///
/// A `None` on either side is delivered as an absent value, so listeners see
/// `new_value::<V>()` / `old_value::<V>()` rather than an `Option<V>`.
/// Returns the old value.
pub fn set_optional_property<T, V>(
    notifier: &ChangeNotifier,
    target: &mut T,
    property: &str,
    field: impl FnOnce(&mut T) -> &mut Option<V>,
    value: Option<V>,
) -> Option<V>
where
    T: Any,
    V: Any + Clone,
{
    let old = std::mem::replace(field(target), value.clone());
    notifier.notify(
        &*target,
        property,
        value.as_ref().map(|v| v as &dyn Any),
        old.as_ref().map(|v| v as &dyn Any),
    );
    old
}
