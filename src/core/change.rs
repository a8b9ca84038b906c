//! The borrowed view of a single property change.

use std::any::Any;
use std::fmt;

/// One property change, as seen by listeners during a single dispatch.
///
/// A `PropertyChange` borrows everything it describes and is never stored by
/// the notifier; it exists only for the duration of one
/// [`ChangeNotifier::notify`](crate::core::ChangeNotifier::notify) call.
///
/// # Examples
///
/// ```rust
/// use change_notifier::core::PropertyChange;
///
/// struct Order { status: &'static str }
///
/// let order = Order { status: "shipped" };
/// let old = "pending";
/// let change = PropertyChange::new(&order, "status", Some(&order.status), Some(&old));
///
/// assert_eq!(change.property(), "status");
/// assert_eq!(change.new_value::<&str>(), Some(&"shipped"));
/// assert_eq!(change.old_value::<&str>(), Some(&"pending"));
/// assert!(change.target::<Order>().is_some());
/// ```
#[derive(Clone, Copy)]
pub struct PropertyChange<'a> {
    target: &'a dyn Any,
    property: &'a str,
    new_value: Option<&'a dyn Any>,
    old_value: Option<&'a dyn Any>,
}

impl<'a> PropertyChange<'a> {
    /// Describe a change of `property` on `target`.
    pub fn new(
        target: &'a dyn Any,
        property: &'a str,
        new_value: Option<&'a dyn Any>,
        old_value: Option<&'a dyn Any>,
    ) -> Self {
        Self {
            target,
            property,
            new_value,
            old_value,
        }
    }

    /// The object whose property changed, downcast to `T`.
    ///
    /// Returns `None` if the target is not a `T`.
    pub fn target<T: Any>(&self) -> Option<&'a T> {
        self.target.downcast_ref()
    }

    /// The object whose property changed, untyped.
    pub fn target_any(&self) -> &'a dyn Any {
        self.target
    }

    /// Name of the changed property.
    pub fn property(&self) -> &'a str {
        self.property
    }

    /// The post-mutation value, if present and of type `V`.
    pub fn new_value<V: Any>(&self) -> Option<&'a V> {
        self.new_value.and_then(|v| v.downcast_ref())
    }

    /// The pre-mutation value, if present and of type `V`.
    pub fn old_value<V: Any>(&self) -> Option<&'a V> {
        self.old_value.and_then(|v| v.downcast_ref())
    }

    /// The post-mutation value, untyped.
    pub fn new_value_any(&self) -> Option<&'a dyn Any> {
        self.new_value
    }

    /// The pre-mutation value, untyped.
    pub fn old_value_any(&self) -> Option<&'a dyn Any> {
        self.old_value
    }
}

impl fmt::Debug for PropertyChange<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyChange")
            .field("property", &self.property)
            .field("has_new_value", &self.new_value.is_some())
            .field("has_old_value", &self.old_value.is_some())
            .finish_non_exhaustive()
    }
}
