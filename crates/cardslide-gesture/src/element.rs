//! Abstract element/region tree.
//!
//! Stands in for the host's real view hierarchy: enough structure for hit
//! targets to answer ancestor queries ("is this pointer inside the modal's
//! scrollable content?") and to report a measured layout height.

use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Role an element plays for gesture arbitration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRole {
    /// The modal card a swipe gesture dismisses.
    ModalCard,
    /// A scrollable content region the dismiss gesture must yield to.
    ScrollContent,
    /// Any other element.
    Generic,
}

struct ElementInner {
    role: ElementRole,
    height: Cell<f32>,
    parent: RefCell<Weak<ElementInner>>,
    children: RefCell<SmallVec<[Element; 4]>>,
}

/// A shared node in the element tree.
///
/// Clones are cheap handles to the same node; identity comparison is by
/// node, not by value.
#[derive(Clone)]
pub struct Element {
    inner: Rc<ElementInner>,
}

impl Element {
    pub fn new(role: ElementRole, height: f32) -> Self {
        Self {
            inner: Rc::new(ElementInner {
                role,
                height: Cell::new(height),
                parent: RefCell::new(Weak::new()),
                children: RefCell::new(SmallVec::new()),
            }),
        }
    }

    pub fn role(&self) -> ElementRole {
        self.inner.role
    }

    /// Layout height in logical pixels, as measured by the host.
    pub fn offset_height(&self) -> f32 {
        self.inner.height.get()
    }

    pub fn set_offset_height(&self, height: f32) {
        self.inner.height.set(height);
    }

    /// Attach `child` under this element, replacing any previous parent.
    pub fn append_child(&self, child: &Element) {
        *child.inner.parent.borrow_mut() = Rc::downgrade(&self.inner);
        self.inner.children.borrow_mut().push(child.clone());
    }

    pub fn parent(&self) -> Option<Element> {
        self.inner
            .parent
            .borrow()
            .upgrade()
            .map(|inner| Element { inner })
    }

    /// Nearest ancestor (including self) with the given role.
    pub fn closest(&self, role: ElementRole) -> Option<Element> {
        let mut current = Some(self.clone());
        while let Some(element) = current {
            if element.role() == role {
                return Some(element);
            }
            current = element.parent();
        }
        None
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("role", &self.inner.role)
            .field("height", &self.inner.height.get())
            .finish()
    }
}
