//! Hidden class (shape) implementation for property access optimization
//!
//! Hidden classes (also called "shapes" or "maps") describe the layout of a
//! JavaScript object: which properties it has, in what order they were
//! added, and at what offset each one lives. They form a transition tree
//! rooted at the empty object `{}`; adding a property walks (or creates) an
//! edge to a child shape. Two objects that add the same properties in the
//! same order end up sharing the exact same shape instance, which is what
//! lets inline caches key off shape identity instead of a name lookup.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::shape_deopt::ShapeDeoptimization;
use crate::shape_profiler::ShapeProfiler;

/// Attributes of a property slot, mirroring the three ECMAScript property
/// descriptor flags used outside of accessor properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyAttributes {
    /// Can the property's value be changed?
    pub writable: bool,
    /// Does the property show up in `for...in` / `Object.keys`?
    pub enumerable: bool,
    /// Can the property be deleted or have its attributes changed?
    pub configurable: bool,
}

impl Default for PropertyAttributes {
    fn default() -> Self {
        Self {
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }
}

type PropertyMap = HashMap<String, (u32, PropertyAttributes)>;

/// A node in the shape transition tree
///
/// The root shape (returned by [`HiddenClass::root`]) represents an object
/// with no properties. Calling [`HiddenClass::add_property`] either returns
/// a cached child shape (if some other object already made this exact
/// transition) or creates and caches a new one.
pub struct HiddenClass {
    parent: Option<Rc<HiddenClass>>,
    property_name: Option<String>,
    property_attributes: Option<PropertyAttributes>,
    offset: u32,
    transitions: RefCell<HashMap<(String, PropertyAttributes), Rc<HiddenClass>>>,
    deprecated_to: RefCell<Option<Rc<HiddenClass>>>,
    property_map: RefCell<Option<Rc<PropertyMap>>>,
    /// Deoptimization coordinator shared by every shape in this tree, so a
    /// listener registered anywhere hears about every transition.
    deopt: Rc<ShapeDeoptimization>,
    /// Usage profiler shared by every shape in this tree.
    profiler: Rc<ShapeProfiler>,
}

impl std::fmt::Debug for HiddenClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HiddenClass")
            .field("property_count", &self.property_count())
            .field("deprecated", &self.is_deprecated())
            .finish()
    }
}

impl HiddenClass {
    /// Create the root shape, representing an object with no properties.
    ///
    /// This is the entry point into the transition tree; every shape is
    /// reached from here via a chain of [`add_property`](Self::add_property)
    /// calls.
    pub fn root() -> Rc<Self> {
        let root = Self::root_with_shared(Rc::new(ShapeDeoptimization::new()), Rc::new(ShapeProfiler::new()));
        root.profiler.record_creation(&root);
        root
    }

    /// Create a root shape sharing an existing deoptimization coordinator
    /// and profiler, rather than starting fresh ones.
    ///
    /// Used when a shape must be rebuilt outside its original transition
    /// tree (e.g. [`HiddenClass::remove_property`]) but listeners
    /// registered against the original tree still need to hear about it.
    fn root_with_shared(deopt: Rc<ShapeDeoptimization>, profiler: Rc<ShapeProfiler>) -> Rc<Self> {
        Rc::new(Self {
            parent: None,
            property_name: None,
            property_attributes: None,
            offset: 0,
            transitions: RefCell::new(HashMap::new()),
            deprecated_to: RefCell::new(None),
            property_map: RefCell::new(None),
            deopt,
            profiler,
        })
    }

    /// Create a new empty hidden class (alias for [`HiddenClass::root`]).
    pub fn new() -> Rc<Self> {
        Self::root()
    }

    /// The deoptimization coordinator shared by this shape's whole tree.
    ///
    /// Register a listener here (e.g. from a code cache) to hear about
    /// every shape transition and guard failure in this tree.
    pub fn deopt(&self) -> &ShapeDeoptimization {
        &self.deopt
    }

    /// The usage profiler shared by this shape's whole tree.
    pub fn profiler(&self) -> &ShapeProfiler {
        &self.profiler
    }

    /// Number of properties this shape describes.
    pub fn property_count(&self) -> u32 {
        match &self.parent {
            None => 0,
            Some(_) => self.offset + 1,
        }
    }

    /// Add a property transition, reusing a cached child shape when this
    /// exact `(name, attributes)` transition already exists from `self`.
    ///
    /// This is the core of shape sharing: two objects that independently
    /// add the same property with the same attributes end up pointing at
    /// the identical `Rc<HiddenClass>`.
    pub fn add_property(self: &Rc<Self>, name: &str, attributes: PropertyAttributes) -> Rc<Self> {
        let key = (name.to_string(), attributes);
        if let Some(existing) = self.transitions.borrow().get(&key) {
            return Rc::clone(existing);
        }

        let offset = self.property_count();
        let child = Rc::new(HiddenClass {
            parent: Some(Rc::clone(self)),
            property_name: Some(name.to_string()),
            property_attributes: Some(attributes),
            offset,
            transitions: RefCell::new(HashMap::new()),
            deprecated_to: RefCell::new(None),
            property_map: RefCell::new(None),
            deopt: Rc::clone(&self.deopt),
            profiler: Rc::clone(&self.profiler),
        });
        self.transitions.borrow_mut().insert(key, Rc::clone(&child));
        self.profiler.record_creation(&child);
        self.profiler.record_transition(self, name, &child);
        self.deopt.on_property_added(self, name, &child);
        child
    }

    /// Remove a property, producing the shape that results from deleting
    /// it out of the middle of the transition chain.
    ///
    /// Deletion can't be expressed as a simple append like
    /// [`add_property`](Self::add_property), so this rebuilds a fresh shape
    /// from a new root by replaying every surviving transition in original
    /// insertion order, then deprecates `self` in favor of it.
    pub fn remove_property(self: &Rc<Self>, name: &str) -> Rc<Self> {
        let mut chain = Vec::new();
        let mut current: Option<&HiddenClass> = Some(self);
        while let Some(shape) = current {
            if let (Some(prop_name), Some(attrs)) = (&shape.property_name, shape.property_attributes) {
                if prop_name != name {
                    chain.push((prop_name.clone(), attrs));
                }
            }
            current = shape.parent.as_deref();
        }
        chain.reverse();

        let mut rebuilt = Self::root_with_shared(Rc::clone(&self.deopt), Rc::clone(&self.profiler));
        for (prop_name, attrs) in chain {
            rebuilt = rebuilt.add_property(&prop_name, attrs);
        }

        self.deopt.on_property_deleted(self, name, &rebuilt);
        self.deprecate(Rc::clone(&rebuilt));
        rebuilt
    }

    fn build_property_map(&self) -> Rc<PropertyMap> {
        if let Some(cached) = self.property_map.borrow().as_ref() {
            return Rc::clone(cached);
        }

        let mut chain = Vec::new();
        let mut current: Option<&HiddenClass> = Some(self);
        while let Some(shape) = current {
            if let (Some(name), Some(attrs)) = (&shape.property_name, shape.property_attributes) {
                chain.push((name.clone(), shape.offset, attrs));
            }
            current = shape.parent.as_deref();
        }

        let mut map = HashMap::with_capacity(chain.len());
        for (name, offset, attrs) in chain {
            map.insert(name, (offset, attrs));
        }
        let map = Rc::new(map);
        *self.property_map.borrow_mut() = Some(Rc::clone(&map));
        map
    }

    /// Look up a property's storage offset, for O(1) indexing into an
    /// object's property vector.
    pub fn lookup_property(self: &Rc<Self>, name: &str) -> Option<u32> {
        self.profiler.record_access(self);
        self.build_property_map().get(name).map(|(offset, _)| *offset)
    }

    /// Look up a property's offset and descriptor attributes together.
    pub fn lookup_property_full(self: &Rc<Self>, name: &str) -> Option<(u32, PropertyAttributes)> {
        self.profiler.record_access(self);
        self.build_property_map().get(name).copied()
    }

    /// Property names in insertion (offset) order.
    pub fn property_names(&self) -> Vec<String> {
        let map = self.build_property_map();
        let mut names: Vec<(&String, u32)> = map.iter().map(|(k, (off, _))| (k, *off)).collect();
        names.sort_by_key(|(_, off)| *off);
        names.into_iter().map(|(k, _)| k.clone()).collect()
    }

    /// Whether this shape has been deprecated in favor of another.
    pub fn is_deprecated(&self) -> bool {
        self.deprecated_to.borrow().is_some()
    }

    /// The shape objects holding this one should migrate to, if deprecated.
    pub fn migration_target(&self) -> Option<Rc<HiddenClass>> {
        self.deprecated_to.borrow().clone()
    }

    /// Mark this shape as deprecated, directing objects to `target` instead.
    ///
    /// Used when a shape's structure changes in a way that can't be
    /// expressed as a simple append (e.g. a property is deleted), so
    /// JIT code compiled against this shape must deoptimize.
    pub fn deprecate(self: &Rc<Self>, target: Rc<HiddenClass>) {
        self.profiler.record_deprecation(self);
        self.deopt.on_shape_deprecation(self, &target);
        *self.deprecated_to.borrow_mut() = Some(target);
    }
}

/// Array element storage specialization.
///
/// Arrays are specialized based on the types of values they actually hold:
/// a freshly created `[1, 2, 3]` is backed by a packed `Smi` array, which is
/// far cheaper to store and iterate than a generic object array. Adding a
/// float widens it to `Double`; adding anything else widens it to `Object`.
/// A "holey" array (one with a gap, e.g. from `arr[10] = 1` on a 3-element
/// array) can never become packed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Packed small integers (fits in a tagged `Smi`).
    Smi,
    /// Packed floating-point numbers.
    Double,
    /// Packed arbitrary values (strings, objects, mixed types).
    Object,
    /// `Smi` array with one or more holes.
    HoleySmi,
    /// `Double` array with one or more holes.
    HoleyDouble,
    /// `Object` array with one or more holes.
    HoleyObject,
}

impl ElementKind {
    /// Whether this element kind already has holes.
    pub fn is_holey(self) -> bool {
        matches!(
            self,
            ElementKind::HoleySmi | ElementKind::HoleyDouble | ElementKind::HoleyObject
        )
    }

    /// The holey variant of this element kind (idempotent if already holey).
    pub fn to_holey(self) -> ElementKind {
        match self {
            ElementKind::Smi | ElementKind::HoleySmi => ElementKind::HoleySmi,
            ElementKind::Double | ElementKind::HoleyDouble => ElementKind::HoleyDouble,
            ElementKind::Object | ElementKind::HoleyObject => ElementKind::HoleyObject,
        }
    }

    fn rank(self) -> u8 {
        match self {
            ElementKind::Smi | ElementKind::HoleySmi => 0,
            ElementKind::Double | ElementKind::HoleyDouble => 1,
            ElementKind::Object | ElementKind::HoleyObject => 2,
        }
    }

    /// Join two element kinds along the one-way `Smi -> Double -> Object`
    /// and `packed -> holey` lattices, producing the most general kind that
    /// covers both. Used when widening an array's element kind after
    /// observing a value it can't represent in its current representation.
    pub fn join(self, other: ElementKind) -> ElementKind {
        let holey = self.is_holey() || other.is_holey();
        let rank = self.rank().max(other.rank());
        let packed = match rank {
            0 => ElementKind::Smi,
            1 => ElementKind::Double,
            _ => ElementKind::Object,
        };
        if holey {
            packed.to_holey()
        } else {
            packed
        }
    }
}

/// Specialized shape tracking an array's element-kind transition.
///
/// Unlike [`HiddenClass`], an `ArrayShape` doesn't track named properties;
/// it tracks the representation of the array's indexed elements, which the
/// JIT uses to pick between unboxed-integer, unboxed-float, and tagged
/// storage loops.
#[derive(Debug)]
pub struct ArrayShape {
    element_kind: std::cell::Cell<ElementKind>,
}

impl ArrayShape {
    /// Create an array shape starting in the most specific (`Smi`) kind.
    pub fn new() -> Self {
        Self {
            element_kind: std::cell::Cell::new(ElementKind::Smi),
        }
    }

    /// Current element kind.
    pub fn element_kind(&self) -> ElementKind {
        self.element_kind.get()
    }

    /// Widen the element kind after observing a value of `observed` kind.
    ///
    /// Transitions are monotonic: the array never narrows back to a more
    /// specific kind, even if every `Object`-kind value were later removed.
    pub fn observe(&self, observed: ElementKind) {
        let joined = self.element_kind.get().join(observed);
        self.element_kind.set(joined);
    }

    /// Mark the array as holey without widening its element kind otherwise.
    pub fn mark_holey(&self) {
        self.element_kind.set(self.element_kind.get().to_holey());
    }
}

impl Default for ArrayShape {
    fn default() -> Self {
        Self::new()
    }
}
