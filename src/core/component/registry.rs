//=========================================================================
// Component Registry
//=========================================================================
//
// Ordered list of live components. Insertion order is the tie-breaker
// for both passes (stable sort), so it is preserved by every operation.
//
// The registry is never iterated directly by a pass: passes work on a
// `snapshot()` and scene changes replace the contents wholesale between
// passes.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Rc;

use log::warn;

//=== Internal Dependencies ===============================================

use super::{same_component, ComponentRef};

//=== Registry ============================================================

#[derive(Default)]
pub struct Registry {
    components: Vec<ComponentRef>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Membership -------------------------------------------------------

    /// Appends a component. Returns `false` if it was already registered.
    pub fn add(&mut self, component: ComponentRef) -> bool {
        if self.contains(&component) {
            warn!(target: "scheduler", "Component already registered, ignoring add");
            return false;
        }
        self.components.push(component);
        true
    }

    /// Removes a component. Returns `false` if it was not registered.
    pub fn remove(&mut self, component: &ComponentRef) -> bool {
        match self.components.iter().position(|c| same_component(c, component)) {
            Some(index) => {
                self.components.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, component: &ComponentRef) -> bool {
        self.components.iter().any(|c| same_component(c, component))
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentRef> {
        self.components.iter()
    }

    //--- Snapshots & Replacement ------------------------------------------

    /// Cloned handles in registry order.
    pub fn snapshot(&self) -> Vec<ComponentRef> {
        self.components.iter().map(Rc::clone).collect()
    }

    /// Empties the registry, splitting it into `(persistent, transient)`
    /// with registry order kept inside each half.
    pub fn take_partitioned(&mut self) -> (Vec<ComponentRef>, Vec<ComponentRef>) {
        std::mem::take(&mut self.components)
            .into_iter()
            .partition(|c| c.borrow().is_persistent())
    }

    /// Replaces the contents wholesale.
    pub fn replace(&mut self, components: Vec<ComponentRef>) {
        self.components = components;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::component::Component;
    use std::cell::RefCell;

    struct Tagged {
        persistent: bool,
    }

    impl Component for Tagged {
        fn is_persistent(&self) -> bool {
            self.persistent
        }
    }

    fn tagged(persistent: bool) -> ComponentRef {
        Rc::new(RefCell::new(Tagged { persistent }))
    }

    #[test]
    fn add_is_idempotent_per_component() {
        let mut registry = Registry::new();
        let a = tagged(false);

        assert!(registry.add(Rc::clone(&a)));
        assert!(!registry.add(Rc::clone(&a)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn remove_preserves_order_of_the_rest() {
        let mut registry = Registry::new();
        let (a, b, c) = (tagged(false), tagged(false), tagged(false));
        registry.add(Rc::clone(&a));
        registry.add(Rc::clone(&b));
        registry.add(Rc::clone(&c));

        assert!(registry.remove(&b));
        assert!(!registry.remove(&b));

        let snapshot = registry.snapshot();
        assert!(same_component(&snapshot[0], &a));
        assert!(same_component(&snapshot[1], &c));
    }

    #[test]
    fn partition_splits_and_empties() {
        let mut registry = Registry::new();
        let (p1, t1, p2) = (tagged(true), tagged(false), tagged(true));
        registry.add(Rc::clone(&p1));
        registry.add(Rc::clone(&t1));
        registry.add(Rc::clone(&p2));

        let (persistent, transient) = registry.take_partitioned();

        assert!(registry.is_empty());
        assert_eq!(persistent.len(), 2);
        assert!(same_component(&persistent[0], &p1));
        assert!(same_component(&persistent[1], &p2));
        assert_eq!(transient.len(), 1);
        assert!(same_component(&transient[0], &t1));
    }

    #[test]
    fn snapshot_is_detached_from_later_changes() {
        let mut registry = Registry::new();
        registry.add(tagged(false));
        let snapshot = registry.snapshot();

        registry.add(tagged(false));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(registry.len(), 2);
    }
}
