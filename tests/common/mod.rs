#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use inkfolio_wasm::scroll::{AnimationTarget, Bounds};
use inkfolio_wasm::tween::VisualState;

/// Stand-in element: movable bounds, and a log of every style written.
#[derive(Clone, Default)]
pub struct Probe(Rc<ProbeState>);

#[derive(Default)]
pub struct ProbeState {
    bounds: Cell<Option<Bounds>>,
    applied: RefCell<Vec<VisualState>>,
    paths: RefCell<Vec<String>>,
}

impl Probe {
    pub fn at(top: f64, height: f64) -> Self {
        let probe = Self::default();
        probe.place(top, height);
        probe
    }

    pub fn detached() -> Self {
        Self::default()
    }

    pub fn place(&self, top: f64, height: f64) {
        self.0.bounds.set(Some(Bounds { top, bottom: top + height }));
    }

    pub fn detach(&self) {
        self.0.bounds.set(None);
    }

    pub fn writes(&self) -> usize {
        self.0.applied.borrow().len()
    }

    pub fn last(&self) -> Option<VisualState> {
        self.0.applied.borrow().last().copied()
    }

    pub fn last_path(&self) -> Option<String> {
        self.0.paths.borrow().last().cloned()
    }
}

impl AnimationTarget for Probe {
    fn bounds(&self) -> Option<Bounds> {
        self.0.bounds.get()
    }

    fn apply(&self, state: &VisualState) {
        self.0.applied.borrow_mut().push(*state);
    }

    fn set_path(&self, d: &str) {
        self.0.paths.borrow_mut().push(d.to_string());
    }
}

pub fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

pub fn at_rest(state: &VisualState) -> bool {
    let rest = VisualState::REST;
    close(state.opacity, rest.opacity)
        && close(state.x, rest.x)
        && close(state.y, rest.y)
        && close(state.scale, rest.scale)
        && close(state.rotation, rest.rotation)
        && close(state.rotation_x, rest.rotation_x)
        && close(state.rotation_y, rest.rotation_y)
}
