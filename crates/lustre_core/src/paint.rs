//! Three-phase owner-draw dispatch
//!
//! Every themed surface (menus, tooltips, grids, message boxes, notifications)
//! exposes the same three extension points, fired in a fixed order for each
//! paint request coming from the host toolkit:
//!
//! 1. [`PaintPhase::Background`]
//! 2. [`PaintPhase::Main`]
//! 3. [`PaintPhase::Foreground`]
//!
//! Phases fire only when the surface reports [`OwnerDraw::self_paints`].
//! Otherwise the host toolkit's default rendering applies and nothing fires.
//!
//! Each phase receives its own copy of the paint region, so a subscriber that
//! adjusts `args.region` never affects the next phase. Canvas opacity set
//! during a phase is restored when the phase ends. Subscribers must not
//! assume the other phases ran.

use smallvec::SmallVec;

use crate::canvas::Canvas;
use crate::geometry::Rect;

/// One of the three owner-draw phases
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaintPhase {
    Background,
    Main,
    Foreground,
}

impl PaintPhase {
    /// All phases in dispatch order
    pub const ORDER: [PaintPhase; 3] = [
        PaintPhase::Background,
        PaintPhase::Main,
        PaintPhase::Foreground,
    ];
}

/// Arguments delivered to a single paint phase
pub struct PaintEventArgs<'a> {
    pub phase: PaintPhase,
    /// Copy of the region being repainted
    pub region: Rect,
    /// Rendering surface to draw into
    pub canvas: &'a mut Canvas,
}

/// Result of a full paint request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaintOutcome {
    /// The surface does not self-paint; the host renders it
    HostDefault,
    /// All three phases were dispatched
    Custom,
}

/// Paint subscriber
pub type PaintHandler = Box<dyn FnMut(&mut PaintEventArgs<'_>)>;

/// Per-phase subscriber lists
#[derive(Default)]
pub struct PaintHooks {
    background: SmallVec<[PaintHandler; 1]>,
    main: SmallVec<[PaintHandler; 1]>,
    foreground: SmallVec<[PaintHandler; 1]>,
}

impl PaintHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to a phase
    pub fn on<F>(&mut self, phase: PaintPhase, handler: F)
    where
        F: FnMut(&mut PaintEventArgs<'_>) + 'static,
    {
        self.list_mut(phase).push(Box::new(handler));
    }

    /// Number of subscribers for a phase
    pub fn len(&self, phase: PaintPhase) -> usize {
        match phase {
            PaintPhase::Background => self.background.len(),
            PaintPhase::Main => self.main.len(),
            PaintPhase::Foreground => self.foreground.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.background.is_empty() && self.main.is_empty() && self.foreground.is_empty()
    }

    pub fn clear(&mut self) {
        self.background.clear();
        self.main.clear();
        self.foreground.clear();
    }

    fn emit(&mut self, args: &mut PaintEventArgs<'_>) {
        for handler in self.list_mut(args.phase).iter_mut() {
            handler(args);
        }
    }

    fn list_mut(&mut self, phase: PaintPhase) -> &mut SmallVec<[PaintHandler; 1]> {
        match phase {
            PaintPhase::Background => &mut self.background,
            PaintPhase::Main => &mut self.main,
            PaintPhase::Foreground => &mut self.foreground,
        }
    }
}

impl std::fmt::Debug for PaintHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaintHooks")
            .field("background", &self.background.len())
            .field("main", &self.main.len())
            .field("foreground", &self.foreground.len())
            .finish()
    }
}

/// Capability implemented by every surface that can draw itself
pub trait OwnerDraw {
    /// Whether the surface suppresses host rendering and draws itself
    fn self_paints(&self) -> bool;

    /// Subscribers for the three extension points
    fn paint_hooks(&mut self) -> &mut PaintHooks;

    /// Built-in rendering for a phase; runs before that phase's subscribers
    fn paint_phase(&mut self, args: &mut PaintEventArgs<'_>) {
        let _ = args;
    }
}

/// Deliver a single phase. Returns `false` when the surface does not self-paint.
pub fn dispatch_phase<S>(
    surface: &mut S,
    phase: PaintPhase,
    canvas: &mut Canvas,
    region: Rect,
) -> bool
where
    S: OwnerDraw + ?Sized,
{
    if !surface.self_paints() {
        return false;
    }

    let opacity = canvas.opacity();
    let mut args = PaintEventArgs {
        phase,
        region,
        canvas,
    };
    surface.paint_phase(&mut args);
    // Subscribers see the region the host asked for, not the built-in's edits
    args.region = region;
    surface.paint_hooks().emit(&mut args);
    args.canvas.set_opacity(opacity);
    true
}

/// Handle a host paint request: all three phases in order, or none.
pub fn dispatch_paint<S>(surface: &mut S, canvas: &mut Canvas, region: Rect) -> PaintOutcome
where
    S: OwnerDraw + ?Sized,
{
    if !surface.self_paints() {
        tracing::trace!("paint request left to host default rendering");
        return PaintOutcome::HostDefault;
    }

    for phase in PaintPhase::ORDER {
        dispatch_phase(surface, phase, canvas, region);
    }
    PaintOutcome::Custom
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Probe {
        self_paints: bool,
        hooks: PaintHooks,
        builtin: Rc<RefCell<Vec<PaintPhase>>>,
    }

    impl OwnerDraw for Probe {
        fn self_paints(&self) -> bool {
            self.self_paints
        }

        fn paint_hooks(&mut self) -> &mut PaintHooks {
            &mut self.hooks
        }

        fn paint_phase(&mut self, args: &mut PaintEventArgs<'_>) {
            self.builtin.borrow_mut().push(args.phase);
            args.region = Rect::ZERO;
        }
    }

    fn probe(self_paints: bool) -> (Probe, Rc<RefCell<Vec<PaintPhase>>>) {
        let fired = Rc::new(RefCell::new(Vec::new()));
        let mut hooks = PaintHooks::new();
        for phase in PaintPhase::ORDER {
            let fired = Rc::clone(&fired);
            hooks.on(phase, move |args| fired.borrow_mut().push(args.phase));
        }
        let probe = Probe {
            self_paints,
            hooks,
            builtin: Rc::new(RefCell::new(Vec::new())),
        };
        (probe, fired)
    }

    #[test]
    fn no_phase_fires_without_self_paints() {
        let (mut surface, fired) = probe(false);
        let mut canvas = Canvas::new(Rect::new(0.0, 0.0, 10.0, 10.0));

        let bounds = canvas.bounds();
        let outcome = dispatch_paint(&mut surface, &mut canvas, bounds);

        assert_eq!(outcome, PaintOutcome::HostDefault);
        assert!(fired.borrow().is_empty());
        assert!(surface.builtin.borrow().is_empty());
    }

    #[test]
    fn phases_fire_once_in_order() {
        let (mut surface, fired) = probe(true);
        let mut canvas = Canvas::new(Rect::new(0.0, 0.0, 10.0, 10.0));

        let bounds = canvas.bounds();
        let outcome = dispatch_paint(&mut surface, &mut canvas, bounds);

        assert_eq!(outcome, PaintOutcome::Custom);
        assert_eq!(*fired.borrow(), PaintPhase::ORDER.to_vec());
        assert_eq!(*surface.builtin.borrow(), PaintPhase::ORDER.to_vec());
    }

    #[test]
    fn each_phase_gets_its_own_region_copy() {
        let (mut surface, _) = probe(true);
        let seen = Rc::new(RefCell::new(Vec::new()));
        for phase in PaintPhase::ORDER {
            let seen = Rc::clone(&seen);
            surface.hooks.on(phase, move |args| {
                seen.borrow_mut().push(args.region);
                args.region = Rect::new(1.0, 1.0, 1.0, 1.0);
            });
        }
        let region = Rect::new(2.0, 2.0, 4.0, 4.0);
        let mut canvas = Canvas::new(Rect::new(0.0, 0.0, 10.0, 10.0));

        dispatch_paint(&mut surface, &mut canvas, region);

        assert_eq!(*seen.borrow(), vec![region; 3]);
    }
}
