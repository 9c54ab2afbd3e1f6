//! Style authorities
//!
//! A [`StyleAuthority`] owns the `(ColorStyle, ThemeStyle)` pair for a tree of
//! surfaces. Surfaces hold a weak [`AuthorityLink`] back to it; the authority
//! holds [`SurfaceId`]s resolved through a [`SurfaceStore`] on every notify.
//! Ids whose surface is gone, or that were re-attached to another authority,
//! are pruned at that point.

use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::cascade::apply_style;
use crate::style::{ColorStyle, ThemeStyle};
use crate::surface::{SurfaceId, SurfaceStore};

#[derive(Debug)]
struct AuthorityShared {
    color: Cell<ColorStyle>,
    theme: Cell<ThemeStyle>,
}

/// Weak back-reference from a surface to its style authority
#[derive(Clone)]
pub struct AuthorityLink(Weak<AuthorityShared>);

impl AuthorityLink {
    /// Whether the authority is still alive
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }

    /// Current color style of the authority, `None` once it is dropped
    pub fn color_style(&self) -> Option<ColorStyle> {
        self.0.upgrade().map(|shared| shared.color.get())
    }

    /// Current theme style of the authority, `None` once it is dropped
    pub fn theme_style(&self) -> Option<ThemeStyle> {
        self.0.upgrade().map(|shared| shared.theme.get())
    }

    /// Whether this link refers to `authority`
    pub fn points_to(&self, authority: &StyleAuthority) -> bool {
        std::ptr::eq(self.0.as_ptr(), Rc::as_ptr(&authority.shared))
    }
}

impl fmt::Debug for AuthorityLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.upgrade() {
            Some(shared) => f
                .debug_struct("AuthorityLink")
                .field("color", &shared.color.get())
                .field("theme", &shared.theme.get())
                .finish(),
            None => f.write_str("AuthorityLink(<dropped>)"),
        }
    }
}

/// Owner of the style of a surface tree
#[derive(Debug)]
pub struct StyleAuthority {
    shared: Rc<AuthorityShared>,
    surfaces: Vec<SurfaceId>,
}

impl StyleAuthority {
    pub fn new(color: ColorStyle, theme: ThemeStyle) -> Self {
        Self {
            shared: Rc::new(AuthorityShared {
                color: Cell::new(color),
                theme: Cell::new(theme),
            }),
            surfaces: Vec::new(),
        }
    }

    pub fn color_style(&self) -> ColorStyle {
        self.shared.color.get()
    }

    pub fn theme_style(&self) -> ThemeStyle {
        self.shared.theme.get()
    }

    /// A fresh weak link to this authority
    pub fn link(&self) -> AuthorityLink {
        AuthorityLink(Rc::downgrade(&self.shared))
    }

    /// Attached surface ids, in attach order. May include destroyed surfaces
    /// until the next notify.
    pub fn surfaces(&self) -> &[SurfaceId] {
        &self.surfaces
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Attach a surface and run one resolve+apply cycle on it.
    ///
    /// Returns `false` if the surface does not exist.
    pub fn attach<S>(&mut self, store: &mut S, id: SurfaceId) -> bool
    where
        S: SurfaceStore + ?Sized,
    {
        let link = self.link();
        let Some(surface) = store.styled_mut(id) else {
            tracing::trace!("attach of destroyed surface {:?} ignored", id);
            return false;
        };

        surface.surface_style_mut().authority = Some(link);
        let resolved = apply_style(surface);

        if !self.surfaces.contains(&id) {
            self.surfaces.push(id);
        }
        tracing::debug!(
            "attached surface {:?} ({:?}/{:?})",
            id,
            resolved.color,
            resolved.theme
        );
        true
    }

    /// Remove a surface from this authority.
    ///
    /// The surface's back-link is cleared only if it still points here.
    pub fn detach<S>(&mut self, store: &mut S, id: SurfaceId) -> bool
    where
        S: SurfaceStore + ?Sized,
    {
        let Some(pos) = self.surfaces.iter().position(|&s| s == id) else {
            return false;
        };
        self.surfaces.remove(pos);

        if let Some(surface) = store.styled_mut(id) {
            let owned_here = surface
                .surface_style()
                .authority
                .as_ref()
                .is_some_and(|link| link.points_to(self));
            if owned_here {
                surface.surface_style_mut().authority = None;
                apply_style(surface);
            }
        }
        true
    }

    pub fn set_color_style<S>(&mut self, store: &mut S, color: ColorStyle)
    where
        S: SurfaceStore + ?Sized,
    {
        self.shared.color.set(color);
        self.propagate(store);
    }

    pub fn set_theme_style<S>(&mut self, store: &mut S, theme: ThemeStyle)
    where
        S: SurfaceStore + ?Sized,
    {
        self.shared.theme.set(theme);
        self.propagate(store);
    }

    /// Set both axes with a single notification pass
    pub fn set_style<S>(&mut self, store: &mut S, color: ColorStyle, theme: ThemeStyle)
    where
        S: SurfaceStore + ?Sized,
    {
        self.shared.color.set(color);
        self.shared.theme.set(theme);
        self.propagate(store);
    }

    /// An independent authority seeded with this one's style, with only
    /// `new_root` attached. Later changes to either authority do not reach the
    /// other.
    pub fn clone_for<S>(&self, store: &mut S, new_root: SurfaceId) -> StyleAuthority
    where
        S: SurfaceStore + ?Sized,
    {
        let mut authority = StyleAuthority::new(self.color_style(), self.theme_style());
        authority.attach(store, new_root);
        authority
    }

    /// Notify every live surface, pruning the rest
    fn propagate<S>(&mut self, store: &mut S)
    where
        S: SurfaceStore + ?Sized,
    {
        let before = self.surfaces.len();
        let shared = &self.shared;

        self.surfaces.retain(|&id| {
            let Some(surface) = store.styled_mut(id) else {
                return false;
            };
            let owned_here = surface
                .surface_style()
                .authority
                .as_ref()
                .is_some_and(|link| std::ptr::eq(link.0.as_ptr(), Rc::as_ptr(shared)));
            if owned_here {
                apply_style(surface);
            }
            owned_here
        });

        let pruned = before - self.surfaces.len();
        if pruned > 0 {
            tracing::trace!("pruned {} stale surface reference(s)", pruned);
        }
        tracing::debug!(
            "style changed to {:?}/{:?}, {} surface(s) notified",
            shared.color.get(),
            shared.theme.get(),
            self.surfaces.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cascade::resolve_style;
    use crate::style::ResolvedStyle;
    use crate::surface::{StyledSurface, SurfaceRegistry, SurfaceStyle};

    #[derive(Default)]
    struct Probe {
        style: SurfaceStyle,
        notified: Vec<ResolvedStyle>,
    }

    impl StyledSurface for Probe {
        fn surface_style(&self) -> &SurfaceStyle {
            &self.style
        }

        fn surface_style_mut(&mut self) -> &mut SurfaceStyle {
            &mut self.style
        }

        fn style_changed(&mut self, resolved: ResolvedStyle) {
            self.notified.push(resolved);
        }
    }

    #[test]
    fn attach_applies_immediately() {
        let mut registry = SurfaceRegistry::new();
        let id = registry.insert(Probe::default());
        let mut authority = StyleAuthority::new(ColorStyle::Red, ThemeStyle::Dark);

        assert!(authority.attach(&mut registry, id));
        let probe = registry.get(id).unwrap();
        assert_eq!(
            probe.notified,
            vec![ResolvedStyle::new(ColorStyle::Red, ThemeStyle::Dark)]
        );
        assert!(probe.style.authority().unwrap().points_to(&authority));
    }

    #[test]
    fn attach_twice_keeps_one_entry() {
        let mut registry = SurfaceRegistry::new();
        let id = registry.insert(Probe::default());
        let mut authority = StyleAuthority::new(ColorStyle::Red, ThemeStyle::Dark);

        authority.attach(&mut registry, id);
        authority.attach(&mut registry, id);
        assert_eq!(authority.len(), 1);
    }

    #[test]
    fn attach_destroyed_surface_is_ignored() {
        let mut registry = SurfaceRegistry::new();
        let id = registry.insert(Probe::default());
        registry.remove(id);

        let mut authority = StyleAuthority::new(ColorStyle::Red, ThemeStyle::Dark);
        assert!(!authority.attach(&mut registry, id));
        assert!(authority.is_empty());
    }

    #[test]
    fn detach_clears_link_and_falls_back() {
        let mut registry = SurfaceRegistry::new();
        let id = registry.insert(Probe::default());
        let mut authority = StyleAuthority::new(ColorStyle::Red, ThemeStyle::Dark);
        authority.attach(&mut registry, id);

        assert!(authority.detach(&mut registry, id));
        assert!(!authority.detach(&mut registry, id));

        let probe = registry.get(id).unwrap();
        assert!(probe.style.authority().is_none());
        assert_eq!(
            resolve_style(probe),
            ResolvedStyle::new(ColorStyle::Blue, ThemeStyle::Light)
        );
    }

    #[test]
    fn reattached_surface_leaves_old_authority() {
        let mut registry = SurfaceRegistry::new();
        let id = registry.insert(Probe::default());
        let mut first = StyleAuthority::new(ColorStyle::Red, ThemeStyle::Dark);
        let mut second = StyleAuthority::new(ColorStyle::Teal, ThemeStyle::Light);

        first.attach(&mut registry, id);
        second.attach(&mut registry, id);

        first.set_color_style(&mut registry, ColorStyle::Pink);
        assert!(first.is_empty(), "surface owned elsewhere must be pruned");
        assert_eq!(
            resolve_style(registry.get(id).unwrap()).color,
            ColorStyle::Teal
        );

        // Detaching from the old authority must not clear the new link
        first.attach(&mut registry, id);
        second.attach(&mut registry, id);
        first.detach(&mut registry, id);
        assert!(registry.get(id).unwrap().style.authority().unwrap().points_to(&second));
    }

    #[test]
    fn dropped_authority_falls_back() {
        let mut registry = SurfaceRegistry::new();
        let id = registry.insert(Probe::default());
        {
            let mut authority = StyleAuthority::new(ColorStyle::Red, ThemeStyle::Dark);
            authority.attach(&mut registry, id);
        }

        let probe = registry.get(id).unwrap();
        assert!(!probe.style.has_authority());
        assert_eq!(
            resolve_style(probe),
            ResolvedStyle::new(ColorStyle::Blue, ThemeStyle::Light)
        );
    }
}
