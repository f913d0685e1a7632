//! Scoped canvas state.
//!
//! Each guard changes one piece of canvas state on creation and puts the
//! previous value back when dropped, so early returns cannot leak a rotated
//! transform, a clip or an anti-aliasing mode. Guards deref to the canvas.

use std::ops::{Deref, DerefMut};

use glam::DAffine2;

use crate::canvas::{Canvas, ClipRegion, Path};
use crate::geometry::rotation_at;
use crate::types::PtPx;

pub struct TransformGuard<'a> {
    canvas: &'a mut dyn Canvas,
    saved: DAffine2,
}

impl<'a> TransformGuard<'a> {
    /// Apply `extra` on top of the current transform
    pub fn new(canvas: &'a mut dyn Canvas, extra: DAffine2) -> Self {
        let saved = canvas.transform();
        canvas.set_transform(saved * extra);
        TransformGuard { canvas, saved }
    }

    /// Rotate by `degrees` (clockwise) around `pivot`
    pub fn rotated(canvas: &'a mut dyn Canvas, degrees: f64, pivot: PtPx) -> Self {
        Self::new(canvas, rotation_at(degrees, pivot))
    }

    /// The transform that will be restored
    pub fn saved(&self) -> DAffine2 {
        self.saved
    }
}

impl<'a> Deref for TransformGuard<'a> {
    type Target = dyn Canvas + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.canvas
    }
}

impl<'a> DerefMut for TransformGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.canvas
    }
}

impl Drop for TransformGuard<'_> {
    fn drop(&mut self) {
        self.canvas.set_transform(self.saved);
    }
}

pub struct ClipGuard<'a> {
    canvas: &'a mut dyn Canvas,
    saved: Option<ClipRegion>,
}

impl<'a> ClipGuard<'a> {
    /// Intersect the current clip with `path`, taken under the current transform
    pub fn new(canvas: &'a mut dyn Canvas, path: Path) -> Self {
        let saved = canvas.clip();
        let transform = canvas.transform();
        let region = match saved.clone() {
            Some(region) => region.intersect(path, transform),
            None => ClipRegion::new(path, transform),
        };
        canvas.set_clip(Some(region));
        ClipGuard { canvas, saved }
    }
}

impl<'a> Deref for ClipGuard<'a> {
    type Target = dyn Canvas + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.canvas
    }
}

impl<'a> DerefMut for ClipGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.canvas
    }
}

impl Drop for ClipGuard<'_> {
    fn drop(&mut self) {
        self.canvas.set_clip(self.saved.take());
    }
}

pub struct AntiAliasGuard<'a> {
    canvas: &'a mut dyn Canvas,
    saved: bool,
}

impl<'a> AntiAliasGuard<'a> {
    pub fn new(canvas: &'a mut dyn Canvas, on: bool) -> Self {
        let saved = canvas.anti_alias();
        if saved != on {
            canvas.set_anti_alias(on);
        }
        AntiAliasGuard { canvas, saved }
    }
}

impl<'a> Deref for AntiAliasGuard<'a> {
    type Target = dyn Canvas + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.canvas
    }
}

impl<'a> DerefMut for AntiAliasGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.canvas
    }
}

impl Drop for AntiAliasGuard<'_> {
    fn drop(&mut self) {
        if self.canvas.anti_alias() != self.saved {
            self.canvas.set_anti_alias(self.saved);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RecordingCanvas;
    use crate::types::{Px, Size, ppx, rpx};

    fn canvas() -> RecordingCanvas {
        RecordingCanvas::new(Size::new(Px(100.0), Px(100.0)))
    }

    #[test]
    fn transform_restored_on_early_return() {
        fn draw(canvas: &mut dyn Canvas, bail: bool) -> Option<()> {
            let mut g = TransformGuard::rotated(canvas, 45.0, ppx(10.0, 10.0));
            if bail {
                return None;
            }
            g.draw_line(ppx(0.0, 0.0), ppx(1.0, 1.0), &crate::canvas::Stroke::solid(
                crate::types::Color::BLACK,
                1.0,
            ));
            Some(())
        }
        let mut c = canvas();
        assert!(draw(&mut c, true).is_none());
        assert_eq!(c.transform(), DAffine2::IDENTITY);
        assert!(draw(&mut c, false).is_some());
        assert_eq!(c.transform(), DAffine2::IDENTITY);
        assert_ne!(c.draws()[0].transform, DAffine2::IDENTITY);
    }

    #[test]
    fn nested_clips_intersect_and_unwind() {
        let mut c = canvas();
        {
            let mut outer = ClipGuard::new(&mut c, Path::rect(rpx(0.0, 0.0, 50.0, 50.0)));
            {
                let inner = ClipGuard::new(&mut *outer, Path::rect(rpx(10.0, 10.0, 5.0, 5.0)));
                assert_eq!(inner.clip().map(|r| r.shapes().len()), Some(2));
            }
            assert_eq!(outer.clip().map(|r| r.shapes().len()), Some(1));
        }
        assert!(c.clip().is_none());
    }

    #[test]
    fn anti_alias_toggle_is_scoped() {
        let mut c = canvas();
        {
            let g = AntiAliasGuard::new(&mut c, false);
            assert!(!g.anti_alias());
        }
        assert!(c.anti_alias());
    }
}
