//! Fading body trails
//!
//! Trails accumulate in an off-screen layer: each frame the layer is faded
//! toward the background, composited onto the visible surface, and the
//! bodies are stamped into it again.

use super::surface::{Canvas, DrawSurface};
use crate::consts::TRAIL_ALPHA;
use crate::sim::Body;
use crate::{Rgba, Viewport, to_pixels};

/// How trails are drawn this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailStyle {
    pub enabled: bool,
    /// Frames for a stamp to fade out
    pub length: u32,
    /// Alpha of each stamp in the layer
    pub alpha: u8,
}

impl TrailStyle {
    pub fn new(enabled: bool, length: u32) -> Self {
        Self {
            enabled,
            length: length.max(1),
            alpha: TRAIL_ALPHA,
        }
    }

    /// Background alpha painted over the layer each frame
    pub fn fade_alpha(&self) -> u8 {
        255u32.div_ceil(self.length.max(1)).min(255) as u8
    }
}

/// Owns the trail accumulation layer
pub struct TrailRenderer<L: Canvas> {
    layer: L,
    viewport: Viewport,
}

impl<L: Canvas> TrailRenderer<L> {
    pub fn new<S: DrawSurface<Layer = L>>(surface: &mut S, viewport: Viewport) -> Self {
        Self {
            layer: Self::fresh_layer(surface, viewport),
            viewport,
        }
    }

    fn fresh_layer<S: DrawSurface<Layer = L>>(surface: &mut S, viewport: Viewport) -> L {
        let mut layer = surface.create_layer(viewport.width, viewport.height);
        layer.clear();
        layer
    }

    /// Replace the layer with a new, cleared one (old trails are dropped)
    pub fn resize<S: DrawSurface<Layer = L>>(&mut self, surface: &mut S, viewport: Viewport) {
        self.layer = Self::fresh_layer(surface, viewport);
        self.viewport = viewport;
    }

    /// Drop accumulated trails without reallocating
    pub fn clear(&mut self) {
        self.layer.clear();
    }

    pub fn layer(&self) -> &L {
        &self.layer
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Draw one frame: background, faded trails, then current positions
    pub fn draw_frame<S: DrawSurface<Layer = L>>(
        &mut self,
        surface: &mut S,
        background: Rgba,
        bodies: &[Body],
        style: TrailStyle,
    ) {
        surface.clear();
        surface.draw_background(background);

        if style.enabled {
            self.layer
                .draw_background(background.with_alpha(style.fade_alpha()));
        } else {
            self.layer.clear();
        }
        surface.composite(&self.layer, 0, 0);

        for body in bodies {
            let x = to_pixels(body.state.pos.x);
            let y = to_pixels(body.state.pos.y);
            let radius = to_pixels(body.radius());
            let color = body.params.color;

            if style.enabled {
                self.layer
                    .draw_circle(x, y, radius, color.with_alpha(style.alpha));
            }
            surface.draw_circle(x, y, radius, color.with_alpha(255));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::PixelBuffer;
    use crate::sim::BodyParams;
    use glam::Vec2;

    const BG: Rgba = Rgba::opaque(20, 20, 30);

    fn body_at_px(x: f32, y: f32) -> Body {
        Body::new(
            BodyParams {
                mass: 1.0,
                size: 0.1,
                gravity: 0.0,
                restitution: 1.0,
                friction_mu: 0.0,
                color: Rgba::opaque(250, 10, 10),
            },
            Vec2::new(x / 100.0, y / 100.0),
        )
    }

    fn setup() -> (PixelBuffer, TrailRenderer<PixelBuffer>) {
        let mut surface = PixelBuffer::new(100, 100);
        let trail = TrailRenderer::new(&mut surface, Viewport::new(100, 100));
        (surface, trail)
    }

    #[test]
    fn test_fade_alpha() {
        assert_eq!(TrailStyle::new(true, 100).fade_alpha(), 3);
        assert_eq!(TrailStyle::new(true, 1).fade_alpha(), 255);
        assert_eq!(TrailStyle::new(true, 0).length, 1);
    }

    #[test]
    fn test_enabled_trail_persists_in_layer() {
        let (mut surface, mut trail) = setup();
        let style = TrailStyle::new(true, 100);

        trail.draw_frame(&mut surface, BG, &[body_at_px(20.0, 20.0)], style);
        trail.draw_frame(&mut surface, BG, &[body_at_px(70.0, 70.0)], style);

        // Old position remains in the layer and on screen
        let stamp = trail.layer().pixel(20, 20).unwrap();
        assert!(stamp.a > 0);
        assert_ne!(surface.pixel(20, 20), Some(BG));
        // Current position drawn opaque
        assert_eq!(surface.pixel(70, 70), Some(Rgba::opaque(250, 10, 10)));
    }

    #[test]
    fn test_disabled_trail_has_no_persistence() {
        let (mut surface, mut trail) = setup();
        let style = TrailStyle::new(false, 100);

        trail.draw_frame(&mut surface, BG, &[body_at_px(20.0, 20.0)], style);
        trail.draw_frame(&mut surface, BG, &[body_at_px(70.0, 70.0)], style);

        assert!(trail.layer().is_clear());
        assert_eq!(surface.pixel(20, 20), Some(BG));
        assert_eq!(surface.pixel(70, 70), Some(Rgba::opaque(250, 10, 10)));
    }

    #[test]
    fn test_resize_drops_trails() {
        let (mut surface, mut trail) = setup();
        trail.draw_frame(&mut surface, BG, &[body_at_px(20.0, 20.0)], TrailStyle::new(true, 10));
        assert!(!trail.layer().is_clear());

        surface.resize(50, 40);
        trail.resize(&mut surface, Viewport::new(50, 40));
        assert!(trail.layer().is_clear());
        assert_eq!((trail.layer().width(), trail.layer().height()), (50, 40));
        assert_eq!(trail.viewport(), Viewport::new(50, 40));
    }
}
