//! Built-in sample detection sets.

use crate::detection::Detection;
use crate::geometry::NormalizedRect;
use crate::taxonomy::ElementKind;

/// Sketch size the login sample was drawn on.
const LOGIN_SKETCH: (f32, f32) = (375.0, 667.0);

fn sketch_rect(x: f32, y: f32, width: f32, height: f32) -> NormalizedRect {
    let (sw, sh) = LOGIN_SKETCH;
    NormalizedRect::new(x / sw, y / sh, width / sw, height / sh)
}

/// A hand-drawn login screen: logo, welcome text, email and password fields,
/// sign-in button, "Forgot Password?" link and create-account button.
///
/// Every element sits on its own row.
#[must_use]
pub fn login_form() -> Vec<Detection> {
    vec![
        Detection::new(ElementKind::Image, sketch_rect(137.0, 50.0, 100.0, 100.0))
            .with_label("Logo")
            .with_confidence(0.91),
        Detection::new(ElementKind::Text, sketch_rect(87.0, 180.0, 200.0, 40.0))
            .with_label("Welcome Back")
            .with_confidence(0.88),
        Detection::new(ElementKind::TextField, sketch_rect(40.0, 260.0, 295.0, 50.0))
            .with_label("Email")
            .with_confidence(0.94),
        Detection::new(ElementKind::TextField, sketch_rect(40.0, 330.0, 295.0, 50.0))
            .with_label("Password")
            .with_confidence(0.93),
        Detection::new(ElementKind::Button, sketch_rect(40.0, 420.0, 295.0, 55.0))
            .with_label("SIGN IN")
            .with_confidence(0.96),
        Detection::new(ElementKind::Text, sketch_rect(100.0, 495.0, 175.0, 30.0))
            .with_label("Forgot Password?")
            .with_confidence(0.82),
        Detection::new(ElementKind::Button, sketch_rect(40.0, 550.0, 295.0, 55.0))
            .with_label("CREATE ACCOUNT")
            .with_confidence(0.95),
    ]
}
