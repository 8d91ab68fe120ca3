//! WGSL sources with a single substitutable slot.
//!
//! A template carries exactly one `{{transform}}` placeholder, the body of the
//! local-to-clip mapping applied to a `vec4<f32>` named `p`. It is resolved
//! once per pipeline build.

use crate::coords::Transform;

pub(crate) const CONSOLE_TEMPLATE: &str = include_str!("shaders/console.wgsl");

const TRANSFORM_SLOT: &str = "{{transform}}";

/// How the shader maps local positions to clip space.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TransformSlot {
    /// Positions are already in clip space.
    Identity,
    /// Positions go through the `transform` matrix of the uniform block.
    Matrix,
}

impl TransformSlot {
    pub fn for_transform(transform: &Transform) -> Self {
        if transform.is_identity() {
            TransformSlot::Identity
        } else {
            TransformSlot::Matrix
        }
    }

    pub fn expression(self) -> &'static str {
        match self {
            TransformSlot::Identity => "p",
            TransformSlot::Matrix => "u.transform * p",
        }
    }
}

/// Fills the transform slot of `template`.
pub(crate) fn resolve(template: &str, slot: TransformSlot) -> String {
    debug_assert_eq!(
        template.matches(TRANSFORM_SLOT).count(),
        1,
        "shader template must carry exactly one transform slot"
    );
    template.replacen(TRANSFORM_SLOT, slot.expression(), 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_template_has_one_slot() {
        assert_eq!(CONSOLE_TEMPLATE.matches(TRANSFORM_SLOT).count(), 1);
    }

    #[test]
    fn resolve_substitutes_expression() {
        let src = resolve(CONSOLE_TEMPLATE, TransformSlot::Matrix);
        assert!(!src.contains(TRANSFORM_SLOT));
        assert!(src.contains("return u.transform * p;"));

        let src = resolve(CONSOLE_TEMPLATE, TransformSlot::Identity);
        assert!(src.contains("return p;"));
    }

    #[test]
    fn slot_follows_transform() {
        assert_eq!(TransformSlot::for_transform(&Transform::identity()), TransformSlot::Identity);
        assert_eq!(
            TransformSlot::for_transform(&Transform::translate(1.0, 0.0)),
            TransformSlot::Matrix
        );
    }
}
