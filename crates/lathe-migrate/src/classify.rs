//! Shape classification for matched calls.

use lathe_resolve::TypeDescriptor;
use thiserror::Error;

/// Coarse classification of one argument's resolved type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ArgumentKind {
    /// `java.lang.String`.
    Text,
    /// A supplier of the message, evaluated lazily.
    TextSupplier,
    /// `float`/`double` or their boxes.
    Floating,
    /// Every other resolved type, and everything unresolved.
    Other,
}

impl ArgumentKind {
    pub fn of(ty: &TypeDescriptor) -> Self {
        if ty.is_floating_point() {
            Self::Floating
        } else if ty.is_string() {
            Self::Text
        } else if ty.is_supplier() {
            Self::TextSupplier
        } else {
            Self::Other
        }
    }
}

/// How the replacement chain phrases its message link.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MessageStyle {
    /// Eagerly evaluated string message: `as(message)`.
    Labelled,
    /// Supplier or unresolved message: the deferred link.
    Deferred,
}

impl MessageStyle {
    fn for_message(kind: ArgumentKind) -> Self {
        match kind {
            ArgumentKind::Text => Self::Labelled,
            _ => Self::Deferred,
        }
    }
}

/// The replacement chain shapes the emitter knows how to build.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RewriteShape {
    /// `assertThat(actual).isEqualTo(expected)`
    Equality,
    /// `assertThat(actual).<message link>(message).isEqualTo(expected)`
    MessageEquality(MessageStyle),
    /// `assertThat(actual).isCloseTo(expected, within(delta))`
    Tolerance,
    /// `assertThat(actual).<message link>(message).isCloseTo(expected, within(delta))`
    MessageTolerance(MessageStyle),
}

/// A matched call whose argument list has no replacement shape.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[error("unsupported argument count {arity}")]
pub struct UnsupportedShape {
    pub arity: usize,
}

/// Decides the replacement shape from the argument list:
///
/// * 2 args: plain equality.
/// * 3 args, third floating-point: tolerance, third arg is the delta.
/// * 3 args otherwise: message then equality, third arg is the message.
/// * 4 args: message then tolerance; third is the message, fourth the delta.
/// * anything else: unsupported, the call stays untouched.
///
/// The four-argument row trusts the arity alone; the delta's type is not
/// re-verified. An unresolved third argument reads as a message, never as a
/// delta, so unknown types degrade to the message form instead of inventing
/// a tolerance.
pub fn classify(kinds: &[ArgumentKind]) -> Result<RewriteShape, UnsupportedShape> {
    match kinds {
        [_, _] => Ok(RewriteShape::Equality),
        [_, _, ArgumentKind::Floating] => Ok(RewriteShape::Tolerance),
        [_, _, third] => Ok(RewriteShape::MessageEquality(MessageStyle::for_message(*third))),
        [_, _, third, _] => Ok(RewriteShape::MessageTolerance(MessageStyle::for_message(*third))),
        other => Err(UnsupportedShape { arity: other.len() }),
    }
}
