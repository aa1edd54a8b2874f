//! Best-effort Java type resolution.
//!
//! [`TypeOracle`] is the seam the migration engine asks about argument types.
//! The bundled [`LexicalTypeOracle`] resolves what a token scanner honestly
//! can: literal shapes, casts, boxing factories, simple arithmetic, and
//! backward declaration lookups. Anything it cannot tell becomes
//! [`TypeDescriptor::Unknown`], and callers take their conservative path.
//! A richer resolver (compiler frontend, project index) can implement the
//! trait and slot in unchanged.

use lathe_core::TextRange;

mod lexical;

pub use lexical::LexicalTypeOracle;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
}

/// Resolved type of a Java expression.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum TypeDescriptor {
    Primitive(PrimitiveType),
    /// Reference type. Fully qualified when the resolver knows the package
    /// (`java.lang.Double`), otherwise the simple name as written.
    Class(String),
    Unknown,
}

impl TypeDescriptor {
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(name.into())
    }

    /// `float`/`double` or their boxes, nothing else. Integral types and
    /// unresolved types are not floating-point.
    pub fn is_floating_point(&self) -> bool {
        match self {
            Self::Primitive(PrimitiveType::Float | PrimitiveType::Double) => true,
            Self::Class(name) => name == "java.lang.Float" || name == "java.lang.Double",
            _ => false,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::Class(name) if name == "java.lang.String")
    }

    pub fn is_supplier(&self) -> bool {
        matches!(self, Self::Class(name) if name == "java.util.function.Supplier")
    }

    /// Numeric in the arithmetic sense: integral or floating, boxed or not.
    pub fn is_numeric(&self) -> bool {
        match self {
            Self::Primitive(p) => !matches!(p, PrimitiveType::Boolean),
            Self::Class(name) => matches!(
                name.as_str(),
                "java.lang.Byte"
                    | "java.lang.Short"
                    | "java.lang.Integer"
                    | "java.lang.Long"
                    | "java.lang.Character"
                    | "java.lang.Float"
                    | "java.lang.Double"
            ),
            Self::Unknown => false,
        }
    }
}

/// Answers type questions about expressions in a single file.
pub trait TypeOracle {
    /// Best-effort type of the expression spanning `expr` in `text`.
    ///
    /// Implementations must be total: a garbage range or an unparseable
    /// expression answers [`TypeDescriptor::Unknown`], never a panic.
    fn resolve_type(&self, text: &str, expr: TextRange) -> TypeDescriptor;
}
