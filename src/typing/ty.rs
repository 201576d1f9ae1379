use std::fmt;

use crate::utils::join;

/// A structural type descriptor. Descriptors are owned trees, so they are
/// acyclic by construction, and they are fully resolved before any IR node
/// or signature carries one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ty {
    Int,
    Bool,
    /// The absence-of-value marker.
    Unit,
    /// A registered named type with no dedicated variant.
    Named(String),
    /// A parametric type: base constructor plus ordered type arguments.
    App { base: String, args: Vec<Ty> },
    /// A fixed-arity, positionally typed product.
    Product(Vec<Ty>),
}

impl Ty {
    pub fn is_int(&self) -> bool {
        matches!(self, Ty::Int)
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Int => write!(f, "Int"),
            Ty::Bool => write!(f, "Bool"),
            Ty::Unit => write!(f, "None"),
            Ty::Named(name) => write!(f, "{}", name),
            Ty::App { base, args } => write!(f, "{}[{}]", base, join(args, ", ")),
            Ty::Product(tys) => write!(f, "[{}]", join(tys, ", ")),
        }
    }
}
