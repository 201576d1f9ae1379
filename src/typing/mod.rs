pub mod ty;

use std::collections::HashMap;

use crate::errors::{LiftError, LiftErrorKind, LiftResult};
use crate::syntax;

use ty::Ty;

/// What a type name stands for in a [`TypeEnv`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TyDef {
    /// A fully resolved type; subscripting it is an error.
    Prim(Ty),
    /// A constructor that takes type arguments via subscript.
    Ctor,
}

/// The injectable name-to-type environment the annotation resolver works
/// against. Nothing here executes code: an annotation is interpreted purely
/// by its tree shape and the names registered in this table. Container and
/// record types extend the environment, not the resolver.
#[derive(Clone, Debug)]
pub struct TypeEnv {
    defs: HashMap<String, TyDef>,
}

impl TypeEnv {
    pub fn new() -> TypeEnv {
        TypeEnv {
            defs: HashMap::new(),
        }
    }

    pub fn register<S: Into<String>>(&mut self, name: S, def: TyDef) {
        self.defs.insert(name.into(), def);
    }

    /// Resolve an annotation sub-tree into a type descriptor.
    ///
    /// Grammar: a bare name, `Base[Arg]`, a bracketed list of annotations
    /// (fixed-arity product), or a parenthesized tuple of annotations (same
    /// product encoding). Any other shape fails; nothing is coerced.
    pub fn resolve(&self, annotation: &syntax::Expr) -> LiftResult<Ty> {
        match annotation {
            syntax::Expr::Name(id) => match self.defs.get(id) {
                Some(TyDef::Prim(ty)) => Ok(ty.clone()),
                Some(TyDef::Ctor) => Ok(Ty::Named(id.clone())),
                None => Err(LiftError {
                    msg: format!("unresolved type name `{}`", id),
                    kind: LiftErrorKind::UnsupportedAnnotation,
                }),
            },
            syntax::Expr::Subscript { value, index } => {
                let base = match &**value {
                    syntax::Expr::Name(id) => match self.defs.get(id) {
                        Some(TyDef::Ctor) => id.clone(),
                        Some(TyDef::Prim(_)) => {
                            return Err(LiftError {
                                msg: format!("`{}` does not take type arguments", id),
                                kind: LiftErrorKind::UnsupportedAnnotation,
                            })
                        }
                        None => {
                            return Err(LiftError {
                                msg: format!("unresolved type name `{}`", id),
                                kind: LiftErrorKind::UnsupportedAnnotation,
                            })
                        }
                    },
                    t => {
                        return Err(LiftError {
                            msg: format!("unsupported subscript base: {:?}", t),
                            kind: LiftErrorKind::UnsupportedAnnotation,
                        })
                    }
                };
                // a tuple slice resolves to a single product argument
                let arg = self.resolve(index)?;
                Ok(Ty::App {
                    base,
                    args: vec![arg],
                })
            }
            syntax::Expr::List(elts) | syntax::Expr::Tuple(elts) => Ok(Ty::Product(
                elts.iter()
                    .map(|e| self.resolve(e))
                    .collect::<LiftResult<Vec<_>>>()?,
            )),
            t => Err(LiftError {
                msg: format!("unsupported type annotation: {:?}", t),
                kind: LiftErrorKind::UnsupportedAnnotation,
            }),
        }
    }
}

impl Default for TypeEnv {
    /// The names the source subset annotates with: the source-level
    /// spellings (`int`, `bool`) and the IR-level ones (`Int`, `Bool`),
    /// plus the `List` and `Tuple` constructors.
    fn default() -> TypeEnv {
        let mut env = TypeEnv::new();
        env.register("int", TyDef::Prim(Ty::Int));
        env.register("Int", TyDef::Prim(Ty::Int));
        env.register("bool", TyDef::Prim(Ty::Bool));
        env.register("Bool", TyDef::Prim(Ty::Bool));
        env.register("None", TyDef::Prim(Ty::Unit));
        env.register("List", TyDef::Ctor);
        env.register("Tuple", TyDef::Ctor);
        env
    }
}
