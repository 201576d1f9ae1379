//! The typed intermediate representation produced by translation.
//!
//! Nodes are built once and immutable afterward. A [`Program`] is the sole
//! root and owns its whole subtree; the only sharing is [`Var`] references,
//! which point back into the declaring function's symbol table via `Rc`
//! rather than owning the symbol.

use std::fmt;
use std::rc::Rc;

use crate::typing::ty::Ty;
use crate::utils::{indent_lines, join, map_join};

/// Root node: import names and function declarations, both in declaration
/// order. The order matters for downstream codegen context, not semantics.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub imports: Vec<String>,
    pub fns: Vec<FnDecl>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FnDecl {
    pub name: String,
    pub params: Vec<Rc<Var>>,
    pub ret: Ty,
    pub body: Block,
}

/// A symbol: unique name within its declaring function plus its type.
#[derive(Clone, Debug, PartialEq)]
pub struct Var {
    pub name: String,
    pub ty: Ty,
}

impl Var {
    pub fn new<S: Into<String>>(name: S, ty: Ty) -> Var {
        Var {
            name: name.into(),
            ty,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Block(pub Vec<Stmt>);

#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    /// A bare annotated declaration; registers the symbol, assigns nothing.
    Decl(Rc<Var>),
    /// The target is a reference to a previously registered symbol.
    Assign { target: Rc<Var>, value: Expr },
    /// The else block may be empty, never absent.
    If { cond: Expr, then: Block, els: Block },
    While { cond: Expr, body: Vec<Stmt> },
    Return(Option<Expr>),
    Branch(BranchKind),
    Expr(Expr),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BranchKind {
    Break,
    Continue,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Var(Rc<Var>),
    Lit(LitVal),
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    UnaryOp {
        op: UnOp,
        operand: Box<Expr>,
    },
    /// Callee identities stay name references; forward references and
    /// recursion resolve later, against the pre-registered function names.
    Call {
        func: Callee,
        args: Vec<Expr>,
    },
    /// A synthesis hole: one of the alternatives is picked downstream.
    Choose(Vec<Expr>),
    /// Attribute access; not further resolved by the translator.
    Field {
        target: Box<Expr>,
        attr: String,
    },
    ListAccess {
        target: Box<Expr>,
        index: Box<Expr>,
    },
    /// A starred (variadic-expansion) argument.
    Unpack(Box<Expr>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Callee {
    Name(String),
    Field { target: Box<Expr>, attr: String },
}

/// Booleans and integers are distinct variants even though a boolean is
/// representable as an integer.
#[derive(Clone, Debug, PartialEq)]
pub enum LitVal {
    Bool(bool),
    Int(i64),
    None,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    /// Division rounds toward negative infinity, not zero.
    FloorDiv,
    Eq,
    Lt,
    Gt,
    Le,
    Ge,
    Ne,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnOp {
    Not,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in &self.imports {
            writeln!(f, "import {}", name)?;
        }
        if !self.imports.is_empty() && !self.fns.is_empty() {
            writeln!(f)?;
        }
        write!(f, "{}", join(&self.fns, "\n\n"))
    }
}

impl fmt::Display for FnDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fn {}({}) -> {} {{\n{}\n}}",
            self.name,
            map_join(&self.params, ", ", |p| format!("{}: {}", p.name, p.ty)),
            self.ret,
            indent_lines(&self.body, 2)
        )
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", join(&self.0, "\n"))
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Decl(v) => write!(f, "let {}: {}", v.name, v.ty),
            Stmt::Assign { target, value } => write!(f, "{} = {}", target.name, value),
            Stmt::If { cond, then, els } => {
                write!(f, "if {} {{\n{}\n}}", cond, indent_lines(then, 2))?;
                if !els.0.is_empty() {
                    write!(f, " else {{\n{}\n}}", indent_lines(els, 2))?;
                }
                Ok(())
            }
            Stmt::While { cond, body } => write!(
                f,
                "while {} {{\n{}\n}}",
                cond,
                indent_lines(join(body, "\n"), 2)
            ),
            Stmt::Return(None) => write!(f, "ret"),
            Stmt::Return(Some(e)) => write!(f, "ret {}", e),
            Stmt::Branch(BranchKind::Break) => write!(f, "break"),
            Stmt::Branch(BranchKind::Continue) => write!(f, "continue"),
            Stmt::Expr(e) => write!(f, "{}", e),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Var(v) => write!(f, "{}", v.name),
            Expr::Lit(l) => write!(f, "{}", l),
            Expr::BinaryOp { op, left, right } => write!(f, "({} {} {})", left, op, right),
            Expr::UnaryOp { op, operand } => write!(f, "{}{}", op, operand),
            Expr::Call { func, args } => write!(f, "{}({})", func, join(args, ", ")),
            Expr::Choose(alts) => write!(f, "choose({})", join(alts, ", ")),
            Expr::Field { target, attr } => write!(f, "{}.{}", target, attr),
            Expr::ListAccess { target, index } => write!(f, "{}[{}]", target, index),
            Expr::Unpack(e) => write!(f, "*{}", e),
        }
    }
}

impl fmt::Display for Callee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callee::Name(name) => write!(f, "{}", name),
            Callee::Field { target, attr } => write!(f, "{}.{}", target, attr),
        }
    }
}

impl fmt::Display for LitVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LitVal::Bool(b) => write!(f, "{}", b),
            LitVal::Int(i) => write!(f, "{}", i),
            LitVal::None => write!(f, "none"),
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                BinOp::Add => "+",
                BinOp::Sub => "-",
                BinOp::Mul => "*",
                BinOp::FloorDiv => "//",
                BinOp::Eq => "==",
                BinOp::Lt => "<",
                BinOp::Gt => ">",
                BinOp::Le => "<=",
                BinOp::Ge => ">=",
                BinOp::Ne => "!=",
            }
        )
    }
}

impl fmt::Display for UnOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnOp::Not => write!(f, "!"),
        }
    }
}
