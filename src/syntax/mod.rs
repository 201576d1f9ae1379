//! The syntax tree handed to the translator by the external source parser.
//!
//! These shapes mirror what the parser produces for the supported source
//! subset. The operator enums are wider than the set the translator can
//! lower; out-of-subset operators exist so the translator can reject them
//! with a description instead of never seeing them.

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Name(String),
    Constant(Const),
    Attribute {
        value: Box<Expr>,
        attr: String,
    },
    BinOp {
        op: BinOpKind,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    UnaryOp {
        op: UnaryOpKind,
        operand: Box<Expr>,
    },
    /// Comparison chains (`a < b < c`) keep the parser's parallel-list
    /// encoding; the translator only accepts a single link.
    Compare {
        left: Box<Expr>,
        ops: Vec<CmpOpKind>,
        comparators: Vec<Expr>,
    },
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
    },
    Subscript {
        value: Box<Expr>,
        index: Box<Expr>,
    },
    Starred(Box<Expr>),
    List(Vec<Expr>),
    Tuple(Vec<Expr>),
}

impl Expr {
    pub fn name<S: Into<String>>(name: S) -> Expr {
        Expr::Name(name.into())
    }

    pub fn int(value: i64) -> Expr {
        Expr::Constant(Const::Int(value))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Const {
    Bool(bool),
    Int(i64),
    Str(String),
    None,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinOpKind {
    Add,
    Sub,
    Mult,
    Div,
    FloorDiv,
    Mod,
    Pow,
    LShift,
    RShift,
    BitOr,
    BitXor,
    BitAnd,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnaryOpKind {
    Not,
    USub,
    UAdd,
    Invert,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CmpOpKind {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    Is,
    IsNot,
    In,
    NotIn,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    Expr(Expr),
    /// `v: t = e`, or just the declaration `v: t`.
    AnnAssign {
        target: String,
        annotation: Expr,
        value: Option<Expr>,
    },
    Assign {
        targets: Vec<Expr>,
        value: Expr,
    },
    If {
        test: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },
    While {
        test: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },
    Return(Option<Expr>),
    Break,
    Continue,
    FunctionDef(FuncDef),
    Import(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: String,
    pub annotation: Expr,
}

impl Param {
    pub fn new<S: Into<String>>(name: S, annotation: Expr) -> Param {
        Param {
            name: name.into(),
            annotation,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FuncDef {
    pub name: String,
    pub params: Vec<Param>,
    pub returns: Expr,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Module {
    pub body: Vec<Stmt>,
}
