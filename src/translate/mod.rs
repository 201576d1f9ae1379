//! Single-pass recursive lowering from the external syntax tree into IR.
//!
//! A module is lowered in two phases: first every declared function name is
//! collected into a registry (and import names in declaration order), then
//! bodies are lowered with read-only access to that registry. This is what
//! lets forward references and recursion resolve by name before the callee's
//! body exists. Translation is all-or-nothing: the first unsupported shape
//! aborts the whole call.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::errors::{LiftError, LiftErrorKind, LiftResult};
use crate::ir;
use crate::syntax::{self, BinOpKind, CmpOpKind, Const, UnaryOpKind};
use crate::typing::TypeEnv;

/// The reserved synthesis-hole callee. A call to this name (or to an
/// attribute path ending in it) lowers to [`ir::Expr::Choose`]; the
/// distinction is made once, syntactically, at the call site.
pub const CHOOSE: &str = "Choose";

pub struct Translator<'e> {
    tenv: &'e TypeEnv,
    /// Function names declared by the module, collected before any body is
    /// lowered; read-only during lowering.
    fns: HashSet<String>,
    imports: Vec<String>,
    /// Per-function symbol table; owns the `Var`s, cleared per function.
    vars: HashMap<String, Rc<ir::Var>>,
}

impl<'e> Translator<'e> {
    pub fn new(tenv: &'e TypeEnv) -> Translator<'e> {
        Translator {
            tenv,
            fns: HashSet::new(),
            imports: vec![],
            vars: HashMap::new(),
        }
    }

    pub fn translate_module(&mut self, module: &syntax::Module) -> LiftResult<ir::Program> {
        self.fns.clear();
        self.imports.clear();

        // phase one: registry of declared names and imports
        for stmt in &module.body {
            match stmt {
                syntax::Stmt::FunctionDef(def) => {
                    self.fns.insert(def.name.clone());
                }
                syntax::Stmt::Import(name) => self.imports.push(name.clone()),
                _ => {}
            }
        }
        log::debug!("[translate] declared fns: {:?}", self.fns);

        // phase two: lower bodies in declaration order
        let mut fns = vec![];
        for stmt in &module.body {
            if let syntax::Stmt::FunctionDef(def) = stmt {
                fns.push(self.translate(def)?);
            }
        }
        Ok(ir::Program {
            imports: self.imports.clone(),
            fns,
        })
    }

    /// Lower one function definition. Parameters are registered into a
    /// fresh symbol table, in declaration order, before the body is visited.
    pub fn translate(&mut self, def: &syntax::FuncDef) -> LiftResult<ir::FnDecl> {
        self.vars.clear();

        let mut params = Vec::with_capacity(def.params.len());
        for p in &def.params {
            let ty = self.tenv.resolve(&p.annotation)?;
            let var = Rc::new(ir::Var::new(&p.name, ty));
            self.vars.insert(var.name.clone(), Rc::clone(&var));
            params.push(var);
        }

        let body = self.lower_stmts(&def.body)?;
        let ret = self.tenv.resolve(&def.returns)?;
        log::debug!("[translate] lowered fn `{}`", def.name);
        Ok(ir::FnDecl {
            name: def.name.clone(),
            params,
            ret,
            body: ir::Block(body),
        })
    }

    fn lower_stmts(&mut self, stmts: &[syntax::Stmt]) -> LiftResult<Vec<ir::Stmt>> {
        stmts.iter().map(|s| self.lower_stmt(s)).collect()
    }

    fn lower_stmt(&mut self, stmt: &syntax::Stmt) -> LiftResult<ir::Stmt> {
        match stmt {
            syntax::Stmt::Expr(e) => Ok(ir::Stmt::Expr(self.lower_expr(e)?)),
            syntax::Stmt::AnnAssign {
                target,
                annotation,
                value,
            } => {
                let ty = self.tenv.resolve(annotation)?;
                let var = Rc::new(ir::Var::new(target, ty));
                self.vars.insert(var.name.clone(), Rc::clone(&var));
                match value {
                    Some(e) => Ok(ir::Stmt::Assign {
                        target: var,
                        value: self.lower_expr(e)?,
                    }),
                    None => Ok(ir::Stmt::Decl(var)),
                }
            }
            syntax::Stmt::Assign { targets, value } => {
                if targets.len() > 1 {
                    return Err(LiftError {
                        msg: format!(
                            "cannot lower {} simultaneous assignment targets",
                            targets.len()
                        ),
                        kind: LiftErrorKind::MultiTargetAssignment,
                    });
                }
                // the target must already be a registered variable
                let target = match targets.first() {
                    Some(syntax::Expr::Name(id)) => self.resolve_var(id)?,
                    Some(t) => {
                        return Err(LiftError {
                            msg: format!("unsupported assignment target: {:?}", t),
                            kind: LiftErrorKind::UnsupportedConstruct,
                        })
                    }
                    None => {
                        return Err(LiftError {
                            msg: str!("assignment with no target"),
                            kind: LiftErrorKind::UnsupportedConstruct,
                        })
                    }
                };
                Ok(ir::Stmt::Assign {
                    target,
                    value: self.lower_expr(value)?,
                })
            }
            syntax::Stmt::If { test, body, orelse } => Ok(ir::Stmt::If {
                cond: self.lower_expr(test)?,
                then: ir::Block(self.lower_stmts(body)?),
                els: ir::Block(self.lower_stmts(orelse)?),
            }),
            syntax::Stmt::While { test, body, orelse } => {
                if !orelse.is_empty() {
                    return Err(LiftError {
                        msg: str!("`else` clause on a `while` loop"),
                        kind: LiftErrorKind::UnsupportedConstruct,
                    });
                }
                Ok(ir::Stmt::While {
                    cond: self.lower_expr(test)?,
                    body: self.lower_stmts(body)?,
                })
            }
            syntax::Stmt::Return(value) => {
                let value = match value {
                    None => None,
                    Some(e) => Some(self.lower_expr(e)?),
                };
                Ok(ir::Stmt::Return(value))
            }
            syntax::Stmt::Break => Ok(ir::Stmt::Branch(ir::BranchKind::Break)),
            syntax::Stmt::Continue => Ok(ir::Stmt::Branch(ir::BranchKind::Continue)),
            syntax::Stmt::FunctionDef(def) => Err(LiftError {
                msg: format!("nested function definition `{}`", def.name),
                kind: LiftErrorKind::UnsupportedConstruct,
            }),
            syntax::Stmt::Import(name) => Err(LiftError {
                msg: format!("import `{}` inside a function body", name),
                kind: LiftErrorKind::UnsupportedConstruct,
            }),
        }
    }

    fn lower_expr(&mut self, expr: &syntax::Expr) -> LiftResult<ir::Expr> {
        match expr {
            // a bare identifier in value position is always a variable
            syntax::Expr::Name(id) => Ok(ir::Expr::Var(self.resolve_var(id)?)),
            syntax::Expr::Constant(c) => Ok(ir::Expr::Lit(self.lower_const(c)?)),
            syntax::Expr::Attribute { value, attr } => Ok(ir::Expr::Field {
                target: Box::new(self.lower_expr(value)?),
                attr: attr.clone(),
            }),
            syntax::Expr::BinOp { op, left, right } => Ok(ir::Expr::BinaryOp {
                op: self.lower_binop(*op)?,
                left: Box::new(self.lower_expr(left)?),
                right: Box::new(self.lower_expr(right)?),
            }),
            syntax::Expr::UnaryOp { op, operand } => {
                let op = match op {
                    UnaryOpKind::Not => ir::UnOp::Not,
                    op => {
                        return Err(LiftError {
                            msg: format!("unsupported unary operator: {:?}", op),
                            kind: LiftErrorKind::UnsupportedConstruct,
                        })
                    }
                };
                Ok(ir::Expr::UnaryOp {
                    op,
                    operand: Box::new(self.lower_expr(operand)?),
                })
            }
            syntax::Expr::Compare {
                left,
                ops,
                comparators,
            } => {
                if ops.len() != 1 || comparators.len() != 1 {
                    return Err(LiftError {
                        msg: format!("chained comparison with {} operators", ops.len()),
                        kind: LiftErrorKind::UnsupportedConstruct,
                    });
                }
                Ok(ir::Expr::BinaryOp {
                    op: self.lower_cmpop(ops[0])?,
                    left: Box::new(self.lower_expr(left)?),
                    right: Box::new(self.lower_expr(&comparators[0])?),
                })
            }
            syntax::Expr::Call { func, args } => self.lower_call(func, args),
            syntax::Expr::Subscript { value, index } => Ok(ir::Expr::ListAccess {
                target: Box::new(self.lower_expr(value)?),
                index: Box::new(self.lower_expr(index)?),
            }),
            syntax::Expr::Starred(e) => Ok(ir::Expr::Unpack(Box::new(self.lower_expr(e)?))),
            e @ (syntax::Expr::List(_) | syntax::Expr::Tuple(_)) => Err(LiftError {
                msg: format!("unsupported expression: {:?}", e),
                kind: LiftErrorKind::UnsupportedConstruct,
            }),
        }
    }

    fn lower_call(&mut self, func: &syntax::Expr, args: &[syntax::Expr]) -> LiftResult<ir::Expr> {
        let args = args
            .iter()
            .map(|a| self.lower_expr(a))
            .collect::<LiftResult<Vec<_>>>()?;

        if is_choose(func) {
            return Ok(ir::Expr::Choose(args));
        }

        // callee-position identifiers pass through without a registration
        // check: the function may be declared later in the module
        let func = match func {
            syntax::Expr::Name(id) => ir::Callee::Name(id.clone()),
            syntax::Expr::Attribute { value, attr } => ir::Callee::Field {
                target: Box::new(self.lower_expr(value)?),
                attr: attr.clone(),
            },
            f => {
                return Err(LiftError {
                    msg: format!("unsupported call target: {:?}", f),
                    kind: LiftErrorKind::UnsupportedConstruct,
                })
            }
        };
        Ok(ir::Expr::Call { func, args })
    }

    fn lower_const(&self, c: &Const) -> LiftResult<ir::LitVal> {
        match c {
            Const::Bool(b) => Ok(ir::LitVal::Bool(*b)),
            Const::Int(i) => Ok(ir::LitVal::Int(*i)),
            Const::None => Ok(ir::LitVal::None),
            Const::Str(s) => Err(LiftError {
                msg: format!("unsupported string literal {:?}", s),
                kind: LiftErrorKind::UnsupportedConstruct,
            }),
        }
    }

    fn lower_binop(&self, op: BinOpKind) -> LiftResult<ir::BinOp> {
        match op {
            BinOpKind::Add => Ok(ir::BinOp::Add),
            BinOpKind::Sub => Ok(ir::BinOp::Sub),
            BinOpKind::Mult => Ok(ir::BinOp::Mul),
            // division in the subset rounds toward negative infinity
            BinOpKind::Div => Ok(ir::BinOp::FloorDiv),
            op => Err(LiftError {
                msg: format!("unsupported binary operator: {:?}", op),
                kind: LiftErrorKind::UnsupportedConstruct,
            }),
        }
    }

    fn lower_cmpop(&self, op: CmpOpKind) -> LiftResult<ir::BinOp> {
        match op {
            CmpOpKind::Eq => Ok(ir::BinOp::Eq),
            CmpOpKind::Lt => Ok(ir::BinOp::Lt),
            CmpOpKind::Gt => Ok(ir::BinOp::Gt),
            CmpOpKind::LtE => Ok(ir::BinOp::Le),
            CmpOpKind::GtE => Ok(ir::BinOp::Ge),
            CmpOpKind::NotEq => Ok(ir::BinOp::Ne),
            op => Err(LiftError {
                msg: format!("unsupported comparison operator: {:?}", op),
                kind: LiftErrorKind::UnsupportedConstruct,
            }),
        }
    }

    fn resolve_var(&self, name: &str) -> LiftResult<Rc<ir::Var>> {
        self.vars.get(name).cloned().ok_or_else(|| LiftError {
            msg: format!("variable not found: {}", name),
            kind: LiftErrorKind::UndeclaredVariable,
        })
    }
}

fn is_choose(func: &syntax::Expr) -> bool {
    match func {
        syntax::Expr::Name(id) => id == CHOOSE,
        syntax::Expr::Attribute { attr, .. } => attr == CHOOSE,
        _ => false,
    }
}

#[cfg(test)]
mod translate_tests {
    use std::rc::Rc;

    use super::*;
    use crate::ir;
    use crate::syntax::{Expr, FuncDef, Module, Param, Stmt};
    use crate::typing::ty::Ty;

    fn int_fn(name: &str, params: Vec<Param>, body: Vec<Stmt>) -> FuncDef {
        FuncDef {
            name: str!(name),
            params,
            returns: Expr::name("int"),
            body,
        }
    }

    fn add(left: Expr, right: Expr) -> Expr {
        Expr::BinOp {
            op: BinOpKind::Add,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn call(func: Expr, args: Vec<Expr>) -> Expr {
        Expr::Call {
            func: Box::new(func),
            args,
        }
    }

    #[test]
    fn test_translate_add_one() {
        // def f(x: int) -> int: return x + 1
        let def = int_fn(
            "f",
            vec![Param::new("x", Expr::name("int"))],
            vec![Stmt::Return(Some(add(Expr::name("x"), Expr::int(1))))],
        );

        let tenv = TypeEnv::default();
        let mut tr = Translator::new(&tenv);
        let decl = tr.translate(&def).unwrap();

        let x = Rc::new(ir::Var::new("x", Ty::Int));
        assert_eq!(
            decl,
            ir::FnDecl {
                name: str!("f"),
                params: vec![Rc::clone(&x)],
                ret: Ty::Int,
                body: ir::Block(vec![ir::Stmt::Return(Some(ir::Expr::BinaryOp {
                    op: ir::BinOp::Add,
                    left: Box::new(ir::Expr::Var(x)),
                    right: Box::new(ir::Expr::Lit(ir::LitVal::Int(1))),
                }))]),
            }
        );
    }

    #[test]
    fn test_translation_is_deterministic() {
        let def = int_fn(
            "f",
            vec![Param::new("x", Expr::name("int"))],
            vec![Stmt::Return(Some(add(Expr::name("x"), Expr::int(1))))],
        );
        let tenv = TypeEnv::default();
        let a = Translator::new(&tenv).translate(&def).unwrap();
        let b = Translator::new(&tenv).translate(&def).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_params_in_declared_order() {
        let def = int_fn(
            "g",
            vec![
                Param::new("a", Expr::name("int")),
                Param::new("b", Expr::name("bool")),
                Param::new("c", Expr::name("int")),
            ],
            vec![Stmt::Return(Some(Expr::name("a")))],
        );
        let tenv = TypeEnv::default();
        let decl = Translator::new(&tenv).translate(&def).unwrap();
        let names = decl.params.iter().map(|p| p.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(decl.params[1].ty, Ty::Bool);
    }

    #[test]
    fn test_undeclared_variable() {
        let def = int_fn("f", vec![], vec![Stmt::Return(Some(Expr::name("y")))]);
        let tenv = TypeEnv::default();
        let err = Translator::new(&tenv).translate(&def).unwrap_err();
        assert_eq!(err.kind, LiftErrorKind::UndeclaredVariable);
    }

    #[test]
    fn test_declare_then_reference() {
        // y: int = 2; return y
        let def = int_fn(
            "f",
            vec![],
            vec![
                Stmt::AnnAssign {
                    target: str!("y"),
                    annotation: Expr::name("int"),
                    value: Some(Expr::int(2)),
                },
                Stmt::Return(Some(Expr::name("y"))),
            ],
        );
        let tenv = TypeEnv::default();
        let decl = Translator::new(&tenv).translate(&def).unwrap();
        match &decl.body.0[..] {
            [ir::Stmt::Assign { target, value }, ir::Stmt::Return(Some(ir::Expr::Var(v)))] => {
                assert_eq!(target.name, "y");
                assert_eq!(*value, ir::Expr::Lit(ir::LitVal::Int(2)));
                assert!(Rc::ptr_eq(target, v), "reference should share the symbol");
            }
            body => panic!("unexpected body: {:?}", body),
        }
    }

    #[test]
    fn test_bare_declaration() {
        let def = int_fn(
            "f",
            vec![],
            vec![
                Stmt::AnnAssign {
                    target: str!("y"),
                    annotation: Expr::name("int"),
                    value: None,
                },
                Stmt::Return(None),
            ],
        );
        let tenv = TypeEnv::default();
        let decl = Translator::new(&tenv).translate(&def).unwrap();
        assert!(matches!(&decl.body.0[0], ir::Stmt::Decl(v) if v.name == "y"));
        assert_eq!(decl.body.0[1], ir::Stmt::Return(None));
    }

    #[test]
    fn test_assignment_requires_declaration() {
        let def = int_fn(
            "f",
            vec![],
            vec![Stmt::Assign {
                targets: vec![Expr::name("z")],
                value: Expr::int(1),
            }],
        );
        let tenv = TypeEnv::default();
        let err = Translator::new(&tenv).translate(&def).unwrap_err();
        assert_eq!(err.kind, LiftErrorKind::UndeclaredVariable);
    }

    #[test]
    fn test_multi_target_assignment() {
        let def = int_fn(
            "f",
            vec![
                Param::new("a", Expr::name("int")),
                Param::new("b", Expr::name("int")),
            ],
            vec![Stmt::Assign {
                targets: vec![Expr::name("a"), Expr::name("b")],
                value: Expr::int(0),
            }],
        );
        let tenv = TypeEnv::default();
        let err = Translator::new(&tenv).translate(&def).unwrap_err();
        assert_eq!(err.kind, LiftErrorKind::MultiTargetAssignment);
    }

    #[test]
    fn test_choose_lowering() {
        // Choose(x, 1, 2) and ir.Choose(x, 1) are both synthesis holes
        let def = int_fn(
            "f",
            vec![Param::new("x", Expr::name("int"))],
            vec![
                Stmt::Expr(call(
                    Expr::name("Choose"),
                    vec![Expr::name("x"), Expr::int(1), Expr::int(2)],
                )),
                Stmt::Expr(call(
                    Expr::Attribute {
                        value: Box::new(Expr::name("x")),
                        attr: str!("Choose"),
                    },
                    vec![Expr::name("x"), Expr::int(1)],
                )),
            ],
        );
        let tenv = TypeEnv::default();
        let decl = Translator::new(&tenv).translate(&def).unwrap();
        match &decl.body.0[0] {
            ir::Stmt::Expr(ir::Expr::Choose(alts)) => {
                assert_eq!(alts.len(), 3);
                assert!(matches!(&alts[0], ir::Expr::Var(v) if v.name == "x"));
                assert_eq!(alts[1], ir::Expr::Lit(ir::LitVal::Int(1)));
                assert_eq!(alts[2], ir::Expr::Lit(ir::LitVal::Int(2)));
            }
            s => panic!("expected a choose, got: {:?}", s),
        }
        assert!(matches!(
            &decl.body.0[1],
            ir::Stmt::Expr(ir::Expr::Choose(alts)) if alts.len() == 2
        ));
    }

    #[test]
    fn test_ordinary_call_lowering() {
        let def = int_fn(
            "f",
            vec![Param::new("x", Expr::name("int"))],
            vec![Stmt::Return(Some(call(
                Expr::name("g"),
                vec![Expr::name("x")],
            )))],
        );
        let tenv = TypeEnv::default();
        let decl = Translator::new(&tenv).translate(&def).unwrap();
        match &decl.body.0[0] {
            ir::Stmt::Return(Some(ir::Expr::Call { func, args })) => {
                assert_eq!(*func, ir::Callee::Name(str!("g")));
                assert_eq!(args.len(), 1);
            }
            s => panic!("expected a call, got: {:?}", s),
        }
    }

    #[test]
    fn test_starred_argument() {
        let def = int_fn(
            "f",
            vec![Param::new("xs", {
                Expr::Subscript {
                    value: Box::new(Expr::name("List")),
                    index: Box::new(Expr::name("int")),
                }
            })],
            vec![Stmt::Return(Some(call(
                Expr::name("g"),
                vec![Expr::Starred(Box::new(Expr::name("xs")))],
            )))],
        );
        let tenv = TypeEnv::default();
        let decl = Translator::new(&tenv).translate(&def).unwrap();
        match &decl.body.0[0] {
            ir::Stmt::Return(Some(ir::Expr::Call { args, .. })) => {
                assert!(matches!(&args[0], ir::Expr::Unpack(_)));
            }
            s => panic!("expected a call, got: {:?}", s),
        }
    }

    #[test]
    fn test_subscript_lowering() {
        let def = int_fn(
            "f",
            vec![Param::new("xs", {
                Expr::Subscript {
                    value: Box::new(Expr::name("List")),
                    index: Box::new(Expr::name("int")),
                }
            })],
            vec![Stmt::Return(Some(Expr::Subscript {
                value: Box::new(Expr::name("xs")),
                index: Box::new(Expr::int(0)),
            }))],
        );
        let tenv = TypeEnv::default();
        let decl = Translator::new(&tenv).translate(&def).unwrap();
        match &decl.body.0[0] {
            ir::Stmt::Return(Some(ir::Expr::ListAccess { target, index })) => {
                assert!(matches!(&**target, ir::Expr::Var(v) if v.name == "xs"));
                assert_eq!(**index, ir::Expr::Lit(ir::LitVal::Int(0)));
            }
            s => panic!("expected a list access, got: {:?}", s),
        }
    }

    #[test]
    fn test_if_produces_empty_else_block() {
        let def = int_fn(
            "f",
            vec![Param::new("x", Expr::name("int"))],
            vec![Stmt::If {
                test: Expr::Compare {
                    left: Box::new(Expr::name("x")),
                    ops: vec![CmpOpKind::Lt],
                    comparators: vec![Expr::int(0)],
                },
                body: vec![Stmt::Return(Some(Expr::int(0)))],
                orelse: vec![],
            }],
        );
        let tenv = TypeEnv::default();
        let decl = Translator::new(&tenv).translate(&def).unwrap();
        match &decl.body.0[0] {
            ir::Stmt::If { cond, then, els } => {
                assert!(matches!(
                    cond,
                    ir::Expr::BinaryOp {
                        op: ir::BinOp::Lt,
                        ..
                    }
                ));
                assert_eq!(then.0.len(), 1);
                assert!(els.0.is_empty(), "else block present but empty");
            }
            s => panic!("expected an if, got: {:?}", s),
        }
    }

    #[test]
    fn test_while_with_guarded_break() {
        // while True: if x > 0: break
        let def = int_fn(
            "f",
            vec![Param::new("x", Expr::name("int"))],
            vec![
                Stmt::While {
                    test: Expr::Constant(Const::Bool(true)),
                    body: vec![Stmt::If {
                        test: Expr::Compare {
                            left: Box::new(Expr::name("x")),
                            ops: vec![CmpOpKind::Gt],
                            comparators: vec![Expr::int(0)],
                        },
                        body: vec![Stmt::Break],
                        orelse: vec![],
                    }],
                    orelse: vec![],
                },
                Stmt::Return(Some(Expr::name("x"))),
            ],
        );
        let tenv = TypeEnv::default();
        let decl = Translator::new(&tenv).translate(&def).unwrap();
        match &decl.body.0[..] {
            [ir::Stmt::While { cond, body }, ir::Stmt::Return(Some(_))] => {
                assert_eq!(*cond, ir::Expr::Lit(ir::LitVal::Bool(true)));
                match &body[..] {
                    [ir::Stmt::If { then, .. }] => {
                        assert_eq!(then.0[0], ir::Stmt::Branch(ir::BranchKind::Break));
                    }
                    body => panic!("unexpected loop body: {:?}", body),
                }
            }
            body => panic!("unexpected body: {:?}", body),
        }
    }

    #[test]
    fn test_while_else_is_unsupported() {
        let def = int_fn(
            "f",
            vec![],
            vec![Stmt::While {
                test: Expr::Constant(Const::Bool(true)),
                body: vec![Stmt::Break],
                orelse: vec![Stmt::Return(None)],
            }],
        );
        let tenv = TypeEnv::default();
        let err = Translator::new(&tenv).translate(&def).unwrap_err();
        assert_eq!(err.kind, LiftErrorKind::UnsupportedConstruct);
    }

    #[test]
    fn test_operator_table() {
        let cases = vec![
            (BinOpKind::Add, ir::BinOp::Add),
            (BinOpKind::Sub, ir::BinOp::Sub),
            (BinOpKind::Mult, ir::BinOp::Mul),
            (BinOpKind::Div, ir::BinOp::FloorDiv),
        ];
        let tenv = TypeEnv::default();
        for (src, expected) in cases {
            let def = int_fn(
                "f",
                vec![Param::new("x", Expr::name("int"))],
                vec![Stmt::Return(Some(Expr::BinOp {
                    op: src,
                    left: Box::new(Expr::name("x")),
                    right: Box::new(Expr::int(2)),
                }))],
            );
            let decl = Translator::new(&tenv).translate(&def).unwrap();
            match &decl.body.0[0] {
                ir::Stmt::Return(Some(ir::Expr::BinaryOp { op, .. })) => {
                    assert_eq!(*op, expected);
                }
                s => panic!("expected a binary op, got: {:?}", s),
            }
        }
    }

    #[test]
    fn test_out_of_subset_operators() {
        let tenv = TypeEnv::default();
        let def = int_fn(
            "f",
            vec![Param::new("x", Expr::name("int"))],
            vec![Stmt::Return(Some(Expr::BinOp {
                op: BinOpKind::Mod,
                left: Box::new(Expr::name("x")),
                right: Box::new(Expr::int(2)),
            }))],
        );
        let err = Translator::new(&tenv).translate(&def).unwrap_err();
        assert_eq!(err.kind, LiftErrorKind::UnsupportedConstruct);

        let def = int_fn(
            "f",
            vec![Param::new("x", Expr::name("int"))],
            vec![Stmt::Return(Some(Expr::UnaryOp {
                op: UnaryOpKind::USub,
                operand: Box::new(Expr::name("x")),
            }))],
        );
        let err = Translator::new(&tenv).translate(&def).unwrap_err();
        assert_eq!(err.kind, LiftErrorKind::UnsupportedConstruct);
    }

    #[test]
    fn test_chained_comparison_is_unsupported() {
        let def = int_fn(
            "f",
            vec![Param::new("x", Expr::name("int"))],
            vec![Stmt::Return(Some(Expr::Compare {
                left: Box::new(Expr::int(0)),
                ops: vec![CmpOpKind::Lt, CmpOpKind::Lt],
                comparators: vec![Expr::name("x"), Expr::int(10)],
            }))],
        );
        let tenv = TypeEnv::default();
        let err = Translator::new(&tenv).translate(&def).unwrap_err();
        assert_eq!(err.kind, LiftErrorKind::UnsupportedConstruct);
    }

    #[test]
    fn test_logical_negation() {
        let def = FuncDef {
            name: str!("f"),
            params: vec![Param::new("b", Expr::name("bool"))],
            returns: Expr::name("bool"),
            body: vec![Stmt::Return(Some(Expr::UnaryOp {
                op: UnaryOpKind::Not,
                operand: Box::new(Expr::name("b")),
            }))],
        };
        let tenv = TypeEnv::default();
        let decl = Translator::new(&tenv).translate(&def).unwrap();
        assert!(matches!(
            &decl.body.0[0],
            ir::Stmt::Return(Some(ir::Expr::UnaryOp {
                op: ir::UnOp::Not,
                ..
            }))
        ));
    }

    #[test]
    fn test_module_forward_and_recursive_calls() {
        // f calls g (declared later) and itself; both resolve by name
        let f = int_fn(
            "f",
            vec![Param::new("x", Expr::name("int"))],
            vec![Stmt::Return(Some(call(
                Expr::name("g"),
                vec![call(Expr::name("f"), vec![Expr::name("x")])],
            )))],
        );
        let g = int_fn(
            "g",
            vec![Param::new("x", Expr::name("int"))],
            vec![Stmt::Return(Some(Expr::name("x")))],
        );
        let module = Module {
            body: vec![
                Stmt::Import(str!("ir")),
                Stmt::FunctionDef(f),
                Stmt::FunctionDef(g),
            ],
        };
        let tenv = TypeEnv::default();
        let program = Translator::new(&tenv).translate_module(&module).unwrap();
        assert_eq!(program.imports, vec![str!("ir")]);
        let names = program.fns.iter().map(|f| f.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["f", "g"]);
    }

    #[test]
    fn test_string_literal_is_unsupported() {
        let def = int_fn(
            "f",
            vec![],
            vec![Stmt::Return(Some(Expr::Constant(Const::Str(str!("s")))))],
        );
        let tenv = TypeEnv::default();
        let err = Translator::new(&tenv).translate(&def).unwrap_err();
        assert_eq!(err.kind, LiftErrorKind::UnsupportedConstruct);
    }

    #[test]
    fn test_program_display() {
        let def = int_fn(
            "f",
            vec![Param::new("x", Expr::name("int"))],
            vec![Stmt::Return(Some(add(Expr::name("x"), Expr::int(1))))],
        );
        let module = Module {
            body: vec![Stmt::FunctionDef(def)],
        };
        let tenv = TypeEnv::default();
        let program = Translator::new(&tenv).translate_module(&module).unwrap();
        assert_eq!(
            program.to_string(),
            "fn f(x: Int) -> Int {\n  ret (x + 1)\n}"
        );
    }
}
