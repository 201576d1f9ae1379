//! Native compilation of reference implementations.
//!
//! A textual LLVM module plus an [`Analysis`] descriptor become a directly
//! callable entry point. The underlying MCJIT execution engine is created at
//! most once per [`Engine`] and reused by every later compile; modules are
//! additive for its whole lifetime (there is no per-module unload). The
//! engine is not `Sync`, which gives the single-writer discipline module
//! loading needs; a [`CompiledFn`], once obtained, can be invoked from
//! multiple threads as long as the compiled code itself is reentrant.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::mem::transmute;

use inkwell::context::Context;
use inkwell::execution_engine::ExecutionEngine;
use inkwell::memory_buffer::MemoryBuffer;
use inkwell::module::Module;
use inkwell::targets::{InitializationConfig, Target};
use inkwell::OptimizationLevel;

use crate::errors::{LiftError, LiftErrorKind, LiftResult};

use super::Analysis;

/// Widest native signature the call table below can marshal.
const MAX_ARITY: usize = 8;

pub struct Engine<'ctx> {
    ctx: &'ctx Context,
    state: RefCell<EngineState<'ctx>>,
}

struct EngineState<'ctx> {
    ee: Option<ExecutionEngine<'ctx>>,
    // modules stay loaded until the engine is dropped
    modules: Vec<Module<'ctx>>,
}

impl<'ctx> Engine<'ctx> {
    pub fn new(ctx: &'ctx Context) -> Engine<'ctx> {
        Engine {
            ctx,
            state: RefCell::new(EngineState {
                ee: None,
                modules: vec![],
            }),
        }
    }

    /// Parse and verify `module_text`, load it into the shared execution
    /// engine, run static constructors, and resolve the entry symbol named
    /// by the descriptor into a callable.
    ///
    /// Marshaling is derived positionally from the descriptor and checked
    /// here, eagerly: a type with no marshaling rule fails now, never at
    /// call time.
    pub fn compile(&self, module_text: &str, analysis: &Analysis) -> LiftResult<CompiledFn<'_>> {
        let arity = check_signature(analysis)?;

        let buf =
            MemoryBuffer::create_from_memory_range_copy(module_text.as_bytes(), &analysis.name);
        let module = self.ctx.create_module_from_ir(buf)?;
        module.verify()?;

        let mut state = self.state.borrow_mut();
        if state.ee.is_none() {
            log::debug!("[exec] creating mcjit execution engine");
            state.ee = Some(create_execution_engine(self.ctx)?);
        }
        let ee = state.ee.as_ref().unwrap();

        ee.add_module(&module).map_err(|_| LiftError {
            msg: str!("module could not be added to the execution engine"),
            kind: LiftErrorKind::Compile,
        })?;
        ee.run_static_constructors();
        let addr = ee.get_function_address(&analysis.name)?;
        state.modules.push(module);

        log::debug!("[exec] compiled `{}` at {:#x}", analysis.name, addr);
        Ok(CompiledFn {
            addr,
            arity,
            _engine: PhantomData,
        })
    }

    /// Teardown point. Compiled modules cannot be unloaded one by one;
    /// dropping the engine releases them all at once.
    pub fn dispose(self) {}
}

fn create_execution_engine(ctx: &Context) -> LiftResult<ExecutionEngine<'_>> {
    Target::initialize_native(&InitializationConfig::default()).map_err(|msg| LiftError {
        msg,
        kind: LiftErrorKind::Compile,
    })?;
    // JIT over an empty backing module; real modules are added per compile
    let backing = ctx.create_module("synlift_backing");
    let ee = backing.create_jit_execution_engine(OptimizationLevel::None)?;
    Ok(ee)
}

fn check_signature(analysis: &Analysis) -> LiftResult<usize> {
    for ty in analysis.args.iter().chain([&analysis.ret]) {
        if !ty.is_int() {
            return Err(LiftError {
                msg: format!("no native marshaling for type {} in `{}`", ty, analysis.name),
                kind: LiftErrorKind::UnsupportedType,
            });
        }
    }
    let arity = analysis.args.len();
    if arity > MAX_ARITY {
        return Err(LiftError {
            msg: format!(
                "`{}` takes {} arguments, at most {} can be marshaled",
                analysis.name, arity, MAX_ARITY
            ),
            kind: LiftErrorKind::UnsupportedType,
        });
    }
    Ok(arity)
}

/// A natively compiled entry point. The type contract was established when
/// the function was compiled; `call` does no per-call type checking and must
/// be given exactly the declared arity.
#[derive(Debug)]
pub struct CompiledFn<'eng> {
    addr: usize,
    arity: usize,
    _engine: PhantomData<&'eng ()>,
}

impl CompiledFn<'_> {
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn call(&self, args: &[i32]) -> i32 {
        debug_assert_eq!(args.len(), self.arity, "wrong arity for compiled fn");
        unsafe {
            match *args {
                [] => transmute::<usize, extern "C" fn() -> i32>(self.addr)(),
                [a] => transmute::<usize, extern "C" fn(i32) -> i32>(self.addr)(a),
                [a, b] => transmute::<usize, extern "C" fn(i32, i32) -> i32>(self.addr)(a, b),
                [a, b, c] => {
                    transmute::<usize, extern "C" fn(i32, i32, i32) -> i32>(self.addr)(a, b, c)
                }
                [a, b, c, d] => transmute::<usize, extern "C" fn(i32, i32, i32, i32) -> i32>(
                    self.addr,
                )(a, b, c, d),
                [a, b, c, d, e] => transmute::<
                    usize,
                    extern "C" fn(i32, i32, i32, i32, i32) -> i32,
                >(self.addr)(a, b, c, d, e),
                [a, b, c, d, e, f] => transmute::<
                    usize,
                    extern "C" fn(i32, i32, i32, i32, i32, i32) -> i32,
                >(self.addr)(a, b, c, d, e, f),
                [a, b, c, d, e, f, g] => transmute::<
                    usize,
                    extern "C" fn(i32, i32, i32, i32, i32, i32, i32) -> i32,
                >(self.addr)(a, b, c, d, e, f, g),
                [a, b, c, d, e, f, g, h] => transmute::<
                    usize,
                    extern "C" fn(i32, i32, i32, i32, i32, i32, i32, i32) -> i32,
                >(self.addr)(a, b, c, d, e, f, g, h),
                _ => unreachable!("arity was checked at compile time"),
            }
        }
    }
}
