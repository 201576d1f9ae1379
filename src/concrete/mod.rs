//! Concrete execution of reference implementations: native compilation of a
//! textual LLVM module and boundary-biased randomized tracing of the result.

pub mod exec;
pub mod sample;

use rand::Rng;

use crate::errors::LiftResult;
use crate::typing::ty::Ty;

use exec::CompiledFn;
use sample::Generator;

/// Signature metadata for a reference implementation: entry name, ordered
/// argument types, return type. Produced by the upstream analysis step.
#[derive(Clone, Debug, PartialEq)]
pub struct Analysis {
    pub name: String,
    pub args: Vec<Ty>,
    pub ret: Ty,
}

impl Analysis {
    pub fn new<S: Into<String>>(name: S, args: Vec<Ty>, ret: Ty) -> Analysis {
        Analysis {
            name: name.into(),
            args,
            ret,
        }
    }
}

/// One observation: (return value, argument list).
pub type Trace = (i32, Vec<i32>);

/// Sample `count` full argument lists, invoke the compiled function on each,
/// and collect the observations in invocation order.
pub fn gen_traces<R: Rng>(
    cfunc: &CompiledFn<'_>,
    analysis: &Analysis,
    rnd: &mut R,
    count: usize,
) -> LiftResult<Vec<Trace>> {
    let mut gen = Generator::new(rnd);
    let mut traces = Vec::with_capacity(count);
    for _ in 0..count {
        let args = gen.sample_args(&analysis.args)?;
        let ret = cfunc.call(&args);
        traces.push((ret, args));
    }
    log::debug!("[exec] generated {} traces for `{}`", count, analysis.name);
    Ok(traces)
}
