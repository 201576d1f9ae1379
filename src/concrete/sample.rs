//! Boundary-biased random argument sampling.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::errors::{LiftError, LiftErrorKind, LiftResult};
use crate::typing::ty::Ty;

pub const MAX_INT: i32 = i32::MAX;
pub const MIN_INT: i32 = i32::MIN;

const SPECIAL_INTS: [i32; 5] = [-1, 1, 0, MIN_INT, MAX_INT];
const SMALL_INT_MIN: i32 = -13;
const SMALL_INT_MAX: i32 = 13;

#[derive(Copy, Clone, Debug)]
enum IntClass {
    All,
    Small,
    Special,
}

const INT_CLASSES: [IntClass; 3] = [IntClass::All, IntClass::Small, IntClass::Special];

pub struct Generator<'r, R: Rng> {
    rnd: &'r mut R,
}

impl<'r, R: Rng> Generator<'r, R> {
    pub fn new(rnd: &'r mut R) -> Generator<'r, R> {
        Generator { rnd }
    }

    /// One concrete value per descriptor, in order.
    pub fn sample_args(&mut self, tys: &[Ty]) -> LiftResult<Vec<i32>> {
        tys.iter().map(|ty| self.sample_ty(ty)).collect()
    }

    /// Sampling a type without a rule fails instead of guessing; new types
    /// get a rule here, deliberately.
    pub fn sample_ty(&mut self, ty: &Ty) -> LiftResult<i32> {
        match ty {
            Ty::Int => Ok(self.sample_int()),
            ty => Err(LiftError {
                msg: format!("no sampling rule for type {}", ty),
                kind: LiftErrorKind::UnsupportedType,
            }),
        }
    }

    pub fn sample_int(&mut self) -> i32 {
        let class = *INT_CLASSES.choose(&mut *self.rnd).unwrap();
        self.sample_class(class)
    }

    fn sample_class(&mut self, class: IntClass) -> i32 {
        match class {
            IntClass::All => self.rnd.gen_range(MIN_INT..=MAX_INT),
            IntClass::Small => self.rnd.gen_range(SMALL_INT_MIN..=SMALL_INT_MAX),
            IntClass::Special => *SPECIAL_INTS.choose(&mut *self.rnd).unwrap(),
        }
    }
}
