//! container types that can be attached to a grid as point or cell data
//!
//! Slices, arrays and `Vec`s hold one value per point / cell. `ndarray` arrays may hold more:
//! a two dimensional array is read as one row per point / cell and one column per component,
//! so a `(n, 3)` array becomes a 3 component `DataArray`.

use crate::traits::{Array, Numeric};

use ndarray::{ArrayBase, Data, Ix1, Ix2};
use std::borrow::Cow;

impl<T: Numeric> Array for [T] {
    type Elem = T;

    fn elements(&self) -> Cow<'_, [T]> {
        Cow::Borrowed(self)
    }
}

impl<T: Numeric, const N: usize> Array for [T; N] {
    type Elem = T;

    fn elements(&self) -> Cow<'_, [T]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl<T: Numeric> Array for Vec<T> {
    type Elem = T;

    fn elements(&self) -> Cow<'_, [T]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl<A: Array + ?Sized> Array for &A {
    type Elem = A::Elem;

    fn elements(&self) -> Cow<'_, [A::Elem]> {
        (**self).elements()
    }

    fn components(&self) -> usize {
        (**self).components()
    }
}

impl<S, T> Array for ArrayBase<S, Ix1>
where
    S: Data<Elem = T>,
    T: Numeric,
{
    type Elem = T;

    fn elements(&self) -> Cow<'_, [T]> {
        match self.as_slice() {
            Some(slice) => Cow::Borrowed(slice),
            None => Cow::Owned(self.iter().copied().collect()),
        }
    }
}

impl<S, T> Array for ArrayBase<S, Ix2>
where
    S: Data<Elem = T>,
    T: Numeric,
{
    type Elem = T;

    fn elements(&self) -> Cow<'_, [T]> {
        // `as_slice` is only available for row major layouts, which is also the order
        // `iter` walks the elements in
        match self.as_slice() {
            Some(slice) => Cow::Borrowed(slice),
            None => Cow::Owned(self.iter().copied().collect()),
        }
    }

    fn components(&self) -> usize {
        self.ncols()
    }
}
