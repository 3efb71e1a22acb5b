use std::ops::Index;
use std::ops::IndexMut;
use std::marker::PhantomData;
use num::Zero;

/// Zero-initialised fixed-size array whose indices wrap into `0..SIZE`.
///
/// Every CHIP-8 storage area (memory, V registers, call stack) has a
/// power-of-two size, so wrapping the index is the same as masking the
/// address to the width of the bus. No access can land outside the buffer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Array<T: Zero + Copy, const SIZE: usize, IDX=usize> {
    buf: [T; SIZE],
    index_type: PhantomData<IDX>,
}

impl<T: Zero + Copy, const SIZE: usize> Array<T, SIZE> {
    pub fn new() -> Self {
        Self {
            buf: [T::zero(); SIZE],
            index_type: PhantomData,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item=&T> {
        self.buf.iter()
    }

    pub fn clear(&mut self) {
        self.buf = [T::zero(); SIZE];
    }

    pub fn is_zero(&self) -> bool {
        self.buf.iter().all(|v| v.is_zero())
    }

    pub fn as_slice(&self) -> &[T] {
        &self.buf
    }

    pub const fn len(&self) -> usize {
        SIZE
    }

    #[inline]
    fn wrap(i: usize) -> usize {
        i % SIZE
    }
}

impl<T: Zero + Copy, const SIZE: usize> Default for Array<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! impl_index {
    ($t:ty) => {
        impl <T: Zero + Copy, const SIZE: usize> Index<$t> for Array<T, SIZE> {
            type Output = T;

            fn index(&self, i: $t) -> &Self::Output {
                &self.buf[Self::wrap(i as usize)]
            }
        }

        impl <T: Zero + Copy, const SIZE: usize> IndexMut<$t> for Array<T, SIZE> {
            fn index_mut(&mut self, i: $t) -> &mut T {
                &mut self.buf[Self::wrap(i as usize)]
            }
        }

    };
}

impl_index!(u32);
impl_index!(u16);
impl_index!(u8);
impl_index!(usize);
