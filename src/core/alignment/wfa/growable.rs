//! Contiguous growable storage addressed by signed indices.
//!
//! One primitive backs both axes of the wavefront matrices: the score axis
//! (bias 0, only non-negative indices) and the diagonal axis of a single
//! wavefront (bias `-lo`). Storage is a flat `Vec`; unset slots hold
//! `T::default()`, which every slot type treats as "not set".

/// A value stored in a [`GrowableArray`] that knows whether it has been set.
pub trait Slot: Clone + Default {
    fn is_set(&self) -> bool;
}

impl Slot for super::packed::PackedCell {
    #[inline(always)]
    fn is_set(&self) -> bool {
        self.is_valid()
    }
}

#[derive(Debug, Clone, Default)]
pub struct GrowableArray<T: Slot> {
    data: Vec<T>,
    /// Storage index of logical index 0.
    bias: isize,
}

impl<T: Slot> GrowableArray<T> {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            bias: 0,
        }
    }

    /// Storage covering exactly `lo..=hi`, every slot unset.
    pub fn with_range(lo: isize, hi: isize) -> Self {
        let len = (hi - lo + 1).max(0) as usize;
        Self {
            data: vec![T::default(); len],
            bias: -lo,
        }
    }

    #[inline(always)]
    fn translate(&self, index: isize) -> Option<usize> {
        let actual = index + self.bias;
        if actual >= 0 && (actual as usize) < self.data.len() {
            Some(actual as usize)
        } else {
            None
        }
    }

    /// The slot at `index` if it was ever set.
    #[inline(always)]
    pub fn get(&self, index: isize) -> Option<&T> {
        self.translate(index)
            .map(|i| &self.data[i])
            .filter(|slot| slot.is_set())
    }

    /// Mutable access to a slot that is already inside the allocation,
    /// whether set or not.
    #[inline(always)]
    pub fn slot_mut(&mut self, index: isize) -> Option<&mut T> {
        self.translate(index).map(move |i| &mut self.data[i])
    }

    /// Store `value` at `index`, growing the buffer if needed.
    pub fn set(&mut self, index: isize, value: T) {
        let actual = self.reserve_index(index);
        self.data[actual] = value;
    }

    /// Allocate at least `size_hint` slots starting at [`Self::first_index`]
    /// so an expected number of writes happen without reallocation.
    pub fn preallocate(&mut self, size_hint: usize) {
        if self.data.len() < size_hint {
            self.data.resize(size_hint, T::default());
        }
    }

    /// Number of allocated slots.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Lowest logical index currently backed by storage.
    pub fn first_index(&self) -> isize {
        -self.bias
    }

    /// Grow (at the back by doubling, or at the front by re-biasing) until
    /// `index` is backed by storage; returns its storage position.
    fn reserve_index(&mut self, index: isize) -> usize {
        let actual = index + self.bias;
        if actual < 0 {
            // Front growth: at least double so repeated lower indices stay amortized.
            let missing = (-actual) as usize;
            let extra = missing.max(self.data.len());
            let mut grown = Vec::with_capacity(self.data.len() + extra);
            grown.resize(extra, T::default());
            grown.append(&mut self.data);
            self.data = grown;
            self.bias += extra as isize;
            return (index + self.bias) as usize;
        }

        let actual = actual as usize;
        if actual >= self.data.len() {
            self.data.resize(2 * actual + 1, T::default());
        }
        actual
    }
}
