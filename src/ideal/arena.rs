use crate::state::Workspace;
use crate::term::Exponent;

/// Fixed-stride storage of exponent vectors.
///
/// Every record occupies `stride` consecutive exponents of one backing vector
/// and is addressed by its slot index. Freed slots are kept on a free list and
/// handed out again before the backing vector grows. The backing vector is
/// taken from the thread-local [Workspace] and returned to it on drop.
#[derive(Debug)]
pub struct TermArena {
    stride: usize,
    data: Vec<Exponent>,
    slot_count: usize,
    free: Vec<u32>,
}

impl TermArena {
    pub fn new(stride: usize) -> TermArena {
        TermArena {
            stride,
            data: Workspace::take_buffer(),
            slot_count: 0,
            free: vec![],
        }
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The number of slots that are in use.
    #[inline]
    pub fn len(&self) -> usize {
        self.slot_count - self.free.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store a copy of `term` and return its slot.
    pub fn alloc(&mut self, term: &[Exponent]) -> u32 {
        debug_assert_eq!(term.len(), self.stride);

        if let Some(slot) = self.free.pop() {
            self.get_mut(slot).copy_from_slice(term);
            return slot;
        }

        self.data.extend_from_slice(term);
        self.slot_count += 1;
        (self.slot_count - 1) as u32
    }

    /// Mark `slot` as reusable. The caller must no longer refer to it.
    #[inline]
    pub fn free(&mut self, slot: u32) {
        debug_assert!((slot as usize) < self.slot_count);
        debug_assert!(!self.free.contains(&slot));
        self.free.push(slot);
    }

    #[inline]
    pub fn get(&self, slot: u32) -> &[Exponent] {
        let start = slot as usize * self.stride;
        &self.data[start..start + self.stride]
    }

    #[inline]
    pub fn get_mut(&mut self, slot: u32) -> &mut [Exponent] {
        let start = slot as usize * self.stride;
        &mut self.data[start..start + self.stride]
    }

    /// Free all slots while keeping the allocated storage.
    pub fn clear(&mut self) {
        self.data.clear();
        self.slot_count = 0;
        self.free.clear();
    }

    /// Change the stride. All slots are freed.
    pub fn reset(&mut self, stride: usize) {
        self.clear();
        self.stride = stride;
    }
}

impl Drop for TermArena {
    fn drop(&mut self) {
        Workspace::return_buffer(std::mem::take(&mut self.data));
    }
}
