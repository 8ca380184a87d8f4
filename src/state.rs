//! Thread-local recycling of exponent storage.
//!
//! Ideals are created and destroyed at a very high rate during a slice
//! computation. Instead of going through the allocator every time, their
//! backing buffers are handed back to a thread-local [Workspace] on drop and
//! reused by the next ideal that is created on the same thread.

use std::cell::RefCell;
use std::mem::ManuallyDrop;

use crate::term::Exponent;

thread_local!(
    /// The buffer cache of the current thread. It is never dropped, so cached
    /// buffers are released only through [Workspace::clear].
    static WORKSPACE: ManuallyDrop<Workspace> = const { ManuallyDrop::new(Workspace::new()) }
);

/// A cache of freed exponent buffers.
pub struct Workspace {
    exponent_buffers: RefCell<Vec<Vec<Exponent>>>,
}

impl Workspace {
    /// The maximum number of buffers that are kept for reuse.
    pub const BUFFER_MAX: usize = 128;
    /// Buffers that grew beyond this capacity are released instead of cached.
    pub const BUFFER_CAPACITY_MAX: usize = 1 << 20;

    const fn new() -> Workspace {
        Workspace {
            exponent_buffers: RefCell::new(Vec::new()),
        }
    }

    /// Get an empty buffer, recycled if possible.
    #[inline]
    pub fn take_buffer() -> Vec<Exponent> {
        WORKSPACE
            .try_with(|ws| {
                ws.exponent_buffers
                    .try_borrow_mut()
                    .ok()
                    .and_then(|mut b| b.pop())
            })
            .ok()
            .flatten()
            .unwrap_or_default()
    }

    /// Hand a buffer back for later reuse.
    #[inline]
    pub fn return_buffer(mut buffer: Vec<Exponent>) {
        if buffer.capacity() == 0 || buffer.capacity() > Self::BUFFER_CAPACITY_MAX {
            return;
        }

        buffer.clear();
        let _ = WORKSPACE.try_with(|ws| {
            if let Ok(mut b) = ws.exponent_buffers.try_borrow_mut() {
                if b.len() < Self::BUFFER_MAX {
                    b.push(buffer);
                }
            }
        });
    }

    /// Release all cached buffers of the current thread.
    pub fn clear() {
        let _ = WORKSPACE.try_with(|ws| {
            if let Ok(mut b) = ws.exponent_buffers.try_borrow_mut() {
                b.clear();
                b.shrink_to_fit();
            }
        });
    }

    /// The number of buffers currently cached on this thread.
    pub fn cached_buffer_count() -> usize {
        WORKSPACE
            .try_with(|ws| ws.exponent_buffers.try_borrow().map_or(0, |b| b.len()))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod test {
    use super::Workspace;

    #[test]
    fn recycle() {
        Workspace::clear();
        assert_eq!(Workspace::cached_buffer_count(), 0);

        let mut b = Workspace::take_buffer();
        b.extend_from_slice(&[1, 2, 3]);
        let cap = b.capacity();
        Workspace::return_buffer(b);
        assert_eq!(Workspace::cached_buffer_count(), 1);

        let b = Workspace::take_buffer();
        assert!(b.is_empty());
        assert_eq!(b.capacity(), cap);

        // buffers without storage are not worth caching
        Workspace::return_buffer(vec![]);
        assert_eq!(Workspace::cached_buffer_count(), 0);

        Workspace::return_buffer(b);
        Workspace::clear();
        assert_eq!(Workspace::cached_buffer_count(), 0);
    }
}
