//! Bump arena for codec working memory
//!
//! A monotonic allocator over one fixed block of memory. Allocations are rounded
//! up to `ALIGNMENT` bytes and handed out in order; individual blocks are never
//! reclaimed. The arena counts outstanding allocations and rewinds to empty when
//! the last one is released.
//!
//! An `Arena` is an ordinary value owned by whatever codec context needs it.
//! Every state change is returned to the caller (`ArenaEvent`, `ArenaError`) and
//! logged, so there is no global instance and no change callback.

use std::error;
use std::fmt;

use log::{trace, warn};

/// Allocation granularity in bytes
pub const ALIGNMENT: usize = 8;

/// Why an arena operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaError {
    /// Not enough room left for the request
    Exhausted { requested: usize, available: usize },
    /// The block was handed out before the arena last rewound
    StaleBlock,
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ArenaError::Exhausted {
                requested,
                available,
            } => {
                write!(
                    f,
                    "arena exhausted: requested {} bytes, {} available",
                    requested, available
                )
            }
            ArenaError::StaleBlock => write!(f, "block belongs to a previous arena generation"),
        }
    }
}

impl error::Error for ArenaError {}

/// State change reported by the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaEvent {
    /// A block of `size` bytes was placed at `offset`
    Allocated { offset: usize, size: usize },
    /// A block was released, `outstanding` blocks remain
    Released { outstanding: usize },
    /// The last outstanding block was released and the arena rewound
    Reset,
    /// An allocation did not fit
    Exhausted { requested: usize },
}

/// Snapshot of arena bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaUsage {
    /// Outstanding allocations
    pub count: usize,
    /// Current head offset in bytes
    pub offset: usize,
    /// Highest head offset ever reached
    pub peak: usize,
    /// Total capacity in bytes
    pub capacity: usize,
}

/// Handle to memory inside an `Arena`
#[derive(Debug, PartialEq, Eq)]
pub struct ArenaBlock {
    offset: usize,
    size: usize,
    span: usize,
    generation: u64,
}

impl ArenaBlock {
    /// Byte offset from the start of the arena
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Requested size in bytes
    pub fn size(&self) -> usize {
        self.size
    }
}

#[derive(Debug)]
pub struct Arena {
    heap: Vec<u64>,
    head: usize,
    count: usize,
    peak: usize,
    generation: u64,
    last_event: Option<ArenaEvent>,
}

impl Arena {
    /// Arena of `capacity` bytes, rounded down to a multiple of `ALIGNMENT`
    pub fn new(capacity: usize) -> Self {
        Arena {
            heap: vec![0; capacity / ALIGNMENT],
            head: 0,
            count: 0,
            peak: 0,
            generation: 0,
            last_event: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.heap.len() * ALIGNMENT
    }

    /// Reserve `size` zeroed bytes
    pub fn allocate(&mut self, size: usize) -> Result<ArenaBlock, ArenaError> {
        let span = size
            .checked_add(ALIGNMENT - 1)
            .map(|s| s / ALIGNMENT * ALIGNMENT);
        let next_head = span
            .and_then(|span| self.head.checked_add(span))
            .filter(|&next| next <= self.capacity());

        let (Some(span), Some(next_head)) = (span, next_head) else {
            let available = self.capacity() - self.head;
            warn!(
                "arena exhausted: requested {} bytes, {} of {} available",
                size,
                available,
                self.capacity()
            );
            self.last_event = Some(ArenaEvent::Exhausted { requested: size });
            return Err(ArenaError::Exhausted {
                requested: size,
                available,
            });
        };

        let offset = self.head;
        self.heap[offset / ALIGNMENT..next_head / ALIGNMENT].fill(0);
        self.head = next_head;
        self.peak = self.peak.max(self.head);
        self.count += 1;

        trace!("arena allocate {} bytes at {} ({} outstanding)", size, offset, self.count);
        self.last_event = Some(ArenaEvent::Allocated { offset, size });

        Ok(ArenaBlock {
            offset,
            size,
            span,
            generation: self.generation,
        })
    }

    /// Reserve zeroed room for `n` elements of `size` bytes
    pub fn calloc(&mut self, n: usize, size: usize) -> Result<ArenaBlock, ArenaError> {
        let total = n.checked_mul(size).ok_or(ArenaError::Exhausted {
            requested: usize::MAX,
            available: self.capacity() - self.head,
        })?;
        self.allocate(total)
    }

    /// Give a block back; the arena rewinds once nothing is outstanding
    pub fn release(&mut self, _block: ArenaBlock) -> ArenaEvent {
        let event = if self.count > 0 {
            self.count -= 1;
            if self.count == 0 {
                self.head = 0;
                self.generation += 1;
                ArenaEvent::Reset
            } else {
                ArenaEvent::Released {
                    outstanding: self.count,
                }
            }
        } else {
            ArenaEvent::Released { outstanding: 0 }
        };

        trace!("arena release: {:?}", event);
        self.last_event = Some(event);
        event
    }

    pub fn usage(&self) -> ArenaUsage {
        ArenaUsage {
            count: self.count,
            offset: self.head,
            peak: self.peak,
            capacity: self.capacity(),
        }
    }

    /// Most recent state change
    pub fn last_event(&self) -> Option<ArenaEvent> {
        self.last_event
    }

    /// Bytes of a live block
    pub fn bytes_mut(&mut self, block: &ArenaBlock) -> Result<&mut [u8], ArenaError> {
        let words = self.words_mut(block)?;
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(words);
        Ok(&mut bytes[..block.size])
    }

    /// A live block viewed as `f32` samples (`size / 4` of them)
    pub fn f32_mut(&mut self, block: &ArenaBlock) -> Result<&mut [f32], ArenaError> {
        let words = self.words_mut(block)?;
        let samples: &mut [f32] = bytemuck::cast_slice_mut(words);
        Ok(&mut samples[..block.size / std::mem::size_of::<f32>()])
    }

    fn words_mut(&mut self, block: &ArenaBlock) -> Result<&mut [u64], ArenaError> {
        if block.generation != self.generation {
            return Err(ArenaError::StaleBlock);
        }
        let start = block.offset / ALIGNMENT;
        Ok(&mut self.heap[start..start + block.span / ALIGNMENT])
    }
}
