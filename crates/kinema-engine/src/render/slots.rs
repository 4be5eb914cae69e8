//! Named slots in a dynamic-offset uniform buffer.
//!
//! A renderer that issues several draws per frame with different uniform
//! values gives each draw a fixed slot. The key→slot table is built once
//! when the pipeline is created; per-frame code only writes slot contents and
//! passes the precomputed dynamic offset.

use std::fmt::Debug;

/// Rounds `size` up to a multiple of `alignment` (a power of two).
pub fn aligned_stride(size: u64, alignment: u64) -> u64 {
    let alignment = alignment.max(1);
    size.div_ceil(alignment) * alignment
}

#[derive(Debug, Clone)]
pub struct UniformSlots<K = &'static str> {
    keys: Vec<K>,
    stride: u64,
}

impl<K: Copy + PartialEq + Debug> UniformSlots<K> {
    /// Builds a table with one slot per key, each `uniform_size` bytes padded
    /// to `alignment` (the device's `min_uniform_buffer_offset_alignment`).
    ///
    /// Duplicate keys are rejected in debug builds; the first one wins.
    pub fn new(keys: &[K], uniform_size: u64, alignment: u32) -> Self {
        debug_assert!(
            keys.iter().enumerate().all(|(i, k)| !keys[..i].contains(k)),
            "duplicate uniform slot key"
        );
        Self {
            keys: keys.to_vec(),
            stride: aligned_stride(uniform_size, alignment as u64),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Bytes between consecutive slots.
    pub fn stride(&self) -> u64 {
        self.stride
    }

    /// Total buffer size needed for all slots.
    pub fn buffer_size(&self) -> u64 {
        self.stride * self.keys.len().max(1) as u64
    }

    pub fn slot(&self, key: K) -> Option<usize> {
        self.keys.iter().position(|k| *k == key)
    }

    /// Byte offset of a slot, for `queue.write_buffer`.
    pub fn byte_offset(&self, slot: usize) -> u64 {
        slot as u64 * self.stride
    }

    /// Dynamic offset of a slot, for `set_bind_group`.
    pub fn dynamic_offset(&self, slot: usize) -> u32 {
        self.byte_offset(slot) as u32
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }
}
