/*
** This file is a part of Xmlvet (XML document and schema library)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Xmlvet is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod error;

use std::fmt::Display;
use std::mem::size_of;

pub use error::NoMemory;

const MIN_SLOTS: usize = 16;

/// Handle to a value stored in an [Arena].
///
/// The handle remembers the generation of its slot, so a handle
/// to a freed value never resolves to a value stored later in the
/// same slot.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ArenaIndex {
    slot: u32,
    generation: u32,
}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// A slot arena for the document elements.
///
/// Values are packed in a single vector and addressed by
/// [ArenaIndex] handles instead of pointers, so the tree links
/// between elements are plain copyable data. Freed slots are
/// recycled through a free list.
///
/// All growth goes through `try_reserve`, so running out of
/// memory is reported as [NoMemory] instead of aborting.
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    nr_live: usize,
}

/// Memory usage numbers of an [Arena].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ArenaStats {
    pub nr_slots: usize,
    pub nr_live: usize,
    pub nr_allocated_bytes: usize,
    pub nr_used_bytes: usize,
}

impl Display for ArenaStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} slots ({} live), {} bytes allocated, {} bytes used",
            self.nr_slots, self.nr_live, self.nr_allocated_bytes, self.nr_used_bytes
        )
    }
}

impl<T> Arena<T> {
    pub fn new() -> Arena<T> {
        Arena {
            slots: Vec::new(),
            free: Vec::new(),
            nr_live: 0,
        }
    }

    pub fn with_capacity(nr_slots: usize) -> Result<Arena<T>, NoMemory> {
        let nr_slots = nr_slots.max(MIN_SLOTS);
        let mut arena = Arena::new();
        arena.slots.try_reserve_exact(nr_slots)?;
        arena.free.try_reserve_exact(nr_slots)?;
        Ok(arena)
    }

    pub fn alloc(&mut self, value: T) -> Result<ArenaIndex, NoMemory> {
        if let Some(slot) = self.free.pop() {
            let entry = &mut self.slots[slot as usize];
            entry.value = Some(value);
            self.nr_live += 1;
            return Ok(ArenaIndex {
                slot,
                generation: entry.generation,
            });
        }

        let slot = u32::try_from(self.slots.len()).map_err(|_| NoMemory)?;
        self.slots.try_reserve(1)?;
        // Free list always has room for every slot, so free() never allocates
        let needed = self.slots.len() + 1 - self.free.len();
        self.free.try_reserve(needed)?;
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        self.nr_live += 1;

        Ok(ArenaIndex {
            slot,
            generation: 0,
        })
    }

    pub fn get(&self, index: ArenaIndex) -> Option<&T> {
        match self.slots.get(index.slot as usize) {
            Some(entry) if entry.generation == index.generation => entry.value.as_ref(),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, index: ArenaIndex) -> Option<&mut T> {
        match self.slots.get_mut(index.slot as usize) {
            Some(entry) if entry.generation == index.generation => entry.value.as_mut(),
            _ => None,
        }
    }

    pub fn contains(&self, index: ArenaIndex) -> bool {
        self.get(index).is_some()
    }

    pub fn free(&mut self, index: ArenaIndex) -> Option<T> {
        let entry = self.slots.get_mut(index.slot as usize)?;
        if entry.generation != index.generation {
            return None;
        }
        let value = entry.value.take()?;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(index.slot);
        self.nr_live -= 1;
        Some(value)
    }

    /// Frees every value but keeps the memory for reuse.
    pub fn clear(&mut self) {
        self.free.clear();
        for (slot, entry) in self.slots.iter_mut().enumerate().rev() {
            if entry.value.take().is_some() {
                entry.generation = entry.generation.wrapping_add(1);
            }
            self.free.push(slot as u32);
        }
        self.nr_live = 0;
    }

    pub fn len(&self) -> usize {
        self.nr_live
    }

    pub fn is_empty(&self) -> bool {
        self.nr_live == 0
    }

    pub fn stats(&self) -> ArenaStats {
        let slot_size = size_of::<Slot<T>>();
        ArenaStats {
            nr_slots: self.slots.len(),
            nr_live: self.nr_live,
            nr_allocated_bytes: self.slots.capacity() * slot_size
                + self.free.capacity() * size_of::<u32>(),
            nr_used_bytes: self.nr_live * slot_size,
        }
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
