// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generational slot storage backing screens and navigators.

/// A handle made of a slot index and the slot's generation at insertion.
pub(crate) trait SlotKey: Copy {
    fn from_parts(idx: u32, generation: u32) -> Self;
    fn idx(self) -> usize;
    fn generation(self) -> u32;
}

struct Slot<T> {
    generation: u32,
    value: T,
}

/// Slots are reused after removal with a bumped generation, so a stale key
/// never reaches a newer value.
pub(crate) struct Arena<K, T> {
    slots: Vec<Option<Slot<T>>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
    _key: core::marker::PhantomData<fn() -> K>,
}

impl<K, T> Default for Arena<K, T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            _key: core::marker::PhantomData,
        }
    }
}

impl<K: SlotKey, T> Arena<K, T> {
    pub(crate) fn insert(&mut self, value: T) -> K {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.slots[idx] = Some(Slot { generation, value });
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.slots.push(Some(Slot { generation, value }));
            self.generations.push(generation);
            (self.slots.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Handles use 32-bit slot indices."
        )]
        K::from_parts(idx as u32, generation)
    }

    pub(crate) fn remove(&mut self, key: K) -> Option<T> {
        if !self.contains(key) {
            return None;
        }
        let slot = self.slots[key.idx()].take()?;
        self.free_list.push(key.idx());
        Some(slot.value)
    }

    pub(crate) fn contains(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    pub(crate) fn get(&self, key: K) -> Option<&T> {
        match self.slots.get(key.idx()) {
            Some(Some(slot)) if slot.generation == key.generation() => Some(&slot.value),
            _ => None,
        }
    }

    pub(crate) fn get_mut(&mut self, key: K) -> Option<&mut T> {
        match self.slots.get_mut(key.idx()) {
            Some(Some(slot)) if slot.generation == key.generation() => Some(&mut slot.value),
            _ => None,
        }
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            let slot = slot.as_ref()?;
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Handles use 32-bit slot indices."
            )]
            Some(K::from_parts(i as u32, slot.generation))
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }
}
