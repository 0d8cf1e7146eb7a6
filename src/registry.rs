//! Owns every non-player entity, grouped by kind.
//!
//! Spawns requested while a group is being walked go to a pending list and
//! only land in their groups on [`Registry::flush`].  Removal is
//! mark-then-retain, so no group is ever resized mid-iteration.

use crate::entities::{Bullet, Enemy, Entity, Explosion, Fate, Item, Viewport};

#[derive(Clone, Debug, PartialEq)]
pub enum Spawn {
    Enemy(Enemy),
    Bullet(Bullet),
    Item(Item),
    Explosion(Explosion),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Group {
    Enemies,
    Bullets,
    Items,
    Explosions,
}

/// Outcome of one bulk update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Enemies that crossed the bottom edge this tick.
    pub escaped_enemies: u32,
    pub expired: u32,
}

#[derive(Clone, Debug, Default)]
pub struct Registry {
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub items: Vec<Item>,
    pub explosions: Vec<Explosion>,
    pending: Vec<Spawn>,
}

/// Run each entity's rule and drop the ones that ask to go.
fn update_group<T: Entity>(
    group: &mut Vec<T>,
    now: u64,
    viewport: Viewport,
    report: &mut UpdateReport,
) {
    group.retain_mut(|entity| match entity.update(now, viewport) {
        Fate::Alive => true,
        Fate::Expired => {
            report.expired += 1;
            false
        }
        Fate::Escaped => {
            report.escaped_enemies += 1;
            false
        }
    });
}

/// Keep only the entries whose mark is `false`.
fn remove_marked<T>(group: &mut Vec<T>, marks: &[bool]) -> usize {
    let before = group.len();
    let mut idx = 0;
    group.retain(|_| {
        let keep = !marks.get(idx).copied().unwrap_or(false);
        idx += 1;
        keep
    });
    before - group.len()
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an entity; it becomes visible after the next [`Registry::flush`].
    pub fn spawn(&mut self, spawn: Spawn) {
        self.pending.push(spawn);
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Move every queued spawn into its group, in request order.
    pub fn flush(&mut self) {
        for spawn in self.pending.drain(..) {
            match spawn {
                Spawn::Enemy(e) => self.enemies.push(e),
                Spawn::Bullet(b) => self.bullets.push(b),
                Spawn::Item(i) => self.items.push(i),
                Spawn::Explosion(x) => self.explosions.push(x),
            }
        }
    }

    /// Update enemies, then bullets, items, and explosions.
    pub fn update_all(&mut self, now: u64, viewport: Viewport) -> UpdateReport {
        let mut report = UpdateReport::default();
        update_group(&mut self.enemies, now, viewport, &mut report);
        update_group(&mut self.bullets, now, viewport, &mut report);
        update_group(&mut self.items, now, viewport, &mut report);
        update_group(&mut self.explosions, now, viewport, &mut report);
        report
    }

    /// Remove the entries of `group` whose index is marked.  Returns how many
    /// were removed.
    pub fn remove_marked(&mut self, group: Group, marks: &[bool]) -> usize {
        match group {
            Group::Enemies => remove_marked(&mut self.enemies, marks),
            Group::Bullets => remove_marked(&mut self.bullets, marks),
            Group::Items => remove_marked(&mut self.items, marks),
            Group::Explosions => remove_marked(&mut self.explosions, marks),
        }
    }

    pub fn len(&self, group: Group) -> usize {
        match group {
            Group::Enemies => self.enemies.len(),
            Group::Bullets => self.bullets.len(),
            Group::Items => self.items.len(),
            Group::Explosions => self.explosions.len(),
        }
    }

    /// Live entities across all groups (pending spawns excluded).
    pub fn total(&self) -> usize {
        self.enemies.len() + self.bullets.len() + self.items.len() + self.explosions.len()
    }

    pub fn clear(&mut self) {
        self.enemies.clear();
        self.bullets.clear();
        self.items.clear();
        self.explosions.clear();
        self.pending.clear();
    }
}

/// Index pairs `(a, b)` whose rectangles overlap.
pub fn overlapping_pairs<A: Entity, B: Entity>(a: &[A], b: &[B]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (ai, ea) in a.iter().enumerate() {
        let ra = ea.rect();
        for (bi, eb) in b.iter().enumerate() {
            if ra.intersects(&eb.rect()) {
                pairs.push((ai, bi));
            }
        }
    }
    pairs
}
