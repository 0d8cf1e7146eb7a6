//! Fire-and-forget sound triggers.  The core only records them; the host
//! drains the queue each tick and plays (or ignores) them.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundEvent {
    MusicStart,
    Shot,
    EnemyDestroyed,
    ItemPickup,
    Fanfare,
}

#[derive(Clone, Debug, Default)]
pub struct SoundQueue {
    events: Vec<SoundEvent>,
}

impl SoundQueue {
    pub fn push(&mut self, event: SoundEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> Vec<SoundEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn peek(&self) -> &[SoundEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
