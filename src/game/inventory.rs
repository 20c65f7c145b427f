//! Hotbar inventory

/// Block type identifier
pub type BlockId = u16;

/// The empty block
pub const AIR: BlockId = 0;

/// Number of hotbar slots
pub const HOTBAR_SLOTS: usize = 9;

/// The player's hotbar and its selection
#[derive(Debug, Clone)]
pub struct Hotbar {
    slots: [BlockId; HOTBAR_SLOTS],
    selected: usize,
    /// The server can lock the held block
    pub can_change_held_block: bool,
    /// The server can forbid placing and deleting
    pub can_pick: bool,
    /// Fractional wheel movement not yet turned into slot steps
    scroll_acc: f32,
}

impl Hotbar {
    /// Creates a hotbar holding the given blocks, first slot selected
    pub fn new(slots: [BlockId; HOTBAR_SLOTS]) -> Self {
        Self {
            slots,
            selected: 0,
            can_change_held_block: true,
            can_pick: true,
            scroll_acc: 0.0,
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_block(&self) -> BlockId {
        self.slots[self.selected]
    }

    pub fn slot(&self, index: usize) -> Option<BlockId> {
        self.slots.get(index).copied()
    }

    /// Replaces the block in the selected slot without moving the selection
    pub fn set_selected_block(&mut self, block: BlockId) {
        self.slots[self.selected] = block;
    }

    /// Moves the selection by whole wheel steps
    ///
    /// Scrolling up (positive delta) moves left. Returns true when the
    /// selected slot changed.
    pub fn scroll(&mut self, delta: f32) -> bool {
        self.scroll_acc += delta;
        let steps = self.scroll_acc.trunc();
        self.scroll_acc -= steps;
        if steps == 0.0 {
            return false;
        }

        let slots = HOTBAR_SLOTS as i32;
        let index = (self.selected as i32 - steps as i32).rem_euclid(slots);
        let changed = index as usize != self.selected;
        self.selected = index as usize;
        changed
    }
}

impl Default for Hotbar {
    fn default() -> Self {
        // stone, cobblestone, brick, dirt, planks, log, leaves, glass, slab
        Self::new([1, 4, 45, 3, 5, 17, 18, 20, 44])
    }
}
