use crate::MAX_PENDING_ACTIONS;

/// A chance-expansion token awaiting resolution by the expansion engine. The first non-empty
/// slot in a `PendingQueue` dictates which expansion step fires next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    GenerateBattle,
    GenerateIntents,
    DrawCards(u8),
}

/// a short ordered queue of pending chance actions (length <= `MAX_PENDING_ACTIONS`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingQueue([Option<PendingAction>; MAX_PENDING_ACTIONS]);

impl PendingQueue {
    pub fn empty() -> Self {
        Self([None; MAX_PENDING_ACTIONS])
    }

    pub fn single(action: PendingAction) -> Self {
        let mut q = Self::empty();
        q.0[0] = Some(action);
        q
    }

    pub fn head(&self) -> Option<PendingAction> {
        self.0[0]
    }

    pub fn is_empty(&self) -> bool {
        self.0[0].is_none()
    }

    /// remove the head, shifting the rest left.
    pub fn pop(&mut self) -> Option<PendingAction> {
        let head = self.0[0];
        for i in 0..MAX_PENDING_ACTIONS - 1 {
            self.0[i] = self.0[i + 1];
        }
        self.0[MAX_PENDING_ACTIONS - 1] = None;
        head
    }

    /// push to the back of the queue; panics if already full (the simulator never generates
    /// more than `MAX_PENDING_ACTIONS` chance steps at once).
    pub fn push(&mut self, action: PendingAction) {
        let slot = self.0.iter_mut().find(|s| s.is_none()).expect("pending queue full");
        *slot = Some(action);
    }

    pub fn replace_head(&mut self, action: PendingAction) {
        self.0[0] = Some(action);
    }

    pub fn decrement_head_draw(&mut self, drawn: u8) {
        if let Some(PendingAction::DrawCards(remaining)) = self.0[0] {
            if remaining > drawn {
                self.0[0] = Some(PendingAction::DrawCards(remaining - drawn));
                return;
            }
        }
        self.pop();
    }

    pub fn as_slice(&self) -> &[Option<PendingAction>; MAX_PENDING_ACTIONS] {
        &self.0
    }
}
