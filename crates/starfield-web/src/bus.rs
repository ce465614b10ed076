use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use starfield_core::EngineCommand;

/// Publishers never learn whether anything is listening: commands simply
/// queue up and the oldest fall off once the bound is hit.
const BUS_CAPACITY: usize = 64;

/// Typed command channel between the debug panel API and the engine.
/// Drained at the start of each frame, so a command published mid-frame
/// takes effect on the next tick.
#[derive(Clone)]
pub struct CommandBus {
    queue: Rc<RefCell<VecDeque<EngineCommand>>>,
}

impl CommandBus {
    pub fn new() -> Self {
        Self {
            queue: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    pub fn publish(&self, command: EngineCommand) {
        let mut queue = self.queue.borrow_mut();
        if queue.len() >= BUS_CAPACITY {
            queue.pop_front();
        }
        queue.push_back(command);
    }

    pub fn drain(&self) -> Vec<EngineCommand> {
        self.queue.borrow_mut().drain(..).collect()
    }
}

impl Default for CommandBus {
    fn default() -> Self {
        Self::new()
    }
}
