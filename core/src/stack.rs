use crate::constants::STACK_SIZE;

/// # Stack
/// Return addresses for up to 16 levels of nested subroutines.
///
/// `sp` counts the entries in use, so it is 0 when empty and `STACK_SIZE` when full.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Stack {
    entries: [u16; STACK_SIZE],
    sp: u8,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a return address, giving it back if the stack is full
    pub fn push(&mut self, addr: u16) -> Result<(), u16> {
        let sp = self.sp as usize;
        if sp == STACK_SIZE {
            return Err(addr);
        }
        self.entries[sp] = addr;
        self.sp += 1;
        Ok(())
    }

    /// Pops the most recent return address, if any
    pub fn pop(&mut self) -> Option<u16> {
        if self.sp == 0 {
            return None;
        }
        self.sp -= 1;
        Some(self.entries[self.sp as usize])
    }

    pub fn sp(&self) -> u8 {
        self.sp
    }

    pub fn is_empty(&self) -> bool {
        self.sp == 0
    }

    /// The return addresses currently on the stack, oldest first
    pub fn entries(&self) -> &[u16] {
        &self.entries[..self.sp as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_reverse_order() {
        let mut stack = Stack::new();
        stack.push(0x202).unwrap();
        stack.push(0x304).unwrap();
        assert_eq!(stack.entries(), &[0x202, 0x304]);
        assert_eq!(stack.pop(), Some(0x304));
        assert_eq!(stack.pop(), Some(0x202));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_refuses_seventeenth_push() {
        let mut stack = Stack::new();
        for addr in 0..STACK_SIZE as u16 {
            assert_eq!(stack.push(addr), Ok(()));
        }
        assert_eq!(stack.push(0xABC), Err(0xABC));
        assert_eq!(stack.sp(), 16);
    }

    #[test]
    fn test_empty_pop_leaves_sp() {
        let mut stack = Stack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.sp(), 0);
    }
}
