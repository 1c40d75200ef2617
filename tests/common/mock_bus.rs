//! Mock bus implementation for testing the GY-87 drivers

use gy87::RegisterBus;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

/// Error type returned by the mock on injected failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockBusError;

/// Records operations performed on the mock bus
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Read register operation
    ReadRegister {
        /// Register address
        address: u8,
        /// Value that was returned
        value: u8,
    },
    /// Write register operation
    WriteRegister {
        /// Register address
        address: u8,
        /// Value that was written
        value: u8,
    },
}

/// Shared state for the mock bus (uses interior mutability)
#[derive(Debug, Default)]
struct MockState {
    /// Simulated register values; unset registers read as 0
    registers: HashMap<u8, u8>,

    /// Per-register queues of values returned ahead of the stored value,
    /// for simulating readings that change between accesses
    read_queues: HashMap<u8, VecDeque<u8>>,

    /// Operations log for verification
    operations: Vec<Operation>,

    /// Failure injection flags
    fail_next_read: bool,
    fail_next_write: bool,
}

/// Mock implementation of [`RegisterBus`]
///
/// Cloning shares the underlying state, so a test can hand one clone to a
/// driver and keep another to inspect registers and the operation log.
#[derive(Clone)]
pub struct MockBus {
    state: Rc<RefCell<MockState>>,
}

impl MockBus {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(MockState::default())),
        }
    }

    /// Set a simulated register value
    pub fn set_register(&self, register: u8, value: u8) {
        self.state.borrow_mut().registers.insert(register, value);
    }

    /// Current value of a simulated register (0 if never written)
    pub fn register(&self, register: u8) -> u8 {
        *self.state.borrow().registers.get(&register).unwrap_or(&0)
    }

    /// Queue values to be returned by successive reads of `register`,
    /// before falling back to the stored value
    pub fn queue_reads(&self, register: u8, values: &[u8]) {
        let mut state = self.state.borrow_mut();
        state
            .read_queues
            .entry(register)
            .or_default()
            .extend(values.iter().copied());
    }

    /// Store a 16-bit measurement as a high/low register pair
    pub fn set_measurement(&self, high_register: u8, value: i16) {
        let bytes = (value as u16).to_be_bytes();
        self.set_register(high_register, bytes[0]);
        self.set_register(high_register + 1, bytes[1]);
    }

    /// Queue a sequence of 16-bit measurements on a high/low register pair
    pub fn queue_measurements(&self, high_register: u8, values: &[i16]) {
        for value in values {
            let bytes = (*value as u16).to_be_bytes();
            self.queue_reads(high_register, &[bytes[0]]);
            self.queue_reads(high_register + 1, &[bytes[1]]);
        }
    }

    /// Make the next read fail with [`MockBusError`]
    pub fn fail_next_read(&self) {
        self.state.borrow_mut().fail_next_read = true;
    }

    /// Make the next write fail with [`MockBusError`]
    pub fn fail_next_write(&self) {
        self.state.borrow_mut().fail_next_write = true;
    }

    /// Snapshot of the operation log
    pub fn operations(&self) -> Vec<Operation> {
        self.state.borrow().operations.clone()
    }

    /// All values written to `register`, in order
    pub fn writes_to(&self, register: u8) -> Vec<u8> {
        self.state
            .borrow()
            .operations
            .iter()
            .filter_map(|op| match op {
                Operation::WriteRegister { address, value } if *address == register => Some(*value),
                _ => None,
            })
            .collect()
    }

    /// Clear the operation log
    pub fn clear_operations(&self) {
        self.state.borrow_mut().operations.clear();
    }
}

impl Default for MockBus {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterBus for MockBus {
    type Error = MockBusError;

    fn read_byte(&mut self, register: u8) -> Result<u8, Self::Error> {
        let state = &mut *self.state.borrow_mut();

        if state.fail_next_read {
            state.fail_next_read = false;
            return Err(MockBusError);
        }

        let queued = state
            .read_queues
            .get_mut(&register)
            .and_then(VecDeque::pop_front);
        let value = match queued {
            Some(value) => value,
            None => *state.registers.get(&register).unwrap_or(&0),
        };

        state.operations.push(Operation::ReadRegister {
            address: register,
            value,
        });
        Ok(value)
    }

    fn write_byte(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        let state = &mut *self.state.borrow_mut();

        if state.fail_next_write {
            state.fail_next_write = false;
            return Err(MockBusError);
        }

        state.registers.insert(register, value);
        state.operations.push(Operation::WriteRegister {
            address: register,
            value,
        });
        Ok(())
    }
}
