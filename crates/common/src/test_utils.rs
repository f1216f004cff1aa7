//! Test utilities for the Mooer Radar driver
//!
//! Provides a scripted USB stack that records every call made through the
//! [`UsbAccess`] / [`DeviceLink`] traits.
//!
//! # Example
//!
//! ```
//! use common::test_utils::{MockUsb, UsbCall};
//! use common::{DeviceLink, UsbAccess};
//! use protocol::DeviceIdentity;
//! use std::time::Duration;
//!
//! let usb = MockUsb::new().failing_writes(1, rusb::Error::Pipe);
//! let mut link = usb.find_device(DeviceIdentity::MOOER_RADAR).unwrap().unwrap();
//!
//! assert!(link.write_bulk(2, &[1, 2, 3], Duration::from_secs(1)).is_err());
//! assert_eq!(link.write_bulk(2, &[1, 2, 3], Duration::from_secs(1)), Ok(3));
//! assert_eq!(usb.writes().len(), 2);
//! assert_eq!(usb.calls()[0], UsbCall::FindDevice(DeviceIdentity::MOOER_RADAR));
//! ```

use crate::usb_types::{DeviceLink, UsbAccess};
use protocol::DeviceIdentity;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

/// A call observed by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsbCall {
    FindDevice(DeviceIdentity),
    KernelDriverActive(u8),
    DetachKernelDriver(u8),
    ClaimInterface(u8),
    ReleaseInterface(u8),
    WriteBulk { endpoint: u8, data: Vec<u8> },
}

#[derive(Debug)]
struct MockState {
    calls: Vec<UsbCall>,
    attached: Option<DeviceIdentity>,
    discovery_error: Option<rusb::Error>,
    kernel_driver_active: bool,
    kernel_driver_query_error: Option<rusb::Error>,
    detach_error: Option<rusb::Error>,
    claim_error: Option<rusb::Error>,
    release_error: Option<rusb::Error>,
    /// Scripted write outcomes, consumed in order; empty means full success
    write_script: VecDeque<WriteOutcome>,
}

#[derive(Debug, Clone, Copy)]
enum WriteOutcome {
    Fail(rusb::Error),
    Short(usize),
}

/// Scripted USB stack
///
/// Clones share state, so a test can hand one clone to the code under test
/// and inspect the recorded calls through another.
#[derive(Debug, Clone)]
pub struct MockUsb {
    state: Rc<RefCell<MockState>>,
}

impl Default for MockUsb {
    fn default() -> Self {
        Self::new()
    }
}

impl MockUsb {
    /// Mock with a Radar attached and every operation succeeding
    pub fn new() -> Self {
        Self::with_device(DeviceIdentity::MOOER_RADAR)
    }

    /// Mock with a single device of the given identity attached
    pub fn with_device(identity: DeviceIdentity) -> Self {
        Self {
            state: Rc::new(RefCell::new(MockState {
                calls: Vec::new(),
                attached: Some(identity),
                discovery_error: None,
                kernel_driver_active: false,
                kernel_driver_query_error: None,
                detach_error: None,
                claim_error: None,
                release_error: None,
                write_script: VecDeque::new(),
            })),
        }
    }

    /// Mock with nothing attached
    pub fn empty() -> Self {
        let mock = Self::new();
        mock.state.borrow_mut().attached = None;
        mock
    }

    /// Enumeration or open fails with `error`
    pub fn failing_discovery(self, error: rusb::Error) -> Self {
        self.state.borrow_mut().discovery_error = Some(error);
        self
    }

    /// A kernel driver is bound to every interface
    pub fn with_kernel_driver(self) -> Self {
        self.state.borrow_mut().kernel_driver_active = true;
        self
    }

    /// Querying the kernel driver state fails with `error`
    pub fn failing_kernel_driver_query(self, error: rusb::Error) -> Self {
        self.state.borrow_mut().kernel_driver_query_error = Some(error);
        self
    }

    pub fn failing_detach(self, error: rusb::Error) -> Self {
        self.state.borrow_mut().detach_error = Some(error);
        self
    }

    pub fn failing_claim(self, error: rusb::Error) -> Self {
        self.state.borrow_mut().claim_error = Some(error);
        self
    }

    pub fn failing_release(self, error: rusb::Error) -> Self {
        self.state.borrow_mut().release_error = Some(error);
        self
    }

    /// The next `count` bulk writes fail with `error`
    pub fn failing_writes(self, count: usize, error: rusb::Error) -> Self {
        self.state
            .borrow_mut()
            .write_script
            .extend(std::iter::repeat_n(WriteOutcome::Fail(error), count));
        self
    }

    /// The next bulk write only transfers `written` bytes
    pub fn short_write(self, written: usize) -> Self {
        self.state
            .borrow_mut()
            .write_script
            .push_back(WriteOutcome::Short(written));
        self
    }

    /// Every call recorded so far, in order
    pub fn calls(&self) -> Vec<UsbCall> {
        self.state.borrow().calls.clone()
    }

    /// Payloads of every bulk write attempt
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                UsbCall::WriteBulk { data, .. } => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded calls matching `predicate`
    pub fn count(&self, predicate: impl Fn(&UsbCall) -> bool) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|call| predicate(call))
            .count()
    }

    pub fn claim_count(&self) -> usize {
        self.count(|call| matches!(call, UsbCall::ClaimInterface(_)))
    }

    pub fn release_count(&self) -> usize {
        self.count(|call| matches!(call, UsbCall::ReleaseInterface(_)))
    }

    /// Forget recorded calls, keeping the script
    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    fn record(&self, call: UsbCall) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl UsbAccess for MockUsb {
    type Link = MockLink;

    fn find_device(&self, identity: DeviceIdentity) -> rusb::Result<Option<MockLink>> {
        self.record(UsbCall::FindDevice(identity));

        let state = self.state.borrow();
        if let Some(error) = state.discovery_error {
            return Err(error);
        }

        Ok(state
            .attached
            .filter(|attached| *attached == identity)
            .map(|_| MockLink {
                usb: self.clone(),
            }))
    }
}

/// Device handle handed out by [`MockUsb`]
#[derive(Debug)]
pub struct MockLink {
    usb: MockUsb,
}

impl DeviceLink for MockLink {
    fn kernel_driver_active(&self, interface: u8) -> rusb::Result<bool> {
        self.usb.record(UsbCall::KernelDriverActive(interface));

        let state = self.usb.state.borrow();
        match state.kernel_driver_query_error {
            Some(error) => Err(error),
            None => Ok(state.kernel_driver_active),
        }
    }

    fn detach_kernel_driver(&mut self, interface: u8) -> rusb::Result<()> {
        self.usb.record(UsbCall::DetachKernelDriver(interface));

        let mut state = self.usb.state.borrow_mut();
        if let Some(error) = state.detach_error {
            return Err(error);
        }
        state.kernel_driver_active = false;
        Ok(())
    }

    fn claim_interface(&mut self, interface: u8) -> rusb::Result<()> {
        self.usb.record(UsbCall::ClaimInterface(interface));

        match self.usb.state.borrow().claim_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn release_interface(&mut self, interface: u8) -> rusb::Result<()> {
        self.usb.record(UsbCall::ReleaseInterface(interface));

        match self.usb.state.borrow().release_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn write_bulk(&mut self, endpoint: u8, data: &[u8], _timeout: Duration) -> rusb::Result<usize> {
        self.usb.record(UsbCall::WriteBulk {
            endpoint,
            data: data.to_vec(),
        });

        match self.usb.state.borrow_mut().write_script.pop_front() {
            Some(WriteOutcome::Fail(error)) => Err(error),
            Some(WriteOutcome::Short(written)) => Ok(written.min(data.len())),
            None => Ok(data.len()),
        }
    }
}
