// hhee_rdr/src/hhee/infrastructure/irq_handler.rs

//! # HHEE Panic Interrupt Handler
//!
//! The top half of the exception path. It logs one line, releases the panic
//! signal (unparking the worker) and acknowledges. All slow work happens in
//! the worker.

use super::di::IrqHandler;
use crate::hhee::ds::{DeviceContext, IrqLine, IrqReturn};
use alloc::sync::Arc;
use log::error;

pub struct PanicIrqHandler {
    context: Arc<DeviceContext>,
}

impl PanicIrqHandler {
    pub fn new(context: Arc<DeviceContext>) -> Self {
        Self { context }
    }
}

impl IrqHandler for PanicIrqHandler {
    fn handle(&self, line: IrqLine) -> IrqReturn {
        error!("hhee panic handler in kernel ({})", line);
        self.context.signal_panic();
        IrqReturn::Handled
    }
}
