// hhee_rdr/src/hhee/infrastructure/worker.rs

//! # Deferred Processing Worker
//!
//! Sleeps on the device's parker until the panic signal holds a unit, and
//! turns each unit into one registry report.
//! After every report it goes back to waiting; it only terminates once
//! teardown stops the signal.

use super::registry_client::RegistryClient;
use crate::hhee::ds::{DeviceContext, WorkerState};
use crate::hhee::sync::Wake;
use alloc::sync::Arc;
use log::{error, info};

pub struct PanicWorker {
    context: Arc<DeviceContext>,
    client: RegistryClient,
}

impl PanicWorker {
    pub fn new(context: Arc<DeviceContext>, client: RegistryClient) -> Self {
        Self { context, client }
    }

    /// Runs until the signal is stopped.
    pub fn run(self) {
        info!("hhee_panic_happen start on {}", self.context.device());

        loop {
            self.context.set_worker_state(WorkerState::Waiting);
            match self.context.wait_for_panic() {
                Wake::Signaled => self.process(),
                Wake::Stopped => break,
            }
        }

        self.context.set_worker_state(WorkerState::Terminated);
        info!("hhee panic worker for {} stopped", self.context.device());
    }

    fn process(&self) {
        self.context.set_worker_state(WorkerState::Processing);
        error!("hhee panic trigger system_error.");
        // The interrupt carries no payload worth forwarding.
        self.client.submit(0, 0);
        self.context.note_reported();
    }
}
