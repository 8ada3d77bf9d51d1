// hhee_rdr/src/hhee/api.rs

//! # Lifecycle Controller
//!
//! Attaches the exception path to a device and tears it down again. Attach
//! brings up, in order: the device context (with its signal at count 0), the
//! descriptor registration, the diagnostic facilities, the interrupt handler
//! and the worker. Any failure undoes what was already brought up and
//! releases the context before the error is returned. Detach is tied to the
//! [`Attachment`]: dropping it tears everything down.

use crate::hhee::ds::{hhee_panic_descriptor, DeviceContext, DeviceId, DriverError, IrqLine};
use crate::hhee::infrastructure::di::{
    Collaborators, DiagnosticFacility, InterruptController, WorkerHandle,
};
use crate::hhee::infrastructure::{
    check_enabled, ContextTable, DriverConfig, PanicIrqHandler, PanicWorker, RegistryClient,
};
use crate::util::firmware::{hhee_version, FirmwareError, FirmwareResult, HheeVersion};
use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;
use log::{error, info};

/// A live attachment returned by [`HheeDriver::probe`].
///
/// Dropping it detaches the device: the handler is freed, the worker is
/// stopped and joined, debugfs is cleaned up and the context is released.
#[must_use = "dropping an Attachment detaches the device"]
pub struct Attachment {
    context: Arc<DeviceContext>,
    line: IrqLine,
    worker: Option<Box<dyn WorkerHandle>>,
    irq: Arc<dyn InterruptController>,
    debugfs: Option<Arc<dyn DiagnosticFacility>>,
    contexts: Arc<ContextTable>,
}

impl Attachment {
    pub fn device(&self) -> DeviceId {
        self.context.device()
    }

    pub fn context(&self) -> &Arc<DeviceContext> {
        &self.context
    }

    /// The line the panic handler is installed on.
    pub fn irq_line(&self) -> IrqLine {
        self.line
    }
}

impl Drop for Attachment {
    fn drop(&mut self) {
        let device = self.context.device();
        info!("hhee panic remove {}", device);

        // The handler must be gone before the worker stops, or a late
        // interrupt would release a signal nobody drains.
        self.irq.free_irq(self.line);
        self.context.request_stop();
        if let Some(worker) = self.worker.take() {
            worker.join();
        }

        if let Some(debugfs) = &self.debugfs {
            debugfs.cleanup();
        }
        self.contexts.free(device);
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("device", &self.context.device())
            .field("line", &self.line)
            .finish()
    }
}

/// The HHEE driver.
pub struct HheeDriver {
    config: DriverConfig,
    collaborators: Collaborators,
    contexts: Arc<ContextTable>,
    client: RegistryClient,
}

impl HheeDriver {
    pub fn new(config: DriverConfig, collaborators: Collaborators) -> Self {
        let client = RegistryClient::new(collaborators.registry.clone(), hhee_panic_descriptor());
        Self {
            contexts: Arc::new(ContextTable::with_capacity(config.max_devices)),
            config,
            collaborators,
            client,
        }
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// The live context of `device`, if attached.
    pub fn context(&self, device: DeviceId) -> Option<Arc<DeviceContext>> {
        self.contexts.get(device)
    }

    /// Number of attached devices.
    pub fn attached(&self) -> usize {
        self.contexts.len()
    }

    /// Attaches the exception path to `device`.
    ///
    /// Returns `Ok(None)` without touching any resource when the feature is
    /// disabled in configuration.
    pub fn probe(&self, device: DeviceId) -> Result<Option<Attachment>, DriverError> {
        info!("hhee panic probe");

        if !check_enabled(&*self.collaborators.config, &self.config) {
            return Ok(None);
        }

        let parker = self.collaborators.spawner.parker();
        let context = self.contexts.alloc(device, parker)?;

        match self.bring_up(&context) {
            Ok((line, worker)) => {
                info!("hhee panic probe done for {} on {}", device, line);
                Ok(Some(Attachment {
                    context,
                    line,
                    worker: Some(worker),
                    irq: Arc::clone(&self.collaborators.irq),
                    debugfs: self.collaborators.diagnostics.debugfs.clone(),
                    contexts: Arc::clone(&self.contexts),
                }))
            }
            Err(e) => {
                error!("hhee panic probe failed for {}: {}", device, e);
                self.contexts.free(device);
                Err(e)
            }
        }
    }

    /// Detaches and releases everything `probe` brought up. Equivalent to
    /// dropping the attachment.
    pub fn remove(&self, attachment: Attachment) {
        drop(attachment);
    }

    /// Reads the secure monitor's revision through the configured conduit.
    pub fn firmware_version(&self) -> FirmwareResult<HheeVersion> {
        match &self.collaborators.firmware {
            Some(conduit) => hhee_version(&**conduit),
            None => Err(FirmwareError::NotSupported),
        }
    }

    fn bring_up(
        &self,
        context: &Arc<DeviceContext>,
    ) -> Result<(IrqLine, Box<dyn WorkerHandle>), DriverError> {
        // A refusal is logged by the client and does not stop attach.
        self.client.register();

        self.init_diagnostics()?;
        self.connect(context).map_err(|e| {
            self.cleanup_debugfs();
            e
        })
    }

    fn init_diagnostics(&self) -> Result<(), DriverError> {
        let diagnostics = &self.collaborators.diagnostics;

        if let Err(e) = diagnostics.logger.init() {
            error!("{}: {}", diagnostics.logger.name(), e);
            return Err(DriverError::InvalidArgument);
        }

        if let Some(debugfs) = &diagnostics.debugfs {
            if let Err(e) = debugfs.init() {
                error!("{}: {}", debugfs.name(), e);
                return Err(DriverError::InvalidArgument);
            }
        }

        Ok(())
    }

    fn cleanup_debugfs(&self) {
        if let Some(debugfs) = &self.collaborators.diagnostics.debugfs {
            debugfs.cleanup();
        }
    }

    /// Installs the handler and starts the worker.
    fn connect(
        &self,
        context: &Arc<DeviceContext>,
    ) -> Result<(IrqLine, Box<dyn WorkerHandle>), DriverError> {
        let irq = &self.collaborators.irq;
        let device = context.device();

        let line = irq.resolve_irq(device, self.config.irq_index).ok_or_else(|| {
            error!("hhee: no irq {} on {}", self.config.irq_index, device);
            DriverError::NoSuchDevice
        })?;

        let handler = Arc::new(PanicIrqHandler::new(Arc::clone(context)));
        irq.install_handler(line, handler, self.config.irq_name)
            .map_err(|e| {
                error!("hhee: request_irq {} failed: {}", line, e);
                DriverError::InvalidArgument
            })?;

        let worker = PanicWorker::new(Arc::clone(context), self.client.clone());
        match self
            .collaborators
            .spawner
            .spawn(self.config.worker_name, Box::new(move || worker.run()))
        {
            Ok(handle) => Ok((line, handle)),
            Err(e) => {
                error!("hhee: {}: {}", self.config.worker_name, e);
                irq.free_irq(line);
                Err(DriverError::InvalidArgument)
            }
        }
    }
}
