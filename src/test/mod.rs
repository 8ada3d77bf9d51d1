// hhee_rdr/src/test/mod.rs

//! Test doubles for the injected collaborators, and end-to-end scenarios
//! driving the whole exception path through them.


use crate::hhee::ds::{
    DeviceContext, DeviceId, DiagError, ExceptionDescriptor, IrqLine, ModuleId, RegistryError,
    SpawnError,
};
use crate::hhee::infrastructure::di::{
    Collaborators, DiagnosticFacility, Diagnostics, Parker, ReliabilityRegistry, SystemReset,
    Task, TaskSpawner, WorkerHandle,
};
use crate::hhee::infrastructure::{DriverConfig, IrqTable, StaticConfig};
use crate::hhee::HheeDriver;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const WAIT_LIMIT: Duration = Duration::from_secs(5);

/// Polls `cond` until it holds, panicking after a few seconds.
pub fn wait_until(what: &str, mut cond: impl FnMut() -> bool) {
    let start = Instant::now();
    while !cond() {
        if start.elapsed() > WAIT_LIMIT {
            panic!("timed out waiting for {}", what);
        }
        thread::sleep(Duration::from_millis(1));
    }
}

/// Sleeps on a condition variable until unparked.
#[derive(Default)]
pub struct ThreadParker {
    token: Mutex<bool>,
    wake: Condvar,
}

impl Parker for ThreadParker {
    fn park(&self) {
        let mut token = self.token.lock().unwrap();
        while !*token {
            token = self.wake.wait(token).unwrap();
        }
        *token = false;
    }

    fn unpark(&self) {
        *self.token.lock().unwrap() = true;
        self.wake.notify_one();
    }
}

/// Never sleeps; counts the wakeups it is given.
#[derive(Default)]
pub struct CountingParker {
    unparks: AtomicUsize,
}

impl CountingParker {
    pub fn unparks(&self) -> usize {
        self.unparks.load(Ordering::SeqCst)
    }
}

impl Parker for CountingParker {
    fn park(&self) {
        thread::yield_now();
    }

    fn unpark(&self) {
        self.unparks.fetch_add(1, Ordering::SeqCst);
    }
}

/// A context whose worker sleeps on a [`ThreadParker`].
pub fn test_context(device: DeviceId) -> Arc<DeviceContext> {
    Arc::new(DeviceContext::new(device, Arc::new(ThreadParker::default())))
}

/// Accepts every registration unless told otherwise and records every
/// submission.
pub struct RecordingRegistry {
    refuse: AtomicBool,
    registered: Mutex<Vec<ModuleId>>,
    submitted: Mutex<Vec<(ModuleId, u64, u64)>>,
}

impl RecordingRegistry {
    pub fn new() -> Self {
        Self {
            refuse: AtomicBool::new(false),
            registered: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn refuse_registrations(&self) {
        self.refuse.store(true, Ordering::SeqCst);
    }

    pub fn registrations(&self) -> usize {
        self.registered.lock().unwrap().len()
    }

    pub fn submissions(&self) -> Vec<(ModuleId, u64, u64)> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn wait_for_submissions(&self, count: usize) {
        wait_until("registry submissions", || {
            self.submitted.lock().unwrap().len() >= count
        });
    }
}

impl ReliabilityRegistry for RecordingRegistry {
    fn register(&self, descriptor: &'static ExceptionDescriptor) -> Result<(), RegistryError> {
        if self.refuse.load(Ordering::SeqCst) {
            return Err(RegistryError::Unavailable);
        }
        let mut registered = self.registered.lock().unwrap();
        if registered.contains(&descriptor.module_id) {
            return Err(RegistryError::Duplicate);
        }
        registered.push(descriptor.module_id);
        Ok(())
    }

    fn submit(&self, module_id: ModuleId, aux1: u64, aux2: u64) {
        self.submitted.lock().unwrap().push((module_id, aux1, aux2));
    }
}

/// Records reboots instead of performing them.
pub struct RecordingReset {
    reboots: Mutex<Vec<ModuleId>>,
}

impl RecordingReset {
    pub fn new() -> Self {
        Self {
            reboots: Mutex::new(Vec::new()),
        }
    }

    pub fn reboots(&self) -> Vec<ModuleId> {
        self.reboots.lock().unwrap().clone()
    }
}

impl SystemReset for RecordingReset {
    fn reboot(&self, descriptor: &ExceptionDescriptor) {
        self.reboots.lock().unwrap().push(descriptor.module_id);
    }
}

struct ThreadHandle(JoinHandle<()>);

impl WorkerHandle for ThreadHandle {
    fn join(self: Box<Self>) {
        self.0.join().expect("worker thread panicked");
    }
}

/// Runs each task on a named std thread.
pub struct ThreadSpawner;

impl TaskSpawner for ThreadSpawner {
    fn parker(&self) -> Arc<dyn Parker> {
        Arc::new(ThreadParker::default())
    }

    fn spawn(&self, name: &'static str, task: Task) -> Result<Box<dyn WorkerHandle>, SpawnError> {
        thread::Builder::new()
            .name(name.into())
            .spawn(task)
            .map(|handle| Box::new(ThreadHandle(handle)) as Box<dyn WorkerHandle>)
            .map_err(|_| SpawnError)
    }
}

#[derive(Default)]
struct Deferred {
    task: Option<Task>,
    running: Option<JoinHandle<()>>,
}

/// Holds the task until [`DeferredSpawner::start`], so interrupts can be
/// raised before the worker first waits.
#[derive(Clone, Default)]
pub struct DeferredSpawner {
    state: Arc<Mutex<Deferred>>,
}

impl DeferredSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) {
        let mut state = self.state.lock().unwrap();
        let task = state.task.take().expect("nothing spawned");
        state.running = Some(thread::spawn(task));
    }
}

struct DeferredHandle(Arc<Mutex<Deferred>>);

impl WorkerHandle for DeferredHandle {
    fn join(self: Box<Self>) {
        let (task, running) = {
            let mut state = self.0.lock().unwrap();
            (state.task.take(), state.running.take())
        };
        if let Some(handle) = running {
            handle.join().expect("worker thread panicked");
        } else if let Some(task) = task {
            // Never started: the signal is already stopped, so this returns.
            task();
        }
    }
}

impl TaskSpawner for DeferredSpawner {
    fn parker(&self) -> Arc<dyn Parker> {
        Arc::new(ThreadParker::default())
    }

    fn spawn(&self, _name: &'static str, task: Task) -> Result<Box<dyn WorkerHandle>, SpawnError> {
        self.state.lock().unwrap().task = Some(task);
        Ok(Box::new(DeferredHandle(Arc::clone(&self.state))))
    }
}

pub struct FailingSpawner;

impl TaskSpawner for FailingSpawner {
    fn parker(&self) -> Arc<dyn Parker> {
        Arc::new(ThreadParker::default())
    }

    fn spawn(&self, _name: &'static str, _task: Task) -> Result<Box<dyn WorkerHandle>, SpawnError> {
        Err(SpawnError)
    }
}

/// A diagnostic facility counting its init and cleanup calls.
pub struct TestFacility {
    name: &'static str,
    fail: bool,
    inits: AtomicUsize,
    cleanups: AtomicUsize,
}

impl TestFacility {
    pub fn ok(name: &'static str) -> Self {
        Self {
            name,
            fail: false,
            inits: AtomicUsize::new(0),
            cleanups: AtomicUsize::new(0),
        }
    }

    pub fn failing(name: &'static str) -> Self {
        Self {
            fail: true,
            ..Self::ok(name)
        }
    }

    pub fn inits(&self) -> usize {
        self.inits.load(Ordering::SeqCst)
    }

    pub fn cleanups(&self) -> usize {
        self.cleanups.load(Ordering::SeqCst)
    }
}

impl DiagnosticFacility for TestFacility {
    fn name(&self) -> &'static str {
        self.name
    }

    fn init(&self) -> Result<(), DiagError> {
        self.inits.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(DiagError { facility: self.name })
        } else {
            Ok(())
        }
    }

    fn cleanup(&self) {
        self.cleanups.fetch_add(1, Ordering::SeqCst);
    }
}

pub const TEST_DEVICE: DeviceId = DeviceId(1);
pub const TEST_LINE: IrqLine = IrqLine(42);

/// A complete set of collaborators with the HHEE node enabled and
/// `TEST_DEVICE`'s first interrupt wired to `TEST_LINE`.
pub struct Rig {
    pub config: Arc<StaticConfig>,
    pub registry: Arc<RecordingRegistry>,
    pub irq: Arc<IrqTable>,
    pub logger: Arc<TestFacility>,
    pub debugfs: Arc<TestFacility>,
    pub spawner: Arc<dyn TaskSpawner>,
}

impl Rig {
    pub fn new() -> Self {
        let rig = Self::unwired();
        rig.irq.assign(TEST_DEVICE, 0, TEST_LINE);
        rig
    }

    /// Like [`Rig::new`] but with no interrupt assigned to the device.
    pub fn unwired() -> Self {
        Self {
            config: Arc::new(StaticConfig::hhee_enabled()),
            registry: Arc::new(RecordingRegistry::new()),
            irq: Arc::new(IrqTable::new()),
            logger: Arc::new(TestFacility::ok("hhee logger")),
            debugfs: Arc::new(TestFacility::ok("hhee debugfs")),
            spawner: Arc::new(ThreadSpawner),
        }
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            config: self.config.clone(),
            registry: self.registry.clone(),
            irq: self.irq.clone(),
            diagnostics: Diagnostics {
                logger: self.logger.clone(),
                debugfs: Some(self.debugfs.clone()),
            },
            spawner: self.spawner.clone(),
            firmware: None,
        }
    }

    pub fn driver(&self) -> HheeDriver {
        HheeDriver::new(DriverConfig::default(), self.collaborators())
    }
}
