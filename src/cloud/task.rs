use std::sync::{Arc, Mutex, OnceLock};

use super::image::MachineImage;

/// Shared handle to a captured image.
///
/// Capture hands the same handle to the synchronous return value and to the
/// caller's completion sink, so a mutation made by the sink's hook (tagging
/// software, flipping the public share) is visible through both.
pub type ImageHandle = Arc<Mutex<MachineImage>>;

type CompletionHook = Box<dyn Fn(&mut MachineImage) + Send + Sync>;

/// Caller-supplied asynchronous completion sink for a capture.
///
/// The orchestrator completes the task exactly once. An optional hook runs
/// under the handle's lock before the result becomes observable, so whatever
/// it changes is already in place when either side reads the image.
#[derive(Default)]
pub struct CaptureTask {
    hook: Option<CompletionHook>,
    result: OnceLock<ImageHandle>,
}

impl CaptureTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// A task whose `hook` runs against the delivered image on completion.
    pub fn with_hook(hook: impl Fn(&mut MachineImage) + Send + Sync + 'static) -> Self {
        Self {
            hook: Some(Box::new(hook)),
            result: OnceLock::new(),
        }
    }

    pub(crate) fn complete(&self, handle: &ImageHandle) {
        if let Some(hook) = &self.hook {
            let mut image = handle.lock().expect("image handle lock poisoned");
            hook(&mut image);
        }
        // Set exactly once; a second completion attempt is a no-op.
        let _ = self.result.set(Arc::clone(handle));
    }

    pub fn is_complete(&self) -> bool {
        self.result.get().is_some()
    }

    /// The delivered handle, once the capture has completed.
    pub fn result(&self) -> Option<ImageHandle> {
        self.result.get().cloned()
    }
}
