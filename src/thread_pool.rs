//! Shared thread pool for parallel trials.

use std::sync::OnceLock;

use rayon::ThreadPool;

static THREAD_POOL: OnceLock<ThreadPool> = OnceLock::new();

/// Get or initialize the shared thread pool.
///
/// One worker per logical CPU, named `sampling-dist-{i}` so trial workers
/// are recognisable in profiles and `tracing` output.
pub fn get_thread_pool() -> &'static ThreadPool {
    THREAD_POOL.get_or_init(|| {
        rayon::ThreadPoolBuilder::new()
            .thread_name(|i| format!("sampling-dist-{i}"))
            .build()
            .expect("Failed to build resampling thread pool")
    })
}

/// Execute a parallel operation on the shared pool.
pub fn install<OP, R>(op: OP) -> R
where
    OP: FnOnce() -> R + Send,
    R: Send,
{
    get_thread_pool().install(op)
}
