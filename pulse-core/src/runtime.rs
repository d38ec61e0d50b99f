use log::debug;
use tokio::runtime::Runtime;

/// Builds the multi-threaded runtime the server runs on. `None` sizes it to
/// the available parallelism, never fewer than two workers.
pub fn build_runtime(worker_threads: Option<usize>) -> std::io::Result<Runtime> {
    let threads = worker_threads.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(2)
    });
    let threads = std::cmp::max(threads, 2);
    debug!("Initializing runtime with {} worker threads", threads);
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(threads)
        .thread_name("pulse-worker")
        .enable_all()
        .build()
}
