//! Worker pool for synchronous tasks (bcrypt, mostly).
//!
//! Two priority queues over dedicated OS threads: `run_immed` for
//! request-latency work (login password verification), `run` for
//! provisioning work (hashing on user creation and password changes).
//! Request threads never pick up background jobs while immediate jobs are
//! queued.

use flume::{Receiver, Sender};
use futures::channel::oneshot;
use std::{sync::Arc, thread};

use crate::prelude::*;

type Job = Box<dyn FnOnce() + Send>;

#[derive(Debug)]
pub struct WorkerPool {
	immed: Sender<Job>,
	background: Sender<Job>,
}

impl WorkerPool {
	/// `n_immed` threads serve only the immediate queue; `n_shared` threads
	/// serve both, preferring immediate jobs.
	pub fn new(n_immed: usize, n_shared: usize) -> Self {
		let (immed, rx_immed) = flume::unbounded();
		let (background, rx_background) = flume::unbounded();

		let rx_immed = Arc::new(rx_immed);
		let rx_background = Arc::new(rx_background);

		for _ in 0..n_immed {
			let rx_immed = Arc::clone(&rx_immed);
			thread::spawn(move || worker_loop(&[rx_immed]));
		}

		for _ in 0..n_shared {
			let rx_immed = Arc::clone(&rx_immed);
			let rx_background = Arc::clone(&rx_background);
			thread::spawn(move || worker_loop(&[rx_immed, rx_background]));
		}

		Self { immed, background }
	}

	fn submit<F, T>(
		queue: &Sender<Job>,
		f: F,
	) -> impl std::future::Future<Output = VsResult<T>>
	where
		F: FnOnce() -> T + Send + 'static,
		T: Send + 'static,
	{
		let (res_tx, res_rx) = oneshot::channel();

		let job = Box::new(move || {
			let result = f();
			let _ = res_tx.send(result);
		});

		if queue.send(job).is_err() {
			error!("Failed to send job to worker queue");
		}

		async move {
			res_rx.await.map_err(|_| {
				error!("Worker dropped result channel (task may have panicked)");
				Error::Internal("worker task failed".into())
			})
		}
	}

	/// Submit a request-latency job.
	pub fn run_immed<F, T>(&self, f: F) -> impl std::future::Future<Output = VsResult<T>>
	where
		F: FnOnce() -> T + Send + 'static,
		T: Send + 'static,
	{
		Self::submit(&self.immed, f)
	}

	/// Submit a background job.
	pub fn run<F, T>(&self, f: F) -> impl std::future::Future<Output = VsResult<T>>
	where
		F: FnOnce() -> T + Send + 'static,
		T: Send + 'static,
	{
		Self::submit(&self.background, f)
	}

	/// Like `run_immed`, but flattens `VsResult<VsResult<T>>` into `VsResult<T>`.
	/// Use when the closure itself returns `VsResult<T>`.
	pub fn try_run_immed<F, T>(&self, f: F) -> impl std::future::Future<Output = VsResult<T>>
	where
		F: FnOnce() -> VsResult<T> + Send + 'static,
		T: Send + 'static,
	{
		let fut = self.run_immed(f);
		async move { fut.await? }
	}

	/// Like `run`, but flattens `VsResult<VsResult<T>>` into `VsResult<T>`.
	pub fn try_run<F, T>(&self, f: F) -> impl std::future::Future<Output = VsResult<T>>
	where
		F: FnOnce() -> VsResult<T> + Send + 'static,
		T: Send + 'static,
	{
		let fut = self.run(f);
		async move { fut.await? }
	}
}

fn run_job(job: Job) {
	if let Err(e) = std::panic::catch_unwind(std::panic::AssertUnwindSafe(job)) {
		error!("Worker thread caught panic: {:?}", e);
	}
}

fn worker_loop(queues: &[Arc<Receiver<Job>>]) {
	loop {
		// Try higher-priority queues first (non-blocking)
		let mut job = None;
		for rx in queues {
			if let Ok(j) = rx.try_recv() {
				job = Some(j);
				break;
			}
		}

		if let Some(job) = job {
			run_job(job);
			continue;
		}

		// Wait for the next job on any queue
		let mut selector = flume::Selector::new();
		for rx in queues {
			selector = selector.recv(rx, |res| res);
		}

		match selector.wait() {
			Ok(job) => run_job(job),
			Err(_) => return,
		}
	}
}


// vim: ts=4
