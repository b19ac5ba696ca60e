use std::{
    sync::{
        mpsc,
        Arc,
    },
    thread,
    time::Duration,
};

use tokio::runtime::Runtime;

use super::TaskResult;
use crate::core::{
    capture::ReadTicket,
    http,
    image,
    BookDraft,
    LibrisError,
};

/// Runs slow work off the UI thread and hands results back through a channel
/// that the UI drains once per frame.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
}

impl TaskManager {
    pub fn new() -> Result<Self, LibrisError> {
        let runtime = Arc::new(Runtime::new()?);

        let (sender, receiver) = mpsc::channel();

        Ok(Self { runtime, receiver, sender })
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>) {
        (self.sender.clone(), self.runtime.clone())
    }

    pub fn read_image(&self, ticket: ReadTicket) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime
                .block_on(async { image::read_encoded(&ticket.path).await })
                .map_err(|e| e.to_string());

            let _ = sender.send(TaskResult::ImageRead { generation: ticket.generation, result });
        });
    }

    pub fn create_book(&self, base_url: String, timeout: Duration, draft: BookDraft) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                let client = http::http_client(timeout)?;
                http::create_book(&client, &base_url, &draft).await
            });

            let _ = sender.send(TaskResult::BookCreated(result.map_err(|e| e.to_string())));
        });
    }

    pub fn load_progress(&self, base_url: String, timeout: Duration) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                let client = http::http_client(timeout)?;
                http::fetch_progress(&client, &base_url).await
            });

            let _ = sender.send(TaskResult::ProgressLoaded(result.map_err(|e| e.to_string())));
        });
    }
}
