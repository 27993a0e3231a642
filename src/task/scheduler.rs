//! 后台任务调度器
//!
//! `TokioTaskScheduler` 在独立的 tokio 运行时上执行任务：
//! 每个任务先等待所有依赖任务结束，再把实际工作交给阻塞线程池。
//! 任务状态记录在注册表中，同步等待方通过条件变量被唤醒。

use parking_lot::{Condvar, Mutex};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Local;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::watch;

use super::types::{IndexTask, TaskId, TaskInfo, TaskStatus};
use crate::config::TaskConfig;
use crate::core::{TaskError, TaskResult};

pub trait TaskScheduler: Send + Sync + fmt::Debug {
    /// 提交任务，返回任务 ID
    fn schedule(&self, task: IndexTask) -> TaskResult<TaskId>;

    /// 查询任务当前记录，不阻塞
    fn task(&self, id: TaskId) -> TaskResult<TaskInfo>;

    /// 阻塞等待任务结束，超时返回 `TaskError::Timeout`
    ///
    /// 超时不会取消任务
    fn wait_until_completed(&self, id: TaskId, timeout: Duration) -> TaskResult<TaskInfo>;

    /// 从注册表中移除已结束的任务，返回其最终记录
    ///
    /// 未结束的任务返回 `TaskError::Rejected`
    fn delete(&self, id: TaskId) -> TaskResult<TaskInfo>;
}

#[derive(Debug)]
struct TaskEntry {
    info: TaskInfo,
    status_rx: watch::Receiver<TaskStatus>,
}

#[derive(Debug, Default)]
struct TaskRegistry {
    tasks: Mutex<HashMap<TaskId, TaskEntry>>,
    completed: Condvar,
}

impl TaskRegistry {
    fn update_status(&self, id: TaskId, status: TaskStatus) {
        let terminal = status.is_terminal();
        {
            let mut tasks = self.tasks.lock();
            if let Some(entry) = tasks.get_mut(&id) {
                entry.info.status = status;
                entry.info.update_time = Local::now();
            }
        }
        if terminal {
            self.completed.notify_all();
        }
    }
}

pub struct TokioTaskScheduler {
    runtime: Option<Runtime>,
    handle: Handle,
    registry: Arc<TaskRegistry>,
    next_id: AtomicU64,
}

impl TokioTaskScheduler {
    pub fn new(config: &TaskConfig) -> TaskResult<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(config.worker_threads.max(1))
            .thread_name("graphschema-task")
            .enable_all()
            .build()
            .map_err(|e| TaskError::Rejected(format!("无法创建任务运行时: {}", e)))?;
        let handle = runtime.handle().clone();

        Ok(Self {
            runtime: Some(runtime),
            handle,
            registry: Arc::new(TaskRegistry::default()),
            next_id: AtomicU64::new(1),
        })
    }

    /// 当前已提交的任务数量
    pub fn task_count(&self) -> usize {
        self.registry.tasks.lock().len()
    }
}

impl fmt::Debug for TokioTaskScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokioTaskScheduler")
            .field("tasks", &self.task_count())
            .finish()
    }
}

impl TaskScheduler for TokioTaskScheduler {
    fn schedule(&self, task: IndexTask) -> TaskResult<TaskId> {
        let id = TaskId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let IndexTask {
            task_type,
            description,
            dependencies,
            work,
        } = task;

        let (status_tx, status_rx) = watch::channel(TaskStatus::Queued);
        let dependency_rxs = {
            let mut tasks = self.registry.tasks.lock();
            let rxs = dependencies
                .iter()
                .map(|dep| {
                    tasks
                        .get(dep)
                        .map(|entry| (*dep, entry.status_rx.clone()))
                        .ok_or(TaskError::NotFound(*dep))
                })
                .collect::<TaskResult<Vec<_>>>()?;
            tasks.insert(
                id,
                TaskEntry {
                    info: TaskInfo::new(id, task_type, description.clone(), dependencies),
                    status_rx,
                },
            );
            rxs
        };

        log::debug!("提交任务 {}: {}", id, description);

        let registry = Arc::clone(&self.registry);
        self.handle.spawn(async move {
            for (dep_id, mut dep_rx) in dependency_rxs {
                let outcome = dep_rx
                    .wait_for(|status| status.is_terminal())
                    .await
                    .map(|status| status.clone());
                match outcome {
                    Ok(TaskStatus::Failed(reason)) => {
                        log::warn!("任务 {} 的依赖任务 {} 失败: {}", id, dep_id, reason);
                    }
                    Err(_) => {
                        log::warn!("任务 {} 的依赖任务 {} 状态通道已关闭", id, dep_id);
                    }
                    Ok(_) => {}
                }
            }

            registry.update_status(id, TaskStatus::Running);
            let _ = status_tx.send(TaskStatus::Running);

            let status = match tokio::task::spawn_blocking(work).await {
                Ok(Ok(())) => TaskStatus::Success,
                Ok(Err(e)) => TaskStatus::Failed(e.to_string()),
                Err(e) => TaskStatus::Failed(format!("任务线程异常退出: {}", e)),
            };
            match &status {
                TaskStatus::Failed(reason) => log::warn!("任务 {} ({}) 失败: {}", id, description, reason),
                _ => log::debug!("任务 {} ({}) 完成", id, description),
            }

            registry.update_status(id, status.clone());
            let _ = status_tx.send(status);
        });

        Ok(id)
    }

    fn task(&self, id: TaskId) -> TaskResult<TaskInfo> {
        self.registry
            .tasks
            .lock()
            .get(&id)
            .map(|entry| entry.info.clone())
            .ok_or(TaskError::NotFound(id))
    }

    fn wait_until_completed(&self, id: TaskId, timeout: Duration) -> TaskResult<TaskInfo> {
        let deadline = Instant::now() + timeout;
        let mut tasks = self.registry.tasks.lock();
        loop {
            let info = tasks
                .get(&id)
                .map(|entry| entry.info.clone())
                .ok_or(TaskError::NotFound(id))?;
            if info.status.is_terminal() {
                return Ok(info);
            }
            if Instant::now() >= deadline {
                return Err(TaskError::Timeout {
                    task_id: id,
                    timeout,
                });
            }
            self.registry.completed.wait_until(&mut tasks, deadline);
        }
    }

    fn delete(&self, id: TaskId) -> TaskResult<TaskInfo> {
        let mut tasks = self.registry.tasks.lock();
        let status = tasks
            .get(&id)
            .map(|entry| entry.info.status.clone())
            .ok_or(TaskError::NotFound(id))?;
        if !status.is_terminal() {
            return Err(TaskError::Rejected(format!("任务 {} 尚未结束 ({})", id, status)));
        }
        let entry = tasks.remove(&id).ok_or(TaskError::NotFound(id))?;
        log::debug!("删除任务 {}", id);
        Ok(entry.info)
    }
}

impl Drop for TokioTaskScheduler {
    fn drop(&mut self) {
        // 未完成的阻塞任务在后台继续运行，不阻塞调用方
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StorageError;
    use crate::task::TaskType;
    use std::sync::mpsc;

    fn scheduler() -> TokioTaskScheduler {
        let config = TaskConfig {
            wait_timeout_secs: 1,
            worker_threads: 2,
        };
        TokioTaskScheduler::new(&config).expect("Failed to create scheduler")
    }

    #[test]
    fn test_task_runs_to_success() {
        let scheduler = scheduler();
        let id = scheduler
            .schedule(IndexTask::new(TaskType::RebuildIndex, "noop", || Ok(())))
            .expect("Failed to schedule task");

        let info = scheduler
            .wait_until_completed(id, Duration::from_secs(5))
            .expect("task should complete");
        assert_eq!(info.status, TaskStatus::Success);
        assert_eq!(info.task_type, TaskType::RebuildIndex);
    }

    #[test]
    fn test_failed_work_is_recorded() {
        let scheduler = scheduler();
        let id = scheduler
            .schedule(IndexTask::new(TaskType::RemoveIndex, "broken", || {
                Err(StorageError::IndexError("disk full".to_string()))
            }))
            .expect("Failed to schedule task");

        let info = scheduler
            .wait_until_completed(id, Duration::from_secs(5))
            .expect("task should complete");
        assert!(matches!(info.status, TaskStatus::Failed(ref reason) if reason.contains("disk full")));
    }

    #[test]
    fn test_wait_times_out_while_task_keeps_running() {
        let scheduler = scheduler();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let id = scheduler
            .schedule(IndexTask::new(TaskType::RebuildIndex, "slow", move || {
                let _ = release_rx.recv();
                Ok(())
            }))
            .expect("Failed to schedule task");

        let result = scheduler.wait_until_completed(id, Duration::from_millis(50));
        assert!(matches!(result, Err(TaskError::Timeout { task_id, .. }) if task_id == id));
        assert!(!scheduler.task(id).expect("task exists").status.is_terminal());

        release_tx.send(()).expect("Failed to release task");
        let info = scheduler
            .wait_until_completed(id, Duration::from_secs(5))
            .expect("task should complete after release");
        assert_eq!(info.status, TaskStatus::Success);
    }

    #[test]
    fn test_dependent_task_waits_for_dependency() {
        let scheduler = scheduler();
        let order = Arc::new(Mutex::new(Vec::new()));
        let (release_tx, release_rx) = mpsc::channel::<()>();

        let first_order = Arc::clone(&order);
        let first = scheduler
            .schedule(IndexTask::new(TaskType::RemoveIndex, "first", move || {
                let _ = release_rx.recv();
                first_order.lock().push("first");
                Ok(())
            }))
            .expect("Failed to schedule first task");

        let second_order = Arc::clone(&order);
        let second = scheduler
            .schedule(
                IndexTask::new(TaskType::RebuildIndex, "second", move || {
                    second_order.lock().push("second");
                    Ok(())
                })
                .with_dependencies([first]),
            )
            .expect("Failed to schedule second task");

        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(scheduler.task(second).expect("task exists").status, TaskStatus::Queued);

        release_tx.send(()).expect("Failed to release task");
        scheduler
            .wait_until_completed(second, Duration::from_secs(5))
            .expect("second task should complete");
        assert_eq!(*order.lock(), vec!["first", "second"]);
    }

    #[test]
    fn test_delete_only_removes_finished_tasks() {
        let scheduler = scheduler();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let id = scheduler
            .schedule(IndexTask::new(TaskType::RebuildIndex, "slow", move || {
                let _ = release_rx.recv();
                Ok(())
            }))
            .expect("Failed to schedule task");

        assert!(matches!(scheduler.delete(id), Err(TaskError::Rejected(_))));
        assert_eq!(scheduler.task_count(), 1);

        release_tx.send(()).expect("Failed to release task");
        scheduler
            .wait_until_completed(id, Duration::from_secs(5))
            .expect("task should complete after release");
        let info = scheduler.delete(id).expect("finished task should be deleted");
        assert_eq!(info.status, TaskStatus::Success);
        assert_eq!(scheduler.task_count(), 0);
        assert!(matches!(scheduler.task(id), Err(TaskError::NotFound(_))));
        assert!(matches!(scheduler.delete(id), Err(TaskError::NotFound(_))));
    }

    #[test]
    fn test_unknown_dependency_is_rejected() {
        let scheduler = scheduler();
        let result = scheduler.schedule(
            IndexTask::new(TaskType::RebuildIndex, "orphan", || Ok(())).with_dependencies([TaskId::new(999)]),
        );
        assert_eq!(result, Err(TaskError::NotFound(TaskId::new(999))));
        assert!(matches!(scheduler.task(TaskId::new(999)), Err(TaskError::NotFound(_))));
    }
}
