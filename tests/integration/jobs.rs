//! Worker pool tests through the public API: ordering, isolation between
//! concurrent jobs, backpressure, and draining on shutdown.
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use job_queue_server::jobs::{
    BufferSink, GreetingHandler, Job, JobError, JobPayload, JobProducer, JobProducerError,
    JobProducerTrait, OverflowPolicy, Queue, QueueConfig, ResultSink, WorkFunction, WorkerPool,
};
use parking_lot::Mutex;

fn greeting_job(name: &str) -> (Job, BufferSink) {
    let sink = BufferSink::new();
    let job = Job::new(
        JobPayload::new().with_param("Name", name),
        Box::new(sink.clone()),
    );
    (job, sink)
}

/// Sleeps for every job so the queue fills up behind it.
struct SlowWork {
    delay: Duration,
    completed: AtomicUsize,
}

impl WorkFunction for SlowWork {
    fn name(&self) -> &str {
        "slow"
    }

    fn execute(&self, payload: &JobPayload, sink: &mut dyn ResultSink) -> Result<(), JobError> {
        thread::sleep(self.delay);
        sink.write(payload.get("Name").unwrap_or_default().as_bytes())?;
        self.completed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[test]
fn test_thousand_concurrent_jobs_across_four_workers() {
    const PRODUCERS: usize = 8;
    const JOBS_PER_PRODUCER: usize = 125;

    let queue = Arc::new(Queue::unbounded());
    let producer = Arc::new(JobProducer::new(queue.clone()));
    let pool = WorkerPool::start(4, queue.clone(), Arc::new(GreetingHandler)).unwrap();

    let submitters: Vec<_> = (0..PRODUCERS)
        .map(|p| {
            let producer = producer.clone();
            thread::spawn(move || {
                (0..JOBS_PER_PRODUCER)
                    .map(|i| {
                        let name = format!("user-{p}-{i}");
                        let (job, sink) = greeting_job(&name);
                        producer.submit(job).unwrap();
                        (name, sink)
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let submitted: Vec<(String, BufferSink)> = submitters
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();
    pool.shutdown();

    assert_eq!(submitted.len(), PRODUCERS * JOBS_PER_PRODUCER);
    for (name, sink) in &submitted {
        assert_eq!(sink.body_string(), format!("Hello, {name}"));
    }
    assert!(queue.is_empty());
}

#[test]
fn test_single_worker_answers_in_submission_order() {
    let order = Arc::new(Mutex::new(Vec::new()));

    struct OrderedWork(Arc<Mutex<Vec<String>>>);
    impl WorkFunction for OrderedWork {
        fn name(&self) -> &str {
            "ordered"
        }

        fn execute(&self, payload: &JobPayload, _: &mut dyn ResultSink) -> Result<(), JobError> {
            self.0
                .lock()
                .push(payload.get("Name").unwrap_or_default().to_string());
            Ok(())
        }
    }

    let queue = Arc::new(Queue::unbounded());
    let producer = JobProducer::new(queue.clone());
    for name in ["A", "B", "C"] {
        producer.submit(greeting_job(name).0).unwrap();
    }

    let pool = WorkerPool::start(1, queue, Arc::new(OrderedWork(order.clone()))).unwrap();
    pool.shutdown();

    assert_eq!(*order.lock(), vec!["A", "B", "C"]);
}

#[test]
fn test_full_queue_rejects_until_workers_catch_up() {
    let queue = Arc::new(Queue::new(QueueConfig::bounded(2, OverflowPolicy::Reject)));
    let producer = JobProducer::new(queue.clone());

    producer.submit(greeting_job("one").0).unwrap();
    producer.submit(greeting_job("two").0).unwrap();
    let err = producer.submit(greeting_job("three").0).unwrap_err();
    assert!(matches!(err, JobProducerError::QueueFull { capacity: 2, .. }));

    let pool = WorkerPool::start(2, queue.clone(), Arc::new(GreetingHandler)).unwrap();
    let (job, sink) = greeting_job("retry");
    let mut job = Some(job);
    for _ in 0..100 {
        match producer.submit(job.take().unwrap()) {
            Ok(()) => break,
            Err(e) => {
                job = Some(e.into_job());
                thread::sleep(Duration::from_millis(10));
            }
        }
    }
    assert!(job.is_none(), "queue never made room");

    pool.shutdown();
    assert_eq!(sink.body_string(), "Hello, retry");
}

#[test]
fn test_blocking_queue_waits_for_room() {
    let queue = Arc::new(Queue::new(QueueConfig::bounded(1, OverflowPolicy::Block)));
    let producer = Arc::new(JobProducer::new(queue.clone()));
    assert!(producer.may_block());

    let work = Arc::new(SlowWork {
        delay: Duration::from_millis(20),
        completed: AtomicUsize::new(0),
    });
    let pool = WorkerPool::start(1, queue.clone(), work.clone()).unwrap();

    let submitters: Vec<_> = (0..5)
        .map(|i| {
            let producer = producer.clone();
            thread::spawn(move || {
                let (job, sink) = greeting_job(&format!("blocked-{i}"));
                producer.submit(job).map(|()| sink)
            })
        })
        .collect();

    let sinks: Vec<BufferSink> = submitters
        .into_iter()
        .map(|handle| handle.join().unwrap().unwrap())
        .collect();
    assert!(queue.len() <= 1);

    pool.shutdown();
    assert_eq!(work.completed.load(Ordering::SeqCst), 5);
    for sink in sinks {
        assert!(sink.body_string().starts_with("blocked-"));
    }
}

#[test]
fn test_shutdown_finishes_queued_jobs_and_refuses_new_ones() {
    let queue = Arc::new(Queue::unbounded());
    let producer = JobProducer::new(queue.clone());
    let work = Arc::new(SlowWork {
        delay: Duration::from_millis(5),
        completed: AtomicUsize::new(0),
    });
    let pool = WorkerPool::start(2, queue.clone(), work.clone()).unwrap();

    for i in 0..20 {
        producer.submit(greeting_job(&format!("drain-{i}")).0).unwrap();
    }
    pool.shutdown();

    assert_eq!(work.completed.load(Ordering::SeqCst), 20);
    let err = producer.submit(greeting_job("late").0).unwrap_err();
    assert!(matches!(err, JobProducerError::QueueClosed { .. }));
}
