use std::{
    sync::{Mutex, Once},
    time::Duration,
};

use log::{
    Level, LevelFilter, Log, Metadata, Record,
    kv::{self, VisitSource},
};
use sl::{Attrs, Logger};

#[derive(Debug, Clone)]
struct Captured {
    target: String,
    level: Level,
    message: String,
    pairs: Vec<(String, String)>,
}

impl Captured {
    fn value(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

static RECORDS: Mutex<Vec<Captured>> = Mutex::new(Vec::new());

struct Pairs(Vec<(String, String)>);

impl<'kvs> VisitSource<'kvs> for Pairs {
    fn visit_pair(&mut self, key: kv::Key<'kvs>, value: kv::Value<'kvs>) -> Result<(), kv::Error> {
        self.0.push((key.to_string(), value.to_string()));
        Ok(())
    }
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let mut pairs = Pairs(Vec::new());
        record.key_values().visit(&mut pairs).unwrap();
        RECORDS.lock().unwrap().push(Captured {
            target: record.target().to_string(),
            level: record.level(),
            message: record.args().to_string(),
            pairs: pairs.0,
        });
    }

    fn flush(&self) {}
}

fn init() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        log::set_logger(&CaptureLogger).unwrap();
        log::set_max_level(LevelFilter::Debug);
    });
}

fn records_for(target: &str) -> Vec<Captured> {
    RECORDS
        .lock()
        .unwrap()
        .iter()
        .filter(|r| r.target == target)
        .cloned()
        .collect()
}

#[test]
fn test_absent_error_leaves_no_field() {
    init();
    let ok: Result<(), std::io::Error> = Ok(());
    sl::info!(
        target: "records::absent",
        [sl::component("db"), sl::maybe_error(ok.as_ref().err())],
        "ping done"
    );

    let records = records_for("records::absent");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].message, "ping done");
    assert_eq!(records[0].level, Level::Info);
    assert_eq!(records[0].pairs, vec![("component".to_string(), "db".to_string())]);
    assert!(records[0].value("error").is_none());
}

#[test]
fn test_present_error_and_groups() {
    init();
    let err = std::io::Error::other("connection refused");
    sl::error!(
        target: "records::error",
        [
            sl::error(&err),
            sl::source("svc", "Run"),
            sl::duration(Duration::from_millis(250)),
        ],
        "cannot connect to {}",
        "db-1"
    );

    let records = records_for("records::error");
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.level, Level::Error);
    assert_eq!(record.message, "cannot connect to db-1");
    assert_eq!(record.value("error"), Some("connection refused"));
    assert_eq!(record.value("source"), Some("{component=svc method=Run}"));
    assert_eq!(record.value("duration"), Some("250ms"));
}

#[test]
fn test_level_filter_applies() {
    init();
    sl::trace!(target: "records::filtered", [sl::component("db")], "too verbose");
    sl::debug!(target: "records::filtered", [sl::component("db")], "kept");

    let records = records_for("records::filtered");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].message, "kept");
}

#[test]
fn test_logger_bound_attributes_come_first() {
    init();
    let logger = Logger::new("records::logger")
        .with(sl::component("grpc"))
        .with(sl::maybe_error::<std::io::Error>(None));
    assert_eq!(logger.attrs().len(), 1);

    logger.warn(
        Attrs::new().with(sl::method("Call")),
        format_args!("retry {}", 2),
    );
    logger.trace(Attrs::new(), format_args!("filtered out"));

    let records = records_for("records::logger");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].message, "retry 2");
    assert_eq!(
        records[0].pairs,
        vec![
            ("component".to_string(), "grpc".to_string()),
            ("method".to_string(), "Call".to_string()),
        ]
    );
}

#[test]
fn test_panic_hook_logs_panic_site() {
    init();
    sl::install_panic_hook();
    sl::install_panic_hook();
    let result = std::panic::catch_unwind(|| -> u32 { "abc".parse().expect("hook boom") });
    assert!(result.is_err());

    let records = records_for("panic");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, Level::Error);
    let panic = records[0].value("panic").unwrap();
    assert!(panic.starts_with("{value=hook boom"));
    assert!(panic.contains("location="));
    assert!(panic.contains("records.rs"));
    assert!(panic.contains("stack="));
}

#[test]
fn test_shared_logger_across_threads() {
    init();
    let logger = Logger::new("records::shared").with(sl::component("pool"));
    std::thread::scope(|scope| {
        for worker in 0..4u32 {
            let logger = &logger;
            scope.spawn(move || {
                logger.info(
                    Attrs::new().with(sl::field("worker", worker)),
                    format_args!("worker up"),
                );
            });
        }
    });

    let records = records_for("records::shared");
    assert_eq!(records.len(), 4);
    assert!(records.iter().all(|r| r.value("component") == Some("pool")));
    let mut workers: Vec<&str> = records.iter().filter_map(|r| r.value("worker")).collect();
    workers.sort();
    assert_eq!(workers, ["0", "1", "2", "3"]);
}
