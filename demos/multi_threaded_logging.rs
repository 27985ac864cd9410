use std::sync::{Arc, mpsc::channel};

use duallog::{ConsoleLock, Logger};

fn main() {
    // every logger shares the same console lock
    let console = ConsoleLock::shared();
    let main_logger = Logger::with_shared_console("main thread", console.clone());
    main_logger.log_message("Hello, world!");
    // worker threads also log to their own files
    let (handles, senders): (Vec<_>, Vec<_>) = (0..5)
        .map(|i| {
            let (sender, receiver) = channel::<&'static str>();
            let logger = Arc::new(Logger::with_shared_console(
                &format!("thread {i}"),
                console.clone(),
            ));
            (
                std::thread::spawn(move || {
                    logger.enable_file_logging(format!("/tmp/duallog/thread_{i}.log"));
                    for message in receiver {
                        logger.log_warning(&format!("MESSAGE RECEIVED: {message}"));
                    }
                    logger.log_success("channel closed");
                    logger.disable_file_logging();
                }),
                sender,
            )
        })
        .unzip();
    for sender in senders {
        sender.send("Hello, world!").ok();
    }
    for handle in handles {
        if handle.join().is_err() {
            main_logger.log_error("worker thread panicked");
        }
    }
    for i in 0..5 {
        match std::fs::read_to_string(format!("/tmp/duallog/thread_{i}.log")) {
            Ok(content) => main_logger.log_message(&format!(
                "last line of /tmp/duallog/thread_{i}.log is:\n\t{}",
                content.trim_end().lines().last().unwrap_or_default()
            )),
            Err(err) => main_logger.log_error(&format!("cannot read thread_{i}.log: {err}")),
        }
    }
}
