use nrfjprog_errors::{ensure_vendor, BindingErrorCode, CaptureConfig, LogCapture, NrfjprogError, Result};
use std::thread;

/// Stand-in for a DLL function that logs through its callback from a worker thread.
fn program_file(log: LogCapture) -> i32 {
    let worker = thread::spawn(move || {
        log.record("Parsing hex file.\n");
        log.record("Erasing user code and UICR flash areas.\n");
        log.record("\u{1b}[31mERROR: Access protection is enabled.\u{1b}[0m\n");
    });
    let _ = worker.join();
    NrfjprogError::NotAvailableBecauseProtection.value()
}

fn program(capture: &LogCapture) -> Result<()> {
    ensure_vendor!(
        program_file(capture.clone()),
        BindingErrorCode::CouldNotProgram,
        "programming firmware.hex",
        capture
    );
    Ok(())
}

fn main() {
    println!("--- Log Capture Example ---\n");

    let capture = LogCapture::new(CaptureConfig {
        max_lines: 64,
        max_line_bytes: 256,
    });

    if let Err(err) = program(&capture) {
        print!("{}", err.message());
        println!("\nCaptured lines attached: {}", err.output().lines().count());
        println!("Capture now empty: {}", capture.is_empty());
    }
}
